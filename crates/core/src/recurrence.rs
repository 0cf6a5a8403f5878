//! Cadence matching for recurring task templates.
//!
//! A [`Cadence`] decides whether a template is due to fire on a given
//! calendar date, guarded by the template's `last_generated_at` watermark.
//! This is the pure half of the scheduler: no store access, no clock --
//! the caller supplies a normalized "today" and the watermark.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Frequency
// ---------------------------------------------------------------------------

pub const FREQUENCY_DAILY: &str = "daily";
pub const FREQUENCY_WEEKLY: &str = "weekly";
pub const FREQUENCY_MONTHLY: &str = "monthly";

/// All valid frequency strings.
pub const VALID_FREQUENCIES: &[&str] = &[FREQUENCY_DAILY, FREQUENCY_WEEKLY, FREQUENCY_MONTHLY];

/// How often a recurring template fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    /// Convert from a database string value.
    ///
    /// Unknown values are a configuration error: the caller is expected to
    /// log a warning and treat the template as non-firing, never to abort
    /// the run.
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            FREQUENCY_DAILY => Ok(Self::Daily),
            FREQUENCY_WEEKLY => Ok(Self::Weekly),
            FREQUENCY_MONTHLY => Ok(Self::Monthly),
            _ => Err(CoreError::Configuration(format!(
                "Unknown frequency '{s}'. Must be one of: {}",
                VALID_FREQUENCIES.join(", ")
            ))),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => FREQUENCY_DAILY,
            Self::Weekly => FREQUENCY_WEEKLY,
            Self::Monthly => FREQUENCY_MONTHLY,
        }
    }
}

// ---------------------------------------------------------------------------
// Weekday parsing
// ---------------------------------------------------------------------------

/// Parse a stored weekday name ("monday" or "mon", case-insensitive).
pub fn parse_weekday(s: &str) -> Result<Weekday, CoreError> {
    match s.to_ascii_lowercase().as_str() {
        "monday" | "mon" => Ok(Weekday::Mon),
        "tuesday" | "tue" => Ok(Weekday::Tue),
        "wednesday" | "wed" => Ok(Weekday::Wed),
        "thursday" | "thu" => Ok(Weekday::Thu),
        "friday" | "fri" => Ok(Weekday::Fri),
        "saturday" | "sat" => Ok(Weekday::Sat),
        "sunday" | "sun" => Ok(Weekday::Sun),
        _ => Err(CoreError::Configuration(format!(
            "Unknown weekday name '{s}'"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Cadence
// ---------------------------------------------------------------------------

/// The calendar-matching half of a recurring template.
///
/// `days_of_week` is only consulted for weekly cadences and `day_of_month`
/// only for monthly ones; the unused field is ignored rather than rejected,
/// matching how templates are edited in practice (switching a template from
/// weekly to monthly leaves the old weekday list behind).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cadence {
    pub frequency: Frequency,
    pub days_of_week: Vec<Weekday>,
    pub day_of_month: Option<u32>,
}

impl Cadence {
    /// Build a cadence from raw stored fields.
    ///
    /// Fails with [`CoreError::Configuration`] for an unknown frequency, an
    /// unparseable weekday name on a weekly cadence, or a monthly cadence
    /// whose `day_of_month` is missing or outside 1..=31.
    pub fn from_fields(
        frequency: &str,
        days_of_week: &[String],
        day_of_month: Option<i32>,
    ) -> Result<Self, CoreError> {
        let frequency = Frequency::from_str_value(frequency)?;

        let days = match frequency {
            Frequency::Weekly => days_of_week
                .iter()
                .map(|d| parse_weekday(d))
                .collect::<Result<Vec<_>, _>>()?,
            _ => Vec::new(),
        };

        let dom = match frequency {
            Frequency::Monthly => match day_of_month {
                Some(d) if (1..=31).contains(&d) => Some(d as u32),
                Some(d) => {
                    return Err(CoreError::Configuration(format!(
                        "day_of_month {d} is outside 1..=31"
                    )))
                }
                None => {
                    return Err(CoreError::Configuration(
                        "Monthly cadence is missing day_of_month".to_string(),
                    ))
                }
            },
            _ => None,
        };

        Ok(Self {
            frequency,
            days_of_week: days,
            day_of_month: dom,
        })
    }

    /// Decide whether a template with this cadence is due on `today`.
    ///
    /// Step 1 is the idempotency guard: a watermark on today's date means
    /// the template already fired and must not fire again. After that the
    /// decision is purely calendar matching:
    ///
    /// - daily: always due;
    /// - weekly: due iff today's weekday is in `days_of_week`;
    /// - monthly: due iff today's day-of-month equals `day_of_month`. A
    ///   month shorter than `day_of_month` simply never matches -- there is
    ///   no clamping to month-end.
    pub fn is_due_on(&self, last_generated_at: Option<NaiveDate>, today: NaiveDate) -> bool {
        if last_generated_at == Some(today) {
            return false;
        }

        match self.frequency {
            Frequency::Daily => true,
            Frequency::Weekly => self.days_of_week.contains(&today.weekday()),
            Frequency::Monthly => self.day_of_month == Some(today.day()),
        }
    }
}
