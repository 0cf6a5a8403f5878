//! Mandatory-acknowledgment flag propagation via the identity-claims
//! service.
//!
//! The identity provider is a separate system with no transactional
//! relationship to the task store, so flagging is best-effort by design:
//! each user is attempted independently, failures are logged and counted,
//! and nothing here ever rolls back already-committed tasks.

use std::time::Duration;

use async_trait::async_trait;

use flowdeck_core::types::DbId;

/// The claim merged into a flagged user's identity.
pub const MUST_ACKNOWLEDGE_CLAIM: &str = "must_acknowledge_tasks";

/// HTTP request timeout for a single claims call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for identity-claims failures.
#[derive(Debug, thiserror::Error)]
pub enum ClaimsError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The identity service returned a non-2xx status code.
    #[error("Identity service returned HTTP {0}")]
    HttpStatus(u16),
}

// ---------------------------------------------------------------------------
// ClaimsProvider
// ---------------------------------------------------------------------------

/// Identity-claims operations the scheduler consumes.
#[async_trait]
pub trait ClaimsProvider: Send + Sync {
    /// Merge the given claims fragment into the user's existing claims.
    ///
    /// A merge, not a replace: unrelated claims on the identity must be
    /// preserved.
    async fn merge_claims(
        &self,
        user_id: DbId,
        claims: &serde_json::Value,
    ) -> Result<(), ClaimsError>;
}

/// HTTP implementation of [`ClaimsProvider`] against the identity service.
pub struct HttpClaimsProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpClaimsProvider {
    /// Create a provider for the given identity service base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ClaimsProvider for HttpClaimsProvider {
    async fn merge_claims(
        &self,
        user_id: DbId,
        claims: &serde_json::Value,
    ) -> Result<(), ClaimsError> {
        let url = format!("{}/api/v1/users/{user_id}/claims", self.base_url);
        let body = serde_json::json!({ "claims": claims });

        let response = self.client.patch(&url).json(&body).send().await?;

        if !response.status().is_success() {
            return Err(ClaimsError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FlagPropagator
// ---------------------------------------------------------------------------

/// Outcome of one flag-propagation batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagResult {
    /// Users whose claim merge succeeded.
    pub succeeded: Vec<DbId>,
    /// Users whose claim merge failed; recorded and skipped.
    pub failed: Vec<DbId>,
}

/// Applies the must-acknowledge claim to assignees of mandatory templates.
pub struct FlagPropagator;

impl FlagPropagator {
    /// Flag each user with the must-acknowledge claim, one at a time.
    ///
    /// A failure for one user is logged and recorded, never aborts the
    /// batch. The caller has already committed the run's tasks; this step
    /// has no way (and no need) to undo them.
    pub async fn flag_users<C: ClaimsProvider + ?Sized>(
        provider: &C,
        user_ids: &[DbId],
    ) -> FlagResult {
        let claims = serde_json::json!({ MUST_ACKNOWLEDGE_CLAIM: true });
        let mut result = FlagResult::default();

        for &user_id in user_ids {
            match provider.merge_claims(user_id, &claims).await {
                Ok(()) => result.succeeded.push(user_id),
                Err(e) => {
                    tracing::warn!(user_id, error = %e, "Failed to flag user for acknowledgment");
                    result.failed.push(user_id);
                }
            }
        }

        result
    }
}
