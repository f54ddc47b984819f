//! Submission workflow
//!
//! Orchestrates validate → append → re-read for a submitted draft.
//! Validation failure short-circuits before any store I/O; after a
//! successful append the read path runs exactly once so the caller gets
//! the refreshed list in the same response. Failures are terminal for
//! the attempt, there is no retry.

use crate::store::{
    Recommendation, RecommendationDraft, RecommendationStore, StoreError, RECENT_LIMIT,
};
use crate::validate::{validate_draft, FieldErrors};

/// Outcome of a submission attempt that reached a decision.
///
/// Store failures surface as `Err(StoreError)` instead; the submit
/// control is re-enabled by the page regardless of which way this goes.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Validation rejected the draft; no store call was made
    Rejected(FieldErrors),
    /// Draft stored; list re-read and returned newest first
    Accepted {
        recommendations: Vec<Recommendation>,
    },
}

/// Validate and persist a draft, then refresh the list.
pub async fn submit(
    store: &dyn RecommendationStore,
    draft: &RecommendationDraft,
) -> Result<SubmitOutcome, StoreError> {
    let draft = draft.trimmed();

    let errors = validate_draft(&draft);
    if !errors.is_clean() {
        tracing::debug!(
            violations = errors.violation_count(),
            "Recommendation rejected by validation"
        );
        return Ok(SubmitOutcome::Rejected(errors));
    }

    store.add(&draft).await?;

    let recommendations = refresh(store).await?;
    tracing::info!(total = recommendations.len(), "Recommendation accepted");

    Ok(SubmitOutcome::Accepted { recommendations })
}

/// Read path: up to the 10 most recent records, newest first.
pub async fn refresh(
    store: &dyn RecommendationStore,
) -> Result<Vec<Recommendation>, StoreError> {
    store.recent(RECENT_LIMIT).await
}
