//! Read-back of persisted records for progress views.

use calma_core::keys;
use calma_core::models::assessment::AssessmentResponse;
use calma_core::models::mindfulness::MindfulnessSessionRecord;
use calma_instruments::interpretation::{self, InterpretationBand};
use calma_instruments::registry::ScaleRegistry;
use calma_instruments::scoring;
use calma_storage::records::RecordStore;
use serde::Serialize;

use crate::error::SessionError;

/// Responses for one scale, oldest first.
///
/// Records that no longer agree with the scale definition (wrong length,
/// illegal values, a score that does not recompute) are skipped.
pub fn assessment_history(
    store: &RecordStore,
    registry: &ScaleRegistry,
    scale_id: &str,
) -> Result<Vec<AssessmentResponse>, SessionError> {
    let scale = registry.get(scale_id)?;
    let mut responses: Vec<AssessmentResponse> =
        store.load(&keys::assessment_responses(scale_id))?;

    responses.retain(|response| match scoring::validate_response(scale, response) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(scale_id, id = %response.id, error = %e, "skipping inconsistent response");
            false
        }
    });
    responses.sort_by_key(|r| r.created_at);
    Ok(responses)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LatestResult {
    pub scale_id: String,
    pub scale_name: String,
    pub response: AssessmentResponse,
    pub band: InterpretationBand,
}

/// The most recent response for every registered scale that has one.
pub fn latest_results(
    store: &RecordStore,
    registry: &ScaleRegistry,
) -> Result<Vec<LatestResult>, SessionError> {
    let mut results = Vec::new();
    for scale in registry.iter() {
        let Some(latest) = assessment_history(store, registry, &scale.id)?.pop() else {
            continue;
        };
        let Some(band) = interpretation::resolve(scale, latest.score) else {
            continue;
        };
        results.push(LatestResult {
            scale_id: scale.id.clone(),
            scale_name: scale.name.clone(),
            band: band.clone(),
            response: latest,
        });
    }
    Ok(results)
}

/// Mindfulness sessions, oldest first.
pub fn session_history(store: &RecordStore) -> Result<Vec<MindfulnessSessionRecord>, SessionError> {
    let mut records: Vec<MindfulnessSessionRecord> = store.load(keys::MINDFULNESS_SESSIONS)?;
    records.sort_by_key(|r| r.created_at);
    Ok(records)
}

pub fn clear_assessments(
    store: &RecordStore,
    registry: &ScaleRegistry,
    scale_id: &str,
) -> Result<(), SessionError> {
    registry.get(scale_id)?;
    store.clear(&keys::assessment_responses(scale_id))?;
    Ok(())
}

pub fn clear_sessions(store: &RecordStore) -> Result<(), SessionError> {
    store.clear(keys::MINDFULNESS_SESSIONS)?;
    Ok(())
}
