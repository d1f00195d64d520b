use super::{decode_neighbors, FetchOutcome, NeighborSession};
use crate::config::RetryPolicy;
use crate::error::FetchFailure;
use crate::node::NodeId;

/// Fetch and decode the neighbors of `node`.
///
/// Transient transport errors are retried up to `policy.max_attempts` times,
/// sleeping `policy.backoff_for(attempt)` between attempts. Decode failures
/// and non-transient errors end the fetch immediately.
pub async fn fetch_with_retry<S>(session: &mut S, node: &NodeId, policy: &RetryPolicy) -> FetchOutcome
where
    S: NeighborSession + ?Sized,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    let payload = loop {
        attempt += 1;
        match session.fetch_raw(node).await {
            Ok(payload) => break payload,
            Err(e) => {
                tracing::warn!(
                    node = %node,
                    attempt,
                    max_attempts,
                    error = %e,
                    "Neighbors request failed"
                );

                if !e.is_transient() || attempt >= max_attempts {
                    tracing::error!(node = %node, attempts = attempt, "Giving up on node");
                    return FetchOutcome::Failure(FetchFailure::Exhausted {
                        attempts: attempt,
                        last_error: e.to_string(),
                    });
                }

                tokio::time::sleep(policy.backoff_for(attempt)).await;
            }
        }
    };

    match decode_neighbors(&payload) {
        Ok(neighbors) => {
            tracing::debug!(node = %node, attempts = attempt, count = neighbors.len(), "Fetched neighbors");
            FetchOutcome::Success(neighbors)
        }
        Err(failure) => {
            tracing::warn!(node = %node, error = %failure, "Unusable neighbors payload");
            tracing::trace!(node = %node, payload = %payload, "Rejected payload");
            FetchOutcome::Failure(failure)
        }
    }
}
