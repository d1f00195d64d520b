//! Level-by-level traversal orchestration
//!
//! Each level runs in three phases:
//!
//! 1. **Partition**: split the level into at most `max_workers` chunks
//! 2. **Fetch**: one task per chunk, each with its own session, reporting
//!    neighbors into a shared [`FrontierBuilder`]
//! 3. **Join**: wait for every task before the next level is partitioned

use std::sync::Arc;
use tokio::task::JoinSet;

use crate::config::{CrawlerConfig, RetryPolicy};
use crate::error::Result;
use crate::fetch::{fetch_with_retry, HttpNeighborService, NeighborService};
use crate::frontier::{FrontierBuilder, VisitedSet};
use crate::node::{Level, NodeId, Traversal};
use crate::partition::partition;

/// Breadth-first crawler over a [`NeighborService`]
pub struct Crawler<S: NeighborService> {
    service: Arc<S>,
    config: CrawlerConfig,
}

impl Crawler<HttpNeighborService> {
    /// Crawler talking HTTP to `config.base_url`
    pub fn http(config: CrawlerConfig) -> Result<Self> {
        let service = HttpNeighborService::new(config.clone())?;
        Self::new(service, config)
    }
}

impl<S: NeighborService> Crawler<S> {
    pub fn new(service: S, config: CrawlerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            service: Arc::new(service),
            config,
        })
    }

    pub fn config(&self) -> &CrawlerConfig {
        &self.config
    }

    /// Run `depth` rounds of BFS from `start`.
    ///
    /// Never fails: nodes whose neighbors cannot be fetched contribute nothing.
    /// Level 0 is always `[start]`. Unless `stop_on_empty_level` is set, the
    /// result has exactly `depth + 1` levels, trailing ones possibly empty.
    pub async fn traverse(&self, start: NodeId, depth: usize) -> Traversal {
        let mut visited = VisitedSet::new();
        visited.insert(start.clone());
        let mut levels: Vec<Level> = vec![vec![start]];

        for d in 0..depth {
            let current = &levels[d];
            if current.is_empty() && self.config.stop_on_empty_level {
                tracing::info!(level = d, "Frontier exhausted, stopping early");
                break;
            }

            let (grown, next) = self.expand_level(d, current, visited).await;
            visited = grown;
            levels.push(next);
        }

        tracing::info!(
            levels = levels.len(),
            nodes = visited.len(),
            "Traversal complete"
        );
        Traversal::new(levels)
    }

    /// Fetch neighbors for every node of `current` and build the next level.
    async fn expand_level(&self, d: usize, current: &[NodeId], visited: VisitedSet) -> (VisitedSet, Level) {
        let chunks = partition(current, self.config.max_workers);
        let workers = chunks.len();
        let (chunk_size, remainder) = if workers > 0 {
            (current.len() / workers, current.len() % workers)
        } else {
            (0, 0)
        };

        tracing::info!(
            level = d,
            nodes = current.len(),
            workers,
            chunk_size,
            remainder,
            "Starting level"
        );

        let frontier = Arc::new(FrontierBuilder::new(visited));
        let mut tasks = JoinSet::new();

        for (worker, chunk) in chunks.into_iter().enumerate() {
            tasks.spawn(run_worker(
                worker,
                chunk.to_vec(),
                Arc::clone(&self.service),
                Arc::clone(&frontier),
                self.config.retry.clone(),
            ));
        }

        // Barrier: no level d+1 work before every level d worker is done
        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                tracing::error!(level = d, error = %e, "Worker terminated abnormally");
            }
        }

        let (visited, next) = match Arc::try_unwrap(frontier) {
            Ok(frontier) => frontier.finish(),
            Err(shared) => shared.take(),
        };

        tracing::info!(level = d + 1, nodes = next.len(), "Level built");
        (visited, next)
    }
}

/// Fetch neighbors for one chunk and report them to the frontier.
///
/// The session lives for the duration of the worker and is released on
/// every exit path.
async fn run_worker<S: NeighborService>(
    worker: usize,
    chunk: Vec<NodeId>,
    service: Arc<S>,
    frontier: Arc<FrontierBuilder>,
    policy: RetryPolicy,
) {
    let mut session = match service.open_session() {
        Ok(session) => session,
        Err(e) => {
            tracing::error!(worker, nodes = chunk.len(), error = %e, "Failed to open session");
            return;
        }
    };

    for node in &chunk {
        let outcome = fetch_with_retry(session.as_mut(), node, &policy).await;
        if !outcome.is_success() {
            tracing::warn!(worker, node = %node, "No neighbors recorded for node");
        }

        let mut accepted = 0usize;
        for neighbor in outcome.into_neighbors() {
            if frontier.report_neighbor(neighbor) {
                accepted += 1;
            }
        }
        tracing::debug!(worker, node = %node, accepted, "Node processed");
    }
}
