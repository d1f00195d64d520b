//! Neighbor fetching: transport sessions, payload decoding and retries
//!
//! - [`NeighborService`] hands out one [`NeighborSession`] per worker
//! - [`decode_neighbors`] turns a raw payload into node identifiers
//! - [`fetch_with_retry`] combines both under a [`RetryPolicy`](crate::RetryPolicy)

mod decode;
mod http;
mod retry;

use async_trait::async_trait;

use crate::error::{FetchFailure, Result};
use crate::node::NodeId;

pub use decode::decode_neighbors;
pub use http::{HttpNeighborService, HttpSession};
pub use retry::fetch_with_retry;

/// A transport handle owned by a single worker.
///
/// Sessions are never shared between workers. Dropping the session releases
/// its transport resources.
#[async_trait]
pub trait NeighborSession: Send {
    /// Fetch the raw neighbors payload for `node`, without retrying.
    async fn fetch_raw(&mut self, node: &NodeId) -> Result<String>;
}

pub type BoxedSession = Box<dyn NeighborSession>;

/// Source of per-worker sessions for the remote graph
pub trait NeighborService: Send + Sync + 'static {
    fn open_session(&self) -> Result<BoxedSession>;
}

/// Result of fetching one node's neighbors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Success(Vec<NodeId>),
    Failure(FetchFailure),
}

impl FetchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Neighbors to report; a failure contributes none.
    pub fn into_neighbors(self) -> Vec<NodeId> {
        match self {
            Self::Success(neighbors) => neighbors,
            Self::Failure(_) => Vec::new(),
        }
    }
}
