//! Level-synchronized BFS over a remote neighbors service
//!
//! This crate explores a graph that only exists behind an HTTP endpoint
//! answering "who are the neighbors of X". Key concepts:
//!
//! - **Node**: Opaque string identifier, compared byte for byte
//! - **Level**: Nodes first discovered at a given BFS depth
//! - **Worker**: Task fetching neighbors for one contiguous chunk of a level
//! - **Frontier**: The next level, built concurrently by all workers
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Crawler                              │
//! │  ┌─────────┐  ┌─────────┐  ┌─────────┐                      │
//! │  │ Level 0 │→ │ Level 1 │→ │ Level 2 │→ ...                 │
//! │  └─────────┘  └─────────┘  └─────────┘                      │
//! │       │            │            │                           │
//! │       ▼            ▼            ▼                           │
//! │  ┌─────────────────────────────────────────────────────┐    │
//! │  │ Per-Level: Partition → Fetch (N workers) → Join     │    │
//! │  └─────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! A level is never started before every worker of the previous level has
//! joined. Failures are local to a node: a node whose neighbors cannot be
//! fetched simply contributes nothing to the next level.
//!
//! # Example
//!
//! ```rust,no_run
//! use neighbor_crawler::{Crawler, CrawlerConfig, NodeId};
//!
//! # async fn example() -> Result<(), neighbor_crawler::CrawlError> {
//! let crawler = Crawler::http(CrawlerConfig::default())?;
//! let traversal = crawler.traverse(NodeId::new("Tom Hanks"), 2).await;
//!
//! for (depth, level) in traversal.levels().iter().enumerate() {
//!     println!("level {depth}: {} nodes", level.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod crawler;
pub mod error;
pub mod fetch;
pub mod frontier;
pub mod node;
pub mod partition;

// Re-exports
pub use config::{CrawlerConfig, RetryPolicy};
pub use crawler::Crawler;
pub use error::{CrawlError, FetchFailure, Result};
pub use fetch::{
    decode_neighbors, fetch_with_retry, BoxedSession, FetchOutcome, HttpNeighborService,
    HttpSession, NeighborService, NeighborSession,
};
pub use frontier::{FrontierBuilder, VisitedSet};
pub use node::{Level, NodeId, Traversal};
pub use partition::partition;
