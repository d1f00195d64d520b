//! Error types for the crawler

use reqwest::StatusCode;
use thiserror::Error;

use crate::node::NodeId;

pub type Result<T> = std::result::Result<T, CrawlError>;

/// Errors raised while configuring the crawler or talking to the neighbors service
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid base URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Request for '{node}' failed: {source}")]
    Transport {
        node: NodeId,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request for '{node}' returned HTTP {status}")]
    Status { node: NodeId, status: StatusCode },

    #[error("Failed to open session: {0}")]
    Session(String),
}

impl CrawlError {
    /// Whether another attempt at the same request may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Status { .. })
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

/// Why a node contributed no neighbors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    #[error("gave up after {attempts} attempts: {last_error}")]
    Exhausted { attempts: u32, last_error: String },

    #[error("malformed payload: {0}")]
    Malformed(String),

    #[error("payload has no 'neighbors' array")]
    MissingNeighbors,
}
