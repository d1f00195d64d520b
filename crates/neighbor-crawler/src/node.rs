//! Node identifiers and traversal results

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a vertex in the remote graph.
///
/// Equality is exact string equality: `"tom hanks"` and `"Tom Hanks"` are
/// different nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a new node identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Nodes discovered at one BFS depth, in discovery order.
pub type Level = Vec<NodeId>;

/// Result of a traversal: one [`Level`] per depth, starting with the start node.
///
/// Every node appears in exactly one level.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Traversal {
    levels: Vec<Level>,
}

impl Traversal {
    pub(crate) fn new(levels: Vec<Level>) -> Self {
        Self { levels }
    }

    /// All levels, index 0 being `[start]`.
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// Level at `depth`, if that many rounds were run.
    pub fn level(&self, depth: usize) -> Option<&Level> {
        self.levels.get(depth)
    }

    /// Number of expansion rounds performed.
    pub fn depth(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }

    /// Total number of distinct nodes discovered, start node included.
    pub fn total_nodes(&self) -> usize {
        self.levels.iter().map(Vec::len).sum()
    }

    /// Whether `node` was discovered at any depth.
    pub fn contains(&self, node: &NodeId) -> bool {
        self.levels.iter().any(|level| level.contains(node))
    }

    pub fn into_levels(self) -> Vec<Level> {
        self.levels
    }
}

impl From<Vec<Level>> for Traversal {
    fn from(levels: Vec<Level>) -> Self {
        Self::new(levels)
    }
}
