// Route Table - Symbolic node names mapped to backend base URLs
//
// Lets the rest of the console address peers as "node1"/"node2" without
// embedding network addresses in application logic. Requests written
// against the /api/<name> prefix are rewritten onto the target URL.

use std::collections::HashMap;
use thiserror::Error;

/// Prefix under which symbolic routes are addressed
const ROUTE_PREFIX: &str = "/api/";

/// Default home node, matching the reference deployment
pub const DEFAULT_NODE1: &str = "http://127.0.0.1:10000";
/// Default second node
pub const DEFAULT_NODE2: &str = "http://127.0.0.1:10001";

/// Routing errors
#[derive(Error, Debug)]
pub enum RouteError {
    #[error("Unknown node name: {0}")]
    UnknownNode(String),

    #[error("Path {0:?} does not start with {ROUTE_PREFIX}")]
    NotRoutable(String),
}

/// Mapping from symbolic node names to backend base URLs
#[derive(Clone, Debug)]
pub struct RouteTable {
    targets: HashMap<String, String>,
}

impl RouteTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            targets: HashMap::new(),
        }
    }

    /// Add or replace a route
    pub fn insert(&mut self, name: &str, target: &str) {
        self.targets
            .insert(name.to_string(), target.trim_end_matches('/').to_string());
    }

    /// Number of configured routes
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Check if no routes are configured
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Look up the base URL for a symbolic name
    pub fn target(&self, name: &str) -> Result<&str, RouteError> {
        self.targets
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| RouteError::UnknownNode(name.to_string()))
    }

    /// Rewrite an `/api/<name>/...` path onto the route's target URL,
    /// stripping the symbolic prefix.
    pub fn rewrite(&self, path: &str) -> Result<String, RouteError> {
        let remainder = path
            .strip_prefix(ROUTE_PREFIX)
            .ok_or_else(|| RouteError::NotRoutable(path.to_string()))?;

        let (name, rest) = match remainder.find('/') {
            Some(pos) => (&remainder[..pos], &remainder[pos..]),
            None => (remainder, ""),
        };

        let target = self.target(name)?;
        Ok(format!("{}{}", target, rest))
    }
}

impl Default for RouteTable {
    /// Two-node table matching the reference deployment
    fn default() -> Self {
        let mut table = Self::new();
        table.insert("node1", DEFAULT_NODE1);
        table.insert("node2", DEFAULT_NODE2);
        table
    }
}
