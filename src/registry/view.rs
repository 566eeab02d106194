// Registry View - Last-known peer set of the home node
//
// Display-only: the set is always replaced wholesale from what the
// server reports, never mutated or merged locally.

use crate::node::{NodeError, PeerAddress, PeerEndpoint};
use std::collections::BTreeSet;
use tracing::warn;

/// Holds and refreshes the registry listing of exactly one node
#[derive(Clone, Debug, Default)]
pub struct RegistryView {
    peers: BTreeSet<PeerAddress>,
}

impl RegistryView {
    /// Create an empty view
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently displayed peer set
    pub fn peers(&self) -> &BTreeSet<PeerAddress> {
        &self.peers
    }

    /// Number of peers currently displayed
    pub fn len(&self) -> usize {
        self.peers.len()
    }

    /// Check if no peers are displayed
    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    /// Check if a peer is in the displayed set
    pub fn contains(&self, peer: &PeerAddress) -> bool {
        self.peers.contains(peer)
    }

    /// Re-fetch the node's registry listing.
    ///
    /// On failure the previously displayed set stays as-is, so a
    /// transient outage never flashes an empty list; the error is
    /// reported upward.
    pub async fn refresh(
        &mut self,
        node: &dyn PeerEndpoint,
    ) -> Result<&BTreeSet<PeerAddress>, NodeError> {
        match node.list_nodes().await {
            Ok(nodes) => {
                self.peers = nodes.into_iter().collect();
                Ok(&self.peers)
            }
            Err(e) => {
                warn!(peer = %node.address(), "registry refresh failed, keeping stale view");
                Err(e)
            }
        }
    }

    /// Replace the displayed set with the server-reported total after a
    /// successful registration. The server is authoritative.
    pub fn apply_registration(&mut self, total_nodes: Vec<PeerAddress>) -> &BTreeSet<PeerAddress> {
        self.peers = total_nodes.into_iter().collect();
        &self.peers
    }
}
