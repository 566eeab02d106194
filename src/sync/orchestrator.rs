// Orchestrator - Drives two peers through registration and resolution
//
// The two peers are separate failure domains: within each step both
// calls are issued before either is awaited, and one side erroring
// never prevents the sibling call. Resolution never starts before
// registration has settled for both sides.

use super::{RegistrationFailure, SideReport, SyncReport};
use crate::node::PeerEndpoint;
use std::slice;
use tracing::{info, warn};

/// Dual-node synchronization orchestrator.
///
/// Stateless between runs: every run returns its findings in a
/// [`SyncReport`]. Peer A doubles as the home node whose chain is
/// refreshed after classification.
pub struct Orchestrator<'a> {
    peer_a: &'a dyn PeerEndpoint,
    peer_b: &'a dyn PeerEndpoint,
}

impl<'a> Orchestrator<'a> {
    /// Create an orchestrator over two peers; `peer_a` is the home node
    pub fn new(peer_a: &'a dyn PeerEndpoint, peer_b: &'a dyn PeerEndpoint) -> Self {
        Self { peer_a, peer_b }
    }

    /// Run one full synchronization pass:
    /// mutual registration, independent resolution, classification,
    /// then a chain refresh on the home node regardless of outcome.
    pub async fn synchronize(&self) -> SyncReport {
        let registration_failures = self.register_mutually().await;

        let (result_a, result_b) = tokio::join!(
            self.peer_a.resolve_conflicts(),
            self.peer_b.resolve_conflicts(),
        );

        let side_a = SideReport::new(self.peer_a.address().clone(), result_a);
        let side_b = SideReport::new(self.peer_b.address().clone(), result_b);

        // The displayed chain must reflect any replacement that just
        // happened, even on a partial or failed run.
        let refreshed_chain = match self.peer_a.fetch_chain().await {
            Ok(chain) => Some(chain),
            Err(e) => {
                warn!(peer = %self.peer_a.address(), error = %e, "post-sync chain refresh failed");
                None
            }
        };

        let report = SyncReport::new(side_a, side_b, registration_failures, refreshed_chain);
        info!(outcome = ?report.outcome(), "synchronization finished");
        report
    }

    /// Register each peer with the other. Both calls are attempted no
    /// matter what; a one-sided success is kept, not rolled back.
    async fn register_mutually(&self) -> Vec<RegistrationFailure> {
        let (result_a, result_b) = tokio::join!(
            self.peer_a.register_nodes(slice::from_ref(self.peer_b.address())),
            self.peer_b.register_nodes(slice::from_ref(self.peer_a.address())),
        );

        let mut failures = Vec::new();
        if let Err(error) = result_a {
            warn!(peer = %self.peer_a.address(), %error, "registration failed");
            failures.push(RegistrationFailure {
                peer: self.peer_a.address().clone(),
                error,
            });
        }
        if let Err(error) = result_b {
            warn!(peer = %self.peer_b.address(), %error, "registration failed");
            failures.push(RegistrationFailure {
                peer: self.peer_b.address().clone(),
                error,
            });
        }
        failures
    }
}
