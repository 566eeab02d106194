// Session - Explicit client-side state for one console run
//
// Owns what the browser original kept as ambient component state: the
// displayed chain, the registry view, and the last status line. Every
// operation converts failures into a status string instead of raising,
// so a dead backend never halts the console.

use crate::node::{Block, NodeError, PeerAddress, PeerEndpoint, Transaction};
use crate::registry::RegistryView;
use crate::sync::Orchestrator;
use tracing::warn;

/// Generic hint shown when a plain operation cannot reach the backend
const BACKEND_HINT: &str = "Ensure the backend is running.";

/// One console session over a home node and one sibling peer
pub struct Session {
    home: Box<dyn PeerEndpoint>,
    peer: Box<dyn PeerEndpoint>,
    chain: Vec<Block>,
    registry: RegistryView,
    status: Option<String>,
}

impl Session {
    /// Create a session; `home` is the node whose chain and registry
    /// are displayed
    pub fn new(home: Box<dyn PeerEndpoint>, peer: Box<dyn PeerEndpoint>) -> Self {
        Self {
            home,
            peer,
            chain: Vec::new(),
            registry: RegistryView::new(),
            status: None,
        }
    }

    /// The currently displayed chain
    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    /// The currently displayed registry
    pub fn registry(&self) -> &RegistryView {
        &self.registry
    }

    /// The last status line, if any
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Ask the home node to mine one block
    pub async fn mine(&mut self) -> &str {
        let status = match self.home.mine().await {
            Ok(receipt) => format!("Block Mined: {}", receipt.index),
            Err(e) => {
                warn!(error = %e, "mine failed");
                format!("Mining failed. {}", BACKEND_HINT)
            }
        };
        self.set_status(status)
    }

    /// Submit a transaction built from raw user input.
    ///
    /// A non-numeric amount is coerced to NaN and still submitted; the
    /// backend owns validation.
    pub async fn send_transaction(
        &mut self,
        sender: &str,
        recipient: &str,
        raw_amount: &str,
    ) -> &str {
        let tx = Transaction::from_raw_amount(sender, recipient, raw_amount);
        let status = match self.home.submit_transaction(&tx).await {
            Ok(message) => message,
            Err(e) => {
                warn!(error = %e, "transaction failed");
                format!("Transaction failed. {}", BACKEND_HINT)
            }
        };
        self.set_status(status)
    }

    /// Re-fetch the home node's chain. On failure the previous chain
    /// stays on display; a later successful fetch replaces it wholesale.
    pub async fn refresh_chain(&mut self) -> Result<&[Block], NodeError> {
        let chain = self.home.fetch_chain().await?;
        self.chain = chain;
        Ok(&self.chain)
    }

    /// Re-fetch the home node's registry listing, keeping the stale
    /// view on failure
    pub async fn refresh_registry(&mut self) -> Result<(), NodeError> {
        self.registry.refresh(self.home.as_ref()).await?;
        Ok(())
    }

    /// Register a peer with the home node; the displayed registry is
    /// replaced with the server's authoritative total
    pub async fn register_peer(&mut self, peer: PeerAddress) -> Result<(), NodeError> {
        let total = self.home.register_nodes(std::slice::from_ref(&peer)).await?;
        self.registry.apply_registration(total);
        Ok(())
    }

    /// Run the dual-node synchronization workflow and fold its report
    /// into the session: refreshed chain applied when available, status
    /// line composed from the outcome and any registration failures.
    pub async fn synchronize(&mut self) -> &str {
        let report = Orchestrator::new(self.home.as_ref(), self.peer.as_ref())
            .synchronize()
            .await;

        let mut status = report.status_message();
        if let Some(registration) = report.registration_message() {
            status = format!("{} ({})", status, registration);
        }

        if let Some(chain) = report.into_refreshed_chain() {
            self.chain = chain;
        }
        self.set_status(status)
    }

    fn set_status(&mut self, status: String) -> &str {
        self.status = Some(status);
        self.status.as_deref().unwrap_or_default()
    }
}
