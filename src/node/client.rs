// Node Client - One logical operation, one HTTP call, one peer
//
// Translates console operations into the node backend's JSON contract
// and normalizes success and failure into a uniform result. No retries,
// no caching, no state beyond the configured base URL.

use super::types::{
    ChainResponse, MessageResponse, MineReceipt, NodesResponse, RegisterRequest, RegisterResponse,
};
use super::{Block, PeerAddress, ResolveStatus, Transaction};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Default per-request timeout; the transport default, nothing stricter
const REQUEST_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// NODE ERROR
// ============================================================================

/// Errors from talking to a node
#[derive(Error, Debug)]
pub enum NodeError {
    #[error("Connection to {peer} failed: {reason}")]
    Connection { peer: PeerAddress, reason: String },

    #[error("Node {peer} answered HTTP {status}")]
    Status { peer: PeerAddress, status: u16 },

    #[error("Undecodable response from {peer}: {reason}")]
    Protocol { peer: PeerAddress, reason: String },

    #[error("Amount {0:?} is not a number")]
    InvalidAmount(String),
}

// ============================================================================
// PEER ENDPOINT TRAIT
// ============================================================================

/// The operations a peer node exposes to the console.
///
/// The orchestrator and the registry view work against this trait so
/// they can be exercised without a running backend (see `MockNode`).
#[async_trait]
pub trait PeerEndpoint: Send + Sync {
    /// The address this peer advertises to other nodes
    fn address(&self) -> &PeerAddress;

    /// Ask the node to mine one block
    async fn mine(&self) -> Result<MineReceipt, NodeError>;

    /// Submit a transaction to the node's pool
    async fn submit_transaction(&self, tx: &Transaction) -> Result<String, NodeError>;

    /// Fetch the node's full chain
    async fn fetch_chain(&self) -> Result<Vec<Block>, NodeError>;

    /// Register peers with this node; returns the server's total set
    async fn register_nodes(&self, peers: &[PeerAddress]) -> Result<Vec<PeerAddress>, NodeError>;

    /// List the peers this node currently knows
    async fn list_nodes(&self) -> Result<Vec<PeerAddress>, NodeError>;

    /// Run conflict resolution on the node, classified at the boundary
    async fn resolve_conflicts(&self) -> Result<ResolveStatus, NodeError>;
}

// Shared handles count as endpoints, so tests can keep a handle to a
// mock after moving it into a session.
#[async_trait]
impl<T: PeerEndpoint + ?Sized> PeerEndpoint for std::sync::Arc<T> {
    fn address(&self) -> &PeerAddress {
        (**self).address()
    }

    async fn mine(&self) -> Result<MineReceipt, NodeError> {
        (**self).mine().await
    }

    async fn submit_transaction(&self, tx: &Transaction) -> Result<String, NodeError> {
        (**self).submit_transaction(tx).await
    }

    async fn fetch_chain(&self) -> Result<Vec<Block>, NodeError> {
        (**self).fetch_chain().await
    }

    async fn register_nodes(&self, peers: &[PeerAddress]) -> Result<Vec<PeerAddress>, NodeError> {
        (**self).register_nodes(peers).await
    }

    async fn list_nodes(&self) -> Result<Vec<PeerAddress>, NodeError> {
        (**self).list_nodes().await
    }

    async fn resolve_conflicts(&self) -> Result<ResolveStatus, NodeError> {
        (**self).resolve_conflicts().await
    }
}

// ============================================================================
// NODE CLIENT
// ============================================================================

/// HTTP implementation of [`PeerEndpoint`] against one node backend
pub struct NodeClient {
    address: PeerAddress,
    base_url: String,
    client: reqwest::Client,
}

impl NodeClient {
    /// Create a client for the node at `base_url`
    pub fn new(base_url: &str) -> Result<Self, NodeError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| NodeError::Connection {
                peer: PeerAddress::new(&base_url),
                reason: e.to_string(),
            })?;

        Ok(Self {
            address: PeerAddress::new(&base_url),
            base_url,
            client,
        })
    }

    /// Override the address advertised to sibling nodes.
    ///
    /// Useful when the node is reached through one URL but registered
    /// with peers under another (e.g. a LAN address).
    pub fn with_advertised_address(mut self, address: PeerAddress) -> Self {
        self.address = address;
        self
    }

    async fn get<T>(&self, path: &str) -> Result<T, NodeError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "GET");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;
        self.decode(response).await
    }

    async fn post<T>(&self, path: &str, body: &impl serde::Serialize) -> Result<T, NodeError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "POST");
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;
        self.decode(response).await
    }

    async fn decode<T>(&self, response: reqwest::Response) -> Result<T, NodeError>
    where
        T: serde::de::DeserializeOwned,
    {
        let status = response.status();
        if !status.is_success() {
            return Err(NodeError::Status {
                peer: self.address.clone(),
                status: status.as_u16(),
            });
        }
        let text = response.text().await.map_err(|e| NodeError::Protocol {
            peer: self.address.clone(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&text).map_err(|e| NodeError::Protocol {
            peer: self.address.clone(),
            reason: e.to_string(),
        })
    }

    fn connection_error(&self, e: reqwest::Error) -> NodeError {
        NodeError::Connection {
            peer: self.address.clone(),
            reason: e.to_string(),
        }
    }
}

#[async_trait]
impl PeerEndpoint for NodeClient {
    fn address(&self) -> &PeerAddress {
        &self.address
    }

    async fn mine(&self) -> Result<MineReceipt, NodeError> {
        self.get("/mine").await
    }

    async fn submit_transaction(&self, tx: &Transaction) -> Result<String, NodeError> {
        if !tx.has_numeric_amount() {
            // Current behavior is permissive: the call is still issued
            // and the amount serializes as JSON null.
            warn!(sender = %tx.sender, "transaction amount is not a number, sending anyway");
        }
        let response: MessageResponse = self.post("/transaction", tx).await?;
        Ok(response.message)
    }

    async fn fetch_chain(&self) -> Result<Vec<Block>, NodeError> {
        let response: ChainResponse = self.get("/chain").await?;
        Ok(response.chain)
    }

    async fn register_nodes(&self, peers: &[PeerAddress]) -> Result<Vec<PeerAddress>, NodeError> {
        let response: RegisterResponse = self
            .post("/nodes/register", &RegisterRequest { nodes: peers })
            .await?;
        Ok(response.total_nodes)
    }

    async fn list_nodes(&self) -> Result<Vec<PeerAddress>, NodeError> {
        let response: NodesResponse = self.get("/nodes").await?;
        Ok(response.nodes)
    }

    async fn resolve_conflicts(&self) -> Result<ResolveStatus, NodeError> {
        let response: MessageResponse = self.get("/nodes/resolve").await?;
        debug!(peer = %self.address, message = %response.message, "resolve answered");
        Ok(ResolveStatus::from_message(&response.message))
    }
}
