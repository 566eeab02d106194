// Wire Types - What travels between the console and a node
//
// Mirrors the node backend's JSON contract. Everything here is
// request-scoped: built for one call, dropped once rendered.

use serde::{Deserialize, Serialize};

// ============================================================================
// PEER ADDRESS
// ============================================================================

/// Opaque network locator for a node (host:port or full URL).
///
/// Compared by exact string equality - no normalization, so
/// "127.0.0.1:10000" and "localhost:10000" are distinct peers.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeerAddress(String);

impl PeerAddress {
    /// Create a peer address from any string-like locator
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    /// Get the raw locator
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PeerAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PeerAddress {
    fn from(addr: &str) -> Self {
        Self::new(addr)
    }
}

// ============================================================================
// TRANSACTION
// ============================================================================

/// A transaction as submitted to a node's pool
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub recipient: String,
    pub amount: f64,
}

impl Transaction {
    /// Create a transaction with an already-numeric amount
    pub fn new(sender: impl Into<String>, recipient: impl Into<String>, amount: f64) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            amount,
        }
    }

    /// Create a transaction from a raw amount string.
    ///
    /// Non-numeric input becomes NaN and the submission is still
    /// attempted - the backend decides what to do with it. Callers
    /// that want to reject bad input up front use [`Transaction::try_new`].
    pub fn from_raw_amount(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        raw_amount: &str,
    ) -> Self {
        let amount = raw_amount.trim().parse::<f64>().unwrap_or(f64::NAN);
        Self::new(sender, recipient, amount)
    }

    /// Strict constructor: rejects amounts that do not parse as a number
    pub fn try_new(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        raw_amount: &str,
    ) -> Result<Self, super::NodeError> {
        let amount = raw_amount
            .trim()
            .parse::<f64>()
            .map_err(|_| super::NodeError::InvalidAmount(raw_amount.to_string()))?;
        Ok(Self::new(sender, recipient, amount))
    }

    /// Check whether the amount survived coercion
    pub fn has_numeric_amount(&self) -> bool {
        !self.amount.is_nan()
    }
}

// ============================================================================
// BLOCK
// ============================================================================

/// One block of a node's chain, read-only on the client
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// 1-based position in the chain
    pub index: u64,
    /// Unix timestamp with fractional seconds, as the backend emits it
    pub timestamp: f64,
    pub proof: u64,
    pub previous_hash: String,
    pub transactions: Vec<Transaction>,
}

// ============================================================================
// RESOLVE STATUS
// ============================================================================

/// What a node reported after running conflict resolution.
///
/// The backend answers with free text; the two recognized phrases are
/// classified here, at the protocol boundary, so nothing above this
/// module ever string-matches. Unrecognized wording folds into
/// `Unchanged` - a backend rewording silently reads as "no change".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolveStatus {
    /// The node adopted a longer chain from a peer
    Replaced,
    /// The node kept its own chain as the longest
    Authoritative,
    /// No change reported (or the message matched neither phrase)
    Unchanged,
}

/// Phrase signalling the node replaced its chain
const PHRASE_REPLACED: &str = "chain was replaced";
/// Phrase signalling the node kept its chain
const PHRASE_AUTHORITATIVE: &str = "chain is authoritative";

impl ResolveStatus {
    /// Classify a node's free-text resolve message
    pub fn from_message(message: &str) -> Self {
        if message.contains(PHRASE_REPLACED) {
            ResolveStatus::Replaced
        } else if message.contains(PHRASE_AUTHORITATIVE) {
            ResolveStatus::Authoritative
        } else {
            ResolveStatus::Unchanged
        }
    }

    /// Whether this status counts as a synchronized side
    pub fn is_synced(&self) -> bool {
        matches!(self, ResolveStatus::Replaced | ResolveStatus::Authoritative)
    }
}

// ============================================================================
// RESPONSE BODIES
// ============================================================================

/// Result of asking a node to mine a block
#[derive(Clone, Debug, Deserialize)]
pub struct MineReceipt {
    pub message: String,
    /// Index of the freshly forged block
    pub index: u64,
}

/// Generic `{message}` response body
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct MessageResponse {
    pub message: String,
}

/// `GET /chain` response body
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct ChainResponse {
    pub chain: Vec<Block>,
}

/// `POST /nodes/register` request body
#[derive(Clone, Debug, Serialize)]
pub(crate) struct RegisterRequest<'a> {
    pub nodes: &'a [PeerAddress],
}

/// `POST /nodes/register` response body
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct RegisterResponse {
    pub total_nodes: Vec<PeerAddress>,
}

/// `GET /nodes` response body
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct NodesResponse {
    pub nodes: Vec<PeerAddress>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_status_replaced() {
        let status = ResolveStatus::from_message("Our chain was replaced");
        assert_eq!(status, ResolveStatus::Replaced);
        assert!(status.is_synced());
    }

    #[test]
    fn test_resolve_status_authoritative() {
        let status = ResolveStatus::from_message("Our chain is authoritative");
        assert_eq!(status, ResolveStatus::Authoritative);
        assert!(status.is_synced());
    }

    #[test]
    fn test_resolve_status_unrecognized_folds_into_unchanged() {
        let status = ResolveStatus::from_message("no changes needed");
        assert_eq!(status, ResolveStatus::Unchanged);
        assert!(!status.is_synced());
    }

    #[test]
    fn test_raw_amount_coercion() {
        let tx = Transaction::from_raw_amount("alice", "bob", "12.5");
        assert_eq!(tx.amount, 12.5);
        assert!(tx.has_numeric_amount());
    }

    #[test]
    fn test_raw_amount_non_numeric_becomes_nan() {
        let tx = Transaction::from_raw_amount("alice", "bob", "abc");
        assert!(!tx.has_numeric_amount());
    }

    #[test]
    fn test_try_new_rejects_non_numeric() {
        let result = Transaction::try_new("alice", "bob", "abc");
        assert!(result.is_err());
    }

    #[test]
    fn test_peer_address_exact_equality() {
        // No normalization: textual variants are distinct peers
        assert_ne!(
            PeerAddress::new("127.0.0.1:10000"),
            PeerAddress::new("localhost:10000")
        );
        assert_eq!(
            PeerAddress::new("127.0.0.1:10000"),
            PeerAddress::new("127.0.0.1:10000")
        );
    }
}
