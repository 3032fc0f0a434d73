//! Check report returned to the caller
//!
//! Serializes to one of two JSON shapes:
//! `{"status": "error", "error": "..."}` or `{"nodes": [...]}`.

use serde::{Deserialize, Serialize};

use crate::node::{Node, VerifiedNetworks};

/// Error message for the empty-input short circuit
pub const EMPTY_NODES_ERROR: &str = "Nodes list is empty. Nothing to check.";

/// Outcome of a connectivity check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CheckReport {
    Error {
        status: String,
        error: String,
    },
    Nodes {
        nodes: Vec<VerifiedNetworks>,
    },
}

impl CheckReport {
    /// Structured error outcome (always carries `status: "error"`)
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            status: "error".to_string(),
            error: message.into(),
        }
    }

    /// The empty-input short circuit
    pub fn empty_nodes() -> Self {
        Self::error(EMPTY_NODES_ERROR)
    }

    /// Single-node short circuit: connectivity cannot be tested with one
    /// participant, so the node's declared networks are echoed verbatim
    pub fn single_node(node: &Node) -> Self {
        Self::Nodes {
            nodes: vec![VerifiedNetworks {
                uid: node.uid.clone(),
                networks: node.networks.clone(),
            }],
        }
    }

    pub fn nodes(nodes: Vec<VerifiedNetworks>) -> Self {
        Self::Nodes { nodes }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}
