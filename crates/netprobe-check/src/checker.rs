//! Network connectivity checker
//!
//! The protocol runs in three strict phases with no overlap: every node's
//! listener is armed and acknowledged before the first probe frame goes out,
//! and every frame-send is acknowledged before the witness matrix is
//! collected. A frame sent before its target's listener is armed is lost and
//! cannot be recovered at this layer.

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use netprobe_agent::{ProbeAgentClient, ProgressReporter, ProgressUpdate, TargetScope};
use netprobe_core::{format_result, CheckReport, Node, ProbePayload, WitnessEntry};

/// Milestone reported once all listeners are armed
pub const PROGRESS_LISTENERS_ARMED: u8 = 30;
/// Milestone reported once all probe frames are sent
pub const PROGRESS_FRAMES_SENT: u8 = 60;

#[derive(Error, Debug)]
pub enum CheckError {
    /// Agent subsystem failure (unreachable agent, timeout, malformed
    /// response). Aborts the whole check; no partial results.
    #[error("agent transport failure: {0}")]
    Transport(#[from] anyhow::Error),
    /// A queried node is missing from the witness matrix
    #[error("no probing info reported for node {uid}")]
    MissingWitness { uid: String },
    /// A node's witness entry lacks one of its declared interfaces
    #[error("probing info for node {uid} has no data for interface {iface}")]
    MissingInterface { uid: String, iface: String },
}

/// Orchestrates one VLAN connectivity check across a set of node agents
///
/// A checker arms exclusive listener state on the agents it addresses, so
/// one instance must not serve overlapping checks against overlapping node
/// sets.
pub struct NetworkChecker {
    client: Arc<dyn ProbeAgentClient>,
    reporter: Arc<dyn ProgressReporter>,
}

impl NetworkChecker {
    pub fn new(client: Arc<dyn ProbeAgentClient>, reporter: Arc<dyn ProgressReporter>) -> Self {
        Self { client, reporter }
    }

    /// Run the full check and report which VLANs carried cross-node traffic
    ///
    /// Degenerate inputs short-circuit before any agent is contacted: an
    /// empty node list yields a structured error report, and a single node
    /// echoes its declared networks verbatim since connectivity cannot be
    /// tested with one participant.
    pub async fn check_network(&self, nodes: &[Node]) -> Result<CheckReport, CheckError> {
        if nodes.is_empty() {
            info!("Network checker: nodes list is empty. Nothing to check.");
            return Ok(CheckReport::empty_nodes());
        }
        if let [node] = nodes {
            info!("Network checker: nodes list contains one node only. Do nothing.");
            return Ok(CheckReport::single_node(node));
        }

        let uids: Vec<String> = nodes.iter().map(|node| node.uid.clone()).collect();

        self.start_frame_listeners(nodes).await?;
        self.reporter
            .report(ProgressUpdate::percent(PROGRESS_LISTENERS_ARMED));

        self.send_probing_frames(nodes).await?;
        self.reporter
            .report(ProgressUpdate::percent(PROGRESS_FRAMES_SENT));

        self.client
            .discover(&TargetScope::many(uids.clone()))
            .await?;
        let matrix = self.client.get_probing_info().await?;
        ensure_witness_coverage(nodes, &matrix)?;

        let result = format_result(&matrix);
        debug!(nodes = result.len(), "Network checking is done");
        Ok(CheckReport::nodes(result))
    }

    /// Phase 1: arm frame listeners on every node, one at a time
    async fn start_frame_listeners(&self, nodes: &[Node]) -> Result<(), CheckError> {
        for node in nodes {
            let payload = ProbePayload::from_networks(&node.networks);
            debug!(node = %node.uid, ?payload, "Network checker listen");
            let scope = TargetScope::single(&node.uid);
            self.client.discover(&scope).await?;
            self.client.start_frame_listeners(&scope, &payload).await?;
        }
        Ok(())
    }

    /// Phase 2: emit probe frames from every node, one at a time
    async fn send_probing_frames(&self, nodes: &[Node]) -> Result<(), CheckError> {
        for node in nodes {
            let payload = ProbePayload::from_networks(&node.networks);
            debug!(node = %node.uid, ?payload, "Network checker send");
            let scope = TargetScope::single(&node.uid);
            self.client.discover(&scope).await?;
            self.client.send_probing_frames(&scope, &payload).await?;
        }
        Ok(())
    }
}

/// Reject a matrix that silently dropped a queried node or interface
///
/// An empty VLAN list is a legitimate "nothing verified" verdict, so a
/// missing key has to surface as an error rather than read as one.
fn ensure_witness_coverage(nodes: &[Node], matrix: &[WitnessEntry]) -> Result<(), CheckError> {
    for node in nodes {
        let entry = matrix
            .iter()
            .find(|entry| entry.sender_uid == node.uid)
            .ok_or_else(|| CheckError::MissingWitness {
                uid: node.uid.clone(),
            })?;
        for network in &node.networks {
            if !entry.data.neighbours.contains_key(&network.iface) {
                return Err(CheckError::MissingInterface {
                    uid: node.uid.clone(),
                    iface: network.iface.clone(),
                });
            }
        }
    }
    Ok(())
}
