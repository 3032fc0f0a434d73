//! Simulated agent mesh
//!
//! In-process stand-in for the real per-node agents, mirroring their
//! semantics: listeners must be armed before frames arrive, a frame sent on
//! an (iface, vlan) pair is heard only by nodes whose listener covers that
//! pair, and a severed pair drops frames between distinct nodes while the
//! sender still hears its own traffic. That last case produces the
//! self-witness-only signature the analyzer classifies as unverifiable.

use anyhow::{bail, Result};
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use tokio::sync::RwLock;
use tracing::debug;

use netprobe_core::{ProbePayload, VlanId, WitnessEntry};

use crate::client::{ProbeAgentClient, TargetScope};

#[derive(Default)]
struct MeshState {
    /// Armed listeners: uid -> iface -> vlans covered
    armed: BTreeMap<String, BTreeMap<String, BTreeSet<VlanId>>>,
    /// Observations accumulated during this round, one entry per armed node
    witnesses: BTreeMap<String, WitnessEntry>,
    /// (iface, vlan) pairs with no connectivity between distinct nodes
    severed: HashSet<(String, VlanId)>,
}

/// Simulated mesh of probing agents for the given node uids
pub struct SimAgentMesh {
    uids: HashSet<String>,
    state: RwLock<MeshState>,
}

impl SimAgentMesh {
    pub fn new(uids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            uids: uids.into_iter().map(Into::into).collect(),
            state: RwLock::new(MeshState::default()),
        }
    }

    /// Cut connectivity on `(iface, vlan)` between distinct nodes
    pub async fn sever(&self, iface: impl Into<String>, vlan: VlanId) {
        let mut state = self.state.write().await;
        state.severed.insert((iface.into(), vlan));
    }

    fn check_known(&self, targets: &TargetScope) -> Result<()> {
        for uid in targets.uids() {
            if !self.uids.contains(uid) {
                bail!("unknown node uid {uid}");
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ProbeAgentClient for SimAgentMesh {
    async fn discover(&self, targets: &TargetScope) -> Result<()> {
        // Addressing is immediate in-process; only validate the scope
        self.check_known(targets)
    }

    async fn start_frame_listeners(
        &self,
        targets: &TargetScope,
        payload: &ProbePayload,
    ) -> Result<()> {
        self.check_known(targets)?;
        let networks = payload.to_networks()?;

        let mut guard = self.state.write().await;
        let state = &mut *guard;
        for uid in targets.uids() {
            let listener = state.armed.entry(uid.to_string()).or_default();
            let entry = state
                .witnesses
                .entry(uid.to_string())
                .or_insert_with(|| WitnessEntry::new(uid));
            for network in &networks {
                listener.insert(network.iface.clone(), network.vlans.iter().copied().collect());
                // An armed interface reports even when it hears nothing
                entry
                    .data
                    .neighbours
                    .entry(network.iface.clone())
                    .or_default();
            }
            debug!(node = %uid, interfaces = networks.len(), "Sim listeners armed");
        }
        Ok(())
    }

    async fn send_probing_frames(
        &self,
        targets: &TargetScope,
        payload: &ProbePayload,
    ) -> Result<()> {
        self.check_known(targets)?;
        let networks = payload.to_networks()?;

        let mut state = self.state.write().await;
        for sender in targets.uids() {
            for network in &networks {
                for &vlan in &network.vlans {
                    let severed = state.severed.contains(&(network.iface.clone(), vlan));
                    let hearers: Vec<String> = state
                        .armed
                        .iter()
                        .filter(|(uid, listener)| {
                            let covers = listener
                                .get(&network.iface)
                                .is_some_and(|vlans| vlans.contains(&vlan));
                            // A frame that never gets past a severed segment
                            // is still heard by its own sender
                            covers && (uid.as_str() == sender || !severed)
                        })
                        .map(|(uid, _)| uid.clone())
                        .collect();
                    for hearer in hearers {
                        if let Some(entry) = state.witnesses.get_mut(&hearer) {
                            entry.record(&network.iface, vlan, sender);
                        }
                    }
                }
            }
            debug!(node = %sender, "Sim probing frames sent");
        }
        Ok(())
    }

    async fn get_probing_info(&self) -> Result<Vec<WitnessEntry>> {
        let state = self.state.read().await;
        Ok(state.witnesses.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netprobe_core::Network;

    fn payload(iface: &str, vlans: Vec<VlanId>) -> ProbePayload {
        ProbePayload::from_networks(&[Network::new(iface, vlans)])
    }

    #[tokio::test]
    async fn test_armed_nodes_hear_each_other() {
        let mesh = SimAgentMesh::new(["1", "2"]);
        let p = payload("eth0", vec![10]);

        mesh.start_frame_listeners(&TargetScope::single("1"), &p)
            .await
            .unwrap();
        mesh.start_frame_listeners(&TargetScope::single("2"), &p)
            .await
            .unwrap();
        mesh.send_probing_frames(&TargetScope::single("1"), &p)
            .await
            .unwrap();

        let info = mesh.get_probing_info().await.unwrap();
        let two = info.iter().find(|e| e.sender_uid == "2").unwrap();
        assert!(two.data.neighbours["eth0"][&10].contains("1"));
    }

    #[tokio::test]
    async fn test_frames_before_arming_are_lost() {
        let mesh = SimAgentMesh::new(["1", "2"]);
        let p = payload("eth0", vec![10]);

        // Node 2 never arms its listener
        mesh.start_frame_listeners(&TargetScope::single("1"), &p)
            .await
            .unwrap();
        mesh.send_probing_frames(&TargetScope::single("1"), &p)
            .await
            .unwrap();

        let info = mesh.get_probing_info().await.unwrap();
        assert_eq!(info.len(), 1);
        let one = &info[0];
        assert_eq!(one.sender_uid, "1");
        // Only the self-witness exists
        assert_eq!(
            one.data.neighbours["eth0"][&10],
            BTreeSet::from(["1".to_string()])
        );
    }

    #[tokio::test]
    async fn test_severed_vlan_keeps_self_witness_only() {
        let mesh = SimAgentMesh::new(["1", "2"]);
        let p = payload("eth0", vec![10, 20]);
        mesh.sever("eth0", 20).await;

        for uid in ["1", "2"] {
            mesh.start_frame_listeners(&TargetScope::single(uid), &p)
                .await
                .unwrap();
        }
        for uid in ["1", "2"] {
            mesh.send_probing_frames(&TargetScope::single(uid), &p)
                .await
                .unwrap();
        }

        let info = mesh.get_probing_info().await.unwrap();
        for entry in &info {
            let eth0 = &entry.data.neighbours["eth0"];
            assert_eq!(eth0[&10].len(), 2, "vlan 10 heard from both nodes");
            assert_eq!(
                eth0[&20],
                BTreeSet::from([entry.sender_uid.clone()]),
                "vlan 20 self-witnessed only"
            );
        }
    }

    #[tokio::test]
    async fn test_unknown_uid_is_rejected() {
        let mesh = SimAgentMesh::new(["1"]);
        let err = mesh.discover(&TargetScope::single("9")).await.unwrap_err();
        assert!(err.to_string().contains("unknown node uid"));
    }
}
