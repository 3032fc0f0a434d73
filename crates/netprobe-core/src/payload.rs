//! Probe payload mapping between networks and the agent wire format
//!
//! Agents take the VLAN plan as a flat map of interface name to a
//! comma-joined VLAN id list, e.g. `{"eth0": "10,20"}`.

use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};
use thiserror::Error;
use tracing::warn;

use crate::node::{Network, VlanId};

#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("invalid VLAN id {value:?} for interface {iface}")]
    InvalidVlan { iface: String, value: String },
}

/// Per-node probe payload sent with listener-start and frame-send commands
///
/// Serializes transparently as the interface map the agents expect. Built
/// fresh for each phase invocation and not retained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProbePayload {
    interfaces: BTreeMap<String, String>,
}

impl ProbePayload {
    /// Build the payload for one node's networks
    ///
    /// VLAN ids are joined in their declared order. A duplicate interface
    /// name overwrites the earlier entry (last write wins); the overwrite is
    /// logged so stricter callers can alert on it.
    pub fn from_networks(networks: &[Network]) -> Self {
        let mut interfaces = BTreeMap::new();
        for network in networks {
            let vlans = network
                .vlans
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(",");
            if let Some(previous) = interfaces.insert(network.iface.clone(), vlans) {
                warn!(
                    iface = %network.iface,
                    dropped = %previous,
                    "Duplicate interface in networks, keeping the last entry"
                );
            }
        }
        Self { interfaces }
    }

    /// Parse the payload back into `(iface, vlans)` pairs
    ///
    /// Inverse of [`from_networks`](Self::from_networks); VLAN order within
    /// each interface is preserved. Used by agents to arm their listeners.
    pub fn to_networks(&self) -> Result<Vec<Network>, PayloadError> {
        let mut networks = Vec::with_capacity(self.interfaces.len());
        for (iface, joined) in &self.interfaces {
            let mut vlans = Vec::new();
            for part in joined.split(',').filter(|p| !p.is_empty()) {
                let vlan: VlanId = part.parse().map_err(|_| PayloadError::InvalidVlan {
                    iface: iface.clone(),
                    value: part.to_string(),
                })?;
                vlans.push(vlan);
            }
            networks.push(Network::new(iface.clone(), vlans));
        }
        Ok(networks)
    }

    /// VLAN list string for one interface, if present
    pub fn get(&self, iface: &str) -> Option<&str> {
        self.interfaces.get(iface).map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.interfaces.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }

    pub fn len(&self) -> usize {
        self.interfaces.len()
    }
}
