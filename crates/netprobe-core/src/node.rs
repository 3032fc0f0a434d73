//! Node and network types for connectivity checks

use serde::{Deserialize, Serialize};

/// 802.1Q VLAN identifier
pub type VlanId = u16;

/// A VLAN-tagged network segment on one interface
///
/// VLAN order is significant: the probe payload joins the ids in the order
/// they appear here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    /// Interface name (e.g. "eth0")
    pub iface: String,
    /// VLAN ids expected to be reachable on this interface
    pub vlans: Vec<VlanId>,
}

impl Network {
    pub fn new(iface: impl Into<String>, vlans: Vec<VlanId>) -> Self {
        Self {
            iface: iface.into(),
            vlans,
        }
    }
}

/// A cluster node taking part in a connectivity check
///
/// Input only; immutable for the duration of a check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Node identifier, unique within one check
    pub uid: String,
    /// Networks this node expects to probe, in declaration order
    pub networks: Vec<Network>,
}

impl Node {
    pub fn new(uid: impl Into<String>, networks: Vec<Network>) -> Self {
        Self {
            uid: uid.into(),
            networks,
        }
    }
}

/// Per-node check output: the networks whose VLANs were confirmed by
/// cross-node traffic evidence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedNetworks {
    /// Node this verdict belongs to
    pub uid: String,
    /// Interfaces with their verified VLAN ids
    pub networks: Vec<Network>,
}
