//! Traffic-witness matrix reported by the probing agents
//!
//! After a probing round each agent reports, per interface and VLAN, the set
//! of node uids whose tagged frames its listener observed. This crate only
//! reads the matrix; it is evidence from a single round and is never merged
//! across checks.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::node::VlanId;

/// Witness sets for one reporting node: iface -> vlan -> observed uids
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WitnessData {
    pub neighbours: BTreeMap<String, BTreeMap<VlanId, BTreeSet<String>>>,
}

/// One witness-matrix entry, keyed by the node whose listener produced it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WitnessEntry {
    /// Node whose listener recorded these observations
    pub sender_uid: String,
    pub data: WitnessData,
}

impl WitnessEntry {
    pub fn new(sender_uid: impl Into<String>) -> Self {
        Self {
            sender_uid: sender_uid.into(),
            data: WitnessData::default(),
        }
    }

    /// Record `witness` as observed on `(iface, vlan)`
    pub fn record(&mut self, iface: &str, vlan: VlanId, witness: impl Into<String>) {
        self.data
            .neighbours
            .entry(iface.to_string())
            .or_default()
            .entry(vlan)
            .or_default()
            .insert(witness.into());
    }
}
