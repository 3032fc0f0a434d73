//! Traffic analysis: derive verified VLANs from the witness matrix
//!
//! A VLAN counts as verified on `(node, iface)` when at least one witness
//! other than the node itself was recorded for it, or more than one witness
//! in total. The degenerate case - exactly one witness and it is the
//! reporting node - means no cross-node evidence exists, so the VLAN's
//! connectivity is unverifiable and it is excluded from the result.

use std::collections::BTreeSet;

use crate::node::{Network, VerifiedNetworks, VlanId};
use crate::witness::WitnessEntry;

/// Verified networks for one witness-matrix entry
///
/// Pure transform: same entry, same result. An interface whose VLANs were
/// all self-witnessed still appears, with an empty VLAN list.
pub fn verified_networks(entry: &WitnessEntry) -> Vec<Network> {
    entry
        .data
        .neighbours
        .iter()
        .map(|(iface, vlans)| {
            let verified: BTreeSet<VlanId> = vlans
                .iter()
                .filter(|(_, witnesses)| {
                    !(witnesses.len() == 1 && witnesses.contains(&entry.sender_uid))
                })
                .map(|(vlan, _)| *vlan)
                .collect();
            Network::new(iface.clone(), verified.into_iter().collect())
        })
        .collect()
}

/// Assemble the final per-node result list from the witness matrix
///
/// One entry per reporting node; node order follows the matrix and is not an
/// invariant callers may rely on.
pub fn format_result(matrix: &[WitnessEntry]) -> Vec<VerifiedNetworks> {
    matrix
        .iter()
        .map(|entry| VerifiedNetworks {
            uid: entry.sender_uid.clone(),
            networks: verified_networks(entry),
        })
        .collect()
}
