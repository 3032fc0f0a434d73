//! Netprobe Core - Data model and traffic analysis for VLAN connectivity checks
//!
//! This crate provides the foundational types for the Netprobe system:
//! - Node/network input model and verified-network output model
//! - Probe payload mapping (interface -> comma-joined VLAN list)
//! - Witness-matrix types reported back by the probing agents
//! - Traffic analysis deriving verified VLANs from cross-node witnesses

pub mod analysis;
pub mod node;
pub mod payload;
pub mod report;
pub mod witness;

pub use analysis::{format_result, verified_networks};
pub use node::{Network, Node, VerifiedNetworks, VlanId};
pub use payload::{PayloadError, ProbePayload};
pub use report::CheckReport;
pub use witness::{WitnessData, WitnessEntry};
