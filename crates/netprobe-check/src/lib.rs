//! Netprobe Check - Three-phase VLAN connectivity check orchestration
//!
//! Drives the probing protocol against a set of node agents: arm every
//! node's frame listeners, have every node emit tagged probe frames, then
//! collect the traffic-witness matrix and derive which VLANs actually
//! carried traffic between nodes.

pub mod checker;

pub use checker::{CheckError, NetworkChecker, PROGRESS_FRAMES_SENT, PROGRESS_LISTENERS_ARMED};
