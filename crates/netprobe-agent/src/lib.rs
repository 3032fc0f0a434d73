//! Netprobe Agent - Client contracts for the per-node probing agents
//!
//! The real agents live on the cluster nodes and are reached over an RPC
//! transport; this crate defines the client-side contract the orchestrator
//! drives (frame listeners, probing frames, discovery, witness collection),
//! the progress-reporting sink, and an in-process simulated mesh for tests.

pub mod client;
pub mod progress;
pub mod sim;

pub use client::{ProbeAgentClient, TargetScope};
pub use progress::{LogReporter, ProgressReporter, ProgressUpdate};
pub use sim::SimAgentMesh;
