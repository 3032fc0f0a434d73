//! Client contract for the remote probing agents

use anyhow::Result;
use async_trait::async_trait;

use netprobe_core::{ProbePayload, WitnessEntry};

/// Addressing scope for agent commands
///
/// The transport supports two tiers: narrowing to a single node before a
/// scoped command, and widening to the full node set for the final
/// discovery. Both are kept explicit; the transport's addressing cache may
/// depend on the narrow-then-widen sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetScope {
    Single(String),
    Many(Vec<String>),
}

impl TargetScope {
    pub fn single(uid: impl Into<String>) -> Self {
        Self::Single(uid.into())
    }

    pub fn many(uids: impl IntoIterator<Item = String>) -> Self {
        Self::Many(uids.into_iter().collect())
    }

    /// The uids this scope addresses
    pub fn uids(&self) -> Vec<&str> {
        match self {
            Self::Single(uid) => vec![uid.as_str()],
            Self::Many(uids) => uids.iter().map(String::as_str).collect(),
        }
    }
}

/// Client for the per-node probing agents
///
/// Every call is a blocking round-trip; the transport owns timeouts and
/// retries, and any failure it surfaces aborts the whole check. One client
/// instance must not be shared by overlapping checks against overlapping
/// node sets: the listener state it arms is exclusive to a single round.
#[async_trait]
pub trait ProbeAgentClient: Send + Sync {
    /// Refresh the transport's addressing for the given scope
    async fn discover(&self, targets: &TargetScope) -> Result<()>;

    /// Arm frame listeners on the targets for the payload's (iface, vlan) pairs
    async fn start_frame_listeners(
        &self,
        targets: &TargetScope,
        payload: &ProbePayload,
    ) -> Result<()>;

    /// Emit tagged probe frames from the targets on the payload's (iface, vlan) pairs
    async fn send_probing_frames(
        &self,
        targets: &TargetScope,
        payload: &ProbePayload,
    ) -> Result<()>;

    /// Collect the witness matrix accumulated during this probing round
    async fn get_probing_info(&self) -> Result<Vec<WitnessEntry>>;
}
