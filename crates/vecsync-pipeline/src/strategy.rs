//! Synchronization strategies.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Policy governing when vector recomputation executes relative to a
/// mutation's commit. Exactly one strategy is active per resource.
///
/// Inline couples mutation latency (and failure) to the provider call in
/// exchange for vectors that always match the latest data. Deferred
/// decouples them at the cost of a staleness window. Manual cedes all
/// scheduling to the caller, which fits bulk backfills and cost-sensitive
/// batch regeneration.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SyncStrategy {
    /// Recompute synchronously before the mutation commits; a provider
    /// failure aborts the mutation.
    #[default]
    Inline,
    /// Enqueue a refresh job after the mutation commits; the job commits
    /// a separate follow-up mutation.
    Deferred,
    /// Never recompute automatically; only via the manual refresher.
    Manual,
}

impl SyncStrategy {
    /// Returns true if recomputation runs inside the mutation.
    pub fn is_inline(self) -> bool {
        matches!(self, Self::Inline)
    }

    /// Returns true if recomputation is enqueued after commit.
    pub fn is_deferred(self) -> bool {
        matches!(self, Self::Deferred)
    }

    /// Returns true if recomputation only happens on demand.
    pub fn is_manual(self) -> bool {
        matches!(self, Self::Manual)
    }
}
