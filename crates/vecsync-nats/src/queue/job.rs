//! Refresh job definitions.

use std::time::Duration;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vecsync_core::RecordRef;

/// A deferred vector refresh for one record.
///
/// Carries only the record's identity; the worker re-reads the record
/// when the job runs, so a job enqueued against an older state can never
/// write stale values. Jobs are delivered at least once and the refresh
/// is last-write-wins, so duplicates are harmless.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshJob {
    pub id: Uuid,
    pub record: RecordRef,
    pub priority: JobPriority,
    pub max_retries: u32,
    pub retry_count: u32,
    pub timeout: Duration,
    pub created_at: Timestamp,
    pub status: JobStatus,
}

impl RefreshJob {
    /// Create a new refresh job for the given record.
    pub fn new(record: RecordRef) -> Self {
        Self {
            id: Uuid::new_v4(),
            record,
            priority: JobPriority::Normal,
            max_retries: 3,
            retry_count: 0,
            timeout: Duration::from_secs(120),
            created_at: Timestamp::now(),
            status: JobStatus::Pending,
        }
    }

    /// Set job priority
    pub fn with_priority(mut self, priority: JobPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Set maximum retries
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set job timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check if job can be retried
    pub fn can_retry(&self) -> bool {
        self.retry_count < self.max_retries
    }

    /// Increment retry count
    pub fn increment_retry(&mut self) {
        self.retry_count += 1;
    }

    /// Get job age
    pub fn age(&self) -> Duration {
        let now = Timestamp::now();
        let signed_dur = now.duration_since(self.created_at);
        Duration::from_secs(signed_dur.as_secs().max(0) as u64)
    }
}

/// Job priority levels
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum JobPriority {
    Low = 0,
    Normal = 1,
    High = 2,
    Critical = 3,
}

impl JobPriority {
    /// Get priority as number (for subject ordering)
    pub fn as_num(&self) -> u8 {
        *self as u8
    }
}

/// Job execution status
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", content = "data")]
pub enum JobStatus {
    /// Job is pending execution
    Pending,

    /// Job is currently running
    Running {
        worker_id: String,
        started_at: Timestamp,
    },

    /// Job completed successfully
    Completed {
        completed_at: Timestamp,
        duration_ms: u64,
    },

    /// Job failed
    Failed {
        failed_at: Timestamp,
        error: String,
        retry_count: u32,
    },
}

impl JobStatus {
    /// Check if job is in terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed { .. } | JobStatus::Failed { .. })
    }
}
