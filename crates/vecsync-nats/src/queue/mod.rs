//! Work queue for deferred vector refresh jobs.

mod job;
mod worker;

pub use job::{JobPriority, JobStatus, RefreshJob};
pub use worker::{RefreshQueue, RefreshWorker};
