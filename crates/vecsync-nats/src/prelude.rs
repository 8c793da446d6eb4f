//! Convenient re-exports for common use.

pub use crate::client::{NatsClient, NatsConfig};
pub use crate::error::{Error, Result};
pub use crate::queue::{JobPriority, JobStatus, RefreshJob, RefreshQueue, RefreshWorker};
