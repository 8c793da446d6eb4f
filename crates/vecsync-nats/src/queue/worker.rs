//! Refresh queue management and worker processing.

use std::time::Duration;

use async_nats::jetstream::{self, stream};
use futures::StreamExt;
use jiff::Timestamp;
use tracing::{debug, error, instrument, warn};
use vecsync_core::RecordRef;
use vecsync_pipeline::{JobSink, Refresher};

use super::job::{JobStatus, RefreshJob};
use crate::{Error, Result, TRACING_TARGET_QUEUE};

const STREAM_PREFIX: &str = "VECREFRESH_";

/// Work queue for deferred vector refresh jobs.
pub struct RefreshQueue {
    jetstream: jetstream::Context,
    stream_name: String,
    worker_id: String,
}

impl RefreshQueue {
    /// Create a new refresh queue
    #[instrument(skip(jetstream), target = TRACING_TARGET_QUEUE)]
    pub async fn new(
        jetstream: &jetstream::Context,
        queue_name: &str,
        worker_id: &str,
    ) -> Result<Self> {
        let stream_name = format!("{}{}", STREAM_PREFIX, queue_name.to_uppercase());

        let stream_config = stream::Config {
            name: stream_name.clone(),
            description: Some(format!("Vector refresh queue: {}", queue_name)),
            subjects: vec![format!("vecrefresh.{}.>", queue_name)],
            retention: stream::RetentionPolicy::WorkQueue,
            ..Default::default()
        };

        // Try to get existing stream first
        match jetstream.get_stream(&stream_name).await {
            Ok(_) => {
                debug!(
                    target: TRACING_TARGET_QUEUE,
                    stream = %stream_name,
                    worker_id = %worker_id,
                    "Using existing refresh stream"
                );
            }
            Err(_) => {
                debug!(
                    target: TRACING_TARGET_QUEUE,
                    stream = %stream_name,
                    worker_id = %worker_id,
                    queue_name = %queue_name,
                    "Creating new refresh stream"
                );
                jetstream
                    .create_stream(stream_config)
                    .await
                    .map_err(|e| Error::operation("stream_create", e.to_string()))?;
            }
        }

        Ok(Self {
            jetstream: jetstream.clone(),
            stream_name,
            worker_id: worker_id.to_string(),
        })
    }

    /// Submit a refresh job to the queue
    #[instrument(skip(self, job), target = TRACING_TARGET_QUEUE)]
    pub async fn submit(&self, job: &RefreshJob) -> Result<()> {
        let subject = self.generate_subject(&job.record, job.priority.as_num());
        let payload = serde_json::to_vec(job)?;

        self.jetstream
            .publish(subject.clone(), payload.into())
            .await
            .map_err(|e| Error::delivery_failed(&subject, e.to_string()))?
            .await
            .map_err(|e| Error::operation("job_submit", e.to_string()))?;

        debug!(
            target: TRACING_TARGET_QUEUE,
            job_id = %job.id,
            record = %job.record,
            priority = job.priority.as_num(),
            subject = %subject,
            "Submitted refresh job"
        );
        Ok(())
    }

    /// Submit multiple refresh jobs in batch
    #[instrument(skip(self, jobs), target = TRACING_TARGET_QUEUE)]
    pub async fn submit_batch(&self, jobs: &[RefreshJob]) -> Result<()> {
        let count = jobs.len();
        for job in jobs {
            self.submit(job).await?;
        }

        debug!(
            target: TRACING_TARGET_QUEUE,
            count = count,
            worker_id = %self.worker_id,
            "Submitted batch of refresh jobs"
        );
        Ok(())
    }

    /// Create a durable pull consumer for processing jobs
    #[instrument(skip(self), target = TRACING_TARGET_QUEUE)]
    pub async fn create_consumer(&self) -> Result<jetstream::consumer::PullConsumer> {
        let consumer_name = format!("worker_{}", self.worker_id);

        let consumer_config = jetstream::consumer::pull::Config {
            name: Some(consumer_name.clone()),
            durable_name: Some(consumer_name.clone()),
            description: Some(format!("Worker {} refresh consumer", self.worker_id)),
            ack_wait: Duration::from_secs(300),
            max_deliver: 3, // Maximum redeliveries
            ..Default::default()
        };

        let stream = self
            .jetstream
            .get_stream(&self.stream_name)
            .await
            .map_err(|e| Error::stream_error(&self.stream_name, e.to_string()))?;

        let consumer = stream
            .create_consumer(consumer_config)
            .await
            .map_err(|e| Error::consumer_error(&consumer_name, e.to_string()))?;

        debug!(
            target: TRACING_TARGET_QUEUE,
            consumer = %consumer_name,
            worker_id = %self.worker_id,
            "Created refresh consumer"
        );
        Ok(consumer)
    }

    /// Process the next job from the queue.
    ///
    /// Fetches at most one message, runs the handler under the job's
    /// timeout, and acks or naks based on the outcome and the job's
    /// retry budget. Returns true if a job was processed successfully.
    #[instrument(skip(self, consumer, handler), target = TRACING_TARGET_QUEUE)]
    pub async fn process_next<F, Fut>(
        &self,
        consumer: &jetstream::consumer::PullConsumer,
        handler: F,
    ) -> Result<bool>
    where
        F: FnOnce(RefreshJob) -> Fut,
        Fut: std::future::Future<Output = Result<()>>,
    {
        let mut messages = consumer
            .fetch()
            .max_messages(1)
            .messages()
            .await
            .map_err(|e| Error::operation("job_fetch", e.to_string()))?;

        let Some(Ok(msg)) = messages.next().await else {
            return Ok(false);
        };

        let mut job: RefreshJob = match serde_json::from_slice(&msg.payload) {
            Ok(j) => j,
            Err(e) => {
                error!(
                    target: TRACING_TARGET_QUEUE,
                    error = %e,
                    worker_id = %self.worker_id,
                    "Failed to deserialize refresh job"
                );
                // Ack the message to remove it from the queue
                msg.ack().await.ok();
                return Ok(false);
            }
        };

        debug!(
            target: TRACING_TARGET_QUEUE,
            job_id = %job.id,
            record = %job.record,
            worker_id = %self.worker_id,
            "Processing refresh job"
        );

        job.status = JobStatus::Running {
            worker_id: self.worker_id.clone(),
            started_at: Timestamp::now(),
        };

        let start_time = std::time::Instant::now();

        let outcome = match tokio::time::timeout(job.timeout, handler(job.clone())).await {
            Ok(result) => result,
            Err(_) => Err(Error::Timeout {
                timeout: job.timeout,
            }),
        };

        match outcome {
            Ok(()) => {
                let duration_ms = start_time.elapsed().as_millis() as u64;
                job.status = JobStatus::Completed {
                    completed_at: Timestamp::now(),
                    duration_ms,
                };

                debug!(
                    target: TRACING_TARGET_QUEUE,
                    job_id = %job.id,
                    record = %job.record,
                    duration_ms = duration_ms,
                    worker_id = %self.worker_id,
                    "Refresh job completed"
                );

                msg.ack()
                    .await
                    .map_err(|e| Error::operation("job_ack", e.to_string()))?;

                Ok(true)
            }
            Err(e) => {
                error!(
                    target: TRACING_TARGET_QUEUE,
                    job_id = %job.id,
                    record = %job.record,
                    error = %e,
                    worker_id = %self.worker_id,
                    "Refresh job failed"
                );

                job.increment_retry();

                if job.can_retry() {
                    warn!(
                        target: TRACING_TARGET_QUEUE,
                        job_id = %job.id,
                        retry_count = job.retry_count,
                        max_retries = job.max_retries,
                        worker_id = %self.worker_id,
                        "Refresh job failed, will retry"
                    );

                    msg.ack_with(async_nats::jetstream::AckKind::Nak(Some(
                        Duration::from_secs(10 * job.retry_count as u64),
                    )))
                    .await
                    .ok();
                } else {
                    job.status = JobStatus::Failed {
                        failed_at: Timestamp::now(),
                        error: e.to_string(),
                        retry_count: job.retry_count,
                    };

                    error!(
                        target: TRACING_TARGET_QUEUE,
                        job_id = %job.id,
                        record = %job.record,
                        retry_count = job.retry_count,
                        worker_id = %self.worker_id,
                        "Refresh job failed permanently after max retries"
                    );

                    msg.ack()
                        .await
                        .map_err(|e| Error::operation("job_ack", e.to_string()))?;
                }

                Ok(false)
            }
        }
    }

    /// Generate subject for a job based on record resource and priority
    fn generate_subject(&self, record: &RecordRef, priority: u8) -> String {
        format!(
            "vecrefresh.{}.{}.priority_{}",
            self.queue_name(),
            record.resource,
            priority
        )
    }

    /// Extract queue name from stream name
    fn queue_name(&self) -> String {
        self.stream_name
            .strip_prefix(STREAM_PREFIX)
            .unwrap_or(&self.stream_name)
            .to_lowercase()
    }
}

/// The deferred strategy's job sink: every enqueue becomes one refresh
/// job on the queue.
#[async_trait::async_trait]
impl JobSink for RefreshQueue {
    async fn enqueue(&self, record: &RecordRef) -> vecsync_core::Result<()> {
        self.submit(&RefreshJob::new(record.clone()))
            .await
            .map_err(Error::into_core)
    }
}

/// Worker that drains the refresh queue by re-entering the pipeline's
/// synchronous refresh path for each job.
pub struct RefreshWorker {
    queue: RefreshQueue,
    consumer: jetstream::consumer::PullConsumer,
    refresher: Refresher,
    idle_delay: Duration,
}

impl RefreshWorker {
    /// Creates a worker over an existing queue and its consumer.
    pub fn new(
        queue: RefreshQueue,
        consumer: jetstream::consumer::PullConsumer,
        refresher: Refresher,
    ) -> Self {
        Self {
            queue,
            consumer,
            refresher,
            idle_delay: Duration::from_secs(1),
        }
    }

    /// Sets the delay between polls when the queue is empty.
    pub fn with_idle_delay(mut self, idle_delay: Duration) -> Self {
        self.idle_delay = idle_delay;
        self
    }

    /// Processes at most one job. Returns true if a job was processed
    /// successfully.
    pub async fn run_once(&self) -> Result<bool> {
        let refresher = self.refresher.clone();
        self.queue
            .process_next(&self.consumer, move |job| async move {
                refresher
                    .refresh_record(&job.record)
                    .await
                    .map_err(|e| Error::operation("refresh", e.to_string()))
            })
            .await
    }

    /// Runs the consume loop until the task is cancelled.
    pub async fn run(&self) -> Result<()> {
        loop {
            if !self.run_once().await? {
                tokio::time::sleep(self.idle_delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn subject_encodes_queue_resource_and_priority() {
        // Exercise the pure subject scheme without a live stream.
        let stream_name = format!("{}DEFAULT", STREAM_PREFIX);
        let queue_name = stream_name
            .strip_prefix(STREAM_PREFIX)
            .unwrap()
            .to_lowercase();
        let record = RecordRef::new("user", Uuid::new_v4());

        let subject = format!("vecrefresh.{}.{}.priority_{}", queue_name, record.resource, 1);
        assert_eq!(subject, "vecrefresh.default.user.priority_1");
    }
}
