//! Hand-off between a background worker and the modeling thread.
//!
//! The kernel session is not safe to share across threads, so a worker never touches
//! it. The worker only prepares a [`BatchTrigger`] and sends it; the thread that owns
//! the kernel drains the channel and runs each batch. The worker does not wait for or
//! see the outcome.

use std::sync::mpsc::{self, Receiver};
use std::thread;

use chrono::{DateTime, Utc};
use nnws_ops::KernelBundle;
use tracing::{info, warn};

use crate::batch::{BatchConfig, BatchDriver, BatchReport};
use crate::errors::ExportError;

/// A request to run one batch on the modeling thread.
#[derive(Debug, Clone)]
pub struct BatchTrigger {
    pub config: BatchConfig,
    pub requested: DateTime<Utc>,
}

/// Start a worker that sends one trigger for `config`. The returned receiver closes
/// once the worker is done.
pub fn spawn_batch_trigger(config: BatchConfig) -> Receiver<BatchTrigger> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let trigger = BatchTrigger {
            config,
            requested: Utc::now(),
        };
        if tx.send(trigger).is_err() {
            warn!("batch trigger dropped, modeling thread is gone");
        }
    });
    rx
}

/// Run every trigger that arrives on `rx` against `kb`, on the calling thread, until
/// all senders hang up.
pub fn run_triggers(
    rx: Receiver<BatchTrigger>,
    kb: &mut dyn KernelBundle,
) -> Vec<Result<BatchReport, ExportError>> {
    let mut results = Vec::new();
    for trigger in rx {
        info!(
            requested = %trigger.requested,
            dir = %trigger.config.export_dir.display(),
            "running batch trigger"
        );
        let result = BatchDriver::new(trigger.config).and_then(|driver| driver.run(kb));
        if let Err(e) = &result {
            warn!(error = %e, "batch trigger failed");
        }
        results.push(result);
    }
    results
}
