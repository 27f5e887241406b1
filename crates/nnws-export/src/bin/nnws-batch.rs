//! Regenerate the wall catalogue: `nnws-batch <export-dir>`.

use std::process::ExitCode;

use nnws_export::{run_triggers, spawn_batch_trigger, BatchConfig};
use nnws_kernel::MockKernel;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nnws_engine=info,nnws_export=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let Some(dir) = std::env::args_os().nth(1) else {
        eprintln!("usage: nnws-batch <export-dir>");
        return ExitCode::from(2);
    };

    let mut kernel = MockKernel::new();
    let rx = spawn_batch_trigger(BatchConfig::new(dir));
    let mut failed = false;
    for result in run_triggers(rx, &mut kernel) {
        match result {
            Ok(report) => tracing::info!(
                files = report.files.len(),
                warnings = report.warning_count(),
                "manifest written"
            ),
            Err(e) => {
                tracing::error!(error = %e, "batch failed");
                failed = true;
            }
        }
    }
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
