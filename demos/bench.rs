// Comparative dispatch benchmark.
//
// Runs the same workload (1000 work items, 10 ms spin each) through the three
// strategies and logs the elapsed time of each:
//   1. sequential-unordered: fire-and-forget sends, elapsed covers only the
//      send phase — the naive baseline, kept deliberately unsynchronized
//   2. sequential-ordered:   one worker behind a completion barrier (~10 s)
//   3. distributed:          router over 4 workers (~2.5 s)

use std::sync::Arc;

use spindle::{logging, DispatchConfig, Dispatcher, Strategy, TracingObserver};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_default();

    let config = DispatchConfig::default();
    info!(
        items = config.run_length,
        pool_size = config.pool_size,
        spin_delay_ms = config.spin_delay.as_millis() as u64,
        "starting benchmark"
    );

    // Per-item output is noisy at 1000 items; opt in explicitly.
    let verbose = std::env::var("SPINDLE_VERBOSE").is_ok();
    let mut dispatcher = Dispatcher::new(config);
    if verbose {
        dispatcher = dispatcher.with_observer(Arc::new(TracingObserver));
    }

    let mut reports = Vec::new();
    for strategy in [
        Strategy::SequentialUnordered,
        Strategy::SequentialOrdered,
        Strategy::Distributed,
    ] {
        let report = dispatcher.run(strategy).await?;
        reports.push(report);
    }

    info!("--- summary ---");
    for report in &reports {
        info!("{report}");
    }

    Ok(())
}
