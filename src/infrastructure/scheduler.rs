use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::application::handlers::broadcast::BroadcastDispatcher;

/// Fires the dispatcher on a fixed cadence until the process exits.
///
/// A failed tick is logged and the loop keeps going; nothing here is
/// fatal. There is no lock around a batch; delete-after-attempt in the
/// dispatcher is what keeps a message from going out twice.
pub fn spawn(dispatcher: Arc<BroadcastDispatcher>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            match dispatcher.run_tick().await {
                Ok(report) if !report.is_empty() => {
                    tracing::info!(
                        messages = report.messages.len(),
                        attempted = report.attempted(),
                        failed = report.failed(),
                        "dispatch batch finished"
                    );
                }
                Ok(_) => {}
                Err(err) => {
                    tracing::error!(error = ?err, "dispatch tick failed");
                }
            }
        }
    })
}
