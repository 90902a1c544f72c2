use std::future::Future;
use std::io;
use tracing::{error, warn};

/// Drives `task` until it finishes or `interrupt` fires. `None` means the run was interrupted.
///
/// If the interrupt listener fails to register, the error is logged and `task` runs to completion.
pub async fn run_until_interrupted<T>(
    task: impl Future<Output = T>,
    interrupt: impl Future<Output = io::Result<()>>,
) -> Option<T> {
    tokio::pin!(task);

    tokio::select! {
        output = &mut task => Some(output),
        signal = interrupt => match signal {
            Ok(()) => {
                warn!("Interrupted, exiting manually");
                None
            }
            Err(e) => {
                error!("Unable to listen for Ctrl-C: {}", e);
                Some(task.await)
            }
        }
    }
}
