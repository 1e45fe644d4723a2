use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

enum Command<T> {
    Push(T),
    Discard,
}

/// Forwards the latest pushed value once no new value arrived for the quiet period.
///
/// Every push restarts the window and replaces the pending value. The gate
/// stops, dropping any pending value, on [`Debouncer::cancel`] or on drop.
pub struct Debouncer<T> {
    commands: mpsc::UnboundedSender<Command<T>>,
    cancel: CancellationToken,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Spawns the gate on the current tokio runtime.
    pub fn spawn(quiet: Duration, output: mpsc::UnboundedSender<T>) -> Self {
        let (commands, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        tokio::spawn(run(quiet, rx, output, cancel.clone()));
        Self { commands, cancel }
    }

    /// Returns false once the gate has stopped.
    pub fn push(&self, value: T) -> bool {
        self.commands.send(Command::Push(value)).is_ok()
    }

    /// Drops the pending value, if any, without stopping the gate.
    pub fn discard_pending(&self) {
        let _ = self.commands.send(Command::Discard);
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run<T>(
    quiet: Duration,
    mut commands: mpsc::UnboundedReceiver<Command<T>>,
    output: mpsc::UnboundedSender<T>,
    cancel: CancellationToken,
) {
    let mut pending: Option<T> = None;
    let timer = tokio::time::sleep(quiet);
    tokio::pin!(timer);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            command = commands.recv() => match command {
                Some(Command::Push(value)) => {
                    pending = Some(value);
                    timer.as_mut().reset(Instant::now() + quiet);
                }
                Some(Command::Discard) => pending = None,
                None => break,
            },
            _ = &mut timer, if pending.is_some() => {
                if let Some(value) = pending.take() {
                    if output.send(value).is_err() {
                        break;
                    }
                }
            }
        }
    }
}
