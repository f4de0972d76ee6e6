use std::time::Duration;

use crossbeam_channel::{bounded, select, Receiver, Sender};
use parking_lot::Mutex;

use super::error::SuspensionInterrupted;

/// Sleeps measured in time units that all wake up at once when cancelled.
/// Cancelling drops the only sender, so every pending and future `wait`
/// sees a disconnected channel and returns immediately.
pub struct Timer {
    unit: Duration,
    cancel_tx: Mutex<Option<Sender<()>>>,
    cancel_rx: Receiver<()>,
}

impl Timer {
    pub fn new(unit: Duration) -> Self {
        let (cancel_tx, cancel_rx) = bounded(0);
        Timer {
            unit: unit,
            cancel_tx: Mutex::new(Some(cancel_tx)),
            cancel_rx: cancel_rx,
        }
    }

    pub fn wait(&self, units: u32) -> Result<(), SuspensionInterrupted> {
        self.wait_for(self.unit * units)
    }

    pub fn wait_for(&self, duration: Duration) -> Result<(), SuspensionInterrupted> {
        select! {
            recv(self.cancel_rx) -> _ => Err(SuspensionInterrupted),
            default(duration) => Ok(()),
        }
    }

    pub fn cancel(&self) {
        self.cancel_tx.lock().take();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;
    use std::time::Instant;

    use super::*;

    #[test]
    fn completes_after_the_requested_units() {
        let timer = Timer::new(Duration::from_millis(2));
        let start = Instant::now();
        assert_eq!(timer.wait(5), Ok(()));
        assert!(start.elapsed() >= Duration::from_millis(10));
    }

    #[test]
    fn cancel_wakes_a_long_wait() {
        let timer = Arc::new(Timer::new(Duration::from_secs(1)));
        let waiter = {
            let timer = timer.clone();
            thread::spawn(move || {
                let start = Instant::now();
                (timer.wait(30), start.elapsed())
            })
        };
        thread::sleep(Duration::from_millis(20));
        timer.cancel();

        let (result, elapsed) = waiter.join().unwrap();
        assert_eq!(result, Err(SuspensionInterrupted));
        assert!(elapsed < Duration::from_secs(5));
    }

    #[test]
    fn stays_cancelled() {
        let timer = Timer::new(Duration::from_secs(1));
        timer.cancel();
        timer.cancel();
        assert_eq!(timer.wait(10), Err(SuspensionInterrupted));
        assert_eq!(timer.wait(0), Err(SuspensionInterrupted));
    }
}
