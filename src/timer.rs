use crate::logger;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, bounded, unbounded};
use std::io;
use std::thread;
use std::time::Duration;

/// Background worker that emits one tick per period until cancelled.
///
/// Dropping the ticker cancels and joins the worker, so no tick can arrive
/// after its owner is gone.
#[derive(Debug)]
struct Ticker {
    cancel_tx: Option<Sender<()>>,
    tick_rx: Receiver<()>,
    handle: Option<thread::JoinHandle<()>>,
}

impl Ticker {
    fn spawn(period: Duration) -> io::Result<Self> {
        let (cancel_tx, cancel_rx) = bounded::<()>(1);
        let (tick_tx, tick_rx) = unbounded();

        let handle = thread::Builder::new()
            .name("exam-drill::ticker".to_string())
            .spawn(move || {
                loop {
                    match cancel_rx.recv_timeout(period) {
                        Err(RecvTimeoutError::Timeout) => {
                            if tick_tx.send(()).is_err() {
                                break;
                            }
                        }
                        // Explicit cancel or the owner hung up.
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            })?;

        Ok(Self {
            cancel_tx: Some(cancel_tx),
            tick_rx,
            handle: Some(handle),
        })
    }

    fn drain(&self) -> u32 {
        self.tick_rx.try_iter().count() as u32
    }

    fn cancel(&mut self) {
        if let Some(cancel_tx) = self.cancel_tx.take() {
            let _ = cancel_tx.try_send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Elapsed-time counter for one session, driven by a cancellable tick.
///
/// Each tick adds one `period` of wall-clock time, so the reported seconds
/// hold for any configured period.
#[derive(Debug)]
pub struct SessionTimer {
    period: Duration,
    elapsed: Duration,
    ticker: Option<Ticker>,
}

impl SessionTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            elapsed: Duration::ZERO,
            ticker: None,
        }
    }

    /// Starts counting from zero. A running timer is stopped first.
    pub fn start(&mut self) -> io::Result<()> {
        self.stop();
        self.elapsed = Duration::ZERO;
        self.ticker = Some(Ticker::spawn(self.period)?);
        logger::log("Session timer started");
        Ok(())
    }

    /// Cancels the tick. The elapsed time is kept for the summary screen.
    pub fn stop(&mut self) {
        if let Some(mut ticker) = self.ticker.take() {
            ticker.cancel();
            logger::log(&format!(
                "Session timer stopped at {}",
                format_elapsed(self.elapsed_secs())
            ));
        }
    }

    /// Applies pending ticks; returns true when the elapsed time changed.
    pub fn poll(&mut self) -> bool {
        let Some(ticker) = &self.ticker else {
            return false;
        };
        let ticks = ticker.drain();
        self.elapsed += self.period * ticks;
        ticks > 0
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed.as_secs()
    }
}

pub fn format_elapsed(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
