use std::io::{self, BufRead};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

pub enum AppEvent {
    Line(String),
    Tick,
    /// Stdin closed.
    Eof,
}

/// Reads stdin on a background thread and interleaves lines with ticks so the
/// drill loop can fire auto-advance deadlines while waiting for input.
pub struct EventHandler {
    rx: mpsc::Receiver<String>,
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else {
                    return;
                };
                if tx.send(line).is_err() {
                    return;
                }
            }
        });

        Self { rx, tick_rate }
    }

    pub fn next(&self) -> AppEvent {
        match self.rx.recv_timeout(self.tick_rate) {
            Ok(line) => AppEvent::Line(line),
            Err(RecvTimeoutError::Timeout) => AppEvent::Tick,
            Err(RecvTimeoutError::Disconnected) => AppEvent::Eof,
        }
    }
}
