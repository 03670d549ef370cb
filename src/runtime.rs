use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};

/// tick cadence for `Runner::step`; also the frame length of the miss flash
pub const TICK_RATE_MS: u64 = 100;

/// everything the event loop reacts to, narrowed down from crossterm's event type
#[derive(Clone, Debug)]
pub enum TermEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize,
    Tick,
}

impl TermEvent {
    fn from_crossterm(ev: CtEvent) -> Option<Self> {
        match ev {
            CtEvent::Key(key) => Some(TermEvent::Key(key)),
            CtEvent::Mouse(mouse) => Some(TermEvent::Mouse(mouse)),
            CtEvent::Resize(_, _) => Some(TermEvent::Resize),
            _ => None,
        }
    }
}

/// where terminal events come from; swapped for a plain channel in tests
pub trait TermEventSource: Send + 'static {
    /// Block for up to `timeout`. Err(Timeout) means nothing arrived.
    fn recv_timeout(&self, timeout: Duration) -> Result<TermEvent, RecvTimeoutError>;
}

/// reads crossterm events on a background thread and forwards them
pub struct CrosstermEventSource {
    rx: Receiver<TermEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let raw = match event::read() {
                Ok(raw) => raw,
                Err(_) => break,
            };
            if let Some(ev) = TermEvent::from_crossterm(raw) {
                if tx.send(ev).is_err() {
                    break;
                }
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TermEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TermEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// tick cadence, separated out so tests can shrink the wait
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// feeds scripted events from a channel held by the test
pub struct TestEventSource {
    rx: Receiver<TermEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<TermEvent>) -> Self {
        Self { rx }
    }
}

impl TermEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TermEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// pairs an event source with a tick cadence
pub struct Runner<E: TermEventSource, T: Ticker> {
    events: E,
    ticker: T,
}

impl<E: TermEventSource, T: Ticker> Runner<E, T> {
    pub fn new(events: E, ticker: T) -> Self {
        Self { events, ticker }
    }

    /// next event, or Tick once the interval passes with nothing to read
    pub fn step(&self) -> TermEvent {
        match self.events.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(_) => TermEvent::Tick,
        }
    }
}
