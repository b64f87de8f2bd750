//! Frame clock and input pump.
//!
//! A background thread waits on terminal input and the frame deadline and
//! forwards both over a channel, so the main thread handles everything one
//! event at a time. Only one frame is ever outstanding: the next one isn't
//! scheduled until the previous was acknowledged with
//! [`FrameTicker::frame_done`].

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event};

/// Longest the pump blocks on input before re-checking the stop flag.
const MAX_POLL: Duration = Duration::from_millis(50);

/// Something the main loop has to handle.
#[derive(Debug)]
pub enum TickerEvent {
    /// Time to draw a frame.
    Frame,
    /// Terminal input or resize.
    Input(Event),
    /// Reading input failed; the pump has stopped.
    Failed(io::Error),
}

/// Where the pump reads input from.
pub trait InputSource: Send + 'static {
    /// Wait up to `timeout` for the next event.
    fn poll(&mut self, timeout: Duration) -> io::Result<Option<Event>>;
}

/// Input from the real terminal.
#[derive(Debug, Default)]
pub struct TerminalInput;

impl InputSource for TerminalInput {
    fn poll(&mut self, timeout: Duration) -> io::Result<Option<Event>> {
        if event::poll(timeout)? {
            event::read().map(Some)
        } else {
            Ok(None)
        }
    }
}

/// Running frame subscription. Stopping it (or dropping it) cancels any
/// further frames and input.
#[derive(Debug)]
pub struct FrameTicker {
    /// Events from the pump thread.
    events: Receiver<TickerEvent>,
    /// Flag to signal thread termination.
    running: Arc<AtomicBool>,
    /// Set while a frame is waiting to be drawn.
    frame_pending: Arc<AtomicBool>,
    /// The pump thread, until it is joined.
    handle: Option<JoinHandle<()>>,
}

impl FrameTicker {
    /// Start pumping `input` and emitting frames `frame_rate` times a second.
    pub fn start<I: InputSource>(input: I, frame_rate: u32) -> Self {
        let interval = Duration::from_secs(1) / frame_rate.max(1);
        let (sender, events) = mpsc::channel();
        let running = Arc::new(AtomicBool::new(true));
        let frame_pending = Arc::new(AtomicBool::new(false));

        let handle = {
            let running = running.clone();
            let frame_pending = frame_pending.clone();
            thread::spawn(move || pump(input, interval, &sender, &running, &frame_pending))
        };
        tracing::debug!(?interval, "Frame ticker started");

        Self {
            events,
            running,
            frame_pending,
            handle: Some(handle),
        }
    }

    /// Block until the next event. `None` once the pump has gone away.
    pub fn next_event(&self) -> Option<TickerEvent> {
        self.events.recv().ok()
    }

    /// Mark the outstanding frame as drawn so the next one can be scheduled.
    pub fn frame_done(&self) {
        self.frame_pending.store(false, Ordering::Release);
    }

    /// Cancel the subscription and wait for the pump thread to finish.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!("Frame ticker thread panicked");
            }
            tracing::debug!("Frame ticker stopped");
        }
    }
}

impl Drop for FrameTicker {
    fn drop(&mut self) {
        self.stop();
    }
}

fn pump<I: InputSource>(
    mut input: I,
    interval: Duration,
    sender: &Sender<TickerEvent>,
    running: &AtomicBool,
    frame_pending: &AtomicBool,
) {
    let mut next_frame = Instant::now();

    while running.load(Ordering::Acquire) {
        let now = Instant::now();
        if now >= next_frame {
            // A frame still waiting to be drawn swallows this tick.
            if !frame_pending.swap(true, Ordering::AcqRel) && sender.send(TickerEvent::Frame).is_err()
            {
                break;
            }
            next_frame = now + interval;
        }

        let timeout = next_frame
            .saturating_duration_since(Instant::now())
            .min(MAX_POLL);
        match input.poll(timeout) {
            Ok(Some(event)) => {
                if sender.send(TickerEvent::Input(event)).is_err() {
                    break;
                }
            }
            Ok(None) => {}
            Err(error) => {
                let _ = sender.send(TickerEvent::Failed(error));
                break;
            }
        }
    }
}
