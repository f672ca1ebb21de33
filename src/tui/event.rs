//! Terminal event source.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event as CEvent, KeyEvent};

/// Something that ends one wait of the refresh loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The wait timed out, or an event the loop has no use for arrived.
    Tick,
    Key(KeyEvent),
    Resize(u16, u16),
}

/// Bounded-wait source of input events.
pub trait EventSource {
    /// Waits at most `timeout` for the next event.
    fn next(&mut self, timeout: Duration) -> io::Result<Event>;
}

/// Reads events from the controlling terminal via crossterm.
#[derive(Debug, Default)]
pub struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn next(&mut self, timeout: Duration) -> io::Result<Event> {
        if !event::poll(timeout)? {
            return Ok(Event::Tick);
        }
        Ok(match event::read()? {
            CEvent::Key(key) => Event::Key(key),
            CEvent::Resize(w, h) => Event::Resize(w, h),
            _ => Event::Tick,
        })
    }
}
