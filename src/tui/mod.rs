//! Terminal dashboard.
//!
//! Rendering produces plain strings with embedded ANSI styles; the refresh
//! loop hands each frame to a [`Presenter`] and reads keys from an
//! [`EventSource`], so both ends can be replaced in tests.

mod app;
mod event;
mod input;
mod render;
pub mod style;
mod terminal;
pub mod widgets;

pub use app::{App, Flow};
pub use event::{CrosstermEvents, Event, EventSource};
pub use input::{KeyAction, handle_key};
pub use render::{Frame, Mode, Scene, panel_width, render};
pub use terminal::{CrosstermPresenter, Presenter, RawMode, TerminalSession};
