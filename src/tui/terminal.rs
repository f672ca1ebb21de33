//! Terminal output and mode management.

use std::io::{self, Write};
use std::ops::{Deref, DerefMut};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::terminal::{self, Clear, ClearType, disable_raw_mode, enable_raw_mode};
use crossterm::{execute, queue};
use tracing::warn;

use super::render::Frame;
use super::style::Theme;

/// Destination for frames in interactive mode.
pub trait Presenter {
    /// Terminal size as `(cols, rows)`.
    fn size(&self) -> io::Result<(u16, u16)>;

    /// Switches the terminal into dashboard mode.
    fn enter(&mut self) -> io::Result<()>;

    /// Replaces the screen contents with `frame`.
    fn present(&mut self, frame: &Frame) -> io::Result<()>;

    /// Restores the terminal to the state before [`Presenter::enter`].
    fn leave(&mut self) -> io::Result<()>;
}

/// Switches raw mode on (`true`) or off (`false`).
pub type RawMode = fn(bool) -> io::Result<()>;

fn crossterm_raw_mode(on: bool) -> io::Result<()> {
    if on { enable_raw_mode() } else { disable_raw_mode() }
}

/// Draws frames on a crossterm terminal in raw mode.
pub struct CrosstermPresenter<W: Write> {
    out: W,
    raw_mode: RawMode,
}

impl CrosstermPresenter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> CrosstermPresenter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            raw_mode: crossterm_raw_mode,
        }
    }

    /// Replaces the raw-mode switch, e.g. for a terminal that is not the
    /// process's controlling one.
    pub fn with_raw_mode(mut self, raw_mode: RawMode) -> Self {
        self.raw_mode = raw_mode;
        self
    }
}

impl<W: Write> Presenter for CrosstermPresenter<W> {
    fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    fn enter(&mut self) -> io::Result<()> {
        (self.raw_mode)(true)?;
        execute!(self.out, Hide)
    }

    fn present(&mut self, frame: &Frame) -> io::Result<()> {
        queue!(self.out, MoveTo(0, 0), Clear(ClearType::All))?;
        // raw mode does no newline translation
        self.out.write_all(frame.to_text("\r\n").as_bytes())?;
        self.out.flush()
    }

    /// Attempts every restore step even if an earlier one fails, and reports
    /// the first error.
    fn leave(&mut self) -> io::Result<()> {
        let shown = execute!(self.out, Show);
        let reset = write!(self.out, "{}\r\n", Theme::RESET).and_then(|()| self.out.flush());
        let cooked = (self.raw_mode)(false);
        shown.and(reset).and(cooked)
    }
}

/// Keeps a presenter in dashboard mode for the guard's lifetime.
///
/// [`Presenter::leave`] runs exactly once: from [`TerminalSession::close`],
/// or on drop if the session ends any other way (error return, panic).
pub struct TerminalSession<'a, P: Presenter> {
    presenter: &'a mut P,
    active: bool,
}

impl<'a, P: Presenter> TerminalSession<'a, P> {
    pub fn open(presenter: &'a mut P) -> io::Result<Self> {
        presenter.enter()?;
        Ok(Self {
            presenter,
            active: true,
        })
    }

    /// Leaves dashboard mode, reporting any error.
    pub fn close(mut self) -> io::Result<()> {
        self.active = false;
        self.presenter.leave()
    }
}

impl<P: Presenter> Deref for TerminalSession<'_, P> {
    type Target = P;

    fn deref(&self) -> &P {
        &*self.presenter
    }
}

impl<P: Presenter> DerefMut for TerminalSession<'_, P> {
    fn deref_mut(&mut self) -> &mut P {
        &mut *self.presenter
    }
}

impl<P: Presenter> Drop for TerminalSession<'_, P> {
    fn drop(&mut self) {
        if self.active {
            self.active = false;
            if let Err(e) = self.presenter.leave() {
                warn!("failed to restore terminal: {}", e);
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Presenter that records calls instead of touching a terminal.
    #[derive(Debug, Default)]
    pub struct RecordingPresenter {
        pub size: (u16, u16),
        pub enters: usize,
        pub leaves: usize,
        pub frames: Vec<Frame>,
        pub fail_present: bool,
    }

    impl RecordingPresenter {
        pub fn new(cols: u16, rows: u16) -> Self {
            Self {
                size: (cols, rows),
                ..Default::default()
            }
        }
    }

    impl Presenter for RecordingPresenter {
        fn size(&self) -> io::Result<(u16, u16)> {
            Ok(self.size)
        }

        fn enter(&mut self) -> io::Result<()> {
            self.enters += 1;
            Ok(())
        }

        fn present(&mut self, frame: &Frame) -> io::Result<()> {
            if self.fail_present {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
            }
            self.frames.push(frame.clone());
            Ok(())
        }

        fn leave(&mut self) -> io::Result<()> {
            self.leaves += 1;
            Ok(())
        }
    }
}
