//! Main TUI application: the refresh loop.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use chrono::{DateTime, Local, TimeZone};
use tracing::{debug, error, info};

use crate::config::Config;
use crate::model::{SystemSnapshot, UsageReading};
use crate::provider::SnapshotSource;
use crate::window::WindowCounts;

use super::event::{Event, EventSource};
use super::input::{KeyAction, handle_key};
use super::render::{Frame, Mode, Scene, render};
use super::terminal::{Presenter, TerminalSession};

/// Whether the loop keeps going after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Main TUI application.
///
/// Owns the current snapshots; each is replaced wholesale, never patched.
pub struct App<S: SnapshotSource> {
    source: S,
    config: Config,
    usage: UsageReading,
    system: SystemSnapshot,
    last_reload: Instant,
    interrupted: Arc<AtomicBool>,
}

impl<S: SnapshotSource> App<S> {
    /// Creates the app and takes the first reading of both snapshots.
    pub fn new(mut source: S, config: Config) -> Self {
        let usage = source.usage();
        let system = source.system();
        Self {
            source,
            config,
            usage,
            system,
            last_reload: Instant::now(),
            interrupted: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Uses `flag` as the external stop request (set by a signal handler).
    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupted = flag;
        self
    }

    pub fn usage(&self) -> &UsageReading {
        &self.usage
    }

    pub fn system(&self) -> &SystemSnapshot {
        &self.system
    }

    fn interrupted(&self) -> bool {
        self.interrupted.load(Ordering::SeqCst)
    }

    fn reload_usage(&mut self) {
        self.usage = self.source.usage();
        debug!(events = self.usage.events.len(), "usage reloaded");
    }

    /// Applies one key action and the per-tick refresh, as of `at`.
    ///
    /// A manual reload does not move the reload timer. The system snapshot is
    /// resampled on every step; usage is reloaded once more than
    /// `reload_interval` has passed since the last timed reload.
    pub fn step(&mut self, action: KeyAction, at: Instant) -> Flow {
        match action {
            KeyAction::Quit => return Flow::Quit,
            KeyAction::Reload => self.reload_usage(),
            KeyAction::None => {}
        }

        self.system = self.source.system();
        if at.saturating_duration_since(self.last_reload) > self.config.reload_interval {
            self.reload_usage();
            self.last_reload = at;
        }
        Flow::Continue
    }

    /// Renders the current snapshots as seen at `now`.
    pub fn frame<Tz>(&self, now: &DateTime<Tz>, cols: u16, rows: u16, mode: Mode) -> Frame
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let windows = WindowCounts::compute(&self.usage.events, now, self.config.hours_back);
        let clock = now.format("%H:%M:%S").to_string();
        let scene = Scene {
            usage: &self.usage.snapshot,
            system: &self.system,
            windows: &windows,
            clock: &clock,
        };
        render(&scene, cols, rows, mode, &self.config)
    }

    /// Renders a single frame for one-shot output. The terminal is untouched.
    pub fn render_once(&self, cols: u16, rows: u16) -> Frame {
        self.frame(&Local::now(), cols, rows, Mode::OneShot)
    }

    /// Runs the interactive loop until quit, interrupt or an I/O error.
    ///
    /// The presenter is restored exactly once whichever way the loop ends.
    pub fn run<E, P>(&mut self, events: &mut E, presenter: &mut P) -> io::Result<()>
    where
        E: EventSource,
        P: Presenter,
    {
        let mut session = TerminalSession::open(presenter)?;
        match self.event_loop(events, &mut session) {
            Ok(()) => session.close(),
            Err(e) => {
                error!("refresh loop failed: {}", e);
                drop(session);
                Err(e)
            }
        }
    }

    fn event_loop<E, P>(
        &mut self,
        events: &mut E,
        session: &mut TerminalSession<'_, P>,
    ) -> io::Result<()>
    where
        E: EventSource,
        P: Presenter,
    {
        self.draw(session)?;
        loop {
            if self.interrupted() {
                info!("interrupted");
                return Ok(());
            }
            let action = match events.next(self.config.tick)? {
                Event::Key(key) => handle_key(key),
                Event::Tick | Event::Resize(..) => KeyAction::None,
            };
            if self.step(action, Instant::now()) == Flow::Quit {
                debug!("quit requested");
                return Ok(());
            }
            self.draw(session)?;
        }
    }

    fn draw<P: Presenter>(&self, session: &mut TerminalSession<'_, P>) -> io::Result<()> {
        let (cols, rows) = session.size()?;
        let frame = self.frame(&Local::now(), cols, rows, Mode::Interactive);
        session.present(&frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::collections::VecDeque;
    use std::rc::Rc;
    use std::time::Duration;

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use crate::collector::mock::MOCK_DATA_DIR;
    use crate::collector::{MockFs, ProcfsSampler, UsageCollector};
    use crate::model::UsageSnapshot;
    use crate::provider::LiveSource;
    use crate::tui::style::strip_styles;
    use crate::tui::terminal::testing::RecordingPresenter;

    #[derive(Default)]
    struct Calls {
        usage: Cell<usize>,
        system: Cell<usize>,
    }

    /// Source that counts fetches and reports the count as `total_messages`.
    struct CountingSource {
        calls: Rc<Calls>,
    }

    impl SnapshotSource for CountingSource {
        fn usage(&mut self) -> UsageReading {
            let n = self.calls.usage.get() + 1;
            self.calls.usage.set(n);
            UsageReading {
                snapshot: UsageSnapshot {
                    total_messages: n as u64,
                    ..Default::default()
                },
                events: Vec::new(),
            }
        }

        fn system(&mut self) -> SystemSnapshot {
            self.calls.system.set(self.calls.system.get() + 1);
            SystemSnapshot::default()
        }
    }

    /// Replays a fixed list of events, then reports end of input.
    struct Script {
        events: VecDeque<Event>,
        timeouts: Vec<Duration>,
    }

    impl Script {
        fn new(events: Vec<Event>) -> Self {
            Self {
                events: events.into(),
                timeouts: Vec::new(),
            }
        }
    }

    impl EventSource for Script {
        fn next(&mut self, timeout: Duration) -> io::Result<Event> {
            self.timeouts.push(timeout);
            self.events
                .pop_front()
                .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
        }
    }

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    fn counting_app() -> (App<CountingSource>, Rc<Calls>) {
        let calls = Rc::new(Calls::default());
        let source = CountingSource {
            calls: Rc::clone(&calls),
        };
        (App::new(source, Config::default()), calls)
    }

    #[test]
    fn test_new_reads_both_snapshots_once() {
        let (app, calls) = counting_app();
        assert_eq!(calls.usage.get(), 1);
        assert_eq!(calls.system.get(), 1);
        assert_eq!(app.usage().snapshot.total_messages, 1);
    }

    #[test]
    fn test_quit_before_first_tick() {
        let (mut app, calls) = counting_app();
        let mut presenter = RecordingPresenter::new(80, 40);
        let mut script = Script::new(vec![key('q')]);

        app.run(&mut script, &mut presenter).unwrap();

        assert_eq!(presenter.enters, 1);
        assert_eq!(presenter.leaves, 1);
        // initial draw only
        assert_eq!(presenter.frames.len(), 1);
        assert_eq!(calls.system.get(), 1);
        assert_eq!(script.timeouts, vec![Duration::from_secs(2)]);
    }

    #[test]
    fn test_every_iteration_redraws() {
        let (mut app, calls) = counting_app();
        let mut presenter = RecordingPresenter::new(80, 40);
        let mut script = Script::new(vec![
            Event::Tick,
            key('x'),
            Event::Resize(100, 30),
            key('Q'),
        ]);

        app.run(&mut script, &mut presenter).unwrap();

        assert_eq!(presenter.frames.len(), 4);
        assert_eq!(calls.system.get(), 4);
        assert_eq!(calls.usage.get(), 1);
        assert_eq!(presenter.leaves, 1);
    }

    #[test]
    fn test_reload_key_reloads_usage() {
        let (mut app, calls) = counting_app();
        let mut presenter = RecordingPresenter::new(80, 40);
        let mut script = Script::new(vec![key('r'), key('R'), key('q')]);

        app.run(&mut script, &mut presenter).unwrap();

        assert_eq!(calls.usage.get(), 3);
        assert_eq!(app.usage().snapshot.total_messages, 3);
        let last = presenter.frames.last().unwrap();
        assert!(
            last.lines()
                .iter()
                .any(|l| strip_styles(l).contains("EXP 3/100"))
        );
    }

    #[test]
    fn test_timed_reload_cadence() {
        let (mut app, calls) = counting_app();
        let t0 = Instant::now();

        assert_eq!(app.step(KeyAction::None, t0 + Duration::from_secs(10)), Flow::Continue);
        assert_eq!(calls.usage.get(), 1);

        app.step(KeyAction::None, t0 + Duration::from_secs(31));
        assert_eq!(calls.usage.get(), 2);

        // timer restarted at t0+31s
        app.step(KeyAction::None, t0 + Duration::from_secs(45));
        assert_eq!(calls.usage.get(), 2);
        app.step(KeyAction::None, t0 + Duration::from_secs(62));
        assert_eq!(calls.usage.get(), 3);

        assert_eq!(calls.system.get(), 5);
    }

    #[test]
    fn test_manual_reload_keeps_timer() {
        let (mut app, calls) = counting_app();
        let t0 = Instant::now();

        app.step(KeyAction::Reload, t0 + Duration::from_secs(20));
        assert_eq!(calls.usage.get(), 2);

        // still due at the original schedule
        app.step(KeyAction::None, t0 + Duration::from_secs(31));
        assert_eq!(calls.usage.get(), 3);
    }

    #[test]
    fn test_quit_action_skips_refresh() {
        let (mut app, calls) = counting_app();
        let at = Instant::now() + Duration::from_secs(60);
        assert_eq!(app.step(KeyAction::Quit, at), Flow::Quit);
        assert_eq!(calls.system.get(), 1);
        assert_eq!(calls.usage.get(), 1);
    }

    #[test]
    fn test_interrupt_flag_stops_loop() {
        let flag = Arc::new(AtomicBool::new(true));
        let (app, calls) = counting_app();
        let mut app = app.with_interrupt(Arc::clone(&flag));
        let mut presenter = RecordingPresenter::new(80, 40);
        let mut script = Script::new(vec![Event::Tick]);

        app.run(&mut script, &mut presenter).unwrap();

        assert!(script.timeouts.is_empty());
        assert_eq!(presenter.frames.len(), 1);
        assert_eq!(presenter.leaves, 1);
        assert_eq!(calls.system.get(), 1);
    }

    #[test]
    fn test_event_error_restores_terminal() {
        let (mut app, _) = counting_app();
        let mut presenter = RecordingPresenter::new(80, 40);
        let mut script = Script::new(vec![Event::Tick]);

        let err = app.run(&mut script, &mut presenter).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
        assert_eq!(presenter.frames.len(), 2);
        assert_eq!(presenter.leaves, 1);
    }

    #[test]
    fn test_present_error_restores_terminal() {
        let (mut app, _) = counting_app();
        let mut presenter = RecordingPresenter::new(80, 40);
        presenter.fail_present = true;
        let mut script = Script::new(vec![key('q')]);

        assert!(app.run(&mut script, &mut presenter).is_err());
        assert_eq!(presenter.enters, 1);
        assert_eq!(presenter.leaves, 1);
    }

    #[test]
    fn test_render_once_from_live_source() {
        let config = Config::new(MOCK_DATA_DIR);
        let usage = UsageCollector::from_config(MockFs::typical_usage(), &config);
        let sampler = ProcfsSampler::new(MockFs::typical_system(), "/proc");
        let source = LiveSource::new(usage, Box::new(sampler)).unwrap();
        let app = App::new(source, config);

        let frame = app.render_once(80, 24);
        assert_eq!(frame.lines().len(), 24);
        assert_eq!(frame.width(), 80);
        let text = strip_styles(&frame.to_text("\n"));
        assert!(text.contains("8.0G/16.0G"));
        assert!(text.contains("Lv 3  EXP 10/196"));
    }
}
