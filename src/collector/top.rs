//! System sampler backed by the BSD/macOS `top` command.
//!
//! `top -l 1 -n 0` prints a one-shot header with the lines used here:
//!
//! ```text
//! Load Avg: 1.20, 1.00, 0.90
//! CPU usage: 10.5% user, 5.25% sys, 84.25% idle
//! PhysMem: 15G used (2048M wired, 1024M compressor), 1024M unused.
//! ```
//!
//! The text format is only known to [`parse_top`]; everything else works on
//! the resulting [`SystemSnapshot`].

use std::io::Read;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tracing::trace;

use crate::collector::CollectError;
use crate::collector::procfs::parser::ParseError;
use crate::collector::traits::SystemSampler;
use crate::model::SystemSnapshot;

/// Runs `top` once per sample and parses its header.
pub struct TopSampler {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl Default for TopSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl TopSampler {
    /// How long a single `top` invocation may take.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
    const POLL_INTERVAL: Duration = Duration::from_millis(20);

    pub fn new() -> Self {
        Self {
            program: "top".to_string(),
            args: vec!["-l".into(), "1".into(), "-n".into(), "0".into()],
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Uses a different command line, e.g. a wrapper script.
    pub fn with_command(mut self, program: impl Into<String>, args: &[&str]) -> Self {
        self.program = program.into();
        self.args = args.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Runs the command, killing it if it outlives the timeout.
    ///
    /// Output is drained on a reader thread while the child runs, so a child
    /// writing more than the pipe buffer never stalls.
    fn run(&self) -> Result<String, CollectError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        let mut stdout = match child.stdout.take() {
            Some(stdout) => stdout,
            None => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(CollectError::Command(format!("{} has no stdout", self.program)));
            }
        };
        let reader = thread::spawn(move || {
            let mut output = String::new();
            stdout.read_to_string(&mut output).map(|_| output)
        });

        let started = Instant::now();
        let status = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            if started.elapsed() >= self.timeout {
                let _ = child.kill();
                let _ = child.wait();
                return Err(CollectError::Timeout(self.timeout));
            }
            thread::sleep(Self::POLL_INTERVAL);
        };

        if !status.success() {
            return Err(CollectError::Command(format!(
                "{} exited with {}",
                self.program, status
            )));
        }

        let output = reader
            .join()
            .map_err(|_| CollectError::Command(format!("reading {} output failed", self.program)))??;
        trace!(elapsed = ?started.elapsed(), "top finished");
        Ok(output)
    }
}

impl SystemSampler for TopSampler {
    fn sample(&mut self) -> Result<SystemSnapshot, CollectError> {
        let output = self.run()?;
        parse_top(&output).map_err(|e| CollectError::Parse(e.message))
    }
}

/// Parses the header of `top -l 1` output.
///
/// Lines that are absent leave their fields at the idle defaults; output with
/// none of the expected lines is an error.
pub fn parse_top(output: &str) -> Result<SystemSnapshot, ParseError> {
    let mut snapshot = SystemSnapshot::default();
    let mut seen = false;

    for line in output.lines() {
        if let Some(rest) = after(line, "CPU usage:") {
            let pcts: Vec<f64> = rest
                .split_whitespace()
                .filter_map(|tok| tok.trim_end_matches(',').strip_suffix('%'))
                .filter_map(|num| num.parse().ok())
                .collect();
            if let [user, sys, idle, ..] = pcts[..] {
                snapshot.cpu_user = user;
                snapshot.cpu_sys = sys;
                snapshot.cpu_idle = idle;
                seen = true;
            }
        } else if let Some(rest) = after(line, "PhysMem:") {
            let used = size_before(rest, "used");
            let unused = size_before(rest, "unused");
            if let (Some(used), Some(unused)) = (used, unused) {
                snapshot.mem_used = used;
                snapshot.mem_total = used + unused;
                seen = true;
            }
        } else if let Some(rest) = after(line, "Load Avg:") {
            let loads: Vec<f64> = rest
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter_map(|tok| tok.parse().ok())
                .collect();
            if let [l1, l5, l15, ..] = loads[..] {
                snapshot.load = [l1, l5, l15];
                seen = true;
            }
        }
    }

    if !seen {
        return Err(ParseError::new("no CPU, PhysMem or Load Avg line in top output"));
    }
    Ok(snapshot)
}

/// Returns the text after `label` when the line contains it.
fn after<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    line.find(label).map(|i| &line[i + label.len()..])
}

/// Finds `<size> <word>` (e.g. `15G used`) and returns the size in MiB.
fn size_before(text: &str, word: &str) -> Option<u64> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    tokens.windows(2).find_map(|pair| {
        let next = pair[1].trim_end_matches(|c: char| c == ',' || c == '.' || c == ')');
        if next == word {
            parse_mib(pair[0])
        } else {
            None
        }
    })
}

/// Parses sizes like `512M`, `15G`, `1.5T` or `800K` into MiB.
fn parse_mib(token: &str) -> Option<u64> {
    let token = token.trim_start_matches('(');
    let unit = token.chars().last()?;
    let value: f64 = token[..token.len() - unit.len_utf8()].parse().ok()?;
    let mib = match unit {
        'K' => value / 1024.0,
        'M' => value,
        'G' => value * 1024.0,
        'T' => value * 1024.0 * 1024.0,
        _ => return None,
    };
    Some(mib as u64)
}
