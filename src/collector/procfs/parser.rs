//! Parsers for `/proc` filesystem files.
//!
//! These are pure functions that parse the content of `/proc` files into
//! structured data. They are designed to be easily testable with string inputs.

/// Error type for parsing failures.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Parse error: {}", self.message)
    }
}

impl std::error::Error for ParseError {}

/// Parsed data from `/proc/meminfo`, in kB.
#[derive(Debug, Clone, Default)]
pub struct MemInfo {
    pub mem_total: u64,
    pub mem_free: u64,
    pub mem_available: u64,
    pub buffers: u64,
    pub cached: u64,
}

impl MemInfo {
    /// Memory in use, in kB.
    ///
    /// Older kernels lack `MemAvailable`; free + buffers + cache stands in.
    pub fn used(&self) -> u64 {
        let available = if self.mem_available > 0 {
            self.mem_available
        } else {
            self.mem_free + self.buffers + self.cached
        };
        self.mem_total.saturating_sub(available)
    }
}

/// Parses `/proc/meminfo` content.
pub fn parse_meminfo(content: &str) -> Result<MemInfo, ParseError> {
    let mut info = MemInfo::default();

    let parse_kb = |line: &str| -> u64 {
        line.split_whitespace()
            .nth(1)
            .and_then(|s| s.parse().ok())
            .unwrap_or(0)
    };

    for line in content.lines() {
        if line.starts_with("MemTotal:") {
            info.mem_total = parse_kb(line);
        } else if line.starts_with("MemFree:") {
            info.mem_free = parse_kb(line);
        } else if line.starts_with("MemAvailable:") {
            info.mem_available = parse_kb(line);
        } else if line.starts_with("Buffers:") {
            info.buffers = parse_kb(line);
        } else if line.starts_with("Cached:") {
            info.cached = parse_kb(line);
        }
    }

    if info.mem_total == 0 {
        return Err(ParseError::new("missing MemTotal"));
    }

    Ok(info)
}

/// Aggregate CPU time counters from the `cpu` line of `/proc/stat`, in USER_HZ.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuStat {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
    pub steal: u64,
}

impl CpuStat {
    /// Time spent running user code, niced or not.
    pub fn user_time(&self) -> u64 {
        self.user + self.nice
    }

    /// Time spent in the kernel, including interrupts and hypervisor steal.
    pub fn system_time(&self) -> u64 {
        self.system + self.irq + self.softirq + self.steal
    }

    /// Time spent doing nothing, including waiting on i/o.
    pub fn idle_time(&self) -> u64 {
        self.idle + self.iowait
    }

    pub fn total(&self) -> u64 {
        self.user_time() + self.system_time() + self.idle_time()
    }

    /// Counters accumulated since `earlier`.
    ///
    /// Counters that went backwards (a cpu going offline) clamp to zero.
    pub fn since(&self, earlier: &CpuStat) -> CpuStat {
        CpuStat {
            user: self.user.saturating_sub(earlier.user),
            nice: self.nice.saturating_sub(earlier.nice),
            system: self.system.saturating_sub(earlier.system),
            idle: self.idle.saturating_sub(earlier.idle),
            iowait: self.iowait.saturating_sub(earlier.iowait),
            irq: self.irq.saturating_sub(earlier.irq),
            softirq: self.softirq.saturating_sub(earlier.softirq),
            steal: self.steal.saturating_sub(earlier.steal),
        }
    }
}

/// Parses the aggregate `cpu` line out of `/proc/stat` content.
pub fn parse_cpu_stat(content: &str) -> Result<CpuStat, ParseError> {
    let line = content
        .lines()
        .find(|line| line.split_whitespace().next() == Some("cpu"))
        .ok_or_else(|| ParseError::new("missing aggregate cpu line"))?;

    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 5 {
        return Err(ParseError::new("truncated cpu line"));
    }

    let get_val = |idx: usize| -> u64 { parts.get(idx).and_then(|s| s.parse().ok()).unwrap_or(0) };

    Ok(CpuStat {
        user: get_val(1),
        nice: get_val(2),
        system: get_val(3),
        idle: get_val(4),
        iowait: get_val(5),
        irq: get_val(6),
        softirq: get_val(7),
        steal: get_val(8),
    })
}

/// Parsed data from `/proc/loadavg`.
#[derive(Debug, Clone, Default)]
pub struct LoadAvg {
    pub load1: f64,
    pub load5: f64,
    pub load15: f64,
}

/// Parses `/proc/loadavg` content.
pub fn parse_loadavg(content: &str) -> Result<LoadAvg, ParseError> {
    let parts: Vec<&str> = content.split_whitespace().collect();
    if parts.len() < 3 {
        return Err(ParseError::new("invalid loadavg format"));
    }

    let load1 = parts[0]
        .parse()
        .map_err(|_| ParseError::new("invalid load1"))?;
    let load5 = parts[1]
        .parse()
        .map_err(|_| ParseError::new("invalid load5"))?;
    let load15 = parts[2]
        .parse()
        .map_err(|_| ParseError::new("invalid load15"))?;

    Ok(LoadAvg {
        load1,
        load5,
        load15,
    })
}
