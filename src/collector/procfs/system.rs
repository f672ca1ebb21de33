//! System sampler backed by `/proc`.

use std::path::Path;

use crate::collector::CollectError;
use crate::collector::procfs::parser::{CpuStat, parse_cpu_stat, parse_loadavg, parse_meminfo};
use crate::collector::traits::{FileSystem, SystemSampler};
use crate::model::SystemSnapshot;

/// Reads CPU, memory and load from `/proc`.
///
/// CPU percentages are measured between consecutive samples, so the sampler
/// keeps the previous `/proc/stat` counters. The first sample covers the time
/// since boot.
pub struct ProcfsSampler<F: FileSystem> {
    fs: F,
    proc_path: String,
    prev_cpu: Option<CpuStat>,
}

impl<F: FileSystem> ProcfsSampler<F> {
    /// Creates a new sampler.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `proc_path` - Base path to proc filesystem (usually "/proc")
    pub fn new(fs: F, proc_path: impl Into<String>) -> Self {
        Self {
            fs,
            proc_path: proc_path.into(),
            prev_cpu: None,
        }
    }

    fn read(&self, name: &str) -> Result<String, CollectError> {
        let path = format!("{}/{}", self.proc_path, name);
        Ok(self.fs.read_to_string(Path::new(&path))?)
    }

    /// Returns (user, sys, idle) percentages since the previous call.
    fn collect_cpu(&mut self) -> Result<(f64, f64, f64), CollectError> {
        let content = self.read("stat")?;
        let current = parse_cpu_stat(&content).map_err(|e| CollectError::Parse(e.message))?;

        let delta = match self.prev_cpu.replace(current) {
            Some(prev) => current.since(&prev),
            None => current,
        };

        let total = delta.total();
        if total == 0 {
            // no ticks elapsed between samples
            return Ok((0.0, 0.0, 100.0));
        }
        let pct = |v: u64| v as f64 / total as f64 * 100.0;
        Ok((
            pct(delta.user_time()),
            pct(delta.system_time()),
            pct(delta.idle_time()),
        ))
    }

    /// Returns (used, total) memory in MiB.
    fn collect_memory(&self) -> Result<(u64, u64), CollectError> {
        let content = self.read("meminfo")?;
        let info = parse_meminfo(&content).map_err(|e| CollectError::Parse(e.message))?;
        Ok((info.used() / 1024, info.mem_total / 1024))
    }

    fn collect_load(&self) -> Result<[f64; 3], CollectError> {
        let content = self.read("loadavg")?;
        let info = parse_loadavg(&content).map_err(|e| CollectError::Parse(e.message))?;
        Ok([info.load1, info.load5, info.load15])
    }
}

impl<F: FileSystem> SystemSampler for ProcfsSampler<F> {
    fn sample(&mut self) -> Result<SystemSnapshot, CollectError> {
        let (cpu_user, cpu_sys, cpu_idle) = self.collect_cpu()?;
        let (mem_used, mem_total) = self.collect_memory()?;
        let load = self.collect_load()?;

        Ok(SystemSnapshot {
            cpu_user,
            cpu_sys,
            cpu_idle,
            mem_used,
            mem_total,
            load,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::MockFs;

    #[test]
    fn test_first_sample_uses_counters_since_boot() {
        let mut sampler = ProcfsSampler::new(MockFs::typical_system(), "/proc");
        let s = sampler.sample().unwrap();

        // 10500 user, 3300 system, 81000 idle out of 94800 ticks
        assert!((s.cpu_user - 10500.0 / 948.0).abs() < 1e-9);
        assert!((s.cpu_sys - 3300.0 / 948.0).abs() < 1e-9);
        assert!((s.cpu_user + s.cpu_sys + s.cpu_idle - 100.0).abs() < 1e-9);
        assert_eq!(s.mem_total, 16384);
        assert_eq!(s.mem_used, 8192);
        assert_eq!(s.load, [1.2, 1.0, 0.9]);
    }

    #[test]
    fn test_second_sample_uses_delta() {
        let fs = MockFs::typical_system();
        let mut sampler = ProcfsSampler::new(fs.clone(), "/proc");
        sampler.sample().unwrap();

        // +60 user, +20 nice, +20 system, +100 idle
        fs.add_file("/proc/stat", "cpu  10060 520 3020 80100 1000 200 100 0 0 0\n");
        let s = sampler.sample().unwrap();

        assert!((s.cpu_user - 40.0).abs() < 1e-9);
        assert!((s.cpu_sys - 10.0).abs() < 1e-9);
        assert!((s.cpu_idle - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_elapsed_ticks_reads_idle() {
        let mut sampler = ProcfsSampler::new(MockFs::typical_system(), "/proc");
        sampler.sample().unwrap();
        let s = sampler.sample().unwrap();
        assert_eq!(s.cpu_used(), 0.0);
        assert_eq!(s.cpu_idle, 100.0);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let fs = MockFs::typical_system();
        fs.remove_file("/proc/loadavg");
        let mut sampler = ProcfsSampler::new(fs, "/proc");
        assert!(matches!(sampler.sample(), Err(CollectError::Io(_))));
    }

    #[test]
    fn test_custom_proc_path() {
        let fs = MockFs::new();
        fs.add_file("/host/proc/stat", "cpu 1 0 1 2 0 0 0 0\n");
        fs.add_file("/host/proc/meminfo", "MemTotal: 2097152 kB\nMemAvailable: 1048576 kB\n");
        fs.add_file("/host/proc/loadavg", "0.50 0.25 0.10 1/10 99\n");

        let mut sampler = ProcfsSampler::new(fs, "/host/proc");
        let s = sampler.sample().unwrap();
        assert_eq!(s.mem_total, 2048);
        assert_eq!(s.mem_used, 1024);
        assert!((s.cpu_used() - 50.0).abs() < 1e-9);
    }
}
