//! Runtime metric sampling

use super::buffer::MetricBuffer;
use crate::core::models::Metric;
use std::sync::Arc;
use sysinfo::{Pid, ProcessesToUpdate, System};
use tracing::debug;

/// Source of runtime samples
pub trait Sampler: Send {
    /// Take one round of samples
    fn sample(&mut self) -> Vec<Metric>;
}

/// Host and process metrics read through `sysinfo`
pub struct SystemSampler {
    system: System,
    pid: Option<Pid>,
}

impl SystemSampler {
    pub fn new() -> Self {
        Self {
            system: System::new(),
            pid: sysinfo::get_current_pid().ok(),
        }
    }
}

impl Default for SystemSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl Sampler for SystemSampler {
    fn sample(&mut self) -> Vec<Metric> {
        self.system.refresh_memory();
        self.system.refresh_cpu_usage();

        let sys = &self.system;
        let mut samples = vec![
            Metric::gauge("TotalMemory", sys.total_memory() as f64),
            Metric::gauge("FreeMemory", sys.free_memory() as f64),
            Metric::gauge("AvailableMemory", sys.available_memory() as f64),
            Metric::gauge("UsedMemory", sys.used_memory() as f64),
            Metric::gauge("TotalSwap", sys.total_swap() as f64),
            Metric::gauge("UsedSwap", sys.used_swap() as f64),
            Metric::gauge("CPUutilization", sys.global_cpu_usage() as f64),
        ];

        samples.extend(
            sys.cpus()
                .iter()
                .enumerate()
                .map(|(i, cpu)| Metric::gauge(format!("CPUutilization{}", i + 1), cpu.cpu_usage() as f64)),
        );

        let load = System::load_average();
        samples.push(Metric::gauge("LoadAverage1", load.one));
        samples.push(Metric::gauge("LoadAverage5", load.five));
        samples.push(Metric::gauge("LoadAverage15", load.fifteen));

        if let Some(pid) = self.pid {
            self.system
                .refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
            if let Some(process) = self.system.process(pid) {
                samples.push(Metric::gauge("ProcessResidentMemory", process.memory() as f64));
                samples.push(Metric::gauge(
                    "ProcessVirtualMemory",
                    process.virtual_memory() as f64,
                ));
                samples.push(Metric::gauge("ProcessCPUUsage", process.cpu_usage() as f64));
            }
        }

        samples
    }
}

/// Samples into the shared buffer on every poll
pub struct Collector {
    sampler: Box<dyn Sampler>,
    buffer: Arc<MetricBuffer>,
}

impl Collector {
    pub fn new(sampler: Box<dyn Sampler>, buffer: Arc<MetricBuffer>) -> Self {
        Self { sampler, buffer }
    }

    /// One poll: sampler output plus `PollCount` and `RandomValue`
    pub fn poll(&mut self) {
        let samples = self.sampler.sample();
        debug!(samples = samples.len(), "Polled runtime metrics");

        for metric in samples {
            self.buffer.record(metric);
        }
        self.buffer.record(Metric::counter("PollCount", 1));
        self.buffer
            .record(Metric::gauge("RandomValue", rand::random::<f64>()));
    }
}
