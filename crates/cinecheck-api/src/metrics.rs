//! Prometheus metrics owned by one app instance.
use cinecheck_core::Report;
use prometheus::{Encoder, Histogram, HistogramOpts, IntCounterVec, Opts, Registry, TextEncoder};
use std::time::Duration;

pub struct Metrics {
    registry: Registry,
    requests: IntCounterVec,
    verdicts: IntCounterVec,
    latency: Histogram,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let requests = IntCounterVec::new(
            Opts::new("cinecheck_requests_total", "Verification requests by outcome"),
            &["outcome"],
        )?;
        let verdicts = IntCounterVec::new(
            Opts::new("cinecheck_verdicts_total", "Claim verdicts by status"),
            &["status"],
        )?;
        let latency = Histogram::with_opts(
            HistogramOpts::new("cinecheck_request_seconds", "Verification request latency")
                .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        )?;
        registry.register(Box::new(requests.clone()))?;
        registry.register(Box::new(verdicts.clone()))?;
        registry.register(Box::new(latency.clone()))?;
        Ok(Self {
            registry,
            requests,
            verdicts,
            latency,
        })
    }

    pub fn observe_request(&self, outcome: &str, elapsed: Duration) {
        self.requests.with_label_values(&[outcome]).inc();
        self.latency.observe(elapsed.as_secs_f64());
    }

    pub fn observe_report(&self, report: &Report) {
        for verdict in &report.verdicts {
            self.verdicts.with_label_values(&[verdict.status.as_str()]).inc();
        }
    }

    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}
