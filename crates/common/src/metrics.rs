use std::sync::{Arc, OnceLock};

use prometheus::{
    CounterVec, Encoder, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
};

#[derive(Clone, Debug)]
pub struct MetricsRegistry {
    inner: Arc<MetricsInner>,
}

#[derive(Debug)]
struct MetricsInner {
    registry: Registry,
    scan_partitions_planned: CounterVec,
    scan_fragments_planned: CounterVec,
    scan_bytes_planned: CounterVec,
    scan_oversized_fragments: CounterVec,
    scan_pack_seconds: HistogramVec,
    write_records_routed: CounterVec,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MetricsInner::new()),
        }
    }

    pub fn record_scan_plan(
        &self,
        table: &str,
        partitions: u64,
        fragments: u64,
        bytes: u64,
        oversized_fragments: u64,
        secs: f64,
    ) {
        let labels = [table];
        self.inner
            .scan_partitions_planned
            .with_label_values(&labels)
            .inc_by(partitions as f64);
        self.inner
            .scan_fragments_planned
            .with_label_values(&labels)
            .inc_by(fragments as f64);
        self.inner
            .scan_bytes_planned
            .with_label_values(&labels)
            .inc_by(bytes as f64);
        self.inner
            .scan_oversized_fragments
            .with_label_values(&labels)
            .inc_by(oversized_fragments as f64);
        self.inner
            .scan_pack_seconds
            .with_label_values(&labels)
            .observe(secs.max(0.0));
    }

    /// Batch-granularity routing counter for the host write path.
    ///
    /// The per-record assignment call itself never touches metrics.
    pub fn record_write_routing(&self, table: &str, records: u64) {
        self.inner
            .write_records_routed
            .with_label_values(&[table])
            .inc_by(records as f64);
    }

    pub fn render_prometheus(&self) -> String {
        let metric_families = self.inner.registry.gather();
        let mut out = Vec::new();
        let enc = TextEncoder::new();
        if enc.encode(&metric_families, &mut out).is_err() {
            return String::new();
        }
        String::from_utf8_lossy(&out).to_string()
    }
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsInner {
    fn new() -> Self {
        let registry = Registry::new();

        let scan_partitions_planned = counter_vec(
            &registry,
            "lkb_scan_partitions_planned_total",
            "Scan partitions emitted by fragment packing",
            &["table"],
        );
        let scan_fragments_planned = counter_vec(
            &registry,
            "lkb_scan_fragments_planned_total",
            "File fragments packed into scan partitions",
            &["table"],
        );
        let scan_bytes_planned = counter_vec(
            &registry,
            "lkb_scan_bytes_planned_total",
            "Raw fragment bytes covered by scan planning",
            &["table"],
        );
        let scan_oversized_fragments = counter_vec(
            &registry,
            "lkb_scan_oversized_fragments_total",
            "Fragments whose length alone exceeds the split budget",
            &["table"],
        );
        let scan_pack_seconds = histogram_vec(
            &registry,
            "lkb_scan_pack_seconds",
            "Time spent packing fragments into scan partitions",
            &["table"],
        );
        let write_records_routed = counter_vec(
            &registry,
            "lkb_write_records_routed_total",
            "Records routed to writer slots",
            &["table"],
        );

        Self {
            registry,
            scan_partitions_planned,
            scan_fragments_planned,
            scan_bytes_planned,
            scan_oversized_fragments,
            scan_pack_seconds,
            write_records_routed,
        }
    }
}

fn counter_vec(registry: &Registry, name: &str, help: &str, labels: &[&str]) -> CounterVec {
    let c = CounterVec::new(Opts::new(name, help), labels).expect("counter vec");
    registry
        .register(Box::new(c.clone()))
        .expect("register counter");
    c
}

fn histogram_vec(registry: &Registry, name: &str, help: &str, labels: &[&str]) -> HistogramVec {
    let h = HistogramVec::new(HistogramOpts::new(name, help), labels).expect("histogram vec");
    registry
        .register(Box::new(h.clone()))
        .expect("register histogram");
    h
}

static GLOBAL_METRICS: OnceLock<MetricsRegistry> = OnceLock::new();

pub fn global_metrics() -> &'static MetricsRegistry {
    GLOBAL_METRICS.get_or_init(MetricsRegistry::new)
}
