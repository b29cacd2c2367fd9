//! Measurement recorder
//!
//! Logs each measurement as one structured `tracing` event, rendered with
//! the canonical value path so log output matches every other display site.

use std::sync::atomic::{AtomicU64, Ordering};

use lumen_core::{BaseMeasure, KeyValue, Measurement, Mutator, MutatorOp, StatusCode};
use lumen_tag::TagMap;

use crate::RuntimeConfig;

/// Target used for every recorded measurement event
pub const MEASUREMENT_TARGET: &str = "lumen::measurement";

/// Records measurements against the tags of the current context
#[derive(Debug)]
pub struct Recorder {
    config: RuntimeConfig,
    recorded: AtomicU64,
}

impl Recorder {
    pub fn new(config: RuntimeConfig) -> Self {
        Recorder {
            config,
            recorded: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Mutator carrying the configured default hop budget
    pub fn mutator(&self, op: MutatorOp, key_value: KeyValue) -> Mutator {
        Mutator::new(op, key_value).with_max_hops(self.config.default_max_hops)
    }

    /// Record a batch of measurements taken under `tags`
    pub fn record(&self, tags: &TagMap, measurements: &[Measurement]) {
        for m in measurements {
            self.emit(tags, m, None);
        }
    }

    /// Record the measurement of a completed RPC together with its status
    pub fn record_rpc(&self, tags: &TagMap, measurement: &Measurement, status: StatusCode) {
        self.emit(tags, measurement, Some(status));
    }

    /// Number of measurements recorded so far
    pub fn recorded(&self) -> u64 {
        self.recorded.load(Ordering::Relaxed)
    }

    fn emit(&self, tags: &TagMap, m: &Measurement, status: Option<StatusCode>) {
        let span = m.scope.span_context;
        let trace = if span.has_trace_id() {
            span.trace_id_string()
        } else {
            "-".to_string()
        };
        let span_id = if span.has_span_id() {
            span.span_id_string()
        } else {
            "-".to_string()
        };
        let status = status.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string());

        tracing::info!(
            target: MEASUREMENT_TARGET,
            measure = m.name(),
            value = m.value,
            unit = %m.measure.unit(),
            event = %m.scope.event_id,
            trace = %trace,
            span = %span_id,
            status = %status,
            tags = %tags,
            "measurement"
        );
        self.recorded.fetch_add(1, Ordering::Relaxed);
    }
}

impl Default for Recorder {
    fn default() -> Self {
        Recorder::new(RuntimeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::{DefinedKey, DefinedMeasure, Descriptor, Key, Measure, LOCAL_ONLY};

    #[test]
    fn test_mutator_uses_default_budget() {
        let config = RuntimeConfig {
            default_max_hops: 3,
            ..RuntimeConfig::default()
        };
        let recorder = Recorder::new(config);
        let key = DefinedKey::new(Descriptor::new("tenant"));

        let mutator = recorder.mutator(MutatorOp::Insert, key.string("acme"));
        assert_eq!(mutator.max_hops(), 3);
        assert_eq!(mutator.op, MutatorOp::Insert);
    }

    #[test]
    fn test_default_config_keeps_tags_local() {
        let recorder = Recorder::default();
        let key = DefinedKey::new(Descriptor::new("tenant"));

        let mutator = recorder.mutator(MutatorOp::Upsert, key.string("acme"));
        assert_eq!(mutator.max_hops(), LOCAL_ONLY);
        assert!(TagMap::from_mutators(&[mutator]).propagate().is_empty());
    }

    #[test]
    fn test_record_counts() {
        let recorder = Recorder::default();
        let measure = DefinedMeasure::new(Descriptor::new("bytes.sent"));

        recorder.record(&TagMap::new(), &[measure.m(1.0), measure.m(2.0)]);
        recorder.record_rpc(&TagMap::new(), &measure.m(3.0), StatusCode::OK);
        assert_eq!(recorder.recorded(), 3);
    }
}
