//! Recorder log output

use lumen_core::{EventId, Key, Measure, MutatorOp, Registry, ScopeId, SpanContext, StatusCode, Unit};
use lumen_runtime::{Recorder, RuntimeConfig};
use lumen_tag::TagMap;
use tracing_test::traced_test;

#[test]
#[traced_test]
fn test_measurement_is_logged_with_tags_and_scope() {
    let registry = Registry::new();
    let method = registry.key("rpc.method", "", Unit::DIMENSIONLESS).unwrap();
    let latency = registry
        .measure("rpc.latency", "call latency", Unit::MILLISECONDS)
        .unwrap();

    let recorder = Recorder::new(RuntimeConfig::default());
    let tags = TagMap::from_mutators(&[recorder.mutator(MutatorOp::Upsert, method.string("Get"))]);

    let scope = ScopeId::new(
        EventId(42),
        SpanContext::new(0xabc0_0000_0000_0000, 0x0000_0000_0000_0def, 0x0123_4567_89ab_cdef),
    );
    recorder.record_rpc(&tags, &latency.m(12.5).with(scope), StatusCode::DEADLINE_EXCEEDED);

    assert_eq!(recorder.recorded(), 1);
    assert!(logs_contain("rpc.latency"));
    assert!(logs_contain("rpc.method=Get"));
    assert!(logs_contain("012..def"));
    assert!(logs_contain("abc..def"));
    assert!(logs_contain("DEADLINE_EXCEEDED"));
}

#[test]
#[traced_test]
fn test_unscoped_measurement_logs_placeholders() {
    let registry = Registry::new();
    let depth = registry.measure("queue.depth", "", Unit::DIMENSIONLESS).unwrap();

    let recorder = Recorder::default();
    recorder.record(&TagMap::new(), &[depth.m(7.0)]);

    assert!(logs_contain("queue.depth"));
    assert!(logs_contain("span=-"));
}

#[test]
fn test_config_file_roundtrip() {
    let dir = std::env::temp_dir().join(format!("lumen-runtime-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("lumen.json");
    std::fs::write(&path, r#"{"default_max_hops": 1, "logging": {"level": "debug"}}"#).unwrap();

    let config = RuntimeConfig::from_json_file(&path).unwrap();
    assert_eq!(config.default_max_hops, 1);
    assert_eq!(config.logging.level, "debug");

    std::fs::remove_dir_all(&dir).unwrap();
}
