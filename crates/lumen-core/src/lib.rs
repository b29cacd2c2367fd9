//! LUMEN Core - Identity and typed-value model for instrumentation
//!
//! This crate defines the data contract every other LUMEN component builds on:
//! - Identifiers (EventId, SpanContext, ScopeId)
//! - Typed values (ValueType, Value) and their canonical rendering
//! - Key and measure descriptors (BaseMeasure, Key, Measure, KeyValue)
//! - Measurements and tag mutators with a propagation hop budget
//! - RPC status codes and units of measure

pub mod descriptor;
pub mod error;
pub mod id;
pub mod measurement;
pub mod mutator;
pub mod registry;
pub mod status;
pub mod unit;
pub mod value;

pub use descriptor::*;
pub use error::*;
pub use id::*;
pub use measurement::*;
pub use mutator::*;
pub use registry::*;
pub use status::*;
pub use unit::*;
pub use value::*;
