//! Key and measure descriptors
//!
//! Keys and measures are capabilities layered on [`BaseMeasure`]: a [`Key`]
//! turns raw values into [`KeyValue`]s, a [`Measure`] turns readings into
//! [`Measurement`]s. Both are registered once at definition time and then
//! shared read-only. [`DefinedKey`] and [`DefinedMeasure`] are the provided
//! implementations, cheap-clone handles over one immutable [`Descriptor`].

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;

use crate::{EventId, Measurement, ScopeId, Unit, Value};

/// Shared key handle stored in every [`KeyValue`]
pub type KeyRef = Arc<dyn Key>;

/// Shared measure handle stored in every [`Measurement`]
pub type MeasureRef = Arc<dyn Measure>;

/// Name, description, unit and defining event of a key or measure
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Descriptor {
    pub name: String,
    pub description: String,
    pub unit: Unit,
    pub definition_id: EventId,
}

impl Descriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Descriptor {
            name: name.into(),
            description: String::new(),
            unit: Unit::default(),
            definition_id: EventId::ZERO,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_definition_id(mut self, id: EventId) -> Self {
        self.definition_id = id;
        self
    }
}

/// Shared descriptor capability of keys and measures
pub trait BaseMeasure {
    fn descriptor(&self) -> &Descriptor;

    fn name(&self) -> &str {
        &self.descriptor().name
    }

    fn description(&self) -> &str {
        &self.descriptor().description
    }

    fn unit(&self) -> &Unit {
        &self.descriptor().unit
    }

    fn definition_id(&self) -> EventId {
        self.descriptor().definition_id
    }
}

/// Ambient tag context a key can read its current value from
pub trait TagSource {
    /// Current value of `key`, or `None` when the key is not set
    fn lookup(&self, key: &dyn Key) -> Option<Value>;
}

/// Typed tag definition.
///
/// Every factory routes through [`Key::key_value`] and tags the value with
/// the width it was called with, whatever the widened storage.
pub trait Key: BaseMeasure + fmt::Debug + Send + Sync {
    /// Shared handle to this key, carried by the pairs it produces
    fn key_ref(&self) -> KeyRef;

    /// Pair this key with an already-built value
    fn key_value(&self, value: Value) -> KeyValue {
        KeyValue {
            key: self.key_ref(),
            value,
        }
    }

    /// Current value in `ctx`. An unset key yields [`Value::Invalid`].
    fn value(&self, ctx: &dyn TagSource) -> KeyValue {
        let key = self.key_ref();
        let value = ctx.lookup(&*key).unwrap_or_default();
        KeyValue { key, value }
    }

    fn bool(&self, v: bool) -> KeyValue {
        self.key_value(Value::Bool(v))
    }

    /// Platform `isize` is recorded as a 64-bit integer
    fn int(&self, v: isize) -> KeyValue {
        self.key_value(Value::Int64(v as i64))
    }

    fn int32(&self, v: i32) -> KeyValue {
        self.key_value(Value::Int32(v as i64))
    }

    fn int64(&self, v: i64) -> KeyValue {
        self.key_value(Value::Int64(v))
    }

    /// Platform `usize` is recorded as a 64-bit integer
    fn uint(&self, v: usize) -> KeyValue {
        self.key_value(Value::Uint64(v as u64))
    }

    fn uint32(&self, v: u32) -> KeyValue {
        self.key_value(Value::Uint32(v as u64))
    }

    fn uint64(&self, v: u64) -> KeyValue {
        self.key_value(Value::Uint64(v))
    }

    fn float32(&self, v: f32) -> KeyValue {
        self.key_value(Value::Float32(v as f64))
    }

    fn float64(&self, v: f64) -> KeyValue {
        self.key_value(Value::Float64(v))
    }

    fn string(&self, v: &str) -> KeyValue {
        self.key_value(Value::String(v.to_string()))
    }

    fn bytes(&self, v: Bytes) -> KeyValue {
        self.key_value(Value::Bytes(v))
    }
}

/// Metric definition
pub trait Measure: BaseMeasure + fmt::Debug + Send + Sync {
    /// Shared handle to this measure, carried by its measurements
    fn measure_ref(&self) -> MeasureRef;

    /// The same definition viewed as a tag key
    fn as_key(&self) -> KeyRef;

    /// Unscoped observation; attach a scope with [`Measurement::with`]
    fn m(&self, value: f64) -> Measurement {
        Measurement {
            measure: self.measure_ref(),
            value,
            scope: ScopeId::default(),
        }
    }

    /// This measure's value as a generic tag
    fn v(&self, value: f64) -> KeyValue {
        self.as_key().float64(value)
    }
}

/// Registered tag key
#[derive(Clone)]
pub struct DefinedKey {
    desc: Arc<Descriptor>,
}

impl DefinedKey {
    pub fn new(descriptor: Descriptor) -> Self {
        DefinedKey {
            desc: Arc::new(descriptor),
        }
    }
}

impl BaseMeasure for DefinedKey {
    fn descriptor(&self) -> &Descriptor {
        &self.desc
    }
}

impl Key for DefinedKey {
    fn key_ref(&self) -> KeyRef {
        Arc::new(self.clone())
    }
}

impl PartialEq for DefinedKey {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.desc, &other.desc) || *self.desc == *other.desc
    }
}

impl Eq for DefinedKey {}

impl fmt::Debug for DefinedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({}, {:?})", self.desc.name, self.desc.definition_id)
    }
}

/// Registered measure
#[derive(Clone)]
pub struct DefinedMeasure {
    desc: Arc<Descriptor>,
}

impl DefinedMeasure {
    pub fn new(descriptor: Descriptor) -> Self {
        DefinedMeasure {
            desc: Arc::new(descriptor),
        }
    }
}

impl BaseMeasure for DefinedMeasure {
    fn descriptor(&self) -> &Descriptor {
        &self.desc
    }
}

impl Measure for DefinedMeasure {
    fn measure_ref(&self) -> MeasureRef {
        Arc::new(self.clone())
    }

    fn as_key(&self) -> KeyRef {
        Arc::new(DefinedKey {
            desc: Arc::clone(&self.desc),
        })
    }
}

impl PartialEq for DefinedMeasure {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.desc, &other.desc) || *self.desc == *other.desc
    }
}

impl fmt::Debug for DefinedMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Measure({}, {:?})", self.desc.name, self.desc.definition_id)
    }
}

/// A key paired with one of its values
#[derive(Clone, Debug)]
pub struct KeyValue {
    pub key: KeyRef,
    pub value: Value,
}

// Keys are identified by their descriptor, whoever implements them.
impl PartialEq for KeyValue {
    fn eq(&self, other: &Self) -> bool {
        self.key.descriptor() == other.key.descriptor() && self.value == other.value
    }
}

impl KeyValue {
    pub fn new(key: KeyRef, value: impl Into<Value>) -> Self {
        KeyValue {
            key,
            value: value.into(),
        }
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key.name(), self.value.emit())
    }
}
