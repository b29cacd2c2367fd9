//! Definition registry
//!
//! Keys and measures are defined once, at startup, and then shared. The
//! registry hands each definition a fresh non-zero [`EventId`] and
//! rejects a second definition under the same name.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::{DefinedKey, DefinedMeasure, Descriptor, EventId, LumenError, LumenResult, Unit};

/// Longest accepted definition name
pub const MAX_NAME_LEN: usize = 255;

/// A registered definition
#[derive(Clone, Debug)]
pub enum Definition {
    Key(DefinedKey),
    Measure(DefinedMeasure),
}

/// Registry of key and measure definitions
#[derive(Debug)]
pub struct Registry {
    definitions: RwLock<HashMap<String, Definition>>,
    next_id: AtomicU64,
}

impl Registry {
    pub fn new() -> Self {
        Registry {
            definitions: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Define a new tag key
    pub fn key(&self, name: &str, description: &str, unit: Unit) -> LumenResult<DefinedKey> {
        let descriptor = self.define(name, description, unit)?;
        let key = DefinedKey::new(descriptor);
        self.insert(name, Definition::Key(key.clone()))?;
        Ok(key)
    }

    /// Define a new measure
    pub fn measure(&self, name: &str, description: &str, unit: Unit) -> LumenResult<DefinedMeasure> {
        let descriptor = self.define(name, description, unit)?;
        let measure = DefinedMeasure::new(descriptor);
        self.insert(name, Definition::Measure(measure.clone()))?;
        Ok(measure)
    }

    pub fn get(&self, name: &str) -> Option<Definition> {
        self.definitions.read().get(name).cloned()
    }

    pub fn get_key(&self, name: &str) -> Option<DefinedKey> {
        match self.get(name)? {
            Definition::Key(key) => Some(key),
            Definition::Measure(_) => None,
        }
    }

    pub fn get_measure(&self, name: &str) -> Option<DefinedMeasure> {
        match self.get(name)? {
            Definition::Measure(measure) => Some(measure),
            Definition::Key(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.definitions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.read().is_empty()
    }

    fn define(&self, name: &str, description: &str, unit: Unit) -> LumenResult<Descriptor> {
        validate_name(name)?;
        if self.definitions.read().contains_key(name) {
            return Err(LumenError::DuplicateDefinition(name.to_string()));
        }
        let id = EventId(self.next_id.fetch_add(1, Ordering::Relaxed));
        Ok(Descriptor::new(name)
            .with_description(description)
            .with_unit(unit)
            .with_definition_id(id))
    }

    fn insert(&self, name: &str, definition: Definition) -> LumenResult<()> {
        let mut definitions = self.definitions.write();
        // Re-check under the write lock; a concurrent define may have won.
        if definitions.contains_key(name) {
            return Err(LumenError::DuplicateDefinition(name.to_string()));
        }
        tracing::debug!(name, ?definition, "registered definition");
        definitions.insert(name.to_string(), definition);
        Ok(())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::new()
    }
}

/// Names are non-empty printable ASCII of at most [`MAX_NAME_LEN`] bytes
pub fn validate_name(name: &str) -> LumenResult<()> {
    let printable = name.bytes().all(|b| (0x20..0x7f).contains(&b));
    if name.is_empty() || name.len() > MAX_NAME_LEN || !printable {
        return Err(LumenError::InvalidName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BaseMeasure;

    #[test]
    fn test_distinct_nonzero_ids() {
        let registry = Registry::new();
        let method = registry.key("rpc.method", "", Unit::DIMENSIONLESS).unwrap();
        let latency = registry
            .measure("rpc.latency", "call latency", Unit::MILLISECONDS)
            .unwrap();

        assert!(!method.definition_id().is_zero());
        assert!(!latency.definition_id().is_zero());
        assert_ne!(method.definition_id(), latency.definition_id());
        assert_eq!(latency.description(), "call latency");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_duplicate_rejected() {
        let registry = Registry::new();
        registry.key("tenant", "", Unit::default()).unwrap();

        let err = registry.measure("tenant", "", Unit::default()).unwrap_err();
        assert!(matches!(err, LumenError::DuplicateDefinition(ref n) if n == "tenant"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_lookup_by_kind() {
        let registry = Registry::new();
        let key = registry.key("tenant", "", Unit::default()).unwrap();
        registry.measure("bytes.sent", "", Unit::BYTES).unwrap();

        assert_eq!(registry.get_key("tenant"), Some(key));
        assert!(registry.get_measure("tenant").is_none());
        assert!(registry.get_measure("bytes.sent").is_some());
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_invalid_names() {
        assert!(validate_name("").is_err());
        assert!(validate_name("tab\there").is_err());
        assert!(validate_name("ünicode").is_err());
        assert!(validate_name(&"a".repeat(MAX_NAME_LEN + 1)).is_err());
        assert!(validate_name("http.status_code").is_ok());
    }
}
