//! Tag map - the tag set of one distributed context

use std::collections::BTreeMap;
use std::fmt;

use lumen_core::{
    BaseMeasure, Key, KeyValue, MeasureMetadata, Mutator, MutatorOp, TagSource, Value,
};

/// One tag plus the budget it still has for crossing boundaries
#[derive(Clone, Debug, PartialEq)]
pub struct TagEntry {
    pub key_value: KeyValue,
    pub metadata: MeasureMetadata,
}

impl TagEntry {
    #[inline]
    pub fn value(&self) -> &Value {
        &self.key_value.value
    }
}

/// Outcome of applying a single mutator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    Inserted,
    Updated,
    Deleted,
    /// Insert on a present key, or update/delete on an absent one
    Skipped,
    /// Write carrying no payload
    Rejected,
}

/// Immutable tag set, ordered by key name
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TagMap {
    entries: BTreeMap<String, TagEntry>,
}

impl TagMap {
    pub fn new() -> Self {
        TagMap::default()
    }

    /// Tag map holding the result of `mutators` applied to an empty set
    pub fn from_mutators<'a, I>(mutators: I) -> Self
    where
        I: IntoIterator<Item = &'a Mutator>,
    {
        TagMap::new().apply(mutators)
    }

    pub fn get(&self, name: &str) -> Option<&TagEntry> {
        self.entries.get(name)
    }

    pub fn get_value(&self, name: &str) -> Option<&Value> {
        self.get(name).map(TagEntry::value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TagEntry> {
        self.entries.values()
    }

    pub fn key_values(&self) -> impl Iterator<Item = &KeyValue> {
        self.entries.values().map(|e| &e.key_value)
    }

    /// New map with `mutators` applied in order
    pub fn apply<'a, I>(&self, mutators: I) -> TagMap
    where
        I: IntoIterator<Item = &'a Mutator>,
    {
        self.apply_with_outcomes(mutators).0
    }

    /// Like [`TagMap::apply`], also reporting what each mutator did
    pub fn apply_with_outcomes<'a, I>(&self, mutators: I) -> (TagMap, Vec<ApplyOutcome>)
    where
        I: IntoIterator<Item = &'a Mutator>,
    {
        let mut next = self.clone();
        let outcomes = mutators
            .into_iter()
            .map(|mutator| next.apply_one(mutator))
            .collect();
        (next, outcomes)
    }

    /// Map as seen by the next process: local-only entries are dropped,
    /// finite budgets lose one hop.
    pub fn propagate(&self) -> TagMap {
        let entries = self
            .entries
            .iter()
            .filter_map(|(name, entry)| {
                let metadata = entry.metadata.next_hop()?;
                Some((
                    name.clone(),
                    TagEntry {
                        key_value: entry.key_value.clone(),
                        metadata,
                    },
                ))
            })
            .collect::<BTreeMap<_, _>>();

        tracing::trace!(
            kept = entries.len(),
            dropped = self.entries.len() - entries.len(),
            "propagated tag map"
        );
        TagMap { entries }
    }

    fn apply_one(&mut self, mutator: &Mutator) -> ApplyOutcome {
        let name = mutator.key_name();
        let present = self.entries.contains_key(name);

        let outcome = match mutator.op {
            MutatorOp::Delete => {
                if self.entries.remove(name).is_some() {
                    ApplyOutcome::Deleted
                } else {
                    ApplyOutcome::Skipped
                }
            }
            _ if !mutator.key_value.value.is_valid() => ApplyOutcome::Rejected,
            MutatorOp::Insert if present => ApplyOutcome::Skipped,
            MutatorOp::Update if !present => ApplyOutcome::Skipped,
            MutatorOp::Insert | MutatorOp::Update | MutatorOp::Upsert => {
                self.entries.insert(
                    name.to_string(),
                    TagEntry {
                        key_value: mutator.key_value.clone(),
                        metadata: mutator.metadata,
                    },
                );
                if present {
                    ApplyOutcome::Updated
                } else {
                    ApplyOutcome::Inserted
                }
            }
        };

        tracing::trace!(key = name, op = %mutator.op, ?outcome, "applied mutator");
        outcome
    }
}

impl TagSource for TagMap {
    fn lookup(&self, key: &dyn Key) -> Option<Value> {
        self.get_value(key.name()).cloned()
    }
}

impl fmt::Display for TagMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for kv in self.key_values() {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{}", kv)?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::{DefinedKey, Descriptor, LOCAL_ONLY};

    fn tenant() -> DefinedKey {
        DefinedKey::new(Descriptor::new("tenant"))
    }

    #[test]
    fn test_insert_only_when_absent() {
        let map = TagMap::from_mutators(&[Mutator::insert(tenant().string("a"))]);
        let map = map.apply(&[Mutator::insert(tenant().string("b"))]);
        assert_eq!(map.get_value("tenant"), Some(&Value::String("a".into())));
    }

    #[test]
    fn test_update_only_when_present() {
        let map = TagMap::new().apply(&[Mutator::update(tenant().string("a"))]);
        assert!(map.is_empty());

        let map = map.apply(&[
            Mutator::upsert(tenant().string("a")),
            Mutator::update(tenant().string("b")),
        ]);
        assert_eq!(map.get_value("tenant"), Some(&Value::String("b".into())));
    }

    #[test]
    fn test_delete() {
        let map = TagMap::from_mutators(&[Mutator::upsert(tenant().int32(1))]);
        let cleared = map.apply(&[Mutator::delete(tenant().int32(0))]);
        assert!(cleared.is_empty());
        // Receiver is untouched
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_invalid_value_rejected() {
        let mut map = TagMap::new();
        let outcome = map.apply_one(&Mutator::upsert(tenant().key_value(Value::Invalid)));
        assert_eq!(outcome, ApplyOutcome::Rejected);
        assert!(map.is_empty());
    }

    #[test]
    fn test_apply_outcomes() {
        let mut map = TagMap::new();
        assert_eq!(
            map.apply_one(&Mutator::insert(tenant().bool(true))),
            ApplyOutcome::Inserted
        );
        assert_eq!(
            map.apply_one(&Mutator::upsert(tenant().bool(false))),
            ApplyOutcome::Updated
        );
        assert_eq!(
            map.apply_one(&Mutator::insert(tenant().bool(true))),
            ApplyOutcome::Skipped
        );
        assert_eq!(
            map.apply_one(&Mutator::delete(tenant().bool(true))),
            ApplyOutcome::Deleted
        );
        assert_eq!(
            map.apply_one(&Mutator::delete(tenant().bool(true))),
            ApplyOutcome::Skipped
        );
    }

    #[test]
    fn test_apply_with_outcomes_reports_each_mutator() {
        let base = TagMap::from_mutators(&[Mutator::upsert(tenant().string("a"))]);
        let (next, outcomes) = base.apply_with_outcomes(&[
            Mutator::insert(tenant().string("b")),
            Mutator::update(tenant().string("c")),
            Mutator::upsert(tenant().key_value(Value::Invalid)),
            Mutator::delete(tenant().string("")),
            Mutator::update(tenant().string("d")),
            Mutator::upsert(tenant().string("e")),
        ]);

        assert_eq!(
            outcomes,
            vec![
                ApplyOutcome::Skipped,
                ApplyOutcome::Updated,
                ApplyOutcome::Rejected,
                ApplyOutcome::Deleted,
                ApplyOutcome::Skipped,
                ApplyOutcome::Inserted,
            ]
        );
        assert_eq!(next.get_value("tenant"), Some(&Value::String("e".into())));
        assert_eq!(next, base.apply(&[Mutator::upsert(tenant().string("e"))]));
    }

    #[test]
    fn test_default_budget_not_propagated() {
        let map = TagMap::from_mutators(&[Mutator::upsert(tenant().string("acme"))]);
        assert_eq!(map.get("tenant").unwrap().metadata.max_hops, LOCAL_ONLY);
        assert!(map.propagate().is_empty());
    }

    #[test]
    fn test_key_lookup_through_context() {
        let key = tenant();
        let map = TagMap::from_mutators(&[Mutator::upsert(key.uint32(7))]);
        assert_eq!(key.value(&map).value, Value::Uint32(7));

        let other = DefinedKey::new(Descriptor::new("region"));
        assert_eq!(other.value(&map).value, Value::Invalid);
    }

    #[test]
    fn test_display() {
        let region = DefinedKey::new(Descriptor::new("region"));
        let map = TagMap::from_mutators(&[
            Mutator::upsert(tenant().string("acme")),
            Mutator::upsert(region.string("eu")),
        ]);
        assert_eq!(map.to_string(), "region=eu,tenant=acme");
    }
}
