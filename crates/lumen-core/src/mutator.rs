//! Tag mutations and their propagation budget
//!
//! A [`Mutator`] is a request to change a distributed tag context. Applying
//! it, and decrementing its hop budget at each process boundary, is left to
//! the context layer; this module defines only the instruction itself.

use std::fmt;

use crate::{BaseMeasure, KeyValue, LumenError, LumenResult};

/// How a key value merges into a tag set
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MutatorOp {
    /// Add only if the key is absent
    Insert = 0,
    /// Replace only if the key is present
    Update = 1,
    /// Add or replace
    Upsert = 2,
    /// Remove the key
    Delete = 3,
}

impl MutatorOp {
    /// Parse from a decoded byte
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0 => Some(MutatorOp::Insert),
            1 => Some(MutatorOp::Update),
            2 => Some(MutatorOp::Upsert),
            3 => Some(MutatorOp::Delete),
            _ => None,
        }
    }

    #[inline]
    pub fn to_byte(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MutatorOp::Insert => "INSERT",
            MutatorOp::Update => "UPDATE",
            MutatorOp::Upsert => "UPSERT",
            MutatorOp::Delete => "DELETE",
        }
    }
}

impl TryFrom<u8> for MutatorOp {
    type Error = LumenError;

    fn try_from(b: u8) -> LumenResult<Self> {
        MutatorOp::from_byte(b).ok_or(LumenError::UnknownMutatorOp(b))
    }
}

impl fmt::Display for MutatorOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Propagate across every process boundary
pub const UNLIMITED_HOPS: i32 = -1;
/// Never leave the local process
pub const LOCAL_ONLY: i32 = 0;

/// Propagation control
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MeasureMetadata {
    /// -1 unlimited, 0 local only, N > 0 remaining boundary crossings
    pub max_hops: i32,
}

impl MeasureMetadata {
    #[inline]
    pub fn new(max_hops: i32) -> Self {
        MeasureMetadata { max_hops }
    }

    pub fn unlimited() -> Self {
        MeasureMetadata::new(UNLIMITED_HOPS)
    }

    pub fn local_only() -> Self {
        MeasureMetadata::new(LOCAL_ONLY)
    }

    #[inline]
    pub fn is_unlimited(self) -> bool {
        self.max_hops == UNLIMITED_HOPS
    }

    /// May this mutation cross a process boundary?
    #[inline]
    pub fn can_propagate(self) -> bool {
        self.is_unlimited() || self.max_hops > 0
    }

    /// Budget after one boundary crossing, or `None` if the mutation
    /// must be dropped there.
    pub fn next_hop(self) -> Option<Self> {
        match self.max_hops {
            UNLIMITED_HOPS => Some(self),
            n if n > 0 => Some(MeasureMetadata::new(n - 1)),
            _ => None,
        }
    }
}

/// Tags stay local unless a budget is given.
impl Default for MeasureMetadata {
    fn default() -> Self {
        MeasureMetadata::local_only()
    }
}

/// Propagation instruction: an op on a key value with a hop budget
#[derive(Clone, Debug, PartialEq)]
pub struct Mutator {
    pub op: MutatorOp,
    pub key_value: KeyValue,
    pub metadata: MeasureMetadata,
}

impl Mutator {
    pub fn new(op: MutatorOp, key_value: KeyValue) -> Self {
        Mutator {
            op,
            key_value,
            metadata: MeasureMetadata::default(),
        }
    }

    pub fn insert(key_value: KeyValue) -> Self {
        Mutator::new(MutatorOp::Insert, key_value)
    }

    pub fn update(key_value: KeyValue) -> Self {
        Mutator::new(MutatorOp::Update, key_value)
    }

    pub fn upsert(key_value: KeyValue) -> Self {
        Mutator::new(MutatorOp::Upsert, key_value)
    }

    pub fn delete(key_value: KeyValue) -> Self {
        Mutator::new(MutatorOp::Delete, key_value)
    }

    /// Copy with the hop budget overridden
    pub fn with_max_hops(mut self, hops: i32) -> Self {
        self.metadata.max_hops = hops;
        self
    }

    #[inline]
    pub fn max_hops(&self) -> i32 {
        self.metadata.max_hops
    }

    #[inline]
    pub fn key_name(&self) -> &str {
        self.key_value.key.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DefinedKey, Descriptor, Key};

    fn kv() -> KeyValue {
        DefinedKey::new(Descriptor::new("tenant")).string("acme")
    }

    #[test]
    fn test_mutator_op_roundtrip() {
        for op in [
            MutatorOp::Insert,
            MutatorOp::Update,
            MutatorOp::Upsert,
            MutatorOp::Delete,
        ] {
            let recovered = MutatorOp::from_byte(op.to_byte()).unwrap();
            assert_eq!(op, recovered);
        }
        assert_eq!(MutatorOp::from_byte(4), None);
        assert!(matches!(
            MutatorOp::try_from(200),
            Err(LumenError::UnknownMutatorOp(200))
        ));
    }

    #[test]
    fn test_with_max_hops_copies() {
        let original = Mutator::upsert(kv());
        let limited = original.clone().with_max_hops(2);

        assert_eq!(original.max_hops(), LOCAL_ONLY);
        assert_eq!(limited.max_hops(), 2);
        assert_eq!(limited.op, MutatorOp::Upsert);
        assert_eq!(limited.key_name(), "tenant");
    }

    #[test]
    fn test_default_budget_is_local_only() {
        assert_eq!(MeasureMetadata::default(), MeasureMetadata::local_only());
        assert_eq!(Mutator::upsert(kv()).max_hops(), LOCAL_ONLY);
        assert_eq!(Mutator::delete(kv()).max_hops(), LOCAL_ONLY);
        assert!(!Mutator::insert(kv()).metadata.can_propagate());
    }

    #[test]
    fn test_hop_budget() {
        assert!(MeasureMetadata::unlimited().can_propagate());
        assert!(!MeasureMetadata::local_only().can_propagate());
        assert!(MeasureMetadata::new(1).can_propagate());

        assert_eq!(
            MeasureMetadata::unlimited().next_hop(),
            Some(MeasureMetadata::unlimited())
        );
        assert_eq!(
            MeasureMetadata::new(2).next_hop(),
            Some(MeasureMetadata::new(1))
        );
        assert_eq!(
            MeasureMetadata::new(1).next_hop(),
            Some(MeasureMetadata::local_only())
        );
        assert_eq!(MeasureMetadata::local_only().next_hop(), None);
        assert_eq!(MeasureMetadata::new(-7).next_hop(), None);
    }
}
