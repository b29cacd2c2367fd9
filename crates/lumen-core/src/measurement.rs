//! Recorded observations

use crate::{BaseMeasure, MeasureRef, ScopeId};

/// A numeric observation of a measure, correlated to a scope
#[derive(Clone, Debug)]
pub struct Measurement {
    pub measure: MeasureRef,
    pub value: f64,
    pub scope: ScopeId,
}

impl PartialEq for Measurement {
    fn eq(&self, other: &Self) -> bool {
        self.measure.descriptor() == other.measure.descriptor()
            && self.value == other.value
            && self.scope == other.scope
    }
}

impl Measurement {
    /// Copy re-scoped to `scope`. The receiver is consumed, not mutated
    /// in place; clone first to reuse a template across scopes.
    pub fn with(mut self, scope: ScopeId) -> Self {
        self.scope = scope;
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.measure.name()
    }
}
