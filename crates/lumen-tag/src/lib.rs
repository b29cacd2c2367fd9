//! LUMEN Tag Context
//!
//! An immutable, in-process tag set that mutators are applied to.
//!
//! - Applying mutators produces a new [`TagMap`]; the original is untouched
//! - Each entry remembers the hop budget of the mutator that wrote it
//! - [`TagMap::propagate`] yields the set a downstream process receives

pub mod map;

pub use map::*;
