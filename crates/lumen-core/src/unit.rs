//! Units of measure
//!
//! Units are opaque descriptors carried on key and measure definitions.
//! Symbols follow UCUM case-sensitive spelling.

use std::borrow::Cow;
use std::fmt;

/// Unit of measure
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Unit(Cow<'static, str>);

impl Unit {
    pub const DIMENSIONLESS: Unit = Unit(Cow::Borrowed("1"));
    pub const BYTES: Unit = Unit(Cow::Borrowed("By"));
    pub const MILLISECONDS: Unit = Unit(Cow::Borrowed("ms"));

    /// Custom unit symbol
    pub fn new(symbol: impl Into<Cow<'static, str>>) -> Self {
        Unit(symbol.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Unit {
    fn default() -> Self {
        Unit::DIMENSIONLESS
    }
}

impl fmt::Debug for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unit({})", self.0)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_default_is_dimensionless() {
        assert_eq!(Unit::default(), Unit::DIMENSIONLESS);
        assert_eq!(Unit::BYTES.to_string(), "By");
        assert_eq!(Unit::new("{request}").as_str(), "{request}");
    }
}
