//! Key/value parameter sets.
//!
//! Components read their options from a [`Params`] set with typed getters
//! that fall back to a default when a key is absent or holds a value of the
//! wrong type. Unknown keys are ignored.

use rustc_hash::FxHashMap;
use std::fmt;

/// A parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamValue {
    /// Boolean flag
    Bool(bool),
    /// Unsigned integer
    UInt(u64),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "{}", b),
            ParamValue::UInt(n) => write!(f, "{}", n),
        }
    }
}

/// Description of a recognized parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamDescr {
    /// Parameter name
    pub name: &'static str,
    /// Human-readable description, including the default
    pub description: &'static str,
}

/// A set of named parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    values: FxHashMap<String, ParamValue>,
}

impl Params {
    /// Create an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a boolean parameter.
    pub fn set_bool(&mut self, key: impl Into<String>, value: bool) -> &mut Self {
        self.values.insert(key.into(), ParamValue::Bool(value));
        self
    }

    /// Set an unsigned integer parameter.
    pub fn set_uint(&mut self, key: impl Into<String>, value: u64) -> &mut Self {
        self.values.insert(key.into(), ParamValue::UInt(value));
        self
    }

    /// Raw lookup.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<ParamValue> {
        self.values.get(key).copied()
    }

    /// Boolean lookup with a default.
    #[must_use]
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(ParamValue::Bool(b)) => b,
            _ => default,
        }
    }

    /// Unsigned integer lookup, `None` when absent or mistyped.
    #[must_use]
    pub fn get_uint(&self, key: &str) -> Option<u64> {
        match self.get(key) {
            Some(ParamValue::UInt(n)) => Some(n),
            _ => None,
        }
    }

    /// Number of parameters set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no parameter is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
