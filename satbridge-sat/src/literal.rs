//! Variables, literals and three-valued assignments.

use std::fmt;
use std::ops::Not;

/// A Boolean variable identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Var(pub u32);

impl Var {
    /// Sentinel for "no variable".
    pub const NULL: Var = Var(u32::MAX >> 1);

    /// Create a variable from its index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Index of this variable.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A literal (signed Boolean variable).
///
/// Encoded as `var << 1 | sign`, so the two literals of a variable have
/// adjacent codes and negation is a single bit flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Lit(u32);

impl Lit {
    /// Sentinel literal used on error paths.
    pub const NULL: Lit = Lit::pos(Var::NULL);

    /// Create a literal from a variable and a sign (`true` means negated).
    #[must_use]
    pub const fn new(var: Var, negated: bool) -> Self {
        Self((var.0 << 1) | negated as u32)
    }

    /// Create a positive literal from a variable.
    #[must_use]
    pub const fn pos(var: Var) -> Self {
        Self(var.0 << 1)
    }

    /// Create a negative literal from a variable.
    #[must_use]
    pub const fn neg(var: Var) -> Self {
        Self((var.0 << 1) | 1)
    }

    /// Get the variable of this literal.
    #[must_use]
    pub const fn var(self) -> Var {
        Var(self.0 >> 1)
    }

    /// Check if this literal is positive.
    #[must_use]
    pub const fn is_pos(self) -> bool {
        (self.0 & 1) == 0
    }

    /// Check if this literal is negative.
    #[must_use]
    pub const fn is_neg(self) -> bool {
        (self.0 & 1) != 0
    }

    /// Get the negation of this literal.
    #[must_use]
    pub const fn negate(self) -> Self {
        Self(self.0 ^ 1)
    }

    /// Dense code, usable as an index into per-literal tables.
    #[must_use]
    pub const fn code(self) -> usize {
        self.0 as usize
    }

    /// Rebuild a literal from its code.
    #[must_use]
    pub const fn from_code(code: u32) -> Self {
        Self(code)
    }

    /// Check whether this is the null sentinel.
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == Lit::NULL.0
    }
}

impl Not for Lit {
    type Output = Lit;

    fn not(self) -> Lit {
        self.negate()
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "null")
        } else if self.is_pos() {
            write!(f, "{}", self.var())
        } else {
            write!(f, "-{}", self.var())
        }
    }
}

/// Three-valued Boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LBool {
    /// Assigned true
    True,
    /// Assigned false
    False,
    /// Unassigned
    #[default]
    Undef,
}

impl LBool {
    /// Lift a Boolean.
    #[must_use]
    pub const fn from_bool(b: bool) -> Self {
        if b { LBool::True } else { LBool::False }
    }

    /// Check for `True`.
    #[must_use]
    pub const fn is_true(self) -> bool {
        matches!(self, LBool::True)
    }

    /// Check for `False`.
    #[must_use]
    pub const fn is_false(self) -> bool {
        matches!(self, LBool::False)
    }

    /// Check for `Undef`.
    #[must_use]
    pub const fn is_undef(self) -> bool {
        matches!(self, LBool::Undef)
    }

    /// `Some(bool)` if assigned.
    #[must_use]
    pub const fn to_bool(self) -> Option<bool> {
        match self {
            LBool::True => Some(true),
            LBool::False => Some(false),
            LBool::Undef => None,
        }
    }
}

impl Not for LBool {
    type Output = LBool;

    fn not(self) -> LBool {
        match self {
            LBool::True => LBool::False,
            LBool::False => LBool::True,
            LBool::Undef => LBool::Undef,
        }
    }
}

/// Value of a literal under a variable assignment.
#[must_use]
pub fn lit_value(assignment: &[LBool], lit: Lit) -> LBool {
    let value = assignment
        .get(lit.var().index())
        .copied()
        .unwrap_or(LBool::Undef);
    if lit.is_neg() { !value } else { value }
}
