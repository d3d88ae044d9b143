//! SatBridge SAT - SAT Engine Interface and Clause Store
//!
//! This crate defines what the CNF layer needs from a SAT engine and ships a
//! reference implementation without search:
//! - [`Lit`], [`Var`] and three-valued [`LBool`]
//! - The [`SatEngine`] trait
//! - [`ClauseStore`], an in-memory engine with root-level unit propagation
//! - Bounded variable elimination recording a [`ReconstructionLog`]
//!
//! # Examples
//!
//! ```
//! use satbridge_sat::{ClauseStore, LBool, Lit, SatEngine};
//!
//! let mut store = ClauseStore::new();
//! let a = store.new_var(true);
//! let b = store.new_var(false);
//!
//! store.add_clause(&[Lit::neg(a), Lit::pos(b)]);
//! store.add_clause(&[Lit::pos(a)]);
//!
//! // b is implied at the root
//! assert_eq!(store.value(b), LBool::True);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod clause_store;
pub mod elimination;
pub mod engine;
pub mod literal;
pub mod reconstruction;

pub use clause_store::{ClauseLits, ClauseStore, ClauseStoreStats};
pub use elimination::{EliminationConfig, EliminationStats, VariableEliminator};
pub use engine::{ClauseOrigin, SatEngine};
pub use literal::{LBool, Lit, Var, lit_value};
pub use reconstruction::{ElimEntry, ReconstructionLog};
