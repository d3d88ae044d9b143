//! SatBridge Core - Terms, Models and Shared Types
//!
//! This crate provides the foundational types used on both sides of the
//! boolean abstraction boundary:
//! - Hash-consed terms with [`TermId`] references
//! - A small sort system (Bool, Int, uninterpreted sorts)
//! - Models and a partial (non-completing) model evaluator
//! - Parameter sets for component configuration
//! - The shared error type and cooperative cancellation primitives
//!
//! # Examples
//!
//! ## Creating Terms
//!
//! ```
//! use satbridge_core::ast::TermManager;
//!
//! let mut tm = TermManager::new();
//!
//! let p = tm.mk_var("p", tm.sorts.bool_sort);
//! let q = tm.mk_var("q", tm.sorts.bool_sort);
//! let or_pq = tm.mk_or(vec![p, q]);
//!
//! // Structurally equal terms share an identifier
//! assert_eq!(or_pq, tm.mk_or(vec![p, q]));
//! assert_eq!(tm.display(or_pq), "(or p q)");
//! ```
//!
//! ## Evaluating Under a Model
//!
//! ```
//! use satbridge_core::{Model, ModelEvaluator, TermManager};
//!
//! let mut tm = TermManager::new();
//! let p = tm.mk_var("p", tm.sorts.bool_sort);
//! let q = tm.mk_var("q", tm.sorts.bool_sort);
//! let or_pq = tm.mk_or(vec![p, q]);
//!
//! let mut model = Model::new();
//! model.assign_bool(p, true);
//!
//! // q is unassigned, but p alone decides the disjunction
//! assert_eq!(ModelEvaluator::new(&tm, &model).eval_bool(or_pq), Some(true));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod ast;
pub mod error;
pub mod model;
pub mod params;
pub mod resource;
pub mod sort;

pub use ast::{Term, TermArgs, TermId, TermKind, TermManager};
pub use error::{BridgeError, Result};
pub use model::{Model, ModelEvaluator, Value};
pub use params::{ParamDescr, ParamValue, Params};
pub use resource::{ActiveCall, CancelHandle, Checkpoint, megabytes_to_bytes};
pub use sort::{Sort, SortId, SortKind, SortManager};
