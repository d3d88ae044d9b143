//! SatBridge CNF - Boolean Abstraction Between Formulas and SAT Engines
//!
//! This crate moves boolean structure across the SMT/SAT boundary in both
//! directions:
//! - [`Encoder`]: iterative Tseitin encoding of `not`/`or`/`iff`/`ite`
//!   skeletons over opaque atoms into engine clauses
//! - [`collect_boolean_interface`]: constants that another component will
//!   interpret and that must therefore keep external variables
//! - [`Decoder`]: the engine's units and clauses read back as formulas
//! - [`SatModelConverter`]: models lifted through the engine's variable
//!   elimination, with decoder proxies filtered out
//!
//! `and`, `xor`, `=>` and `distinct` must be rewritten away before encoding;
//! [`has_unsupported_bool`] checks for them.
//!
//! # Examples
//!
//! ```
//! use satbridge_cnf::{AtomMap, Encoder, EncoderConfig};
//! use satbridge_core::TermManager;
//! use satbridge_sat::{ClauseStore, LBool, SatEngine};
//!
//! let mut tm = TermManager::new();
//! let p = tm.mk_var("p", tm.sorts.bool_sort);
//! let q = tm.mk_var("q", tm.sorts.bool_sort);
//! let not_q = tm.mk_not(q);
//! let f = tm.mk_iff(p, not_q);
//!
//! let mut engine = ClauseStore::new();
//! let mut map = AtomMap::new();
//! let encoder = Encoder::new();
//! encoder
//!     .encode(&tm, &[f, q], &EncoderConfig::default(), &mut engine, &mut map)
//!     .unwrap();
//!
//! let vp = map.get(p).unwrap();
//! assert_eq!(engine.value(vp), LBool::False);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod atom_map;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod interface;
pub mod model_converter;

pub use atom_map::AtomMap;
pub use config::{DecoderConfig, EncoderConfig};
pub use decoder::{Decoded, Decoder};
pub use encoder::{EncodeStats, Encoder, has_unsupported_bool};
pub use interface::collect_boolean_interface;
pub use model_converter::{ConverterDisplay, SatModelConverter};
