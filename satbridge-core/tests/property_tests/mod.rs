//! Property-based tests for satbridge-core
//!
//! Term construction, printing, model evaluation and cancellation.

mod ast_properties;
mod model_properties;
