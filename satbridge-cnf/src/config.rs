//! Encoder and decoder configuration.

use satbridge_core::{ParamDescr, Params, megabytes_to_bytes};
use serde::{Deserialize, Serialize};

/// Parameter key for the memory cap in megabytes.
pub const MAX_MEMORY_MB: &str = "max-memory-megabytes";
/// Parameter key for the redundant ITE clauses.
pub const ITE_EXTRA_CLAUSES: &str = "ite-extra-clauses";
/// Parameter key for decoding learned clauses.
pub const COLLECT_LEARNED_CLAUSES: &str = "collect-learned-clauses";
/// Parameter key for building a model converter while decoding.
pub const PRODUCE_MODEL_CONVERTER: &str = "produce-model-converter";

/// Configuration for [`Encoder`](crate::Encoder).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// Memory cap in megabytes (`None` = unbounded)
    pub max_memory_mb: Option<u64>,
    /// Emit the two redundant clauses that strengthen propagation through a
    /// non-root `ite`
    pub ite_extra_clauses: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            max_memory_mb: None,
            ite_extra_clauses: true,
        }
    }
}

impl EncoderConfig {
    /// Read the configuration from a parameter set.
    #[must_use]
    pub fn from_params(params: &Params) -> Self {
        let defaults = Self::default();
        Self {
            max_memory_mb: params.get_uint(MAX_MEMORY_MB).or(defaults.max_memory_mb),
            ite_extra_clauses: params.get_bool(ITE_EXTRA_CLAUSES, defaults.ite_extra_clauses),
        }
    }

    /// Set the memory cap.
    #[must_use]
    pub fn with_max_memory_mb(mut self, mb: u64) -> Self {
        self.max_memory_mb = Some(mb);
        self
    }

    /// Enable or disable the redundant ITE clauses.
    #[must_use]
    pub fn with_ite_extra_clauses(mut self, enabled: bool) -> Self {
        self.ite_extra_clauses = enabled;
        self
    }

    /// Memory cap in bytes.
    #[must_use]
    pub fn max_memory_bytes(&self) -> Option<u64> {
        self.max_memory_mb.map(megabytes_to_bytes)
    }

    /// Parameters recognized by the encoder.
    #[must_use]
    pub fn param_descrs() -> &'static [ParamDescr] {
        &[
            ParamDescr {
                name: MAX_MEMORY_MB,
                description: "(default: unbounded) maximum amount of memory in megabytes",
            },
            ParamDescr {
                name: ITE_EXTRA_CLAUSES,
                description: "(default: true) add redundant clauses (that improve unit propagation) when encoding if-then-else formulas",
            },
        ]
    }
}

/// Configuration for [`Decoder`](crate::Decoder).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Memory cap in megabytes (`None` = unbounded)
    pub max_memory_mb: Option<u64>,
    /// Also decode learned clauses
    pub collect_learned_clauses: bool,
    /// Build a model converter alongside the formulas
    pub produce_model_converter: bool,
}

impl DecoderConfig {
    /// Read the configuration from a parameter set.
    #[must_use]
    pub fn from_params(params: &Params) -> Self {
        Self {
            max_memory_mb: params.get_uint(MAX_MEMORY_MB),
            collect_learned_clauses: params.get_bool(COLLECT_LEARNED_CLAUSES, false),
            produce_model_converter: params.get_bool(PRODUCE_MODEL_CONVERTER, false),
        }
    }

    /// Set the memory cap.
    #[must_use]
    pub fn with_max_memory_mb(mut self, mb: u64) -> Self {
        self.max_memory_mb = Some(mb);
        self
    }

    /// Enable or disable decoding of learned clauses.
    #[must_use]
    pub fn with_learned_clauses(mut self, enabled: bool) -> Self {
        self.collect_learned_clauses = enabled;
        self
    }

    /// Enable or disable the model converter.
    #[must_use]
    pub fn with_model_converter(mut self, enabled: bool) -> Self {
        self.produce_model_converter = enabled;
        self
    }

    /// Memory cap in bytes.
    #[must_use]
    pub fn max_memory_bytes(&self) -> Option<u64> {
        self.max_memory_mb.map(megabytes_to_bytes)
    }

    /// Parameters recognized by the decoder.
    #[must_use]
    pub fn param_descrs() -> &'static [ParamDescr] {
        &[
            ParamDescr {
                name: MAX_MEMORY_MB,
                description: "(default: unbounded) maximum amount of memory in megabytes",
            },
            ParamDescr {
                name: COLLECT_LEARNED_CLAUSES,
                description: "(default: false) collect also learned clauses",
            },
            ParamDescr {
                name: PRODUCE_MODEL_CONVERTER,
                description: "(default: false) build a model converter for lifting models back",
            },
        ]
    }
}
