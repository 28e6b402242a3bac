//! High-level pattern encoding pipeline
//!
//! [`RegexEncoder`] wires the parser, the pre-normalization rewrites and
//! the encoding stages into one call. Each stage is a pure function from
//! an owned tree to a new owned tree; nothing is shared or mutated across
//! stages, so independent patterns can be compiled concurrently without
//! coordination.
//!
//! # Examples
//!
//! ```no_run
//! use numrex::numeric::pipeline::encode_regex;
//!
//! let encoded = encode_regex("234").expect("pattern compiles");
//! assert_eq!(encoded, "\\+cE2\\.34");
//! ```

use serde::{Deserialize, Serialize};

use crate::numeric::ast::branches;
use crate::numeric::error::PatternError;
use crate::numeric::parser;
use crate::numeric::passes;
use crate::numeric::passes::{
    bin_range, decimal_point, negative_inversion, simple_number, zero_consolidation,
    ZeroRegexStatus,
};
use crate::numeric::render::render;

/// Tunable limits for pattern compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// Ceiling on the number of branches the expansion rewrites may
    /// produce; nested optionals multiply branches and this bounds the
    /// blow-up.
    pub max_branches: usize,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        EncoderConfig { max_branches: 512 }
    }
}

/// Compiles numeric patterns into patterns over encoded values.
#[derive(Debug, Clone, Default)]
pub struct RegexEncoder {
    config: EncoderConfig,
}

impl RegexEncoder {
    pub fn new(config: EncoderConfig) -> Self {
        RegexEncoder { config }
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Translates a pattern over decimal text into an equivalent pattern
    /// over encoded values.
    pub fn encode(&self, pattern: &str) -> Result<String, PatternError> {
        let tree = parser::parse(pattern)?;
        let tree = passes::pre_normalize(&tree, self.config.max_branches)?;
        let tree = simple_number::encode_simple_numbers(&tree)?;
        if simple_number::all_encoded(&tree)? {
            // every branch was a literal number; nothing left to analyze
            return Ok(render(&tree));
        }
        let tree = bin_range::assign_bins(&tree)?;
        let tree = zero_consolidation::consolidate_zeros(&tree)?;
        let tree = negative_inversion::invert_negatives(&tree)?;
        let tree = decimal_point::place_decimal_points(&tree)?;
        Ok(render(&tree))
    }

    /// Classifies a pattern's zero ambiguity without running the full
    /// encode. Reads leniently, so intermediate patterns containing
    /// groups are accepted.
    pub fn zero_status(&self, pattern: &str) -> Result<ZeroRegexStatus, PatternError> {
        let tree = parser::read(pattern)?;
        let tree = passes::anchor_trim::trim_anchors(&tree)?;
        let tree = passes::repetition_trim::trim_zero_repetitions(&tree)?;
        let tree = passes::empty_trim::trim_empty(&tree)?;
        let mut trailing = false;
        for branch in branches(&tree)? {
            match zero_consolidation::zero_status_of(branch) {
                ZeroRegexStatus::Leading => return Ok(ZeroRegexStatus::Leading),
                ZeroRegexStatus::Trailing => trailing = true,
                ZeroRegexStatus::None => {}
            }
        }
        if trailing {
            Ok(ZeroRegexStatus::Trailing)
        } else {
            Ok(ZeroRegexStatus::None)
        }
    }
}

/// Encodes a pattern with the default configuration.
pub fn encode_regex(pattern: &str) -> Result<String, PatternError> {
    RegexEncoder::default().encode(pattern)
}

/// Classifies a pattern's zero ambiguity with the default configuration.
pub fn zero_regex_status(pattern: &str) -> Result<ZeroRegexStatus, PatternError> {
    RegexEncoder::default().zero_status(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_patterns_short_circuit() {
        assert_eq!(encode_regex("234").unwrap(), r"\+cE2\.34");
        assert_eq!(encode_regex("-234").unwrap(), r"!XE7\.66");
        assert_eq!(encode_regex(r"0\.00").unwrap(), r"0\.00");
    }

    #[test]
    fn literal_alternation_short_circuits() {
        assert_eq!(encode_regex("1|2").unwrap(), r"\+aE1|\+aE2");
    }

    #[test]
    fn complex_patterns_run_the_full_pipeline() {
        assert_eq!(
            encode_regex("-[012]{3}11").unwrap(),
            r"![V-Y]E([987]\.?[987]{0,2})?8\.?9"
        );
    }

    #[test]
    fn errors_surface_from_every_stage() {
        assert!(matches!(
            encode_regex(""),
            Err(PatternError::InvalidPattern(_))
        ));
        assert!(matches!(
            encode_regex("2{0}"),
            Err(PatternError::EmptyPattern(_))
        ));
    }

    #[test]
    fn branch_ceiling_is_configurable() {
        let tight = RegexEncoder::new(EncoderConfig { max_branches: 2 });
        assert!(matches!(
            tight.encode("1?2?3?4?"),
            Err(PatternError::UnsupportedConstruct(_))
        ));
    }

    #[test]
    fn zero_status_uses_the_lenient_reader() {
        assert_eq!(
            zero_regex_status("(0|5)5").unwrap(),
            ZeroRegexStatus::Leading
        );
    }

    #[test]
    fn config_round_trips_through_serde() {
        let config = EncoderConfig { max_branches: 64 };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(
            serde_json::from_str::<EncoderConfig>(&json).unwrap(),
            config
        );
    }
}
