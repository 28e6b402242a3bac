//! # numrex
//!
//! A compiler from decimal-number regexes to regexes over an
//! order-preserving encoded representation, so a sorted key-value store
//! that indexes only the encoded strings can answer numeric-pattern
//! queries without decoding every stored value.
//!
//! The library is a pure function: pattern text in, pattern text out. See
//! the [`numeric::pipeline`] module for the entry points.

pub mod numeric;

pub use numeric::{
    encode_regex, zero_regex_status, EncoderConfig, PatternError, RegexEncoder, ZeroRegexStatus,
};
