//! Numeric pattern compilation
//!
//! Translates a restricted regex dialect over decimal numbers into an
//! equivalent regex over the order-preserving encoded form those numbers
//! are stored under (sign marker, magnitude bin letter, `E` separator,
//! trimmed mantissa digits).
//!
//! ## Modules
//!
//! - `lexer` / `parser` - pattern text to node tree
//! - `ast` - the node variants and traversal contracts
//! - `analysis` - element-level reasoning shared by the passes
//! - `passes` - the ordered tree rewrites
//! - `encoding` - the numeric encode/decode primitive and bin letters
//! - `render` - node tree back to pattern text
//! - `pipeline` - the public entry points
//! - `testing` - factories for building trees in tests

pub mod analysis;
pub mod ast;
pub mod encoding;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod passes;
pub mod pipeline;
pub mod render;
pub mod testing;

pub use error::PatternError;
pub use passes::ZeroRegexStatus;
pub use pipeline::{encode_regex, zero_regex_status, EncoderConfig, RegexEncoder};
