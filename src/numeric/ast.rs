//! Node tree definitions and traversal contracts
//!
//! - `node` - the tagged node variants, quantifier bounds and the
//!   element/quantifier unit view used by every pass
//! - `visitor` - the copy-by-default rewriter and the per-branch traversal

pub mod node;
pub mod visitor;

pub use node::{repetition, splice, units, Node, Unit};
pub use visitor::{branches, map_branches, CopyRewriter, Rewriter};
