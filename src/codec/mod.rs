//! # Codec
//!
//! Conversion between the deferred permission triads and the textual Unix permission notations.
//! Each data structure is broken up into a unique module that composes with the others, covering
//! the numeric (one octal digit per class) and symbolic ("rwx" slice per class) chmod-style
//! forms in both directions.

pub mod unix;

pub use unix::*;
