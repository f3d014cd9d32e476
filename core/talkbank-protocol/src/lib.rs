#![no_std]

extern crate alloc;

// Enable std if the feature is active (for tests/tools)
#[cfg(feature = "std")]
extern crate std;

pub mod options;
pub mod tag;
pub mod token;

// Re-export core types for convenience
pub use options::ParseOptions;
pub use tag::{InvalidTag, ParsedTag, MAX_COMPOUND_WORDS, MIN_COMPOUND_WORDS};
pub use token::{render_tokens, MorToken};

pub mod model;
pub use model::*;
