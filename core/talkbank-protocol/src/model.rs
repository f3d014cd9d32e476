use rkyv::{Archive, Deserialize, Serialize};
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use crate::token::{render_tokens, MorToken};

pub const TRANSCRIPT_VERSION: u32 = 1;

/// Rendering of any terminal-marker code missing from the table.
pub const UNMAPPED_PUNCTUATION: &str = "-";

/// Maps a `t`/`tagMarker` type code onto its punctuation literal.
///
/// Only `p` and `q` are mapped. The other CHAT terminators (trail off,
/// interruption, self interruption, question exclamation, ...) all render
/// as [`UNMAPPED_PUNCTUATION`].
pub fn punctuation(code: &str) -> &'static str {
    match code {
        "p" => ".",
        "q" => "?",
        _ => UNMAPPED_PUNCTUATION,
    }
}

/// One utterance of a transcript with its flattened morphological tokens.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Utterance {
    pub id: String,
    pub speaker: String,
    pub tokens: Vec<MorToken>,
}

/// `uID speaker token token ...`
impl fmt::Display for Utterance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.id, self.speaker, render_tokens(&self.tokens))
    }
}

#[derive(Debug, Clone, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Transcript {
    pub version: u32,
    pub utterances: Vec<Utterance>,
}

impl Transcript {
    pub fn new(utterances: Vec<Utterance>) -> Self {
        Self {
            version: TRANSCRIPT_VERSION,
            utterances,
        }
    }
}
