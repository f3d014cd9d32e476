use rkyv::{Archive, Deserialize, Serialize};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt::{self, Write};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use crate::tag::ParsedTag;

/// Part-of-speech values carried by punctuation tokens.
const PUNCT_POS: [&str; 4] = [".", "?", "!", "-"];

/// One morphological unit attached to one orthographic word or punctuation mark.
///
/// Renders (via `Display`) in the MOR round-trip format
/// `word/prefix#pos:subPos|stem&fusion-suffix`, where empty groups leave no
/// delimiter behind.
///
/// Equality ignores `word`: two tokens with the same analysis but different
/// surface forms compare equal, which is what correction matching needs.
#[derive(Debug, Clone, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct MorToken {
    pub word: String,
    pub prefix: Vec<String>,
    pub pos: Option<String>,
    #[cfg_attr(feature = "serde", serde(rename = "subPos"))]
    pub sub_pos: Vec<String>,
    pub stem: Option<String>,
    /// Fusional suffixes (`&PAST`).
    #[cfg_attr(feature = "serde", serde(rename = "fusion"))]
    pub sxfx: Vec<String>,
    /// Affixal suffixes (`-PL`).
    #[cfg_attr(feature = "serde", serde(rename = "suffix"))]
    pub sfx: Vec<String>,
}

impl MorToken {
    /// A punctuation token: `pos`, `stem` and `word` are all the literal.
    pub fn punct(literal: &str) -> Self {
        Self {
            word: literal.to_string(),
            prefix: Vec::new(),
            pos: Some(literal.to_string()),
            sub_pos: Vec::new(),
            stem: Some(literal.to_string()),
            sxfx: Vec::new(),
            sfx: Vec::new(),
        }
    }

    pub fn is_punct(&self) -> bool {
        matches!(self.pos.as_deref(), Some(pos) if PUNCT_POS.contains(&pos))
    }

    /// Builds a token from a parsed MOR tag.
    ///
    /// The surface word is `word` if given, otherwise the tag's wordform,
    /// otherwise its lemma. A compound keeps only its top-level analysis; its
    /// lemma is already the joined component lemmas.
    pub fn from_tag(tag: &ParsedTag, word: Option<&str>) -> Self {
        let word = word
            .or(tag.wordform.as_deref())
            .unwrap_or(&tag.lemma)
            .to_string();

        Self {
            word,
            prefix: tag.prefix.clone(),
            pos: Some(tag.pos.clone()),
            sub_pos: tag.sub_pos.clone(),
            stem: Some(tag.lemma.clone()),
            sxfx: tag.fusional_suffix.clone(),
            sfx: tag.suffix.clone(),
        }
    }
}

impl PartialEq for MorToken {
    fn eq(&self, other: &Self) -> bool {
        // `word` is not compared
        self.prefix == other.prefix
            && self.pos == other.pos
            && self.sub_pos == other.sub_pos
            && self.stem == other.stem
            && self.sxfx == other.sxfx
            && self.sfx == other.sfx
    }
}

impl Eq for MorToken {}

impl fmt::Display for MorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/", self.word)?;
        for prefix in &self.prefix {
            write!(f, "{}#", prefix)?;
        }
        f.write_str(self.pos.as_deref().unwrap_or(""))?;
        for sub in &self.sub_pos {
            write!(f, ":{}", sub)?;
        }
        f.write_char('|')?;
        f.write_str(self.stem.as_deref().unwrap_or(""))?;
        for fusion in &self.sxfx {
            write!(f, "&{}", fusion)?;
        }
        for suffix in &self.sfx {
            write!(f, "-{}", suffix)?;
        }
        Ok(())
    }
}

/// Renders an utterance's tokens on one line, separated by single spaces.
pub fn render_tokens(tokens: &[MorToken]) -> String {
    let mut line = String::new();
    for (i, token) in tokens.iter().enumerate() {
        if i > 0 {
            line.push(' ');
        }
        // Writing into a String cannot fail.
        let _ = write!(line, "{}", token);
    }
    line
}
