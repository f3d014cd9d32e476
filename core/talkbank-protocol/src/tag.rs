use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Write};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Compounds carry between two and four component words.
pub const MIN_COMPOUND_WORDS: usize = 2;
pub const MAX_COMPOUND_WORDS: usize = 4;

/// Structured form of a MOR tag string such as `was/aux|be&PAST&3S`.
///
/// Absent groups are empty vectors, never missing, so compound components
/// need no further normalisation. A compound has `words` (2 to 4 entries,
/// each without a wordform) and a `lemma` that is the `+`-join of the
/// component lemmas; a simple tag has no `words`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct ParsedTag {
    pub wordform: Option<String>,
    pub prefix: Vec<String>,
    pub pos: String,
    #[cfg_attr(feature = "serde", serde(rename = "subPos"))]
    pub sub_pos: Vec<String>,
    pub lemma: String,
    pub fusional_suffix: Vec<String>,
    pub suffix: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub words: Vec<ParsedTag>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidTag {
    MissingPos,
    MissingLemma,
    EmptySegment(&'static str),
    ComponentCount(usize),
    NestedCompound,
    ComponentWordform(String),
    SuffixedCompound,
    CompoundLemma { expected: String, found: String },
}

impl fmt::Display for InvalidTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidTag::MissingPos => write!(f, "pos missing"),
            InvalidTag::MissingLemma => write!(f, "lemma missing"),
            InvalidTag::EmptySegment(field) => write!(f, "{} contains an empty segment", field),
            InvalidTag::ComponentCount(n) => write!(
                f,
                "compound has {} components, expected {} to {}",
                n, MIN_COMPOUND_WORDS, MAX_COMPOUND_WORDS
            ),
            InvalidTag::NestedCompound => write!(f, "compound component is itself a compound"),
            InvalidTag::ComponentWordform(w) => write!(f, "compound component carries wordform '{}'", w),
            InvalidTag::SuffixedCompound => write!(f, "compound carries its own suffixes"),
            InvalidTag::CompoundLemma { expected, found } => {
                write!(f, "compound lemma '{}' should be '{}'", found, expected)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidTag {}

impl ParsedTag {
    pub fn is_compound(&self) -> bool {
        !self.words.is_empty()
    }

    /// Checks the structural invariants a well-formed tag record holds.
    pub fn validate(&self) -> Result<(), InvalidTag> {
        if self.pos.is_empty() {
            return Err(InvalidTag::MissingPos);
        }
        if self.lemma.is_empty() {
            return Err(InvalidTag::MissingLemma);
        }
        for (field, segments) in [
            ("prefix", &self.prefix),
            ("subPos", &self.sub_pos),
            ("fusional_suffix", &self.fusional_suffix),
            ("suffix", &self.suffix),
        ] {
            if segments.iter().any(|s| s.is_empty()) {
                return Err(InvalidTag::EmptySegment(field));
            }
        }

        if !self.is_compound() {
            return Ok(());
        }

        let n = self.words.len();
        if !(MIN_COMPOUND_WORDS..=MAX_COMPOUND_WORDS).contains(&n) {
            return Err(InvalidTag::ComponentCount(n));
        }
        if !self.fusional_suffix.is_empty() || !self.suffix.is_empty() {
            return Err(InvalidTag::SuffixedCompound);
        }
        for word in &self.words {
            if word.is_compound() {
                return Err(InvalidTag::NestedCompound);
            }
            if let Some(wordform) = &word.wordform {
                return Err(InvalidTag::ComponentWordform(wordform.clone()));
            }
            word.validate()?;
        }

        let expected = self.joined_lemma('+');
        if self.lemma != expected {
            return Err(InvalidTag::CompoundLemma {
                expected,
                found: self.lemma.clone(),
            });
        }
        Ok(())
    }

    /// Component lemmas joined by `joiner`; the lemma itself for simple tags.
    pub fn joined_lemma(&self, joiner: char) -> String {
        if !self.is_compound() {
            return self.lemma.clone();
        }
        let mut lemma = String::new();
        for (i, word) in self.words.iter().enumerate() {
            if i > 0 {
                lemma.push(joiner);
            }
            lemma.push_str(&word.lemma);
        }
        lemma
    }
}

impl fmt::Display for ParsedTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(wordform) = &self.wordform {
            write!(f, "{}/", wordform)?;
        }
        for prefix in &self.prefix {
            write!(f, "{}#", prefix)?;
        }
        f.write_str(&self.pos)?;
        for sub in &self.sub_pos {
            write!(f, ":{}", sub)?;
        }
        f.write_char('|')?;

        if self.is_compound() {
            for word in &self.words {
                write!(f, "+{}", word)?;
            }
            return Ok(());
        }

        f.write_str(&self.lemma)?;
        for fusion in &self.fusional_suffix {
            write!(f, "&{}", fusion)?;
        }
        for suffix in &self.suffix {
            write!(f, "-{}", suffix)?;
        }
        Ok(())
    }
}
