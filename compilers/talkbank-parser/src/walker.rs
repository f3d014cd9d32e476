use talkbank_protocol::Utterance;
use tracing::debug;

use crate::error::ParseError;
use crate::parser::MorParser;
use crate::xml::{Document, Element};

/// A parser that knows which elements of a transcript are utterances and
/// how to turn one into an [`Utterance`].
pub trait TranscriptParser {
    /// Qualified name of the utterance element.
    fn utterance_tag(&self) -> &str;

    fn parse_utterance(&self, utterance: &Element) -> Result<Utterance, ParseError>;

    /// Lazily walks the utterances of `doc` in document order.
    ///
    /// Each call starts a fresh walk, so the same document can be traversed
    /// any number of times with identical results. An error on one utterance
    /// does not end the walk.
    fn utterances<'a>(&'a self, doc: &'a Document) -> Utterances<'a, Self> {
        Utterances {
            parser: self,
            children: doc.root().children(),
        }
    }
}

pub struct Utterances<'a, P: ?Sized> {
    parser: &'a P,
    children: std::slice::Iter<'a, Element>,
}

impl<'a, P: TranscriptParser + ?Sized> Iterator for Utterances<'a, P> {
    type Item = Result<Utterance, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.parser.utterance_tag();
        let utterance = self.children.find(|c| c.tag == tag)?;
        Some(self.parser.parse_utterance(utterance))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.children.size_hint().1)
    }
}

fn attribute(utterance: &Element, name: &str) -> String {
    utterance.get(name).map(str::to_string).unwrap_or_else(|| {
        debug!(attribute = name, "utterance attribute missing, using empty string");
        String::new()
    })
}

impl TranscriptParser for MorParser {
    fn utterance_tag(&self) -> &str {
        &self.names.utterance
    }

    fn parse_utterance(&self, utterance: &Element) -> Result<Utterance, ParseError> {
        self.expect_tag(utterance, &self.names.utterance)?;
        Ok(Utterance {
            id: attribute(utterance, "uID"),
            speaker: attribute(utterance, "who"),
            tokens: self.build_utterance_tokens(utterance)?,
        })
    }
}
