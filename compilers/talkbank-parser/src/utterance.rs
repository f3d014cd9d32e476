use talkbank_protocol::{punctuation, MorToken, ParseOptions};

use crate::error::ParseError;
use crate::morphology::strip_glottal_stop;
use crate::parser::MorParser;
use crate::xml::Element;

/// Children without child elements, and fragments, carry no MOR analysis.
fn is_parseable(element: &Element) -> bool {
    !element.is_empty() && element.get("type") != Some("fragment")
}

impl MorParser {
    /// Flattens one `u` element into its tokens, in document order.
    pub fn build_utterance_tokens(&self, utterance: &Element) -> Result<Vec<MorToken>, ParseError> {
        let mut tokens = Vec::new();
        for child in utterance.children().filter(|c| is_parseable(c)) {
            tokens.extend(self.child_tokens(child)?);
        }
        Ok(tokens)
    }

    fn child_tokens(&self, child: &Element) -> Result<Vec<MorToken>, ParseError> {
        let names = &self.names;

        if child.tag == names.word {
            self.word_tokens(child)
        } else if child.tag == names.terminator || child.tag == names.tag_marker {
            let literal = punctuation(child.get("type").unwrap_or_default());
            Ok(vec![MorToken::punct(literal)])
        } else if child.tag == names.group {
            self.group_tokens(child)
        } else {
            Ok(Vec::new())
        }
    }

    /// A `replacement` stands in for the transcribed word.
    fn word_tokens(&self, word: &Element) -> Result<Vec<MorToken>, ParseError> {
        let replacement = word
            .find(&self.names.replacement)
            .filter(|r| !r.is_empty());

        let Some(replacement) = replacement else {
            return self.parse_mor_element(&self.extract_word(word), word.find(&self.names.mor));
        };

        let mut tokens = Vec::new();
        for rep in replacement.find_all(&self.names.word) {
            tokens.extend(self.parse_mor_element(&self.extract_word(rep), rep.find(&self.names.mor))?);
        }
        Ok(tokens)
    }

    /// Words inside a `g` group that carry a non-empty `mor`.
    fn group_tokens(&self, group: &Element) -> Result<Vec<MorToken>, ParseError> {
        let mut tokens = Vec::new();
        for word in group.find_all(&self.names.word).filter(|w| !w.is_empty()) {
            let Some(mor) = word.find(&self.names.mor).filter(|m| !m.is_empty()) else {
                continue;
            };
            tokens.extend(self.parse_mor_element(&self.extract_word(word), Some(mor))?);
        }
        Ok(tokens)
    }

    /// Surface text of a `w` element: its own text plus each child's text and
    /// tail, every fragment right-trimmed. Shortened material is left out
    /// under `DROP_SHORTENINGS`.
    pub fn extract_word(&self, word: &Element) -> String {
        let drop_shortenings = self.has(ParseOptions::DROP_SHORTENINGS);

        let mut parts: Vec<&str> = Vec::new();
        parts.extend(word.text.as_deref());
        for child in word.children() {
            if !(drop_shortenings && child.tag == self.names.shortening) {
                parts.extend(child.text.as_deref());
            }
            parts.extend(child.tail.as_deref());
        }
        parts.extend(word.tail.as_deref());

        let text: String = parts.iter().map(|p| p.trim_end()).collect();
        strip_glottal_stop(&text)
    }
}
