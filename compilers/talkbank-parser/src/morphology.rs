use talkbank_morph::{split_clitics, CliticSplit};
use talkbank_protocol::MorToken;
use tracing::{debug, warn};

use crate::error::ParseError;
use crate::parser::MorParser;
use crate::xml::Element;

/// Surface label of every `mor-pre` clitic.
pub const PRE_CLITIC: &str = "PRE-CLITIC";
/// Surface label of a `mor-post` clitic the wordform had no segment for.
pub const MISSING_CLITIC: &str = "?";
/// Surface label of each compound component.
pub const COMPONENT: &str = "+";

/// U+0294 LATIN LETTER GLOTTAL STOP, which corpora leave in stems and words.
const GLOTTAL_STOP: char = '\u{0294}';

pub(crate) fn strip_glottal_stop(text: &str) -> String {
    text.replace(GLOTTAL_STOP, "")
}

fn texts<'a>(elements: impl Iterator<Item = &'a Element>) -> Vec<String> {
    elements.filter_map(|e| e.text.clone()).collect()
}

impl MorParser {
    /// Returns the category and sub-categories held by a `pos` element.
    pub fn parse_pos(&self, element: &Element) -> Result<(Option<String>, Vec<String>), ParseError> {
        self.expect_tag(element, &self.names.pos)?;

        let pos = element
            .find(&self.names.category)
            .and_then(|c| c.text.clone());
        let sub_pos = texts(element.find_all(&self.names.sub_category));

        Ok((pos, sub_pos))
    }

    fn pos_of(&self, element: &Element) -> Result<(Option<String>, Vec<String>), ParseError> {
        match element.find(&self.names.pos) {
            Some(pos) => self.parse_pos(pos),
            None => Ok((None, Vec::new())),
        }
    }

    /// Parses an `mw` element into a token whose surface form is `text`.
    pub fn parse_mor_word(&self, text: &str, element: &Element) -> Result<MorToken, ParseError> {
        self.expect_tag(element, &self.names.mor_word)?;

        let (pos, sub_pos) = self.pos_of(element)?;
        let stem = element
            .find(&self.names.stem)
            .and_then(|s| s.text.as_deref())
            .map(strip_glottal_stop);
        let prefix = texts(element.find_all(&self.names.prefix));

        let mut sxfx = Vec::new();
        let mut sfx = Vec::new();
        for marker in element.find_all(&self.names.marker) {
            let Some(suffix) = marker.text.clone() else {
                continue;
            };
            match marker.get("type") {
                // some corpora spell the fusional type `sfxf`
                Some("sxfx") | Some("sfxf") => sxfx.push(suffix),
                Some("sfx") => sfx.push(suffix),
                _ => {}
            }
        }

        Ok(MorToken {
            word: text.to_string(),
            prefix,
            pos,
            sub_pos,
            stem,
            sxfx,
            sfx,
        })
    }

    /// Parses an `mwc` element. The stem is the component stems joined by
    /// `+` (or `_` with `UNDERSCORE_COMPOUNDS`); the compound has no
    /// suffixes of its own.
    pub fn parse_compound(&self, text: &str, element: &Element) -> Result<MorToken, ParseError> {
        self.expect_tag(element, &self.names.compound)?;

        let prefix = texts(element.find_all(&self.names.prefix));
        let (pos, sub_pos) = self.pos_of(element)?;
        let words = element
            .find_all(&self.names.mor_word)
            .map(|w| self.parse_mor_word(COMPONENT, w))
            .collect::<Result<Vec<_>, _>>()?;

        let joiner = self.config.options.compound_joiner().to_string();
        let stem = words
            .iter()
            .map(|w| w.stem.as_deref())
            .collect::<Option<Vec<_>>>()
            .map(|stems| stems.join(joiner.as_str()));

        Ok(MorToken {
            word: text.to_string(),
            prefix,
            pos,
            sub_pos,
            stem,
            sxfx: Vec::new(),
            sfx: Vec::new(),
        })
    }

    /// Parses a `mor-pre`/`mor-post` wrapper; compounds win over plain words.
    fn parse_clitic(&self, text: &str, element: &Element) -> Result<Option<MorToken>, ParseError> {
        if let Some(compound) = element.find(&self.names.compound) {
            return self.parse_compound(text, compound).map(Some);
        }
        match element.find(&self.names.mor_word) {
            Some(word) => self.parse_mor_word(text, word).map(Some),
            None => {
                debug!(clitic = text, "clitic has neither mw nor mwc");
                Ok(None)
            }
        }
    }

    /// Turns one word's `mor` annotation into tokens: pre-clitics, then the
    /// word (or compound), then post-clitics.
    ///
    /// A missing annotation gives no tokens rather than an error, so a walk
    /// over a noisy corpus keeps going. Post-clitic labels come from splitting
    /// `text`; a `mor-post` with no segment left is labelled `?`.
    pub fn parse_mor_element(&self, text: &str, element: Option<&Element>) -> Result<Vec<MorToken>, ParseError> {
        let Some(element) = element else {
            warn!(word = text, "word has no mor annotation, skipping");
            return Ok(Vec::new());
        };
        self.expect_tag(element, &self.names.mor)?;

        let CliticSplit { base, clitics } = split_clitics(text);
        let mut post_labels = clitics.into_iter();
        let mut tokens = Vec::new();

        // 1. Pre-clitics
        for pre in element.find_all(&self.names.mor_pre) {
            tokens.extend(self.parse_clitic(PRE_CLITIC, pre)?);
        }

        // 2. The word itself
        if let Some(compound) = element.find(&self.names.compound) {
            tokens.push(self.parse_compound(&base, compound)?);
        } else if let Some(word) = element.find(&self.names.mor_word) {
            tokens.push(self.parse_mor_word(&base, word)?);
        } else {
            warn!(word = text, "mor annotation has neither mw nor mwc");
        }

        // 3. Post-clitics, consuming split segments in order
        let mut post_count = 0;
        for post in element.find_all(&self.names.mor_post) {
            let label = post_labels.next().unwrap_or_else(|| {
                debug!(word = text, "mor-post without a clitic in the wordform");
                MISSING_CLITIC.to_string()
            });
            if let Some(token) = self.parse_clitic(&label, post)? {
                tokens.push(token);
                post_count += 1;
            }
        }
        if post_count > 1 {
            warn!(word = text, count = post_count, "word has more than one post-clitic");
        }

        Ok(tokens)
    }
}
