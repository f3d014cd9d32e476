use talkbank_protocol::ParseOptions;

use crate::error::ParseError;
use crate::schema::Schema;
use crate::xml::Element;

/// Namespace of TalkBank XML transcripts, in `{uri}` form.
pub const TALKBANK_NAMESPACE: &str = "{http://www.talkbank.org/ns/talkbank}";

/// Construction-time configuration; a parser never changes it afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserConfig {
    /// Prefix applied to every element name looked up; empty for bare fixtures.
    pub namespace: String,
    pub options: ParseOptions,
}

impl ParserConfig {
    pub fn talkbank() -> Self {
        Self {
            namespace: TALKBANK_NAMESPACE.to_string(),
            options: ParseOptions::empty(),
        }
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }
}

/// Reads the MOR tier of TalkBank XML transcripts into [`MorToken`]s.
///
/// [`MorToken`]: talkbank_protocol::MorToken
#[derive(Debug, Clone)]
pub struct MorParser {
    pub(crate) config: ParserConfig,
    pub(crate) names: Schema,
}

impl MorParser {
    pub fn new(config: ParserConfig) -> Self {
        let names = Schema::qualified(&config.namespace);
        Self { config, names }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn names(&self) -> &Schema {
        &self.names
    }

    pub(crate) fn has(&self, option: ParseOptions) -> bool {
        self.config.options.contains(option)
    }

    pub(crate) fn expect_tag(&self, element: &Element, expected: &str) -> Result<(), ParseError> {
        if element.tag == expected {
            Ok(())
        } else {
            Err(ParseError::TagType {
                expected: expected.to_string(),
                found: element.tag.clone(),
            })
        }
    }
}

impl Default for MorParser {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}
