pub mod error;
pub mod grammar;
pub mod morphology;
pub mod parser;
pub mod schema;
pub mod utterance;
pub mod walker;
pub mod xml;

pub use error::{ParseError, TagError};
pub use grammar::{parse_tag, parse_token};
pub use parser::{MorParser, ParserConfig, TALKBANK_NAMESPACE};
pub use walker::{TranscriptParser, Utterances};
pub use xml::{Document, Element, XmlError};

use talkbank_protocol::Utterance;
use tracing::info;

/// Loads `xml` and collects every utterance of its MOR tier.
///
/// Stops at the first utterance that fails; use [`TranscriptParser::utterances`]
/// to keep going past errors.
pub fn parse_document(xml: &str, config: ParserConfig) -> Result<Vec<Utterance>, ParseError> {
    let doc = Document::parse_str(xml)?;
    let parser = MorParser::new(config);
    let utterances = parser.utterances(&doc).collect::<Result<Vec<_>, _>>()?;
    info!(count = utterances.len(), "parsed transcript");
    Ok(utterances)
}
