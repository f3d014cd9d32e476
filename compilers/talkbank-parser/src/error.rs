use thiserror::Error;

use crate::xml::XmlError;

/// A MOR tag string that does not follow the tag grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    #[error("malformed MOR tag '{tag}': cannot parse '{offending}' at byte {position}")]
    Malformed {
        tag: String,
        position: usize,
        offending: String,
    },
}

impl TagError {
    /// `rest` is the unparsed tail of `tag` where the grammar gave up.
    pub(crate) fn malformed(tag: &str, rest: &str) -> Self {
        let offending = if rest.is_empty() {
            "<end of input>".to_string()
        } else {
            rest.to_string()
        };
        TagError::Malformed {
            tag: tag.to_string(),
            position: tag.len().saturating_sub(rest.len()),
            offending,
        }
    }
}

#[derive(Debug, Error)]
pub enum ParseError {
    /// An element of the wrong kind was handed to a tag-specific step.
    #[error("expected <{expected}> element, found <{found}>")]
    TagType { expected: String, found: String },

    #[error(transparent)]
    Xml(#[from] XmlError),
}
