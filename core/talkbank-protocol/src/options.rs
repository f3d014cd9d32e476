#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use bitflags::bitflags;

bitflags! {
    /// Switches that change how surface words and compound stems are built.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
    pub struct ParseOptions: u8 {
        /// Leave shortened material out of wordforms: `(be)cause` becomes `cause`.
        const DROP_SHORTENINGS = 1;
        /// Join compound stems with `_` instead of `+`, as some corpora do.
        const UNDERSCORE_COMPOUNDS = 2;
    }
}

impl ParseOptions {
    pub fn compound_joiner(self) -> char {
        if self.contains(ParseOptions::UNDERSCORE_COMPOUNDS) {
            '_'
        } else {
            '+'
        }
    }
}
