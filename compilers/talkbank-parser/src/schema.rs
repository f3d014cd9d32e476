/// Element names of the TalkBank MOR tier, qualified once with a namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub utterance: String,
    pub word: String,
    pub terminator: String,
    pub tag_marker: String,
    pub group: String,
    pub replacement: String,
    pub shortening: String,
    pub mor: String,
    pub mor_pre: String,
    pub mor_post: String,
    pub mor_word: String,
    pub compound: String,
    pub pos: String,
    pub category: String,
    pub sub_category: String,
    pub stem: String,
    pub prefix: String,
    pub marker: String,
}

impl Schema {
    /// Prefixes every element name with `namespace`; `""` leaves them bare.
    pub fn qualified(namespace: &str) -> Self {
        let q = |local: &str| format!("{}{}", namespace, local);
        Self {
            utterance: q("u"),
            word: q("w"),
            terminator: q("t"),
            tag_marker: q("tagMarker"),
            group: q("g"),
            replacement: q("replacement"),
            shortening: q("shortening"),
            mor: q("mor"),
            mor_pre: q("mor-pre"),
            mor_post: q("mor-post"),
            mor_word: q("mw"),
            compound: q("mwc"),
            pos: q("pos"),
            category: q("c"),
            sub_category: q("s"),
            stem: q("stem"),
            prefix: q("mpfx"),
            marker: q("mk"),
        }
    }
}
