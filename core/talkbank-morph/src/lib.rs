//! Splits English orthographic wordforms into a host and its clitics so that
//! each piece can be paired with its own `mor-post` analysis.
//!
//! The tables follow the Penn Treebank tokenization conventions. They are a
//! fixed heuristic: a wordform matching more than one entry is returned whole,
//! since MOR tags stacked enclitics as unknown anyway.

use once_cell::sync::Lazy;
use regex::Regex;

/// Enclitics marked by an apostrophe, matched anywhere in the wordform.
/// Casing variants are spelled out rather than matched case-insensitively.
const ENCLITIC_PATTERNS: &[&str] = &[
    "('ll)", "('re)", "('ve)", "(n't)",
    "('LL)", "('RE)", "('VE)", "(N'T)",
    "('[sSmMdD])",
    "(s')$",
];

/// Whole-word contractions with no marked boundary: (pattern, rewrite).
/// The rewrite inserts a space at each split point.
const CONTRACTION_PATTERNS: &[(&str, &str)] = &[
    ("([Cc])annot", "${1}an not"),
    ("([Dd])'ye", "${1}' ye"),
    ("([Gg])imme", "${1}im me"),
    ("([Gg])onna", "${1}on na"),
    ("([Gg])otta", "${1}ot ta"),
    ("([Ll])emme", "${1}em me"),
    ("([Mm])ore'n", "${1}or 'n"),
    ("'([Tt])is", "'${1} is"),
    ("'([Tt])was", "'${1} was"),
    ("([Ww])anna", "${1}an na"),
];

struct Contraction {
    pattern: Regex,
    rewrite: &'static str,
}

static ENCLITICS: Lazy<Vec<Regex>> = Lazy::new(|| {
    ENCLITIC_PATTERNS
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
});

static CONTRACTIONS: Lazy<Vec<Contraction>> = Lazy::new(|| {
    CONTRACTION_PATTERNS
        .iter()
        .map(|&(p, rewrite)| Contraction {
            pattern: Regex::new(p).unwrap(),
            rewrite,
        })
        .collect()
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliticSplit {
    pub base: String,
    /// Clitics in surface order, after the base.
    pub clitics: Vec<String>,
}

impl CliticSplit {
    fn whole(wordform: &str) -> Self {
        Self {
            base: wordform.to_string(),
            clitics: Vec::new(),
        }
    }

    fn from_parts(wordform: &str, mut parts: Vec<String>) -> Self {
        if parts.len() < 2 {
            return Self::whole(wordform);
        }
        let clitics = parts.split_off(1);
        Self {
            base: parts.remove(0),
            clitics,
        }
    }
}

enum Rule<'a> {
    Enclitic(&'a Regex),
    Contraction(&'a Contraction),
}

/// Splits `wordform` into its base and trailing clitics.
///
/// `"that's"` gives `("that", ["'s"])`, `"gonna"` gives `("gon", ["na"])`.
/// Words matching no rule, or more than one, come back unsplit.
pub fn split_clitics(wordform: &str) -> CliticSplit {
    let mut matched = ENCLITICS
        .iter()
        .filter(|re| re.is_match(wordform))
        .map(Rule::Enclitic)
        .chain(
            CONTRACTIONS
                .iter()
                .filter(|c| c.pattern.is_match(wordform))
                .map(Rule::Contraction),
        );

    let rule = match (matched.next(), matched.next()) {
        (Some(rule), None) => rule,
        // none, or ambiguous
        _ => return CliticSplit::whole(wordform),
    };

    let parts = match rule {
        Rule::Enclitic(re) => {
            let mut pieces = split_keeping_clitic(re, wordform);
            // the remainder after the last clitic is not kept
            pieces.pop();
            pieces
        }
        Rule::Contraction(c) => c
            .pattern
            .replace_all(wordform, c.rewrite)
            .split(' ')
            .map(str::to_string)
            .collect(),
    };

    CliticSplit::from_parts(wordform, parts)
}

/// Splits around every match of `re`, keeping the captured clitic between
/// the surrounding pieces.
fn split_keeping_clitic(re: &Regex, text: &str) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut last = 0;
    for caps in re.captures_iter(text) {
        let whole = caps.get(0).map_or(last..last, |m| m.range());
        pieces.push(text[last..whole.start].to_string());
        if let Some(clitic) = caps.get(1) {
            pieces.push(clitic.as_str().to_string());
        }
        last = whole.end;
    }
    pieces.push(text[last..].to_string());
    pieces
}
