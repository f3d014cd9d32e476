//! MOR tag grammar.
//!
//! ```text
//! Tag         := Wordform? '/' (SimpleTag | CompoundTag)
//! SimpleTag   := Prefix* Pos SubPos* '|' Lemma FusionalSfx* Sfx*
//! CompoundTag := Prefix* Pos SubPos* '|' ('+' SimpleTag){2,4}
//! Prefix      := ALNUM+ '#'
//! SubPos      := ':' ALNUM+
//! FusionalSfx := '&' ALNUM+
//! Sfx         := '-' ALNUM+
//! ```
//!
//! The leading `Wordform/` may be left out entirely (`n:prop|count`), which
//! is how corrections write bare tags.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::char,
    combinator::{all_consuming, map, opt},
    multi::{many0, many_m_n},
    sequence::{preceded, terminated, tuple},
    IResult,
};
use talkbank_protocol::{MorToken, ParsedTag, MAX_COMPOUND_WORDS, MIN_COMPOUND_WORDS};

use crate::error::TagError;

fn is_wordform_char(c: char) -> bool {
    c.is_alphanumeric() || "+_'.!?-".contains(c)
}

fn is_pos_char(c: char) -> bool {
    c.is_alphanumeric() || ".!?-".contains(c)
}

/// Lemmas stop at the `&`, `-` and `+` delimiters.
fn is_lemma_char(c: char) -> bool {
    c.is_alphanumeric() || "_.!?'".contains(c)
}

fn alnum(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric())(input)
}

/// `Prefix* Pos SubPos*`, up to and including the `|`.
fn head(input: &str) -> IResult<&str, (Vec<&str>, &str, Vec<&str>)> {
    terminated(
        tuple((
            many0(terminated(alnum, char('#'))),
            take_while1(is_pos_char),
            many0(preceded(char(':'), alnum)),
        )),
        char('|'),
    )(input)
}

/// `Lemma FusionalSfx* Sfx*`
fn stem(input: &str) -> IResult<&str, (&str, Vec<&str>, Vec<&str>)> {
    tuple((
        // a lone dash is the lemma of the unmapped punctuation token
        alt((take_while1(is_lemma_char), tag("-"))),
        many0(preceded(char('&'), alnum)),
        many0(preceded(char('-'), alnum)),
    ))(input)
}

fn simple_tag(input: &str) -> IResult<&str, ParsedTag> {
    map(tuple((head, stem)), |((prefix, pos, sub_pos), (lemma, fusional, suffix))| {
        ParsedTag {
            wordform: None,
            prefix: owned(prefix),
            pos: pos.to_string(),
            sub_pos: owned(sub_pos),
            lemma: lemma.to_string(),
            fusional_suffix: owned(fusional),
            suffix: owned(suffix),
            words: Vec::new(),
        }
    })(input)
}

fn components(input: &str) -> IResult<&str, Vec<ParsedTag>> {
    many_m_n(
        MIN_COMPOUND_WORDS,
        MAX_COMPOUND_WORDS,
        preceded(char('+'), simple_tag),
    )(input)
}

enum Body<'a> {
    Compound(Vec<ParsedTag>),
    Simple((&'a str, Vec<&'a str>, Vec<&'a str>)),
}

fn tag_record(input: &str) -> IResult<&str, ParsedTag> {
    // 1. Optional surface form
    let (input, wordform) = opt(terminated(take_while(is_wordform_char), char('/')))(input)?;

    // 2. Analysis of the whole word
    let (input, (prefix, pos, sub_pos)) = head(input)?;

    // 3. Components, or the word's own lemma and suffixes
    let (input, body) = alt((map(components, Body::Compound), map(stem, Body::Simple)))(input)?;

    let mut tag = ParsedTag {
        wordform: wordform.filter(|w| !w.is_empty()).map(str::to_string),
        prefix: owned(prefix),
        pos: pos.to_string(),
        sub_pos: owned(sub_pos),
        ..ParsedTag::default()
    };

    match body {
        Body::Compound(words) => {
            tag.words = words;
            tag.lemma = tag.joined_lemma('+');
        }
        Body::Simple((lemma, fusional, suffix)) => {
            tag.lemma = lemma.to_string();
            tag.fusional_suffix = owned(fusional);
            tag.suffix = owned(suffix);
        }
    }

    Ok((input, tag))
}

fn owned(items: Vec<&str>) -> Vec<String> {
    items.into_iter().map(str::to_string).collect()
}

/// Parses a complete MOR tag string.
pub fn parse_tag(input: &str) -> Result<ParsedTag, TagError> {
    match all_consuming(tag_record)(input) {
        Ok((_, tag)) => Ok(tag),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(TagError::malformed(input, e.input)),
        Err(nom::Err::Incomplete(_)) => Err(TagError::malformed(input, "")),
    }
}

/// Parses a MOR tag string straight into a token, e.g.
/// `cooj:coo|and` becomes `and/cooj:coo|and`.
pub fn parse_token(input: &str, word: Option<&str>) -> Result<MorToken, TagError> {
    parse_tag(input).map(|tag| MorToken::from_tag(&tag, word))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn simple(pos: &str, sub_pos: &[&str], lemma: &str) -> ParsedTag {
        ParsedTag {
            pos: pos.to_string(),
            sub_pos: strings(sub_pos),
            lemma: lemma.to_string(),
            ..ParsedTag::default()
        }
    }

    fn with_wordform(mut tag: ParsedTag, wordform: &str) -> ParsedTag {
        tag.wordform = Some(wordform.to_string());
        tag
    }

    #[test]
    fn test_basic_tags() {
        let cases = [
            ("different/adj|different", with_wordform(simple("adj", &[], "different"), "different")),
            ("count/n:prop|count", with_wordform(simple("n", &["prop"], "count"), "count")),
            ("your/pro:poss:det|your", with_wordform(simple("pro", &["poss", "det"], "your"), "your")),
        ];
        for (input, expected) in cases {
            assert_eq!(parse_tag(input).unwrap(), expected, "{}", input);
        }
    }

    #[test]
    fn test_prefixes() {
        let tag = parse_tag("untill/un#n|till").unwrap();
        assert_eq!(tag.prefix, vec!["un"]);
        assert_eq!(tag.pos, "n");
        assert_eq!(tag.lemma, "till");

        let tag = parse_tag("nonsense/non#adj|sense").unwrap();
        assert_eq!(tag.prefix, vec!["non"]);
        assert_eq!(tag.wordform.as_deref(), Some("nonsense"));
    }

    #[test]
    fn test_suffixes() {
        let tag = parse_tag("was/aux|be&PAST&3S").unwrap();
        assert_eq!(tag.fusional_suffix, vec!["PAST", "3S"]);
        assert!(tag.suffix.is_empty());

        let tag = parse_tag("mommy/adj|mom&dn-Y").unwrap();
        assert_eq!(tag.lemma, "mom");
        assert_eq!(tag.fusional_suffix, vec!["dn"]);
        assert_eq!(tag.suffix, vec!["Y"]);

        let tag = parse_tag("writing/n:gerund|write-PROG").unwrap();
        assert_eq!(tag.sub_pos, vec!["gerund"]);
        assert_eq!(tag.suffix, vec!["PROG"]);

        let tag = parse_tag("is/v:cop|be&3s").unwrap();
        assert_eq!(tag.fusional_suffix, vec!["3s"]);
    }

    #[test]
    fn test_compound_two_components() {
        let tag = parse_tag("tow+truck/n|+n|tow+n|truck-PL").unwrap();
        let mut truck = simple("n", &[], "truck");
        truck.suffix = strings(&["PL"]);
        let expected = ParsedTag {
            wordform: Some("tow+truck".to_string()),
            pos: "n".to_string(),
            lemma: "tow+truck".to_string(),
            words: vec![simple("n", &[], "tow"), truck],
            ..ParsedTag::default()
        };
        assert_eq!(tag, expected);
        assert!(tag.words.iter().all(|w| w.wordform.is_none()));
    }

    #[test]
    fn test_compound_variants() {
        let tag = parse_tag("sweetie+pie/n|+n|sweet&dadj-DIM+n|pie").unwrap();
        assert_eq!(tag.lemma, "sweet+pie");
        assert_eq!(tag.words[0].fusional_suffix, vec!["dadj"]);
        assert_eq!(tag.words[0].suffix, vec!["DIM"]);

        let tag = parse_tag("twenty+fourth/det:num|+det:num|twenty+det:num|fourth").unwrap();
        assert_eq!(tag.sub_pos, vec!["num"]);
        assert_eq!(tag.words[1].sub_pos, vec!["num"]);

        let tag = parse_tag("look+it/int|+v|look+pro:obj|it").unwrap();
        assert_eq!(tag.words[1], simple("pro", &["obj"], "it"));

        let tag = parse_tag("never+the+less/adv|+adv|never+det|the+adj|less").unwrap();
        assert_eq!(tag.words.len(), 3);
        assert_eq!(tag.lemma, "never+the+less");

        let tag = parse_tag("a+b+c+d/n|+n|a+n|b+n|c+n|d").unwrap();
        assert_eq!(tag.words.len(), 4);
    }

    #[test]
    fn test_bare_tags() {
        let tag = parse_tag("n|+n|sport-PL+n|car").unwrap();
        assert_eq!(tag.wordform, None);
        assert_eq!(tag.lemma, "sport+car");
        assert_eq!(tag.words[0].suffix, vec!["PL"]);

        let tag = parse_tag("/v|go").unwrap();
        assert_eq!(tag.wordform, None);
        assert_eq!(tag.lemma, "go");
    }

    #[test]
    fn test_punctuation_tags() {
        assert_eq!(parse_tag("?/?|?").unwrap().lemma, "?");
        assert_eq!(parse_tag("-/-|-").unwrap().pos, "-");
    }

    #[test]
    fn test_parse_token() {
        let token = parse_token("cooj:coo|and", None).unwrap();
        assert_eq!(token.to_string(), "and/cooj:coo|and");

        let token = parse_token("hidden/part|hide&PERF", None).unwrap();
        assert_eq!(token.to_string(), "hidden/part|hide&PERF");

        let token = parse_token("n|+n|tow+n|truck", Some("towtruck")).unwrap();
        assert_eq!(token.to_string(), "towtruck/n|tow+truck");
    }

    #[test]
    fn test_malformed() {
        // missing `|`
        let err = parse_tag("dog/n").unwrap_err();
        assert_eq!(
            err,
            TagError::Malformed {
                tag: "dog/n".to_string(),
                position: 5,
                offending: "<end of input>".to_string(),
            }
        );

        // one component is not a compound
        assert!(parse_tag("tow/n|+n|tow").is_err());
        // five components is too many
        let TagError::Malformed { offending, .. } = parse_tag("n|+n|a+n|b+n|c+n|d+n|e").unwrap_err();
        assert_eq!(offending, "+n|e");
        // dangling suffix delimiter
        assert!(parse_tag("be/v|be-").is_err());
        // bad pos character
        let TagError::Malformed { offending, .. } = parse_tag("x/n;v|x").unwrap_err();
        assert!(offending.starts_with(';'));
        assert!(parse_tag("").is_err());
    }

    fn segment() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9]{0,4}"
    }

    fn simple_tag_string() -> impl Strategy<Value = String> {
        (
            prop::collection::vec(segment(), 0..3),
            "[a-z]{1,4}",
            prop::collection::vec(segment(), 0..3),
            "[a-z][a-z_']{0,6}",
            prop::collection::vec("[A-Z0-9]{1,4}", 0..3),
            prop::collection::vec("[A-Z0-9]{1,4}", 0..3),
        )
            .prop_map(|(prefix, pos, sub_pos, lemma, fusional, suffix)| {
                let mut s = String::new();
                for p in prefix {
                    s.push_str(&p);
                    s.push('#');
                }
                s.push_str(&pos);
                for sub in sub_pos {
                    s.push(':');
                    s.push_str(&sub);
                }
                s.push('|');
                s.push_str(&lemma);
                for f in fusional {
                    s.push('&');
                    s.push_str(&f);
                }
                for x in suffix {
                    s.push('-');
                    s.push_str(&x);
                }
                s
            })
    }

    proptest! {
        #[test]
        fn test_simple_round_trip(wordform in "[a-z][a-z'+]{0,8}", body in simple_tag_string()) {
            let input = format!("{}/{}", wordform, body);
            let tag = parse_tag(&input).unwrap();
            prop_assert_eq!(tag.to_string(), input);
            prop_assert_eq!(tag.validate(), Ok(()));
        }

        #[test]
        fn test_compound_lemma_is_joined(
            wordform in "[a-z]{1,8}",
            head in "[a-z]{1,4}",
            parts in prop::collection::vec(simple_tag_string(), 2..=4),
        ) {
            let input = format!("{}/{}|+{}", wordform, head, parts.join("+"));
            let tag = parse_tag(&input).unwrap();
            prop_assert_eq!(tag.words.len(), parts.len());
            let lemmas: Vec<&str> = tag.words.iter().map(|w| w.lemma.as_str()).collect();
            prop_assert_eq!(&tag.lemma, &lemmas.join("+"));
            prop_assert_eq!(tag.to_string(), input);
        }
    }
}
