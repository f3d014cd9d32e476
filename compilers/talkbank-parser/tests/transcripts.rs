use talkbank_parser::{parse_document, Document, MorParser, ParserConfig, TranscriptParser};
use talkbank_protocol::{render_tokens, ParseOptions, Utterance};

const NAMESPACED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<CHAT xmlns="http://www.talkbank.org/ns/talkbank" Lang="eng" Corpus="test" Version="2.0.1">
  <Participants>
    <participant id="CHI" role="Target_Child"/>
    <participant id="MOT" role="Mother"/>
  </Participants>
  <u who="MOT" uID="u0">
    <w>hidden<mor type="mor"><mw><pos><c>part</c></pos><stem>hide</stem><mk type="sxfx">PERF</mk></mw></mor></w>
    <w>away<mor type="mor"><mw><pos><c>adv</c></pos><stem>away</stem></mw></mor></w>
    <w>where<mor type="mor"><mw><pos><c>adv</c><s>wh</s></pos><stem>where</stem></mw></mor></w>
    <w>nobody'd<mor type="mor">
      <mw><pos><c>pro</c><s>indef</s></pos><stem>nobody</stem></mw>
      <mor-post><mw><pos><c>mod</c></pos><stem>genmod</stem></mw></mor-post>
    </mor></w>
    <w>be<mor type="mor"><mw><pos><c>v</c><s>cop</s></pos><stem>be</stem></mw></mor></w>
    <t type="p"><mor type="mor"><mw><pos><c>.</c></pos><stem>.</stem></mw></mor></t>
  </u>
  <u who="CHI" uID="u1">
    <w>goed<replacement>
      <w>went<mor type="mor"><mw><pos><c>v</c></pos><stem>go</stem><mk type="sxfx">PAST</mk></mw></mor></w>
    </replacement></w>
    <g>
      <w>the<mor type="mor"><mw><pos><c>det</c><s>art</s></pos><stem>the</stem></mw></mor></w>
      <w>fire<mor type="mor"><mwc><pos><c>n</c></pos><mw><pos><c>n</c></pos><stem>fire</stem></mw><mw><pos><c>n</c></pos><stem>truck</stem></mw></mwc></mor>truck</w>
      <ga type="paraphrase">the big truck</ga>
    </g>
    <w type="fragment">tr<mor type="mor"><mw><pos><c>n</c></pos><stem>tr</stem></mw></mor></w>
    <w><shortening>be</shortening>cause<mor type="mor"><mw><pos><c>conj</c></pos><stem>because</stem></mw></mor></w>
    <t type="q"><mor type="mor"><mw><pos><c>?</c></pos><stem>?</stem></mw></mor></t>
  </u>
  <u who="CHI">
    <w>xxx</w>
    <t type="trail off"><mor type="mor"><mw><pos><c>+...</c></pos><stem>+...</stem></mw></mor></t>
  </u>
</CHAT>"#;

fn lines(utterances: &[Utterance]) -> Vec<String> {
    utterances.iter().map(|u| u.to_string()).collect()
}

#[test]
fn test_clitic_utterance() {
    let utterances = parse_document(NAMESPACED, ParserConfig::talkbank()).unwrap();
    assert_eq!(utterances[0].id, "u0");
    assert_eq!(utterances[0].speaker, "MOT");
    assert_eq!(
        render_tokens(&utterances[0].tokens),
        "hidden/part|hide&PERF away/adv|away where/adv:wh|where nobody/pro:indef|nobody 'd/mod|genmod be/v:cop|be ./.|."
    );
}

#[test]
fn test_replacement_group_and_fragment() {
    let utterances = parse_document(NAMESPACED, ParserConfig::talkbank()).unwrap();
    assert_eq!(
        utterances[1].to_string(),
        "u1 CHI went/v|go&PAST the/det:art|the firetruck/n|fire+truck because/conj|because ?/?|?"
    );
}

#[test]
fn test_options_change_tokens() {
    let options = ParseOptions::DROP_SHORTENINGS | ParseOptions::UNDERSCORE_COMPOUNDS;
    let utterances = parse_document(NAMESPACED, ParserConfig::talkbank().with_options(options)).unwrap();
    let tokens = &utterances[1].tokens;
    assert_eq!(tokens[2].stem.as_deref(), Some("fire_truck"));
    assert_eq!(tokens[3].word, "cause");
}

#[test]
fn test_unmapped_terminator_and_missing_id() {
    let utterances = parse_document(NAMESPACED, ParserConfig::talkbank()).unwrap();
    assert_eq!(utterances.len(), 3);
    assert_eq!(lines(&utterances[2..]), vec![" CHI -/-|-"]);
    assert!(utterances[2].tokens[0].is_punct());
}

#[test]
fn test_bare_fixture_matches_namespaced() {
    let bare = NAMESPACED.replace(r#" xmlns="http://www.talkbank.org/ns/talkbank""#, "");
    let from_bare = parse_document(&bare, ParserConfig::default()).unwrap();
    let from_namespaced = parse_document(NAMESPACED, ParserConfig::talkbank()).unwrap();
    assert_eq!(lines(&from_bare), lines(&from_namespaced));
}

#[test]
fn test_namespace_mismatch_finds_nothing() {
    let utterances = parse_document(NAMESPACED, ParserConfig::default()).unwrap();
    assert!(utterances.is_empty());
}

#[test]
fn test_walk_restarts_from_fresh_handle() {
    let parser = MorParser::new(ParserConfig::talkbank());
    let first: Vec<Utterance> = {
        let doc = Document::parse_str(NAMESPACED).unwrap();
        parser.utterances(&doc).collect::<Result<_, _>>().unwrap()
    };
    let doc = Document::parse_bytes(NAMESPACED.as_bytes()).unwrap();
    let second: Vec<Utterance> = parser.utterances(&doc).collect::<Result<_, _>>().unwrap();
    assert_eq!(lines(&first), lines(&second));
    assert_eq!(parser.utterances(&doc).take(1).count(), 1);
}
