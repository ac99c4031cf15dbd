// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::path::Path;
use std::sync::LazyLock;

use crystal_lex::highlight::dispatch::{MarkupCookie, Region, RegionKind, SubLanguage};
use crystal_lex::{
    ColorClass, ColorClass::*, Cookie, CookieCache, LanguageDefinition, LanguageRegistry, TextType,
    lex_line,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

static REGISTRY: LazyLock<LanguageRegistry> = LazyLock::new(LanguageRegistry::new);

fn language(text_type: TextType) -> &'static LanguageDefinition {
    REGISTRY.by_type(text_type).unwrap()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn chars(text: &str) -> Vec<char> {
    text.chars().collect()
}

/// Lexes `lines` in order and returns the spans of each line as `(start, class)` pairs.
fn lex_all(text_type: TextType, lines: &[&str]) -> Vec<(Vec<(usize, ColorClass)>, Cookie)> {
    let definition = language(text_type);
    let mut cookie = Cookie::default();
    lines
        .iter()
        .map(|line| {
            let line = chars(line);
            let (spans, next) = definition.lex(cookie, &line, line.len());
            cookie = next;
            (spans.iter().map(|s| (s.start, s.class)).collect(), next)
        })
        .collect()
}

#[test]
fn c_comment_spans_lines() {
    let lines = lex_all(TextType::C, &["/*", "int x = 1;", "*/"]);
    assert_eq!(lines[1].0, vec![(0, Comment)]);
    assert_eq!(lines[2].1, Cookie::default());
}

#[test]
fn keywords_end_at_word_boundaries() {
    let lines = lex_all(TextType::C, &["intx = int;"]);
    assert_eq!(lines[0].0[0], (0, NormalText));
    assert!(lines[0].0.contains(&(7, Keyword)));

    let lines = lex_all(TextType::Rust, &["int(1)"]);
    assert_eq!(lines[0].0[0], (0, FunctionName));
    let lines = lex_all(TextType::Lua, &["int(1)"]);
    assert_eq!(lines[0].0[0], (0, FunctionName));
}

#[test]
fn script_is_isolated_from_the_host() {
    let lines = lex_all(TextType::Html, &["<script>var x = 1;</script>"]);
    assert_eq!(
        lines[0].0,
        vec![
            (0, Operator),
            (1, Keyword),
            (7, Operator),
            (8, Keyword),
            (11, NormalText),
            (14, Operator),
            (15, NormalText),
            (16, Number),
            (17, Operator),
            (20, Keyword),
            (26, Operator),
        ]
    );
    assert_eq!(lines[0].1, Cookie::default());
}

#[test]
fn unterminated_script_stays_open() {
    let lines = lex_all(
        TextType::Html,
        &["<p><script>", "var x = '", "", "if (a) {", "} /* <p> */", "</scrip"],
    );
    let script = Region { kind: RegionKind::Script, language: SubLanguage::JavaScript };
    for (i, (_, cookie)) in lines.iter().enumerate() {
        assert_eq!(MarkupCookie::decode(*cookie).region, Some(script), "line {i}");
    }
}

#[test]
fn plain_script_uses_the_page_language() {
    let lines = lex_all(TextType::Asp, &["<script>", "Dim x"]);
    let basic = Region { kind: RegionKind::Script, language: SubLanguage::Basic };
    assert_eq!(MarkupCookie::decode(lines[0].1).region, Some(basic));
    assert_eq!(lines[1].0, vec![(0, Keyword), (3, NormalText)]);

    let lines = lex_all(TextType::Jsp, &["<script>"]);
    assert_eq!(
        MarkupCookie::decode(lines[0].1).region.map(|r| r.language),
        Some(SubLanguage::Java)
    );
    let lines = lex_all(TextType::Html, &["<script>"]);
    assert_eq!(
        MarkupCookie::decode(lines[0].1).region.map(|r| r.language),
        Some(SubLanguage::JavaScript)
    );
}

#[test]
fn long_bracket_fences_must_match() {
    let lines = lex_all(TextType::Lua, &["s = [==[", "]=]", "]==]"]);
    assert_ne!(lines[0].1, Cookie::default());
    assert_eq!(lines[1].0, vec![(0, String)]);
    assert_ne!(lines[1].1, Cookie::default());
    assert_eq!(lines[2].1, Cookie::default());

    let lines = lex_all(TextType::Rust, &["let s = r##\"", "\"# still", "\"##;"]);
    assert_eq!(lines[1].0, vec![(0, String)]);
    assert_eq!(lines[2].1, Cookie::default());
}

#[test]
fn razor_blocks() {
    let lines = lex_all(TextType::Cshtml, &["@* note", "*@ @@x", "@if (a) {", "<b>@x</b>", "} x"]);
    assert_eq!(lines[0].0, vec![(0, Comment)]);
    assert_eq!(lines[1].0[0], (0, Comment));
    assert_eq!(lines[1].1, Cookie::default());
    assert!(MarkupCookie::decode(lines[2].1).nesting > 0);
    assert!(MarkupCookie::decode(lines[3].1).nesting > 0);
    assert_eq!(lines[4].1, Cookie::default());
}

#[test]
fn detection() {
    init_tracing();
    assert_eq!(REGISTRY.detect(Path::new("Views/Index.cshtml"), &[]).text_type, TextType::Cshtml);
    assert_eq!(
        REGISTRY.detect(Path::new("notes"), &["<?xml version=\"1.0\"?>"]).text_type,
        TextType::Xml
    );
    assert_eq!(
        REGISTRY.detect(Path::new("run.txt"), &["#!/bin/sh", "# vim: ft=python"]).text_type,
        TextType::Python
    );
    assert_eq!(REGISTRY.detect(Path::new("README"), &["hello"]).text_type, TextType::Plain);
}

fn any_type() -> impl Strategy<Value = TextType> {
    let types: Vec<TextType> = REGISTRY.definitions().iter().map(|d| d.text_type).collect();
    prop::sample::select(types)
}

/// Printable text, weighted towards the constructs that open multi-line state.
fn any_line() -> impl Strategy<Value = std::string::String> {
    prop_oneof![
        "[ -~]{0,60}",
        concat!(
            "(<script>|</script>|<style>|<%|%>|<\\?php|\\?>|<!--|-->|@\\{|@\\(|@\\*|\\*@",
            "|\\{|\\}|/\\*|\\*/|\"|'|\\[==\\[|r#\"|[a-z ]{1,6}){0,12}",
        ),
        "\\PC{0,20}",
    ]
}

proptest! {
    #[test]
    fn lexing_is_deterministic(text_type in any_type(), line in any_line(), bits in any::<u64>()) {
        let definition = language(text_type);
        let line = chars(&line);
        let cookie = Cookie::from_bits(bits);
        let first = definition.lex(cookie, &line, line.len());
        prop_assert_eq!(first, definition.lex(cookie, &line, line.len()));
    }

    #[test]
    fn spans_are_ordered_and_in_bounds(
        text_type in any_type(),
        lines in prop::collection::vec(any_line(), 1..8),
        cut in 0usize..80
    ) {
        let definition = language(text_type);
        let mut cookie = Cookie::default();
        for line in &lines {
            let line = chars(line);
            let len = cut.min(line.len());
            let (spans, next) = lex_line(definition.lexer(), cookie, &line, len);
            for pair in spans.windows(2) {
                prop_assert!(pair[0].start < pair[1].start, "{:?}", spans);
            }
            prop_assert!(spans.iter().all(|s| s.start < len), "{:?}", spans);
            cookie = next;
        }
    }

    #[test]
    fn cache_matches_sequential_lexing(
        text_type in any_type(),
        lines in prop::collection::vec(any_line(), 1..12),
        target in 0usize..12
    ) {
        let definition = language(text_type);
        let source: Vec<Vec<char>> = lines.iter().map(|l| chars(l)).collect();
        let mut cache = CookieCache::new(definition.shared_lexer(), source.len());

        let target = target.min(source.len() - 1);
        let mut expected = Cookie::default();
        for line in &source[..target] {
            expected = lex_line(definition.lexer(), expected, line, line.len()).1;
        }
        prop_assert_eq!(cache.cookie_for(&source, target), expected);

        cache.invalidate_from(target / 2);
        prop_assert_eq!(cache.cookie_for(&source, target), expected);
    }
}
