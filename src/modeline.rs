// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! vim, emacs and kate modelines.
//!
//! Each editor looks in its own window of lines: vim in the first and last 3, emacs in the
//! first 2, kate in the first and last 10. Later settings override earlier ones.

/// Settings read from a file's modelines.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Modeline {
    /// The language name as written, e.g. `python` or `c++`.
    pub language: Option<String>,
    pub tab_width: Option<u32>,
    pub indent_width: Option<u32>,
    pub insert_spaces: Option<bool>,
}

impl Modeline {
    fn set_width(slot: &mut Option<u32>, value: &str) {
        if let Some(width) = value.parse::<u32>().ok().filter(|&w| w > 0) {
            *slot = Some(width);
        }
    }
}

/// Scans the first 10 lines, then the last 10 that were not scanned yet.
pub fn parse(lines: &[&str]) -> Modeline {
    let mut modeline = Modeline::default();
    let count = lines.len();
    let head = count.min(10);
    for (index, line) in lines[..head].iter().enumerate() {
        parse_line(line, index + 1, count, &mut modeline);
    }
    let tail = (count - head).min(10);
    for index in (count - tail..count).rev() {
        parse_line(lines[index], index + 1, count, &mut modeline);
    }
    modeline
}

/// Line numbers start at 1.
fn parse_line(line: &str, number: usize, count: usize, modeline: &mut Modeline) {
    let s: Vec<char> = line.chars().collect();
    let near = |window: usize| number <= window || number + window > count;
    let mut prev = ' ';
    let mut i = 0;

    while i < s.len() {
        if prev.is_whitespace() {
            let rest = &s[i..];
            let vim = ["ex:", "vi:", "vim:"].into_iter().find(|m| starts_with(rest, m));
            let consumed = if let Some(marker) = vim.filter(|_| near(3)) {
                Some(parse_vim(&s, i + marker.len(), modeline))
            } else if number <= 2 && starts_with(rest, "-*-") {
                Some(parse_emacs(&s, i + 3, modeline))
            } else if near(10) && starts_with(rest, "kate:") {
                Some(parse_kate(&s, i + 5, modeline))
            } else {
                None
            };
            if let Some(end) = consumed {
                if end >= s.len() {
                    return;
                }
                i = end;
            }
        }
        prev = s[i];
        i += 1;
    }
}

fn starts_with(s: &[char], pat: &str) -> bool {
    let mut chars = s.iter();
    pat.chars().all(|p| chars.next() == Some(&p))
}

fn take_while(s: &[char], i: &mut usize, f: impl Fn(char) -> bool) -> String {
    let start = *i;
    while *i < s.len() && f(s[*i]) {
        *i += 1;
    }
    s[start..*i].iter().collect()
}

fn skip(s: &[char], i: &mut usize, f: impl Fn(char) -> bool) -> bool {
    while *i < s.len() && f(s[*i]) {
        *i += 1;
    }
    *i < s.len()
}

/// `vim: ft=c ts=4` or `vim: set ft=c ts=4:`.
fn parse_vim(s: &[char], mut i: usize, modeline: &mut Modeline) -> usize {
    let mut in_set = false;
    while i < s.len() && !(in_set && s[i] == ':') {
        if !skip(s, &mut i, |c| c == ':' || c.is_whitespace()) {
            break;
        }
        if starts_with(&s[i..], "set ") || starts_with(&s[i..], "se ") {
            skip(s, &mut i, |c| c != ' ');
            i += 1;
            in_set = true;
        }

        let negated = starts_with(&s[i..], "no");
        if negated {
            i += 2;
        }
        let key = take_while(s, &mut i, |c| c != ':' && c != '=' && !c.is_whitespace());
        let mut value = String::new();
        if s.get(i) == Some(&'=') {
            i += 1;
            value = take_while(s, &mut i, |c| c != ':' && !c.is_whitespace());
        }

        match key.as_str() {
            "ft" | "filetype" | "syn" | "syntax" => modeline.language = Some(value),
            "et" | "expandtab" => modeline.insert_spaces = Some(!negated),
            "ts" | "tabstop" => Modeline::set_width(&mut modeline.tab_width, &value),
            "sw" | "shiftwidth" => Modeline::set_width(&mut modeline.indent_width, &value),
            _ => {}
        }
    }
    i
}

/// `-*- mode: c; tab-width: 4 -*-`, or just `-*- c -*-`.
fn parse_emacs(s: &[char], mut i: usize, modeline: &mut Modeline) -> usize {
    if let Some(close) = (i..s.len()).find(|&j| starts_with(&s[j..], "-*-")) {
        let body = &s[i..close];
        if !body.contains(&':') {
            let mode: String = body.iter().collect();
            let mode = mode.trim();
            if !mode.is_empty() {
                modeline.language = Some(mode.to_owned());
            }
            return close + 3;
        }
    }

    while i < s.len() {
        if !skip(s, &mut i, |c| c == ';' || c.is_whitespace()) || starts_with(&s[i..], "-*-") {
            break;
        }
        let key = take_while(s, &mut i, |c| c != ':' && c != ';' && !c.is_whitespace());
        if !skip(s, &mut i, char::is_whitespace) {
            break;
        }
        if s[i] != ':' {
            continue;
        }
        i += 1;
        if !skip(s, &mut i, char::is_whitespace) {
            break;
        }
        let value = take_while(s, &mut i, |c| c != ';' && !c.is_whitespace());

        if key.eq_ignore_ascii_case("mode") {
            modeline.language = Some(value);
        } else if key == "tab-width" {
            Modeline::set_width(&mut modeline.tab_width, &value);
        } else if key == "indent-offset" {
            Modeline::set_width(&mut modeline.indent_width, &value);
        } else if key == "indent-tabs-mode" {
            modeline.insert_spaces = Some(value == "nil");
        }
    }
    if i >= s.len() { i } else { i + 3 }
}

/// `kate: hl C++; tab-width 4;`.
fn parse_kate(s: &[char], mut i: usize, modeline: &mut Modeline) -> usize {
    while i < s.len() {
        if !skip(s, &mut i, |c| c == ';' || c.is_whitespace()) {
            break;
        }
        let key = take_while(s, &mut i, |c| c != ';' && !c.is_whitespace());
        if !skip(s, &mut i, char::is_whitespace) {
            break;
        }
        if s[i] == ';' {
            continue;
        }
        let value = take_while(s, &mut i, |c| c != ';' && !c.is_whitespace());

        match key.as_str() {
            "hl" | "syntax" => modeline.language = Some(value),
            "tab-width" => Modeline::set_width(&mut modeline.tab_width, &value),
            "indent-width" => Modeline::set_width(&mut modeline.indent_width, &value),
            "space-indent" => {
                modeline.insert_spaces = Some(matches!(value.as_str(), "on" | "true" | "1"));
            }
            _ => {}
        }
    }
    i
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn language(lines: &[&str]) -> Option<String> {
        parse(lines).language
    }

    #[test]
    fn vim() {
        assert_eq!(language(&["# vim: ft=perl"]), Some("perl".into()));
        assert_eq!(language(&["/* vim: set filetype=c ts=4: */"]), Some("c".into()));
        assert_eq!(language(&["x", "y", "z", "w", " vi:syntax=sh"]), Some("sh".into()));
        // vim: must follow whitespace.
        assert_eq!(language(&["xvim: ft=c"]), None);

        let modeline = parse(&["// vim: set ts=8 sw=2 noet:"]);
        assert_eq!(modeline.tab_width, Some(8));
        assert_eq!(modeline.indent_width, Some(2));
        assert_eq!(modeline.insert_spaces, Some(false));
    }

    #[test]
    fn vim_only_near_the_edges() {
        let mut lines = vec!["text"; 9];
        lines[4] = " vim: ft=c";
        assert_eq!(language(&lines), None);
        lines[2] = " vim: ft=go";
        assert_eq!(language(&lines), Some("go".into()));
    }

    #[test]
    fn emacs() {
        assert_eq!(language(&["#!/bin/sh", "# -*- mode: sh; tab-width: 2 -*-"]), Some("sh".into()));
        assert_eq!(language(&["// -*- C++ -*-"]), Some("C++".into()));
        assert_eq!(language(&["a", "b", "-*- mode: c -*-"]), None);
        assert_eq!(
            parse(&[" -*- Mode: lisp; indent-tabs-mode: nil -*-"]).insert_spaces,
            Some(true)
        );
    }

    #[test]
    fn kate() {
        let modeline = parse(&["// kate: hl C++; tab-width 4; space-indent on;"]);
        assert_eq!(modeline.language, Some("C++".into()));
        assert_eq!(modeline.tab_width, Some(4));
        assert_eq!(modeline.insert_spaces, Some(true));

        let mut lines = vec!["text"; 30];
        lines[25] = "# kate: syntax Python;";
        assert_eq!(language(&lines), Some("Python".into()));
        lines[25] = "text";
        lines[15] = "# kate: syntax Python;";
        assert_eq!(language(&lines), None);
    }
}
