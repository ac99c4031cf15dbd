// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! User overrides for the language table.
//!
//! An association maps a language name to `ext1;ext2[:TAG...]`. The extensions replace the
//! language's own. Tags only matter for markup languages: `HTML4`/`HTML5` pick the tag
//! vocabulary and a script name such as `VBScript` sets the `<% %>` language.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::highlight::dispatch::{Selection, SubLanguage};
use crate::highlight::markup::Lexis;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Associations(BTreeMap<String, String>);

impl Associations {
    pub fn insert(&mut self, name: impl Into<String>, entry: impl Into<String>) {
        self.0.insert(name.into(), entry.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(name, entry)| (name.as_str(), entry.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Loads a JSON object of `"name": "entry"` pairs.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parses `name=entry` lines. Blank lines and lines starting with `;` or `#` are skipped.
    pub fn parse(text: &str) -> Result<Self> {
        let mut associations = Self::default();
        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with([';', '#']) {
                continue;
            }
            let Some((name, entry)) = line.split_once('=') else {
                return Err(Error::MalformedAssociation { line: index + 1, text: line.to_owned() });
            };
            let name = name.trim();
            if name.is_empty() {
                return Err(Error::MalformedAssociation { line: index + 1, text: line.to_owned() });
            }
            associations.insert(name, entry.trim());
        }
        Ok(associations)
    }

    /// The inverse of [`Associations::parse`].
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for (name, entry) in self.iter() {
            text.push_str(name);
            text.push('=');
            text.push_str(entry);
            text.push('\n');
        }
        text
    }
}

/// One association value, split into its parts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AssociationEntry {
    pub extensions: String,
    pub lexis: Option<Lexis>,
    pub inline: Option<SubLanguage>,
    pub unknown_tags: Vec<String>,
}

impl AssociationEntry {
    pub fn parse(entry: &str) -> Self {
        let mut parts = entry.split(':');
        let mut result = Self {
            extensions: parts.next().unwrap_or_default().trim().to_owned(),
            ..Default::default()
        };

        for tag in parts.map(str::trim).filter(|t| !t.is_empty()) {
            let lexis = if tag.eq_ignore_ascii_case("HTML4") {
                Some(Lexis::HTML4)
            } else if tag.eq_ignore_ascii_case("HTML5") {
                Some(Lexis::HTML5)
            } else {
                None
            };
            if let Some(lexis) = lexis {
                result.lexis = Some(result.lexis.map_or(lexis, |l| l | lexis));
                continue;
            }
            match Selection::lookup(tag) {
                Some(Selection::Script(language)) => result.inline = Some(language),
                _ => result.unknown_tags.push(tag.to_owned()),
            }
        }
        result
    }
}
