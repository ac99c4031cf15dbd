// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Line-at-a-time syntax lexers for a diff viewer.
//!
//! Every lexer maps `(cookie, line)` to a list of [`ColorSpan`]s plus the cookie for the
//! next line. The [`CookieCache`] stores cookies per line so a renderer can lex any line
//! without rescanning the whole buffer, and the [`LanguageRegistry`] picks a lexer by
//! file extension, content sniff or modeline.

pub mod cache;
pub mod config;
pub mod error;
pub mod highlight;
pub mod modeline;
pub mod pattern;
pub mod registry;

pub use cache::{CookieCache, LineSource};
pub use config::Associations;
pub use error::{Error, Result};
pub use highlight::{ColorClass, ColorSpan, Cookie, LineLexer, SpanEmitter, lex_line};
pub use registry::{LanguageDefinition, LanguageRegistry, TextType};
