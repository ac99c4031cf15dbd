// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use thiserror::Error;

/// Errors surfaced while configuring the registry.
///
/// Lexing itself never fails: malformed input is rendered as plain text.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown language `{0}`")]
    UnknownLanguage(String),
    #[error("malformed association on line {line}: `{text}`")]
    MalformedAssociation { line: usize, text: String },
    #[error("invalid association file: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
