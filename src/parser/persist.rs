//! Token stream persistence
//!
//! Tokens are stored as a JSON array of flat records, one per token in
//! stream order:
//!
//! ```json
//! [
//!   { "line": 1, "start_column": 1, "end_column": 3, "type": 5, "value": "int" }
//! ]
//! ```
//!
//! `type` is [`TokenKind::code`].

use crate::parser::token::{Token, TokenKind};
use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("invalid token JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write tokens: {0}")]
    Io(#[from] io::Error),

    #[error("unknown token type code {code} at index {index}")]
    UnknownCode { code: u8, index: usize },
}

#[derive(Debug, Serialize, Deserialize)]
struct TokenRecord {
    line: usize,
    start_column: usize,
    end_column: usize,
    #[serde(rename = "type")]
    kind: u8,
    value: String,
}

impl From<&Token> for TokenRecord {
    fn from(token: &Token) -> Self {
        Self {
            line: token.line,
            start_column: token.start_column,
            end_column: token.end_column,
            kind: token.kind.code(),
            value: token.text.clone(),
        }
    }
}

/// Serialize tokens to pretty-printed JSON.
pub fn tokens_to_json(tokens: &[Token]) -> Result<String, PersistError> {
    let records: Vec<TokenRecord> = tokens.iter().map(TokenRecord::from).collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

/// Write tokens as JSON to `writer`, followed by a newline.
pub fn write_tokens<W: io::Write>(tokens: &[Token], mut writer: W) -> Result<(), PersistError> {
    let records: Vec<TokenRecord> = tokens.iter().map(TokenRecord::from).collect();
    serde_json::to_writer_pretty(&mut writer, &records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Read tokens back from their JSON form.
pub fn tokens_from_json(json: &str) -> Result<Vec<Token>, PersistError> {
    let records: Vec<TokenRecord> = serde_json::from_str(json)?;
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let kind = TokenKind::from_code(record.kind).ok_or(PersistError::UnknownCode {
                code: record.kind,
                index,
            })?;
            Ok(Token::new(
                kind,
                record.value,
                record.line,
                record.start_column,
                record.end_column,
            ))
        })
        .collect()
}
