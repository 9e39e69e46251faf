//! SQL statement validation for read-only enforcement.
//!
//! The gate in front of every query: a statement is accepted only when its
//! first token is the bare keyword `SELECT`. This is a lexical prefix check
//! rather than a full parse. It never tries to interpret what follows, so a
//! leading comment, a CTE or an `EXPLAIN` are all rejected.
//!
//! Uses the [sqlparser](https://docs.rs/sqlparser/) tokenizer so that string
//! literals, quoted identifiers and comments are recognized correctly when
//! looking for a statement separator.

use crate::error::{DbError, DbResult};
use sqlparser::dialect::GenericDialect;
use sqlparser::tokenizer::{Token, Tokenizer};

/// Error messages for each rejection reason.
mod error_messages {
    pub const EMPTY: &str = "empty query";
    pub const NOT_SELECT: &str = "only SELECT allowed";
    pub const MULTIPLE: &str = "only SELECT allowed: multiple statements are not permitted";
    pub const UNREADABLE: &str = "only SELECT allowed: statement could not be tokenized";
    pub const EMPTY_TABLE: &str = "table name cannot be empty";
}

/// Validate that `statement` is a single SELECT.
///
/// Returns the trimmed statement on success. Every rejection is a
/// [`DbError::Validation`].
///
/// # Examples
///
/// ```
/// use db_gateway_mcp::db::sql_validator::validate_select;
///
/// assert_eq!(validate_select("  select 1  ").unwrap(), "select 1");
/// assert!(validate_select("DROP TABLE users").is_err());
/// assert!(validate_select("-- note\nSELECT 1").is_err());
/// ```
pub fn validate_select(statement: &str) -> DbResult<&str> {
    let trimmed = statement.trim();
    if trimmed.is_empty() {
        return Err(DbError::validation(error_messages::EMPTY));
    }

    let dialect = GenericDialect {};
    let tokens = Tokenizer::new(&dialect, trimmed)
        .tokenize()
        .map_err(|_| DbError::validation(error_messages::UNREADABLE))?;

    let mut tokens = tokens.iter();
    match tokens.next() {
        Some(Token::Word(word))
            if word.quote_style.is_none() && word.value.eq_ignore_ascii_case("SELECT") => {}
        _ => return Err(DbError::validation(error_messages::NOT_SELECT)),
    }

    let mut terminated = false;
    for token in tokens {
        match token {
            Token::SemiColon => terminated = true,
            Token::Whitespace(_) | Token::EOF => {}
            _ if terminated => return Err(DbError::validation(error_messages::MULTIPLE)),
            _ => {}
        }
    }

    Ok(trimmed)
}

/// Validate a table name argument, returning it trimmed.
pub fn validate_table_name(table_name: &str) -> DbResult<&str> {
    let trimmed = table_name.trim();
    if trimmed.is_empty() {
        Err(DbError::validation(error_messages::EMPTY_TABLE))
    } else {
        Ok(trimmed)
    }
}
