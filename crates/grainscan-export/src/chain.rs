//! Freeman chain text format.
//!
//! The historical interchange format for chain codes: one chain per
//! line, the start coordinates followed by the direction digits,
//! space-separated:
//!
//! ```text
//! 1398 259 110101110101110...
//! ```
//!
//! Writing is strict; parsing is strict about the two leading
//! coordinates but tolerant about the code itself -- stray non-digit
//! characters are preserved verbatim and skipped later during replay,
//! matching how chain-code consumers have always treated this format.

use std::fmt::Write;

use grainscan_analysis::{ChainCode, Point};

/// Errors produced while parsing chain text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainTextError {
    /// A non-empty line did not begin with two coordinate tokens.
    #[error("line {line}: expected `x y <code>`, found too few fields")]
    MissingStart {
        /// 1-based line number.
        line: usize,
    },

    /// A coordinate token was not a valid integer.
    #[error("line {line}: invalid coordinate `{token}`")]
    InvalidCoordinate {
        /// 1-based line number.
        line: usize,
        /// The offending token.
        token: String,
    },
}

/// Serialize chain codes into the one-chain-per-line text format.
///
/// # Examples
///
/// ```
/// use grainscan_analysis::{ChainCode, Point};
/// use grainscan_export::to_chain_text;
///
/// let chains = vec![ChainCode::new(Point::new(3, 4), "0123")];
/// assert_eq!(to_chain_text(&chains), "3 4 0123\n");
/// ```
#[must_use]
pub fn to_chain_text(chains: &[ChainCode]) -> String {
    let mut out = String::new();
    for chain in chains {
        let start = chain.start();
        let _ = writeln!(out, "{} {} {}", start.x, start.y, chain.directions());
    }
    out
}

/// Parse the one-chain-per-line text format back into chain codes.
///
/// Blank lines are skipped. The code portion is kept verbatim,
/// including any stray characters; replay skips what it cannot
/// interpret. A line holding only the two coordinates parses as a
/// chain with an empty code.
///
/// # Errors
///
/// Returns [`ChainTextError::MissingStart`] for a non-empty line with
/// fewer than two fields, and [`ChainTextError::InvalidCoordinate`]
/// when a coordinate fails to parse as an integer.
pub fn parse_chain_text(text: &str) -> Result<Vec<ChainCode>, ChainTextError> {
    let mut chains = Vec::new();
    for (idx, raw_line) in text.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw_line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let mut fields = trimmed.splitn(3, char::is_whitespace);
        let x_token = fields.next().ok_or(ChainTextError::MissingStart { line })?;
        let y_token = fields.next().ok_or(ChainTextError::MissingStart { line })?;
        let code = fields.next().unwrap_or("").trim();

        let x = parse_coordinate(x_token, line)?;
        let y = parse_coordinate(y_token, line)?;
        chains.push(ChainCode::new(Point::new(x, y), code));
    }
    Ok(chains)
}

fn parse_coordinate(token: &str, line: usize) -> Result<i32, ChainTextError> {
    token
        .parse()
        .map_err(|_| ChainTextError::InvalidCoordinate {
            line,
            token: token.to_owned(),
        })
}
