//! QBF instance files.
//!
//! # Format
//!
//! Whitespace-separated tokens. The first token is the number of variables
//! `n`; it is followed by the upper triangle of the coefficient matrix in
//! row-major order, `n(n+1)/2` numbers in total:
//!
//! ```text
//! 3
//! 1  -2   4
//!     3   0
//!        -1
//! ```
//!
//! Line breaks are not significant. Anything after the last coefficient is
//! ignored. Loading is all-or-nothing: a malformed file never yields a
//! partially filled [`Qbf`].

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

use super::matrix::Qbf;
use super::types::ObjectiveFunction;

/// Errors raised while loading a QBF instance.
#[derive(Debug, Error)]
pub enum InstanceError {
    /// The instance file could not be read.
    #[error("failed to read instance '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input contains no tokens at all.
    #[error("instance is empty: missing domain size")]
    MissingDimension,

    /// The first token is not a non-negative integer.
    #[error("invalid domain size '{token}'")]
    InvalidDimension { token: String },

    /// A coefficient token could not be parsed as a number.
    #[error("invalid coefficient '{token}' at token {position}")]
    InvalidCoefficient { token: String, position: usize },

    /// The input ended before the whole triangle was read.
    #[error("truncated coefficient matrix: expected {expected} values, found {found}")]
    Truncated { expected: usize, found: usize },

    /// A matrix row has the wrong number of entries.
    #[error("row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },
}

/// Reads and parses an instance file.
///
/// # Errors
///
/// Returns [`InstanceError::Io`] if the file cannot be read, or any parse
/// error from [`parse_qbf`].
pub fn load_qbf<P: AsRef<Path>>(path: P) -> Result<Qbf, InstanceError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| InstanceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let qbf = parse_qbf(&text)?;
    tracing::debug!(
        path = %path.display(),
        size = qbf.domain_size(),
        "loaded QBF instance"
    );
    Ok(qbf)
}

/// Parses instance text.
///
/// # Errors
///
/// See [`InstanceError`].
pub fn parse_qbf(text: &str) -> Result<Qbf, InstanceError> {
    let mut tokens = text.split_whitespace();

    let first = tokens.next().ok_or(InstanceError::MissingDimension)?;
    let size = parse_dimension(first)?;

    // The header is untrusted: size the matrix only once every coefficient
    // it announces has actually been read.
    let expected = triangle_len(size).ok_or_else(|| InstanceError::InvalidDimension {
        token: first.to_string(),
    })?;
    let mut values = Vec::new();
    for (index, token) in tokens.take(expected).enumerate() {
        let value = token
            .parse::<f64>()
            .map_err(|_| InstanceError::InvalidCoefficient {
                token: token.to_string(),
                position: index + 1,
            })?;
        values.push(value);
    }
    if values.len() < expected {
        return Err(InstanceError::Truncated {
            expected,
            found: values.len(),
        });
    }

    let mut qbf = Qbf::zeros(size);
    let mut values = values.into_iter();
    for i in 0..size {
        for j in i..size {
            if let Some(value) = values.next() {
                qbf.set(i, j, value);
            }
        }
    }

    Ok(qbf)
}

/// `n(n+1)/2`, or `None` if it or the dense `n × n` matrix would not fit in
/// `usize`.
fn triangle_len(size: usize) -> Option<usize> {
    size.checked_mul(size)?;
    size.checked_add(1)?.checked_mul(size).map(|v| v / 2)
}

fn parse_dimension(token: &str) -> Result<usize, InstanceError> {
    if let Ok(n) = token.parse::<usize>() {
        return Ok(n);
    }
    // Some generators write the size as a float, e.g. "20.0".
    match token.parse::<f64>() {
        Ok(v) if v >= 0.0 && v.fract() == 0.0 && v <= u32::MAX as f64 => Ok(v as usize),
        _ => Err(InstanceError::InvalidDimension {
            token: token.to_string(),
        }),
    }
}

impl FromStr for Qbf {
    type Err = InstanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_qbf(s)
    }
}
