//! Reading messages from files or stdin

use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures while gathering input messages
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to open {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read line {line}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("no messages given")]
    Empty,
}

/// A message and the 1-based line it came from
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub number: usize,
    pub text: String,
}

/// Read every non-blank line from `path`, or from stdin when `None`
pub fn read_lines(path: Option<&Path>) -> Result<Vec<Line>, InputError> {
    match path {
        Some(path) => {
            let file = std::fs::File::open(path).map_err(|source| InputError::Open {
                path: path.to_path_buf(),
                source,
            })?;
            collect_lines(file)
        }
        None => collect_lines(io::stdin().lock()),
    }
}

/// Collect the non-blank lines of `reader`
pub fn collect_lines(reader: impl Read) -> Result<Vec<Line>, InputError> {
    let mut lines = Vec::new();

    for (i, line) in BufReader::new(reader).lines().enumerate() {
        let text = line.map_err(|source| InputError::Read { line: i + 1, source })?;
        let text = text.trim_end_matches('\r');
        if text.trim().is_empty() {
            continue;
        }
        lines.push(Line {
            number: i + 1,
            text: text.to_string(),
        });
    }

    if lines.is_empty() {
        return Err(InputError::Empty);
    }
    Ok(lines)
}
