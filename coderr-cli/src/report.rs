//! Parse reports, printable as text or JSON

use coderr::{Causal, Failure, FailureRef};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One level of a cause chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Level {
    Coded { code: String, reason: String },
    Group { members: Vec<Vec<Level>> },
    Opaque { text: String },
}

/// Outcome of parsing one message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub input: String,
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub chain: Vec<Level>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Report {
    /// Parse `input` and describe the result
    pub fn parse(input: &str) -> Self {
        match coderr::parse(input) {
            Ok(err) => Self {
                input: input.to_string(),
                valid: true,
                chain: levels(&err),
                error: None,
            },
            Err(err) => Self {
                input: input.to_string(),
                valid: false,
                chain: Vec::new(),
                error: Some(err.to_string()),
            },
        }
    }
}

/// Flatten a failure and everything it wraps, outermost first
pub fn levels<'a>(err: impl Into<FailureRef<'a>>) -> Vec<Level> {
    let err = err.into();
    std::iter::once(err)
        .chain(coderr::unwrap_all(err).into_iter().map(Failure::view))
        .map(level)
        .collect()
}

fn level(err: FailureRef<'_>) -> Level {
    match err {
        FailureRef::Coded(e) => Level::Coded {
            code: e.code().to_string(),
            reason: e.reason().to_string(),
        },
        FailureRef::Group(g) => Level::Group {
            members: g.members().iter().map(levels).collect(),
        },
        FailureRef::Opaque(o) => Level::Opaque {
            text: o.get_ref().to_string(),
        },
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Coded { code, reason } => write!(f, "code={} reason={:?}", code, reason),
            Level::Group { members } => write!(f, "group of {}", members.len()),
            Level::Opaque { text } => write!(f, "text={:?}", text),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.input)?;

        if let Some(error) = &self.error {
            return writeln!(f, "  invalid: {}", error);
        }

        for (depth, level) in self.chain.iter().enumerate() {
            writeln!(f, "  {:>2}. {}", depth, level)?;
        }
        Ok(())
    }
}

/// Count how deep a failure chain goes, the failure itself included
pub fn depth(err: &Failure) -> usize {
    1 + err.causes().count()
}
