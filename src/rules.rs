//! Rule Log Replay
//!
//! Rules arrive as dated `+token`/`-token` entries. The active set for a
//! query date is the net effect of every entry dated on or before it,
//! applied in file order.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::dates::{parse_date_list, DateParseError, RuleDate};

#[derive(Debug, Error)]
pub enum RuleLogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("rule entry missing ':' separator: {0:?}")]
    MissingSeparator(String),

    #[error("invalid date: {0}")]
    Date(#[from] DateParseError),
}

/// A rule name carrying its activation sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignedToken {
    Add(String),
    Remove(String),
}

impl SignedToken {
    /// `+name` activates, `-name` deactivates. Anything else is not a
    /// signed token and replay skips it.
    pub fn parse(raw: &str) -> Option<Self> {
        if let Some(name) = raw.strip_prefix('+') {
            Some(Self::Add(name.to_string()))
        } else if let Some(name) = raw.strip_prefix('-') {
            Some(Self::Remove(name.to_string()))
        } else {
            None
        }
    }

    pub fn apply(&self, active: &mut HashSet<String>) {
        match self {
            Self::Add(name) => {
                active.insert(name.clone());
            }
            Self::Remove(name) => {
                // Removing an absent name is a no-op.
                active.remove(name);
            }
        }
    }
}

/// One line of the rules file: `date:tok tok ...`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleEntry {
    pub date: RuleDate,
    pub tokens: Vec<SignedToken>,
}

impl RuleEntry {
    pub fn parse_line(line: &str) -> Result<Self, RuleLogError> {
        let (date_part, token_part) = line
            .trim_end()
            .split_once(':')
            .ok_or_else(|| RuleLogError::MissingSeparator(line.trim_end().to_string()))?;

        let tokens = token_part
            .split_whitespace()
            .filter_map(SignedToken::parse)
            .collect();

        Ok(Self {
            date: date_part.parse()?,
            tokens,
        })
    }
}

/// The per-date result of a replay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateActivation {
    pub date: RuleDate,
    pub active: HashSet<String>,
}

/// A rules file in memory, in file order.
///
/// Entries are expected to be sorted ascending by date; `active_at`
/// stops scanning at the first entry dated after the query date, so an
/// out-of-order file yields a truncated replay.
#[derive(Debug)]
pub struct RuleLog {
    entries: Vec<RuleEntry>,
}

impl RuleLog {
    pub fn new(entries: Vec<RuleEntry>) -> Self {
        Self { entries }
    }

    /// Parse one entry per line, skipping blank lines.
    pub fn parse(text: &str) -> Result<Self, RuleLogError> {
        let entries = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(RuleEntry::parse_line)
            .collect::<Result<_, _>>()?;
        Ok(Self::new(entries))
    }

    pub fn load(path: &Path) -> Result<Self, RuleLogError> {
        let text = fs::read_to_string(path).map_err(|source| RuleLogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn entries(&self) -> &[RuleEntry] {
        &self.entries
    }

    /// Replay the log up to and including `query`.
    ///
    /// An entry dated exactly on the query date is applied. The scan
    /// breaks at the first entry dated after the query date rather than
    /// skipping it.
    pub fn active_at(&self, query: RuleDate) -> HashSet<String> {
        let mut active = HashSet::new();

        for entry in &self.entries {
            if entry.date > query {
                break;
            }
            for token in &entry.tokens {
                token.apply(&mut active);
            }
        }

        active
    }

    /// Compute one activation per query date, in query order.
    pub fn evaluate(&self, dates: &[RuleDate]) -> Vec<DateActivation> {
        dates
            .iter()
            .map(|&date| DateActivation {
                date,
                active: self.active_at(date),
            })
            .collect()
    }
}

/// Read the query dates file, one `dd-mm-yyyy` per line.
pub fn load_query_dates(path: &Path) -> Result<Vec<RuleDate>, RuleLogError> {
    let text = fs::read_to_string(path).map_err(|source| RuleLogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_date_list(&text)?)
}
