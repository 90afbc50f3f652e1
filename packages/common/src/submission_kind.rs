use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The context a submission is addressed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionKind {
    /// A standalone problem from the problem set.
    Problem,
    /// A problem addressed through a contest and its problem number.
    Contest,
    /// A problem addressed through a topic (special subject) and its number.
    Topic,
}

impl SubmissionKind {
    /// All possible kinds.
    pub const ALL: &'static [SubmissionKind] = &[Self::Problem, Self::Contest, Self::Topic];

    /// Returns the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Problem => "problem",
            Self::Contest => "contest",
            Self::Topic => "topic",
        }
    }
}

impl fmt::Display for SubmissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing an invalid kind string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKindError {
    invalid: String,
}

impl fmt::Display for ParseKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid submission type '{}'. Valid values: {}",
            self.invalid,
            SubmissionKind::ALL
                .iter()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl std::error::Error for ParseKindError {}

impl FromStr for SubmissionKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "problem" => Ok(Self::Problem),
            "contest" => Ok(Self::Contest),
            "topic" => Ok(Self::Topic),
            _ => Err(ParseKindError {
                invalid: s.to_string(),
            }),
        }
    }
}
