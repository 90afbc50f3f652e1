use common::ResourceId;
use common::resource_id::ParseIdError;
use serde::{Deserialize, Serialize};

/// Integer field that clients send either as a JSON number or as a string.
///
/// Any JSON number is accepted at the body level so that a fractional or
/// oversized value is reported by the stage that reads the field.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawInt {
    Number(serde_json::Number),
    Text(String),
}

impl RawInt {
    /// Signed resource identifier; a negative value marks an instanced run.
    pub fn to_resource_id(&self) -> Result<ResourceId, ParseIdError> {
        match self {
            RawInt::Number(n) => integral(n)
                .ok_or_else(|| ParseIdError::NotAnInteger(n.to_string()))
                .and_then(ResourceId::from_signed),
            RawInt::Text(s) => s.parse(),
        }
    }

    pub fn to_i64(&self) -> Option<i64> {
        match self {
            RawInt::Number(n) => integral(n),
            RawInt::Text(s) => s.trim().parse().ok(),
        }
    }

    pub fn to_i32(&self) -> Option<i32> {
        self.to_i64().and_then(|n| i32::try_from(n).ok())
    }
}

/// `3` and `3.0` are the same integer; `3.5` is not one.
fn integral(n: &serde_json::Number) -> Option<i64> {
    n.as_i64().or_else(|| {
        n.as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

impl From<i64> for RawInt {
    fn from(n: i64) -> Self {
        RawInt::Number(n.into())
    }
}

impl From<&str> for RawInt {
    fn from(s: &str) -> Self {
        RawInt::Text(s.to_owned())
    }
}

/// Request body for submitting a solution.
///
/// Which id fields are read depends on `type`: `id` for `problem`,
/// `cid` + `pid` for `contest`, `tid` + `pid` for `topic`. A negative `id`,
/// `cid` or `tid` submits an instanced run against `input_text`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct SubmitRequest {
    /// `problem`, `contest` or `topic`.
    #[serde(rename = "type")]
    #[schema(example = "problem")]
    pub kind: Option<String>,
    /// Problem id for standalone submissions.
    #[schema(value_type = Option<i64>, example = 1000)]
    pub id: Option<RawInt>,
    /// Contest id.
    #[schema(value_type = Option<i64>, example = 7)]
    pub cid: Option<RawInt>,
    /// Topic id.
    #[schema(value_type = Option<i64>, example = 9)]
    pub tid: Option<RawInt>,
    /// Problem number inside the contest or topic.
    #[schema(value_type = Option<i64>, example = 3)]
    pub pid: Option<RawInt>,
    /// Language index.
    #[schema(value_type = Option<i64>, example = 1)]
    pub language: Option<RawInt>,
    #[schema(example = "int main() { return 0; }")]
    pub source: Option<String>,
    /// Standard input for instanced runs.
    pub input_text: Option<String>,
    #[serde(default)]
    pub fingerprint: String,
    /// Publish the source once judged. Standalone submissions only.
    #[serde(default)]
    pub share: bool,
}

/// Successful submission response.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SubmitAccepted {
    #[schema(example = "OK")]
    pub status: String,
    #[schema(example = 1001)]
    pub solution_id: i32,
}

impl SubmitAccepted {
    pub fn new(solution_id: i32) -> Self {
        Self {
            status: "OK".into(),
            solution_id,
        }
    }
}
