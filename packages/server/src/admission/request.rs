use common::SubmissionKind;

use super::error::Rejection;
use crate::models::submission::{RawInt, SubmitRequest};

/// Raw address of the problem being submitted to. Ids stay unparsed until
/// the resolver stage so each kind reports its own parse failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Address {
    Problem {
        id: Option<RawInt>,
    },
    Contest {
        cid: Option<RawInt>,
        pid: Option<RawInt>,
    },
    Topic {
        tid: Option<RawInt>,
        pid: Option<RawInt>,
    },
}

impl Address {
    pub fn kind(&self) -> SubmissionKind {
        match self {
            Address::Problem { .. } => SubmissionKind::Problem,
            Address::Contest { .. } => SubmissionKind::Contest,
            Address::Topic { .. } => SubmissionKind::Topic,
        }
    }
}

/// A submission whose type has been classified. Immutable from here on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub address: Address,
    /// Requested language index, unchecked. Anything outside the mask width
    /// is rejected by the language stage.
    pub language: i64,
    pub source: String,
    pub input_text: Option<String>,
    pub fingerprint: String,
    pub share: bool,
}

impl SubmissionRequest {
    pub fn kind(&self) -> SubmissionKind {
        self.address.kind()
    }

    /// Classify a request body and check the fields every kind shares.
    pub fn classify(body: SubmitRequest, max_source_size: usize) -> Result<Self, Rejection> {
        let kind = body
            .kind
            .as_deref()
            .and_then(|k| k.parse::<SubmissionKind>().ok())
            .ok_or_else(|| Rejection::invalid("submission type is not valid"))?;

        let language = body
            .language
            .as_ref()
            .and_then(RawInt::to_i64)
            .ok_or_else(|| Rejection::invalid("language must be an integer"))?;

        let source = body
            .source
            .ok_or_else(|| Rejection::invalid("source is required"))?;
        if source.len() > max_source_size {
            return Err(Rejection::invalid(format!(
                "source exceeds {max_source_size} bytes"
            )));
        }

        let address = match kind {
            SubmissionKind::Problem => Address::Problem { id: body.id },
            SubmissionKind::Contest => Address::Contest {
                cid: body.cid,
                pid: body.pid,
            },
            SubmissionKind::Topic => Address::Topic {
                tid: body.tid,
                pid: body.pid,
            },
        };

        Ok(Self {
            address,
            language,
            source,
            input_text: body.input_text,
            fingerprint: body.fingerprint,
            share: body.share,
        })
    }
}
