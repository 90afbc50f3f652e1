use std::net::IpAddr;

use async_trait::async_trait;
use chrono::Utc;
use common::ResourceId;
use common::judger::UNASSIGNED_JUDGER;
use sea_orm::*;

use crate::entity::{custom_input, solution, source_code, source_code_user};

/// Client address as recorded on the submission: the first hop of
/// `X-Forwarded-For`, else the peer address, else empty.
pub fn client_ip(forwarded_for: Option<&str>, remote_addr: Option<IpAddr>) -> String {
    forwarded_for
        .and_then(|header| header.split(',').next())
        .map(str::trim)
        .filter(|first| !first.is_empty())
        .map(str::to_owned)
        .or_else(|| remote_addr.map(|addr| addr.to_string()))
        .unwrap_or_default()
}

/// Length of the verbatim source in UTF-16 code units, saturating at
/// `i32::MAX`.
pub fn code_length(source: &str) -> i32 {
    i32::try_from(source.encode_utf16().count()).unwrap_or(i32::MAX)
}

/// Where a submission sits besides its problem.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    Standalone,
    Contest { contest_id: i32, num: i32 },
    Topic { topic_id: i32, num: i32 },
}

impl Placement {
    /// `(contest_id, topic_id, num)` columns.
    fn columns(self) -> (Option<i32>, Option<i32>, Option<i32>) {
        match self {
            Placement::Standalone => (None, None, None),
            Placement::Contest { contest_id, num } => (Some(contest_id), None, Some(num)),
            Placement::Topic { topic_id, num } => (None, Some(topic_id), Some(num)),
        }
    }
}

/// Everything written for one admitted submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewSubmission {
    /// Stored signed; negative for instanced runs.
    pub problem: ResourceId,
    pub user_id: i32,
    pub language: u32,
    pub ip: String,
    pub code_length: i32,
    /// `None` outside the problem set.
    pub share: Option<bool>,
    pub placement: Placement,
    pub fingerprint: String,
    pub user_source: String,
    pub source: String,
    /// Present exactly when `problem` is instanced.
    pub custom_input: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubmissionRecord {
    pub solution_id: i32,
    pub custom_input: bool,
}

/// Durable write capability for admitted submissions.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Write the solution row and its derived rows. Either all of them are
    /// stored or none are.
    async fn persist(&self, submission: NewSubmission) -> Result<SubmissionRecord, DbErr>;
}

pub struct DbSubmissionStore {
    db: DatabaseConnection,
}

impl DbSubmissionStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SubmissionStore for DbSubmissionStore {
    async fn persist(&self, submission: NewSubmission) -> Result<SubmissionRecord, DbErr> {
        let language = i32::try_from(submission.language)
            .map_err(|_| DbErr::Custom(format!("language {} out of range", submission.language)))?;
        let (contest_id, topic_id, num) = submission.placement.columns();

        let txn = self.db.begin().await?;

        let row = solution::ActiveModel {
            problem_id: Set(submission.problem.to_signed()),
            user_id: Set(submission.user_id),
            language: Set(language),
            ip: Set(submission.ip),
            code_length: Set(submission.code_length),
            share: Set(submission.share),
            contest_id: Set(contest_id),
            topic_id: Set(topic_id),
            num: Set(num),
            judger: Set(UNASSIGNED_JUDGER.to_owned()),
            fingerprint: Set(submission.fingerprint),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        let solution_id = row.id;

        let user_source = source_code_user::ActiveModel {
            solution_id: Set(solution_id),
            source: Set(submission.user_source),
            ..Default::default()
        };
        let judged_source = source_code::ActiveModel {
            solution_id: Set(solution_id),
            source: Set(submission.source),
            ..Default::default()
        };
        let input = submission.custom_input.map(|text| custom_input::ActiveModel {
            solution_id: Set(solution_id),
            input_text: Set(text),
            ..Default::default()
        });
        let has_input = input.is_some();

        futures::try_join!(
            user_source.insert(&txn),
            judged_source.insert(&txn),
            async {
                match input {
                    Some(input) => input.insert(&txn).await.map(Some),
                    None => Ok(None),
                }
            },
        )?;

        txn.commit().await?;

        Ok(SubmissionRecord {
            solution_id,
            custom_input: has_input,
        })
    }
}
