use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::LangMask;
use sea_orm::*;

use crate::entity::{contest, contest_problem, prefile, problem, topic, topic_problem};

/// Whether a resource is open to plain visitors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

/// Contest running window. Both bounds are exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduleWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ScheduleWindow {
    /// True while the contest is running: `start < now < end`.
    pub fn admits(&self, now: DateTime<Utc>) -> bool {
        self.start < now && now < self.end
    }

    pub fn has_ended(&self, now: DateTime<Utc>) -> bool {
        self.end <= now
    }
}

/// Admission-relevant view of a problem, contest or topic row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceMetadata {
    pub defunct: bool,
    pub visibility: Visibility,
    /// Only contests carry a window.
    pub schedule: Option<ScheduleWindow>,
    /// `None` when the row defers to the configured default.
    pub langmask: Option<LangMask>,
}

/// One prepend or append fragment for a (problem, language) pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template {
    pub code: String,
    pub prepend: bool,
}

/// Read capability over the metadata admission decisions are based on.
///
/// All ids are magnitudes; the instanced sign never reaches this layer.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    async fn problem(&self, problem_id: u32) -> Result<Option<ResourceMetadata>, DbErr>;

    async fn contest(&self, contest_id: u32) -> Result<Option<ResourceMetadata>, DbErr>;

    async fn topic(&self, topic_id: u32) -> Result<Option<ResourceMetadata>, DbErr>;

    /// Problem mapped at position `num` of the contest.
    async fn contest_problem(&self, contest_id: u32, num: i32) -> Result<Option<u32>, DbErr>;

    /// Problem mapped at position `num` of the topic.
    async fn topic_problem(&self, topic_id: u32, num: i32) -> Result<Option<u32>, DbErr>;

    /// Windows of every contest that includes the problem.
    async fn contest_windows_for_problem(
        &self,
        problem_id: u32,
    ) -> Result<Vec<ScheduleWindow>, DbErr>;

    /// Templates for the pair, in application order.
    async fn templates(&self, problem_id: u32, language: u32) -> Result<Vec<Template>, DbErr>;
}

/// [`MetadataSource`] reading straight from the database.
#[derive(Clone)]
pub struct DbMetadata {
    db: DatabaseConnection,
}

impl DbMetadata {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn row_id(id: u32) -> Result<i32, DbErr> {
    i32::try_from(id).map_err(|_| DbErr::Custom(format!("id {id} out of range")))
}

fn visibility(is_private: bool) -> Visibility {
    if is_private {
        Visibility::Private
    } else {
        Visibility::Public
    }
}

fn problem_ref(problem_id: i32) -> Option<u32> {
    u32::try_from(problem_id).ok()
}

#[async_trait]
impl MetadataSource for DbMetadata {
    async fn problem(&self, problem_id: u32) -> Result<Option<ResourceMetadata>, DbErr> {
        let row = problem::Entity::find_by_id(row_id(problem_id)?)
            .one(&self.db)
            .await?;

        // A hidden problem is private, not retired: editors can still submit.
        Ok(row.map(|p| ResourceMetadata {
            defunct: false,
            visibility: visibility(p.defunct),
            schedule: None,
            langmask: None,
        }))
    }

    async fn contest(&self, contest_id: u32) -> Result<Option<ResourceMetadata>, DbErr> {
        let row = contest::Entity::find_by_id(row_id(contest_id)?)
            .one(&self.db)
            .await?;

        Ok(row.map(|c| ResourceMetadata {
            defunct: c.defunct,
            visibility: visibility(c.is_private),
            schedule: Some(ScheduleWindow {
                start: c.start_time,
                end: c.end_time,
            }),
            langmask: c.langmask.map(LangMask::from_column),
        }))
    }

    async fn topic(&self, topic_id: u32) -> Result<Option<ResourceMetadata>, DbErr> {
        let row = topic::Entity::find_by_id(row_id(topic_id)?)
            .one(&self.db)
            .await?;

        Ok(row.map(|t| ResourceMetadata {
            defunct: t.defunct,
            visibility: visibility(t.is_private),
            schedule: None,
            langmask: t.langmask.map(LangMask::from_column),
        }))
    }

    async fn contest_problem(&self, contest_id: u32, num: i32) -> Result<Option<u32>, DbErr> {
        let problem_id: Option<i32> = contest_problem::Entity::find()
            .filter(contest_problem::Column::ContestId.eq(row_id(contest_id)?))
            .filter(contest_problem::Column::Num.eq(num))
            .select_only()
            .column(contest_problem::Column::ProblemId)
            .into_tuple::<i32>()
            .one(&self.db)
            .await?;

        Ok(problem_id.and_then(problem_ref))
    }

    async fn topic_problem(&self, topic_id: u32, num: i32) -> Result<Option<u32>, DbErr> {
        let problem_id: Option<i32> = topic_problem::Entity::find()
            .filter(topic_problem::Column::TopicId.eq(row_id(topic_id)?))
            .filter(topic_problem::Column::Num.eq(num))
            .select_only()
            .column(topic_problem::Column::ProblemId)
            .into_tuple::<i32>()
            .one(&self.db)
            .await?;

        Ok(problem_id.and_then(problem_ref))
    }

    async fn contest_windows_for_problem(
        &self,
        problem_id: u32,
    ) -> Result<Vec<ScheduleWindow>, DbErr> {
        let contest_ids: Vec<i32> = contest_problem::Entity::find()
            .filter(contest_problem::Column::ProblemId.eq(row_id(problem_id)?))
            .select_only()
            .column(contest_problem::Column::ContestId)
            .into_tuple::<i32>()
            .all(&self.db)
            .await?;

        if contest_ids.is_empty() {
            return Ok(Vec::new());
        }

        let windows: Vec<(DateTime<Utc>, DateTime<Utc>)> = contest::Entity::find()
            .filter(contest::Column::Id.is_in(contest_ids))
            .select_only()
            .column(contest::Column::StartTime)
            .column(contest::Column::EndTime)
            .into_tuple()
            .all(&self.db)
            .await?;

        Ok(windows
            .into_iter()
            .map(|(start, end)| ScheduleWindow { start, end })
            .collect())
    }

    async fn templates(&self, problem_id: u32, language: u32) -> Result<Vec<Template>, DbErr> {
        let Ok(language) = i32::try_from(language) else {
            return Ok(Vec::new());
        };

        let rows = prefile::Entity::find()
            .filter(prefile::Column::ProblemId.eq(row_id(problem_id)?))
            .filter(prefile::Column::Language.eq(language))
            .order_by_asc(prefile::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| Template {
                code: row.code,
                prepend: row.prepend,
            })
            .collect())
    }
}
