//! In-memory fakes for the admission collaborators.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use common::LangMask;
use sea_orm::DbErr;

use super::clock::Clock;
use super::metadata::{MetadataSource, ResourceMetadata, ScheduleWindow, Template, Visibility};
use super::persist::{NewSubmission, SubmissionRecord, SubmissionStore};

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

pub fn public_problem() -> ResourceMetadata {
    ResourceMetadata {
        defunct: false,
        visibility: Visibility::Public,
        schedule: None,
        langmask: None,
    }
}

pub fn private_problem() -> ResourceMetadata {
    ResourceMetadata {
        visibility: Visibility::Private,
        ..public_problem()
    }
}

/// Window relative to [`now`], in hours.
pub fn window(start_hours: i64, end_hours: i64) -> ScheduleWindow {
    ScheduleWindow {
        start: now() + Duration::hours(start_hours),
        end: now() + Duration::hours(end_hours),
    }
}

pub fn running_contest() -> ResourceMetadata {
    ResourceMetadata {
        schedule: Some(window(-1, 1)),
        ..public_problem()
    }
}

pub fn open_topic() -> ResourceMetadata {
    public_problem()
}

pub fn with_mask(mut meta: ResourceMetadata, mask: u64) -> ResourceMetadata {
    meta.langmask = Some(LangMask::from_bits(mask));
    meta
}

/// Fixed metadata, counting every read that reaches it.
#[derive(Default)]
pub struct StaticMetadata {
    problems: HashMap<u32, ResourceMetadata>,
    contests: HashMap<u32, ResourceMetadata>,
    topics: HashMap<u32, ResourceMetadata>,
    contest_problems: HashMap<(u32, i32), u32>,
    topic_problems: HashMap<(u32, i32), u32>,
    templates: HashMap<(u32, u32), Vec<Template>>,
    reads: AtomicUsize,
}

impl StaticMetadata {
    pub fn with_problem(mut self, id: u32, meta: ResourceMetadata) -> Self {
        self.problems.insert(id, meta);
        self
    }

    pub fn with_contest(mut self, id: u32, meta: ResourceMetadata) -> Self {
        self.contests.insert(id, meta);
        self
    }

    pub fn with_topic(mut self, id: u32, meta: ResourceMetadata) -> Self {
        self.topics.insert(id, meta);
        self
    }

    pub fn with_contest_problem(mut self, contest_id: u32, num: i32, problem_id: u32) -> Self {
        self.contest_problems.insert((contest_id, num), problem_id);
        self
    }

    pub fn with_topic_problem(mut self, topic_id: u32, num: i32, problem_id: u32) -> Self {
        self.topic_problems.insert((topic_id, num), problem_id);
        self
    }

    pub fn with_template(mut self, problem_id: u32, language: u32, code: &str, prepend: bool) -> Self {
        self.templates
            .entry((problem_id, language))
            .or_default()
            .push(Template {
                code: code.into(),
                prepend,
            });
        self
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn read(&self) {
        self.reads.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl MetadataSource for StaticMetadata {
    async fn problem(&self, problem_id: u32) -> Result<Option<ResourceMetadata>, DbErr> {
        self.read();
        Ok(self.problems.get(&problem_id).cloned())
    }

    async fn contest(&self, contest_id: u32) -> Result<Option<ResourceMetadata>, DbErr> {
        self.read();
        Ok(self.contests.get(&contest_id).cloned())
    }

    async fn topic(&self, topic_id: u32) -> Result<Option<ResourceMetadata>, DbErr> {
        self.read();
        Ok(self.topics.get(&topic_id).cloned())
    }

    async fn contest_problem(&self, contest_id: u32, num: i32) -> Result<Option<u32>, DbErr> {
        self.read();
        Ok(self.contest_problems.get(&(contest_id, num)).copied())
    }

    async fn topic_problem(&self, topic_id: u32, num: i32) -> Result<Option<u32>, DbErr> {
        self.read();
        Ok(self.topic_problems.get(&(topic_id, num)).copied())
    }

    async fn contest_windows_for_problem(
        &self,
        problem_id: u32,
    ) -> Result<Vec<ScheduleWindow>, DbErr> {
        self.read();
        Ok(self
            .contest_problems
            .iter()
            .filter(|(_, mapped)| **mapped == problem_id)
            .filter_map(|((contest_id, _), _)| self.contests.get(contest_id))
            .filter_map(|meta| meta.schedule)
            .collect())
    }

    async fn templates(&self, problem_id: u32, language: u32) -> Result<Vec<Template>, DbErr> {
        self.read();
        Ok(self
            .templates
            .get(&(problem_id, language))
            .cloned()
            .unwrap_or_default())
    }
}

/// Store keeping accepted submissions in memory.
pub struct RecordingStore {
    next_id: AtomicI32,
    fail: bool,
    pub saved: Mutex<Vec<(i32, NewSubmission)>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI32::new(1000),
            fail: false,
            saved: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn saved(&self) -> Vec<(i32, NewSubmission)> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubmissionStore for RecordingStore {
    async fn persist(&self, submission: NewSubmission) -> Result<SubmissionRecord, DbErr> {
        if self.fail {
            return Err(DbErr::Custom("insert failed".into()));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let record = SubmissionRecord {
            solution_id: id,
            custom_input: submission.custom_input.is_some(),
        };
        self.saved.lock().unwrap().push((id, submission));
        Ok(record)
    }
}

#[derive(Debug)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
