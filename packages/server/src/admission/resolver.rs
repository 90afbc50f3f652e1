use common::{ResourceId, SubmissionKind};

use super::error::{Container, Rejection};
use super::metadata::{MetadataSource, ResourceMetadata};
use super::request::Address;
use crate::models::submission::RawInt;

/// Concrete resource a submission was resolved to.
///
/// `problem` carries the instanced mark that gets persisted: for scoped
/// submissions it comes from the container id, not from the mapping row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    Problem {
        problem: ResourceId,
        metadata: ResourceMetadata,
    },
    Contest {
        contest: ResourceId,
        num: i32,
        problem: ResourceId,
    },
    Topic {
        topic: ResourceId,
        num: i32,
        problem: ResourceId,
    },
}

impl Target {
    pub fn kind(&self) -> SubmissionKind {
        match self {
            Target::Problem { .. } => SubmissionKind::Problem,
            Target::Contest { .. } => SubmissionKind::Contest,
            Target::Topic { .. } => SubmissionKind::Topic,
        }
    }

    pub fn problem(&self) -> ResourceId {
        match self {
            Target::Problem { problem, .. }
            | Target::Contest { problem, .. }
            | Target::Topic { problem, .. } => *problem,
        }
    }

    pub fn is_instanced(&self) -> bool {
        self.problem().is_instanced()
    }
}

pub async fn resolve(address: &Address, metadata: &dyn MetadataSource) -> Result<Target, Rejection> {
    match address {
        Address::Problem { id } => resolve_standalone(id.as_ref(), metadata).await,
        Address::Contest { cid, pid } => {
            resolve_contest_scoped(cid.as_ref(), pid.as_ref(), metadata).await
        }
        Address::Topic { tid, pid } => {
            resolve_topic_scoped(tid.as_ref(), pid.as_ref(), metadata).await
        }
    }
}

pub async fn resolve_standalone(
    raw_id: Option<&RawInt>,
    metadata: &dyn MetadataSource,
) -> Result<Target, Rejection> {
    let problem = raw_id
        .and_then(|raw| raw.to_resource_id().ok())
        .ok_or_else(|| Rejection::invalid("Problem ID is not valid"))?;

    let meta = metadata
        .problem(problem.magnitude())
        .await?
        .ok_or(Rejection::NotFound(SubmissionKind::Problem))?;

    Ok(Target::Problem {
        problem,
        metadata: meta,
    })
}

pub async fn resolve_contest_scoped(
    raw_contest_id: Option<&RawInt>,
    raw_num: Option<&RawInt>,
    metadata: &dyn MetadataSource,
) -> Result<Target, Rejection> {
    let (contest, num) = parse_scoped(raw_contest_id, raw_num)
        .ok_or_else(|| Rejection::invalid("Invalid contest_id or pid"))?;

    let problem_id = metadata
        .contest_problem(contest.magnitude(), num)
        .await?
        .ok_or(Rejection::NotInContainer(Container::Contest))?;

    Ok(Target::Contest {
        contest,
        num,
        problem: scoped_problem(problem_id, contest)?,
    })
}

pub async fn resolve_topic_scoped(
    raw_topic_id: Option<&RawInt>,
    raw_num: Option<&RawInt>,
    metadata: &dyn MetadataSource,
) -> Result<Target, Rejection> {
    let (topic, num) = parse_scoped(raw_topic_id, raw_num)
        .ok_or_else(|| Rejection::invalid("Invalid topic_id or pid"))?;

    let problem_id = metadata
        .topic_problem(topic.magnitude(), num)
        .await?
        .ok_or(Rejection::NotInContainer(Container::Topic))?;

    Ok(Target::Topic {
        topic,
        num,
        problem: scoped_problem(problem_id, topic)?,
    })
}

fn parse_scoped(
    raw_container: Option<&RawInt>,
    raw_num: Option<&RawInt>,
) -> Option<(ResourceId, i32)> {
    let container = raw_container?.to_resource_id().ok()?;
    let num = raw_num?.to_i32()?;
    Some((container, num))
}

fn scoped_problem(problem_id: u32, container: ResourceId) -> Result<ResourceId, Rejection> {
    let problem = ResourceId::plain(problem_id)
        .map_err(|e| Rejection::Storage(format!("mapped problem id: {e}")))?;
    Ok(problem.with_instanced_from(container))
}
