use common::SubmissionKind;
use tracing::debug;

use super::error::{Container, Rejection};
use super::identity::SessionCapabilities;
use super::metadata::{MetadataSource, ResourceMetadata, Visibility};
use super::resolver::Target;

/// Decide whether the requester may submit to the resolved target.
pub async fn authorize(
    target: &Target,
    caps: &SessionCapabilities,
    metadata: &dyn MetadataSource,
) -> Result<(), Rejection> {
    match target {
        Target::Problem {
            problem,
            metadata: meta,
        } => authorize_problem(problem.magnitude(), meta, caps),
        Target::Contest { contest, .. } => {
            let id = contest.magnitude();
            if caps.bypasses_contest(id) {
                debug!(contest_id = id, "contest privilege shortcut");
                return Ok(());
            }
            let meta = metadata
                .contest(id)
                .await?
                .ok_or(Rejection::NotFound(SubmissionKind::Contest))?;
            authorize_container(Container::Contest, &meta)
        }
        Target::Topic { topic, .. } => {
            let id = topic.magnitude();
            if caps.bypasses_topic(id) {
                debug!(topic_id = id, "topic privilege shortcut");
                return Ok(());
            }
            let meta = metadata
                .topic(id)
                .await?
                .ok_or(Rejection::NotFound(SubmissionKind::Topic))?;
            authorize_container(Container::Topic, &meta)
        }
    }
}

fn authorize_problem(
    problem_id: u32,
    meta: &ResourceMetadata,
    caps: &SessionCapabilities,
) -> Result<(), Rejection> {
    match meta.visibility {
        Visibility::Public => Ok(()),
        Visibility::Private if caps.can_submit_private_problem(problem_id) => Ok(()),
        Visibility::Private => Err(Rejection::NoPrivilege(SubmissionKind::Problem)),
    }
}

/// Visitor path for contests and topics. A retired container rejects even
/// when it is public.
fn authorize_container(container: Container, meta: &ResourceMetadata) -> Result<(), Rejection> {
    if meta.defunct {
        return Err(Rejection::Defunct(container));
    }
    match (meta.visibility, container) {
        (Visibility::Public, _) => Ok(()),
        (Visibility::Private, Container::Contest) => {
            Err(Rejection::NoPrivilege(SubmissionKind::Contest))
        }
        (Visibility::Private, Container::Topic) => {
            Err(Rejection::NoPrivilege(SubmissionKind::Topic))
        }
    }
}
