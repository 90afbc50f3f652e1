use common::langmask::allowed;
use common::{LangMask, SubmissionKind};

use super::error::Rejection;
use super::metadata::MetadataSource;
use super::resolver::Target;

/// Mask governing the target: the container's own mask when it defines one,
/// the configured default otherwise.
pub async fn effective_mask(
    target: &Target,
    metadata: &dyn MetadataSource,
    default: LangMask,
) -> Result<LangMask, Rejection> {
    let scoped = match target {
        Target::Problem { .. } => return Ok(default),
        Target::Contest { contest, .. } => metadata
            .contest(contest.magnitude())
            .await?
            .ok_or(Rejection::NotFound(SubmissionKind::Contest))?,
        Target::Topic { topic, .. } => metadata
            .topic(topic.magnitude())
            .await?
            .ok_or(Rejection::NotFound(SubmissionKind::Topic))?,
    };
    Ok(scoped.langmask.unwrap_or(default))
}

/// Validate the requested language and return it as a mask index.
pub fn check(language: i64, mask: LangMask, kind: SubmissionKind) -> Result<u32, Rejection> {
    u32::try_from(language)
        .ok()
        .filter(|&index| allowed(index, mask))
        .ok_or(Rejection::LanguageNotAllowed(kind))
}
