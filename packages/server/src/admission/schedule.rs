use chrono::{DateTime, Utc};
use common::SubmissionKind;

use super::error::Rejection;
use super::metadata::MetadataSource;
use super::resolver::Target;

/// Enforce contest timing. Privilege never relaxes these rules.
///
/// - A standalone problem is closed while any contest that includes it has
///   not ended yet, so contest problems cannot leak through the problem set.
/// - A contest submission needs the contest to be running.
/// - Topics have no schedule.
pub async fn check(
    target: &Target,
    now: DateTime<Utc>,
    metadata: &dyn MetadataSource,
) -> Result<(), Rejection> {
    match target {
        Target::Problem { problem, .. } => {
            let windows = metadata
                .contest_windows_for_problem(problem.magnitude())
                .await?;
            if windows.iter().any(|w| !w.has_ended(now)) {
                return Err(Rejection::ProblemInContest);
            }
            Ok(())
        }
        Target::Contest { contest, .. } => {
            let meta = metadata
                .contest(contest.magnitude())
                .await?
                .ok_or(Rejection::NotFound(SubmissionKind::Contest))?;
            match meta.schedule {
                Some(window) if window.admits(now) => Ok(()),
                _ => Err(Rejection::ContestNotStarted),
            }
        }
        Target::Topic { .. } => Ok(()),
    }
}
