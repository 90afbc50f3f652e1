use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;

use tracing::{debug, error, info, instrument};

use super::clock::Clock;
use super::error::Rejection;
use super::identity::SessionCapabilities;
use super::metadata::MetadataSource;
use super::persist::{self, NewSubmission, Placement, SubmissionRecord, SubmissionStore};
use super::request::SubmissionRequest;
use super::resolver::{self, Target};
use super::{language, privilege, schedule, transform};
use crate::config::SubmissionConfig;

/// Progress of one submission through admission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Received,
    TypeClassified,
    Resolved,
    Authorized,
    ScheduleChecked,
    MaskChecked,
    Transformed,
    Persisted,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Received => "received",
            Stage::TypeClassified => "type_classified",
            Stage::Resolved => "resolved",
            Stage::Authorized => "authorized",
            Stage::ScheduleChecked => "schedule_checked",
            Stage::MaskChecked => "mask_checked",
            Stage::Transformed => "transformed",
            Stage::Persisted => "persisted",
        };
        f.write_str(name)
    }
}

/// Who is submitting and from where.
#[derive(Clone, Copy, Debug)]
pub struct RequestContext<'a> {
    pub user_id: i32,
    pub caps: &'a SessionCapabilities,
    pub forwarded_for: Option<&'a str>,
    pub remote_addr: Option<IpAddr>,
}

/// Sequences the admission stages for every submission kind.
pub struct AdmissionPipeline {
    metadata: Arc<dyn MetadataSource>,
    store: Arc<dyn SubmissionStore>,
    clock: Arc<dyn Clock>,
    config: SubmissionConfig,
}

impl AdmissionPipeline {
    pub fn new(
        metadata: Arc<dyn MetadataSource>,
        store: Arc<dyn SubmissionStore>,
        clock: Arc<dyn Clock>,
        config: SubmissionConfig,
    ) -> Self {
        Self {
            metadata,
            store,
            clock,
            config,
        }
    }

    /// Run a classified request through every stage and persist it.
    ///
    /// Stops at the first stage that rejects. Nothing is written unless all
    /// checks passed.
    #[instrument(
        skip(self, ctx, request),
        fields(user_id = ctx.user_id, kind = %request.kind(), language = request.language)
    )]
    pub async fn submit(
        &self,
        ctx: RequestContext<'_>,
        request: SubmissionRequest,
    ) -> Result<SubmissionRecord, Rejection> {
        let outcome = self.run(ctx, request).await;
        match &outcome {
            Ok(record) => info!(solution_id = record.solution_id, "submission admitted"),
            Err(Rejection::Storage(detail)) => {
                error!(detail = %detail, "failed to persist submission");
            }
            Err(rejection) => info!(
                code = rejection.code(),
                reason = %rejection,
                "submission rejected"
            ),
        }
        outcome
    }

    async fn run(
        &self,
        ctx: RequestContext<'_>,
        request: SubmissionRequest,
    ) -> Result<SubmissionRecord, Rejection> {
        let metadata = self.metadata.as_ref();
        advance(Stage::TypeClassified);

        let target = resolver::resolve(&request.address, metadata).await?;
        debug!(problem = %target.problem(), "resolved target");
        advance(Stage::Resolved);

        privilege::authorize(&target, ctx.caps, metadata)
            .await
            .inspect_err(|rejection| {
                if let Rejection::Defunct(container) = rejection {
                    info!(container = container.as_str(), "retired container");
                }
            })?;
        advance(Stage::Authorized);

        schedule::check(&target, self.clock.now(), metadata).await?;
        advance(Stage::ScheduleChecked);

        let mask =
            language::effective_mask(&target, metadata, self.config.default_mask()).await?;
        debug!(mask = %mask, "effective language mask");
        let language = language::check(request.language, mask, target.kind())?;
        advance(Stage::MaskChecked);

        let problem = target.problem();
        let source =
            transform::transform(problem.magnitude(), language, &request.source, metadata)
                .await?;
        advance(Stage::Transformed);

        let submission = build_submission(&ctx, &target, request, language, source);
        let record = self.store.persist(submission).await?;
        advance(Stage::Persisted);

        Ok(record)
    }

    /// Classify a raw body and admit it.
    pub async fn submit_raw(
        &self,
        ctx: RequestContext<'_>,
        body: crate::models::submission::SubmitRequest,
    ) -> Result<SubmissionRecord, Rejection> {
        advance(Stage::Received);
        let request = SubmissionRequest::classify(body, self.config.max_source_size)
            .inspect_err(|rejection| info!(reason = %rejection, "submission rejected"))?;
        self.submit(ctx, request).await
    }
}

fn advance(stage: Stage) {
    debug!(%stage, "admission stage");
}

fn build_submission(
    ctx: &RequestContext<'_>,
    target: &Target,
    request: SubmissionRequest,
    language: u32,
    source: String,
) -> NewSubmission {
    let (placement, share) = match target {
        Target::Problem { .. } => (Placement::Standalone, Some(request.share)),
        Target::Contest { contest, num, .. } => (
            Placement::Contest {
                contest_id: contest.row_id(),
                num: *num,
            },
            None,
        ),
        Target::Topic { topic, num, .. } => (
            Placement::Topic {
                topic_id: topic.row_id(),
                num: *num,
            },
            None,
        ),
    };

    let problem = target.problem();
    let custom_input = problem
        .is_instanced()
        .then(|| request.input_text.unwrap_or_default());

    NewSubmission {
        problem,
        user_id: ctx.user_id,
        language,
        ip: persist::client_ip(ctx.forwarded_for, ctx.remote_addr),
        code_length: persist::code_length(&request.source),
        share,
        placement,
        fingerprint: request.fingerprint,
        user_source: request.source,
        source,
        custom_input,
    }
}
