use axum::Json;
use axum::extract::{DefaultBodyLimit, State};
use tracing::instrument;

use crate::admission::RequestContext;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::Requester;
use crate::extractors::client::ClientAddr;
use crate::extractors::json::AppJson;
use crate::models::submission::{SubmitAccepted, SubmitRequest};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Submissions",
    operation_id = "submit",
    summary = "Submit a solution",
    description = "Admits a submission to a standalone problem, a contest problem or a topic problem. \
        The addressed problem is resolved, the requester's privileges, the contest schedule and the \
        language mask are checked, templates are applied and the submission is recorded for judging.",
    request_body = SubmitRequest,
    responses(
        (status = 200, description = "Submission recorded", body = SubmitAccepted),
        (status = 400, description = "Malformed request or language not allowed (INVALID_REQUEST, LANGUAGE_NOT_ALLOWED)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not allowed now or at all (NO_PRIVILEGE, SCHEDULE_VIOLATION)", body = ErrorBody),
        (status = 404, description = "Unknown resource (NOT_FOUND, NOT_IN_CONTAINER)", body = ErrorBody),
        (status = 500, description = "Submission could not be stored (PERSISTENCE_FAILURE)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(
    skip(state, requester, client, payload),
    fields(user_id = requester.user_id, username = %requester.username)
)]
pub async fn submit(
    requester: Requester,
    client: ClientAddr,
    State(state): State<AppState>,
    AppJson(payload): AppJson<SubmitRequest>,
) -> Result<Json<SubmitAccepted>, AppError> {
    let ctx = RequestContext {
        user_id: requester.user_id,
        caps: &requester.caps,
        forwarded_for: client.forwarded_for.as_deref(),
        remote_addr: client.remote_addr,
    };

    let record = state.pipeline.submit_raw(ctx, payload).await?;

    Ok(Json(SubmitAccepted::new(record.solution_id)))
}

/// Body limit for the submit route. JSON escaping can double the size of the
/// source, and the rest of the body needs some room too.
pub fn submission_body_limit(max_source_size: usize) -> DefaultBodyLimit {
    DefaultBodyLimit::max(max_source_size.saturating_mul(2).saturating_add(4096))
}
