use common::SubmissionKind;
use sea_orm::DbErr;

/// Container a scoped submission addresses its problem through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Container {
    Contest,
    Topic,
}

impl Container {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contest => "contest",
            Self::Topic => "topic",
        }
    }

    fn privilege_statement(&self) -> &'static str {
        match self {
            Self::Contest => "You don't have privilege to access this contest problem",
            Self::Topic => "You don't have privilege to access this topic",
        }
    }
}

/// Coarse classification of a rejection, independent of its wording.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidRequest,
    ResourceNotFound,
    NotInContainer,
    NoPrivilege,
    ScheduleViolation,
    LanguageNotAllowed,
    PersistenceFailure,
}

/// Terminal outcome of a submission that was not admitted.
///
/// The `Display` text is the statement shown to the submitter, except for
/// storage failures whose detail is only logged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("{} is not exist", .0.as_str())]
    NotFound(SubmissionKind),

    #[error("problem is not in {}", .0.as_str())]
    NotInContainer(Container),

    #[error("{}", privilege_statement(.0))]
    NoPrivilege(SubmissionKind),

    /// The contest or topic is retired. Shares the statement and code of
    /// `NoPrivilege`; only logs tell the two apart.
    #[error("{}", .0.privilege_statement())]
    Defunct(Container),

    #[error("problem is in current or future contest.")]
    ProblemInContest,

    /// Outside the contest window, before the start or after the end.
    #[error("Contest is not start")]
    ContestNotStarted,

    #[error("{}", language_statement(.0))]
    LanguageNotAllowed(SubmissionKind),

    #[error("database error: {0}")]
    Storage(String),
}

fn privilege_statement(kind: &SubmissionKind) -> &'static str {
    match kind {
        SubmissionKind::Problem => "You don't have privilege to access this problem",
        SubmissionKind::Contest => Container::Contest.privilege_statement(),
        SubmissionKind::Topic => Container::Topic.privilege_statement(),
    }
}

fn language_statement(kind: &SubmissionKind) -> &'static str {
    match kind {
        SubmissionKind::Problem => "Your language is not valid",
        SubmissionKind::Contest | SubmissionKind::Topic => "Your submission's language is invalid",
    }
}

impl Rejection {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidRequest(_) => ErrorKind::InvalidRequest,
            Self::NotFound(_) => ErrorKind::ResourceNotFound,
            Self::NotInContainer(_) => ErrorKind::NotInContainer,
            Self::NoPrivilege(_) | Self::Defunct(_) => ErrorKind::NoPrivilege,
            Self::ProblemInContest | Self::ContestNotStarted => ErrorKind::ScheduleViolation,
            Self::LanguageNotAllowed(_) => ErrorKind::LanguageNotAllowed,
            Self::Storage(_) => ErrorKind::PersistenceFailure,
        }
    }

    /// Machine-readable code included in error bodies.
    pub fn code(&self) -> &'static str {
        match self.kind() {
            ErrorKind::InvalidRequest => "INVALID_REQUEST",
            ErrorKind::ResourceNotFound => "NOT_FOUND",
            ErrorKind::NotInContainer => "NOT_IN_CONTAINER",
            ErrorKind::NoPrivilege => "NO_PRIVILEGE",
            ErrorKind::ScheduleViolation => "SCHEDULE_VIOLATION",
            ErrorKind::LanguageNotAllowed => "LANGUAGE_NOT_ALLOWED",
            ErrorKind::PersistenceFailure => "PERSISTENCE_FAILURE",
        }
    }

    /// User-displayable statement.
    pub fn statement(&self) -> String {
        match self {
            Self::Storage(_) => "database error".into(),
            other => other.to_string(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }
}

impl From<DbErr> for Rejection {
    fn from(err: DbErr) -> Self {
        Rejection::Storage(err.to_string())
    }
}
