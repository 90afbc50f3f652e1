pub mod judger;
pub mod langmask;
pub mod resource_id;
pub mod submission_kind;

pub use langmask::LangMask;
pub use resource_id::ResourceId;
pub use submission_kind::SubmissionKind;
