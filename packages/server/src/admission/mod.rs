//! Submission admission: resolve the addressed problem, check who may submit
//! and when, then record the submission.

pub mod cache;
pub mod clock;
pub mod error;
pub mod identity;
pub mod language;
pub mod metadata;
pub mod persist;
pub mod pipeline;
pub mod privilege;
pub mod request;
pub mod resolver;
pub mod schedule;
pub mod transform;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{ErrorKind, Rejection};
pub use identity::SessionCapabilities;
pub use pipeline::{AdmissionPipeline, RequestContext};
