//! Shared domain models for the Pressline catalog

mod release;
mod requester;
mod track;

pub use release::{Release, ReleaseStatus, ReleaseUpdate, StatusTransition};
pub use requester::{Requester, Role};
pub use track::Track;
