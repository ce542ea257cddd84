//! Gates and read-side services around the release lifecycle

pub mod catalog;
pub mod review;
pub mod submission;

pub use catalog::CatalogService;
pub use review::{ReviewDecision, ReviewGate};
pub use submission::{SubmissionGate, SubmissionReceipt};
