//! Tournament API access: submission transport, errors and admin sessions

mod client;
mod error;
mod session;
mod traits;

pub use client::{HttpSubmitter, DEFAULT_API_URL};
pub use error::SubmissionError;
pub use session::Session;
pub use traits::{ModuleStatus, SubmissionRequest, SubmitReceipt, Submitter};

#[cfg(test)]
pub use traits::MockSubmitter;
