//! Orchestration services for requests, expiry, intake and chat.

mod chat;
mod error;
mod intake;
mod lifecycle;
mod reaper;

pub use chat::{ChatService, ChatServiceError, ChatServiceResult};
pub use error::{LifecycleError, LifecycleResult};
pub use intake::{IntakeError, IntakeResult, RequestIntakeService, SubmissionOutcome, SubmitServiceRequest};
pub use lifecycle::RequestLifecycleService;
pub use reaper::ExpiryReaper;
