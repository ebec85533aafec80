pub mod planner;
pub mod prompt;
pub mod session;

pub use crate::domain::model::{GenerationOutcome, TripRequest};
pub use crate::domain::ports::{ChatModel, Storage};
pub use crate::utils::error::Result;
