// Requests understood on the control connection and their outcomes
pub mod command;
pub mod outcome;

pub use command::{Command, Request};
pub use outcome::TransferOutcome;
