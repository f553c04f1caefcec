use crate::constants::{FILE_NOT_FOUND_REPLY, INVALID_COMMAND_REPLY};

/// Result of one request, as seen by the control connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOutcome {
    Success,
    FileNotFound,
    InvalidCommand,
}

impl TransferOutcome {
    /// The closing line for the control connection, if the outcome needs one.
    pub fn control_reply(&self) -> Option<&'static str> {
        match self {
            TransferOutcome::Success => None,
            TransferOutcome::FileNotFound => Some(FILE_NOT_FOUND_REPLY),
            TransferOutcome::InvalidCommand => Some(INVALID_COMMAND_REPLY),
        }
    }
}
