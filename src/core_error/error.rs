// Error taxonomy for a single control session
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Unknown command token: {0:?}")]
    UnknownCommand(String),

    #[error("Invalid data port: {0:?}")]
    InvalidPort(String),
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Failed to bind data port {port}: {source}")]
    Bind {
        port: u16,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl SessionError {
    pub fn unexpected_eof(what: &str) -> Self {
        SessionError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("client closed the connection before sending {}", what),
        ))
    }
}
