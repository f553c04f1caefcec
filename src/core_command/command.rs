use crate::constants::{GET_TOKEN, LIST_TOKEN};
use crate::core_error::{ParseError, SessionError};
use crate::helpers::read_line;
use std::fmt;
use tokio::io::AsyncBufRead;

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Command {
    List,
    Get,
}

impl Command {
    /// Matches the exact wire token; anything else is not a command.
    pub fn from_token(token: &str) -> Option<Command> {
        match token {
            LIST_TOKEN => Some(Command::List),
            GET_TOKEN => Some(Command::Get),
            _ => None,
        }
    }
}

/// A fully parsed control request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    command: Command,
    filename: Option<String>,
    data_port: u16,
}

impl Request {
    pub fn list(data_port: u16) -> Self {
        Self {
            command: Command::List,
            filename: None,
            data_port,
        }
    }

    pub fn get(filename: impl Into<String>, data_port: u16) -> Self {
        Self {
            command: Command::Get,
            filename: Some(filename.into()),
            data_port,
        }
    }

    /// Reads a request off the control connection.
    ///
    /// The command line is read first. `-l` is followed by the data port,
    /// `-g` by the filename and then the data port. An unknown command is
    /// rejected before any further line is consumed.
    pub async fn read_from<R>(reader: &mut R) -> Result<Request, SessionError>
    where
        R: AsyncBufRead + Unpin,
    {
        let line = read_line(reader, "a command").await?;
        let command =
            Command::from_token(&line).ok_or_else(|| ParseError::UnknownCommand(line.clone()))?;

        let request = match command {
            Command::List => {
                let port = read_line(reader, "the data port").await?;
                Request::list(parse_data_port(&port)?)
            }
            Command::Get => {
                let filename = read_line(reader, "the filename").await?;
                let port = read_line(reader, "the data port").await?;
                Request::get(filename, parse_data_port(&port)?)
            }
        };

        Ok(request)
    }

    pub fn command(&self) -> Command {
        self.command
    }

    /// Requested file; `None` for a directory listing.
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn data_port(&self) -> u16 {
        self.data_port
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.filename {
            Some(name) => write!(f, "file {} on data port {}", name, self.data_port),
            None => write!(f, "directory listing on data port {}", self.data_port),
        }
    }
}

/// Parses a data port line. Port 0 is rejected: the client could not know
/// which port the listener ended up on.
pub fn parse_data_port(text: &str) -> Result<u16, ParseError> {
    match text.trim().parse::<u16>() {
        Ok(port) if port != 0 => Ok(port),
        _ => Err(ParseError::InvalidPort(text.to_string())),
    }
}
