pub mod error;

pub use error::{ParseError, SessionError};
