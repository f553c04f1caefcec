// src/constants.rs

/// Wire token requesting a directory listing.
pub const LIST_TOKEN: &str = "-l";
/// Wire token requesting a file.
pub const GET_TOKEN: &str = "-g";

pub const ACK_REPLY: &str = "1";
pub const INVALID_COMMAND_REPLY: &str = "Invalid Command Received";
pub const FILE_NOT_FOUND_REPLY: &str = "File Not Found";

/// Size line sent on the data connection when the requested file is unavailable.
pub const NOT_FOUND_SIZE: &str = "0";

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_ROOT_DIR: &str = ".";
pub const DEFAULT_DOWNLOAD_BUFFER_SIZE: usize = 128 * 1024;
