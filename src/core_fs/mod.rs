// Read-only view of the served directory
pub mod lister;
pub mod reader;

pub use lister::list_regular_files;
pub use reader::open_file;
