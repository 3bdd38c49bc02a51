//! CLI commands implementation

pub mod acquire;
pub mod collection;
pub mod fixtures;
pub mod ingest;
pub mod init;
pub mod search;
pub mod show;
pub mod status;

pub use acquire::*;
pub use collection::*;
pub use fixtures::*;
pub use ingest::*;
pub use init::*;
pub use search::*;
pub use show::*;
pub use status::*;
