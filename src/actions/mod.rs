//! File actions module.
//!
//! This module provides what happens to a reported duplicate:
//! - The path is always printed to stdout, one per line
//! - Then it is kept (`--print`), moved to the trash (`--trash`) or
//!   permanently deleted (default)
//!
//! ```no_run
//! use rmdupes::actions::{DuplicateAction, DuplicateHandler};
//! use std::path::Path;
//!
//! let mut handler = DuplicateHandler::new(DuplicateAction::Print, std::io::stdout());
//! handler.handle(Path::new("/path/to/duplicate.txt")).unwrap();
//! ```

pub mod delete;
pub mod handler;

// Re-export commonly used types
pub use delete::{delete_to_trash, permanent_delete, DeleteError, DeleteResult};
pub use handler::{ActionError, ActionSummary, DuplicateAction, DuplicateHandler};
