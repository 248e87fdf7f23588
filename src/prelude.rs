//! Prelude module for convenient imports.
//!
//! Re-exports the types most code working with treeline needs.
//!
//! # Usage
//!
//! ```ignore
//! use treeline::prelude::*;
//! ```

// Core application types
pub use crate::app::{App, AppEvent};

// Model types
pub use crate::models::{ContainerKind, JsonLine, JsonPrimitive, Key};

// Parse pipeline
pub use crate::flatten::{FlattenOutput, Flattener};
pub use crate::stream::{spawn_file_parser, AckToken, LineBatch, StreamStats};

// Pagination
pub use crate::pager::{Pager, Viewport, LINES_PER_PAGE, MAX_RESIDENT_PAGES};

// Session
pub use crate::session::{Session, SessionStatus};

// Errors
pub use crate::error::{ParseError, ParseErrorKind, TreelineError, TreelineResult};
