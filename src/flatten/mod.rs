//! Token-to-line flattener.
//!
//! Converts the tokenizer's hierarchical callbacks into the flat sequence of
//! [`JsonLine`] values the pager consumes. The display policy is inherited
//! from the original viewer:
//!
//! - a container line is emitted only when it has a named key or sits inside
//!   an array, so the bare object root stays invisible;
//! - objects close silently while arrays emit a close line;
//! - array elements are keyed by a per-frame index counter;
//! - string values carry literal quotes when rendered.
//!
//! The output buffer is reset on every call, so a `Flattener` never holds
//! more than one chunk's worth of lines.

use crate::error::ParseError;
use crate::models::{ContainerKind, JsonLine, JsonPrimitive, Key};
use crate::tokenizer::{JsonSink, TokenError, Tokenizer};

/// Lines produced by one `convert_chunk`/`end` call, plus the classified
/// error if the chunk ended the stream.
#[derive(Debug)]
pub struct FlattenOutput {
    pub lines: Vec<JsonLine>,
    pub error: Option<ParseError>,
}

/// Stateful converter from parse events to display lines.
pub struct Flattener {
    tokenizer: Tokenizer,
    state: FlattenState,
}

/// The sink half, separated from the tokenizer so both can be borrowed at
/// once during a feed.
#[derive(Default)]
struct FlattenState {
    /// Current depth; -1 until the root container opens, so children of the
    /// hidden root land at level 0.
    depth: i32,
    path: Vec<ContainerKind>,
    array_indexes: Vec<u64>,
    pending_key: Option<String>,
    buffer: Vec<JsonLine>,
}

impl FlattenState {
    fn new() -> Self {
        Self {
            depth: -1,
            ..Self::default()
        }
    }

    fn level(&self) -> u16 {
        // saturate rather than wrap at absurd nesting depth
        u16::try_from(self.depth.max(0)).unwrap_or(u16::MAX)
    }

    /// The effective key for the next value or container: the pending object
    /// key if one is set, otherwise the enclosing array's next index.
    fn take_key(&mut self) -> Key {
        if let Some(name) = self.pending_key.take() {
            if !name.is_empty() {
                return Key::Name(name);
            }
            // an empty object key falls through to the index fallback,
            // matching the source display convention
        }
        if let Some(next) = self.array_indexes.last_mut() {
            let index = *next;
            *next += 1;
            return Key::Index(index);
        }
        Key::None
    }

    fn open(&mut self, kind: ContainerKind) {
        let key = self.take_key();
        let parent_is_array = self.path.last() == Some(&ContainerKind::Array);
        if matches!(key, Key::Name(_)) || parent_is_array {
            self.buffer.push(JsonLine::Open {
                kind,
                level: self.level(),
                key,
            });
        }
        self.depth += 1;
        self.path.push(kind);
        if kind == ContainerKind::Array {
            self.array_indexes.push(0);
        }
    }

    fn close(&mut self) {
        self.depth -= 1;
        let Some(kind) = self.path.pop() else {
            // a close without an open is caught by the tokenizer first
            return;
        };
        if kind == ContainerKind::Array {
            self.array_indexes.pop();
            self.buffer.push(JsonLine::Close {
                kind: ContainerKind::Array,
                level: self.level(),
            });
        }
    }
}

impl JsonSink for FlattenState {
    fn open_array(&mut self) {
        self.open(ContainerKind::Array);
    }

    fn open_object(&mut self) {
        self.open(ContainerKind::Object);
    }

    fn close_array(&mut self) {
        self.close();
    }

    fn close_object(&mut self) {
        self.close();
    }

    fn key(&mut self, key: String) {
        self.pending_key = Some(key);
    }

    fn value(&mut self, value: JsonPrimitive) {
        let key = self.take_key();
        self.buffer.push(JsonLine::Property {
            level: self.level(),
            key,
            value,
        });
    }
}

impl Default for Flattener {
    fn default() -> Self {
        Self::new()
    }
}

impl Flattener {
    pub fn new() -> Self {
        Self {
            tokenizer: Tokenizer::new(),
            state: FlattenState::new(),
        }
    }

    /// Feed one chunk of bytes and collect the lines it produced.
    ///
    /// A tokenizer error is translated into a terminal error line plus a
    /// classified [`ParseError`]; it never escapes in raw form.
    pub fn convert_chunk(&mut self, bytes: &[u8]) -> FlattenOutput {
        self.state.buffer.clear();
        let error = self
            .tokenizer
            .feed(bytes, &mut self.state)
            .err()
            .map(|e| self.capture_error(e));
        FlattenOutput {
            lines: std::mem::take(&mut self.state.buffer),
            error,
        }
    }

    /// Signal end-of-input, surfacing truncation errors as a final line.
    pub fn end(&mut self) -> FlattenOutput {
        self.state.buffer.clear();
        let error = self
            .tokenizer
            .end(&mut self.state)
            .err()
            .map(|e| self.capture_error(e));
        FlattenOutput {
            lines: std::mem::take(&mut self.state.buffer),
            error,
        }
    }

    /// Classify a tokenizer error and append the matching error line.
    fn capture_error(&mut self, e: TokenError) -> ParseError {
        let error = classify(&e);
        self.state.buffer.push(JsonLine::Error {
            level: self.state.level(),
            message: error.message.clone(),
        });
        error
    }
}

/// An error at byte offset 0 means the input is not JSON at all; anything
/// else is a structural violation with position detail.
fn classify(e: &TokenError) -> ParseError {
    if e.pos() == 0 {
        return ParseError::invalid_file();
    }
    match e {
        TokenError::Unexpected {
            found,
            line,
            col,
            context,
            expected,
            ..
        } => {
            let shown = if *found == '\n' {
                "\\n".to_string()
            } else {
                found.to_string()
            };
            ParseError::unexpected(format!(
                "Unexpected token \"{}\" {} at line {}, column {}. Expected: {}",
                shown,
                context,
                line,
                col,
                expected.join(", ")
            ))
        }
        TokenError::UnexpectedEnd {
            line, col, context, ..
        } => ParseError::unexpected(format!(
            "Unexpected end of input at line {}, column {}. {}",
            line, col, context
        )),
    }
}
