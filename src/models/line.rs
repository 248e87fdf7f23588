//! Display line types.
//!
//! A parsed JSON document is presented as a flat, append-only sequence of
//! [`JsonLine`] values. Each line carries its zero-based nesting level and
//! enough information to render one row of the tree view: container
//! delimiters, key/value pairs, a terminal error, or a loading skeleton.

use std::fmt;

/// The two JSON container kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Array,
    Object,
}

impl ContainerKind {
    /// Opening delimiter character for this container.
    pub fn open_delimiter(&self) -> char {
        match self {
            ContainerKind::Array => '[',
            ContainerKind::Object => '{',
        }
    }

    /// Closing delimiter character for this container.
    pub fn close_delimiter(&self) -> char {
        match self {
            ContainerKind::Array => ']',
            ContainerKind::Object => '}',
        }
    }
}

/// The key attached to a line.
///
/// Object members carry a named key, array elements carry their implicit
/// index, and the document root carries no key at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// Explicit object member key.
    Name(String),
    /// Implicit array index, tracked per open-array frame.
    Index(u64),
    /// No key (document root, or an empty object key).
    None,
}

impl Key {
    /// Whether this key produces visible text when rendered.
    pub fn is_present(&self) -> bool {
        !matches!(self, Key::None)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Name(name) => write!(f, "{}", name),
            Key::Index(index) => write!(f, "{}", index),
            Key::None => Ok(()),
        }
    }
}

/// A JSON scalar value.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonPrimitive {
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
}

impl fmt::Display for JsonPrimitive {
    /// Renders the primitive as it should appear on screen. String values
    /// carry literal quotes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonPrimitive::Null => write!(f, "null"),
            JsonPrimitive::Bool(b) => write!(f, "{}", b),
            JsonPrimitive::Number(n) => write!(f, "{}", n),
            JsonPrimitive::Str(s) => write!(f, "\"{}\"", s),
        }
    }
}

/// One flattened, renderable unit of the JSON tree.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonLine {
    /// A container opens. Emitted only when the container is keyed or is an
    /// element of an array; the bare object root stays invisible.
    Open {
        kind: ContainerKind,
        level: u16,
        key: Key,
    },
    /// A container closes. Emitted for arrays only; objects close silently.
    Close { kind: ContainerKind, level: u16 },
    /// A leaf key/value pair.
    Property {
        level: u16,
        key: Key,
        value: JsonPrimitive,
    },
    /// Terminal line signaling malformed input.
    Error { level: u16, message: String },
    /// Synthetic skeleton line shown while a page's content is unknown.
    /// `width_pct` is the bar width as a percentage of the content column.
    Placeholder { level: u16, width_pct: u8 },
}

impl JsonLine {
    /// Nesting level of this line.
    pub fn level(&self) -> u16 {
        match self {
            JsonLine::Open { level, .. }
            | JsonLine::Close { level, .. }
            | JsonLine::Property { level, .. }
            | JsonLine::Error { level, .. }
            | JsonLine::Placeholder { level, .. } => *level,
        }
    }
}
