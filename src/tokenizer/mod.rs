//! Incremental push-style JSON tokenizer.
//!
//! The tokenizer consumes raw bytes one chunk at a time and drives a
//! [`JsonSink`] with structural callbacks as soon as tokens complete. It is
//! safe to split the input at any byte boundary: strings, escapes, numbers,
//! literals and multi-byte UTF-8 sequences may all straddle chunks.
//!
//! Errors carry the byte offset, line/column position (counted per code
//! point) and the set of tokens that would have been acceptable, so callers
//! can produce a precise message.

use crate::models::JsonPrimitive;

/// Callback contract driven by the tokenizer.
///
/// Any conforming implementation is substitutable; the flattener is the only
/// consumer in this crate.
pub trait JsonSink {
    fn open_array(&mut self);
    fn open_object(&mut self);
    fn close_array(&mut self);
    fn close_object(&mut self);
    fn key(&mut self, key: String);
    fn value(&mut self, value: JsonPrimitive);
}

/// A structural error reported by the tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenError {
    /// An unacceptable byte was encountered.
    Unexpected {
        found: char,
        pos: u64,
        line: u32,
        col: u32,
        context: &'static str,
        expected: &'static [&'static str],
    },
    /// The input ended while more was required.
    UnexpectedEnd {
        pos: u64,
        line: u32,
        col: u32,
        context: &'static str,
        expected: &'static [&'static str],
    },
}

impl TokenError {
    /// Byte offset at which the error was detected.
    pub fn pos(&self) -> u64 {
        match self {
            TokenError::Unexpected { pos, .. } | TokenError::UnexpectedEnd { pos, .. } => *pos,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Array,
    Object,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Expecting the start of a value.
    Value,
    /// Just after `[`: a value or an immediate `]`.
    ArrayFirst,
    /// Just after `{`: a key string or an immediate `}`.
    ObjectFirst,
    /// After `,` inside an object: a key string is required.
    ObjectKey,
    /// After a key string: `:` is required.
    Colon,
    /// After a complete value inside a container.
    AfterValue,
    /// The root value is complete; only whitespace may follow.
    Done,
    /// Inside a string (key or value, per `in_key`).
    Str,
    /// Inside a string, after a backslash.
    StrEscape,
    /// Inside a `\uXXXX` escape; `unicode_rem` digits remain.
    StrUnicode,
    /// Inside a number token.
    Num,
    /// Inside a `true`/`false`/`null` literal.
    Lit,
}

const EXPECTED_VALUE: &[&str] = &["a JSON value"];
const EXPECTED_KEY_OR_CLOSE: &[&str] = &["\"", "}"];
const EXPECTED_KEY: &[&str] = &["\""];
const EXPECTED_COLON: &[&str] = &[":"];
const EXPECTED_COMMA_OR_CLOSE: &[&str] = &[",", "]", "}"];
const EXPECTED_EOF: &[&str] = &["end of input"];
const EXPECTED_STRING_CHAR: &[&str] = &["a string character", "\"", "\\"];
const EXPECTED_ESCAPE: &[&str] = &["\"", "\\", "/", "b", "f", "n", "r", "t", "u"];
const EXPECTED_HEX: &[&str] = &["a hex digit"];

/// Incremental JSON tokenizer state.
#[derive(Debug)]
pub struct Tokenizer {
    state: State,
    stack: Vec<Container>,
    /// Raw bytes of the string currently being scanned.
    scratch: Vec<u8>,
    in_key: bool,
    unicode_acc: u32,
    unicode_rem: u8,
    pending_high_surrogate: Option<u16>,
    num_buf: String,
    lit_text: &'static str,
    lit_matched: usize,
    /// Position where the current token started, for token-level errors.
    token_start: Position,
    position: Position,
    failed: bool,
}

#[derive(Debug, Clone, Copy)]
struct Position {
    pos: u64,
    line: u32,
    col: u32,
}

impl Position {
    fn origin() -> Self {
        Self {
            pos: 0,
            line: 1,
            col: 1,
        }
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    pub fn new() -> Self {
        Self {
            state: State::Value,
            stack: Vec::new(),
            scratch: Vec::new(),
            in_key: false,
            unicode_acc: 0,
            unicode_rem: 0,
            pending_high_surrogate: None,
            num_buf: String::new(),
            lit_text: "",
            lit_matched: 0,
            token_start: Position::origin(),
            position: Position::origin(),
            failed: false,
        }
    }

    /// Feed one chunk of bytes, invoking `sink` for every completed token.
    ///
    /// After an error the tokenizer is poisoned; further feeds are no-ops.
    pub fn feed<S: JsonSink>(&mut self, bytes: &[u8], sink: &mut S) -> Result<(), TokenError> {
        if self.failed {
            return Ok(());
        }
        let mut i = 0;
        while i < bytes.len() {
            let b = bytes[i];
            match self.step(b, sink) {
                Ok(consumed) => {
                    if consumed {
                        self.advance(b);
                        i += 1;
                    }
                }
                Err(e) => {
                    self.failed = true;
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    /// Signal end-of-input. Completes a trailing root number, then verifies
    /// the document finished cleanly.
    pub fn end<S: JsonSink>(&mut self, sink: &mut S) -> Result<(), TokenError> {
        if self.failed {
            return Ok(());
        }
        if self.state == State::Num {
            if let Err(e) = self.finish_number(sink) {
                self.failed = true;
                return Err(e);
            }
        }
        if self.state == State::Done {
            return Ok(());
        }
        let context = match self.state {
            State::Value | State::ArrayFirst => "while expecting a value",
            State::ObjectFirst | State::ObjectKey => "while expecting an object key",
            State::Colon => "while expecting ':'",
            State::AfterValue => "inside an unclosed container",
            State::Str | State::StrEscape | State::StrUnicode => "while parsing a string",
            State::Lit => "while parsing a literal",
            State::Num | State::Done => unreachable!("handled above"),
        };
        let expected = match self.state {
            State::Value | State::ArrayFirst => EXPECTED_VALUE,
            State::ObjectFirst | State::ObjectKey => EXPECTED_KEY,
            State::Colon => EXPECTED_COLON,
            State::AfterValue => EXPECTED_COMMA_OR_CLOSE,
            State::Str | State::StrEscape => EXPECTED_STRING_CHAR,
            State::StrUnicode => EXPECTED_HEX,
            State::Lit => &[],
            State::Num | State::Done => unreachable!("handled above"),
        };
        self.failed = true;
        Err(TokenError::UnexpectedEnd {
            pos: self.position.pos,
            line: self.position.line,
            col: self.position.col,
            context,
            expected,
        })
    }

    /// Process one byte. Returns whether the byte was consumed; a byte that
    /// merely terminates a number is left for the next state to handle.
    fn step<S: JsonSink>(&mut self, b: u8, sink: &mut S) -> Result<bool, TokenError> {
        match self.state {
            State::Value | State::ArrayFirst => self.step_value(b, sink),
            State::ObjectFirst => match b {
                b'"' => {
                    self.begin_string(true);
                    Ok(true)
                }
                b'}' => {
                    self.close_container(Container::Object, b, sink)?;
                    Ok(true)
                }
                _ if is_whitespace(b) => Ok(true),
                _ => Err(self.unexpected(b, "while parsing an object", EXPECTED_KEY_OR_CLOSE)),
            },
            State::ObjectKey => match b {
                b'"' => {
                    self.begin_string(true);
                    Ok(true)
                }
                _ if is_whitespace(b) => Ok(true),
                _ => Err(self.unexpected(b, "while parsing an object", EXPECTED_KEY)),
            },
            State::Colon => match b {
                b':' => {
                    self.state = State::Value;
                    Ok(true)
                }
                _ if is_whitespace(b) => Ok(true),
                _ => Err(self.unexpected(b, "after an object key", EXPECTED_COLON)),
            },
            State::AfterValue => match b {
                b',' => {
                    self.state = match self.stack.last() {
                        Some(Container::Array) => State::Value,
                        Some(Container::Object) => State::ObjectKey,
                        None => return Err(self.unexpected(b, "after the top-level value", EXPECTED_EOF)),
                    };
                    Ok(true)
                }
                b']' => {
                    self.close_container(Container::Array, b, sink)?;
                    Ok(true)
                }
                b'}' => {
                    self.close_container(Container::Object, b, sink)?;
                    Ok(true)
                }
                _ if is_whitespace(b) => Ok(true),
                _ => Err(self.unexpected(b, "after a value", EXPECTED_COMMA_OR_CLOSE)),
            },
            State::Done => {
                if is_whitespace(b) {
                    Ok(true)
                } else {
                    Err(self.unexpected(b, "after the top-level value", EXPECTED_EOF))
                }
            }
            State::Str => self.step_string(b, sink),
            State::StrEscape => self.step_escape(b),
            State::StrUnicode => self.step_unicode(b),
            State::Num => {
                if matches!(b, b'0'..=b'9' | b'+' | b'-' | b'.' | b'e' | b'E') {
                    self.num_buf.push(b as char);
                    Ok(true)
                } else {
                    self.finish_number(sink)?;
                    // the terminating byte is reprocessed in the new state
                    Ok(false)
                }
            }
            State::Lit => {
                let want = self.lit_text.as_bytes()[self.lit_matched];
                if b == want {
                    self.lit_matched += 1;
                    if self.lit_matched == self.lit_text.len() {
                        let value = match self.lit_text {
                            "true" => JsonPrimitive::Bool(true),
                            "false" => JsonPrimitive::Bool(false),
                            _ => JsonPrimitive::Null,
                        };
                        sink.value(value);
                        self.complete_value();
                    }
                    Ok(true)
                } else {
                    // report at the literal's first byte so garbage leading
                    // text classifies as not-JSON-at-all
                    Err(TokenError::Unexpected {
                        found: b as char,
                        pos: self.token_start.pos,
                        line: self.token_start.line,
                        col: self.token_start.col,
                        context: "while parsing a literal",
                        expected: EXPECTED_VALUE,
                    })
                }
            }
        }
    }

    fn step_value<S: JsonSink>(&mut self, b: u8, sink: &mut S) -> Result<bool, TokenError> {
        match b {
            b'{' => {
                sink.open_object();
                self.stack.push(Container::Object);
                self.state = State::ObjectFirst;
                Ok(true)
            }
            b'[' => {
                sink.open_array();
                self.stack.push(Container::Array);
                self.state = State::ArrayFirst;
                Ok(true)
            }
            b']' if self.state == State::ArrayFirst => {
                self.close_container(Container::Array, b, sink)?;
                Ok(true)
            }
            b'"' => {
                self.begin_string(false);
                Ok(true)
            }
            b'-' | b'0'..=b'9' => {
                self.token_start = self.position;
                self.num_buf.clear();
                self.num_buf.push(b as char);
                self.state = State::Num;
                Ok(true)
            }
            b't' | b'f' | b'n' => {
                self.token_start = self.position;
                self.lit_text = match b {
                    b't' => "true",
                    b'f' => "false",
                    _ => "null",
                };
                self.lit_matched = 1;
                self.state = State::Lit;
                Ok(true)
            }
            _ if is_whitespace(b) => Ok(true),
            _ => Err(self.unexpected(b, "while parsing a value", EXPECTED_VALUE)),
        }
    }

    fn step_string<S: JsonSink>(&mut self, b: u8, sink: &mut S) -> Result<bool, TokenError> {
        match b {
            b'"' => {
                self.flush_pending_surrogate();
                let text = String::from_utf8_lossy(&self.scratch).into_owned();
                self.scratch.clear();
                if self.in_key {
                    sink.key(text);
                    self.state = State::Colon;
                } else {
                    sink.value(JsonPrimitive::Str(text));
                    self.complete_value();
                }
                Ok(true)
            }
            b'\\' => {
                self.state = State::StrEscape;
                Ok(true)
            }
            0x00..=0x1F => {
                Err(self.unexpected(b, "control character in string", EXPECTED_STRING_CHAR))
            }
            _ => {
                // raw bytes (including UTF-8 continuations) pass through
                if b < 0x80 || (b & 0xC0) != 0x80 {
                    self.flush_pending_surrogate();
                }
                self.scratch.push(b);
                Ok(true)
            }
        }
    }

    fn step_escape(&mut self, b: u8) -> Result<bool, TokenError> {
        let mapped = match b {
            b'"' => Some('"'),
            b'\\' => Some('\\'),
            b'/' => Some('/'),
            b'b' => Some('\u{0008}'),
            b'f' => Some('\u{000C}'),
            b'n' => Some('\n'),
            b'r' => Some('\r'),
            b't' => Some('\t'),
            b'u' => None,
            _ => {
                return Err(self.unexpected(b, "in string escape", EXPECTED_ESCAPE));
            }
        };
        match mapped {
            Some(c) => {
                self.flush_pending_surrogate();
                self.push_char(c);
                self.state = State::Str;
            }
            None => {
                self.unicode_acc = 0;
                self.unicode_rem = 4;
                self.state = State::StrUnicode;
            }
        }
        Ok(true)
    }

    fn step_unicode(&mut self, b: u8) -> Result<bool, TokenError> {
        let digit = match b {
            b'0'..=b'9' => (b - b'0') as u32,
            b'a'..=b'f' => (b - b'a') as u32 + 10,
            b'A'..=b'F' => (b - b'A') as u32 + 10,
            _ => return Err(self.unexpected(b, "in unicode escape", EXPECTED_HEX)),
        };
        self.unicode_acc = (self.unicode_acc << 4) | digit;
        self.unicode_rem -= 1;
        if self.unicode_rem == 0 {
            let unit = self.unicode_acc as u16;
            match unit {
                0xD800..=0xDBFF => {
                    self.flush_pending_surrogate();
                    self.pending_high_surrogate = Some(unit);
                }
                0xDC00..=0xDFFF => match self.pending_high_surrogate.take() {
                    Some(high) => {
                        let combined = 0x10000
                            + (((high as u32) - 0xD800) << 10)
                            + ((unit as u32) - 0xDC00);
                        self.push_char(char::from_u32(combined).unwrap_or('\u{FFFD}'));
                    }
                    None => self.push_char('\u{FFFD}'),
                },
                _ => {
                    self.flush_pending_surrogate();
                    self.push_char(char::from_u32(unit as u32).unwrap_or('\u{FFFD}'));
                }
            }
            self.state = State::Str;
        }
        Ok(true)
    }

    fn begin_string(&mut self, is_key: bool) {
        self.token_start = self.position;
        self.scratch.clear();
        self.in_key = is_key;
        self.pending_high_surrogate = None;
        self.state = State::Str;
    }

    fn push_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.scratch.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
    }

    /// A lone high surrogate decodes to the replacement character.
    fn flush_pending_surrogate(&mut self) {
        if self.pending_high_surrogate.take().is_some() {
            self.push_char('\u{FFFD}');
        }
    }

    fn finish_number<S: JsonSink>(&mut self, sink: &mut S) -> Result<(), TokenError> {
        if !is_valid_number(&self.num_buf) {
            let found = self.num_buf.chars().next().unwrap_or('?');
            return Err(TokenError::Unexpected {
                found,
                pos: self.token_start.pos,
                line: self.token_start.line,
                col: self.token_start.col,
                context: "while parsing a number",
                expected: EXPECTED_VALUE,
            });
        }
        let parsed = self.num_buf.parse::<f64>().map_err(|_| TokenError::Unexpected {
            found: self.num_buf.chars().next().unwrap_or('?'),
            pos: self.token_start.pos,
            line: self.token_start.line,
            col: self.token_start.col,
            context: "while parsing a number",
            expected: EXPECTED_VALUE,
        })?;
        sink.value(JsonPrimitive::Number(parsed));
        self.complete_value();
        Ok(())
    }

    fn close_container<S: JsonSink>(
        &mut self,
        kind: Container,
        b: u8,
        sink: &mut S,
    ) -> Result<(), TokenError> {
        match self.stack.pop() {
            Some(open) if open == kind => {
                match kind {
                    Container::Array => sink.close_array(),
                    Container::Object => sink.close_object(),
                }
                self.state = if self.stack.is_empty() {
                    State::Done
                } else {
                    State::AfterValue
                };
                Ok(())
            }
            _ => Err(self.unexpected(b, "mismatched closing delimiter", EXPECTED_COMMA_OR_CLOSE)),
        }
    }

    fn complete_value(&mut self) {
        self.state = if self.stack.is_empty() {
            State::Done
        } else {
            State::AfterValue
        };
    }

    fn unexpected(&self, b: u8, context: &'static str, expected: &'static [&'static str]) -> TokenError {
        TokenError::Unexpected {
            found: b as char,
            pos: self.position.pos,
            line: self.position.line,
            col: self.position.col,
            context,
            expected,
        }
    }

    fn advance(&mut self, b: u8) {
        self.position.pos += 1;
        if b == b'\n' {
            self.position.line += 1;
            self.position.col = 1;
        } else if (b & 0xC0) != 0x80 {
            // count columns per code point, not per byte
            self.position.col += 1;
        }
    }
}

fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Strict JSON number grammar check.
fn is_valid_number(s: &str) -> bool {
    let b = s.as_bytes();
    let mut i = 0;
    if i < b.len() && b[i] == b'-' {
        i += 1;
    }
    // integer part: 0 | [1-9][0-9]*
    match b.get(i) {
        Some(b'0') => i += 1,
        Some(b'1'..=b'9') => {
            i += 1;
            while matches!(b.get(i), Some(b'0'..=b'9')) {
                i += 1;
            }
        }
        _ => return false,
    }
    if let Some(b'.') = b.get(i) {
        i += 1;
        if !matches!(b.get(i), Some(b'0'..=b'9')) {
            return false;
        }
        while matches!(b.get(i), Some(b'0'..=b'9')) {
            i += 1;
        }
    }
    if let Some(b'e' | b'E') = b.get(i) {
        i += 1;
        if let Some(b'+' | b'-') = b.get(i) {
            i += 1;
        }
        if !matches!(b.get(i), Some(b'0'..=b'9')) {
            return false;
        }
        while matches!(b.get(i), Some(b'0'..=b'9')) {
            i += 1;
        }
    }
    i == b.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every callback for assertions.
    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl JsonSink for Recorder {
        fn open_array(&mut self) {
            self.events.push("[".into());
        }
        fn open_object(&mut self) {
            self.events.push("{".into());
        }
        fn close_array(&mut self) {
            self.events.push("]".into());
        }
        fn close_object(&mut self) {
            self.events.push("}".into());
        }
        fn key(&mut self, key: String) {
            self.events.push(format!("key:{}", key));
        }
        fn value(&mut self, value: JsonPrimitive) {
            self.events.push(format!("val:{}", value));
        }
    }

    fn run(input: &str) -> Result<Vec<String>, TokenError> {
        let mut t = Tokenizer::new();
        let mut sink = Recorder::default();
        t.feed(input.as_bytes(), &mut sink)?;
        t.end(&mut sink)?;
        Ok(sink.events)
    }

    #[test]
    fn test_simple_object() {
        let events = run(r#"{"a":1,"b":"x"}"#).unwrap();
        assert_eq!(
            events,
            vec!["{", "key:a", "val:1", "key:b", "val:\"x\"", "}"]
        );
    }

    #[test]
    fn test_nested_containers() {
        let events = run(r#"{"a":[1,{"b":null}]}"#).unwrap();
        assert_eq!(
            events,
            vec!["{", "key:a", "[", "val:1", "{", "key:b", "val:null", "}", "]", "}"]
        );
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(run("[]").unwrap(), vec!["[", "]"]);
        assert_eq!(run("{}").unwrap(), vec!["{", "}"]);
    }

    #[test]
    fn test_root_scalars() {
        assert_eq!(run("42").unwrap(), vec!["val:42"]);
        assert_eq!(run("true").unwrap(), vec!["val:true"]);
        assert_eq!(run("\"hi\"").unwrap(), vec!["val:\"hi\""]);
        assert_eq!(run(" null ").unwrap(), vec!["val:null"]);
    }

    #[test]
    fn test_numbers() {
        let events = run("[-1.5e3,0,0.25,1e-2]").unwrap();
        assert_eq!(
            events,
            vec!["[", "val:-1500", "val:0", "val:0.25", "val:0.01", "]"]
        );
    }

    #[test]
    fn test_string_escapes() {
        let events = run(r#""a\nb\t\"c\" A""#).unwrap();
        assert_eq!(events, vec!["val:\"a\nb\t\"c\" A\""]);
    }

    #[test]
    fn test_surrogate_pair_escape() {
        let events = run(r#""\uD83D\uDE00""#).unwrap();
        assert_eq!(events, vec![format!("val:\"{}\"", '\u{1F600}')]);
    }

    #[test]
    fn test_raw_multibyte_passthrough() {
        let events = run(r#""😀""#).unwrap();
        assert_eq!(events, vec![format!("val:\"{}\"", '\u{1F600}')]);
    }

    #[test]
    fn test_lone_high_surrogate_becomes_replacement() {
        let events = run(r#""\uD83Dx""#).unwrap();
        assert_eq!(events, vec!["val:\"\u{FFFD}x\""]);
    }

    #[test]
    fn test_chunk_split_everywhere() {
        let input = r#"{"key":[1,-2.5,"vaélue",true,null]}"#;
        let mut whole = Tokenizer::new();
        let mut whole_sink = Recorder::default();
        whole.feed(input.as_bytes(), &mut whole_sink).unwrap();
        whole.end(&mut whole_sink).unwrap();

        for split in 1..input.len() {
            let mut t = Tokenizer::new();
            let mut sink = Recorder::default();
            t.feed(&input.as_bytes()[..split], &mut sink).unwrap();
            t.feed(&input.as_bytes()[split..], &mut sink).unwrap();
            t.end(&mut sink).unwrap();
            assert_eq!(sink.events, whole_sink.events, "split at {}", split);
        }
    }

    #[test]
    fn test_split_multibyte_utf8() {
        let input = "\"héllo\"".as_bytes();
        // split inside the two-byte é sequence
        let split = 3;
        let mut t = Tokenizer::new();
        let mut sink = Recorder::default();
        t.feed(&input[..split], &mut sink).unwrap();
        t.feed(&input[split..], &mut sink).unwrap();
        t.end(&mut sink).unwrap();
        assert_eq!(sink.events, vec!["val:\"héllo\""]);
    }

    #[test]
    fn test_garbage_fails_at_offset_zero() {
        let err = run("not json").unwrap_err();
        assert_eq!(err.pos(), 0);
    }

    #[test]
    fn test_error_position_detail() {
        let err = run("{\"a\":1x}").unwrap_err();
        match err {
            TokenError::Unexpected { found, pos, line, col, .. } => {
                assert_eq!(found, 'x');
                assert_eq!(pos, 6);
                assert_eq!(line, 1);
                assert_eq!(col, 7);
            }
            other => panic!("expected Unexpected, got {:?}", other),
        }
    }

    #[test]
    fn test_truncated_input_reports_unexpected_end() {
        let mut t = Tokenizer::new();
        let mut sink = Recorder::default();
        t.feed(b"{\"a\":", &mut sink).unwrap();
        let err = t.end(&mut sink).unwrap_err();
        assert!(matches!(err, TokenError::UnexpectedEnd { pos: 5, .. }));
    }

    #[test]
    fn test_empty_input_fails_at_offset_zero() {
        let err = run("").unwrap_err();
        assert!(matches!(err, TokenError::UnexpectedEnd { pos: 0, .. }));
    }

    #[test]
    fn test_trailing_garbage() {
        let err = run("1 2").unwrap_err();
        match err {
            TokenError::Unexpected { found, pos, .. } => {
                assert_eq!(found, '2');
                assert_eq!(pos, 2);
            }
            other => panic!("expected Unexpected, got {:?}", other),
        }
    }

    #[test]
    fn test_mismatched_close() {
        let err = run("[1}").unwrap_err();
        assert!(matches!(err, TokenError::Unexpected { found: '}', .. }));
    }

    #[test]
    fn test_trailing_comma_rejected() {
        assert!(run("[1,]").is_err());
        assert!(run("{\"a\":1,}").is_err());
    }

    #[test]
    fn test_invalid_number_reported_at_token_start() {
        let err = run("[1.e]").unwrap_err();
        assert!(matches!(err, TokenError::Unexpected { pos: 1, .. }));
    }

    #[test]
    fn test_line_and_column_tracking() {
        let err = run("{\n  \"a\": x\n}").unwrap_err();
        match err {
            TokenError::Unexpected { line, col, .. } => {
                assert_eq!(line, 2);
                assert_eq!(col, 8);
            }
            other => panic!("expected Unexpected, got {:?}", other),
        }
    }

    #[test]
    fn test_poisoned_after_error() {
        let mut t = Tokenizer::new();
        let mut sink = Recorder::default();
        assert!(t.feed(b"@@", &mut sink).is_err());
        // subsequent feeds are ignored rather than panicking
        assert!(t.feed(b"[]", &mut sink).is_ok());
        assert!(sink.events.is_empty());
    }
}
