//! Line-oriented tokenizer shared by the OBJ and MTL parsers.

use std::{
    io::{prelude::*, ErrorKind, Result as IoResult},
    ops::Range,
    str::FromStr,
};

use ultraviolet::{Vec2, Vec3};

/// Reads a stream line by line and splits each line into whitespace-delimited tokens.
///
/// Typed reads never fail: a missing or unparseable token yields the zero value
/// of the requested type. Higher layers rely on this to skip truncated lines.
#[derive(Debug)]
pub struct Tokenizer<R> {
    reader: R,
    line_buffer: Vec<u8>,
    line: String,
    spans: Vec<Range<usize>>,
    cursor: usize,
    line_number: usize,
    skip_line_feed: bool,
}

const BYTE_ORDER_MARK: &[u8] = b"\xEF\xBB\xBF";

impl<R: BufRead> Tokenizer<R> {
    /// Creates a tokenizer positioned before the first line.
    pub fn new(reader: R) -> Tokenizer<R> {
        Tokenizer {
            reader,
            line_buffer: Vec::with_capacity(1024),
            line: String::with_capacity(1024),
            spans: vec![],
            cursor: 0,
            line_number: 0,
            skip_line_feed: false,
        }
    }

    /// Loads the next line. Returns `false` at the end of the stream.
    /// `\n`, `\r\n` and a bare `\r` all end a line.
    pub fn advance(&mut self) -> IoResult<bool> {
        self.line_buffer.clear();
        if self.read_line_bytes()? == 0 {
            self.line.clear();
            self.spans.clear();
            self.cursor = 0;
            return Ok(false);
        }

        let mut bytes = &self.line_buffer[..];
        if self.line_number == 0 && bytes.starts_with(BYTE_ORDER_MARK) {
            bytes = &bytes[BYTE_ORDER_MARK.len()..];
        }
        self.line.clear();
        self.line.push_str(&String::from_utf8_lossy(bytes));

        self.split_current();
        self.line_number += 1;
        Ok(true)
    }

    /// Moves one line into `line_buffer` without its terminator.
    /// Returns the number of bytes consumed from the reader.
    fn read_line_bytes(&mut self) -> IoResult<usize> {
        let mut consumed = 0;
        loop {
            let available = match self.reader.fill_buf() {
                Ok(available) => available,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                return Ok(consumed);
            }

            // LF right after a CR terminator belongs to the previous line.
            if self.skip_line_feed {
                self.skip_line_feed = false;
                if available[0] == b'\n' {
                    self.reader.consume(1);
                    continue;
                }
            }

            match available.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(end) => {
                    self.line_buffer.extend_from_slice(&available[..end]);
                    self.skip_line_feed = available[end] == b'\r';
                    self.reader.consume(end + 1);
                    return Ok(consumed + end + 1);
                }
                None => {
                    let length = available.len();
                    self.line_buffer.extend_from_slice(available);
                    self.reader.consume(length);
                    consumed += length;
                }
            }
        }
    }

    fn split_current(&mut self) {
        self.spans.clear();
        self.cursor = 0;

        let mut start = None;
        for (i, c) in self.line.char_indices() {
            let is_separator = c == ' ' || c == '\t';
            match (start, is_separator) {
                (None, false) => start = Some(i),
                (Some(s), true) => {
                    self.spans.push(s..i);
                    start = None;
                }
                _ => (),
            }
        }
        if let Some(s) = start {
            self.spans.push(s..self.line.len());
        }
    }
}

impl<R> Tokenizer<R> {
    /// Returns the current line without its terminator.
    pub fn line(&self) -> &str {
        &self.line
    }

    /// Returns the 1-based number of the current line.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Returns the number of tokens in the current line.
    pub fn token_count(&self) -> usize {
        self.spans.len()
    }

    /// Whether the current line is a keyword followed by at least one argument.
    /// Blank lines, comments and bare keywords are not.
    pub fn has_directive(&self) -> bool {
        self.spans.len() >= 2 && !self.line.starts_with('#')
    }

    /// Returns all tokens of the current line, ignoring the cursor.
    pub fn tokens(&self) -> impl Iterator<Item = &str> + '_ {
        self.spans.iter().map(move |span| &self.line[span.clone()])
    }

    /// Returns the tokens not yet consumed by the cursor.
    pub fn remaining(&self) -> impl Iterator<Item = &str> + '_ {
        self.spans[self.cursor..]
            .iter()
            .map(move |span| &self.line[span.clone()])
    }

    /// Whether the cursor has passed the last token.
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.spans.len()
    }

    /// Returns the next token without consuming it.
    pub fn peek(&self) -> Option<&str> {
        self.spans
            .get(self.cursor)
            .map(|span| &self.line[span.clone()])
    }

    /// Consumes the next token. Returns an empty string when exhausted.
    pub fn read_str(&mut self) -> &str {
        let span = match self.spans.get(self.cursor) {
            Some(span) => span.clone(),
            None => return "",
        };
        self.cursor += 1;
        &self.line[span]
    }

    /// Consumes the next token and parses it, falling back to `T::default()`.
    fn read_parsed<T: FromStr + Default>(&mut self) -> T {
        if self.is_exhausted() {
            return T::default();
        }
        self.read_str().parse().unwrap_or_default()
    }

    pub fn read_i32(&mut self) -> i32 {
        self.read_parsed()
    }

    pub fn read_u32(&mut self) -> u32 {
        self.read_parsed()
    }

    pub fn read_f32(&mut self) -> f32 {
        self.read_parsed()
    }

    pub fn read_f64(&mut self) -> f64 {
        self.read_parsed()
    }

    /// Consumes two tokens as a `Vec2`.
    pub fn read_vec2(&mut self) -> Vec2 {
        let x = self.read_f32();
        let y = self.read_f32();
        Vec2::new(x, y)
    }

    /// Consumes three tokens as a `Vec3`.
    pub fn read_vec3(&mut self) -> Vec3 {
        let x = self.read_f32();
        let y = self.read_f32();
        let z = self.read_f32();
        Vec3::new(x, y, z)
    }
}
