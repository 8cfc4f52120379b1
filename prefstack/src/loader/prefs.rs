//! Parser for preference-declaration files (`user.js` / `prefs.js`).
//!
//! Recognised statements are `user_pref`, `pref`, `lockPref` and
//! `sticky_pref`, each of the form `name("key", value[, attr...]);`.
//! Comments are kept as annotations: a `//` comment on the statement's own
//! line wins, otherwise the contiguous `//` lines directly above it are used.

use crate::error::{Error, Result};
use crate::preference::{Layer, PrefValue, PreferenceEntry};

const STATEMENTS: [&str; 4] = ["user_pref", "pref", "lockPref", "sticky_pref"];
const ATTRIBUTES: [&str; 2] = ["sticky", "locked"];

/// Parses preference declarations into a layer named `layer`.
pub(crate) fn parse(layer: &str, text: &str) -> Result<Layer> {
    PrefsParser::new(layer, text).parse()
}

struct PrefsParser<'a> {
    layer: &'a str,
    chars: Vec<char>,
    pos: usize,
    line: usize,
    entries: Vec<PreferenceEntry>,
    /// Comment lines waiting to annotate the next statement.
    pending: Vec<String>,
    /// Line of the last pending comment, 0 when there is none.
    pending_line: usize,
    /// Line on which the last statement ended, 0 before the first one.
    statement_line: usize,
    trailing_taken: bool,
}

impl<'a> PrefsParser<'a> {
    fn new(layer: &'a str, text: &str) -> Self {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        Self {
            layer,
            chars: text.chars().collect(),
            pos: 0,
            line: 1,
            entries: Vec::new(),
            pending: Vec::new(),
            pending_line: 0,
            statement_line: 0,
            trailing_taken: false,
        }
    }

    fn parse(mut self) -> Result<Layer> {
        loop {
            self.skip_whitespace();
            let Some(c) = self.peek() else { break };
            match c {
                '/' if self.peek_at(1) == Some('/') => self.line_comment(),
                '/' if self.peek_at(1) == Some('*') => self.block_comment()?,
                c if c.is_ascii_alphabetic() || c == '_' => self.statement()?,
                other => return Err(self.syntax(format!("unexpected character '{other}'"))),
            }
        }

        let mut layer = Layer::new(self.layer);
        for entry in self.entries {
            layer.push_entry(entry);
        }
        Ok(layer)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn line_comment(&mut self) {
        let line = self.line;
        self.pos += 2;
        let start = self.pos;
        while self.peek().is_some_and(|c| c != '\n') {
            self.pos += 1;
        }
        let text = self.chars[start..self.pos]
            .iter()
            .collect::<String>()
            .trim()
            .to_string();

        if self.statement_line == line && !self.trailing_taken {
            self.trailing_taken = true;
            if let Some(entry) = self.entries.last_mut() {
                if !text.is_empty() {
                    entry.annotation = Some(text);
                }
            }
            return;
        }

        if self.pending_line == 0 || self.pending_line + 1 != line {
            self.pending.clear();
        }
        if !text.is_empty() {
            self.pending.push(text);
        }
        self.pending_line = line;
    }

    fn block_comment(&mut self) -> Result<()> {
        let start_line = self.line;
        self.pos += 2;
        loop {
            match self.bump() {
                Some('*') if self.peek() == Some('/') => {
                    self.pos += 1;
                    break;
                }
                Some(_) => {}
                None => return Err(self.syntax_at(start_line, "unterminated block comment")),
            }
        }
        self.pending.clear();
        self.pending_line = 0;
        Ok(())
    }

    fn statement(&mut self) -> Result<()> {
        let line = self.line;
        let name = self.identifier();
        if !STATEMENTS.contains(&name.as_str()) {
            return Err(self.syntax_at(line, format!("unknown statement '{name}'")));
        }

        self.expect('(')?;
        self.skip_whitespace();
        let key = match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                self.string(quote)?
            }
            _ => return Err(self.syntax("expected a quoted preference name")),
        };
        self.expect(',')?;
        let value = self.value(&key)?;

        self.skip_whitespace();
        while self.peek() == Some(',') {
            self.pos += 1;
            self.skip_whitespace();
            let attribute = self.identifier();
            if !ATTRIBUTES.contains(&attribute.as_str()) {
                return Err(self.syntax(format!("unknown attribute '{attribute}'")));
            }
            self.skip_whitespace();
        }

        self.expect(')')?;
        self.expect(';')?;

        if key.is_empty() {
            return Err(self.malformed(&key, format!("key must not be empty (line {line})")));
        }

        let mut entry = PreferenceEntry::new(self.layer, key, value).with_line(line);
        if self.pending_line != 0 && self.pending_line + 1 == line && !self.pending.is_empty() {
            entry = entry.with_annotation(self.pending.join(" "));
        }
        self.pending.clear();
        self.pending_line = 0;

        self.entries.push(entry);
        self.statement_line = self.line;
        self.trailing_taken = false;
        Ok(())
    }

    fn identifier(&mut self) -> String {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.pos += 1;
        }
        self.chars[start..self.pos].iter().collect()
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        self.skip_whitespace();
        match self.peek() {
            Some(c) if c == expected => {
                self.pos += 1;
                Ok(())
            }
            Some(c) => Err(self.syntax(format!("expected '{expected}', found '{c}'"))),
            None => Err(self.syntax(format!("expected '{expected}', found end of input"))),
        }
    }

    fn value(&mut self, key: &str) -> Result<PrefValue> {
        self.skip_whitespace();
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                Ok(PrefValue::String(self.string(quote)?))
            }
            Some(c) if c.is_ascii_digit() || c == '-' || c == '+' => self.number(key),
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                let word = self.identifier();
                match word.as_str() {
                    "true" => Ok(PrefValue::Bool(true)),
                    "false" => Ok(PrefValue::Bool(false)),
                    _ => Err(self.malformed(key, format!("unsupported value '{word}'"))),
                }
            }
            Some(c) => Err(self.syntax(format!("unexpected character '{c}' in value"))),
            None => Err(self.syntax("unexpected end of input")),
        }
    }

    fn number(&mut self, key: &str) -> Result<PrefValue> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '+' | '.'))
        {
            self.pos += 1;
        }
        let literal: String = self.chars[start..self.pos].iter().collect();
        literal.parse::<i64>().map(PrefValue::Int).map_err(|_| {
            self.malformed(
                key,
                format!("unsupported numeric value '{literal}' (only integers are allowed)"),
            )
        })
    }

    /// Reads a string body; the opening quote is already consumed.
    fn string(&mut self, quote: char) -> Result<String> {
        let start_line = self.line;
        let mut out = String::new();
        loop {
            match self.bump() {
                Some(c) if c == quote => return Ok(out),
                Some('\n') | None => {
                    return Err(self.syntax_at(start_line, "unterminated string"));
                }
                Some('\\') => {
                    let escaped = self.escape()?;
                    out.push(escaped);
                }
                Some(c) => out.push(c),
            }
        }
    }

    fn escape(&mut self) -> Result<char> {
        match self.bump() {
            Some('n') => Ok('\n'),
            Some('r') => Ok('\r'),
            Some('t') => Ok('\t'),
            Some(c @ ('\\' | '"' | '\'')) => Ok(c),
            Some('x') => {
                let code = self.hex(2)?;
                char::from_u32(code).ok_or_else(|| self.syntax("invalid \\x escape"))
            }
            Some('u') => self.unicode_escape(),
            Some(c) => Err(self.syntax(format!("unknown escape '\\{c}'"))),
            None => Err(self.syntax("unterminated escape")),
        }
    }

    fn unicode_escape(&mut self) -> Result<char> {
        let high = self.hex(4)?;
        if !(0xD800..=0xDBFF).contains(&high) {
            return char::from_u32(high).ok_or_else(|| self.syntax("invalid \\u escape"));
        }

        if self.peek() != Some('\\') || self.peek_at(1) != Some('u') {
            return Err(self.syntax("unpaired surrogate in \\u escape"));
        }
        self.pos += 2;
        let low = self.hex(4)?;
        if !(0xDC00..=0xDFFF).contains(&low) {
            return Err(self.syntax("invalid low surrogate in \\u escape"));
        }
        let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
        char::from_u32(code).ok_or_else(|| self.syntax("invalid \\u escape"))
    }

    fn hex(&mut self, digits: usize) -> Result<u32> {
        let mut code = 0;
        for _ in 0..digits {
            let digit = self
                .peek()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| self.syntax("expected hexadecimal digit in escape"))?;
            self.pos += 1;
            code = code * 16 + digit;
        }
        Ok(code)
    }

    fn syntax(&self, message: impl Into<String>) -> Error {
        self.syntax_at(self.line, message)
    }

    fn syntax_at(&self, line: usize, message: impl Into<String>) -> Error {
        Error::Parse {
            layer: self.layer.to_string(),
            line,
            message: message.into(),
        }
    }

    fn malformed(&self, key: &str, reason: String) -> Error {
        Error::MalformedEntry {
            layer: self.layer.to_string(),
            key: key.to_string(),
            reason,
        }
    }
}
