//! Forward-only markup tokenizer.
//!
//! Recognizes start tags, end tags and `<?xml ...?>` declarations over raw
//! bytes. Text, comments, CDATA sections and doctypes are skipped without
//! being interpreted. Malformed markup never fails the scan: a stray `<` is
//! text, a tag cut off by end of input ends the stream. Only read errors from
//! the underlying reader are reported.

use std::io::{self, BufRead};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Attr {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    Start { name: String, attrs: Vec<Attr> },
    End { name: String },
    Declaration { encoding: Option<String> },
}

/// Value of the first attribute whose local name equals `name`, ignoring case.
pub(crate) fn attr_value<'a>(attrs: &'a [Attr], name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|attr| attr.name.eq_ignore_ascii_case(name))
        .map(|attr| attr.value.as_str())
}

enum Scan {
    Token(Token),
    Skip,
    Eof,
}

pub(crate) struct Tokenizer<R> {
    reader: R,
    peeked: Option<u8>,
}

impl<R: BufRead> Tokenizer<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self {
            reader,
            peeked: None,
        }
    }

    /// Next recognized token, or `None` at end of input.
    pub(crate) fn next_token(&mut self) -> io::Result<Option<Token>> {
        loop {
            if !self.skip_text()? {
                return Ok(None);
            }
            let Some(next) = self.peek()? else {
                return Ok(None);
            };
            let scan = match next {
                b'/' => {
                    self.bump()?;
                    self.end_tag()?
                }
                b'!' => {
                    self.bump()?;
                    if self.skip_bang()? { Scan::Skip } else { Scan::Eof }
                }
                b'?' => {
                    self.bump()?;
                    self.processing_instruction()?
                }
                b if is_name_start(b) => self.start_tag()?,
                _ => Scan::Skip,
            };
            match scan {
                Scan::Token(token) => return Ok(Some(token)),
                Scan::Skip => continue,
                Scan::Eof => return Ok(None),
            }
        }
    }

    fn start_tag(&mut self) -> io::Result<Scan> {
        let name = self.read_name()?;
        let mut attrs = Vec::new();
        loop {
            self.skip_whitespace()?;
            match self.peek()? {
                None => return Ok(Scan::Eof),
                Some(b'>') => {
                    self.bump()?;
                    break;
                }
                Some(b'/') => {
                    self.bump()?;
                }
                Some(_) => {
                    let attr_name = self.read_name()?;
                    if attr_name.is_empty() {
                        self.bump()?;
                        continue;
                    }
                    self.skip_whitespace()?;
                    let value = if self.peek()? == Some(b'=') {
                        self.bump()?;
                        self.skip_whitespace()?;
                        match self.read_value()? {
                            Some(value) => value,
                            None => return Ok(Scan::Eof),
                        }
                    } else {
                        // HTML boolean attribute
                        attr_name.clone()
                    };
                    attrs.push(Attr {
                        name: local_name(&attr_name).to_string(),
                        value,
                    });
                }
            }
        }
        Ok(Scan::Token(Token::Start {
            name: local_name(&name).to_string(),
            attrs,
        }))
    }

    fn end_tag(&mut self) -> io::Result<Scan> {
        let name = self.read_name()?;
        if !self.skip_past(b">")? {
            return Ok(Scan::Eof);
        }
        if name.is_empty() {
            return Ok(Scan::Skip);
        }
        Ok(Scan::Token(Token::End {
            name: local_name(&name).to_string(),
        }))
    }

    fn processing_instruction(&mut self) -> io::Result<Scan> {
        let target = self.read_name()?;
        let Some(body) = self.read_until(b"?>")? else {
            return Ok(Scan::Eof);
        };
        if !target.eq_ignore_ascii_case("xml") {
            return Ok(Scan::Skip);
        }
        let body = String::from_utf8_lossy(&body);
        Ok(Scan::Token(Token::Declaration {
            encoding: pseudo_attr(&body, "encoding"),
        }))
    }

    /// Skip a comment, CDATA section or doctype. `false` at end of input.
    fn skip_bang(&mut self) -> io::Result<bool> {
        match self.peek()? {
            Some(b'-') => {
                self.bump()?;
                if self.peek()? == Some(b'-') {
                    self.bump()?;
                    self.skip_past(b"-->")
                } else {
                    self.skip_past(b">")
                }
            }
            Some(b'[') => self.skip_past(b"]]>"),
            _ => self.skip_past(b">"),
        }
    }

    fn read_name(&mut self) -> io::Result<String> {
        let mut raw = Vec::new();
        while let Some(b) = self.peek()? {
            if b.is_ascii_whitespace() || matches!(b, b'/' | b'>' | b'=' | b'?') {
                break;
            }
            raw.push(b);
            self.bump()?;
        }
        Ok(String::from_utf8_lossy(&raw).into_owned())
    }

    fn read_value(&mut self) -> io::Result<Option<String>> {
        let mut raw = Vec::new();
        match self.peek()? {
            None => return Ok(None),
            Some(quote @ (b'"' | b'\'')) => {
                self.bump()?;
                loop {
                    match self.bump()? {
                        None => return Ok(None),
                        Some(b) if b == quote => break,
                        Some(b) => raw.push(b),
                    }
                }
            }
            Some(_) => {
                while let Some(b) = self.peek()? {
                    if b.is_ascii_whitespace() || b == b'>' {
                        break;
                    }
                    raw.push(b);
                    self.bump()?;
                }
            }
        }
        Ok(Some(decode_entities(&raw)))
    }

    fn skip_whitespace(&mut self) -> io::Result<()> {
        while let Some(b) = self.peek()? {
            if !b.is_ascii_whitespace() {
                break;
            }
            self.bump()?;
        }
        Ok(())
    }

    /// Consume text up to and including the next `<`. `false` at end of input.
    fn skip_text(&mut self) -> io::Result<bool> {
        if let Some(b) = self.peeked.take()
            && b == b'<'
        {
            return Ok(true);
        }
        loop {
            let buf = match self.reader.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if buf.is_empty() {
                return Ok(false);
            }
            match buf.iter().position(|&b| b == b'<') {
                Some(i) => {
                    self.reader.consume(i + 1);
                    return Ok(true);
                }
                None => {
                    let len = buf.len();
                    self.reader.consume(len);
                }
            }
        }
    }

    /// Consume input up to and including `terminator`. `false` at end of input.
    fn skip_past(&mut self, terminator: &[u8]) -> io::Result<bool> {
        let mut window = Vec::with_capacity(terminator.len());
        while let Some(b) = self.bump()? {
            if window.len() == terminator.len() {
                window.remove(0);
            }
            window.push(b);
            if window == terminator {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn read_until(&mut self, terminator: &[u8]) -> io::Result<Option<Vec<u8>>> {
        let mut raw = Vec::new();
        while let Some(b) = self.bump()? {
            raw.push(b);
            if raw.ends_with(terminator) {
                raw.truncate(raw.len() - terminator.len());
                return Ok(Some(raw));
            }
        }
        Ok(None)
    }

    fn peek(&mut self) -> io::Result<Option<u8>> {
        if self.peeked.is_none() {
            self.peeked = self.bump()?;
        }
        Ok(self.peeked)
    }

    fn bump(&mut self) -> io::Result<Option<u8>> {
        if let Some(b) = self.peeked.take() {
            return Ok(Some(b));
        }
        loop {
            match self.reader.fill_buf() {
                Ok([]) => return Ok(None),
                Ok(buf) => {
                    let b = buf[0];
                    self.reader.consume(1);
                    return Ok(Some(b));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

fn is_name_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b':' || b >= 0x80
}

/// Drop a namespace prefix: `html:meta` becomes `meta`.
fn local_name(name: &str) -> &str {
    match name.split_once(':') {
        Some((space, local)) if !space.is_empty() && !local.is_empty() => local,
        _ => name,
    }
}

fn pseudo_attr(body: &str, key: &str) -> Option<String> {
    let mut rest = body;
    while let Some(pos) = rest.find(key) {
        rest = &rest[pos + key.len()..];
        let Some(value) = rest.trim_start().strip_prefix('=') else {
            continue;
        };
        let value = value.trim_start();
        let quote = value.chars().next().filter(|c| *c == '"' || *c == '\'')?;
        let value = &value[1..];
        return value.find(quote).map(|end| value[..end].to_string());
    }
    None
}

fn decode_entities(raw: &[u8]) -> String {
    let text = String::from_utf8_lossy(raw);
    if !text.contains('&') {
        return text.into_owned();
    }
    let mut out = String::with_capacity(text.len());
    let mut rest: &str = &text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail
            .find(';')
            .and_then(|end| decode_entity(&tail[1..end]).map(|c| (c, end)));
        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                name.strip_prefix('#')?.parse().ok()?
            };
            char::from_u32(code)
        }
    }
}
