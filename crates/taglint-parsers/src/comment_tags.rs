//! Parser for `+prefix:name(args)=value` comment tags.
//!
//! ```text
//! +k8s:required
//! +k8s:minimum=0
//! +k8s:item(type: "Approved")=+k8s:zeroOrOneOfMember
//! +k8s:alpha(since: "1.35")=+k8s:optional
//! ```
//!
//! A value starting with `+` is parsed as the nested payload tag; anything
//! else is kept as a literal. Lines without a recognized prefix are ignored.

use taglint_core::tags::{Tag, TagArg, TagArgValue, TagPayload};

use crate::extractor::{ExtractContext, ExtractError, TagExtractor};

#[derive(Debug, Clone)]
pub struct CommentTagParser {
    prefixes: Vec<String>,
}

impl Default for CommentTagParser {
    fn default() -> Self {
        Self::new(["k8s"])
    }
}

impl CommentTagParser {
    pub fn new<S: Into<String>>(prefixes: impl IntoIterator<Item = S>) -> Self {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    fn is_tag_line<'a>(&self, line: &'a str) -> Option<&'a str> {
        let body = line.trim().strip_prefix('+')?;
        self.prefixes
            .iter()
            .any(|p| {
                body.strip_prefix(p.as_str())
                    .is_some_and(|rest| rest.starts_with(':'))
            })
            .then_some(body)
    }

    /// Parse a single tag body (the text after the leading `+`).
    pub fn parse_tag(&self, body: &str) -> Result<Tag, String> {
        let mut cursor = Cursor::new(body);
        let tag = cursor.tag()?;
        if !cursor.at_end() {
            return Err(format!("unexpected trailing text `{}`", cursor.rest()));
        }
        Ok(tag)
    }
}

impl TagExtractor for CommentTagParser {
    fn extract(&self, ctx: &ExtractContext, lines: &[String]) -> Result<Vec<Tag>, ExtractError> {
        let mut tags = Vec::new();
        for line in lines {
            let Some(body) = self.is_tag_line(line) else {
                continue;
            };
            let tag = self
                .parse_tag(body)
                .map_err(|reason| ExtractError::Malformed {
                    scope: ctx.scope.clone(),
                    line: line.trim().to_string(),
                    reason,
                })?;
            tags.push(tag);
        }
        Ok(tags)
    }
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn at_end(&self) -> bool {
        self.rest().trim().is_empty()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.bump();
        }
        &self.src[start..self.pos]
    }

    /// `name [ '(' args ')' ] [ '=' value ]`
    fn tag(&mut self) -> Result<Tag, String> {
        let name = self
            .take_while(|c| c.is_alphanumeric() || matches!(c, ':' | '-' | '_' | '.' | '/'));
        match name.split_once(':') {
            Some((prefix, local)) if !prefix.is_empty() && !local.is_empty() => {}
            _ => return Err("missing tag name".to_string()),
        }

        let mut tag = Tag::new(name);
        if self.eat('(') {
            tag.args = self.args()?;
        }

        if self.eat('=') {
            if self.eat('+') {
                let nested = self.tag()?;
                tag.payload = Some(TagPayload::Tag(Box::new(nested)));
            } else {
                let literal = self.rest().trim();
                self.pos = self.src.len();
                tag.payload = Some(TagPayload::Literal(literal.to_string()));
            }
        }
        Ok(tag)
    }

    fn args(&mut self) -> Result<Vec<TagArg>, String> {
        let mut args = Vec::new();
        loop {
            self.skip_ws();
            if self.eat(')') {
                return Ok(args);
            }
            if self.peek().is_none() {
                return Err("unterminated argument list".to_string());
            }
            args.push(self.arg()?);
            self.skip_ws();
            if self.eat(',') {
                continue;
            }
            if self.eat(')') {
                return Ok(args);
            }
            return Err(match self.peek() {
                Some(c) => format!("unexpected `{c}` in argument list"),
                None => "unterminated argument list".to_string(),
            });
        }
    }

    fn arg(&mut self) -> Result<TagArg, String> {
        if self.peek() == Some('"') {
            return Ok(TagArg {
                name: None,
                value: TagArgValue::String(self.quoted()?),
            });
        }
        let word = self.take_while(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if word.is_empty() {
            return Err("empty argument".to_string());
        }
        self.skip_ws();
        if self.eat(':') {
            self.skip_ws();
            let value = self.arg_value()?;
            return Ok(TagArg {
                name: Some(word.to_string()),
                value,
            });
        }
        Ok(TagArg {
            name: None,
            value: scalar(word),
        })
    }

    fn arg_value(&mut self) -> Result<TagArgValue, String> {
        if self.peek() == Some('"') {
            return Ok(TagArgValue::String(self.quoted()?));
        }
        let word = self.take_while(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if word.is_empty() {
            return Err("missing argument value".to_string());
        }
        Ok(scalar(word))
    }

    fn quoted(&mut self) -> Result<String, String> {
        self.bump(); // opening quote
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('"') => return Ok(out),
                Some('\\') => match self.bump() {
                    Some(c) => out.push(c),
                    None => return Err("unterminated string".to_string()),
                },
                Some(c) => out.push(c),
                None => return Err("unterminated string".to_string()),
            }
        }
    }
}

fn scalar(word: &str) -> TagArgValue {
    if let Ok(n) = word.parse::<i64>() {
        return TagArgValue::Int(n);
    }
    match word {
        "true" => TagArgValue::Bool(true),
        "false" => TagArgValue::Bool(false),
        _ => TagArgValue::Ident(word.to_string()),
    }
}

#[cfg(test)]
#[path = "comment_tags_tests.rs"]
mod tests;
