use super::*;

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, pos: 0 }
    }

    pub(super) fn error(&self, msg: impl Into<String>) -> ParseError {
        let tok = self.current();
        ParseError::Error {
            msg: msg.into(),
            line: tok.pos.line,
            col: tok.pos.col,
        }
    }

    pub(super) fn error_at(&self, msg: impl Into<String>, pos: Pos) -> ParseError {
        ParseError::Error {
            msg: msg.into(),
            line: pos.line,
            col: pos.col,
        }
    }

    pub(super) fn current(&self) -> &Token {
        if self.pos < self.tokens.len() {
            &self.tokens[self.pos]
        } else {
            self.tokens.last().unwrap()
        }
    }

    pub(super) fn peek(&self, offset: usize) -> &Token {
        let idx = self.pos + offset;
        if idx < self.tokens.len() {
            &self.tokens[idx]
        } else {
            self.tokens.last().unwrap()
        }
    }

    pub(super) fn advance(&mut self) -> &Token {
        let tok = if self.pos < self.tokens.len() {
            &self.tokens[self.pos]
        } else {
            self.tokens.last().unwrap()
        };
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    pub(super) fn check(&self, kind: &TokenKind) -> bool {
        &self.current().kind == kind
    }

    pub(super) fn accept(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(super) fn expect(&mut self, kind: &TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance().clone())
        } else {
            Err(self.error(format!(
                "expected `{}`, found `{}`",
                kind,
                self.current().kind
            )))
        }
    }

    pub(super) fn expect_ident(&mut self, what: &str) -> Result<(String, Pos), ParseError> {
        let tok = self.current();
        if let TokenKind::Ident(name) = &tok.kind {
            let name = name.clone();
            let pos = tok.pos;
            self.advance();
            Ok((name, pos))
        } else {
            Err(self.error(format!("expected {}, found `{}`", what, tok.kind)))
        }
    }

    pub(super) fn is_separator(&self) -> bool {
        matches!(self.current().kind, TokenKind::Newline | TokenKind::Semi)
    }

    pub(super) fn is_eof(&self) -> bool {
        matches!(self.current().kind, TokenKind::Eof)
    }

    /// Newlines and semicolons are interchangeable separators; runs of any
    /// length are permitted.
    pub(super) fn skip_separators(&mut self) {
        while self.is_separator() {
            self.advance();
        }
    }

    pub fn parse(&mut self) -> Result<Vec<FnDef>, ParseError> {
        let mut defs = Vec::new();
        self.skip_separators();

        while !self.is_eof() {
            defs.push(self.parse_function()?);
            self.skip_separators();
        }

        if defs.is_empty() {
            return Err(self.error("expected a function definition"));
        }
        Ok(defs)
    }
}
