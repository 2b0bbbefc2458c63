use std::fmt;

use thiserror::Error;

use crate::ast::Pos;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(String),
    Ident(String),
    /// `#...#` engine tag, or the reserved constants `pi` / `e`.
    Tag(String),
    // Keywords
    Function,
    Def,
    Double,
    Return,
    If,
    Not,
    And,
    Or,
    // Operators
    LParen,
    RParen,
    Comma,
    Semi,
    Assign,  // =
    Eq,      // ==
    Neq,     // !=
    Diamond, // <>
    Lt,
    Lte,     // <=
    Gt,
    Gte,     // >=
    LtF,     // <:
    GtF,     // >:
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    Question,
    Colon,
    Bang,
    AndAnd, // &&
    OrOr,   // ||
    // Structure
    Newline,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Number(text) | TokenKind::Ident(text) | TokenKind::Tag(text) => text,
            TokenKind::Function => "function",
            TokenKind::Def => "def",
            TokenKind::Double => "double",
            TokenKind::Return => "return",
            TokenKind::If => "if",
            TokenKind::Not => "not",
            TokenKind::And => "and",
            TokenKind::Or => "or",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::Comma => ",",
            TokenKind::Semi => ";",
            TokenKind::Assign => "=",
            TokenKind::Eq => "==",
            TokenKind::Neq => "!=",
            TokenKind::Diamond => "<>",
            TokenKind::Lt => "<",
            TokenKind::Lte => "<=",
            TokenKind::Gt => ">",
            TokenKind::Gte => ">=",
            TokenKind::LtF => "<:",
            TokenKind::GtF => ">:",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Caret => "^",
            TokenKind::Question => "?",
            TokenKind::Colon => ":",
            TokenKind::Bang => "!",
            TokenKind::AndAnd => "&&",
            TokenKind::OrOr => "||",
            TokenKind::Newline => "end of line",
            TokenKind::Eof => "end of input",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: Pos,
}

#[derive(Debug, Error)]
pub enum LexError {
    #[error("{line}:{col}: lex error: {msg}")]
    Error {
        msg: String,
        line: usize,
        col: usize,
    },
}

fn keyword(s: &str) -> Option<TokenKind> {
    match s {
        "function" => Some(TokenKind::Function),
        "def" => Some(TokenKind::Def),
        "double" => Some(TokenKind::Double),
        "return" => Some(TokenKind::Return),
        "if" => Some(TokenKind::If),
        "not" => Some(TokenKind::Not),
        "and" => Some(TokenKind::And),
        "or" => Some(TokenKind::Or),
        _ => None,
    }
}

pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Lexer {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    fn error(&self, msg: impl Into<String>) -> LexError {
        LexError::Error {
            msg: msg.into(),
            line: self.line,
            col: self.col,
        }
    }

    fn error_at(&self, msg: impl Into<String>, pos: Pos) -> LexError {
        LexError::Error {
            msg: msg.into(),
            line: pos.line,
            col: pos.col,
        }
    }

    fn here(&self) -> Pos {
        Pos {
            line: self.line,
            col: self.col,
        }
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn current(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.get(self.pos).copied()?;
        self.pos += 1;
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        while self.pos < self.chars.len() {
            self.scan_token(&mut tokens)?;
        }

        tokens.push(Token {
            kind: TokenKind::Eof,
            pos: self.here(),
        });

        Ok(tokens)
    }

    fn scan_token(&mut self, tokens: &mut Vec<Token>) -> Result<(), LexError> {
        let ch = match self.current() {
            Some(c) => c,
            None => return Ok(()),
        };

        // Whitespace (carriage returns are discarded, so CRLF works)
        if ch == ' ' || ch == '\t' || ch == '\r' {
            self.advance();
            return Ok(());
        }

        // Newline — collapse runs into a single marker
        if ch == '\n' {
            let pos = self.here();
            self.advance();
            let emit = tokens
                .last()
                .map(|t| !matches!(t.kind, TokenKind::Newline))
                .unwrap_or(false);
            if emit {
                tokens.push(Token {
                    kind: TokenKind::Newline,
                    pos,
                });
            }
            return Ok(());
        }

        // Comments
        if ch == '/' && self.peek(1) == Some('/') {
            self.skip_line_comment();
            return Ok(());
        }
        if ch == '/' && self.peek(1) == Some('*') {
            return self.skip_block_comment();
        }

        // Numbers (a bare leading `.` is accepted when a digit follows)
        if ch.is_ascii_digit() || (ch == '.' && self.peek(1).is_some_and(|c| c.is_ascii_digit())) {
            let tok = self.scan_number()?;
            tokens.push(tok);
            return Ok(());
        }

        // Identifiers / keywords
        if ch.is_ascii_alphabetic() || ch == '_' {
            let tok = self.scan_identifier();
            tokens.push(tok);
            return Ok(());
        }

        // Engine tags
        if ch == '#' {
            let tok = self.scan_tag()?;
            tokens.push(tok);
            return Ok(());
        }

        // Operators
        let tok = self.scan_operator()?;
        tokens.push(tok);
        Ok(())
    }

    fn skip_line_comment(&mut self) {
        while self.pos < self.chars.len() && self.chars[self.pos] != '\n' {
            self.advance();
        }
    }

    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        let start = self.here();
        self.advance(); // /
        self.advance(); // *
        loop {
            match self.current() {
                None => return Err(self.error_at("unterminated block comment", start)),
                Some('*') if self.peek(1) == Some('/') => {
                    self.advance();
                    self.advance();
                    return Ok(());
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    fn scan_number(&mut self) -> Result<Token, LexError> {
        let pos = self.here();
        let mut text = String::new();

        while let Some(c) = self.current() {
            if c.is_ascii_digit() {
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }

        // The decimal point is consumed only with digits after it, so `1.`
        // never swallows the dot.
        if self.current() == Some('.') && self.peek(1).is_some_and(|c| c.is_ascii_digit()) {
            text.push('.');
            self.advance();
            while let Some(c) = self.current() {
                if c.is_ascii_digit() {
                    text.push(c);
                    self.advance();
                } else {
                    break;
                }
            }
        }

        // Exponent, consumed only when a digit (or signed digit) follows
        if matches!(self.current(), Some('e') | Some('E')) {
            let sign_len = match self.peek(1) {
                Some('+') | Some('-') => 1,
                _ => 0,
            };
            if self.peek(1 + sign_len).is_some_and(|c| c.is_ascii_digit()) {
                text.push(self.advance().unwrap());
                if sign_len == 1 {
                    text.push(self.advance().unwrap());
                }
                while let Some(c) = self.current() {
                    if c.is_ascii_digit() {
                        text.push(c);
                        self.advance();
                    } else {
                        break;
                    }
                }
            }
        }

        match self.current() {
            Some('.') => Err(self.error(format!("malformed number `{}.`", text))),
            Some(c) if c.is_ascii_alphanumeric() || c == '_' => {
                Err(self.error("identifier may not begin with a digit"))
            }
            _ => Ok(Token {
                kind: TokenKind::Number(text),
                pos,
            }),
        }
    }

    fn scan_identifier(&mut self) -> Token {
        let pos = self.here();
        let mut ident = String::new();

        while let Some(c) = self.current() {
            if c.is_ascii_alphanumeric() || c == '_' {
                ident.push(c);
                self.advance();
            } else {
                break;
            }
        }

        // `pi` and `e` are engine constants, lexed as tags so they survive
        // to the output verbatim and cannot be rebound.
        let kind = if ident == "pi" || ident == "e" {
            TokenKind::Tag(ident)
        } else {
            keyword(&ident).unwrap_or(TokenKind::Ident(ident))
        };
        Token { kind, pos }
    }

    fn scan_tag(&mut self) -> Result<Token, LexError> {
        let pos = self.here();
        let mut text = String::from('#');
        self.advance(); // opening #

        loop {
            match self.current() {
                None | Some('\n') => return Err(self.error_at("unterminated tag", pos)),
                Some('#') => {
                    text.push('#');
                    self.advance();
                    break;
                }
                Some(c) => {
                    text.push(c);
                    self.advance();
                }
            }
        }

        Ok(Token {
            kind: TokenKind::Tag(text),
            pos,
        })
    }

    fn scan_operator(&mut self) -> Result<Token, LexError> {
        let pos = self.here();
        let ch = self.advance().unwrap();

        // Two-character operators win over their one-character prefixes
        let kind = match ch {
            '=' if self.current() == Some('=') => {
                self.advance();
                TokenKind::Eq
            }
            '!' if self.current() == Some('=') => {
                self.advance();
                TokenKind::Neq
            }
            '<' if self.current() == Some('=') => {
                self.advance();
                TokenKind::Lte
            }
            '<' if self.current() == Some(':') => {
                self.advance();
                TokenKind::LtF
            }
            '<' if self.current() == Some('>') => {
                self.advance();
                TokenKind::Diamond
            }
            '>' if self.current() == Some('=') => {
                self.advance();
                TokenKind::Gte
            }
            '>' if self.current() == Some(':') => {
                self.advance();
                TokenKind::GtF
            }
            '&' if self.current() == Some('&') => {
                self.advance();
                TokenKind::AndAnd
            }
            '|' if self.current() == Some('|') => {
                self.advance();
                TokenKind::OrOr
            }
            '=' => TokenKind::Assign,
            '!' => TokenKind::Bang,
            '<' => TokenKind::Lt,
            '>' => TokenKind::Gt,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '^' => TokenKind::Caret,
            '?' => TokenKind::Question,
            ':' => TokenKind::Colon,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semi,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            other => return Err(self.error_at(format!("unrecognized input `{}`", other), pos)),
        };

        Ok(Token { kind, pos })
    }
}
