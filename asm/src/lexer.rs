use crate::error::{AsmError, ErrorKind};
use crate::token::{Token, TokenKind};
use marie_arch::{Directive, Opcode};

/// Scans a source buffer into tokens.
///
/// Whitespace and `/` line comments are dropped. A malformed numeric literal
/// yields one `Invalid` token and then the lexer halts; any other stray byte
/// yields a 1-byte `Invalid` token and scanning carries on. Cloning the lexer
/// before use gives a fresh scan from the start.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    src: &'a [u8],
    pos: usize,
    line: usize,
    column: usize,
    halted: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a [u8]) -> Self {
        Self {
            src,
            pos: 0,
            line: 1,
            column: 1,
            halted: false,
        }
    }

    pub fn source(&self) -> &'a [u8] {
        self.src
    }

    /// True once a malformed numeric literal stopped the scan.
    pub fn halted(&self) -> bool {
        self.halted
    }

    pub fn next_token(&mut self) -> Token {
        if self.halted {
            return self.make_token(TokenKind::Eof, self.pos, self.line, self.column);
        }

        self.skip_trivia();

        let (start, line, column) = (self.pos, self.line, self.column);
        let Some(&ch) = self.src.get(self.pos) else {
            return self.make_token(TokenKind::Eof, start, line, column);
        };

        if ch == b',' {
            self.bump();
            return self.make_token(TokenKind::Comma, start, line, column);
        }

        if ch.is_ascii_alphanumeric() {
            while self.peek().is_some_and(|c| c.is_ascii_alphanumeric()) {
                self.bump();
            }
            let kind = self.classify(&self.src[start..self.pos]);
            if kind == TokenKind::Invalid {
                self.halted = true;
            }
            return self.make_token(kind, start, line, column);
        }

        self.bump();
        self.make_token(TokenKind::Invalid, start, line, column)
    }

    fn classify(&self, word: &[u8]) -> TokenKind {
        // An alphanumeric run is always ASCII.
        let text = std::str::from_utf8(word).unwrap_or_default();
        if let Some(opcode) = Opcode::parse(text) {
            return TokenKind::Opcode(opcode);
        }
        if let Some(directive) = Directive::parse(text) {
            return TokenKind::Directive(directive);
        }
        match word.first() {
            Some(c) if c.is_ascii_digit() => {
                if word.iter().all(u8::is_ascii_hexdigit) {
                    TokenKind::Number
                } else {
                    TokenKind::Invalid
                }
            }
            _ => TokenKind::Ident,
        }
    }

    fn skip_trivia(&mut self) {
        while let Some(ch) = self.peek() {
            match ch {
                b' ' | b'\t' | b'\r' | b'\n' => self.bump(),
                b'/' => {
                    while self.peek().is_some_and(|c| c != b'\n') {
                        self.bump();
                    }
                }
                _ => break,
            }
        }
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn bump(&mut self) {
        if let Some(ch) = self.peek() {
            self.pos += 1;
            if ch == b'\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    fn make_token(&self, kind: TokenKind, start: usize, line: usize, column: usize) -> Token {
        Token {
            kind,
            index: start,
            size: self.pos - start,
            line,
            column,
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        match self.next_token() {
            Token {
                kind: TokenKind::Eof,
                ..
            } => None,
            token => Some(token),
        }
    }
}

/// Tokenize the whole buffer, failing on a malformed numeric literal.
pub fn tokenize(src: &[u8]) -> Result<Vec<Token>, AsmError> {
    let mut lexer = Lexer::new(src);
    let tokens: Vec<Token> = lexer.by_ref().collect();
    if lexer.halted() {
        if let Some(last) = tokens.last() {
            let kind = ErrorKind::MalformedNumericLiteral(last.text(src).into_owned());
            return Err(AsmError::at(last, kind));
        }
    }
    Ok(tokens)
}
