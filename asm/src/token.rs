use marie_arch::{Directive, Opcode};
use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Simple
    Comma, // ','

    // Words
    Opcode(Opcode),
    Directive(Directive),
    Ident,
    Number,

    // Special
    Invalid,
    Eof,
}

/// A classified slice of the source. Tokens never own source text; the
/// fragment is recovered from the buffer through `index` and `size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub index: usize,
    pub size: usize,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn fragment<'a>(&self, src: &'a [u8]) -> &'a [u8] {
        src.get(self.index..self.index + self.size).unwrap_or_default()
    }

    pub fn text<'a>(&self, src: &'a [u8]) -> Cow<'a, str> {
        String::from_utf8_lossy(self.fragment(src))
    }
}
