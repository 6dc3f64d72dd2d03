use color_print::cformat;
use thiserror::Error;

use crate::token::Token;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[error("Malformed numeric literal: `{0}`")]
    MalformedNumericLiteral(String),

    #[error("Unexpected token: `{found}`, expected {expected}")]
    UnexpectedToken {
        found: String,
        expected: &'static str,
    },

    #[error("Operand arity mismatch: `{0}` {1}")]
    OperandArityMismatch(String, &'static str),

    #[error("Re-defined label: `{0}` (first defined on line {1})")]
    DuplicateLabel(String, usize),

    #[error("Undefined label: `{0}`")]
    UndefinedLabel(String),

    #[error("Operand out of range: `{0}` exceeds 0x{1:X}")]
    OperandOutOfRange(String, u16),

    #[error("Invalid SKIPCOND operand: `{0}`, expected LT, EQ or GT")]
    InvalidSkipCondOperand(String),

    #[error("Address space exhausted: program does not fit in 4096 words")]
    AddressSpaceExhausted,

    #[error("Address 0x{0:03X} is already written by line {1}")]
    AddressOverlap(u16, usize),

    #[error("Address 0x{0:X} is outside the 4096-word memory")]
    AddressOutOfRange(u16),

    #[error("Word 0x{1:04X} at 0x{0:03X} does not match its instruction")]
    WordMismatch(u16, u16),
}

/// An assembly failure with its 1-based source position.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} (line {line}, column {column})")]
pub struct AsmError {
    pub kind: ErrorKind,
    pub line: usize,
    pub column: usize,
}

impl AsmError {
    pub fn new(kind: ErrorKind, line: usize, column: usize) -> Self {
        AsmError { kind, line, column }
    }

    pub fn at(token: &Token, kind: ErrorKind) -> Self {
        AsmError::new(kind, token.line, token.column)
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Render the error the way rustc does: message, location, source line
    /// and a caret under the offending column.
    pub fn diag(&self, file: &str, src: &[u8]) -> String {
        let line_content = src
            .split(|&c| c == b'\n')
            .nth(self.line.saturating_sub(1))
            .map(|line| String::from_utf8_lossy(line).trim_end().to_string())
            .unwrap_or_default();
        let caret = format!("{:>width$}", "^", width = self.column.max(1));

        [
            cformat!("<red,bold>error</>: {}", self.kind),
            cformat!("     <blue>--></> <underline>{}:{}:{}</>", file, self.line, self.column),
            cformat!("      <blue>|</>"),
            cformat!(" <blue>{:>4} |</> {}", self.line, line_content),
            cformat!("      <blue>|</> <red,bold>{}</>", caret),
        ]
        .join("\n")
    }

    pub fn print_diag(&self, file: &str, src: &[u8]) {
        eprintln!("{}", self.diag(file, src));
    }
}

/// Failures of the command line front end.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to read input: {0}")]
    FileRead(String, #[source] std::io::Error),

    #[error("Failed to create file: {0}")]
    FileCreate(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),

    #[error("Failed to serialize program")]
    Serialize(#[from] serde_yaml::Error),

    #[error("{0}")]
    Asm(#[from] AsmError),
}
