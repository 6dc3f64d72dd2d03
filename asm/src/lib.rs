//! Two-pass assembler for the MARIE teaching processor.
//!
//! Source goes through the [`Lexer`], then pass 1 ([`parser::parse`]) fixes
//! addresses and fills the [`SymbolTable`], then pass 2
//! ([`assembler::resolve`]) resolves operands into words. [`assemble`] runs
//! the whole pipeline.
//!
//! ```
//! let program = masm::assemble("LOOP, LOAD 3\nADD 4\nSTORE LOOP\nHALT").unwrap();
//! let words: Vec<u16> = program.words().iter().map(|w| w.word).collect();
//! assert_eq!(words, vec![0x1003, 0x3004, 0x2000, 0x7000]);
//! ```

pub mod assembler;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod program;
pub mod symbol;
pub mod token;

pub use assembler::assemble;
pub use error::{AsmError, CliError, ErrorKind};
pub use lexer::{tokenize, Lexer};
pub use program::{Program, Word};
pub use symbol::{Symbol, SymbolTable};
pub use token::{Token, TokenKind};
