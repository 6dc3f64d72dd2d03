//! Pass 2 and the assembly entry point.

use log::{debug, trace};
use marie_arch::{Inst, Opcode, SkipCond, MAX_ADDRESS};

use crate::{
    error::{AsmError, ErrorKind},
    lexer::tokenize,
    parser::{self, parse_number, Parsed, Record, Stmt},
    program::{Program, Word},
    symbol::SymbolTable,
    token::{Token, TokenKind},
};

/// Assemble a complete source buffer.
///
/// Tokenizes, runs pass 1 to fix every address and collect labels, then
/// resolves operands against the finished symbol table. The first error
/// aborts the whole assembly.
pub fn assemble(source: impl AsRef<[u8]>) -> Result<Program, AsmError> {
    let src = source.as_ref();

    let tokens = tokenize(src)?;
    debug!("tokenized {} bytes into {} tokens", src.len(), tokens.len());

    let Parsed { records, symbols } = parser::parse(src, &tokens)?;
    let words = resolve(src, &records, &symbols)?;
    debug!("pass 2: {} words resolved", words.len());

    Program::new(words, symbols.into_symbols())
}

/// Run pass 2. The symbol table is only read here.
pub fn resolve(
    src: &[u8],
    records: &[Record],
    symbols: &SymbolTable,
) -> Result<Vec<Word>, AsmError> {
    records
        .iter()
        .map(|record| {
            let inst = resolve_record(src, record, symbols)?;
            trace!("0x{:03X}: {}", record.address, inst);
            Ok(Word::new(record.address, inst, record.head.line, record.head.column))
        })
        .collect()
}

fn resolve_record(src: &[u8], record: &Record, symbols: &SymbolTable) -> Result<Inst, AsmError> {
    match &record.stmt {
        Stmt::Op(opcode, None) => Ok(Inst::Op(*opcode, 0)),
        Stmt::Op(Opcode::SKIPCOND, Some(operand)) => {
            resolve_skipcond(src, operand).map(|cond| Inst::Op(Opcode::SKIPCOND, cond.bits()))
        }
        Stmt::Op(opcode, Some(operand)) => {
            resolve_address(src, operand, symbols).map(|addr| Inst::Op(*opcode, addr))
        }
        Stmt::Data(directive, operand) => {
            parse_number(src, operand, directive.radix(), u16::MAX as u32).map(Inst::Data)
        }
    }
}

fn resolve_skipcond(src: &[u8], operand: &Token) -> Result<SkipCond, AsmError> {
    let text = operand.text(src);
    match operand.kind {
        TokenKind::Ident => SkipCond::parse(&text),
        _ => None,
    }
    .ok_or_else(|| AsmError::at(operand, ErrorKind::InvalidSkipCondOperand(text.into_owned())))
}

fn resolve_address(src: &[u8], operand: &Token, symbols: &SymbolTable) -> Result<u16, AsmError> {
    match operand.kind {
        TokenKind::Number => parse_number(src, operand, 16, MAX_ADDRESS as u32),
        _ => symbols
            .resolve(&operand.text(src))
            .map_err(|kind| AsmError::at(operand, kind)),
    }
}
