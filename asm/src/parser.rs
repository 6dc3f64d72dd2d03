//! Pass 1: structural scan and label collection.

use log::{debug, trace};
use marie_arch::{Directive, Opcode, MEMORY_SIZE};
use std::num::IntErrorKind;

use crate::{
    error::{AsmError, ErrorKind},
    symbol::SymbolTable,
    token::{Token, TokenKind},
};

// ----------------------------------------------------------------------------
// Statement

/// What a record places in memory. The operand is still the raw token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Op(Opcode, Option<Token>),
    Data(Directive, Token),
}

/// A statement bound to its address. `head` is the mnemonic token and is
/// used for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub stmt: Stmt,
    pub address: u16,
    pub head: Token,
}

#[derive(Debug)]
pub struct Parsed {
    pub records: Vec<Record>,
    pub symbols: SymbolTable,
}

// ----------------------------------------------------------------------------
// Parser

struct Parser<'a> {
    src: &'a [u8],
    pc: u16,
    records: Vec<Record>,
    symbols: SymbolTable,
}

/// Run pass 1 over a token sequence.
pub fn parse(src: &[u8], tokens: &[Token]) -> Result<Parsed, AsmError> {
    let mut parser = Parser::new(src);
    for line in tokens.chunk_by(|a, b| a.line == b.line) {
        parser.parse_line(line)?;
    }
    debug!(
        "pass 1: {} records, {} labels",
        parser.records.len(),
        parser.symbols.len()
    );
    Ok(Parsed {
        records: parser.records,
        symbols: parser.symbols,
    })
}

impl<'a> Parser<'a> {
    fn new(src: &'a [u8]) -> Self {
        Parser {
            src,
            pc: 0,
            records: vec![],
            symbols: SymbolTable::new(),
        }
    }

    fn parse_line(&mut self, line: &[Token]) -> Result<(), AsmError> {
        // LABEL, [LABEL, ...] MNEMONIC [OPERAND]
        let mut rest = line;
        loop {
            match rest {
                [label, comma, tail @ ..]
                    if label.kind == TokenKind::Ident && comma.kind == TokenKind::Comma =>
                {
                    self.define_label(label)?;
                    rest = tail;
                }
                _ => break,
            }
        }

        let Some((head, args)) = rest.split_first() else {
            let Some(last) = line.last() else {
                return Ok(());
            };
            return Err(self.unexpected(last, "mnemonic after label"));
        };

        match head.kind {
            TokenKind::Opcode(opcode) => self.parse_op(opcode, head, args),
            TokenKind::Directive(directive) => self.parse_directive(directive, head, args),
            _ => Err(self.unexpected(head, "label or mnemonic")),
        }
    }

    fn define_label(&mut self, label: &Token) -> Result<(), AsmError> {
        if usize::from(self.pc) >= MEMORY_SIZE {
            return Err(AsmError::at(label, ErrorKind::AddressSpaceExhausted));
        }
        let name = label.text(self.src);
        self.symbols
            .define(&name, self.pc, label.line)
            .map_err(|kind| AsmError::at(label, kind))?;
        trace!("label {} = 0x{:03X}", name, self.pc);
        Ok(())
    }

    fn parse_op(&mut self, opcode: Opcode, head: &Token, args: &[Token]) -> Result<(), AsmError> {
        let operand = self.operand(head, args)?;
        match (opcode.is_unary(), operand) {
            (true, None) => Err(AsmError::at(
                head,
                ErrorKind::OperandArityMismatch(opcode.to_string(), "requires an operand"),
            )),
            (false, Some(operand)) => Err(AsmError::at(
                &operand,
                ErrorKind::OperandArityMismatch(opcode.to_string(), "takes no operand"),
            )),
            (_, operand) => self.emit(Stmt::Op(opcode, operand), head),
        }
    }

    fn parse_directive(
        &mut self,
        directive: Directive,
        head: &Token,
        args: &[Token],
    ) -> Result<(), AsmError> {
        let Some(operand) = self.operand(head, args)? else {
            return Err(AsmError::at(
                head,
                ErrorKind::OperandArityMismatch(directive.to_string(), "requires an operand"),
            ));
        };
        if operand.kind != TokenKind::Number {
            return Err(self.unexpected(&operand, "numeric literal"));
        }

        match directive {
            Directive::ORG => {
                let max = MEMORY_SIZE as u32 - 1;
                let origin = parse_number(self.src, &operand, directive.radix(), max)?;
                trace!("origin 0x{:03X}", origin);
                self.pc = origin;
                Ok(())
            }
            Directive::DEC | Directive::HEX => self.emit(Stmt::Data(directive, operand), head),
        }
    }

    /// The single optional operand of a statement.
    fn operand(&self, head: &Token, args: &[Token]) -> Result<Option<Token>, AsmError> {
        match args {
            [] => Ok(None),
            [operand, extra @ ..] => {
                if !matches!(operand.kind, TokenKind::Number | TokenKind::Ident) {
                    return Err(self.unexpected(operand, "operand"));
                }
                if let Some(extra) = extra.first() {
                    if extra.kind == TokenKind::Invalid {
                        return Err(self.unexpected(extra, "end of line"));
                    }
                    return Err(AsmError::at(
                        extra,
                        ErrorKind::OperandArityMismatch(
                            head.text(self.src).to_ascii_uppercase(),
                            "takes a single operand",
                        ),
                    ));
                }
                Ok(Some(*operand))
            }
        }
    }

    fn emit(&mut self, stmt: Stmt, head: &Token) -> Result<(), AsmError> {
        // 4095 is the last usable address; only a word past it is rejected.
        if usize::from(self.pc) >= MEMORY_SIZE {
            return Err(AsmError::at(head, ErrorKind::AddressSpaceExhausted));
        }
        self.records.push(Record {
            stmt,
            address: self.pc,
            head: *head,
        });
        self.pc += 1;
        Ok(())
    }

    fn unexpected(&self, token: &Token, expected: &'static str) -> AsmError {
        AsmError::at(
            token,
            ErrorKind::UnexpectedToken {
                found: token.text(self.src).into_owned(),
                expected,
            },
        )
    }
}

/// Parse a numeric literal token in the given radix, bounded by `max`.
pub(crate) fn parse_number(
    src: &[u8],
    token: &Token,
    radix: u32,
    max: u32,
) -> Result<u16, AsmError> {
    let text = token.text(src);
    let value = match u32::from_str_radix(&text, radix) {
        Ok(value) => value,
        Err(err) if *err.kind() == IntErrorKind::PosOverflow => u32::MAX,
        Err(_) => {
            return Err(AsmError::at(
                token,
                ErrorKind::MalformedNumericLiteral(text.into_owned()),
            ))
        }
    };
    if value > max {
        return Err(AsmError::at(
            token,
            ErrorKind::OperandOutOfRange(text.into_owned(), max as u16),
        ));
    }
    Ok(value as u16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn pass1(code: &str) -> Result<Parsed, AsmError> {
        let tokens = tokenize(code.as_bytes())?;
        parse(code.as_bytes(), &tokens)
    }

    #[test]
    fn addresses_follow_org() {
        let parsed = pass1("LOAD 1\nORG 10\nHALT\nDEC 5\nORG 2\nCLEAR").unwrap();
        let addrs: Vec<u16> = parsed.records.iter().map(|r| r.address).collect();
        assert_eq!(addrs, vec![0, 10, 11, 2]);
    }

    #[test]
    fn operands_stay_raw() {
        let parsed = pass1("JUMP LATER\nLATER, HALT").unwrap();
        match &parsed.records[0].stmt {
            Stmt::Op(Opcode::JUMP, Some(token)) => {
                assert_eq!(token.kind, TokenKind::Ident);
                assert_eq!(token.text(b"JUMP LATER\nLATER, HALT"), "LATER");
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(parsed.symbols.resolve("later"), Ok(1));
    }

    #[test]
    fn stacked_labels_share_address() {
        let parsed = pass1("HALT\nA, B, CLEAR").unwrap();
        assert_eq!(parsed.symbols.resolve("A"), Ok(1));
        assert_eq!(parsed.symbols.resolve("B"), Ok(1));
    }

    #[test]
    fn label_without_mnemonic() {
        let err = pass1("ALONE,").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::UnexpectedToken { ref found, .. } if found == ","));
        assert_eq!((err.line, err.column), (1, 6));

        let err = pass1("HALT\nA, B,").unwrap_err();
        assert_eq!((err.line, err.column), (2, 5));
    }

    #[test]
    fn number_radix_and_bounds() {
        let code = b"7FF";
        let token = tokenize(code).unwrap()[0];
        assert_eq!(parse_number(code, &token, 16, 0xFFF), Ok(0x7FF));
        let err = parse_number(code, &token, 10, 0xFFF).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::MalformedNumericLiteral(_)));

        let code = b"123456789ABCDEF";
        let token = tokenize(code).unwrap()[0];
        let err = parse_number(code, &token, 16, 0xFFF).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::OperandOutOfRange(_, 0xFFF)));
    }
}
