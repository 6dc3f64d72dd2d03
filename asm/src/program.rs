use marie_arch::{Inst, MAX_ADDRESS, MEMORY_SIZE};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AsmError, ErrorKind},
    symbol::Symbol,
};

/// One resolved memory word and where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub address: u16,
    pub word: u16,
    pub inst: Inst,
    pub line: usize,
    #[serde(skip)]
    pub column: usize,
}

impl Word {
    pub fn new(address: u16, inst: Inst, line: usize, column: usize) -> Self {
        Word {
            address,
            word: inst.to_bin(),
            inst,
            line,
            column,
        }
    }

    /// `word` encodes `inst` and the operand fits its field.
    fn is_consistent(&self) -> bool {
        let operand_fits = match self.inst {
            Inst::Op(opcode, operand) if opcode.is_unary() => operand <= MAX_ADDRESS,
            Inst::Op(_, operand) => operand == 0,
            Inst::Data(_) => true,
        };
        operand_fits && self.word == self.inst.to_bin()
    }
}

/// The assembled program: words sorted by address, plus the labels in
/// definition order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawProgram")]
pub struct Program {
    words: Vec<Word>,
    symbols: Vec<Symbol>,
}

/// Unchecked form of a loaded program.
#[derive(Deserialize)]
struct RawProgram {
    words: Vec<Word>,
    symbols: Vec<Symbol>,
}

impl TryFrom<RawProgram> for Program {
    type Error = AsmError;

    fn try_from(raw: RawProgram) -> Result<Self, Self::Error> {
        Program::new(raw.words, raw.symbols)
    }
}

impl Program {
    /// Sort words by address, rejecting two words at one address.
    ///
    /// Every address must lie in memory and every `word` must be the
    /// encoding of its `inst`.
    pub fn new(mut words: Vec<Word>, symbols: Vec<Symbol>) -> Result<Self, AsmError> {
        for w in &words {
            if w.address > MAX_ADDRESS {
                return Err(AsmError::new(
                    ErrorKind::AddressOutOfRange(w.address),
                    w.line,
                    w.column,
                ));
            }
            if !w.is_consistent() {
                return Err(AsmError::new(
                    ErrorKind::WordMismatch(w.address, w.word),
                    w.line,
                    w.column,
                ));
            }
        }

        words.sort_by_key(|w| w.address);
        if let Some(pair) = words.windows(2).find(|p| p[0].address == p[1].address) {
            // Stable sort keeps source order, so the later write is second.
            let (first, later) = (&pair[0], &pair[1]);
            return Err(AsmError::new(
                ErrorKind::AddressOverlap(later.address, first.line),
                later.line,
                later.column,
            ));
        }
        Ok(Program { words, symbols })
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Full memory image; unwritten words are zero.
    pub fn image(&self) -> Vec<u16> {
        let mut mem = vec![0u16; MEMORY_SIZE];
        for w in &self.words {
            mem[usize::from(w.address)] = w.word;
        }
        mem
    }

    /// Memory image as big-endian bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.image().iter().flat_map(|w| w.to_be_bytes()).collect()
    }

    /// `AAA WWWW` per word.
    pub fn hex(&self) -> String {
        self.words
            .iter()
            .map(|w| format!("{:03X} {:04X}\n", w.address, w.word))
            .collect()
    }

    /// `AAA: WWWW  MNEMONIC OPR` per word, optionally colored.
    pub fn listing(&self, color: bool) -> String {
        self.words
            .iter()
            .map(|w| {
                let inst = if color {
                    w.inst.cformat()
                } else {
                    w.inst.to_string()
                };
                format!("{:03X}: {:04X}  {}\n", w.address, w.word, inst)
            })
            .collect()
    }

    pub fn symbol_listing(&self) -> String {
        self.symbols
            .iter()
            .map(|s| format!("{:<16} {:03X}\n", s.name, s.address))
            .collect()
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}
