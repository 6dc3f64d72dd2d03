use crate::{
    cond::SkipCond,
    encode::{decode, encode},
    op::Opcode,
};

use color_print::cformat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fully resolved memory word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Inst {
    Op(Opcode, u16),
    Data(u16),
}

impl Inst {
    pub fn to_bin(self) -> u16 {
        match self {
            Inst::Op(opcode, operand) => encode(opcode, operand),
            Inst::Data(value) => value,
        }
    }

    /// Words whose top nibble is not a known opcode read back as data.
    pub fn from_bin(bin: u16) -> Inst {
        let (code, operand) = decode(bin);
        match Opcode::from_code(code) {
            Some(opcode) if opcode.is_unary() => Inst::Op(opcode, operand),
            Some(opcode) if operand == 0 => Inst::Op(opcode, 0),
            _ => Inst::Data(bin),
        }
    }
}

impl fmt::Display for Inst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Inst::Op(opcode, operand) if opcode.is_unary() => {
                write!(f, "{:<8} {:03X}", opcode.to_string(), operand)
            }
            Inst::Op(opcode, _) => write!(f, "{}", opcode),
            Inst::Data(value) => write!(f, "{:<8} {:04X}", "HEX", value),
        }
    }
}

impl Inst {
    pub fn cformat(&self) -> String {
        match *self {
            Inst::Op(Opcode::SKIPCOND, operand) => match SkipCond::from_bits(operand) {
                Some(cond) => cformat!(
                    "<r>{:<8}</> <y>{:03X}</> <g>({})</>",
                    "SKIPCOND",
                    operand,
                    cond
                ),
                None => cformat!("<r>{:<8}</> <y>{:03X}</>", "SKIPCOND", operand),
            },
            Inst::Op(opcode, operand) if opcode.is_unary() => {
                cformat!("<r>{:<8}</> <y>{:03X}</>", opcode.to_string(), operand)
            }
            Inst::Op(opcode, _) => cformat!("<r>{}</>", opcode),
            Inst::Data(value) => cformat!("<b>{:<8}</> <y>{:04X}</>", "HEX", value),
        }
    }
}
