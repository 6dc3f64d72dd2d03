use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    IntoPrimitive,
    TryFromPrimitive,
    EnumString,
    EnumIter,
    Display,
)]
#[repr(u8)]
#[strum(ascii_case_insensitive)]
pub enum Opcode {
    JNS = 0x0,
    LOAD = 0x1,
    STORE = 0x2,
    ADD = 0x3,
    SUBT = 0x4,
    INPUT = 0x5,
    OUTPUT = 0x6,
    HALT = 0x7,
    SKIPCOND = 0x8,
    JUMP = 0x9,
    CLEAR = 0xA,
    ADDI = 0xB,
    JUMPI = 0xC,
}

impl Opcode {
    /// Case-insensitive mnemonic lookup.
    pub fn parse(s: &str) -> Option<Self> {
        s.parse::<Self>().ok()
    }

    /// 4-bit code placed in bits 12-15 of the instruction word.
    pub fn code(self) -> u8 {
        self.into()
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::try_from(code).ok()
    }

    /// Whether the instruction consumes an operand.
    pub fn is_unary(self) -> bool {
        use Opcode::*;
        match self {
            JNS => true,
            LOAD => true,
            STORE => true,
            ADD => true,
            SUBT => true,
            INPUT => false,
            OUTPUT => false,
            HALT => false,
            SKIPCOND => true,
            JUMP => true,
            CLEAR => false,
            ADDI => true,
            JUMPI => true,
        }
    }
}
