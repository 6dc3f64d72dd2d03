use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Operand of `SKIPCOND`. The discriminant is the operand field itself,
/// with the condition held in bits 10-11.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    IntoPrimitive,
    TryFromPrimitive,
    EnumString,
    EnumIter,
    Display,
)]
#[repr(u16)]
#[strum(ascii_case_insensitive)]
pub enum SkipCond {
    LT = 0x000,
    EQ = 0x400,
    GT = 0x800,
}

impl SkipCond {
    pub fn parse(s: &str) -> Option<Self> {
        s.parse::<Self>().ok()
    }

    pub fn bits(self) -> u16 {
        self.into()
    }

    pub fn from_bits(bits: u16) -> Option<Self> {
        Self::try_from(bits).ok()
    }
}

#[test]
fn test() {
    assert_eq!(SkipCond::parse("eq"), Some(SkipCond::EQ));
    assert_eq!(SkipCond::parse("Gt"), Some(SkipCond::GT));
    assert_eq!(SkipCond::parse("LE"), None);
    assert_eq!(SkipCond::LT.bits(), 0x000);
    assert_eq!(SkipCond::EQ.bits(), 0x400);
    assert_eq!(SkipCond::GT.bits(), 0x800);
    assert_eq!(SkipCond::from_bits(0x800), Some(SkipCond::GT));
    assert_eq!(SkipCond::from_bits(0x001), None);
}
