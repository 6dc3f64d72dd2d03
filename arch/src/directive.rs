use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, EnumIter, Display,
)]
#[strum(ascii_case_insensitive)]
pub enum Directive {
    /// Move the address counter.
    ORG,
    /// Data word written in decimal.
    DEC,
    /// Data word written in hexadecimal.
    HEX,
}

impl Directive {
    pub fn parse(s: &str) -> Option<Self> {
        s.parse::<Self>().ok()
    }

    /// Radix of the numeric operand.
    pub fn radix(self) -> u32 {
        match self {
            Directive::ORG => 10,
            Directive::DEC => 10,
            Directive::HEX => 16,
        }
    }

    /// Whether the directive places a word in memory.
    pub fn emits_word(self) -> bool {
        !matches!(self, Directive::ORG)
    }
}

#[test]
fn test() {
    assert_eq!(Directive::parse("org"), Some(Directive::ORG));
    assert_eq!(Directive::parse("Hex"), Some(Directive::HEX));
    assert_eq!(Directive::parse("DB"), None);
    assert_eq!(Directive::HEX.radix(), 16);
    assert_eq!(Directive::DEC.radix(), 10);
    assert!(!Directive::ORG.emits_word());
    assert!(Directive::DEC.emits_word());
}
