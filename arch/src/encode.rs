use crate::op::Opcode;

pub const MEMORY_SIZE: usize = 4096;
pub const MAX_ADDRESS: u16 = (MEMORY_SIZE - 1) as u16;
pub const OPERAND_MASK: u16 = 0x0FFF;

// ----------------------------------------------------------------------------

fn enc_format(code: u8, operand: u16) -> u16 {
    (((code & 0xF) as u16) << 12) | (operand & OPERAND_MASK)
}

fn dec_format(word: u16) -> (u8, u16) {
    let code = ((word >> 12) & 0xF) as u8;
    let operand = word & OPERAND_MASK;
    (code, operand)
}

#[test]
fn test_format_all() {
    for code in 0..=0xF {
        for operand in 0..=OPERAND_MASK {
            let word = enc_format(code, operand);
            let (dec_code, dec_operand) = dec_format(word);
            assert_eq!(code, dec_code);
            assert_eq!(operand, dec_operand);
        }
    }
}

// ----------------------------------------------------------------------------

/// Pack an opcode and its resolved operand into an instruction word.
///
/// Nullary opcodes always get an all-zero operand field. For `SKIPCOND` the
/// operand is the condition pattern, already positioned in bits 10-11.
pub fn encode(opcode: Opcode, operand: u16) -> u16 {
    if opcode.is_unary() {
        enc_format(opcode.code(), operand)
    } else {
        enc_format(opcode.code(), 0)
    }
}

/// Split an instruction word into its 4-bit code and 12-bit operand.
pub fn decode(word: u16) -> (u8, u16) {
    dec_format(word)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cond::SkipCond;
    use strum::IntoEnumIterator;

    #[test]
    fn unary_round_trip() {
        for op in Opcode::iter().filter(|op| op.is_unary()) {
            for operand in 0..=MAX_ADDRESS {
                let (code, dec_operand) = decode(encode(op, operand));
                assert_eq!(Opcode::from_code(code), Some(op));
                assert_eq!(dec_operand, operand);
            }
        }
    }

    #[test]
    fn nullary_operand_is_zero() {
        for op in Opcode::iter().filter(|op| !op.is_unary()) {
            for operand in [0, 1, 0x123, MAX_ADDRESS] {
                assert_eq!(encode(op, operand), (op.code() as u16) << 12);
            }
        }
    }

    #[test]
    fn known_words() {
        assert_eq!(encode(Opcode::HALT, 0), 0x7000);
        assert_eq!(encode(Opcode::LOAD, 0x003), 0x1003);
        assert_eq!(encode(Opcode::JNS, 0xFFF), 0x0FFF);
        assert_eq!(encode(Opcode::JUMPI, 0x010), 0xC010);
        assert_eq!(encode(Opcode::SKIPCOND, SkipCond::EQ.bits()), 0x8400);
        assert_eq!(encode(Opcode::SKIPCOND, SkipCond::GT.bits()), 0x8800);
    }
}
