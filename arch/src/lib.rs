pub mod cond;
pub mod directive;
pub mod encode;
pub mod inst;
pub mod op;

pub use cond::SkipCond;
pub use directive::Directive;
pub use encode::{decode, encode, MAX_ADDRESS, MEMORY_SIZE, OPERAND_MASK};
pub use inst::Inst;
pub use op::Opcode;
