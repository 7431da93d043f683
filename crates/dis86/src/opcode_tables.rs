//! Fixed encoding tables for the supported 8086 subset.

use crate::inst::Width;

const REG8: [&str; 8] = ["al", "cl", "dl", "bl", "ah", "ch", "dh", "bh"];
const REG16: [&str; 8] = ["ax", "cx", "dx", "bx", "sp", "bp", "si", "di"];

/// Base-register expressions selected by the ModRM `rm` field in memory modes.
const EA_BASES: [&str; 8] = ["bx+si", "bx+di", "bp+si", "bp+di", "si", "di", "bp", "bx"];

/// Register name for a 3-bit register field. Only the low three bits of `code` are used.
#[must_use]
pub fn register_name(code: u8, width: Width) -> &'static str {
    let idx = usize::from(code & 0x7);
    match width {
        Width::Byte => REG8[idx],
        Width::Word => REG16[idx],
    }
}

/// Effective-address base expression for a 3-bit `rm` field.
#[must_use]
pub fn effective_address_base(rm: u8) -> &'static str {
    EA_BASES[usize::from(rm & 0x7)]
}

/// Instruction families recognised by the opcode classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpcodeFamily {
    /// `100010dw`: MOV register/memory to/from register.
    MovRegMem,
    /// `1011wreg`: MOV immediate to register.
    MovImmReg,
    /// `100000sw`: ADD/SUB/... immediate to register/memory, selected by ModRM.reg.
    ImmGroup,
    /// `000000dw`: ADD register/memory with register.
    AddRegMem,
}

/// `(mask, value, family)`, checked in order. The first entry whose masked opcode equals
/// `value` wins.
const FAMILIES: [(u8, u8, OpcodeFamily); 4] = [
    (0b1111_1100, 0b1000_1000, OpcodeFamily::MovRegMem),
    (0b1111_0000, 0b1011_0000, OpcodeFamily::MovImmReg),
    (0b1111_1100, 0b1000_0000, OpcodeFamily::ImmGroup),
    (0b1111_1100, 0b0000_0000, OpcodeFamily::AddRegMem),
];

#[must_use]
pub fn classify(opcode: u8) -> Option<OpcodeFamily> {
    FAMILIES
        .iter()
        .find(|(mask, value, _)| opcode & mask == *value)
        .map(|&(_, _, family)| family)
}

/// ModRM.reg values of the immediate group that the decoder understands.
pub const GROUP_ADD: u8 = 0b000;
pub const GROUP_SUB: u8 = 0b101;

/// Memory mode with no displacement; `rm == DIRECT_ADDRESS_RM` means a bare 16-bit address.
pub const MOD_MEM: u8 = 0b00;
pub const MOD_MEM_DISP8: u8 = 0b01;
pub const MOD_MEM_DISP16: u8 = 0b10;
pub const MOD_REG: u8 = 0b11;
pub const DIRECT_ADDRESS_RM: u8 = 0b110;
