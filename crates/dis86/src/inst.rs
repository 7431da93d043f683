//! Decoded instruction model and its NASM-syntax rendering.

use core::fmt;

use crate::opcode_tables::{effective_address_base, register_name};

/// Operand size selected by an opcode's `w` bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Width {
    Byte,
    Word,
}

impl Width {
    #[must_use]
    pub fn from_w_bit(w: bool) -> Self {
        if w {
            Width::Word
        } else {
            Width::Byte
        }
    }

    #[must_use]
    pub fn mask(self) -> u16 {
        match self {
            Width::Byte => 0x00FF,
            Width::Word => 0xFFFF,
        }
    }

    #[must_use]
    pub fn truncate(self, value: u16) -> u16 {
        value & self.mask()
    }

    /// NASM size keyword used when an operand's size cannot be inferred.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Width::Byte => "byte",
            Width::Word => "word",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Register {
    /// 3-bit register field.
    pub code: u8,
    pub width: Width,
}

impl Register {
    #[must_use]
    pub fn new(code: u8, width: Width) -> Self {
        Self {
            code: code & 0x7,
            width,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        register_name(self.code, self.width)
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A 16-bit memory reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Address {
    /// `mod=00 rm=110`: absolute address with no base registers.
    Direct(u16),
    /// Base-register expression selected by `rm`, plus a signed displacement.
    Based { rm: u8, disp: i16 },
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Address::Direct(addr) => write!(f, "[{addr}]"),
            Address::Based { rm, disp } => {
                write!(f, "[{}", effective_address_base(rm))?;
                match disp {
                    0 => {}
                    d if d < 0 => write!(f, "-{}", d.unsigned_abs())?,
                    d => write!(f, "+{d}")?,
                }
                f.write_str("]")
            }
        }
    }
}

/// An immediate operand, stored already masked to the width that consumed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Immediate {
    value: u16,
    pub width: Width,
}

impl Immediate {
    #[must_use]
    pub fn new(value: u16, width: Width) -> Self {
        Self {
            value: width.truncate(value),
            width,
        }
    }

    #[must_use]
    pub fn value(&self) -> u16 {
        self.value
    }
}

impl fmt::Display for Immediate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Reg(Register),
    Mem(Address),
    Imm(Immediate),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Reg(r) => write!(f, "{r}"),
            Operand::Mem(addr) => write!(f, "{addr}"),
            Operand::Imm(imm) => write!(f, "{imm}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    Mov {
        dst: Operand,
        src: Operand,
    },
    MovImmediate {
        dst: Register,
        value: u16,
        width: Width,
    },
    /// `add` keeps the encoding's direction bit: with `direction == false` the line reads
    /// `add a, b`, otherwise `add b, a`.
    Add {
        a: Operand,
        b: Operand,
        direction: bool,
    },
    Sub {
        dst: Operand,
        imm: Immediate,
    },
    // No opcode pattern produces this yet.
    Cmp {
        dst: Operand,
        imm: Immediate,
    },
}

impl Instruction {
    #[must_use]
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Instruction::Mov { .. } | Instruction::MovImmediate { .. } => "mov",
            Instruction::Add { .. } => "add",
            Instruction::Sub { .. } => "sub",
            Instruction::Cmp { .. } => "cmp",
        }
    }
}

fn write_binary(
    f: &mut fmt::Formatter<'_>,
    mnemonic: &str,
    dst: &Operand,
    src: &Operand,
) -> fmt::Result {
    match (dst, src) {
        // NASM cannot infer the operand size from a memory reference and an immediate.
        (Operand::Mem(_), Operand::Imm(imm)) => {
            write!(f, "{mnemonic} {} {dst}, {src}", imm.width.keyword())
        }
        _ => write!(f, "{mnemonic} {dst}, {src}"),
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mnemonic = self.mnemonic();
        match self {
            Instruction::Mov { dst, src } => write_binary(f, mnemonic, dst, src),
            Instruction::MovImmediate { dst, value, width } => {
                write!(f, "{mnemonic} {dst}, {}", width.truncate(*value))
            }
            Instruction::Add { a, b, direction } => {
                if *direction {
                    write_binary(f, mnemonic, b, a)
                } else {
                    write_binary(f, mnemonic, a, b)
                }
            }
            Instruction::Sub { dst, imm } | Instruction::Cmp { dst, imm } => {
                write_binary(f, mnemonic, dst, &Operand::Imm(*imm))
            }
        }
    }
}
