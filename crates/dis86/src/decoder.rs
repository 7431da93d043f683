use thiserror::Error;
use tracing::{debug, trace};

use crate::cursor::ByteCursor;
use crate::inst::{Address, Immediate, Instruction, Operand, Register, Width};
use crate::opcode_tables::{
    classify, OpcodeFamily, DIRECT_ADDRESS_RM, GROUP_ADD, GROUP_SUB, MOD_MEM, MOD_MEM_DISP16,
    MOD_MEM_DISP8, MOD_REG,
};

/// Header emitted before the first decoded instruction.
pub const LISTING_HEADER: &str = "bits 16\n\n";

/// Failure to decode a single instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The byte stream ended in the middle of an instruction.
    #[error("unexpected end of input at byte offset {offset}")]
    UnexpectedEndOfInput { offset: usize },

    #[error("unknown opcode {opcode:#04x} ({opcode:08b})")]
    UnknownOpcode { opcode: u8 },

    /// A ModRM mode outside `0..=3`. Only reachable by calling [`resolve_operand`] directly.
    #[error("invalid addressing mode {0:#b}")]
    InvalidAddressingMode(u8),

    #[error("unsupported immediate group operation /{reg}")]
    UnsupportedImmediateGroupVariant { reg: u8 },
}

/// A decode failure annotated with the instruction it happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("failed to decode instruction {index} (byte offset {offset})")]
pub struct ListingError {
    /// Zero-based index of the instruction being decoded.
    pub index: usize,
    /// Offset of that instruction's opcode byte.
    pub offset: usize,
    #[source]
    pub source: DecodeError,
}

#[derive(Debug, Clone, Copy)]
struct ModRm {
    mod_bits: u8,
    reg: u8,
    rm: u8,
}

fn parse_modrm(byte: u8) -> ModRm {
    ModRm {
        mod_bits: (byte >> 6) & 0x3,
        reg: (byte >> 3) & 0x7,
        rm: byte & 0x7,
    }
}

/// Resolve the register/memory operand described by a ModRM `mod`/`rm` pair, consuming any
/// displacement bytes that follow.
pub fn resolve_operand(
    cursor: &mut ByteCursor<'_>,
    mod_bits: u8,
    rm: u8,
    width: Width,
) -> Result<Operand, DecodeError> {
    let rm = rm & 0x7;
    let addr = match mod_bits {
        MOD_REG => return Ok(Operand::Reg(Register::new(rm, width))),
        MOD_MEM if rm == DIRECT_ADDRESS_RM => Address::Direct(cursor.next_u16_le()?),
        MOD_MEM => Address::Based { rm, disp: 0 },
        MOD_MEM_DISP8 => {
            let disp = cursor.next_u8()? as i8;
            Address::Based {
                rm,
                disp: i16::from(disp),
            }
        }
        MOD_MEM_DISP16 => Address::Based {
            rm,
            disp: cursor.next_u16_le()? as i16,
        },
        other => return Err(DecodeError::InvalidAddressingMode(other)),
    };
    Ok(Operand::Mem(addr))
}

/// Decode one instruction starting at the cursor's position.
///
/// On success the cursor has advanced past exactly the bytes of that instruction.
pub fn decode_one(cursor: &mut ByteCursor<'_>) -> Result<Instruction, DecodeError> {
    let opcode = cursor.next_u8()?;
    let family = classify(opcode).ok_or(DecodeError::UnknownOpcode { opcode })?;

    let inst = match family {
        OpcodeFamily::MovRegMem => {
            let (rm_operand, reg, to_reg) = decode_reg_rm(cursor, opcode)?;
            if to_reg {
                Instruction::Mov {
                    dst: reg,
                    src: rm_operand,
                }
            } else {
                Instruction::Mov {
                    dst: rm_operand,
                    src: reg,
                }
            }
        }
        OpcodeFamily::MovImmReg => {
            let width = Width::from_w_bit(opcode & 0b1000 != 0);
            let value = read_immediate(cursor, width)?;
            Instruction::MovImmediate {
                dst: Register::new(opcode, width),
                value: width.truncate(value),
                width,
            }
        }
        OpcodeFamily::ImmGroup => decode_imm_group(cursor, opcode)?,
        OpcodeFamily::AddRegMem => {
            let (rm_operand, reg, direction) = decode_reg_rm(cursor, opcode)?;
            Instruction::Add {
                a: rm_operand,
                b: reg,
                direction,
            }
        }
    };
    Ok(inst)
}

/// Shared `dw` + ModRM layout: returns the r/m operand, the ModRM.reg register and the `d` bit.
fn decode_reg_rm(
    cursor: &mut ByteCursor<'_>,
    opcode: u8,
) -> Result<(Operand, Operand, bool), DecodeError> {
    let direction = opcode & 0b10 != 0;
    let width = Width::from_w_bit(opcode & 0b1 != 0);
    let modrm = parse_modrm(cursor.next_u8()?);
    let rm_operand = resolve_operand(cursor, modrm.mod_bits, modrm.rm, width)?;
    let reg = Operand::Reg(Register::new(modrm.reg, width));
    Ok((rm_operand, reg, direction))
}

fn read_immediate(cursor: &mut ByteCursor<'_>, width: Width) -> Result<u16, DecodeError> {
    match width {
        Width::Word => cursor.next_u16_le(),
        Width::Byte => cursor.next_u8().map(u16::from),
    }
}

fn decode_imm_group(cursor: &mut ByteCursor<'_>, opcode: u8) -> Result<Instruction, DecodeError> {
    let width = Width::from_w_bit(opcode & 0b1 != 0);
    let modrm = parse_modrm(cursor.next_u8()?);
    let dst = resolve_operand(cursor, modrm.mod_bits, modrm.rm, width)?;

    match modrm.reg {
        GROUP_ADD => {
            let imm = match opcode {
                0x81 => Immediate::new(cursor.next_u16_le()?, Width::Word),
                // imm8 sign-extended to a word operand.
                0x83 => {
                    let b = cursor.next_u8()? as i8;
                    Immediate::new(i16::from(b) as u16, Width::Word)
                }
                _ => Immediate::new(u16::from(cursor.next_u8()?), Width::Byte),
            };
            Ok(Instruction::Add {
                a: dst,
                b: Operand::Imm(imm),
                direction: false,
            })
        }
        GROUP_SUB => {
            let imm = Immediate::new(read_immediate(cursor, width)?, width);
            Ok(Instruction::Sub { dst, imm })
        }
        reg => Err(DecodeError::UnsupportedImmediateGroupVariant { reg }),
    }
}

/// One instruction together with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedInst {
    pub offset: usize,
    pub len: u8,
    pub inst: Instruction,
}

impl DecodedInst {
    #[must_use]
    pub fn next_offset(&self) -> usize {
        self.offset + usize::from(self.len)
    }
}

/// Streaming decoder over a whole buffer.
///
/// Yields instructions in order until the buffer is exhausted. The first error is yielded once
/// and ends the iteration.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    cursor: ByteCursor<'a>,
    index: usize,
    failed: bool,
}

impl<'a> Decoder<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            cursor: ByteCursor::new(bytes),
            index: 0,
            failed: false,
        }
    }
}

impl Iterator for Decoder<'_> {
    type Item = Result<DecodedInst, ListingError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || !self.cursor.has_more() {
            return None;
        }

        let index = self.index;
        let offset = self.cursor.position();
        match decode_one(&mut self.cursor) {
            Ok(inst) => {
                // An 8086 instruction in this subset is at most six bytes long.
                let len = (self.cursor.position() - offset) as u8;
                trace!(index, offset, len, %inst, "decoded instruction");
                self.index += 1;
                Some(Ok(DecodedInst { offset, len, inst }))
            }
            Err(source) => {
                self.failed = true;
                Some(Err(ListingError {
                    index,
                    offset,
                    source,
                }))
            }
        }
    }
}

/// Decode an entire buffer into a NASM listing: the `bits 16` header, a blank line, then one
/// line per instruction.
///
/// Decoding stops at the first malformed instruction; no partial listing is returned.
pub fn decode_all(bytes: &[u8]) -> Result<String, ListingError> {
    use core::fmt::Write;

    let mut out = String::from(LISTING_HEADER);
    let mut count = 0usize;
    for decoded in Decoder::new(bytes) {
        let decoded = decoded?;
        // Writing to a `String` cannot fail.
        let _ = writeln!(out, "{}", decoded.inst);
        count += 1;
    }
    debug!(instructions = count, bytes = bytes.len(), "decoded listing");
    Ok(out)
}
