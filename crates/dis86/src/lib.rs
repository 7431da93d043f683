//! 8086 machine code to NASM source.
//!
//! Decodes a flat byte stream of 16-bit real-mode instructions into text that NASM
//! (`bits 16`, `-f bin`) assembles back into the same bytes. Only a subset of the instruction
//! set is understood:
//!
//! - `mov` register/memory to/from register (`88`-`8B`)
//! - `mov` immediate to register (`B0`-`BF`)
//! - `add`/`sub` immediate to register/memory (`80`-`83`, `/0` and `/5`)
//! - `add` register/memory with register (`00`-`03`)
//!
//! Anything else is reported as an error; decoding never guesses.
//!
//! ```
//! let text = dis86::decode_all(&[0x89, 0xD9, 0xB0, 0x05]).unwrap();
//! assert_eq!(text, "bits 16\n\nmov cx, bx\nmov al, 5\n");
//! ```

pub mod cursor;
pub mod decoder;
pub mod inst;
pub mod opcode_tables;

pub use cursor::ByteCursor;
pub use decoder::{
    decode_all, decode_one, resolve_operand, DecodeError, DecodedInst, Decoder, ListingError,
    LISTING_HEADER,
};
pub use inst::{Address, Immediate, Instruction, Operand, Register, Width};
