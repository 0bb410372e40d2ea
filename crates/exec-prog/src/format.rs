//! Wire constants of the exec program encoding.
//!
//! The stream is a sequence of 8-byte words in host byte order. Every instruction starts with one
//! word: either one of the `EXEC_INSTR_*` markers (counted down from `u64::MAX`) or an index into
//! the syscall catalog.

use serde::Serialize;

/// Size of one encoding word in bytes.
pub const WORD_SIZE: usize = 8;

pub const EXEC_INSTR_EOF: u64 = u64::MAX;
pub const EXEC_INSTR_COPYIN: u64 = u64::MAX - 1;
pub const EXEC_INSTR_COPYOUT: u64 = u64::MAX - 2;

pub const EXEC_ARG_CONST: u64 = 0;
pub const EXEC_ARG_RESULT: u64 = 1;
pub const EXEC_ARG_DATA: u64 = 2;
pub const EXEC_ARG_CSUM: u64 = 3;

/// Flag bit in the `Data` argument's flags word; the remaining bits are the payload length.
pub const EXEC_ARG_DATA_READABLE: u64 = 1 << 63;

pub const EXEC_ARG_CSUM_INET: u64 = 0;

/// Result index of a call whose return value is not recorded.
pub const EXEC_NO_COPYOUT: u64 = u64::MAX;

/// How the executor renders an integer argument into memory.
///
/// Values outside the named constants are carried through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct BinaryFormat(pub u8);

impl BinaryFormat {
    pub const NATIVE: BinaryFormat = BinaryFormat(0);
    pub const BIG_ENDIAN: BinaryFormat = BinaryFormat(1);
    pub const STR_DEC: BinaryFormat = BinaryFormat(2);
    pub const STR_HEX: BinaryFormat = BinaryFormat(3);
    pub const STR_OCT: BinaryFormat = BinaryFormat(4);

    pub fn name(self) -> Option<&'static str> {
        match self {
            BinaryFormat::NATIVE => Some("native"),
            BinaryFormat::BIG_ENDIAN => Some("big_endian"),
            BinaryFormat::STR_DEC => Some("str_dec"),
            BinaryFormat::STR_HEX => Some("str_hex"),
            BinaryFormat::STR_OCT => Some("str_oct"),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CsumKind {
    /// RFC 1071 internet checksum.
    Inet,
}

impl CsumKind {
    pub fn from_u64(v: u64) -> Option<Self> {
        match v {
            EXEC_ARG_CSUM_INET => Some(CsumKind::Inet),
            _ => None,
        }
    }

    pub fn to_u64(self) -> u64 {
        match self {
            CsumKind::Inet => EXEC_ARG_CSUM_INET,
        }
    }
}

/// Kind of a single checksum contribution. Not validated by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CsumChunkKind(pub u64);

impl CsumChunkKind {
    /// `value` is an address, `size` bytes at it are summed.
    pub const DATA: CsumChunkKind = CsumChunkKind(0);
    /// `value` itself is summed as a `size`-byte integer.
    pub const CONST: CsumChunkKind = CsumChunkKind(1);

    pub fn name(self) -> Option<&'static str> {
        match self {
            CsumChunkKind::DATA => Some("data"),
            CsumChunkKind::CONST => Some("const"),
            _ => None,
        }
    }
}

/// Rounds `size` up to the next word boundary, `None` if that does not fit in a `u64`.
pub(crate) fn padded_len(size: u64) -> Option<u64> {
    size.checked_add(WORD_SIZE as u64 - 1)
        .map(|v| v / WORD_SIZE as u64 * WORD_SIZE as u64)
}
