//! Decoder for exec programs: the compact, word-oriented encoding of a syscall sequence that a
//! program generator hands to an out-of-process executor.
//!
//! The input may cross a trust boundary, so decoding is single-pass and fail-fast: any truncated
//! or malformed stream is rejected with a [`DecodeError`] and no partial program is returned.
//!
//! ```
//! use exec_prog::{decode_exec, SyscallTable, EXEC_INSTR_EOF, EXEC_NO_COPYOUT};
//!
//! let catalog = SyscallTable::anonymous(1);
//! let words = [0, EXEC_NO_COPYOUT, 0, EXEC_INSTR_EOF];
//! let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_ne_bytes()).collect();
//!
//! let prog = decode_exec(&catalog, &bytes)?;
//! assert_eq!(prog.calls.len(), 1);
//! assert_eq!(prog.calls[0].meta.name, "syscall#0");
//! assert!(prog.vars.is_empty());
//! # Ok::<(), exec_prog::DecodeError>(())
//! ```

#![forbid(unsafe_code)]

mod call;
mod catalog;
mod cursor;
mod decode;
mod dump;
mod encode;
mod error;
mod format;
mod types;
mod vars;

pub use crate::catalog::{CatalogError, Syscall, SyscallCatalog, SyscallDesc, SyscallTable};
pub use crate::cursor::WordCursor;
pub use crate::decode::{
    decode_exec, decode_exec_with, DecodeOptions, MAX_PROGRAM_BYTES, MAX_VARS,
};
pub use crate::encode::{encode_arg_into, encode_exec, encode_exec_into};
pub use crate::error::{DecodeError, Result};
pub use crate::format::{
    BinaryFormat, CsumChunkKind, CsumKind, EXEC_ARG_CONST, EXEC_ARG_CSUM, EXEC_ARG_CSUM_INET,
    EXEC_ARG_DATA, EXEC_ARG_DATA_READABLE, EXEC_ARG_RESULT, EXEC_INSTR_COPYIN,
    EXEC_INSTR_COPYOUT, EXEC_INSTR_EOF, EXEC_NO_COPYOUT, WORD_SIZE,
};
pub use crate::types::{
    ExecArg, ExecArgConst, ExecArgCsum, ExecArgData, ExecArgResult, ExecCall, ExecCopyin,
    ExecCopyout, ExecCsumChunk, ExecProg,
};
