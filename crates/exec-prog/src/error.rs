use thiserror::Error;

pub type Result<T> = std::result::Result<T, DecodeError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Fewer bytes remain than the current read requires.
    #[error("exec program overflow at offset {offset}: need {needed} bytes, {remaining} remain")]
    Overflow {
        offset: usize,
        needed: u64,
        remaining: usize,
    },

    #[error("bad syscall {index} (catalog has {count} entries)")]
    BadSyscall { index: u64, count: usize },

    /// The catalog returned an entry whose `id` is not the position it was looked up by.
    #[error("catalog entry at position {index} has id {id}")]
    SyscallIdMismatch { index: u64, id: usize },

    /// A `Data` or `Csum` argument appeared directly on a call.
    #[error("bad call arg #{arg} of call #{call}: {kind} arguments are only legal as copyin payloads")]
    BadCallArg {
        call: usize,
        arg: u64,
        kind: &'static str,
    },

    #[error("bad argument type {0}")]
    BadArgType(u64),

    #[error("unknown csum kind {0}")]
    UnknownCsumKind(u64),

    #[error("mismatching number of vars: {populated}/{required}")]
    VarsMismatch { populated: usize, required: u64 },

    #[error("exec program is {len} bytes, limit is {limit}")]
    ProgramTooLarge { len: usize, limit: usize },

    #[error("variable index {index} exceeds limit {limit}")]
    VarIndexTooLarge { index: u64, limit: usize },

    #[error("{copyin} copyin and {copyout} copyout instructions are not followed by any call")]
    DanglingInstructions { copyin: usize, copyout: usize },
}

impl DecodeError {
    /// Stable short name, suitable as a structured logging field.
    pub fn kind(&self) -> &'static str {
        match self {
            DecodeError::Overflow { .. } => "overflow",
            DecodeError::BadSyscall { .. } => "bad_syscall",
            DecodeError::SyscallIdMismatch { .. } => "syscall_id_mismatch",
            DecodeError::BadCallArg { .. } => "bad_call_arg",
            DecodeError::BadArgType(_) => "bad_arg_type",
            DecodeError::UnknownCsumKind(_) => "unknown_csum_kind",
            DecodeError::VarsMismatch { .. } => "vars_mismatch",
            DecodeError::ProgramTooLarge { .. } => "program_too_large",
            DecodeError::VarIndexTooLarge { .. } => "var_index_too_large",
            DecodeError::DanglingInstructions { .. } => "dangling_instructions",
        }
    }
}
