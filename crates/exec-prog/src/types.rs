use serde::{Serialize, Serializer};

use crate::catalog::Syscall;
use crate::format::{BinaryFormat, CsumChunkKind, CsumKind, EXEC_NO_COPYOUT};

/// A decoded exec program.
///
/// `vars` holds one slot per variable index referenced anywhere in the program, pre-populated with
/// the defaults carried by result arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecProg<'c> {
    pub calls: Vec<ExecCall<'c>>,
    pub vars: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecCall<'c> {
    #[serde(rename = "syscall", serialize_with = "serialize_meta")]
    pub meta: &'c Syscall,
    /// Variable slot receiving the call's return value, or [`EXEC_NO_COPYOUT`].
    pub index: u64,
    pub args: Vec<ExecArg>,
    pub copyin: Vec<ExecCopyin>,
    pub copyout: Vec<ExecCopyout>,
}

impl ExecCall<'_> {
    pub fn result_index(&self) -> Option<u64> {
        (self.index != EXEC_NO_COPYOUT).then_some(self.index)
    }
}

fn serialize_meta<S: Serializer>(meta: &&Syscall, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&meta.name)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecCopyin {
    pub addr: u64,
    pub arg: ExecArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExecCopyout {
    pub index: u64,
    pub addr: u64,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExecArg {
    Const(ExecArgConst),
    Result(ExecArgResult),
    Data(ExecArgData),
    Csum(ExecArgCsum),
}

impl ExecArg {
    pub fn kind_name(&self) -> &'static str {
        match self {
            ExecArg::Const(_) => "const",
            ExecArg::Result(_) => "result",
            ExecArg::Data(_) => "data",
            ExecArg::Csum(_) => "csum",
        }
    }

    /// Only scalar arguments may be passed to a syscall directly; the rest go through copyin.
    pub fn is_scalar(&self) -> bool {
        matches!(self, ExecArg::Const(_) | ExecArg::Result(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ExecArgConst {
    pub size: u8,
    pub format: BinaryFormat,
    pub value: u64,
    pub bitfield_offset: u8,
    pub bitfield_length: u8,
    /// The executor adds `pid_stride * pid` to `value`.
    pub pid_stride: u32,
}

/// Reference to a variable slot: the executor computes `vars[index] / div_op + add_op`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ExecArgResult {
    pub size: u8,
    pub format: BinaryFormat,
    pub index: u64,
    pub div_op: u64,
    pub add_op: u64,
    pub default: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ExecArgData {
    pub data: Vec<u8>,
    pub readable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecArgCsum {
    pub size: u64,
    pub kind: CsumKind,
    pub chunks: Vec<ExecCsumChunk>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExecCsumChunk {
    pub kind: CsumChunkKind,
    pub value: u64,
    pub size: u64,
}
