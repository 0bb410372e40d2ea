//! Human-readable rendering of decoded programs, for diagnostics only.

use core::fmt;

use crate::format::BinaryFormat;
use crate::types::{
    ExecArg, ExecArgConst, ExecArgCsum, ExecArgData, ExecArgResult, ExecCsumChunk, ExecProg,
};

/// Longest data payload printed in full; longer payloads are elided.
const MAX_DUMP_DATA: usize = 64;

impl fmt::Display for ExecProg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ExecProg:")?;
        writeln!(f, "  Vars: {:?}", self.vars)?;
        for (i, call) in self.calls.iter().enumerate() {
            writeln!(f, "  Call {i}:")?;
            match call.result_index() {
                Some(index) => writeln!(f, "    Syscall: {} (Index: {index})", call.meta.name)?,
                None => writeln!(f, "    Syscall: {} (Index: none)", call.meta.name)?,
            }
            writeln!(f, "    Args:")?;
            for (j, arg) in call.args.iter().enumerate() {
                writeln!(f, "      Arg {j}: {arg}")?;
            }
            writeln!(f, "    Copyin:")?;
            for copyin in &call.copyin {
                writeln!(f, "      Addr: {:#x}, Arg: {}", copyin.addr, copyin.arg)?;
            }
            writeln!(f, "    Copyout:")?;
            for copyout in &call.copyout {
                writeln!(
                    f,
                    "      Index: {}, Addr: {:#x}, Size: {}",
                    copyout.index, copyout.addr, copyout.size
                )?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for ExecArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecArg::Const(arg) => fmt::Display::fmt(arg, f),
            ExecArg::Result(arg) => fmt::Display::fmt(arg, f),
            ExecArg::Data(arg) => fmt::Display::fmt(arg, f),
            ExecArg::Csum(arg) => fmt::Display::fmt(arg, f),
        }
    }
}

impl fmt::Display for BinaryFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "format#{}", self.0),
        }
    }
}

impl fmt::Display for ExecArgConst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Const(Size: {}, Value: {:#x}, Format: {}",
            self.size, self.value, self.format
        )?;
        if self.bitfield_length != 0 {
            write!(
                f,
                ", Bitfield: {}+{}",
                self.bitfield_offset, self.bitfield_length
            )?;
        }
        if self.pid_stride != 0 {
            write!(f, ", PidStride: {}", self.pid_stride)?;
        }
        f.write_str(")")
    }
}

impl fmt::Display for ExecArgResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Result(Size: {}, Index: {}, DivOp: {}, AddOp: {}, Default: {})",
            self.size, self.index, self.div_op, self.add_op, self.default
        )
    }
}

impl fmt::Display for ExecArgData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Data(Size: {}, Readable: {}, Data: ",
            self.data.len(),
            self.readable
        )?;
        let shown = &self.data[..self.data.len().min(MAX_DUMP_DATA)];
        for b in shown {
            write!(f, "{b:02x}")?;
        }
        if shown.len() < self.data.len() {
            f.write_str("...")?;
        }
        f.write_str(")")
    }
}

impl fmt::Display for ExecArgCsum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Csum(Size: {}, Kind: {:?}, Chunks: [", self.size, self.kind)?;
        for (i, chunk) in self.chunks.iter().enumerate() {
            if i != 0 {
                f.write_str(", ")?;
            }
            fmt::Display::fmt(chunk, f)?;
        }
        f.write_str("])")
    }
}

impl fmt::Display for ExecCsumChunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind.name() {
            Some(kind) => f.write_str(kind)?,
            None => write!(f, "chunk#{}", self.kind.0)?,
        }
        write!(f, "({:#x}, {})", self.value, self.size)
    }
}
