use crate::call::CallAssembler;
use crate::catalog::SyscallCatalog;
use crate::cursor::WordCursor;
use crate::error::{DecodeError, Result};
use crate::format::{
    BinaryFormat, CsumChunkKind, CsumKind, EXEC_ARG_CONST, EXEC_ARG_CSUM, EXEC_ARG_DATA,
    EXEC_ARG_DATA_READABLE, EXEC_ARG_RESULT, EXEC_INSTR_COPYIN, EXEC_INSTR_COPYOUT,
    EXEC_INSTR_EOF, WORD_SIZE,
};
use crate::types::{
    ExecArg, ExecArgConst, ExecArgCsum, ExecArgData, ExecArgResult, ExecCopyin, ExecCopyout,
    ExecCsumChunk, ExecProg,
};
use crate::vars::VarTable;

/// Defensive maximum encoded program size (bytes).
pub const MAX_PROGRAM_BYTES: usize = 2 << 20; // 2 MiB

/// Defensive maximum number of variable slots a program may reference.
pub const MAX_VARS: usize = 1 << 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Inputs longer than this are rejected before parsing. Every instruction consumes at least
    /// one word, so this also bounds decode time.
    pub max_program_bytes: usize,
    /// Variable indices at or above this are rejected, so a well-formed program that references
    /// a higher slot fails with [`DecodeError::VarIndexTooLarge`]. Raise it to accept such
    /// programs.
    pub max_vars: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_program_bytes: MAX_PROGRAM_BYTES,
            max_vars: MAX_VARS,
        }
    }
}

/// Decodes `bytes` against `catalog` with [`DecodeOptions::default`].
pub fn decode_exec<'c, C>(catalog: &'c C, bytes: &[u8]) -> Result<ExecProg<'c>>
where
    C: SyscallCatalog + ?Sized,
{
    decode_exec_with(catalog, bytes, &DecodeOptions::default())
}

pub fn decode_exec_with<'c, C>(
    catalog: &'c C,
    bytes: &[u8],
    options: &DecodeOptions,
) -> Result<ExecProg<'c>>
where
    C: SyscallCatalog + ?Sized,
{
    if bytes.len() > options.max_program_bytes {
        return Err(DecodeError::ProgramTooLarge {
            len: bytes.len(),
            limit: options.max_program_bytes,
        });
    }

    let mut dec = ExecDecoder {
        catalog,
        cursor: WordCursor::new(bytes),
        vars: VarTable::new(options.max_vars),
        calls: CallAssembler::new(),
    };
    if let Err(err) = dec.parse() {
        tracing::debug!(
            kind = err.kind(),
            offset = dec.cursor.offset(),
            len = bytes.len(),
            "rejected exec program: {err}"
        );
        return Err(err);
    }
    let prog = dec.finish().inspect_err(|err| {
        tracing::debug!(kind = err.kind(), len = bytes.len(), "rejected exec program: {err}");
    })?;

    tracing::trace!(
        calls = prog.calls.len(),
        vars = prog.vars.len(),
        len = bytes.len(),
        "decoded exec program"
    );
    Ok(prog)
}

struct ExecDecoder<'c, 'a, C: ?Sized> {
    catalog: &'c C,
    cursor: WordCursor<'a>,
    vars: VarTable,
    calls: CallAssembler<'c>,
}

impl<'c, C> ExecDecoder<'c, '_, C>
where
    C: SyscallCatalog + ?Sized,
{
    fn parse(&mut self) -> Result<()> {
        loop {
            match self.cursor.read_word()? {
                EXEC_INSTR_COPYIN => {
                    self.calls.commit(&mut self.vars)?;
                    let addr = self.cursor.read_word()?;
                    let arg = self.read_arg()?;
                    self.calls.push_copyin(ExecCopyin { addr, arg });
                }
                EXEC_INSTR_COPYOUT => {
                    let index = self.cursor.read_word()?;
                    let addr = self.cursor.read_word()?;
                    let size = self.cursor.read_word()?;
                    self.calls.push_copyout(ExecCopyout { index, addr, size });
                }
                EXEC_INSTR_EOF => return self.calls.commit(&mut self.vars),
                instr => {
                    self.calls.commit(&mut self.vars)?;
                    self.read_call(instr)?;
                }
            }
        }
    }

    fn finish(self) -> Result<ExecProg<'c>> {
        let calls = self.calls.finish()?;
        let vars = self.vars.finish()?;
        Ok(ExecProg { calls, vars })
    }

    fn read_call(&mut self, instr: u64) -> Result<()> {
        let catalog: &'c C = self.catalog;
        let meta = usize::try_from(instr)
            .ok()
            .and_then(|i| catalog.syscall(i))
            .ok_or(DecodeError::BadSyscall {
                index: instr,
                count: catalog.len(),
            })?;
        // The encoder writes `meta.id` back as the instruction word.
        if meta.id as u64 != instr {
            return Err(DecodeError::SyscallIdMismatch {
                index: instr,
                id: meta.id,
            });
        }
        let index = self.cursor.read_word()?;
        self.calls.begin(meta, index);

        let nargs = self.cursor.read_word()?;
        for i in 0..nargs {
            let arg = self.read_arg()?;
            if !arg.is_scalar() {
                return Err(DecodeError::BadCallArg {
                    call: self.calls.committed(),
                    arg: i,
                    kind: arg.kind_name(),
                });
            }
            self.calls.push_arg(arg);
        }
        Ok(())
    }

    fn read_arg(&mut self) -> Result<ExecArg> {
        let arg = match self.cursor.read_word()? {
            EXEC_ARG_CONST => {
                let meta = self.cursor.read_word()?;
                ExecArg::Const(ExecArgConst {
                    value: self.cursor.read_word()?,
                    size: meta as u8,
                    format: BinaryFormat((meta >> 8) as u8),
                    bitfield_offset: (meta >> 16) as u8,
                    bitfield_length: (meta >> 24) as u8,
                    pid_stride: (meta >> 32) as u32,
                })
            }
            EXEC_ARG_RESULT => {
                let meta = self.cursor.read_word()?;
                let arg = ExecArgResult {
                    size: meta as u8,
                    format: BinaryFormat((meta >> 8) as u8),
                    index: self.cursor.read_word()?,
                    div_op: self.cursor.read_word()?,
                    add_op: self.cursor.read_word()?,
                    default: self.cursor.read_word()?,
                };
                self.vars.ensure(arg.index, arg.default)?;
                ExecArg::Result(arg)
            }
            EXEC_ARG_DATA => {
                let flags = self.cursor.read_word()?;
                let size = flags & !EXEC_ARG_DATA_READABLE;
                ExecArg::Data(ExecArgData {
                    data: self.cursor.read_blob(size)?.to_vec(),
                    readable: flags & EXEC_ARG_DATA_READABLE != 0,
                })
            }
            EXEC_ARG_CSUM => {
                let size = self.cursor.read_word()?;
                let raw_kind = self.cursor.read_word()?;
                let kind =
                    CsumKind::from_u64(raw_kind).ok_or(DecodeError::UnknownCsumKind(raw_kind))?;
                let count = self.cursor.read_word()?;
                let mut chunks = Vec::with_capacity(self.capacity_for(count, 3));
                for _ in 0..count {
                    chunks.push(ExecCsumChunk {
                        kind: CsumChunkKind(self.cursor.read_word()?),
                        value: self.cursor.read_word()?,
                        size: self.cursor.read_word()?,
                    });
                }
                ExecArg::Csum(ExecArgCsum { size, kind, chunks })
            }
            typ => return Err(DecodeError::BadArgType(typ)),
        };
        Ok(arg)
    }

    /// Caps a wire-supplied element count by how many `words_each`-word elements could still fit.
    fn capacity_for(&self, count: u64, words_each: usize) -> usize {
        let fit = self.cursor.remaining() / (WORD_SIZE * words_each);
        usize::try_from(count).map_or(fit, |count| count.min(fit))
    }
}
