use crate::catalog::Syscall;
use crate::error::{DecodeError, Result};
use crate::format::EXEC_NO_COPYOUT;
use crate::types::{ExecArg, ExecCall, ExecCopyin, ExecCopyout};
use crate::vars::VarTable;

/// Instructions gathered for the call currently being decoded.
///
/// Copyins precede the syscall word they belong to, so a pending context may collect them before
/// `meta` is known.
#[derive(Debug, Default)]
struct Pending<'c> {
    meta: Option<&'c Syscall>,
    index: u64,
    args: Vec<ExecArg>,
    copyin: Vec<ExecCopyin>,
    copyout: Vec<ExecCopyout>,
}

#[derive(Debug, Default)]
pub(crate) struct CallAssembler<'c> {
    pending: Pending<'c>,
    calls: Vec<ExecCall<'c>>,
}

impl<'c> CallAssembler<'c> {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Number of calls committed so far; also the position the pending call will take.
    pub(crate) fn committed(&self) -> usize {
        self.calls.len()
    }

    pub(crate) fn begin(&mut self, meta: &'c Syscall, index: u64) {
        debug_assert!(self.pending.meta.is_none(), "begin without commit");
        self.pending.meta = Some(meta);
        self.pending.index = index;
    }

    pub(crate) fn push_arg(&mut self, arg: ExecArg) {
        self.pending.args.push(arg);
    }

    pub(crate) fn push_copyin(&mut self, copyin: ExecCopyin) {
        self.pending.copyin.push(copyin);
    }

    pub(crate) fn push_copyout(&mut self, copyout: ExecCopyout) {
        self.pending.copyout.push(copyout);
    }

    /// Finalizes the pending call, if a syscall word has started one.
    pub(crate) fn commit(&mut self, vars: &mut VarTable) -> Result<()> {
        let Some(meta) = self.pending.meta else {
            return Ok(());
        };
        let pending = std::mem::take(&mut self.pending);
        if pending.index != EXEC_NO_COPYOUT {
            vars.require(pending.index)?;
        }
        for copyout in &pending.copyout {
            vars.require(copyout.index)?;
        }
        tracing::trace!(
            call = self.calls.len(),
            syscall = %meta.name,
            args = pending.args.len(),
            copyin = pending.copyin.len(),
            copyout = pending.copyout.len(),
            "committed exec call"
        );
        self.calls.push(ExecCall {
            meta,
            index: pending.index,
            args: pending.args,
            copyin: pending.copyin,
            copyout: pending.copyout,
        });
        Ok(())
    }

    /// Returns the committed calls. Instructions still waiting for a syscall word are an error.
    pub(crate) fn finish(self) -> Result<Vec<ExecCall<'c>>> {
        let Pending {
            meta,
            copyin,
            copyout,
            ..
        } = &self.pending;
        debug_assert!(meta.is_none(), "finish without commit");
        if !copyin.is_empty() || !copyout.is_empty() {
            return Err(DecodeError::DanglingInstructions {
                copyin: copyin.len(),
                copyout: copyout.len(),
            });
        }
        Ok(self.calls)
    }
}
