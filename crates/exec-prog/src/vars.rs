use crate::error::{DecodeError, Result};

/// Infers the variable table while a program is decoded.
///
/// Two things are tracked separately: the slots actually populated with a default (by result
/// arguments) and the size every reference requires (result arguments, call results, copyouts).
/// A well-formed program populates exactly the slots it requires.
#[derive(Debug)]
pub(crate) struct VarTable {
    vars: Vec<u64>,
    required: u64,
    max_vars: usize,
}

impl VarTable {
    pub(crate) fn new(max_vars: usize) -> Self {
        Self {
            vars: Vec::new(),
            required: 0,
            max_vars,
        }
    }

    /// Grows the table to cover `index` and records `default` as its value.
    pub(crate) fn ensure(&mut self, index: u64, default: u64) -> Result<()> {
        let slot = self.check(index)?;
        if self.vars.len() <= slot {
            self.vars.resize(slot + 1, 0);
        }
        self.vars[slot] = default;
        self.require(index)
    }

    /// Notes that the finished table must cover `index`.
    pub(crate) fn require(&mut self, index: u64) -> Result<()> {
        self.check(index)?;
        self.required = self.required.max(index + 1);
        Ok(())
    }

    pub(crate) fn finish(self) -> Result<Vec<u64>> {
        if self.vars.len() as u64 != self.required {
            return Err(DecodeError::VarsMismatch {
                populated: self.vars.len(),
                required: self.required,
            });
        }
        Ok(self.vars)
    }

    fn check(&self, index: u64) -> Result<usize> {
        match usize::try_from(index) {
            Ok(slot) if slot < self.max_vars => Ok(slot),
            _ => Err(DecodeError::VarIndexTooLarge {
                index,
                limit: self.max_vars,
            }),
        }
    }
}
