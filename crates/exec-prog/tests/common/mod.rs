#![allow(dead_code)]

use exec_prog::{
    EXEC_ARG_CONST, EXEC_ARG_CSUM, EXEC_ARG_DATA, EXEC_ARG_DATA_READABLE, EXEC_ARG_RESULT,
    EXEC_INSTR_COPYIN, EXEC_INSTR_COPYOUT, EXEC_INSTR_EOF,
};

/// Hand-assembles exec programs word by word, independent of the crate's encoder.
#[derive(Default)]
pub struct Words {
    bytes: Vec<u8>,
}

impl Words {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn word(mut self, v: u64) -> Self {
        self.bytes.extend_from_slice(&v.to_ne_bytes());
        self
    }

    pub fn call(self, syscall: u64, index: u64, nargs: u64) -> Self {
        self.word(syscall).word(index).word(nargs)
    }

    pub fn konst(self, size: u64, format: u64, value: u64) -> Self {
        self.konst_full(size, format, value, 0, 0, 0)
    }

    pub fn konst_full(
        self,
        size: u64,
        format: u64,
        value: u64,
        bf_off: u64,
        bf_len: u64,
        stride: u64,
    ) -> Self {
        let meta = size | format << 8 | bf_off << 16 | bf_len << 24 | stride << 32;
        self.word(EXEC_ARG_CONST).word(meta).word(value)
    }

    pub fn result(self, size: u64, index: u64, div: u64, add: u64, default: u64) -> Self {
        self.word(EXEC_ARG_RESULT)
            .word(size)
            .word(index)
            .word(div)
            .word(add)
            .word(default)
    }

    pub fn data(mut self, payload: &[u8], readable: bool) -> Self {
        let flags = payload.len() as u64 | if readable { EXEC_ARG_DATA_READABLE } else { 0 };
        self = self.word(EXEC_ARG_DATA).word(flags);
        self.bytes.extend_from_slice(payload);
        let padded = payload.len().div_ceil(8) * 8;
        self.bytes.resize(self.bytes.len() + padded - payload.len(), 0);
        self
    }

    pub fn csum(mut self, size: u64, kind: u64, chunks: &[(u64, u64, u64)]) -> Self {
        self = self
            .word(EXEC_ARG_CSUM)
            .word(size)
            .word(kind)
            .word(chunks.len() as u64);
        for &(kind, value, size) in chunks {
            self = self.word(kind).word(value).word(size);
        }
        self
    }

    pub fn copyin(self, addr: u64) -> Self {
        self.word(EXEC_INSTR_COPYIN).word(addr)
    }

    pub fn copyout(self, index: u64, addr: u64, size: u64) -> Self {
        self.word(EXEC_INSTR_COPYOUT)
            .word(index)
            .word(addr)
            .word(size)
    }

    pub fn eof(self) -> Self {
        self.word(EXEC_INSTR_EOF)
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}
