//! Canonical encoder, the inverse of [`crate::decode_exec`].
//!
//! Each call is written as its copyins, then the syscall word, result index and arguments, then its
//! copyouts. Data payloads are zero-padded to a word boundary.

use crate::format::{
    padded_len, EXEC_ARG_CONST, EXEC_ARG_CSUM, EXEC_ARG_DATA, EXEC_ARG_DATA_READABLE,
    EXEC_ARG_RESULT, EXEC_INSTR_COPYIN, EXEC_INSTR_COPYOUT, EXEC_INSTR_EOF,
};
use crate::types::{ExecArg, ExecCall, ExecProg};

pub fn encode_exec(prog: &ExecProg<'_>) -> Vec<u8> {
    let mut out = Vec::new();
    encode_exec_into(prog, &mut out);
    out
}

pub fn encode_exec_into(prog: &ExecProg<'_>, out: &mut Vec<u8>) {
    for call in &prog.calls {
        encode_call_into(call, out);
    }
    push_u64(out, EXEC_INSTR_EOF);
}

fn encode_call_into(call: &ExecCall<'_>, out: &mut Vec<u8>) {
    for copyin in &call.copyin {
        push_u64(out, EXEC_INSTR_COPYIN);
        push_u64(out, copyin.addr);
        encode_arg_into(&copyin.arg, out);
    }

    push_u64(out, call.meta.id as u64);
    push_u64(out, call.index);
    push_u64(out, call.args.len() as u64);
    for arg in &call.args {
        encode_arg_into(arg, out);
    }

    for copyout in &call.copyout {
        push_u64(out, EXEC_INSTR_COPYOUT);
        push_u64(out, copyout.index);
        push_u64(out, copyout.addr);
        push_u64(out, copyout.size);
    }
}

pub fn encode_arg_into(arg: &ExecArg, out: &mut Vec<u8>) {
    match arg {
        ExecArg::Const(c) => {
            push_u64(out, EXEC_ARG_CONST);
            push_u64(
                out,
                u64::from(c.size)
                    | u64::from(c.format.0) << 8
                    | u64::from(c.bitfield_offset) << 16
                    | u64::from(c.bitfield_length) << 24
                    | u64::from(c.pid_stride) << 32,
            );
            push_u64(out, c.value);
        }
        ExecArg::Result(r) => {
            push_u64(out, EXEC_ARG_RESULT);
            push_u64(out, u64::from(r.size) | u64::from(r.format.0) << 8);
            push_u64(out, r.index);
            push_u64(out, r.div_op);
            push_u64(out, r.add_op);
            push_u64(out, r.default);
        }
        ExecArg::Data(d) => {
            let len = d.data.len() as u64;
            let readable = if d.readable { EXEC_ARG_DATA_READABLE } else { 0 };
            push_u64(out, EXEC_ARG_DATA);
            push_u64(out, len | readable);
            out.extend_from_slice(&d.data);
            let padding = padded_len(len).map_or(0, |padded| padded - len);
            out.resize(out.len() + padding as usize, 0);
        }
        ExecArg::Csum(c) => {
            push_u64(out, EXEC_ARG_CSUM);
            push_u64(out, c.size);
            push_u64(out, c.kind.to_u64());
            push_u64(out, c.chunks.len() as u64);
            for chunk in &c.chunks {
                push_u64(out, chunk.kind.0);
                push_u64(out, chunk.value);
                push_u64(out, chunk.size);
            }
        }
    }
}

fn push_u64(out: &mut Vec<u8>, v: u64) {
    out.extend_from_slice(&v.to_ne_bytes());
}
