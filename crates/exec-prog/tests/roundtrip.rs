mod common;

use common::Words;
use exec_prog::{
    decode_exec, encode_exec, BinaryFormat, CsumChunkKind, CsumKind, ExecArg, ExecArgConst,
    ExecArgCsum, ExecArgData, ExecArgResult, ExecCall, ExecCopyin, ExecCopyout, ExecCsumChunk,
    ExecProg, SyscallCatalog, SyscallTable, EXEC_ARG_CSUM_INET, EXEC_NO_COPYOUT,
};

#[test]
fn canonical_bytes_reencode_identically() {
    let cat = SyscallTable::anonymous(8);
    let bytes = Words::new()
        .copyin(0x2000_0000)
        .data(b"./file0\0", false)
        .call(3, 0, 3)
        .konst(8, 0, 0xffff_ff9c)
        .konst(8, 0, 0x2000_0000)
        .konst_full(4, 0, 0x42, 0, 0, 0)
        .copyin(0x2000_0100)
        .konst_full(2, 1, 0x1f, 4, 6, 0)
        .copyin(0x2000_0108)
        .result(4, 0, 1, 2, 0xffff_ffff)
        .copyin(0x2000_0110)
        .csum(
            2,
            EXEC_ARG_CSUM_INET,
            &[(0, 0x2000_0100, 20), (1, 0x0600, 2)],
        )
        .copyin(0x2000_0200)
        .data(&[0x55; 13], true)
        .call(7, EXEC_NO_COPYOUT, 2)
        .result(4, 0, 1, 0, 0xffff_ffff)
        .konst_full(8, 0, 0x1000, 0, 0, 4)
        .call(5, 1, 0)
        .copyout(1, 0x2000_0300, 4)
        .copyout(2, 0x2000_0304, 4)
        .copyin(0x2000_0400)
        .result(4, 1, 1, 0, 0)
        .copyin(0x2000_0404)
        .result(4, 2, 1, 0, 0)
        .call(0, EXEC_NO_COPYOUT, 0)
        .eof()
        .build();

    let prog = decode_exec(&cat, &bytes).unwrap();
    assert_eq!(prog.calls.len(), 4);
    assert_eq!(prog.vars, vec![0xffff_ffff, 0, 0]);
    assert_eq!(encode_exec(&prog), bytes);
}

#[test]
fn built_program_survives_encode_decode() {
    let cat = SyscallTable::from_json(r#"["socket$inet", "sendto", "close"]"#).unwrap();
    let socket = cat.syscall(0).unwrap();
    let sendto = cat.syscall(1).unwrap();
    let close = cat.syscall(2).unwrap();

    let fd = |default| {
        ExecArg::Result(ExecArgResult {
            size: 4,
            format: BinaryFormat::NATIVE,
            index: 0,
            div_op: 0,
            add_op: 0,
            default,
        })
    };
    let konst = |size, value| {
        ExecArg::Const(ExecArgConst {
            size,
            value,
            ..Default::default()
        })
    };

    let prog = ExecProg {
        calls: vec![
            ExecCall {
                meta: socket,
                index: 0,
                args: vec![konst(8, 2), konst(8, 3), konst(8, 0)],
                copyin: vec![],
                copyout: vec![],
            },
            ExecCall {
                meta: sendto,
                index: EXEC_NO_COPYOUT,
                args: vec![fd(7), konst(8, 0x2000_0000), konst(8, 28)],
                copyin: vec![
                    ExecCopyin {
                        addr: 0x2000_0000,
                        arg: ExecArg::Data(ExecArgData {
                            data: vec![0x45, 0, 0, 28, 0, 0, 0, 0, 64, 17],
                            readable: false,
                        }),
                    },
                    ExecCopyin {
                        addr: 0x2000_000a,
                        arg: ExecArg::Csum(ExecArgCsum {
                            size: 2,
                            kind: CsumKind::Inet,
                            chunks: vec![ExecCsumChunk {
                                kind: CsumChunkKind::DATA,
                                value: 0x2000_0000,
                                size: 20,
                            }],
                        }),
                    },
                ],
                copyout: vec![ExecCopyout {
                    index: 0,
                    addr: 0x2000_0100,
                    size: 4,
                }],
            },
            ExecCall {
                meta: close,
                index: EXEC_NO_COPYOUT,
                args: vec![fd(7)],
                copyin: vec![],
                copyout: vec![],
            },
        ],
        vars: vec![7],
    };

    let bytes = encode_exec(&prog);
    assert_eq!(bytes.len() % 8, 0);
    let decoded = decode_exec(&cat, &bytes).unwrap();
    assert_eq!(decoded, prog);
}
