#![no_main]

use exec_prog::{decode_exec, encode_exec, SyscallTable};
use libfuzzer_sys::fuzz_target;

/// Cap the raw fuzz input size; the decoder's own limit is larger than useful fuzz inputs.
const MAX_INPUT_SIZE_BYTES: usize = 256 * 1024; // 256 KiB

/// Small enough that random instruction words regularly miss the catalog.
const NUM_SYSCALLS: usize = 64;

fuzz_target!(|data: &[u8]| {
    if data.len() > MAX_INPUT_SIZE_BYTES {
        return;
    }
    let catalog = SyscallTable::anonymous(NUM_SYSCALLS);
    let Ok(prog) = decode_exec(&catalog, data) else {
        return;
    };

    // A decoded program re-encodes canonically, and that encoding decodes to the same program.
    let bytes = encode_exec(&prog);
    let again = decode_exec(&catalog, &bytes).expect("canonical encoding must decode");
    assert_eq!(again, prog);
    assert_eq!(encode_exec(&again), bytes);
});
