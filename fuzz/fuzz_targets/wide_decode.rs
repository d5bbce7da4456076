#![no_main]

use enlace::wide::{from_wide_ptr, to_wide};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Reassemble arbitrary bytes into UTF-16 units and force a terminator,
    // then decode. Unpaired surrogates and junk must never panic.
    let mut units: Vec<u16> = data
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    units.push(0);
    let decoded = unsafe { from_wide_ptr(units.as_ptr()) };

    // Whatever came out must encode again without panicking.
    if let Some(s) = decoded {
        let _ = to_wide(&s);
    }
});
