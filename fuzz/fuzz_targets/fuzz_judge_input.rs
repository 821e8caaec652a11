#![no_main]

//! Judge input fuzzer.
//!
//! Feeds arbitrary bytes to the bot loop in both modes. Any input may be
//! rejected with an error, but nothing may panic, and every answer that is
//! written must be a well-formed response.

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use tankwar::protocol::{Response, KEEP_RUNNING_MARKER};
use tankwar::Agent;

fuzz_target!(|data: &[u8]| {
    for keep_running in [false, true] {
        let mut out = Vec::new();
        let _ = Agent::new().serve(Cursor::new(data), &mut out, keep_running);

        let Ok(text) = std::str::from_utf8(&out) else {
            panic!("non-UTF-8 output");
        };
        for line in text.lines().filter(|line| *line != KEEP_RUNNING_MARKER) {
            let parsed: Result<Response, _> = serde_json::from_str(line);
            assert!(parsed.is_ok(), "malformed response line: {line}");
        }
    }
});
