//! Fuzz target: `LineAssembler::push`
//!
//! Drives arbitrary byte sequences into the line assembler and asserts that
//! it never panics, never yields a line longer than the buffer, and never
//! leaks a terminator into a line.
//!
//! cargo fuzz run fuzz_line_assembler

#![no_main]

use libfuzzer_sys::fuzz_target;
use telenode::adapters::serial::LineAssembler;
use telenode::config::LINE_CAPACITY;

fuzz_target!(|data: &[u8]| {
    let mut assembler = LineAssembler::new();

    for &b in data {
        if let Some(line) = assembler.push(b) {
            assert!(line.len() <= LINE_CAPACITY, "line exceeds LINE_CAPACITY");
            assert!(!line.contains('\n') && !line.contains('\r'));
        }
        assert!(assembler.pending() <= LINE_CAPACITY);
    }

    // After a reset the assembler must accept a fresh line cleanly.
    assembler.reset();
    for &b in b"STATUS" {
        assert!(assembler.push(b).is_none());
    }
    assert_eq!(assembler.push(b'\n').as_deref(), Some("STATUS"));
});
