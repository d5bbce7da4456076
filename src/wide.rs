//! UTF-16 wide-string marshalling across the `netapi32` boundary
//!
//! Sprint 1: null-terminated wide strings
//!
//! Every text field the join-info query deals in is a null-terminated
//! sequence of UTF-16 code units. These helpers convert in both directions
//! without touching the OS allocation: outbound strings are copied into a
//! Rust-owned buffer, inbound strings are copied out before the parent
//! record is released.

use std::slice;

/// Encode a Rust string as a null-terminated UTF-16 buffer.
///
/// The returned buffer always ends with a single terminating zero unit.
/// Interior NUL characters in `s` are copied as-is, meaning the OS will
/// see the string truncated at the first of them; tenant identifiers
/// never contain one.
pub fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Number of UTF-16 units before the terminating NUL.
///
/// Returns 0 for a null pointer.
///
/// # Safety
/// `ptr` must be null or point to a readable sequence of `u16` values that
/// contains a terminating zero unit.
pub unsafe fn wide_len(ptr: *const u16) -> usize {
    if ptr.is_null() {
        return 0;
    }
    let mut len = 0usize;
    while unsafe { *ptr.add(len) } != 0 {
        len += 1;
    }
    len
}

/// Copy a null-terminated wide string out as an owned `String`.
///
/// Returns `None` for a null pointer and `Some("")` for a string that
/// starts with its terminator, since a present-but-empty field is not the
/// same as an absent one. Unpaired surrogates decode to U+FFFD rather than
/// failing.
///
/// # Safety
/// `ptr` must be null or point to a readable sequence of `u16` values that
/// contains a terminating zero unit, and the sequence must stay valid for
/// the duration of the call.
pub unsafe fn from_wide_ptr(ptr: *const u16) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    let len = unsafe { wide_len(ptr) };
    let units = unsafe { slice::from_raw_parts(ptr, len) };
    Some(String::from_utf16_lossy(units))
}
