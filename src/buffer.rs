//! Capacity-bounded copies into caller-owned byte buffers.
//!
//! A buffer of length `n` receives at most `n - 1` bytes of payload followed
//! by a NUL terminator. A zero-length buffer receives nothing.

/// Copies `text` into `out`, truncating as needed, and terminates it.
/// Returns the number of payload bytes written.
pub fn copy_truncated(text: &str, out: &mut [u8]) -> usize {
    let Some(room) = out.len().checked_sub(1) else {
        return 0;
    };
    let written = text.len().min(room);
    out[..written].copy_from_slice(&text.as_bytes()[..written]);
    out[written] = 0;
    written
}

/// The bytes of `buf` before its first NUL, or all of it if there is none.
pub fn terminated(buf: &[u8]) -> &[u8] {
    match memchr::memchr(0, buf) {
        Some(end) => &buf[..end],
        None => buf,
    }
}
