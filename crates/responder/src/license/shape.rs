//! Fixed-width line wrapping for base64 payloads.
//!
//! `shape` splits its input into consecutive chunks of `width` characters,
//! one chunk per line, and terminates the result with a single newline.
//! A trailing chunk shorter than `width` is kept on its own line. An input
//! whose length is an exact multiple of `width` ends right after its last
//! full line; it never gets an extra blank line (a splitter that always
//! appends the remainder chunk would emit `s\n\n` there). The empty string
//! shapes to `"\n"`.
//!
//! Width is counted in `char`s, so non-ASCII input is never cut inside a
//! code point. For base64 text this is the same as counting bytes.

use std::num::NonZeroUsize;

/// Wrap `src` into lines of at most `width` characters, each ending in `\n`.
pub fn shape(src: &str, width: NonZeroUsize) -> String {
    let width = width.get();
    let mut out = String::with_capacity(src.len() + src.len() / width + 1);
    let mut column = 0;
    for ch in src.chars() {
        if column == width {
            out.push('\n');
            column = 0;
        }
        out.push(ch);
        column += 1;
    }
    out.push('\n');
    out
}
