//! Fixed-size chunking by code point.

/// Split `text` into consecutive chunks of `size` code points.  The last chunk holds the
/// remainder and may be shorter.
///
/// A zero `size` or empty `text` yields no chunks; a `size` at least as long as `text` yields
/// `text` alone.
///
/// ```
/// assert_eq!(vec!["Hello", ", Wor", "ld!"], maskcat::chunk("Hello, World!", 5));
/// ```
pub fn chunk(text: &str, size: usize) -> Vec<&str> {
    if size == 0 || text.is_empty() {
        return vec![];
    }
    let mut chunks = Vec::with_capacity(text.len() / size + 1);
    let mut start = 0;
    let mut count = 0;
    for (offset, _) in text.char_indices() {
        if count == size {
            chunks.push(&text[start..offset]);
            start = offset;
            count = 0;
        }
        count += 1;
    }
    chunks.push(&text[start..]);
    chunks
}

/////////////////////////////////////////////// tests //////////////////////////////////////////////
