/// Returns the first `max_chars` characters of `text`.
///
/// Counts Unicode scalar values and borrows from the input, so the cut never
/// lands inside a multi-byte character.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
