/// Default chunk bound, matching the synthesis service's per-request
/// character limit.
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 4500;

/// Split text into word-bounded chunks of at most `max_chars` characters.
///
/// Greedy packing: words are appended to the current chunk while they fit
/// (counting one separating space per word); otherwise the chunk is flushed
/// and a new one starts with that word. A single word longer than
/// `max_chars` is emitted as its own oversized chunk — splitting mid-word
/// would corrupt pronunciation boundaries passed to the backend.
///
/// Lengths are Unicode scalar counts, not byte lengths.
pub fn split(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    // Length of `current` counting a leading space for every word, so the
    // separator is always accounted for when the next word is considered.
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if current_len + word_len + 1 <= max_chars {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            current_len += word_len + 1;
        } else {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            current.push_str(word);
            current_len = word_len + 1;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
