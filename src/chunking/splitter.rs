/// Split text into non-overlapping groups of whitespace-delimited words.
///
/// Each returned chunk holds at most `max_words` words joined by single
/// spaces. Runs of whitespace in the input collapse; word content and order
/// are preserved.
pub fn split_by_words(text: &str, max_words: usize) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();

    if words.is_empty() {
        return Vec::new();
    }

    // max_words of 0 would never advance
    words
        .chunks(max_words.max(1))
        .map(|group| group.join(" "))
        .collect()
}
