//! Character-safe text shortening helpers.

/// Appended to tool output that was cut at the size threshold.
pub const TRUNCATION_NOTICE: &str =
    "\n\n[Output truncated due to size. Please refine your query to get more specific results.]";

/// Cut `text` to at most `max_chars` characters, appending [`TRUNCATION_NOTICE`]
/// when anything was removed.
pub fn truncate_with_notice(text: String, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => {
            let mut out = String::with_capacity(cut + TRUNCATION_NOTICE.len());
            out.push_str(&text[..cut]);
            out.push_str(TRUNCATION_NOTICE);
            out
        }
        None => text,
    }
}

/// Flatten a description to one line and cap it at `max_chars` plus `...`.
pub fn summarize(text: &str, max_chars: usize) -> String {
    let flat = text.replace('\n', " ");
    let flat = flat.trim();
    match flat.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &flat[..cut]),
        None => flat.to_string(),
    }
}

/// First sentence of a description, for compact tool listings.
///
/// A sentence ends at a period followed by a space or newline. Without one,
/// long text is cut to 147 characters plus `...`.
pub fn first_sentence(text: &str) -> &str {
    let bytes = text.as_bytes();
    for (i, window) in bytes.windows(2).enumerate() {
        if window[0] == b'.' && (window[1] == b' ' || window[1] == b'\n') {
            return &text[..=i];
        }
    }
    if text.chars().count() > 150 {
        let cut = text.char_indices().nth(147).map_or(text.len(), |(i, _)| i);
        return &text[..cut];
    }
    text
}

/// Like [`first_sentence`] but marks a cut with `...`.
pub fn tool_summary(text: &str) -> String {
    let sentence = first_sentence(text);
    if sentence.len() < text.len() && !sentence.ends_with('.') {
        format!("{sentence}...")
    } else {
        sentence.to_string()
    }
}
