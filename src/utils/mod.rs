pub mod parallelism;
pub mod regex;

/// Split a text at the points where the given function is true.
/// Keeps the separators. See https://stackoverflow.com/a/40296745.
pub fn split<F>(text: &str, split_func: F) -> Vec<&str>
where
    F: Fn(char) -> bool,
{
    let mut result = Vec::new();
    let mut last = 0;
    for (index, matched) in text.match_indices(split_func) {
        if last != index {
            result.push(&text[last..index]);
        }
        result.push(matched);
        last = index + matched.len();
    }
    if last < text.len() {
        result.push(&text[last..]);
    }

    result
}

#[inline]
pub fn splitting_chars() -> &'static str {
    r##"«»'’`´‘],.:;!?/\()[]{}<=>„“”"+#…*"##
}

/// Number of `\n` in the string.
pub fn count_line_breaks(string: &str) -> usize {
    string.matches('\n').count()
}

/// Shortens a string to at most `max_len` chars, marking the cut with `...`.
pub fn abbreviate(string: &str, max_len: usize) -> String {
    if string.chars().count() <= max_len {
        return string.to_owned();
    }

    let mut abbreviated: String = string.chars().take(max_len.saturating_sub(3)).collect();
    abbreviated.push_str("...");
    abbreviated
}

// see https://stackoverflow.com/questions/38406793/why-is-capitalizing-the-first-letter-of-a-string-so-convoluted-in-rust
pub fn apply_to_first<F>(string: &str, func: F) -> String
where
    F: Fn(char) -> String,
{
    let mut c = string.chars();
    match c.next() {
        None => String::new(),
        Some(first) => func(first) + c.as_str(),
    }
}
