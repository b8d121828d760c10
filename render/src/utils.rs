//! Name formatting helpers

/// Longest name drawn on the certificate before it is cut with an ellipsis
pub const MAX_NAME_CHARS: usize = 20;

/// File-name stem for a display name: words title-cased and joined with `_`.
///
/// Only alphanumeric characters survive; a name with none becomes `Player`.
pub fn file_stem(name: &str) -> String {
    let words: Vec<String> = name
        .split_whitespace()
        .map(|word| {
            let clean: String = word.chars().filter(|c| c.is_alphanumeric()).collect();
            let mut chars = clean.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .filter(|word| !word.is_empty())
        .collect();

    if words.is_empty() {
        "Player".to_string()
    } else {
        words.join("_")
    }
}

/// Cut a name to `max_chars`, ending with an ellipsis when shortened
pub fn truncate_name(name: &str, max_chars: usize) -> String {
    if name.chars().count() <= max_chars {
        return name.to_string();
    }
    let kept: String = name.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{kept}…")
}
