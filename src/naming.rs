//! Helpers for turning role and reminder names into file names and token text.

/// Build a file name from an arbitrary string.
///
/// Spaces become underscores, path separators and colons become dashes and `?`
/// becomes `Q`. Anything else outside of `-_.() ` and ASCII letters and digits is
/// dropped. The result may still be unusable (for example an empty string or
/// `..`), so callers should check it before joining it onto a path.
pub fn format_filename(name: &str) -> String {
    name.chars()
        .filter_map(|ch| match ch {
            ' ' => Some('_'),
            '/' | '\\' | ':' => Some('-'),
            '?' => Some('Q'),
            '-' | '_' | '.' | '(' | ')' => Some(ch),
            ch if ch.is_ascii_alphanumeric() => Some(ch),
            _ => None,
        })
        .collect()
}

/// Capitalise the first letter of every word and lower-case the rest. Runs of
/// whitespace collapse to a single space
pub fn capwords(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
