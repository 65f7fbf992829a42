//! Emoji-to-text normalization applied before scoring.

/// Longest emoji sequence (in chars) we try to match, enough for ZWJ families with skin tones.
const MAX_EMOJI_CHARS: usize = 16;

/// A single comment cell as handed to the scorer.
///
/// Only [`Comment::Text`] is ever scored. Numbers and missing cells are
/// treated like blank text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Comment<'a> {
    /// A text value.
    Text(&'a str),
    /// A numeric value (e.g. a cell that parsed as a number).
    Number(f64),
    /// No value at all.
    Missing,
}

impl<'a> Comment<'a> {
    /// Classify a raw table cell: empty is [`Comment::Missing`], numeric is
    /// [`Comment::Number`], anything else is [`Comment::Text`].
    pub fn from_cell(raw: &'a str) -> Self {
        if raw.is_empty() {
            return Comment::Missing;
        }
        match raw.trim().parse::<f64>() {
            Ok(n) => Comment::Number(n),
            Err(_) => Comment::Text(raw),
        }
    }

    /// Read a cell from a column already known to hold comments: empty is
    /// [`Comment::Missing`], anything else is [`Comment::Text`], even when it
    /// looks like a number.
    pub fn from_text_cell(raw: &'a str) -> Self {
        if raw.is_empty() {
            Comment::Missing
        } else {
            Comment::Text(raw)
        }
    }

    /// The text value, if this is a text comment.
    pub fn as_text(&self) -> Option<&'a str> {
        match self {
            Comment::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl<'a> From<&'a str> for Comment<'a> {
    fn from(value: &'a str) -> Self {
        Comment::Text(value)
    }
}

impl<'a> From<&'a String> for Comment<'a> {
    fn from(value: &'a String) -> Self {
        Comment::Text(value.as_str())
    }
}

impl<'a> From<Option<&'a str>> for Comment<'a> {
    fn from(value: Option<&'a str>) -> Self {
        value.map_or(Comment::Missing, Comment::Text)
    }
}

impl From<f64> for Comment<'_> {
    fn from(value: f64) -> Self {
        Comment::Number(value)
    }
}

/// Turn a comment into plain words a text classifier can read.
///
/// Emoji are replaced by their names, then the `:` delimiters and `_`
/// separators are turned into spaces. Non-text comments give an empty string.
///
/// ```
/// use emoji_sentiment::sentiment::normalize;
///
/// let text = normalize("I love this! 😍");
/// assert!(text.contains("smiling face with heart-eyes"));
/// assert!(!text.contains(':') && !text.contains('_'));
/// assert_eq!(normalize(None::<&str>), "");
/// ```
pub fn normalize<'a>(comment: impl Into<Comment<'a>>) -> String {
    match comment.into() {
        Comment::Text(text) => demojize(text).replace([':', '_'], " "),
        Comment::Number(_) | Comment::Missing => String::new(),
    }
}

/// Replace every emoji with `:its_name:`, preferring the longest matching sequence.
pub fn demojize(text: &str) -> String {
    let mut bounds: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    bounds.push(text.len());
    let char_count = bounds.len() - 1;

    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < char_count {
        let start = bounds[i];
        let first = text[start..].chars().next().unwrap_or_default();

        let matched = if may_start_emoji(first) {
            let max_end = (i + MAX_EMOJI_CHARS).min(char_count);
            (i + 1..=max_end)
                .rev()
                .find_map(|j| emojis::get(&text[start..bounds[j]]).map(|emoji| (j, emoji)))
        } else {
            None
        };

        match matched {
            Some((end, emoji)) => {
                out.push(':');
                out.push_str(&delimited_name(emoji.name()));
                out.push(':');
                i = end;
            }
            None => {
                out.push_str(&text[start..bounds[i + 1]]);
                i += 1;
            }
        }
    }
    out
}

// "family: man, woman, girl" -> "family_man_woman_girl"
fn delimited_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ':' | ',' | '"' | '\u{201C}' | '\u{201D}'))
        .map(|c| if c == ' ' { '_' } else { c })
        .collect()
}

// Keycap sequences are the only emoji that start with an ASCII char.
fn may_start_emoji(c: char) -> bool {
    !c.is_ascii() || matches!(c, '#' | '*' | '0'..='9')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_emoji_with_plain_words() {
        let out = normalize("I love this! 😍");
        assert!(out.starts_with("I love this! "));
        assert!(out.contains("smiling face with heart-eyes"));
        assert!(!out.contains(':'));
        assert!(!out.contains('_'));
    }

    #[test]
    fn demojize_wraps_names_in_colons() {
        assert_eq!(demojize("😍"), ":smiling_face_with_heart-eyes:");
        assert_eq!(demojize("ok 👍 ok"), "ok :thumbs_up: ok");
    }

    #[test]
    fn keeps_text_without_emoji() {
        assert_eq!(normalize("Llegó el paquete ayer"), "Llegó el paquete ayer");
        assert_eq!(demojize("order #42"), "order #42");
    }

    #[test]
    fn strips_existing_colons_and_underscores() {
        assert_eq!(normalize("note: snake_case"), "note  snake case");
    }

    #[test]
    fn longest_sequence_wins() {
        // man + ZWJ + woman + ZWJ + girl
        let family = "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}";
        assert_eq!(demojize(family), ":family_man_woman_girl:");
    }

    #[test]
    fn non_text_is_empty() {
        assert_eq!(normalize(Comment::Number(4.0)), "");
        assert_eq!(normalize(Comment::Missing), "");
        assert_eq!(normalize(None::<&str>), "");
    }

    #[test]
    fn classifies_cells() {
        assert_eq!(Comment::from_cell(""), Comment::Missing);
        assert_eq!(Comment::from_cell("42"), Comment::Number(42.0));
        assert_eq!(Comment::from_cell(" 3.5 "), Comment::Number(3.5));
        assert_eq!(Comment::from_cell("   "), Comment::Text("   "));
        assert_eq!(Comment::from_cell("great"), Comment::Text("great"));
        assert!(matches!(Comment::from_cell("Infinity"), Comment::Number(_)));
    }

    #[test]
    fn text_cells_keep_numeric_looking_values() {
        assert_eq!(Comment::from_text_cell(""), Comment::Missing);
        assert_eq!(Comment::from_text_cell("10"), Comment::Text("10"));
        assert_eq!(Comment::from_text_cell("Infinity"), Comment::Text("Infinity"));
        assert_eq!(Comment::from_text_cell("NaN"), Comment::Text("NaN"));
    }
}
