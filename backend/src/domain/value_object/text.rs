//! Text helpers for error previews.

const ELLIPSIS: &str = "...";

/// Shorten `text` to at most `length` characters.
///
/// With `ellipsis` the kept prefix shrinks by three characters (never below
/// one) and `...` is appended. Text already within `length` is returned as is.
///
/// # Examples
/// ```
/// use petclinic::domain::value_object::truncate;
///
/// assert_eq!(truncate("abcdefghij", 6, true), "abc...");
/// assert_eq!(truncate("abcdefghij", 4, false), "abcd");
/// assert_eq!(truncate("abc", 6, true), "abc");
/// ```
#[must_use]
pub fn truncate(text: &str, length: usize, ellipsis: bool) -> String {
    if length == 0 {
        return String::new();
    }
    if text.chars().count() <= length {
        return text.to_owned();
    }

    let placeholder = if ellipsis { ELLIPSIS } else { "" };
    let keep = length.saturating_sub(placeholder.len()).max(1);
    let mut shortened: String = text.chars().take(keep).collect();
    shortened.push_str(placeholder);
    shortened
}
