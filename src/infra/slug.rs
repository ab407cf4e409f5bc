//! Slug generation for outline entries that do not name their own slug.

const MAX_LENGTH: usize = 50;

/// Converts a title to a string that passes [`Slug`](crate::domain::Slug)
/// validation.
///
/// - Lowercases ASCII letters and keeps digits
/// - Turns whitespace and underscores into hyphens
/// - Drops every other character
/// - Collapses runs of hyphens and trims them from both ends
/// - Truncates to 50 characters, at a hyphen when one is near the end
/// - Returns "untitled" when nothing is left
///
/// # Examples
///
/// ```
/// use syllabus::infra::slugify;
///
/// assert_eq!(slugify("Laws of Motion"), "laws-of-motion");
/// assert_eq!(slugify("Newton's 3rd Law"), "newtons-3rd-law");
/// assert_eq!(slugify("snake_case_title"), "snake-case-title");
/// assert_eq!(slugify(""), "untitled");
/// ```
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if (c.is_whitespace() || c == '-' || c == '_') && !slug.ends_with('-') {
            slug.push('-');
        }
    }

    let trimmed = slug.trim_matches('-');
    if trimmed.is_empty() {
        return "untitled".to_string();
    }
    if trimmed.len() <= MAX_LENGTH {
        return trimmed.to_string();
    }

    // ASCII only from here, so byte slicing is safe.
    let truncated = &trimmed[..MAX_LENGTH];
    if let Some(last_hyphen) = truncated.rfind('-')
        && last_hyphen > MAX_LENGTH / 2
    {
        return truncated[..last_hyphen].to_string();
    }
    truncated.trim_end_matches('-').to_string()
}
