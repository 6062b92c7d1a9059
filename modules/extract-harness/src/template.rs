use regex::{NoExpand, Regex};

/// Fill placeholders one at a time with the ordered `replacements`.
///
/// Each replacement goes into the first match of `pattern` in the content as
/// rewritten so far. Once the pattern stops matching, the remaining
/// replacements are dropped and the rest of the content is left untouched.
/// Replacements are inserted literally (`$1` is not expanded).
///
/// Typical use: a JSON template with one `{{DOI}}` per record, filled with one
/// DOI per record. Call again with a different pattern to fill a second kind
/// of placeholder.
pub fn fill_sequentially<S: AsRef<str>>(
    template: &str,
    pattern: &Regex,
    replacements: &[S],
) -> String {
    let mut content = template.to_string();

    for replacement in replacements {
        if !pattern.is_match(&content) {
            break;
        }
        content = pattern
            .replacen(&content, 1, NoExpand(replacement.as_ref()))
            .into_owned();
    }

    content
}

/// Replace every match of `pattern` with `replacement`.
/// A template without any match comes back unchanged.
pub fn fill_all(template: &str, pattern: &Regex, replacement: &str) -> String {
    if !pattern.is_match(template) {
        return template.to_string();
    }
    pattern
        .replace_all(template, NoExpand(replacement))
        .into_owned()
}

/// Number of non-overlapping placeholder matches in `template`.
pub fn count_matches(template: &str, pattern: &Regex) -> usize {
    pattern.find_iter(template).count()
}
