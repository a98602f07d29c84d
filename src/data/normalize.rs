/// Longest metric name produced by [`normalize`], in characters.
pub const MAX_NAME_LEN: usize = 200;

/// Make an entity name safe to use as a metric name.
///
/// The result starts with a letter, is lowercase, contains only
/// alphanumerics, underscores and periods, and is at most
/// [`MAX_NAME_LEN`] characters long.
pub fn normalize(name: &str) -> String {
    let needs_prefix = name.chars().next().map_or(true, |c| !c.is_alphabetic());
    let prefix = if needs_prefix { "x" } else { "" };

    prefix
        .chars()
        .chain(name.chars())
        .flat_map(char::to_lowercase)
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .take(MAX_NAME_LEN)
        .collect()
}
