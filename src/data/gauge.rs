//! Gauge and tag models.

/// A statsd tag: either `key=value` or a bare token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag {
    pub name: String,
    pub value: Option<String>,
}

impl Tag {
    /// A tag with a value.
    pub fn pair(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    /// A value-less tag.
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }
}

/// A point-in-time value for one signal on one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gauge {
    /// Normalized metric name.
    pub name: String,
    pub count: i64,
    /// Entity tags in file order, then `signal_type` and `signal_name`.
    pub tags: Vec<Tag>,
}

/// Parse the comma-separated tag list entered on an entity.
///
/// Each item is split on its first `=`; items without one become bare
/// tags.
///
/// Empty items (an empty string, `a,,b`, a trailing comma) are dropped.
/// The in-game producer's own formatter kept them as nameless tags, which
/// rendered as `name;;signal_type=…` in vanilla lines; this deliberately
/// does not.
pub fn parse_tags(raw: &str) -> Vec<Tag> {
    raw.split(',')
        .filter(|item| !item.is_empty())
        .map(|item| match item.split_once('=') {
            Some((name, value)) => Tag::pair(name, value),
            None => Tag::bare(item),
        })
        .collect()
}
