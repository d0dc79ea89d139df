//! Path construction for group-scoped resources

use std::fmt;

/// Identifier of a group, issue, note or discussion
///
/// GitLab accepts either numeric ids or full paths (`my-group/sub`) for
/// groups, so ids are carried as text and encoded when placed in a path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Id(String);

impl Id {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for Id {
    fn from(value: u64) -> Self {
        Id(value.to_string())
    }
}

impl From<u32> for Id {
    fn from(value: u32) -> Self {
        Id(value.to_string())
    }
}

impl From<i64> for Id {
    fn from(value: i64) -> Self {
        Id(value.to_string())
    }
}

impl From<i32> for Id {
    fn from(value: i32) -> Self {
        Id(value.to_string())
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Id(value.to_string())
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Id(value)
    }
}

impl From<&Id> for Id {
    fn from(value: &Id) -> Self {
        value.clone()
    }
}

/// Percent-encode a single path segment.
///
/// Everything except `A-Z a-z 0-9 - _ ~` is encoded, including `/` and `.`,
/// so namespaced ids like `group/sub.project` stay a single segment.
pub fn encode_path(segment: &str) -> String {
    urlencoding::encode(segment).replace('.', "%2E")
}

/// Build `groups/{group_id}/{path}` with the group id encoded.
///
/// `path` is appended as-is; callers encode any ids they splice into it.
pub fn group_path(group_id: &Id, path: &str) -> String {
    format!("groups/{}/{}", encode_path(group_id.as_str()), path)
}
