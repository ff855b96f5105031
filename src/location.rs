//! Locations and history actions.
//!
//! A [`Location`] is the destination of a navigation: a pathname plus the
//! optional `?search` and `#hash` parts. A [`HistoryAction`] says how the
//! history moved (or tried to move) to it.

use std::fmt;

/// Kind of navigation performed on the history stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoryAction {
    /// Moving through existing entries (back / forward).
    Pop,
    /// Adding a new entry on top of the stack.
    Push,
    /// Overwriting the current entry.
    Replace,
}

impl HistoryAction {
    /// Name used in log messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pop => "POP",
            Self::Push => "PUSH",
            Self::Replace => "REPLACE",
        }
    }
}

impl fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A navigation destination.
///
/// # Example
///
/// ```
/// use gpui_navigation_prompt::Location;
///
/// let location = Location::parse("/users/42?tab=posts#top");
/// assert_eq!(location.pathname(), "/users/42");
/// assert_eq!(location.search(), "?tab=posts");
/// assert_eq!(location.hash(), "#top");
/// assert_eq!(location.to_string(), "/users/42?tab=posts#top");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pathname: String,
    search: String,
    hash: String,
}

impl Location {
    /// Parse a path string into its pathname, search and hash parts.
    ///
    /// An empty pathname becomes `/`, and a missing leading slash is added.
    pub fn parse(path: &str) -> Self {
        let (rest, hash) = match path.find('#') {
            Some(idx) => (&path[..idx], &path[idx..]),
            None => (path, ""),
        };
        let (pathname, search) = match rest.find('?') {
            Some(idx) => (&rest[..idx], &rest[idx..]),
            None => (rest, ""),
        };

        Self {
            pathname: normalize_pathname(pathname),
            search: if search == "?" { String::new() } else { search.to_string() },
            hash: if hash == "#" { String::new() } else { hash.to_string() },
        }
    }

    /// The root location, `/`.
    pub fn root() -> Self {
        Self::parse("/")
    }

    /// Path component, always starting with `/`.
    pub fn pathname(&self) -> &str {
        &self.pathname
    }

    /// Query component including the leading `?`, or empty.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Fragment component including the leading `#`, or empty.
    pub fn hash(&self) -> &str {
        &self.hash
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.pathname, self.search, self.hash)
    }
}

impl From<&str> for Location {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

impl From<String> for Location {
    fn from(path: String) -> Self {
        Self::parse(&path)
    }
}

fn normalize_pathname(pathname: &str) -> String {
    let trimmed = pathname.trim();
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}
