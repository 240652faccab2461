//! Resolution of virtual paths against the remote root

/// An absolute-or-relative POSIX path on the remote host.
///
/// Always stored with forward slashes, without `.` components or repeated
/// separators. A trailing separator is kept, so `file/` still only names a
/// directory. `..` components pop the previous component; at the top of an
/// absolute path they are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RemotePath {
    inner: String,
}

impl RemotePath {
    /// Create a RemotePath from a raw path string, normalizing it lexically.
    pub fn new(path: impl AsRef<str>) -> Self {
        Self {
            inner: normalize(path.as_ref()),
        }
    }

    /// Resolve `virtual_path` beneath `root`.
    ///
    /// The virtual path is always relative to the root, even when it starts
    /// with `/`. `..` is not rejected and may climb above the root.
    pub fn resolve(root: &str, virtual_path: &str) -> Self {
        Self::new(root).join(virtual_path)
    }

    /// Join this path with a segment.
    pub fn join(&self, segment: &str) -> Self {
        let joined = if segment.is_empty() {
            self.inner.clone()
        } else {
            format!("{}/{}", self.inner, segment)
        };
        Self::new(joined)
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }
}

/// Lexical POSIX normalization.
fn normalize(path: &str) -> String {
    let absolute = path.starts_with('/');
    let trailing = path.ends_with('/');
    let mut parts: Vec<&str> = Vec::new();

    for component in path.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|last| *last != "..") {
                    parts.pop();
                } else if !absolute {
                    parts.push("..");
                }
            }
            other => parts.push(other),
        }
    }

    let mut body = parts.join("/");
    if trailing && !body.is_empty() {
        body.push('/');
    }
    match (absolute, body.is_empty()) {
        (true, _) => format!("/{}", body),
        (false, true) => ".".to_string(),
        (false, false) => body,
    }
}

impl std::fmt::Display for RemotePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/home/u", "a/b", "/home/u/a/b")]
    #[case("/", "a", "/a")]
    #[case("/", "", "/")]
    #[case("/srv/", "/abs/file", "/srv/abs/file")]
    #[case("/srv", "./x/./y", "/srv/x/y")]
    #[case("/srv", "x//y/", "/srv/x/y/")]
    #[case("/home/u", "a/", "/home/u/a/")]
    #[case("/home/u/", "", "/home/u/")]
    #[case("/srv", "a/./", "/srv/a/")]
    #[case("/srv", "a/..", "/srv")]
    #[case("/srv", "a/../", "/srv/")]
    #[case("/", "/", "/")]
    #[case("/srv/data", "../etc", "/srv/etc")]
    #[case("/", "../../etc/passwd", "/etc/passwd")]
    #[case("data", "a", "data/a")]
    #[case("data", "../../a", "../a")]
    #[case(".", "", ".")]
    fn test_resolve(#[case] root: &str, #[case] virtual_path: &str, #[case] expected: &str) {
        assert_eq!(RemotePath::resolve(root, virtual_path).as_str(), expected);
    }
}
