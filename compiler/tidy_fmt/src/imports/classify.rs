//! Import path classification.

/// Import group, in output order.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum ImportGroup {
    /// First path element has no dot: `fmt`, `net/http`.
    Std,
    ThirdParty,
    /// Path under one of the configured local prefixes.
    Local,
}

/// Group of `path` given the local prefixes.
pub fn classify(path: &str, local_prefixes: &[String]) -> ImportGroup {
    let local = local_prefixes
        .iter()
        .filter(|prefix| !prefix.is_empty())
        .any(|prefix| path.starts_with(prefix.as_str()) || prefix.trim_end_matches('/') == path);
    if local {
        return ImportGroup::Local;
    }
    let first = path.split('/').next().unwrap_or(path);
    if first.contains('.') {
        ImportGroup::ThirdParty
    } else {
        ImportGroup::Std
    }
}

/// Package name an unnamed import of `path` is assumed to bind.
///
/// The last path element, or the one before it when the last is a major
/// version such as `v2`; a `go-` prefix is dropped and the name ends at the
/// first character that cannot appear in an identifier. `gopkg.in/yaml.v3`
/// gives `yaml`, `github.com/mattn/go-sqlite3` gives `sqlite3`.
pub fn assumed_name(path: &str) -> &str {
    let mut elements = path.rsplit('/');
    let mut base = elements.next().unwrap_or(path);
    if is_major_version(base) {
        if let Some(parent) = elements.next() {
            base = parent;
        }
    }
    let base = base.strip_prefix("go-").unwrap_or(base);
    match base.find(|c: char| !is_identifier_char(c)) {
        Some(end) => &base[..end],
        None => base,
    }
}

fn is_major_version(element: &str) -> bool {
    element
        .strip_prefix('v')
        .is_some_and(|digits| digits.parse::<i64>().is_ok())
}

fn is_identifier_char(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric() || !c.is_ascii()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assumed_names_follow_the_last_element() {
        assert_eq!(assumed_name("fmt"), "fmt");
        assert_eq!(assumed_name("net/http"), "http");
        assert_eq!(assumed_name("github.com/pkg/errors"), "errors");
    }

    #[test]
    fn assumed_names_skip_major_versions() {
        assert_eq!(assumed_name("github.com/go-chi/chi/v5"), "chi");
        assert_eq!(assumed_name("v2"), "v2");
        assert_eq!(assumed_name("example.com/lib/vendor"), "vendor");
    }

    #[test]
    fn assumed_names_trim_prefix_and_punctuation() {
        assert_eq!(assumed_name("github.com/mattn/go-sqlite3"), "sqlite3");
        assert_eq!(assumed_name("gopkg.in/yaml.v3"), "yaml");
        assert_eq!(assumed_name("example.com/foo-bar"), "foo");
        assert_eq!(assumed_name("example.com/ünï"), "ünï");
    }

    #[test]
    fn groups_by_first_element_and_prefix() {
        let local = vec!["example.com/me/".to_string()];
        assert_eq!(classify("fmt", &local), ImportGroup::Std);
        assert_eq!(classify("golang.org/x/sync", &local), ImportGroup::ThirdParty);
        assert_eq!(classify("example.com/me/pkg", &local), ImportGroup::Local);
        assert_eq!(classify("example.com/me", &local), ImportGroup::Local);
        assert_eq!(classify("example.com/meow", &local), ImportGroup::ThirdParty);
        assert_eq!(classify("fmt", &[String::new()]), ImportGroup::Std);
    }

    #[test]
    fn groups_sort_in_output_order() {
        assert!(ImportGroup::Std < ImportGroup::ThirdParty);
        assert!(ImportGroup::ThirdParty < ImportGroup::Local);
    }
}
