//! Hand-written matcher for configuration resource paths.
//!
//! The accepted character set is intentionally narrow. Callers downstream
//! treat a successful match as a trust decision, so do not widen it.

/// Suffix every resource file carries. Matched literally.
const RESOURCE_SUFFIX: &str = ".json";

/// Whether `c` may appear in an app id, a resource name, or a fixed-layout
/// sub path segment.
pub(crate) fn is_token_char(c: char) -> bool {
    c.is_ascii_lowercase()
        || c.is_ascii_digit()
        || c.is_ascii_whitespace()
        || c == '\x0b'
        || matches!(c, '-' | '_' | '@' | '^' | '!' | '#' | '$' | '%' | '&')
}

/// Generic-root sub path segments also admit `.` (reverse-DNS app ids).
pub(crate) fn is_generic_segment_char(c: char) -> bool {
    c == '.' || is_token_char(c)
}

/// One or more token characters.
pub(crate) fn is_token(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_token_char)
}

/// Shape of a single sub path segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SegmentShape {
    /// Exactly one token character.
    SingleChar,
    /// One or more token characters or `.`, not made of dots alone.
    Dotted,
}

impl SegmentShape {
    fn accepts(self, segment: &str) -> bool {
        match self {
            SegmentShape::SingleChar => {
                let mut chars = segment.chars();
                matches!((chars.next(), chars.next()), (Some(c), None) if is_token_char(c))
            }
            // "." and ".." would step outside the root.
            SegmentShape::Dotted => {
                segment.chars().all(is_generic_segment_char)
                    && segment.chars().any(|c| c != '.')
            }
        }
    }
}

/// Zero or more `/segment` repetitions.
fn is_sub_path(sub: &str, shape: SegmentShape) -> bool {
    if sub.is_empty() {
        return true;
    }
    match sub.strip_prefix('/') {
        Some(rest) => rest.split('/').all(|seg| shape.accepts(seg)),
        None => false,
    }
}

/// Match `{subpath}/{resource}.json` against the tail of a path.
///
/// Returns `(sub_path, resource)` borrowed from `tail`.
pub(crate) fn match_resource_tail(tail: &str, shape: SegmentShape) -> Option<(&str, &str)> {
    let body = tail.strip_suffix(RESOURCE_SUFFIX)?;
    let (sub, resource) = body.rsplit_once('/')?;
    if !is_token(resource) || !is_sub_path(sub, shape) {
        return None;
    }
    Some((sub, resource))
}

/// A fixed-prefix, app-rooted rule: `{prefix}{appid}/{anchor}{subpath}/{resource}.json`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct AppRule {
    pub prefix: &'static str,
    pub anchor: &'static str,
}

/// Captures produced by a successful match, borrowed from the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Captures<'a> {
    pub app_id: &'a str,
    pub sub_path: &'a str,
    pub resource: &'a str,
}

impl AppRule {
    pub(crate) fn captures<'a>(&self, path: &'a str) -> Option<Captures<'a>> {
        let rest = path.strip_prefix(self.prefix)?;
        // The app id cannot contain '/', so it runs to the first one.
        let (app_id, rest) = rest.split_once('/')?;
        if !is_token(app_id) {
            return None;
        }
        let tail = rest.strip_prefix(self.anchor)?;
        let (sub_path, resource) = match_resource_tail(tail, SegmentShape::SingleChar)?;
        Some(Captures {
            app_id,
            sub_path,
            resource,
        })
    }
}

/// Match `{root}{subpath}/{resource}.json`, treating `root` as a literal.
pub(crate) fn generic_captures<'a>(path: &'a str, root: &str) -> Option<Captures<'a>> {
    let root = root.trim_end_matches('/');
    let tail = path.strip_prefix(root)?;
    let (sub_path, resource) = match_resource_tail(tail, SegmentShape::Dotted)?;
    Some(Captures {
        app_id: "",
        sub_path,
        resource,
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_charset() {
        for c in "az09 -_@^!#$%&\t\n\r\x0b\x0c".chars() {
            assert!(is_token_char(c), "expected {c:?} to be accepted");
        }
        for c in "AZ./\\*+?()[]{}|~\u{a0}\u{3000}\u{2028}\u{85}".chars() {
            assert!(!is_token_char(c), "expected {c:?} to be rejected");
        }
    }

    #[test]
    fn test_single_char_segments() {
        assert!(is_sub_path("", SegmentShape::SingleChar));
        assert!(is_sub_path("/a", SegmentShape::SingleChar));
        assert!(is_sub_path("/a/b/9", SegmentShape::SingleChar));
        assert!(!is_sub_path("/ab", SegmentShape::SingleChar));
        assert!(!is_sub_path("a", SegmentShape::SingleChar));
        assert!(!is_sub_path("//", SegmentShape::SingleChar));
        assert!(!is_sub_path("/a/", SegmentShape::SingleChar));
    }

    #[test]
    fn test_dotted_segments() {
        assert!(is_sub_path("/org.app", SegmentShape::Dotted));
        assert!(is_sub_path("/org.app/a/bc", SegmentShape::Dotted));
        assert!(!is_sub_path("/Org", SegmentShape::Dotted));
        assert!(!is_sub_path("/org//app", SegmentShape::Dotted));
        assert!(is_sub_path("/.hidden/a..b", SegmentShape::Dotted));
        assert!(!is_sub_path("/.", SegmentShape::Dotted));
        assert!(!is_sub_path("/org/../etc", SegmentShape::Dotted));
        assert!(!is_sub_path("/...", SegmentShape::Dotted));
    }

    #[test]
    fn test_suffix_is_literal() {
        // An unescaped regex dot would have accepted "xjson".
        assert_eq!(match_resource_tail("/a/bxjson", SegmentShape::SingleChar), None);
        assert_eq!(
            match_resource_tail("/a/b.json", SegmentShape::SingleChar),
            Some(("/a", "b"))
        );
    }

    #[test]
    fn test_app_rule_requires_anchor() {
        let rule = AppRule {
            prefix: "/usr/share/dsg/apps/",
            anchor: "configs",
        };
        assert!(rule.captures("/usr/share/dsg/apps/foo/configs/x.json").is_some());
        assert!(rule.captures("/usr/share/dsg/apps/foo/config/x.json").is_none());
        assert!(rule.captures("/usr/share/dsg/apps//configs/x.json").is_none());
    }

    #[test]
    fn test_generic_root_boundary() {
        assert!(generic_captures("/data/configsx/a.json", "/data/configs").is_none());
        assert!(generic_captures("/data/configs/a.json", "/data/configs/").is_some());
    }
}
