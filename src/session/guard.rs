//! Path authorization guard.

/// Decides whether authentication is required for `path`.
///
/// Fails closed: a missing path or an empty rule list always requires auth.
/// The path is normalized by stripping exactly one trailing slash. Rules come
/// in three kinds, evaluated in the order supplied (first match wins, and a
/// match always means exempt):
///
/// - wildcard (`"/api/public/*"`): the normalized path must start with the
///   rule minus its trailing `*`. The rule itself is never slash-normalized
///   and the match anchors at the literal prefix, not a path-segment
///   boundary, so a slashless `"/api*"` exempts `/apiXYZ` while `"/api/*"`
///   does not.
/// - exact/prefix: the rule is slash-normalized like the path; the path is
///   exempt when it equals the rule or continues it past a `/`.
///
/// Pure function over its arguments; safe to call concurrently.
pub fn require_auth(path: Option<&str>, exempt_paths: &[String]) -> bool {
    let Some(path) = path else {
        return true;
    };
    if exempt_paths.is_empty() {
        return true;
    }

    let path = strip_trailing_slash(path);

    for rule in exempt_paths {
        if rule.ends_with('*') {
            let prefix = rule.trim_end_matches('*');
            if path.starts_with(prefix) {
                return false;
            }
        } else {
            let rule = strip_trailing_slash(rule);
            if path == rule || path.starts_with(&format!("{rule}/")) {
                return false;
            }
        }
    }

    true
}

fn strip_trailing_slash(path: &str) -> &str {
    path.strip_suffix('/').unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn missing_path_or_empty_rules_require_auth() {
        assert!(require_auth(None, &rules(&["/api/status"])));
        assert!(require_auth(Some("/api/status"), &[]));
    }

    #[test]
    fn exact_match_is_exempt_with_trailing_slash_normalized() {
        let exempt = rules(&["/api/status"]);
        assert!(!require_auth(Some("/api/status"), &exempt));
        assert!(!require_auth(Some("/api/status/"), &exempt));
        assert!(require_auth(Some("/api/statuses"), &exempt));
    }

    #[test]
    fn rule_trailing_slash_is_also_normalized() {
        let exempt = rules(&["/api/status/"]);
        assert!(!require_auth(Some("/api/status"), &exempt));
    }

    #[test]
    fn prefix_rule_exempts_subpaths_at_segment_boundary() {
        let exempt = rules(&["/api/status"]);
        assert!(!require_auth(Some("/api/status/detail"), &exempt));
        assert!(require_auth(Some("/api/status2/detail"), &exempt));
    }

    #[test]
    fn wildcard_anchors_at_literal_prefix() {
        let exempt = rules(&["/api/public/*"]);
        assert!(!require_auth(Some("/api/public/x"), &exempt));
        // The wildcard is a raw string prefix, not a segment boundary.
        assert!(require_auth(Some("/api/publicity"), &exempt));

        // "/api/*" keeps its slash in the prefix, so lookalike segments
        // still require auth; only a slashless "/api*" exempts them.
        let strict = rules(&["/api/*"]);
        assert!(!require_auth(Some("/api/anything"), &strict));
        assert!(require_auth(Some("/apiXYZ"), &strict));

        let loose = rules(&["/api*"]);
        assert!(!require_auth(Some("/apiXYZ"), &loose));
    }

    #[test]
    fn unmatched_paths_require_auth() {
        let exempt = rules(&["/api/status", "/api/public/*"]);
        assert!(require_auth(Some("/api/users"), &exempt));
    }

    #[test]
    fn first_match_short_circuits_but_any_match_exempts() {
        let exempt = rules(&["/a", "/b"]);
        assert!(!require_auth(Some("/a"), &exempt));
        assert!(!require_auth(Some("/b"), &exempt));
    }
}
