//! Version range compatibility for manifest entries
//!
//! Decides whether a range the user already declared is compatible with
//! the range a component asks for. npm syntax is normalized into what the
//! `semver` crate parses:
//!
//! ```text
//! ">=1.2.0 <2.0.0"   ->  ">=1.2.0, <2.0.0"
//! ">= 1.2.0"         ->  ">=1.2.0"
//! "^1.0.0 || ^2.0.0" ->  alternatives "^1.0.0", "^2.0.0"
//! "v1.2.3"           ->  "=1.2.3"
//! ```

use semver::{Op, Version, VersionReq};

const WILDCARDS: &[&str] = &["", "*", "x", "X", "latest"];

/// Whether `existing` satisfies what `requested` asks for
///
/// Compatible when the ranges are textually identical, when either one is a
/// wildcard, when `existing` is a protocol specifier the user controls
/// (`workspace:`, `file:`, git URLs, ...), or when the lowest version
/// `existing` admits also satisfies `requested`.
pub fn ranges_compatible(existing: &str, requested: &str) -> bool {
    let existing = existing.trim();
    let requested = requested.trim();

    if existing == requested || is_wildcard(existing) || is_wildcard(requested) {
        return true;
    }

    if is_protocol_specifier(existing) {
        return true;
    }

    let (Some(existing_alternatives), Some(requested_alternatives)) =
        (parse_alternatives(existing), parse_alternatives(requested))
    else {
        return false;
    };

    existing_alternatives.iter().any(|existing_req| {
        lowest_admitted(existing_req).is_some_and(|lowest| {
            requested_alternatives
                .iter()
                .any(|requested_req| requested_req.matches(&lowest))
        })
    })
}

fn is_wildcard(range: &str) -> bool {
    WILDCARDS.contains(&range)
}

fn is_protocol_specifier(range: &str) -> bool {
    range.contains(':') || range.contains('/')
}

/// Parse an npm range into its `||` alternatives
fn parse_alternatives(range: &str) -> Option<Vec<VersionReq>> {
    range
        .split("||")
        .map(|alternative| VersionReq::parse(&normalize_npm(alternative)).ok())
        .collect()
}

/// Rewrite one npm comparator set into `semver` syntax
fn normalize_npm(range: &str) -> String {
    let mut comparators: Vec<String> = Vec::new();
    let mut pending_op = String::new();

    for token in range.split_whitespace() {
        if token.chars().all(|c| matches!(c, '<' | '>' | '=' | '~' | '^')) {
            pending_op.push_str(token);
            continue;
        }
        let token = token.trim_end_matches(',');
        let (op, version) = split_op(token);
        let version = version.strip_prefix('v').unwrap_or(version);
        let mut op = format!("{pending_op}{op}");
        pending_op.clear();
        if op.is_empty() && version.chars().all(|c| c.is_ascii_digit() || c == '.') {
            // npm treats a bare full version as exact
            if version.matches('.').count() == 2 {
                op.push('=');
            }
        }
        comparators.push(format!("{op}{version}"));
    }

    comparators.join(", ")
}

fn split_op(token: &str) -> (&str, &str) {
    let idx = token
        .find(|c: char| !matches!(c, '<' | '>' | '=' | '~' | '^'))
        .unwrap_or(token.len());
    token.split_at(idx)
}

/// Lowest version a requirement admits, when it has a lower bound
fn lowest_admitted(req: &VersionReq) -> Option<Version> {
    let mut lowest: Option<Version> = None;

    for comparator in &req.comparators {
        let minor = comparator.minor.unwrap_or(0);
        let patch = comparator.patch.unwrap_or(0);
        let candidate = match comparator.op {
            Op::Exact | Op::GreaterEq | Op::Tilde | Op::Caret | Op::Wildcard => {
                let mut version = Version::new(comparator.major, minor, patch);
                version.pre = comparator.pre.clone();
                version
            }
            Op::Greater => {
                let next = match (comparator.minor, comparator.patch) {
                    (Some(minor), Some(patch)) => patch
                        .checked_add(1)
                        .map(|patch| Version::new(comparator.major, minor, patch)),
                    (Some(minor), None) => minor
                        .checked_add(1)
                        .map(|minor| Version::new(comparator.major, minor, 0)),
                    (None, _) => comparator
                        .major
                        .checked_add(1)
                        .map(|major| Version::new(major, 0, 0)),
                };
                // nothing above the maximum version
                let Some(next) = next else { continue };
                next
            }
            _ => continue,
        };

        lowest = Some(match lowest {
            Some(current) if current >= candidate => current,
            _ => candidate,
        });
    }

    lowest.filter(|version| req.matches(version))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_ranges_compatible() {
        assert!(ranges_compatible("^1.0.0", "^1.0.0"));
        assert!(ranges_compatible(" ^1.0.0 ", "^1.0.0"));
    }

    #[test]
    fn test_major_mismatch_incompatible() {
        assert!(!ranges_compatible("^1.0.0", "^2.0.0"));
        assert!(!ranges_compatible("~1.2.0", "^1.3.0"));
    }

    #[test]
    fn test_narrower_existing_compatible() {
        assert!(ranges_compatible("^1.4.0", "^1.0.0"));
        assert!(ranges_compatible("~1.2.3", "^1.2.0"));
        assert!(ranges_compatible("1.2.3", "^1.0.0"));
    }

    #[test]
    fn test_older_existing_incompatible() {
        assert!(!ranges_compatible("^1.0.0", "^1.4.0"));
    }

    #[test]
    fn test_wildcards_compatible() {
        assert!(ranges_compatible("*", "^3.0.0"));
        assert!(ranges_compatible("latest", "^3.0.0"));
        assert!(ranges_compatible("^3.0.0", "*"));
    }

    #[test]
    fn test_protocol_specifiers_compatible() {
        assert!(ranges_compatible("workspace:*", "^1.0.0"));
        assert!(ranges_compatible("file:../local-pkg", "^1.0.0"));
        assert!(ranges_compatible("github:user/repo", "^1.0.0"));
    }

    #[test]
    fn test_npm_comparator_sets() {
        assert!(ranges_compatible(">=1.2.0 <2.0.0", "^1.0.0"));
        assert!(ranges_compatible(">= 1.2.0", "^1.1.0"));
        assert!(!ranges_compatible(">=2.0.0 <3.0.0", "^1.0.0"));
    }

    #[test]
    fn test_npm_alternatives() {
        assert!(ranges_compatible("^1.0.0 || ^2.0.0", "^2.0.0"));
        assert!(ranges_compatible("^17.0.0", "^17.0.0 || ^18.0.0"));
        assert!(!ranges_compatible("^16.0.0", "^17.0.0 || ^18.0.0"));
    }

    #[test]
    fn test_unparseable_different_ranges_incompatible() {
        assert!(!ranges_compatible("banana", "^1.0.0"));
    }

    #[test]
    fn test_greater_than_maximum_version_has_no_lower_bound() {
        let req = VersionReq::parse(">1.2.18446744073709551615").unwrap();
        assert_eq!(lowest_admitted(&req), None);
        assert!(!ranges_compatible(">1.2.18446744073709551615", "^1.0.0"));
        assert!(!ranges_compatible(">18446744073709551615", "^1.0.0"));
    }

    #[test]
    fn test_normalize_npm() {
        assert_eq!(normalize_npm(">=1.2.0 <2.0.0"), ">=1.2.0, <2.0.0");
        assert_eq!(normalize_npm(">= 1.2.0"), ">=1.2.0");
        assert_eq!(normalize_npm("v1.2.3"), "=1.2.3");
        assert_eq!(normalize_npm("^1.0.0"), "^1.0.0");
    }
}
