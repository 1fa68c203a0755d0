//! Semantic-version adapter for the `VersionMatcher` port.
//!
//! Constraints use the npm-style range syntax download pages usually quote:
//! space-separated comparators (`>=1.2 <2`), `||` alternatives, hyphen
//! ranges (`1.2 - 1.4`) and bare partial versions (`1.71` meaning any
//! `1.71.x`). They are rewritten into [`semver::VersionReq`] syntax before
//! parsing.

use binwrap_core::{VersionError, VersionMatcher};
use regex::Regex;
use semver::{Version, VersionReq};
use std::sync::LazyLock;

static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\.(\d+)(?:\.(\d+))?").expect("version pattern is a valid regex")
});

const OPERATOR_CHARS: &[char] = &['>', '<', '=', '~', '^'];

fn is_operator(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| OPERATOR_CHARS.contains(&c))
}

/// Rewrite one `||` alternative into `VersionReq` syntax.
fn normalize_alternative(alternative: &str) -> Option<String> {
    let tokens: Vec<&str> = alternative.split_whitespace().collect();
    if tokens.is_empty() {
        return None;
    }

    // `a - b`
    if let [low, "-", high] = tokens.as_slice() {
        return Some(format!(">={low}, <={high}"));
    }

    let mut comparators = Vec::new();
    let mut pending_op: Option<&str> = None;
    for token in tokens {
        if is_operator(token) {
            pending_op = Some(token);
            continue;
        }
        let token = token.trim_start_matches(['v', 'V']);
        let comparator = match pending_op.take() {
            Some(op) => format!("{op}{token}"),
            None if token.starts_with(|c: char| c.is_ascii_digit())
                && !token.contains(['x', 'X', '*']) =>
            {
                format!("={token}")
            }
            None => token.to_string(),
        };
        comparators.push(comparator);
    }

    if pending_op.is_some() {
        return None;
    }
    Some(comparators.join(", "))
}

/// Parse a range expression into its `||` alternatives.
pub fn parse_constraint(constraint: &str) -> Result<Vec<VersionReq>, VersionError> {
    let invalid = |reason: String| VersionError::InvalidConstraint {
        constraint: constraint.to_string(),
        reason,
    };

    constraint
        .split("||")
        .map(|alternative| {
            let normalized = normalize_alternative(alternative)
                .ok_or_else(|| invalid("empty or dangling comparator".to_string()))?;
            VersionReq::parse(&normalized).map_err(|e| invalid(e.to_string()))
        })
        .collect()
}

/// `VersionMatcher` backed by the `semver` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct SemverMatcher;

impl VersionMatcher for SemverMatcher {
    /// First `major.minor[.patch]` in the output, with a missing patch as `0`.
    fn extract_version(&self, output: &str) -> Option<String> {
        let caps = VERSION_PATTERN.captures(output)?;
        let patch = caps.get(3).map_or("0", |m| m.as_str());
        Some(format!("{}.{}.{patch}", &caps[1], &caps[2]))
    }

    fn satisfies(&self, version: &str, constraint: &str) -> Result<bool, VersionError> {
        let reqs = parse_constraint(constraint)?;
        let version = Version::parse(version.trim().trim_start_matches(['v', 'V'])).map_err(|e| {
            VersionError::InvalidVersion {
                version: version.to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok(reqs.iter().any(|req| req.matches(&version)))
    }
}
