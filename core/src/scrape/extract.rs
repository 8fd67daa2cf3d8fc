use std::sync::OnceLock;

use regex::Regex;

use crate::error::ScrapeError;

const ORPHAN_COUNT_PATTERN: &str = r"Autoremoving (\d+) unneeded";

fn orphan_count_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(ORPHAN_COUNT_PATTERN).unwrap())
}

/// Pulls the removed-orphan count out of `brew autoremove` stdout, e.g.
/// `"==> Autoremoving 3 unneeded formulae:"` yields 3.
///
/// A non-matching line is a recoverable [`ScrapeError::PatternNotFound`];
/// callers default the count to zero rather than failing the step.
pub fn extract_orphan_count(line: &str) -> Result<u64, ScrapeError> {
    let caps = orphan_count_re()
        .captures(line)
        .ok_or(ScrapeError::PatternNotFound {
            pattern: ORPHAN_COUNT_PATTERN,
        })?;
    // The group is \d+ so the parse can only overflow, which no real brew
    // output gets anywhere near.
    caps[1]
        .parse::<u64>()
        .map_err(|_| ScrapeError::PatternNotFound {
            pattern: ORPHAN_COUNT_PATTERN,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_count_from_autoremove_line() {
        assert_eq!(
            extract_orphan_count("Autoremoving 3 unneeded formulae").unwrap(),
            3
        );
        assert_eq!(
            extract_orphan_count("==> Autoremoving 12 unneeded formulae:").unwrap(),
            12
        );
    }

    #[test]
    fn missing_pattern_is_a_distinguishable_error() {
        let err = extract_orphan_count("Uninstalling /opt/homebrew/Cellar/foo/1.0").unwrap_err();
        assert!(matches!(err, ScrapeError::PatternNotFound { .. }));
    }
}
