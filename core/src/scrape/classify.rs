/// What a single stderr line from `brew` means for the operation in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StderrClass {
    /// Known noise; counts as progress, never surfaced.
    Ignorable,
    /// `brew cleanup` skipped a download because the most recent version of
    /// the package is not the installed one. Sets a flag on the report, is
    /// not an error.
    SkippedLatestVersion,
    /// Everything else: surfaced to the user, accumulated in an error list,
    /// never aborts the run.
    Fatal,
}

/// Classifies one stderr line. Pure and deterministic: the same line always
/// gets the same class.
///
/// Checksum warnings emitted while pulling from third-party taps are the one
/// ignorable shape (`"tap"` and `"No checksum defined for"` must both be
/// present; a checksum warning from outside a tap is a real problem).
pub fn classify_stderr(line: &str) -> StderrClass {
    if line.contains("tap") && line.contains("No checksum defined for") {
        return StderrClass::Ignorable;
    }
    if line.contains("Warning: Skipping") {
        return StderrClass::SkippedLatestVersion;
    }
    StderrClass::Fatal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tap_checksum_warnings_are_ignorable() {
        let line = "Warning: No checksum defined for cask from tap homebrew/cask-versions";
        assert_eq!(classify_stderr(line), StderrClass::Ignorable);
    }

    #[test]
    fn checksum_warning_outside_a_tap_is_fatal() {
        // Only the conjunction of both markers is noise.
        assert_eq!(
            classify_stderr("Warning: No checksum defined for cask something"),
            StderrClass::Fatal
        );
        assert_eq!(
            classify_stderr("Error: could not update tap homebrew/core"),
            StderrClass::Fatal
        );
    }

    #[test]
    fn skipped_most_recent_version_is_flagged_not_fatal() {
        let line = "Warning: Skipping macvim-kaoriya, most recent version already installed";
        assert_eq!(classify_stderr(line), StderrClass::SkippedLatestVersion);
    }

    #[test]
    fn unknown_stderr_is_fatal() {
        assert_eq!(
            classify_stderr("Error: Permission denied @ rb_sysopen"),
            StderrClass::Fatal
        );
    }

    #[test]
    fn classification_is_idempotent() {
        let lines = [
            "Warning: No checksum defined for cask from tap homebrew/cask-fonts",
            "Warning: Skipping wezterm, most recent version already installed",
            "Error: something broke",
        ];
        for line in lines {
            let first = classify_stderr(line);
            for _ in 0..3 {
                assert_eq!(classify_stderr(line), first);
            }
        }
    }
}
