/// Turns `brew search` stdout lines into package names: one name per
/// non-empty line, `==>` section headers dropped.
pub fn parse_search_results(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty() && !l.starts_with("==>"))
        .map(|l| l.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_headers_and_blanks() {
        let lines: Vec<String> = [
            "==> Formulae",
            "wget",
            "wget2",
            "",
            "==> Casks",
            "wgestures",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        assert_eq!(
            parse_search_results(&lines),
            vec!["wget", "wget2", "wgestures"]
        );
    }
}
