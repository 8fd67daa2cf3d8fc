//! Plain-text rendering of operation reports. Accumulated errors are always
//! listed after the run finished, never interleaved with it.

use malt_core::ops::{MaintenanceReport, SearchResults, UpgradeReport};
use malt_core::scrape::{OutdatedPackage, PackageKind};

pub fn maintenance(report: &MaintenanceReport) {
    println!("Maintenance finished");

    if let Some(orphans) = report.orphans_removed {
        if orphans == 0 {
            println!("  No orphaned packages found");
        } else {
            println!("  {orphans} orphaned packages removed");
        }
    }

    if report.cache_purged {
        println!("  Package cache purged");
        if report.cache_skipped_held_back {
            println!("    Some caches were kept because packages are held back on older versions");
        }
    }

    match report.health_check_ok {
        Some(true) => println!("  No problems with Homebrew found"),
        Some(false) => println!("  There were some problems with Homebrew"),
        None => {}
    }

    errors(&report.errors);
}

pub fn upgrade(report: &UpgradeReport) {
    if report.success() {
        println!("Upgrade finished");
    } else {
        println!("Upgrade finished with problems (exit code {})", report.exit_code);
    }
    errors(&report.errors);
}

pub fn search(term: &str, results: &SearchResults) {
    if results.formulae.is_empty() && results.casks.is_empty() {
        println!("No formulae or casks found for \"{term}\"");
        return;
    }
    if !results.formulae.is_empty() {
        println!("Formulae:");
        for name in &results.formulae {
            println!("  {name}");
        }
    }
    if !results.casks.is_empty() {
        println!("Casks:");
        for name in &results.casks {
            println!("  {name}");
        }
    }
}

pub fn outdated(packages: &[OutdatedPackage], as_json: bool) -> anyhow::Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(packages)?);
        return Ok(());
    }

    if packages.is_empty() {
        println!("Everything is up to date");
        return Ok(());
    }
    for pkg in packages {
        let kind = match pkg.kind {
            PackageKind::Formula => "formula",
            PackageKind::Cask => "cask",
        };
        let pin = if pkg.pinned { " (pinned)" } else { "" };
        println!(
            "{} ({kind}) {} -> {}{pin}",
            pkg.name,
            pkg.installed_versions.join(", "),
            pkg.current_version,
        );
    }
    Ok(())
}

fn errors(errors: &[String]) {
    if errors.is_empty() {
        return;
    }
    eprintln!("\n{} error(s) during the run:", errors.len());
    for err in errors {
        eprintln!("  {err}");
    }
}
