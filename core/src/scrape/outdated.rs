use serde::{Deserialize, Serialize};

use crate::error::ScrapeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageKind {
    Formula,
    Cask,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutdatedPackage {
    pub name: String,
    pub kind: PackageKind,
    pub installed_versions: Vec<String>,
    pub current_version: String,
    pub pinned: bool,
}

#[derive(Debug, Deserialize)]
struct RawOutdated {
    #[serde(default)]
    formulae: Vec<RawEntry>,
    #[serde(default)]
    casks: Vec<RawEntry>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    name: String,
    #[serde(default)]
    installed_versions: Vec<String>,
    current_version: String,
    #[serde(default)]
    pinned: bool,
}

/// Decodes `brew outdated --json=v2` output. Unlike the stderr contracts,
/// this one is an actual machine-readable interface.
pub fn parse_outdated(json: &str) -> Result<Vec<OutdatedPackage>, ScrapeError> {
    let raw: RawOutdated = serde_json::from_str(json)?;

    let map = |entries: Vec<RawEntry>, kind: PackageKind| {
        entries.into_iter().map(move |e| OutdatedPackage {
            name: e.name,
            kind,
            installed_versions: e.installed_versions,
            current_version: e.current_version,
            pinned: e.pinned,
        })
    };

    Ok(map(raw.formulae, PackageKind::Formula)
        .chain(map(raw.casks, PackageKind::Cask))
        .collect())
}
