//! Every brittle text contract with `brew` lives in this module and nowhere
//! else. The strings matched here are a versioned, unstable "API": a wording
//! change in a new Homebrew release breaks classification, and the only fix
//! is updating this one module. That is a documented limitation of scraping
//! a third-party tool's human-readable output, not something the rest of the
//! crate should try to paper over.

mod classify;
mod extract;
mod outdated;
mod search;

pub use classify::{classify_stderr, StderrClass};
pub use extract::extract_orphan_count;
pub use outdated::{parse_outdated, OutdatedPackage, PackageKind};
pub use search::parse_search_results;
