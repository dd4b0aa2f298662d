//! Branching: fork a document into an independent derivative session.

use savepoint_core::{now_utc_millis, Savepoint};

/// Prefix used for generated branch labels.
pub const BRANCH_PREFIX: &str = "branch-";

/// Fork a document into an independent copy.
///
/// The copy gets a branch label (`branch_name` if given, otherwise
/// `branch-<current UTC timestamp>`), a refreshed modification timestamp,
/// and - when `reset_integrity` is set - a cleared checksum so the branch
/// must be re-sealed before it can claim integrity. The algorithm
/// identifier is preserved. The source document is never mutated, and the
/// returned copy shares no substructure with it.
pub fn branch_savepoint(
    source: &Savepoint,
    branch_name: Option<&str>,
    reset_integrity: bool,
) -> Savepoint {
    let mut branched = source.clone();
    let now = now_utc_millis();
    branched.session_metadata.branch = Some(match branch_name {
        Some(name) => name.to_owned(),
        None => format!("{BRANCH_PREFIX}{now}"),
    });
    branched.session_metadata.updated_at = Some(now);
    if reset_integrity {
        branched.reset_checksum();
    }
    branched
}
