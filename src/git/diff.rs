//! Diff collection for the commit and pull request workflows.
//!
//! Failures of the underlying git command are printed to stderr and collapsed
//! into an empty diff; callers treat an empty diff as "nothing to do".

use tracing::debug;

use crate::git::runner::Vcs;

/// File-name suffixes left out of pull request diffs by default.
///
/// Ignore files, structured-data manifests, lockfiles, and vector images
/// rarely say anything about intent and eat the prompt budget.
pub const DEFAULT_EXCLUDED_SUFFIXES: &[&str] = &[
    ".gitignore",
    ".dockerignore",
    ".json",
    ".yaml",
    ".yml",
    ".toml",
    ".lock",
    ".svg",
];

/// Stage every pending change, then return the diff that will be committed.
///
/// Staging first guarantees the model sees exactly what `git commit` records.
pub fn collect_staged_diff<V: Vcs + ?Sized>(vcs: &V) -> String {
    if let Err(e) = vcs.stage_all() {
        eprintln!("Error staging changes: {e}");
        return String::new();
    }

    match vcs.staged_diff() {
        Ok(diff) => diff,
        Err(e) => {
            eprintln!("Error getting git diff: {e}");
            String::new()
        }
    }
}

/// Return the diff of the current branch against `base` (three-dot).
///
/// Files whose name ends with one of `excluded_suffixes` are left out through
/// exclude pathspecs, so the git argument list stays the same size no matter
/// how many files the repository tracks. Deleted files still show up.
pub fn collect_branch_diff<V: Vcs + ?Sized>(
    vcs: &V,
    base: &str,
    excluded_suffixes: &[&str],
) -> String {
    let pathspecs = exclude_pathspecs(excluded_suffixes);
    debug!("Branch diff against {base} with {} pathspecs", pathspecs.len());

    match vcs.branch_diff(base, &pathspecs) {
        Ok(diff) => diff,
        Err(e) => {
            eprintln!("Error getting git diff: {e}");
            String::new()
        }
    }
}

/// Build `. :(exclude,glob)**/*<suffix>...` for the given suffixes.
///
/// Empty input means no restriction at all.
pub fn exclude_pathspecs(excluded_suffixes: &[&str]) -> Vec<String> {
    if excluded_suffixes.is_empty() {
        return Vec::new();
    }

    std::iter::once(".".to_string())
        .chain(
            excluded_suffixes
                .iter()
                .map(|suffix| format!(":(exclude,glob)**/*{suffix}")),
        )
        .collect()
}
