//! Best-effort lookup for mistyped file paths
//!
//! A convenience shim over the filesystem, not part of the engine: it
//! resolves "did you mean" candidates before any engine operation runs, so
//! the engine itself only ever sees paths handed to it by the caller.

use std::path::{Path, PathBuf};

/// Resolve a path, falling back to a unique fuzzy match in its directory.
///
/// An existing path resolves to itself. A missing path resolves only when
/// exactly one similar file is found; with several candidates the caller
/// should present `similar_files` instead of guessing.
pub fn resolve(path: &Path) -> Option<PathBuf> {
    if path.exists() {
        return Some(path.to_path_buf());
    }
    let mut candidates = similar_files(path);
    if candidates.len() == 1 {
        let found = candidates.remove(0);
        tracing::info!(
            requested = %path.display(),
            found = %found.display(),
            "resolved mistyped path to unique similar file"
        );
        Some(found)
    } else {
        None
    }
}

/// Files in the requested path's directory with similar names, best first.
pub fn similar_files(path: &Path) -> Vec<PathBuf> {
    let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
        return Vec::new();
    };
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let Ok(entries) = std::fs::read_dir(&dir) else {
        return Vec::new();
    };

    let mut matches: Vec<(PathBuf, i32)> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| {
            let candidate = entry.file_name().to_string_lossy().into_owned();
            fuzzy_match_score(&name, &candidate).map(|score| (entry.path(), score))
        })
        .collect();

    // Best matches first; ties in path order for determinism.
    matches.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    matches.into_iter().map(|(path, _)| path).collect()
}

/// Calculate fuzzy match score. Returns None if no match, Some(score) if
/// matches. Higher score = better match. Consecutive matches and word-start
/// matches score higher.
fn fuzzy_match_score(query: &str, target: &str) -> Option<i32> {
    let query_chars: Vec<char> = query.to_lowercase().chars().collect();
    let target_lower = target.to_lowercase();
    let target_chars: Vec<char> = target_lower.chars().collect();

    if query_chars.is_empty() {
        return Some(0);
    }

    let mut query_idx = 0;
    let mut score = 0;
    let mut prev_matched = false;
    let mut prev_was_separator = true; // Start of string counts as separator

    for (i, &tc) in target_chars.iter().enumerate() {
        let is_separator = tc == ' ' || tc == '_' || tc == '-' || tc == '.';

        if query_idx < query_chars.len() && tc == query_chars[query_idx] {
            score += 1;

            // Bonus for consecutive matches
            if prev_matched {
                score += 2;
            }

            // Bonus for matching at word start (after separator or at beginning)
            if prev_was_separator {
                score += 3;
            }

            // Bonus for matching at string start
            if i == 0 {
                score += 5;
            }

            query_idx += 1;
            prev_matched = true;
        } else {
            prev_matched = false;
        }

        prev_was_separator = is_separator;
    }

    // All query chars must be found
    if query_idx == query_chars.len() {
        Some(score)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn scores_require_all_query_chars_in_order() {
        assert!(fuzzy_match_score("sales", "sales_2024.csv").is_some());
        assert!(fuzzy_match_score("slaes", "sales.csv").is_none());
        assert!(fuzzy_match_score("", "anything").is_some());
    }

    #[test]
    fn closer_names_score_higher() {
        let exact = fuzzy_match_score("report.csv", "report.csv").unwrap();
        let loose = fuzzy_match_score("report.csv", "quarterly_report_final.csv").unwrap();
        assert!(exact > loose);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(
            fuzzy_match_score("DATA", "data.csv"),
            fuzzy_match_score("data", "data.csv")
        );
    }

    #[test]
    fn existing_paths_resolve_to_themselves() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("orders.csv");
        fs::write(&file, "a,b\n").unwrap();
        assert_eq!(resolve(&file), Some(file));
    }

    #[test]
    fn unique_similar_file_resolves() {
        let dir = TempDir::new().unwrap();
        let actual = dir.path().join("orders_2024.csv");
        fs::write(&actual, "a,b\n").unwrap();
        fs::write(dir.path().join("unrelated.txt"), "x\n").unwrap();

        let resolved = resolve(&dir.path().join("orders.csv"));
        assert_eq!(resolved, Some(actual));
    }

    #[test]
    fn ambiguous_lookups_stay_unresolved_but_list_candidates() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("orders_q1.csv"), "a\n").unwrap();
        fs::write(dir.path().join("orders_q2.csv"), "a\n").unwrap();

        let requested = dir.path().join("orders.csv");
        assert_eq!(resolve(&requested), None);
        assert_eq!(similar_files(&requested).len(), 2);
    }

    #[test]
    fn missing_directory_yields_no_candidates() {
        let requested = Path::new("/no/such/dir/file.csv");
        assert!(similar_files(requested).is_empty());
        assert_eq!(resolve(requested), None);
    }
}
