mod template;

pub use template::{Template, TemplateError};

use std::collections::HashSet;

use regex::Regex;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::rename::{PlanEntry, RenamePlan};
use crate::scanner::{has_path_separator, is_reserved_name};

#[derive(Error, Debug)]
pub enum PreviewError {
    #[error("Invalid regex pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Why a single name could not be transformed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubstituteError {
    #[error("{0}")]
    Template(#[from] TemplateError),

    #[error("new name '{0}' contains a path separator")]
    PathSeparator(String),

    #[error("new name '{0}' is reserved")]
    ReservedName(String),
}

/// Outcome of one preview pass
#[derive(Debug, Clone, Default)]
pub struct Preview {
    pub plan: RenamePlan,
    pub warnings: Vec<String>,
}

impl Preview {
    pub fn has_changes(&self) -> bool {
        self.plan.has_changes()
    }
}

/// Compute the new name of every entry in `names`.
///
/// Only an uncompilable pattern fails the whole pass. Per-name problems fall
/// back to the old name and are reported in `warnings`, as are duplicate
/// targets (which are left in the plan as computed).
pub fn compute_preview<S: AsRef<str>>(
    names: &[S],
    pattern: &str,
    replacement: &str,
) -> Result<Preview, PreviewError> {
    let regex = Regex::new(pattern).map_err(|source| PreviewError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })?;
    let template = Template::parse(replacement, &regex).map_err(SubstituteError::from);

    debug!(pattern = %pattern, replacement = %replacement, count = names.len(), "Computing preview");

    let mut plan = RenamePlan::new();
    let mut warnings = Vec::new();
    let mut seen: HashSet<String> = HashSet::with_capacity(names.len());

    for name in names {
        let name = name.as_ref();

        match substitute(&regex, &template, name) {
            Ok(new_name) => {
                if !seen.insert(new_name.clone()) {
                    warn!(name = %new_name, "Duplicate target name");
                    warnings.push(format!("Duplicate name: {}", new_name));
                }
                plan.push(PlanEntry::new(name, new_name));
            }
            Err(e) => {
                warn!(name = %name, error = %e, "Substitution failed");
                warnings.push(format!("Error processing '{}': {}", name, e));
                plan.push(PlanEntry::unchanged(name));
            }
        }
    }

    info!(
        total = plan.len(),
        changed = plan.change_count(),
        warnings = warnings.len(),
        "Preview computed"
    );

    Ok(Preview { plan, warnings })
}

fn substitute(
    regex: &Regex,
    template: &Result<Template, SubstituteError>,
    name: &str,
) -> Result<String, SubstituteError> {
    let template = template.as_ref().map_err(Clone::clone)?;

    let new_name = regex.replace_all(name, template);
    if new_name.is_empty() {
        return Ok(name.to_string());
    }

    if has_path_separator(&new_name) {
        return Err(SubstituteError::PathSeparator(new_name.into_owned()));
    }

    if is_reserved_name(&new_name) {
        return Err(SubstituteError::ReservedName(new_name.into_owned()));
    }

    Ok(new_name.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_names(preview: &Preview) -> Vec<&str> {
        preview.plan.iter().map(|e| e.new_name.as_str()).collect()
    }

    #[test]
    fn test_preview_keeps_one_entry_per_name() {
        let names = ["a.txt", "b.txt", "c.jpg", "weird name"];
        let preview = compute_preview(&names, r"\.txt$", ".md").unwrap();

        assert_eq!(preview.plan.len(), names.len());
        let olds: Vec<_> = preview.plan.iter().map(|e| e.old_name.as_str()).collect();
        assert_eq!(olds, names);
        assert_eq!(new_names(&preview), ["a.md", "b.md", "c.jpg", "weird name"]);
    }

    #[test]
    fn test_no_match_is_identity() {
        let names = ["a.txt", "b.txt"];
        let preview = compute_preview(&names, "zzz", "y").unwrap();

        assert!(preview.plan.iter().all(|e| !e.is_change()));
        assert!(preview.warnings.is_empty());
        assert!(!preview.has_changes());
    }

    #[test]
    fn test_duplicate_names_are_reported() {
        let preview = compute_preview(&["a.txt", "b.txt"], ".*", "x").unwrap();

        assert_eq!(new_names(&preview), ["x", "x"]);
        assert_eq!(preview.warnings, vec!["Duplicate name: x".to_string()]);
    }

    #[test]
    fn test_empty_result_falls_back_to_old_name() {
        let preview = compute_preview(&["report.txt"], ".+", "").unwrap();

        assert_eq!(new_names(&preview), ["report.txt"]);
        assert!(preview.warnings.is_empty());
    }

    #[test]
    fn test_global_substitution_includes_extension() {
        let preview = compute_preview(&["my file name.txt"], " ", "_").unwrap();
        assert_eq!(new_names(&preview), ["my_file_name.txt"]);

        let preview = compute_preview(&["photo.JPG"], r"JPG", "jpg").unwrap();
        assert_eq!(new_names(&preview), ["photo.jpg"]);
    }

    #[test]
    fn test_backreferences() {
        let preview =
            compute_preview(&["IMG_2023_001.jpg"], r"IMG_(\d{4})_(\d+)", r"\1-\2").unwrap();
        assert_eq!(new_names(&preview), ["2023-001.jpg"]);
    }

    #[test]
    fn test_invalid_pattern() {
        let result = compute_preview(&["a.txt"], "(unclosed", "x");
        assert!(matches!(result, Err(PreviewError::InvalidPattern { .. })));
    }

    #[test]
    fn test_bad_group_reference_falls_back_per_name() {
        let preview = compute_preview(&["a1.txt", "b2.txt"], r"\d", r"\1").unwrap();

        assert_eq!(new_names(&preview), ["a1.txt", "b2.txt"]);
        assert_eq!(preview.warnings.len(), 2);
        assert_eq!(
            preview.warnings[0],
            "Error processing 'a1.txt': invalid group reference 1"
        );
        assert!(preview.warnings[1].starts_with("Error processing 'b2.txt'"));
    }

    #[test]
    fn test_path_separator_is_rejected() {
        let preview = compute_preview(&["a-b.txt", "c.txt"], "-", "/").unwrap();

        assert_eq!(new_names(&preview), ["a-b.txt", "c.txt"]);
        assert_eq!(preview.warnings.len(), 1);
        assert!(preview.warnings[0].contains("path separator"));
    }

    #[test]
    fn test_dot_names_are_rejected() {
        let preview = compute_preview(&["x"], "x", "..").unwrap();

        assert_eq!(new_names(&preview), ["x"]);
        assert!(preview.warnings[0].contains("reserved"));
    }

    #[test]
    fn test_failed_entries_do_not_count_as_seen() {
        let preview = compute_preview(&["a", "a"], "a", r"\1").unwrap();

        assert_eq!(new_names(&preview), ["a", "a"]);
        assert_eq!(preview.warnings.len(), 2);
        assert!(preview.warnings.iter().all(|w| w.starts_with("Error processing 'a'")));
    }

    #[test]
    fn test_preview_is_deterministic() {
        let names = ["one.txt", "two.txt", "three.txt"];
        let first = compute_preview(&names, "t", "T").unwrap();
        let second = compute_preview(&names, "t", "T").unwrap();

        assert_eq!(first.plan, second.plan);
        assert_eq!(first.warnings, second.warnings);
    }

    #[test]
    fn test_mixed_failures_keep_one_entry_per_name() {
        let names = ["x.", "gone", "dup1.txt", "dup2.txt", "notes.md", "photo.jpg"];

        let preview =
            compute_preview(&names, r"^(?:[a-z]+(\.)|gone|dup\d(\.txt))$", r"\1\2").unwrap();
        assert_eq!(
            new_names(&preview),
            ["x.", "gone", ".txt", ".txt", "notes.md", "photo.jpg"]
        );
        assert!(preview.warnings.iter().any(|w| w.starts_with("Error processing 'x.'")));
        assert!(preview.warnings.iter().any(|w| w.contains("Duplicate name: .txt")));

        for (pattern, replacement) in [
            (r"^(?:[a-z]+(\.)|gone|dup\d(\.txt))$", r"\1\2"),
            (r"\.", "/"),
            ("(a)", r"\2"),
            ("", ""),
            (".*", "same"),
        ] {
            let preview = compute_preview(&names, pattern, replacement).unwrap();
            let olds: Vec<&str> = preview.plan.iter().map(|e| e.old_name.as_str()).collect();
            assert_eq!(preview.plan.len(), names.len(), "pattern {:?}", pattern);
            assert_eq!(olds, names, "pattern {:?}", pattern);
        }
    }

    #[test]
    fn test_empty_name_list() {
        let names: [&str; 0] = [];
        let preview = compute_preview(&names, "a", "b").unwrap();
        assert!(preview.plan.is_empty());
        assert!(preview.warnings.is_empty());
    }
}
