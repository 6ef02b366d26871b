//! Filesystem layer: lists the files of a directory, plans a canonical name
//! for each one and renames them.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, info_span, warn};

use crate::chain::Extractor;
use crate::consts::SCRIPT_EXTENSIONS;
use crate::error::{NameError, RenameError};
use crate::normalize::{canonical_name, has_canonical_prefix};
use crate::report::{DirectoryReport, FileOutcome, RunReport, SkipReason};
use crate::{CalendarDate, Inferred};

/// How a run treats the files it plans to rename.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Perform renames; otherwise only report them.
    pub execute: bool,
}

/// What should happen to a single file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    Keep(SkipReason),
    Rename {
        to: String,
        date: CalendarDate,
        pattern: &'static str,
        inferred: Option<Inferred>,
    },
}

/// Decides the canonical name for `name` without touching the filesystem.
///
/// # Errors
/// `Unrecognized` when no recognizer fires, `InvalidDate` when the found
/// triple is not a real date within the accepted years.
pub fn plan_name(name: &str, extractor: &Extractor) -> Result<Plan, NameError> {
    if has_canonical_prefix(name) {
        return Ok(Plan::Keep(SkipReason::AlreadyCanonical));
    }

    let found = extractor
        .extract(name)
        .ok_or_else(|| NameError::Unrecognized {
            name: name.to_string(),
        })?;

    let date = extractor
        .validate(&found)
        .map_err(|source| NameError::InvalidDate {
            name: name.to_string(),
            date: found.date_prefix(),
            pattern: found.pattern,
            source,
        })?;

    let to = canonical_name(&date, &found.remainder);
    if to == name {
        return Ok(Plan::Keep(SkipReason::Unchanged));
    }

    Ok(Plan::Rename {
        to,
        date,
        pattern: found.pattern,
        inferred: found.inferred,
    })
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with('.'))
}

fn is_script(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SCRIPT_EXTENSIONS
                .iter()
                .any(|script| ext.eq_ignore_ascii_case(script))
        })
}

/// Lists the regular files of `dir` that are candidates for renaming.
///
/// Hidden files and scripts are left out. Returns files sorted by filename.
pub fn list_candidate_files(dir: &Path) -> Result<Vec<PathBuf>, RenameError> {
    if !dir.is_dir() {
        return Err(RenameError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = fs::read_dir(dir).map_err(|source| RenameError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| RenameError::DirectoryRead {
            path: dir.to_path_buf(),
            source,
        })?;

        let path = entry.path();
        if !path.is_file() || is_hidden(&path) || is_script(&path) {
            continue;
        }
        files.push(path);
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}

fn process_file(
    path: &Path,
    options: &RunOptions,
    extractor: &Extractor,
    claimed: &mut HashSet<PathBuf>,
) -> Result<FileOutcome, RenameError> {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| RenameError::NonUtf8Name {
            path: path.to_path_buf(),
        })?;

    let (to, date, pattern, inferred) = match plan_name(name, extractor)? {
        Plan::Keep(reason) => {
            debug!(file = name, %reason, "skipped");
            return Ok(FileOutcome::Skipped {
                name: name.to_string(),
                reason,
            });
        }
        Plan::Rename {
            to,
            date,
            pattern,
            inferred,
        } => (to, date, pattern, inferred),
    };
    debug!(file = name, pattern, ?inferred, "date recognized");

    let target = path.with_file_name(&to);
    if target.exists() || !claimed.insert(target.clone()) {
        return Err(RenameError::TargetExists { path: target });
    }

    if !options.execute {
        info!(from = name, to = %to, "would rename");
        return Ok(FileOutcome::WouldRename {
            from: name.to_string(),
            to,
            date,
            pattern,
        });
    }

    fs::rename(path, &target).map_err(|source| RenameError::Rename {
        from: path.to_path_buf(),
        to: target.clone(),
        source,
    })?;
    info!(from = name, to = %to, "renamed");

    Ok(FileOutcome::Renamed {
        from: name.to_string(),
        to,
        date,
        pattern,
    })
}

/// Plans and (with `execute`) performs the renames for one directory.
///
/// Failures are recorded per file; a directory that cannot be listed yields
/// a report carrying that error.
pub fn process_directory(dir: &Path, options: &RunOptions, extractor: &Extractor) -> DirectoryReport {
    let span = info_span!("directory", path = %dir.display());
    let _guard = span.enter();

    let files = match list_candidate_files(dir) {
        Ok(files) => files,
        Err(err) => {
            error!(error = %err, "cannot scan directory");
            return DirectoryReport::failed(dir, err);
        }
    };
    debug!(files = files.len(), "scanning");

    let mut report = DirectoryReport::new(dir);
    let mut claimed = HashSet::new();

    for path in files {
        let outcome = match process_file(&path, options, extractor, &mut claimed) {
            Ok(outcome) => outcome,
            Err(err) => {
                match &err {
                    RenameError::Name(_) => warn!(error = %err, "skipping file"),
                    _ => error!(error = %err, "file failed"),
                }
                FileOutcome::Failed {
                    name: path
                        .file_name()
                        .map(|name| name.to_string_lossy().into_owned())
                        .unwrap_or_default(),
                    error: err.to_string(),
                }
            }
        };
        report.push(outcome);
    }

    report
}

/// Processes every directory in order and totals the results.
pub fn run(dirs: &[PathBuf], options: &RunOptions, extractor: &Extractor) -> RunReport {
    let mut report = RunReport::new(!options.execute);
    for dir in dirs {
        report.push(process_directory(dir, options, extractor));
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn extractor() -> Extractor {
        Extractor::new(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap())
    }

    fn create_test_dir(names: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for name in names {
            fs::write(dir.path().join(name), "content").unwrap();
        }
        dir
    }

    fn names_in(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_plan_name_outcomes() {
        let extractor = extractor();
        assert_eq!(
            plan_name("2023-07-10 Protokoll.docx", &extractor).unwrap(),
            Plan::Keep(SkipReason::AlreadyCanonical)
        );
        assert_eq!(
            plan_name("2025-03-15.docx", &extractor).unwrap(),
            Plan::Keep(SkipReason::Unchanged)
        );
        match plan_name("Protokoll - 15.03.2025.docx", &extractor).unwrap() {
            Plan::Rename { to, pattern, .. } => {
                assert_eq!(to, "2025-03-15 Protokoll.docx");
                assert_eq!(pattern, "dd-mm-yyyy");
            }
            plan => panic!("unexpected plan {plan:?}"),
        }
        assert!(matches!(
            plan_name("Notes Sep.txt", &extractor),
            Err(NameError::Unrecognized { .. })
        ));
        assert!(matches!(
            plan_name("Notiz 31.04.2024.txt", &extractor),
            Err(NameError::InvalidDate { ref date, .. }) if date == "2024-04-31"
        ));
    }

    #[test]
    fn test_list_skips_hidden_scripts_and_directories() {
        let dir = create_test_dir(&[
            "b 2023-07-10.txt",
            "a 2023-07-10.txt",
            ".hidden 2023-07-10.txt",
            "tool 2023-07-10.py",
            "RUN 2023-07-10.SH",
        ]);
        fs::create_dir(dir.path().join("sub 2023-07-10")).unwrap();

        let files = list_candidate_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|path| path.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, ["a 2023-07-10.txt", "b 2023-07-10.txt"]);
    }

    #[test]
    fn test_list_not_a_directory() {
        let dir = create_test_dir(&["file.txt"]);
        let result = list_candidate_files(&dir.path().join("file.txt"));
        assert!(matches!(result, Err(RenameError::DirectoryNotFound { .. })));
    }

    #[test]
    fn test_dry_run_leaves_files_alone() {
        let dir = create_test_dir(&["Protokoll_2023-07-10.docx", "Notes Sep.txt"]);
        let report = process_directory(dir.path(), &RunOptions::default(), &extractor());

        assert_eq!(report.counts.renamed, 1);
        assert_eq!(report.counts.errors, 1);
        assert!(matches!(
            &report.outcomes[1],
            FileOutcome::WouldRename { to, .. } if to == "2023-07-10 Protokoll.docx"
        ));
        assert_eq!(
            names_in(dir.path()),
            ["Notes Sep.txt", "Protokoll_2023-07-10.docx"]
        );
    }

    #[test]
    fn test_execute_renames_and_is_idempotent() {
        let dir = create_test_dir(&[
            "Protokoll - 15.03.2025.docx",
            "Notizen 10. September 2023.docx",
            "April 2021 Bericht.docx",
        ]);
        let options = RunOptions { execute: true };

        let first = process_directory(dir.path(), &options, &extractor());
        assert_eq!(first.counts.renamed, 3);
        assert_eq!(first.counts.errors, 0);
        assert_eq!(
            names_in(dir.path()),
            [
                "2021-04-01 Bericht.docx",
                "2023-09-10 Notizen.docx",
                "2025-03-15 Protokoll.docx",
            ]
        );

        let second = process_directory(dir.path(), &options, &extractor());
        assert_eq!(second.counts.renamed, 0);
        assert_eq!(second.counts.skipped, 3);
    }

    #[test]
    fn test_execute_keeps_extension_and_dots_clean() {
        let dir = create_test_dir(&["Weihnachtsfeier 24.12.docx", "Scan.2019.11.05.pdf"]);
        let report = process_directory(dir.path(), &RunOptions { execute: true }, &extractor());

        assert_eq!(report.counts.renamed, 2);
        assert_eq!(
            names_in(dir.path()),
            ["2019-11-05 Scan.pdf", "2025-12-24 Weihnachtsfeier.docx"]
        );
    }

    #[test]
    fn test_existing_target_is_not_overwritten() {
        let dir = create_test_dir(&["2023-07-10 Protokoll.docx", "Protokoll_2023-07-10.docx"]);
        fs::write(dir.path().join("2023-07-10 Protokoll.docx"), "keep me").unwrap();

        let report = process_directory(dir.path(), &RunOptions { execute: true }, &extractor());
        assert_eq!(report.counts.skipped, 1);
        assert_eq!(report.counts.errors, 1);
        assert_eq!(
            fs::read_to_string(dir.path().join("2023-07-10 Protokoll.docx")).unwrap(),
            "keep me"
        );
    }

    #[test]
    fn test_same_target_claimed_twice_in_dry_run() {
        let dir = create_test_dir(&["Protokoll 10.07.2023.docx", "Protokoll_2023-07-10.docx"]);
        let report = process_directory(dir.path(), &RunOptions::default(), &extractor());
        assert_eq!(report.counts.renamed, 1);
        assert_eq!(report.counts.errors, 1);
        assert!(matches!(
            &report.outcomes[1],
            FileOutcome::Failed { error, .. } if error.starts_with("target already exists")
        ));
    }

    #[test]
    fn test_run_counts_missing_directory() {
        let dir = create_test_dir(&["a 2023-07-10.txt"]);
        let missing = dir.path().join("missing");
        let report = run(
            &[dir.path().to_path_buf(), missing],
            &RunOptions::default(),
            &extractor(),
        );

        assert!(report.dry_run);
        assert_eq!(report.directories.len(), 2);
        assert_eq!(report.totals.renamed, 1);
        assert_eq!(report.totals.errors, 1);
        assert!(report.directories[1].error.is_some());
    }
}
