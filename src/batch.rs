//! Running the rewriter over a list of files.
//!
//! Sequential by default, in listing order. With `--jobs N > 1` files are
//! spread over a rayon pool; each path appears once, so no two workers
//! touch the same file. Records always come back in listing order.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use rayon::prelude::*;

use crate::config::{ErrorPolicy, RunConfig};
use crate::logger::ProgressLine;
use crate::report::BatchReport;
use crate::rewrite::{self, Outcome, RewriteError, RewriteOptions};
use crate::{debug, shutdown};

/// Rewrite `files`, stopping early on Ctrl+C.
pub fn run_batch(files: &[PathBuf], config: &RunConfig) -> Result<BatchReport> {
    run_batch_with(files, config, shutdown::is_shutdown)
}

/// Rewrite `files`, polling `should_stop` before each file.
///
/// Under [`ErrorPolicy::FailFast`] the first failure (in listing order) is
/// returned as the error. Under [`ErrorPolicy::KeepGoing`] failures are
/// recorded and the remaining files still run.
pub fn run_batch_with<F>(
    files: &[PathBuf],
    config: &RunConfig,
    should_stop: F,
) -> Result<BatchReport>
where
    F: Fn() -> bool + Sync,
{
    let parallel = runs_parallel(files, config);
    let options = batch_options(parallel, config);

    if parallel {
        debug!("batch"; "{} files on {} threads", files.len(), config.jobs);
        run_parallel(files, config, &options, &should_stop)
    } else {
        run_sequential(files, config, &options, &should_stop)
    }
}

/// A single file never goes to the pool, whatever `--jobs` says.
fn runs_parallel(files: &[PathBuf], config: &RunConfig) -> bool {
    config.is_parallel() && files.len() > 1
}

/// Per-file lines are replaced by the progress line on the parallel path.
fn batch_options(parallel: bool, config: &RunConfig) -> RewriteOptions {
    let mut options = config.rewrite_options();
    if parallel {
        options.log_files = false;
    }
    options
}

fn run_sequential<F>(
    files: &[PathBuf],
    config: &RunConfig,
    options: &RewriteOptions,
    should_stop: &F,
) -> Result<BatchReport>
where
    F: Fn() -> bool,
{
    let mut report = BatchReport::default();

    for path in files {
        if should_stop() {
            report.interrupted = true;
            break;
        }
        match rewrite::process(path, options) {
            Ok(outcome) => report.push_outcome(path, outcome),
            Err(err) => record_failure(&mut report, err, config.error_policy)?,
        }
    }

    Ok(report)
}

fn run_parallel<F>(
    files: &[PathBuf],
    config: &RunConfig,
    options: &RewriteOptions,
    should_stop: &F,
) -> Result<BatchReport>
where
    F: Fn() -> bool + Sync,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.jobs)
        .build()?;

    let fail_fast = config.error_policy == ErrorPolicy::FailFast;
    let failed = AtomicBool::new(false);
    let progress = ProgressLine::new("svg", files.len());

    // None: never started (interrupted, or a fail-fast failure elsewhere)
    let results: Vec<Option<Result<Outcome, RewriteError>>> = pool.install(|| {
        files
            .par_iter()
            .map(|path| {
                if should_stop() || (fail_fast && failed.load(Ordering::Relaxed)) {
                    return None;
                }
                let result = rewrite::process(path, options);
                if result.is_err() {
                    failed.store(true, Ordering::Relaxed);
                }
                progress.inc();
                Some(result)
            })
            .collect()
    });
    progress.finish();

    let mut report = BatchReport::default();
    let mut skipped_any = false;
    for (path, result) in files.iter().zip(results) {
        match result {
            Some(Ok(outcome)) => report.push_outcome(path, outcome),
            Some(Err(err)) => record_failure(&mut report, err, config.error_policy)?,
            None => skipped_any = true,
        }
    }
    report.interrupted = skipped_any;

    Ok(report)
}

fn record_failure(report: &mut BatchReport, err: RewriteError, policy: ErrorPolicy) -> Result<()> {
    if err.is_not_found() {
        debug!("batch"; "{} disappeared after the directory was listed", err.path().display());
    }
    match policy {
        ErrorPolicy::FailFast => Err(err.into()),
        // Printed once, with the report
        ErrorPolicy::KeepGoing => {
            report.push_failure(&err);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WriteMode;
    use std::fs;
    use std::sync::atomic::AtomicUsize;
    use tempfile::TempDir;

    fn config(policy: ErrorPolicy, jobs: usize) -> RunConfig {
        RunConfig {
            error_policy: policy,
            jobs,
            ..RunConfig::default()
        }
    }

    fn never() -> bool {
        false
    }

    /// Three files; the middle one is not UTF-8.
    fn fixture(dir: &TempDir) -> Vec<PathBuf> {
        let a = dir.path().join("a.svg");
        let b = dir.path().join("b.svg");
        let c = dir.path().join("c.svg");
        fs::write(&a, ".cls-1").unwrap();
        fs::write(&b, b"\xff cls").unwrap();
        fs::write(&c, ".cls-1").unwrap();
        vec![a, b, c]
    }

    #[test]
    fn test_sequential_updates_all() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("one.svg");
        let b = dir.path().join("two.svg");
        fs::write(&a, ".cls-1").unwrap();
        fs::write(&b, ".cls-2").unwrap();

        let report =
            run_batch_with(&[a.clone(), b.clone()], &config(ErrorPolicy::FailFast, 1), never)
                .unwrap();

        assert_eq!(report.totals().updated, 2);
        assert!(!report.interrupted);
        assert_eq!(fs::read_to_string(&a).unwrap(), ".one-cls-1");
        assert_eq!(fs::read_to_string(&b).unwrap(), ".two-cls-2");
    }

    #[test]
    fn test_fail_fast_stops_at_first_error() {
        let dir = TempDir::new().unwrap();
        let files = fixture(&dir);

        let err = run_batch_with(&files, &config(ErrorPolicy::FailFast, 1), never).unwrap_err();
        let err = err.downcast::<RewriteError>().unwrap();
        assert_eq!(err.path(), files[1]);

        // First file done, third never reached
        assert_eq!(fs::read_to_string(&files[0]).unwrap(), ".a-cls-1");
        assert_eq!(fs::read_to_string(&files[2]).unwrap(), ".cls-1");
    }

    #[test]
    fn test_keep_going_records_and_continues() {
        let dir = TempDir::new().unwrap();
        let files = fixture(&dir);

        let report = run_batch_with(&files, &config(ErrorPolicy::KeepGoing, 1), never).unwrap();

        assert!(report.has_failures());
        assert_eq!(report.totals().updated, 2);
        assert_eq!(report.totals().failed, 1);
        assert_eq!(report.files[1].path, files[1]);
        assert_eq!(fs::read_to_string(&files[2]).unwrap(), ".c-cls-1");
    }

    #[test]
    fn test_stop_before_next_file() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.svg");
        let b = dir.path().join("b.svg");
        fs::write(&a, ".cls-1").unwrap();
        fs::write(&b, ".cls-1").unwrap();

        // Allow one file, then request a stop
        let polls = AtomicUsize::new(0);
        let stop_after_first = || polls.fetch_add(1, Ordering::SeqCst) >= 1;

        let report = run_batch_with(
            &[a.clone(), b.clone()],
            &config(ErrorPolicy::FailFast, 1),
            stop_after_first,
        )
        .unwrap();

        assert!(report.interrupted);
        assert_eq!(report.files.len(), 1);
        assert_eq!(fs::read_to_string(&b).unwrap(), ".cls-1");
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let seq_dir = TempDir::new().unwrap();
        let par_dir = TempDir::new().unwrap();

        let mut seq_files = Vec::new();
        let mut par_files = Vec::new();
        for i in 0..16 {
            let name = format!("icon-{i}.svg");
            let body = format!(".cls-{i}{{}} <g class=\"cls-{i}\"/>");
            fs::write(seq_dir.path().join(&name), &body).unwrap();
            fs::write(par_dir.path().join(&name), &body).unwrap();
            seq_files.push(seq_dir.path().join(&name));
            par_files.push(par_dir.path().join(&name));
        }

        let seq = run_batch_with(&seq_files, &config(ErrorPolicy::FailFast, 1), never).unwrap();
        let par = run_batch_with(&par_files, &config(ErrorPolicy::FailFast, 4), never).unwrap();

        assert_eq!(seq.totals(), par.totals());
        for (s, p) in seq_files.iter().zip(&par_files) {
            assert_eq!(fs::read_to_string(s).unwrap(), fs::read_to_string(p).unwrap());
        }
        // Listing order is kept
        for (record, path) in par.files.iter().zip(&par_files) {
            assert_eq!(&record.path, path);
        }
    }

    #[test]
    fn test_parallel_keep_going() {
        let dir = TempDir::new().unwrap();
        let files = fixture(&dir);

        let report = run_batch_with(&files, &config(ErrorPolicy::KeepGoing, 3), never).unwrap();
        assert_eq!(report.totals().failed, 1);
        assert_eq!(report.totals().updated, 2);
        assert!(!report.interrupted);
    }

    #[test]
    fn test_parallel_fail_fast_returns_error() {
        let dir = TempDir::new().unwrap();
        let files = fixture(&dir);

        let err = run_batch_with(&files, &config(ErrorPolicy::FailFast, 3), never).unwrap_err();
        assert!(err.downcast_ref::<RewriteError>().is_some());
    }

    #[test]
    fn test_dry_run_batch_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.svg");
        fs::write(&a, ".cls-1").unwrap();

        let config = RunConfig {
            dry_run: true,
            write_mode: WriteMode::Atomic,
            ..RunConfig::default()
        };
        let report = run_batch_with(&[a.clone()], &config, never).unwrap();

        assert_eq!(report.totals().planned, 1);
        assert_eq!(fs::read_to_string(&a).unwrap(), ".cls-1");
    }

    #[test]
    fn test_single_file_with_jobs_logs_per_file() {
        let dir = TempDir::new().unwrap();
        let one = vec![dir.path().join("a.svg")];
        let two = vec![dir.path().join("a.svg"), dir.path().join("b.svg")];
        let config = config(ErrorPolicy::FailFast, 4);

        assert!(!runs_parallel(&one, &config));
        assert!(batch_options(runs_parallel(&one, &config), &config).log_files);

        assert!(runs_parallel(&two, &config));
        assert!(!batch_options(runs_parallel(&two, &config), &config).log_files);
    }

    #[test]
    fn test_empty_batch() {
        let report = run_batch_with(&[], &RunConfig::default(), never).unwrap();
        assert!(report.files.is_empty());
        assert!(!report.interrupted);
    }
}
