//! The rewrite command: resolve the path, run the batch, report.

use anyhow::{Result, bail};

use crate::batch::run_batch;
use crate::config::RunConfig;
use crate::log;
use crate::report::{BatchReport, plural_s};
use crate::target::{Target, resolve};

/// Run one invocation.
///
/// Invalid paths and non-SVG files are reported and return `Ok`. Any failed
/// file makes the run return an error once the report has been printed.
pub fn run(config: &RunConfig) -> Result<()> {
    let Some(report) = rewrite_target(config)? else {
        return Ok(());
    };

    report.print(config)?;

    if report.has_failures() {
        let failed = report.totals().failed;
        bail!("{} file{} could not be rewritten", failed, plural_s(failed));
    }
    Ok(())
}

/// Resolve the target and rewrite its files.
///
/// Returns `None` when there was nothing to process at all.
pub fn rewrite_target(config: &RunConfig) -> Result<Option<BatchReport>> {
    let target = resolve(&config.target)?;

    match &target {
        Target::Directory { dir, files } => {
            let count = files.len();
            log!("scan"; "{}: {} svg file{}", dir.display(), count, plural_s(count));
        }
        Target::File(_) => {}
        Target::NotSvg(path) => {
            log!("skip"; "not an .svg file: {}", path.display());
            return Ok(None);
        }
        Target::Missing(path) => {
            log!("error"; "not a file or directory: {}", path.display());
            return Ok(None);
        }
    }

    run_batch(target.files(), config).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ErrorPolicy;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn config_for(path: &Path) -> RunConfig {
        RunConfig {
            target: path.to_path_buf(),
            ..RunConfig::default()
        }
    }

    #[test]
    fn test_run_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.svg"), ".cls-1").unwrap();
        fs::write(dir.path().join("b.SVG"), ".cls-1").unwrap();
        fs::write(dir.path().join("c.txt"), ".cls-1").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/d.svg"), ".cls-1").unwrap();

        run(&config_for(dir.path())).unwrap();

        assert_eq!(fs::read_to_string(dir.path().join("a.svg")).unwrap(), ".a-cls-1");
        assert_eq!(fs::read_to_string(dir.path().join("b.SVG")).unwrap(), ".b-cls-1");
        assert_eq!(fs::read_to_string(dir.path().join("c.txt")).unwrap(), ".cls-1");
        assert_eq!(fs::read_to_string(dir.path().join("sub/d.svg")).unwrap(), ".cls-1");
    }

    #[test]
    fn test_run_single_file() {
        let dir = TempDir::new().unwrap();
        let svg = dir.path().join("logo.svg");
        fs::write(&svg, "<style>.cls1{}</style>").unwrap();

        let report = rewrite_target(&config_for(&svg)).unwrap().unwrap();
        assert_eq!(report.totals().updated, 1);
        assert_eq!(fs::read_to_string(&svg).unwrap(), "<style>.logo-cls1{}</style>");
    }

    #[test]
    fn test_run_non_svg_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let txt = dir.path().join("notes.txt");
        fs::write(&txt, ".cls-1").unwrap();

        assert!(rewrite_target(&config_for(&txt)).unwrap().is_none());
        run(&config_for(&txt)).unwrap();
        assert_eq!(fs::read_to_string(&txt).unwrap(), ".cls-1");
    }

    #[test]
    fn test_run_missing_path_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        run(&config_for(&dir.path().join("missing"))).unwrap();
    }

    #[test]
    fn test_run_keep_going_reports_failure() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bad.svg"), b"\xff").unwrap();
        fs::write(dir.path().join("good.svg"), ".cls-1").unwrap();

        let config = RunConfig {
            error_policy: ErrorPolicy::KeepGoing,
            ..config_for(dir.path())
        };
        let err = run(&config).unwrap_err();
        assert!(err.to_string().contains("1 file could not"));
        assert_eq!(
            fs::read_to_string(dir.path().join("good.svg")).unwrap(),
            ".good-cls-1"
        );
    }
}
