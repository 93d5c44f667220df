//! Per-file pipeline: read, parse, merge, write.

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::ClashConfig;
use crate::fetcher::Fetch;
use crate::merger::{MergeOutput, MergeStats, RuleMerger};
use crate::output::{output_path, preserved_header, render};
use crate::report::{FileReport, RunReport};
use crate::{Error, Result};

/// A merged document ready to be written.
#[derive(Debug, Clone)]
pub struct MergedDocument {
    /// Full output text (preserved header + generated rules)
    pub content: String,
    /// Merged rules and counters
    pub output: MergeOutput,
}

/// What happened to one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Output written
    Written {
        output: PathBuf,
        rules: usize,
        stats: MergeStats,
    },
    /// Nothing to merge
    Skipped { reason: String },
}

/// Merge the text of a Clash config.
///
/// Returns `Ok(None)` when the document lacks `rule-providers` or `rules`.
pub fn merge_document<F: Fetch>(merger: &RuleMerger<F>, text: &str) -> Result<Option<MergedDocument>> {
    let config = ClashConfig::from_yaml(text)?;
    if !config.is_mergeable() {
        return Ok(None);
    }

    let output = merger.merge(&config);
    let content = render(preserved_header(text), &output.rules);
    Ok(Some(MergedDocument { content, output }))
}

/// Process one config file, writing `<name>_merge.yaml` next to it.
pub fn process_file<F: Fetch>(merger: &RuleMerger<F>, input: &Path) -> Result<FileOutcome> {
    if !input.is_file() {
        return Err(Error::MissingFile(input.to_path_buf()));
    }

    log::info!("Processing {:?}", input);
    let text = fs::read_to_string(input)?;

    let Some(document) = merge_document(merger, &text)? else {
        let reason = "no rule-providers or rules found".to_string();
        log::warn!("Skipping {:?}: {}", input, reason);
        return Ok(FileOutcome::Skipped { reason });
    };

    let output = output_path(input);
    write_atomic(&output, document.content.as_bytes())?;

    let rules = document.output.rules.len();
    log::info!("Generated {:?} ({} rules)", output, rules);
    Ok(FileOutcome::Written {
        output,
        rules,
        stats: document.output.stats,
    })
}

/// Process every file in order. Failures are logged and recorded; the run
/// always continues with the next file.
pub fn process_files<F: Fetch>(merger: &RuleMerger<F>, files: &[PathBuf]) -> RunReport {
    let mut report = RunReport::default();

    for input in files {
        let entry = match process_file(merger, input) {
            Ok(FileOutcome::Written {
                output,
                rules,
                stats,
            }) => FileReport::written(input, output, rules, stats),
            Ok(FileOutcome::Skipped { reason }) => FileReport::skipped(input, reason),
            Err(e) => {
                log::error!("Failed to process {:?}: {}", input, e);
                FileReport::failed(input, e.to_string())
            }
        };
        report.push(entry);
    }

    report
}

/// Write to a temp file next to `path`, then rename into place.
fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let mut temp = OsString::from(path.as_os_str());
    temp.push(".tmp");
    let temp_path = PathBuf::from(temp);

    let result = write_then_rename(&temp_path, path, data);
    if result.is_err() {
        // Best effort; the original error is what gets reported.
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_then_rename(temp_path: &Path, path: &Path, data: &[u8]) -> Result<()> {
    let mut file = fs::File::create(temp_path)?;
    file.write_all(data)?;
    file.sync_all()?;
    drop(file);

    fs::rename(temp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::FileStatus;

    struct Static(&'static str);

    impl Fetch for Static {
        fn fetch(&self, _url: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    const CONFIG: &str = "port: 7890\n# keep me\nrule-providers:\n  p:\n    url: https://example.com/p.list\nrules:\n  - RULE-SET,p,Proxy\n  - MATCH,DIRECT\n";

    #[test]
    fn test_merge_document() {
        let merger = RuleMerger::new(Static("DOMAIN,a.com\nIP-CIDR,10.0.0.0/8,no-resolve\n"));
        let document = merge_document(&merger, CONFIG).unwrap().unwrap();
        assert_eq!(
            document.content,
            "port: 7890\n# keep me\n\nrules:\n  - DOMAIN,a.com,Proxy\n  - IP-CIDR,10.0.0.0/8,Proxy,no-resolve\n  - MATCH,DIRECT\n"
        );
    }

    #[test]
    fn test_merge_document_quoted_interval() {
        let text = "rule-providers:\n  p:\n    type: http\n    behavior: classical\n    interval: \"86400\"\n    url: https://example.com/p.list\nrules:\n  - RULE-SET,p,Proxy\n";
        let merger = RuleMerger::new(Static("DOMAIN,a.com\n"));
        let document = merge_document(&merger, text).unwrap().unwrap();
        assert_eq!(document.output.rules, ["DOMAIN,a.com,Proxy"]);
    }

    #[test]
    fn test_merge_document_without_sections() {
        let merger = RuleMerger::new(Static(""));
        assert!(merge_document(&merger, "port: 7890\n").unwrap().is_none());
        assert!(merge_document(&merger, "rules:\n  - MATCH,DIRECT\n").unwrap().is_none());
        assert!(merge_document(&merger, "rules: [").is_err());
    }

    #[test]
    fn test_process_file_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("clash.yaml");
        fs::write(&input, CONFIG).unwrap();

        let merger = RuleMerger::new(Static("DOMAIN,a.com\n"));
        let outcome = process_file(&merger, &input).unwrap();

        let expected = dir.path().join("clash_merge.yaml");
        assert_eq!(
            outcome,
            FileOutcome::Written {
                output: expected.clone(),
                rules: 2,
                stats: MergeStats {
                    passed_through: 1,
                    expanded: 1,
                    fetches: 1,
                    ..Default::default()
                },
            }
        );
        let written = fs::read_to_string(&expected).unwrap();
        assert!(written.starts_with("port: 7890\n# keep me\n\nrules:\n"));
        assert_eq!(fs::read_to_string(&input).unwrap(), CONFIG);
        assert!(!dir.path().join("clash_merge.yaml.tmp").exists());
    }

    #[test]
    fn test_process_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let merger = RuleMerger::new(Static(""));
        let result = process_file(&merger, &dir.path().join("absent.yaml"));
        assert!(matches!(result, Err(Error::MissingFile(_))));
    }

    #[test]
    fn test_process_files_continues() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.yaml");
        let broken = dir.path().join("broken.yaml");
        let empty = dir.path().join("empty.yaml");
        fs::write(&good, CONFIG).unwrap();
        fs::write(&broken, "rules: [\n").unwrap();
        fs::write(&empty, "port: 1\n").unwrap();

        let files = vec![dir.path().join("absent.yaml"), broken, empty, good];
        let merger = RuleMerger::new(Static("DOMAIN,a.com\n"));
        let report = process_files(&merger, &files);

        let statuses: Vec<_> = report.files.iter().map(|f| f.status).collect();
        assert_eq!(
            statuses,
            vec![
                FileStatus::Failed,
                FileStatus::Failed,
                FileStatus::Skipped,
                FileStatus::Written
            ]
        );
        assert!(dir.path().join("good_merge.yaml").exists());
        assert!(!dir.path().join("empty_merge.yaml").exists());
    }

    #[test]
    fn test_failed_write_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out_merge.yaml");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), "x").unwrap();

        assert!(write_atomic(&target, b"rules:\n").is_err());
        assert!(!dir.path().join("out_merge.yaml.tmp").exists());
        assert!(target.is_dir());
    }

    #[test]
    fn test_write_atomic_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out_merge.yaml");
        fs::write(&target, "old").unwrap();

        write_atomic(&target, b"new").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "new");
        assert!(!dir.path().join("out_merge.yaml.tmp").exists());
    }
}
