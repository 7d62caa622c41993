// ABOUTME: Test support utilities.
// ABOUTME: Builds a fake `gcloud` shell script that logs its arguments and replays canned answers.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A scripted stand-in for gcloud, written into its own temp directory.
///
/// Every invocation appends its arguments as one line to a log file.
pub struct FakeGcloud {
    account: Option<String>,
    project: Option<String>,
    deploy_output: Vec<String>,
    deploy_exit: i32,
    describe_url: Option<String>,
    revisions: Vec<String>,
    traffic_exit: i32,
}

impl Default for FakeGcloud {
    fn default() -> Self {
        Self {
            account: Some("dev@example.com".to_string()),
            project: Some("jcps-prod".to_string()),
            deploy_output: vec!["Service URL: https://example.run.app".to_string()],
            deploy_exit: 0,
            describe_url: Some("https://example.run.app".to_string()),
            revisions: vec![
                "jcps-gis-api-00003-ccc".to_string(),
                "jcps-gis-api-00002-bbb".to_string(),
                "jcps-gis-api-00001-aaa".to_string(),
            ],
            traffic_exit: 0,
        }
    }
}

#[allow(dead_code)]
impl FakeGcloud {
    pub fn account(mut self, account: Option<&str>) -> Self {
        self.account = account.map(str::to_string);
        self
    }

    pub fn project(mut self, project: Option<&str>) -> Self {
        self.project = project.map(str::to_string);
        self
    }

    pub fn deploy_output(mut self, lines: &[&str]) -> Self {
        self.deploy_output = lines.iter().map(|l| l.to_string()).collect();
        self
    }

    pub fn deploy_exit(mut self, code: i32) -> Self {
        self.deploy_exit = code;
        self
    }

    pub fn describe_url(mut self, url: Option<&str>) -> Self {
        self.describe_url = url.map(str::to_string);
        self
    }

    pub fn revisions(mut self, revisions: &[&str]) -> Self {
        self.revisions = revisions.iter().map(|r| r.to_string()).collect();
        self
    }

    pub fn traffic_exit(mut self, code: i32) -> Self {
        self.traffic_exit = code;
        self
    }

    /// Write the script as `<dir>/gcloud`.
    pub fn install(self) -> InstalledGcloud {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("calls.log");
        let script = dir.path().join("gcloud");

        fs::write(&script, self.script(&log)).unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        InstalledGcloud { dir, script, log }
    }

    fn script(&self, log: &Path) -> String {
        let deploy: String = self
            .deploy_output
            .iter()
            .map(|l| format!("printf '%s\\n' '{l}' >&2; "))
            .collect();

        format!(
            r#"#!/bin/sh
printf '%s\n' "$*" >> '{log}'
case "$1 $2 $3" in
  "auth list "*) {account} ;;
  "config get-value project") {project} ;;
  "run deploy "*) {deploy}exit {deploy_exit} ;;
  "run services describe") {describe} ;;
  "run services update-traffic") exit {traffic_exit} ;;
  "run revisions list") {revisions} ;;
  *) printf 'unexpected: %s\n' "$*" >&2; exit 2 ;;
esac
exit 0
"#,
            log = log.display(),
            account = print_value(self.account.as_deref()),
            project = match &self.project {
                Some(p) => print_value(Some(p)),
                None => "printf '(unset)\\n' >&2".to_string(),
            },
            deploy_exit = self.deploy_exit,
            describe = print_value(self.describe_url.as_deref()),
            traffic_exit = self.traffic_exit,
            revisions = if self.revisions.is_empty() {
                "true".to_string()
            } else {
                let quoted: Vec<String> = self.revisions.iter().map(|r| format!("'{r}'")).collect();
                format!("printf '%s\\n' {}", quoted.join(" "))
            },
        )
    }
}

fn print_value(value: Option<&str>) -> String {
    match value {
        Some(v) => format!("printf '%s\\n' '{v}'"),
        None => "true".to_string(),
    }
}

/// A fake gcloud on disk. The directory is removed on drop.
pub struct InstalledGcloud {
    dir: TempDir,
    pub script: PathBuf,
    log: PathBuf,
}

#[allow(dead_code)]
impl InstalledGcloud {
    /// Directory to put on PATH.
    pub fn bin_dir(&self) -> &Path {
        self.dir.path()
    }

    /// Argument lines of every invocation so far.
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(&self.log)
            .map(|s| s.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Invocations whose arguments start with `prefix`.
    pub fn calls_starting_with(&self, prefix: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with(prefix))
            .collect()
    }
}
