use std::fs::{File, OpenOptions, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{DateTime, Utc};
use serde::Serialize;

use schemashift_core::ConversionSettings;

use super::{RegistryError, RegistryResult};

/// Metadata captured at run start.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub snapshot_version: String,
    pub input: PathBuf,
    pub database: String,
    pub pg_dialect: bool,
    pub strict: bool,
    pub run_dir: PathBuf,
    pub settings: ConversionSettings,
}

/// JSON config written to each run directory.
#[derive(Debug, Serialize)]
pub struct RunConfig {
    pub run_id: String,
    pub started_at: String,
    pub snapshot_version: String,
    pub input: String,
    pub database: String,
    pub pg_dialect: bool,
    pub strict: bool,
    pub settings: ConversionSettings,
    pub git: GitInfo,
}

/// Git metadata for reproducibility.
#[derive(Debug, Serialize)]
pub struct GitInfo {
    pub commit: Option<String>,
    pub dirty: Option<bool>,
}

/// Paths for run artifacts.
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub root: PathBuf,
    pub conv_path: PathBuf,
    pub issues_path: PathBuf,
    pub assessment_path: PathBuf,
    pub logs_path: PathBuf,
}

pub fn start_run(ctx: &RunContext) -> RegistryResult<RunPaths> {
    let timestamp = ctx.started_at.format("%Y-%m-%dT%H-%M-%SZ").to_string();
    let root = ctx.run_dir.join(format!("{timestamp}__run_{}", ctx.run_id));

    create_dir_all(&root)?;

    let config = RunConfig {
        run_id: ctx.run_id.clone(),
        started_at: ctx.started_at.to_rfc3339(),
        snapshot_version: ctx.snapshot_version.clone(),
        input: ctx.input.display().to_string(),
        database: ctx.database.clone(),
        pg_dialect: ctx.pg_dialect,
        strict: ctx.strict,
        settings: ctx.settings.clone(),
        git: collect_git_info(),
    };
    write_artifact(&root.join("config.json"), &config)?;

    let logs_path = root.join("logs.ndjson");
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&logs_path)?;

    Ok(RunPaths {
        conv_path: root.join("conv.json"),
        issues_path: root.join("issues.json"),
        assessment_path: root.join("assessment.json"),
        logs_path,
        root,
    })
}

/// Write `value` as pretty JSON into the run directory.
pub fn write_artifact<T: Serialize>(path: &Path, value: &T) -> RegistryResult<()> {
    let data = serde_json::to_vec_pretty(value)?;
    write_artifact_bytes(path, &data)
}

/// Write an already rendered artifact into the run directory.
///
/// The bytes land in a sibling `.partial` file first and are renamed over
/// `path` once synced, so readers never see a truncated artifact.
pub fn write_artifact_bytes(path: &Path, data: &[u8]) -> RegistryResult<()> {
    let (Some(dir), Some(file_name)) = (path.parent(), path.file_name()) else {
        return Err(RegistryError::InvalidPath(path.display().to_string()));
    };
    let partial = dir.join(format!("{}.partial", file_name.to_string_lossy()));

    let mut file = File::create(&partial)?;
    file.write_all(data)?;
    file.sync_all()?;
    std::fs::rename(&partial, path)?;
    if !dir.as_os_str().is_empty() {
        File::open(dir)?.sync_all()?;
    }

    tracing::info!(event = "artifact_written", path = %path.display(), bytes = data.len());
    Ok(())
}

pub fn collect_git_info() -> GitInfo {
    let commit = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .filter(|value| !value.is_empty());

    let dirty = Command::new("git")
        .args(["status", "--porcelain"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| !output.stdout.is_empty());

    GitInfo { commit, dirty }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_bytes_replace_previous_content() {
        let dir = std::env::temp_dir()
            .join(format!("schemashift_registry_{}", uuid::Uuid::new_v4()));
        create_dir_all(&dir).expect("create temp dir");
        let path = dir.join("shop_schema.txt");

        write_artifact_bytes(&path, b"first run with a longer body").expect("first write");
        write_artifact_bytes(&path, b"second").expect("second write");

        assert_eq!(std::fs::read(&path).expect("read artifact"), b"second");
        assert!(!dir.join("shop_schema.txt.partial").exists());
    }

    #[test]
    fn artifact_path_needs_a_file_name() {
        let err = write_artifact_bytes(Path::new("/"), b"x").expect_err("no file name");
        assert!(matches!(err, RegistryError::InvalidPath(_)));
    }
}
