#![allow(dead_code)]

pub mod fixtures;

use fonthunter::{
    FontHunterBuilder, FontHunterConfig, FontHunterPipeline, InMemoryFetcher, PipelineError,
};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use zip::ZipArchive;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// A throwaway storage root plus an offline fetcher.
pub struct Harness {
    pub dir: TempDir,
    pub fetcher: Arc<InMemoryFetcher>,
}

impl Harness {
    pub fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        Self {
            dir: tempfile::tempdir().expect("create temp storage root"),
            fetcher: Arc::new(InMemoryFetcher::new()),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Serve `body` for `url`.
    pub fn serve(&self, url: &str, body: impl Into<Vec<u8>>) {
        self.fetcher.add(url, body).expect("register response");
    }

    /// Make `url` fail like a dropped connection.
    pub fn break_url(&self, url: &str) {
        self.fetcher.fail(url, "connection reset by peer").expect("register failure");
    }

    pub fn pipeline(&self, session: &str) -> Result<FontHunterPipeline, PipelineError> {
        FontHunterBuilder::new()
            .with_storage_root(self.root())
            .with_session(session)
            .with_fetcher(self.fetcher.clone())
            .build()
    }

    /// Like [`Harness::pipeline`], with `config` rooted in the temp dir.
    pub fn pipeline_with_config(
        &self,
        session: &str,
        config: FontHunterConfig,
    ) -> Result<FontHunterPipeline, PipelineError> {
        FontHunterBuilder::new()
            .with_config(config)
            .with_storage_root(self.root())
            .with_session(session)
            .with_fetcher(self.fetcher.clone())
            .build()
    }

    pub fn archive_path(&self, session: &str) -> PathBuf {
        self.root().join(format!("{}.zip", session))
    }

    /// Every file left under the storage root, relative and `/`-separated.
    pub fn residual_files(&self) -> Vec<String> {
        walkdir::WalkDir::new(self.root())
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| {
                e.path()
                    .strip_prefix(self.root())
                    .ok()
                    .map(|p| p.to_string_lossy().replace('\\', "/"))
            })
            .collect()
    }
}

/// Reads every entry of a zip archive into memory, keyed by entry name.
pub fn read_archive(path: &Path) -> Result<BTreeMap<String, Vec<u8>>, Box<dyn std::error::Error>> {
    let mut archive = ZipArchive::new(File::open(path)?)?;
    let mut entries = BTreeMap::new();
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let mut data = Vec::new();
        entry.read_to_end(&mut data)?;
        entries.insert(entry.name().to_string(), data);
    }
    Ok(entries)
}
