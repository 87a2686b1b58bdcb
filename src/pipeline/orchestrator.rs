// src/pipeline/orchestrator.rs
use super::archive::ArchiveAssembler;
use super::bundle::FontBundleBuilder;
use super::notes::RunNotes;
use super::workspace::SessionWorkspace;
use crate::config::FontHunterConfig;
use crate::error::PipelineError;
use crate::parser::{discover_font_assets, extract_font_family_names, parse_family_request};
use fonthunter_resource::FilesystemResourceProvider;
use fonthunter_traits::AssetFetcher;
use fonthunter_types::{DownloadFailure, PipelineResult, SessionId};
use log::{debug, info, warn};
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Progress of one `generate` run. `Errored` is absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Start,
    ParsedRequest,
    FetchedStylesheet,
    BuiltBundle,
    Archived,
    Done,
    Errored,
}

/// Tracks the state and notes of a single run.
struct Run<'a> {
    url: &'a str,
    state: RunState,
    notes: RunNotes,
}

impl<'a> Run<'a> {
    fn new(url: &'a str) -> Self {
        Self {
            url,
            state: RunState::Start,
            notes: RunNotes::new(),
        }
    }

    fn advance(&mut self, next: RunState) {
        if self.state == RunState::Errored {
            return;
        }
        debug!("{}: {:?} -> {:?}", self.url, self.state, next);
        self.state = next;
    }

    /// Records `err` as a note and ends the run without an archive.
    fn fail(mut self, err: &PipelineError) -> PipelineResult {
        self.notes.error(error_note(err));
        self.advance(RunState::Errored);
        self.finish(None)
    }

    fn finish(mut self, download_url: Option<String>) -> PipelineResult {
        self.advance(RunState::Done);
        let (successes, errors) = self.notes.into_parts();
        PipelineResult::new(self.url, successes, errors, download_url)
    }
}

fn error_note(err: &PipelineError) -> String {
    match err {
        PipelineError::Archive(message) => message.clone(),
        other => other.to_string(),
    }
}

/// The font hunter for one caller session.
///
/// Construct it through [`FontHunterBuilder`](super::FontHunterBuilder).
#[derive(Debug, Clone)]
pub struct FontHunterPipeline {
    config: FontHunterConfig,
    session: SessionId,
    fetcher: Arc<dyn AssetFetcher>,
    bundler: FontBundleBuilder,
    archiver: ArchiveAssembler,
}

impl FontHunterPipeline {
    pub(crate) fn new(
        config: FontHunterConfig,
        session: SessionId,
        fetcher: Arc<dyn AssetFetcher>,
        bundler: FontBundleBuilder,
    ) -> Self {
        Self {
            config,
            session,
            fetcher,
            bundler,
            archiver: ArchiveAssembler::new(),
        }
    }

    pub fn session(&self) -> &SessionId {
        &self.session
    }

    pub fn config(&self) -> &FontHunterConfig {
        &self.config
    }

    pub fn workspace(&self) -> SessionWorkspace {
        SessionWorkspace::new(&self.config, self.session.clone())
    }

    /// Fetches the stylesheet at `url`, downloads every font it references
    /// and archives the rewritten bundle for this session.
    ///
    /// Never fails: every problem ends up as an error note on the result.
    /// `url` is expected to be an absolute URL already.
    pub fn generate(&self, url: &str) -> PipelineResult {
        info!("Hunting fonts from {} for session {}", url, self.session);
        let mut run = Run::new(url);

        let request = parse_family_request(url);
        run.advance(RunState::ParsedRequest);

        let css = match self.fetcher.fetch(url) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                run.notes.fetch_failure(&e);
                run.notes
                    .error(format!("Failed to fetch CSS content from {}", url));
                run.advance(RunState::Errored);
                return run.finish(None);
            }
        };
        run.advance(RunState::FetchedStylesheet);

        let face_names = extract_font_family_names(&css);
        let assets = discover_font_assets(&css, url);
        if assets.is_empty() {
            return run.fail(&PipelineError::NoAssetsFound);
        }
        debug!(
            "Found {} font URL(s) and {} @font-face name(s)",
            assets.len(),
            face_names.len()
        );

        let workspace = self.workspace();
        match self
            .bundler
            .build(&workspace, &assets, &request, &face_names, &mut run.notes)
        {
            Ok(outcome) => {
                run.notes
                    .success(format!("{} font(s) downloaded", outcome.downloaded));
                run.advance(RunState::BuiltBundle);
            }
            Err(e) => return run.fail(&e),
        }

        match self.archiver.assemble(&workspace) {
            Ok(_) => {
                run.notes.success("Zip archive created successfully");
                run.advance(RunState::Archived);
                run.finish(Some(self.session.archive_file_name()))
            }
            Err(e) => {
                workspace.cleanup();
                run.fail(&e)
            }
        }
    }

    /// Opens the archive named by `path` for a one-shot download.
    ///
    /// Only the file name of `path` is used and it must be this session's
    /// archive. The archive is deleted when the returned stream is dropped,
    /// so a second download of the same path fails.
    pub fn download(&self, path: &str) -> Result<ArchiveDownload, DownloadFailure> {
        let requested = path.rsplit(['/', '\\']).next().unwrap_or(path);
        let expected = self.session.archive_file_name();
        let zip_path = self.config.storage_root.join(&expected);
        let not_found = || {
            DownloadFailure::new(
                PipelineError::NotFound(requested.to_string()).to_string(),
                path,
                requested,
                zip_path.display().to_string(),
            )
        };

        if requested != expected {
            warn!("Download of {} refused for session {}", path, self.session);
            return Err(not_found());
        }

        let provider = FilesystemResourceProvider::new(&self.config.storage_root);
        let (resolved, file) = provider.open(requested).map_err(|e| {
            warn!("Download of {} failed: {}", path, e);
            not_found()
        })?;
        let len = file.metadata().map(|m| m.len()).map_err(|e| {
            warn!("Download of {} failed: {}", path, e);
            not_found()
        })?;

        info!("Serving archive {} ({} bytes)", resolved.display(), len);
        Ok(ArchiveDownload {
            file: Some(file),
            path: resolved,
            file_name: expected,
            len,
        })
    }
}

/// A readable archive that deletes itself when dropped.
#[derive(Debug)]
pub struct ArchiveDownload {
    file: Option<File>,
    path: PathBuf,
    file_name: String,
    len: u64,
}

impl ArchiveDownload {
    /// Name to offer the archive under, e.g. in a content disposition.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Read for ArchiveDownload {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.file.as_mut() {
            Some(file) => file.read(buf),
            None => Ok(0),
        }
    }
}

impl Drop for ArchiveDownload {
    fn drop(&mut self) {
        // Close the handle first so removal also works where open files are locked.
        drop(self.file.take());
        match fs::remove_file(&self.path) {
            Ok(()) => debug!("Deleted downloaded archive {}", self.path.display()),
            Err(e) => warn!(
                "Failed to delete downloaded archive {}: {}",
                self.path.display(),
                e
            ),
        }
    }
}
