use super::workspace::SessionWorkspace;
use crate::error::PipelineError;
use log::{debug, info, warn};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Packs a finished workspace into `<root>/<session>.zip`.
///
/// The archive is written to a `.part` sibling first and renamed over the
/// target, so an existing archive is only ever replaced by a complete one.
/// The workspace directory is removed once the archive is in place.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArchiveAssembler;

impl ArchiveAssembler {
    pub fn new() -> Self {
        Self
    }

    pub fn assemble(&self, workspace: &SessionWorkspace) -> Result<PathBuf, PipelineError> {
        let dir = workspace.dir();
        if !dir.is_dir() {
            return Err(PipelineError::Archive(format!(
                "Directory not found: {}",
                dir.display()
            )));
        }

        let staging = workspace.staging_archive_path();
        let target = workspace.archive_path();
        if let Err(e) = write_archive(&dir, &staging) {
            discard_staging(&staging);
            return Err(e);
        }

        fs::rename(&staging, &target).map_err(|e| {
            discard_staging(&staging);
            PipelineError::Archive(format!(
                "Failed to finalize zip archive {}: {}",
                target.display(),
                e
            ))
        })?;

        info!("Created archive {}", target.display());
        workspace.cleanup();
        Ok(target)
    }
}

fn discard_staging(staging: &Path) {
    if let Err(e) = fs::remove_file(staging)
        && e.kind() != io::ErrorKind::NotFound
    {
        warn!("Failed to remove staging archive {}: {}", staging.display(), e);
    }
}

fn write_archive(dir: &Path, output: &Path) -> Result<usize, PipelineError> {
    let file = File::create(output).map_err(|e| {
        PipelineError::Archive(format!(
            "Unable to create zip archive {}: {}",
            output.display(),
            e
        ))
    })?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut file_count = 0;
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| PipelineError::Io(io::Error::other(e)))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry.path().strip_prefix(dir).unwrap_or(entry.path());
        let name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        debug!("Adding {} to archive", name);
        zip.start_file(name, options)?;
        let mut source = File::open(entry.path())?;
        io::copy(&mut source, &mut zip)?;
        file_count += 1;
    }

    let file = zip.finish()?;
    file.sync_all()?;
    Ok(file_count)
}
