use crate::config::FontHunterConfig;
use fonthunter_types::SessionId;
use log::{debug, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// The on-disk layout owned by one session:
///
/// ```text
/// <root>/<session>/<fonts_dir>/<font files>
/// <root>/<session>/<css_dir>/<file_name>
/// <root>/<session>.zip
/// ```
#[derive(Debug, Clone)]
pub struct SessionWorkspace {
    root: PathBuf,
    session: SessionId,
    fonts_dir: String,
    css_dir: String,
    file_name: String,
}

impl SessionWorkspace {
    pub fn new(config: &FontHunterConfig, session: SessionId) -> Self {
        Self {
            root: config.storage_root.clone(),
            session,
            fonts_dir: config.fonts_dir.clone(),
            css_dir: config.css_dir.clone(),
            file_name: config.file_name.clone(),
        }
    }

    pub fn session(&self) -> &SessionId {
        &self.session
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/<session>`
    pub fn dir(&self) -> PathBuf {
        self.root.join(self.session.as_str())
    }

    pub fn fonts_path(&self) -> PathBuf {
        self.dir().join(&self.fonts_dir)
    }

    pub fn css_path(&self) -> PathBuf {
        self.dir().join(&self.css_dir)
    }

    pub fn font_file(&self, file_name: &str) -> PathBuf {
        self.fonts_path().join(file_name)
    }

    pub fn stylesheet_file(&self) -> PathBuf {
        self.css_path().join(&self.file_name)
    }

    pub fn stylesheet_name(&self) -> &str {
        &self.file_name
    }

    pub fn archive_path(&self) -> PathBuf {
        self.root.join(self.session.archive_file_name())
    }

    /// Sibling the archive is written to before it is renamed into place.
    pub fn staging_archive_path(&self) -> PathBuf {
        self.root
            .join(format!("{}.part", self.session.archive_file_name()))
    }

    /// Path of a font as referenced from the rewritten stylesheet.
    pub fn font_href(&self, file_name: &str) -> String {
        let ups = self
            .css_dir
            .split('/')
            .filter(|segment| !segment.is_empty() && *segment != ".")
            .count()
            .max(1);
        format!("{}{}/{}", "../".repeat(ups), self.fonts_dir, file_name)
    }

    pub fn exists(&self) -> bool {
        self.dir().is_dir()
    }

    /// Clears whatever an earlier run of this session left behind and creates
    /// empty font and stylesheet directories.
    pub fn prepare(&self) -> io::Result<()> {
        let dir = self.dir();
        if dir.exists() {
            debug!("Clearing previous workspace {}", dir.display());
            fs::remove_dir_all(&dir)?;
        }
        fs::create_dir_all(self.fonts_path())?;
        fs::create_dir_all(self.css_path())?;
        Ok(())
    }

    /// Removes the workspace directory. Missing directories are not an error;
    /// other failures are logged and swallowed.
    pub fn cleanup(&self) {
        let dir = self.dir();
        match fs::remove_dir_all(&dir) {
            Ok(()) => debug!("Removed workspace {}", dir.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove workspace {}: {}", dir.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn workspace(root: &Path) -> SessionWorkspace {
        let config = FontHunterConfig {
            storage_root: root.to_path_buf(),
            ..Default::default()
        };
        SessionWorkspace::new(&config, SessionId::new("abc").unwrap())
    }

    #[test]
    fn layout_paths() {
        let ws = workspace(Path::new("/srv/fh"));
        assert_eq!(ws.dir(), PathBuf::from("/srv/fh/abc"));
        assert_eq!(ws.font_file("a.ttf"), PathBuf::from("/srv/fh/abc/fonts/a.ttf"));
        assert_eq!(ws.stylesheet_file(), PathBuf::from("/srv/fh/abc/css/fonts.css"));
        assert_eq!(ws.archive_path(), PathBuf::from("/srv/fh/abc.zip"));
        assert_eq!(ws.staging_archive_path(), PathBuf::from("/srv/fh/abc.zip.part"));
        assert_eq!(ws.font_href("a.ttf"), "../fonts/a.ttf");
    }

    #[test]
    fn nested_css_dir_climbs_back_out() {
        let config = FontHunterConfig {
            css_dir: "assets/css".to_string(),
            ..Default::default()
        };
        let ws = SessionWorkspace::new(&config, SessionId::new("s").unwrap());
        assert_eq!(ws.font_href("a.woff"), "../../fonts/a.woff");
    }

    #[test]
    fn prepare_clears_previous_run() {
        let dir = tempdir().unwrap();
        let ws = workspace(dir.path());
        ws.prepare().unwrap();
        fs::write(ws.font_file("stale.ttf"), b"old").unwrap();

        ws.prepare().unwrap();
        assert!(ws.fonts_path().is_dir());
        assert!(ws.css_path().is_dir());
        assert!(!ws.font_file("stale.ttf").exists());

        ws.cleanup();
        assert!(!ws.exists());
        // A second cleanup is a no-op.
        ws.cleanup();
    }
}
