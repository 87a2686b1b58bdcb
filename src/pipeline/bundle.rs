// src/pipeline/bundle.rs
use super::notes::RunNotes;
use super::workspace::SessionWorkspace;
use crate::error::PipelineError;
use fonthunter_executor::ExecutorImpl;
use fonthunter_traits::{AssetFetcher, Executor};
use fonthunter_types::{DiscoveredFontAsset, FontFamilyRequest, FontVariant};
use log::{debug, info};
use std::fmt;
use std::fs;
use std::sync::Arc;

/// One `@font-face` rule of the rewritten stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFaceRule {
    pub family: String,
    pub variant: FontVariant,
    pub href: String,
    pub format: &'static str,
}

impl fmt::Display for FontFaceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "@font-face {{")?;
        writeln!(f, "    font-family: '{}';", self.family)?;
        writeln!(f, "    font-style: {};", self.variant.style)?;
        writeln!(f, "    font-weight: {};", self.variant.weight)?;
        writeln!(f, "    src: url('{}') format('{}');", self.href, self.format)?;
        writeln!(f, "}}")?;
        writeln!(f)
    }
}

/// Chooses the family and variant for the `index`-th downloaded font.
///
/// Names declared by the stylesheet's own `@font-face` rules win and always
/// get the default variant. Otherwise the requested families are cycled, and
/// as a last resort the font is named after its file.
pub fn select_font_face(
    index: usize,
    face_names: &[String],
    request: &FontFamilyRequest,
    asset: &DiscoveredFontAsset,
) -> (String, FontVariant) {
    if !face_names.is_empty() {
        return (
            face_names[index % face_names.len()].clone(),
            FontVariant::default(),
        );
    }
    if let Some((family, variant)) = request.cyclic(index) {
        return (family.to_string(), variant);
    }
    (asset.stem().to_string(), FontVariant::default())
}

/// What a successful bundle left in the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BundleOutcome {
    pub downloaded: usize,
}

/// Downloads the discovered fonts into a session workspace and writes the
/// stylesheet that points at the local copies.
///
/// Downloads are best effort: one failed font is recorded and skipped. The
/// bundle as a whole fails when no font made it to disk or when the
/// stylesheet cannot be written, and then leaves no workspace behind.
#[derive(Debug, Clone)]
pub struct FontBundleBuilder {
    fetcher: Arc<dyn AssetFetcher>,
    executor: ExecutorImpl,
}

impl FontBundleBuilder {
    pub fn new(fetcher: Arc<dyn AssetFetcher>, executor: ExecutorImpl) -> Self {
        Self { fetcher, executor }
    }

    pub fn build(
        &self,
        workspace: &SessionWorkspace,
        assets: &[DiscoveredFontAsset],
        request: &FontFamilyRequest,
        face_names: &[String],
        notes: &mut RunNotes,
    ) -> Result<BundleOutcome, PipelineError> {
        workspace.prepare()?;

        let urls: Vec<String> = assets.iter().map(|a| a.source_url.clone()).collect();
        let fetcher = Arc::clone(&self.fetcher);
        debug!(
            "Fetching {} font(s) with {} (parallelism {})",
            urls.len(),
            self.executor.name(),
            self.executor.parallelism()
        );
        let fetched = self
            .executor
            .execute_all_fallible(urls, move |url| fetcher.fetch(&url));

        let mut rules = Vec::new();
        for (asset, result) in assets.iter().zip(fetched) {
            let file_name = &asset.local_file_name;
            let bytes = match result {
                Ok(bytes) => bytes,
                Err(e) => {
                    notes.fetch_failure(&e);
                    notes.error(format!(
                        "Failed to download or save font: {} from {}",
                        file_name, asset.source_url
                    ));
                    continue;
                }
            };

            let target = workspace.font_file(file_name);
            if let Err(e) = fs::write(&target, &bytes) {
                debug!("Writing {} failed: {}", target.display(), e);
                notes.error(format!(
                    "Failed to download or save font: {} from {}",
                    file_name, asset.source_url
                ));
                continue;
            }
            notes.success(format!("Downloaded: {}", file_name));

            let (family, variant) = select_font_face(rules.len(), face_names, request, asset);
            rules.push(FontFaceRule {
                family,
                variant,
                href: workspace.font_href(file_name),
                format: asset.format(),
            });
        }

        if rules.is_empty() {
            workspace.cleanup();
            return Err(PipelineError::NoFontsDownloaded);
        }

        let stylesheet = workspace.stylesheet_file();
        let content: String = rules.iter().map(ToString::to_string).collect();
        if let Err(source) = fs::write(&stylesheet, content) {
            workspace.cleanup();
            return Err(PipelineError::Persistence {
                path: stylesheet,
                source,
            });
        }
        notes.success(format!(
            "{} generated successfully",
            workspace.stylesheet_name()
        ));
        info!(
            "Bundled {} of {} font(s) for session {}",
            rules.len(),
            assets.len(),
            workspace.session()
        );

        Ok(BundleOutcome {
            downloaded: rules.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FontHunterConfig;
    use fonthunter_traits::InMemoryFetcher;
    use fonthunter_types::{FontStyle, SessionId};
    use tempfile::tempdir;

    fn asset(url: &str) -> DiscoveredFontAsset {
        DiscoveredFontAsset::from_url(url).unwrap()
    }

    fn setup(root: &std::path::Path) -> (Arc<InMemoryFetcher>, FontBundleBuilder, SessionWorkspace) {
        let fetcher = Arc::new(InMemoryFetcher::new());
        let builder = FontBundleBuilder::new(fetcher.clone(), ExecutorImpl::default());
        let config = FontHunterConfig {
            storage_root: root.to_path_buf(),
            ..Default::default()
        };
        let workspace = SessionWorkspace::new(&config, SessionId::new("bundle").unwrap());
        (fetcher, builder, workspace)
    }

    #[test]
    fn rule_text_layout() {
        let rule = FontFaceRule {
            family: "Roboto".to_string(),
            variant: FontVariant::new("700", FontStyle::Italic),
            href: "../fonts/r.woff2".to_string(),
            format: "woff2",
        };
        assert_eq!(
            rule.to_string(),
            "@font-face {\n    font-family: 'Roboto';\n    font-style: italic;\n    font-weight: 700;\n    src: url('../fonts/r.woff2') format('woff2');\n}\n\n"
        );
    }

    #[test]
    fn face_selection_tiers() {
        let a = asset("https://x.test/Inter-Bold.ttf");
        let names = vec!["One".to_string(), "Two".to_string()];
        let request: FontFamilyRequest = vec![
            ("Req".to_string(), FontVariant::from_token("300")),
            ("Req".to_string(), FontVariant::from_token("500i")),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            select_font_face(3, &names, &request, &a),
            ("Two".to_string(), FontVariant::default())
        );
        assert_eq!(
            select_font_face(1, &[], &request, &a),
            ("Req".to_string(), FontVariant::new("500", FontStyle::Italic))
        );
        assert_eq!(
            select_font_face(7, &[], &FontFamilyRequest::default(), &a),
            ("Inter-Bold".to_string(), FontVariant::default())
        );
    }

    #[test]
    fn partial_failure_is_recorded_and_skipped() {
        let dir = tempdir().unwrap();
        let (fetcher, builder, workspace) = setup(dir.path());
        fetcher.add("https://x.test/a.woff2", b"aaaa".to_vec()).unwrap();
        fetcher.fail("https://x.test/b.ttf", "connection reset").unwrap();
        fetcher.add("https://x.test/c.otf", b"cccc".to_vec()).unwrap();

        let assets = vec![
            asset("https://x.test/a.woff2"),
            asset("https://x.test/b.ttf"),
            asset("https://x.test/c.otf"),
        ];
        let mut notes = RunNotes::new();
        let outcome = builder
            .build(
                &workspace,
                &assets,
                &FontFamilyRequest::default(),
                &["Face".to_string()],
                &mut notes,
            )
            .unwrap();

        assert_eq!(outcome.downloaded, 2);
        assert_eq!(
            notes.successes,
            vec!["Downloaded: a.woff2", "Downloaded: c.otf", "fonts.css generated successfully"]
        );
        assert_eq!(
            notes.errors,
            vec![
                "Error fetching https://x.test/b.ttf: connection reset",
                "Failed to download or save font: b.ttf from https://x.test/b.ttf",
            ]
        );
        assert_eq!(fs::read(workspace.font_file("a.woff2")).unwrap(), b"aaaa");
        assert!(!workspace.font_file("b.ttf").exists());

        let css = fs::read_to_string(workspace.stylesheet_file()).unwrap();
        assert_eq!(css.matches("@font-face").count(), 2);
        assert!(css.contains("src: url('../fonts/c.otf') format('opentype');"));
    }

    #[test]
    fn nothing_downloaded_removes_workspace() {
        let dir = tempdir().unwrap();
        let (_fetcher, builder, workspace) = setup(dir.path());
        let mut notes = RunNotes::new();

        let err = builder
            .build(
                &workspace,
                &[asset("https://x.test/missing.ttf")],
                &FontFamilyRequest::default(),
                &[],
                &mut notes,
            )
            .unwrap_err();

        assert!(matches!(err, PipelineError::NoFontsDownloaded));
        assert_eq!(notes.errors.len(), 1);
        assert!(notes.successes.is_empty());
        assert!(!workspace.exists());
    }
}
