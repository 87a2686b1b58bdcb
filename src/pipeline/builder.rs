// src/pipeline/builder.rs
use super::bundle::FontBundleBuilder;
use super::orchestrator::FontHunterPipeline;
use crate::config::FontHunterConfig;
use crate::error::PipelineError;
use fonthunter_executor::ExecutorImpl;
use fonthunter_resource::HttpFetcher;
use fonthunter_traits::AssetFetcher;
use fonthunter_types::SessionId;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A builder for creating a `FontHunterPipeline`.
///
/// Everything the pipeline needs is passed in explicitly; nothing is read
/// from ambient global state.
#[derive(Debug, Default)]
pub struct FontHunterBuilder {
    config: FontHunterConfig,
    session: Option<String>,
    fetcher: Option<Arc<dyn AssetFetcher>>,
    executor: Option<ExecutorImpl>,
}

impl FontHunterBuilder {
    /// Creates a builder with the default configuration.
    pub fn new() -> Self {
        Default::default()
    }

    /// Replaces the whole configuration.
    pub fn with_config(mut self, config: FontHunterConfig) -> Self {
        self.config = config;
        self
    }

    /// Loads the configuration from a TOML file.
    pub fn with_config_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, PipelineError> {
        self.config = FontHunterConfig::from_file(path)?;
        Ok(self)
    }

    pub fn with_storage_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.config.storage_root = root.into();
        self
    }

    /// Binds the pipeline to a caller session. Without one a random session
    /// id is generated at build time.
    pub fn with_session(mut self, session: impl Into<String>) -> Self {
        self.session = Some(session.into());
        self
    }

    /// Uses `fetcher` instead of the HTTP fetcher, e.g. an `InMemoryFetcher`.
    pub fn with_fetcher(mut self, fetcher: Arc<dyn AssetFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Overrides the executor picked from `max_parallel_fetches`.
    pub fn with_executor(mut self, executor: ExecutorImpl) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Consumes the builder and creates the `FontHunterPipeline`.
    ///
    /// This is where the configuration is validated; an invalid one is a
    /// `Configuration` error and no pipeline is created.
    pub fn build(self) -> Result<FontHunterPipeline, PipelineError> {
        let config = self.config.normalized();
        config.validate()?;

        let session = match self.session {
            Some(id) => SessionId::new(id)?,
            None => SessionId::new(uuid::Uuid::new_v4().simple().to_string())?,
        };

        let fetcher = match self.fetcher {
            Some(fetcher) => fetcher,
            None => Arc::new(
                HttpFetcher::with_settings(config.user_agent.clone(), config.timeout())
                    .with_max_body_bytes(config.max_body_bytes),
            ),
        };

        let executor = match self.executor {
            Some(executor) => executor,
            None => ExecutorImpl::bounded(config.max_parallel_fetches)?,
        };
        log::info!(
            "Font hunter for session {} uses {} with {}",
            session,
            fetcher.name(),
            executor_label(&executor)
        );

        let bundler = FontBundleBuilder::new(Arc::clone(&fetcher), executor);
        Ok(FontHunterPipeline::new(config, session, fetcher, bundler))
    }
}

fn executor_label(executor: &ExecutorImpl) -> String {
    use fonthunter_traits::Executor;
    format!("{} ({} worker(s))", executor.name(), executor.parallelism())
}
