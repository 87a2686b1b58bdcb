//! The font hunting pipeline: fetch a stylesheet, download the fonts it
//! references into a session workspace, rewrite the stylesheet and archive
//! the result for a one-shot download.

pub mod archive;
pub mod builder;
pub mod bundle;
pub mod notes;
pub mod orchestrator;
pub mod workspace;

pub use archive::ArchiveAssembler;
pub use builder::FontHunterBuilder;
pub use bundle::{BundleOutcome, FontBundleBuilder, FontFaceRule, select_font_face};
pub use notes::RunNotes;
pub use orchestrator::{ArchiveDownload, FontHunterPipeline, RunState};
pub use workspace::SessionWorkspace;
