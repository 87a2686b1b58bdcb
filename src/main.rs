// fonthunter: fetch a web font stylesheet, bundle its fonts, hand out the zip.
//
// Subcommands:
//   generate  run the font hunter for a stylesheet URL, print the result JSON
//   download  write a session's archive to disk (one-shot)
//   avatar    print a generated avatar data URI or its <img> markup

use clap::{Parser, Subcommand};
use fonthunter::avatar::{AvatarAttributes, AvatarWidget, resolve_initials, synthesize};
use fonthunter::{FontHunterBuilder, FontHunterPipeline, PipelineError, normalize_source_url};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "fonthunter", version, about = "Download and repackage web fonts")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Storage root, overriding the configuration
    #[arg(long, global = true)]
    root: Option<PathBuf>,
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Fetch a stylesheet, download its fonts and archive them
    Generate {
        /// Stylesheet URL; `http://` is assumed when no scheme is given
        url: String,
        /// Session id; a random one is used when omitted
        #[arg(long)]
        session: Option<String>,
    },
    /// Write a previously generated archive to disk and delete it
    Download {
        /// The `download_url` returned by `generate`
        path: String,
        #[arg(long)]
        session: String,
        /// Output file, defaults to the archive name in the current directory
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Generate a placeholder avatar
    Avatar {
        /// Name or title to take initials from
        text: Option<String>,
        #[arg(long, default_value_t = 48)]
        width: u32,
        #[arg(long, default_value_t = 48)]
        height: u32,
        /// Primary image source for the markup
        #[arg(long)]
        src: Option<String>,
        /// Print `<img>` markup instead of the bare data URI
        #[arg(long)]
        html: bool,
    },
}

fn pipeline(cli: &Cli, session: Option<&str>) -> Result<FontHunterPipeline, PipelineError> {
    let mut builder = FontHunterBuilder::new();
    if let Some(path) = &cli.config {
        builder = builder.with_config_file(path)?;
    }
    if let Some(root) = &cli.root {
        builder = builder.with_storage_root(root.clone());
    }
    if let Some(session) = session {
        builder = builder.with_session(session);
    }
    builder.build()
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), PipelineError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| PipelineError::Io(io::Error::other(e)))?;
    println!("{}", json);
    Ok(())
}

fn cmd_generate(cli: &Cli, url: &str, session: Option<&str>) -> Result<ExitCode, PipelineError> {
    let url = normalize_source_url(url)?;
    let pipeline = pipeline(cli, session)?;
    let result = pipeline.generate(&url);
    print_json(&result)?;
    Ok(if result.ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn cmd_download(
    cli: &Cli,
    path: &str,
    session: &str,
    out: Option<&PathBuf>,
) -> Result<ExitCode, PipelineError> {
    let pipeline = pipeline(cli, Some(session))?;
    let mut download = match pipeline.download(path) {
        Ok(download) => download,
        Err(failure) => {
            print_json(&failure)?;
            return Ok(ExitCode::FAILURE);
        }
    };
    let target = out
        .cloned()
        .unwrap_or_else(|| PathBuf::from(download.file_name()));
    let mut file = File::create(&target)?;
    let written = io::copy(&mut download, &mut file)?;
    eprintln!("Wrote {} bytes to {}", written, target.display());
    Ok(ExitCode::SUCCESS)
}

fn cmd_avatar(
    text: Option<&str>,
    width: u32,
    height: u32,
    src: Option<&str>,
    html: bool,
) -> ExitCode {
    if html {
        let widget = AvatarWidget::new(AvatarAttributes {
            src: src.map(str::to_string),
            alt: text.map(str::to_string),
            width: Some(width.to_string()),
            height: Some(height.to_string()),
            ..Default::default()
        });
        println!("{}", widget.render());
        return ExitCode::SUCCESS;
    }

    let uri = synthesize(text.unwrap_or_default(), width, height);
    if uri.is_empty() {
        eprintln!(
            "Could not generate an avatar for '{}'",
            resolve_initials(text.unwrap_or_default())
        );
        return ExitCode::FAILURE;
    }
    println!("{}", uri);
    ExitCode::SUCCESS
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match &cli.command {
        Cmd::Generate { url, session } => cmd_generate(&cli, url, session.as_deref()),
        Cmd::Download { path, session, out } => cmd_download(&cli, path, session, out.as_ref()),
        Cmd::Avatar {
            text,
            width,
            height,
            src,
            html,
        } => Ok(cmd_avatar(
            text.as_deref(),
            *width,
            *height,
            src.as_deref(),
            *html,
        )),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
