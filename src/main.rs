use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use scribble::config::Config;
use scribble::draw::{Canvas, Drawing};
use scribble::input::Editor;
use scribble::script::Script;
use scribble::session::{self, SessionOptions};
use std::path::{Path, PathBuf};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("SCRIBBLE_GIT_HASH"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "scribble")]
#[command(version, long_version = LONG_VERSION)]
#[command(about = "Touch-driven vector drawing engine with undo/redo history")]
struct Cli {
    /// Config file to use instead of ~/.config/scribble/config.toml
    #[arg(long, short = 'c', value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a JSON script of touches and commands through the editor
    Replay {
        /// Script to replay
        script: PathBuf,

        /// Start from a saved drawing instead of an empty canvas
        #[arg(long, value_name = "DOC")]
        input: Option<PathBuf>,

        /// Write the final frame as PNG
        #[arg(long, short = 'o', value_name = "PNG")]
        out: Option<PathBuf>,

        /// Save the resulting drawing
        #[arg(long, short = 's', value_name = "DOC")]
        save: Option<PathBuf>,
    },

    /// Render a saved drawing to PNG
    Render {
        /// Saved drawing
        document: PathBuf,

        /// Output PNG path
        #[arg(long, short = 'o', value_name = "PNG")]
        out: PathBuf,
    },

    /// Print a summary of a saved drawing
    Info {
        /// Saved drawing
        document: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let options = SessionOptions::from_config(&config.session);

    match cli.command {
        Command::Replay {
            script,
            input,
            out,
            save,
        } => replay(&config, &options, &script, input, out, save),
        Command::Render { document, out } => render(&config, &options, &document, &out),
        Command::Info { document } => info(&document),
    }
}

fn replay(
    config: &Config,
    options: &SessionOptions,
    script_path: &Path,
    input: Option<PathBuf>,
    out: Option<PathBuf>,
    save: Option<PathBuf>,
) -> Result<()> {
    let script = Script::load(script_path)?;
    let mut editor = Editor::from_config(config).context("Failed to create editor")?;

    if let Some(path) = &input {
        let loaded = session::load_drawing(path, options)?;
        editor.load_drawing(loaded.drawing);
    } else if let Some(size) = script.canvas {
        editor.load_drawing(Drawing::new(size));
    }

    let report = script.run(&mut editor);
    println!(
        "Replayed {} steps ({} touches, {} without effect); drawing has {} shapes",
        report.steps,
        report.touches,
        report.skipped,
        editor.drawing().len()
    );

    if let Some(path) = &out {
        editor
            .write_png(path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    if let Some(path) = &save {
        let outcome = session::save_drawing(editor.drawing(), path, options)?;
        println!(
            "Saved {} ({} bytes{})",
            path.display(),
            outcome.bytes_written,
            if outcome.compressed { ", gzip" } else { "" }
        );
    }

    Ok(())
}

fn render(config: &Config, options: &SessionOptions, document: &Path, out: &Path) -> Result<()> {
    let loaded = session::load_drawing(document, options)?;
    let background = config.canvas.background.as_ref().map(|spec| spec.to_color());

    let mut canvas = Canvas::new(loaded.drawing.size(), background)?;
    canvas.sync(&loaded.drawing)?;
    canvas
        .write_png(out)
        .with_context(|| format!("Failed to write {}", out.display()))?;

    println!(
        "Rendered {} shapes to {}",
        loaded.drawing.len(),
        out.display()
    );
    Ok(())
}

fn info(document: &Path) -> Result<()> {
    let inspection = session::inspect_drawing(document)?;

    println!("File: {}", inspection.path.display());
    println!(
        "Size: {} bytes{}",
        inspection.size_bytes,
        if inspection.compressed { " (gzip)" } else { "" }
    );
    println!(
        "Format version: {}{}",
        inspection.version,
        if inspection.supported { "" } else { " (unsupported)" }
    );
    println!("Last modified: {}", inspection.last_modified);
    println!(
        "Canvas: {}x{}",
        inspection.canvas_width, inspection.canvas_height
    );
    println!("Shapes: {}", inspection.total_shapes());
    for (tag, count) in &inspection.shape_counts {
        println!("  {tag}: {count}");
    }
    if inspection.backup_exists {
        println!("Backup: {}", inspection.backup_path.display());
    }

    Ok(())
}
