// SPDX-License-Identifier: GPL-3.0-or-later
// src/main.rs
//
// Command line front end: load an image, position the crop square, render a
// preview and export the crop.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};

use cropsquare::config::default_output_dir;
use cropsquare::constant::EXPORT_SUFFIX;
use cropsquare::{
    BorderStyle, CropEngine, EngineConfig, EngineMessage, ImageSource, MemoryHost,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BorderArg {
    Zigzag,
    Dotted,
}

impl From<BorderArg> for BorderStyle {
    fn from(arg: BorderArg) -> Self {
        match arg {
            BorderArg::Zigzag => BorderStyle::Zigzag,
            BorderArg::Dotted => BorderStyle::Dotted,
        }
    }
}

#[derive(Parser)]
#[command(name = "cropsquare")]
#[command(version, about = "Square crop selection with PNG export", long_about = None)]
struct Cli {
    /// Image file or data URI
    #[arg(value_name = "INPUT")]
    input: String,

    /// Left edge of the crop square
    #[arg(long, value_name = "N")]
    x: Option<f32>,

    /// Top edge of the crop square
    #[arg(long, value_name = "N")]
    y: Option<f32>,

    /// Side length of the crop square
    #[arg(long, value_name = "N")]
    side: Option<f32>,

    /// Replay a pointer drag that shifts the square by DX,DY (repeatable)
    #[arg(long, value_name = "DX,DY", value_parser = parse_drag, allow_hyphen_values = true)]
    drag: Vec<(f32, f32)>,

    /// Write the rendered selection view to this PNG
    #[arg(long, value_name = "FILE")]
    preview: Option<PathBuf>,

    /// Output file for the cropped PNG
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print the exported data URI to stdout
    #[arg(long)]
    data_uri: bool,

    /// Zigzag tooth size in pixels
    #[arg(long, value_name = "N")]
    tooth_size: Option<f32>,

    /// Boundary style
    #[arg(long, value_enum, default_value = "zigzag")]
    border: BorderArg,
}

fn parse_drag(arg: &str) -> std::result::Result<(f32, f32), String> {
    let (dx, dy) = arg
        .split_once(',')
        .ok_or_else(|| format!("expected DX,DY, got '{arg}'"))?;
    let dx = dx.trim().parse::<f32>().map_err(|e| format!("DX: {e}"))?;
    let dy = dy.trim().parse::<f32>().map_err(|e| format!("DY: {e}"))?;
    Ok((dx, dy))
}

/// Output path when none is given: `<stem>-crop.png` in the pictures folder.
fn default_output(input: &str) -> Result<PathBuf> {
    let stem = if input.starts_with("data:") {
        "image".to_string()
    } else {
        Path::new(input)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string())
    };
    let dir = default_output_dir().context("No pictures or home directory available")?;
    Ok(dir.join(format!("{stem}{EXPORT_SUFFIX}.png")))
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = EngineConfig {
        border_style: cli.border.into(),
        ..EngineConfig::default()
    };
    if let Some(tooth) = cli.tooth_size {
        if tooth <= 0.0 {
            bail!("Tooth size must be positive, got {tooth}");
        }
        config.tooth_size = tooth;
    }

    let source = ImageSource::from_arg(&cli.input);
    let mut engine = CropEngine::load(source, config)
        .await
        .with_context(|| format!("Failed to load {}", short(&cli.input)))?;
    let (width, height) = engine.source().dimensions();
    log::info!("Loaded {} image {width}x{height}", engine.source().kind());

    let (host, handle) = MemoryHost::shared();
    engine.set_element(handle)?;

    if cli.x.is_some() || cli.y.is_some() || cli.side.is_some() {
        engine.set_constraint(cli.x, cli.y, cli.side)?;
        engine
            .get_constraint()
            .check_bounds(width, height)
            .context("Crop square does not fit the image")?;
    }

    for (dx, dy) in &cli.drag {
        // Delta is previous minus current pointer position.
        engine.update(EngineMessage::PointerPressed { x: 0.0, y: 0.0 })?;
        engine.update(EngineMessage::PointerMoved { x: -dx, y: -dy })?;
        engine.update(EngineMessage::PointerReleased)?;
    }

    let square = engine.get_constraint();
    if let Err(err) = square.check_bounds(width, height) {
        log::warn!("Crop square {square:?} leaves the image: {err}");
    }

    engine.update(EngineMessage::Frame)?;
    log::debug!("Host children: {:?}", host.borrow().children());

    if let Some(path) = &cli.preview {
        let png = engine.surface().encode_png()?;
        tokio::fs::write(path, png)
            .await
            .with_context(|| format!("Failed to write preview {}", path.display()))?;
        log::info!("Preview written to {}", path.display());
    }

    let exported = engine.export_image()?;
    let output = match cli.output {
        Some(path) => path,
        None => default_output(&cli.input)?,
    };
    exported
        .save(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    log::info!(
        "Exported {}x{} crop at ({}, {}) to {}",
        exported.width(),
        exported.height(),
        square.x,
        square.y,
        output.display()
    );

    if cli.data_uri {
        println!("{}", exported.data_uri());
    }

    engine.remove()?;
    Ok(())
}

/// Keep data URIs out of error messages.
fn short(input: &str) -> &str {
    if input.starts_with("data:") {
        "data URI"
    } else {
        input
    }
}
