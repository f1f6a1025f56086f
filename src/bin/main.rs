//! Cross Atlas CLI
//!
//! Build horizontal-cross cube atlases from face images or generated dice,
//! and prepare sprite and placeholder text textures.

use clap::{Parser, Subcommand};
use cross_atlas::atlas::{compose, validate_atlas_file, CROSS_LAYOUT};
use cross_atlas::dice::{dice_face_set, pips_for, render_dice_faces, DiceFaceOptions, DiceStyle};
use cross_atlas::faces::{discover_face_files, prepare_faces, FaceFiles};
use cross_atlas::process::{process_directory, ProcessOptions, DEFAULT_PROCESS_SIZE};
use cross_atlas::text::{
    filter_labels, generate_text_textures, load_labels, TextLabel, TextStyle, TextTextureOptions,
    DEFAULT_FONT_SIZE, DEFAULT_TEXT_SIZE,
};
use cross_atlas::{compose_from_paths, AtlasConfig, ConfigOverrides, CubeFace};
use image::DynamicImage;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cross-atlas")]
#[command(author, version, about = "Build horizontal-cross cube texture atlases", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate six dice faces and pack them into a cross atlas
    Dice {
        /// Face size in pixels [default: 128]
        #[arg(short, long)]
        size: Option<u32>,

        /// Output directory
        #[arg(short, long, default_value = "./generated_dice")]
        output: PathBuf,

        /// Draw pips (default)
        #[arg(short, long, overrides_with = "no_dots")]
        dots: bool,

        /// Draw numerals instead of pips
        #[arg(long, overrides_with = "dots")]
        no_dots: bool,

        /// Font file for numerals (built-in bitmap digits otherwise)
        #[arg(long)]
        font: Option<PathBuf>,

        /// Add a transparent gutter around each face
        #[arg(short, long)]
        gutter: bool,

        /// Gutter size in pixels [default: 2]
        #[arg(long, visible_alias = "gutterSize")]
        gutter_size: Option<u32>,

        /// JSON atlas configuration; flags override its values
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Pack six face images from a directory into a cross atlas
    FromFiles {
        /// Directory with positive_x.png .. negative_z.png, or 1.png .. 6.png
        #[arg(short, long, default_value = "./cube_faces")]
        input: PathBuf,

        /// Output atlas path
        #[arg(short, long, default_value = "./horizontal_cross_atlas.png")]
        output: PathBuf,

        /// Cell size in pixels [default: 256]
        #[arg(short, long)]
        size: Option<u32>,

        /// Add a transparent gutter around each face
        #[arg(short, long)]
        gutter: bool,

        /// Gutter size in pixels [default: 2]
        #[arg(long, visible_alias = "gutterSize")]
        gutter_size: Option<u32>,

        /// JSON atlas configuration; flags override its values
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check that atlas images have a 4:3 shape
    Validate {
        /// Atlas files to check
        #[arg(required = true)]
        atlases: Vec<PathBuf>,
    },

    /// Trim transparent edges and fit sprites into squares
    Process {
        /// Input directory of PNG files
        #[arg(short, long, default_value = "./input_data/actors")]
        input: PathBuf,

        /// Output directory [default: <input>_processed]
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Target square size
        #[arg(short, long, default_value_t = DEFAULT_PROCESS_SIZE)]
        size: u32,

        /// Skip backing up originals
        #[arg(long)]
        no_backup: bool,

        /// Write results over the originals (requires backup)
        #[arg(short = 'w', long)]
        overwrite: bool,

        /// Only process these file stems
        #[arg(long, num_args = 1..)]
        only: Vec<String>,
    },

    /// Render placeholder text textures from a label list
    Text {
        /// JSON array of labels: [{"name": "lv1", "text": "Farm", "category": "building"}]
        #[arg(short, long)]
        labels: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = "./generated_local_textures")]
        output: PathBuf,

        /// Texture width and height
        #[arg(short, long, default_value_t = DEFAULT_TEXT_SIZE)]
        size: u32,

        /// Font size in pixels
        #[arg(short, long, default_value_t = DEFAULT_FONT_SIZE)]
        font_size: f32,

        /// Font file used for the labels
        #[arg(long)]
        font: Option<PathBuf>,

        /// Only generate labels in this category
        #[arg(short, long)]
        category: Option<String>,

        /// Only generate these label names
        #[arg(long, num_args = 1..)]
        only: Vec<String>,

        /// Plain text without panel, outline or frame
        #[arg(long)]
        simple: bool,

        /// Print the labels and their display text, then exit
        #[arg(long)]
        list: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Dice {
            size,
            output,
            dots: _,
            no_dots,
            font,
            gutter,
            gutter_size,
            config,
        } => {
            let overrides = ConfigOverrides {
                cell_size: size,
                gutter,
                gutter_size,
            };
            let config = AtlasConfig::resolve(config.as_deref(), 128, overrides)?;
            let style = if no_dots {
                DiceStyle::Numerals
            } else {
                DiceStyle::Dots
            };
            generate_dice(&config, &output, style, font.as_deref())?;
        }
        Commands::FromFiles {
            input,
            output,
            size,
            gutter,
            gutter_size,
            config,
        } => {
            let overrides = ConfigOverrides {
                cell_size: size,
                gutter,
                gutter_size,
            };
            let config = AtlasConfig::resolve(config.as_deref(), 256, overrides)?;
            generate_from_files(&config, &input, &output)?;
        }
        Commands::Validate { atlases } => {
            validate_atlases(&atlases)?;
        }
        Commands::Process {
            input,
            output,
            size,
            no_backup,
            overwrite,
            only,
        } => {
            process_sprites(&input, output, size, !no_backup, overwrite, only)?;
        }
        Commands::Text {
            labels,
            output,
            size,
            font_size,
            font,
            category,
            only,
            simple,
            list,
        } => {
            let labels = filter_labels(&load_labels(&labels)?, category.as_deref(), &only);
            if list {
                for label in &labels {
                    println!(
                        "  {} [{}]: {}",
                        label.name,
                        label.category.as_deref().unwrap_or("-"),
                        label.display_text()
                    );
                }
                return Ok(());
            }

            let style = if simple {
                TextStyle::Simple
            } else {
                TextStyle::Decorated
            };
            let mut options = TextTextureOptions::new(size, size)
                .with_font_size(font_size)
                .with_style(style);
            if let Some(font) = font {
                options = options.with_font_file(font)?;
            }
            generate_text(&labels, &output, &options)?;
        }
    }

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_config(config: &AtlasConfig) -> Result<(), Box<dyn std::error::Error>> {
    let (width, height) = config.atlas_size()?;
    println!("  Cell size: {}x{}", config.cell_size, config.cell_size);
    println!("  Atlas size: {}x{}", width, height);
    if config.gutter.enabled {
        println!("  Gutter: {}px", config.gutter.size);
    }
    Ok(())
}

fn print_layout(dice: bool) {
    for p in CROSS_LAYOUT {
        if dice {
            println!(
                "  {} (col {}, row {}): face {}",
                p.face.label(),
                p.grid.col,
                p.grid.row,
                pips_for(p.face)
            );
        } else {
            println!("  {} (col {}, row {})", p.face.label(), p.grid.col, p.grid.row);
        }
    }
}

fn generate_dice(
    config: &AtlasConfig,
    output_dir: &Path,
    style: DiceStyle,
    font: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Generating dice faces ({:?})...", style);
    print_config(config)?;

    let mut options = DiceFaceOptions::new(config.cell_size).with_style(style);
    if let Some(font) = font {
        options = options.with_font_file(font)?;
    }
    let faces = render_dice_faces(&options)?;

    std::fs::create_dir_all(output_dir)?;
    for (i, face) in faces.iter().enumerate() {
        let path = output_dir.join(style.file_name(i as u8 + 1));
        face.save(&path)?;
        println!("  Face {}: {:?}", i + 1, path);
    }

    let sources = dice_face_set(faces.map(DynamicImage::ImageRgba8));
    let prepared = prepare_faces(&sources, config)?;
    let atlas = compose(&prepared, config)?;

    let atlas_path = output_dir.join("dice_horizontal_cross.png");
    let report_path = atlas.save_with_report(&atlas_path)?;

    println!("Dice layout:");
    print_layout(true);
    println!("Atlas: {:?} ({}x{})", atlas_path, atlas.width(), atlas.height());
    println!("UV mapping: {:?}", report_path);

    let validation = validate_atlas_file(&atlas_path)?;
    println!("Validation: {}", validation);
    if !validation.is_valid() {
        return Err(format!("generated atlas failed validation: {}", validation).into());
    }

    Ok(())
}

fn generate_from_files(
    config: &AtlasConfig,
    input_dir: &Path,
    output: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Looking for face images in {:?}...", input_dir);
    let files = discover_face_files(input_dir)?;

    match &files {
        FaceFiles::Named(set) => {
            for face in CubeFace::ALL {
                println!("  {}: {:?}", face.label(), set[face]);
            }
        }
        FaceFiles::Numbered(paths) => {
            println!("  Using numbered files as dice faces");
            for (i, path) in paths.iter().enumerate() {
                println!("  Face {}: {:?}", i + 1, path);
            }
        }
    }

    println!("Composing atlas...");
    print_config(config)?;
    let dice = files.is_dice();
    let atlas = compose_from_paths(&files.into_face_set(), config)?;
    let report_path = atlas.save_with_report(output)?;

    print_layout(dice);
    println!("Atlas: {:?} ({}x{})", output, atlas.width(), atlas.height());
    println!("UV mapping: {:?}", report_path);

    Ok(())
}

fn validate_atlases(paths: &[PathBuf]) -> Result<(), Box<dyn std::error::Error>> {
    let mut failures = 0;

    for path in paths {
        match validate_atlas_file(path) {
            Ok(validation) => {
                println!("{:?}: {}", path, validation);
                if !validation.is_valid() {
                    failures += 1;
                }
            }
            Err(e) => {
                println!("{:?}: could not read: {}", path, e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        return Err(format!("{} of {} atlases failed validation", failures, paths.len()).into());
    }
    Ok(())
}

fn process_sprites(
    input: &Path,
    output: Option<PathBuf>,
    size: u32,
    backup: bool,
    overwrite: bool,
    only: Vec<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    if !input.is_dir() {
        return Err(format!("input directory does not exist: {:?}", input).into());
    }

    let output_dir = if overwrite {
        input.to_path_buf()
    } else {
        output.unwrap_or_else(|| sibling_dir(input, "processed"))
    };

    let mut options = ProcessOptions::new(input, output_dir)
        .with_size(size)
        .with_only(only);
    if backup {
        options = options.with_backup(sibling_dir(input, "backup"));
    }

    println!("Processing sprites:");
    println!("  Input: {:?}", options.input_dir);
    println!("  Output: {:?}", options.output_dir);
    println!("  Size: {}x{}", size, size);
    if let Some(backup_dir) = &options.backup_dir {
        println!("  Backup: {:?}", backup_dir);
    }

    let report = process_directory(&options)?;

    println!(
        "Processed {} files: {} succeeded, {} failed",
        report.summary.total, report.summary.success, report.summary.failed
    );
    for file in report.files.iter().filter(|f| f.error.is_some()) {
        println!("  {}: {}", file.name, file.error.as_deref().unwrap_or_default());
    }

    Ok(())
}

fn generate_text(
    labels: &[TextLabel],
    output: &Path,
    options: &TextTextureOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Generating {} text textures into {:?}...", labels.len(), output);
    let batch = generate_text_textures(labels, output, options)?;

    for path in &batch.written {
        println!("  {:?}", path);
    }
    for (name, error) in &batch.failed {
        println!("  {}: {}", name, error);
    }
    println!("Succeeded: {}, failed: {}", batch.written.len(), batch.failed.len());

    if !batch.failed.is_empty() {
        return Err(format!("{} text textures failed", batch.failed.len()).into());
    }
    Ok(())
}

/// `dir` with `_suffix` appended to its final component.
fn sibling_dir(dir: &Path, suffix: &str) -> PathBuf {
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "images".to_string());
    dir.with_file_name(format!("{}_{}", name, suffix))
}
