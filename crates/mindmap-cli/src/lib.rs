//! CLI logic for the mindmap converter.
//!
//! Walks an input directory for map exports, converts each one, and writes
//! the results under the output directory at the same relative path.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Format};

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::{debug, error, info};
use rand::{SeedableRng, rngs::StdRng};
use walkdir::WalkDir;

use mindmap::{MapConverter, MindmapError, text::TextMeasurer};

/// Run the mindmap CLI application
///
/// Every `.json` file below the input directory is loaded, converted into
/// the requested shape, and written as pretty-printed JSON to the mirrored
/// path below the output directory. Missing output directories are created.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Stops at the first failing document and returns its `MindmapError`:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed documents
/// - Broken connection references
/// - Measurement errors
pub fn run(args: &Args) -> Result<(), MindmapError> {
    info!(
        input_dir = args.input,
        output_dir = args.output,
        format:? = args.format;
        "Processing maps"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let converter = MapConverter::new(app_config);
    let measurer = converter.measurer();
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let input = Path::new(&args.input);
    let output = Path::new(&args.output);
    let mut converted = 0;

    for path in collect_maps(input)? {
        let relative = path.strip_prefix(input).map_err(io::Error::other)?;
        let target = output.join(relative);

        if let Err(err) = convert_file(args, &converter, &measurer, &mut rng, &path, &target) {
            error!(path = path.display().to_string(); "Failed to convert map");
            return Err(err);
        }
        converted += 1;
    }

    info!(converted; "Maps converted successfully");

    Ok(())
}

/// Returns every `.json` file below `dir`, sorted by path.
fn collect_maps(dir: &Path) -> Result<Vec<PathBuf>, MindmapError> {
    let mut maps = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().and_then(|s| s.to_str()) == Some("json")
        {
            maps.push(path.to_path_buf());
        }
    }
    debug!(count = maps.len(); "Found map exports");
    Ok(maps)
}

fn convert_file(
    args: &Args,
    converter: &MapConverter,
    measurer: &TextMeasurer,
    rng: &mut StdRng,
    source: &Path,
    target: &Path,
) -> Result<(), MindmapError> {
    info!(path = source.display().to_string(); "Converting map");

    let json = fs::read_to_string(source)?;
    let mut document = converter.load(&json)?;
    if args.rewrite_ids {
        document = converter.rewrite_ids(document)?;
    }

    let rendered = match args.format {
        Format::Archive => serde_json::to_string_pretty(&converter.archive(&document)?),
        Format::Graph => serde_json::to_string_pretty(&converter.graph(&document, measurer, rng)?),
    }
    .map_err(MindmapError::Serialize)?;

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(target, rendered)?;

    debug!(path = target.display().to_string(); "Map written");
    Ok(())
}
