//! grainscan: batch driver for segmented-raster shape analysis.
//!
//! Scans a directory for binary-segmented images (by filename suffix),
//! runs each through the analysis core, and prints per-file component
//! counts, chain codes, and shape statistics. Useful for:
//!
//! - Measuring grain-size distributions across a batch of segmentations
//! - Comparing the cell-count and polygon measures for each shape
//! - Exporting boundary SVGs and chain-code text for other tools
//!
//! # Usage
//!
//! ```text
//! cargo run --release --bin grainscan -- [OPTIONS] <DIRECTORY>
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;

use grainscan_analysis::{AnalysisConfig, BatchStatistics, FileReport, analyze};
use grainscan_export::{SvgMetadata, to_chain_text, to_svg};

/// Batch shape analysis for binary-segmented raster images.
///
/// Finds every file in the given directory whose name ends with the
/// configured suffix, analyzes it, and prints per-file shape
/// statistics (two area measures, two perimeter measures).
#[derive(Parser)]
#[command(name = "grainscan", version)]
struct Cli {
    /// Directory containing the segmented input images.
    directory: PathBuf,

    /// Filename suffix identifying batch inputs.
    #[arg(long, default_value = "_seg_bin.pgm")]
    suffix: String,

    /// Foreground threshold: pixels strictly above it are object.
    #[arg(long, default_value_t = AnalysisConfig::DEFAULT_FOREGROUND_THRESHOLD)]
    threshold: u8,

    /// Keep components touching the image border instead of dropping them.
    #[arg(long)]
    keep_border: bool,

    /// Write one boundary SVG per input file into this directory.
    #[arg(long)]
    svg_dir: Option<PathBuf>,

    /// Write one chain-code text file per input file into this directory.
    #[arg(long)]
    chains_dir: Option<PathBuf>,

    /// Output all reports as JSON instead of the human-readable report.
    #[arg(long)]
    json: bool,
}

/// One file's analysis output, as serialized in `--json` mode.
#[derive(Serialize)]
struct FileSummary {
    file: String,
    report: FileReport,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = AnalysisConfig {
        foreground_threshold: cli.threshold,
        keep_border_components: cli.keep_border,
    };

    let files = match scan_directory(&cli.directory, &cli.suffix) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("Error reading {}: {e}", cli.directory.display());
            return ExitCode::FAILURE;
        }
    };

    if !cli.json {
        println!("*****************************");
        println!("Number of files found: {}", files.len());
        println!("*****************************");
    }

    // Reports are only retained in JSON mode; otherwise each one is
    // printed and dropped as the batch progresses.
    let mut summaries = Vec::new();
    let mut processed = 0usize;
    for path in &files {
        let image_bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                eprintln!("Error reading {}: {e}", path.display());
                continue;
            }
        };

        let report = match analyze(&image_bytes, &config) {
            Ok(report) => report,
            Err(e) => {
                eprintln!("Error analyzing {}: {e}", path.display());
                continue;
            }
        };
        processed += 1;

        if let Some(ref svg_dir) = cli.svg_dir {
            write_boundary_svg(svg_dir, path, &report);
        }
        if let Some(ref chains_dir) = cli.chains_dir {
            write_chain_text(chains_dir, path, &report);
        }

        if cli.json {
            summaries.push(FileSummary {
                file: path.display().to_string(),
                report,
            });
        } else {
            print_report(path, &report);
        }
    }

    if cli.json {
        match serde_json::to_string_pretty(&summaries) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing reports: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    if files.is_empty() || processed > 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Collect all files in `directory` whose names end with `suffix`,
/// sorted for deterministic batch order. Not recursive.
fn scan_directory(directory: &Path, suffix: &str) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(directory)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(suffix));
        if matches {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Print the human-readable per-file report.
fn print_report(path: &Path, report: &FileReport) {
    println!();
    println!("=============================");
    println!("Processing file: {}", path.display());
    println!("-----------------------------");
    println!(
        "Initial number of connected components: {}",
        report.initial_components,
    );
    println!("Number of components removed: {}", report.border_components);
    println!(
        "Final number of connected components: {}",
        report.shapes.len() + report.skipped.len(),
    );
    println!("-----------------------------");

    for shape in &report.shapes {
        let start = shape.chain.start();
        println!(
            "Component {}: chain code {} {} {}",
            shape.label,
            start.x,
            start.y,
            shape.chain.directions(),
        );
    }
    for skip in &report.skipped {
        println!("Component {} skipped: {}", skip.label, skip.reason);
    }

    let stats = report.statistics();
    print_statistics("Cell-count area", &stats.cell_count_area);
    print_statistics("Polygon area", &stats.polygon_area);
    print_statistics("Cell-count perimeter", &stats.cell_count_perimeter);
    print_statistics("Polygon perimeter", &stats.polygon_perimeter);
    println!("=============================");
}

/// Print one labeled statistics block.
fn print_statistics(label: &str, stats: &BatchStatistics) {
    println!("-----------------------------");
    println!("{label}:");
    println!("  Count:              {}", stats.count);
    println!("  Average:            {:.4}", stats.mean);
    println!("  Median:             {:.4}", stats.median);
    println!("  Minimum:            {:.4}", stats.min);
    println!("  Maximum:            {:.4}", stats.max);
    println!("  Standard Deviation: {:.4}", stats.stddev);
}

/// Write the boundary polygons of one file as `<stem>_boundary.svg`.
fn write_boundary_svg(svg_dir: &Path, input: &Path, report: &FileReport) {
    let stem = file_stem(input);
    let polygons: Vec<_> = report.shapes.iter().map(|s| s.polygon.clone()).collect();
    let metadata = SvgMetadata {
        title: Some(&stem),
        description: None,
    };
    let svg = to_svg(&polygons, report.dimensions, &metadata);

    let out_path = svg_dir.join(format!("{stem}_boundary.svg"));
    match std::fs::write(&out_path, &svg) {
        Ok(()) => eprintln!("SVG written to {} ({} bytes)", out_path.display(), svg.len()),
        Err(e) => eprintln!("Error writing SVG to {}: {e}", out_path.display()),
    }
}

/// Write the closed chain codes of one file as `<stem>_chains.txt`.
fn write_chain_text(chains_dir: &Path, input: &Path, report: &FileReport) {
    let stem = file_stem(input);
    let chains: Vec<_> = report.shapes.iter().map(|s| s.chain.clone()).collect();
    let text = to_chain_text(&chains);

    let out_path = chains_dir.join(format!("{stem}_chains.txt"));
    match std::fs::write(&out_path, &text) {
        Ok(()) => eprintln!("Chain codes written to {}", out_path.display()),
        Err(e) => eprintln!("Error writing chains to {}: {e}", out_path.display()),
    }
}

/// Filename without its extension, for deriving output names.
fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .to_owned()
}
