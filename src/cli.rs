// Veracity CLI binary

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use veracity::face::detect::LuminanceWindowDetector;
use veracity::feasibility;
use veracity::frame::Frame;
use veracity::motion::flow::BlockFlowEstimator;
use veracity::pipeline::{self, AnalysisConfig};

#[derive(Parser)]
#[command(name = "veracity")]
#[command(about = "Heuristic video authenticity analysis", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a directory of decoded frames (image files, sorted by name)
    Analyze {
        /// Directory containing the extracted frames
        frames: PathBuf,
        /// Sample every Nth frame for motion analysis
        #[arg(long)]
        step: Option<usize>,
        /// Outlier multiplier k for motion anomalies
        #[arg(short = 'k', long)]
        outlier: Option<f64>,
        /// Emit the full report as JSON
        #[arg(long)]
        json: bool,
        /// Print per-stage details
        #[arg(short, long)]
        verbose: bool,
    },

    /// Run the feasibility heuristic on a narrative
    Feasibility {
        /// Scene description to judge
        narrative: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            frames,
            step,
            outlier,
            json,
            verbose,
        } => cmd_analyze(&frames, step, outlier, json, verbose),
        Commands::Feasibility { narrative } => cmd_feasibility(&narrative),
    }
}

fn cmd_analyze(
    dir: &Path,
    step: Option<usize>,
    outlier: Option<f64>,
    json: bool,
    verbose: bool,
) -> Result<()> {
    let frames = load_frames(dir, verbose)?;

    let mut config = AnalysisConfig::default();
    if let Some(step) = step {
        config.motion.sample_step = step;
    }
    if let Some(k) = outlier {
        config.motion.outlier_multiplier = k;
    }

    let detector = LuminanceWindowDetector::default();
    let flow = BlockFlowEstimator::default();
    let report = pipeline::analyze_video(&frames, &config, &detector, &flow);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Frames analyzed:   {}", frames.len());
    println!("Motion samples:    {}", report.motion.total_frames);
    println!(
        "Motion anomalies:  {} (ratio {:.3})",
        report.motion.anomalies.len(),
        report.motion.anomaly_ratio
    );
    println!("Faces detected:    {}", report.faces.total_faces);
    println!(
        "Suspicious faces:  {} (ratio {:.3})",
        report.faces.suspicious_faces, report.faces.suspicious_ratio
    );
    if !report.faces.common_issues.is_empty() {
        let issues: Vec<&str> = report.faces.common_issues.iter().map(|s| s.as_str()).collect();
        println!("Common issues:     {}", issues.join(", "));
    }
    println!("Authenticity:      {:.2} - {}", report.score, report.label);

    if verbose {
        for sample in &report.motion.anomalies {
            eprintln!(
                "  anomaly at frame {}: mean motion {:.3}",
                sample.frame_index, sample.mean_motion
            );
        }
    }

    Ok(())
}

fn cmd_feasibility(narrative: &str) -> Result<()> {
    let assessment = feasibility::heuristic_assessment(narrative, None);
    println!("Verdict:     {}", assessment.verdict);
    println!("Explanation: {}", assessment.explanation);
    println!("Looks real:  {}", assessment.looks_real);
    println!("Looks fake:  {}", assessment.looks_fake);
    Ok(())
}

/// Load every image file in the directory as an RGB frame, sorted by file
/// name. Unreadable files are skipped with a warning so one bad frame never
/// aborts the run.
fn load_frames(dir: &Path, verbose: bool) -> Result<Vec<Frame>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("cannot read frame directory {}", dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    paths.sort();

    let mut frames = Vec::new();
    for path in paths {
        match image::open(&path) {
            Ok(img) => {
                let rgb = img.to_rgb8();
                let (width, height) = rgb.dimensions();
                let frame = Frame::new(width, height, rgb.into_raw())?;
                frames.push(frame);
            }
            Err(e) => {
                eprintln!("Skipping {}: {}", path.display(), e);
            }
        }
    }

    if verbose {
        eprintln!("Loaded {} frames from {}", frames.len(), dir.display());
    }

    Ok(frames)
}
