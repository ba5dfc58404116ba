//! Print transition plans for a sequence of analysed tracks
//!
//! Usage: transition-report <features>... [--config <path>] [--json]
//!
//! Each feature file is a YAML (or JSON) track feature document. With two
//! files a single transition is planned; with more, every adjacent pair is
//! analysed as a playlist. Set RUST_LOG=debug to trace the search.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use serde::Serialize;

use mesh_transition::config::{default_config_path, load_config, EngineConfig};
use mesh_transition::features::load_features;
use mesh_transition::{
    format_instructions, score, CompatibilityScore, FeatureVector, TransitionAnalysis,
    TransitionAnalyzer,
};

#[derive(Serialize)]
struct TransitionReport<'a> {
    from: &'a str,
    to: &'a str,
    compatibility: CompatibilityScore,
    analysis: &'a TransitionAnalysis,
}

struct Args {
    tracks: Vec<PathBuf>,
    config: Option<PathBuf>,
    json: bool,
}

fn parse_args() -> Result<Args> {
    let mut tracks = Vec::new();
    let mut config = None;
    let mut json = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => json = true,
            "--config" => {
                let path = args.next().context("--config requires a path")?;
                config = Some(PathBuf::from(path));
            }
            _ => tracks.push(PathBuf::from(arg)),
        }
    }

    if tracks.len() < 2 {
        bail!("Usage: transition-report <features>... [--config <path>] [--json] (at least two tracks)");
    }
    Ok(Args { tracks, config, json })
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args = parse_args()?;

    let config_path = args.config.clone().unwrap_or_else(default_config_path);
    let config: EngineConfig = load_config(&config_path);

    let tracks: Vec<FeatureVector> = args
        .tracks
        .iter()
        .map(|path| load_features(path))
        .collect::<Result<_>>()?;
    log::info!("Loaded {} tracks", tracks.len());

    let analyzer = TransitionAnalyzer::new(config.search.clone());
    let pool = config.build_thread_pool()?;
    let analyses = pool.install(|| analyzer.analyze_playlist(&tracks));

    let names: Vec<String> = args
        .tracks
        .iter()
        .map(|p| p.display().to_string())
        .collect();

    if args.json {
        let reports: Vec<TransitionReport> = analyses
            .iter()
            .enumerate()
            .map(|(i, analysis)| TransitionReport {
                from: &names[i],
                to: &names[i + 1],
                compatibility: score(&tracks[i], &tracks[i + 1]),
                analysis,
            })
            .collect();
        let json = serde_json::to_string_pretty(&reports).context("Failed to serialize report")?;
        println!("{}", json);
        return Ok(());
    }

    for (i, analysis) in analyses.iter().enumerate() {
        let compatibility = score(&tracks[i], &tracks[i + 1]);
        println!("{} -> {}", names[i], names[i + 1]);
        println!(
            "  compatibility {:.2} (tempo {:.2}, key {:.2}, energy {:.2}, spectral {:.2}, rhythm {:.2})",
            compatibility.overall,
            compatibility.tempo,
            compatibility.key,
            compatibility.energy,
            compatibility.spectral,
            compatibility.rhythm
        );
        for line in format_instructions(analysis, &tracks[i], &tracks[i + 1]) {
            println!("  - {}", line);
        }
        println!();
    }

    Ok(())
}
