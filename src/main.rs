//! rust_dge command-line interface

use clap::Parser;
use log::{info, warn, LevelFilter};

use rust_dge::cli::{Cli, Commands};
use rust_dge::prelude::*;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    if std::env::args().len() == 1 {
        print_no_args();
        return;
    }

    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();

    let result = match cli.command {
        Commands::Run {
            input,
            control,
            disease,
            output,
            json,
            alpha,
            threads,
        } => run_analysis(&input, &control, &disease, &output, json.as_deref(), alpha, threads),
        Commands::Volcano {
            results,
            output,
            p_threshold,
            lfc_threshold,
        } => run_volcano(&results, &output, p_threshold, lfc_threshold),
        Commands::Heatmap {
            input,
            results,
            output,
            p_threshold,
        } => run_heatmap(&input, &results, &output, p_threshold),
        Commands::Pca {
            input,
            output,
            components,
        } => run_pca(&input, &output, components),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn print_no_args() {
    println!("rust_dge v{}", VERSION);
    println!("Run `rust_dge -h` for usage or `rust_dge --help` for detailed information.");
}

// ---------------------------------------------------------------------------
// Subcommand implementations
// ---------------------------------------------------------------------------

fn load_matrix(path: &str) -> Result<ExpressionMatrix> {
    info!("Loading expression matrix from: {}", path);
    let matrix = read_expression_matrix(path)?;
    info!("  {} genes, {} samples", matrix.n_genes(), matrix.n_samples());
    Ok(matrix)
}

fn run_analysis(
    input_path: &str,
    control: &[String],
    disease: &[String],
    output_path: &str,
    json_path: Option<&str>,
    alpha: f64,
    threads: usize,
) -> Result<()> {
    if threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .ok();
    }

    let matrix = load_matrix(input_path)?;

    let selection = GroupSelection {
        control: control.to_vec(),
        disease: disease.to_vec(),
    };
    info!(
        "Comparing disease [{}] against control [{}]",
        selection.disease.join(", "),
        selection.control.join(", ")
    );

    let table = differential_expression(&matrix, &selection)?;
    if table.is_empty() {
        warn!("Expression matrix has no genes; writing an empty results table");
    }

    info!("Writing results to: {}", output_path);
    write_results(output_path, &table)?;

    if let Some(path) = json_path {
        info!("Writing JSON results to: {}", path);
        write_results_json(path, &table)?;
    }

    info!("\n{}", table.summary(alpha));
    info!("Done!");
    Ok(())
}

fn run_volcano(results_path: &str, output_path: &str, p_threshold: f64, lfc_threshold: f64) -> Result<()> {
    info!("Loading results from: {}", results_path);
    let table = read_results(results_path)?;

    let thresholds = VolcanoThresholds {
        p_value: p_threshold,
        log2_fold_change: lfc_threshold,
    };
    let points = volcano_points(&table, &thresholds);
    let summary = volcano_summary(&points);
    info!(
        "Volcano (p < {}, |log2FC| > {}): {} up, {} down, {} not significant",
        p_threshold, lfc_threshold, summary.upregulated, summary.downregulated, summary.not_significant
    );

    info!("Writing volcano table to: {}", output_path);
    write_volcano(output_path, &points)?;
    Ok(())
}

fn run_heatmap(input_path: &str, results_path: &str, output_path: &str, p_threshold: f64) -> Result<()> {
    let matrix = load_matrix(input_path)?;
    info!("Loading results from: {}", results_path);
    let table = read_results(results_path)?;

    let params = HeatmapParams {
        p_value_threshold: p_threshold,
    };
    match heatmap_matrix(&matrix, &table, &params)? {
        Some(heatmap) => {
            info!("Writing heatmap table to: {}", output_path);
            write_heatmap(output_path, &heatmap)?;
        }
        None => {
            warn!("Nothing to render; no heatmap written");
        }
    }
    Ok(())
}

fn run_pca(input_path: &str, output_path: &str, components: usize) -> Result<()> {
    let matrix = load_matrix(input_path)?;

    let result = pca(&matrix, &PcaParams { n_components: components })?;
    for (i, ratio) in result.explained_variance_ratio.iter().enumerate() {
        info!("  PC{}: {:.2}% of variance", i + 1, ratio * 100.0);
    }

    info!("Writing PCA coordinates to: {}", output_path);
    write_pca(output_path, &result)?;
    Ok(())
}
