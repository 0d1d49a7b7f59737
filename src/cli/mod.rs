//! Command-line interface for rust_dge

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "rust_dge")]
#[command(version)]
#[command(about = "Two-group differential gene expression analysis with volcano, heatmap and PCA tables")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the differential expression analysis
    #[command(
        long_about = "Run the differential expression analysis.\n\n\
            For every gene: Student's t-test (pooled variance, two-sided) between the\n\
            control and disease samples, log2 fold change of the group means, then\n\
            Benjamini-Hochberg correction across all genes.",
        after_long_help = "\
Examples:
  rust_dge run -i expression.csv --control C1,C2,C3 --disease D1,D2,D3

  rust_dge run -i expression.tsv --control C1,C2 --disease D1,D2 \\
    -o dge_results.csv --json dge_results.json"
    )]
    Run {
        /// Path to expression matrix CSV/TSV file
        #[arg(short, long,
            long_help = "Path to the normalized expression matrix.\n\
                Format: first column = gene IDs, first row = sample IDs, numeric cells.\n\
                Supports both CSV (comma) and TSV (tab) delimiters (auto-detected).")]
        input: String,

        /// Control sample labels (comma separated)
        #[arg(long, value_delimiter = ',', required = true)]
        control: Vec<String>,

        /// Disease sample labels (comma separated)
        #[arg(long, value_delimiter = ',', required = true)]
        disease: Vec<String>,

        /// Output CSV path [default: dge_results.csv]
        #[arg(short, long, default_value = "dge_results.csv")]
        output: String,

        /// Also write the table as JSON to this path
        #[arg(long)]
        json: Option<String>,

        /// Raw p-value threshold used in the printed summary [default: 0.05]
        #[arg(short, long, default_value = "0.05")]
        alpha: f64,

        /// Number of threads (0 = auto) [default: 0]
        #[arg(short = 't', long, default_value = "0")]
        threads: usize,
    },

    /// Classify genes for a volcano plot
    #[command(
        long_about = "Classify genes as up-regulated, down-regulated or not significant.\n\n\
            Uses the raw p-value: up if p < p-threshold and log2FC > lfc-threshold,\n\
            down if p < p-threshold and log2FC < -lfc-threshold."
    )]
    Volcano {
        /// Results CSV written by `run`
        #[arg(short, long, default_value = "dge_results.csv")]
        results: String,

        /// Output TSV path [default: volcano.tsv]
        #[arg(short, long, default_value = "volcano.tsv")]
        output: String,

        /// Raw p-value threshold [default: 0.05]
        #[arg(long, default_value = "0.05")]
        p_threshold: f64,

        /// Absolute log2 fold change threshold [default: 1.0]
        #[arg(long, default_value = "1.0")]
        lfc_threshold: f64,
    },

    /// Z-scored expression of significant genes for a heatmap
    #[command(
        long_about = "Select genes with raw p-value below the threshold and z-score each\n\
            gene across all samples of the expression matrix.",
        after_long_help = "\
Examples:
  rust_dge heatmap -i expression.csv -r dge_results.csv --p-threshold 0.01"
    )]
    Heatmap {
        /// Path to expression matrix CSV/TSV file
        #[arg(short, long)]
        input: String,

        /// Results CSV written by `run`
        #[arg(short, long, default_value = "dge_results.csv")]
        results: String,

        /// Output TSV path [default: heatmap.tsv]
        #[arg(short, long, default_value = "heatmap.tsv")]
        output: String,

        /// Raw p-value threshold [default: 0.05]
        #[arg(long, default_value = "0.05")]
        p_threshold: f64,
    },

    /// Principal component analysis of samples
    Pca {
        /// Path to expression matrix CSV/TSV file
        #[arg(short, long)]
        input: String,

        /// Output TSV path [default: pca.tsv]
        #[arg(short, long, default_value = "pca.tsv")]
        output: String,

        /// Number of components [default: 2]
        #[arg(short = 'n', long, default_value = "2")]
        components: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from([
            "rust_dge", "run", "-i", "x.csv", "--control", "C1,C2", "--disease", "D1,D2", "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Run { control, disease, output, .. } => {
                assert_eq!(control, vec!["C1", "C2"]);
                assert_eq!(disease, vec!["D1", "D2"]);
                assert_eq!(output, "dge_results.csv");
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_run_requires_groups() {
        assert!(Cli::try_parse_from(["rust_dge", "run", "-i", "x.csv", "--control", "C1"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
