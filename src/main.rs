// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use mail_anonymize::utils::logging::{format_error, format_step, format_success, format_warning};
use mail_anonymize::{Config, FileScanner, ParquetExporter, PipelineOrchestrator, Validator};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "mail_anonymize")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Clean and anonymize a raw email corpus into a Parquet dataset", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline (the default when no subcommand is given)
    Run {
        #[arg(short, long, value_name = "DIR")]
        input: Option<PathBuf>,

        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[arg(long, value_name = "NUM")]
        limit: Option<usize>,

        #[arg(long)]
        no_progress: bool,
    },

    /// Print the schema, row count and leading rows of a produced dataset
    Inspect {
        file: PathBuf,

        #[arg(short, long, default_value_t = 5)]
        rows: usize,
    },

    /// Validate the configuration and the input directory
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    mail_anonymize::utils::logging::init_logger(cli.color, cli.verbose);
    colored::control::set_override(cli.color);

    info!("Mail Anonymize Pipeline");
    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    let command = cli.command.unwrap_or(Commands::Run {
        input: None,
        output: None,
        limit: None,
        no_progress: false,
    });

    match command {
        Commands::Run {
            input,
            output,
            limit,
            no_progress,
        } => {
            cmd_run(config, input, output, limit, no_progress, cli.color)?;
        }
        Commands::Inspect { file, rows } => {
            cmd_inspect(&file, rows)?;
        }
        Commands::Check => {
            cmd_check(&config)?;
        }
    }

    Ok(())
}

fn cmd_run(
    mut config: Config,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    limit: Option<usize>,
    no_progress: bool,
    colored: bool,
) -> Result<()> {
    if let Some(input) = input {
        config.input.maildir_path = input;
    }
    if let Some(output) = output {
        config.output.path = output;
    }
    if limit.is_some() {
        config.pipeline.limit = limit;
    }
    if no_progress {
        config.pipeline.show_progress = false;
    }

    let orchestrator = PipelineOrchestrator::new(config)
        .context("Failed to initialize pipeline")?
        .with_color(colored);

    let stats = orchestrator.run().context("Pipeline run failed")?;
    let output_path = orchestrator.config().output.path.display().to_string();

    println!(
        "{}",
        format_success(&format!(
            "Preprocessing complete! {} rows written to {}",
            stats.rows_written, output_path
        ))
    );
    println!(
        "{}",
        format_step(
            1,
            3,
            &format!(
                "{} files scanned ({} skipped), {} parsed, {} unreadable",
                stats.files_scanned,
                stats.files_skipped,
                stats.emails_parsed,
                stats.parse_failures
            )
        )
    );
    println!(
        "{}",
        format_step(
            2,
            3,
            &format!("{} rows dropped with empty text", stats.rows_dropped_empty)
        )
    );
    let redaction_line = format!(
        "{} texts kept unredacted after anonymization failures",
        stats.anonymization_failures
    );
    if stats.anonymization_failures > 0 {
        println!("{}", format_warning(&redaction_line));
    } else {
        println!("{}", format_step(3, 3, &redaction_line));
    }

    Ok(())
}

fn cmd_inspect(file: &Path, rows: usize) -> Result<()> {
    info!("Inspecting dataset: {}", file.display());

    let summary = ParquetExporter::read_summary(file, rows)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    println!("File:    {}", summary.path.display());
    println!("Columns: {}", summary.columns.join(", "));
    println!("Rows:    {}", summary.num_rows);

    for (idx, row) in summary.preview.iter().enumerate() {
        println!();
        println!(
            "[{}] sender: {}",
            idx,
            row.sender.as_deref().unwrap_or("<null>")
        );
        println!("    text:   {}", Validator::truncate_text(&row.text.replace('\n', " "), 160));
    }

    Ok(())
}

fn cmd_check(config: &Config) -> Result<()> {
    info!("Checking configuration");

    if let Err(e) = config.validate() {
        println!("{}", format_error(&e.to_string()));
        return Err(e).context("Configuration is invalid");
    }

    println!(
        "{}",
        serde_json::to_string_pretty(config).context("Failed to render configuration")?
    );

    let scanner = FileScanner::new(config.input.clone());
    match scanner.scan_directory(&config.input.maildir_path) {
        Ok(report) => {
            println!(
                "{}",
                format_success(&format!(
                    "Input directory {} holds {} candidate files ({} skipped)",
                    config.input.maildir_path.display(),
                    report.files.len(),
                    report.skipped
                ))
            );
            Ok(())
        }
        Err(e) => {
            println!("{}", format_error(&e.to_string()));
            Err(e).context("Input directory check failed")
        }
    }
}
