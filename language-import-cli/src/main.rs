use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use config_template::ConfigTemplate;
use language_import::{
    generate_csv_template, parse_delimiter, write_error_report, LocalFile, ParseConfig,
    ParseResult, ProcessingOutcome, Processor, RowOutcome, TEMPLATE_FILE_NAME,
};
use std::{fs, path::PathBuf};
use tracing::{info, warn, Level};

mod config_template;

const DEFAULT_CONFIG_FILE: &str = "language-import.jsonc";

/// Language CSV Import
/// Parses and validates bulk-import CSV files of language records
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output for detailed processing information
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and validate a language import CSV file
    Parse {
        /// Path to the CSV file to import
        #[arg(value_name = "PATH TO CSV")]
        input: PathBuf,

        /// Parse config file (JSON, comments allowed)
        #[arg(short, long, value_name = "PATH TO CONFIG")]
        config: Option<PathBuf>,

        /// Field delimiter (single character)
        #[arg(short, long)]
        delimiter: Option<String>,

        /// Maximum number of data rows to process
        #[arg(long)]
        max_rows: Option<usize>,

        /// Maximum file size in bytes
        #[arg(long)]
        max_file_size: Option<u64>,

        /// Required column; repeat for several (replaces the configured list)
        #[arg(short = 'r', long = "require", value_name = "COLUMN")]
        required_columns: Vec<String>,

        /// Output format for the parse result
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Write row-level errors and warnings to this CSV file
        #[arg(short, long, value_name = "OUTPUT PATH")]
        errors_out: Option<PathBuf>,

        /// Exit with an error status when any row has an error
        #[arg(short, long)]
        strict: bool,
    },
    /// Write a blank import template with an example row
    Template {
        /// Taxonomy column to append; repeat for several
        #[arg(short, long = "taxonomy", value_name = "NAME")]
        taxonomies: Vec<String>,

        /// Output path for the template (default: stdout)
        #[arg(short, long, value_name = "OUTPUT PATH")]
        output: Option<PathBuf>,
    },
    /// Generate a parse config template
    GenerateConfig {
        /// Type of config template to generate (minimal/full)
        #[arg(short = 't', long = "type", default_value = "full")]
        template_type: String,

        /// Output path for the generated config
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE, value_name = "OUTPUT PATH")]
        output: PathBuf,
    },
    /// Validate a parse config file
    ValidateConfig {
        /// Path to the config file to validate
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE, value_name = "PATH TO CONFIG")]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging with appropriate level
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Parse {
            input,
            config,
            delimiter,
            max_rows,
            max_file_size,
            required_columns,
            format,
            errors_out,
            strict,
        } => {
            let config = build_config(
                config,
                delimiter,
                max_rows,
                max_file_size,
                required_columns,
            )?;
            parse_command(&input, config, format, errors_out, strict).await
        }
        Commands::Template { taxonomies, output } => template_command(&taxonomies, &output),
        Commands::GenerateConfig {
            template_type,
            output,
        } => generate_config_command(&template_type, &output),
        Commands::ValidateConfig { config } => validate_config_command(&config),
    }
}

fn build_config(
    path: Option<PathBuf>,
    delimiter: Option<String>,
    max_rows: Option<usize>,
    max_file_size: Option<u64>,
    required_columns: Vec<String>,
) -> Result<ParseConfig> {
    let mut config = match path {
        Some(path) => ParseConfig::from_file(&path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => ParseConfig::default(),
    };

    if let Some(delimiter) = delimiter {
        config.delimiter = parse_delimiter(&delimiter)?;
    }
    if let Some(max_rows) = max_rows {
        config.max_rows = max_rows;
    }
    if let Some(max_file_size) = max_file_size {
        config.max_file_size = max_file_size;
    }
    if !required_columns.is_empty() {
        config.required_columns = required_columns;
    }

    config.validate().context("Invalid parse configuration")?;
    Ok(config)
}

async fn parse_command(
    input: &PathBuf,
    config: ParseConfig,
    format: OutputFormat,
    errors_out: Option<PathBuf>,
    strict: bool,
) -> Result<()> {
    if strict {
        info!("Running in strict mode");
    }

    let source = LocalFile::open(input)
        .await
        .with_context(|| format!("Cannot open import file: {}", input.display()))?;

    let processor = Processor::new(config);
    info!(
        "Parsing {} (max {} rows, delimiter {:?})",
        input.display(),
        processor.config().max_rows,
        processor.config().delimiter
    );
    let result = processor.process(Some(&source)).await?;

    match format {
        OutputFormat::Text => print_summary(&result),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }

    if let Some(path) = errors_out {
        let file = fs::File::create(&path)
            .with_context(|| format!("Failed to create error report: {}", path.display()))?;
        write_error_report(&result, file)?;
        info!("Wrote error report to: {}", path.display());
    }

    let outcome = ProcessingOutcome::from_result(&result);
    match &outcome {
        ProcessingOutcome::Success => info!("All {} rows are valid", result.total_rows),
        ProcessingOutcome::SuccessWithWarnings(warnings) => {
            info!("All rows are valid, with {} warnings", warnings)
        }
        ProcessingOutcome::Failure { errors, warnings } => warn!(
            "{} of {} rows have errors ({} errors, {} warnings)",
            result.total_rows - result.valid_rows,
            result.total_rows,
            errors,
            warnings
        ),
    }

    if strict && outcome.is_failure() {
        anyhow::bail!("Import file has rows with errors");
    }
    Ok(())
}

fn print_summary(result: &ParseResult) {
    println!("Columns: {}", result.headers.join(", "));
    println!(
        "Rows: {} processed, {} valid",
        result.total_rows, result.valid_rows
    );

    let issues_by_row = result.issues_by_row();
    let error_rows = result.error_rows();
    for outcome in &result.rows {
        let row_number = outcome.row_number();
        let issues = issues_by_row
            .get(&row_number)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let marker = if error_rows.contains(&row_number) {
            "ERROR"
        } else if !issues.is_empty() {
            "WARN "
        } else {
            "OK   "
        };
        match outcome {
            RowOutcome::Parsed(row) => println!("  [{}] row {}: {}", marker, row_number, row.name),
            RowOutcome::Failed(_) => println!("  [{}] row {}: <unreadable>", marker, row_number),
        }
        for issue in issues {
            println!("         {} {}: {}", issue.severity, issue.field, issue.message);
        }
    }
}

fn template_command(taxonomies: &[String], output: &Option<PathBuf>) -> Result<()> {
    let template = generate_csv_template(taxonomies);

    match output {
        Some(path) => {
            let full_file_output_path = if path.is_dir() {
                path.join(TEMPLATE_FILE_NAME)
            } else {
                path.clone()
            };
            fs::write(&full_file_output_path, format!("{}\n", template)).context(format!(
                "Failed to write template to: {}",
                full_file_output_path.display()
            ))?;
            info!(
                "Successfully generated import template at: {}",
                full_file_output_path.display()
            );
        }
        None => println!("{}", template),
    }
    Ok(())
}

fn generate_config_command(template_type: &str, output: &PathBuf) -> Result<()> {
    let template = match template_type.to_lowercase().as_str() {
        "minimal" => ConfigTemplate::Minimal,
        "full" => ConfigTemplate::Full,
        _ => anyhow::bail!("Invalid template type. Must be either 'minimal' or 'full'"),
    };

    info!("Generating {} config template...", template_type);

    // if output is a directory, append the default file name
    let full_file_output_path = if output.is_dir() {
        output.join(DEFAULT_CONFIG_FILE)
    } else {
        output.into()
    };

    fs::write(&full_file_output_path, template.content())
        .context(format!("Failed to write config to: {}", output.display()))?;

    info!(
        "Successfully generated config template at: {}",
        full_file_output_path.display()
    );
    Ok(())
}

fn validate_config_command(config_path: &PathBuf) -> Result<()> {
    info!("Validating config...");

    if !config_path.exists() {
        anyhow::bail!(
            "Config file not found: {}. Try using --config <PATH TO CONFIG>",
            config_path.display()
        );
    }

    let config = ParseConfig::from_file(config_path)
        .context("Failed to parse config. See errors for additional details:")?;

    config.validate().context("Failed to validate config")?;

    info!("Config validation successful");
    info!(
        "Max file size: {} bytes, max rows: {}, delimiter: {:?}",
        config.max_file_size, config.max_rows, config.delimiter
    );
    info!("Required columns: {}", config.required_columns.join(", "));
    Ok(())
}
