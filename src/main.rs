//! Dynamic Filter CLI
//!
//! Usage:
//!   dynamic-filter slug <TEXT> [--separator <C>]
//!   dynamic-filter render <TEMPLATE> [--record <FILE>]
//!   dynamic-filter check <TEMPLATE>
//!   dynamic-filter expand --filters <FILE> --records <FILE> [--grouped]
//!
//! Logging goes to stderr and follows `RUST_LOG`, or `-v` counts.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use serde_json::{Map, Value};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use dynamic_filter::{
    extract_fields_with_diagnostics, group_children, slug, Evaluator, FilterError, FilterSet,
    ParserConfig,
};

#[derive(Parser)]
#[command(name = "dynamic-filter")]
#[command(about = "Placeholder templates for filter domains")]
struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the slug of a text
    Slug {
        text: String,

        /// Separator placed between words
        #[arg(short, long, default_value_t = '-')]
        separator: char,
    },

    /// Substitute placeholders in a template with values from a JSON record
    Render {
        template: String,

        /// JSON object holding the record (template printed as is without one)
        #[arg(short, long)]
        record: Option<PathBuf>,
    },

    /// List the placeholders of a template and report rejected ones
    Check { template: String },

    /// Expand dynamic filters into child filters
    Expand {
        /// Filter declarations (TOML format)
        #[arg(short, long)]
        filters: PathBuf,

        /// JSON object mapping filter names to arrays of records
        #[arg(short, long)]
        records: PathBuf,

        /// Group the children by their parent filter
        #[arg(short, long)]
        grouped: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Slug { text, separator } => {
            println!("{}", slug(&text, separator));
            Ok(())
        }
        Command::Render { template, record } => run_render(&template, record.as_deref()),
        Command::Check { template } => {
            if !run_check(&template) {
                process::exit(1);
            }
            Ok(())
        }
        Command::Expand {
            filters,
            records,
            grouped,
        } => run_expand(&filters, &records, grouped),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,dynamic_filter=debug".to_string(),
            _ => "info,dynamic_filter=trace".to_string(),
        },
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(filter))
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn run_render(template: &str, record: Option<&Path>) -> Result<(), FilterError> {
    let record = record.map(read_json_object).transpose()?;

    let mut evaluator = Evaluator::new();
    let output = match &record {
        Some(record) => evaluator.parse(template, Some(record)),
        None => evaluator.parse(template, None),
    };
    println!("{}", output);
    Ok(())
}

/// Print the fields of `template`; returns false when any placeholder was rejected
fn run_check(template: &str) -> bool {
    let (fields, errors) = extract_fields_with_diagnostics(template, &ParserConfig::default());

    for field in &fields {
        println!("{}\t{}..{}", field.name(), field.start(), field.end());
    }
    for err in &errors {
        eprint!("{}", err.format(template, "template"));
    }

    errors.is_empty()
}

fn run_expand(filters: &Path, records: &Path, grouped: bool) -> Result<(), FilterError> {
    let set = FilterSet::from_file(filters)?;
    let records = read_json_object(records)?;

    let children = set.expand_all(&records)?;
    let output = if grouped {
        serde_json::to_string_pretty(&group_children(children))?
    } else {
        serde_json::to_string_pretty(&children)?
    };
    println!("{}", output);
    Ok(())
}

fn read_json_object(path: &Path) -> Result<Map<String, Value>, FilterError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
