//! shopboard - E-commerce analytics dashboard

mod cli;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use shopboard_core::models::Segment;
use shopboard_core::store::{self, SessionState};
use shopboard_core::{Selection, SourceConfig, View};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "shopboard",
    version,
    about = "E-commerce analytics dashboard",
    long_about = "Computes dashboard metrics and chart-ready series from the precomputed\n\
                  e-commerce tables (orders, customer segments, lifetime value).\n\
                  \n\
                  The dataset is loaded once per invocation; filters narrow it without\n\
                  ever mutating the loaded tables.\n\
                  \n\
                  Examples:\n\
                    shopboard summary                          # Metrics for the starter selection\n\
                    shopboard summary --category electronics   # Narrow to one category\n\
                    shopboard view product --pretty            # Product-analysis frame as JSON\n\
                    shopboard view trends --from 2024-01-01 --to 2024-06-30\n\
                  \n\
                  Environment Variables:\n\
                    SHOPBOARD_DATA_DIR                         # Override the data directory"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Directory holding the three source tables
    #[arg(long, env = "SHOPBOARD_DATA_DIR", default_value = "./data", global = true)]
    data_dir: PathBuf,

    /// Verbose logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Print summary metrics for a selection
    Summary(SelectionArgs),
    /// Emit a chart-ready view frame as JSON
    View {
        /// Dashboard tab to render
        #[arg(value_enum)]
        tab: Tab,

        #[command(flatten)]
        selection: SelectionArgs,

        /// Pretty-print the JSON frame
        #[arg(long)]
        pretty: bool,
    },
}

#[derive(Args)]
struct SelectionArgs {
    /// Start date YYYY-MM-DD (default: first order date)
    #[arg(long)]
    from: Option<String>,

    /// End date YYYY-MM-DD (default: last order date)
    #[arg(long)]
    to: Option<String>,

    /// Product category to include (repeatable; default: starter set)
    #[arg(long = "category")]
    categories: Vec<String>,

    /// Customer segment to include (repeatable; default: starter set)
    #[arg(long = "segment")]
    segments: Vec<String>,

    /// Churn threshold in days (clamped to 30-365)
    #[arg(long, default_value_t = store::DEFAULT_CHURN_THRESHOLD)]
    churn_threshold: u32,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Tab {
    /// RFM scatter and churn-risk pie
    Customer,
    /// Activity heatmap and revenue treemap
    Product,
    /// Daily revenue line
    Trends,
}

impl From<Tab> for View {
    fn from(tab: Tab) -> Self {
        match tab {
            Tab::Customer => View::CustomerInsights,
            Tab::Product => View::ProductAnalysis,
            Tab::Trends => View::EconomicTrends,
        }
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.verbose);

    match &args.command {
        Command::Summary(selection) => {
            let state = build_session(&args.data_dir, selection)?;
            cli::print_summary(&state);
            Ok(())
        }
        Command::View {
            tab,
            selection,
            pretty,
        } => {
            let mut state = build_session(&args.data_dir, selection)?;
            state.set_active_view((*tab).into());
            cli::print_frame(&state, *pretty)
        }
    }
}

/// Load the shared snapshot and build one session over it from CLI flags
fn build_session(data_dir: &Path, args: &SelectionArgs) -> Result<SessionState> {
    let config = SourceConfig::from_dir(data_dir);
    let dataset = store::snapshot(&config)
        .with_context(|| format!("failed to load dataset from {}", data_dir.display()))?;

    // Reject typo'd segment labels up front; inside the core an unknown
    // label just selects nothing.
    for label in &args.segments {
        if Segment::from_label(label).is_none() {
            bail!(
                "unknown segment '{}'; expected one of: {}",
                label,
                Segment::ALL.map(|s| s.label()).join(", ")
            );
        }
    }

    let defaults = store::default_selection(&dataset);

    let from = args
        .from
        .clone()
        .unwrap_or_else(|| defaults.date_from.to_string());
    let to = args
        .to
        .clone()
        .unwrap_or_else(|| defaults.date_to.to_string());
    let categories: Vec<String> = if args.categories.is_empty() {
        defaults.categories.iter().cloned().collect()
    } else {
        args.categories.clone()
    };
    let segments: Vec<String> = if args.segments.is_empty() {
        store::DEFAULT_SEGMENTS
            .map(|s| s.label().to_string())
            .to_vec()
    } else {
        args.segments.clone()
    };

    let selection = Selection::parse(&from, &to, &categories, &segments)?;

    let mut state = SessionState::new(dataset, selection);
    state.set_churn_threshold(args.churn_threshold);
    Ok(state)
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let default_directive = match verbose {
        0 => "warn",
        1 => "shopboard=debug,shopboard_core=debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
