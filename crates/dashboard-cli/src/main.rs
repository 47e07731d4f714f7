//! Terminal stock dashboard
//!
//! ```bash
//! export PERPLEXITY_API_KEY="pplx-..."
//! stock-dashboard --symbol NVDA --range "3 months"
//! stock-dashboard --interactive
//! ```

use anyhow::Context;
use clap::{CommandFactory, FromArgMatches, Parser, ValueEnum};
use dashboard_stock::{
    DEFAULT_SYMBOL, Dashboard, DashboardConfig, EXAMPLE_SYMBOLS, JsonRenderer, Language,
    PageRenderer, RenderOptions, RenderStatus, Selection, TextRenderer, TimeRange,
};
use std::io::{self, BufRead, IsTerminal, Write};
use std::process::ExitCode;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "stock-dashboard", version)]
#[command(about = "Price history, key metrics and an AI analysis for one stock", long_about = None)]
struct Args {
    /// Ticker symbol
    #[arg(short, long, default_value = DEFAULT_SYMBOL)]
    symbol: String,

    /// History window: 1 week, 1 month, 3 months, 6 months, 1 year, 2 years (or 1wk .. 2y)
    #[arg(short, long, default_value = "1 month")]
    range: TimeRange,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Analysis language (en, zh); overrides DASHBOARD_LANGUAGE
    #[arg(short, long)]
    language: Option<Language>,

    /// Skip the AI analysis
    #[arg(long)]
    no_analysis: bool,

    /// Disable ANSI colours
    #[arg(long)]
    no_color: bool,

    /// Keep asking for symbols after the first page
    #[arg(short, long)]
    interactive: bool,

    /// Line width for charts
    #[arg(long, default_value_t = 100)]
    width: usize,
}

impl Args {
    fn parse_with_examples() -> anyhow::Result<Self> {
        let matches = Self::command().after_help(symbol_examples()).get_matches();
        Ok(Self::from_arg_matches(&matches)?)
    }

    fn renderer(&self) -> Box<dyn PageRenderer> {
        match self.format {
            OutputFormat::Json => Box::new(JsonRenderer { pretty: true }),
            OutputFormat::Text => Box::new(TextRenderer::new(RenderOptions {
                color: !self.no_color && io::stdout().is_terminal(),
                width: self.width,
                ..RenderOptions::default()
            })),
        }
    }
}

fn symbol_examples() -> String {
    let mut text = String::from("Symbol examples:\n");
    for (name, symbol) in EXAMPLE_SYMBOLS {
        text.push_str(&format!("  {symbol:<6} {name}\n"));
    }
    text
}

fn print_banner() {
    println!("Stock Analysis Dashboard");
    println!();
    print!("{}", symbol_examples());
    println!();
    println!("Enter `SYMBOL [RANGE]`, e.g. `tsla 6 months`.");
    println!("  /ranges  list the history windows");
    println!("  /quit    exit");
    println!();
}

fn print_ranges() {
    for range in TimeRange::ALL {
        println!("  {:<9} ({})", range.label(), range.period());
    }
}

async fn run_interactive(
    dashboard: &Dashboard,
    renderer: &dyn PageRenderer,
    first: Selection,
) -> anyhow::Result<ExitCode> {
    print_banner();

    let page = dashboard.render(&first).await;
    println!("{}", renderer.render(&page)?);

    let mut range = first.range;
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("[{range}] symbol> ");
        stdout.flush()?;

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => {
                println!();
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {e}");
                continue;
            }
        }

        match input.trim() {
            "/quit" | "/exit" => break,
            "/ranges" => {
                print_ranges();
                continue;
            }
            _ => {}
        }

        let selection = match Selection::parse_line(&input, range) {
            Ok(selection) => selection,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };
        range = selection.range;

        let page = dashboard.render(&selection).await;
        println!("{}", renderer.render(&page)?);
    }

    println!("Goodbye!");
    Ok(ExitCode::SUCCESS)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    // `.env` may set RUST_LOG, so it is read before tracing starts and
    // reported after
    let env_file = dashboard_utils::load_dotenv();
    dashboard_utils::init_tracing(dashboard_utils::DEFAULT_FILTER);

    let args = Args::parse_with_examples()?;
    match env_file.context("failed to load .env file")? {
        Some(path) => info!(path = %path.display(), "loaded environment file"),
        None => debug!("no .env file found"),
    }

    let mut config = DashboardConfig::from_env().context("invalid configuration")?;
    if let Some(language) = args.language {
        config.analysis.language = language;
    }
    if config.has_placeholder_key() && !args.no_analysis {
        warn!("PERPLEXITY_API_KEY is not set; the analysis request will be rejected");
    }

    let mut dashboard = Dashboard::from_config(&config).context("failed to build clients")?;
    if args.no_analysis {
        dashboard = dashboard.without_analysis();
    }

    let renderer = args.renderer();
    let selection = Selection::new(&args.symbol, args.range);

    if args.interactive {
        return run_interactive(&dashboard, renderer.as_ref(), selection).await;
    }

    let page = dashboard.render(&selection).await;
    print!("{}", renderer.render(&page)?);

    Ok(if page.status == RenderStatus::Failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["stock-dashboard"]).unwrap();
        assert_eq!(args.symbol, "AAPL");
        assert_eq!(args.range, TimeRange::OneMonth);
        assert_eq!(args.format, OutputFormat::Text);
        assert_eq!(args.language, None);
        assert!(!args.interactive);
    }

    #[test]
    fn test_range_and_language_flags() {
        let args = Args::try_parse_from([
            "stock-dashboard",
            "--symbol",
            "nvda",
            "--range",
            "6mo",
            "--language",
            "zh",
            "--format",
            "json",
            "--no-analysis",
        ])
        .unwrap();

        assert_eq!(args.range, TimeRange::SixMonths);
        assert_eq!(args.language, Some(Language::Chinese));
        assert_eq!(args.format, OutputFormat::Json);
        assert!(args.no_analysis);
    }

    #[test]
    fn test_unknown_range_is_rejected() {
        assert!(Args::try_parse_from(["stock-dashboard", "--range", "5y"]).is_err());
    }

    #[test]
    fn test_help_lists_examples() {
        let examples = symbol_examples();
        for (_, symbol) in EXAMPLE_SYMBOLS {
            assert!(examples.contains(symbol));
        }
    }

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }
}
