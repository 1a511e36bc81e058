mod render;

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;
use tharai_engine::{plan, Almanac, ChartBook, DayKey, FavorabilityChart, Plan, PlanOptions};

const DEFAULT_CHARTS: &str = "data/tharais.json";

#[derive(Parser)]
#[command(
    name = "tharai",
    version,
    about = "Plan favorable Panchang windows against a personal Tharai chart"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Exact windows where a favorable asterism meets a favorable period
    Overlaps(PlanArgs),
    /// Asterism windows grouped by the day they start, with a per-day verdict
    Asterisms(PlanArgs),
    /// Named periods listed on each day
    Periods(PlanArgs),
    /// Favorable asterisms and favorable periods side by side per day
    Summary(PlanArgs),
    /// Show one chart
    Chart {
        #[command(flatten)]
        chart: ChartArgs,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// List the charts in a chart book
    Charts {
        /// Chart book JSON file
        #[arg(long, default_value = DEFAULT_CHARTS)]
        charts: PathBuf,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[derive(Args)]
struct ChartArgs {
    /// Chart book JSON file
    #[arg(long, default_value = DEFAULT_CHARTS)]
    charts: PathBuf,
    /// Chart name, usually the birth asterism (case-insensitive)
    #[arg(long)]
    chart: String,
}

#[derive(Args)]
struct PlanArgs {
    /// Almanac JSON written by the page extractor
    #[arg(long)]
    almanac: PathBuf,
    #[command(flatten)]
    chart: ChartArgs,
    /// First day to consider (YYYY-MM-DD); all days when omitted
    #[arg(long)]
    start: Option<NaiveDate>,
    /// Number of days from --start
    #[arg(long, default_value_t = 5, requires = "start")]
    days: u32,
    /// Intersect asterism windows under the day they start instead of the day listed
    #[arg(long)]
    by_start_date: bool,
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Text,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(cli.command, &mut out)?;
    out.flush()?;
    Ok(())
}

fn run<W: Write>(command: Command, out: &mut W) -> Result<()> {
    match command {
        Command::Overlaps(args) => {
            let (plan, format) = run_plan(&args)?;
            match format {
                Format::Json => render::write_json(out, &plan.overlaps)?,
                Format::Text => render::write_overlaps(out, &plan.overlaps)?,
            }
        }
        Command::Asterisms(args) => {
            let (plan, format) = run_plan(&args)?;
            match format {
                Format::Json => render::write_json(out, &plan.verdicts)?,
                Format::Text => render::write_verdicts(out, &plan.verdicts)?,
            }
        }
        Command::Periods(args) => {
            let (plan, format) = run_plan(&args)?;
            match format {
                Format::Json => render::write_json(out, &plan.periods)?,
                Format::Text => render::write_periods(out, &plan.periods)?,
            }
        }
        Command::Summary(args) => {
            let (plan, format) = run_plan(&args)?;
            match format {
                Format::Json => render::write_json(out, &plan.summaries)?,
                Format::Text => render::write_summaries(out, &plan.summaries)?,
            }
        }
        Command::Chart { chart, format } => {
            let book = load_chart_book(&chart.charts)?;
            let selected = select_chart(&book, &chart.chart)?;
            match format {
                Format::Json => render::write_json(out, selected)?,
                Format::Text => render::write_chart(out, &chart.chart, selected)?,
            }
        }
        Command::Charts { charts, format } => {
            let book = load_chart_book(&charts)?;
            match format {
                Format::Json => render::write_json(out, &book.names())?,
                Format::Text => render::write_chart_names(out, &book.names())?,
            }
        }
    }
    Ok(())
}

fn run_plan(args: &PlanArgs) -> Result<(Plan, Format)> {
    let book = load_chart_book(&args.chart.charts)?;
    let chart = select_chart(&book, &args.chart.chart)?;

    let mut almanac = load_almanac(&args.almanac)?;
    if let Some(start) = args.start {
        almanac = almanac.window(start, args.days);
        info!("window {start} + {} days: {} almanac days", args.days, almanac.len());
    }

    let options = PlanOptions {
        day_key: if args.by_start_date {
            DayKey::Start
        } else {
            DayKey::Listed
        },
    };
    Ok((plan(&almanac, chart, &options), args.format))
}

fn load_chart_book(path: &Path) -> Result<ChartBook> {
    let file = File::open(path)
        .with_context(|| format!("failed to open chart book {}", path.display()))?;
    ChartBook::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to read chart book {}", path.display()))
}

fn load_almanac(path: &Path) -> Result<Almanac> {
    let file = File::open(path)
        .with_context(|| format!("failed to open almanac {}", path.display()))?;
    Almanac::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to read almanac {}", path.display()))
}

fn select_chart<'a>(book: &'a ChartBook, name: &str) -> Result<&'a FavorabilityChart> {
    book.get(name).ok_or_else(|| {
        anyhow!(
            "unknown chart '{}'; available charts: {}",
            name,
            book.names().join(", ")
        )
    })
}
