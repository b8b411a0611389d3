mod display;

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use grievance_ai::{AliasTable, ClassifierClient, ClassifierConfig, Normalizer};
use grievance_core::{GeoPoint, GrievanceRecord};
use grievance_rank::{DashboardStats, Filters, SortKey, filter_and_sort, submitted_by};

#[derive(Parser)]
#[command(name = "grievance", version, about = "Grievance triage: dashboard ranking and AI classification")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Filter and order grievances as the dashboard does.
    Rank {
        /// JSON array of grievance documents.
        records: PathBuf,
        /// "All" or a status label ("Submitted", "In Progress", "Resolved").
        #[arg(long, default_value = "All")]
        status: String,
        /// "All" or an exact category name.
        #[arg(long, default_value = "All")]
        category: String,
        #[arg(long, default_value = "")]
        search: String,
        #[command(flatten)]
        order: OrderArgs,
    },
    /// Show one user's own grievances.
    Mine {
        records: PathBuf,
        #[arg(long)]
        user: String,
        /// "all" or a status label, compared ignoring case.
        #[arg(long, default_value = "all")]
        status: String,
        #[command(flatten)]
        order: OrderArgs,
    },
    /// Status counters for a set of grievances.
    Stats {
        records: PathBuf,
        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Normalize a raw AI classification reply (file or stdin).
    Normalize {
        input: Option<PathBuf>,
        #[command(flatten)]
        aliases: AliasArgs,
    },
    /// Classify a grievance with the remote model.
    Classify {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
        api_key: String,
        #[arg(long, env = "GEMINI_MODEL", default_value = grievance_ai::DEFAULT_MODEL)]
        model: String,
        #[arg(long, env = "GEMINI_BASE_URL", default_value = grievance_ai::DEFAULT_BASE_URL)]
        base_url: String,
        #[arg(long, default_value_t = 5)]
        max_retries: u32,
        #[command(flatten)]
        aliases: AliasArgs,
    },
    /// Print the department alias table in effect.
    Aliases {
        #[command(flatten)]
        aliases: AliasArgs,
        /// Print as JSON (loadable with --aliases).
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct OrderArgs {
    /// date, oldest, upvotes, priority, or nearest.
    #[arg(long, default_value = "date")]
    sort: SortKey,
    /// Viewer location as LAT,LON, used by --sort nearest.
    #[arg(long, value_parser = parse_geo_point, allow_hyphen_values = true)]
    near: Option<GeoPoint>,
    /// Emit JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct AliasArgs {
    /// Alias table JSON file; defaults to the builtin table.
    #[arg(long = "aliases", env = "GRIEVANCE_ALIASES")]
    path: Option<PathBuf>,
}

impl AliasArgs {
    fn load(&self) -> anyhow::Result<AliasTable> {
        match &self.path {
            Some(path) => AliasTable::from_path(path).context("loading alias table"),
            None => Ok(AliasTable::builtin()),
        }
    }
}

fn parse_geo_point(s: &str) -> Result<GeoPoint, String> {
    let (lat, lon) = s
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON, got {s:?}"))?;
    let lat: f64 = lat.trim().parse().map_err(|e| format!("latitude: {e}"))?;
    let lon: f64 = lon.trim().parse().map_err(|e| format!("longitude: {e}"))?;
    GeoPoint::new(lat, lon).ok_or_else(|| format!("coordinates out of range: {lat},{lon}"))
}

fn read_records(path: &Path) -> anyhow::Result<Vec<GrievanceRecord>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let records: Vec<GrievanceRecord> =
        serde_json::from_str(&json).with_context(|| format!("parsing {}", path.display()))?;
    tracing::info!(count = records.len(), path = %path.display(), "loaded grievances");
    Ok(records)
}

fn print_view(view: &[&GrievanceRecord], order: &OrderArgs) -> anyhow::Result<()> {
    if order.json {
        println!("{}", serde_json::to_string_pretty(view)?);
    } else {
        print!("{}", display::render_view(view, order.near));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!("grievance v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    match cli.command {
        Command::Rank {
            records,
            status,
            category,
            search,
            order,
        } => {
            let records = read_records(&records)?;
            let filters = Filters::from_selectors(&status, &category, &search)?;
            let view = filter_and_sort(&records, &filters, order.sort, order.near);
            print_view(&view, &order)?;
        }
        Command::Mine {
            records,
            user,
            status,
            order,
        } => {
            let records = read_records(&records)?;
            let filters = Filters::from_status_ignore_case(&status)?;
            let mut view = submitted_by(&records, &user);
            view.retain(|r| filters.matches(r));
            grievance_rank::sort(&mut view, order.sort, order.near);
            print_view(&view, &order)?;
        }
        Command::Stats { records, json } => {
            let records = read_records(&records)?;
            let stats = DashboardStats::from_records(&records);
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print!("{}", display::render_stats(&stats));
            }
        }
        Command::Normalize { input, aliases } => {
            let normalizer = Normalizer::new(aliases.load()?);
            let text = match input {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("reading stdin")?;
                    buf
                }
            };
            let result = normalizer.normalize_text(Some(&text));
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Classify {
            title,
            description,
            api_key,
            model,
            base_url,
            max_retries,
            aliases,
        } => {
            let mut config = ClassifierConfig::new(api_key);
            config.model = model;
            config.base_url = base_url;
            config.max_retries = max_retries;
            let client = ClassifierClient::new(config, Normalizer::new(aliases.load()?));
            let result = client.classify(&title, &description).await;
            print!("{}", display::render_classification(&result));
        }
        Command::Aliases { aliases, json } => {
            let table = aliases.load()?;
            if json {
                println!("{}", table.to_json_pretty()?);
            } else {
                print!("{}", display::render_aliases(&table));
            }
        }
    }

    Ok(())
}
