//! covid-scenes CLI
//!
//! Works directly on the local CSV dataset:
//! - Summarize the data
//! - List states
//! - Render a scene's chart to SVG
//! - Generate a config file

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use covid_scenes::aggregate::{latest_state_snapshot, national_series};
use covid_scenes::config::{generate_default_config, Config};
use covid_scenes::dataset::{Dataset, DatasetLoader};
use covid_scenes::format::{format_count, format_date};
use covid_scenes::logging;
use covid_scenes::scenes::{render_scene, Scene};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "covid-scenes-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inspect the COVID-19 dataset and render scene charts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// CSV dataset (default: from config)
    #[arg(short, long, global = true)]
    pub data: Option<PathBuf>,

    /// Config file (default: search the usual locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Dataset overview and the states with the most cases
    Summary {
        /// Number of states to list
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// List all states
    States,

    /// Render a scene's chart as SVG
    Render {
        /// Scene number (1-3, clamped)
        #[arg(short, long, allow_negative_numbers = true)]
        scene: i64,
        /// State for scene 3 (default: first state)
        #[arg(long)]
        state: Option<String>,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct Summary {
    records: usize,
    states: usize,
    first_date: Option<String>,
    last_date: Option<String>,
    national_total: Option<i64>,
    top_states: Vec<StateRow>,
}

#[derive(Serialize)]
struct StateRow {
    state: String,
    total_cases: i64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = logging::bootstrap(|| Config::resolve(cli.config.as_deref()))
        .context("Loading configuration")?;
    logging::init(&config.logging);

    let data_path = cli
        .data
        .unwrap_or_else(|| PathBuf::from(&config.data.csv_path));

    match cli.command {
        Commands::Summary { limit } => {
            let dataset = load_dataset(&data_path)?;
            let summary = summarize(&dataset, limit);
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
                OutputFormat::Csv => write_csv(&summary.top_states)?,
                OutputFormat::Table => print_summary(&summary),
            }
        }

        Commands::States => {
            let dataset = load_dataset(&data_path)?;
            match cli.format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(dataset.state_names())?)
                }
                OutputFormat::Csv => {
                    let mut writer = csv::Writer::from_writer(std::io::stdout());
                    writer.write_record(["state"])?;
                    for state in dataset.state_names() {
                        writer.write_record([state])?;
                    }
                    writer.flush()?;
                }
                OutputFormat::Table => {
                    if dataset.state_names().is_empty() {
                        println!("No states in dataset");
                    }
                    for state in dataset.state_names() {
                        println!("{}", state);
                    }
                }
            }
        }

        Commands::Render {
            scene,
            state,
            output,
        } => {
            let dataset = load_dataset(&data_path)?;
            let scene = Scene::clamped(scene.saturating_sub(1));
            let chart = match render_scene(&dataset, scene, state.as_deref()) {
                Some(chart) => chart,
                None => match state {
                    Some(name) => bail!("State '{}' is not in the dataset", name),
                    None => bail!("The dataset has no states to show"),
                },
            };

            let svg = chart.to_svg();
            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, svg)?;
                    println!("{} written to {:?}", scene.indicator(), path);
                }
                None => println!("{}", svg),
            }
        }

        Commands::Config { output } => write_config(output.as_deref())?,
    }

    Ok(())
}

fn load_dataset(path: &Path) -> anyhow::Result<Dataset> {
    DatasetLoader::new()
        .load_path(path)
        .with_context(|| format!("Failed to load COVID-19 data from {:?}", path))
}

fn write_config(output: Option<&Path>) -> anyhow::Result<()> {
    let config = generate_default_config();

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &config)?;
            println!("Config written to {:?}", path);
        }
        None => {
            print!("{}", config);
        }
    }
    Ok(())
}

fn summarize(dataset: &Dataset, limit: usize) -> Summary {
    let extent = dataset.date_extent();
    let snapshot = latest_state_snapshot(dataset);

    Summary {
        records: dataset.len(),
        states: dataset.state_names().len(),
        first_date: extent.map(|(first, _)| format_date(first)),
        last_date: extent.map(|(_, last)| format_date(last)),
        national_total: national_series(dataset).last().map(|p| p.total_cases),
        top_states: snapshot
            .entries
            .into_iter()
            .take(limit)
            .map(|entry| StateRow {
                state: entry.state,
                total_cases: entry.total_cases,
            })
            .collect(),
    }
}

fn print_summary(summary: &Summary) {
    println!("Records: {}", format_count(summary.records as i64));
    println!("States:  {}", summary.states);

    match (&summary.first_date, &summary.last_date) {
        (Some(first), Some(last)) => println!("Dates:   {} - {}", first, last),
        _ => {
            println!("Dataset is empty");
            return;
        }
    }

    if let Some(total) = summary.national_total {
        println!("National total at latest date: {}", format_count(total));
    }

    println!();
    println!("{:<4} {:<24} {:>14}", "#", "State", "Total cases");
    println!("{}", "-".repeat(44));
    for (rank, row) in summary.top_states.iter().enumerate() {
        println!(
            "{:<4} {:<24} {:>14}",
            rank + 1,
            row.state,
            format_count(row.total_cases)
        );
    }
}

fn write_csv(rows: &[StateRow]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(std::io::stdout());
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
