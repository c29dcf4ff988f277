use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use reject_check::{
    compare, Config, JsonStore, Pipeline, PostgresStore, RejectedAd, ReportLayout, Store,
};

#[derive(Parser)]
#[command(name = "reject-check")]
#[command(about = "Google Ads rejection report pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file
    #[arg(long, default_value = ".reject-check/config.yml")]
    config: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Process export files into a rejection report
    Process {
        /// Export files to process
        files: Vec<PathBuf>,

        /// Directory to scan for *.csv export files
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Team identifier
        #[arg(long)]
        team: String,

        /// Run date (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Persist the run's records to the store
        #[arg(long)]
        save: bool,

        /// Report layout (overrides config)
        #[arg(long, value_enum)]
        layout: Option<ReportLayout>,

        /// Report output directory (overrides config)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// PostgreSQL connection string; the JSON store is used when absent
        #[arg(long, env = "DATABASE_URL")]
        database_url: Option<String>,
    },

    /// Diff a day's rejections against a prior day
    Compare {
        /// Team identifier
        #[arg(long)]
        team: String,

        /// Day to inspect (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Day to diff against (defaults to the day before)
        #[arg(long)]
        against: Option<NaiveDate>,

        /// PostgreSQL connection string; the JSON store is used when absent
        #[arg(long, env = "DATABASE_URL")]
        database_url: Option<String>,
    },

    /// Run PostgreSQL migrations
    Migrate {
        #[arg(long, env = "DATABASE_URL")]
        database_url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("reject_check=info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            files,
            dir,
            team,
            date,
            save,
            layout,
            output_dir,
            database_url,
        } => {
            run_process(
                cli.config,
                files,
                dir,
                team,
                date,
                save,
                layout,
                output_dir,
                database_url,
            )
            .await?;
        }
        Commands::Compare {
            team,
            date,
            against,
            database_url,
        } => {
            run_compare(cli.config, team, date, against, database_url).await?;
        }
        Commands::Migrate { database_url } => {
            let store = PostgresStore::new(&database_url).await?;
            store.migrate().await?;
            println!("Migrations complete.");
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn run_process(
    config_path: PathBuf,
    mut files: Vec<PathBuf>,
    dir: Option<PathBuf>,
    team: String,
    date: Option<NaiveDate>,
    save: bool,
    layout: Option<ReportLayout>,
    output_dir: Option<PathBuf>,
    database_url: Option<String>,
) -> Result<()> {
    let mut config = Config::load(&config_path)?;

    if let Some(dir) = dir {
        files.extend(discover_exports(&dir)?);
    }
    if files.is_empty() {
        anyhow::bail!("No input files. Pass file paths or --dir");
    }

    if let Some(layout) = layout {
        config.report.layout = layout;
    }
    if let Some(output_dir) = output_dir {
        config.report.output_dir = output_dir;
    }

    let run_date = date.unwrap_or_else(|| Local::now().date_naive());

    let pipeline = Pipeline::from_config(&config);
    let outcome = pipeline.run(&team, &files, run_date)?;

    if save {
        match database_url {
            Some(url) => {
                let store = PostgresStore::new(&url).await?;
                store.save(run_date, &team, &outcome.records).await?;
            }
            None => {
                let store = JsonStore::new(&config.store.path)?;
                store.save(run_date, &team, &outcome.records)?;
            }
        }
        println!("Saved {} rejected ads for {}.", outcome.records.len(), run_date);
    }

    println!("Report: {}", outcome.report_path.display());
    for (campaign, entries) in outcome.groups.iter() {
        println!("  {} - {} rejected ads", campaign, entries.len());
    }
    if outcome.groups.is_empty() {
        println!("  No rejected ads found.");
    }

    Ok(())
}

async fn run_compare(
    config_path: PathBuf,
    team: String,
    date: Option<NaiveDate>,
    against: Option<NaiveDate>,
    database_url: Option<String>,
) -> Result<()> {
    let config = Config::load(&config_path)?;

    let date = date.unwrap_or_else(|| Local::now().date_naive());
    let against = match against {
        Some(day) => day,
        None => date.pred_opt().context("Date has no previous day")?,
    };

    let (today, yesterday) = match database_url {
        Some(url) => {
            let store = PostgresStore::new(&url).await?;
            (
                store.query(date, &team).await?,
                store.query(against, &team).await?,
            )
        }
        None => {
            let store = JsonStore::new(&config.store.path)?;
            (store.query(date, &team)?, store.query(against, &team)?)
        }
    };

    let result = compare(&today, &yesterday);

    println!("Comparing {} against {} for {}:\n", date, against, team);
    print_records(&format!("New rejections ({})", result.new.len()), &result.new);
    print_records(
        &format!("Resolved rejections ({})", result.resolved.len()),
        &result.resolved,
    );

    Ok(())
}

fn print_records(heading: &str, records: &[RejectedAd]) {
    println!("{heading}:");
    if records.is_empty() {
        println!("  (none)");
    }
    for record in records {
        println!("  {} / {}({})", record.campaign, record.ad_name, record.reasons);
    }
    println!();
}

/// Discover export files in a directory, in file-name order
fn discover_exports(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = dir.join("*.csv");
    let pattern = pattern
        .to_str()
        .context("Input directory path is not valid UTF-8")?;

    let mut paths = Vec::new();
    for entry in glob::glob(pattern).context("Invalid input directory")? {
        paths.push(entry?);
    }
    paths.sort();

    Ok(paths)
}
