//! Decilab CLI — download ticker returns and classify record prices.
//!
//! Commands:
//! - `download` — fetch monthly returns from Tiingo and store the raw JSON
//! - `classify` — import purchase records from CSV, order them by the
//!   product→customer→date→document→line chain, and report each record's
//!   price decile

mod config;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use decilab_core::data::{
    download_tickers, parse_csv, FieldMap, JsonStore, StdoutProgress, TiingoProvider,
};
use decilab_core::domain::{
    by_customer, by_date, by_document_line_number, by_document_number, by_product, ordered_by,
};
use decilab_core::stats::{Counter, DecileError, Deciles};

use config::DownloadConfig;

#[derive(Parser)]
#[command(
    name = "decilab",
    about = "Decilab CLI — price-return decile classification"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download monthly ticker returns from Tiingo and store the raw JSON.
    Download {
        /// Tickers to download (e.g., VFINX VTSMX). Overrides the config list.
        tickers: Vec<String>,

        /// TOML config file with `api_token` and `tickers`.
        #[arg(long)]
        config: Option<PathBuf>,

        /// API token. Overrides the config token.
        #[arg(long)]
        token: Option<String>,

        /// End date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        end: Option<String>,

        /// Store directory. Defaults to ./data/{YYYYMMDD}.
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Import purchase records from CSV, order them, and report price deciles.
    Classify {
        /// CSV file of purchase records.
        #[arg(long)]
        input: PathBuf,

        /// Header rows to skip.
        #[arg(long, default_value_t = 1)]
        header_rows: usize,

        /// Keep duplicate decile boundaries instead of collapsing them.
        #[arg(long, default_value_t = false)]
        no_dedup: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Download {
            tickers,
            config,
            token,
            end,
            out_dir,
        } => run_download(tickers, config, token, end, out_dir),
        Commands::Classify {
            input,
            header_rows,
            no_dedup,
        } => run_classify(&input, header_rows, !no_dedup),
    }
}

fn run_download(
    tickers: Vec<String>,
    config_path: Option<PathBuf>,
    token: Option<String>,
    end: Option<String>,
    out_dir: Option<PathBuf>,
) -> Result<()> {
    let config = config_path
        .as_deref()
        .map(DownloadConfig::from_file)
        .transpose()?;

    let tickers = if tickers.is_empty() {
        config
            .as_ref()
            .map(|c| c.tickers.clone())
            .unwrap_or_default()
    } else {
        tickers
    };
    if tickers.is_empty() {
        bail!("no tickers given — pass them as arguments or via --config");
    }

    let token = token
        .or_else(|| config.map(|c| c.api_token))
        .context("no API token — pass --token or set api_token in --config")?;

    let end_date = end
        .as_deref()
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()?
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let out_dir = out_dir.unwrap_or_else(|| {
        PathBuf::from("data").join(chrono::Local::now().format("%Y%m%d").to_string())
    });

    let provider = TiingoProvider::new(token);
    let store = JsonStore::new(out_dir);
    let ticker_refs: Vec<&str> = tickers.iter().map(String::as_str).collect();

    let summary = download_tickers(&provider, &store, &ticker_refs, end_date, &StdoutProgress);

    if !summary.all_succeeded() {
        for (ticker, err) in &summary.errors {
            eprintln!("Error for {ticker}: {err}");
        }
        std::process::exit(1);
    }

    Ok(())
}

fn run_classify(input: &Path, header_rows: usize, deduplicate: bool) -> Result<()> {
    let mut records = parse_csv(input, header_rows, &FieldMap::default())?;
    if records.is_empty() {
        bail!("no records in {}", input.display());
    }

    ordered_by(vec![
        by_product,
        by_customer,
        by_date,
        by_document_number,
        by_document_line_number,
    ])
    .sort(&mut records);

    let prices: Vec<f64> = records.iter().map(|r| r.price).collect();
    let counted = Counter::count(&prices);
    let mut deciles = Deciles::from_counts(&counted, deduplicate);

    println!(
        "{:>6} {:<20} {:<10} {:<12} {:>12} {:>5} {:>10} {:>7}",
        "uuid", "product", "customer", "date", "document", "line", "price", "decile"
    );

    let mut out_of_range = 0usize;
    for record in &records {
        let decile_col = match deciles.lookup_value(record.price) {
            Ok((decile, warning)) => {
                if let Some(w) = warning {
                    eprintln!("warning: decile table repaired before lookup ({w:?})");
                }
                decile.to_string()
            }
            Err(DecileError::ValueNotFound) => {
                out_of_range += 1;
                "-".to_string()
            }
            Err(e) => return Err(e.into()),
        };

        println!(
            "{:>6} {:<20} {:<10} {:<12} {:>12} {:>5} {:>10.2} {:>7}",
            record.uuid,
            record.product_id,
            record.customer_id,
            record.purchase_date.format("%Y-%m-%d").to_string(),
            record.document_number,
            record.document_line_number,
            record.price,
            decile_col
        );
    }

    if out_of_range > 0 {
        eprintln!("{out_of_range} record(s) priced above the decile range");
    }

    Ok(())
}
