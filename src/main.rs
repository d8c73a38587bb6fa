use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use marine_telex::{
    CurrentsConfig, Decoder, DownloadConfig, TelexConfig, fetch_currents,
    download_images, format_messages, http, logging,
};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Report language of the built-in catalogs (en, ru)
    #[arg(short, long, global = true)]
    locale: Option<String>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a bulletin file and print the report.
    ///
    /// The report is also written to the output file.
    Decode {
        /// Bulletin text file
        input: PathBuf,
        /// Report output path
        #[arg(short, long, default_value = "output.txt")]
        output: PathBuf,
        /// Print decoded messages as JSON instead of the text report
        #[arg(long)]
        json: bool,
    },
    /// Fetch an ocean-currents JSON document and print it
    Currents {
        url: String,
    },
    /// Download imagery into a directory
    Images {
        /// Image URLs
        #[arg(required = true)]
        urls: Vec<String>,
        /// Output directory (defaults to network.images_dir)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
}

fn log_level(verbose: u8, configured: &str) -> &str {
    match verbose {
        0 => configured,
        1 => "debug",
        _ => "trace",
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = TelexConfig::load_from_path(cli.config.clone())?;
    if let Some(locale) = &cli.locale {
        config.locale.language = locale.clone();
        config.locale.catalog_path = None;
        config.validate()?;
    }

    logging::init(
        Some(log_level(cli.verbose, &config.logging.level)),
        &config.logging.format,
    );
    debug!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Decode {
            input,
            output,
            json,
        } => decode(&config, &input, &output, json),
        Commands::Currents { url } => {
            let client = http::client(&config.network.user_agent)?;
            let value = fetch_currents(&client, &CurrentsConfig::new(url)).await?;
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        Commands::Images { urls, dir } => {
            let client = http::client(&config.network.user_agent)?;
            let download = DownloadConfig {
                urls,
                output_dir: Some(dir.unwrap_or_else(|| PathBuf::from(&config.network.images_dir))),
            };
            let written = download_images(&client, &download).await?;
            for path in written {
                println!("{}", path.display());
            }
            Ok(())
        }
    }
}

fn decode(config: &TelexConfig, input: &Path, output: &Path, json: bool) -> Result<()> {
    let catalog = config.catalog().context("Failed to load label catalog")?;
    let stations = config
        .station_table()
        .context("Failed to load station table")?;
    let decoder = Decoder::new(Arc::new(catalog), Arc::new(stations));
    let labels = decoder.translator();

    info!("Decoding {:?}", input);
    let text = fs::read_to_string(input).map_err(|e| {
        anyhow!(labels.translate("error_read_file", &[("message", e.to_string().as_str())]))
    })?;

    let messages = decoder.decode(&text);
    let report = if json {
        serde_json::to_string_pretty(&messages)?
    } else {
        format_messages(&messages, labels)
    };
    print!("{report}");

    fs::write(output, &report).map_err(|e| {
        anyhow!(labels.translate("error_write_file", &[("message", e.to_string().as_str())]))
    })?;
    let path = output.display().to_string();
    eprintln!(
        "{}",
        labels.translate("success_output_written", &[("path", path.as_str())])
    );
    Ok(())
}
