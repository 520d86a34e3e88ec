use std::path::PathBuf;

use clap::{Parser, Subcommand};

use martview_core::{ClientConfig, DateRange};
use martview_report::LiveReportBuilder;

#[derive(Debug, Parser)]
#[command(name = "martview-cli")]
#[command(about = "Martview client reporting command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate a cross-platform report for a client and print it as JSON.
    Report {
        /// Path to the client configuration YAML file.
        #[arg(long)]
        client: PathBuf,
        /// Start of the reporting window (YYYY-MM-DD).
        #[arg(long)]
        start: String,
        /// End of the reporting window (YYYY-MM-DD).
        #[arg(long)]
        end: String,
    },
    /// Print the Google Analytics realtime snapshot for a property.
    Realtime {
        /// Google Analytics property id.
        #[arg(long)]
        property: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = martview_core::load_app_config()?;
    let builder = LiveReportBuilder::from_app_config(&config)?;

    match cli.command {
        Commands::Report { client, start, end } => {
            let client = ClientConfig::from_yaml_file(&client)?;
            let range = DateRange::new(start, end);
            let report = builder.generate(&client, &range).await;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Realtime { property } => {
            let snapshot = builder.realtime(&property).await;
            println!("{}", serde_json::to_string_pretty(&snapshot.data)?);
        }
    }

    Ok(())
}
