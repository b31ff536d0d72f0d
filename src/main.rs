use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;
use wifi_portal::application::controller::PortalController;
use wifi_portal::domain::package::Catalog;
use wifi_portal::error::PortalError;
use wifi_portal::infrastructure::simulated::SimulatedGateway;
use wifi_portal::interfaces::csv::catalog_reader::CatalogReader;
use wifi_portal::interfaces::json::view_writer::ViewWriter;
use wifi_portal::interfaces::script::command_reader::{CommandReader, PortalCommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Event script to replay (reads stdin when omitted)
    script: Option<PathBuf>,

    /// CSV file replacing the built-in package catalog
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// How long the simulated payment takes, in milliseconds
    #[arg(long, default_value_t = 3000)]
    payment_delay_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let catalog = match cli.catalog {
        Some(path) => {
            let file = File::open(path).into_diagnostic()?;
            CatalogReader::new(file).read_catalog().into_diagnostic()?
        }
        None => Catalog::default(),
    };

    let gateway = SimulatedGateway::new(Duration::from_millis(cli.payment_delay_ms));
    info!(
        delay_ms = gateway.delay().as_millis() as u64,
        packages = catalog.len(),
        "portal ready"
    );
    let mut controller = PortalController::new(catalog, Arc::new(gateway));

    let source: Box<dyn BufRead> = match cli.script {
        Some(path) => Box::new(BufReader::new(File::open(path).into_diagnostic()?)),
        None => Box::new(io::stdin().lock()),
    };

    let stdout = io::stdout();
    let mut writer = ViewWriter::new(stdout.lock());

    for command in CommandReader::new(source).commands() {
        let command = match command {
            Ok(command) => command,
            Err(e @ PortalError::IoError(_)) => return Err(e).into_diagnostic(),
            Err(e) => {
                eprintln!("Error reading command: {}", e);
                continue;
            }
        };

        let outcome = match command {
            PortalCommand::List => {
                writer
                    .write_packages(controller.catalog().list_packages())
                    .into_diagnostic()?;
                continue;
            }
            PortalCommand::Select(id) => controller.select_package(&id).map(|_| ()),
            PortalCommand::Cancel => controller.cancel().map(|_| ()),
            PortalCommand::Pay(phone) => controller.submit_phone(phone).map(|_| ()),
            PortalCommand::Wait => controller.wait_for_payment().await.map(|_| ()),
            PortalCommand::Dismiss => controller.dismiss().map(|_| ()),
            PortalCommand::Retry => controller.retry().map(|_| ()),
            PortalCommand::View => controller.poll_payment().map(|_| ()),
        };

        if let Err(e) = outcome {
            eprintln!("Error processing command: {}", e);
            continue;
        }
        writer.write_view(&controller.view()).into_diagnostic()?;
    }

    Ok(())
}
