use card_issuer::application::workflow::CardWorkflow;
use card_issuer::config::{DEFAULT_MAX_GENERATION_ATTEMPTS, EngineConfig};
use card_issuer::domain::actor::{Actor, Role};
use card_issuer::domain::generator::{self, CardNumberGenerator};
use card_issuer::domain::network::{CardNetwork, NetworkPolicy};
use card_issuer::infrastructure::in_memory::InMemoryCardStore;
use card_issuer::interfaces::csv::card_writer::{CardWriter, write_json};
use card_issuer::interfaces::csv::command_reader::CommandReader;
use card_issuer::logging;
use clap::{Parser, Subcommand, ValueEnum};
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::warn;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Issue unknown networks as VISA instead of rejecting them
    #[arg(long, global = true, env = "CARD_ISSUER_LENIENT_NETWORKS")]
    lenient_networks: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print freshly generated card numbers
    Generate {
        #[arg(long, default_value = "VISA")]
        network: String,

        #[arg(long, default_value_t = 1)]
        count: usize,
    },
    /// Check a card number's length and check digit
    Validate {
        number: String,

        #[arg(long)]
        network: Option<String>,
    },
    /// Run a CSV file of application commands and print the resulting cards
    Process {
        /// Input commands CSV file
        input: PathBuf,

        #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,

        /// Candidate numbers tried per application before giving up
        #[arg(long, env = "CARD_ISSUER_MAX_ATTEMPTS", default_value_t = DEFAULT_MAX_GENERATION_ATTEMPTS)]
        max_attempts: u32,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

fn policy(lenient: bool) -> NetworkPolicy {
    if lenient {
        NetworkPolicy::FallbackToVisa
    } else {
        NetworkPolicy::Strict
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Generate { network, count } => {
            let network = CardNetwork::resolve(&network, policy(cli.lenient_networks))?;
            let generator = CardNumberGenerator::new();
            let stdout = io::stdout();
            let mut out = stdout.lock();
            let mut issued = 0;
            while issued < count {
                match generator.generate(network) {
                    Ok(number) => {
                        writeln!(out, "{number}").into_diagnostic()?;
                        issued += 1;
                    }
                    Err(e) if e.is_retryable() => warn!(error = %e, "retrying generation"),
                    Err(e) => return Err(e.into()),
                }
            }
        }
        Commands::Validate { number, network } => {
            let network = network
                .map(|name| CardNetwork::resolve(&name, NetworkPolicy::Strict))
                .transpose()?;
            let verdict = if generator::validate(&number, network) {
                "valid"
            } else {
                "invalid"
            };
            println!("{verdict}");
        }
        Commands::Process {
            input,
            format,
            max_attempts,
        } => {
            let config = EngineConfig::new(max_attempts, cli.lenient_networks)?;
            let workflow = CardWorkflow::new(
                Box::new(InMemoryCardStore::new()),
                Box::new(CardNumberGenerator::new()),
                config,
            );

            let file = File::open(input).into_diagnostic()?;
            let reader = CommandReader::new(file);
            for (row, record) in reader.records().enumerate() {
                let record = match record {
                    Ok(record) => record,
                    Err(e) => {
                        warn!(row = row + 1, error = %e, "Error reading command");
                        continue;
                    }
                };
                let actor = record.actor();
                let outcome = match record.into_command(config.network_policy) {
                    Ok(command) => workflow.execute(actor, command).await,
                    Err(e) => Err(e),
                };
                if let Err(e) = outcome {
                    warn!(row = row + 1, error = %e, "Error processing command");
                }
            }

            for id in workflow.audit().await? {
                warn!(id, "stored card number failed validation");
            }

            let cards = workflow.list(Actor::new(0, Role::Admin)).await?;
            let stdout = io::stdout();
            match format {
                OutputFormat::Csv => CardWriter::new(stdout.lock()).write_cards(cards)?,
                OutputFormat::Json => {
                    let mut out = stdout.lock();
                    write_json(&mut out, &cards)?;
                    writeln!(out).into_diagnostic()?;
                }
            }
        }
    }

    Ok(())
}
