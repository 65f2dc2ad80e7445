use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use colored::*;
use log::*;
use testing_tools::api_client::BrokerClient;
use testing_tools::output::{print_test_summary, TestResult};
use testing_tools::scenarios;

#[derive(Parser)]
#[command(name = "broker-test-client")]
#[command(about = "Runs broker API scenarios against a running mock service broker")]
struct Cli {
    /// Base URL of the running broker
    #[arg(long, default_value = "http://localhost:4000")]
    base_url: String,

    /// Scenario to run
    #[arg(long, value_enum, default_value_t = Scenario::All)]
    scenario: Scenario,

    /// Print every broker response
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
enum Scenario {
    Catalog,
    InstanceLifecycle,
    AsyncRequired,
    ConfigRoundTrip,
    All,
}

impl Scenario {
    fn selected(self) -> Vec<Scenario> {
        match self {
            Scenario::All => vec![
                Scenario::Catalog,
                Scenario::InstanceLifecycle,
                Scenario::AsyncRequired,
                Scenario::ConfigRoundTrip,
            ],
            scenario => vec![scenario],
        }
    }
}

async fn run(client: &BrokerClient, scenario: Scenario, verbose: bool) -> Result<TestResult> {
    // Every scenario starts from the seed configuration.
    client.reset_config().await?;

    match scenario {
        Scenario::Catalog => scenarios::test_catalog(client, verbose).await,
        Scenario::InstanceLifecycle => scenarios::test_instance_lifecycle(client, verbose).await,
        Scenario::AsyncRequired => scenarios::test_async_required(client, verbose).await,
        Scenario::ConfigRoundTrip => scenarios::test_config_round_trip(client, verbose).await,
        Scenario::All => bail!("All is expanded before scenarios run"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    println!(
        "{} {}",
        "Broker test client targeting".bold(),
        cli.base_url.bright_white()
    );

    let client = BrokerClient::new(&cli.base_url);
    let mut results = Vec::new();

    for scenario in cli.scenario.selected() {
        match run(&client, scenario, cli.verbose).await {
            Ok(result) => results.push(result),
            Err(e) => {
                error!("Scenario {scenario:?} could not run: {e}");
                results.push(TestResult::fail(
                    &format!("{scenario:?}"),
                    e.to_string(),
                    std::time::Duration::ZERO,
                ));
            }
        }
    }

    print_test_summary(&results);

    if results.iter().any(|result| !result.passed) {
        std::process::exit(1);
    }

    Ok(())
}
