use clap::Parser;
use colored::Colorize;

use assh::criteria::SelectionCriteria;
use assh::error::{Error, Result, USAGE};
use assh::provider::Ec2Provider;
use assh::select::FuzzyPicker;
use assh::session::SshLauncher;

/// Environments searched in identifier mode, in priority order. Each name is
/// also the AWS profile used to scope the provider connection.
const SEARCH_ENVIRONMENTS: &[&str] = &["prod", "dev", "stg", "sandbox"];

#[derive(Parser)]
#[command(name = "assh")]
#[command(about = "SSH into EC2 instances by instance ID or environment and role tags")]
#[command(version)]
struct Cli {
    /// <instance-id> | <environment> <role> [profile]
    #[arg(value_name = "ARGS")]
    args: Vec<String>,
}

async fn run(args: &[String]) -> Result<()> {
    let criteria = SelectionCriteria::from_args(args)?;
    assh::run(
        &criteria,
        &Ec2Provider,
        &FuzzyPicker,
        &SshLauncher,
        SEARCH_ENVIRONMENTS,
    )
    .await
}

// The AWS SDK needs a runtime, but every await is sequential; a single
// thread is all the pipeline ever uses.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(&cli.args).await {
        match err {
            Error::InvalidCommand => {
                eprintln!("{} {}\n{}", "Error:".red().bold(), err, USAGE)
            }
            _ => eprintln!("{} {}", "Error:".red().bold(), err),
        }
        std::process::exit(err.exit_code());
    }
}
