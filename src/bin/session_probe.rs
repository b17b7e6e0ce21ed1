use clap::{Parser, Subcommand};
use inventory_probe::{
    config::Config,
    error::ProbeResult,
    models::InventoryRecord,
    report,
    session::{load_credentials, SessionClient},
};

#[derive(Parser, Debug)]
#[command(name = "session-probe")]
#[command(about = "Manual checks for the inventory API's account and session routes", long_about = None)]
struct Opts {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// POST the credentials file to /api/auth/register
    Register,
    /// Log in, then list inventory with the session cookie
    Login,
    /// Log in, then submit the probe inventory record with the session cookie
    Submit,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    inventory_probe::init_tracing();

    let opts = Opts::parse();
    let config = Config::from_env();

    let lines = match run(opts.command, &config).await {
        Ok(lines) => lines,
        Err(e) => vec![e.describe()],
    };

    report::write_lines(&mut std::io::stdout().lock(), &lines)?;
    Ok(())
}

async fn run(command: Command, config: &Config) -> ProbeResult<Vec<String>> {
    let file = load_credentials(&config.credentials_path)?;
    let client = SessionClient::new(config)?;

    let lines = match command {
        Command::Register => report::register_lines(&client.register(&file).await),
        Command::Login => {
            let outcome = client.login(&file.credentials).await?;
            let mut lines = report::login_lines(&outcome);
            if let Some(session) = outcome.session() {
                lines.extend(report::listing_lines(&client.list_inventory(session).await));
            }
            lines
        }
        Command::Submit => {
            let outcome = client.login(&file.credentials).await?;
            let mut lines = report::login_lines(&outcome);
            if let Some(session) = outcome.session() {
                let record = InventoryRecord::probe_fixture();
                lines.extend(report::outcome_lines(&client.submit(session, &record).await));
            }
            lines
        }
    };

    Ok(lines)
}
