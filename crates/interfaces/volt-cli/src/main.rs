use clap::Parser;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use volt_cli::cli::Command;
use volt_cli::{actions, commands, Cli, CliContext};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut ctx = CliContext::load(cli.config_dir, cli.api, cli.station, cli.timeout)?;
    let mut out = std::io::stdout();

    match cli.command {
        Command::Login { email, password } => {
            commands::cmd_login(&mut ctx, &email, &password, &mut out).await?
        }
        Command::Ping => commands::cmd_ping(&ctx, &mut out).await?,
        Command::Dashboard => commands::cmd_dashboard(&ctx, &mut out).await?,
        Command::Vehicles {
            filter,
            kind,
            watch,
        } => commands::cmd_vehicles(&ctx, &filter, kind.as_deref(), watch, &mut out).await?,
        Command::Vehicle { action } => actions::cmd_vehicle(&ctx, action, &mut out).await?,
        Command::Rides { filter } => commands::cmd_rides(&ctx, &filter, &mut out).await?,
        Command::Payments {
            filter,
            method,
            all,
        } => commands::cmd_payments(&ctx, &filter, method.as_deref(), all, &mut out).await?,
        Command::Ports { filter, action } => match action {
            Some(action) => actions::cmd_port(&ctx, action, &mut out).await?,
            None => commands::cmd_ports(&ctx, &filter, &mut out).await?,
        },
        Command::Reports => commands::cmd_reports(&ctx, &mut out).await?,
        Command::Settings { action } => actions::cmd_settings(&ctx, action, &mut out).await?,
        Command::Config { action } => commands::cmd_config(&ctx, &action, &mut out)?,
    }
    Ok(())
}
