use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "volt", author, version, about = "EV station operator console")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,
    /// API base URL, e.g. http://127.0.0.1:8000/api/
    #[arg(long, global = true, env = "VOLT_API_URL")]
    pub api: Option<String>,
    /// Station to operate on (defaults to the one saved by `login`)
    #[arg(long, global = true)]
    pub station: Option<String>,
    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
    /// Directory holding settings.json (defaults to the platform config dir)
    #[arg(long, global = true, hide = true, env = "VOLT_CONFIG_DIR")]
    pub config_dir: Option<Utf8PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in as a station manager and remember the station
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "VOLT_PASSWORD")]
        password: String,
    },
    /// Check that the backend is reachable
    Ping,
    Dashboard,
    Vehicles {
        #[command(flatten)]
        filter: FilterArgs,
        #[arg(long = "type", help = "Vehicle type, or 'all'")]
        kind: Option<String>,
        /// Keep re-rendering while any vehicle is charging
        #[arg(long)]
        watch: bool,
    },
    /// Change a single vehicle
    Vehicle {
        #[command(subcommand)]
        action: VehicleAction,
    },
    Rides {
        #[command(flatten)]
        filter: FilterArgs,
    },
    Payments {
        #[command(flatten)]
        filter: FilterArgs,
        /// Payment method (upi, card, cash, wallet), or 'all'
        #[arg(long)]
        method: Option<String>,
        /// List payments of every station
        #[arg(long)]
        all: bool,
    },
    Ports {
        #[command(flatten)]
        filter: FilterArgs,
        #[command(subcommand)]
        action: Option<PortAction>,
    },
    Reports,
    /// Station settings stored on the server
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Local console configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Case-insensitive text search over ids and names
    #[arg(long, short = 's')]
    pub search: Option<String>,
    /// Exact status, or 'all'
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum VehicleAction {
    Add {
        #[arg(long)]
        id: String,
        #[arg(long)]
        number: String,
        #[arg(long)]
        name: String,
        #[arg(long = "type")]
        kind: String,
        #[arg(long)]
        model: String,
        #[arg(long, default_value_t = 100.0)]
        battery: f64,
        #[arg(long, default_value_t = 0.0)]
        per_km: f64,
        #[arg(long, default_value_t = 0.0)]
        per_hour: f64,
    },
    Update {
        id: String,
        #[arg(long)]
        number: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long = "type")]
        kind: Option<String>,
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        battery: Option<f64>,
        #[arg(long)]
        status: Option<String>,
    },
    Delete {
        id: String,
    },
    Status {
        id: String,
        status: String,
    },
    Transfer {
        id: String,
        #[arg(long)]
        to: String,
    },
    History {
        id: String,
    },
    Details {
        id: String,
    },
    /// Stations with room to receive a transfer
    Nearby,
    Export {
        #[arg(long, value_enum, default_value_t = CliExportFormat::Csv)]
        format: CliExportFormat,
        #[arg(short, long)]
        output: Option<Utf8PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum PortAction {
    Assign {
        port: String,
        vehicle: String,
    },
    Remove {
        port: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum SettingsAction {
    Show,
    Set {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        capacity: Option<i64>,
        #[arg(long)]
        open: Option<String>,
        #[arg(long)]
        close: Option<String>,
    },
    Reset,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    Show,
    SetStation { station: String },
    SetApi { url: String },
    SetTimeout { secs: u64 },
}

#[derive(ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum CliExportFormat {
    Csv,
    Json,
}

impl From<CliExportFormat> for volt_infra::ExportFormat {
    fn from(f: CliExportFormat) -> Self {
        match f {
            CliExportFormat::Csv => volt_infra::ExportFormat::Csv,
            CliExportFormat::Json => volt_infra::ExportFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_flags_work_after_the_subcommand() {
        let cli = Cli::try_parse_from([
            "volt", "vehicles", "--status", "charging", "--station", "STN9", "-s", "ola",
        ])
        .unwrap();
        assert_eq!(cli.station.as_deref(), Some("STN9"));
        match cli.command {
            Command::Vehicles { filter, watch, .. } => {
                assert_eq!(filter.status.as_deref(), Some("charging"));
                assert_eq!(filter.search.as_deref(), Some("ola"));
                assert!(!watch);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn ports_without_action_lists() {
        let cli = Cli::try_parse_from(["volt", "ports"]).unwrap();
        assert!(matches!(cli.command, Command::Ports { action: None, .. }));
        let cli = Cli::try_parse_from(["volt", "ports", "assign", "P1", "V1"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Ports {
                action: Some(PortAction::Assign { .. }),
                ..
            }
        ));
    }
}
