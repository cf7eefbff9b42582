use crate::{
    bus::ZbusBus,
    consts::{BEARER_PATH_PREFIX, MODEM_PATH_PREFIX, SIM_PATH_PREFIX},
    ObjectId,
};
use clap::{
    builder::{styling::AnsiColor, Styles},
    Parser, Subcommand, ValueEnum,
};
use std::time::Duration;

/// Read-only inspection of the modems known to ModemManager.
#[derive(Debug, Parser)]
#[clap(version, about, styles = clap_v3_styles())]
pub struct Cli {
    /// Which message bus ModemManager lives on.
    #[arg(long, env = "MM_INSPECT_BUS", value_enum, default_value_t = BusKind::System)]
    pub bus: BusKind,
    /// Connect to this D-Bus address instead of the well known bus.
    #[arg(long, env = "MM_INSPECT_DBUS_ADDRESS")]
    pub address: Option<String>,
    /// Deadline for each D-Bus call, in milliseconds.
    #[arg(long, env = "MM_INSPECT_TIMEOUT_MS", default_value_t = 5000)]
    pub timeout_ms: u64,
    /// Pretty print the JSON output.
    #[arg(long)]
    pub pretty: bool,
    /// Log to journald when not attached to a terminal.
    #[arg(long, env = "MM_INSPECT_JOURNALD")]
    pub journald: bool,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Every modem with its first bearer, SIM, 3GPP identity and location.
    Dump,
    /// Every modem.
    Modems,
    /// One modem. ID is an object path or a modem index.
    Modem { id: String },
    /// One bearer. ID is an object path or a bearer index.
    Bearer { id: String },
    /// One SIM. ID is an object path or a SIM index.
    Sim { id: String },
    /// 3GPP identity of a modem.
    #[command(name = "3gpp")]
    Modem3gpp { id: String },
    /// Current 3GPP cell of a modem.
    Location { id: String },
    /// Extended signal information of a modem.
    Signal { id: String },
}

impl Command {
    /// The object the command is about, resolved to a full path.
    pub fn object(&self) -> Option<ObjectId> {
        let (id, prefix) = match self {
            Command::Dump | Command::Modems => return None,
            Command::Bearer { id } => (id, BEARER_PATH_PREFIX),
            Command::Sim { id } => (id, SIM_PATH_PREFIX),
            Command::Modem { id }
            | Command::Modem3gpp { id }
            | Command::Location { id }
            | Command::Signal { id } => (id, MODEM_PATH_PREFIX),
        };

        Some(ObjectId::resolve(id, prefix))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum BusKind {
    #[default]
    System,
    Session,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bus: BusKind,
    /// Overrides `bus` when set.
    pub address: Option<String>,
    pub timeout: Duration,
    pub pretty: bool,
    pub journald: bool,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            bus: cli.bus,
            address: cli.address.clone(),
            timeout: Duration::from_millis(cli.timeout_ms),
            pretty: cli.pretty,
            journald: cli.journald,
        }
    }

    pub async fn connect(&self) -> zbus::Result<ZbusBus> {
        let conn = match (&self.address, self.bus) {
            (Some(address), _) => {
                zbus::connection::Builder::address(address.as_str())?
                    .build()
                    .await?
            }
            (None, BusKind::System) => zbus::Connection::system().await?,
            (None, BusKind::Session) => zbus::Connection::session().await?,
        };

        Ok(ZbusBus::builder().conn(conn).timeout(self.timeout).build())
    }
}

fn clap_v3_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Yellow.on_default())
        .usage(AnsiColor::Green.on_default())
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}
