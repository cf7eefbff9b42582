use clap::Parser as _;
use color_eyre::eyre::{OptionExt as _, WrapErr as _};
use orb_mm_inspect::{
    config::{Cli, Command, Config},
    report,
    telemetry::TelemetryConfig,
    Manager, ObjectId,
};
use serde::Serialize;
use std::{io::Write as _, sync::Arc};
use tracing::debug;

const SYSLOG_IDENTIFIER: &str = "worldcoin-mm-inspect";

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let config = Config::from_cli(&cli);

    let telemetry = TelemetryConfig::new();
    let telemetry = if config.journald {
        telemetry.with_journald(SYSLOG_IDENTIFIER)
    } else {
        telemetry
    };
    let telemetry = telemetry.try_init()?;
    debug!(?config, "starting");

    let result = run(&config, cli.command.unwrap_or(Command::Dump)).await;
    telemetry.flush();
    result
}

async fn run(config: &Config, command: Command) -> color_eyre::Result<()> {
    let bus = config
        .connect()
        .await
        .wrap_err("failed to connect to the message bus")?;
    let manager = Manager::new(Arc::new(bus));
    let target = command.object();
    let object = || -> color_eyre::Result<&ObjectId> {
        target.as_ref().ok_or_eyre("command takes no object")
    };

    match command {
        Command::Dump => {
            let reports = report::collect(&manager)
                .await
                .wrap_err("failed to collect modem reports")?;
            print(config, &reports)
        }
        Command::Modems => {
            manager.scan().await.wrap_err("failed to scan for modems")?;
            print(config, &manager.list_modems().await)
        }
        Command::Modem { .. } => {
            let id = object()?;
            let modem = manager
                .get_modem(id)
                .await
                .wrap_err_with(|| format!("failed to read modem {id}"))?;
            print(config, &modem)
        }
        Command::Bearer { .. } => {
            let id = object()?;
            let bearer = manager
                .get_bearer(id)
                .await
                .wrap_err_with(|| format!("failed to read bearer {id}"))?;
            print(config, &bearer)
        }
        Command::Sim { .. } => {
            let id = object()?;
            let sim = manager
                .get_sim(id)
                .await
                .wrap_err_with(|| format!("failed to read SIM {id}"))?;
            print(config, &sim)
        }
        Command::Modem3gpp { .. } => {
            let id = object()?;
            let modem_3gpp = manager
                .get_modem_3gpp(id)
                .await
                .wrap_err_with(|| format!("failed to read 3GPP identity of {id}"))?;
            print(config, &modem_3gpp)
        }
        Command::Location { .. } => {
            let id = object()?;
            let location = manager
                .get_modem_location(id)
                .await
                .wrap_err_with(|| format!("failed to read location of {id}"))?;
            print(config, &location)
        }
        Command::Signal { .. } => {
            let id = object()?;
            manager
                .get_modem_signal(id)
                .await
                .wrap_err_with(|| format!("failed to read signal of {id}"))?;
            Ok(())
        }
    }
}

fn print(config: &Config, value: &impl Serialize) -> color_eyre::Result<()> {
    let mut stdout = std::io::stdout().lock();
    if config.pretty {
        serde_json::to_writer_pretty(&mut stdout, value)?;
    } else {
        serde_json::to_writer(&mut stdout, value)?;
    }
    writeln!(stdout)?;

    Ok(())
}
