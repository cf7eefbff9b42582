//! Everything known about each modem, in one serializable list.

use crate::{
    decoder::Decoded,
    location::Location,
    records::{Bearer, Modem, Modem3gpp, Sim},
    Error, Manager,
};
use serde::Serialize;
use std::fmt::Display;
use tracing::{instrument, warn};

#[derive(Debug, Serialize)]
pub struct ModemReport {
    pub modem: Decoded<Modem>,
    /// First bearer, if the modem has any.
    pub bearer: Option<Decoded<Bearer>>,
    pub sim: Option<Decoded<Sim>>,
    #[serde(rename = "3gpp")]
    pub modem_3gpp: Option<Decoded<Modem3gpp>>,
    pub location: Option<Location>,
}

/// Scans and reads every modem together with its first bearer, SIM, 3GPP identity
/// and location.
///
/// Only the scan can fail the whole report. Anything after it that fails is logged
/// and left out of that modem's entry.
#[instrument(skip_all)]
pub async fn collect(manager: &Manager) -> Result<Vec<ModemReport>, Error> {
    manager.scan().await?;

    let mut reports = Vec::new();
    for modem in manager.list_modems().await {
        let id = &modem.id;

        let bearer = match modem.record.bearers.first() {
            Some(bearer) => ok_or_warn("bearer", id, manager.get_bearer(bearer).await),
            None => None,
        };
        let sim = if modem.record.sim.is_null() {
            None
        } else {
            ok_or_warn("sim", id, manager.get_sim(&modem.record.sim).await)
        };
        let modem_3gpp = ok_or_warn("3gpp", id, manager.get_modem_3gpp(id).await);
        let location = ok_or_warn("location", id, manager.get_modem_location(id).await);

        reports.push(ModemReport {
            modem,
            bearer,
            sim,
            modem_3gpp,
            location,
        });
    }

    Ok(reports)
}

fn ok_or_warn<T>(what: &str, modem: impl Display, result: Result<T, Error>) -> Option<T> {
    result
        .inspect_err(|e| warn!(%modem, error = %e, "could not read {what}"))
        .ok()
}
