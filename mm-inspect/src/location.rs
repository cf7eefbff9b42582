//! 3GPP cell location, as returned by `Modem.Location.GetLocation`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;
use zbus::zvariant::{OwnedValue, Value};

/// Number of comma separated parts in a 3GPP location string.
pub const PARTS: usize = 5;

/// Cell location. LAC, CID and TAC are rendered as decimal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub mcc: String,
    pub mnc: String,
    pub lac: String,
    pub cid: String,
    pub tac: String,
}

#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("expected {expected} comma separated parts, got {found} in `{raw}`")]
    TooFewParts {
        expected: usize,
        found: usize,
        raw: String,
    },
    #[error("location entry is `{0}`, not a string")]
    NotAString(String),
    #[error("reply is `{0}`, not a source -> location map")]
    NotAMap(String),
}

/// Parses `MCC,MNC,LAC,CID,TAC`, where the last three are hex.
///
/// A hex part that doesn't parse is left empty rather than failing the whole
/// location. Parts after the fifth are ignored.
pub fn parse_3gpp(raw: &str) -> Result<Location, LocationError> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    let [mcc, mnc, lac, cid, tac, ..] = parts.as_slice() else {
        return Err(LocationError::TooFewParts {
            expected: PARTS,
            found: parts.len(),
            raw: raw.to_owned(),
        });
    };

    Ok(Location {
        mcc: (*mcc).to_owned(),
        mnc: (*mnc).to_owned(),
        lac: hex_to_decimal("lac", lac),
        cid: hex_to_decimal("cid", cid),
        tac: hex_to_decimal("tac", tac),
    })
}

fn hex_to_decimal(part: &str, hex: &str) -> String {
    match u32::from_str_radix(hex, 16) {
        Ok(n) => n.to_string(),
        Err(e) => {
            warn!(part, hex, error = %e, "location part is not hex, leaving it empty");
            String::new()
        }
    }
}

/// Picks the location string out of a `GetLocation` reply.
///
/// The reply maps `MMModemLocationSource` flags to values. When several sources
/// are present the lowest flag wins, which is 3GPP LAC/CI (`1`). Returns `None`
/// when the map is empty.
pub fn select(reply: OwnedValue) -> Result<Option<String>, LocationError> {
    let signature = reply.value_signature().to_string();
    let sources = HashMap::<u32, OwnedValue>::try_from(reply)
        .map_err(|_| LocationError::NotAMap(signature))?;

    let Some((_, value)) = sources.into_iter().min_by_key(|(source, _)| *source) else {
        return Ok(None);
    };

    match &*value {
        Value::Str(s) => Ok(Some(s.as_str().to_owned())),
        Value::Value(inner) => match &**inner {
            Value::Str(s) => Ok(Some(s.as_str().to_owned())),
            other => Err(LocationError::NotAString(other.value_signature().to_string())),
        },
        other => Err(LocationError::NotAString(other.value_signature().to_string())),
    }
}
