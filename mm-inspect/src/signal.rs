use crate::{
    decoder::{convert, FieldErrorKind},
    schema::Shape,
};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use zbus::zvariant::{OwnedValue, Value};

/// `SignalQuality` property of a modem, read from a `(ub)` pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalQuality {
    /// 0 - 100
    pub percent: u32,
    /// Whether the reading is recent.
    pub recent: bool,
}

impl SignalQuality {
    pub const ARITY: usize = 2;
    pub const MAX_PERCENT: u32 = 100;

    pub(crate) fn from_wire(value: &Value<'_>) -> Result<Self, FieldErrorKind> {
        let fields = match convert::unwrap_variant(value) {
            Value::Structure(s) => s.fields(),
            other => return Err(convert::mismatch(Shape::SignalQuality, other)),
        };

        let [percent, recent] = fields else {
            return Err(FieldErrorKind::Arity {
                expected: Self::ARITY,
                found: fields.len(),
            });
        };

        let percent: u32 = convert::narrow(convert::integer(percent)?)?;
        if percent > Self::MAX_PERCENT {
            return Err(FieldErrorKind::OutOfRange {
                value: percent.to_string(),
                target: "percent (0-100)",
            });
        }

        let recent = match convert::unwrap_variant(recent) {
            Value::Bool(b) => *b,
            other => {
                return Err(FieldErrorKind::TypeMismatch {
                    expected: "bool (b)".to_owned(),
                    found: convert::signature(other),
                })
            }
        };

        Ok(Self { percent, recent })
    }
}

/// Radio technologies reported by the `Modem.Signal` interface.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Technology {
    #[display("cdma")]
    Cdma,
    #[display("evdo")]
    Evdo,
    #[display("gsm")]
    Gsm,
    #[display("umts")]
    Umts,
    #[display("lte")]
    Lte,
}

/// Extended signal information, e.g. `lte -> { rsrp, rsrq, rssi, snr }`.
///
/// ModemManager only fills these in after `Signal.Setup()` has been called, which
/// this crate never does. See [`crate::Manager::get_modem_signal`].
#[derive(Debug, Default)]
pub struct Signal {
    pub metrics: BTreeMap<Technology, BTreeMap<String, OwnedValue>>,
}
