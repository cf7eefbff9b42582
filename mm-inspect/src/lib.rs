//! Discovery and inspection of cellular modems managed by ModemManager.
//!
//! Start with [`Manager`]: hand it a [`bus::Bus`] (usually a [`bus::ZbusBus`]),
//! call [`Manager::scan`], then pull records for the objects it found.
#![forbid(unsafe_code)]

pub mod bus;
pub mod config;
pub mod decoder;
pub mod discovery;
pub mod location;
pub mod manager;
pub mod records;
pub mod report;
pub mod schema;
pub mod signal;
pub mod telemetry;

mod error;
mod object_id;

pub use decoder::{Decoded, FieldErrorKind, FieldFailure};
pub use error::Error;
pub use manager::Manager;
pub use object_id::ObjectId;

/// D-Bus names exported by ModemManager. Must match the service exactly.
pub mod consts {
    pub const SERVICE: &str = "org.freedesktop.ModemManager1";
    pub const ROOT_PATH: &str = "/org/freedesktop/ModemManager1";

    pub const OBJECT_MANAGER_IFACE: &str = "org.freedesktop.DBus.ObjectManager";
    pub const GET_MANAGED_OBJECTS: &str = "GetManagedObjects";

    pub const MODEM_IFACE: &str = "org.freedesktop.ModemManager1.Modem";
    pub const BEARER_IFACE: &str = "org.freedesktop.ModemManager1.Bearer";
    pub const SIM_IFACE: &str = "org.freedesktop.ModemManager1.Sim";
    pub const SIGNAL_IFACE: &str = "org.freedesktop.ModemManager1.Modem.Signal";
    pub const MODEM_3GPP_IFACE: &str = "org.freedesktop.ModemManager1.Modem.Modem3gpp";
    pub const LOCATION_IFACE: &str = "org.freedesktop.ModemManager1.Modem.Location";
    pub const GET_LOCATION: &str = "GetLocation";

    pub const MODEM_PATH_PREFIX: &str = "/org/freedesktop/ModemManager1/Modem/";
    pub const BEARER_PATH_PREFIX: &str = "/org/freedesktop/ModemManager1/Bearer/";
    pub const SIM_PATH_PREFIX: &str = "/org/freedesktop/ModemManager1/SIM/";
}
