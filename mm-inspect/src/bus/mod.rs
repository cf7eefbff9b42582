//! The two bus primitives everything else is built on.

mod dbus;

pub use self::dbus::ZbusBus;

use crate::ObjectId;
use async_trait::async_trait;
use std::time::Duration;
use zbus::zvariant::OwnedValue;

/// Transport to the ModemManager service.
///
/// Implementations carry their own deadlines. Nothing above this trait retries.
#[async_trait]
pub trait Bus: 'static + Send + Sync {
    /// Calls an argument-less method and returns its single return value.
    async fn call(
        &self,
        id: &ObjectId,
        interface: &str,
        method: &str,
    ) -> Result<OwnedValue, BusError>;

    /// Reads `property`, given fully qualified as `interface.Name`.
    async fn get_property(
        &self,
        id: &ObjectId,
        property: &str,
    ) -> Result<OwnedValue, BusError>;
}

#[derive(Debug, thiserror::Error)]
pub enum BusError {
    #[error("dbus error: {0}")]
    Dbus(#[from] zbus::Error),
    #[error("dbus error: {0}")]
    Fdo(#[from] zbus::fdo::Error),
    #[error("no such property: {0}")]
    NoSuchProperty(String),
    #[error("`{0}` is not a fully qualified property name")]
    BadPropertyName(String),
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    #[error("reply carried no value")]
    EmptyReply,
    #[error("could not read reply: {0}")]
    Value(#[from] zbus::zvariant::Error),
}
