use crate::{
    bus::Bus,
    consts::{GET_MANAGED_OBJECTS, OBJECT_MANAGER_IFACE},
    Error, ObjectId,
};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;
use zbus::zvariant::{OwnedObjectPath, OwnedValue};

/// Lists every object managed under `root`.
///
/// Only the object paths are kept. The interfaces and properties that
/// `GetManagedObjects` sends along are thrown away; records are always read fresh.
pub async fn discover<B>(bus: &B, root: &ObjectId) -> Result<BTreeSet<ObjectId>, Error>
where
    B: Bus + ?Sized,
{
    let reply = bus.call(root, OBJECT_MANAGER_IFACE, GET_MANAGED_OBJECTS).await?;
    let signature = reply.value_signature().to_string();

    let objects = HashMap::<OwnedObjectPath, OwnedValue>::try_from(reply).map_err(|e| {
        Error::UnexpectedReply {
            method: GET_MANAGED_OBJECTS,
            reason: format!("`{signature}` is not an object map: {e}"),
        }
    })?;
    debug!(%root, count = objects.len(), "managed objects");

    Ok(objects.into_keys().map(ObjectId::from).collect())
}
