use super::{Bus, BusError};
use crate::{consts::SERVICE, ObjectId};
use async_trait::async_trait;
use std::{future::Future, time::Duration};
use tokio::time;
use tracing::trace;
use zbus::{
    fdo::{self, PropertiesProxy},
    names::InterfaceName,
    zvariant::{OwnedValue, Structure},
    CacheProperties, Connection,
};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// [`Bus`] over a zbus [`Connection`], talking to one well known service name.
///
/// ```no_run
/// # async fn f() -> zbus::Result<()> {
/// use orb_mm_inspect::bus::ZbusBus;
/// use std::time::Duration;
///
/// let bus = ZbusBus::builder()
///     .conn(zbus::Connection::system().await?)
///     .timeout(Duration::from_secs(2))
///     .build();
/// # Ok(()) }
/// ```
#[derive(Debug, Clone, bon::Builder)]
pub struct ZbusBus {
    conn: Connection,
    #[builder(default = SERVICE.to_owned(), into)]
    service: String,
    #[builder(default = DEFAULT_TIMEOUT)]
    timeout: Duration,
}

impl ZbusBus {
    async fn deadline<T>(
        &self,
        fut: impl Future<Output = Result<T, BusError>>,
    ) -> Result<T, BusError> {
        time::timeout(self.timeout, fut)
            .await
            .map_err(|_| BusError::Timeout(self.timeout))?
    }

    async fn properties<'a>(
        &'a self,
        id: &'a ObjectId,
    ) -> Result<PropertiesProxy<'a>, BusError> {
        let proxy = PropertiesProxy::builder(&self.conn)
            .destination(self.service.as_str())?
            .path(id.as_str())?
            .cache_properties(CacheProperties::No)
            .build()
            .await?;

        Ok(proxy)
    }
}

#[async_trait]
impl Bus for ZbusBus {
    async fn call(
        &self,
        id: &ObjectId,
        interface: &str,
        method: &str,
    ) -> Result<OwnedValue, BusError> {
        trace!(%id, interface, method, "calling");
        self.deadline(async {
            let reply = self
                .conn
                .call_method(
                    Some(self.service.as_str()),
                    id.as_str(),
                    Some(interface),
                    method,
                    &(),
                )
                .await?;

            let body = reply.body();
            let args: Structure<'_> = body.deserialize()?;
            let first = args
                .into_fields()
                .into_iter()
                .next()
                .ok_or(BusError::EmptyReply)?;

            Ok(OwnedValue::try_from(first)?)
        })
        .await
    }

    async fn get_property(
        &self,
        id: &ObjectId,
        property: &str,
    ) -> Result<OwnedValue, BusError> {
        let (interface, name) = property
            .rsplit_once('.')
            .ok_or_else(|| BusError::BadPropertyName(property.to_owned()))?;
        let interface = InterfaceName::try_from(interface).map_err(zbus::Error::from)?;

        trace!(%id, property, "reading property");
        self.deadline(async {
            let proxy = self.properties(id).await?;

            proxy.get(interface, name).await.map_err(|e| match e {
                fdo::Error::InvalidArgs(_) | fdo::Error::UnknownProperty(_) => {
                    BusError::NoSuchProperty(property.to_owned())
                }
                e => BusError::Fdo(e),
            })
        })
        .await
    }
}
