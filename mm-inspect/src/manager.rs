use crate::{
    bus::Bus,
    consts::{GET_LOCATION, LOCATION_IFACE, ROOT_PATH},
    decoder::{decode_record, Decoded},
    discovery,
    location::{self, Location},
    records::{Bearer, Modem, Modem3gpp, Sim},
    signal::Signal,
    Error, ObjectId,
};
use std::{collections::BTreeSet, sync::Arc};
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

/// Entry point for reading ModemManager state.
///
/// Holds the identifiers found by the last [`Manager::scan`]. Records are never
/// cached; every `get_*` goes to the bus.
pub struct Manager {
    bus: Arc<dyn Bus>,
    root: ObjectId,
    objects: RwLock<BTreeSet<ObjectId>>,
}

impl Manager {
    pub fn new(bus: Arc<dyn Bus>) -> Self {
        Self::with_root(bus, ObjectId::new(ROOT_PATH))
    }

    /// Like [`Manager::new`], discovering under `root` instead of the ModemManager
    /// root path.
    pub fn with_root(bus: Arc<dyn Bus>, root: ObjectId) -> Self {
        Self {
            bus,
            root,
            objects: RwLock::default(),
        }
    }

    /// Rediscovers managed objects, replacing the previous snapshot.
    #[instrument(skip(self), fields(root = %self.root))]
    pub async fn scan(&self) -> Result<BTreeSet<ObjectId>, Error> {
        let found = discovery::discover(self.bus.as_ref(), &self.root).await?;
        info!(count = found.len(), "scanned managed objects");

        let mut objects = self.objects.write().await;
        objects.clone_from(&found);

        Ok(found)
    }

    /// Snapshot from the last [`Manager::scan`].
    pub async fn objects(&self) -> BTreeSet<ObjectId> {
        self.objects.read().await.clone()
    }

    /// Decodes every scanned object as a modem.
    ///
    /// Objects that can't be read at all are skipped. Fields that failed stay in
    /// each modem's [`Decoded::failures`].
    #[instrument(skip(self))]
    pub async fn list_modems(&self) -> Vec<Decoded<Modem>> {
        let objects = self.objects().await;
        let mut modems = Vec::with_capacity(objects.len());

        for id in &objects {
            match self.get_modem(id).await {
                Ok(modem) => modems.push(modem),
                Err(e) => warn!(%id, error = %e, "skipping modem"),
            }
        }

        modems
    }

    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_modem(&self, id: &ObjectId) -> Result<Decoded<Modem>, Error> {
        decode_record(self.bus.as_ref(), id).await
    }

    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_bearer(&self, id: &ObjectId) -> Result<Decoded<Bearer>, Error> {
        decode_record(self.bus.as_ref(), id).await
    }

    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_sim(&self, id: &ObjectId) -> Result<Decoded<Sim>, Error> {
        decode_record(self.bus.as_ref(), id).await
    }

    /// 3GPP identity of the modem at `id`.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_modem_3gpp(
        &self,
        id: &ObjectId,
    ) -> Result<Decoded<Modem3gpp>, Error> {
        decode_record(self.bus.as_ref(), id).await
    }

    /// Current 3GPP cell of the modem at `id`.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_modem_location(&self, id: &ObjectId) -> Result<Location, Error> {
        let reply = self.bus.call(id, LOCATION_IFACE, GET_LOCATION).await?;

        let malformed = |source| Error::MalformedLocation {
            id: id.clone(),
            source,
        };
        let raw = location::select(reply)
            .map_err(malformed)?
            .ok_or_else(|| Error::NoLocationAvailable(id.clone()))?;

        location::parse_3gpp(&raw).map_err(malformed)
    }

    /// Extended signal metrics need `Signal.Setup()` to have been called on the
    /// modem, which would change its state. Always fails.
    pub async fn get_modem_signal(&self, _id: &ObjectId) -> Result<Signal, Error> {
        Err(Error::Unavailable("extended signal information"))
    }
}
