use crate::{bus::BusError, location::LocationError, ObjectId};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Transport(#[from] BusError),
    #[error("{id} could not be read: {source}")]
    Unreachable { id: ObjectId, source: BusError },
    #[error("unexpected reply to {method}: {reason}")]
    UnexpectedReply {
        method: &'static str,
        reason: String,
    },
    #[error("{0} has no 3GPP location available")]
    NoLocationAvailable(ObjectId),
    #[error("location of {id} is malformed: {source}")]
    MalformedLocation { id: ObjectId, source: LocationError },
    #[error("{0} is not available")]
    Unavailable(&'static str),
}
