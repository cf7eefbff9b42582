//! Generic property decoder.
//!
//! Fills a record by reading every property its schema declares and converting
//! each value to the field's declared shape. A field that can't be fetched or
//! converted keeps its default and is reported in [`Decoded::failures`]; it never
//! fails the rest of the record.

pub(crate) mod convert;

use crate::{
    bus::{Bus, BusError},
    schema::{Field, Record},
    Error, ObjectId,
};
use futures::future;
use serde::{ser::SerializeStruct as _, Serialize, Serializer};
use std::fmt;
use tracing::{debug, instrument};

/// A record together with the fields that could not be decoded.
#[derive(Debug, Serialize)]
pub struct Decoded<R> {
    pub id: ObjectId,
    pub record: R,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<FieldFailure>,
}

impl<R> Decoded<R> {
    /// True when every declared field was decoded.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failure(&self, field: &str) -> Option<&FieldFailure> {
        self.failures.iter().find(|f| f.field == field)
    }

    pub fn into_record(self) -> R {
        self.record
    }
}

#[derive(Debug)]
pub struct FieldFailure {
    /// Record field that kept its default.
    pub field: &'static str,
    /// Fully qualified remote property.
    pub property: String,
    pub kind: FieldErrorKind,
}

impl fmt::Display for FieldFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.field, self.property, self.kind)
    }
}

impl Serialize for FieldFailure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("FieldFailure", 3)?;
        s.serialize_field("field", self.field)?;
        s.serialize_field("property", &self.property)?;
        s.serialize_field("error", &self.kind.to_string())?;
        s.end()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FieldErrorKind {
    #[error("fetch failed: {0}")]
    Fetch(#[from] BusError),
    #[error("expected {expected}, got `{found}`")]
    TypeMismatch { expected: String, found: String },
    #[error("{value} does not fit in {target}")]
    OutOfRange { value: String, target: &'static str },
    #[error("expected {expected} fields, got {found}")]
    Arity { expected: usize, found: usize },
    #[error("`{found}` values are not decoded generically")]
    Unsupported { found: String },
}

/// Decodes the object at `id` using a record's own schema.
pub async fn decode_record<R, B>(bus: &B, id: &ObjectId) -> Result<Decoded<R>, Error>
where
    R: Record,
    B: Bus + ?Sized,
{
    decode(bus, id, R::INTERFACE, R::fields()).await
}

/// Reads `interface.<property>` for every entry of `fields` and fills a fresh `R`.
///
/// Fails only when not a single property could be fetched and the service never
/// answered that a property doesn't exist, which means the object is gone or was
/// never there.
#[instrument(skip_all, fields(id = %id, interface = %interface))]
pub async fn decode<R, B>(
    bus: &B,
    id: &ObjectId,
    interface: &str,
    fields: &[Field<R>],
) -> Result<Decoded<R>, Error>
where
    R: Default,
    B: Bus + ?Sized,
{
    let properties: Vec<String> = fields
        .iter()
        .map(|field| format!("{interface}.{}", field.property))
        .collect();

    let replies =
        future::join_all(properties.iter().map(|p| bus.get_property(id, p))).await;

    let mut record = R::default();
    let mut failures = Vec::new();
    let mut fetched = 0;

    for ((field, property), reply) in fields.iter().zip(properties).zip(replies) {
        let result = match reply {
            Ok(value) => {
                fetched += 1;
                convert::apply(&field.slot, &mut record, &value)
            }
            Err(e) => Err(FieldErrorKind::Fetch(e)),
        };

        if let Err(kind) = result {
            debug!(
                field = field.name,
                property = %property,
                error = %kind,
                "field not decoded"
            );
            failures.push(FieldFailure {
                field: field.name,
                property,
                kind,
            });
        }
    }

    let answered = failures
        .iter()
        .any(|f| matches!(f.kind, FieldErrorKind::Fetch(BusError::NoSuchProperty(_))));

    if fetched == 0 && !answered && !fields.is_empty() {
        let source = failures
            .into_iter()
            .find_map(|f| match f.kind {
                FieldErrorKind::Fetch(e) => Some(e),
                _ => None,
            })
            .unwrap_or(BusError::EmptyReply);

        return Err(Error::Unreachable {
            id: id.clone(),
            source,
        });
    }

    Ok(Decoded {
        id: id.clone(),
        record,
        failures,
    })
}
