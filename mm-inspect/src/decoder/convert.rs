//! Wire value -> declared shape conversions.

use super::FieldErrorKind;
use crate::{
    records::Port,
    schema::{Shape, Slot},
    signal::SignalQuality,
    ObjectId,
};
use zbus::zvariant::Value;

/// Writes `value` into the slot's field of `record`, or explains why it can't.
pub(crate) fn apply<R>(
    slot: &Slot<R>,
    record: &mut R,
    value: &Value<'_>,
) -> Result<(), FieldErrorKind> {
    let shape = slot.shape();
    let value = unwrap_variant(value);

    match value {
        Value::Dict(_) => return Err(unsupported(value)),
        Value::Structure(_) if shape != Shape::SignalQuality => {
            return Err(unsupported(value));
        }
        _ => (),
    }

    match slot {
        Slot::Bool(f) => *f(record) = boolean(value, shape)?,
        Slot::I32(f) => *f(record) = narrow(integer(value)?)?,
        Slot::U32(f) => *f(record) = narrow(integer(value)?)?,
        Slot::Text(f) => *f(record) = text(value, shape)?,
        Slot::ObjectId(f) => *f(record) = object_id(value, shape)?,
        Slot::TextList(f) => *f(record) = list(value, shape, |v| text(v, shape))?,
        Slot::ObjectIdList(f) => {
            *f(record) = list(value, shape, |v| object_id(v, shape))?;
        }
        Slot::Ports(f) => *f(record) = list(value, shape, port)?,
        Slot::SignalQuality(f) => *f(record) = SignalQuality::from_wire(value)?,
    }

    Ok(())
}

pub(crate) fn unwrap_variant<'v, 'a>(mut value: &'v Value<'a>) -> &'v Value<'a> {
    while let Value::Value(inner) = value {
        value = &**inner;
    }

    value
}

pub(crate) fn signature(value: &Value<'_>) -> String {
    value.value_signature().to_string()
}

pub(crate) fn mismatch(expected: Shape, found: &Value<'_>) -> FieldErrorKind {
    FieldErrorKind::TypeMismatch {
        expected: expected.to_string(),
        found: signature(found),
    }
}

fn unsupported(found: &Value<'_>) -> FieldErrorKind {
    FieldErrorKind::Unsupported {
        found: signature(found),
    }
}

/// Any wire integer, widened to `i64`.
pub(crate) fn integer(value: &Value<'_>) -> Result<i64, FieldErrorKind> {
    match unwrap_variant(value) {
        Value::U8(n) => Ok(i64::from(*n)),
        Value::I16(n) => Ok(i64::from(*n)),
        Value::U16(n) => Ok(i64::from(*n)),
        Value::I32(n) => Ok(i64::from(*n)),
        Value::U32(n) => Ok(i64::from(*n)),
        Value::I64(n) => Ok(*n),
        Value::U64(n) => i64::try_from(*n).map_err(|_| FieldErrorKind::OutOfRange {
            value: n.to_string(),
            target: "i64",
        }),
        other => Err(FieldErrorKind::TypeMismatch {
            expected: "integer".to_owned(),
            found: signature(other),
        }),
    }
}

/// Checked narrowing, never truncates.
pub(crate) fn narrow<T: TryFrom<i64>>(n: i64) -> Result<T, FieldErrorKind> {
    T::try_from(n).map_err(|_| FieldErrorKind::OutOfRange {
        value: n.to_string(),
        target: std::any::type_name::<T>(),
    })
}

fn boolean(value: &Value<'_>, shape: Shape) -> Result<bool, FieldErrorKind> {
    match value {
        Value::Bool(b) => Ok(*b),
        other => Err(mismatch(shape, other)),
    }
}

fn text(value: &Value<'_>, shape: Shape) -> Result<String, FieldErrorKind> {
    match unwrap_variant(value) {
        Value::Str(s) => Ok(s.as_str().to_owned()),
        other => Err(mismatch(shape, other)),
    }
}

fn object_id(value: &Value<'_>, shape: Shape) -> Result<ObjectId, FieldErrorKind> {
    match unwrap_variant(value) {
        Value::ObjectPath(path) => Ok(ObjectId::from(path)),
        other => Err(mismatch(shape, other)),
    }
}

fn list<T>(
    value: &Value<'_>,
    shape: Shape,
    element: impl Fn(&Value<'_>) -> Result<T, FieldErrorKind>,
) -> Result<Vec<T>, FieldErrorKind> {
    match value {
        Value::Array(array) => array.iter().map(element).collect(),
        other => Err(mismatch(shape, other)),
    }
}

fn port(value: &Value<'_>) -> Result<Port, FieldErrorKind> {
    let Value::Structure(s) = unwrap_variant(value) else {
        return Err(mismatch(Shape::Ports, value));
    };

    match s.fields() {
        [Value::Str(name), kind] => Ok(Port {
            name: name.as_str().to_owned(),
            kind: narrow(integer(kind)?)?,
        }),
        [_, _] => Err(mismatch(Shape::Ports, value)),
        fields => Err(FieldErrorKind::Arity {
            expected: 2,
            found: fields.len(),
        }),
    }
}
