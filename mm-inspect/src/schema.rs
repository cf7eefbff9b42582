//! Declarative mapping from record fields to remote properties.
//!
//! Every record type has one static table of [`Field`]s. The generic decoder walks
//! the table; nothing outside of it is ever fetched.

use crate::{records::Port, signal::SignalQuality, ObjectId};
use derive_more::Display;

/// One entry of a schema table.
pub struct Field<R> {
    /// Name of the record field, also its serialization key.
    pub name: &'static str,
    /// Remote property name, without the interface prefix.
    pub property: &'static str,
    pub slot: Slot<R>,
}

/// The declared shape of a field together with where the decoded value goes.
///
/// This is the closed set of shapes the generic decoder understands. Anything else
/// needs a dedicated decoder.
pub enum Slot<R> {
    Bool(fn(&mut R) -> &mut bool),
    I32(fn(&mut R) -> &mut i32),
    U32(fn(&mut R) -> &mut u32),
    Text(fn(&mut R) -> &mut String),
    ObjectId(fn(&mut R) -> &mut ObjectId),
    TextList(fn(&mut R) -> &mut Vec<String>),
    ObjectIdList(fn(&mut R) -> &mut Vec<ObjectId>),
    Ports(fn(&mut R) -> &mut Vec<Port>),
    SignalQuality(fn(&mut R) -> &mut SignalQuality),
}

impl<R> Slot<R> {
    pub fn shape(&self) -> Shape {
        match self {
            Slot::Bool(_) => Shape::Bool,
            Slot::I32(_) => Shape::I32,
            Slot::U32(_) => Shape::U32,
            Slot::Text(_) => Shape::Text,
            Slot::ObjectId(_) => Shape::ObjectId,
            Slot::TextList(_) => Shape::TextList,
            Slot::ObjectIdList(_) => Shape::ObjectIdList,
            Slot::Ports(_) => Shape::Ports,
            Slot::SignalQuality(_) => Shape::SignalQuality,
        }
    }
}

/// Shape names, with the D-Bus signature they are read from.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    #[display("bool (b)")]
    Bool,
    #[display("i32")]
    I32,
    #[display("u32")]
    U32,
    #[display("string (s)")]
    Text,
    #[display("object path (o)")]
    ObjectId,
    #[display("string list (as)")]
    TextList,
    #[display("object path list (ao)")]
    ObjectIdList,
    #[display("port list (a(su))")]
    Ports,
    #[display("signal quality ((ub))")]
    SignalQuality,
}

/// A record that can be filled by the generic decoder.
pub trait Record: Default + Send + 'static {
    /// Interface the properties of [`Record::fields`] live on.
    const INTERFACE: &'static str;

    fn fields() -> &'static [Field<Self>];
}

/// Builds a [`Field`] entry: `field!("Model" => model: Text)`.
#[macro_export]
macro_rules! field {
    ($property:literal => $name:ident: $slot:ident) => {
        $crate::schema::Field {
            name: stringify!($name),
            property: $property,
            slot: $crate::schema::Slot::$slot(|r| &mut r.$name),
        }
    };
}
