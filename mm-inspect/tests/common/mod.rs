#![allow(dead_code)]

use async_trait::async_trait;
use mockall::mock;
use orb_mm_inspect::{
    bus::{self, BusError},
    consts::{
        BEARER_IFACE, GET_LOCATION, GET_MANAGED_OBJECTS, LOCATION_IFACE, MODEM_3GPP_IFACE,
        MODEM_IFACE, OBJECT_MANAGER_IFACE, ROOT_PATH, SIM_IFACE,
    },
    ObjectId,
};
use std::{
    collections::{HashMap, HashSet},
    time::Duration,
};
use zbus::{
    fdo,
    zvariant::{ObjectPath, OwnedValue, Value},
};

pub const MODEM_0: &str = "/org/freedesktop/ModemManager1/Modem/0";
pub const MODEM_1: &str = "/org/freedesktop/ModemManager1/Modem/1";
pub const BEARER_0: &str = "/org/freedesktop/ModemManager1/Bearer/0";
pub const SIM_0: &str = "/org/freedesktop/ModemManager1/SIM/0";

mock! {
    pub Bus {}
    #[async_trait]
    impl bus::Bus for Bus {
        async fn call(
            &self,
            id: &ObjectId,
            interface: &str,
            method: &str,
        ) -> Result<OwnedValue, BusError>;

        async fn get_property(
            &self,
            id: &ObjectId,
            property: &str,
        ) -> Result<OwnedValue, BusError>;
    }
}

pub fn ov<'a>(value: impl Into<Value<'a>>) -> OwnedValue {
    OwnedValue::try_from(value.into()).unwrap()
}

pub fn path(s: &str) -> OwnedValue {
    ov(ObjectPath::try_from(s.to_owned()).unwrap())
}

pub fn paths(s: &[&str]) -> OwnedValue {
    let paths: Vec<ObjectPath<'static>> = s
        .iter()
        .map(|p| ObjectPath::try_from(p.to_string()).unwrap())
        .collect();

    ov(paths)
}

/// Objects and their properties, served through a [`MockBus`].
#[derive(Default)]
pub struct FakeModemManager {
    properties: HashMap<(String, String), OwnedValue>,
    stuck: HashSet<(String, String)>,
    calls: HashMap<(String, String), OwnedValue>,
}

impl FakeModemManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn property(
        mut self,
        id: &str,
        interface: &str,
        name: &str,
        value: OwnedValue,
    ) -> Self {
        self.properties
            .insert((id.to_owned(), format!("{interface}.{name}")), value);
        self
    }

    pub fn properties(
        self,
        id: &str,
        interface: &str,
        properties: Vec<(&str, OwnedValue)>,
    ) -> Self {
        properties
            .into_iter()
            .fold(self, |fake, (name, value)| fake.property(id, interface, name, value))
    }

    /// Removes a property so that reading it fails with `NoSuchProperty`.
    pub fn without(mut self, id: &str, interface: &str, name: &str) -> Self {
        self.properties
            .remove(&(id.to_owned(), format!("{interface}.{name}")));
        self
    }

    /// Makes reading a property fail with `Timeout`, as if the service never answered.
    pub fn stuck(mut self, id: &str, interface: &str, name: &str) -> Self {
        self.stuck
            .insert((id.to_owned(), format!("{interface}.{name}")));
        self
    }

    pub fn reply(
        mut self,
        id: &str,
        interface: &str,
        method: &str,
        value: OwnedValue,
    ) -> Self {
        self.calls
            .insert((id.to_owned(), format!("{interface}.{method}")), value);
        self
    }

    /// Answers `GetManagedObjects` on the root with `ids`.
    pub fn managed(self, ids: &[&str]) -> Self {
        self.reply(
            ROOT_PATH,
            OBJECT_MANAGER_IFACE,
            GET_MANAGED_OBJECTS,
            managed_objects(ids),
        )
    }

    /// Answers `GetLocation` on `id` with the `source -> value` entries.
    pub fn location(self, id: &str, entries: &[(u32, &str)]) -> Self {
        let entries: HashMap<u32, Value<'static>> = entries
            .iter()
            .map(|(source, value)| (*source, Value::from(value.to_string())))
            .collect();

        self.reply(id, LOCATION_IFACE, GET_LOCATION, ov(entries))
    }

    /// A modem with a SIM and one bearer, all with every property present.
    pub fn telit(self, id: &str) -> Self {
        self.properties(id, MODEM_IFACE, modem_properties())
            .properties(id, MODEM_3GPP_IFACE, modem_3gpp_properties())
            .properties(SIM_0, SIM_IFACE, sim_properties())
            .properties(BEARER_0, BEARER_IFACE, bearer_properties())
    }

    pub fn into_mock(self) -> MockBus {
        let Self {
            properties,
            stuck,
            calls,
        } = self;
        let mut bus = MockBus::new();

        bus.expect_get_property().returning(move |id, property| {
            let key = (id.to_string(), property.to_owned());
            if stuck.contains(&key) {
                return Err(BusError::Timeout(Duration::from_secs(5)));
            }
            if let Some(value) = properties.get(&key) {
                return Ok(value.try_clone().unwrap());
            }

            // Mirrors how the service answers for what it doesn't export.
            let (interface, _) = property.rsplit_once('.').unwrap();
            let exported: Vec<&String> = properties
                .keys()
                .filter(|(object, _)| object == id.as_str())
                .map(|(_, p)| p)
                .collect();

            if exported
                .iter()
                .any(|p| p.rsplit_once('.').is_some_and(|(iface, _)| iface == interface))
            {
                Err(BusError::NoSuchProperty(property.to_owned()))
            } else if !exported.is_empty() {
                Err(BusError::Fdo(fdo::Error::UnknownInterface(interface.to_owned())))
            } else {
                Err(BusError::Fdo(fdo::Error::UnknownObject(id.to_string())))
            }
        });
        bus.expect_call().returning(move |id, interface, method| {
            calls
                .get(&(id.to_string(), format!("{interface}.{method}")))
                .map(|value| value.try_clone().unwrap())
                .ok_or_else(|| BusError::Fdo(fdo::Error::UnknownMethod(method.to_owned())))
        });

        bus
    }
}

/// `GetManagedObjects` reply listing `ids`, each with an empty modem interface.
pub fn managed_objects(ids: &[&str]) -> OwnedValue {
    let objects: HashMap<ObjectPath<'static>, HashMap<String, HashMap<String, OwnedValue>>> =
        ids.iter()
            .map(|id| {
                let interfaces = HashMap::from([(MODEM_IFACE.to_owned(), HashMap::new())]);
                (ObjectPath::try_from(id.to_string()).unwrap(), interfaces)
            })
            .collect();

    ov(objects)
}

pub fn modem_properties() -> Vec<(&'static str, OwnedValue)> {
    vec![
        ("Sim", path(SIM_0)),
        ("Bearers", paths(&[BEARER_0])),
        ("Model", ov("LE910C4-WWXD")),
        ("Manufacturer", ov("Telit")),
        ("Device", ov("/sys/devices/platform/bus@0/3610000.usb/usb1/1-2")),
        ("PrimaryPort", ov("cdc-wdm0")),
        (
            "Ports",
            ov(vec![("cdc-wdm0".to_owned(), 6u32), ("wwan0".to_owned(), 2u32)]),
        ),
        ("OwnNumbers", ov(Vec::<String>::new())),
        ("Revision", ov("25.30.608")),
        ("HardwareRevision", ov("1.20")),
        ("EquipmentIdentifier", ov("353338976168895")),
        ("Drivers", ov(vec!["option", "qmi_wwan"])),
        ("State", ov(11i32)),
        ("AccessTechnologies", ov(1u32 << 14)),
        ("SignalQuality", ov((73u32, true))),
    ]
}

pub fn modem_3gpp_properties() -> Vec<(&'static str, OwnedValue)> {
    vec![
        ("Imei", ov("353338976168895")),
        ("OperatorCode", ov("26203")),
        ("OperatorName", ov("o2 - de")),
        ("RegistrationState", ov(1u32)),
    ]
}

pub fn sim_properties() -> Vec<(&'static str, OwnedValue)> {
    vec![
        ("Imsi", ov("262037200000000")),
        ("OperatorIdentifier", ov("26203")),
        ("OperatorName", ov("o2 - de")),
        ("SimIdentifier", ov("8949227220000000000")),
    ]
}

pub fn bearer_properties() -> Vec<(&'static str, OwnedValue)> {
    vec![
        ("Connected", ov(true)),
        ("Suspended", ov(false)),
        ("Interface", ov("wwan0")),
        ("IpTimeout", ov(20u32)),
    ]
}
