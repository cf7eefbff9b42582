//! Records read from ModemManager objects, and their schema tables.

use crate::{
    consts::{BEARER_IFACE, MODEM_3GPP_IFACE, MODEM_IFACE, SIM_IFACE},
    field,
    schema::{Field, Record},
    signal::SignalQuality,
    ObjectId,
};
use serde::{Deserialize, Serialize};

/// `org.freedesktop.ModemManager1.Modem`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modem {
    /// Null when no SIM is inserted.
    pub sim: ObjectId,
    pub bearers: Vec<ObjectId>,
    pub model: String,
    pub manufacturer: String,
    pub device: String,
    pub primary_port: String,
    pub ports: Vec<Port>,
    pub own_numbers: Vec<String>,
    /// Firmware revision.
    pub revision: String,
    pub hardware_revision: String,
    /// IMEI for 3GPP modems.
    pub equipment_identifier: String,
    pub drivers: Vec<String>,
    /// `MMModemState`, e.g. 11 for connected.
    pub state: i32,
    /// `MMModemAccessTechnology` bitmask.
    pub access_technologies: u32,
    pub signal_quality: SignalQuality,
}

static MODEM_FIELDS: &[Field<Modem>] = &[
    field!("Sim" => sim: ObjectId),
    field!("Bearers" => bearers: ObjectIdList),
    field!("Model" => model: Text),
    field!("Manufacturer" => manufacturer: Text),
    field!("Device" => device: Text),
    field!("PrimaryPort" => primary_port: Text),
    field!("Ports" => ports: Ports),
    field!("OwnNumbers" => own_numbers: TextList),
    field!("Revision" => revision: Text),
    field!("HardwareRevision" => hardware_revision: Text),
    field!("EquipmentIdentifier" => equipment_identifier: Text),
    field!("Drivers" => drivers: TextList),
    field!("State" => state: I32),
    field!("AccessTechnologies" => access_technologies: U32),
    field!("SignalQuality" => signal_quality: SignalQuality),
];

impl Record for Modem {
    const INTERFACE: &'static str = MODEM_IFACE;

    fn fields() -> &'static [Field<Self>] {
        MODEM_FIELDS
    }
}

/// One entry of the modem's `Ports` property.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    pub name: String,
    /// `MMModemPortType`
    pub kind: u32,
}

/// `org.freedesktop.ModemManager1.Sim`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sim {
    pub imsi: String,
    pub operator_identifier: String,
    pub operator_name: String,
    /// ICCID
    pub sim_identifier: String,
}

static SIM_FIELDS: &[Field<Sim>] = &[
    field!("Imsi" => imsi: Text),
    field!("OperatorIdentifier" => operator_identifier: Text),
    field!("OperatorName" => operator_name: Text),
    field!("SimIdentifier" => sim_identifier: Text),
];

impl Record for Sim {
    const INTERFACE: &'static str = SIM_IFACE;

    fn fields() -> &'static [Field<Self>] {
        SIM_FIELDS
    }
}

/// `org.freedesktop.ModemManager1.Bearer`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bearer {
    pub connected: bool,
    pub suspended: bool,
    /// Network interface, e.g. `wwan0`.
    pub interface: String,
    /// Seconds to wait for IP configuration.
    pub ip_timeout: u32,
}

static BEARER_FIELDS: &[Field<Bearer>] = &[
    field!("Connected" => connected: Bool),
    field!("Suspended" => suspended: Bool),
    field!("Interface" => interface: Text),
    field!("IpTimeout" => ip_timeout: U32),
];

impl Record for Bearer {
    const INTERFACE: &'static str = BEARER_IFACE;

    fn fields() -> &'static [Field<Self>] {
        BEARER_FIELDS
    }
}

/// `org.freedesktop.ModemManager1.Modem.Modem3gpp`, exported on the modem object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modem3gpp {
    pub imei: String,
    pub operator_code: String,
    pub operator_name: String,
    /// `MMModem3gppRegistrationState`
    pub registration_state: u32,
}

static MODEM_3GPP_FIELDS: &[Field<Modem3gpp>] = &[
    field!("Imei" => imei: Text),
    field!("OperatorCode" => operator_code: Text),
    field!("OperatorName" => operator_name: Text),
    field!("RegistrationState" => registration_state: U32),
];

impl Record for Modem3gpp {
    const INTERFACE: &'static str = MODEM_3GPP_IFACE;

    fn fields() -> &'static [Field<Self>] {
        MODEM_3GPP_FIELDS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Location;
    use serde::de::DeserializeOwned;
    use std::collections::HashSet;

    fn roundtrip<T>(value: &T) -> T
    where
        T: Serialize + DeserializeOwned,
    {
        let json = serde_json::to_string(value).unwrap();
        serde_json::from_str(&json).unwrap()
    }

    fn telit() -> Modem {
        Modem {
            sim: ObjectId::new("/org/freedesktop/ModemManager1/SIM/0"),
            bearers: vec![ObjectId::new("/org/freedesktop/ModemManager1/Bearer/1")],
            model: "LE910C4-WWXD".to_owned(),
            manufacturer: "Telit".to_owned(),
            device: "/sys/devices/platform/bus@0/3610000.usb/usb1/1-2".to_owned(),
            primary_port: "cdc-wdm0".to_owned(),
            ports: vec![Port {
                name: "wwan0".to_owned(),
                kind: 2,
            }],
            own_numbers: vec![],
            revision: "25.30.608  1  [Nov 14 2023 07:00:00]".to_owned(),
            hardware_revision: "1.20".to_owned(),
            equipment_identifier: "353338976168895".to_owned(),
            drivers: vec!["option".to_owned(), "qmi_wwan".to_owned()],
            state: 11,
            access_technologies: 1 << 14,
            signal_quality: SignalQuality {
                percent: 75,
                recent: true,
            },
        }
    }

    #[test]
    fn records_survive_a_serde_roundtrip() {
        let modem = telit();
        let sim = Sim {
            imsi: "295050905643977".to_owned(),
            operator_identifier: "29505".to_owned(),
            operator_name: "FL1".to_owned(),
            sim_identifier: "89883030000111825060".to_owned(),
        };
        let bearer = Bearer {
            connected: true,
            suspended: false,
            interface: "wwan0".to_owned(),
            ip_timeout: 20,
        };
        let location = Location {
            mcc: "262".to_owned(),
            mnc: "03".to_owned(),
            lac: "0".to_owned(),
            cid: "26704446".to_owned(),
            tac: "51525".to_owned(),
        };

        assert_eq!(roundtrip(&modem), modem);
        assert_eq!(roundtrip(&sim), sim);
        assert_eq!(roundtrip(&bearer), bearer);
        assert_eq!(roundtrip(&location), location);
    }

    #[test]
    fn serialization_keys_are_the_field_names() {
        let json = serde_json::to_value(telit()).unwrap();

        assert_eq!(json["sim"], "/org/freedesktop/ModemManager1/SIM/0");
        assert_eq!(json["signal_quality"]["percent"], 75);
        assert_eq!(json["primary_port"], "cdc-wdm0");
    }

    #[test]
    fn schema_field_names_are_unique_and_serialized() {
        fn check<R: Record + Serialize>() {
            let json = serde_json::to_value(R::default()).unwrap();
            let mut seen = HashSet::new();
            for field in R::fields() {
                assert!(seen.insert(field.name), "duplicate field {}", field.name);
                assert!(
                    json.get(field.name).is_some(),
                    "{} is not a serialized key",
                    field.name
                );
            }
        }

        check::<Modem>();
        check::<Sim>();
        check::<Bearer>();
        check::<Modem3gpp>();
    }
}
