//! The normative, host-native-units telemetry record: what a GNSS/telemetry
//! collaborator populates and what a receiver reconstructs. Every field here
//! lives in the unit a human would read off an instrument (metres, m/s,
//! degrees, seconds) — the wire's scaled integers are an encoding detail
//! confined to [`crate::message`].

use serde::{Deserialize, Serialize};

/// Message-type tag occupying the high nibble of every packed message's
/// first byte (§6: stable wire codes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageType {
    BasicId,
    Location,
    Auth,
    SelfId,
    System,
}

impl MessageType {
    pub fn tag(self) -> u8 {
        match self {
            MessageType::BasicId => 0,
            MessageType::Location => 1,
            MessageType::Auth => 2,
            MessageType::SelfId => 3,
            MessageType::System => 4,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(MessageType::BasicId),
            1 => Some(MessageType::Location),
            2 => Some(MessageType::Auth),
            3 => Some(MessageType::SelfId),
            4 => Some(MessageType::System),
            _ => None,
        }
    }
}

/// §6 ID type enumeration. Unknown wire codes outside 0..3 are not expected
/// (receivers treat the nibble itself as the message-type dispatch key, not
/// this field) but are passed through as `Reserved` rather than rejected,
/// per the "unknown enum codes... passed through as raw integers" policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdType {
    None,
    SerialNumber,
    CaaAssigned,
    UtmAssigned,
    Reserved(u8),
}

impl IdType {
    pub fn to_nibble(self) -> u8 {
        match self {
            IdType::None => 0,
            IdType::SerialNumber => 1,
            IdType::CaaAssigned => 2,
            IdType::UtmAssigned => 3,
            IdType::Reserved(n) => n & 0x0F,
        }
    }

    pub fn from_nibble(nibble: u8) -> Self {
        match nibble & 0x0F {
            0 => IdType::None,
            1 => IdType::SerialNumber,
            2 => IdType::CaaAssigned,
            3 => IdType::UtmAssigned,
            other => IdType::Reserved(other),
        }
    }
}

impl Default for IdType {
    fn default() -> Self {
        IdType::None
    }
}

/// §6 UAS type enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UasType {
    None,
    FixedWing,
    Rotorcraft,
    LtaPowered,
    LtaUnpowered,
    Vtol,
    FreeFall,
    Rocket,
    Glider,
    Other,
    Reserved(u8),
}

impl UasType {
    pub fn to_nibble(self) -> u8 {
        match self {
            UasType::None => 0,
            UasType::FixedWing => 1,
            UasType::Rotorcraft => 2,
            UasType::LtaPowered => 3,
            UasType::LtaUnpowered => 4,
            UasType::Vtol => 5,
            UasType::FreeFall => 6,
            UasType::Rocket => 7,
            UasType::Glider => 8,
            UasType::Other => 9,
            UasType::Reserved(n) => n & 0x0F,
        }
    }

    pub fn from_nibble(nibble: u8) -> Self {
        match nibble & 0x0F {
            0 => UasType::None,
            1 => UasType::FixedWing,
            2 => UasType::Rotorcraft,
            3 => UasType::LtaPowered,
            4 => UasType::LtaUnpowered,
            5 => UasType::Vtol,
            6 => UasType::FreeFall,
            7 => UasType::Rocket,
            8 => UasType::Glider,
            9 => UasType::Other,
            other => UasType::Reserved(other),
        }
    }
}

impl Default for UasType {
    fn default() -> Self {
        UasType::None
    }
}

/// §6 Location status enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Undeclared,
    Ground,
    Airborne,
    Reserved(u8),
}

impl Status {
    pub fn to_nibble(self) -> u8 {
        match self {
            Status::Undeclared => 0,
            Status::Ground => 1,
            Status::Airborne => 2,
            Status::Reserved(n) => n & 0x0F,
        }
    }

    pub fn from_nibble(nibble: u8) -> Self {
        match nibble & 0x0F {
            0 => Status::Undeclared,
            1 => Status::Ground,
            2 => Status::Airborne,
            other => Status::Reserved(other),
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::Undeclared
    }
}

/// §6 Auth type enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthType {
    None,
    MfgProgrammedUniqueId,
    Reserved(u8),
    Private(u8),
}

impl AuthType {
    pub fn to_nibble(self) -> u8 {
        match self {
            AuthType::None => 0,
            AuthType::MfgProgrammedUniqueId => 1,
            AuthType::Reserved(n) => n & 0x0F,
            AuthType::Private(n) => n & 0x0F,
        }
    }

    pub fn from_nibble(nibble: u8) -> Self {
        match nibble & 0x0F {
            0 => AuthType::None,
            1 => AuthType::MfgProgrammedUniqueId,
            n @ 2..=9 => AuthType::Reserved(n),
            n => AuthType::Private(n),
        }
    }
}

impl Default for AuthType {
    fn default() -> Self {
        AuthType::None
    }
}

/// §6 Location source (System message bit 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationSource {
    Takeoff,
    LiveGnss,
}

impl LocationSource {
    pub fn to_bit(self) -> bool {
        matches!(self, LocationSource::LiveGnss)
    }

    pub fn from_bit(bit: bool) -> Self {
        if bit {
            LocationSource::LiveGnss
        } else {
            LocationSource::Takeoff
        }
    }
}

impl Default for LocationSource {
    fn default() -> Self {
        LocationSource::Takeoff
    }
}

/// Up to 20 printable bytes; longer inputs are truncated by [`crate::message`]
/// on encode, never here.
pub type UasId = [u8; 20];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicId {
    pub uas_type: UasType,
    pub id_type: IdType,
    pub uas_id: UasId,
}

impl Default for BasicId {
    fn default() -> Self {
        BasicId {
            uas_type: UasType::default(),
            id_type: IdType::default(),
            uas_id: [0u8; 20],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub status: Status,
    pub speed_ns: f32,
    pub speed_ew: f32,
    pub speed_vertical: f32,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude_baro: f32,
    pub altitude_geo: f32,
    pub height_above_takeoff: f32,
    pub horiz_accuracy: f32,
    pub vert_accuracy: f32,
    pub speed_accuracy: f32,
    pub ts_accuracy: f32,
    /// Seconds since the top of the current UTC hour, range `[0, 3600)`.
    pub timestamp: f32,
}

impl Default for Location {
    fn default() -> Self {
        Location {
            status: Status::default(),
            speed_ns: 0.0,
            speed_ew: 0.0,
            speed_vertical: 0.0,
            latitude: 0.0,
            longitude: 0.0,
            altitude_baro: 0.0,
            altitude_geo: 0.0,
            height_above_takeoff: 0.0,
            horiz_accuracy: 0.0,
            vert_accuracy: 0.0,
            speed_accuracy: 0.0,
            ts_accuracy: 0.0,
            timestamp: 0.0,
        }
    }
}

pub type AuthData = [u8; 23];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Auth {
    /// 0..15.
    pub data_page: u8,
    pub auth_type: AuthType,
    pub auth_data: AuthData,
}

impl Default for Auth {
    fn default() -> Self {
        Auth {
            data_page: 0,
            auth_type: AuthType::default(),
            auth_data: [0u8; 23],
        }
    }
}

pub type SelfIdDesc = [u8; 23];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfId {
    pub desc_type: u8,
    pub desc: SelfIdDesc,
}

impl Default for SelfId {
    fn default() -> Self {
        SelfId {
            desc_type: 0,
            desc: [0u8; 23],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct System {
    pub location_source: LocationSource,
    pub latitude: f64,
    pub longitude: f64,
    pub group_count: i16,
    pub group_radius: f32,
    pub group_ceiling: f32,
}

impl Default for System {
    fn default() -> Self {
        System {
            location_source: LocationSource::default(),
            latitude: 0.0,
            longitude: 0.0,
            group_count: 0,
            group_radius: 0.0,
            group_ceiling: 0.0,
        }
    }
}

/// Aggregate of the five message bodies for a single aircraft, plus the
/// implicit message-pack sizing (`single_message_size = 25`,
/// `pack_size = 5`) every canonical broadcast carries.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct UasSnapshot {
    pub basic_id: BasicId,
    pub location: Location,
    pub auth: Auth,
    pub self_id: SelfId,
    pub system: System,
}

impl UasSnapshot {
    pub const SINGLE_MESSAGE_SIZE: u8 = 25;
    pub const PACK_SIZE: u8 = 5;
}
