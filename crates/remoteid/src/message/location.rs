//! Location message (tag 1): position, velocity, and accuracy (§4.2). The
//! only message type with enough little-endian multi-byte fields to make
//! `deku` worth reaching for; the two flag/nibble bytes stay plain `u8`
//! with explicit shift/mask, per the Design Notes' instruction not to lean
//! on a layout-dependent bitfield mechanism.

use deku::{DekuContainerRead, DekuContainerWrite, DekuRead, DekuWrite};

use super::{message_type_of, pack_header, require_capacity, require_length, MESSAGE_SIZE};
use crate::error::{RemoteIdError, Result};
use crate::quantize;
use crate::snapshot::{Location, MessageType, Status};

#[derive(Debug, Clone, PartialEq, DekuRead, DekuWrite)]
#[deku(endian = "little")]
struct LocationWire {
    header: u8,
    status_and_mult: u8,
    speed_ns: u8,
    speed_ew: u8,
    speed_vertical: i8,
    latitude: i32,
    longitude: i32,
    altitude_baro: u16,
    altitude_geo: u16,
    height_above_takeoff: u16,
    horiz_vert_accuracy: u8,
    speed_ts_accuracy: u8,
    timestamp: u16,
    reserved: [u8; 2],
}

pub fn encode(location: &Location) -> [u8; MESSAGE_SIZE] {
    let (speed_ns, ns_mult) = quantize::encode_speed(location.speed_ns);
    let (speed_ew, ew_mult) = quantize::encode_speed(location.speed_ew);

    let wire = LocationWire {
        header: pack_header(MessageType::Location),
        status_and_mult: (location.status.to_nibble() << 4)
            | ((ns_mult as u8) << 1)
            | (ew_mult as u8),
        speed_ns,
        speed_ew,
        speed_vertical: quantize::encode_vertical_speed(location.speed_vertical),
        latitude: quantize::encode_degrees(location.latitude),
        longitude: quantize::encode_degrees(location.longitude),
        altitude_baro: quantize::encode_altitude(location.altitude_baro),
        altitude_geo: quantize::encode_altitude(location.altitude_geo),
        height_above_takeoff: quantize::encode_altitude(location.height_above_takeoff),
        horiz_vert_accuracy: (quantize::encode_vertical_accuracy(location.vert_accuracy) << 4)
            | quantize::encode_horizontal_accuracy(location.horiz_accuracy),
        speed_ts_accuracy: (quantize::encode_ts_accuracy(location.ts_accuracy) << 4)
            | quantize::encode_speed_accuracy(location.speed_accuracy),
        timestamp: quantize::encode_timestamp(location.timestamp),
        reserved: [0u8; 2],
    };

    let bytes = wire
        .to_bytes()
        .expect("LocationWire has no validated fields that can reject a write");
    bytes.try_into().expect("LocationWire is exactly 25 bytes")
}

pub fn encode_into(location: &Location, buf: &mut [u8]) -> Result<usize> {
    require_capacity(buf)?;
    buf[..MESSAGE_SIZE].copy_from_slice(&encode(location));
    Ok(MESSAGE_SIZE)
}

pub fn decode(buf: &[u8]) -> Result<Location> {
    require_length(buf)?;
    message_type_of(buf[0])?;
    let (_, wire) = LocationWire::from_bytes((&buf[..MESSAGE_SIZE], 0))?;

    let status = Status::from_nibble(wire.status_and_mult >> 4);
    let ns_mult = (wire.status_and_mult >> 1) & 0x01 != 0;
    let ew_mult = wire.status_and_mult & 0x01 != 0;

    Ok(Location {
        status,
        speed_ns: quantize::decode_speed(wire.speed_ns, ns_mult),
        speed_ew: quantize::decode_speed(wire.speed_ew, ew_mult),
        speed_vertical: quantize::decode_vertical_speed(wire.speed_vertical),
        latitude: quantize::decode_degrees(wire.latitude),
        longitude: quantize::decode_degrees(wire.longitude),
        altitude_baro: quantize::decode_altitude(wire.altitude_baro),
        altitude_geo: quantize::decode_altitude(wire.altitude_geo),
        height_above_takeoff: quantize::decode_altitude(wire.height_above_takeoff),
        horiz_accuracy: quantize::decode_horizontal_accuracy(wire.horiz_vert_accuracy & 0x0F),
        vert_accuracy: quantize::decode_vertical_accuracy(wire.horiz_vert_accuracy >> 4),
        speed_accuracy: quantize::decode_speed_accuracy(wire.speed_ts_accuracy & 0x0F),
        ts_accuracy: quantize::decode_ts_accuracy(wire.speed_ts_accuracy >> 4),
        timestamp: quantize::decode_timestamp(wire.timestamp),
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use hexlit::hex;

    use super::*;

    /// Scenario B's wire bytes as a literal fixture, matching the field
    /// values `scenario_b_location_low_speed` builds by hand below.
    #[test]
    fn decodes_scenario_b_literal_bytes() {
        let wire = hex!("00203020fc08fe8316304808b7d0079808d007000000000000");
        assert_eq!(wire.len(), 25);

        let decoded = decode(&wire).unwrap();
        assert_eq!(decoded.status, Status::Airborne);
        assert_relative_eq!(decoded.speed_ns, 12.0);
        assert_relative_eq!(decoded.speed_ew, 8.0);
        assert_relative_eq!(decoded.speed_vertical, -2.0);
        assert_relative_eq!(decoded.latitude, 37.7749000, epsilon = 1e-7);
        assert_relative_eq!(decoded.longitude, -122.4194000, epsilon = 1e-7);
        assert_relative_eq!(decoded.altitude_geo, 100.0);
    }

    /// Scenario B: low-speed regime, both multiplier flags clear.
    #[test]
    fn scenario_b_location_low_speed() {
        let location = Location {
            status: Status::Airborne,
            speed_ns: 12.0,
            speed_ew: 8.0,
            speed_vertical: -2.0,
            latitude: 37.7749000,
            longitude: -122.4194000,
            altitude_geo: 100.0,
            ..Location::default()
        };

        let wire = encode(&location);
        assert_eq!(wire[1] >> 4, 2);
        assert_eq!(wire[1] & 0x03, 0b00);
        assert_eq!(wire[2], 48);
        assert_eq!(wire[3], 32);
        assert_eq!(wire[4], 0xFC);
        assert_eq!(
            i32::from_le_bytes(wire[5..9].try_into().unwrap()),
            377_749_000
        );
        assert_eq!(
            u16::from_le_bytes(wire[15..17].try_into().unwrap()),
            2_200
        );

        let decoded = decode(&wire).unwrap();
        assert_relative_eq!(decoded.speed_ns, 12.0);
        assert_relative_eq!(decoded.speed_ew, 8.0);
        assert_relative_eq!(decoded.speed_vertical, -2.0);
        assert_relative_eq!(decoded.latitude, 37.7749000, epsilon = 1e-7);
        assert_relative_eq!(decoded.altitude_geo, 100.0);
    }

    /// Scenario C: high-speed regime, NS multiplier flag set.
    #[test]
    fn scenario_c_location_high_speed() {
        let location = Location {
            speed_ns: 80.0,
            ..Location::default()
        };
        let wire = encode(&location);
        assert_eq!(wire[1] & 0x02, 0x02);
        assert_eq!(wire[2], 21);
    }

    #[test]
    fn accuracy_nibbles_pack_into_two_bytes() {
        let location = Location {
            horiz_accuracy: 0.5,
            vert_accuracy: 0.5,
            speed_accuracy: 0.2,
            ts_accuracy: 0.3,
            ..Location::default()
        };
        let wire = encode(&location);
        assert_eq!(wire[19] & 0x0F, 12);
        assert_eq!(wire[19] >> 4, 6);
        assert_eq!(wire[20] & 0x0F, 4);

        let decoded = decode(&wire).unwrap();
        assert_eq!(decoded.horiz_accuracy, 1.0);
        assert_eq!(decoded.vert_accuracy, 1.0);
        assert_eq!(decoded.speed_accuracy, 0.3);
    }

    #[test]
    fn decode_rejects_truncated_input() {
        let err = decode(&[0u8; 24]).unwrap_err();
        assert!(matches!(err, RemoteIdError::Truncated { .. }));
    }
}
