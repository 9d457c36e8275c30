//! System message (tag 4): operator location and UAS group info (§4.2).

use deku::{DekuContainerRead, DekuContainerWrite, DekuRead, DekuWrite};

use super::{message_type_of, pack_header, require_capacity, require_length, MESSAGE_SIZE};
use crate::error::Result;
use crate::quantize;
use crate::snapshot::{LocationSource, MessageType, System};

#[derive(Debug, Clone, PartialEq, DekuRead, DekuWrite)]
#[deku(endian = "little")]
struct SystemWire {
    header: u8,
    source_and_reserved: u8,
    latitude: i32,
    longitude: i32,
    group_count: i16,
    group_radius: i8,
    group_ceiling: i16,
    reserved: [u8; 10],
}

pub fn encode(system: &System) -> [u8; MESSAGE_SIZE] {
    let wire = SystemWire {
        header: pack_header(MessageType::System),
        source_and_reserved: system.location_source.to_bit() as u8,
        latitude: quantize::encode_degrees(system.latitude),
        longitude: quantize::encode_degrees(system.longitude),
        group_count: system.group_count,
        group_radius: quantize::encode_group_radius(system.group_radius),
        group_ceiling: quantize::encode_group_ceiling(system.group_ceiling),
        reserved: [0u8; 10],
    };

    let bytes = wire
        .to_bytes()
        .expect("SystemWire has no validated fields that can reject a write");
    bytes.try_into().expect("SystemWire is exactly 25 bytes")
}

pub fn encode_into(system: &System, buf: &mut [u8]) -> Result<usize> {
    require_capacity(buf)?;
    buf[..MESSAGE_SIZE].copy_from_slice(&encode(system));
    Ok(MESSAGE_SIZE)
}

pub fn decode(buf: &[u8]) -> Result<System> {
    require_length(buf)?;
    message_type_of(buf[0])?;
    let (_, wire) = SystemWire::from_bytes((&buf[..MESSAGE_SIZE], 0))?;

    Ok(System {
        location_source: LocationSource::from_bit(wire.source_and_reserved & 0x01 != 0),
        latitude: quantize::decode_degrees(wire.latitude),
        longitude: quantize::decode_degrees(wire.longitude),
        group_count: wire.group_count,
        group_radius: quantize::decode_group_radius(wire.group_radius),
        group_ceiling: quantize::decode_group_ceiling(wire.group_ceiling),
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use hexlit::hex;

    use super::*;

    /// Header 0x40 (System tag), source bit set (LiveGnss), lat/lon for
    /// 37.7749000/-122.4194000, group_count=3, group_radius=50m,
    /// group_ceiling=100m.
    #[test]
    fn decodes_literal_system_bytes() {
        let wire = hex!("400108fe8316304808b7030005980800000000000000000000");
        let decoded = decode(&wire).unwrap();
        assert_relative_eq!(decoded.latitude, 37.7749000, epsilon = 1e-7);
        assert_relative_eq!(decoded.longitude, -122.4194000, epsilon = 1e-7);
        assert_eq!(decoded.group_count, 3);
        assert_relative_eq!(decoded.group_radius, 50.0);
        assert_relative_eq!(decoded.group_ceiling, 100.0);
        assert_eq!(decoded.location_source, LocationSource::LiveGnss);
    }

    #[test]
    fn encode_decode_round_trip() {
        let system = System {
            location_source: LocationSource::LiveGnss,
            latitude: 37.7749000,
            longitude: -122.4194000,
            group_count: 3,
            group_radius: 50.0,
            group_ceiling: 100.0,
        };
        let wire = encode(&system);
        assert_eq!(wire[0], 0x40);
        assert_eq!(wire[1], 0x01);

        let decoded = decode(&wire).unwrap();
        assert_relative_eq!(decoded.latitude, 37.7749000, epsilon = 1e-7);
        assert_eq!(decoded.group_count, 3);
        assert_relative_eq!(decoded.group_radius, 50.0);
        assert_relative_eq!(decoded.group_ceiling, 100.0);
        assert_eq!(decoded.location_source, LocationSource::LiveGnss);
    }

    #[test]
    fn takeoff_location_source_is_bit_zero() {
        let system = System {
            location_source: LocationSource::Takeoff,
            ..System::default()
        };
        let wire = encode(&system);
        assert_eq!(wire[1] & 0x01, 0);
    }
}
