//! Broadcast frame builder/parser (§4.4): wraps a [`crate::pack`]
//! MessagePack in the 802.11 management-action / NAN Service Discovery
//! envelope.
//!
//! Expressed as explicit byte-offset slicing rather than a single derived
//! struct — the Service Info section's length depends on the message pack
//! it carries, which `deku`'s static layout isn't a natural fit for; the
//! Design Notes call for explicit shift/mask-free offset code over a
//! layout-dependent record type here anyway.

use crate::error::{RemoteIdError, Result};
use crate::pack;
use crate::snapshot::UasSnapshot;

pub const MGMT_HEADER_SIZE: usize = 24;
pub const NAN_SD_HEADER_SIZE: usize = 6;
/// `attribute_id` (1 byte) + `length` (2 bytes LE).
pub const ATTR_HEADER_SIZE: usize = 3;
/// `service_id`(6) + `instance_id`(1) + `requestor_instance_id`(1) +
/// `service_control`(1) + `service_info_length`(1).
pub const ATTR_BODY_SIZE: usize = 10;
/// The caller-supplied `message_counter` byte.
pub const COUNTER_SIZE: usize = 1;

pub const ENVELOPE_SIZE: usize =
    MGMT_HEADER_SIZE + NAN_SD_HEADER_SIZE + ATTR_HEADER_SIZE + ATTR_BODY_SIZE + COUNTER_SIZE;
pub const CANONICAL_FRAME_SIZE: usize = ENVELOPE_SIZE + pack::CANONICAL_PACK_SIZE;

const FRAME_CONTROL: u16 = 0x00D0;
const BROADCAST: [u8; 6] = [0xFF; 6];
const NAN_CATEGORY: u8 = 0x04;
const NAN_ACTION_CODE: u8 = 0x09;
const NAN_OUI: [u8; 3] = [0x50, 0x6F, 0x9A];
const NAN_OUI_TYPE: u8 = 0x13;
const ATTRIBUTE_ID: u8 = 0x03;
const SERVICE_ID: [u8; 6] = [0x88, 0x69, 0x19, 0x9D, 0x92, 0x09];
const INSTANCE_ID: u8 = 0x01;
const REQUESTOR_INSTANCE_ID: u8 = 0x00;
const SERVICE_CONTROL: u8 = 0x10;

const FRAME_CONTROL_OFFSET: usize = 0;
const DA_OFFSET: usize = 4;
const SA_OFFSET: usize = 10;
const BSSID_OFFSET: usize = 16;
const CATEGORY_OFFSET: usize = MGMT_HEADER_SIZE;
const ACTION_CODE_OFFSET: usize = CATEGORY_OFFSET + 1;
const OUI_OFFSET: usize = ACTION_CODE_OFFSET + 1;
const OUI_TYPE_OFFSET: usize = OUI_OFFSET + 3;
const ATTRIBUTE_ID_OFFSET: usize = MGMT_HEADER_SIZE + NAN_SD_HEADER_SIZE;
const ATTR_LENGTH_OFFSET: usize = ATTRIBUTE_ID_OFFSET + 1;
const SERVICE_ID_OFFSET: usize = ATTRIBUTE_ID_OFFSET + ATTR_HEADER_SIZE;
const INSTANCE_ID_OFFSET: usize = SERVICE_ID_OFFSET + 6;
const REQUESTOR_INSTANCE_ID_OFFSET: usize = INSTANCE_ID_OFFSET + 1;
const SERVICE_CONTROL_OFFSET: usize = REQUESTOR_INSTANCE_ID_OFFSET + 1;
const SERVICE_INFO_LENGTH_OFFSET: usize = SERVICE_CONTROL_OFFSET + 1;
const COUNTER_OFFSET: usize = SERVICE_INFO_LENGTH_OFFSET + 1;
const PACK_OFFSET: usize = COUNTER_OFFSET + COUNTER_SIZE;

/// Builds the canonical 172-byte action frame for one aircraft snapshot.
pub fn build(mac: [u8; 6], counter: u8, snapshot: &UasSnapshot) -> [u8; CANONICAL_FRAME_SIZE] {
    let mut buf = [0u8; CANONICAL_FRAME_SIZE];
    build_into(mac, counter, snapshot, &mut buf)
        .expect("fixed-size buffer always fits the canonical frame");
    buf
}

pub fn build_into(mac: [u8; 6], counter: u8, snapshot: &UasSnapshot, buf: &mut [u8]) -> Result<usize> {
    if buf.len() < CANONICAL_FRAME_SIZE {
        return Err(RemoteIdError::BufferTooSmall {
            needed: CANONICAL_FRAME_SIZE,
            available: buf.len(),
        });
    }

    buf[FRAME_CONTROL_OFFSET..FRAME_CONTROL_OFFSET + 2].copy_from_slice(&FRAME_CONTROL.to_le_bytes());
    // duration (2 bytes) stays zero.
    buf[DA_OFFSET..DA_OFFSET + 6].copy_from_slice(&BROADCAST);
    buf[SA_OFFSET..SA_OFFSET + 6].copy_from_slice(&mac);
    buf[BSSID_OFFSET..BSSID_OFFSET + 6].copy_from_slice(&mac);
    // seq_ctrl (2 bytes) stays zero.

    buf[CATEGORY_OFFSET] = NAN_CATEGORY;
    buf[ACTION_CODE_OFFSET] = NAN_ACTION_CODE;
    buf[OUI_OFFSET..OUI_OFFSET + 3].copy_from_slice(&NAN_OUI);
    buf[OUI_TYPE_OFFSET] = NAN_OUI_TYPE;

    let service_info_length = (COUNTER_SIZE + pack::CANONICAL_PACK_SIZE) as u16;
    let attribute_length = ATTR_BODY_SIZE as u16 + service_info_length;

    buf[ATTRIBUTE_ID_OFFSET] = ATTRIBUTE_ID;
    buf[ATTR_LENGTH_OFFSET..ATTR_LENGTH_OFFSET + 2].copy_from_slice(&attribute_length.to_le_bytes());
    buf[SERVICE_ID_OFFSET..SERVICE_ID_OFFSET + 6].copy_from_slice(&SERVICE_ID);
    buf[INSTANCE_ID_OFFSET] = INSTANCE_ID;
    buf[REQUESTOR_INSTANCE_ID_OFFSET] = REQUESTOR_INSTANCE_ID;
    buf[SERVICE_CONTROL_OFFSET] = SERVICE_CONTROL;
    buf[SERVICE_INFO_LENGTH_OFFSET] = service_info_length as u8;

    buf[COUNTER_OFFSET] = counter;
    pack::assemble_into(snapshot, &mut buf[PACK_OFFSET..PACK_OFFSET + pack::CANONICAL_PACK_SIZE])?;

    Ok(CANONICAL_FRAME_SIZE)
}

/// Parses an action frame, verifying every envelope discriminator before
/// handing the remainder to the pack parser. Mismatched discriminators
/// yield [`RemoteIdError::NotOurFrame`]; internally inconsistent but
/// clearly-addressed frames yield [`RemoteIdError::MalformedFrame`].
pub fn parse(buf: &[u8]) -> Result<(u8, UasSnapshot)> {
    if buf.len() < ENVELOPE_SIZE {
        return Err(RemoteIdError::Truncated {
            needed: ENVELOPE_SIZE,
            available: buf.len(),
        });
    }

    let frame_control = u16::from_le_bytes(
        buf[FRAME_CONTROL_OFFSET..FRAME_CONTROL_OFFSET + 2]
            .try_into()
            .unwrap(),
    );
    if frame_control != FRAME_CONTROL {
        return Err(RemoteIdError::NotOurFrame);
    }

    if buf[CATEGORY_OFFSET] != NAN_CATEGORY
        || buf[ACTION_CODE_OFFSET] != NAN_ACTION_CODE
        || buf[OUI_OFFSET..OUI_OFFSET + 3] != NAN_OUI
        || buf[OUI_TYPE_OFFSET] != NAN_OUI_TYPE
    {
        return Err(RemoteIdError::NotOurFrame);
    }

    if buf[ATTRIBUTE_ID_OFFSET] != ATTRIBUTE_ID {
        return Err(RemoteIdError::NotOurFrame);
    }

    if buf[SERVICE_ID_OFFSET..SERVICE_ID_OFFSET + 6] != SERVICE_ID {
        return Err(RemoteIdError::MalformedFrame("unexpected service_id"));
    }

    let attribute_length = u16::from_le_bytes(
        buf[ATTR_LENGTH_OFFSET..ATTR_LENGTH_OFFSET + 2]
            .try_into()
            .unwrap(),
    );
    let service_info_length = buf[SERVICE_INFO_LENGTH_OFFSET] as usize;

    if attribute_length as usize != ATTR_BODY_SIZE + service_info_length {
        return Err(RemoteIdError::MalformedFrame(
            "attribute_length inconsistent with service_info_length",
        ));
    }
    if service_info_length < COUNTER_SIZE {
        return Err(RemoteIdError::MalformedFrame(
            "service_info_length too small to hold the counter byte",
        ));
    }

    let service_info_end = PACK_OFFSET - COUNTER_SIZE + service_info_length;
    if buf.len() < service_info_end {
        return Err(RemoteIdError::Truncated {
            needed: service_info_end,
            available: buf.len(),
        });
    }

    let counter = buf[COUNTER_OFFSET];
    let snapshot = pack::parse(&buf[PACK_OFFSET..service_info_end])?;

    Ok((counter, snapshot))
}

#[cfg(test)]
mod tests {
    use hexlit::hex;

    use super::*;
    use crate::snapshot::{IdType, Location, Status, UasType};

    fn scenario_d_snapshot() -> UasSnapshot {
        UasSnapshot {
            location: Location {
                status: Status::Airborne,
                latitude: 37.7749000,
                longitude: -122.4194000,
                ..Location::default()
            },
            ..UasSnapshot::default()
        }
    }

    /// Scenario E, with the 172-byte / offset-43 correction documented in
    /// DESIGN.md.
    #[test]
    fn scenario_e_action_frame_envelope() {
        let mac = [0x02, 0x11, 0x22, 0x33, 0x44, 0x55];
        let frame = build(mac, 7, &scenario_d_snapshot());

        assert_eq!(frame.len(), 172);
        assert_eq!(&frame[4..10], &[0xFF; 6]);
        assert_eq!(&frame[10..16], &mac);
        assert_eq!(frame[24], 0x04);
        assert_eq!(frame[25], 0x09);
        assert_eq!(&frame[26..29], &[0x50, 0x6F, 0x9A]);
        assert_eq!(frame[29], 0x13);
        assert_eq!(frame[30], 0x03);
        assert_eq!(&frame[33..39], &[0x88, 0x69, 0x19, 0x9D, 0x92, 0x09]);
        assert_eq!(frame[43], 7);

        let (counter, snapshot) = parse(&frame).unwrap();
        assert_eq!(counter, 7);
        assert_eq!(snapshot.location.status, Status::Airborne);
    }

    /// Scenario E's envelope built from literal byte fixtures rather than
    /// `build`: management header, NAN Service Discovery header, attribute
    /// header/body, counter, and the Scenario D message pack, each as its
    /// own segment so the offsets stay legible.
    #[test]
    fn parses_scenario_e_literal_bytes() {
        let mgmt_header = hex!("d0000000ffffffffffff0211223344550211223344550000");
        let nan_sd_header = hex!("0409506f9a13");
        let attr_header = hex!("038b00");
        let attr_body = hex!("8869199d920901001081");
        let counter = hex!("07");
        let basic_id = hex!("00124142434445460000000000000000000000000000000000");
        let location = hex!("002000000008fe8316304808b7d007d007d007000000000000");
        let auth = hex!("20000000000000000000000000000000000000000000000000");
        let self_id = hex!("30000000000000000000000000000000000000000000000000");
        let system = hex!("40000000000000000000000000d00700000000000000000000");
        let pack_header = hex!("001905");

        let mut frame = [0u8; CANONICAL_FRAME_SIZE];
        let mut offset = 0;
        for segment in [
            &mgmt_header[..],
            &nan_sd_header[..],
            &attr_header[..],
            &attr_body[..],
            &counter[..],
            &pack_header[..],
            &basic_id[..],
            &location[..],
            &auth[..],
            &self_id[..],
            &system[..],
        ] {
            frame[offset..offset + segment.len()].copy_from_slice(segment);
            offset += segment.len();
        }
        assert_eq!(offset, CANONICAL_FRAME_SIZE);

        let (counter, snapshot) = parse(&frame).unwrap();
        assert_eq!(counter, 7);
        assert_eq!(snapshot.basic_id.uas_type, UasType::Rotorcraft);
        assert_eq!(snapshot.basic_id.id_type, IdType::SerialNumber);
        assert_eq!(snapshot.location.status, Status::Airborne);
    }

    /// Scenario F: an altered OUI is rejected as not ours.
    #[test]
    fn scenario_f_reject_wrong_oui() {
        let mac = [0x02, 0x11, 0x22, 0x33, 0x44, 0x55];
        let mut frame = build(mac, 7, &scenario_d_snapshot());
        frame[26..29].copy_from_slice(&[0x00, 0x00, 0x00]);

        assert!(matches!(parse(&frame), Err(RemoteIdError::NotOurFrame)));
    }

    #[test]
    fn reject_altered_service_id() {
        let mac = [0x02, 0x11, 0x22, 0x33, 0x44, 0x55];
        let mut frame = build(mac, 7, &scenario_d_snapshot());
        frame[33] = 0x00;
        assert!(matches!(
            parse(&frame),
            Err(RemoteIdError::MalformedFrame(_))
        ));
    }

    #[test]
    fn reject_altered_attribute_id() {
        let mac = [0x02, 0x11, 0x22, 0x33, 0x44, 0x55];
        let mut frame = build(mac, 7, &scenario_d_snapshot());
        frame[30] = 0x99;
        assert!(matches!(parse(&frame), Err(RemoteIdError::NotOurFrame)));
    }

    #[test]
    fn reject_inconsistent_length_field() {
        let mac = [0x02, 0x11, 0x22, 0x33, 0x44, 0x55];
        let mut frame = build(mac, 7, &scenario_d_snapshot());
        frame[31] = 0xFF;
        assert!(matches!(
            parse(&frame),
            Err(RemoteIdError::MalformedFrame(_))
        ));
    }
}
