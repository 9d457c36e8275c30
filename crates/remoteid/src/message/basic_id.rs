//! BasicID message (tag 0): UAS identity (§4.2).
//!
//! No multi-byte integers here, so the wire layout is plain byte slicing
//! rather than a `deku` struct — `deku` earns its keep on [`super::location`]
//! and [`super::system`], which carry little-endian 16/32-bit fields.

use super::{message_type_of, pack_header, require_capacity, require_length, trim_padding, MESSAGE_SIZE};
use crate::error::Result;
use crate::snapshot::{BasicId, IdType, MessageType, UasType};

pub fn encode(basic_id: &BasicId) -> [u8; MESSAGE_SIZE] {
    let mut buf = [0u8; MESSAGE_SIZE];
    buf[0] = pack_header(MessageType::BasicId);
    buf[1] = (basic_id.id_type.to_nibble() << 4) | basic_id.uas_type.to_nibble();
    buf[2..22].copy_from_slice(&basic_id.uas_id);
    buf
}

pub fn encode_into(basic_id: &BasicId, buf: &mut [u8]) -> Result<usize> {
    require_capacity(buf)?;
    buf[..MESSAGE_SIZE].copy_from_slice(&encode(basic_id));
    Ok(MESSAGE_SIZE)
}

pub fn decode(buf: &[u8]) -> Result<BasicId> {
    require_length(buf)?;
    message_type_of(buf[0])?;

    let type_and_id = buf[1];
    let uas_type = UasType::from_nibble(type_and_id);
    let id_type = IdType::from_nibble(type_and_id >> 4);
    let mut uas_id = [0u8; 20];
    let trimmed = trim_padding(&buf[2..22]);
    uas_id[..trimmed.len()].copy_from_slice(trimmed);

    Ok(BasicId {
        uas_type,
        id_type,
        uas_id,
    })
}
