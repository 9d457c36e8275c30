//! SelfID message (tag 3): free-text operator description (§4.2).

use super::{message_type_of, pack_header, require_capacity, require_length, trim_padding, MESSAGE_SIZE};
use crate::error::Result;
use crate::snapshot::{MessageType, SelfId};

pub fn encode(self_id: &SelfId) -> [u8; MESSAGE_SIZE] {
    let mut buf = [0u8; MESSAGE_SIZE];
    buf[0] = pack_header(MessageType::SelfId);
    buf[1] = self_id.desc_type;
    buf[2..25].copy_from_slice(&self_id.desc);
    buf
}

pub fn encode_into(self_id: &SelfId, buf: &mut [u8]) -> Result<usize> {
    require_capacity(buf)?;
    buf[..MESSAGE_SIZE].copy_from_slice(&encode(self_id));
    Ok(MESSAGE_SIZE)
}

pub fn decode(buf: &[u8]) -> Result<SelfId> {
    require_length(buf)?;
    message_type_of(buf[0])?;

    let desc_type = buf[1];
    let mut desc = [0u8; 23];
    let trimmed = trim_padding(&buf[2..25]);
    desc[..trimmed.len()].copy_from_slice(trimmed);

    Ok(SelfId { desc_type, desc })
}
