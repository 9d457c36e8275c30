//! MessagePack assembler (§4.3): five 25-byte messages behind a 3-byte
//! header. Despite the name this predates, and is unrelated to, the
//! general-purpose MessagePack serialization format (see GLOSSARY).

use crate::error::{RemoteIdError, Result};
use crate::message::{self, MESSAGE_SIZE};
use crate::snapshot::{MessageType, UasSnapshot};

/// Version+type, `single_message_size`, `msg_pack_size`.
pub const HEADER_SIZE: usize = 3;
/// The canonical broadcast always carries all five message types.
pub const CANONICAL_PACK_SIZE: usize = HEADER_SIZE + MESSAGE_SIZE * 5;

const MIN_MESSAGES: u8 = 1;
const MAX_MESSAGES: u8 = 9;

/// Assembles the canonical five-message pack (BasicID, Location, Auth,
/// SelfID, System, in that fixed order) for one aircraft snapshot.
///
/// The header's high nibble reuses the BasicID message-type tag (0) — a
/// quirk of this wire format, not a mistake here (§9 Open Question).
/// Receivers must dispatch on envelope context, never on this nibble.
pub fn assemble(snapshot: &UasSnapshot) -> [u8; CANONICAL_PACK_SIZE] {
    let mut buf = [0u8; CANONICAL_PACK_SIZE];
    assemble_into(snapshot, &mut buf).expect("fixed-size buffer always fits the canonical pack");
    buf
}

pub fn assemble_into(snapshot: &UasSnapshot, buf: &mut [u8]) -> Result<usize> {
    if buf.len() < CANONICAL_PACK_SIZE {
        return Err(RemoteIdError::BufferTooSmall {
            needed: CANONICAL_PACK_SIZE,
            available: buf.len(),
        });
    }

    buf[0] = MessageType::BasicId.tag() << 4;
    buf[1] = UasSnapshot::SINGLE_MESSAGE_SIZE;
    buf[2] = UasSnapshot::PACK_SIZE;

    let mut offset = HEADER_SIZE;
    message::basic_id::encode_into(&snapshot.basic_id, &mut buf[offset..offset + MESSAGE_SIZE])?;
    offset += MESSAGE_SIZE;
    message::location::encode_into(&snapshot.location, &mut buf[offset..offset + MESSAGE_SIZE])?;
    offset += MESSAGE_SIZE;
    message::auth::encode_into(&snapshot.auth, &mut buf[offset..offset + MESSAGE_SIZE])?;
    offset += MESSAGE_SIZE;
    message::self_id::encode_into(&snapshot.self_id, &mut buf[offset..offset + MESSAGE_SIZE])?;
    offset += MESSAGE_SIZE;
    message::system::encode_into(&snapshot.system, &mut buf[offset..offset + MESSAGE_SIZE])?;
    offset += MESSAGE_SIZE;

    Ok(offset)
}

/// Parses a MessagePack of arbitrary valid size (`msg_pack_size` in
/// `[1, 9]`), dispatching each message to its codec by its own
/// message-type nibble rather than assuming canonical ordering. Fields a
/// message pack doesn't carry are left at their snapshot default.
pub fn parse(buf: &[u8]) -> Result<UasSnapshot> {
    if buf.len() < HEADER_SIZE {
        return Err(RemoteIdError::Truncated {
            needed: HEADER_SIZE,
            available: buf.len(),
        });
    }

    let single_message_size = buf[1];
    let msg_pack_size = buf[2];

    if single_message_size as usize != MESSAGE_SIZE {
        return Err(RemoteIdError::MalformedFrame(
            "single_message_size must be 25",
        ));
    }
    if !(MIN_MESSAGES..=MAX_MESSAGES).contains(&msg_pack_size) {
        return Err(RemoteIdError::MalformedFrame(
            "msg_pack_size must be in [1, 9]",
        ));
    }

    let expected_len = HEADER_SIZE + MESSAGE_SIZE * msg_pack_size as usize;
    if buf.len() != expected_len {
        return Err(RemoteIdError::MalformedFrame(
            "message pack length does not match header-declared size",
        ));
    }

    let mut snapshot = UasSnapshot::default();
    for chunk in buf[HEADER_SIZE..].chunks_exact(MESSAGE_SIZE) {
        let tag = (chunk[0] >> 4) & 0x0F;
        match MessageType::from_tag(tag) {
            Some(MessageType::BasicId) => snapshot.basic_id = message::basic_id::decode(chunk)?,
            Some(MessageType::Location) => snapshot.location = message::location::decode(chunk)?,
            Some(MessageType::Auth) => snapshot.auth = message::auth::decode(chunk)?,
            Some(MessageType::SelfId) => snapshot.self_id = message::self_id::decode(chunk)?,
            Some(MessageType::System) => snapshot.system = message::system::decode(chunk)?,
            None => return Err(RemoteIdError::UnknownMessageType(tag)),
        }
    }

    Ok(snapshot)
}
