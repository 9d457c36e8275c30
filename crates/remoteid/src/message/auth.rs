//! Auth message (tag 2): opaque authentication payload (§4.2). The payload
//! itself is uninterpreted bytes — authentication cryptography is out of
//! scope (§1 Non-goals).

use super::{message_type_of, pack_header, require_capacity, require_length, MESSAGE_SIZE};
use crate::error::Result;
use crate::snapshot::{Auth, AuthType, MessageType};

pub fn encode(auth: &Auth) -> [u8; MESSAGE_SIZE] {
    let mut buf = [0u8; MESSAGE_SIZE];
    buf[0] = pack_header(MessageType::Auth);
    buf[1] = (auth.auth_type.to_nibble() << 4) | (auth.data_page & 0x0F);
    buf[2..25].copy_from_slice(&auth.auth_data);
    buf
}

pub fn encode_into(auth: &Auth, buf: &mut [u8]) -> Result<usize> {
    require_capacity(buf)?;
    buf[..MESSAGE_SIZE].copy_from_slice(&encode(auth));
    Ok(MESSAGE_SIZE)
}

/// Accepts an all-zero Auth message (`data_page = 0`, `auth_type = 0`)
/// without complaint — §9's open question on whether receivers must
/// tolerate a never-populated Auth message is resolved conservatively.
pub fn decode(buf: &[u8]) -> Result<Auth> {
    require_length(buf)?;
    message_type_of(buf[0])?;

    let page_and_type = buf[1];
    let data_page = page_and_type & 0x0F;
    let auth_type = AuthType::from_nibble(page_and_type >> 4);
    let mut auth_data = [0u8; 23];
    auth_data.copy_from_slice(&buf[2..25]);

    Ok(Auth {
        data_page,
        auth_type,
        auth_data,
    })
}

#[cfg(test)]
mod tests {
    use hexlit::hex;

    use super::*;

    /// Header 0x20 (Auth tag), byte1 0x13 (auth_type=MfgProgrammedUniqueId<<4
    /// | data_page=3), 23 bytes of 0xAB payload.
    #[test]
    fn decodes_literal_auth_bytes() {
        let wire = hex!("2013ABABABABABABABABABABABABABABABABABABABABABABAB");
        let decoded = decode(&wire).unwrap();
        assert_eq!(decoded.data_page, 3);
        assert_eq!(decoded.auth_type, AuthType::MfgProgrammedUniqueId);
        assert_eq!(decoded.auth_data, [0xAB; 23]);
    }

    #[test]
    fn encode_packs_page_and_type_nibbles() {
        let auth = Auth {
            data_page: 3,
            auth_type: AuthType::MfgProgrammedUniqueId,
            auth_data: [0xAB; 23],
        };
        let wire = encode(&auth);
        assert_eq!(wire[0], 0x20);
        assert_eq!(wire[1], 0x13);
        assert_eq!(&wire[2..25], &[0xAB; 23]);
        assert_eq!(decode(&wire).unwrap(), auth);
    }

    #[test]
    fn all_zero_auth_message_decodes_cleanly() {
        let buf = [0u8; 25];
        let decoded = decode(&buf).unwrap();
        assert_eq!(decoded.data_page, 0);
        assert_eq!(decoded.auth_type, AuthType::None);
    }
}
