//! MAC address collaborator (§6, expansion): supplies the 6-byte source
//! address embedded in the 802.11 header. The core treats this as an
//! opaque caller-supplied value — see [`remoteid::frame::build`].

use rand::RngCore;

pub trait MacProvider {
    fn mac(&self) -> [u8; 6];
}

/// A fixed, caller-configured MAC address.
pub struct ConfiguredMac(pub [u8; 6]);

impl MacProvider for ConfiguredMac {
    fn mac(&self) -> [u8; 6] {
        self.0
    }
}

/// Falls back to a locally-administered random MAC when none is
/// configured. Bit 1 of the first octet (locally administered) is always
/// set; bit 0 (multicast) is always cleared.
pub struct RandomMac([u8; 6]);

impl RandomMac {
    pub fn generate() -> Self {
        let mut bytes = [0u8; 6];
        rand::thread_rng().fill_bytes(&mut bytes);
        bytes[0] = (bytes[0] | 0x02) & 0xFE;
        Self(bytes)
    }
}

impl MacProvider for RandomMac {
    fn mac(&self) -> [u8; 6] {
        self.0
    }
}

/// Parses a colon-separated hex MAC address, e.g. `02:11:22:33:44:55`.
pub fn parse_mac(s: &str) -> Result<[u8; 6], String> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 6 {
        return Err(format!(
            "expected 6 colon-separated octets, got {}",
            parts.len()
        ));
    }
    let mut out = [0u8; 6];
    for (i, part) in parts.iter().enumerate() {
        out[i] = u8::from_str_radix(part, 16)
            .map_err(|e| format!("octet {i} ({part:?}): {e}"))?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_mac() {
        assert_eq!(
            parse_mac("02:11:22:33:44:55").unwrap(),
            [0x02, 0x11, 0x22, 0x33, 0x44, 0x55]
        );
    }

    #[test]
    fn rejects_wrong_octet_count() {
        assert!(parse_mac("02:11:22").is_err());
    }

    #[test]
    fn rejects_non_hex_octet() {
        assert!(parse_mac("zz:11:22:33:44:55").is_err());
    }

    #[test]
    fn random_mac_is_locally_administered_and_unicast() {
        let mac = RandomMac::generate().mac();
        assert_eq!(mac[0] & 0x02, 0x02);
        assert_eq!(mac[0] & 0x01, 0x00);
    }
}
