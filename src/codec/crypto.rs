/*!
  SDU Protection crypto state.

  The original's free routine released `encrypt_key_tx` but then nulled
  out `encrypt_key_rx` instead (a copy-paste bug that leaves
  `encrypt_key_tx` dangling and eligible for a later double free). Here
  every buffer is an owned `Option<Vec<u8>>` dropped exactly once by
  ordinary Rust ownership, so the bug class doesn't exist in this
  representation — there's no free pass to typo the pointer for.
*/
use super::{CodecError, WireCodec};

/// Per-direction keys, IVs, and algorithm names for an N-1 DIF's crypto
/// layer, plus whether encryption is active in each direction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SdupCryptoState {
    pub enable_crypto_rx: bool,
    pub enable_crypto_tx: bool,
    pub port_id: u32,
    pub compress_alg: String,
    pub enc_alg: String,
    pub mac_alg: String,
    pub encrypt_key_rx: Option<Vec<u8>>,
    pub encrypt_key_tx: Option<Vec<u8>>,
    pub iv_rx: Option<Vec<u8>>,
    pub iv_tx: Option<Vec<u8>>,
    pub mac_key_rx: Option<Vec<u8>>,
    pub mac_key_tx: Option<Vec<u8>>,
}

impl WireCodec for SdupCryptoState {
    fn wire_len(&self) -> usize {
        1 + 1
            + 4
            + self.compress_alg.wire_len()
            + self.enc_alg.wire_len()
            + self.mac_alg.wire_len()
            + self.encrypt_key_rx.wire_len()
            + self.encrypt_key_tx.wire_len()
            + self.iv_rx.wire_len()
            + self.iv_tx.wire_len()
            + self.mac_key_rx.wire_len()
            + self.mac_key_tx.wire_len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        self.enable_crypto_rx.encode(out)?;
        self.enable_crypto_tx.encode(out)?;
        self.port_id.encode(out)?;
        self.compress_alg.encode(out)?;
        self.enc_alg.encode(out)?;
        self.mac_alg.encode(out)?;
        self.encrypt_key_rx.encode(out)?;
        self.encrypt_key_tx.encode(out)?;
        self.iv_rx.encode(out)?;
        self.iv_tx.encode(out)?;
        self.mac_key_rx.encode(out)?;
        self.mac_key_tx.encode(out)
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        Ok(SdupCryptoState {
            enable_crypto_rx: bool::decode(input)?,
            enable_crypto_tx: bool::decode(input)?,
            port_id: u32::decode(input)?,
            compress_alg: String::decode(input)?,
            enc_alg: String::decode(input)?,
            mac_alg: String::decode(input)?,
            encrypt_key_rx: Option::<Vec<u8>>::decode(input)?,
            encrypt_key_tx: Option::<Vec<u8>>::decode(input)?,
            iv_rx: Option::<Vec<u8>>::decode(input)?,
            iv_tx: Option::<Vec<u8>>::decode(input)?,
            mac_key_rx: Option::<Vec<u8>>::decode(input)?,
            mac_key_tx: Option::<Vec<u8>>::decode(input)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sdup_crypto_state_roundtrip() {
        let scs = SdupCryptoState {
            enable_crypto_rx: true,
            enable_crypto_tx: true,
            port_id: 9,
            compress_alg: "none".into(),
            enc_alg: "AES256".into(),
            mac_alg: "SHA256".into(),
            encrypt_key_rx: Some(vec![1; 32]),
            encrypt_key_tx: Some(vec![2; 32]),
            iv_rx: Some(vec![3; 16]),
            iv_tx: Some(vec![4; 16]),
            mac_key_rx: None,
            mac_key_tx: None,
        };
        let mut buf = Vec::new();
        scs.encode(&mut buf).unwrap();
        assert_eq!(scs.wire_len(), buf.len());

        let mut rest = &buf[..];
        let decoded = SdupCryptoState::decode(&mut rest).unwrap();
        assert_eq!(decoded, scs);
        assert!(rest.is_empty());
    }
}
