/*!
  Sub-object wire codec.

  Every composite type that can appear inside a [`crate::message::Message`]
  implements [`WireCodec`]: the same `(wire_len, encode, decode)` triple the
  original source exposed per sub-object kind, generalized to an ordinary
  Rust trait instead of a family of C function pointers. Composition (a
  `DifConfig` embedding an `EfcpConfig` embedding a `QosCube` ...) is just
  nested calls to this trait, which is what replaces the source's
  pointer-cast walking (see `DESIGN.md`).
*/
pub mod crypto;
pub mod dif_config;
pub mod dif_properties;
pub mod dtcp;
pub mod dtp;
pub mod efcp;
pub mod error;
pub mod flow_spec;
pub mod media;
pub mod name;
pub mod neighbor;
pub mod pff;
pub mod policy;
pub mod qos;
pub mod rib;

pub use error::CodecError;

/// A type that can report its own serialized length, encode itself onto a
/// growing buffer, and decode itself from the front of a byte slice.
///
/// Unlike `deku`'s derive macros (used in this crate for the handful of
/// purely-scalar structs where they fit cleanly, see [`crate::message`]),
/// this trait is implemented by hand for every type touched by the
/// null-buffer, empty-string, and conditionally-present-child rules the
/// original wire format relies on — rules that don't map onto a single
/// derive attribute.
pub trait WireCodec: Sized {
    /// Number of bytes `encode` will write for this value.
    fn wire_len(&self) -> usize;

    /// Append this value's wire representation to `out`.
    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError>;

    /// Consume this value's wire representation from the front of `input`,
    /// advancing `input` past the bytes consumed.
    fn decode(input: &mut &[u8]) -> Result<Self, CodecError>;
}

pub(crate) fn take(input: &mut &[u8], n: usize) -> Result<&[u8], CodecError> {
    if input.len() < n {
        return Err(CodecError::TruncatedInput);
    }
    let (head, tail) = input.split_at(n);
    *input = tail;
    Ok(head)
}

macro_rules! impl_scalar_codec {
    ($ty:ty, $n:expr) => {
        impl WireCodec for $ty {
            fn wire_len(&self) -> usize {
                $n
            }

            fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
                out.extend_from_slice(&self.to_be_bytes());
                Ok(())
            }

            fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
                let bytes = take(input, $n)?;
                let mut arr = [0u8; $n];
                arr.copy_from_slice(bytes);
                Ok(<$ty>::from_be_bytes(arr))
            }
        }
    };
}

impl_scalar_codec!(u8, 1);
impl_scalar_codec!(i8, 1);
impl_scalar_codec!(u16, 2);
impl_scalar_codec!(u32, 4);
impl_scalar_codec!(i32, 4);
impl_scalar_codec!(u64, 8);

impl WireCodec for bool {
    fn wire_len(&self) -> usize {
        1
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        out.push(if *self { 1 } else { 0 });
        Ok(())
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        let b = take(input, 1)?[0];
        Ok(b != 0)
    }
}

/// A RINA "string" sub-object: u16 length prefix (capped at 65535), raw
/// bytes. Null and empty both round-trip to `String::new()` — the spec's
/// wire-level indistinguishability is represented by using a plain
/// `String` rather than `Option<String>` for every string field. The raw
/// bytes are not re-encoded through a lossy conversion: a decode of
/// non-UTF-8 bytes fails with `CodecError::InvalidUtf8` rather than
/// silently substituting U+FFFD, which would make `encode(decode(s))`
/// diverge from `s`.
impl WireCodec for String {
    fn wire_len(&self) -> usize {
        2 + self.len()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        if self.len() > u16::MAX as usize {
            return Err(CodecError::OversizeString);
        }
        let len = self.len() as u16;
        out.extend_from_slice(&len.to_be_bytes());
        out.extend_from_slice(self.as_bytes());
        Ok(())
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        let len = u16::decode(input)? as usize;
        let bytes = take(input, len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| CodecError::InvalidUtf8)
    }
}

/// A RINA "buffer" sub-object: u32 length prefix, raw bytes. Length 0 means
/// "no buffer present" on the wire, so this is implemented for
/// `Option<Vec<u8>>` rather than `Vec<u8>` directly: `None` and
/// `Some(vec![])` are wire-indistinguishable (both encode to a 4-byte zero
/// length) and both decode back to `None`, matching the spec's "decode
/// yields a null reference, not a zero-length allocation".
impl WireCodec for Option<Vec<u8>> {
    fn wire_len(&self) -> usize {
        4 + self.as_ref().map(|v| v.len()).unwrap_or(0)
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        match self {
            None => out.extend_from_slice(&0u32.to_be_bytes()),
            Some(bytes) => {
                out.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
                out.extend_from_slice(bytes);
            }
        }
        Ok(())
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        let len = u32::decode(input)? as usize;
        if len == 0 {
            return Ok(None);
        }
        Ok(Some(take(input, len)?.to_vec()))
    }
}

/// A u16-count-prefixed sequence of elements, in insertion order. This is
/// the list representation for every sub-object kind that the spec
/// describes as "a u16-prefixed sequence of ... records" (RIB entries,
/// PFF entries, DIF properties, neighbors, media-report entries, policy
/// parameters, config entries, ...).
impl<T: WireCodec> WireCodec for Vec<T> {
    fn wire_len(&self) -> usize {
        2 + self.iter().map(WireCodec::wire_len).sum::<usize>()
    }

    fn encode(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        out.extend_from_slice(&(self.len() as u16).to_be_bytes());
        for item in self {
            item.encode(out)?;
        }
        Ok(())
    }

    fn decode(input: &mut &[u8]) -> Result<Self, CodecError> {
        let count = u16::decode(input)? as usize;
        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            items.push(T::decode(input)?);
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_roundtrip() {
        let s = String::from("app");
        let mut buf = Vec::new();
        s.encode(&mut buf).unwrap();
        assert_eq!(buf, vec![0, 3, b'a', b'p', b'p']);
        assert_eq!(s.wire_len(), buf.len());

        let mut rest = &buf[..];
        let decoded = String::decode(&mut rest).unwrap();
        assert_eq!(decoded, s);
        assert!(rest.is_empty());
    }

    #[test]
    fn test_string_decode_rejects_invalid_utf8() {
        let mut rest: &[u8] = &[0, 1, 0xFF];
        assert_eq!(String::decode(&mut rest), Err(CodecError::InvalidUtf8));
    }

    #[test]
    fn test_empty_and_absent_string_coincide() {
        let empty = String::new();
        let mut buf = Vec::new();
        empty.encode(&mut buf).unwrap();
        assert_eq!(buf, vec![0, 0]);
    }

    #[test]
    fn test_buffer_none_and_empty_coincide_on_wire() {
        let none: Option<Vec<u8>> = None;
        let mut buf1 = Vec::new();
        none.encode(&mut buf1).unwrap();

        let empty: Option<Vec<u8>> = Some(vec![]);
        let mut buf2 = Vec::new();
        empty.encode(&mut buf2).unwrap();

        assert_eq!(buf1, buf2);
        assert_eq!(buf1, vec![0, 0, 0, 0]);

        let mut rest = &buf2[..];
        let decoded = Option::<Vec<u8>>::decode(&mut rest).unwrap();
        assert_eq!(decoded, None);
    }

    #[test]
    fn test_buffer_present() {
        let some = Some(vec![0xAB, 0xCD]);
        let mut buf = Vec::new();
        some.encode(&mut buf).unwrap();
        assert_eq!(buf, vec![0, 0, 0, 2, 0xAB, 0xCD]);

        let mut rest = &buf[..];
        let decoded = Option::<Vec<u8>>::decode(&mut rest).unwrap();
        assert_eq!(decoded, some);
    }

    #[test]
    fn test_vec_roundtrip() {
        let v: Vec<u32> = vec![1, 2, 3];
        let mut buf = Vec::new();
        v.encode(&mut buf).unwrap();
        assert_eq!(v.wire_len(), buf.len());

        let mut rest = &buf[..];
        let decoded = Vec::<u32>::decode(&mut rest).unwrap();
        assert_eq!(decoded, v);
        assert!(rest.is_empty());
    }

    #[test]
    fn test_truncated_input() {
        let buf = vec![0u8];
        let mut rest = &buf[..];
        assert_eq!(u16::decode(&mut rest), Err(CodecError::TruncatedInput));
    }
}
