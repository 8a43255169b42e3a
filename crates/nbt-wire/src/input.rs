use std::io::{ErrorKind, Read};

use crate::error::WireError;
use crate::mutf8;

/// Sequential big-endian reader over a tag stream.
///
/// Mirrors the primitive reads of Java's `DataInput`, which is what the tag
/// stream convention is defined against. Implementors only provide the raw
/// byte operations; every fixed-width value is built on top of them.
///
/// Whenever a read succeeds the reader advances past the consumed bytes. On
/// failure the position is unspecified and the reader should be discarded.
pub trait DataInput {
    /// Fill `buf` completely from the stream.
    ///
    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if the stream ends first.
    fn read_exact_into(&mut self, buf: &mut [u8]) -> Result<(), WireError>;

    /// Read exactly `len` raw bytes.
    ///
    /// Callers are expected to have bounded `len` already. Implementations
    /// should still grow the buffer with the data actually received rather
    /// than reserving `len` bytes up front.
    ///
    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if fewer than `len` bytes remain.
    fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>, WireError>;

    /// Number of bytes consumed so far.
    fn position(&self) -> u64;

    /// Read a fixed-size byte array.
    ///
    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if the stream ends first.
    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], WireError> {
        let mut buf = [0u8; N];
        self.read_exact_into(&mut buf)?;
        Ok(buf)
    }

    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] at end of input.
    fn read_u8(&mut self) -> Result<u8, WireError> {
        Ok(self.read_array::<1>()?[0])
    }

    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] at end of input.
    fn read_i8(&mut self) -> Result<i8, WireError> {
        Ok(i8::from_be_bytes(self.read_array()?))
    }

    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if fewer than 2 bytes remain.
    fn read_u16(&mut self) -> Result<u16, WireError> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if fewer than 2 bytes remain.
    fn read_i16(&mut self) -> Result<i16, WireError> {
        Ok(i16::from_be_bytes(self.read_array()?))
    }

    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if fewer than 4 bytes remain.
    fn read_i32(&mut self) -> Result<i32, WireError> {
        Ok(i32::from_be_bytes(self.read_array()?))
    }

    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if fewer than 8 bytes remain.
    fn read_i64(&mut self) -> Result<i64, WireError> {
        Ok(i64::from_be_bytes(self.read_array()?))
    }

    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if fewer than 4 bytes remain.
    fn read_f32(&mut self) -> Result<f32, WireError> {
        Ok(f32::from_be_bytes(self.read_array()?))
    }

    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if fewer than 8 bytes remain.
    fn read_f64(&mut self) -> Result<f64, WireError> {
        Ok(f64::from_be_bytes(self.read_array()?))
    }

    /// Read a length-prefixed modified UTF-8 string.
    ///
    /// Wire layout:
    /// ```text
    ///   byte_len (u16, big-endian) │ modified UTF-8 bytes [byte_len]
    /// ```
    ///
    /// The prefix caps any single string at 65 535 bytes, so this read is
    /// bounded before the decoder ever looks at the result.
    ///
    /// # Errors
    ///
    /// - [`WireError::UnexpectedEof`] if the stream ends inside the string.
    /// - [`WireError::InvalidModifiedUtf8`] if the bytes do not decode.
    fn read_utf(&mut self) -> Result<String, WireError> {
        let len = usize::from(self.read_u16()?);
        let start = self.position();
        let bytes = self.read_bytes(len)?;
        mutf8::decode(&bytes).map_err(|at| WireError::InvalidModifiedUtf8 {
            offset: start + at as u64,
        })
    }
}

/// [`DataInput`] over any [`std::io::Read`] source.
///
/// Tracks the number of bytes consumed so errors can point at the exact
/// offset where the stream went wrong. Wrap slow sources (files, sockets)
/// in a `BufReader` first; this type issues many small reads.
///
/// ```rust
/// use nbt_wire::{DataInput, DataReader};
///
/// let mut input = DataReader::new(&[0x00u8, 0x2A, 0xFF][..]);
/// assert_eq!(input.read_i16().unwrap(), 42);
/// assert_eq!(input.read_i8().unwrap(), -1);
/// assert!(input.read_u8().is_err());
/// ```
pub struct DataReader<R> {
    inner: R,
    pos: u64,
}

impl<R: Read> DataReader<R> {
    /// Create a reader starting at offset 0.
    pub fn new(inner: R) -> Self {
        Self { inner, pos: 0 }
    }

    /// Give back the wrapped reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> DataInput for DataReader<R> {
    fn read_exact_into(&mut self, buf: &mut [u8]) -> Result<(), WireError> {
        match self.inner.read_exact(buf) {
            Ok(()) => {
                self.pos += buf.len() as u64;
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                Err(WireError::UnexpectedEof { offset: self.pos })
            }
            Err(e) => Err(WireError::Io(e)),
        }
    }

    fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>, WireError> {
        let mut buf = Vec::new();
        let read = (&mut self.inner).take(len as u64).read_to_end(&mut buf)?;
        self.pos += read as u64;
        if read < len {
            return Err(WireError::UnexpectedEof { offset: self.pos });
        }
        Ok(buf)
    }

    fn position(&self) -> u64 {
        self.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_big_endian_scalars() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&0x1234i16.to_be_bytes());
        bytes.extend_from_slice(&(-7i32).to_be_bytes());
        bytes.extend_from_slice(&i64::MIN.to_be_bytes());
        bytes.extend_from_slice(&1.5f32.to_be_bytes());
        bytes.extend_from_slice(&f64::MAX.to_be_bytes());

        let mut input = DataReader::new(bytes.as_slice());
        assert_eq!(input.read_i16().unwrap(), 0x1234);
        assert_eq!(input.read_i32().unwrap(), -7);
        assert_eq!(input.read_i64().unwrap(), i64::MIN);
        assert_eq!(input.read_f32().unwrap(), 1.5);
        assert_eq!(input.read_f64().unwrap(), f64::MAX);
        assert_eq!(input.position(), bytes.len() as u64);
    }

    #[test]
    fn eof_reports_offset() {
        let mut input = DataReader::new(&[0x01u8, 0x02, 0x03][..]);
        input.read_u8().unwrap();
        let err = input.read_i32().unwrap_err();
        assert!(matches!(err, WireError::UnexpectedEof { offset: 1 }));
    }

    #[test]
    fn read_bytes_exact() {
        let mut input = DataReader::new(&[1u8, 2, 3, 4][..]);
        assert_eq!(input.read_bytes(3).unwrap(), vec![1, 2, 3]);
        assert_eq!(input.position(), 3);
    }

    #[test]
    fn read_bytes_short_input() {
        let mut input = DataReader::new(&[1u8, 2][..]);
        let err = input.read_bytes(10).unwrap_err();
        assert!(matches!(err, WireError::UnexpectedEof { offset: 2 }));
    }

    #[test]
    fn read_bytes_zero_len() {
        let mut input = DataReader::new(&b""[..]);
        assert!(input.read_bytes(0).unwrap().is_empty());
    }

    #[test]
    fn reads_utf_string() {
        let mut input = DataReader::new(&[0x00u8, 0x03, b'a', b'b', b'c', 0xFF][..]);
        assert_eq!(input.read_utf().unwrap(), "abc");
        assert_eq!(input.read_u8().unwrap(), 0xFF);
    }

    #[test]
    fn utf_string_truncated() {
        let mut input = DataReader::new(&[0x00u8, 0x05, b'a'][..]);
        assert!(matches!(
            input.read_utf(),
            Err(WireError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn utf_string_invalid_points_at_bad_byte() {
        let mut input = DataReader::new(&[0x00u8, 0x02, b'a', 0xFF][..]);
        assert!(matches!(
            input.read_utf(),
            Err(WireError::InvalidModifiedUtf8 { offset: 3 })
        ));
    }
}
