/// Payload loading for every command.
///
/// Tag files are commonly stored gzip-compressed. The first two bytes decide:
/// `1F 8B` means gzip, anything else is taken as a raw tag stream.
/// Decompressed output is capped so a small archive cannot expand into an
/// unbounded buffer before the decoder ever sees it.
use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use flate2::read::GzDecoder;

/// Gzip member header magic.
const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

pub const DEFAULT_MAX_INPUT_BYTES: u64 = 16 * 1024 * 1024;

/// Raw tag-stream bytes plus where they came from.
pub struct Payload {
    pub bytes: Vec<u8>,
    /// Size of the file on disk.
    pub file_size: usize,
    pub gzipped: bool,
}

/// Read `path`, inflating it if it is gzip.
///
/// # Errors
///
/// Returns an error if the file cannot be read, the gzip stream is
/// corrupt, or the decompressed size exceeds `max_bytes`.
pub fn load(path: &Path, max_bytes: u64) -> Result<Payload> {
    let raw = fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
    let file_size = raw.len();

    if !raw.starts_with(&GZIP_MAGIC) {
        return Ok(Payload {
            bytes: raw,
            file_size,
            gzipped: false,
        });
    }

    let bytes = inflate(&raw, max_bytes)
        .with_context(|| format!("cannot decompress {}", path.display()))?;
    log::debug!(
        "inflated {} from {file_size} to {} bytes",
        path.display(),
        bytes.len()
    );
    Ok(Payload {
        bytes,
        file_size,
        gzipped: true,
    })
}

fn inflate(compressed: &[u8], max_bytes: u64) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    GzDecoder::new(compressed)
        .take(max_bytes.saturating_add(1))
        .read_to_end(&mut bytes)?;
    if bytes.len() as u64 > max_bytes {
        bail!("decompressed size exceeds {max_bytes} bytes");
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use flate2::Compression;
    use flate2::write::GzEncoder;

    use super::*;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn inflates_within_cap() {
        let data = [0x0A, 0x00, 0x00, 0x00];
        let compressed = gzip(&data);
        assert!(compressed.starts_with(&GZIP_MAGIC));
        assert_eq!(inflate(&compressed, 4).unwrap(), data);
    }

    #[test]
    fn refuses_oversized_output() {
        let compressed = gzip(&[0u8; 4096]);
        let err = inflate(&compressed, 1024).unwrap_err();
        assert!(err.to_string().contains("exceeds 1024 bytes"), "{err}");
    }
}
