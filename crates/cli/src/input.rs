// ABOUTME: Input loading for the tidymail CLI: reads files or stdin and decodes bytes to text.
// ABOUTME: Honors a byte-order mark, accepts valid UTF-8 as-is, and falls back to chardetng detection.

use std::fs;
use std::io::{self, Read};

use anyhow::{Context, Result};
use encoding_rs::Encoding;

/// Name used for stdin in messages and JSON output.
pub const STDIN: &str = "-";

/// Reads `target` (a path, or `-` for stdin) and decodes it to a String.
pub fn load(target: &str) -> Result<String> {
    let bytes = if target == STDIN {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        fs::read(target).with_context(|| format!("failed to read {}", target))?
    };
    Ok(decode(&bytes))
}

/// Decodes raw HTML bytes.
pub fn decode(bytes: &[u8]) -> String {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (decoded, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return decoded.into_owned();
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);
    tracing::debug!(encoding = encoding.name(), "detected input encoding");
    let (decoded, _, _) = encoding.decode(bytes);
    decoded.into_owned()
}
