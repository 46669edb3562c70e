//! Base64 flavors for binary values carried in JSON strings.

use base64::{
    DecodeSliceError, Engine,
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
};

use crate::accumulator::ByteAccumulator;

/// Input bytes decoded per step: 4 KiB of base64 text.
const DECODE_CHUNK: usize = 4096;

/// Base64 dialects accepted by binary reads and writes.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Base64Variant {
    /// Standard alphabet with padding, a line feed after every 76 characters.
    Mime,
    /// Standard alphabet with padding on a single line.
    #[default]
    MimeNoLinefeeds,
    /// Standard alphabet with padding, a line feed after every 64 characters.
    Pem,
    /// URL-safe alphabet (`-` and `_`) without padding.
    ModifiedForUrl,
}

impl Base64Variant {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Mime => "MIME",
            Self::MimeNoLinefeeds => "MIME-NO-LINEFEEDS",
            Self::Pem => "PEM",
            Self::ModifiedForUrl => "MODIFIED-FOR-URL",
        }
    }

    /// Characters per line, `None` for single-line variants.
    #[must_use]
    pub fn max_line_length(self) -> Option<usize> {
        match self {
            Self::Mime => Some(76),
            Self::Pem => Some(64),
            Self::MimeNoLinefeeds | Self::ModifiedForUrl => None,
        }
    }

    #[must_use]
    pub fn uses_padding(self) -> bool {
        !matches!(self, Self::ModifiedForUrl)
    }

    fn engine(self) -> &'static base64::engine::GeneralPurpose {
        match self {
            Self::ModifiedForUrl => &URL_SAFE_NO_PAD,
            _ => &STANDARD,
        }
    }

    /// Encodes `data`, breaking lines with `\n` where the variant asks for it.
    #[must_use]
    pub fn encode(self, data: &[u8]) -> String {
        let encoded = self.engine().encode(data);
        let Some(width) = self.max_line_length() else {
            return encoded;
        };
        let mut out = String::with_capacity(encoded.len() + encoded.len() / width);
        for (i, line) in encoded.as_bytes().chunks(width).enumerate() {
            if i > 0 {
                out.push('\n');
            }
            // Base64 output is ASCII.
            out.extend(line.iter().map(|b| char::from(*b)));
        }
        out
    }

    /// Decodes `text` into `out`, ignoring ASCII whitespace.
    ///
    /// # Errors
    ///
    /// A description of the first invalid character or of bad padding.
    pub fn decode_into(self, text: &str, out: &mut ByteAccumulator) -> Result<(), String> {
        let cleaned: Vec<u8> = text
            .bytes()
            .filter(|b| !b.is_ascii_whitespace())
            .collect();
        let engine = self.engine();
        let mut buf = [0u8; DECODE_CHUNK / 4 * 3];
        for chunk in cleaned.chunks(DECODE_CHUNK) {
            let n = engine.decode_slice(chunk, &mut buf).map_err(|err| match err {
                DecodeSliceError::DecodeError(err) => format!("{err} ({} variant)", self.name()),
                DecodeSliceError::OutputSliceTooSmall => "decoded chunk too large".to_string(),
            })?;
            out.append_slice(&buf[..n]);
        }
        Ok(())
    }

    /// Decodes `text` into a new vector.
    ///
    /// # Errors
    ///
    /// As for [`Base64Variant::decode_into`].
    pub fn decode(self, text: &str) -> Result<Vec<u8>, String> {
        let mut acc = ByteAccumulator::new();
        self.decode_into(text, &mut acc)?;
        Ok(acc.to_byte_array())
    }
}
