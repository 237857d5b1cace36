//! `audio/L16` MIME type parsing, e.g. a `Content-Type` header value.

use std::str::FromStr;

use super::error::MimeError;
use super::format::ByteOrder;
use super::params::AnalyzerConfig;

/// Stream layout described by a MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamFormat {
    pub sample_rate: u32,
    pub channels: u32,
    pub word_size: u32,
    pub byte_order: ByteOrder,
    pub signed: bool,
}

/// Parse a MIME type such as `"audio/L16; rate=44100; channels=2"`.
///
/// Only little-endian signed 16-bit streams are recognized. Parameters other
/// than `rate` and `channels` are ignored, as are segments that are not
/// `key=value` pairs.
pub fn parse_mime_type(mime_type: &str) -> Result<StreamFormat, MimeError> {
    let mut segments = mime_type.split(';').map(str::trim);

    let essence = segments.next().unwrap_or_default();
    if !essence.starts_with("audio/L16") {
        return Err(MimeError::Unsupported(essence.to_string()));
    }

    let mut rate = None;
    let mut channels = None;
    for segment in segments {
        let segment = segment.to_lowercase();
        let Some((key, value)) = segment.split_once('=') else {
            continue;
        };
        if value.contains('=') {
            continue;
        }

        let (key, value) = (key.trim(), value.trim());
        let dst = match key {
            "rate" => &mut rate,
            "channels" => &mut channels,
            _ => continue,
        };
        match value.parse::<u32>() {
            Ok(n) if n >= 1 => *dst = Some(n),
            _ => {
                return Err(MimeError::InvalidParameter {
                    name: key.to_string(),
                    value: value.to_string(),
                });
            }
        }
    }

    let (Some(sample_rate), Some(channels)) = (rate, channels) else {
        return Err(MimeError::Incomplete(mime_type.to_string()));
    };

    Ok(StreamFormat {
        sample_rate,
        channels,
        word_size: 16,
        byte_order: ByteOrder::Little,
        signed: true,
    })
}

impl FromStr for StreamFormat {
    type Err = MimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_mime_type(s)
    }
}

impl AnalyzerConfig {
    /// Set the sample layout fields from a MIME type, leaving window and
    /// interval untouched.
    pub fn use_mime_type(&mut self, mime_type: &str) -> Result<(), MimeError> {
        self.apply_format(parse_mime_type(mime_type)?);
        Ok(())
    }

    pub fn apply_format(&mut self, format: StreamFormat) {
        self.sample_rate = format.sample_rate;
        self.channels = format.channels;
        self.word_size = format.word_size;
        self.byte_order = format.byte_order;
        self.signed = format.signed;
    }
}
