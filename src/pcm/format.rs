//! Sample word layout and the pure word decoder.
//!
//! A word is `word_size / 8` bytes holding one sample for one channel. The
//! decoder assembles the bytes in the configured order and maps the raw bits
//! to a zero-centred signed value.

/// Byte order of multi-byte sample words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    /// Least-significant byte first
    #[default]
    Little,
    /// Most-significant byte first
    Big,
}

/// Layout of one sample word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleFormat {
    /// Bytes per word (1..=7)
    pub word_bytes: usize,
    pub byte_order: ByteOrder,
    /// Two's complement when true, offset-binary otherwise
    pub signed: bool,
}

impl SampleFormat {
    /// Decode one word. `word` must be exactly `word_bytes` long.
    #[inline]
    pub fn decode(&self, word: &[u8]) -> i64 {
        debug_assert_eq!(word.len(), self.word_bytes);
        decode_word(word, self.byte_order, self.signed)
    }
}

/// Decode a single sample word of `word.len() * 8` bits.
///
/// * `word`   - 1 to 7 bytes holding exactly one sample
/// * `order`  - byte order of the word
/// * `signed` - two's complement (true) or unsigned with a `2^(bits-1)` bias (false)
///
/// The result is centred on zero in both encodings, so a full-scale negative
/// sample decodes to `-2^(bits-1)` either way.
pub fn decode_word(word: &[u8], order: ByteOrder, signed: bool) -> i64 {
    let bits = (word.len() * 8) as u32;
    debug_assert!(bits > 0 && bits < 64);

    let raw = match order {
        ByteOrder::Little => word
            .iter()
            .rev()
            .fold(0u64, |acc, &b| (acc << 8) | u64::from(b)),
        ByteOrder::Big => word.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b)),
    };

    if signed {
        // Sign-extend from the word's top bit
        let shift = 64 - bits;
        ((raw << shift) as i64) >> shift
    } else {
        raw as i64 - (1i64 << (bits - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_little_endian_signed_16() {
        assert_eq!(decode_word(&[0x00, 0x00], ByteOrder::Little, true), 0);
        assert_eq!(decode_word(&[0x01, 0x00], ByteOrder::Little, true), 1);
        assert_eq!(decode_word(&[0xff, 0xff], ByteOrder::Little, true), -1);
        assert_eq!(decode_word(&[0xff, 0x7f], ByteOrder::Little, true), 32767);
        assert_eq!(decode_word(&[0x00, 0x80], ByteOrder::Little, true), -32768);
    }

    #[test]
    fn test_big_endian_signed_16() {
        assert_eq!(decode_word(&[0x00, 0x01], ByteOrder::Big, true), 1);
        assert_eq!(decode_word(&[0x7f, 0xff], ByteOrder::Big, true), 32767);
        assert_eq!(decode_word(&[0x80, 0x00], ByteOrder::Big, true), -32768);
        assert_eq!(decode_word(&[0xfe, 0xd4], ByteOrder::Big, true), -300);
    }

    #[test]
    fn test_unsigned_is_biased_to_zero() {
        assert_eq!(decode_word(&[0x80], ByteOrder::Little, false), 0);
        assert_eq!(decode_word(&[0x00], ByteOrder::Little, false), -128);
        assert_eq!(decode_word(&[0xff], ByteOrder::Little, false), 127);
        assert_eq!(decode_word(&[0x00, 0x80], ByteOrder::Little, false), 0);
        assert_eq!(decode_word(&[0x00, 0x00], ByteOrder::Big, false), -32768);
    }

    #[test]
    fn test_eight_bit_signed() {
        assert_eq!(decode_word(&[0x7f], ByteOrder::Big, true), 127);
        assert_eq!(decode_word(&[0x80], ByteOrder::Big, true), -128);
        // Byte order is irrelevant for single-byte words
        assert_eq!(
            decode_word(&[0x9c], ByteOrder::Little, true),
            decode_word(&[0x9c], ByteOrder::Big, true)
        );
    }

    #[test]
    fn test_twenty_four_bit() {
        // -2 in 24-bit two's complement
        assert_eq!(decode_word(&[0xfe, 0xff, 0xff], ByteOrder::Little, true), -2);
        assert_eq!(decode_word(&[0xff, 0xff, 0xfe], ByteOrder::Big, true), -2);
        assert_eq!(decode_word(&[0x56, 0x34, 0x12], ByteOrder::Little, true), 0x123456);
        assert_eq!(decode_word(&[0x00, 0x00, 0x80], ByteOrder::Little, true), -(1 << 23));
    }

    #[test]
    fn test_widest_word() {
        let max = [0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7f];
        let min = [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x80];
        assert_eq!(decode_word(&max, ByteOrder::Little, true), (1 << 55) - 1);
        assert_eq!(decode_word(&min, ByteOrder::Little, true), -(1 << 55));
        assert_eq!(decode_word(&min, ByteOrder::Little, false), 0);
    }

    #[test]
    fn test_format_decode_delegates() {
        let format = SampleFormat {
            word_bytes: 2,
            byte_order: ByteOrder::Big,
            signed: true,
        };
        assert_eq!(format.decode(&[0xff, 0x38]), -200);
    }
}
