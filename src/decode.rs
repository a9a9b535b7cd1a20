//! Conversion of raw HDC1080 register words into physical units.
//!
//! The combined measurement register yields one 32-bit big-endian word:
//! the high 16 bits are the temperature ADC code, the low 16 bits the
//! humidity ADC code. The transfer functions below are the datasheet
//! formulas; the constants are exact and must not be altered.

use crate::error::HdcError;

/// Byte width of the combined temperature + humidity sample.
const SAMPLE_BYTES: usize = 4;

/// Assembles the combined measurement bytes into one big-endian sample
/// word.
///
/// A byte string of the wrong length comes from a malformed read and is
/// rejected with [`HdcError::TruncatedSample`] rather than zero-padded.
pub fn combined_sample<E>(bytes: &[u8]) -> Result<u32, HdcError<E>> {
    let bytes: [u8; SAMPLE_BYTES] = bytes.try_into().map_err(|_| HdcError::TruncatedSample)?;
    Ok(u32::from_be_bytes(bytes))
}

/// Converts a combined sample word to degrees Celsius.
///
/// The high word is a 16-bit code spanning the sensor's -40..125 °C
/// range: `code / 2^16 * 165 - 40`.
pub fn temperature_from_raw(raw: u32) -> f64 {
    f64::from(raw >> 16) / 65536.0 * 165.0 - 40.0
}

/// Converts a combined sample word to percent relative humidity.
///
/// The low word is a 16-bit code spanning 0..100 %RH: `code / 2^16 * 100`.
pub fn humidity_from_raw(raw: u32) -> f64 {
    f64::from(raw & 0xFFFF) / 65536.0 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    // Sample captured on a bench sensor at roughly 26 C / 27 %RH.
    const GOLDEN_RAW: u32 = 0x66A0_447C;
    const GOLDEN_TEMPERATURE: f64 = 26.145;
    const GOLDEN_HUMIDITY: f64 = 26.752;

    #[test]
    fn golden_sample_decodes_to_reference_values() {
        assert!((temperature_from_raw(GOLDEN_RAW) - GOLDEN_TEMPERATURE).abs() < 1e-3);
        assert!((humidity_from_raw(GOLDEN_RAW) - GOLDEN_HUMIDITY).abs() < 1e-3);
    }

    #[test]
    fn temperature_range_endpoints() {
        assert_eq!(temperature_from_raw(0x0000_0000), -40.0);
        assert_eq!(temperature_from_raw(0x8000_0000), 42.5);
        // Code 0xFFFF sits exactly one LSB below the 125 C full scale.
        assert_eq!(temperature_from_raw(0xFFFF_0000), 125.0 - 165.0 / 65536.0);
    }

    #[test]
    fn humidity_ignores_temperature_bits() {
        for raw in [0u32, 0x447C, 0x1234_5678, 0xFFFF_FFFF] {
            assert_eq!(humidity_from_raw(raw), humidity_from_raw(raw | 0xFFFF_0000));
            assert_eq!(humidity_from_raw(raw & 0xFFFF), humidity_from_raw(raw | 0xABCD_0000));
        }
    }

    #[test]
    fn temperature_ignores_humidity_bits() {
        for raw in [0u32, 0x66A0_0000, 0x1234_5678, 0xFFFF_FFFF] {
            assert_eq!(temperature_from_raw(raw), temperature_from_raw(raw & 0xFFFF_0000));
            assert_eq!(temperature_from_raw(raw), temperature_from_raw(raw | 0x0000_4321));
        }
    }

    #[test]
    fn short_byte_string_is_rejected() {
        assert_eq!(combined_sample::<()>(&[0x66]), Err(HdcError::TruncatedSample));
        assert_eq!(combined_sample::<()>(&[0x66, 0xA0, 0x44]), Err(HdcError::TruncatedSample));
        assert_eq!(combined_sample::<()>(&[]), Err(HdcError::TruncatedSample));
        // Overlong strings are just as malformed.
        assert_eq!(
            combined_sample::<()>(&[0x66, 0xA0, 0x44, 0x7C, 0x00]),
            Err(HdcError::TruncatedSample)
        );
    }

    #[test]
    fn sample_word_is_big_endian() {
        assert_eq!(combined_sample::<()>(&[0x66, 0xA0, 0x44, 0x7C]), Ok(GOLDEN_RAW));
    }
}
