// src/decoder/parse.rs

use super::error::DecodeError;
use super::reading::Reading;
use super::DecodePolicy;

use crate::common::frame::{self, FrameText};
use crate::common::layout;
use crate::common::types::{Precision, Unit};

use arrayvec::ArrayString;
use core::str::FromStr;

/// Up to five digits and the decimal point.
type NumberText = ArrayString<8>;

// --- Internal Helpers ---

/// Field-level failure, before it is tied to a frame.
enum FieldError {
    Length { expected: usize, actual: usize },
    NotANumber,
}

impl FieldError {
    fn into_decode_error(self, frame: &[u8]) -> DecodeError {
        let frame = FrameText::new(frame);
        match self {
            FieldError::Length { expected, actual } => DecodeError::MalformedField { expected, actual, frame },
            FieldError::NotANumber => DecodeError::NumberFormat { frame },
        }
    }
}

#[inline]
fn too_short(frame: &[u8], required: usize) -> DecodeError {
    DecodeError::FrameTooShort { len: frame.len(), required, frame: FrameText::new(frame) }
}

/// Converts a digit field to a value by inserting the decimal point.
///
/// The meter sends the temperature scaled by 10 or 100; placing the point in
/// the digit string keeps the parse exact to what was displayed.
fn field_value(field: &[u8], precision: Precision) -> Result<f32, FieldError> {
    let expected = precision.field_len();
    if field.len() != expected {
        return Err(FieldError::Length { expected, actual: field.len() });
    }
    if !field.iter().all(u8::is_ascii_digit) {
        return Err(FieldError::NotANumber);
    }

    let (whole, fraction) = field.split_at(field.len() - precision.decimals());
    let mut text = NumberText::new();
    whole.iter().for_each(|&d| text.push(d as char));
    text.push('.');
    fraction.iter().for_each(|&d| text.push(d as char));

    f32::from_str(&text).map_err(|_| FieldError::NotANumber)
}

fn read_field(frame: &[u8], precision: Precision) -> Result<f32, DecodeError> {
    let range = precision.field();
    let required = range.end;
    let field = frame.get(range).ok_or_else(|| too_short(frame, required))?;
    field_value(field, precision).map_err(|e| e.into_decode_error(frame))
}

fn check_length(frame: &[u8]) -> Result<(), DecodeError> {
    if frame.len() < layout::MIN_FRAME_LEN {
        return Err(too_short(frame, layout::MIN_FRAME_LEN));
    }
    if frame.len() > layout::MAX_FRAME_LEN {
        return Err(DecodeError::FrameTooLong {
            len: frame.len(),
            max: layout::MAX_FRAME_LEN,
            frame: FrameText::new(frame),
        });
    }
    Ok(())
}

// --- Public Parsing Functions ---

/// Decodes one raw transmission using the indicator byte for precision.
///
/// `raw` may still carry its STX and trailing CR. A `precision_hint` skips the
/// precision indicator and reads the matching field directly, for meters
/// whose resolution is fixed when the link is set up.
///
/// Checks run in order (length, unit, precision and value) and the first
/// failure is returned.
pub fn decode(raw: &[u8], precision_hint: Option<Precision>) -> Result<Reading, DecodeError> {
    decode_with(raw, precision_hint, DecodePolicy::Indicator, false)
}

pub(crate) fn decode_with(
    raw: &[u8],
    precision_hint: Option<Precision>,
    policy: DecodePolicy,
    read_polarity: bool,
) -> Result<Reading, DecodeError> {
    let frame = frame::normalize(raw);
    check_length(frame)?;
    let unit = resolve_unit(frame)?;
    let (precision, mut value) = resolve_reading(frame, precision_hint, policy)?;
    if read_polarity && frame.get(layout::POLARITY_OFFSET) == Some(&layout::POLARITY_NEGATIVE) {
        value = -value;
    }
    Ok(Reading::new(value, unit, precision, FrameText::new(frame)))
}

/// Reads the unit indicator of a trimmed frame.
pub fn resolve_unit(frame: &[u8]) -> Result<Unit, DecodeError> {
    let byte = *frame
        .get(layout::UNIT_OFFSET)
        .ok_or_else(|| too_short(frame, layout::UNIT_OFFSET + 1))?;
    Unit::from_indicator(byte)
        .ok_or_else(|| DecodeError::UnrecognizedUnit { byte, frame: FrameText::new(frame) })
}

/// Determines the precision of a trimmed frame and extracts its temperature.
///
/// The value is the displayed magnitude; byte 4 is not consulted.
pub fn resolve_reading(
    frame: &[u8],
    precision_hint: Option<Precision>,
    policy: DecodePolicy,
) -> Result<(Precision, f32), DecodeError> {
    if let Some(precision) = precision_hint {
        return read_field(frame, precision).map(|value| (precision, value));
    }

    match policy {
        DecodePolicy::Indicator => {
            let byte = *frame
                .get(layout::PRECISION_OFFSET)
                .ok_or_else(|| too_short(frame, layout::PRECISION_OFFSET + 1))?;
            let precision = Precision::from_indicator(byte).ok_or_else(|| {
                DecodeError::UnrecognizedPrecision { byte, frame: FrameText::new(frame) }
            })?;
            read_field(frame, precision).map(|value| (precision, value))
        }
        DecodePolicy::TrialFallback => [Precision::TwoDecimal, Precision::OneDecimal]
            .into_iter()
            .find_map(|precision| {
                read_field(frame, precision)
                    .ok()
                    .map(|value| (precision, value))
            })
            .ok_or_else(|| DecodeError::InvalidFrame { frame: FrameText::new(frame) }),
    }
}

/// Parses a bare numeric field such as `b"08276"` for the given precision.
///
/// Errors carry the field itself as their frame text.
pub fn parse_temperature(field: &[u8], precision: Precision) -> Result<f32, DecodeError> {
    field_value(field, precision).map_err(|e| e.into_decode_error(field))
}


// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a trimmed frame: header, unit, polarity, precision, eight display digits.
    fn frame(unit: u8, precision: u8, digits: &[u8; 8]) -> [u8; 14] {
        let mut f = [0u8; 14];
        f[..6].copy_from_slice(&[b'4', b'1', b'0', unit, b'0', precision]);
        f[6..].copy_from_slice(digits);
        f
    }

    fn framed(trimmed: &[u8]) -> std::vec::Vec<u8> {
        let mut raw = std::vec![layout::START_OF_TEXT];
        raw.extend_from_slice(trimmed);
        raw.push(b'\r');
        raw
    }

    #[test]
    fn test_decode_two_decimal_fahrenheit() {
        let f = frame(b'2', b'2', b"00008276");
        let reading = decode(&f, None).unwrap();
        assert_eq!(reading.value(), 82.76);
        assert_eq!(reading.unit(), Unit::Fahrenheit);
        assert_eq!(reading.precision(), Precision::TwoDecimal);
        assert_eq!(reading.frame().as_bytes(), &f[..]);
    }

    #[test]
    fn test_decode_one_decimal_celsius() {
        let reading = decode(&frame(b'1', b'1', b"00000282"), None).unwrap();
        assert_eq!(reading.value(), 28.2);
        assert_eq!(reading.unit(), Unit::Celsius);
        assert_eq!(reading.precision(), Precision::OneDecimal);
    }

    #[test]
    fn test_decode_zero_runs_inside_value() {
        // 200.0 has zeros on both sides of its leading digit
        let reading = decode(&frame(b'1', b'1', b"00002000"), None).unwrap();
        assert_eq!(reading.value(), 200.0);
        let reading = decode(&frame(b'2', b'2', b"00010000"), None).unwrap();
        assert_eq!(reading.value(), 100.0);
    }

    #[test]
    fn test_polarity_byte_ignored_by_default() {
        let mut f = frame(b'2', b'2', b"00008276");
        f[layout::POLARITY_OFFSET] = layout::POLARITY_NEGATIVE;
        assert_eq!(&f[..], b"41021200008276");
        let reading = decode(&f, None).unwrap();
        assert_eq!(
            (reading.value(), reading.unit(), reading.precision()),
            (82.76, Unit::Fahrenheit, Precision::TwoDecimal)
        );
        let (_, value) = resolve_reading(&f, None, DecodePolicy::Indicator).unwrap();
        assert_eq!(value, 82.76);
    }

    #[test]
    fn test_polarity_when_enabled() {
        let mut f = frame(b'1', b'1', b"00000052");
        assert_eq!(decode_with(&f, None, DecodePolicy::Indicator, true).unwrap().value(), 5.2);
        f[layout::POLARITY_OFFSET] = layout::POLARITY_NEGATIVE;
        assert_eq!(decode_with(&f, None, DecodePolicy::Indicator, true).unwrap().value(), -5.2);
        assert_eq!(decode_with(&f, Some(Precision::TwoDecimal), DecodePolicy::Indicator, true).unwrap().value(), -0.52);
    }

    #[test]
    fn test_decode_framing_artifacts() {
        let f = frame(b'2', b'2', b"00008276");
        let raw = framed(&f);
        let a = decode(&f, None).unwrap();
        let b = decode(&raw, None).unwrap();
        assert_eq!(a, b);
        assert_eq!(b.frame().as_bytes(), &f[..]);
    }

    #[test]
    fn test_decode_is_idempotent() {
        let raw = framed(&frame(b'2', b'2', b"00012345"));
        let a = decode(&raw, None).unwrap();
        let b = decode(&raw, None).unwrap();
        assert_eq!(a.value().to_bits(), b.value().to_bits());
        assert_eq!(a, b);
    }

    #[test]
    fn test_length_boundary() {
        let f = frame(b'1', b'1', b"00000282");
        assert!(decode(&f, None).is_ok());
        assert!(matches!(
            decode(&f[..13], None),
            Err(DecodeError::FrameTooShort { len: 13, required: 14, .. })
        ));
        // STX and CR do not count toward the length
        assert!(matches!(
            decode(&framed(&f[..13]), None),
            Err(DecodeError::FrameTooShort { len: 13, .. })
        ));
        assert!(matches!(decode(b"", None), Err(DecodeError::FrameTooShort { len: 0, .. })));
    }

    #[test]
    fn test_frame_too_long() {
        let mut long = [b'0'; 17];
        long[..14].copy_from_slice(&frame(b'1', b'1', b"00000282"));
        let err = decode(&long, None).unwrap_err();
        assert!(matches!(err, DecodeError::FrameTooLong { len: 17, max: 16, .. }));
        assert_eq!(err.frame().len(), layout::MAX_FRAME_LEN);
        // Up to 16 trimmed bytes are accepted
        assert!(decode(&long[..16], None).is_ok());
    }

    #[test]
    fn test_unrecognized_unit() {
        let err = decode(&frame(b'9', b'2', b"00008276"), None).unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnrecognizedUnit { byte: b'9', frame: FrameText::new(&frame(b'9', b'2', b"00008276")) }
        );
        // Unit is checked before precision
        assert!(matches!(
            decode(&frame(b'9', b'X', b"00008276"), None),
            Err(DecodeError::UnrecognizedUnit { byte: b'9', .. })
        ));
    }

    #[test]
    fn test_unrecognized_precision() {
        assert!(matches!(
            decode(&frame(b'2', b'X', b"00008276"), None),
            Err(DecodeError::UnrecognizedPrecision { byte: b'X', .. })
        ));
        assert!(matches!(
            decode(&frame(b'2', b'0', b"00008276"), None),
            Err(DecodeError::UnrecognizedPrecision { byte: b'0', .. })
        ));
    }

    #[test]
    fn test_non_digit_field() {
        let f = frame(b'2', b'2', b"00008A76");
        assert_eq!(&f[9..14], b"08A76");
        assert_eq!(decode(&f, None), Err(DecodeError::NumberFormat { frame: FrameText::new(&f) }));
    }

    #[test]
    fn test_hint_overrides_indicator() {
        // Hint wins even over an unreadable indicator
        let reading = decode(&frame(b'1', b'X', b"00000282"), Some(Precision::OneDecimal)).unwrap();
        assert_eq!(reading.value(), 28.2);
        assert_eq!(reading.precision(), Precision::OneDecimal);

        // A two-decimal hint reads the five-digit field
        let reading = decode(&frame(b'1', b'1', b"00000282"), Some(Precision::TwoDecimal)).unwrap();
        assert_eq!(reading.value(), 2.82);
        assert_eq!(reading.precision(), Precision::TwoDecimal);
    }

    #[test]
    fn test_trial_fallback_policy() {
        let two = frame(b'2', b'X', b"00008276");
        let (precision, value) = resolve_reading(&two, None, DecodePolicy::TrialFallback).unwrap();
        assert_eq!((precision, value), (Precision::TwoDecimal, 82.76));

        let one = frame(b'1', b'1', b"000 0282");
        let (precision, value) = resolve_reading(&one, None, DecodePolicy::TrialFallback).unwrap();
        assert_eq!((precision, value), (Precision::OneDecimal, 28.2));

        let neither = frame(b'1', b'1', b"00000A82");
        assert!(matches!(
            resolve_reading(&neither, None, DecodePolicy::TrialFallback),
            Err(DecodeError::InvalidFrame { .. })
        ));
    }

    #[test]
    fn test_resolve_on_short_input() {
        assert!(matches!(resolve_unit(b"410"), Err(DecodeError::FrameTooShort { required: 4, .. })));
        assert!(matches!(
            resolve_reading(b"41010", None, DecodePolicy::Indicator),
            Err(DecodeError::FrameTooShort { required: 6, .. })
        ));
        assert!(matches!(
            resolve_reading(b"4101010000", None, DecodePolicy::Indicator),
            Err(DecodeError::FrameTooShort { len: 10, required: 14, .. })
        ));
    }

    #[test]
    fn test_parse_temperature() {
        assert_eq!(parse_temperature(b"08276", Precision::TwoDecimal), Ok(82.76));
        assert_eq!(parse_temperature(b"0282", Precision::OneDecimal), Ok(28.2));
        assert_eq!(parse_temperature(b"00000", Precision::TwoDecimal), Ok(0.0));
        assert_eq!(
            parse_temperature(b"0282", Precision::TwoDecimal),
            Err(DecodeError::MalformedField { expected: 5, actual: 4, frame: FrameText::new(b"0282") })
        );
        assert!(matches!(
            parse_temperature(b"-282", Precision::OneDecimal),
            Err(DecodeError::NumberFormat { .. })
        ));
        assert!(matches!(
            parse_temperature(b"08.76", Precision::TwoDecimal),
            Err(DecodeError::NumberFormat { .. })
        ));
    }
}
