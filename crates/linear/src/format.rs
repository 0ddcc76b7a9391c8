use crate::Error;

/// Magnitudes outside `[SCI_LOWER, SCI_UPPER)` fall back to scientific notation.
const SCI_LOWER: f64 = 1e-3;
const SCI_UPPER: f64 = 1e7;

/// Rounds a number to a fixed number of decimal places and prints it without trailing zeros,
/// dropping the decimal point too when nothing is left after it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PrettyFormat {
    places: usize,
}

impl Default for PrettyFormat {
    fn default() -> Self {
        PrettyFormat::with_places(3)
    }
}

impl PrettyFormat {
    /// Creates a formatter rounding to `places` decimal places.
    ///
    /// Fails with [`Error::InvalidPrecision`] if `places` is negative.
    pub fn new(places: i32) -> Result<Self, Error> {
        usize::try_from(places)
            .map(PrettyFormat::with_places)
            .map_err(|_| Error::InvalidPrecision { places })
    }

    pub(crate) const fn with_places(places: usize) -> Self {
        PrettyFormat { places }
    }

    pub fn places(&self) -> usize {
        self.places
    }

    pub fn format(&self, num: f64) -> String {
        if !num.is_finite() {
            return num.to_string();
        }
        let rounded = round_half_up(&num.to_string(), self.places);
        let trimmed = if rounded.contains('.') {
            rounded.trim_end_matches('0').trim_end_matches('.')
        } else {
            rounded.as_str()
        };

        let value = match trimmed.parse::<f64>() {
            Ok(value) => value,
            Err(_) => return trimmed.to_owned(),
        };

        let magnitude = value.abs();
        if value == 0.0 {
            // also folds "-0" into "0"
            "0".to_owned()
        } else if magnitude < SCI_LOWER || magnitude >= SCI_UPPER {
            format!("{value:e}")
        } else {
            trimmed.to_owned()
        }
    }
}

/// Rounds the plain decimal text `num` (no exponent) to `places` decimals, ties away from zero.
///
/// Works on the shortest decimal representation, so `1.005` rounds to `1.01` even though the
/// nearest double lies slightly below it.
fn round_half_up(num: &str, places: usize) -> String {
    let (sign, magnitude) = match num.strip_prefix('-') {
        Some(magnitude) => ("-", magnitude),
        None => ("", num),
    };
    let (int_part, frac_part) = magnitude.split_once('.').unwrap_or((magnitude, ""));

    let mut digits: Vec<u8> = int_part.bytes().collect();
    digits.extend(frac_part.bytes().chain(std::iter::repeat(b'0')).take(places));

    if frac_part.as_bytes().get(places).is_some_and(|&d| d >= b'5') {
        // propagate the carry, growing the integer part on overflow
        let mut idx = digits.len();
        loop {
            if idx == 0 {
                digits.insert(0, b'1');
                break;
            }
            idx -= 1;
            if digits[idx] == b'9' {
                digits[idx] = b'0';
            } else {
                digits[idx] += 1;
                break;
            }
        }
    }

    let split = digits.len() - places;
    let (int_digits, frac_digits) = digits.split_at(split);
    let int_digits = String::from_utf8_lossy(int_digits);
    if places == 0 {
        format!("{sign}{int_digits}")
    } else {
        format!("{sign}{int_digits}.{}", String::from_utf8_lossy(frac_digits))
    }
}
