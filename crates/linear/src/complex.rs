use std::{
    fmt,
    ops::{Add, Mul, Neg, Sub},
    str::FromStr,
};

use approx::{AbsDiffEq, RelativeEq};
use num_traits::{One, Zero};

use crate::{format::PrettyFormat, Error};

/// Two complex values are equal when both components differ by less than this.
pub const EPSILON: f64 = 1e-4;

/// Renders components with log10(1 / EPSILON) decimal places.
const FORMAT: PrettyFormat = PrettyFormat::with_places(4);

/// An immutable complex number `re + im·i`.
///
/// Equality is tolerance based (see [`EPSILON`]), which makes `PartialEq` non-transitive: it is
/// meant for comparing computed results, not for hashing or ordering.
#[derive(Clone, Copy, Debug, Default)]
pub struct Complex {
    re: f64,
    im: f64,
}

impl Complex {
    pub const ZERO: Complex = Complex::new(0.0, 0.0);
    pub const ONE: Complex = Complex::new(1.0, 0.0);
    pub const I: Complex = Complex::new(0.0, 1.0);

    pub const fn new(re: f64, im: f64) -> Self {
        Complex { re, im }
    }

    pub const fn real(re: f64) -> Self {
        Complex { re, im: 0.0 }
    }

    pub fn re(&self) -> f64 {
        self.re
    }

    pub fn im(&self) -> f64 {
        self.im
    }

    pub fn conj(self) -> Self {
        Complex::new(self.re, -self.im)
    }

    /// Squared Euclidean norm, `re² + im²`.
    pub fn norm_sqr(&self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    /// Euclidean norm `|z|`.
    pub fn modulus(&self) -> f64 {
        self.re.hypot(self.im)
    }

    /// `1 / self` as `conj(self) / |self|²`, without a zero check.
    ///
    /// A zero value yields non-finite components; use [`Complex::checked_div`] when the divisor
    /// is not already known to be non-zero.
    pub fn recip(self) -> Complex {
        let denominator = self.norm_sqr();
        Complex::new(self.re / denominator, -self.im / denominator)
    }

    /// Computes `self / rhs` as `self * conj(rhs) / |rhs|²`.
    ///
    /// Fails with [`Error::DivisionByZero`] when `rhs` is zero within [`EPSILON`].
    pub fn checked_div(self, rhs: Complex) -> Result<Complex, Error> {
        if rhs.is_zero() {
            return Err(Error::DivisionByZero {
                lhs: self.to_string(),
                rhs: rhs.to_string(),
            });
        }
        let denominator = rhs.norm_sqr();
        let product = self * rhs.conj();
        Ok(Complex::new(
            product.re / denominator,
            product.im / denominator,
        ))
    }

    fn re_equals(&self, re: f64) -> bool {
        (self.re - re).abs() < EPSILON
    }

    fn im_equals(&self, im: f64) -> bool {
        (self.im - im).abs() < EPSILON
    }

    fn imag_part_string(&self) -> String {
        if self.im_equals(1.0) {
            "i".to_owned()
        } else if self.im_equals(-1.0) {
            "-i".to_owned()
        } else {
            format!("{}i", FORMAT.format(self.im))
        }
    }
}

impl Add for Complex {
    type Output = Complex;

    fn add(self, rhs: Complex) -> Complex {
        Complex::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Sub for Complex {
    type Output = Complex;

    fn sub(self, rhs: Complex) -> Complex {
        Complex::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl Mul for Complex {
    type Output = Complex;

    // (a + bi)(c + di) = (ac - bd) + (ad + bc)i
    fn mul(self, rhs: Complex) -> Complex {
        Complex::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

impl Neg for Complex {
    type Output = Complex;

    fn neg(self) -> Complex {
        Complex::new(-self.re, -self.im)
    }
}

impl PartialEq for Complex {
    fn eq(&self, other: &Complex) -> bool {
        self.abs_diff_eq(other, EPSILON)
    }
}

impl AbsDiffEq for Complex {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        EPSILON
    }

    fn abs_diff_eq(&self, other: &Complex, epsilon: f64) -> bool {
        (self.re - other.re).abs() < epsilon && (self.im - other.im).abs() < epsilon
    }
}

impl RelativeEq for Complex {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Complex, epsilon: f64, max_relative: f64) -> bool {
        self.re.relative_eq(&other.re, epsilon, max_relative)
            && self.im.relative_eq(&other.im, epsilon, max_relative)
    }
}

impl Zero for Complex {
    fn zero() -> Complex {
        Complex::ZERO
    }

    fn is_zero(&self) -> bool {
        self.re_equals(0.0) && self.im_equals(0.0)
    }
}

impl One for Complex {
    fn one() -> Complex {
        Complex::ONE
    }
}

impl From<f64> for Complex {
    fn from(re: f64) -> Complex {
        Complex::real(re)
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            f.write_str("0")
        } else if self.re_equals(0.0) {
            f.write_str(&self.imag_part_string())
        } else if self.im_equals(0.0) {
            f.write_str(&FORMAT.format(self.re))
        } else {
            // a negative imaginary part carries its own sign
            let sign = if self.im > EPSILON { "+" } else { "" };
            write!(
                f,
                "{}{}{}",
                FORMAT.format(self.re),
                sign,
                self.imag_part_string()
            )
        }
    }
}

impl FromStr for Complex {
    type Err = Error;

    /// Parses `[real][+|-][imag]i`, `i`, `-i` or a bare real number, without whitespace.
    fn from_str(s: &str) -> Result<Complex, Error> {
        let invalid = || Error::Parse {
            input: s.to_owned(),
        };

        let mut re = None;
        let mut im = None;
        for term in split_terms(s) {
            let (value, imaginary) = parse_term(term).ok_or_else(invalid)?;
            let slot = if imaginary { &mut im } else { &mut re };
            if slot.replace(value).is_some() {
                return Err(invalid());
            }
        }

        match (re, im) {
            (None, None) => Err(invalid()),
            (re, im) => Ok(Complex::new(re.unwrap_or(0.0), im.unwrap_or(0.0))),
        }
    }
}

/// Splits `s` in front of every sign that is not the leading character.
fn split_terms(s: &str) -> Vec<&str> {
    let mut terms = Vec::new();
    let mut start = 0;
    for (idx, c) in s.char_indices().skip(1) {
        if c == '+' || c == '-' {
            terms.push(&s[start..idx]);
            start = idx;
        }
    }
    if !s.is_empty() {
        terms.push(&s[start..]);
    }
    terms
}

/// Parses a single signed term, returning its value and whether it is the imaginary part.
fn parse_term(term: &str) -> Option<(f64, bool)> {
    let (sign, body) = if let Some(body) = term.strip_prefix('+') {
        (1.0, body)
    } else if let Some(body) = term.strip_prefix('-') {
        (-1.0, body)
    } else {
        (1.0, term)
    };

    let (digits, imaginary) = match body.strip_suffix('i') {
        Some(digits) => (digits, true),
        None => (body, false),
    };

    // a bare `i` or `-i`
    if imaginary && digits.is_empty() {
        return Some((sign, true));
    }
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    digits.parse::<f64>().ok().map(|value| (sign * value, imaginary))
}
