// Complex values for constant folding
//
// Mirrors the `Complex` class users import from crunch_lib: components
// default to zero and the arithmetic follows the usual field rules.

use crate::helpers::format_number;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Complex {
    pub real: f64,
    pub imag: f64,
}

impl Complex {
    pub fn new(real: f64, imag: f64) -> Self {
        Self { real, imag }
    }

    pub fn from_real(real: f64) -> Self {
        Self { real, imag: 0.0 }
    }

    pub fn is_real(&self) -> bool {
        self.imag == 0.0
    }

    pub fn conjugate(&self) -> Self {
        Self::new(self.real, -self.imag)
    }

    pub fn modulus(&self) -> f64 {
        self.real.hypot(self.imag)
    }

    /// Division, `None` when dividing by zero
    pub fn checked_div(self, other: Complex) -> Option<Complex> {
        let denom = other.real * other.real + other.imag * other.imag;
        if denom == 0.0 {
            return None;
        }
        Some(Complex::new(
            (self.real * other.real + self.imag * other.imag) / denom,
            (self.imag * other.real - self.real * other.imag) / denom,
        ))
    }
}

impl Add for Complex {
    type Output = Complex;

    fn add(self, rhs: Complex) -> Complex {
        Complex::new(self.real + rhs.real, self.imag + rhs.imag)
    }
}

impl Sub for Complex {
    type Output = Complex;

    fn sub(self, rhs: Complex) -> Complex {
        Complex::new(self.real - rhs.real, self.imag - rhs.imag)
    }
}

impl Mul for Complex {
    type Output = Complex;

    fn mul(self, rhs: Complex) -> Complex {
        Complex::new(
            self.real * rhs.real - self.imag * rhs.imag,
            self.real * rhs.imag + self.imag * rhs.real,
        )
    }
}

impl Neg for Complex {
    type Output = Complex;

    fn neg(self) -> Complex {
        Complex::new(-self.real, -self.imag)
    }
}

/// Calculator literal: `3+2i`, `⁻2i`, `i`, `1.5`
impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let imag = match self.imag.abs() {
            m if m == 1.0 => "i".to_string(),
            m => format!("{}i", format_number(m)),
        };

        if self.imag == 0.0 {
            return f.write_str(&format_number(self.real));
        }
        if self.real == 0.0 {
            let sign = if self.imag < 0.0 { "⁻" } else { "" };
            return write!(f, "{}{}", sign, imag);
        }

        let op = if self.imag < 0.0 { '-' } else { '+' };
        write!(f, "{}{}{}", format_number(self.real), op, imag)
    }
}
