use rand::{CryptoRng, RngCore};

use crate::field::FieldElement;

/// f(x) = a[0] + a[1]x + ... + a[t-1]x^(t-1), with a[0] holding the secret.
///
/// Built fresh for every split and dropped once the shares exist. Not `Clone` or `Debug`:
/// the coefficients must never be copied out or logged.
pub struct Polynomial {
    coefficients: Vec<FieldElement>,
}

impl Polynomial {
    /// Sets a[0] to `secret` and samples a[1..=degree] uniformly from the field.
    pub fn random<R: RngCore + CryptoRng>(secret: FieldElement, degree: usize, rng: &mut R) -> Self {
        let mut coefficients = Vec::with_capacity(degree + 1);
        coefficients.push(secret);
        for _ in 0..degree {
            coefficients.push(FieldElement::random(rng));
        }

        Self { coefficients }
    }

    #[cfg(test)]
    pub(crate) fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Evaluates with Horner's method: a[0] + x*(a[1] + x*(a[2] + ...)).
    pub fn evaluate(&self, x: u32) -> FieldElement {
        let x = FieldElement::from_u32(x);
        self.coefficients
            .iter()
            .rev()
            .fold(FieldElement::zero(), |acc, c| acc.mul(&x).add(c))
    }

    #[cfg(test)]
    pub(crate) fn from_coefficients(coefficients: Vec<FieldElement>) -> Self {
        Self { coefficients }
    }

    #[cfg(test)]
    pub(crate) fn coefficients(&self) -> &[FieldElement] {
        &self.coefficients
    }
}
