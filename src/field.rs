use std::fmt;

use lazy_static::lazy_static;
use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bit length of the field prime.
pub const PRIME_BITS: usize = 521;

lazy_static! {
    /// The Mersenne prime 2^521 - 1. Every operation in this crate works modulo this value.
    pub static ref PRIME: BigUint = (BigUint::one() << PRIME_BITS) - BigUint::one();
    static ref PRIME_MINUS_TWO: BigUint = &*PRIME - BigUint::from(2u32);
}

/// An integer in `[0, P)`. Deserialization goes through the same range check as
/// [`FieldElement::from_biguint`].
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "BigUint", into = "BigUint")]
pub struct FieldElement(BigUint);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("value is not below the field prime")]
pub struct OutOfFieldError;

impl TryFrom<BigUint> for FieldElement {
    type Error = OutOfFieldError;

    fn try_from(value: BigUint) -> Result<Self, Self::Error> {
        FieldElement::from_biguint(value).ok_or(OutOfFieldError)
    }
}

impl From<FieldElement> for BigUint {
    fn from(element: FieldElement) -> Self {
        element.0
    }
}

impl FieldElement {
    pub fn zero() -> Self {
        FieldElement(BigUint::zero())
    }

    pub fn one() -> Self {
        FieldElement(BigUint::one())
    }

    pub fn from_u32(x: u32) -> Self {
        FieldElement(BigUint::from(x))
    }

    /// Interprets `value` as a field element, returning `None` when it is not below `P`.
    pub fn from_biguint(value: BigUint) -> Option<Self> {
        if value < *PRIME {
            Some(FieldElement(value))
        } else {
            None
        }
    }

    /// Big-endian unsigned interpretation of `bytes`; `None` when the integer is `>= P`.
    pub fn from_bytes_be(bytes: &[u8]) -> Option<Self> {
        Self::from_biguint(BigUint::from_bytes_be(bytes))
    }

    /// Minimal big-endian encoding. Zero encodes as a single `0x00`.
    pub fn to_bytes_be(&self) -> Vec<u8> {
        self.0.to_bytes_be()
    }

    /// Samples uniformly from `[0, P)`.
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        FieldElement(rng.gen_biguint_below(&PRIME))
    }

    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn add(&self, other: &FieldElement) -> FieldElement {
        FieldElement((&self.0 + &other.0) % &*PRIME)
    }

    /// `(a - b) mod P`, always in `[0, P)`.
    pub fn sub(&self, other: &FieldElement) -> FieldElement {
        FieldElement((&self.0 + &*PRIME - &other.0) % &*PRIME)
    }

    pub fn mul(&self, other: &FieldElement) -> FieldElement {
        FieldElement((&self.0 * &other.0) % &*PRIME)
    }

    pub fn neg(&self) -> FieldElement {
        FieldElement::zero().sub(self)
    }

    /// Multiplicative inverse via Fermat's little theorem, `a^(P-2) mod P`.
    /// Zero has no inverse.
    pub fn inverse(&self) -> Option<FieldElement> {
        if self.is_zero() {
            return None;
        }
        Some(FieldElement(self.0.modpow(&PRIME_MINUS_TWO, &PRIME)))
    }
}

// Field elements may be secrets or coefficients, keep them out of logs.
impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({} bits)", self.0.bits())
    }
}
