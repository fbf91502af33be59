//! Text form of a share: `"<x>:<y_hex>"`, decimal `x` and lowercase hexadecimal `y`
//! without a `0x` prefix, e.g. `"1:3fae21"`. This is a wire contract, any change here
//! breaks every share already handed out.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::field::FieldElement;

const SEPARATOR: char = ':';

/// One point `(x, f(x))` on a split polynomial.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Share {
    pub x: u32,
    pub y: FieldElement,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("share must have the form <index>:<hex value>")]
    MalformedShare,
    #[error("share value is not valid hexadecimal")]
    InvalidHex,
    #[error("share index is not a valid non-negative integer")]
    InvalidIndex,
    #[error("share value is outside the field")]
    ValueOutOfRange,
}

pub fn encode(share: &Share) -> String {
    format!(
        "{}{}{}",
        share.x,
        SEPARATOR,
        share.y.as_biguint().to_str_radix(16)
    )
}

pub fn decode(text: &str) -> Result<Share, DecodeError> {
    let mut parts = text.split(SEPARATOR);
    let (index, value) = match (parts.next(), parts.next(), parts.next()) {
        (Some(index), Some(value), None) => (index, value),
        _ => return Err(DecodeError::MalformedShare),
    };

    // u32::from_str would also take a leading '+'
    if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DecodeError::InvalidIndex);
    }
    let x = index.parse::<u32>().map_err(|_| DecodeError::InvalidIndex)?;

    // BigUint's radix parser tolerates '_' and '+', which are not part of the format
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(DecodeError::InvalidHex);
    }
    let y = BigUint::parse_bytes(value.as_bytes(), 16).ok_or(DecodeError::InvalidHex)?;
    let y = FieldElement::from_biguint(y).ok_or(DecodeError::ValueOutOfRange)?;

    Ok(Share { x, y })
}

impl fmt::Display for Share {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode(self))
    }
}

impl FromStr for Share {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s)
    }
}
