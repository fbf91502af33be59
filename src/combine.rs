use std::collections::HashSet;

use thiserror::Error;
use tracing::debug;

use crate::codec::{self, DecodeError, Share};
use crate::field::FieldElement;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CombineError {
    #[error("no shares provided")]
    NoShares,
    #[error("share index {0} appears more than once")]
    DuplicateShareIndex(u32),
    #[error("share index 0 is not a valid share")]
    ZeroShareIndex,
    #[error("secret needs {needed} bytes but only {len} were requested")]
    LengthTooShort { needed: usize, len: usize },
    #[error("invalid share: {0}")]
    Decode(#[from] DecodeError),
}

/// Reconstructs the secret from a set of shares by Lagrange interpolation at x = 0.
///
/// This cannot tell whether enough shares were supplied: below the original threshold the
/// result is a well-formed value that has nothing to do with the secret. The returned bytes
/// are the minimal big-endian encoding, so leading zero bytes of the original secret are not
/// restored. Use [`combine_shares_with_len`] when the original length is known.
pub fn combine_shares(shares: &[Share]) -> Result<Vec<u8>, CombineError> {
    Ok(interpolate_at_zero(shares)?.to_bytes_be())
}

/// Like [`combine_shares`], left-padding the result with zeros to exactly `len` bytes.
pub fn combine_shares_with_len(shares: &[Share], len: usize) -> Result<Vec<u8>, CombineError> {
    let secret = interpolate_at_zero(shares)?;
    let bytes = if secret.is_zero() {
        Vec::new()
    } else {
        secret.to_bytes_be()
    };
    if bytes.len() > len {
        return Err(CombineError::LengthTooShort {
            needed: bytes.len(),
            len,
        });
    }

    let mut out = vec![0u8; len - bytes.len()];
    out.extend_from_slice(&bytes);
    Ok(out)
}

/// Decodes each share from its wire form and reconstructs the secret.
pub fn combine<S: AsRef<str>>(encoded_shares: &[S]) -> Result<Vec<u8>, CombineError> {
    combine_shares(&decode_all(encoded_shares)?)
}

pub fn combine_with_len<S: AsRef<str>>(encoded_shares: &[S], len: usize) -> Result<Vec<u8>, CombineError> {
    combine_shares_with_len(&decode_all(encoded_shares)?, len)
}

fn decode_all<S: AsRef<str>>(encoded_shares: &[S]) -> Result<Vec<Share>, CombineError> {
    encoded_shares
        .iter()
        .map(|s| codec::decode(s.as_ref()).map_err(CombineError::from))
        .collect()
}

fn validate(shares: &[Share]) -> Result<(), CombineError> {
    if shares.is_empty() {
        return Err(CombineError::NoShares);
    }

    let mut seen = HashSet::with_capacity(shares.len());
    for share in shares {
        if share.x == 0 {
            return Err(CombineError::ZeroShareIndex);
        }
        if !seen.insert(share.x) {
            return Err(CombineError::DuplicateShareIndex(share.x));
        }
    }
    Ok(())
}

/// secret = sum_i y_i * prod_{j != i} (0 - x_j) / (x_i - x_j)
fn interpolate_at_zero(shares: &[Share]) -> Result<FieldElement, CombineError> {
    validate(shares)?;

    let xs: Vec<FieldElement> = shares.iter().map(|s| FieldElement::from_u32(s.x)).collect();

    let mut acc = FieldElement::zero();
    for (i, share) in shares.iter().enumerate() {
        let mut num = FieldElement::one();
        let mut den = FieldElement::one();
        for (j, xj) in xs.iter().enumerate() {
            if i != j {
                num = num.mul(&xj.neg());
                den = den.mul(&xs[i].sub(xj));
            }
        }
        // distinct non-zero indices below 2^32 never collide modulo P
        let den_inv = match den.inverse() {
            Some(inv) => inv,
            None => return Err(CombineError::DuplicateShareIndex(share.x)),
        };
        acc = acc.add(&share.y.mul(&num).mul(&den_inv));
    }

    debug!(share_count = shares.len(), "combined shares");
    Ok(acc)
}
