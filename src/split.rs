use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::codec::{self, Share};
use crate::field::FieldElement;
use crate::polynomial::Polynomial;

pub const DEFAULT_TOTAL_SHARES: u32 = 5;
pub const DEFAULT_THRESHOLD: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    pub total_shares: u32, //n
    pub threshold: u32,    //t
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters {
            total_shares: DEFAULT_TOTAL_SHARES,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl Parameters {
    pub fn new(total_shares: u32, threshold: u32) -> Self {
        Parameters {
            total_shares,
            threshold,
        }
    }

    /// Checks the share counts alone, in the same order `split` does.
    pub fn validate(&self) -> Result<(), SplitError> {
        if self.total_shares < 2 {
            return Err(SplitError::InvalidTotalShares(self.total_shares));
        }
        if self.threshold < 2 {
            return Err(SplitError::InvalidThreshold(self.threshold));
        }
        if self.threshold > self.total_shares {
            return Err(SplitError::ThresholdExceedsShares {
                threshold: self.threshold,
                total_shares: self.total_shares,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SplitError {
    #[error("secret must not be empty")]
    EmptySecret,
    #[error("total shares must be at least 2, got {0}")]
    InvalidTotalShares(u32),
    #[error("threshold must be at least 2, got {0}")]
    InvalidThreshold(u32),
    #[error("threshold {threshold} exceeds total shares {total_shares}")]
    ThresholdExceedsShares { threshold: u32, total_shares: u32 },
    #[error("secret of {0} bytes does not fit in the field")]
    SecretTooLarge(usize),
}

/// Splits `secret` into `total_shares` shares, any `threshold` of which reconstruct it.
///
/// Every call draws fresh coefficients, so shares from different calls must never be
/// mixed when combining.
pub fn split_shares(secret: &[u8], total_shares: u32, threshold: u32) -> Result<Vec<Share>, SplitError> {
    if secret.is_empty() {
        return Err(SplitError::EmptySecret);
    }
    Parameters::new(total_shares, threshold).validate()?;
    let secret = FieldElement::from_bytes_be(secret).ok_or(SplitError::SecretTooLarge(secret.len()))?;

    let poly = Polynomial::random(secret, (threshold - 1) as usize, &mut OsRng);

    // x = 0 is the secret itself
    let shares = (1..=total_shares)
        .map(|x| Share {
            x,
            y: poly.evaluate(x),
        })
        .collect::<Vec<_>>();

    debug!(total_shares, threshold, "split secret");
    Ok(shares)
}

/// Same as [`split_shares`], with every share already in its wire form.
pub fn split(secret: &[u8], total_shares: u32, threshold: u32) -> Result<Vec<String>, SplitError> {
    let shares = split_shares(secret, total_shares, threshold)?;
    Ok(shares.iter().map(codec::encode).collect())
}

pub fn split_with(secret: &[u8], params: &Parameters) -> Result<Vec<String>, SplitError> {
    split(secret, params.total_shares, params.threshold)
}
