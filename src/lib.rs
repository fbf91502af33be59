//! (t, n)-threshold secret sharing over the prime field GF(2^521 - 1).
//!
//! Any `t` of the `n` shares produced by [`split`] reconstruct the secret through
//! [`combine`]. Fewer than `t` shares reveal nothing, and combining them still yields a
//! value: it is simply unrelated to the secret. Nothing here can detect that case.

pub mod codec;
pub mod combine;
pub mod field;
pub mod polynomial;
pub mod session;
pub mod split;

pub use codec::*;
pub use combine::*;
pub use field::{FieldElement, PRIME};
pub use session::*;
pub use split::*;
