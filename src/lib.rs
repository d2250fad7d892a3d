//! Symmetric somewhat-homomorphic encryption over bits, of the DGHV
//! family: a ciphertext of bit `m` has the form `q*p + 2r + m` for a
//! secret odd `p` and small noise `r`. The key holder encrypts a bit
//! vector into a compact [`CompressedCiphertext`]; anyone can
//! [`expand`](CompressedCiphertext::expand) it and evaluate XOR / AND
//! gates — plus the derived [`equal`](EncryptedArray::equal) and
//! [`select`](EncryptedArray::select) circuits used for private
//! information retrieval — without the key, within a bounded number of
//! multiplications.
//!
//! ```
//! use she::{ParameterSet, PlaintextArray, PrivateKey};
//!
//! let params = ParameterSet::generate(8, 1, 7)?;
//! let key = PrivateKey::new(params);
//!
//! let query = key.encrypt(&[true, false, true]);
//! let mut array = query.expand();
//! array ^= &PlaintextArray::new(vec![false, true, true]);
//!
//! assert_eq!(key.decrypt(&array), vec![true, true, false]);
//! # Ok::<(), she::Error>(())
//! ```

pub mod ciphertext;
pub mod error;
pub mod key;
pub mod params;
pub mod plaintext;
pub mod random;
pub mod serialize;

use std::ops::{BitAndAssign, BitXorAssign};

pub use ciphertext::{CompressedCiphertext, EncryptedArray};
pub use error::{Error, Result};
pub use key::PrivateKey;
pub use params::ParameterSet;
pub use plaintext::PlaintextArray;
pub use random::{Csprng, OracleStream};
pub use serialize::INTEGER_SERIALIZATION_BASE;

use error::ensure;

/// Surface shared by the plaintext and encrypted array variants.
pub trait HomomorphicArray: Clone {
    /// Number of bit slots.
    fn size(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Current noise degree (0 for plaintext).
    fn degree(&self) -> u64;

    /// Noise budget (0 for plaintext).
    fn max_degree(&self) -> u64;

    /// Appends `other`'s slots; the degree becomes the maximum of both.
    fn extend(&mut self, other: &Self);

    /// Empty array compatible with `self`, at degree 0.
    fn empty_like(&self) -> Self;
}

/// Homomorphic addition (XOR) over a non-empty list of arrays.
pub fn sum<T>(arrays: &[T]) -> Result<T>
where
    T: HomomorphicArray + for<'a> BitXorAssign<&'a T>,
{
    ensure!(!arrays.is_empty(), "sum requires at least one array");

    let mut result = arrays[0].empty_like();
    for array in arrays {
        result ^= array;
    }
    Ok(result)
}

/// Homomorphic multiplication (AND) over a non-empty list of arrays.
pub fn product<T>(arrays: &[T]) -> Result<T>
where
    T: HomomorphicArray + for<'a> BitAndAssign<&'a T>,
{
    ensure!(!arrays.is_empty(), "product requires at least one array");

    let mut result = arrays[0].empty_like();
    for array in arrays {
        result &= array;
    }
    Ok(result)
}

/// Concatenation of a non-empty list of arrays.
pub fn concat<T: HomomorphicArray>(arrays: &[T]) -> Result<T> {
    ensure!(!arrays.is_empty(), "concat requires at least one array");

    let mut result = arrays[0].empty_like();
    for array in arrays {
        result.extend(array);
    }
    Ok(result)
}
