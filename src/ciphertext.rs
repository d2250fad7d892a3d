use std::ops::{BitAnd, BitAndAssign, BitXor, BitXorAssign};
use std::sync::Arc;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::One;
use serde::{Deserialize, Serialize};

use crate::error::{ensure, Result};
use crate::params::ParameterSet;
use crate::plaintext::PlaintextArray;
use crate::random::OracleStream;
use crate::HomomorphicArray;

/// Vector of noisy elements sharing a public modulus, supporting XOR and
/// AND without the private key. Every operation reduces its results
/// modulo the public element and tracks the accumulated noise degree.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "EncryptedArrayRepr", into = "EncryptedArrayRepr")]
pub struct EncryptedArray {
    degree: u64,
    max_degree: u64,
    elements: Vec<BigInt>,
    public_element: Arc<BigInt>,
}

impl EncryptedArray {
    /// Empty array over the public element `x`, at degree 1.
    pub fn new(public_element: BigInt, max_degree: u64) -> Self {
        EncryptedArray::from_parts(Arc::new(public_element), max_degree, 1)
    }

    pub(crate) fn from_parts(public_element: Arc<BigInt>, max_degree: u64, degree: u64) -> Self {
        EncryptedArray {
            degree,
            max_degree,
            elements: Vec::new(),
            public_element,
        }
    }

    /// Current noise degree: an upper bound on the number of AND factors
    /// accumulated by any element.
    pub fn degree(&self) -> u64 {
        self.degree
    }

    /// Noise budget derived from the parameter set at expansion time.
    pub fn max_degree(&self) -> u64 {
        self.max_degree
    }

    /// Whether the noise degree is still within budget. Decryption of an
    /// array for which this is false returns corrupted bits.
    pub fn noise_ok(&self) -> bool {
        self.degree <= self.max_degree
    }

    pub fn size(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> &[BigInt] {
        &self.elements
    }

    pub fn public_element(&self) -> &BigInt {
        &self.public_element
    }

    fn same_modulus(&self, other: &EncryptedArray) -> bool {
        Arc::ptr_eq(&self.public_element, &other.public_element)
            || self.public_element == other.public_element
    }

    /// Element-wise equality against every candidate. Slot `k` of the
    /// result decrypts to 1 iff `self` equals `others[k]`.
    pub fn equal(&self, others: &[EncryptedArray]) -> Result<EncryptedArray> {
        ensure!(
            !others.is_empty(),
            "equality comparison requires at least one candidate"
        );

        let mut result =
            EncryptedArray::from_parts(Arc::clone(&self.public_element), self.max_degree, 1);
        for other in others {
            let diff = self ^ other;
            result.push_all_equal(&diff);
        }
        Ok(result)
    }

    /// Same comparison against plaintext candidates, evaluated in the
    /// encrypted ring.
    pub fn equal_plain(&self, others: &[PlaintextArray]) -> Result<EncryptedArray> {
        ensure!(
            !others.is_empty(),
            "equality comparison requires at least one candidate"
        );

        let mut result =
            EncryptedArray::from_parts(Arc::clone(&self.public_element), self.max_degree, 1);
        for other in others {
            let diff = self ^ other;
            result.push_all_equal(&diff);
        }
        Ok(result)
    }

    // Appends the product of (diff_i + 1) mod x: 1 iff all slots of
    // `diff` decrypt to 0. The product of |diff| factors of degree d
    // raises the worst-case degree to d * |diff|.
    fn push_all_equal(&mut self, diff: &EncryptedArray) {
        debug_assert!(self.same_modulus(diff));
        let x = Arc::clone(&self.public_element);

        let mut all = BigInt::one();
        for element in &diff.elements {
            all = (&all * (element + BigInt::one())).mod_floor(x.as_ref());
        }

        self.degree = self.degree.max(diff.degree * diff.elements.len() as u64);
        self.elements.push(all);
    }

    /// Multiplexer: with `self` a one-hot selector, returns the row of
    /// `others` at the selector's position.
    pub fn select(&self, others: &[EncryptedArray]) -> Result<EncryptedArray> {
        ensure!(!others.is_empty(), "selection requires at least one row");

        let x = Arc::clone(&self.public_element);
        let mut result = EncryptedArray::from_parts(Arc::clone(&x), self.max_degree, 1);
        for (selector, row) in self.elements.iter().zip(others) {
            assert!(
                self.same_modulus(row),
                "selection rows must share the selector's public element"
            );
            let picked = EncryptedArray {
                degree: self.degree + row.degree,
                max_degree: self.max_degree,
                elements: row
                    .elements
                    .iter()
                    .map(|element| (element * selector).mod_floor(x.as_ref()))
                    .collect(),
                public_element: Arc::clone(&x),
            };
            result ^= &picked;
        }
        Ok(result)
    }

    /// Multiplexer over plaintext rows.
    pub fn select_plain(&self, others: &[PlaintextArray]) -> Result<EncryptedArray> {
        ensure!(!others.is_empty(), "selection requires at least one row");

        let x = Arc::clone(&self.public_element);
        let mut result = EncryptedArray::from_parts(Arc::clone(&x), self.max_degree, 1);
        for (selector, row) in self.elements.iter().zip(others) {
            let picked = EncryptedArray {
                degree: self.degree,
                max_degree: self.max_degree,
                elements: row
                    .elements()
                    .iter()
                    .map(|&bit| (selector * BigInt::from(bit as u8)).mod_floor(x.as_ref()))
                    .collect(),
                public_element: Arc::clone(&x),
            };
            result ^= &picked;
        }
        Ok(result)
    }
}

impl HomomorphicArray for EncryptedArray {
    fn size(&self) -> usize {
        self.elements.len()
    }

    fn degree(&self) -> u64 {
        self.degree
    }

    fn max_degree(&self) -> u64 {
        self.max_degree
    }

    fn extend(&mut self, other: &Self) {
        assert!(
            self.same_modulus(other),
            "extended arrays must share a public element"
        );
        self.degree = self.degree.max(other.degree);
        self.elements.extend_from_slice(&other.elements);
    }

    fn empty_like(&self) -> Self {
        EncryptedArray::from_parts(Arc::clone(&self.public_element), self.max_degree, 0)
    }
}

// Two arrays are equal iff they decrypt identically under the same key,
// regardless of how they were built; degrees are bookkeeping only.
impl PartialEq for EncryptedArray {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements && self.same_modulus(other)
    }
}

impl Eq for EncryptedArray {}

impl BitXorAssign<&EncryptedArray> for EncryptedArray {
    fn bitxor_assign(&mut self, rhs: &EncryptedArray) {
        assert!(
            self.same_modulus(rhs),
            "combined arrays must share a public element"
        );
        let x = Arc::clone(&self.public_element);

        self.degree = self.degree.max(rhs.degree);
        let n = self.elements.len().min(rhs.elements.len());
        for i in 0..n {
            self.elements[i] = (&self.elements[i] + &rhs.elements[i]).mod_floor(x.as_ref());
        }
        self.elements.extend_from_slice(&rhs.elements[n..]);
    }
}

impl BitAndAssign<&EncryptedArray> for EncryptedArray {
    fn bitand_assign(&mut self, rhs: &EncryptedArray) {
        assert!(
            self.same_modulus(rhs),
            "combined arrays must share a public element"
        );
        let x = Arc::clone(&self.public_element);

        self.degree += rhs.degree;
        let n = self.elements.len().min(rhs.elements.len());
        for i in 0..n {
            self.elements[i] = (&self.elements[i] * &rhs.elements[i]).mod_floor(x.as_ref());
        }
        // The longer operand's tail is adopted as-is, missing slots pass
        // through instead of zeroing the product.
        self.elements.extend_from_slice(&rhs.elements[n..]);
    }
}

impl BitXorAssign<&PlaintextArray> for EncryptedArray {
    fn bitxor_assign(&mut self, rhs: &PlaintextArray) {
        let x = Arc::clone(&self.public_element);

        let bits = rhs.elements();
        let n = self.elements.len().min(bits.len());
        for i in 0..n {
            self.elements[i] =
                (&self.elements[i] + BigInt::from(bits[i] as u8)).mod_floor(x.as_ref());
        }
        for &bit in &bits[n..] {
            self.elements.push(BigInt::from(bit as u8));
        }
    }
}

impl BitAndAssign<&PlaintextArray> for EncryptedArray {
    fn bitand_assign(&mut self, rhs: &PlaintextArray) {
        let x = Arc::clone(&self.public_element);

        let bits = rhs.elements();
        let n = self.elements.len().min(bits.len());
        for i in 0..n {
            self.elements[i] =
                (&self.elements[i] * BigInt::from(bits[i] as u8)).mod_floor(x.as_ref());
        }
        for &bit in &bits[n..] {
            self.elements.push(BigInt::from(bit as u8));
        }
    }
}

impl BitXor<&EncryptedArray> for &EncryptedArray {
    type Output = EncryptedArray;

    fn bitxor(self, rhs: &EncryptedArray) -> EncryptedArray {
        let mut result = self.clone();
        result ^= rhs;
        result
    }
}

impl BitAnd<&EncryptedArray> for &EncryptedArray {
    type Output = EncryptedArray;

    fn bitand(self, rhs: &EncryptedArray) -> EncryptedArray {
        let mut result = self.clone();
        result &= rhs;
        result
    }
}

impl BitXor<&PlaintextArray> for &EncryptedArray {
    type Output = EncryptedArray;

    fn bitxor(self, rhs: &PlaintextArray) -> EncryptedArray {
        let mut result = self.clone();
        result ^= rhs;
        result
    }
}

impl BitAnd<&PlaintextArray> for &EncryptedArray {
    type Output = EncryptedArray;

    fn bitand(self, rhs: &PlaintextArray) -> EncryptedArray {
        let mut result = self.clone();
        result &= rhs;
        result
    }
}

impl BitXor<&EncryptedArray> for &PlaintextArray {
    type Output = EncryptedArray;

    fn bitxor(self, rhs: &EncryptedArray) -> EncryptedArray {
        rhs ^ self
    }
}

impl BitAnd<&EncryptedArray> for &PlaintextArray {
    type Output = EncryptedArray;

    fn bitand(self, rhs: &EncryptedArray) -> EncryptedArray {
        rhs & self
    }
}

// Plaintext-input variants of the composite operations, lifted into the
// ring of the encrypted candidate list.
impl PlaintextArray {
    /// Element-wise equality against encrypted candidates; the result is
    /// encrypted under the candidates' public element.
    pub fn equal_encrypted(&self, others: &[EncryptedArray]) -> Result<EncryptedArray> {
        ensure!(
            !others.is_empty(),
            "equality comparison requires at least one candidate"
        );

        let mut result = EncryptedArray::from_parts(
            Arc::clone(&others[0].public_element),
            others[0].max_degree,
            1,
        );
        for other in others {
            let diff = other ^ self;
            result.push_all_equal(&diff);
        }
        Ok(result)
    }

    /// Multiplexer over encrypted rows, driven by plaintext selector bits.
    pub fn select_encrypted(&self, others: &[EncryptedArray]) -> Result<EncryptedArray> {
        ensure!(!others.is_empty(), "selection requires at least one row");

        let x = Arc::clone(&others[0].public_element);
        let mut result = EncryptedArray::from_parts(Arc::clone(&x), others[0].max_degree, 1);
        for (&bit, row) in self.elements().iter().zip(others) {
            assert!(
                result.same_modulus(row),
                "selection rows must share a public element"
            );
            let picked = EncryptedArray {
                degree: row.degree,
                max_degree: result.max_degree,
                elements: row
                    .elements
                    .iter()
                    .map(|element| (element * BigInt::from(bit as u8)).mod_floor(x.as_ref()))
                    .collect(),
                public_element: Arc::clone(&x),
            };
            result ^= &picked;
        }
        Ok(result)
    }
}

#[derive(Serialize, Deserialize)]
struct EncryptedArrayRepr {
    degree: u64,
    max_degree: u64,
    #[serde(with = "crate::serialize::base62_vec")]
    elements: Vec<BigInt>,
    #[serde(with = "crate::serialize::base62")]
    public_element: BigInt,
}

impl From<EncryptedArray> for EncryptedArrayRepr {
    fn from(array: EncryptedArray) -> Self {
        EncryptedArrayRepr {
            degree: array.degree,
            max_degree: array.max_degree,
            public_element: array.public_element.as_ref().clone(),
            elements: array.elements,
        }
    }
}

impl From<EncryptedArrayRepr> for EncryptedArray {
    fn from(repr: EncryptedArrayRepr) -> Self {
        EncryptedArray {
            degree: repr.degree,
            max_degree: repr.max_degree,
            elements: repr.elements,
            public_element: Arc::new(repr.public_element),
        }
    }
}

/// Per-element deltas against the oracle stream; the compact form a
/// key holder sends out. Deterministically expands back into an
/// [`EncryptedArray`] without the key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressedCiphertext {
    parameter_set: ParameterSet,
    #[serde(with = "crate::serialize::base62")]
    public_element_delta: BigInt,
    #[serde(with = "crate::serialize::base62_vec")]
    elements_deltas: Vec<BigInt>,
}

impl CompressedCiphertext {
    pub(crate) fn from_parts(
        parameter_set: ParameterSet,
        public_element_delta: BigInt,
        elements_deltas: Vec<BigInt>,
    ) -> Self {
        CompressedCiphertext {
            parameter_set,
            public_element_delta,
            elements_deltas,
        }
    }

    /// Reconstructs the full noisy ciphertext by replaying the oracle
    /// stream for the embedded parameters.
    pub fn expand(&self) -> EncryptedArray {
        let params = &self.parameter_set;
        let mut oracle = OracleStream::new(params.ciphertext_size_bits, params.oracle_seed);

        // A multiple of the private element by construction.
        let public_element = oracle.next() - &self.public_element_delta;

        let mut result =
            EncryptedArray::from_parts(Arc::new(public_element), params.degree(), 1);
        for delta in &self.elements_deltas {
            result.elements.push(oracle.next() - delta);
        }
        result
    }

    pub fn size(&self) -> usize {
        self.elements_deltas.len()
    }

    pub fn elements_deltas(&self) -> &[BigInt] {
        &self.elements_deltas
    }

    pub fn public_element_delta(&self) -> &BigInt {
        &self.public_element_delta
    }
}
