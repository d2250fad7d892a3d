use std::ops::{BitAnd, BitAndAssign, BitXor, BitXorAssign};

use serde::{Deserialize, Serialize};

use crate::error::{ensure, Result};
use crate::HomomorphicArray;

/// Bit vector participating in the same operation surface as
/// [`EncryptedArray`](crate::EncryptedArray), as the noise-free variant.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaintextArray {
    elements: Vec<bool>,
}

impl PlaintextArray {
    pub fn new(elements: Vec<bool>) -> Self {
        PlaintextArray { elements }
    }

    /// Always 0: plaintext carries no noise.
    pub fn degree(&self) -> u64 {
        0
    }

    pub fn max_degree(&self) -> u64 {
        0
    }

    pub fn size(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> &[bool] {
        &self.elements
    }

    /// Slot `k` of the result is 1 iff `self` equals `others[k]`.
    pub fn equal(&self, others: &[PlaintextArray]) -> Result<PlaintextArray> {
        ensure!(
            !others.is_empty(),
            "equality comparison requires at least one candidate"
        );

        let mut result = PlaintextArray::default();
        for other in others {
            let diff = self ^ other;
            result.elements.push(diff.elements.iter().all(|&bit| !bit));
        }
        Ok(result)
    }

    /// With `self` a one-hot selector, returns the selected row.
    pub fn select(&self, others: &[PlaintextArray]) -> Result<PlaintextArray> {
        ensure!(!others.is_empty(), "selection requires at least one row");

        let mut result = PlaintextArray::default();
        for (&selector, row) in self.elements.iter().zip(others) {
            let mut picked = row.clone();
            for bit in &mut picked.elements {
                *bit &= selector;
            }
            result ^= &picked;
        }
        Ok(result)
    }
}

impl HomomorphicArray for PlaintextArray {
    fn size(&self) -> usize {
        self.elements.len()
    }

    fn degree(&self) -> u64 {
        0
    }

    fn max_degree(&self) -> u64 {
        0
    }

    fn extend(&mut self, other: &Self) {
        self.elements.extend_from_slice(&other.elements);
    }

    fn empty_like(&self) -> Self {
        PlaintextArray::default()
    }
}

impl From<Vec<bool>> for PlaintextArray {
    fn from(elements: Vec<bool>) -> Self {
        PlaintextArray { elements }
    }
}

impl From<PlaintextArray> for Vec<bool> {
    fn from(array: PlaintextArray) -> Self {
        array.elements
    }
}

impl PartialEq<Vec<bool>> for PlaintextArray {
    fn eq(&self, other: &Vec<bool>) -> bool {
        self.elements == *other
    }
}

impl PartialEq<PlaintextArray> for Vec<bool> {
    fn eq(&self, other: &PlaintextArray) -> bool {
        *self == other.elements
    }
}

impl BitXorAssign<&PlaintextArray> for PlaintextArray {
    fn bitxor_assign(&mut self, rhs: &PlaintextArray) {
        let n = self.elements.len().min(rhs.elements.len());
        for i in 0..n {
            self.elements[i] ^= rhs.elements[i];
        }
        self.elements.extend_from_slice(&rhs.elements[n..]);
    }
}

impl BitAndAssign<&PlaintextArray> for PlaintextArray {
    fn bitand_assign(&mut self, rhs: &PlaintextArray) {
        let n = self.elements.len().min(rhs.elements.len());
        for i in 0..n {
            self.elements[i] &= rhs.elements[i];
        }
        // Tail handling mirrors XOR: the longer operand's slots are
        // adopted as-is rather than zeroed.
        self.elements.extend_from_slice(&rhs.elements[n..]);
    }
}

impl BitXor<&PlaintextArray> for &PlaintextArray {
    type Output = PlaintextArray;

    fn bitxor(self, rhs: &PlaintextArray) -> PlaintextArray {
        let mut result = self.clone();
        result ^= rhs;
        result
    }
}

impl BitAnd<&PlaintextArray> for &PlaintextArray {
    type Output = PlaintextArray;

    fn bitand(self, rhs: &PlaintextArray) -> PlaintextArray {
        let mut result = self.clone();
        result &= rhs;
        result
    }
}
