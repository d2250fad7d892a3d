use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::One;
use serde::{Deserialize, Serialize};

use crate::ciphertext::{CompressedCiphertext, EncryptedArray};
use crate::params::ParameterSet;
use crate::random::{Csprng, OracleStream};

/// Symmetric key of the scheme: the parameters plus a secret odd
/// integer `p` of the configured bit size.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateKey {
    parameter_set: ParameterSet,
    #[serde(with = "crate::serialize::base62")]
    private_element: BigInt,
}

impl PrivateKey {
    pub fn new(parameter_set: ParameterSet) -> Self {
        let mut generator = Csprng::new();

        let mut private_element = generator.get_bits(parameter_set.private_key_size_bits);
        while private_element.is_even() {
            private_element = generator.get_bits(parameter_set.private_key_size_bits);
        }

        // An odd q in [1, 2^gamma / p) exists because gamma >= eta. It is
        // carried implicitly by the compressed ciphertext form, so the
        // draw is not retained.
        let q_upper_bound =
            (BigInt::one() << parameter_set.ciphertext_size_bits) / &private_element;
        let mut q = generator.get_range(&q_upper_bound);
        while q.is_even() {
            q = generator.get_range(&q_upper_bound);
        }

        PrivateKey {
            parameter_set,
            private_element,
        }
    }

    /// Encrypts a bit vector into its compressed form: per-element
    /// differences against the oracle stream keyed by the parameters.
    pub fn encrypt(&self, bits: &[bool]) -> CompressedCiphertext {
        let params = &self.parameter_set;
        let mut generator = Csprng::new();
        let mut oracle = OracleStream::new(params.ciphertext_size_bits, params.oracle_seed);

        let public_element_delta = oracle.next().mod_floor(&self.private_element);

        let mut elements_deltas = Vec::with_capacity(bits.len());
        for &m in bits {
            // Strictly positive noise.
            let r = generator.get_range_bits(params.noise_size_bits) + BigInt::one();
            let oracle_output = oracle.next();
            elements_deltas.push(
                (oracle_output - BigInt::from(2u8) * r - BigInt::from(m as u8))
                    .mod_floor(&self.private_element),
            );
        }

        CompressedCiphertext::from_parts(*params, public_element_delta, elements_deltas)
    }

    /// Recovers one bit per element as `(e mod p) mod 2`. The array's
    /// degree is not checked; past the noise budget this silently
    /// returns corrupted bits.
    pub fn decrypt(&self, array: &EncryptedArray) -> Vec<bool> {
        array
            .elements()
            .iter()
            .map(|element| element.mod_floor(&self.private_element).is_odd())
            .collect()
    }

    pub fn parameter_set(&self) -> &ParameterSet {
        &self.parameter_set
    }

    pub fn private_element(&self) -> &BigInt {
        &self.private_element
    }
}
