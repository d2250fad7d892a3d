use serde::{Deserialize, Serialize};

use crate::error::{ensure, Result};

/// Scheme parameters: security level, noise / private-key / ciphertext
/// sizes in bits, and the seed of the public oracle stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSet {
    pub security: u64,
    pub noise_size_bits: u64,
    pub private_key_size_bits: u64,
    pub ciphertext_size_bits: u64,
    pub oracle_seed: u64,
}

impl ParameterSet {
    pub fn new(
        security: u64,
        noise_size_bits: u64,
        private_key_size_bits: u64,
        ciphertext_size_bits: u64,
        oracle_seed: u64,
    ) -> Result<Self> {
        ensure!(
            ciphertext_size_bits >= private_key_size_bits
                && private_key_size_bits >= noise_size_bits
                && noise_size_bits > 0,
            "bad parameter sizes"
        );

        Ok(ParameterSet {
            security,
            noise_size_bits,
            private_key_size_bits,
            ciphertext_size_bits,
            oracle_seed,
        })
    }

    /// Derives a parameter set for `security` bits that supports at least
    /// `circuit_mult_size` homomorphic multiplications.
    pub fn generate(security: u64, circuit_mult_size: u64, oracle_seed: u64) -> Result<Self> {
        ensure!(security > 0, "security must be greater than zero");
        ensure!(
            circuit_mult_size > 0,
            "multiplicative circuit size must be greater than zero"
        );

        let noise_size_bits = 2 * security;
        let private_key_size_bits = security * security + security * circuit_mult_size;
        let ciphertext_size_bits =
            private_key_size_bits * private_key_size_bits * circuit_mult_size;

        ParameterSet::new(
            security,
            noise_size_bits,
            private_key_size_bits,
            ciphertext_size_bits,
            oracle_seed,
        )
    }

    /// Approximate number of homomorphic multiplications a ciphertext
    /// survives before decryption becomes unreliable.
    pub fn degree(&self) -> u64 {
        self.private_key_size_bits / self.noise_size_bits
    }
}

#[cfg(test)]
mod tests {
    use super::ParameterSet;

    #[test]
    fn test_construction() {
        assert!(ParameterSet::new(42, 1000, 100, 10000, 5).is_err());
        assert!(ParameterSet::new(42, 100, 1000, 999, 5).is_err());
        assert!(ParameterSet::new(42, 0, 1, 2, 5).is_err());

        let params = ParameterSet::new(42, 100, 1000, 100000, 5).unwrap();
        assert_eq!(params.security, 42);
        assert_eq!(params.noise_size_bits, 100);
        assert_eq!(params.private_key_size_bits, 1000);
        assert_eq!(params.ciphertext_size_bits, 100000);
        assert_eq!(params.oracle_seed, 5);
        assert_eq!(params.degree(), 10);
    }

    #[test]
    fn test_generation() {
        assert!(ParameterSet::generate(0, 0, 42).is_err());
        assert!(ParameterSet::generate(0, 1, 42).is_err());
        assert!(ParameterSet::generate(1, 0, 42).is_err());

        let security = 42;
        let circuit_mult_size = 20;
        let params = ParameterSet::generate(security, circuit_mult_size, 42).unwrap();

        assert_eq!(params.security, security);
        assert_eq!(params.noise_size_bits, 2 * security);
        assert_eq!(
            params.private_key_size_bits,
            security * security + security * circuit_mult_size
        );
        assert_eq!(
            params.ciphertext_size_bits,
            params.private_key_size_bits * params.private_key_size_bits * circuit_mult_size
        );
        assert!(params.degree() - 1 > circuit_mult_size);
    }

    #[test]
    fn test_equality() {
        let a = ParameterSet::new(42, 100, 1000, 100000, 5).unwrap();
        let b = ParameterSet::new(42, 100, 1000, 100000, 5).unwrap();
        let c = ParameterSet::new(72, 100, 1000, 100000, 5).unwrap();

        assert_eq!(a, b);
        assert_ne!(b, c);
        assert_ne!(c, a);
    }

    #[test]
    fn test_serialization_round_trip() {
        let params = ParameterSet::new(42, 100, 1000, 100000, 5).unwrap();

        let json = serde_json::to_string(&params).unwrap();
        let restored: ParameterSet = serde_json::from_str(&json).unwrap();
        assert_eq!(params, restored);

        let bytes = bincode::serialize(&params).unwrap();
        let restored: ParameterSet = bincode::deserialize(&bytes).unwrap();
        assert_eq!(params, restored);
    }
}
