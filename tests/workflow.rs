//! Client/server round trip with serialized objects crossing the
//! boundary, the way a remote execution would use the crate.

use she::{CompressedCiphertext, EncryptedArray, ParameterSet, PlaintextArray, PrivateKey};

#[test]
fn remote_execution_simulation() {
    let plaintext = vec![true, false, true, false, true, false, true, false];

    // ----------- client ----------------------------------------------
    let (sk, request) = {
        let params = ParameterSet::generate(42, 1, 42).unwrap();
        let sk = PrivateKey::new(params);

        let compressed = sk.encrypt(&plaintext);
        (sk, serde_json::to_string(&compressed).unwrap())
    };

    // ----------- server ----------------------------------------------
    let response = {
        let received: CompressedCiphertext = serde_json::from_str(&request).unwrap();
        let ciphertext = received.expand();

        let mask = PlaintextArray::new(vec![true; 8]);
        let result = &ciphertext ^ &mask;

        serde_json::to_string(&result).unwrap()
    };

    // ----------- client ----------------------------------------------
    let received: EncryptedArray = serde_json::from_str(&response).unwrap();
    assert_eq!(
        sk.decrypt(&received),
        vec![false, true, false, true, false, true, false, true]
    );
}
