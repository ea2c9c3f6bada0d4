//! Crate tests, one module per component. The shared helper checks the
//! contract every cipher must satisfy:
//! ```
//! decrypt(encrypt(message)) == message
//! ```

mod random;
mod rotor;
mod schedule;
mod table;

use crate::Cipher;

/// Ensure that `decrypt(encrypt(message)) == message`.
fn roundtrip<C: Cipher>(cipher: &mut C, message: &str) {
    let ciphertext = cipher.encrypt(message).expect("encryption failed");
    let recovered = cipher.decrypt(&ciphertext).expect("decryption failed");
    assert_eq!(
        recovered, message,
        "round trip did not recover the message\nmessage: {message:?}\nciphertext: \
         {ciphertext:?}\nrecovered: {recovered:?}"
    );
}
