//! Sequential composition of the rotor machine and the block cipher.

use crate::{
    cipher::{
        des::Des,
        rotor::{Alphabet, RotorMachine},
        Cipher,
    },
    error::{Error, Result},
    random::RandomSource,
};

/// The two-layer cipher: rotor substitution first, block encryption second.
///
/// Encryption runs the plaintext through the rotor machine and encrypts the
/// result with the block cipher; decryption peels the layers in the
/// opposite order. The intermediate stage of each direction is retained
/// alongside the final output, so the layers can be inspected one at a
/// time; asking for a stage before the operation that produces it has run
/// fails with [`Error::StateNotSet`].
#[derive(Debug, Clone)]
pub struct HybridCipher {
    rotor: RotorMachine,
    block: Des,
    rotor_ciphertext: Option<String>,
    ciphertext: Option<String>,
    block_plaintext: Option<String>,
    plaintext: Option<String>,
}

impl HybridCipher {
    /// Compose an explicit rotor machine and block cipher.
    pub fn new(rotor: RotorMachine, block: Des) -> Self {
        Self {
            rotor,
            block,
            rotor_ciphertext: None,
            ciphertext: None,
            block_plaintext: None,
            plaintext: None,
        }
    }

    /// Both layers drawn from one random source: a rotor machine over the
    /// full ASCII alphabet (so every codec character is substituted rather
    /// than passed through) and a block cipher with per-instance random
    /// tables.
    pub fn randomized(random: &mut RandomSource) -> Self {
        let rotor = RotorMachine::randomized(Alphabet::ascii(), random);
        let block = Des::randomized(random);
        Self::new(rotor, block)
    }

    /// The rotor layer.
    pub fn rotor(&self) -> &RotorMachine {
        &self.rotor
    }

    /// The block layer.
    pub fn block(&self) -> &Des {
        &self.block
    }

    /// Encrypt a message through both layers. Clears all retained stages
    /// before starting.
    pub fn encrypt(&mut self, message: &str) -> Result<String> {
        self.rotor_ciphertext = None;
        self.ciphertext = None;
        self.block_plaintext = None;
        self.plaintext = None;
        let substituted = self.rotor.encrypt(message)?;
        let encrypted = self.block.encrypt(&substituted)?;
        tracing::trace!("encrypted {} character(s)", message.chars().count());
        self.rotor_ciphertext = Some(substituted);
        self.ciphertext = Some(encrypted.clone());
        Ok(encrypted)
    }

    /// Decrypt a message through both layers, in reverse order.
    pub fn decrypt(&mut self, ciphertext: &str) -> Result<String> {
        self.block_plaintext = None;
        self.plaintext = None;
        let deciphered = self.block.decrypt(ciphertext)?;
        let recovered = self.rotor.decrypt(&deciphered)?;
        self.block_plaintext = Some(deciphered);
        self.plaintext = Some(recovered.clone());
        Ok(recovered)
    }

    /// The rotor layer's output from the last encryption.
    pub fn rotor_ciphertext(&self) -> Result<&str> {
        self.rotor_ciphertext
            .as_deref()
            .ok_or(Error::StateNotSet("rotor ciphertext"))
    }

    /// The final output of the last encryption.
    pub fn ciphertext(&self) -> Result<&str> {
        self.ciphertext.as_deref().ok_or(Error::StateNotSet("ciphertext"))
    }

    /// The block layer's output from the last decryption.
    pub fn block_plaintext(&self) -> Result<&str> {
        self.block_plaintext
            .as_deref()
            .ok_or(Error::StateNotSet("block plaintext"))
    }

    /// The final output of the last decryption.
    pub fn plaintext(&self) -> Result<&str> {
        self.plaintext.as_deref().ok_or(Error::StateNotSet("plaintext"))
    }
}

impl Cipher for HybridCipher {
    fn encrypt(&mut self, plaintext: &str) -> Result<String> {
        HybridCipher::encrypt(self, plaintext)
    }

    fn decrypt(&mut self, ciphertext: &str) -> Result<String> {
        HybridCipher::decrypt(self, ciphertext)
    }
}
