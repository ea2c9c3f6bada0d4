//! A three-wheel rotor substitution machine.
//!
//! Each wheel carries a permutation of a fixed alphabet. A character enters
//! at the first wheel, hops across the second, and leaves at the third;
//! after every character the wheels advance odometer-style, so identical
//! plaintext characters encrypt differently as a message progresses. Both
//! public operations rewind the wheels first, which makes every message
//! start from the same configuration.

use {
    crate::{
        cipher::Cipher,
        error::{Error, Result},
        random::RandomSource,
    },
    docext::docext,
};

/// The ordered character set a machine substitutes over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    chars: Vec<char>,
}

impl Alphabet {
    /// An alphabet from an ordered sequence of at least two distinct
    /// characters.
    pub fn new(chars: Vec<char>) -> Result<Self> {
        if chars.len() < 2 {
            return Err(Error::InvalidRotor(format!(
                "an alphabet needs at least 2 characters, got {}",
                chars.len()
            )));
        }
        let mut sorted = chars.clone();
        sorted.sort_unstable();
        sorted.dedup();
        if sorted.len() != chars.len() {
            return Err(Error::InvalidRotor(
                "alphabet characters must be distinct".into(),
            ));
        }
        Ok(Self { chars })
    }

    /// The 26 uppercase letters.
    pub fn uppercase() -> Self {
        Self::new(('A'..='Z').collect()).expect("the uppercase letters are distinct")
    }

    /// The 128 ASCII characters, covering everything the character codec
    /// accepts as plaintext.
    pub fn ascii() -> Self {
        Self::new((0..128u8).map(char::from).collect()).expect("the ASCII characters are distinct")
    }

    /// Number of characters.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// The characters in order.
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Whether a character belongs to the alphabet.
    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }
}

/// One wheel: an immutable wiring plus a rotation offset.
///
/// Rotating left by one is modeled as bumping the offset, so resetting a
/// wheel never copies the wiring.
#[derive(Debug, Clone)]
struct Wheel {
    wiring: Vec<char>,
    offset: usize,
}

impl Wheel {
    fn new(wiring: Vec<char>) -> Self {
        Self { wiring, offset: 0 }
    }

    /// The character at a position under the current rotation.
    fn char_at(&self, position: usize) -> char {
        self.wiring[(position + self.offset) % self.wiring.len()]
    }

    /// The position a character occupies under the current rotation, if it
    /// is on the wheel at all.
    fn position_of(&self, c: char) -> Option<usize> {
        let fixed = self.wiring.iter().position(|&wired| wired == c)?;
        Some((fixed + self.wiring.len() - self.offset) % self.wiring.len())
    }

    /// Rotate left by one position.
    fn advance(&mut self) {
        self.offset = (self.offset + 1) % self.wiring.len();
    }
}

/// Three-wheel substitution over a fixed alphabet $\Sigma$ with
/// odometer-style stepping.
///
/// Writing the wheels as permutations $\pi_1, \pi_2, \pi_3$ of positions, a
/// character at position $i$ encrypts through $\pi_2 \circ \pi_1^{-1}$
/// followed by $\pi_3 \circ \pi_2^{-1}$, and decryption applies the inverse
/// composition, so the chains cancel exactly when the wheel offsets agree.
/// Both `encrypt` and `decrypt` rewind the wheels at entry, which is what
/// makes the offsets agree for a whole message.
#[docext]
#[derive(Debug, Clone)]
pub struct RotorMachine {
    alphabet: Alphabet,
    wheels: [Wheel; 3],
}

/// A snapshot of wheel rotation, for inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotorState {
    /// Rotation offset of each wheel.
    pub offsets: [usize; 3],
    /// The character currently at the top of each wheel.
    pub visible: [char; 3],
}

impl RotorMachine {
    /// A machine with the given wheel wirings, each of which must be a
    /// permutation of the alphabet.
    pub fn new(
        alphabet: Alphabet,
        first: Vec<char>,
        second: Vec<char>,
        third: Vec<char>,
    ) -> Result<Self> {
        for (number, wiring) in [&first, &second, &third].into_iter().enumerate() {
            check_wiring(&alphabet, wiring, number + 1)?;
        }
        tracing::debug!("rotor machine over {} characters", alphabet.len());
        Ok(Self {
            alphabet,
            wheels: [Wheel::new(first), Wheel::new(second), Wheel::new(third)],
        })
    }

    /// A machine whose wheels are three independent uniform shuffles of
    /// the alphabet.
    pub fn randomized(alphabet: Alphabet, random: &mut RandomSource) -> Self {
        let wirings: [Vec<char>; 3] = std::array::from_fn(|_| random.shuffled(alphabet.chars()));
        let [first, second, third] = wirings;
        Self::new(alphabet, first, second, third)
            .expect("a shuffle of the alphabet is a permutation of it")
    }

    /// The alphabet the machine substitutes over.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Rewind every wheel to its original wiring.
    pub fn reset(&mut self) {
        for wheel in &mut self.wheels {
            wheel.offset = 0;
        }
    }

    /// The current wheel offsets and visible characters.
    pub fn state(&self) -> RotorState {
        RotorState {
            offsets: [
                self.wheels[0].offset,
                self.wheels[1].offset,
                self.wheels[2].offset,
            ],
            visible: [
                self.wheels[0].char_at(0),
                self.wheels[1].char_at(0),
                self.wheels[2].char_at(0),
            ],
        }
    }

    /// Encrypt a message. The wheels are rewound first, so the output only
    /// depends on the wirings and the message itself.
    pub fn encrypt(&mut self, plaintext: &str) -> Result<String> {
        self.reset();
        Ok(plaintext.chars().map(|c| self.encrypt_char(c)).collect())
    }

    /// Decrypt a message, the mirror image of [`RotorMachine::encrypt`].
    pub fn decrypt(&mut self, ciphertext: &str) -> Result<String> {
        self.reset();
        Ok(ciphertext.chars().map(|c| self.decrypt_char(c)).collect())
    }

    fn encrypt_char(&mut self, c: char) -> char {
        let output = match self.wheels[0].position_of(c) {
            // Characters outside the alphabet pass through, but the wheels
            // still step.
            None => c,
            Some(position) => {
                let middle = self.wheels[1].char_at(position);
                let position = self.wheels[1]
                    .position_of(middle)
                    .expect("wheel wirings share one alphabet");
                self.wheels[2].char_at(position)
            }
        };
        self.step();
        output
    }

    fn decrypt_char(&mut self, c: char) -> char {
        let output = match self.wheels[2].position_of(c) {
            None => c,
            Some(position) => {
                let middle = self.wheels[1].char_at(position);
                let position = self.wheels[1]
                    .position_of(middle)
                    .expect("wheel wirings share one alphabet");
                self.wheels[0].char_at(position)
            }
        };
        self.step();
        output
    }

    /// Advance the wheels, odometer style: the first wheel on every
    /// character, the second whenever the first sits at a half-revolution
    /// boundary, the third whenever the second sits at offset zero.
    fn step(&mut self) {
        let length = self.alphabet.len();
        self.wheels[0].advance();
        if self.wheels[0].offset % (length / 2) == 0 {
            self.wheels[1].advance();
        }
        if self.wheels[1].offset % length == 0 {
            self.wheels[2].advance();
        }
    }
}

impl Cipher for RotorMachine {
    fn encrypt(&mut self, plaintext: &str) -> Result<String> {
        RotorMachine::encrypt(self, plaintext)
    }

    fn decrypt(&mut self, ciphertext: &str) -> Result<String> {
        RotorMachine::decrypt(self, ciphertext)
    }
}

fn check_wiring(alphabet: &Alphabet, wiring: &[char], number: usize) -> Result<()> {
    if wiring.len() != alphabet.len() {
        return Err(Error::InvalidRotor(format!(
            "rotor {number} has {} characters, the alphabet has {}",
            wiring.len(),
            alphabet.len()
        )));
    }
    let mut sorted = wiring.to_vec();
    sorted.sort_unstable();
    let mut expected = alphabet.chars().to_vec();
    expected.sort_unstable();
    if sorted != expected {
        return Err(Error::InvalidRotor(format!(
            "rotor {number} is not a permutation of the alphabet"
        )));
    }
    Ok(())
}
