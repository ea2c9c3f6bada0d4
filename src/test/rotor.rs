//! Tests for the rotor machine.

use {
    super::roundtrip,
    crate::{Alphabet, Error, RandomSource, RotorMachine},
};

#[test]
fn identity_and_shift_wheels() {
    let identity: Vec<char> = ('A'..='Z').collect();
    let shifted: Vec<char> = "ZABCDEFGHIJKLMNOPQRSTUVWXY".chars().collect();
    let mut machine =
        RotorMachine::new(Alphabet::uppercase(), identity.clone(), shifted, identity).unwrap();
    let ciphertext = machine.encrypt("AAAAA").unwrap();
    assert_eq!(ciphertext.chars().count(), 5);
    assert_eq!(machine.decrypt(&ciphertext).unwrap(), "AAAAA");
}

#[test]
fn roundtrip_over_both_preset_alphabets() {
    let mut random = RandomSource::from_seed(15);
    let mut upper = RotorMachine::randomized(Alphabet::uppercase(), &mut random);
    roundtrip(&mut upper, "ATTACKATDAWN");
    roundtrip(&mut upper, "");
    let mut ascii = RotorMachine::randomized(Alphabet::ascii(), &mut random);
    roundtrip(&mut ascii, "The quick brown fox jumps over the lazy dog!");
}

#[test]
fn encryption_resets_prior_state() {
    let mut random = RandomSource::from_seed(16);
    let mut machine = RotorMachine::randomized(Alphabet::uppercase(), &mut random);
    let fresh = machine.encrypt("ENIGMA").unwrap();
    machine.encrypt("SOMEPRIORTRAFFIC").unwrap();
    assert_eq!(machine.encrypt("ENIGMA").unwrap(), fresh);
}

#[test]
fn characters_outside_the_alphabet_pass_through() {
    let mut random = RandomSource::from_seed(17);
    let mut machine = RotorMachine::randomized(Alphabet::uppercase(), &mut random);
    let ciphertext = machine.encrypt("HELLO, WORLD!").unwrap();
    assert_eq!(ciphertext.chars().nth(5), Some(','));
    assert_eq!(ciphertext.chars().nth(6), Some(' '));
    assert_eq!(ciphertext.chars().last(), Some('!'));
    assert_eq!(machine.decrypt(&ciphertext).unwrap(), "HELLO, WORLD!");
}

#[test]
fn wheels_step_like_an_odometer() {
    let mut random = RandomSource::from_seed(18);
    let mut machine = RotorMachine::randomized(Alphabet::uppercase(), &mut random);

    machine.encrypt("A").unwrap();
    let state = machine.state();
    // The second wheel has not moved yet, and the third moves while the
    // second sits at offset zero.
    assert_eq!(state.offsets, [1, 0, 1]);

    // Thirteen characters take the first wheel through half a revolution,
    // which finally moves the second wheel and stops the third.
    machine.encrypt(&"A".repeat(13)).unwrap();
    assert_eq!(machine.state().offsets, [13, 1, 12]);
}

#[test]
fn reset_rewinds_the_wheels() {
    let mut random = RandomSource::from_seed(19);
    let mut machine = RotorMachine::randomized(Alphabet::uppercase(), &mut random);
    let before = machine.state();
    machine.encrypt("SOMETRAFFIC").unwrap();
    machine.reset();
    assert_eq!(machine.state(), before);
}

#[test]
fn wiring_must_permute_the_alphabet() {
    let identity: Vec<char> = ('A'..='Z').collect();
    let mut doubled = identity.clone();
    doubled[0] = 'B';
    assert!(matches!(
        RotorMachine::new(
            Alphabet::uppercase(),
            doubled,
            identity.clone(),
            identity.clone()
        ),
        Err(Error::InvalidRotor(_))
    ));
    let short: Vec<char> = ('A'..='Y').collect();
    assert!(matches!(
        RotorMachine::new(Alphabet::uppercase(), short, identity.clone(), identity),
        Err(Error::InvalidRotor(_))
    ));
}

#[test]
fn alphabet_requires_distinct_characters() {
    assert!(matches!(
        Alphabet::new(vec!['A', 'A', 'B']),
        Err(Error::InvalidRotor(_))
    ));
    assert!(matches!(
        Alphabet::new(vec!['A']),
        Err(Error::InvalidRotor(_))
    ));
}
