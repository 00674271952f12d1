//! Password generation and masking.
//!
//! Generated passwords follow a per-application policy: the `app`
//! population gets short numeric codes, every other population gets a
//! complex password with at least one character of each class.

use rand::seq::SliceRandom;
use rand::Rng;

use super::Application;
use crate::config::{
    DIGIT_CHARACTERS, LOWERCASE_CHARACTERS, MIN_COMPLEX_PASSWORD_LENGTH, NUMERIC_PASSWORD_LENGTH,
    PASSWORD_MASK, SPECIAL_CHARACTERS, UPPERCASE_CHARACTERS,
};

/// Password rendering safe for logs.
///
/// Only obtainable through [`mask`], so anything typed `MaskedPassword`
/// never holds the full secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedPassword(String);

impl MaskedPassword {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MaskedPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Replace the last two characters of a password with the mask marker.
///
/// Passwords of two characters or less mask to the marker alone.
pub fn mask(password: &str) -> MaskedPassword {
    let count = password.chars().count();
    if count <= 2 {
        return MaskedPassword(PASSWORD_MASK.to_string());
    }

    let mut masked: String = password.chars().take(count - 2).collect();
    masked.push_str(PASSWORD_MASK);
    MaskedPassword(masked)
}

/// Generate a password for an application using the thread-local CSPRNG.
pub fn generate_for(application: Application) -> String {
    let mut rng = rand::thread_rng();
    match application {
        Application::App => generate_numeric(&mut rng, NUMERIC_PASSWORD_LENGTH),
        Application::Corp | Application::Parcerias => {
            generate_complex(&mut rng, MIN_COMPLEX_PASSWORD_LENGTH)
        }
    }
}

/// Digits only, each drawn uniformly.
pub fn generate_numeric<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    let digits = DIGIT_CHARACTERS.as_bytes();
    (0..length).map(|_| pick(rng, digits)).collect()
}

/// At least one lower-case letter, upper-case letter, digit and special
/// character, shuffled. Lengths below the minimum are raised to it.
pub fn generate_complex<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    let length = length.max(MIN_COMPLEX_PASSWORD_LENGTH);

    let alphabet: Vec<u8> = [
        LOWERCASE_CHARACTERS,
        UPPERCASE_CHARACTERS,
        DIGIT_CHARACTERS,
        SPECIAL_CHARACTERS,
    ]
    .concat()
    .into_bytes();

    let mut chars = vec![
        pick(rng, LOWERCASE_CHARACTERS.as_bytes()),
        pick(rng, UPPERCASE_CHARACTERS.as_bytes()),
        pick(rng, DIGIT_CHARACTERS.as_bytes()),
        pick(rng, SPECIAL_CHARACTERS.as_bytes()),
    ];
    while chars.len() < length {
        chars.push(pick(rng, &alphabet));
    }

    chars.shuffle(rng);
    chars.into_iter().collect()
}

// Charsets are ASCII and non-empty.
fn pick<R: Rng + ?Sized>(rng: &mut R, charset: &[u8]) -> char {
    charset[rng.gen_range(0..charset.len())] as char
}
