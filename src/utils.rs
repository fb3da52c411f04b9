//! # Some useful functions for generating WSPR messages
//!
//! The [`random_callsign`], [`random_locator`] and [`random_power_dbm`] functions return random
//! valid message contents, and the [`random_message`] function combines them into a [`Message`].
//!
//! # Examples
//!
//! The code below illustrates the usage of the functions in this module.
//! ```
//! use wspr::utils;
//!
//! let message = utils::random_message();
//! let encoded = message.encode();
//! assert_eq!(encoded.symbols().len(), 162);
//! ```

use rand::Rng;

use crate::pack::LOCATOR_LEN;
use crate::Message;

/// Power levels (dBm) in common use, all ending in 0, 3 or 7
pub const STANDARD_POWER_LEVELS_DBM: [i32; 19] = [
    0, 3, 7, 10, 13, 17, 20, 23, 27, 30, 33, 37, 40, 43, 47, 50, 53, 57, 60,
];

/// Returns random uppercase letter from `A` to `last`.
fn random_letter<R: Rng>(rng: &mut R, last: u8) -> char {
    char::from(rng.random_range(b'A' ..= last))
}

/// Returns random decimal digit.
fn random_digit<R: Rng>(rng: &mut R) -> char {
    char::from(rng.random_range(b'0' ..= b'9'))
}

/// Returns random callsign.
///
/// # Returns
///
/// - `callsign`: Either a letter, a digit and one to three letters, or two letters, a digit and
///   one to three letters.
#[must_use]
pub fn random_callsign() -> String {
    let mut rng = rand::rng();
    let mut callsign = String::with_capacity(6);
    callsign.push(random_letter(&mut rng, b'Z'));
    if rng.random_bool(0.5) {
        callsign.push(random_letter(&mut rng, b'Z'));
    }
    callsign.push(random_digit(&mut rng));
    for _ in 0 .. rng.random_range(1 ..= 3) {
        callsign.push(random_letter(&mut rng, b'Z'));
    }
    callsign
}

/// Returns random grid locator characters.
fn random_locator_chars<R: Rng>(rng: &mut R) -> [char; LOCATOR_LEN] {
    [
        random_letter(rng, b'R'),
        random_letter(rng, b'R'),
        random_digit(rng),
        random_digit(rng),
    ]
}

/// Returns random four-character grid locator (`AA00` to `RR99`).
#[must_use]
pub fn random_locator() -> String {
    random_locator_chars(&mut rand::rng()).iter().collect()
}

/// Returns random power level (dBm) from [`STANDARD_POWER_LEVELS_DBM`].
#[must_use]
pub fn random_power_dbm() -> i32 {
    let mut rng = rand::rng();
    STANDARD_POWER_LEVELS_DBM[rng.random_range(0 .. STANDARD_POWER_LEVELS_DBM.len())]
}

/// Returns random WSPR message.
#[must_use]
pub fn random_message() -> Message {
    let locator = random_locator_chars(&mut rand::rng());
    Message::from_valid_parts(random_callsign(), locator, random_power_dbm())
}
