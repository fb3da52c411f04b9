//! Packing of callsign, grid locator and power level into the two WSPR message fields
//!
//! The callsign is packed into a 28-bit integer `N` and the grid locator and power level into a
//! 22-bit integer `M`. Arithmetic is carried out modulo `2^32`, so inputs outside the usual
//! protocol ranges still pack deterministically; only the low [`N_BITS`] and [`M_BITS`] bits of
//! the results are fed to the convolutional encoder.

use serde::Serialize;

use crate::Error;

/// Number of bits in the packed callsign field
pub const N_BITS: usize = 28;

/// Number of bits in the packed grid locator and power field
pub const M_BITS: usize = 22;

/// Number of characters in the callsign work buffer
pub const CALLSIGN_BUFFER_LEN: usize = 6;

/// Number of characters in a grid locator
pub const LOCATOR_LEN: usize = 4;

/// Placement of a callsign within the callsign work buffer
#[derive(Clone, Eq, PartialEq, Debug, Copy)]
pub enum CallsignLayout {
    /// Digit at index 1: up to 5 characters copied into buffer positions 1 to 5
    Shifted,
    /// Digit at index 2: up to 6 characters copied into buffer positions 0 to 5
    Unshifted,
    /// No digit at index 1 or 2: buffer left as all spaces
    Blank,
}

impl CallsignLayout {
    /// Returns layout applicable to the given callsign characters.
    #[must_use]
    pub fn of(callsign: &[char]) -> Self {
        if callsign.len() >= 2 && callsign[1].is_ascii_digit() {
            CallsignLayout::Shifted
        } else if callsign.len() >= 3 && callsign[2].is_ascii_digit() {
            CallsignLayout::Unshifted
        } else {
            CallsignLayout::Blank
        }
    }
}

/// Packed message fields
#[derive(Clone, Eq, PartialEq, Hash, Debug, Copy, Serialize)]
pub struct PackedFields {
    /// Packed callsign
    pub n: u32,
    /// Packed grid locator and power level
    pub m: u32,
}

impl std::fmt::Display for PackedFields {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "N = {}, M = {}", self.n, self.m)
    }
}

/// Returns numeric value of a character.
///
/// Digits map to `0`-`9`, letters (either case) to `10`-`35` and a space to `36`. Any other
/// character maps to `0`.
///
/// # Examples
///
/// ```
/// use wspr::pack::character_value;
///
/// assert_eq!(character_value('7'), 7);
/// assert_eq!(character_value('k'), 20);
/// assert_eq!(character_value(' '), 36);
/// assert_eq!(character_value('/'), 0);
/// ```
#[must_use]
pub fn character_value(ch: char) -> u32 {
    match ch {
        '0' ..= '9' => u32::from(ch) - u32::from('0'),
        'A' ..= 'Z' => u32::from(ch) - u32::from('A') + 10,
        'a' ..= 'z' => u32::from(ch) - u32::from('a') + 10,
        ' ' => 36,
        _ => 0,
    }
}

/// Returns callsign work buffer for a callsign.
///
/// The buffer starts out as all spaces, and the callsign is copied into it according to its
/// [`CallsignLayout`].
#[must_use]
pub fn callsign_buffer(callsign: &str) -> [char; CALLSIGN_BUFFER_LEN] {
    let chars: Vec<char> = callsign.chars().collect();
    let mut buffer = [' '; CALLSIGN_BUFFER_LEN];
    match CallsignLayout::of(&chars) {
        CallsignLayout::Shifted => {
            for (slot, &ch) in buffer[1 ..].iter_mut().zip(chars.iter()) {
                *slot = ch;
            }
        }
        CallsignLayout::Unshifted => {
            for (slot, &ch) in buffer.iter_mut().zip(chars.iter()) {
                *slot = ch;
            }
        }
        CallsignLayout::Blank => (),
    }
    buffer
}

/// Returns packed callsign field `N`.
///
/// # Errors
///
/// Returns an error if `callsign` is empty.
///
/// # Examples
///
/// ```
/// use wspr::pack::pack_callsign;
///
/// assert_eq!(pack_callsign("VK3XE")?, 223_674_830);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn pack_callsign(callsign: &str) -> Result<u32, Error> {
    if callsign.is_empty() {
        return Err(Error::InvalidArgument("Callsign cannot be empty".to_string()));
    }
    Ok(callsign_field(callsign))
}

/// Returns packed callsign field `N` for a callsign of any length.
pub(crate) fn callsign_field(callsign: &str) -> u32 {
    let buffer = callsign_buffer(callsign);
    let mut n = character_value(buffer[0]) * 36 + character_value(buffer[1]);
    n = n * 10 + character_value(buffer[2]);
    // Letter-or-space positions: values 10 to 36 shifted down into [0, 27)
    for &ch in &buffer[3 ..] {
        n = n
            .wrapping_mul(27)
            .wrapping_add(character_value(ch))
            .wrapping_sub(10);
    }
    n
}

/// Returns uppercase characters of a grid locator.
///
/// # Errors
///
/// Returns an error if `locator` does not have exactly four characters.
///
/// # Examples
///
/// ```
/// use wspr::pack::locator_chars;
///
/// assert_eq!(locator_chars("em18")?, ['E', 'M', '1', '8']);
/// assert!(locator_chars("EM1").is_err());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn locator_chars(locator: &str) -> Result<[char; LOCATOR_LEN], Error> {
    let chars: Vec<char> = locator.chars().map(|ch| ch.to_ascii_uppercase()).collect();
    <[char; LOCATOR_LEN]>::try_from(chars).map_err(|_| {
        Error::InvalidArgument(format!(
            "Grid locator must have {LOCATOR_LEN} characters (found {locator:?})"
        ))
    })
}

/// Returns packed grid locator and power level field `M`.
///
/// # Errors
///
/// Returns an error if `locator` does not have exactly four characters.
///
/// # Examples
///
/// ```
/// use wspr::pack::pack_locator_power;
///
/// assert_eq!(pack_locator_power("QF22", 23)?, 398_423);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn pack_locator_power(locator: &str, power_dbm: i32) -> Result<u32, Error> {
    Ok(locator_power_field(locator_chars(locator)?, power_dbm))
}

/// Returns packed grid locator and power level field `M` for uppercase locator characters.
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
pub(crate) fn locator_power_field(locator: [char; LOCATOR_LEN], power_dbm: i32) -> u32 {
    let offset = |index: usize, base: char| {
        i64::from(u32::from(locator[index])) - i64::from(u32::from(base))
    };
    let m1 = (179 - 10 * offset(0, 'A') - offset(2, '0')) * 180
        + 10 * offset(1, 'A')
        + offset(3, '0');
    let m = m1 * 128 + i64::from(power_dbm) + 64;
    // Reduction modulo 2^32
    m as u32
}

/// Returns packed fields for a callsign, grid locator and power level.
///
/// # Errors
///
/// Returns an error if `callsign` is empty or if `locator` does not have exactly four
/// characters.
///
/// # Examples
///
/// ```
/// use wspr::pack::{pack, PackedFields};
///
/// let fields = pack("AA0NT", "EM18", 20)?;
/// assert_eq!(fields, PackedFields { n: 72_837_116, m: 3_195_988 });
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn pack(callsign: &str, locator: &str, power_dbm: i32) -> Result<PackedFields, Error> {
    Ok(PackedFields {
        n: pack_callsign(callsign)?,
        m: pack_locator_power(locator, power_dbm)?,
    })
}

#[cfg(test)]
mod tests_of_functions {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_character_value() {
        assert_eq!(character_value('0'), 0);
        assert_eq!(character_value('9'), 9);
        assert_eq!(character_value('A'), 10);
        assert_eq!(character_value('Z'), 35);
        assert_eq!(character_value('a'), 10);
        assert_eq!(character_value('z'), 35);
        assert_eq!(character_value(' '), 36);
        // Anything else falls back to the value of '0'
        for ch in ['/', '-', '.', 'é', '\0'] {
            assert_eq!(character_value(ch), 0);
        }
    }

    #[test]
    fn test_callsign_layout() {
        assert_eq!(CallsignLayout::of(&chars("K1ABC")), CallsignLayout::Shifted);
        assert_eq!(CallsignLayout::of(&chars("A1")), CallsignLayout::Shifted);
        assert_eq!(CallsignLayout::of(&chars("W1AW")), CallsignLayout::Shifted);
        assert_eq!(CallsignLayout::of(&chars("AA0NT")), CallsignLayout::Unshifted);
        assert_eq!(CallsignLayout::of(&chars("VK3TCP")), CallsignLayout::Unshifted);
        assert_eq!(CallsignLayout::of(&chars("ABCDEF")), CallsignLayout::Blank);
        assert_eq!(CallsignLayout::of(&chars("A")), CallsignLayout::Blank);
        assert_eq!(CallsignLayout::of(&chars("AB")), CallsignLayout::Blank);
        assert_eq!(CallsignLayout::of(&chars("")), CallsignLayout::Blank);
    }

    #[test]
    fn test_callsign_buffer() {
        assert_eq!(callsign_buffer("K1ABC"), [' ', 'K', '1', 'A', 'B', 'C']);
        assert_eq!(callsign_buffer("W1AW"), [' ', 'W', '1', 'A', 'W', ' ']);
        assert_eq!(callsign_buffer("AA0NT"), ['A', 'A', '0', 'N', 'T', ' ']);
        assert_eq!(callsign_buffer("VK3TCP"), ['V', 'K', '3', 'T', 'C', 'P']);
        assert_eq!(callsign_buffer("ABCDEF"), [' '; 6]);
        // Excess characters are dropped
        assert_eq!(callsign_buffer("W1AW/P7"), [' ', 'W', '1', 'A', 'W', '/']);
        assert_eq!(callsign_buffer("VK3TCP/P"), ['V', 'K', '3', 'T', 'C', 'P']);
    }

    #[test]
    fn test_pack_callsign() {
        // Invalid input
        assert!(matches!(
            pack_callsign(""),
            Err(Error::InvalidArgument(_))
        ));
        // Valid input
        assert_eq!(pack_callsign("AA0NT").unwrap(), 72_837_116);
        assert_eq!(pack_callsign("VK3XE").unwrap(), 223_674_830);
        assert_eq!(pack_callsign("VK3TCP").unwrap(), 223_671_849);
        assert_eq!(pack_callsign("G0UPL").unwrap(), 258_255_956);
        assert_eq!(pack_callsign("K1ABC").unwrap(), 259_047_992);
        assert_eq!(pack_callsign("W1AW").unwrap(), 261_410_543);
        assert_eq!(pack_callsign("W1AW/P7").unwrap(), 261_410_507);
        // Blank buffer, whatever the characters
        assert_eq!(pack_callsign("ABCDEF").unwrap(), 262_905_830);
        assert_eq!(pack_callsign("Q").unwrap(), 262_905_830);
        // Letters are case-insensitive
        assert_eq!(pack_callsign("aa0nt").unwrap(), 72_837_116);
    }

    #[test]
    fn test_pack_callsign_fits_field() {
        for callsign in ["AA0NT", "VK3TCP", "K1ABC", "ABCDEF", "ZZ9ZZZ", " 9ZZZZ"] {
            assert!(pack_callsign(callsign).unwrap() < 1 << N_BITS);
        }
    }

    #[test]
    fn test_callsign_field() {
        assert_eq!(callsign_field("AA0NT"), 72_837_116);
        // Empty callsign packs like any other blank layout
        assert_eq!(callsign_field(""), 262_905_830);
    }

    #[test]
    fn test_locator_chars() {
        // Invalid input
        for locator in ["", "EM1", "EM180"] {
            assert!(matches!(
                locator_chars(locator),
                Err(Error::InvalidArgument(_))
            ));
        }
        // Valid input
        assert_eq!(locator_chars("Em18").unwrap(), ['E', 'M', '1', '8']);
        assert_eq!(locator_chars("EMé8").unwrap(), ['E', 'M', 'é', '8']);
    }

    #[test]
    fn test_locator_power_field() {
        assert_eq!(locator_power_field(['E', 'M', '1', '8'], 20), 3_195_988);
        assert_eq!(locator_power_field(['Q', 'F', '2', '2'], 23), 398_423);
    }

    #[test]
    fn test_pack_locator_power() {
        // Invalid input
        assert!(matches!(
            pack_locator_power("EM1", 20),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            pack_locator_power("EM180", 20),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            pack_locator_power("", 20),
            Err(Error::InvalidArgument(_))
        ));
        // Valid input
        assert_eq!(pack_locator_power("EM18", 20).unwrap(), 3_195_988);
        assert_eq!(pack_locator_power("em18", 20).unwrap(), 3_195_988);
        assert_eq!(pack_locator_power("QF22", 23).unwrap(), 398_423);
        assert_eq!(pack_locator_power("IO91", 20).unwrap(), 2_091_732);
        assert_eq!(pack_locator_power("FN20", 37).unwrap(), 2_942_821);
        assert!(pack_locator_power("AA00", 60).unwrap() < 1 << M_BITS);
        assert!(pack_locator_power("RR99", 0).unwrap() < 1 << M_BITS);
    }

    #[test]
    fn test_pack_locator_power_out_of_range() {
        // Power level is not range-checked
        assert_eq!(pack_locator_power("EM18", -10).unwrap(), 3_195_958);
        // Locator letters beyond 'R' wrap around
        assert_eq!(pack_locator_power("ZZ99", -100).unwrap(), 4_293_157_212);
    }

    #[test]
    fn test_pack() {
        // Invalid input
        assert!(pack("", "EM18", 20).is_err());
        assert!(pack("AA0NT", "EM1", 20).is_err());
        // Valid input
        let fields = pack("AA0NT", "EM18", 20).unwrap();
        assert_eq!(fields.n, 72_837_116);
        assert_eq!(fields.m, 3_195_988);
        assert_eq!(fields.to_string(), "N = 72837116, M = 3195988");
    }
}
