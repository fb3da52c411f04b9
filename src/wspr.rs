//! Encoder for WSPR (Weak Signal Propagation Reporter) messages
//!
//! A message made up of a callsign, a four-character Maidenhead grid locator and a power level
//! (dBm) is packed into 50 information bits, which are encoded by a rate-1/2 convolutional code
//! of constraint length 32. The resulting 162 code bits are placed by a bit-reversal interleaver
//! and combined with a fixed synchronization vector into 162 channel symbols with values in
//! `{0, 1, 2, 3}`: the low bit of each symbol is the sync bit, and the high bit is a code bit.

use std::fs::File;
use std::io::BufWriter;
use std::ops::Index;

use itertools::Itertools;
use rayon::prelude::*;
use serde::{Serialize, Serializer};

use crate::convolutional::{self, bits_msb_first};
use crate::pack::{self, PackedFields, LOCATOR_LEN, M_BITS, N_BITS};
use crate::{Bit, Error, Interleaver};

/// Number of channel symbols in a WSPR message
pub const NUM_SYMBOLS: usize = 162;

/// Generator polynomials of the convolutional code
pub const CODE_POLYNOMIALS: [u32; 2] = [0xF2D0_5351, 0xE461_3C47];

/// Constraint length of the convolutional code
pub const CONSTRAINT_LEN: usize = 32;

/// Synchronization vector
pub const SYNC_VECTOR: [u8; NUM_SYMBOLS] = [
    1, 1, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 1, 1, 1, 0, 0, 0, 1, 0, 0, 1, 0, 1, 1, 1, 1,
    0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 1, 0, 1, 0, 0, 0, 0, 0, 0, 1, 0, 1, 1, 0, 0, 1, 1,
    0, 1, 0, 0, 0, 1, 1, 0, 1, 0, 0, 0, 0, 1, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 0, 1, 0,
    0, 1, 0, 1, 1, 0, 0, 0, 1, 1, 0, 1, 0, 1, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1, 0, 0, 1,
    0, 0, 1, 1, 1, 0, 1, 1, 0, 0, 1, 1, 0, 1, 0, 0, 0, 1, 1, 1, 0, 0, 0, 0, 0, 1, 0,
    1, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 1, 0, 1, 1, 0, 0, 0, 1, 1, 0, 0, 0,
];

/// Validated and normalized contents of a WSPR message
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize)]
pub struct Message {
    /// Callsign (uppercase, nonempty)
    callsign: String,
    /// Maidenhead grid locator (uppercase, four characters)
    locator: String,
    /// Power level (dBm)
    power_dbm: i32,
    /// Packed message fields
    #[serde(skip)]
    fields: PackedFields,
}

impl Message {
    /// Returns WSPR message with given contents.
    ///
    /// # Parameters
    ///
    /// - `callsign`: Callsign. Converted to uppercase. Should have up to six characters, with a
    ///   digit at index `1` or `2`; any other callsign is encoded as an all-space callsign.
    ///
    /// - `locator`: Four-character Maidenhead grid locator (two letters in `A`-`R` followed by
    ///   two digits). Converted to uppercase.
    ///
    /// - `power_dbm`: Power level (dBm). Conventionally in `[0, 60]`, but not range-checked.
    ///
    /// # Errors
    ///
    /// Returns an error if `callsign` is empty or if `locator` does not have exactly four
    /// characters.
    ///
    /// # Examples
    ///
    /// ```
    /// use wspr::Message;
    ///
    /// let message = Message::new("aa0nt", "em18", 20)?;
    /// assert_eq!(message.to_string(), "AA0NT EM18 20");
    /// assert!(Message::new("AA0NT", "EM180", 20).is_err());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(callsign: &str, locator: &str, power_dbm: i32) -> Result<Self, Error> {
        if callsign.is_empty() {
            return Err(Error::InvalidArgument("Callsign cannot be empty".to_string()));
        }
        let locator = pack::locator_chars(locator)?;
        Ok(Self::from_valid_parts(callsign.to_ascii_uppercase(), locator, power_dbm))
    }

    /// Returns message from a nonempty uppercase callsign and uppercase locator characters.
    pub(crate) fn from_valid_parts(
        callsign: String,
        locator: [char; LOCATOR_LEN],
        power_dbm: i32,
    ) -> Self {
        let fields = PackedFields {
            n: pack::callsign_field(&callsign),
            m: pack::locator_power_field(locator, power_dbm),
        };
        Self {
            callsign,
            locator: locator.iter().collect(),
            power_dbm,
            fields,
        }
    }

    /// Returns callsign.
    #[must_use]
    pub fn callsign(&self) -> &str {
        &self.callsign
    }

    /// Returns grid locator.
    #[must_use]
    pub fn locator(&self) -> &str {
        &self.locator
    }

    /// Returns power level (dBm).
    #[must_use]
    pub fn power_dbm(&self) -> i32 {
        self.power_dbm
    }

    /// Returns packed message fields.
    #[must_use]
    pub fn packed_fields(&self) -> PackedFields {
        self.fields
    }

    /// Returns channel symbols for the message.
    #[must_use]
    pub fn encode(&self) -> EncodedMessage {
        assemble(self.fields)
    }
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.callsign, self.locator, self.power_dbm)
    }
}

/// Channel symbols of an encoded WSPR message
#[derive(Clone, Eq, PartialEq, Hash, Debug, Copy)]
pub struct EncodedMessage([u8; NUM_SYMBOLS]);

impl EncodedMessage {
    /// Returns channel symbols.
    #[must_use]
    pub fn symbols(&self) -> &[u8; NUM_SYMBOLS] {
        &self.0
    }

    /// Returns iterator over channel symbols.
    pub fn iter(&self) -> std::slice::Iter<'_, u8> {
        self.0.iter()
    }

    /// Returns sync bits (low bits of the channel symbols).
    pub fn sync_bits(&self) -> impl Iterator<Item = Bit> + '_ {
        self.0.iter().map(|&sym| Bit::from(sym & 1 == 1))
    }

    /// Returns interleaved code bits (high bits of the channel symbols).
    pub fn data_bits(&self) -> impl Iterator<Item = Bit> + '_ {
        self.0.iter().map(|&sym| Bit::from(sym & 2 == 2))
    }

    /// Returns channel symbols, consuming the encoded message.
    #[must_use]
    pub fn into_inner(self) -> [u8; NUM_SYMBOLS] {
        self.0
    }
}

impl Index<usize> for EncodedMessage {
    type Output = u8;

    fn index(&self, index: usize) -> &u8 {
        &self.0[index]
    }
}

impl AsRef<[u8]> for EncodedMessage {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a EncodedMessage {
    type Item = &'a u8;
    type IntoIter = std::slice::Iter<'a, u8>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::fmt::Display for EncodedMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join(","))
    }
}

impl Serialize for EncodedMessage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

/// Encoding of a WSPR message, in a form suitable for saving to a JSON file
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct EncodeReport {
    /// Message contents
    pub message: Message,
    /// Packed message fields
    pub fields: PackedFields,
    /// Channel symbols
    pub symbols: EncodedMessage,
}

impl EncodeReport {
    /// Returns encode report for a message.
    #[must_use]
    pub fn new(message: Message) -> Self {
        let symbols = message.encode();
        Self::from_encoded(message, symbols)
    }

    /// Returns encode report for a message whose channel symbols have already been computed.
    ///
    /// # Parameters
    ///
    /// - `message`: Message contents.
    ///
    /// - `symbols`: Channel symbols for `message`, as returned by [`Message::encode`] or
    ///   [`encode_batch`].
    #[must_use]
    pub fn from_encoded(message: Message, symbols: EncodedMessage) -> Self {
        Self {
            fields: message.packed_fields(),
            message,
            symbols,
        }
    }
}

/// Returns channel symbols for a WSPR message.
///
/// # Parameters
///
/// - `callsign`: Callsign (see [`Message::new`]).
///
/// - `locator`: Four-character Maidenhead grid locator.
///
/// - `power_dbm`: Power level (dBm).
///
/// # Errors
///
/// Returns an error if `callsign` is empty or if `locator` does not have exactly four
/// characters.
///
/// # Examples
///
/// ```
/// use wspr::encode;
///
/// let encoded = encode("AA0NT", "EM18", 20)?;
/// assert_eq!(encoded.symbols().len(), 162);
/// assert_eq!(encoded.symbols()[.. 8], [1, 3, 2, 0, 0, 0, 0, 2]);
/// assert!(encode("", "EM18", 20).is_err());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn encode(callsign: &str, locator: &str, power_dbm: i32) -> Result<EncodedMessage, Error> {
    Ok(Message::new(callsign, locator, power_dbm)?.encode())
}

/// Returns channel symbols for several WSPR messages, encoded in parallel.
///
/// The encoded messages are in the same order as `messages`.
///
/// # Errors
///
/// Returns an error if storage for the encoded messages cannot be obtained.
pub fn encode_batch(messages: &[Message]) -> Result<Vec<EncodedMessage>, Error> {
    let mut all_encoded = output_buffer(messages.len())?;
    messages
        .par_iter()
        .map(Message::encode)
        .collect_into_vec(&mut all_encoded);
    Ok(all_encoded)
}

/// Returns empty vector with room for a given number of encoded messages.
fn output_buffer(num_messages: usize) -> Result<Vec<EncodedMessage>, Error> {
    let mut buffer = Vec::new();
    buffer.try_reserve_exact(num_messages)?;
    Ok(buffer)
}

/// Saves encode reports to a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to.
pub fn save_reports(reports: &[EncodeReport], json_filename: &str) -> Result<(), Error> {
    let writer = BufWriter::new(File::create(json_filename)?);
    serde_json::to_writer_pretty(writer, reports)?;
    Ok(())
}

/// Returns channel symbols for given packed message fields.
fn assemble(fields: PackedFields) -> EncodedMessage {
    let info_bits: Vec<Bit> = bits_msb_first(fields.n, N_BITS)
        .chain(bits_msb_first(fields.m, M_BITS))
        .collect();
    let mut sm =
        convolutional::StateMachine::with_constraint_length(&CODE_POLYNOMIALS, CONSTRAINT_LEN);
    let mut code_bits = Vec::with_capacity(sm.num_code_bits(info_bits.len()));
    convolutional::encode(&info_bits, &mut sm, &mut code_bits);
    let mut symbols = SYNC_VECTOR;
    for (address, code_bit) in Interleaver::with_valid_length(NUM_SYMBOLS).zip(code_bits) {
        symbols[address] += 2 * u8::from(code_bit);
    }
    EncodedMessage(symbols)
}
