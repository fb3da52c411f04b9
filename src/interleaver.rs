//! Bit-reversal interleaver for sequences of a given length
//!
//! Output addresses are generated lazily by bit-reversing an 8-bit counter and skipping any
//! reversed value that falls outside the sequence. Since bit reversal permutes the 256 counter
//! values, a full sweep of the counter yields every address in `[0, length)` exactly once.

use std::iter::FusedIterator;

use crate::Error;

/// Number of values taken by the 8-bit counter
pub const ADDRESS_SPACE: usize = 256;

/// Generator of interleaver output addresses for sequences of a given length
#[allow(missing_copy_implementations)]
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Interleaver {
    /// Length of input/output sequence
    length: usize,
    /// Counter whose bit-reversed value is the next candidate address
    counter: u16,
    /// Number of addresses generated so far
    num_generated: usize,
}

impl Interleaver {
    /// Returns address generator for sequences of a given length.
    ///
    /// # Parameters
    ///
    /// - `length`: Length of input/output sequence. Must be in `[1, 256]`.
    ///
    /// # Errors
    ///
    /// Returns an error if `length` is `0` or exceeds `256`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wspr::Interleaver;
    ///
    /// let addresses: Vec<usize> = Interleaver::new(162)?.take(6).collect();
    /// assert_eq!(addresses, [0, 128, 64, 32, 160, 96]);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(length: usize) -> Result<Self, Error> {
        if length == 0 || length > ADDRESS_SPACE {
            return Err(Error::InvalidArgument(format!(
                "Length of interleaver must be in the range [1, {ADDRESS_SPACE}] (found {length})"
            )));
        }
        Ok(Self::with_valid_length(length))
    }

    /// Returns address generator for a length already known to be in `[1, 256]`.
    pub(crate) fn with_valid_length(length: usize) -> Self {
        Self {
            length,
            counter: 0,
            num_generated: 0,
        }
    }

    /// Returns all addresses for sequences of a given length, in generation order.
    ///
    /// Element `k` of the result is the output address of input element `k`.
    ///
    /// # Errors
    ///
    /// Returns an error if `length` is `0` or exceeds `256`.
    pub fn permutation(length: usize) -> Result<Vec<usize>, Error> {
        Ok(Self::new(length)?.collect())
    }

    /// Returns length of input/output sequence.
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }
}

impl Iterator for Interleaver {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while let Ok(index) = u8::try_from(self.counter) {
            self.counter += 1;
            let address = usize::from(index.reverse_bits());
            if address < self.length {
                self.num_generated += 1;
                return Some(address);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let num_remaining = self.length - self.num_generated;
        (num_remaining, Some(num_remaining))
    }
}

impl ExactSizeIterator for Interleaver {}

impl FusedIterator for Interleaver {}
