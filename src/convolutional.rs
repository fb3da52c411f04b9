//! Feedforward convolutional encoder with a 32-bit shift register

use crate::{Bit, Error};

/// Maximum constraint length supported by the shift register
const MAX_CONSTRAINT_LEN: usize = 32;

/// State machine for convolutional encoder
#[derive(Debug)]
pub struct StateMachine {
    /// Code polynomials
    pub(crate) code_polynomials: Vec<u32>,
    /// Memory length
    pub(crate) memory_len: usize,
    /// Number of output bits
    pub(crate) num_output_bits: usize,
    /// Buffer for output bits
    output_bits: Vec<Bit>,
    /// Shift register, with the most recent input bit in the LSB
    register: u32,
}

impl StateMachine {
    /// Returns state machine for convolutional encoder corresponding to given code polynomials.
    ///
    /// # Parameters
    ///
    /// - `code_polynomials`: Integer representations of the generator polynomials for the code.
    ///   Must have length `N` for a code of rate `1/N`. Bit `i` of a polynomial taps the input bit
    ///   from `i` time instants ago, so that bit `0` taps the current input bit. The constraint
    ///   length `L` of the code is the largest bit length among the polynomials, and is at most
    ///   `32`.
    ///
    /// # Errors
    ///
    /// Returns an error if `code_polynomials` is empty or if any code polynomial is `0`.
    ///
    /// # Notes
    ///
    /// Let `x_{k}` be the input bit at time `k`, and let `b_{n,i}` be bit `i` of
    /// `code_polynomials[n]`. Then output bit `n` at time `k` is
    /// `y_{n,k} = sum_{i=0}^{L-1} b_{n,i} * x_{k-i}` (modulo 2), with `x_{k} = 0` for `k < 0`.
    /// The output bits at time `k` are to be read out in the order `y_{0,k}`, `y_{1,k}`, ... ,
    /// `y_{N-1,k}`.
    pub fn new(code_polynomials: &[u32]) -> Result<Self, Error> {
        let constraint_len = constraint_length(code_polynomials)?;
        Ok(Self::with_constraint_length(code_polynomials, constraint_len))
    }

    /// Returns state machine for nonzero code polynomials of known constraint length.
    pub(crate) fn with_constraint_length(code_polynomials: &[u32], constraint_len: usize) -> Self {
        Self {
            code_polynomials: code_polynomials.to_vec(),
            memory_len: constraint_len.saturating_sub(1),
            num_output_bits: code_polynomials.len(),
            output_bits: Vec::with_capacity(code_polynomials.len()),
            register: 0,
        }
    }

    /// Returns number of code bits generated for a given number of information bits.
    #[must_use]
    pub fn num_code_bits(&self, num_info_bits: usize) -> usize {
        (num_info_bits + self.memory_len) * self.num_output_bits
    }

    /// Clears shift register.
    fn reset(&mut self) {
        self.register = 0;
    }

    /// Shifts given input bit (or a zero tail bit) into register and generates output bits.
    fn generate_output_bits(&mut self, input_bit: Option<Bit>) {
        self.output_bits.clear();
        self.register <<= 1;
        if let Some(Bit::One) = input_bit {
            self.register |= 1;
        }
        for &code_poly in &self.code_polynomials {
            self.output_bits.push(parity(self.register & code_poly));
        }
    }
}

/// Returns constraint length corresponding to given code polynomials.
fn constraint_length(code_polynomials: &[u32]) -> Result<usize, Error> {
    if code_polynomials.is_empty() {
        return Err(Error::InvalidArgument(
            "Expected at least one code polynomial".to_string(),
        ));
    }
    if code_polynomials.contains(&0) {
        return Err(Error::InvalidArgument(format!(
            "Code polynomials must be nonzero (found {code_polynomials:?})"
        )));
    }
    let min_leading_zeros = code_polynomials
        .iter()
        .map(|poly| poly.leading_zeros() as usize)
        .min()
        .unwrap_or(0);
    Ok(MAX_CONSTRAINT_LEN - min_leading_zeros)
}

/// Returns parity of the set bits in an integer (`One` if their number is odd).
#[must_use]
pub fn parity(num: u32) -> Bit {
    Bit::from(num.count_ones() % 2 == 1)
}

/// Returns the `num_bits` least significant bits of an integer, MSB first.
///
/// # Examples
///
/// ```
/// use wspr::convolutional::bits_msb_first;
/// use wspr::Bit::{One, Zero};
///
/// let bits: Vec<_> = bits_msb_first(0b1011, 6).collect();
/// assert_eq!(bits, [Zero, Zero, One, Zero, One, One]);
/// ```
pub fn bits_msb_first(num: u32, num_bits: usize) -> impl Iterator<Item = Bit> {
    (0 .. num_bits.min(32))
        .rev()
        .map(move |i| Bit::from((num >> i) & 1 == 1))
}

/// Generates code bits from convolutional encoder for given information bits.
///
/// The shift register is cleared first, and `state_machine.memory_len` zero tail bits are
/// appended to the information bits so that the encoder is flushed.
///
/// # Parameters
///
/// - `info_bits`: Information bits to be encoded.
///
/// - `state_machine`: State machine for the convolutional encoder.
///
/// - `code_bits`: Vector to which code bits from the encoder must be written (any pre-existing
///   elements will be cleared first). The number of code bits generated is
///   `(info_bits.len() + state_machine.memory_len) * state_machine.num_output_bits`.
pub fn encode(info_bits: &[Bit], state_machine: &mut StateMachine, code_bits: &mut Vec<Bit>) {
    state_machine.reset();
    code_bits.clear();
    // Code bits corresponding to information bits
    for &info_bit in info_bits {
        state_machine.generate_output_bits(Some(info_bit));
        code_bits.extend(&state_machine.output_bits);
    }
    // Code bits corresponding to tail bits
    for _ in 0 .. state_machine.memory_len {
        state_machine.generate_output_bits(None);
        code_bits.extend(&state_machine.output_bits);
    }
}
