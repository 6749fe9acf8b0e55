//! Luhn (mod-10) check digits.
//!
//! Only the checksum lives here. Length and prefix policy belong to
//! [`crate::domain::generator`].

/// Maps an ASCII digit to its value, rejecting everything else (including
/// non-ASCII digits that `char::is_numeric` would accept).
fn digit_value(byte: u8) -> Option<u8> {
    byte.is_ascii_digit().then(|| byte - b'0')
}

/// Sums the payload right to left, modulo 10, doubling the rightmost payload
/// digit and every second one after it. Those are the even positions of the
/// final number once the check digit is appended.
fn weighted_sum(payload: &[u8]) -> Option<u8> {
    payload
        .iter()
        .rev()
        .enumerate()
        .try_fold(0u8, |total, (position, &byte)| {
            let digit = digit_value(byte)?;
            let value = if position % 2 == 0 {
                let doubled = digit * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                digit
            };
            Some((total + value) % 10)
        })
}

/// Returns the digit that makes `payload` followed by it Luhn-valid.
///
/// An empty payload yields `0`. Returns `None` if `payload` contains
/// anything other than ASCII digits.
pub fn compute_check_digit(payload: &str) -> Option<u8> {
    let total = weighted_sum(payload.as_bytes())?;
    Some((10 - total) % 10)
}

/// Checks the trailing digit of `full_number` against the rest.
///
/// Any non-digit character, or an empty string, makes the number invalid.
pub fn is_valid(full_number: &str) -> bool {
    let Some((&last, payload)) = full_number.as_bytes().split_last() else {
        return false;
    };
    let Some(claimed) = digit_value(last) else {
        return false;
    };
    match weighted_sum(payload) {
        Some(total) => (10 - total) % 10 == claimed,
        None => false,
    }
}
