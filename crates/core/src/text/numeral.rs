//! Chinese numerals for season numbers.

use thiserror::Error;

const DIGITS: [char; 9] = ['一', '二', '三', '四', '五', '六', '七', '八', '九'];
const TEN: char = '十';

pub const MIN_NUMERAL: u32 = 1;
pub const MAX_NUMERAL: u32 = 99;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NumeralError {
    #[error("Number {0} is outside {MIN_NUMERAL}..={MAX_NUMERAL}")]
    OutOfRange(u32),
}

/// Render `n` (1 to 99) as a Chinese numeral, e.g. `12` as `十二` and
/// `40` as `四十`.
pub fn to_chinese_numeral(n: u32) -> Result<String, NumeralError> {
    if !(MIN_NUMERAL..=MAX_NUMERAL).contains(&n) {
        return Err(NumeralError::OutOfRange(n));
    }

    let digit = |d: u32| DIGITS[(d - 1) as usize];
    let (tens, units) = (n / 10, n % 10);

    let mut numeral = String::new();
    match tens {
        0 => {}
        1 => numeral.push(TEN),
        t => {
            numeral.push(digit(t));
            numeral.push(TEN);
        }
    }
    if units != 0 {
        numeral.push(digit(units));
    }

    Ok(numeral)
}
