const READ_BIT: u8 = 0b100;

const WRITE_BIT: u8 = 0b010;

const EXECUTE_BIT: u8 = 0b001;

/// The fully resolved read/write/execute triple for a single user class, along with both of the
/// textual notations it can be exchanged with: one octal digit (weights 4/2/1) or a three symbol
/// slice such as "rwx" or "r--".
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PermissionBits {
    read: bool,
    write: bool,
    execute: bool,
}

impl PermissionBits {
    pub fn new(read: bool, write: bool, execute: bool) -> Self {
        Self {
            read,
            write,
            execute,
        }
    }

    pub fn read(&self) -> bool {
        self.read
    }

    pub fn write(&self) -> bool {
        self.write
    }

    pub fn execute(&self) -> bool {
        self.execute
    }

    pub fn from_unix_numeric(digit: u8) -> Self {
        Self {
            read: digit & READ_BIT != 0,
            write: digit & WRITE_BIT != 0,
            execute: digit & EXECUTE_BIT != 0,
        }
    }

    pub fn to_unix_numeric(&self) -> u8 {
        let mut numeric: u8 = 0x00;

        if self.read {
            numeric |= READ_BIT;
        }

        if self.write {
            numeric |= WRITE_BIT;
        }

        if self.execute {
            numeric |= EXECUTE_BIT;
        }

        numeric
    }

    pub fn to_unix_symbolic(&self) -> String {
        let mut symbolic = String::with_capacity(3);

        symbolic.push(if self.read { 'r' } else { '-' });
        symbolic.push(if self.write { 'w' } else { '-' });
        symbolic.push(if self.execute { 'x' } else { '-' });

        symbolic
    }

    pub fn parse_numeric(symbol: char) -> Result<Self, PermissionBitsError> {
        let digit = symbol
            .to_digit(8)
            .ok_or(PermissionBitsError::InvalidOctalDigit)?;

        Ok(Self::from_unix_numeric(digit as u8))
    }

    pub fn parse_symbolic(slice: &str) -> Result<Self, PermissionBitsError> {
        let symbols: Vec<char> = slice.chars().collect();

        if symbols.len() != 3 {
            return Err(PermissionBitsError::InvalidSliceLength {
                actual: symbols.len(),
            });
        }

        Ok(Self {
            read: symbol_flag(symbols[0], 'r', "READ")?,
            write: symbol_flag(symbols[1], 'w', "WRITE")?,
            execute: symbol_flag(symbols[2], 'x', "EXECUTE")?,
        })
    }
}

fn symbol_flag(found: char, expected: char, role: &'static str) -> Result<bool, PermissionBitsError> {
    if found == expected {
        Ok(true)
    } else if found == '-' {
        Ok(false)
    } else {
        Err(PermissionBitsError::InvalidSymbol {
            found,
            role,
            expected,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PermissionBitsError {
    #[error("Can't be parsed as octal number.")]
    InvalidOctalDigit,

    #[error("'{found}' is not a valid Unix permission {role} flag, must be '{expected}' or '-'.")]
    InvalidSymbol {
        found: char,
        role: &'static str,
        expected: char,
    },

    #[error("symbolic permission slices must contain exactly 3 symbols, got {actual}")]
    InvalidSliceLength { actual: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_weights_cover_all_eight_combinations() {
        for digit in 0u8..8 {
            let bits = PermissionBits::from_unix_numeric(digit);

            assert_eq!(bits.read(), digit & 0b100 != 0);
            assert_eq!(bits.write(), digit & 0b010 != 0);
            assert_eq!(bits.execute(), digit & 0b001 != 0);
            assert_eq!(bits.to_unix_numeric(), digit);
        }
    }

    #[test]
    fn symbolic_round_trips_all_eight_combinations() {
        for digit in 0u8..8 {
            let bits = PermissionBits::from_unix_numeric(digit);
            let symbolic = bits.to_unix_symbolic();

            assert_eq!(symbolic.len(), 3);
            assert_eq!(PermissionBits::parse_symbolic(&symbolic).unwrap(), bits);
        }
    }

    #[test]
    fn known_combinations_decode_as_expected() {
        assert_eq!(
            PermissionBits::parse_symbolic("rwx").unwrap(),
            PermissionBits::new(true, true, true)
        );
        assert_eq!(
            PermissionBits::parse_symbolic("r-x").unwrap(),
            PermissionBits::new(true, false, true)
        );
        assert_eq!(
            PermissionBits::parse_symbolic("r--").unwrap(),
            PermissionBits::new(true, false, false)
        );
        assert_eq!(
            PermissionBits::parse_symbolic("---").unwrap(),
            PermissionBits::new(false, false, false)
        );

        assert_eq!(PermissionBits::new(true, false, true).to_unix_numeric(), 5);
    }

    #[test]
    fn non_octal_digits_are_rejected() {
        for symbol in ['8', '9', '+', 'a'] {
            let err = PermissionBits::parse_numeric(symbol).unwrap_err();
            assert_eq!(err.to_string(), "Can't be parsed as octal number.");
        }

        assert_eq!(
            PermissionBits::parse_numeric('7').unwrap(),
            PermissionBits::new(true, true, true)
        );
    }

    #[test]
    fn wrong_symbols_name_the_character_and_the_expected_flag() {
        let err = PermissionBits::parse_symbolic("rwz").unwrap_err();
        assert_eq!(
            err.to_string(),
            "'z' is not a valid Unix permission EXECUTE flag, must be 'x' or '-'."
        );

        let err = PermissionBits::parse_symbolic("xwx").unwrap_err();
        assert_eq!(
            err.to_string(),
            "'x' is not a valid Unix permission READ flag, must be 'r' or '-'."
        );

        let err = PermissionBits::parse_symbolic("rrx").unwrap_err();
        assert_eq!(
            err.to_string(),
            "'r' is not a valid Unix permission WRITE flag, must be 'w' or '-'."
        );
    }

    #[test]
    fn short_slices_are_rejected_before_symbol_checks() {
        let err = PermissionBits::parse_symbolic("rw").unwrap_err();
        assert_eq!(err, PermissionBitsError::InvalidSliceLength { actual: 2 });
    }
}
