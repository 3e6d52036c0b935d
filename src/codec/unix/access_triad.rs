use crate::codec::unix::{PermissionBits, PermissionBitsError, UserClass};
use crate::deferred::{Deferred, EvaluationError};

/// A single user class worth of permissions where each flag may still depend on work the host
/// scheduler has not executed. Flags can be reassigned freely until a derived value is resolved,
/// resolution itself is repeatable and recomputes from the current sources.
#[derive(Clone, Debug)]
pub struct AccessTriad {
    read: Deferred<bool>,
    write: Deferred<bool>,
    execute: Deferred<bool>,
}

impl AccessTriad {
    pub fn new(read: bool, write: bool, execute: bool) -> Self {
        Self::from(PermissionBits::new(read, write, execute))
    }

    pub fn from_unix_numeric(digit: u8) -> Self {
        Self::from(PermissionBits::from_unix_numeric(digit))
    }

    pub fn read(&self) -> &Deferred<bool> {
        &self.read
    }

    pub fn write(&self) -> &Deferred<bool> {
        &self.write
    }

    pub fn execute(&self) -> &Deferred<bool> {
        &self.execute
    }

    pub fn set_read(&mut self, read: impl Into<Deferred<bool>>) {
        self.read = read.into();
    }

    pub fn set_write(&mut self, write: impl Into<Deferred<bool>>) {
        self.write = write.into();
    }

    pub fn set_execute(&mut self, execute: impl Into<Deferred<bool>>) {
        self.execute = execute.into();
    }

    /// Whether any flag still depends on unexecuted upstream work. Recomputed on every call,
    /// flags may be reassigned between checks.
    pub fn has_pending_sources(&self) -> bool {
        self.read.is_pending() || self.write.is_pending() || self.execute.is_pending()
    }

    /// The single octal digit for this triad. When no flag has a pending source the digit is
    /// computed on the spot, otherwise the arithmetic is recorded against the flags without
    /// running any of them. Flags are combined in read, write, execute order.
    pub fn to_unix_numeric(&self) -> Deferred<u8> {
        match (
            self.read.immediate(),
            self.write.immediate(),
            self.execute.immediate(),
        ) {
            (Some(&read), Some(&write), Some(&execute)) => {
                Deferred::of(PermissionBits::new(read, write, execute).to_unix_numeric())
            }
            _ => self
                .read
                .map(|read| if read { 4 } else { 0 })
                .zip(&self.write.map(|write| if write { 2 } else { 0 }), |a, b| {
                    a + b
                })
                .zip(
                    &self.execute.map(|execute| if execute { 1 } else { 0 }),
                    |a, b| a + b,
                ),
        }
    }

    /// The three symbol slice for this triad, with the same eager or recorded split as
    /// [`AccessTriad::to_unix_numeric`].
    pub fn to_unix_symbolic(&self) -> Deferred<String> {
        match (
            self.read.immediate(),
            self.write.immediate(),
            self.execute.immediate(),
        ) {
            (Some(&read), Some(&write), Some(&execute)) => {
                Deferred::of(PermissionBits::new(read, write, execute).to_unix_symbolic())
            }
            _ => self
                .read
                .map(|read| String::from(if read { "r" } else { "-" }))
                .zip(
                    &self.write.map(|write| if write { 'w' } else { '-' }),
                    |mut slice, symbol| {
                        slice.push(symbol);
                        slice
                    },
                )
                .zip(
                    &self.execute.map(|execute| if execute { 'x' } else { '-' }),
                    |mut slice, symbol| {
                        slice.push(symbol);
                        slice
                    },
                ),
        }
    }

    /// Assigns all three flags from this class's slice of a composite Unix permission string,
    /// numeric ("754") or symbolic ("rwxr-xr--") depending on the character count. An immediate
    /// source is decoded right here and malformed input is reported to the caller. A pending
    /// source keeps the flags pending, the decode is recorded onto it and any validation failure
    /// surfaces when the flag is resolved.
    pub fn unix(
        &mut self,
        encoding: &Deferred<String>,
        class: UserClass,
    ) -> Result<(), UnixPermissionError> {
        match encoding {
            Deferred::Immediate(raw) => {
                let bits = match decode_class(raw, class) {
                    Ok(bits) => bits,
                    Err(err) => {
                        tracing::error!("failed to decode unix permission: {err}");
                        return Err(err);
                    }
                };

                self.read = Deferred::of(bits.read());
                self.write = Deferred::of(bits.write());
                self.execute = Deferred::of(bits.execute());

                Ok(())
            }
            Deferred::Pending(_) => {
                tracing::trace!(?class, "deferring unix permission decode onto pending source");

                self.read = decoded_flag(encoding, class, |bits| bits.read());
                self.write = decoded_flag(encoding, class, |bits| bits.write());
                self.execute = decoded_flag(encoding, class, |bits| bits.execute());

                Ok(())
            }
        }
    }
}

impl From<PermissionBits> for AccessTriad {
    fn from(bits: PermissionBits) -> Self {
        Self {
            read: Deferred::of(bits.read()),
            write: Deferred::of(bits.write()),
            execute: Deferred::of(bits.execute()),
        }
    }
}

fn decoded_flag(
    encoding: &Deferred<String>,
    class: UserClass,
    select: fn(PermissionBits) -> bool,
) -> Deferred<bool> {
    encoding.try_map(move |raw| {
        decode_class(&raw, class)
            .map(select)
            .map_err(EvaluationError::from)
    })
}

fn decode_class(raw: &str, class: UserClass) -> Result<PermissionBits, UnixPermissionError> {
    let symbols: Vec<char> = raw.chars().collect();

    let decoded = if symbols.len() == 3 {
        PermissionBits::parse_numeric(symbols[class.index()])
    } else {
        if symbols.len() != 9 {
            return Err(UnixPermissionError::InvalidLength {
                raw: raw.to_string(),
                actual: symbols.len(),
            });
        }

        let start = class.index() * 3;
        let slice: String = symbols[start..start + 3].iter().collect();

        PermissionBits::parse_symbolic(&slice)
    };

    decoded.map_err(|cause| UnixPermissionError::InvalidPermission {
        raw: raw.to_string(),
        cause,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnixPermissionError {
    #[error("'{raw}' isn't a proper Unix permission. {cause}")]
    InvalidPermission {
        raw: String,
        cause: PermissionBitsError,
    },

    #[error("'{raw}' isn't a proper Unix permission. Has {actual} characters, must have 3 (numeric notation) or 9 (symbolic notation).")]
    InvalidLength { raw: String, actual: usize },
}

impl From<UnixPermissionError> for EvaluationError {
    fn from(err: UnixPermissionError) -> Self {
        EvaluationError::new(err.to_string())
    }
}
