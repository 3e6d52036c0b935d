use crate::codec::unix::{AccessTriad, UserClass};
use crate::deferred::Deferred;
use crate::error::FileModeResult;

pub const DEFAULT_FILE_MODE: u16 = 0o644;

pub const DEFAULT_DIRECTORY_MODE: u16 = 0o755;

/// The full owner/group/other permission set of a single filesystem entry. Each class is an
/// independently configurable [`AccessTriad`], the composite stays resolvable as one three digit
/// octal mode or one nine character symbolic string.
#[derive(Clone, Debug)]
pub struct FileMode {
    owner: AccessTriad,
    group: AccessTriad,
    other: AccessTriad,
}

impl FileMode {
    /// Splits a three digit octal mode such as 0o754 into its class triads.
    pub fn from_unix_numeric(mode: u16) -> Self {
        Self {
            owner: AccessTriad::from_unix_numeric(((mode >> 6) & 0o7) as u8),
            group: AccessTriad::from_unix_numeric(((mode >> 3) & 0o7) as u8),
            other: AccessTriad::from_unix_numeric((mode & 0o7) as u8),
        }
    }

    pub fn default_file() -> Self {
        Self::from_unix_numeric(DEFAULT_FILE_MODE)
    }

    pub fn default_directory() -> Self {
        Self::from_unix_numeric(DEFAULT_DIRECTORY_MODE)
    }

    pub fn owner(&self) -> &AccessTriad {
        &self.owner
    }

    pub fn owner_mut(&mut self) -> &mut AccessTriad {
        &mut self.owner
    }

    pub fn group(&self) -> &AccessTriad {
        &self.group
    }

    pub fn group_mut(&mut self) -> &mut AccessTriad {
        &mut self.group
    }

    pub fn other(&self) -> &AccessTriad {
        &self.other
    }

    pub fn other_mut(&mut self) -> &mut AccessTriad {
        &mut self.other
    }

    pub fn has_pending_sources(&self) -> bool {
        self.owner.has_pending_sources()
            || self.group.has_pending_sources()
            || self.other.has_pending_sources()
    }

    /// Assigns all nine flags from one composite encoding, running the per class decode once for
    /// each slice. The source value is shared, a pending source leaves every class pending.
    pub fn unix(&mut self, encoding: &Deferred<String>) -> FileModeResult<()> {
        self.owner.unix(encoding, UserClass::Owner)?;
        self.group.unix(encoding, UserClass::Group)?;
        self.other.unix(encoding, UserClass::Other)?;

        Ok(())
    }

    /// The whole mode as one number, 0o754 style. Immediate when no class has a pending source.
    pub fn to_unix_numeric(&self) -> Deferred<u16> {
        self.owner
            .to_unix_numeric()
            .map(|owner| u16::from(owner) * 64)
            .zip(
                &self.group.to_unix_numeric().map(|group| u16::from(group) * 8),
                |a, b| a + b,
            )
            .zip(&self.other.to_unix_numeric().map(u16::from), |a, b| a + b)
    }

    /// The whole mode as one nine character string, "rwxr-xr--" style.
    pub fn to_unix_symbolic(&self) -> Deferred<String> {
        self.owner
            .to_unix_symbolic()
            .zip(&self.group.to_unix_symbolic(), |mut composite, slice| {
                composite.push_str(&slice);
                composite
            })
            .zip(&self.other.to_unix_symbolic(), |mut composite, slice| {
                composite.push_str(&slice);
                composite
            })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn conventional_defaults() {
        let file = FileMode::default_file();
        assert_eq!(file.to_unix_numeric().resolve().unwrap(), 0o644);
        assert_eq!(file.to_unix_symbolic().resolve().unwrap(), "rw-r--r--");

        let directory = FileMode::default_directory();
        assert_eq!(directory.to_unix_numeric().resolve().unwrap(), 0o755);
        assert_eq!(directory.to_unix_symbolic().resolve().unwrap(), "rwxr-xr-x");
    }

    #[test]
    fn numeric_modes_split_into_class_triads() {
        let mode = FileMode::from_unix_numeric(0o754);

        assert_eq!(mode.owner().to_unix_numeric().resolve().unwrap(), 7);
        assert_eq!(mode.group().to_unix_numeric().resolve().unwrap(), 5);
        assert_eq!(mode.other().to_unix_numeric().resolve().unwrap(), 4);
        assert_eq!(mode.to_unix_symbolic().resolve().unwrap(), "rwxr-xr--");
    }

    #[test]
    fn composite_derivations_are_immediate_without_pending_sources() {
        let mode = FileMode::from_unix_numeric(0o640);

        assert!(!mode.has_pending_sources());
        assert!(!mode.to_unix_numeric().is_pending());
        assert!(!mode.to_unix_symbolic().is_pending());
    }

    #[test]
    fn one_pending_flag_defers_the_whole_composite() {
        let mut mode = FileMode::from_unix_numeric(0o644);
        mode.group_mut().set_write(Deferred::pending(|| Ok(true)));

        assert!(mode.has_pending_sources());

        let numeric = mode.to_unix_numeric();
        assert!(numeric.is_pending());
        assert_eq!(numeric.resolve().unwrap(), 0o664);
        assert_eq!(mode.to_unix_symbolic().resolve().unwrap(), "rw-rw-r--");
    }

    #[test]
    fn composite_decode_reaches_every_class() {
        let mut mode = FileMode::default_file();
        mode.unix(&Deferred::of(String::from("r-x-w---x"))).unwrap();

        assert_eq!(mode.to_unix_numeric().resolve().unwrap(), 0o521);

        mode.unix(&Deferred::of(String::from("640"))).unwrap();
        assert_eq!(mode.to_unix_symbolic().resolve().unwrap(), "rw-r-----");
    }

    #[test]
    fn composite_decode_failures_echo_the_full_input() {
        let mut mode = FileMode::default_file();

        let err = mode
            .unix(&Deferred::of(String::from("rwxr-xr-q")))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "'rwxr-xr-q' isn't a proper Unix permission. 'q' is not a valid Unix permission EXECUTE flag, must be 'x' or '-'."
        );
    }
}
