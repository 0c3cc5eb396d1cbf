use crate::Result;

/// Source of the arbitrary bytes that pad the U entry of revision 3 and 4 dictionaries.
///
/// The padding is never checked when authenticating, so a deterministic source only changes the
/// last 16 bytes of U.
pub trait RandomSource {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()>;
}

/// The operating system's secure random number generator.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()> {
        getrandom::fill(dest)?;
        Ok(())
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()> {
        (**self).fill_bytes(dest)
    }
}
