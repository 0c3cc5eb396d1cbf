use pdf_stdsec::{RandomSource, Result};

#[allow(dead_code)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[allow(dead_code)]
pub fn hex(s: &str) -> Vec<u8> {
    s.as_bytes()
        .chunks_exact(2)
        .map(|pair| u8::from_str_radix(std::str::from_utf8(pair).unwrap(), 16).unwrap())
        .collect()
}

/// Pads /U with zeros so that whole dictionaries can be compared against known values.
#[allow(dead_code)]
pub struct ZeroRandom;

impl RandomSource for ZeroRandom {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()> {
        dest.fill(0);
        Ok(())
    }
}
