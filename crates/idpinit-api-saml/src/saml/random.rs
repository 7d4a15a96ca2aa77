//! Process-wide cryptographically strong randomness for protocol identifiers

use rand::rngs::OsRng;
use rand::RngCore;
use std::sync::OnceLock;

/// Handle to the operating system CSPRNG.
///
/// `OsRng` carries no state, so one handle is shared by every request
/// handler without locking. Obtain it through [`SecureRandom::global`].
#[derive(Debug)]
pub struct SecureRandom {
    rng: OsRng,
}

impl SecureRandom {
    /// The process-wide instance, created on first use.
    pub fn global() -> &'static SecureRandom {
        static RANDOM: OnceLock<SecureRandom> = OnceLock::new();
        RANDOM.get_or_init(|| SecureRandom { rng: OsRng })
    }

    /// Verify the OS entropy source is usable; call once at startup.
    pub fn self_check(&self) -> Result<(), rand::Error> {
        let mut probe = [0u8; 16];
        let mut rng = self.rng;
        rng.try_fill_bytes(&mut probe)
    }

    /// Random non-negative 63-bit magnitude.
    ///
    /// Fails instead of panicking when the OS entropy source errors.
    pub fn next_magnitude(&self) -> Result<u64, rand::Error> {
        let mut bytes = [0u8; 8];
        let mut rng = self.rng;
        rng.try_fill_bytes(&mut bytes)?;
        Ok(u64::from_le_bytes(bytes) >> 1)
    }
}
