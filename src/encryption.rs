mod algorithms;
mod random;
mod rc4;

use crate::dictionary::{EncryptionDictionary, Revision};
use crate::{Permissions, Result};
use algorithms::*;
use log::{debug, trace, warn};

pub use algorithms::{PAD_BYTES, pad_password};
pub use random::{OsRandom, RandomSource};

/// A password-based security handler as seen by the code that encrypts and decrypts strings and
/// streams.
pub trait SecurityHandler {
    /// Try `password` as the owner password, then as the user password.
    ///
    /// Returns the file encryption key together with the granted permissions:
    /// [`Permissions::OWNER`] for the owner password, the /P entry for the user password. A
    /// password that matches neither yields no key and empty permissions.
    fn authenticate(&self, dict: &EncryptionDictionary, password: &[u8]) -> Result<(Option<Vec<u8>>, Permissions)>;

    /// Compute and store the /O and /U entries of a new encryption dictionary and return the file
    /// encryption key. /R, /P, /Length and /EncryptMetadata must already be set.
    fn generate_params(
        &self,
        dict: &mut EncryptionDictionary,
        owner_password: &[u8],
        user_password: &[u8],
    ) -> Result<Vec<u8>>;
}

/// The standard security handler for revisions 2 to 4 (RC4 and MD5).
///
/// Holds the first element of the document's /ID array and the key length in bits, both fixed for
/// the lifetime of the document. The handler keeps no other state, so it can be shared between
/// threads trying different passwords.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StandardSecurityHandler {
    file_id_0: Vec<u8>,
    length: usize,
}

impl StandardSecurityHandler {
    pub fn new<I>(file_id_0: I, length: usize) -> Self
    where
        I: Into<Vec<u8>>,
    {
        Self {
            file_id_0: file_id_0.into(),
            length,
        }
    }

    /// Create a handler using the /Length entry of `dict`.
    pub fn from_dictionary<I>(file_id_0: I, dict: &EncryptionDictionary) -> Self
    where
        I: Into<Vec<u8>>,
    {
        Self::new(file_id_0, dict.length)
    }

    pub fn file_id_0(&self) -> &[u8] {
        &self.file_id_0
    }

    /// The key length in bits.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Like [`SecurityHandler::generate_params`], drawing the padding of /U from `rng`.
    pub fn generate_params_with<O, U, R>(
        &self,
        dict: &mut EncryptionDictionary,
        owner_password: O,
        user_password: U,
        rng: &mut R,
    ) -> Result<Vec<u8>>
    where
        O: AsRef<[u8]>,
        U: AsRef<[u8]>,
        R: RandomSource + ?Sized,
    {
        let user_password = user_password.as_ref();

        let revision = dict.revision()?;
        let key_len = key_length(revision, self.length)?;

        if revision != Revision::R2 && dict.length != self.length {
            debug!("/Length is {} bits but the handler uses {} bits", dict.length, self.length);
        }

        // The file encryption key depends on /O, so it has to be stored first.
        dict.owner_value = compute_hashed_owner_password(revision, key_len, owner_password, user_password)
            .inspect_err(|err| debug!("couldn't generate /O for encryption: {err}"))?;

        let file_encryption_key = compute_file_encryption_key(dict, revision, key_len, &self.file_id_0, user_password)?;

        dict.user_value = match revision {
            Revision::R2 => compute_hashed_user_password_r2(&file_encryption_key),
            Revision::R3 | Revision::R4 => compute_hashed_user_password_r3_r4(&file_encryption_key, &self.file_id_0, rng),
        }
        .inspect_err(|err| debug!("couldn't generate /U for encryption: {err}"))?;

        trace!("generated /O and /U for revision {}", revision.as_i64());

        Ok(file_encryption_key)
    }
}

impl SecurityHandler for StandardSecurityHandler {
    fn authenticate(&self, dict: &EncryptionDictionary, password: &[u8]) -> Result<(Option<Vec<u8>>, Permissions)> {
        // A damaged or foreign dictionary cannot be opened by this handler, which is the same
        // outcome as a wrong password.
        let revision = match dict.revision() {
            Ok(revision) => revision,
            Err(err) => {
                warn!("{err}; access denied");
                return Ok((None, Permissions::empty()));
            }
        };

        let key_len = key_length(revision, self.length)?;

        if let Some(key) = authenticate_owner_password(dict, revision, key_len, &self.file_id_0, password)? {
            trace!("authenticated with the owner password");
            return Ok((Some(key), Permissions::OWNER));
        }

        if let Some(key) = authenticate_user_password(dict, revision, key_len, &self.file_id_0, password)? {
            trace!("authenticated with the user password");
            return Ok((Some(key), dict.permissions()));
        }

        trace!("the password matches neither the owner nor the user password");
        Ok((None, Permissions::empty()))
    }

    fn generate_params(
        &self,
        dict: &mut EncryptionDictionary,
        owner_password: &[u8],
        user_password: &[u8],
    ) -> Result<Vec<u8>> {
        self.generate_params_with(dict, owner_password, user_password, &mut OsRandom)
    }
}
