use crate::{Error, Permissions, Result};

/// Revision (/R) of the standard security handler.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Revision {
    /// RC4 with a 40-bit key, single pass derivations.
    R2,
    /// RC4 with keys of 40 to 128 bits, 50 MD5 rounds and 20 RC4 passes.
    R3,
    /// Like [`Revision::R3`], optionally leaving the metadata stream in the clear.
    R4,
}

impl Revision {
    pub fn as_i64(self) -> i64 {
        match self {
            Revision::R2 => 2,
            Revision::R3 => 3,
            Revision::R4 => 4,
        }
    }
}

impl TryFrom<i64> for Revision {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            2 => Ok(Revision::R2),
            3 => Ok(Revision::R3),
            4 => Ok(Revision::R4),
            _ => Err(Error::UnsupportedRevision(value)),
        }
    }
}

/// The entries of an /Encrypt dictionary read by the standard security handler (revision 4 and
/// earlier).
///
/// `revision` is kept as stored so that a damaged document can still be handed to the handler,
/// which then denies access instead of failing.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncryptionDictionary {
    /// /R
    pub revision: i64,
    /// /Length, in bits.
    pub length: usize,
    /// /O, 32 bytes.
    pub owner_value: Vec<u8>,
    /// /U, 32 bytes.
    pub user_value: Vec<u8>,
    /// /P
    pub permissions: i32,
    /// /EncryptMetadata, only meaningful for revision 4.
    pub encrypt_metadata: bool,
}

impl Default for EncryptionDictionary {
    fn default() -> Self {
        EncryptionDictionary::builder().build()
    }
}

impl EncryptionDictionary {
    /// Create a builder for a dictionary that is about to be authored.
    pub fn builder() -> EncryptionDictionaryBuilder {
        EncryptionDictionaryBuilder::default()
    }

    /// The parsed revision, if the handler supports it.
    pub fn revision(&self) -> Result<Revision> {
        Revision::try_from(self.revision)
    }

    /// The permissions stored in /P.
    pub fn permissions(&self) -> Permissions {
        Permissions::from_p(self.permissions)
    }

    /// Check that an authored dictionary is consistent: a supported revision, a key length that is
    /// a multiple of 8 in 40..=128 bits (ignored for revision 2), and 32-byte /O and /U values once
    /// they have been generated.
    pub fn validate(&self) -> Result<()> {
        let revision = self.revision()?;

        if revision != Revision::R2 && (self.length % 8 != 0 || !(40..=128).contains(&self.length)) {
            return Err(Error::InvalidKeyLength(self.length / 8));
        }

        if !self.owner_value.is_empty() && self.owner_value.len() != 32 {
            return Err(Error::InvalidHashLength { name: "O", found: self.owner_value.len() });
        }

        if !self.user_value.is_empty() && self.user_value.len() != 32 {
            return Err(Error::InvalidHashLength { name: "U", found: self.user_value.len() });
        }

        Ok(())
    }
}

/// Builder for EncryptionDictionary
pub struct EncryptionDictionaryBuilder {
    revision: Revision,
    length: usize,
    permissions: Permissions,
    encrypt_metadata: bool,
}

impl Default for EncryptionDictionaryBuilder {
    fn default() -> Self {
        Self {
            revision: Revision::R4,
            length: 128,
            permissions: Permissions::default(),
            encrypt_metadata: true,
        }
    }
}

impl EncryptionDictionaryBuilder {
    /// Set the revision
    pub fn revision(mut self, value: Revision) -> Self {
        self.revision = value;
        self
    }

    /// Set the key length in bits
    pub fn length(mut self, value: usize) -> Self {
        self.length = value;
        self
    }

    /// Set the permissions granted to the user password
    pub fn permissions(mut self, value: Permissions) -> Self {
        self.permissions = value;
        self
    }

    /// Encrypt the metadata stream or leave it in the clear (revision 4 only)
    pub fn encrypt_metadata(mut self, value: bool) -> Self {
        self.encrypt_metadata = value;
        self
    }

    /// Build the EncryptionDictionary. /O and /U stay empty until the parameters are generated.
    pub fn build(self) -> EncryptionDictionary {
        EncryptionDictionary {
            revision: self.revision.as_i64(),
            length: match self.revision {
                Revision::R2 => 40,
                _ => self.length,
            },
            owner_value: Vec::new(),
            user_value: Vec::new(),
            permissions: self.permissions.p_value(),
            encrypt_metadata: self.encrypt_metadata,
        }
    }
}
