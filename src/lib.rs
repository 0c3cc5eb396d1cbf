//! The standard security handler of PDF documents for revisions 2, 3 and 4 (RC4 and MD5).
//!
//! [`StandardSecurityHandler`] derives the file encryption key from a password, computes the /O
//! and /U entries of a new encryption dictionary and authenticates a password against an existing
//! one:
//!
//! ```
//! use pdf_stdsec::{EncryptionDictionary, Permissions, Revision, SecurityHandler, StandardSecurityHandler};
//!
//! let mut dict = EncryptionDictionary::builder()
//!     .revision(Revision::R3)
//!     .length(128)
//!     .permissions(Permissions::PRINTABLE)
//!     .build();
//! let handler = StandardSecurityHandler::from_dictionary([0u8; 16], &dict);
//!
//! let key = handler.generate_params(&mut dict, b"owner", b"user")?;
//!
//! let (user_key, permissions) = handler.authenticate(&dict, b"user")?;
//! assert_eq!(user_key, Some(key));
//! assert!(permissions.allows(Permissions::PRINTABLE));
//!
//! let (no_key, _) = handler.authenticate(&dict, b"guess")?;
//! assert!(no_key.is_none());
//! # Ok::<(), pdf_stdsec::Error>(())
//! ```

mod dictionary;
pub use dictionary::{EncryptionDictionary, EncryptionDictionaryBuilder, Revision};

mod encryption;
pub use encryption::{OsRandom, PAD_BYTES, RandomSource, SecurityHandler, StandardSecurityHandler, pad_password};

mod error;
pub use error::{Error, Result};

mod permissions;
pub use permissions::Permissions;
