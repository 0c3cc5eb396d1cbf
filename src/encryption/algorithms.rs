use crate::dictionary::{EncryptionDictionary, Revision};
use crate::{Error, Result};
use log::debug;
use md5::{Digest as _, Md5};
use super::random::RandomSource;
use super::rc4::Rc4;

/// The padding string of the standard security handler. A password shorter than 32 bytes is
/// completed with the leading bytes of this string.
pub const PAD_BYTES: [u8; 32] = [
    0x28, 0xBF, 0x4E, 0x5E, 0x4E, 0x75, 0x8A, 0x41, 0x64, 0x00, 0x4E, 0x56, 0xFF, 0xFA, 0x01, 0x08, 0x2E, 0x2E, 0x00,
    0xB6, 0xD0, 0x68, 0x3E, 0x80, 0x2F, 0x0C, 0xA9, 0xFE, 0x64, 0x53, 0x69, 0x7A,
];

/// Pad or truncate a password to exactly 32 bytes.
///
/// If the password string is more than 32 bytes long, only its first 32 bytes are used; if it is
/// less than 32 bytes long, it is padded by appending the required number of additional bytes from
/// the beginning of [`PAD_BYTES`]. An empty password becomes the padding string itself.
pub fn pad_password<P>(password: P) -> [u8; 32]
where
    P: AsRef<[u8]>,
{
    let password = password.as_ref();

    // i.e., we will simply calculate `len = min(password length, 32)` and use the first len bytes
    // of password and the first 32 - len bytes of `PAD_BYTES`.
    let len = password.len().min(32);

    let mut bytes = [0u8; 32];
    bytes[..len].copy_from_slice(&password[..len]);
    bytes[len..].copy_from_slice(&PAD_BYTES[..32 - len]);
    bytes
}

/// The number of bytes of the RC4 keys: always 5 for revision 2, `length / 8` otherwise.
pub(crate) fn key_length(revision: Revision, length: usize) -> Result<usize> {
    let n = match revision {
        Revision::R2 => return Ok(5),
        Revision::R3 | Revision::R4 => length / 8,
    };

    // The maximum supported key length is 16 bytes (128 bits) due to the use of MD5; anything
    // shorter than 40 bits is not a valid /Length.
    if !(5..=16).contains(&n) {
        return Err(Error::InvalidKeyLength(n));
    }

    Ok(n)
}

/// Run RC4 over `data` once per value of `rounds`, each time with every byte of `key` XORed with
/// the round value. Round value 0 uses the key itself.
fn rc4_cascade<R>(key: &[u8], data: &[u8], rounds: R) -> Result<Vec<u8>>
where
    R: IntoIterator<Item = u8>,
{
    let mut result = data.to_vec();
    let mut round_key = vec![0u8; key.len()];

    for i in rounds {
        for (in_byte, out_byte) in key.iter().zip(round_key.iter_mut()) {
            *out_byte = in_byte ^ i;
        }

        result = Rc4::new(&round_key)?.encrypt(&result);
    }

    Ok(result)
}

fn md5_digest(hasher: Md5) -> Result<[u8; 16]> {
    let hash = hasher.finalize();
    <[u8; 16]>::try_from(hash.as_slice()).map_err(|_| Error::InvalidDigestLength(hash.len()))
}

/// Compute a file encryption key in order to encrypt/decrypt a document.
///
/// This implements Algorithm 2 as described in ISO 32000-2:2020 (PDF 2.0). `key_len` is the
/// number of bytes returned by [`key_length`].
pub(crate) fn compute_file_encryption_key<P>(
    dict: &EncryptionDictionary,
    revision: Revision,
    key_len: usize,
    file_id_0: &[u8],
    password: P,
) -> Result<Vec<u8>>
where
    P: AsRef<[u8]>,
{
    if key_len > 16 {
        return Err(Error::InvalidKeyLength(key_len));
    }

    // Initialize the MD5 hash function and pass the padded password as input to this function.
    let mut hasher = Md5::new();
    hasher.update(pad_password(password));

    // Pass the value of the encryption dictionary's O entry (owner password hash) to the MD5 hash
    // function.
    hasher.update(&dict.owner_value);

    // Convert the integer value of the P entry (permissions) to a 32-bit unsigned binary number
    // and pass these bytes to the MD5 hash function, low-order byte first.
    hasher.update((dict.permissions as u32).to_le_bytes());

    // Pass the first element of the file's file identifier array (the value of the ID entry in the
    // document's trailer dictionary) to the MD5 hash function.
    hasher.update(file_id_0);

    // (Security handlers of revision 4 or greater) If document metadata is not being encrypted,
    // pass 4 bytes with the value 0xFFFFFFFF to the MD5 hash function.
    if revision == Revision::R4 && !dict.encrypt_metadata {
        hasher.update(b"\xff\xff\xff\xff");
    }

    let mut hash = md5_digest(hasher)?;

    match revision {
        // Set the file encryption key to the first 5 bytes of the output from the MD5 hash.
        Revision::R2 => Ok(hash[..5].to_vec()),
        // (Security handlers of revision 3 or greater) Do the following 50 times: take the output
        // from the previous MD5 hash and pass the first n bytes of the output as input into a new
        // MD5 hash, where n is the number of bytes of the file encryption key as defined by the
        // value of the encryption dictionary's Length entry.
        Revision::R3 | Revision::R4 => {
            for _ in 0..50 {
                let next = Md5::digest(&hash[..key_len]);
                hash.copy_from_slice(&next);
            }

            Ok(hash[..key_len].to_vec())
        }
    }
}

/// Compute the RC4 key used to produce and to decrypt the O entry.
///
/// This implements steps (a) to (d) of Algorithm 3 as described in ISO 32000-2:2020 (PDF 2.0).
pub(crate) fn compute_owner_key<P>(revision: Revision, key_len: usize, password: P) -> Result<Vec<u8>>
where
    P: AsRef<[u8]>,
{
    if key_len > 16 {
        return Err(Error::InvalidKeyLength(key_len));
    }

    let mut hasher = Md5::new();
    hasher.update(pad_password(password));

    let mut hash = md5_digest(hasher)?;

    match revision {
        Revision::R2 => Ok(hash[..5].to_vec()),
        // (Security handlers of revision 3 or greater) Do the following 50 times: take the output
        // from the previous MD5 hash and pass it as input into a new MD5 hash.
        Revision::R3 | Revision::R4 => {
            for _ in 0..50 {
                let next = Md5::digest(hash);
                hash.copy_from_slice(&next);
            }

            Ok(hash[..key_len].to_vec())
        }
    }
}

/// Compute the encryption dictionary's O-entry value.
///
/// This implements Algorithm 3 as described in ISO 32000-2:2020 (PDF 2.0). If there is no owner
/// password, the user password is used instead.
pub(crate) fn compute_hashed_owner_password<O, U>(
    revision: Revision,
    key_len: usize,
    owner_password: O,
    user_password: U,
) -> Result<Vec<u8>>
where
    O: AsRef<[u8]>,
    U: AsRef<[u8]>,
{
    let owner_password = owner_password.as_ref();
    let user_password = user_password.as_ref();

    let password = if owner_password.is_empty() { user_password } else { owner_password };
    let key = compute_owner_key(revision, key_len, password)?;

    // Encrypt the padded user password using an RC4 encryption function with the key obtained
    // above.
    let bytes = pad_password(user_password);

    match revision {
        Revision::R2 => Ok(Rc4::new(&key)?.encrypt(bytes)),
        // (Security handlers of revision 3 or greater) Do the following 19 times: Take the output
        // from the previous invocation of the RC4 function and pass it as input to a new
        // invocation of the function; use a key generated by taking each byte of the RC4 key and
        // performing an XOR operation between that byte and the single-byte value of the iteration
        // counter (from 1 to 19).
        Revision::R3 | Revision::R4 => rc4_cascade(&key, &bytes, 0..=19),
    }
}

/// Compute the encryption dictionary's U-entry value (revision 2).
///
/// This implements Algorithm 4 as described in ISO 32000-2:2020 (PDF 2.0).
pub(crate) fn compute_hashed_user_password_r2(file_encryption_key: &[u8]) -> Result<Vec<u8>> {
    // Encrypt the 32-byte padding string using an RC4 encryption function with the file
    // encryption key.
    Ok(Rc4::new(file_encryption_key)?.encrypt(PAD_BYTES))
}

/// Compute the first 16 bytes of the encryption dictionary's U-entry value (revision 3 or 4).
///
/// This implements steps (b) to (e) of Algorithm 5 as described in ISO 32000-2:2020 (PDF 2.0).
pub(crate) fn compute_user_digest_r3_r4(file_encryption_key: &[u8], file_id_0: &[u8]) -> Result<Vec<u8>> {
    // Initialize the MD5 hash function and pass the 32-byte padding string, then the first element
    // of the file's file identifier array.
    let mut hasher = Md5::new();
    hasher.update(PAD_BYTES);
    hasher.update(file_id_0);

    let hash = md5_digest(hasher)?;

    // Encrypt the 16-byte result of the hash with the file encryption key, then do the following
    // 19 times: take the output from the previous invocation of the RC4 function and pass it as
    // input to a new invocation of the function, using the file encryption key XORed with the
    // iteration counter (from 1 to 19).
    rc4_cascade(file_encryption_key, &hash, 0..=19)
}

/// Compute the encryption dictionary's U-entry value (revision 3 or 4).
///
/// This implements Algorithm 5 as described in ISO 32000-2:2020 (PDF 2.0).
pub(crate) fn compute_hashed_user_password_r3_r4<R>(
    file_encryption_key: &[u8],
    file_id_0: &[u8],
    rng: &mut R,
) -> Result<Vec<u8>>
where
    R: RandomSource + ?Sized,
{
    let mut result = compute_user_digest_r3_r4(file_encryption_key, file_id_0)?;

    // Append 16 bytes of arbitrary padding to the output from the final invocation of the RC4
    // function and store the 32-byte result as the value of the U entry.
    result.resize(32, 0);
    rng.fill_bytes(&mut result[16..])?;

    Ok(result)
}

/// Authenticate the user password and return the file encryption key it unlocks.
///
/// This implements Algorithm 6 as described in ISO 32000-2:2020 (PDF 2.0). A wrong password is
/// `Ok(None)`.
pub(crate) fn authenticate_user_password<U>(
    dict: &EncryptionDictionary,
    revision: Revision,
    key_len: usize,
    file_id_0: &[u8],
    user_password: U,
) -> Result<Option<Vec<u8>>>
where
    U: AsRef<[u8]>,
{
    // Perform all but the last step of Algorithm 4 (security handlers of revision 2) or Algorithm
    // 5 (security handlers of revision 3 or 4) using the supplied password string.
    let file_encryption_key = compute_file_encryption_key(dict, revision, key_len, file_id_0, user_password)?;

    // If the result is equal to the value of the encryption dictionary's U entry (comparing on the
    // first 16 bytes in the case of security handlers of revision 3 or greater), the password
    // supplied is the correct user password.
    let matches = match revision {
        Revision::R2 => compute_hashed_user_password_r2(&file_encryption_key)? == dict.user_value,
        Revision::R3 | Revision::R4 => {
            let hashed_user_password = compute_user_digest_r3_r4(&file_encryption_key, file_id_0)?;
            let stored = &dict.user_value[..dict.user_value.len().min(16)];

            hashed_user_password[..16] == *stored
        }
    };

    Ok(matches.then_some(file_encryption_key))
}

/// Authenticate the owner password and return the file encryption key it unlocks.
///
/// This implements Algorithm 7 as described in ISO 32000-2:2020 (PDF 2.0). A wrong password is
/// `Ok(None)`.
pub(crate) fn authenticate_owner_password<O>(
    dict: &EncryptionDictionary,
    revision: Revision,
    key_len: usize,
    file_id_0: &[u8],
    owner_password: O,
) -> Result<Option<Vec<u8>>>
where
    O: AsRef<[u8]>,
{
    let key = compute_owner_key(revision, key_len, owner_password)?;

    // Decrypt the value of the encryption dictionary's O entry, using an RC4 encryption function
    // with the key. For revision 3 or greater, do this 20 times, using the key XORed with the
    // iteration counter (from 19 down to 0), each time on the output of the previous round.
    let user_password = match revision {
        Revision::R2 => Rc4::new(&key)?.decrypt(&dict.owner_value),
        Revision::R3 | Revision::R4 => rc4_cascade(&key, &dict.owner_value, (0..=19).rev())?,
    };

    // The result purports to be the user password. Authenticate it using Algorithm 6; a failure to
    // do so only means the supplied password is not the owner password.
    match authenticate_user_password(dict, revision, key_len, file_id_0, &user_password) {
        Ok(key) => Ok(key),
        Err(err) => {
            debug!("recovered user password could not be checked: {err}");
            Ok(None)
        }
    }
}
