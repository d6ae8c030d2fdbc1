use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use starknet_types_core::felt::Felt;

use crate::error::{Result, SignerError};

/// Parses a STARK field element from a hex string.
///
/// # Arguments
/// * `value` - The hex string, with or without "0x" prefix
///
/// # Returns
/// The field element. Values are never reduced modulo the field prime.
///
/// # Errors
/// Returns a human-readable reason if the string is empty, contains invalid
/// hex, or encodes a value that is not below the field prime
pub fn parse_felt_hex(value: &str) -> std::result::Result<Felt, String> {
    let trimmed = value.trim();
    let cleaned = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    if cleaned.is_empty() {
        return Err("empty hex string".to_string());
    }
    let digits = cleaned.trim_start_matches('0');
    if digits.len() > 64 {
        return Err(format!(
            "value too large: {} significant hex digits",
            digits.len()
        ));
    }
    let padded = format!("{digits:0>64}");
    let mut bytes = [0u8; 32];
    hex::decode_to_slice(&padded, &mut bytes)
        .map_err(|e| format!("invalid hex encoding: {e}"))?;
    felt_below_prime(bytes)
}

/// Parses a non-negative decimal integer into a STARK field element.
///
/// Same contract as [`parse_felt_hex`]: any integer strictly below the field
/// prime is accepted, nothing is reduced.
pub fn parse_felt_dec(value: &str) -> std::result::Result<Felt, String> {
    let digits = value.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("{value:?} is not a non-negative decimal integer"));
    }

    // Big-endian base-256 accumulator: bytes = bytes * 10 + digit.
    let mut bytes = [0u8; 32];
    for digit in digits.bytes() {
        let mut carry = u16::from(digit - b'0');
        for byte in bytes.iter_mut().rev() {
            let acc = u16::from(*byte) * 10 + carry;
            *byte = (acc & 0xff) as u8;
            carry = acc >> 8;
        }
        if carry != 0 {
            return Err("value too large: exceeds 256 bits".to_string());
        }
    }
    felt_below_prime(bytes)
}

fn felt_below_prime(bytes: [u8; 32]) -> std::result::Result<Felt, String> {
    if bytes > Felt::MAX.to_bytes_be() {
        return Err("value is not below the STARK field prime".to_string());
    }
    Ok(Felt::from_bytes_be(&bytes))
}

/// Formats a field element as a 0x-prefixed, 64-digit hex string.
pub fn hex_encode(value: &Felt) -> String {
    format!("0x{}", hex::encode(value.to_bytes_be()))
}

/// Sibling path used while writing `path`: the full file name plus `.tmp`,
/// so it never equals `path` itself.
pub fn temp_path_for(path: &Path) -> Result<PathBuf> {
    let mut name = path
        .file_name()
        .ok_or_else(|| SignerError::Io {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "output path has no file name"),
        })?
        .to_os_string();
    name.push(".tmp");
    Ok(path.with_file_name(name))
}

/// Writes `contents` to `path` through a sibling temp file and a rename, so
/// readers never observe a partially written file. The temp file is removed
/// on every failure.
pub fn write_file_atomic(path: &Path, contents: &str) -> Result<()> {
    let temp_path = temp_path_for(path)?;

    let written = write_and_sync(&temp_path, contents).map_err(|source| SignerError::Io {
        path: temp_path.clone(),
        source,
    });
    let renamed = written.and_then(|()| {
        fs::rename(&temp_path, path).map_err(|source| SignerError::Io {
            path: path.to_path_buf(),
            source,
        })
    });

    if renamed.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    renamed
}

fn write_and_sync(path: &Path, contents: &str) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    file.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_felt_hex_with_prefix() {
        assert_eq!(parse_felt_hex("0x1a").unwrap(), Felt::from(26u64));
    }

    #[test]
    fn test_parse_felt_hex_without_prefix() {
        assert_eq!(parse_felt_hex("ff").unwrap(), Felt::from(255u64));
    }

    #[test]
    fn test_parse_felt_hex_leading_zeros() {
        let padded = format!("0x{}", "0".repeat(80) + "7");
        assert_eq!(parse_felt_hex(&padded).unwrap(), Felt::from(7u64));
    }

    #[test]
    fn test_parse_felt_hex_empty() {
        assert!(parse_felt_hex("").is_err());
        assert!(parse_felt_hex("0x").is_err());
    }

    #[test]
    fn test_parse_felt_hex_invalid_hex() {
        assert!(parse_felt_hex("0xghij").is_err());
        assert!(parse_felt_hex("-0x1").is_err());
    }

    #[test]
    fn test_parse_felt_hex_field_bound() {
        let max = hex_encode(&Felt::MAX);
        assert_eq!(parse_felt_hex(&max).unwrap(), Felt::MAX);

        // The field prime itself: 2^251 + 17 * 2^192 + 1.
        let prime = "0x0800000000000011000000000000000000000000000000000000000000000001";
        assert!(parse_felt_hex(prime).is_err());
        assert!(parse_felt_hex(&format!("0x1{}", "0".repeat(64))).is_err());
    }

    #[test]
    fn test_hex_encode() {
        let encoded = hex_encode(&Felt::from(0xabu64));
        assert_eq!(encoded.len(), 66);
        assert!(encoded.starts_with("0x"));
        assert!(encoded.ends_with("ab"));
    }

    #[test]
    fn test_write_file_atomic_replaces_contents() {
        let dir = std::env::temp_dir().join(format!("whitelist-common-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("out.json");

        write_file_atomic(&path, "first\n").unwrap();
        write_file_atomic(&path, "second\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second\n");
        assert!(!dir.join("out.json.tmp").exists());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_parse_felt_dec() {
        assert_eq!(parse_felt_dec("0").unwrap(), Felt::ZERO);
        assert_eq!(parse_felt_dec(" 42 ").unwrap(), Felt::from(42u64));
        assert_eq!(
            parse_felt_dec("18446744073709551616").unwrap(),
            Felt::from(1u128 << 64)
        );
        assert_eq!(
            parse_felt_dec("340282366920938463463374607431768211456").unwrap(),
            parse_felt_hex(&format!("0x1{}", "0".repeat(32))).unwrap()
        );
    }

    #[test]
    fn test_parse_felt_dec_field_bound() {
        let prime = "3618502788666131213697322783095070105623107215331596699973092056135872020481";
        let below = "3618502788666131213697322783095070105623107215331596699973092056135872020480";
        assert_eq!(parse_felt_dec(below).unwrap(), Felt::MAX);
        assert!(parse_felt_dec(prime).is_err());
        assert!(parse_felt_dec(&"9".repeat(80)).is_err());
    }

    #[test]
    fn test_parse_felt_dec_rejects_non_digits() {
        for bad in ["", "-1", "+1", "1.5", "1e3", "0x10", "five"] {
            assert!(parse_felt_dec(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_temp_path_appends_suffix() {
        let dir = Path::new("/data");
        assert_eq!(
            temp_path_for(&dir.join("out.json")).unwrap(),
            dir.join("out.json.tmp")
        );
        assert_eq!(
            temp_path_for(&dir.join("out.tmp")).unwrap(),
            dir.join("out.tmp.tmp")
        );
    }

    #[test]
    fn test_write_file_atomic_leaves_sibling_tmp_alone() {
        let dir = std::env::temp_dir().join(format!("whitelist-sibling-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let sibling = dir.join("out.tmp");
        fs::write(&sibling, "unrelated\n").unwrap();

        write_file_atomic(&dir.join("out.json"), "[]\n").unwrap();

        assert_eq!(fs::read_to_string(&sibling).unwrap(), "unrelated\n");
        assert_eq!(fs::read_to_string(dir.join("out.json")).unwrap(), "[]\n");
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_write_file_atomic_cleans_up_on_failure() {
        let dir = std::env::temp_dir().join(format!("whitelist-cleanup-{}", std::process::id()));
        let target = dir.join("out.json");
        // A non-empty directory at the target path makes the rename fail.
        fs::create_dir_all(target.join("occupied")).unwrap();

        let err = write_file_atomic(&target, "[]\n").unwrap_err();
        assert!(matches!(err, SignerError::Io { .. }));
        assert!(!dir.join("out.json.tmp").exists());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_write_file_atomic_missing_directory() {
        let path = std::env::temp_dir()
            .join(format!("whitelist-missing-{}", std::process::id()))
            .join("out.json");
        let err = write_file_atomic(&path, "{}").unwrap_err();
        assert!(matches!(err, SignerError::Io { .. }));
    }
}
