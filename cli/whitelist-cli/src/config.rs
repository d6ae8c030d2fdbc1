use std::path::{Path, PathBuf};

use crate::error::{Result, SignerError};

/// Loads environment variables from a dotenv file. Variables already set in
/// the process environment are kept.
///
/// With `explicit` set, that file must exist. Otherwise `.env` is looked up
/// from the working directory upwards and silently skipped if absent.
///
/// # Returns
/// The path of the file that was loaded, if any
pub fn load_dotenv(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    match explicit {
        Some(path) => {
            dotenvy::from_path(path).map_err(|e| {
                SignerError::Config(format!("failed to load env file {}: {e}", path.display()))
            })?;
            Ok(Some(path.to_path_buf()))
        }
        None => match dotenvy::dotenv() {
            Ok(path) => Ok(Some(path)),
            Err(e) if e.not_found() => Ok(None),
            Err(e) => Err(SignerError::Config(format!("failed to load .env: {e}"))),
        },
    }
}
