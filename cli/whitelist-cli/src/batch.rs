//! Load, sign-all-or-abort, write.

use std::path::Path;

use tracing::{info, warn};

use crate::common::write_file_atomic;
use crate::error::Result;
use crate::signer::WhitelistSigner;
use crate::whitelist::{load_whitelist, render_signatures, SignatureFormat, SignedEntry};

/// Signs every entry of the whitelist at `input` and writes the signature file
/// to `output`.
///
/// Nothing is written unless every entry parses and signs, so a failed run
/// leaves any existing `output` untouched.
pub fn sign_whitelist_file(
    signer: &WhitelistSigner,
    input: &Path,
    output: &Path,
    format: SignatureFormat,
) -> Result<Vec<SignedEntry>> {
    info!(input = %input.display(), "reading whitelist");
    let entries = load_whitelist(input)?;
    if entries.is_empty() {
        warn!("whitelist is empty, the signature file will be an empty array");
    }

    info!(entries = entries.len(), "signing whitelist");
    let signed = signer.sign_all(&entries)?;
    let document = render_signatures(&signed, format)?;

    info!(output = %output.display(), ?format, "writing signatures");
    write_file_atomic(output, &document)?;
    Ok(signed)
}
