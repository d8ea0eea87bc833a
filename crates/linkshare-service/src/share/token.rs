//! Share link token generation.

use rand::RngCore;

/// Random bytes behind each link token.
const TOKEN_BYTES: usize = 32;

/// A new unguessable link token: 256 random bits, hex-encoded.
pub fn generate_link_id() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
