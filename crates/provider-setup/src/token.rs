use std::fmt::Write;

use rand::RngCore;

/// Random bytes in a gateway auth token.
pub const TOKEN_BYTES: usize = 24;

/// Generate a gateway auth token: 24 random bytes as lowercase hex.
///
/// Draws from the thread-local CSPRNG, which is seeded from the OS.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    bytes
        .iter()
        .fold(String::with_capacity(TOKEN_BYTES * 2), |mut out, b| {
            let _ = write!(out, "{b:02x}");
            out
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_48_lowercase_hex_chars() {
        let token = generate_token();
        assert_eq!(token.len(), 48);
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
    }

    #[test]
    fn tokens_differ() {
        assert_ne!(generate_token(), generate_token());
    }
}
