//! Room codes and their mapping to transport addresses.
//!
//! A session is named by a 4-letter code. The code maps deterministically to
//! a TCP port in a fixed range; binding that port is the host's claim on the
//! name. A bind failure with `AddrInUse` is the "name unavailable" condition
//! and the caller regenerates the code and retries.

use rand::Rng;

use crate::error::GameError;

/// Room code alphabet. Excludes I and O, which read as 1 and 0.
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";

/// Room codes are always four letters.
pub const CODE_LEN: usize = 4;

/// Default base of the listen port range.
pub const DEFAULT_BASE_PORT: u16 = 40000;

/// Size of the listen port range.
const PORT_RANGE: u32 = 2048;

/// Generate a fresh room code.
pub fn generate_room_code<R: Rng>(rng: &mut R) -> String {
    (0..CODE_LEN)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// Normalize and validate a user-entered room code.
pub fn normalize_room_code(input: &str) -> Result<String, GameError> {
    let code = input.trim().to_ascii_uppercase();
    if code.len() != CODE_LEN {
        return Err(GameError::InvalidCode {
            reason: "room codes are four letters",
        });
    }
    if !code.bytes().all(|b| CODE_ALPHABET.contains(&b)) {
        return Err(GameError::InvalidCode {
            reason: "room codes use letters A-Z (no I or O)",
        });
    }
    Ok(code)
}

/// Map a room code to its listen port.
///
/// The code is read as a base-24 number and folded into the port range, so
/// host and clients derive the same port independently.
pub fn code_to_port(code: &str, base_port: u16) -> u16 {
    let value = code.bytes().fold(0u32, |acc, b| {
        let digit = CODE_ALPHABET
            .iter()
            .position(|&c| c == b)
            .unwrap_or_default() as u32;
        acc * CODE_ALPHABET.len() as u32 + digit
    });
    base_port + (value % PORT_RANGE) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_codes_use_the_restricted_alphabet() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let code = generate_room_code(&mut rng);
            assert_eq!(code.len(), CODE_LEN);
            assert!(code.bytes().all(|b| CODE_ALPHABET.contains(&b)));
            assert!(!code.contains('I'));
            assert!(!code.contains('O'));
        }
    }

    #[test]
    fn normalize_accepts_lowercase_and_whitespace() {
        assert_eq!(normalize_room_code(" abcd ").unwrap(), "ABCD");
        assert_eq!(normalize_room_code("WXYZ").unwrap(), "WXYZ");
    }

    #[test]
    fn normalize_rejects_bad_codes() {
        assert!(normalize_room_code("AB").is_err());
        assert!(normalize_room_code("ABCDE").is_err());
        assert!(normalize_room_code("AB1D").is_err());
        assert!(normalize_room_code("ABIO").is_err());
    }

    #[test]
    fn host_and_client_derive_the_same_port() {
        for code in ["AAAA", "ZZZZ", "KRPX"] {
            let p = code_to_port(code, DEFAULT_BASE_PORT);
            assert_eq!(p, code_to_port(code, DEFAULT_BASE_PORT));
            assert!(p >= DEFAULT_BASE_PORT);
            assert!(u32::from(p) < u32::from(DEFAULT_BASE_PORT) + PORT_RANGE);
        }
    }

    #[test]
    fn distinct_codes_usually_map_to_distinct_ports() {
        assert_ne!(
            code_to_port("AAAB", DEFAULT_BASE_PORT),
            code_to_port("AAAC", DEFAULT_BASE_PORT)
        );
    }
}
