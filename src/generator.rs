//! Random password generation.

use rand::Rng;

/// Characters a generated password is drawn from: ASCII letters, digits,
/// and a fixed punctuation subset.
pub const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
abcdefghijklmnopqrstuvwxyz\
0123456789\
!@#$%^&*";

/// Default length of a generated password.
pub const DEFAULT_LENGTH: usize = 16;

/// Generate a password of `length` characters, each chosen uniformly from
/// `CHARSET` with the thread-local CSPRNG.
pub fn generate_random_password(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| char::from(CHARSET[rng.random_range(0..CHARSET.len())]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charset_has_seventy_distinct_symbols() {
        let mut sorted = CHARSET.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 70);
    }

    #[test]
    fn default_length_passwords_use_only_charset() {
        for _ in 0..200 {
            let pw = generate_random_password(DEFAULT_LENGTH);
            assert_eq!(pw.len(), DEFAULT_LENGTH);
            assert!(pw.bytes().all(|b| CHARSET.contains(&b)), "{pw}");
        }
    }

    #[test]
    fn successive_passwords_differ() {
        assert_ne!(
            generate_random_password(DEFAULT_LENGTH),
            generate_random_password(DEFAULT_LENGTH)
        );
    }

    #[test]
    fn zero_length_is_empty() {
        assert_eq!(generate_random_password(0), "");
    }

    #[test]
    fn long_passwords_reach_every_class() {
        let pw = generate_random_password(512);
        assert!(pw.bytes().any(|b| b.is_ascii_uppercase()));
        assert!(pw.bytes().any(|b| b.is_ascii_lowercase()));
        assert!(pw.bytes().any(|b| b.is_ascii_digit()));
        assert!(pw.bytes().any(|b| b"!@#$%^&*".contains(&b)));
    }
}
