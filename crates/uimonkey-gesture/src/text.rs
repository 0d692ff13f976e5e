#![forbid(unsafe_code)]

//! Random text for input fields.

use rand::Rng;
use uimonkey_core::capability::{CharacterKind, TextConstraint};

const DIGITS: &[u8] = b"0123456789";
const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const ALPHANUMERIC: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

fn alphabet(kind: CharacterKind) -> Option<&'static [u8]> {
    match kind {
        CharacterKind::Digits => Some(DIGITS),
        CharacterKind::Alphabet => Some(ALPHABET),
        CharacterKind::Alphanumeric => Some(ALPHANUMERIC),
        CharacterKind::Printable => None,
    }
}

/// A random string satisfying `constraint`.
///
/// Length is uniform over `min_length..=max_length`; an inverted range is
/// read as `max..=min`.
pub fn random_text<R: Rng + ?Sized>(rng: &mut R, constraint: &TextConstraint) -> String {
    let lo = constraint.min_length.min(constraint.max_length);
    let hi = constraint.min_length.max(constraint.max_length);
    let len = rng.random_range(lo..=hi);
    let chars = alphabet(constraint.kind);
    (0..len)
        .map(|_| match chars {
            Some(set) => char::from(set[rng.random_range(0..set.len())]),
            // ' '..='~'
            None => char::from(rng.random_range(0x20u8..=0x7e)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn constraint(kind: CharacterKind, min: usize, max: usize) -> TextConstraint {
        TextConstraint {
            kind,
            min_length: min,
            max_length: max,
        }
    }

    #[test]
    fn digits_only() {
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..50 {
            let s = random_text(&mut rng, &constraint(CharacterKind::Digits, 1, 8));
            assert!((1..=8).contains(&s.len()));
            assert!(s.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn printable_stays_in_ascii_range() {
        let mut rng = SmallRng::seed_from_u64(9);
        let s = random_text(&mut rng, &constraint(CharacterKind::Printable, 64, 64));
        assert_eq!(s.len(), 64);
        assert!(s.chars().all(|c| (' '..='~').contains(&c)));
    }

    #[test]
    fn inverted_range_is_tolerated() {
        let mut rng = SmallRng::seed_from_u64(1);
        let s = random_text(&mut rng, &constraint(CharacterKind::Alphabet, 6, 2));
        assert!((2..=6).contains(&s.len()));
        assert!(s.chars().all(|c| c.is_ascii_alphabetic()));
    }

    #[test]
    fn zero_length_allowed() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(random_text(&mut rng, &constraint(CharacterKind::Alphanumeric, 0, 0)).is_empty());
    }
}
