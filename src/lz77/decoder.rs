//! Token sequence to bytes, resolving (possibly self-overlapping)
//! back-references against already-produced output (spec.md §4.C).

use crate::token::Token;
use crate::Error;

/// Reconstructs the original byte sequence from a token sequence. A
/// back-reference with `distance == 0` or `distance > out.len()` is
/// `Error::CorruptStream` (spec.md §4.C failure case).
pub fn decode(tokens: &[Token]) -> Result<Vec<u8>, Error> {
    let mut out = Vec::new();
    for token in tokens {
        match token {
            Token::Literal(v) => out.push(*v),
            Token::BackReference { distance, length } => {
                let distance = *distance as usize;
                if distance == 0 || distance > out.len() {
                    return Err(Error::CorruptStream(format!(
                        "back-reference distance {distance} invalid at output length {}",
                        out.len()
                    )));
                }
                let start = out.len() - distance;
                // Bytes are read one at a time so a back-reference can copy
                // from bytes it has itself just appended (self-overlap,
                // used for run-length effects when distance < length).
                for i in 0..*length as usize {
                    out.push(out[start + i]);
                }
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literals_round_trip() {
        let tokens = vec![
            Token::literal(b'a'),
            Token::literal(b'b'),
            Token::literal(b'c'),
        ];
        assert_eq!(decode(&tokens).unwrap(), b"abc");
    }

    #[test]
    fn back_reference_copies_earlier_bytes() {
        let tokens = vec![
            Token::literal(b'a'),
            Token::literal(b'b'),
            Token::back_ref(2, 2),
        ];
        assert_eq!(decode(&tokens).unwrap(), b"abab");
    }

    #[test]
    fn self_overlapping_back_reference_extends_a_run() {
        // distance < length: classic LZ77 run-length expansion.
        let tokens = vec![Token::literal(b'X'), Token::back_ref(1, 6)];
        assert_eq!(decode(&tokens).unwrap(), b"XXXXXXX");
    }

    #[test]
    fn zero_distance_is_corrupt() {
        let tokens = vec![Token::back_ref(0, 1)];
        assert!(matches!(decode(&tokens), Err(Error::CorruptStream(_))));
    }

    #[test]
    fn distance_past_output_is_corrupt() {
        let tokens = vec![Token::literal(b'a'), Token::back_ref(5, 1)];
        assert!(matches!(decode(&tokens), Err(Error::CorruptStream(_))));
    }

    #[test]
    fn empty_token_sequence_is_empty_output() {
        assert_eq!(decode(&[]).unwrap(), Vec::<u8>::new());
    }
}
