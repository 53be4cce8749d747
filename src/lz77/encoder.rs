//! Sliding-window longest-match search and token emission (spec.md §4.B).

use crate::config::CompressConfig;
use crate::token::Token;

/// Scans `input` left to right, emitting a literal or back-reference token
/// at each step. `config` bounds the match length and search window.
pub fn encode(input: &[u8], config: &CompressConfig) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut split = 0usize;
    let min_match = config.effective_min();
    let max_match = config.effective_max();
    let window = config.max_search_buf_len as usize;

    while split < input.len() {
        let search_start = split.saturating_sub(window);
        let search_buffer = &input[search_start..split];
        let lookahead_end = input.len().min(split + max_match);
        let lookahead = &input[split..lookahead_end];

        let found = find_longest_match(search_buffer, lookahead, min_match);
        // spec.md §4.B: the guard compares `split` against the raw
        // `min_match_len` parameter, not the effective (0-becomes-1) value
        // -- this is the position threshold open question #1, reproduced
        // as written rather than "fixed" to `split >= 1`.
        let past_guard = split > config.min_match_len as usize;

        match found {
            Some((i, len)) if past_guard && len >= min_match && len > 0 => {
                let distance = (split - (search_start + i)) as u16;
                log::trace!("match at {split}: distance={distance} length={len}");
                tokens.push(Token::back_ref(distance, len as u8));
                split += len;
            }
            _ => {
                log::trace!("literal at {split}: {:#04x}", input[split]);
                tokens.push(Token::literal(input[split]));
                split += 1;
            }
        }
    }
    tokens
}

/// Finds the longest match for `lookahead` inside `search_buffer`, subject
/// to `min_match_len` gating the first bytes that must agree (spec.md
/// §4.B step 2). Ties are broken by the earliest (smallest) occurrence.
/// Exposed `pub(crate)` for direct match-finder unit tests (spec.md §8).
pub(crate) fn find_longest_match(
    search_buffer: &[u8],
    lookahead: &[u8],
    min_match_len: usize,
) -> Option<(usize, usize)> {
    if lookahead.is_empty() || search_buffer.is_empty() {
        return None;
    }
    if lookahead.len() < min_match_len {
        return None;
    }
    let probe_len = min_match_len.min(lookahead.len());
    let mut best: Option<(usize, usize)> = None;
    for i in 0..search_buffer.len() {
        let avail = search_buffer.len() - i;
        if avail < probe_len {
            continue;
        }
        if search_buffer[i..i + probe_len] != lookahead[..probe_len] {
            continue;
        }
        let max_len = avail.min(lookahead.len()).min(255);
        let mut len = probe_len;
        while len < max_len && search_buffer[i + len] == lookahead[len] {
            len += 1;
        }
        match best {
            Some((_, best_len)) if len <= best_len => {}
            _ => best = Some((i, len)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_has_no_match() {
        assert_eq!(find_longest_match(b"", b"abc", 1), None);
    }

    #[test]
    fn empty_pattern_has_no_match() {
        assert_eq!(find_longest_match(b"abc", b"", 1), None);
    }

    #[test]
    fn no_match_found() {
        assert_eq!(find_longest_match(b"xyz", b"abc", 1), None);
    }

    #[test]
    fn full_match() {
        assert_eq!(find_longest_match(b"abc", b"abc", 1), Some((0, 3)));
    }

    #[test]
    fn prefix_match() {
        // "abcxyz" contains "abc" at position 0, lookahead is "abcd".
        assert_eq!(find_longest_match(b"abcxyz", b"abcd", 1), Some((0, 3)));
    }

    #[test]
    fn suffix_match() {
        assert_eq!(find_longest_match(b"xyzabc", b"abc", 1), Some((3, 3)));
    }

    #[test]
    fn ties_prefer_earliest_occurrence() {
        // "ab" occurs at 0 and 3, both length 2; earliest wins.
        assert_eq!(find_longest_match(b"ababXX", b"ab", 1), Some((0, 2)));
    }

    #[test]
    fn match_shorter_than_min_match_len_is_rejected() {
        // "ab" only matches 2 bytes but min_match_len demands 3.
        assert_eq!(find_longest_match(b"ab", b"abXX", 3), None);
    }

    #[test]
    fn min_match_len_gates_mid_buffer_candidates() {
        // Only the occurrence at position 3 has 2 bytes in common with the
        // lookahead; the one at position 0 only has 1 (gated out).
        let search = b"aXaY";
        let lookahead = b"aY";
        assert_eq!(find_longest_match(search, lookahead, 2), Some((2, 2)));
    }

    #[test]
    fn encode_emits_literals_for_unrepeated_input() {
        let tokens = encode(b"abcd", &CompressConfig::new(0, 255, 255).unwrap());
        assert_eq!(
            tokens,
            vec![
                Token::literal(b'a'),
                Token::literal(b'b'),
                Token::literal(b'c'),
                Token::literal(b'd'),
            ]
        );
    }

    #[test]
    fn encode_emits_back_reference_for_repeat() {
        // Scenario 2 (spec.md §8): "abcd abcd" -> "abcd " + <5,4>.
        let tokens = encode(b"abcd abcd", &CompressConfig::new(0, 255, 255).unwrap());
        assert_eq!(
            tokens,
            vec![
                Token::literal(b'a'),
                Token::literal(b'b'),
                Token::literal(b'c'),
                Token::literal(b'd'),
                Token::literal(b' '),
                Token::back_ref(5, 4),
            ]
        );
    }

    #[test]
    fn encode_respects_window_bound() {
        // Scenario 5 (spec.md §8): match exists but lies outside the window.
        let tokens = encode(b"XXXabcdefXXX", &CompressConfig::new(3, 255, 4).unwrap());
        assert!(tokens.iter().all(|t| t.is_literal()));
    }

    #[test]
    fn encode_empty_input_is_empty() {
        assert_eq!(encode(b"", &CompressConfig::default()), vec![]);
    }
}
