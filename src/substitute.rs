//! Pattern-aligned substitution.
//!
//! Given a subject, its mask, and a candidate token, find where the token's own mask occurs in the
//! subject's mask and splice the token in at those positions.  Every position the token does not
//! cover keeps the subject's literal character, so the result is shaped like the subject but
//! carries the token.

use crate::{parse_mask, MaskItem, ReplacementTable};

/// One position of a result under construction.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Cell {
    Literal(char),
    Wildcard,
}

/// Substitute `token` into `subject` wherever the token's mask occurs in `subject_mask`.
///
/// `subject_mask` must have been produced from `subject` with `table`.  Up to `max_replacements`
/// non-overlapping occurrences are replaced, leftmost first.  Returns `None` when the token's mask
/// does not occur, when the token is empty, when the result would not contain the token, or when
/// the result would be the token alone.
///
/// ```
/// use maskcat::{substitute, ReplacementTable};
///
/// let table = ReplacementTable::all();
/// let result = substitute("Hello Jello", "?u?l?l?l?l?s?u?l?l?l?l", "Hello", &table, 2);
/// assert_eq!(Some("Hello Hello".to_string()), result);
/// let result = substitute("Winter!24", "?u?l?l?l?l?l?s?d?d", "Summer", &table, 1);
/// assert_eq!(Some("Summer!24".to_string()), result);
/// ```
pub fn substitute(
    subject: &str,
    subject_mask: &str,
    token: &str,
    table: &ReplacementTable,
    max_replacements: usize,
) -> Option<String> {
    let pattern = table.mask_items(token);
    if pattern.is_empty() {
        return None;
    }
    let items = parse_mask(subject_mask);
    let mut cells = Vec::with_capacity(items.len());
    let mut replaced = 0;
    let mut index = 0;
    while index < items.len() {
        if replaced < max_replacements && items[index..].starts_with(&pattern) {
            cells.extend(token.chars().map(Cell::Literal));
            replaced += 1;
            index += pattern.len();
            continue;
        }
        cells.push(match items[index] {
            MaskItem::Class(_) => Cell::Wildcard,
            MaskItem::Literal(c) => Cell::Literal(c),
        });
        index += 1;
    }
    if replaced == 0 {
        return None;
    }
    let result = restore(subject, &cells)?;
    if result.contains(token) && result != token {
        Some(result)
    } else {
        None
    }
}

/// Fill each wildcard with the subject's character at the same position.  A wildcard past the end
/// of the subject has nothing to restore it from, so the whole result is rejected.
fn restore(subject: &str, cells: &[Cell]) -> Option<String> {
    let mut subject = subject.chars();
    let mut result = String::with_capacity(cells.len());
    for cell in cells {
        let original = subject.next();
        match (cell, original) {
            (Cell::Literal(c), _) => result.push(*c),
            (Cell::Wildcard, Some(c)) => result.push(c),
            (Cell::Wildcard, None) => return None,
        }
    }
    Some(result)
}

/////////////////////////////////////////////// tests //////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use guacamole::combinators::*;
    use guacamole::Guacamole;

    use super::*;

    fn sub(subject: &str, token: &str, max_replacements: usize) -> Option<String> {
        let table = ReplacementTable::all();
        substitute(
            subject,
            &table.canonicalize(subject),
            token,
            &table,
            max_replacements,
        )
    }

    #[test]
    fn hello_jello() {
        let table = ReplacementTable::from_spec("ulds");
        assert_eq!(
            Some("Hello Hello".to_string()),
            substitute(
                "Hello Jello",
                "?u?l?l?l?l?s?u?l?l?l?l",
                "Hello",
                &table,
                2
            )
        );
        // One replacement puts the token back where it came from.
        assert_eq!(Some("Hello Jello".to_string()), sub("Hello Jello", "Hello", 1));
    }

    #[test]
    fn leftmost_occurrence_first() {
        assert_eq!(Some("Mango Jello".to_string()), sub("Hello Jello", "Mango", 1));
        assert_eq!(Some("Mango Mango".to_string()), sub("Hello Jello", "Mango", 2));
        assert_eq!(Some("Mango Mango".to_string()), sub("Hello Jello", "Mango", 9));
    }

    #[test]
    fn no_match_yields_nothing() {
        assert_eq!(None, sub("password", "1234", 1));
        assert_eq!(None, sub("abc", "abcd", 1));
        assert_eq!(None, sub("", "a", 1));
    }

    #[test]
    fn empty_token_yields_nothing() {
        assert_eq!(None, sub("password", "", 1));
    }

    #[test]
    fn zero_replacements_yields_nothing() {
        assert_eq!(None, sub("password1", "dog", 0));
    }

    #[test]
    fn token_equal_to_subject_is_rejected() {
        assert_eq!(None, sub("Hello", "Hello", 1));
        assert_eq!(None, sub("Hello", "Jello", 1));
        assert_eq!(None, sub("a1!", "b2?", 1));
    }

    #[test]
    fn literal_context_survives() {
        assert_eq!(Some("dog123".to_string()), sub("cat123", "dog", 1));
        assert_eq!(Some("Pass9999".to_string()), sub("Pass2024", "9999", 1));
        assert_eq!(Some("Summer!24".to_string()), sub("Winter!24", "Summer", 1));
    }

    #[test]
    fn non_overlapping_occurrences() {
        // "?d?d" occurs at 0 and 2 in "?d?d?d", never at 1.
        assert_eq!(Some("77123".to_string()), sub("12123", "77", 1));
        assert_eq!(Some("77773".to_string()), sub("12123", "77", 2));
    }

    #[test]
    fn literal_sentinels_are_not_wildcards() {
        assert_eq!(Some("a?byy".to_string()), sub("c!tyy", "a?b", 1));
        assert_eq!(Some("x?ux".to_string()), sub("x!ax", "?u", 1));
    }

    #[test]
    fn passthrough_characters_align() {
        assert_eq!(Some("éxyz1".to_string()), sub("éabc1", "xyz", 1));
        assert_eq!(Some("ñabc9".to_string()), sub("ñabc1", "9", 1));
        assert_eq!(Some("ab中1".to_string()), sub("xy中1", "ab", 1));
    }

    #[test]
    fn partial_tables() {
        let table = ReplacementTable::from_spec("d");
        let mask = table.canonicalize("abc123");
        assert_eq!("abc?d?d?d", mask);
        assert_eq!(
            Some("abc999".to_string()),
            substitute("abc123", &mask, "999", &table, 1)
        );
        // With only digits masked, letters must match literally.
        assert_eq!(None, substitute("abc123", &mask, "xyz", &table, 1));
        assert_eq!(
            Some("abc456".to_string()),
            substitute("abc123", &mask, "bc456", &table, 1)
        );
    }

    #[test]
    fn subject_shorter_than_mask_fails_closed() {
        let table = ReplacementTable::all();
        // The mask claims five positions but the subject only has three.
        assert_eq!(
            None,
            substitute("Jel", "?u?l?l?l?l", "Ab", &table, 1)
        );
        // Trailing literal positions need nothing from the subject.
        assert_eq!(
            Some("Abl!!".to_string()),
            substitute("Jel", "?u?l?l!!", "Ab", &table, 1)
        );
    }

    #[test]
    fn subject_longer_than_mask_is_truncated_to_mask() {
        let table = ReplacementTable::all();
        assert_eq!(
            Some("Abl".to_string()),
            substitute("Jello", "?u?l?l", "Ab", &table, 1)
        );
    }

    #[test]
    fn results_are_shaped_like_the_subject() {
        const ALPHABET: &[char] = &['a', 'b', 'A', 'B', '1', '2', '!', ' ', 'é'];
        fn text(guac: &mut Guacamole, max: usize) -> String {
            let len: usize = range_to(max)(guac);
            (0..len)
                .map(|_| ALPHABET[range_to(ALPHABET.len())(guac)])
                .collect()
        }
        let table = ReplacementTable::all();
        let mut guac = Guacamole::new(0x737562);
        let mut produced = 0;
        for _ in 0..2048 {
            let subject = text(&mut guac, 10);
            let token = text(&mut guac, 4);
            let mask = table.canonicalize(&subject);
            if let Some(result) = substitute(&subject, &mask, &token, &table, 2) {
                produced += 1;
                assert_eq!(mask, table.canonicalize(&result));
                assert_eq!(subject.chars().count(), result.chars().count());
                assert!(result.contains(&token));
                assert_ne!(result, token);
            }
            assert_eq!(None, substitute(&subject, &mask, &subject, &table, 1));
        }
        assert!(produced > 0);
    }
}
