use crate::runtime::Key;
use std::collections::HashSet;

/// ANSI rows drawn as the on-screen keyboard
pub const ROWS: [&[&str]; 5] = [
    &[
        "`", "1", "2", "3", "4", "5", "6", "7", "8", "9", "0", "-", "=", "Back",
    ],
    &[
        "Tab", "q", "w", "e", "r", "t", "y", "u", "i", "o", "p", "[", "]", "\\",
    ],
    &[
        "Caps", "a", "s", "d", "f", "g", "h", "j", "k", "l", ";", "'", "Enter",
    ],
    &[
        "Shift", "z", "x", "c", "v", "b", "n", "m", ",", ".", "/", "Shift",
    ],
    &["Space"],
];

fn shifted_to_base(c: char) -> Option<char> {
    let base = match c {
        '~' => '`',
        '!' => '1',
        '@' => '2',
        '#' => '3',
        '$' => '4',
        '%' => '5',
        '^' => '6',
        '&' => '7',
        '*' => '8',
        '(' => '9',
        ')' => '0',
        '_' => '-',
        '+' => '=',
        '{' => '[',
        '}' => ']',
        '|' => '\\',
        ':' => ';',
        '"' => '\'',
        '<' => ',',
        '>' => '.',
        '?' => '/',
        _ => return None,
    };
    Some(base)
}

/// Key-cap labels to highlight for one logical key. Shifted characters
/// light up Shift plus the base cap. The result is owned by the rendering
/// layer and replaced wholesale on every event.
pub fn pressed_tokens(key: &Key) -> HashSet<String> {
    let mut tokens = HashSet::new();
    match key {
        Key::Backspace => {
            tokens.insert("Back".to_string());
        }
        Key::Enter => {
            tokens.insert("Enter".to_string());
        }
        Key::Tab => {
            tokens.insert("Tab".to_string());
        }
        Key::Char(' ') => {
            tokens.insert("Space".to_string());
        }
        Key::Char(c) if c.is_alphabetic() => {
            if c.is_uppercase() {
                tokens.insert("Shift".to_string());
            }
            tokens.insert(c.to_lowercase().to_string());
        }
        Key::Char(c) => {
            if let Some(base) = shifted_to_base(*c) {
                tokens.insert("Shift".to_string());
                tokens.insert(base.to_string());
            } else {
                tokens.insert(c.to_string());
            }
        }
        Key::Escape | Key::Other => {}
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_plain_letter() {
        assert_eq!(pressed_tokens(&Key::Char('a')), set(&["a"]));
    }

    #[test]
    fn test_uppercase_adds_shift() {
        assert_eq!(pressed_tokens(&Key::Char('A')), set(&["Shift", "a"]));
    }

    #[test]
    fn test_shifted_symbol_maps_to_base() {
        assert_eq!(pressed_tokens(&Key::Char('!')), set(&["Shift", "1"]));
        assert_eq!(pressed_tokens(&Key::Char('"')), set(&["Shift", "'"]));
        assert_eq!(pressed_tokens(&Key::Char('?')), set(&["Shift", "/"]));
    }

    #[test]
    fn test_unshifted_symbol_passes_through() {
        assert_eq!(pressed_tokens(&Key::Char(';')), set(&[";"]));
        assert_eq!(pressed_tokens(&Key::Char(',')), set(&[","]));
    }

    #[test]
    fn test_special_keys() {
        assert_eq!(pressed_tokens(&Key::Char(' ')), set(&["Space"]));
        assert_eq!(pressed_tokens(&Key::Enter), set(&["Enter"]));
        assert_eq!(pressed_tokens(&Key::Backspace), set(&["Back"]));
        assert_eq!(pressed_tokens(&Key::Tab), set(&["Tab"]));
    }

    #[test]
    fn test_escape_highlights_nothing() {
        assert!(pressed_tokens(&Key::Escape).is_empty());
        assert!(pressed_tokens(&Key::Other).is_empty());
    }

    #[test]
    fn test_every_token_has_a_cap() {
        // Each highlightable letter maps onto a cap that exists in ROWS
        let caps: HashSet<&str> = ROWS.iter().flat_map(|row| row.iter().copied()).collect();
        for c in "abcdefghijklmnopqrstuvwxyz0123456789".chars() {
            for token in pressed_tokens(&Key::Char(c)) {
                assert!(caps.contains(token.as_str()), "no cap for {token:?}");
            }
        }
    }
}
