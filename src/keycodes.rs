// Key name table for synthetic keystrokes
//
// Names are matched case-insensitively. Letters, digits and punctuation are
// sent as the character itself, so the host keyboard layout decides which
// physical key produces them.

use anyhow::{Result, bail};
use enigo::Key;

/// Key pressed by `name_track` to commit a typed name
pub const DEFAULT_CONFIRM_KEY: &str = "return";

/// Check if a key name is a modifier
pub fn is_modifier(name: &str) -> bool {
    matches!(
        name.trim().to_lowercase().as_str(),
        "cmd" | "command" | "meta" | "super" | "win" | "shift" | "option" | "alt" | "control"
            | "ctrl"
    )
}

/// Maps a key name string to the key the input device understands.
///
/// Returns None if the key name is not recognized.
pub fn key_name_to_key(name: &str) -> Option<Key> {
    let name_lower = name.trim().to_lowercase();

    let key = match name_lower.as_str() {
        // Modifiers
        "cmd" | "command" | "meta" | "super" | "win" => Key::Meta,
        "shift" => Key::Shift,
        "option" | "alt" => Key::Alt,
        "control" | "ctrl" => Key::Control,

        // Function keys
        "f1" => Key::F1,
        "f2" => Key::F2,
        "f3" => Key::F3,
        "f4" => Key::F4,
        "f5" => Key::F5,
        "f6" => Key::F6,
        "f7" => Key::F7,
        "f8" => Key::F8,
        "f9" => Key::F9,
        "f10" => Key::F10,
        "f11" => Key::F11,
        "f12" => Key::F12,

        // Arrow keys
        "left" => Key::LeftArrow,
        "right" => Key::RightArrow,
        "up" => Key::UpArrow,
        "down" => Key::DownArrow,

        // Special keys
        "space" => Key::Space,
        "return" | "enter" => Key::Return,
        "tab" => Key::Tab,
        "delete" | "backspace" => Key::Backspace, // the Mac "delete" key
        "forward_delete" | "del" => Key::Delete,
        "escape" | "esc" => Key::Escape,
        "home" => Key::Home,
        "end" => Key::End,
        "pageup" | "page_up" => Key::PageUp,
        "pagedown" | "page_down" => Key::PageDown,
        "capslock" | "caps_lock" => Key::CapsLock,

        // Punctuation
        "minus" => Key::Unicode('-'),
        "equal" | "equals" => Key::Unicode('='),
        "plus" => Key::Unicode('+'),
        "leftbracket" => Key::Unicode('['),
        "rightbracket" => Key::Unicode(']'),
        "backslash" => Key::Unicode('\\'),
        "semicolon" => Key::Unicode(';'),
        "quote" => Key::Unicode('\''),
        "comma" => Key::Unicode(','),
        "period" => Key::Unicode('.'),
        "slash" => Key::Unicode('/'),
        "grave" => Key::Unicode('`'),

        // Letters, digits and any other single character
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Key::Unicode(c),
                _ => return None,
            }
        }
    };

    Some(key)
}

/// Parse a single key name, failing on unknown names
pub fn parse_key(name: &str) -> Result<Key> {
    key_name_to_key(name).ok_or_else(|| anyhow::anyhow!("Unknown key name: {}", name))
}

/// Parse a list of key names into keys, preserving order
///
/// A single entry containing `+` is treated as a chord string, so both
/// `["ctrl", "s"]` and `["ctrl+s"]` produce the same keys.
pub fn parse_keys<S: AsRef<str>>(names: &[S]) -> Result<Vec<Key>> {
    if names.is_empty() {
        bail!("No keys specified");
    }

    let mut keys = Vec::new();
    for name in names {
        for part in split_chord(name.as_ref()) {
            keys.push(parse_key(part)?);
        }
    }
    if keys.is_empty() {
        bail!("No keys specified");
    }
    Ok(keys)
}

/// Split `"ctrl+shift+s"` into its key names
///
/// A bare `"+"` is the plus key itself, and a trailing `"+"` in a chord
/// (`"ctrl++"`) is the plus key as the last member.
fn split_chord(chord: &str) -> Vec<&str> {
    let chord = chord.trim();
    if chord == "+" {
        return vec!["+"];
    }

    let mut parts: Vec<&str> = chord.split('+').collect();
    if chord.ends_with("++") {
        // "ctrl++" splits into ["ctrl", "", ""]
        parts.truncate(parts.len() - 2);
        parts.push("+");
    }
    parts.into_iter().filter(|p| !p.trim().is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_names() {
        assert!(is_modifier("cmd"));
        assert!(is_modifier("Ctrl"));
        assert!(is_modifier(" alt "));
        assert!(!is_modifier("s"));
        assert!(!is_modifier("return"));
    }

    #[test]
    fn test_named_keys() {
        assert_eq!(key_name_to_key("Return"), Some(Key::Return));
        assert_eq!(key_name_to_key("enter"), Some(Key::Return));
        assert_eq!(key_name_to_key("ctrl"), Some(Key::Control));
        assert_eq!(key_name_to_key("command"), Some(Key::Meta));
        assert_eq!(key_name_to_key("f5"), Some(Key::F5));
        assert_eq!(key_name_to_key("delete"), Some(Key::Backspace));
    }

    #[test]
    fn test_single_characters() {
        assert_eq!(key_name_to_key("s"), Some(Key::Unicode('s')));
        assert_eq!(key_name_to_key("S"), Some(Key::Unicode('s')));
        assert_eq!(key_name_to_key("7"), Some(Key::Unicode('7')));
        assert_eq!(key_name_to_key("comma"), Some(Key::Unicode(',')));
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(key_name_to_key("hyper"), None);
        assert!(parse_key("").is_err());
        assert!(parse_key("not_a_key").is_err());
    }

    #[test]
    fn test_parse_keys_chord_string() {
        let separate = parse_keys(&["ctrl", "shift", "s"]).unwrap();
        let chord = parse_keys(&["ctrl+shift+s"]).unwrap();
        assert_eq!(separate, chord);
        assert_eq!(
            chord,
            vec![Key::Control, Key::Shift, Key::Unicode('s')]
        );
    }

    #[test]
    fn test_parse_keys_plus_key() {
        assert_eq!(parse_keys(&["+"]).unwrap(), vec![Key::Unicode('+')]);
        assert_eq!(
            parse_keys(&["ctrl++"]).unwrap(),
            vec![Key::Control, Key::Unicode('+')]
        );
    }

    #[test]
    fn test_parse_keys_empty() {
        let empty: [&str; 0] = [];
        assert!(parse_keys(&empty).is_err());
    }

    #[test]
    fn test_parse_keys_blank_entries() {
        assert!(parse_keys(&[" "]).is_err());
        assert!(parse_keys(&["", "  "]).is_err());
        assert!(parse_keys(&["+ +"]).is_err());
        assert_eq!(parse_keys(&[" + "]).unwrap(), vec![Key::Unicode('+')]);
    }
}
