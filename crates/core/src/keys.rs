//! Key events understood by the converter and change pages.

/// A single key press, already stripped of modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// `0`-`9`.
    Digit(char),
    /// `.` or `,`.
    Separator,
    /// Remove the last character.
    Backspace,
    /// Clear the entry.
    Escape,
    /// Switch conversion direction (space bar).
    Toggle,
}

impl Key {
    /// Maps a typed character to a key, if it is one the pages react to.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='9' => Some(Self::Digit(c)),
            '.' | ',' => Some(Self::Separator),
            '\u{8}' | '\u{7f}' => Some(Self::Backspace),
            '\u{1b}' => Some(Self::Escape),
            ' ' => Some(Self::Toggle),
            _ => None,
        }
    }

    /// Parses a key script such as `"12.5<bs><esc> "`.
    ///
    /// Besides literal characters, `<bs>`, `<esc>` and `<sp>` name the
    /// editing keys. Unknown characters are skipped.
    #[must_use]
    pub fn parse_script(script: &str) -> Vec<Self> {
        let mut keys = Vec::with_capacity(script.len());
        let mut rest = script;
        while let Some(c) = rest.chars().next() {
            if c == '<' {
                if let Some(end) = rest.find('>') {
                    let named = match &rest[1..end] {
                        "bs" | "backspace" => Some(Self::Backspace),
                        "esc" | "escape" => Some(Self::Escape),
                        "sp" | "space" | "toggle" => Some(Self::Toggle),
                        _ => None,
                    };
                    if let Some(key) = named {
                        keys.push(key);
                        rest = &rest[end + 1..];
                        continue;
                    }
                }
            }
            keys.extend(Self::from_char(c));
            rest = &rest[c.len_utf8()..];
        }
        keys
    }
}
