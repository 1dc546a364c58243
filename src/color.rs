use std::collections::HashMap;

use serde::{Serialize, Serializer};

/// A 24-bit RGB colour, rendered as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Derive a stable display colour from a participant id.
///
/// Hashes the UTF-16 code units with `hash * 31 + code` in wrapping 32-bit
/// signed arithmetic, then takes the three low bytes as red, green and blue.
pub fn color_from_id(id: &str) -> Color {
    let hash = id
        .encode_utf16()
        .fold(0i32, |hash, code| {
            (code as i32).wrapping_add((hash << 5).wrapping_sub(hash))
        });

    let channel = |i: u32| ((hash >> (i * 8)) & 0xff) as u8;
    Color {
        r: channel(0),
        g: channel(1),
        b: channel(2),
    }
}

/// Colours assigned to the participants seen by one game view.
///
/// An id keeps the colour it was first given for the lifetime of the map.
#[derive(Debug, Default)]
pub struct ColorMap {
    colors: HashMap<String, Color>,
}

impl ColorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color_for(&mut self, id: &str) -> Color {
        if let Some(color) = self.colors.get(id) {
            return *color;
        }
        let color = color_from_id(id);
        self.colors.insert(id.to_string(), color);
        color
    }

    pub fn get(&self, id: &str) -> Option<Color> {
        self.colors.get(id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(id: &str) -> String {
        color_from_id(id).to_string()
    }

    #[test]
    fn empty_id_is_black() {
        assert_eq!(hex(""), "#000000");
    }

    #[test]
    fn known_colors() {
        assert_eq!(hex("a"), "#610000");
        assert_eq!(hex("alice"), "#809689");
        assert_eq!(hex("bob"), "#b57d01");
        assert_eq!(hex("g123"), "#6b902f");
    }

    #[test]
    fn overflow_wraps() {
        assert_eq!(hex("a very long identifier that overflows 32 bits"), "#1d31fd");
    }

    #[test]
    fn non_ascii_uses_utf16_units() {
        assert_eq!(hex("Zoë"), "#366001");
        assert_eq!(hex("😀"), "#630d1b");
    }

    #[test]
    fn case_sensitive() {
        assert_eq!(hex("GUEST"), "#b83510");
        assert_eq!(hex("guest"), "#d82de2");
        assert_ne!(hex("GUEST"), hex("guest"));
    }

    #[test]
    fn always_seven_lowercase_hex_chars() {
        for id in ["", "x", "alice", "GUEST", "0f3c-11", "😀😀😀", "a very long identifier that overflows 32 bits"] {
            let s = hex(id);
            assert_eq!(s.len(), 7, "{id}");
            assert!(s.starts_with('#'));
            assert!(s[1..].chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
            assert_eq!(s, hex(id));
        }
    }

    #[test]
    fn serializes_as_hex_string() {
        let json = serde_json::to_string(&color_from_id("alice")).unwrap();
        assert_eq!(json, "\"#809689\"");
    }

    #[test]
    fn color_map_keeps_first_assignment() {
        let mut map = ColorMap::new();
        assert_eq!(map.get("alice"), None);

        let first = map.color_for("alice");
        assert_eq!(first, color_from_id("alice"));
        assert_eq!(map.get("alice"), Some(first));
        assert_eq!(map.color_for("alice"), first);
        assert_eq!(map.get("carol"), None);
    }
}
