#![forbid(unsafe_code)]

//! Hex string <-> RGB color conversion
//!
//! Colors are stored as normalized `f64` channels in calibrated RGB space.
//! Alpha is always opaque; palette entries never carry transparency.

use std::fmt;

/// An opaque RGB color with channels normalized to `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    red: f64,
    green: f64,
    blue: f64,
}

impl Color {
    /// Creates a color from normalized channels
    pub fn new(red: f64, green: f64, blue: f64) -> Self {
        Color { red, green, blue }
    }

    /// Creates a color from 8-bit channels
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Color {
            red: f64::from(red) / 255.0,
            green: f64::from(green) / 255.0,
            blue: f64::from(blue) / 255.0,
        }
    }

    /// Parses a 6-digit hex color such as `#BB8954` or `bb8954`
    ///
    /// Surrounding whitespace and a single leading `#` are ignored. Returns
    /// `None` unless exactly six hexadecimal digits remain.
    pub fn from_hex(text: &str) -> Option<Self> {
        let upper = text.trim().to_uppercase();
        let digits = upper.strip_prefix('#').unwrap_or(&upper);

        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        let value = u32::from_str_radix(digits, 16).ok()?;
        Some(Color::from_rgb8(
            ((value & 0xFF0000) >> 16) as u8,
            ((value & 0x00FF00) >> 8) as u8,
            (value & 0x0000FF) as u8,
        ))
    }

    /// Formats the color as `#RRGGBB`
    ///
    /// Colors that cannot be expressed with 8-bit RGB channels (non-finite or
    /// out-of-range components) fall back to white.
    pub fn to_hex(&self) -> String {
        match self.to_rgb8() {
            Some((r, g, b)) => format!("#{:02X}{:02X}{:02X}", r, g, b),
            None => "#FFFFFF".to_string(),
        }
    }

    /// Converts to 8-bit channels, or `None` if any channel is unrepresentable
    pub fn to_rgb8(&self) -> Option<(u8, u8, u8)> {
        let channel = |value: f64| -> Option<u8> {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return None;
            }
            Some((value * 255.0).round() as u8)
        };

        Some((
            channel(self.red)?,
            channel(self.green)?,
            channel(self.blue)?,
        ))
    }

    pub fn red(&self) -> f64 {
        self.red
    }

    pub fn green(&self) -> f64 {
        self.green
    }

    pub fn blue(&self) -> f64 {
        self.blue
    }

    pub fn alpha(&self) -> f64 {
        1.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_with_hash() {
        let color = Color::from_hex("#FF0000").unwrap();
        assert_eq!(color, Color::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_from_hex_lowercase_and_whitespace() {
        let color = Color::from_hex("  bb8954 \n").unwrap();
        assert_eq!(color.to_rgb8(), Some((0xBB, 0x89, 0x54)));
    }

    #[test]
    fn test_from_hex_rejects_wrong_length() {
        assert!(Color::from_hex("#FFF").is_none());
        assert!(Color::from_hex("#FF00000").is_none());
        assert!(Color::from_hex("").is_none());
        assert!(Color::from_hex("#").is_none());
    }

    #[test]
    fn test_from_hex_rejects_non_hex_digits() {
        assert!(Color::from_hex("BADCOL").is_none());
        assert!(Color::from_hex("#GGGGGG").is_none());
        assert!(Color::from_hex("+12345").is_none());
    }

    #[test]
    fn test_from_hex_only_strips_one_hash() {
        assert!(Color::from_hex("##123456").is_none());
    }

    #[test]
    fn test_round_trip_preserves_digits() {
        for hex in ["000000", "FFFFFF", "bb8954", "0a0B0c", "7F8081", "123456"] {
            let color = Color::from_hex(hex).unwrap();
            assert_eq!(color.to_hex(), format!("#{}", hex.to_uppercase()));
        }
    }

    #[test]
    fn test_round_trip_all_channel_values() {
        for value in 0..=255u8 {
            let color = Color::from_rgb8(value, 255 - value, value / 2);
            let hex = color.to_hex();
            assert_eq!(Color::from_hex(&hex).unwrap().to_hex(), hex);
            assert_eq!(color.to_rgb8(), Some((value, 255 - value, value / 2)));
        }
    }

    #[test]
    fn test_to_hex_unrepresentable_defaults_to_white() {
        assert_eq!(Color::new(1.5, 0.0, 0.0).to_hex(), "#FFFFFF");
        assert_eq!(Color::new(0.0, -0.1, 0.0).to_hex(), "#FFFFFF");
        assert_eq!(Color::new(0.0, 0.0, f64::NAN).to_hex(), "#FFFFFF");
    }

    #[test]
    fn test_to_hex_rounds_to_nearest() {
        assert_eq!(Color::new(0.5, 0.5, 0.5).to_hex(), "#808080");
    }

    #[test]
    fn test_display_uses_hex() {
        assert_eq!(Color::from_rgb8(0, 255, 0).to_string(), "#00FF00");
        assert_eq!(Color::from_rgb8(0, 255, 0).alpha(), 1.0);
    }
}
