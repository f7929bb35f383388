//! CSS-style color strings used by styles and activities.
//!
//! Supports `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)`,
//! `rgba(r, g, b, a)` and a handful of named colors. Anything else is
//! rejected; callers pick their own fallback.
//!
//! Hex forms are parsed by egui. Translucent hex colors pass through its
//! premultiplied `Color32`, so their channels may shift by one.

use eframe::egui::Color32;
use log::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const TRANSPARENT: Rgba = Rgba { r: 0, g: 0, b: 0, a: 0 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn parse(input: &str) -> Option<Self> {
        let s = input.trim().to_ascii_lowercase();
        if s.starts_with('#') {
            return parse_hex(&s);
        }
        if let Some(body) = s.strip_prefix("rgba(").and_then(|b| b.strip_suffix(')')) {
            return parse_functional(body, true);
        }
        if let Some(body) = s.strip_prefix("rgb(").and_then(|b| b.strip_suffix(')')) {
            return parse_functional(body, false);
        }
        named(&s)
    }

    /// Parse or fall back, logging the bad value once per call site.
    pub fn parse_or(input: &str, fallback: Rgba) -> Self {
        Self::parse(input).unwrap_or_else(|| {
            warn!("Unrecognized color `{}`, using fallback", input);
            fallback
        })
    }

    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

/// `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`, leading `#` included.
fn parse_hex(hex: &str) -> Option<Rgba> {
    let [r, g, b, a] = Color32::from_hex(hex).ok()?.to_srgba_unmultiplied();
    Some(Rgba { r, g, b, a })
}

fn parse_functional(body: &str, with_alpha: bool) -> Option<Rgba> {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    let expected = if with_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return None;
    }
    let channel = |s: &str| s.parse::<f32>().ok().map(|v| v.clamp(0.0, 255.0).round() as u8);
    let alpha = if with_alpha {
        let a = parts[3].parse::<f32>().ok()?;
        (a.clamp(0.0, 1.0) * 255.0).round() as u8
    } else {
        255
    };
    Some(Rgba {
        r: channel(parts[0])?,
        g: channel(parts[1])?,
        b: channel(parts[2])?,
        a: alpha,
    })
}

fn named(name: &str) -> Option<Rgba> {
    let c = match name {
        "black" => Rgba::BLACK,
        "white" => Rgba::WHITE,
        "transparent" => Rgba::TRANSPARENT,
        "red" => Rgba::rgb(255, 0, 0),
        "green" => Rgba::rgb(0, 128, 0),
        "lime" => Rgba::rgb(0, 255, 0),
        "blue" => Rgba::rgb(0, 0, 255),
        "yellow" => Rgba::rgb(255, 255, 0),
        "orange" => Rgba::rgb(255, 165, 0),
        "purple" => Rgba::rgb(128, 0, 128),
        "gray" | "grey" => Rgba::rgb(128, 128, 128),
        "silver" => Rgba::rgb(192, 192, 192),
        "navy" => Rgba::rgb(0, 0, 128),
        "teal" => Rgba::rgb(0, 128, 128),
        "maroon" => Rgba::rgb(128, 0, 0),
        "pink" => Rgba::rgb(255, 192, 203),
        _ => return None,
    };
    Some(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_forms() {
        assert_eq!(Rgba::parse("#3B4352"), Some(Rgba::rgb(0x3B, 0x43, 0x52)));
        assert_eq!(Rgba::parse("#fff"), Some(Rgba::WHITE));
        assert_eq!(Rgba::parse(" #00000080 "), Some(Rgba { r: 0, g: 0, b: 0, a: 0x80 }));
        assert_eq!(Rgba::parse("#12345"), None);
        assert_eq!(Rgba::parse("#zzzzzz"), None);
        assert_eq!(Rgba::parse("#F0AF"), Some(Rgba::rgb(0xFF, 0x00, 0xAA)));
    }

    #[test]
    fn translucent_hex_stays_close() {
        let c = Rgba::parse("#3B435280").unwrap();
        assert_eq!(c.a, 0x80);
        for (got, want) in [(c.r, 0x3B), (c.g, 0x43), (c.b, 0x52)] {
            assert!((got as i16 - want as i16).abs() <= 1, "{} vs {}", got, want);
        }
    }

    #[test]
    fn parses_functional_and_named() {
        assert_eq!(Rgba::parse("rgb(10, 20, 30)"), Some(Rgba::rgb(10, 20, 30)));
        assert_eq!(
            Rgba::parse("rgba(10,20,30,0.5)"),
            Some(Rgba { r: 10, g: 20, b: 30, a: 128 })
        );
        assert_eq!(Rgba::parse("Red"), Some(Rgba::rgb(255, 0, 0)));
        assert_eq!(Rgba::parse("chartreuse-ish"), None);
        assert_eq!(Rgba::parse_or("nope", Rgba::BLACK), Rgba::BLACK);
    }

    #[test]
    fn hex_output_drops_opaque_alpha() {
        assert_eq!(Rgba::rgb(0xBA, 0xC8, 0xD3).to_hex(), "#BAC8D3");
        assert_eq!(Rgba { r: 1, g: 2, b: 3, a: 4 }.to_hex(), "#01020304");
    }
}
