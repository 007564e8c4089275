/*
 * Tapdeck - round-button touch deck for small Linux displays
 * Copyright (C) 2026 Josh Kropf <josh@slashdev.ca>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

use serde::{Deserializer, de::{self, SeqAccess, Visitor}};

use crate::colour::Argb;
use crate::widgets::HighlightMode;

pub fn colour<'de, D>(deserializer: D) -> Result<Argb, D::Error>
    where D: Deserializer<'de>
{
    struct ColourVisitor;

    impl<'de> Visitor<'de> for ColourVisitor {
        type Value = Argb;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("a hex colour string or [r, g, b]")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where E: de::Error
        {
            let v = v.strip_prefix('#').unwrap_or(v);

            let val = u32::from_str_radix(v, 16)
                .map_err(E::custom)?;

            // six digits is an opaque colour, eight carries alpha
            if v.len() > 6 {
                Ok(Argb::from_u32(val))
            } else {
                Ok(Argb::rgb(
                    ((val >> 16) & 0xff) as u8,
                    ((val >> 8) & 0xff) as u8,
                    (val & 0xff) as u8
                ))
            }
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where A: SeqAccess<'de>
        {
            let r: u8 = seq.next_element()?
                .ok_or_else(|| de::Error::invalid_length(0, &self))?;
            let g: u8 = seq.next_element()?
                .ok_or_else(|| de::Error::invalid_length(1, &self))?;
            let b: u8 = seq.next_element()?
                .ok_or_else(|| de::Error::invalid_length(2, &self))?;

            Ok(Argb::rgb(r, g, b))
        }
    }

    deserializer.deserialize_any(ColourVisitor)
}

/// Highlight mode from its name, or from the legacy 0/1/2 ordinal with
/// out-of-range values falling back to no highlight.
pub fn highlight_mode<'de, D>(deserializer: D) -> Result<HighlightMode, D::Error>
    where D: Deserializer<'de>
{
    struct ModeVisitor;

    impl<'de> Visitor<'de> for ModeVisitor {
        type Value = HighlightMode;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("a highlight mode name or ordinal")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where E: de::Error
        {
            v.parse().map_err(E::custom)
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where E: de::Error
        {
            Ok(HighlightMode::from_ordinal(v.try_into().unwrap_or(-1)))
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where E: de::Error
        {
            Ok(HighlightMode::from_ordinal(v.try_into().unwrap_or(-1)))
        }
    }

    deserializer.deserialize_any(ModeVisitor)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(deserialize_with = "colour")]
        colour: Argb,
        #[serde(deserialize_with = "highlight_mode")]
        highlight: HighlightMode
    }

    fn parse(src: &str) -> Sample {
        toml::from_str(src).unwrap()
    }

    #[test]
    fn colour_from_six_digit_hex() {
        let s = parse("colour = \"#00b5ff\"\nhighlight = \"none\"");
        assert_eq!(s.colour, Argb::from_u32(0xff00b5ff));
    }

    #[test]
    fn colour_from_eight_digit_hex() {
        let s = parse("colour = \"80102030\"\nhighlight = \"none\"");
        assert_eq!(s.colour, Argb::from_u32(0x80102030));
    }

    #[test]
    fn colour_from_channel_array() {
        let s = parse("colour = [16, 32, 48]\nhighlight = \"none\"");
        assert_eq!(s.colour, Argb::rgb(16, 32, 48));
    }

    #[test]
    fn highlight_mode_from_name() {
        let s = parse("colour = \"#000000\"\nhighlight = \"background\"");
        assert_eq!(s.highlight, HighlightMode::Background);
    }

    #[test]
    fn highlight_mode_from_ordinal() {
        let s = parse("colour = \"#000000\"\nhighlight = 1");
        assert_eq!(s.highlight, HighlightMode::Icon);
    }

    #[test]
    fn unknown_ordinal_falls_back_to_none() {
        let s = parse("colour = \"#000000\"\nhighlight = 7");
        assert_eq!(s.highlight, HighlightMode::None);

        let s = parse("colour = \"#000000\"\nhighlight = -3");
        assert_eq!(s.highlight, HighlightMode::None);
    }
}
