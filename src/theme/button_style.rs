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

use serde::Deserialize;

use super::theme_de;
use crate::colour::Argb;
use crate::icon::IconName;
use crate::widgets::HighlightMode;

/// Per-button visual attributes as read from config.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ButtonStyle {
    pub label: String,

    pub icon: Option<IconName>,
    pub icon_size: u32,
    #[serde(deserialize_with = "theme_de::colour")]
    pub icon_colour: Argb,

    #[serde(deserialize_with = "theme_de::colour")]
    pub bg_colour: Argb,

    pub radius: f32,
    pub spacing: f32,
    pub text_size: f32,

    #[serde(deserialize_with = "theme_de::highlight_mode")]
    pub highlight: HighlightMode,
    #[serde(deserialize_with = "theme_de::colour")]
    pub highlight_colour: Argb,

    /// Overlay drawn in the bottom-right corner while checked.
    pub badge: Option<IconName>,
    pub badge_size: u32
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self {
            label: String::new(),
            icon: None,
            icon_size: 48,
            icon_colour: Argb::rgb(0xff, 0xff, 0xff),
            bg_colour: Argb::from_u32(0xffffffff),
            radius: 12.0,
            spacing: 10.0,
            text_size: 16.0,
            highlight: HighlightMode::None,
            highlight_colour: Argb::from_u32(0xff00b5ff),
            badge: Some(IconName::Check),
            badge_size: 16
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_attribute_fallbacks() {
        let style: ButtonStyle = toml::from_str("").unwrap();

        assert_eq!(style.bg_colour, Argb::from_u32(0xffffffff));
        assert_eq!(style.radius, 12.0);
        assert_eq!(style.spacing, 10.0);
        assert_eq!(style.highlight, HighlightMode::None);
        assert_eq!(style.highlight_colour, Argb::from_u32(0xff00b5ff));
        assert!(style.label.is_empty());
        assert!(style.icon.is_none());
    }

    #[test]
    fn explicit_fields_override_defaults() {
        let style: ButtonStyle = toml::from_str(concat!(
            "label = \"Lamp\"\n",
            "icon = \"bulb\"\n",
            "bg_colour = \"#404a58\"\n",
            "highlight = \"icon\"\n",
            "radius = 0.0\n"
        )).unwrap();

        assert_eq!(style.label, "Lamp");
        assert_eq!(style.icon, Some(IconName::Bulb));
        assert_eq!(style.bg_colour, Argb::from_u32(0xff404a58));
        assert_eq!(style.highlight, HighlightMode::Icon);
        assert_eq!(style.radius, 0.0);
    }
}
