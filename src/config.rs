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

use std::{fs, path::Path};

use anyhow::Result;
use serde::Deserialize;

use crate::colour::Argb;
use crate::icon::IconName;
use crate::theme::{ButtonStyle, theme_de};
use crate::widgets::HighlightMode;

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub input: InputConfig,
    pub deck: DeckConfig,
    #[serde(rename = "button")]
    pub buttons: Vec<ButtonConfig>
}

impl Config {
    pub fn load<P: AsRef<Path>>(file_path: P) -> Result<Self> {
        let toml_src = fs::read_to_string(file_path)?;
        let config = toml::from_str(&toml_src)?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            input: InputConfig::default(),
            deck: DeckConfig::default(),
            buttons: demo_buttons()
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WindowConfig {
    /// Display density scale applied to text sizes.
    pub scale: f32
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct InputConfig {
    /// Path to the touchscreen evdev device file
    pub touch_device: String
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            touch_device: String::from("/dev/input/event0")
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct DeckConfig {
    pub columns: u32,
    pub padding: u32,
    #[serde(deserialize_with = "theme_de::colour")]
    pub bg_colour: Argb
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            columns: 2,
            padding: 12,
            bg_colour: Argb::from_u32(0xff101010)
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct ButtonConfig {
    pub id: String,
    #[serde(default)]
    pub checkable: bool,
    #[serde(flatten)]
    pub style: ButtonStyle
}

/// Deck shown when no config file is supplied.
fn demo_buttons() -> Vec<ButtonConfig> {
    vec![
        ButtonConfig {
            id: String::from("power"),
            checkable: true,
            style: ButtonStyle {
                label: String::from("Power"),
                icon: Some(IconName::Power),
                bg_colour: Argb::from_u32(0xff404a58),
                highlight: HighlightMode::Background,
                ..ButtonStyle::default()
            }
        },
        ButtonConfig {
            id: String::from("lamp"),
            checkable: true,
            style: ButtonStyle {
                label: String::from("Lamp"),
                icon: Some(IconName::Bulb),
                bg_colour: Argb::from_u32(0xff404a58),
                highlight: HighlightMode::Icon,
                ..ButtonStyle::default()
            }
        },
        ButtonConfig {
            id: String::from("play"),
            checkable: false,
            style: ButtonStyle {
                label: String::from("Play"),
                icon: Some(IconName::Play),
                bg_colour: Argb::from_u32(0xff2e5339),
                ..ButtonStyle::default()
            }
        },
        ButtonConfig {
            id: String::from("stop"),
            checkable: false,
            style: ButtonStyle {
                label: String::from("Stop"),
                icon: Some(IconName::Stop),
                bg_colour: Argb::from_u32(0xff5c3434),
                ..ButtonStyle::default()
            }
        }
    ]
}
