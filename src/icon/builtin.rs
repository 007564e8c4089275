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

use std::convert::Infallible;

use embedded_graphics::{
    Pixel,
    pixelcolor::Gray8,
    prelude::*,
    primitives::{Arc, Circle, Line, PrimitiveStyle, Rectangle, Triangle}
};
use serde::Deserialize;

use crate::colour::Argb;
use crate::icon::Icon;

/// Built-in icon glyphs, rasterised on demand. This is the drawable
/// registry config entries and `set_icon_named` resolve against.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IconName {
    Power,
    Bulb,
    Check,
    Gear,
    Play,
    Stop
}

impl IconName {
    /// Rasterise the glyph into a square icon of the given colour.
    pub fn render(self, size: u32, colour: Argb) -> Icon {
        let mut mask = AlphaMask::new(size);

        match self {
            Self::Power => draw_power(&mut mask, size),
            Self::Bulb => draw_bulb(&mut mask, size),
            Self::Check => draw_check(&mut mask, size),
            Self::Gear => draw_gear(&mut mask, size),
            Self::Play => draw_play(&mut mask, size),
            Self::Stop => draw_stop(&mut mask, size)
        }

        let pixels = mask.data.iter()
            .map(|&a| Argb::new(a, colour.r, colour.g, colour.b))
            .collect();

        Icon::new(Size::new_equal(size), pixels)
    }
}

impl std::str::FromStr for IconName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "power" => Ok(Self::Power),
            "bulb" => Ok(Self::Bulb),
            "check" => Ok(Self::Check),
            "gear" => Ok(Self::Gear),
            "play" => Ok(Self::Play),
            "stop" => Ok(Self::Stop),
            s => Err(format!("Unsupported icon name `{}`", s))
        }
    }
}

/// Coverage mask the glyph shapes are drawn into. Luma becomes the alpha
/// channel of the finished icon.
struct AlphaMask {
    size: Size,
    data: Vec<u8>
}

impl AlphaMask {
    fn new(size: u32) -> Self {
        Self {
            size: Size::new_equal(size),
            data: vec![0; (size * size) as usize]
        }
    }
}

impl OriginDimensions for AlphaMask {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for AlphaMask {
    type Color = Gray8;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where I: IntoIterator<Item = Pixel<Self::Color>>
    {
        for Pixel(point, colour) in pixels {
            if point.x >= 0 && point.y >= 0
                && (point.x as u32) < self.size.width
                && (point.y as u32) < self.size.height
            {
                let offset = point.y as u32 * self.size.width + point.x as u32;
                self.data[offset as usize] = colour.luma();
            }
        }

        Ok(())
    }
}

fn stroke_width(size: u32) -> u32 {
    (size / 8).max(2)
}

fn draw_power(mask: &mut AlphaMask, size: u32) {
    let w = stroke_width(size);
    let s = size as i32;

    // ring with a gap at the top for the stem
    Arc::new(Point::new_equal(w as i32), size - 2 * w, 120.0.deg(), 300.0.deg())
        .into_styled(PrimitiveStyle::with_stroke(Gray8::WHITE, w))
        .draw(mask)
        .unwrap();

    Line::new(Point::new(s / 2, s / 8), Point::new(s / 2, s / 2))
        .into_styled(PrimitiveStyle::with_stroke(Gray8::WHITE, w))
        .draw(mask)
        .unwrap();
}

fn draw_bulb(mask: &mut AlphaMask, size: u32) {
    let s = size as i32;
    let dia = size * 2 / 3;

    Circle::new(Point::new((s - dia as i32) / 2, 0), dia)
        .into_styled(PrimitiveStyle::with_fill(Gray8::WHITE))
        .draw(mask)
        .unwrap();

    Rectangle::new(
        Point::new(s / 2 - s / 6, dia as i32),
        Size::new(size / 3, size / 4)
    )
    .into_styled(PrimitiveStyle::with_fill(Gray8::WHITE))
    .draw(mask)
    .unwrap();
}

fn draw_check(mask: &mut AlphaMask, size: u32) {
    let w = stroke_width(size);
    let s = size as i32;
    let elbow = Point::new(s * 3 / 8, s * 7 / 8);

    Line::new(Point::new(s / 8, s * 5 / 8), elbow)
        .into_styled(PrimitiveStyle::with_stroke(Gray8::WHITE, w))
        .draw(mask)
        .unwrap();

    Line::new(elbow, Point::new(s * 7 / 8, s / 4))
        .into_styled(PrimitiveStyle::with_stroke(Gray8::WHITE, w))
        .draw(mask)
        .unwrap();
}

fn draw_gear(mask: &mut AlphaMask, size: u32) {
    let s = size as i32;
    let dia = size * 3 / 4;
    let tooth = Size::new(size / 5, size / 8);

    for rect in [
        Rectangle::new(Point::new(s / 2 - s / 10, 0), tooth),
        Rectangle::new(Point::new(s / 2 - s / 10, s - s / 8), tooth),
        Rectangle::new(Point::new(0, s / 2 - s / 10), Size::new(size / 8, size / 5)),
        Rectangle::new(Point::new(s - s / 8, s / 2 - s / 10), Size::new(size / 8, size / 5))
    ] {
        rect.into_styled(PrimitiveStyle::with_fill(Gray8::WHITE))
            .draw(mask)
            .unwrap();
    }

    Circle::new(Point::new_equal((s - dia as i32) / 2), dia)
        .into_styled(PrimitiveStyle::with_fill(Gray8::WHITE))
        .draw(mask)
        .unwrap();

    // punch out the hub
    Circle::new(Point::new_equal((s - s / 4) / 2), size / 4)
        .into_styled(PrimitiveStyle::with_fill(Gray8::BLACK))
        .draw(mask)
        .unwrap();
}

fn draw_play(mask: &mut AlphaMask, size: u32) {
    let s = size as i32;

    Triangle::new(
        Point::new(s / 4, s / 8),
        Point::new(s / 4, s * 7 / 8),
        Point::new(s * 7 / 8, s / 2)
    )
    .into_styled(PrimitiveStyle::with_fill(Gray8::WHITE))
    .draw(mask)
    .unwrap();
}

fn draw_stop(mask: &mut AlphaMask, size: u32) {
    let s = size as i32;

    Rectangle::new(Point::new(s / 5, s / 5), Size::new(size * 3 / 5, size * 3 / 5))
        .into_styled(PrimitiveStyle::with_fill(Gray8::WHITE))
        .draw(mask)
        .unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visible_pixels(icon: &Icon) -> usize {
        let size = icon.size();
        let mut count = 0;
        for y in 0..size.height {
            for x in 0..size.width {
                if icon.pixel(x, y).a != 0 {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn all_glyphs_render_something() {
        for name in [
            IconName::Power, IconName::Bulb, IconName::Check,
            IconName::Gear, IconName::Play, IconName::Stop
        ] {
            let icon = name.render(24, Argb::rgb(0xff, 0xff, 0xff));
            assert_eq!(icon.size(), Size::new(24, 24));
            assert!(visible_pixels(&icon) > 0, "{:?} rendered empty", name);
        }
    }

    #[test]
    fn render_applies_colour_to_visible_pixels() {
        let colour = Argb::rgb(0x12, 0x34, 0x56);
        let icon = IconName::Stop.render(16, colour);

        // inside the filled square
        let centre = icon.pixel(8, 8);
        assert_eq!(centre.a, 0xff);
        assert_eq!((centre.r, centre.g, centre.b), (0x12, 0x34, 0x56));

        // outside of it
        assert_eq!(icon.pixel(0, 0).a, 0);
    }

    #[test]
    fn name_parse() {
        assert_eq!("gear".parse::<IconName>(), Ok(IconName::Gear));
        assert!("sprocket".parse::<IconName>().is_err());
    }
}
