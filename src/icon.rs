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

use embedded_graphics::{
    Pixel,
    pixelcolor::Bgr888,
    prelude::{DrawTarget, Point, Size}
};

use crate::colour::Argb;

mod builtin;

pub use builtin::IconName;

/// Owned ARGB bitmap with an intrinsic size. Icons are immutable once
/// built; derived variants are new bitmaps.
#[derive(Clone)]
pub struct Icon {
    size: Size,
    pixels: Vec<Argb>
}

impl Icon {
    pub fn new(size: Size, pixels: Vec<Argb>) -> Self {
        debug_assert_eq!(pixels.len(), (size.width * size.height) as usize);
        Self { size, pixels }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn pixel(&self, x: u32, y: u32) -> Argb {
        self.pixels[(y * self.size.width + x) as usize]
    }

    /// Copy of this icon with every visible pixel recoloured.
    ///
    /// Pixels with non-zero alpha take the RGB of `colour` and keep their
    /// own alpha, so soft edges survive the recolour. Fully transparent
    /// pixels are copied through untouched.
    pub fn recoloured(&self, colour: Argb) -> Icon {
        let pixels = self.pixels.iter()
            .map(|p| {
                if p.a != 0 {
                    Argb::new(p.a, colour.r, colour.g, colour.b)
                } else {
                    *p
                }
            })
            .collect();

        Icon { size: self.size, pixels }
    }

    /// Draw the icon with its top-left corner at `top_left`, blending each
    /// visible pixel over `bg_colour`.
    pub fn draw<D>(
        &self,
        target: &mut D,
        top_left: Point,
        bg_colour: Bgr888
    ) -> Result<(), D::Error>
        where D: DrawTarget<Color = Bgr888>
    {
        let width = self.size.width;
        let pixels = self.pixels.iter()
            .enumerate()
            .filter(|(_, p)| p.a != 0)
            .map(|(n, p)| {
                let offset = Point::new(
                    (n as u32 % width) as i32,
                    (n as u32 / width) as i32
                );
                Pixel(top_left + offset, p.over(bg_colour))
            });

        target.draw_iter(pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker_icon() -> Icon {
        // 2x2: opaque red, soft green, transparent-but-coloured, clear
        Icon::new(Size::new(2, 2), vec![
            Argb::new(0xff, 0xc0, 0x00, 0x00),
            Argb::new(0x80, 0x00, 0xc0, 0x00),
            Argb::new(0x00, 0x12, 0x34, 0x56),
            Argb::new(0x00, 0x00, 0x00, 0x00)
        ])
    }

    #[test]
    fn recolour_preserves_alpha() {
        let icon = checker_icon();
        let tinted = icon.recoloured(Argb::from_u32(0xff00b5ff));

        for y in 0..2 {
            for x in 0..2 {
                assert_eq!(tinted.pixel(x, y).a, icon.pixel(x, y).a);
            }
        }
    }

    #[test]
    fn recolour_replaces_rgb_of_visible_pixels() {
        let tinted = checker_icon().recoloured(Argb::from_u32(0xff00b5ff));

        assert_eq!(tinted.pixel(0, 0), Argb::new(0xff, 0x00, 0xb5, 0xff));
        assert_eq!(tinted.pixel(1, 0), Argb::new(0x80, 0x00, 0xb5, 0xff));
    }

    #[test]
    fn recolour_leaves_transparent_pixels_untouched() {
        let icon = checker_icon();
        let tinted = icon.recoloured(Argb::from_u32(0xff00b5ff));

        assert_eq!(tinted.pixel(0, 1), icon.pixel(0, 1));
        assert_eq!(tinted.pixel(1, 1), icon.pixel(1, 1));
    }

    #[test]
    fn recolour_returns_a_new_bitmap() {
        let icon = checker_icon();
        let before = icon.pixel(0, 0);
        let _ = icon.recoloured(Argb::rgb(1, 2, 3));
        assert_eq!(icon.pixel(0, 0), before);
    }
}
