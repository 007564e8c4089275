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

use embedded_graphics::mono_font::MonoFont;
use profont::{
    PROFONT_7_POINT, PROFONT_9_POINT, PROFONT_10_POINT, PROFONT_12_POINT,
    PROFONT_14_POINT, PROFONT_18_POINT, PROFONT_24_POINT
};

/// Available faces, smallest to largest.
const FACES: &[&MonoFont<'static>] = &[
    &PROFONT_7_POINT,
    &PROFONT_9_POINT,
    &PROFONT_10_POINT,
    &PROFONT_12_POINT,
    &PROFONT_14_POINT,
    &PROFONT_18_POINT,
    &PROFONT_24_POINT
];

/// Largest face whose glyph height fits within `px` scaled pixels, or the
/// smallest face when none fit.
pub fn for_px(px: f32) -> &'static MonoFont<'static> {
    let mut selected = FACES[0];

    for &font in FACES {
        if font.character_size.height as f32 <= px {
            selected = font;
        }
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selected_face_fits_request() {
        let font = for_px(16.0);
        assert!(font.character_size.height <= 16);
    }

    #[test]
    fn face_height_grows_with_request() {
        let small = for_px(8.0);
        let large = for_px(40.0);
        assert!(small.character_size.height < large.character_size.height);
    }

    #[test]
    fn tiny_request_still_selects_a_face() {
        let font = for_px(1.0);
        assert_eq!(font.character_size, FACES[0].character_size);
    }
}
