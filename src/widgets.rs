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

use embedded_graphics::{pixelcolor::Bgr888, prelude::DrawTarget};

use crate::events::Pointer;

mod round_button;

pub use round_button::{HighlightMode, OnCheckedChange, RoundButton};

/// A view that takes part in the draw and pointer-input cycle.
///
/// `draw` renders into whatever region the host crops for the widget and
/// clears the pending redraw request. `handle_pointer` returns whether the
/// event was consumed. Redraw requests are asynchronous: the host polls
/// `needs_redraw` and repaints on its own schedule.
pub trait Widget {
    fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
        where D: DrawTarget<Color = Bgr888>;

    fn handle_pointer(&mut self, event: &Pointer) -> bool;

    fn needs_redraw(&self) -> bool;
}
