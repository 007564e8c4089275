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

use anyhow::{Result, anyhow};
use embedded_graphics::{pixelcolor::Bgr888, prelude::*};
use embedded_graphics_framebuf::FrameBuf;
use linuxfb::Framebuffer;

use crate::drawable::{AppFrameBuf, DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::events::{Event, EventHandler};

pub struct FramebufferWindow {
    fb_dev: Framebuffer,
    buffer: AppFrameBuf
}

impl FramebufferWindow {
    pub fn new() -> Result<Self> {
        let mut fb_dev = Framebuffer::new("/dev/fb0")
            .or(Err(anyhow!("Error opening fb0")))?;

        // sometimes the offset will be non-zero after opening fb0
        // causing nothing to appear on screen
        fb_dev.set_offset(0, 0)
            .or(Err(anyhow!("Error changing offset of fb0")))?;

        let data = [Bgr888::BLACK; DISPLAY_WIDTH * DISPLAY_HEIGHT];
        let buffer = FrameBuf::new(data, DISPLAY_WIDTH, DISPLAY_HEIGHT);

        Ok(Self { fb_dev, buffer })
    }

    pub fn draw_target(&mut self) -> &mut AppFrameBuf {
        &mut self.buffer
    }

    pub fn flush(&mut self) -> Result<()> {
        // Map the framebuffer into memory, so we can write to it:
        let mut fb_mem = self.fb_dev.map()
            .or(Err(anyhow!("Error mapping fb0 mem")))?;

        for (i, p) in self.buffer.data.iter().enumerate() {
            let offset = i * 4;
            fb_mem[offset] = p.b();
            fb_mem[offset + 1] = p.g();
            fb_mem[offset + 2] = p.r();
            // Fourth byte appears to be unused.
        }

        Ok(())
    }
}

impl EventHandler for FramebufferWindow {
    fn handle_event(&mut self, _event: &Event) -> Result<()> {
        Ok(())
    }
}
