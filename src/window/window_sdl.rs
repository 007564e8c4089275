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

use std::sync::Arc;

use anyhow::{Result, anyhow};
use embedded_graphics::{pixelcolor::Bgr888, prelude::*};
use embedded_graphics_framebuf::FrameBuf;
use sdl2::{
    EventPump, event::{Event as SdlEvent, EventSender as SdlEventSender, WindowEvent},
    keyboard::Keycode, pixels::PixelFormatEnum, render::Canvas, video::Window
};

use crate::config::WindowConfig;
use crate::drawable::{AppFrameBuf, DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::events::{Event, EventHandler, EventSender, EventSource, Pointer};

pub struct SdlWindow {
    window_canvas: Canvas<Window>,
    buffer: AppFrameBuf
}

impl SdlWindow {
    pub fn new(config: &WindowConfig) -> Result<Self> {
        let sdl_context = sdl2::init()
            .map_err(|e| anyhow!(e))?;

        // the simulator window zooms with the configured density
        let scale = config.scale.max(0.5);
        let window = sdl_context.video()
            .map_err(|e| anyhow!(e))?
            .window(
                "Tapdeck",
                (DISPLAY_WIDTH as f32 * scale) as u32,
                (DISPLAY_HEIGHT as f32 * scale) as u32
            )
            .position_centered()
            .build()?;

        let window_canvas = window.into_canvas()
            .build()
            .map_err(|e| anyhow!(e))?;

        let data = [Bgr888::BLACK; DISPLAY_WIDTH * DISPLAY_HEIGHT];
        let buffer = FrameBuf::new(data, DISPLAY_WIDTH, DISPLAY_HEIGHT);

        Ok(
            Self { window_canvas, buffer }
        )
    }

    pub fn draw_target(&mut self) -> &mut AppFrameBuf {
        &mut self.buffer
    }

    pub fn flush(&mut self) -> Result<()> {
        let texture_creator = self.window_canvas.texture_creator();
        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::BGR888,
                DISPLAY_WIDTH as u32,
                DISPLAY_HEIGHT as u32
            )
            .map_err(|e| anyhow!(e))?;

        texture.with_lock(None, |dest, _| {
            for (i, p) in self.buffer.data.iter().enumerate() {
                let offset = i * 4;
                dest[offset] = p.r();
                dest[offset + 1] = p.g();
                dest[offset + 2] = p.b();
            }
        }).map_err(|e| anyhow!(e))?;

        self.window_canvas.clear();
        self.window_canvas.copy(&texture, None, None)
            .map_err(|e| anyhow!(e))?;
        self.window_canvas.present();

        Ok(())
    }
}

impl EventHandler for SdlWindow {
    fn handle_event(&mut self, _event: &Event) -> Result<()> {
        Ok(())
    }
}

pub struct SdlEventSource {
    event_pump: EventPump,
    event_sender: SdlEventSenderHandle,
    scale: f32
}

impl SdlEventSource {
    pub fn new(config: &WindowConfig) -> Result<Self> {
        let sdl_context = sdl2::init()
            .map_err(|e| anyhow!(e))?;

        let event_pump = sdl_context.event_pump()
            .map_err(|e| anyhow!(e))?;

        let sdl_events = sdl_context.event()
            .map_err(|e| anyhow!(e))?;

        sdl_events.register_custom_event::<Event>()
            .map_err(|e| anyhow!(e))?;

        let event_sender = SdlEventSenderHandle::new(sdl_events.event_sender());

        Ok(Self {
            event_pump,
            event_sender,
            scale: config.scale.max(0.5)
        })
    }

    /// Window coordinates back to display coordinates.
    fn display_point(&self, x: i32, y: i32) -> Point {
        Point::new(
            (x as f32 / self.scale) as i32,
            (y as f32 / self.scale) as i32
        )
    }

    fn map_sdl_event(&mut self, event: SdlEvent) -> Option<Event> {
        match event {
            SdlEvent::Quit { .. } =>
                Some(Event::Quit),
            SdlEvent::MouseButtonDown { x, y, .. } =>
                Some(Event::Pointer(Pointer::Down(self.display_point(x, y)))),
            SdlEvent::MouseMotion { x, y, .. } =>
                Some(Event::Pointer(Pointer::Move(self.display_point(x, y)))),
            SdlEvent::MouseButtonUp { x, y, .. } =>
                Some(Event::Pointer(Pointer::Up(self.display_point(x, y)))),
            SdlEvent::Window { win_event: WindowEvent::Leave, .. } =>
                Some(Event::Pointer(Pointer::HoverExit)),
            SdlEvent::Window { win_event: WindowEvent::FocusLost, .. } =>
                Some(Event::Pointer(Pointer::Cancel)),
            SdlEvent::KeyDown { keycode, .. } if keycode == Some(Keycode::R) =>
                Some(Event::ResetStates),
            SdlEvent::KeyDown { keycode, .. } if keycode == Some(Keycode::Escape) =>
                Some(Event::Quit),
            sdl_event => {
                if sdl_event.is_user_event() {
                    Some(sdl_event.as_user_event_type::<Event>().unwrap())
                } else {
                    None
                }
            }
        }
    }
}

impl EventSource<SdlEventSenderHandle> for SdlEventSource {
    fn wait_event(&mut self) -> Result<Event> {
        loop {
            let event = self.event_pump.wait_event();
            if let Some(event) = self.map_sdl_event(event) {
                return Ok(event);
            }
        }
    }

    fn event_sender(&self) -> SdlEventSenderHandle {
        self.event_sender.clone()
    }
}

#[derive(Clone)]
pub struct SdlEventSenderHandle {
    sender: Arc<SdlEventSender>
}

impl SdlEventSenderHandle {
    fn new(sender: SdlEventSender) -> Self {
        Self { sender: Arc::new(sender) }
    }
}

impl EventSender for SdlEventSenderHandle {
    fn send_event(&self, event: Event) -> Result<()> {
        self.sender.push_custom_event(event)
            .map_err(|e| anyhow!(e))
    }
}
