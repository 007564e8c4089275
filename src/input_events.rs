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

use std::thread;

use anyhow::Result;
use embedded_graphics::prelude::Point;
use evdev::{AbsoluteAxisCode, Device, EventSummary, KeyCode};
use log::info;

use crate::events::{Event, EventSender, Pointer, ThrottledEventSender};

/// Read the touchscreen device and emit pointer events. Contact positions
/// arrive as absolute axis values; move events are flushed on sync packets
/// and throttled so a sliding finger cannot flood the event loop.
pub fn start_touch_events<S>(sender: S, device_path: &str) -> Result<()>
    where S: EventSender + Clone + Send + 'static
{
    let mut device = Device::open(device_path)?;
    info!("Touch events from {}", device_path);

    thread::spawn(move || {
        let move_sender = ThrottledEventSender::new(sender.clone(), 50, 3);
        let mut position = Point::zero();
        let mut touching = false;
        let mut moved = false;

        loop {
            for e in device.fetch_events().unwrap() {
                match e.destructure() {
                    EventSummary::AbsoluteAxis(_, AbsoluteAxisCode::ABS_X, value) => {
                        position.x = value;
                        moved = true;
                    }
                    EventSummary::AbsoluteAxis(_, AbsoluteAxisCode::ABS_Y, value) => {
                        position.y = value;
                        moved = true;
                    }
                    // value 1 = contact down, followed by value 0 = contact up
                    EventSummary::Key(_, KeyCode::BTN_TOUCH, 1) => {
                        touching = true;
                        moved = false;
                        sender.send_event(Event::Pointer(Pointer::Down(position))).unwrap();
                    }
                    EventSummary::Key(_, KeyCode::BTN_TOUCH, 0) => {
                        touching = false;
                        sender.send_event(Event::Pointer(Pointer::Up(position))).unwrap();
                    }
                    EventSummary::Synchronization(_, _, _) => {
                        if touching && moved {
                            moved = false;
                            move_sender.send_event(Event::Pointer(Pointer::Move(position))).unwrap();
                        }
                    }
                    _ => { }
                }
            }
        }
    });

    Ok(())
}
