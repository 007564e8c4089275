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

use std::{cell::RefCell, sync::mpsc::{Receiver, Sender, channel}, time::Duration};

use anyhow::Result;
use embedded_graphics::prelude::Point;
use throttle::Throttle;

/// Pointer contact classification, in display coordinates.
///
/// Sources emit `Down`/`Move`/`Up`/`Cancel`/`HoverExit`; `Outside` is
/// produced by deck routing when a tracked contact leaves the bounds of
/// the widget it started on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pointer {
    Down(Point),
    Move(Point),
    Up(Point),
    Outside,
    Cancel,
    HoverExit
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Pointer(Pointer),
    /// A completed tap on a button.
    Tapped(String),
    /// A checkable button changed state through a tap.
    Toggled(String, bool),
    /// Clear pressed/highlighted/checked state on every button.
    ResetStates,
    Quit
}

pub trait EventSender {
    fn send_event(&self, event: Event) -> Result<()>;
}

pub trait EventHandler {
    fn handle_event(&mut self, event: &Event) -> Result<()>;
}

pub trait EventSource<S: EventSender> {
    fn wait_event(&mut self) -> Result<Event>;
    fn event_sender(&self) -> S;
}

pub struct DefaultEventSource {
    sender: Sender<Event>,
    receiver: Receiver<Event>
}

impl DefaultEventSource {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self { sender, receiver }
    }
}

impl EventSource<Sender<Event>> for DefaultEventSource {
    fn wait_event(&mut self) -> Result<Event> {
        Ok(self.receiver.recv()?)
    }

    fn event_sender(&self) -> Sender<Event> {
        self.sender.clone()
    }
}

impl EventSender for Sender<Event> {
    fn send_event(&self, event: Event) -> Result<()> {
        Ok(self.send(event)?)
    }
}

/// Emit a maximum number of events over a specified period of time, dropping
/// events as necessary. Used to bound pointer-move floods from the touch
/// device.
pub struct ThrottledEventSender<S> {
    event_sender: S,
    throttle: RefCell<Throttle>
}

impl<S: EventSender> ThrottledEventSender<S> {
    /// Accept up to `threshold` events, every `timeout_ms`
    pub fn new(event_sender: S, timeout_ms: u64, threshold: usize) -> Self {
        let timeout = Duration::from_millis(timeout_ms);
        Self {
            event_sender,
            throttle: RefCell::new(Throttle::new(timeout, threshold))
        }
    }
}

impl<S: EventSender> EventSender for ThrottledEventSender<S> {
    fn send_event(&self, event: Event) -> Result<()> {
        if self.throttle.borrow_mut().accept().is_ok() {
            self.event_sender.send_event(event)?;
        }

        Ok(())
    }
}
