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

use std::cell::Cell;

use anyhow::Result;
use embedded_graphics::{
    prelude::*,
    primitives::{ContainsPoint, Rectangle}
};
use log::warn;

use crate::colour::Argb;
use crate::config::Config;
use crate::drawable::{AppDrawable, AppFrameBuf, DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::events::{Event, EventHandler, EventSender, Pointer};
use crate::screen::Screen;
use crate::widgets::{RoundButton, Widget};
use crate::window::DisplayMetrics;

struct DeckButton {
    id: String,
    rect: Rectangle,
    widget: RoundButton
}

/// Grid of round buttons. Owns pointer routing: a contact is tracked from
/// the button it went down on, converted to an `Outside` transition when it
/// leaves those bounds, and completed as a tap when it comes up inside
/// them.
pub struct DeckScreen<S> {
    buttons: Vec<DeckButton>,
    tracking: Option<usize>,
    bg_colour: Argb,
    event_sender: S,
    dirty: Cell<bool>
}

impl<S: EventSender + Clone + 'static> DeckScreen<S> {
    pub fn new(config: &Config, metrics: DisplayMetrics, event_sender: S) -> Self {
        let columns = config.deck.columns.max(1);
        let rows = (config.buttons.len() as u32).div_ceil(columns).max(1);
        let padding = config.deck.padding;

        let cell = Size::new(
            (DISPLAY_WIDTH as u32).saturating_sub(padding * (columns + 1)) / columns,
            (DISPLAY_HEIGHT as u32).saturating_sub(padding * (rows + 1)) / rows
        );

        let buttons = config.buttons.iter()
            .enumerate()
            .map(|(n, entry)| {
                let column = n as u32 % columns;
                let row = n as u32 / columns;

                let top_left = Point::new(
                    (padding + column * (cell.width + padding)) as i32,
                    (padding + row * (cell.height + padding)) as i32
                );

                let mut widget = RoundButton::from_style(&entry.style, metrics);

                if entry.checkable {
                    widget.set_checkable(true);

                    let id = entry.id.clone();
                    let sender = event_sender.clone();
                    widget.set_on_checked_change(Box::new(move |_, checked| {
                        if let Err(e) = sender.send_event(Event::Toggled(id.clone(), checked)) {
                            warn!("Dropped toggle event for `{}`: {}", id, e);
                        }
                    }));
                }

                DeckButton {
                    id: entry.id.clone(),
                    rect: Rectangle::new(top_left, cell),
                    widget
                }
            })
            .collect();

        Self {
            buttons,
            tracking: None,
            bg_colour: config.deck.bg_colour,
            event_sender,
            dirty: Cell::new(true)
        }
    }

    fn hit_test(&self, position: Point) -> Option<usize> {
        self.buttons.iter().position(|b| b.rect.contains(position))
    }

    /// Mark the tapped button as the active one.
    fn set_active(&mut self, index: usize) {
        for (n, button) in self.buttons.iter_mut().enumerate() {
            button.widget.set_highlighted(n == index);
        }
    }

    fn route_pointer(&mut self, pointer: &Pointer) -> Result<()> {
        match pointer {
            Pointer::Down(position) => {
                if let Some(index) = self.hit_test(*position) {
                    self.tracking = Some(index);
                    self.buttons[index].widget.handle_pointer(pointer);
                }
            }
            Pointer::Move(position) => {
                if let Some(index) = self.tracking {
                    if !self.buttons[index].rect.contains(*position) {
                        self.buttons[index].widget.handle_pointer(&Pointer::Outside);
                        self.tracking = None;
                    }
                }
            }
            Pointer::Up(position) => {
                if let Some(index) = self.tracking.take() {
                    if self.buttons[index].rect.contains(*position) {
                        self.buttons[index].widget.handle_pointer(pointer);
                        self.set_active(index);
                        self.event_sender
                            .send_event(Event::Tapped(self.buttons[index].id.clone()))?;
                    } else {
                        self.buttons[index].widget.handle_pointer(&Pointer::Outside);
                    }
                }
            }
            Pointer::Outside | Pointer::Cancel | Pointer::HoverExit => {
                if let Some(index) = self.tracking.take() {
                    self.buttons[index].widget.handle_pointer(pointer);
                }
            }
        }

        Ok(())
    }
}

impl<S: EventSender + Clone + 'static> EventHandler for DeckScreen<S> {
    fn handle_event(&mut self, event: &Event) -> Result<()> {
        match event {
            Event::Pointer(pointer) => {
                self.route_pointer(pointer)?;
            }
            Event::ResetStates => {
                for button in &mut self.buttons {
                    button.widget.reset_state();
                }
            }
            _ => { }
        }

        Ok(())
    }
}

impl<S: EventSender + Clone + 'static> AppDrawable for DeckScreen<S> {
    fn draw(&self, target: &mut AppFrameBuf) -> Result<()> {
        self.dirty.set(false);

        target.clear(self.bg_colour.bgr())?;

        for button in &self.buttons {
            let mut cell = target.cropped(&button.rect);
            button.widget.draw(&mut cell)?;
        }

        Ok(())
    }
}

impl<S: EventSender + Clone + 'static> Screen for DeckScreen<S> {
    fn needs_redraw(&self) -> bool {
        self.dirty.get() || self.buttons.iter().any(|b| b.widget.needs_redraw())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::config::ButtonConfig;
    use crate::theme::ButtonStyle;
    use crate::widgets::HighlightMode;

    #[derive(Clone, Default)]
    struct RecordingSender(Rc<RefCell<Vec<Event>>>);

    impl EventSender for RecordingSender {
        fn send_event(&self, event: Event) -> Result<()> {
            self.0.borrow_mut().push(event);
            Ok(())
        }
    }

    fn two_button_deck() -> (DeckScreen<RecordingSender>, RecordingSender) {
        let config = Config {
            buttons: vec![
                ButtonConfig {
                    id: "play".into(),
                    checkable: false,
                    style: ButtonStyle::default()
                },
                ButtonConfig {
                    id: "lamp".into(),
                    checkable: true,
                    style: ButtonStyle {
                        highlight: HighlightMode::Background,
                        ..ButtonStyle::default()
                    }
                }
            ],
            ..Config::default()
        };

        let sender = RecordingSender::default();
        let screen = DeckScreen::new(&config, DisplayMetrics { scale: 1.0 }, sender.clone());
        (screen, sender)
    }

    fn centre(screen: &DeckScreen<RecordingSender>, index: usize) -> Point {
        screen.buttons[index].rect.center()
    }

    fn tap(screen: &mut DeckScreen<RecordingSender>, position: Point) {
        screen.handle_event(&Event::Pointer(Pointer::Down(position))).unwrap();
        screen.handle_event(&Event::Pointer(Pointer::Up(position))).unwrap();
    }

    #[test]
    fn tap_emits_tapped_event() {
        let (mut screen, sender) = two_button_deck();
        let position = centre(&screen, 0);

        tap(&mut screen, position);

        assert_eq!(*sender.0.borrow(), vec![Event::Tapped("play".into())]);
    }

    #[test]
    fn tap_on_checkable_button_emits_toggled() {
        let (mut screen, sender) = two_button_deck();
        let position = centre(&screen, 1);

        tap(&mut screen, position);

        assert!(screen.buttons[1].widget.is_checked());
        assert_eq!(*sender.0.borrow(), vec![
            Event::Toggled("lamp".into(), true),
            Event::Tapped("lamp".into())
        ]);
    }

    #[test]
    fn leaving_bounds_cancels_the_tap() {
        let (mut screen, sender) = two_button_deck();
        let inside = centre(&screen, 1);
        let outside = Point::new(0, 0);

        screen.handle_event(&Event::Pointer(Pointer::Down(inside))).unwrap();
        screen.handle_event(&Event::Pointer(Pointer::Move(outside))).unwrap();
        screen.handle_event(&Event::Pointer(Pointer::Up(outside))).unwrap();

        assert!(!screen.buttons[1].widget.is_checked());
        assert!(sender.0.borrow().is_empty());
    }

    #[test]
    fn down_outside_any_button_is_ignored() {
        let (mut screen, sender) = two_button_deck();

        tap(&mut screen, Point::new(0, 0));

        assert!(sender.0.borrow().is_empty());
    }

    fn pixel_at(frame: &AppFrameBuf, position: Point) -> embedded_graphics::pixelcolor::Bgr888 {
        frame.data[position.y as usize * DISPLAY_WIDTH + position.x as usize]
    }

    #[test]
    fn last_tapped_button_is_active() {
        use embedded_graphics::pixelcolor::Bgr888;

        let (mut screen, _sender) = two_button_deck();
        let lamp = centre(&screen, 1);
        let play = centre(&screen, 0);

        let mut frame = AppFrameBuf::new(
            [Bgr888::BLACK; DISPLAY_WIDTH * DISPLAY_HEIGHT],
            DISPLAY_WIDTH,
            DISPLAY_HEIGHT
        );

        // tapping the lamp highlights it with its background tint
        tap(&mut screen, lamp);
        screen.draw(&mut frame).unwrap();
        assert_eq!(pixel_at(&frame, lamp), Bgr888::new(0x00, 0xb5, 0xff));

        // tapping elsewhere moves the highlight away again
        tap(&mut screen, play);
        screen.draw(&mut frame).unwrap();
        assert_eq!(pixel_at(&frame, lamp), Bgr888::new(0xff, 0xff, 0xff));
    }

    #[test]
    fn reset_states_clears_every_button() {
        let (mut screen, _sender) = two_button_deck();

        let target = centre(&screen, 1);
        tap(&mut screen, target);
        assert!(screen.buttons[1].widget.is_checked());

        screen.handle_event(&Event::ResetStates).unwrap();
        assert!(!screen.buttons[1].widget.is_checked());
    }

    #[test]
    fn buttons_fill_the_grid_without_overlap() {
        let (screen, _sender) = two_button_deck();

        let a = screen.buttons[0].rect;
        let b = screen.buttons[1].rect;
        assert_eq!(a.intersection(&b).size, Size::zero());
        assert_eq!(a.size, b.size);
    }
}
