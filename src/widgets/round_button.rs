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

use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyle},
    pixelcolor::Bgr888,
    prelude::*,
    primitives::{PrimitiveStyle, RoundedRectangle},
    text::{Alignment, Text}
};

use crate::colour::{Argb, brighter};
use crate::events::Pointer;
use crate::icon::{Icon, IconName};
use crate::theme::{ButtonStyle, fonts};
use crate::widgets::Widget;
use crate::window::DisplayMetrics;

/// How the highlighted state is expressed visually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HighlightMode {
    #[default]
    None,
    /// Swap the icon for a recoloured copy.
    Icon,
    /// Fill the background with the highlight colour.
    Background
}

impl HighlightMode {
    /// Parse a mode ordinal; unknown values mean no highlight.
    pub fn from_ordinal(value: i32) -> Self {
        match value {
            1 => Self::Icon,
            2 => Self::Background,
            _ => Self::None
        }
    }
}

impl std::str::FromStr for HighlightMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "icon" => Ok(Self::Icon),
            "background" => Ok(Self::Background),
            s => Err(format!("Unsupported highlight mode `{}`", s))
        }
    }
}

pub type OnCheckedChange = Box<dyn FnMut(&RoundButton, bool)>;

/// Round (or rectangular) button with an optional icon and label, a
/// pressed tint, an externally driven highlighted state, and an optional
/// checkable toggle with a corner badge.
///
/// The button draws into whatever target region the host hands it and
/// derives its bounds from that target, so one instance works at any cell
/// size.
pub struct RoundButton {
    icon: Option<Icon>,
    checked_badge: Option<Icon>,

    bg_colour: Argb,
    pressed_bg_colour: Argb,

    text: String,
    font: &'static MonoFont<'static>,
    text_size: f32,
    metrics: DisplayMetrics,

    radius: f32,
    spacing: f32,

    highlight_mode: HighlightMode,
    highlight_colour: Argb,
    // exactly one of these is materialised, matching the mode
    highlight_bg_colour: Option<Argb>,
    highlight_icon: Option<Icon>,

    checkable: bool,
    checked: bool,
    highlighted: bool,
    pressed: bool,

    on_checked_change: Option<OnCheckedChange>,

    dirty: Cell<bool>
}

impl RoundButton {
    const TEXT_COLOUR: Argb = Argb::rgb(0xff, 0xff, 0xff);
    const DEFAULT_BG: Argb = Argb::from_u32(0xff808080);
    const DEFAULT_HIGHLIGHT: Argb = Argb::from_u32(0xff00b5ff);

    /// Button with the explicit defaults: grey background, no icon, empty
    /// label, no highlight treatment.
    pub fn new(metrics: DisplayMetrics) -> Self {
        let mut button = Self::with_defaults(metrics);
        button.init(None, Self::DEFAULT_BG, "");
        button
    }

    /// Button configured from a style attribute bag.
    pub fn from_style(style: &ButtonStyle, metrics: DisplayMetrics) -> Self {
        let mut button = Self::with_defaults(metrics);

        button.radius = style.radius;
        button.spacing = style.spacing;
        button.text_size = style.text_size;
        button.highlight_mode = style.highlight;
        button.highlight_colour = style.highlight_colour;
        button.checked_badge = style.badge
            .map(|name| name.render(style.badge_size, style.icon_colour));

        let icon = style.icon
            .map(|name| name.render(style.icon_size, style.icon_colour));

        button.init(icon, style.bg_colour, style.label.as_str());
        button
    }

    fn with_defaults(metrics: DisplayMetrics) -> Self {
        Self {
            icon: None,
            checked_badge: None,
            bg_colour: Self::DEFAULT_BG,
            pressed_bg_colour: brighter(Self::DEFAULT_BG),
            text: String::new(),
            font: fonts::for_px(metrics.scale_px(16.0)),
            text_size: 16.0,
            metrics,
            radius: 12.0,
            spacing: 10.0,
            highlight_mode: HighlightMode::None,
            highlight_colour: Self::DEFAULT_HIGHLIGHT,
            highlight_bg_colour: None,
            highlight_icon: None,
            checkable: false,
            checked: false,
            highlighted: false,
            pressed: false,
            on_checked_change: None,
            dirty: Cell::new(true)
        }
    }

    /// (Re)initialise icon, background and label, rebuilding everything
    /// derived from them: the pressed tint, the text face, and the
    /// highlight paint or icon for the active mode.
    pub fn init(&mut self, icon: Option<Icon>, bg_colour: Argb, text: impl Into<String>) {
        self.icon = icon;
        self.bg_colour = bg_colour;
        self.pressed_bg_colour = brighter(bg_colour);
        self.text = text.into();
        self.font = fonts::for_px(self.metrics.scale_px(self.text_size));

        self.highlight_bg_colour = None;
        self.highlight_icon = None;
        match self.highlight_mode {
            HighlightMode::Background => {
                self.highlight_bg_colour = Some(self.highlight_colour);
            }
            HighlightMode::Icon => {
                self.highlight_icon = self.icon.as_ref()
                    .map(|icon| icon.recoloured(self.highlight_colour));
            }
            HighlightMode::None => { }
        }

        self.invalidate();
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.invalidate();
    }

    pub fn set_icon(&mut self, icon: Option<Icon>) {
        self.icon = icon;

        if self.highlight_mode == HighlightMode::Icon {
            self.highlight_icon = self.icon.as_ref()
                .map(|icon| icon.recoloured(self.highlight_colour));
        }

        self.invalidate();
    }

    /// Swap the icon by registry name, the resource-id flavour of
    /// [`RoundButton::set_icon`].
    pub fn set_icon_named(&mut self, name: IconName, size: u32, colour: Argb) {
        self.set_icon(Some(name.render(size, colour)));
    }

    pub fn set_bg_colour(&mut self, bg_colour: Argb) {
        self.bg_colour = bg_colour;
        self.pressed_bg_colour = brighter(bg_colour);
        self.invalidate();
    }

    /// Change the checked state without notifying the observer. A call
    /// that matches the current state does nothing, including no redraw
    /// request.
    pub fn set_checked(&mut self, checked: bool) {
        if self.checked != checked {
            self.checked = checked;
            self.invalidate();
        }
    }

    pub fn set_highlighted(&mut self, highlighted: bool) {
        if self.highlighted != highlighted {
            self.highlighted = highlighted;
            self.invalidate();
        }
    }

    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius;
        self.invalidate();
    }

    pub fn set_spacing(&mut self, spacing: f32) {
        self.spacing = spacing;
        self.invalidate();
    }

    pub fn set_checkable(&mut self, checkable: bool) {
        self.checkable = checkable;
        self.invalidate();
    }

    pub fn set_checked_badge(&mut self, badge: Option<Icon>) {
        self.checked_badge = badge;
        self.invalidate();
    }

    pub fn set_on_checked_change(&mut self, listener: OnCheckedChange) {
        self.on_checked_change = Some(listener);
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn is_checkable(&self) -> bool {
        self.checkable
    }

    pub fn icon(&self) -> Option<&Icon> {
        self.icon.as_ref()
    }

    /// A completed tap. Toggles the checked state and notifies the
    /// observer, but only while checkable; the flag is re-checked here
    /// because it may have been cleared after the tap started.
    pub fn tap(&mut self) {
        if !self.checkable {
            return;
        }

        let checked = !self.checked;
        self.set_checked(checked);

        if let Some(mut listener) = self.on_checked_change.take() {
            listener(self, checked);
            self.on_checked_change = Some(listener);
        }
    }

    /// Clear pressed, highlighted and checked state.
    pub fn reset_state(&mut self) {
        self.pressed = false;
        self.highlighted = false;
        self.checked = false;

        self.invalidate();
    }

    fn invalidate(&self) {
        self.dirty.set(true);
    }

    /// Icon and background fill for the current mode and state.
    fn active_visuals(&self) -> (Option<&Icon>, Argb) {
        match self.highlight_mode {
            HighlightMode::None => {
                let bg = if self.pressed { self.pressed_bg_colour } else { self.bg_colour };
                (self.icon.as_ref(), bg)
            }
            HighlightMode::Background => {
                let bg = if self.pressed {
                    self.pressed_bg_colour
                } else if self.highlighted {
                    self.highlight_bg_colour.unwrap_or(self.bg_colour)
                } else {
                    self.bg_colour
                };
                (self.icon.as_ref(), bg)
            }
            HighlightMode::Icon => {
                let icon = if self.highlighted {
                    self.highlight_icon.as_ref().or(self.icon.as_ref())
                } else {
                    self.icon.as_ref()
                };
                let bg = if self.pressed { self.pressed_bg_colour } else { self.bg_colour };
                (icon, bg)
            }
        }
    }

    fn text_height(&self) -> i32 {
        if self.text.is_empty() {
            0
        } else {
            self.font.character_size.height as i32
        }
    }
}

/// Height of the stacked icon/label block. Spacing only separates the two
/// when both are present.
fn content_height(icon: Option<Size>, text_height: i32, spacing: i32) -> i32 {
    let icon_height = match icon {
        Some(size) => size.height as i32 + if text_height > 0 { spacing } else { 0 },
        None => 0
    };

    icon_height + text_height
}

impl Widget for RoundButton {
    fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
        where D: DrawTarget<Color = Bgr888>
    {
        self.dirty.set(false);

        let bounds = target.bounding_box();
        let width = bounds.size.width as i32;
        let height = bounds.size.height as i32;

        let (icon, bg_colour) = self.active_visuals();
        let bg = bg_colour.bgr();

        let fill = PrimitiveStyle::with_fill(bg);
        if self.radius != 0.0 {
            RoundedRectangle::with_equal_corners(bounds, Size::new_equal(self.radius as u32))
                .into_styled(fill)
                .draw(target)?;
        } else {
            bounds.into_styled(fill).draw(target)?;
        }

        let text_height = self.text_height();
        let spacing = self.spacing as i32;
        let icon_size = icon.map(Icon::size);

        let block_height = content_height(icon_size, text_height, spacing);
        let yd = (height - block_height) / 2;

        if let Some(icon) = icon {
            let xd = (width - icon.size().width as i32) / 2;
            icon.draw(target, Point::new(xd, yd), bg)?;
        }

        // the label baseline sits below the icon, or at the bottom of the
        // centered text block when there is no icon; the call runs even
        // for an empty label
        let xt = width / 2;
        let yt = yd + match icon_size {
            Some(size) => size.height as i32 + if text_height > 0 { spacing } else { 0 },
            None => text_height
        };

        Text::with_alignment(
            &self.text,
            Point::new(xt, yt),
            MonoTextStyle::new(self.font, Self::TEXT_COLOUR.bgr()),
            Alignment::Center
        )
        .draw(target)?;

        if self.checked && self.checkable {
            if let Some(badge) = &self.checked_badge {
                let corner = Point::new(
                    width - badge.size().width as i32,
                    height - badge.size().height as i32
                );
                badge.draw(target, corner, bg)?;
            }
        }

        Ok(())
    }

    fn handle_pointer(&mut self, event: &Pointer) -> bool {
        match event {
            Pointer::Down(_) => {
                self.pressed = true;
                self.invalidate();
                true
            }
            Pointer::Up(_) => {
                let was_pressed = self.pressed;
                self.pressed = false;
                self.invalidate();

                if was_pressed {
                    self.tap();
                }

                true
            }
            Pointer::Cancel | Pointer::Outside | Pointer::HoverExit => {
                self.pressed = false;
                self.invalidate();
                true
            }
            Pointer::Move(_) => false
        }
    }

    fn needs_redraw(&self) -> bool {
        self.dirty.get()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use embedded_graphics_framebuf::FrameBuf;

    use super::*;

    fn metrics() -> DisplayMetrics {
        DisplayMetrics { scale: 1.0 }
    }

    fn solid_icon(size: u32, colour: Argb) -> Icon {
        let pixels = vec![colour; (size * size) as usize];
        Icon::new(Size::new_equal(size), pixels)
    }

    fn styled(highlight: HighlightMode) -> RoundButton {
        let style = ButtonStyle {
            icon: Some(IconName::Stop),
            icon_size: 48,
            bg_colour: Argb::from_u32(0xff202020),
            highlight,
            ..ButtonStyle::default()
        };
        RoundButton::from_style(&style, metrics())
    }

    fn icon_rgb(icon: Option<&Icon>) -> (u8, u8, u8) {
        let pixel = icon.expect("icon missing").pixel(24, 24);
        (pixel.r, pixel.g, pixel.b)
    }

    const BASE_RGB: (u8, u8, u8) = (0xff, 0xff, 0xff);
    const TINT_RGB: (u8, u8, u8) = (0x00, 0xb5, 0xff);
    const BASE_BG: Argb = Argb::from_u32(0xff202020);
    const PRESSED_BG: Argb = Argb::rgb(0x52, 0x52, 0x52);
    const HIGHLIGHT_BG: Argb = Argb::from_u32(0xff00b5ff);

    #[test]
    fn visuals_mode_none() {
        let mut button = styled(HighlightMode::None);

        for highlighted in [false, true] {
            button.highlighted = highlighted;

            button.pressed = false;
            let (icon, bg) = button.active_visuals();
            assert_eq!(icon_rgb(icon), BASE_RGB);
            assert_eq!(bg, BASE_BG);

            button.pressed = true;
            let (icon, bg) = button.active_visuals();
            assert_eq!(icon_rgb(icon), BASE_RGB);
            assert_eq!(bg, PRESSED_BG);
        }
    }

    #[test]
    fn visuals_mode_background() {
        let mut button = styled(HighlightMode::Background);

        button.pressed = false;
        button.highlighted = false;
        let (icon, bg) = button.active_visuals();
        assert_eq!(icon_rgb(icon), BASE_RGB);
        assert_eq!(bg, BASE_BG);

        button.highlighted = true;
        let (icon, bg) = button.active_visuals();
        assert_eq!(icon_rgb(icon), BASE_RGB);
        assert_eq!(bg, HIGHLIGHT_BG);

        // pressed wins over highlighted
        button.pressed = true;
        for highlighted in [false, true] {
            button.highlighted = highlighted;
            let (icon, bg) = button.active_visuals();
            assert_eq!(icon_rgb(icon), BASE_RGB);
            assert_eq!(bg, PRESSED_BG);
        }
    }

    #[test]
    fn visuals_mode_icon() {
        let mut button = styled(HighlightMode::Icon);

        for pressed in [false, true] {
            button.pressed = pressed;
            let want_bg = if pressed { PRESSED_BG } else { BASE_BG };

            button.highlighted = false;
            let (icon, bg) = button.active_visuals();
            assert_eq!(icon_rgb(icon), BASE_RGB);
            assert_eq!(bg, want_bg);

            button.highlighted = true;
            let (icon, bg) = button.active_visuals();
            assert_eq!(icon_rgb(icon), TINT_RGB);
            assert_eq!(bg, want_bg);
        }
    }

    #[test]
    fn highlight_materialisation_matches_mode() {
        let button = styled(HighlightMode::None);
        assert!(button.highlight_bg_colour.is_none());
        assert!(button.highlight_icon.is_none());

        let button = styled(HighlightMode::Background);
        assert!(button.highlight_bg_colour.is_some());
        assert!(button.highlight_icon.is_none());

        let button = styled(HighlightMode::Icon);
        assert!(button.highlight_bg_colour.is_none());
        assert!(button.highlight_icon.is_some());
    }

    #[test]
    fn set_icon_rebuilds_highlight_icon() {
        let mut button = styled(HighlightMode::Icon);
        button.set_icon(Some(solid_icon(48, Argb::rgb(0xc0, 0x00, 0x00))));

        let tinted = button.highlight_icon.as_ref().unwrap().pixel(24, 24);
        assert_eq!((tinted.r, tinted.g, tinted.b), TINT_RGB);
    }

    #[test]
    fn set_checked_is_idempotent_and_silent() {
        let notified = Rc::new(RefCell::new(Vec::new()));
        let seen = notified.clone();

        let mut button = RoundButton::new(metrics());
        button.set_checkable(true);
        button.set_on_checked_change(Box::new(move |_, checked| {
            seen.borrow_mut().push(checked);
        }));

        button.dirty.set(false);
        button.set_checked(true);
        assert!(button.needs_redraw());

        button.dirty.set(false);
        button.set_checked(true);
        assert!(!button.needs_redraw());

        assert!(notified.borrow().is_empty());
    }

    #[test]
    fn tap_toggles_and_notifies_when_checkable() {
        let notified = Rc::new(RefCell::new(Vec::new()));
        let seen = notified.clone();

        let mut button = RoundButton::new(metrics());
        button.set_checkable(true);
        button.set_on_checked_change(Box::new(move |button, checked| {
            assert_eq!(button.is_checked(), checked);
            seen.borrow_mut().push(checked);
        }));

        button.handle_pointer(&Pointer::Down(Point::zero()));
        button.handle_pointer(&Pointer::Up(Point::zero()));

        assert!(button.is_checked());
        assert_eq!(*notified.borrow(), vec![true]);

        button.handle_pointer(&Pointer::Down(Point::zero()));
        button.handle_pointer(&Pointer::Up(Point::zero()));

        assert!(!button.is_checked());
        assert_eq!(*notified.borrow(), vec![true, false]);
    }

    #[test]
    fn tap_does_nothing_when_not_checkable() {
        let notified = Rc::new(RefCell::new(Vec::new()));
        let seen = notified.clone();

        let mut button = RoundButton::new(metrics());
        button.set_on_checked_change(Box::new(move |_, checked| {
            seen.borrow_mut().push(checked);
        }));

        button.handle_pointer(&Pointer::Down(Point::zero()));
        button.handle_pointer(&Pointer::Up(Point::zero()));

        assert!(!button.is_checked());
        assert!(notified.borrow().is_empty());
    }

    #[test]
    fn checkable_cleared_before_tap_lands() {
        let mut button = RoundButton::new(metrics());
        button.set_checkable(true);

        button.handle_pointer(&Pointer::Down(Point::zero()));
        button.set_checkable(false);
        button.handle_pointer(&Pointer::Up(Point::zero()));

        assert!(!button.is_checked());
    }

    #[test]
    fn pointer_state_machine() {
        let mut button = RoundButton::new(metrics());

        for release in [Pointer::Up(Point::zero()), Pointer::Cancel,
                        Pointer::Outside, Pointer::HoverExit] {
            button.handle_pointer(&Pointer::Down(Point::zero()));
            assert!(button.pressed);

            button.handle_pointer(&release);
            assert!(!button.pressed);
        }
    }

    #[test]
    fn move_events_are_not_consumed() {
        let mut button = RoundButton::new(metrics());

        assert!(!button.handle_pointer(&Pointer::Move(Point::zero())));
        assert!(button.handle_pointer(&Pointer::Down(Point::zero())));
    }

    #[test]
    fn content_block_height() {
        let icon = Some(Size::new(48, 48));

        assert_eq!(content_height(icon, 15, 10), 73);
        // empty label contributes no height and no spacing
        assert_eq!(content_height(icon, 0, 10), 48);
        assert_eq!(content_height(None, 15, 10), 15);
        assert_eq!(content_height(None, 0, 10), 0);
    }

    #[test]
    fn reset_state_clears_everything() {
        let mut button = RoundButton::new(metrics());
        button.set_checkable(true);
        button.set_checked(true);
        button.set_highlighted(true);
        button.handle_pointer(&Pointer::Down(Point::zero()));

        button.reset_state();

        assert!(!button.pressed);
        assert!(!button.highlighted);
        assert!(!button.is_checked());
        assert!(button.needs_redraw());
    }

    fn draw_into(button: &RoundButton) -> FrameBuf<Bgr888, [Bgr888; 64 * 64]> {
        let mut frame = FrameBuf::new([Bgr888::BLACK; 64 * 64], 64, 64);
        button.draw(&mut frame).unwrap();
        frame
    }

    #[test]
    fn rounded_background_spares_the_corners() {
        let mut button = RoundButton::new(metrics());
        button.set_bg_colour(Argb::rgb(0xc0, 0x10, 0x10));

        let frame = draw_into(&button);
        assert_eq!(frame.data[0], Bgr888::BLACK);
        assert_eq!(frame.data[32 * 64 + 32], Bgr888::new(0xc0, 0x10, 0x10));

        button.set_radius(0.0);
        let frame = draw_into(&button);
        assert_eq!(frame.data[0], Bgr888::new(0xc0, 0x10, 0x10));
    }

    #[test]
    fn draw_clears_redraw_request() {
        let button = RoundButton::new(metrics());
        assert!(button.needs_redraw());

        draw_into(&button);
        assert!(!button.needs_redraw());
    }

    #[test]
    fn badge_only_drawn_while_checked_and_checkable() {
        let badge_colour = Argb::rgb(0x00, 0xc0, 0x00);
        let corner = 64 * 64 - 1;

        let mut button = RoundButton::new(metrics());
        button.set_radius(0.0);
        button.set_checked_badge(Some(solid_icon(4, badge_colour)));
        button.set_checkable(true);

        let frame = draw_into(&button);
        assert_ne!(frame.data[corner], badge_colour.bgr());

        button.set_checked(true);
        let frame = draw_into(&button);
        assert_eq!(frame.data[corner], badge_colour.bgr());

        button.set_checkable(false);
        let frame = draw_into(&button);
        assert_ne!(frame.data[corner], badge_colour.bgr());
    }
}
