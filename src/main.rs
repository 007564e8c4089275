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

mod colour;
mod config;
mod drawable;
mod events;
mod icon;
#[cfg(feature = "device")]
mod input_events;
mod screen;
mod theme;
mod widgets;
mod window;

use std::path::PathBuf;

use anyhow::Result;
use argh::FromArgs;
use log::{LevelFilter, info};

use crate::config::Config;
use crate::drawable::AppDrawable;
use crate::events::{Event, EventHandler, EventSender, EventSource};
use crate::screen::{DeckScreen, Screen};
use crate::window::DisplayMetrics;

/// Round-button touch deck for small Linux displays.
#[derive(FromArgs)]
struct Args {
    /// path to the config file
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,

    /// log to syslog instead of stderr
    #[argh(switch)]
    syslog: bool
}

fn main() -> Result<()> {
    let args: Args = argh::from_env();

    init_logging(args.syslog)?;

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default()
    };
    info!("Deck configured with {} buttons", config.buttons.len());

    let mut event_source = window::new_event_source(&config.window)?;
    let mut window = window::new_window(&config.window)?;

    let metrics = DisplayMetrics::from(&config.window);
    let mut screen = DeckScreen::new(&config, metrics, event_source.event_sender());

    start_threads(&config, &event_source)?;

    'running: loop {
        if screen.needs_redraw() {
            screen.draw(window.draw_target())?;
            window.flush()?;
        }

        let event = event_source.wait_event()?;
        match &event {
            Event::Quit => break 'running,
            Event::Tapped(id) => info!("Button `{}` tapped", id),
            Event::Toggled(id, checked) => info!("Button `{}` toggled to {}", id, checked),
            _ => { }
        }

        window.handle_event(&event)?;
        screen.handle_event(&event)?;
    }

    Ok(())
}

fn init_logging(use_syslog: bool) -> Result<()> {
    if use_syslog {
        syslog::init(syslog::Facility::LOG_USER, LevelFilter::Info, Some("tapdeck"))
            .map_err(|e| anyhow::anyhow!("Error initializing syslog: {}", e))?;
    } else {
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or("info")
        ).init();
    }

    Ok(())
}

#[cfg(feature = "device")]
fn start_threads<S, E>(config: &Config, events: &E) -> Result<()>
    where S: EventSender + Clone + Send + 'static,
          E: EventSource<S>
{
    crate::input_events::start_touch_events(events.event_sender(), &config.input.touch_device)
}

#[cfg(feature = "simulate")]
fn start_threads<S, E>(_config: &Config, _events: &E) -> Result<()>
    where S: EventSender,
          E: EventSource<S>
{
    Ok(())
}
