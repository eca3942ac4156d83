// Crate-level lints: Allow common graphics patterns that pedantic lints flag
#![allow(clippy::cast_possible_truncation)] // Intentional f32->i32, u32->i32 casts for pixel math
#![allow(clippy::cast_precision_loss)] // u32/i32->f32 in graphics calculations
#![allow(clippy::cast_sign_loss)] // i32->u32 where we know sign is positive

//! Status-bar battery meter simulator.
//!
//! Renders the settings-reactive battery meter of a status bar (and its
//! quick-settings twin) in an `embedded-graphics` simulator window, driven by
//! synthetic battery events instead of platform broadcasts. Everything the
//! platform would normally provide - persisted settings, display metrics,
//! battery broadcasts - is simulated here at the seams the meter exposes:
//! [`settings::SettingsStore`], [`config::DisplayConfig`], and
//! [`tracker::BatteryEvent`].
//!
//! # Controls
//!
//! | Key | Action |
//! |-----|--------|
//! | `S` | Cycle through the nine battery styles (including the hidden ones) |
//! | `Q` | Toggle host container (status bar / quick settings) |
//! | `Up`/`Down` | Battery level +/- 5 (demo commands while demo mode is on) |
//! | `C` | Toggle the charger |
//! | `T` | Toggle the status-bar tint override |
//! | `D` | Enter / exit demo mode |
//! | `L` | Start / cancel the level-test sweep |
//!
//! Key repeat is ignored to prevent toggle spam when holding keys.
//!
//! The meter recomputes its size on every settings change *and* every tracker
//! update: the percent-only style's width depends on the digit count of the
//! current level.

mod charge_colors;
mod colors;
mod config;
mod layout;
mod settings;
mod styles;
mod thresholds;
mod tracker;
mod widgets;

use core::fmt::Write as _;
use std::thread;
use std::time::Instant;

use colors::BLACK;
use config::{DisplayConfig, FRAME_TIME, SCREEN_HEIGHT, SCREEN_WIDTH, ViewKind};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use settings::{MeterSettings, STATUS_BAR_BATTERY, SimSettings};
use tracker::{BatteryEvent, BatteryTracker, DemoCommand, LevelTestSweep, PlugType};
use widgets::BatteryMeter;

/// Tint pushed by the simulated status bar when toggled on (an orange theme
/// accent).
const TINT_COLOR: Rgb565 = Rgb565::new(31, 32, 0);

/// Simulated display density (pixels per dp).
const DENSITY: f32 = 2.0;

/// Synthetic battery level the simulator starts from.
const INITIAL_LEVEL: i32 = 57;

/// Center the meter's layout size inside the simulator screen.
fn centered_bounds(size: Size) -> Rectangle {
    let x = (SCREEN_WIDTH.saturating_sub(size.width)) / 2;
    let y = (SCREEN_HEIGHT.saturating_sub(size.height)) / 2;
    Rectangle::new(Point::new(x as i32, y as i32), size)
}

fn main() {
    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(6).build();
    let mut window = Window::new("Battery Meter Sim", &output_settings);

    // Simulated platform state behind the meter's seams.
    let mut store = SimSettings::new();
    let mut view = ViewKind::StatusBar;
    let mut config = DisplayConfig::new(DENSITY, view);
    let mut meter = BatteryMeter::new(MeterSettings::load(&store, false), config);

    // Synthetic battery source of truth.
    let mut tracker = BatteryTracker::new();
    let mut sim_level = INITIAL_LEVEL;
    let mut sim_plug = PlugType::None;
    tracker.handle_event(&BatteryEvent::synthetic(sim_level, sim_plug));

    let mut tint_on = false;
    let mut sweep: Option<LevelTestSweep> = None;
    let mut last_description = String::new();

    display.clear(BLACK).ok();
    window.update(&display);

    loop {
        let frame_start = Instant::now();

        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => return,
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    if repeat {
                        continue;
                    }
                    match keycode {
                        Keycode::S => {
                            let next = meter.settings().style.next();
                            store.set(STATUS_BAR_BATTERY, next.setting_value());
                            meter.apply_settings(MeterSettings::load(
                                &store,
                                view == ViewKind::QuickSettings,
                            ));
                        }
                        Keycode::Q => {
                            view = match view {
                                ViewKind::StatusBar => ViewKind::QuickSettings,
                                ViewKind::QuickSettings => ViewKind::StatusBar,
                            };
                            config = DisplayConfig::new(DENSITY, view);
                            meter.apply_config(config);
                            // The tile never hides its battery; re-snapshot
                            // so the Gone coercion applies.
                            meter.apply_settings(MeterSettings::load(
                                &store,
                                view == ViewKind::QuickSettings,
                            ));
                        }
                        Keycode::Up | Keycode::Down => {
                            let step = if keycode == Keycode::Up { 5 } else { -5 };
                            if tracker.demo_mode() {
                                // Route through the string command path the
                                // platform's demo bundle would use.
                                let target = tracker.status().level + step;
                                let mut arg: heapless::String<8> = heapless::String::new();
                                let _ = write!(arg, "{target}");
                                tracker.dispatch_demo_command(DemoCommand::Battery {
                                    level: Some(&arg),
                                    plugged: None,
                                });
                            } else {
                                sim_level = (sim_level + step).clamp(0, 100);
                                tracker.handle_event(&BatteryEvent::synthetic(sim_level, sim_plug));
                            }
                        }
                        Keycode::C => {
                            sim_plug = if sim_plug.is_plugged() { PlugType::None } else { PlugType::Ac };
                            if tracker.demo_mode() {
                                tracker.dispatch_demo_command(DemoCommand::Battery {
                                    level: None,
                                    plugged: Some(if sim_plug.is_plugged() { "true" } else { "false" }),
                                });
                            } else {
                                tracker.handle_event(&BatteryEvent::synthetic(sim_level, sim_plug));
                            }
                        }
                        Keycode::T => {
                            tint_on = !tint_on;
                            meter.set_tint(tint_on.then_some(TINT_COLOR));
                        }
                        Keycode::D => {
                            let command = if tracker.demo_mode() {
                                DemoCommand::Exit
                            } else {
                                DemoCommand::Enter
                            };
                            tracker.dispatch_demo_command(command);
                        }
                        Keycode::L => {
                            // Starting while one runs cancels it by dropping.
                            sweep = match sweep {
                                Some(_) => None,
                                None => Some(LevelTestSweep::start(&tracker, Instant::now())),
                            };
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        // Advance the level-test sweep; it emits ordinary battery events.
        if let Some(s) = sweep.as_mut() {
            if let Some(event) = s.tick(Instant::now()) {
                tracker.handle_event(&event);
            }
        }
        if sweep.as_ref().is_some_and(LevelTestSweep::finished) {
            sweep = None;
        }

        // Layout depends on the live level (percent width follows the digit
        // count), so it runs every frame like the host's requestLayout would.
        let status = tracker.status().clone();
        let size = layout::meter_size(meter.settings().style, &config, status.level);
        meter.set_bounds(centered_bounds(size));

        display.clear(BLACK).ok();
        meter.draw(&mut display, &status).ok();
        window.update(&display);

        // Mirror the accessibility string to the terminal when it changes.
        if tracker.description() != last_description {
            last_description.clear();
            last_description.push_str(tracker.description());
            println!("{last_description}");
        }

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_TIME {
            thread::sleep(FRAME_TIME - elapsed);
        }
    }
}
