//! Battery state tracking: live broadcast state, demo shadow state, and the
//! level-test sweep animation.
//!
//! The tracker owns two records of the same shape. The *live* record is
//! updated from battery-changed events; the *demo* record is a shadow used by
//! visual QA, populated by explicit demo commands. [`BatteryTracker::status`]
//! returns whichever is active, so the renderer never needs to know demo mode
//! exists.
//!
//! Nothing here persists: state is memory-only and resets with the process.
//!
//! # Demo Commands
//!
//! Commands arrive as strings (they come off a command bundle in the
//! original). Entering demo snapshots the live level and plug state so
//! exiting restores exactly what was showing before. A "battery" command
//! clamps any parseable level into [0, 100]; a malformed number leaves the
//! field untouched (the original didn't guard the parse at all and would
//! abort the dispatch - a documented defect, degraded here instead of
//! reproduced).
//!
//! # Level-Test Sweep
//!
//! The original also answered a test broadcast with a self-reposting runnable
//! that ramped the level 0 -> 100 -> 0 every 200 ms and then restored the
//! saved state. That loop is redesigned as [`LevelTestSweep`], a value owned
//! by the host and advanced from the frame loop; dropping it (or letting it
//! finish) is the cancellation, not a checked flag inside a callback.

use core::fmt::Write;
use std::time::{Duration, Instant};

use heapless::String;

// =============================================================================
// Battery Record
// =============================================================================

/// Sentinel for "no battery event received yet". A renderer seeing this level
/// draws nothing.
pub const UNKNOWN_LEVEL: i32 = -1;

/// How the device is being charged, from the battery broadcast's plug extra.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PlugType {
    #[default]
    None,
    Ac,
    Usb,
    Wireless,
}

impl PlugType {
    pub fn is_plugged(self) -> bool {
        self != Self::None
    }
}

/// Battery health reported by the platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Health {
    #[default]
    Unknown,
    Good,
    Overheat,
    Dead,
    OverVoltage,
    Failure,
    Cold,
}

/// Charge status reported by the platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ChargeStatus {
    #[default]
    Unknown,
    Charging,
    Discharging,
    NotCharging,
    Full,
}

/// One battery record. The tracker keeps a live instance and a demo shadow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatteryStatus {
    /// 0-100, or [`UNKNOWN_LEVEL`] before the first event.
    pub level: i32,
    pub plug_type: PlugType,
    pub plugged: bool,
    pub health: Health,
    pub status: ChargeStatus,
    pub technology: String<10>,
    pub voltage_mv: i32,
    pub temperature_tenths_c: i32,
}

impl Default for BatteryStatus {
    fn default() -> Self {
        Self {
            level: UNKNOWN_LEVEL,
            plug_type: PlugType::None,
            plugged: false,
            health: Health::Unknown,
            status: ChargeStatus::Unknown,
            technology: String::new(),
            voltage_mv: 0,
            temperature_tenths_c: 0,
        }
    }
}

// =============================================================================
// Battery Event
// =============================================================================

/// Payload of a battery-changed event. `raw_level` / `raw_scale` arrive
/// unnormalized; the tracker converts them to a percentage.
#[derive(Clone, Debug)]
pub struct BatteryEvent {
    pub raw_level: i32,
    pub raw_scale: i32,
    pub plug_type: PlugType,
    pub health: Health,
    pub status: ChargeStatus,
    pub technology: String<10>,
    pub voltage_mv: i32,
    pub temperature_tenths_c: i32,
}

impl BatteryEvent {
    /// Event with just a level and plug state, everything else nominal. The
    /// simulator and the sweep build their synthetic events through this.
    pub fn synthetic(level: i32, plug_type: PlugType) -> Self {
        let mut technology = String::new();
        let _ = write!(technology, "Li-ion");
        Self {
            raw_level: level,
            raw_scale: 100,
            plug_type,
            health: Health::Good,
            status: if plug_type.is_plugged() {
                ChargeStatus::Charging
            } else {
                ChargeStatus::Discharging
            },
            technology,
            voltage_mv: 3800,
            temperature_tenths_c: 250,
        }
    }
}

// =============================================================================
// Demo Commands
// =============================================================================

/// Demo-mode commands, with string arguments as they arrive off the wire.
#[derive(Clone, Copy, Debug)]
pub enum DemoCommand<'a> {
    Enter,
    Exit,
    Battery {
        level: Option<&'a str>,
        plugged: Option<&'a str>,
    },
}

// =============================================================================
// Tracker
// =============================================================================

/// Live + demo battery state and the accessibility description derived from
/// whichever is active.
#[derive(Debug, Default)]
pub struct BatteryTracker {
    live: BatteryStatus,
    demo: BatteryStatus,
    demo_mode: bool,
    description: String<32>,
}

impl BatteryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The active record: the demo shadow while demo mode is on, the live
    /// record otherwise.
    pub fn status(&self) -> &BatteryStatus {
        if self.demo_mode { &self.demo } else { &self.live }
    }

    pub fn demo_mode(&self) -> bool {
        self.demo_mode
    }

    /// Accessibility text for the current level ("Battery 57 percent").
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Ingest a battery-changed event into the live record.
    pub fn handle_event(&mut self, event: &BatteryEvent) {
        // A scale of zero would divide the level away; default to the
        // platform's nominal 100.
        let scale = if event.raw_scale == 0 { 100 } else { event.raw_scale };
        self.live.level = (100.0 * event.raw_level as f32 / scale as f32).round() as i32;
        self.live.plug_type = event.plug_type;
        self.live.plugged = event.plug_type.is_plugged();
        self.live.health = event.health;
        self.live.status = event.status;
        self.live.technology = event.technology.clone();
        self.live.voltage_mv = event.voltage_mv;
        self.live.temperature_tenths_c = event.temperature_tenths_c;
        self.refresh_description();
    }

    /// Apply a demo command. Commands that don't match the current mode are
    /// ignored, mirroring the original's dispatch guards.
    pub fn dispatch_demo_command(&mut self, command: DemoCommand) {
        match command {
            DemoCommand::Enter if !self.demo_mode => {
                self.demo_mode = true;
                // Snapshot what is showing so Exit restores it exactly.
                self.demo.level = self.live.level;
                self.demo.plugged = self.live.plugged;
                self.refresh_description();
            }
            DemoCommand::Exit if self.demo_mode => {
                self.demo_mode = false;
                self.refresh_description();
            }
            DemoCommand::Battery { level, plugged } if self.demo_mode => {
                if let Some(l) = level.and_then(|s| s.parse::<i32>().ok()) {
                    self.demo.level = l.clamp(0, 100);
                }
                if let Some(p) = plugged {
                    self.demo.plugged = p.eq_ignore_ascii_case("true");
                }
                self.refresh_description();
            }
            _ => {}
        }
    }

    fn refresh_description(&mut self) {
        let level = self.status().level;
        self.description.clear();
        let _ = write!(self.description, "Battery {level} percent");
    }
}

// =============================================================================
// Level-Test Sweep
// =============================================================================

/// Interval between sweep steps (the original's repost delay).
const SWEEP_TICK: Duration = Duration::from_millis(200);

/// Ramps the level 0 -> 100 -> 0 one step per tick, then emits one final
/// event restoring the state captured at start. The host drops the sweep once
/// [`LevelTestSweep::finished`] reports true; dropping it early cancels it.
#[derive(Debug)]
pub struct LevelTestSweep {
    cur_level: i32,
    incr: i32,
    saved_level: i32,
    saved_plug: PlugType,
    next_tick: Instant,
    done: bool,
}

impl LevelTestSweep {
    /// Capture the tracker's current state and start sweeping from zero.
    pub fn start(tracker: &BatteryTracker, now: Instant) -> Self {
        Self {
            cur_level: 0,
            incr: 1,
            saved_level: tracker.status().level,
            saved_plug: tracker.status().plug_type,
            next_tick: now,
            done: false,
        }
    }

    pub fn finished(&self) -> bool {
        self.done
    }

    /// Advance the sweep. Returns a synthetic event when a step is due:
    /// plugged-in while ramping up, unplugged on the way down, and the saved
    /// state once the ramp has run back past zero.
    pub fn tick(&mut self, now: Instant) -> Option<BatteryEvent> {
        if self.done || now < self.next_tick {
            return None;
        }
        self.next_tick = now + SWEEP_TICK;

        if self.cur_level < 0 {
            self.done = true;
            return Some(BatteryEvent::synthetic(self.saved_level, self.saved_plug));
        }

        let plug = if self.incr > 0 { PlugType::Ac } else { PlugType::None };
        let event = BatteryEvent::synthetic(self.cur_level, plug);

        self.cur_level += self.incr;
        if self.cur_level == 100 {
            self.incr = -1;
        }
        Some(event)
    }
}
