//! The cycling rectangle demo
//!
//! Five fills, a pause, a rotation, forever. One [`Demo::tick`] per main-loop
//! iteration; each tick programs one window, sends one row or counts one pause
//! tick, and returns.

use display_interface::DisplayError;

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

use crate::tftlcd::driver::TftLcd;
use crate::tftlcd::interface::Transport;
use crate::tftlcd::orientation::Orientation;

/// Pause length between the last fill and the rotation, in ticks
pub const DEFAULT_HOLD_TICKS: u32 = 0xFF000;

/// Demo tuning
///
/// The pause is counted in calls to [`Demo::tick`], not in time. How long it lasts
/// on the wall clock depends entirely on how often the caller ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoConfig {
    /// Rotation happens once the pause counter exceeds this, so the pause
    /// lasts `hold_ticks + 1` ticks
    pub hold_ticks: u32,
    /// Sleep between ticks in the firmware main loop
    pub tick_interval_ms: u32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            hold_ticks: DEFAULT_HOLD_TICKS,
            tick_interval_ms: 1,
        }
    }
}

impl DemoConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hold_ticks(mut self, ticks: u32) -> Self {
        self.hold_ticks = ticks;
        self
    }

    pub fn tick_interval_ms(mut self, ms: u32) -> Self {
        self.tick_interval_ms = ms;
        self
    }
}

/// Rectangle corners as the script gives them, before any clipping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x1: u16,
    pub y1: u16,
    pub x2: u16,
    pub y2: u16,
}

impl Rect {
    pub const fn new(x1: u16, y1: u16, x2: u16, y2: u16) -> Self {
        Rect { x1, y1, x2, y2 }
    }
}

/// Where the demo is in its script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    /// Full screen, white
    #[default]
    Background,
    /// Full screen minus a 1px border, black
    Inset,
    Red,
    Green,
    Blue,
    White,
    /// Count ticks, then rotate
    Hold,
}

/// What a step does when ticked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Fill { rect: Rect, color: Rgb565 },
    Hold,
}

// Small squares, inside 240x240 so they never clip in either family
const SQUARES: [(Rect, Rgb565); 4] = [
    (Rect::new(10, 10, 50, 50), Rgb565::RED),
    (Rect::new(11, 51, 80, 90), Rgb565::GREEN),
    (Rect::new(12, 91, 120, 130), Rgb565::BLUE),
    (Rect::new(13, 131, 160, 170), Rgb565::WHITE),
];

impl Step {
    /// Script order
    pub const ALL: [Step; 7] = [
        Step::Background,
        Step::Inset,
        Step::Red,
        Step::Green,
        Step::Blue,
        Step::White,
        Step::Hold,
    ];

    /// Position in the script, 0..=6
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Next step given whether this one finished
    pub const fn next(self, done: bool) -> Step {
        if !done {
            return self;
        }
        match self {
            Step::Background => Step::Inset,
            Step::Inset => Step::Red,
            Step::Red => Step::Green,
            Step::Green => Step::Blue,
            Step::Blue => Step::White,
            Step::White => Step::Hold,
            Step::Hold => Step::Background,
        }
    }

    /// Whether this step needs the geometry reset to the orientation's full screen first
    pub const fn is_full_screen(self) -> bool {
        matches!(self, Step::Background | Step::Inset)
    }

    /// What to do for this step in the given orientation
    pub fn action(self, orientation: Orientation) -> Action {
        let geometry = orientation.geometry();
        let (right, bottom) = (geometry.last_column(), geometry.last_row());
        match self {
            Step::Background => Action::Fill {
                rect: Rect::new(0, 0, right, bottom),
                color: Rgb565::WHITE,
            },
            Step::Inset => Action::Fill {
                rect: Rect::new(1, 1, right - 1, bottom - 1),
                color: Rgb565::BLACK,
            },
            Step::Red | Step::Green | Step::Blue | Step::White => {
                let (rect, color) = SQUARES[(self.index() - Step::Red.index()) as usize];
                Action::Fill { rect, color }
            }
            Step::Hold => Action::Hold,
        }
    }
}

/// Runs the demo script on a [`TftLcd`]
pub struct Demo<T> {
    tft: TftLcd<T>,
    config: DemoConfig,
    step: Step,
    hold: u64,
    cycles: u32,
}

impl<T> Demo<T>
where
    T: Transport,
{
    /// Start the script at [`Step::Background`]; `tft` should not be mid-stream
    pub fn new(tft: TftLcd<T>, config: DemoConfig) -> Self {
        debug_assert!(!tft.is_streaming(), "demo started on a busy driver");
        log::info!("Demo starting, rotating every {} ticks", config.hold_ticks);
        Demo {
            tft,
            config,
            step: Step::Background,
            hold: 0,
            cycles: 0,
        }
    }

    /// Make one unit of progress
    pub fn tick(&mut self) -> Result<(), DisplayError> {
        let orientation = self.tft.orientation();
        match self.step.action(orientation) {
            Action::Fill { rect, color } => {
                if self.step.is_full_screen() {
                    self.tft.set_geometry(orientation.geometry());
                }
                let done = self
                    .tft
                    .fill_rect(rect.x1, rect.y1, rect.x2, rect.y2, color)?
                    .is_complete();
                if done && self.step == Step::White {
                    self.hold = 0;
                }
                self.advance(done);
            }
            Action::Hold => {
                self.hold += 1;
                let elapsed = self.hold > u64::from(self.config.hold_ticks);
                if elapsed {
                    self.tft.advance_orientation()?;
                    self.hold = 0;
                    self.cycles += 1;
                    log::info!("Demo cycle {} complete", self.cycles);
                }
                self.advance(elapsed);
            }
        }
        Ok(())
    }

    fn advance(&mut self, done: bool) {
        let next = self.step.next(done);
        if next != self.step {
            log::debug!("Demo step {:?} -> {:?}", self.step, next);
            self.step = next;
        }
    }
}

impl<T> Demo<T> {
    /// Step the next tick will run
    pub fn step(&self) -> Step {
        self.step
    }

    /// Ticks counted so far in [`Step::Hold`]
    pub fn hold_ticks(&self) -> u64 {
        self.hold
    }

    /// Completed script runs, one per rotation
    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    pub fn tft(&self) -> &TftLcd<T> {
        &self.tft
    }

    /// Give back the driver
    pub fn into_inner(self) -> TftLcd<T> {
        self.tft
    }
}
