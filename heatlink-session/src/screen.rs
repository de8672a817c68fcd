//! Controller menu screens
//!
//! A screen is described entirely by data: how to enter it, which fields to
//! read, which extra pages to fetch and how to get back to the main menu.
//! The [`navigator`](crate::navigator) walks any screen with the same
//! algorithm.

use crate::frames::{self, DEFAULT_POLL_ATTEMPTS, NOOP_POLL, RETURN_TO_MAIN};
use crate::tags;
use heatlink_core::ExtractionRule;
use std::fmt;

/// Named menu page exposing a fixed set of telemetry fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    MainMenu,
    Water,
    Solar,
    Boiler,
    Buffer,
    Error,
}

impl Screen {
    /// Order in which one polling cycle visits the screens
    pub const CYCLE_ORDER: [Screen; 6] = [
        Screen::MainMenu,
        Screen::Water,
        Screen::Solar,
        Screen::Boiler,
        Screen::Buffer,
        Screen::Error,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::MainMenu => "main-menu",
            Screen::Water => "water",
            Screen::Solar => "solar",
            Screen::Boiler => "boiler",
            Screen::Buffer => "buffer",
            Screen::Error => "error",
        }
    }

    /// Protocol description of this screen
    pub fn layout(&self) -> &'static ScreenLayout {
        match self {
            Screen::MainMenu => &MAIN_MENU,
            Screen::Water => &WATER,
            Screen::Solar => &SOLAR,
            Screen::Boiler => &BOILER,
            Screen::Buffer => &BUFFER,
            Screen::Error => &ERROR,
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extra page fetched while staying on a screen
#[derive(Debug)]
pub struct FollowUpPage {
    pub request: &'static [u8],
    pub fields: &'static [ExtractionRule],
}

/// Confirmation the controller asks for on some returns to the main menu
#[derive(Debug)]
pub struct ExitConfirm {
    /// Return reply length that triggers the confirmation
    pub reply_length: usize,
    pub request: &'static [u8],
}

/// How to get back to the main menu
#[derive(Debug)]
pub struct ScreenExit {
    /// Flush poll sent before the return request
    pub flush: &'static [u8],
    pub back: &'static [u8],
    pub confirm: Option<ExitConfirm>,
}

/// Request frames and field rules of one screen
#[derive(Debug)]
pub struct ScreenLayout {
    /// Probe sent before the select to prime the controller cursor
    pub probe: Option<&'static [u8]>,
    pub select: &'static [u8],
    pub fields: &'static [ExtractionRule],
    pub pages: &'static [FollowUpPage],
    /// `None` for the main menu itself
    pub exit: Option<ScreenExit>,
}

/// How the navigator waits for the controller to settle on a screen
///
/// One strategy applies to every screen of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadinessStrategy {
    /// Send each probe and flush poll exactly once
    #[default]
    IntermediateProbe,
    /// Repeat each probe and flush poll until the reply has the settled
    /// length, at most `attempts` times
    BoundedPoll { attempts: usize },
}

impl ReadinessStrategy {
    /// Bounded polling with the usual attempt count
    pub fn bounded() -> Self {
        ReadinessStrategy::BoundedPoll {
            attempts: DEFAULT_POLL_ATTEMPTS,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReadinessStrategy::IntermediateProbe => "intermediate-probe",
            ReadinessStrategy::BoundedPoll { .. } => "bounded-poll",
        }
    }
}

static MAIN_MENU: ScreenLayout = ScreenLayout {
    probe: Some(&frames::main_menu::PROBE),
    select: &frames::main_menu::SELECT,
    fields: tags::MAIN_MENU_FIELDS,
    pages: &[],
    exit: None,
};

static WATER: ScreenLayout = ScreenLayout {
    probe: Some(&frames::water::PROBE),
    select: &frames::water::SELECT,
    fields: tags::WATER_FIELDS,
    pages: &[],
    exit: Some(ScreenExit {
        flush: &NOOP_POLL,
        back: &frames::water::RETURN,
        confirm: Some(ExitConfirm {
            reply_length: frames::water::CONFIRM_REPLY_LENGTH,
            request: &frames::water::CONFIRM,
        }),
    }),
};

static SOLAR: ScreenLayout = ScreenLayout {
    probe: Some(&frames::solar::PROBE),
    select: &frames::solar::SELECT,
    fields: tags::SOLAR_FIELDS,
    pages: &[],
    exit: Some(ScreenExit {
        flush: &frames::solar::FLUSH,
        back: &RETURN_TO_MAIN,
        confirm: Some(ExitConfirm {
            reply_length: frames::solar::CONFIRM_REPLY_LENGTH,
            request: &frames::solar::CONFIRM,
        }),
    }),
};

static BOILER: ScreenLayout = ScreenLayout {
    probe: Some(&frames::boiler::PROBE),
    select: &frames::boiler::SELECT,
    fields: tags::BOILER_FIELDS,
    pages: &[FollowUpPage {
        request: &frames::boiler::COUNTERS_PAGE,
        fields: tags::BOILER_COUNTER_FIELDS,
    }],
    exit: Some(ScreenExit {
        flush: &NOOP_POLL,
        back: &RETURN_TO_MAIN,
        confirm: None,
    }),
};

static BUFFER: ScreenLayout = ScreenLayout {
    probe: Some(&frames::buffer::PROBE),
    select: &frames::buffer::SELECT,
    fields: tags::BUFFER_FIELDS,
    pages: &[],
    exit: Some(ScreenExit {
        flush: &NOOP_POLL,
        back: &RETURN_TO_MAIN,
        confirm: None,
    }),
};

static ERROR: ScreenLayout = ScreenLayout {
    probe: Some(&frames::error::PROBE),
    select: &frames::error::SELECT,
    fields: tags::ERROR_FIELDS,
    pages: &[],
    exit: Some(ScreenExit {
        flush: &NOOP_POLL,
        back: &RETURN_TO_MAIN,
        confirm: None,
    }),
};
