//! Portfolio FX - client-side behavior for a static portfolio page
//!
//! Core modules:
//! - `overrides`: Admin-saved content overrides read from LocalStorage
//! - `particles`: Ambient floating particle generation
//! - `nav`: Header, mobile menu and active-section state
//! - `typing`: Role typing effect state machine
//! - `reveal`: One-shot reveal and skill bar timing
//! - `counter`: Stat counter animation
//! - `filter`: Project card filtering
//! - `contact`: Contact form validation
//! - `page`: Typed DOM bindings (wasm only)
//!
//! Each feature's decisions live in plain functions that run and test
//! natively; the DOM wiring next to them only builds for wasm32.

pub mod contact;
pub mod counter;
pub mod filter;
pub mod nav;
pub mod overrides;
#[cfg(target_arch = "wasm32")]
pub mod page;
pub mod particles;
pub mod reveal;
pub mod typing;

pub use contact::{ContactError, ContactField, ContactFields, FormMessage};
pub use counter::Counter;
pub use filter::FILTER_ALL;
pub use nav::MenuState;
pub use overrides::{Overrides, OverridesError, Patch};
pub use particles::{Keyframes, Particle};
pub use reveal::OneShot;
pub use typing::{TypingFrame, TypingPhase, TypingState};

/// Page behavior constants
pub mod consts {
    /// Header gets the `scrolled` class past this vertical offset (px)
    pub const HEADER_SCROLL_THRESHOLD: f64 = 60.0;
    /// Band of the viewport that counts as the "current" section
    pub const SECTION_ROOT_MARGIN: &str = "-40% 0px -55% 0px";

    /// Number of ambient particles
    pub const PARTICLE_COUNT: usize = 60;
    /// Particle accent colors (picked 50/50)
    pub const PARTICLE_COLORS: [&str; 2] = ["#7c3aed", "#06b6d4"];

    /// Roles cycled by the typing effect
    pub const ROLES: [&str; 6] = [
        "AI/ML Developer",
        "Java Developer",
        "Samsung PRISM Researcher",
        "Problem Solver",
        "Computer Science Engineer",
        "Open Source Enthusiast",
    ];
    /// Delay before the first typing step (ms)
    pub const TYPING_START_DELAY_MS: u32 = 1000;
    /// Per-character delay while typing (ms)
    pub const TYPE_DELAY_MS: u32 = 80;
    /// Per-character delay while deleting (ms)
    pub const DELETE_DELAY_MS: u32 = 50;
    /// Hold on the fully typed role (ms)
    pub const HOLD_FULL_MS: u32 = 1800;
    /// Hold on the empty line before the next role (ms)
    pub const HOLD_EMPTY_MS: u32 = 400;

    /// Number of stagger buckets for reveal animations
    pub const REVEAL_TIERS: usize = 4;
    /// Delay per reveal tier (ms)
    pub const REVEAL_TIER_DELAY_MS: u32 = 120;
    pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -60px 0px";
    pub const REVEAL_THRESHOLD: f64 = 0.1;

    /// Delay before a visible skill bar fills (ms)
    pub const SKILL_FILL_DELAY_MS: u32 = 200;
    pub const SKILL_THRESHOLD: f64 = 0.3;

    /// Frames a stat counter takes to reach its target
    pub const COUNTER_FRAMES: u32 = 40;
    pub const COUNTER_THRESHOLD: f64 = 0.5;
    /// Stat counters started when the about section shows: (element id, target)
    pub const STAT_COUNTERS: [(&str, u32); 3] =
        [("stat-projects", 10), ("stat-certs", 5), ("stat-exp", 1)];

    /// How long the contact success message stays up (ms)
    pub const FORM_MESSAGE_CLEAR_MS: u32 = 5000;
}
