//! Stat counter animation
//!
//! Counts from 0 to a target over a fixed number of display frames.

use crate::consts::COUNTER_FRAMES;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Counter {
    pub target: f64,
    pub value: f64,
    step: f64,
}

impl Counter {
    pub fn new(target: u32) -> Self {
        let target = target as f64;
        Self {
            target,
            value: 0.0,
            step: target / COUNTER_FRAMES as f64,
        }
    }

    /// Advance one frame and return the text to display
    pub fn advance(&mut self) -> String {
        self.value = (self.value + self.step).min(self.target);
        self.display()
    }

    /// Floored value with a `+` suffix
    pub fn display(&self) -> String {
        format!("{}+", self.value.floor() as u64)
    }

    /// True once the target is reached; no more frames are needed
    pub fn is_done(&self) -> bool {
        self.value >= self.target
    }
}

/// Section whose first appearance starts the counters
pub const ABOUT_SECTION_ID: &str = "about";

/// Start the stat counters the first time the about section shows (WASM only)
///
/// Fires once globally: the observer disconnects after the first trigger.
#[cfg(target_arch = "wasm32")]
pub fn install(page: &crate::page::Page) -> crate::page::PageResult<()> {
    use crate::consts::{COUNTER_THRESHOLD, STAT_COUNTERS};
    use crate::page::{ObserveOptions, observe};

    let Some(about) = page.element(ABOUT_SECTION_ID) else {
        return Ok(());
    };
    let options = ObserveOptions {
        root_margin: None,
        threshold: Some(COUNTER_THRESHOLD),
    };
    let frame_page = page.clone();
    let mut started = false;
    observe(&[about], options, move |_entry, observer| {
        observer.disconnect();
        if std::mem::replace(&mut started, true) {
            return;
        }
        for (id, target) in STAT_COUNTERS {
            if let Some(el) = frame_page.element(id) {
                animate(frame_page.clone(), el, Counter::new(target));
            }
        }
    })?;
    Ok(())
}

/// One counter frame per display refresh until the target is reached
#[cfg(target_arch = "wasm32")]
fn animate(page: crate::page::Page, el: web_sys::Element, mut counter: Counter) {
    let next_page = page.clone();
    let result = page.request_animation_frame(move |_time| {
        el.set_text_content(Some(&counter.advance()));
        if !counter.is_done() {
            animate(next_page, el, counter);
        }
    });
    if let Err(err) = result {
        log::warn!("Counter animation stopped: {}", err);
    }
}
