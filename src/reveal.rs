//! Visibility-triggered one-shot effects
//!
//! Reveal-on-scroll staggers elements into four delay tiers. Skill bars fill
//! to their `data-width` percentage. Both fire once per element.

use std::collections::HashSet;

use crate::consts::{REVEAL_TIER_DELAY_MS, REVEAL_TIERS};

/// Delay tier for the `index`-th reveal element
#[inline]
pub fn reveal_tier(index: usize) -> usize {
    index % REVEAL_TIERS
}

/// Delay before a tier's reveal fires (ms)
#[inline]
pub fn tier_delay_ms(tier: usize) -> u32 {
    u32::try_from(tier)
        .unwrap_or(u32::MAX)
        .saturating_mul(REVEAL_TIER_DELAY_MS)
}

/// Delay read back from an element's `data-delay` attribute. Missing or bad values mean no delay.
pub fn delay_from_attr(attr: Option<&str>) -> u32 {
    attr.and_then(|s| s.trim().parse::<usize>().ok())
        .map(tier_delay_ms)
        .unwrap_or(0)
}

/// Skill bar width from its `data-width` attribute, as a CSS percentage
///
/// Values are clamped to 0..=100. Returns `None` for missing or non-numeric input.
pub fn skill_width(attr: Option<&str>) -> Option<String> {
    let value: f64 = attr?.trim().parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(format!("{}%", value.clamp(0.0, 100.0)))
}

/// Tracks which targets already fired
#[derive(Debug, Clone, Default)]
pub struct OneShot {
    fired: HashSet<usize>,
}

impl OneShot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true the first time `target` is seen, false ever after
    pub fn fire(&mut self, target: usize) -> bool {
        self.fired.insert(target)
    }

    pub fn has_fired(&self, target: usize) -> bool {
        self.fired.contains(&target)
    }

    pub fn count(&self) -> usize {
        self.fired.len()
    }
}

pub const REVEAL_SELECTOR: &str = ".reveal";
pub const SKILL_SELECTOR: &str = ".skill-fill";

/// Tag every `.reveal` element with its delay tier and reveal it on first sight (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn install_reveal(page: &crate::page::Page) -> crate::page::PageResult<()> {
    use crate::consts::{REVEAL_ROOT_MARGIN, REVEAL_THRESHOLD};
    use crate::page::{ObserveOptions, js_err, observe_once, set_class};

    let targets = page.query_all(REVEAL_SELECTOR);
    if targets.is_empty() {
        return Ok(());
    }
    for (i, el) in targets.iter().enumerate() {
        el.set_attribute("data-delay", &reveal_tier(i).to_string())
            .map_err(js_err("setAttribute"))?;
    }

    let options = ObserveOptions {
        root_margin: Some(REVEAL_ROOT_MARGIN),
        threshold: Some(REVEAL_THRESHOLD),
    };
    let timer_page = page.clone();
    observe_once(&targets, options, move |el| {
        let delay = delay_from_attr(el.get_attribute("data-delay").as_deref());
        if let Err(err) = timer_page.set_timeout(delay, move || set_class(&el, "visible", true)) {
            log::warn!("Reveal skipped: {}", err);
        }
    })?;
    log::debug!("Watching {} reveal elements", targets.len());
    Ok(())
}

/// Fill each `.skill-fill` to its `data-width` on first sight (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn install_skill_bars(page: &crate::page::Page) -> crate::page::PageResult<()> {
    use wasm_bindgen::JsCast;
    use web_sys::HtmlElement;

    use crate::consts::{SKILL_FILL_DELAY_MS, SKILL_THRESHOLD};
    use crate::page::{ObserveOptions, observe_once};

    let targets = page.query_all(SKILL_SELECTOR);
    if targets.is_empty() {
        return Ok(());
    }
    let options = ObserveOptions {
        root_margin: None,
        threshold: Some(SKILL_THRESHOLD),
    };
    let timer_page = page.clone();
    observe_once(&targets, options, move |el| {
        let Some(width) = skill_width(el.get_attribute("data-width").as_deref()) else {
            log::warn!("Skill bar without a numeric data-width, leaving it empty");
            return;
        };
        let Ok(fill) = el.dyn_into::<HtmlElement>() else {
            return;
        };
        let result = timer_page.set_timeout(SKILL_FILL_DELAY_MS, move || {
            if let Err(err) = fill.style().set_property("width", &width) {
                log::warn!("Skill bar width not set: {:?}", err);
            }
        });
        if let Err(err) = result {
            log::warn!("Skill bar skipped: {}", err);
        }
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiers_cycle_through_four_buckets() {
        let tiers: Vec<_> = (0..9).map(reveal_tier).collect();
        assert_eq!(tiers, [0, 1, 2, 3, 0, 1, 2, 3, 0]);
        assert_eq!(tier_delay_ms(0), 0);
        assert_eq!(tier_delay_ms(3), 360);
    }

    #[test]
    fn test_delay_from_attr() {
        assert_eq!(delay_from_attr(Some("2")), 240);
        assert_eq!(delay_from_attr(None), 0);
        assert_eq!(delay_from_attr(Some("soon")), 0);
    }

    #[test]
    fn test_oversized_delay_saturates() {
        assert_eq!(tier_delay_ms(usize::MAX), u32::MAX);
        assert_eq!(tier_delay_ms(40_000_000), u32::MAX);
        assert_eq!(delay_from_attr(Some("99999999999")), u32::MAX);
    }

    #[test]
    fn test_skill_width() {
        assert_eq!(skill_width(Some("85")).as_deref(), Some("85%"));
        assert_eq!(skill_width(Some(" 72.5 ")).as_deref(), Some("72.5%"));
        assert_eq!(skill_width(Some("140")).as_deref(), Some("100%"));
        assert_eq!(skill_width(Some("-5")).as_deref(), Some("0%"));
        assert_eq!(skill_width(Some("wide")), None);
        assert_eq!(skill_width(Some("NaN")), None);
        assert_eq!(skill_width(None), None);
    }

    #[test]
    fn test_one_shot_fires_once_per_target() {
        let mut once = OneShot::new();
        // Element 0 enters, leaves, re-enters
        assert!(once.fire(0));
        assert!(!once.fire(0));
        assert!(!once.fire(0));
        assert!(once.fire(3));
        assert!(once.has_fired(3));
        assert!(!once.has_fired(1));
        assert_eq!(once.count(), 2);
    }
}
