//! Typing effect state machine
//!
//! Cycles through a list of roles, typing each one character at a time,
//! holding, deleting it, then moving on. The driver calls [`TypingState::step`]
//! and waits `delay_ms` before calling it again.

use crate::consts::{DELETE_DELAY_MS, HOLD_EMPTY_MS, HOLD_FULL_MS, TYPE_DELAY_MS};

/// Current phase of the effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypingPhase {
    /// Revealing characters
    #[default]
    Typing,
    /// Full role shown, next step starts deleting
    PausingFull,
    /// Removing characters
    Deleting,
    /// Line empty, next step advances to the next role
    PausingEmpty,
}

/// Output of one step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingFrame {
    /// Text to display
    pub text: String,
    /// Wait before the next step (ms)
    pub delay_ms: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypingState {
    pub role_index: usize,
    /// Characters of the current role currently shown
    pub char_index: usize,
    pub phase: TypingPhase,
}

/// First `chars` characters of `s`, never splitting a code point
fn prefix(s: &str, chars: usize) -> &str {
    match s.char_indices().nth(chars) {
        Some((byte, _)) => &s[..byte],
        None => s,
    }
}

impl TypingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one step. Returns `None` if there are no roles.
    pub fn step<S: AsRef<str>>(&mut self, roles: &[S]) -> Option<TypingFrame> {
        if roles.is_empty() {
            return None;
        }
        // Role list may have shrunk since the last step
        if self.role_index >= roles.len() {
            self.role_index = 0;
            self.char_index = 0;
            self.phase = TypingPhase::Typing;
        }

        if self.phase == TypingPhase::PausingEmpty {
            self.role_index = (self.role_index + 1) % roles.len();
            self.char_index = 0;
            self.phase = TypingPhase::Typing;
        }

        let role = roles[self.role_index].as_ref();
        let len = role.chars().count();

        let delay_ms = match self.phase {
            TypingPhase::Typing | TypingPhase::PausingEmpty => {
                self.char_index = (self.char_index + 1).min(len);
                if self.char_index == len {
                    self.phase = TypingPhase::PausingFull;
                    HOLD_FULL_MS
                } else {
                    TYPE_DELAY_MS
                }
            }
            TypingPhase::PausingFull | TypingPhase::Deleting => {
                self.char_index = self.char_index.saturating_sub(1);
                if self.char_index == 0 {
                    self.phase = TypingPhase::PausingEmpty;
                    HOLD_EMPTY_MS
                } else {
                    self.phase = TypingPhase::Deleting;
                    DELETE_DELAY_MS
                }
            }
        };

        Some(TypingFrame {
            text: prefix(role, self.char_index).to_string(),
            delay_ms,
        })
    }
}

#[cfg(target_arch = "wasm32")]
pub use driver::{TYPED_TEXT_ID, TypingHandle, start};

/// Timer chain that drives the effect in the browser
#[cfg(target_arch = "wasm32")]
mod driver {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use web_sys::Element;

    use super::TypingState;
    use crate::consts::TYPING_START_DELAY_MS;
    use crate::page::{Page, PageResult};

    pub const TYPED_TEXT_ID: &str = "typed-text";

    #[derive(Debug, Default)]
    struct Chain {
        cancelled: Cell<bool>,
        pending: Cell<Option<i32>>,
    }

    /// Stops the typing chain. Dropping the handle leaves the effect running.
    #[derive(Debug, Clone)]
    pub struct TypingHandle {
        page: Page,
        chain: Rc<Chain>,
    }

    impl TypingHandle {
        pub fn cancel(&self) {
            self.chain.cancelled.set(true);
            if let Some(id) = self.chain.pending.take() {
                self.page.clear_timeout(id);
            }
            log::debug!("Typing effect cancelled");
        }

        pub fn is_cancelled(&self) -> bool {
            self.chain.cancelled.get()
        }
    }

    /// Start typing `roles` into `#typed-text` after the initial delay.
    /// Returns `None` if the element is missing.
    pub fn start(page: &Page, roles: &'static [&'static str]) -> PageResult<Option<TypingHandle>> {
        let Some(element) = page.element(TYPED_TEXT_ID) else {
            return Ok(None);
        };
        let chain = Rc::new(Chain::default());
        let state = Rc::new(RefCell::new(TypingState::new()));
        schedule(
            page.clone(),
            element,
            roles,
            state,
            chain.clone(),
            TYPING_START_DELAY_MS,
        )?;
        Ok(Some(TypingHandle {
            page: page.clone(),
            chain,
        }))
    }

    fn schedule(
        page: Page,
        element: Element,
        roles: &'static [&'static str],
        state: Rc<RefCell<TypingState>>,
        chain: Rc<Chain>,
        delay_ms: u32,
    ) -> PageResult<()> {
        let next_page = page.clone();
        let next_chain = chain.clone();
        let id = page.set_timeout(delay_ms, move || {
            next_chain.pending.set(None);
            if next_chain.cancelled.get() {
                return;
            }
            let frame = state.borrow_mut().step(roles);
            let Some(frame) = frame else {
                return;
            };
            element.set_text_content(Some(&frame.text));
            if let Err(err) = schedule(next_page, element, roles, state, next_chain, frame.delay_ms) {
                log::warn!("Typing effect stopped: {}", err);
            }
        })?;
        chain.pending.set(Some(id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::ROLES;

    fn run(state: &mut TypingState, roles: &[&str], steps: usize) -> Vec<TypingFrame> {
        (0..steps).filter_map(|_| state.step(roles)).collect()
    }

    #[test]
    fn test_empty_roles() {
        let mut state = TypingState::new();
        let roles: [&str; 0] = [];
        assert_eq!(state.step(&roles), None);
        assert_eq!(state, TypingState::new());
    }

    #[test]
    fn test_types_then_holds() {
        let mut state = TypingState::new();
        let frames = run(&mut state, &["Hey"], 3);
        let texts: Vec<_> = frames.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, ["H", "He", "Hey"]);
        assert_eq!(frames[0].delay_ms, TYPE_DELAY_MS);
        assert_eq!(frames[1].delay_ms, TYPE_DELAY_MS);
        assert_eq!(frames[2].delay_ms, HOLD_FULL_MS);
        assert_eq!(state.phase, TypingPhase::PausingFull);
    }

    #[test]
    fn test_deletes_then_rests() {
        let mut state = TypingState::new();
        run(&mut state, &["Hey"], 3);
        let frames = run(&mut state, &["Hey"], 3);
        let texts: Vec<_> = frames.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, ["He", "H", ""]);
        assert_eq!(frames[0].delay_ms, DELETE_DELAY_MS);
        assert_eq!(frames[2].delay_ms, HOLD_EMPTY_MS);
        assert_eq!(state.phase, TypingPhase::PausingEmpty);
    }

    #[test]
    fn test_cycles_roles_in_order() {
        let roles = ["AI/ML Developer", "Java Developer"];
        let mut state = TypingState::new();
        // Initial display is empty
        let mut seen = vec![String::new()];
        let cycle: usize = roles.iter().map(|r| 2 * r.len()).sum();
        seen.extend(run(&mut state, &roles, cycle).into_iter().map(|f| f.text));

        let mut expected = vec![String::new()];
        for role in roles {
            for n in 1..=role.len() {
                expected.push(role[..n].to_string());
            }
            for n in (0..role.len()).rev() {
                expected.push(role[..n].to_string());
            }
        }
        assert_eq!(seen, expected);

        // Wraps back to the first role
        assert_eq!(state.step(&roles).unwrap().text, "A");
        assert_eq!(state.role_index, 0);
    }

    #[test]
    fn test_full_roles_loop_indefinitely() {
        let mut state = TypingState::new();
        let cycle: usize = ROLES.iter().map(|r| 2 * r.chars().count()).sum();
        for _ in 0..3 {
            let frames = run(&mut state, &ROLES, cycle);
            assert_eq!(frames.last().unwrap().text, "");
            assert_eq!(state.role_index, ROLES.len() - 1);
            assert_eq!(state.phase, TypingPhase::PausingEmpty);
        }
    }

    #[test]
    fn test_multibyte_roles() {
        let mut state = TypingState::new();
        let texts: Vec<_> = run(&mut state, &["héllo✨"], 6)
            .into_iter()
            .map(|f| f.text)
            .collect();
        assert_eq!(texts, ["h", "hé", "hél", "héll", "héllo", "héllo✨"]);
    }

    #[test]
    fn test_empty_role_is_skipped_quickly() {
        let mut state = TypingState::new();
        let frames = run(&mut state, &["", "Go"], 3);
        assert_eq!(frames[0].text, "");
        assert_eq!(frames[0].delay_ms, HOLD_FULL_MS);
        assert_eq!(frames[1].text, "");
        assert_eq!(frames[1].delay_ms, HOLD_EMPTY_MS);
        assert_eq!(frames[2].text, "G");
        assert_eq!(state.role_index, 1);
    }
}
