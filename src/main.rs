//! Portfolio FX entry point
//!
//! Installs every page behavior once the module loads.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_page {
    use wasm_bindgen::JsCast;
    use web_sys::PageTransitionEvent;

    use portfolio_fx::consts::ROLES;
    use portfolio_fx::page::{Page, PageResult, listen};
    use portfolio_fx::typing::TypingHandle;
    use portfolio_fx::{Overrides, contact, counter, filter, nav, particles, reveal, typing};

    /// Log a failed installer and keep going
    fn install(name: &str, result: PageResult<()>) {
        if let Err(err) = result {
            log::warn!("{} disabled: {}", name, err);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Portfolio FX starting...");

        let page = match Page::new() {
            Ok(page) => page,
            Err(err) => {
                log::error!("No page to attach to: {}", err);
                return;
            }
        };

        if let Some(overrides) = Overrides::load() {
            let applied = overrides.apply(&page);
            log::info!("Applied {} content overrides", applied);
        }

        let seed = js_sys::Date::now() as u64;
        match particles::spawn(&page, seed) {
            Ok(count) => log::info!("Spawned {} particles", count),
            Err(err) => log::warn!("Particles disabled: {}", err),
        }

        install("Navigation", nav::install(&page));

        start_typing(&page);

        install("Reveal", reveal::install_reveal(&page));
        install("Skill bars", reveal::install_skill_bars(&page));
        install("Project filter", filter::install(&page));
        install("Contact form", contact::install(&page));
        install("Counters", counter::install(&page));

        log::info!("Portfolio FX running!");
    }

    /// Start the typing effect; its timer chain stops when the page is unloaded
    fn start_typing(page: &Page) {
        let handle: TypingHandle = match typing::start(page, &ROLES) {
            Ok(Some(handle)) => handle,
            Ok(None) => return,
            Err(err) => {
                log::warn!("Typing effect disabled: {}", err);
                return;
            }
        };
        install(
            "Typing cleanup",
            listen(page.window(), "pagehide", move |event| {
                // Pages kept in the back/forward cache resume where they were
                let cached = event
                    .dyn_ref::<PageTransitionEvent>()
                    .is_some_and(|e| e.persisted());
                if !cached {
                    handle.cancel();
                }
            }),
        );
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_page::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Portfolio FX (native) starting...");
    log::info!("There is no document to attach to natively - run with `trunk serve` for the page");

    println!("\nPreviewing typing effect...");
    let _ = preview_typing();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Walk one full cycle of roles, printing when each is fully typed.
/// Returns the cycle length in ms.
#[cfg(not(target_arch = "wasm32"))]
fn preview_typing() -> u64 {
    use portfolio_fx::TypingState;
    use portfolio_fx::consts::ROLES;

    let mut state = TypingState::new();
    let mut elapsed_ms: u64 = 0;
    for role in ROLES {
        let steps = 2 * role.chars().count();
        for _ in 0..steps {
            let Some(frame) = state.step(&ROLES) else {
                return elapsed_ms;
            };
            elapsed_ms += u64::from(frame.delay_ms);
            if frame.text == role {
                println!("  {:>6} ms  {}", elapsed_ms, frame.text);
            }
        }
    }
    println!("✓ Cycled {} roles in {:.1} s", ROLES.len(), elapsed_ms as f64 / 1000.0);
    elapsed_ms
}
