//! Navigation state: scrolled header, mobile menu, active section link

use crate::consts::HEADER_SCROLL_THRESHOLD;

/// Whether the header should carry the `scrolled` class
#[inline]
pub fn header_scrolled(scroll_y: f64) -> bool {
    scroll_y > HEADER_SCROLL_THRESHOLD
}

/// Mobile menu open/closed state
///
/// The hamburger's `active` class and the nav list's `open` class always
/// mirror `open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuState {
    pub open: bool,
}

impl MenuState {
    /// Hamburger click
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Nav link click
    pub fn close(&mut self) {
        self.open = false;
    }
}

/// Anchor a nav link must carry to point at `section_id`
pub fn section_anchor(section_id: &str) -> String {
    format!("#{section_id}")
}

/// Index of the nav link whose href is exactly `#<section_id>`
pub fn active_link_index<'a, I>(hrefs: I, section_id: &str) -> Option<usize>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let anchor = section_anchor(section_id);
    hrefs
        .into_iter()
        .position(|href| href == Some(anchor.as_str()))
}

pub const HEADER_ID: &str = "header";
pub const HAMBURGER_ID: &str = "hamburger";
pub const NAV_LIST_ID: &str = "nav-list";
pub const NAV_LINK_SELECTOR: &str = ".nav-list ul a";
pub const SECTION_SELECTOR: &str = "section[id]";

/// Wire the scrolled header, mobile menu and active-section highlighting (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn install(page: &crate::page::Page) -> crate::page::PageResult<()> {
    install_header(page)?;
    install_menu(page)?;
    install_section_tracking(page)?;
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn install_header(page: &crate::page::Page) -> crate::page::PageResult<()> {
    use crate::page::{listen_passive, set_class};

    let Some(header) = page.element(HEADER_ID) else {
        return Ok(());
    };
    let scroll_page = page.clone();
    listen_passive(page.window(), "scroll", move |_event| {
        set_class(&header, "scrolled", header_scrolled(scroll_page.scroll_y()));
    })
}

#[cfg(target_arch = "wasm32")]
fn install_menu(page: &crate::page::Page) -> crate::page::PageResult<()> {
    use std::cell::Cell;
    use std::rc::Rc;

    use crate::page::{listen, set_class};

    let (Some(hamburger), Some(nav_list)) = (page.element(HAMBURGER_ID), page.element(NAV_LIST_ID))
    else {
        return Ok(());
    };
    let menu = Rc::new(Cell::new(MenuState::default()));

    let sync = {
        let hamburger = hamburger.clone();
        move |state: MenuState| {
            set_class(&hamburger, "active", state.open);
            set_class(&nav_list, "open", state.open);
        }
    };
    let sync = Rc::new(sync);

    {
        let menu = menu.clone();
        let sync = sync.clone();
        listen(&hamburger, "click", move |_event| {
            let mut state = menu.get();
            state.toggle();
            menu.set(state);
            sync(state);
        })?;
    }

    for link in page.query_all(NAV_LINK_SELECTOR) {
        let menu = menu.clone();
        let sync = sync.clone();
        listen(&link, "click", move |_event| {
            let mut state = menu.get();
            state.close();
            menu.set(state);
            sync(state);
        })?;
    }
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn install_section_tracking(page: &crate::page::Page) -> crate::page::PageResult<()> {
    use crate::consts::SECTION_ROOT_MARGIN;
    use crate::page::{ObserveOptions, observe, set_class};

    let sections = page.query_all(SECTION_SELECTOR);
    if sections.is_empty() {
        return Ok(());
    }
    let links = page.query_all(NAV_LINK_SELECTOR);
    let options = ObserveOptions {
        root_margin: Some(SECTION_ROOT_MARGIN),
        threshold: None,
    };
    observe(&sections, options, move |entry, _observer| {
        for link in &links {
            set_class(link, "active", false);
        }
        let hrefs: Vec<_> = links.iter().map(|l| l.get_attribute("href")).collect();
        let id = entry.target().id();
        if let Some(i) = active_link_index(hrefs.iter().map(|h| h.as_deref()), &id) {
            set_class(&links[i], "active", true);
        }
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_threshold() {
        assert!(!header_scrolled(0.0));
        assert!(!header_scrolled(60.0));
        assert!(header_scrolled(60.5));
        assert!(header_scrolled(900.0));
    }

    #[test]
    fn test_menu_toggle_and_close() {
        let mut menu = MenuState::default();
        assert!(menu.toggle());
        assert!(!menu.toggle());
        menu.toggle();
        menu.close();
        assert!(!menu.open);
        // Closing a closed menu is a no-op
        menu.close();
        assert!(!menu.open);
    }

    #[test]
    fn test_active_link_exact_match() {
        let hrefs = [Some("#home"), Some("#about"), None, Some("#projects")];
        assert_eq!(active_link_index(hrefs, "about"), Some(1));
        assert_eq!(active_link_index(hrefs, "projects"), Some(3));
        assert_eq!(active_link_index(hrefs, "abou"), None);
        assert_eq!(active_link_index(hrefs, "contact"), None);
    }

    #[test]
    fn test_active_link_no_normalization() {
        let hrefs = [Some("#About"), Some("/#about")];
        assert_eq!(active_link_index(hrefs, "about"), None);
    }
}
