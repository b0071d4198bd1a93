//! Project card filtering

/// Filter value that shows every card
pub const FILTER_ALL: &str = "all";

/// Whether a card with `category` stays visible under `filter`
///
/// Exact string comparison; a card without a category only shows under `all`.
#[inline]
pub fn card_visible(filter: &str, category: Option<&str>) -> bool {
    filter == FILTER_ALL || category == Some(filter)
}

/// Visibility for every card, in order
pub fn visibility<'a, I>(filter: &str, categories: I) -> Vec<bool>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    categories
        .into_iter()
        .map(|category| card_visible(filter, category))
        .collect()
}

pub const BUTTON_SELECTOR: &str = ".filter-btn";
pub const CARD_SELECTOR: &str = ".project-card";

/// Wire the filter buttons (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn install(page: &crate::page::Page) -> crate::page::PageResult<()> {
    use std::rc::Rc;

    use crate::page::{listen, set_class};

    let buttons = Rc::new(page.query_all(BUTTON_SELECTOR));
    let cards = Rc::new(page.query_all(CARD_SELECTOR));

    for (index, button) in buttons.iter().enumerate() {
        let buttons = buttons.clone();
        let cards = cards.clone();
        listen(button, "click", move |_event| {
            for b in buttons.iter() {
                set_class(b, "active", false);
            }
            let clicked = &buttons[index];
            set_class(clicked, "active", true);

            let filter = clicked.get_attribute("data-filter").unwrap_or_default();
            let categories: Vec<_> = cards
                .iter()
                .map(|c| c.get_attribute("data-category"))
                .collect();
            let shown = visibility(&filter, categories.iter().map(|c| c.as_deref()));
            for (card, visible) in cards.iter().zip(shown) {
                set_class(card, "hidden", !visible);
            }
            log::debug!("Filter '{}' applied", filter);
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARDS: [Option<&str>; 5] = [Some("web"), Some("ml"), Some("web"), None, Some("Web")];

    #[test]
    fn test_all_shows_everything() {
        assert_eq!(visibility(FILTER_ALL, CARDS), [true; 5]);
    }

    #[test]
    fn test_exact_category_match() {
        assert_eq!(visibility("web", CARDS), [true, false, true, false, false]);
        assert_eq!(visibility("ml", CARDS), [false, true, false, false, false]);
    }

    #[test]
    fn test_no_normalization() {
        assert_eq!(visibility("web ", CARDS), [false; 5]);
        assert_eq!(visibility("ALL", CARDS), [false, false, false, false, false]);
    }

    #[test]
    fn test_unknown_filter_hides_all() {
        assert_eq!(visibility("java", CARDS), [false; 5]);
    }
}
