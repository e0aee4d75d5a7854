//! Small helpers over `scraper` element handles.
//!
//! Cards on the search page are not self-contained: the summary heading and the
//! price footer follow the card anchor in document order, and the area heading
//! of a property group precedes it. These walkers cover those lookups.

use scraper::{ElementRef, Selector};

/// Text nodes trimmed, empty ones dropped, the rest concatenated.
pub fn stripped_text(element: ElementRef<'_>) -> String {
    joined_text(element, "")
}

/// Text nodes trimmed, empty ones dropped, the rest joined with `separator`.
pub fn joined_text(element: ElementRef<'_>, separator: &str) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// First descendant matching `selector`.
pub fn first_match<'a>(element: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    element.select(selector).next()
}

/// First element after the start of `element` in document order that matches.
///
/// The element's own descendants come first, then everything after it.
pub fn find_next<'a>(element: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    let mut node = *element;
    loop {
        let next = match node.first_child() {
            Some(child) => Some(child),
            None => {
                let mut cursor = Some(node);
                let mut found = None;
                while let Some(current) = cursor {
                    if let Some(sibling) = current.next_sibling() {
                        found = Some(sibling);
                        break;
                    }
                    cursor = current.parent();
                }
                found
            }
        };

        node = next?;
        if let Some(candidate) = ElementRef::wrap(node) {
            if selector.matches(&candidate) {
                return Some(candidate);
            }
        }
    }
}

/// Nearest element before `element` in document order that matches.
///
/// Walks backwards through preceding subtrees and ancestors.
pub fn find_previous<'a>(element: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    let mut node = *element;
    loop {
        let previous = match node.prev_sibling() {
            Some(mut sibling) => {
                while let Some(last) = sibling.last_child() {
                    sibling = last;
                }
                Some(sibling)
            }
            None => node.parent(),
        };

        node = previous?;
        if let Some(candidate) = ElementRef::wrap(node) {
            if selector.matches(&candidate) {
                return Some(candidate);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn sel(css: &str) -> Selector {
        Selector::parse(css).unwrap()
    }

    const PAGE: &str = r#"
        <div class="area">Zayed</div>
        <div id="group">
          <div class="area">October</div>
          <a id="first" href="/x/1"><span class="inner">one</span></a>
          <h2>after first</h2>
          <a id="second" href="/x/2"></a>
        </div>
        <footer><h2>tail</h2></footer>
    "#;

    #[test]
    fn next_prefers_descendants_then_following() {
        let doc = Html::parse_document(PAGE);
        let first = doc.select(&sel("#first")).next().unwrap();
        assert_eq!(stripped_text(find_next(first, &sel("span")).unwrap()), "one");
        assert_eq!(stripped_text(find_next(first, &sel("h2")).unwrap()), "after first");

        let second = doc.select(&sel("#second")).next().unwrap();
        assert_eq!(stripped_text(find_next(second, &sel("h2")).unwrap()), "tail");
        assert!(find_next(second, &sel("table")).is_none());
    }

    #[test]
    fn previous_finds_nearest_preceding() {
        let doc = Html::parse_document(PAGE);
        let second = doc.select(&sel("#second")).next().unwrap();
        let area = find_previous(second, &sel("div.area")).unwrap();
        assert_eq!(stripped_text(area), "October");

        let group = doc.select(&sel("#group")).next().unwrap();
        assert_eq!(stripped_text(find_previous(group, &sel("div.area")).unwrap()), "Zayed");
    }

    #[test]
    fn text_helpers_trim_each_node() {
        let doc = Html::parse_fragment("<p>  5,000,000 <b> EGP </b>\n</p>");
        let p = doc.select(&sel("p")).next().unwrap();
        assert_eq!(stripped_text(p), "5,000,000EGP");
        assert_eq!(joined_text(p, " "), "5,000,000 EGP");
    }
}
