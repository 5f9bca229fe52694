//! CSS selector-based extraction
//!
//! Uses the scraper crate to select elements by CSS selectors. Selectors are
//! compiled once, alongside the retailer profiles.

use scraper::{ElementRef, Html, Selector};

/// Element text with runs of whitespace collapsed to single spaces
pub fn element_text(el: &ElementRef) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Image sources for every element matched by `selectors`, in selector
/// order. For each element the first non-empty attribute in `attributes`
/// wins.
pub fn extract_image_sources(
    document: &Html,
    selectors: &[Selector],
    attributes: &[&str],
) -> Vec<String> {
    let mut sources = Vec::new();

    for selector in selectors {
        for el in document.select(selector) {
            let src = attributes
                .iter()
                .filter_map(|attr| el.value().attr(attr))
                .map(str::trim)
                .find(|v| !v.is_empty());
            if let Some(src) = src {
                sources.push(src.to_string());
            }
        }
    }

    sources
}

/// Text of the first element with non-empty text, trying selectors in order
pub fn extract_first_text(document: &Html, selectors: &[Selector]) -> Option<String> {
    selectors.iter().find_map(|selector| {
        document
            .select(selector)
            .map(|el| element_text(&el))
            .find(|text| !text.is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(list: &[&str]) -> Vec<Selector> {
        list.iter().map(|s| Selector::parse(s).unwrap()).collect()
    }

    #[test]
    fn test_image_sources_attribute_priority() {
        let html = r#"
        <div>
            <img class="main" src="https://a.example/1.jpg" data-src="https://a.example/lazy.jpg">
            <img class="main" data-src="https://a.example/2.jpg">
            <img class="main" src="  " data-old-hires="https://a.example/3.jpg">
            <img class="main">
        </div>
        "#;
        let document = Html::parse_document(html);

        let sources = extract_image_sources(&document, &compile(&[".main"]), &["src", "data-src", "data-old-hires"]);
        assert_eq!(
            sources,
            vec![
                "https://a.example/1.jpg",
                "https://a.example/2.jpg",
                "https://a.example/3.jpg",
            ]
        );
    }

    #[test]
    fn test_image_sources_follow_selector_order() {
        let html = r#"
            <img class="thumb" src="t.jpg">
            <img id="hero" src="h.jpg">
        "#;
        let document = Html::parse_document(html);

        let sources = extract_image_sources(&document, &compile(&["#hero", ".thumb"]), &["src"]);
        assert_eq!(sources, vec!["h.jpg", "t.jpg"]);
    }

    #[test]
    fn test_first_text_skips_empty_matches() {
        let html = r#"
        <html>
        <body>
            <h1 id="productTitle">   </h1>
            <span class="product-title">
                Wireless
                <b>Mouse</b>
            </span>
        </body>
        </html>
        "#;
        let document = Html::parse_document(html);

        let title = extract_first_text(&document, &compile(&["#productTitle", ".product-title"]));
        assert_eq!(title.unwrap(), "Wireless Mouse");

        assert!(extract_first_text(&document, &compile(&[".missing"])).is_none());
    }
}
