//! Search result extraction from the catalog's server-rendered markup.

use html_scraper::{Html, Selector};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// A degree course row from the search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub name: String,
    pub links: Vec<CurriculumLink>,
}

/// A curriculum link attached to a course row.
///
/// `url` is the numeric `oidCurriculum` identifier from the anchor's href,
/// not a full URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurriculumLink {
    pub name: String,
    pub url: String,
}

static CURRICULUM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"oidCurriculum=(\d{4,})").unwrap());

/// Parse course rows from a results page, preserving document order.
///
/// Rows whose `.denominazione` is empty are dropped entirely; anchors whose
/// href carries no curriculum identifier are dropped from the row's links
/// without dropping the row itself.
pub fn parse_search_results(html: &Html) -> Vec<SearchResult> {
    let corso_sel = Selector::parse(".corso").unwrap();
    let name_sel = Selector::parse(".denominazione").unwrap();
    let link_sel = Selector::parse(".sito > a, .sito > * > a").unwrap();

    let mut results = Vec::new();

    for corso in html.select(&corso_sel) {
        let name = corso
            .select(&name_sel)
            .next()
            .map(|el| el.text().collect::<String>())
            .unwrap_or_default();
        let name = name.trim();
        if name.is_empty() {
            continue;
        }

        let mut links = Vec::new();
        for anchor in corso.select(&link_sel) {
            let href = anchor.attr("href").unwrap_or_default();
            let Some(caps) = CURRICULUM_RE.captures(href) else {
                continue;
            };
            let text = anchor.text().collect::<String>();
            links.push(CurriculumLink {
                name: text.trim().to_string(),
                url: caps[1].to_string(),
            });
        }

        results.push(SearchResult {
            name: name.to_string(),
            links,
        });
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a results page from (name, [(link text, href)]) rows.
    fn build_results_html(courses: &[(&str, &[(&str, &str)])]) -> String {
        let mut html = String::from("<html><body><div id=\"app\">");
        for (name, links) in courses {
            html.push_str("<div class=\"corso\">");
            html.push_str(&format!("<div class=\"denominazione\">{name}</div>"));
            html.push_str("<div class=\"sito\">");
            for (text, href) in *links {
                html.push_str(&format!("<a href=\"{href}\">{text}</a>"));
            }
            html.push_str("</div></div>");
        }
        html.push_str("</div></body></html>");
        html
    }

    #[test]
    fn test_parse_two_courses_in_order() {
        let html_str = build_results_html(&[
            (
                "INGEGNERIA INFORMATICA",
                &[("Curriculum unico", "visualizzaCurriculum.seam?oidCurriculum=1234")],
            ),
            (
                "MATEMATICA",
                &[("Base", "visualizzaCurriculum.seam?oidCurriculum=5678&anno=2023")],
            ),
        ]);
        let html = Html::parse_document(&html_str);
        let results = parse_search_results(&html);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "INGEGNERIA INFORMATICA");
        assert_eq!(results[0].links.len(), 1);
        assert_eq!(results[0].links[0].name, "Curriculum unico");
        assert_eq!(results[0].links[0].url, "1234");
        assert_eq!(results[1].name, "MATEMATICA");
        assert_eq!(results[1].links[0].url, "5678");
    }

    #[test]
    fn test_parse_skips_anchor_without_curriculum_id() {
        let html_str = build_results_html(&[(
            "FISICA",
            &[
                ("sito del corso", "https://www.unipa.it/dipartimenti/fisica"),
                ("Curriculum", "visualizzaCurriculum.seam?oidCurriculum=9012"),
            ],
        )]);
        let html = Html::parse_document(&html_str);
        let results = parse_search_results(&html);

        // The course survives; only the non-matching anchor is dropped.
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].links.len(), 1);
        assert_eq!(results[0].links[0].url, "9012");
    }

    #[test]
    fn test_parse_requires_at_least_four_digits() {
        let html_str = build_results_html(&[(
            "CHIMICA",
            &[("Curriculum", "visualizzaCurriculum.seam?oidCurriculum=123")],
        )]);
        let html = Html::parse_document(&html_str);
        let results = parse_search_results(&html);

        assert_eq!(results.len(), 1);
        assert!(results[0].links.is_empty());
    }

    #[test]
    fn test_parse_skips_empty_name_course() {
        let html_str = build_results_html(&[
            ("   ", &[("Curriculum", "x?oidCurriculum=1234")]),
            ("BIOLOGIA", &[]),
        ]);
        let html = Html::parse_document(&html_str);
        let results = parse_search_results(&html);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "BIOLOGIA");
    }

    #[test]
    fn test_parse_skips_course_without_name_element() {
        let html_str = r#"<html><body>
            <div class="corso">
                <div class="sito"><a href="x?oidCurriculum=1234">Curriculum</a></div>
            </div>
        </body></html>"#;
        let html = Html::parse_document(html_str);
        assert!(parse_search_results(&html).is_empty());
    }

    #[test]
    fn test_parse_finds_nested_anchor() {
        // Anchors one level below `.sito` (e.g. wrapped in a span) still count.
        let html_str = r#"<html><body>
            <div class="corso">
                <div class="denominazione">ARCHITETTURA</div>
                <div class="sito">
                    <span><a href="x?oidCurriculum=4321">Nuovo ordinamento</a></span>
                </div>
            </div>
        </body></html>"#;
        let html = Html::parse_document(html_str);
        let results = parse_search_results(&html);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].links.len(), 1);
        assert_eq!(results[0].links[0].name, "Nuovo ordinamento");
        assert_eq!(results[0].links[0].url, "4321");
    }

    #[test]
    fn test_parse_ignores_anchor_outside_sito() {
        let html_str = r#"<html><body>
            <div class="corso">
                <div class="denominazione">GIURISPRUDENZA</div>
                <a href="x?oidCurriculum=7777">fuori</a>
                <div class="sito"></div>
            </div>
        </body></html>"#;
        let html = Html::parse_document(html_str);
        let results = parse_search_results(&html);

        assert_eq!(results.len(), 1);
        assert!(results[0].links.is_empty());
    }

    #[test]
    fn test_parse_trims_name_and_link_text() {
        let html_str = r#"<html><body>
            <div class="corso">
                <div class="denominazione">  LETTERE  </div>
                <div class="sito"><a href="x?oidCurriculum=8888">  Moderno  </a></div>
            </div>
        </body></html>"#;
        let html = Html::parse_document(html_str);
        let results = parse_search_results(&html);

        assert_eq!(results[0].name, "LETTERE");
        assert_eq!(results[0].links[0].name, "Moderno");
    }

    #[test]
    fn test_parse_empty_page() {
        let html = Html::parse_document("<html><body></body></html>");
        assert!(parse_search_results(&html).is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let result = SearchResult {
            name: "INFORMATICA".to_string(),
            links: vec![CurriculumLink {
                name: "Curriculum unico".to_string(),
                url: "1234".to_string(),
            }],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "INFORMATICA",
                "links": [{ "name": "Curriculum unico", "url": "1234" }]
            })
        );
    }
}
