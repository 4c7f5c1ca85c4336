//! Hidden-field extraction and postback construction for the JSF search form.
//!
//! The catalog is a JSF/Seam application: every postback must echo the
//! server-issued `javax.faces.ViewState` token plus the hidden fields of the
//! search form, with the query year substituted in.

use html_scraper::{Html, Selector};

use crate::unipa::types::{Anno, CourseType};

/// Name of the JSF view-state token field.
pub const VIEW_STATE_FIELD: &str = "javax.faces.ViewState";
/// Name of the year input inside the search form.
pub const ANNO_FIELD: &str = "frc:annoDecorate:anno";
/// The search form's JSF identifier, echoed as a field of the same name.
const FORM_ID: &str = "frc";
const TIPO_CORSO_FIELD: &str = "frc:tipoCorsoDecorate:idTipoCorso";
const SUGGEST_CORSO_FIELD: &str = "frc:suggestCorso";
/// Token observed on freshly rendered pages that carry no explicit value.
const DEFAULT_VIEW_STATE: &str = "j_id1";

/// Form state scraped from the search page and round-tripped on the postback.
///
/// Ephemeral: extracted fresh for every search, never persisted. Fields keep
/// document order so the replayed submission matches what a browser sends.
#[derive(Debug, Clone)]
pub struct FormState {
    pub view_state: String,
    /// Hidden fields of `form#frc`, minus the view-state and year inputs.
    pub fields: Vec<(String, String)>,
}

impl FormState {
    /// Scrape the view-state token and hidden form fields from the search
    /// page. Never fails: a missing token falls back to the default and the
    /// optional filter fields are injected when the form omits them.
    pub fn extract(html: &Html) -> Self {
        let view_state_sel = Selector::parse(r#"input[name="javax.faces.ViewState"]"#).unwrap();
        let hidden_sel = Selector::parse(r#"form#frc input[type="hidden"]"#).unwrap();

        let view_state = html
            .select(&view_state_sel)
            .next()
            .and_then(|input| input.attr("value"))
            .unwrap_or(DEFAULT_VIEW_STATE)
            .to_string();

        let mut fields: Vec<(String, String)> = Vec::new();
        for input in html.select(&hidden_sel) {
            let name = match input.attr("name") {
                Some(n) if !n.is_empty() => n,
                _ => continue,
            };
            // Both get fresh values at postback time.
            if name == VIEW_STATE_FIELD || name == ANNO_FIELD {
                continue;
            }
            let value = input.attr("value").unwrap_or_default().to_string();
            fields.push((name.to_string(), value));
        }

        // The form identifier is always submitted.
        set_field(&mut fields, FORM_ID, FORM_ID);

        // The course-type and suggest inputs are usually rendered as hidden
        // fields, but the postback must carry them either way.
        if !fields
            .iter()
            .any(|(name, _)| name.contains("tipoCorso") || name.contains("idTipoCorso"))
        {
            fields.push((TIPO_CORSO_FIELD.to_string(), CourseType::All.code().to_string()));
        }
        if !fields.iter().any(|(name, _)| name.contains("suggestCorso")) {
            fields.push((SUGGEST_CORSO_FIELD.to_string(), String::new()));
        }

        Self { view_state, fields }
    }

    /// Build the postback body: scraped fields in document order, then the
    /// query year and the view-state token.
    pub fn into_params(self, anno: Anno) -> Vec<(String, String)> {
        let mut params = self.fields;
        params.push((ANNO_FIELD.to_string(), anno.to_string()));
        params.push((VIEW_STATE_FIELD.to_string(), self.view_state));
        params
    }
}

fn set_field(fields: &mut Vec<(String, String)>, name: &str, value: &str) {
    if let Some(existing) = fields.iter_mut().find(|(n, _)| n == name) {
        existing.1 = value.to_string();
    } else {
        fields.push((name.to_string(), value.to_string()));
    }
}
