//! Footer copyright year.

use web_sys::Document;

use crate::consts;

/// Write the current calendar year into `#currentYear`, if present.
pub fn install(doc: &Document) {
    let Some(span) = doc.get_element_by_id(consts::CURRENT_YEAR_ID) else {
        log::debug!("no #{} element; footer year not written", consts::CURRENT_YEAR_ID);
        return;
    };
    let year = js_sys::Date::new_0().get_full_year();
    span.set_text_content(Some(&year.to_string()));
}
