//! DOM helpers shared by the components.
//!
//! - **User feedback**: `show_toast` for transient messages, `alert` for
//!   conditions that make a view unusable.
//! - **Input parsing**: turning raw `<input>` values into the typed form fields.

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

const TOAST_DURATION_MS: u32 = 3000;

/// Displays a temporary notification at the bottom of the screen.
///
/// The message is inserted as text, never as markup, because it may echo a
/// backend error. The toast removes itself after a few seconds.
pub fn show_toast(message: &str) {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) else {
        return;
    };
    toast.set_text_content(Some(message));
    let toast: HtmlElement = toast.unchecked_into();
    toast.set_class_name("toast");
    let style = toast.style();
    for (property, value) in [
        ("position", "fixed"),
        ("bottom", "20px"),
        ("left", "50%"),
        ("transform", "translateX(-50%)"),
        ("background", "rgba(0, 0, 0, 0.8)"),
        ("color", "#fff"),
        ("padding", "10px 20px"),
        ("border-radius", "4px"),
        ("z-index", "10000"),
    ] {
        style.set_property(property, value).ok();
    }

    if body.append_child(&toast).is_ok() {
        Timeout::new(TOAST_DURATION_MS, move || toast.remove()).forget();
    }
}

/// Blocking browser alert.
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(err) = window.alert_with_message(message) {
            log::warn!("alert failed: {err:?}");
        }
    }
}

/// `None` for a blank input or anything that is not an integer.
pub fn parse_optional_int(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

/// `None` for a blank input or anything that is not a finite number.
pub fn parse_optional_float(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

/// `None` for a blank input, the text otherwise.
pub fn optional_text(raw: String) -> Option<String> {
    if raw.trim().is_empty() {
        None
    } else {
        Some(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_inputs_parse_or_become_none() {
        assert_eq!(parse_optional_int(" 100 "), Some(100));
        assert_eq!(parse_optional_int(""), None);
        assert_eq!(parse_optional_int("1.5"), None);
        assert_eq!(parse_optional_float("0.25"), Some(0.25));
        assert_eq!(parse_optional_float("NaN"), None);
        assert_eq!(parse_optional_float("abc"), None);
    }

    #[test]
    fn blank_text_becomes_none() {
        assert_eq!(optional_text("  ".to_string()), None);
        assert_eq!(optional_text("en".to_string()), Some("en".to_string()));
    }
}
