//! # Named Formatting Parameters
//!
//! Parses the string parameters of a print node (as found in XML/JSON job
//! descriptions) into the typed options of [`printer`](crate::printer).
//!
//! | Key | Applies to | Value |
//! |-----|------------|-------|
//! | `align` | text | `left`, `center`, `right` |
//! | `lang` | text | `en fr de uk da sv it es ja no` |
//! | `font` | text | `A`/`B`/`C` or `font_a`... |
//! | `smooth em ul reverse rotate dw dh` | text | `true` or `1` enables |
//! | `width height` | text | font magnification, integer |
//! | `x y` | text | absolute position, integer |
//! | `line` | feed | lines to feed, integer |
//! | `unit` | feed | vertical position, integer |
//! | `type` | cut | `feed` feeds one line first |
//!
//! Unknown enumeration values fall back to their defaults with a warning.
//! Malformed integers are [`EscPosError::InvalidParameter`].

use std::collections::HashMap;
use std::str::FromStr;

use crate::error::EscPosError;
use crate::printer::{CutOptions, FeedOptions, TextStyle};
use crate::protocol::text::{Alignment, Font, Language};

/// Parameter map of one print node
pub type Params = HashMap<String, String>;

/// Build a [`TextStyle`] from text node parameters.
///
/// ## Example
///
/// ```
/// use escpos::params::{self, Params};
/// use escpos::protocol::text::Alignment;
///
/// let mut p = Params::new();
/// p.insert("align".into(), "center".into());
/// p.insert("em".into(), "true".into());
/// p.insert("width".into(), "2".into());
///
/// let style = params::text_style(&p).unwrap();
/// assert_eq!(style.align, Some(Alignment::Center));
/// assert!(style.emphasize);
/// assert_eq!(style.width, Some(2));
///
/// p.insert("height".into(), "tall".into());
/// assert!(params::text_style(&p).is_err());
/// ```
pub fn text_style(params: &Params) -> Result<TextStyle, EscPosError> {
    Ok(TextStyle {
        align: params.get("align").map(|v| Alignment::from_param(v)),
        lang: params.get("lang").map(|v| Language::from_param(v)),
        font: params.get("font").map(|v| Font::from_param(v)),
        smooth: flag(params, "smooth"),
        emphasize: flag(params, "em"),
        underline: flag(params, "ul"),
        reverse: flag(params, "reverse"),
        rotate: flag(params, "rotate"),
        double_width: flag(params, "dw"),
        double_height: flag(params, "dh"),
        width: number(params, "width")?,
        height: number(params, "height")?,
        x: number(params, "x")?,
        y: number(params, "y")?,
    })
}

/// Build [`FeedOptions`] from feed node parameters.
pub fn feed_options(params: &Params) -> Result<FeedOptions, EscPosError> {
    Ok(FeedOptions {
        lines: number(params, "line")?,
        units: number(params, "unit")?,
    })
}

/// Build [`CutOptions`] from cut node parameters.
pub fn cut_options(params: &Params) -> CutOptions {
    CutOptions {
        feed: params.get("type").is_some_and(|t| t == "feed"),
    }
}

/// `true` when the key is present with value `true` or `1`
fn flag(params: &Params, name: &str) -> bool {
    params
        .get(name)
        .is_some_and(|v| v == "true" || v == "1")
}

fn number<T: FromStr>(params: &Params, name: &str) -> Result<Option<T>, EscPosError> {
    params
        .get(name)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| EscPosError::InvalidParameter {
                    name: name.to_string(),
                    value: value.clone(),
                })
        })
        .transpose()
}
