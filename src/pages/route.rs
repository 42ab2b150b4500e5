use std::borrow::Cow;
use std::fmt;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::catalog::{GarmentType, GarmentView};
use crate::foundation::error::{MockwearError, MockwearResult};

// RFC 3986 unreserved characters stay literal.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Parameters of a `/designer` link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DesignerQuery {
    /// Gallery template id; `None` opens an empty canvas.
    pub template: Option<String>,
    /// Garment to design on.
    pub garment: GarmentType,
    /// Initial view.
    pub view: GarmentView,
}

impl Default for DesignerQuery {
    fn default() -> Self {
        Self {
            template: None,
            garment: GarmentType::Tshirt,
            view: GarmentView::Front,
        }
    }
}

impl DesignerQuery {
    /// Query for a garment/view pair with a template selected.
    pub fn for_template(template: impl Into<String>, garment: GarmentType, view: GarmentView) -> Self {
        Self {
            template: Some(template.into()),
            garment,
            view,
        }
    }

    /// Parse `template=..&type=..&view=..`, with or without a leading `?`.
    ///
    /// Keys and values are percent-decoded, with `+` read as a space.
    ///
    /// Unknown or missing values fall back: the garment is guessed from the template name, then
    /// t-shirt; the view defaults to front.
    pub fn parse(query: &str) -> Self {
        let mut template = None;
        let mut garment = None;
        let mut view = None;

        for pair in query.trim_start_matches('?').split('&') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = decode_component(key);
            let value = decode_component(value);
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                "template" => template = Some(value.to_string()),
                "type" => match value.parse::<GarmentType>() {
                    Ok(g) => garment = Some(g),
                    Err(err) => tracing::warn!(%err, "ignoring designer type"),
                },
                "view" => match value.parse::<GarmentView>() {
                    Ok(v) => view = Some(v),
                    Err(err) => tracing::warn!(%err, "ignoring designer view"),
                },
                _ => {}
            }
        }

        let garment = garment.unwrap_or_else(|| {
            template
                .as_deref()
                .map(GarmentType::from_template_hint)
                .unwrap_or(GarmentType::Tshirt)
        });
        Self {
            template,
            garment,
            view: view.unwrap_or_default(),
        }
    }
}

impl fmt::Display for DesignerQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(t) = &self.template {
            write!(f, "template={}&", utf8_percent_encode(t, QUERY_VALUE))?;
        }
        write!(f, "type={}&view={}", self.garment, self.view)
    }
}

fn decode_component(raw: &str) -> Cow<'_, str> {
    if raw.contains('+') {
        let spaced = raw.replace('+', " ");
        Cow::Owned(percent_decode_str(&spaced).decode_utf8_lossy().into_owned())
    } else {
        percent_decode_str(raw).decode_utf8_lossy()
    }
}

/// A page of the app.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Home,
    /// `/templates`
    Templates,
    /// `/designer?...`
    Designer(DesignerQuery),
}

impl Route {
    /// Parse a path with optional query string.
    pub fn parse(href: &str) -> MockwearResult<Self> {
        let href = href.trim();
        let (path, query) = href.split_once('?').unwrap_or((href, ""));
        let path = path.trim_end_matches('/');
        match path {
            "" => Ok(Route::Home),
            "/templates" => Ok(Route::Templates),
            "/designer" => Ok(Route::Designer(DesignerQuery::parse(query))),
            other => Err(MockwearError::validation(format!("no page at \"{other}\""))),
        }
    }

    /// Link to this route.
    pub fn href(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Templates => "/templates".to_string(),
            Route::Designer(q) => format!("/designer?{q}"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pages/route.rs"]
mod tests;
