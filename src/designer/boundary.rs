use std::any::Any;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Anything that can produce a text view, or fail trying.
pub trait Render {
    /// Produce the view.
    fn render(&self) -> anyhow::Result<String>;
}

impl<R: Render + ?Sized> Render for &R {
    fn render(&self) -> anyhow::Result<String> {
        (**self).render()
    }
}

/// Shown in place of a view whose render failed or panicked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FallbackView {
    /// Failure description.
    pub error: String,
}

impl FallbackView {
    /// Heading.
    pub const TITLE: &'static str = "Something went wrong";
    /// Apology line under the heading.
    pub const APOLOGY: &'static str = "We apologize for the inconvenience. Please try refreshing the page or contact support if the problem persists.";
    /// Label of the recovery action.
    pub const REFRESH_LABEL: &'static str = "Refresh Page";
    /// Closing hint.
    pub const SUPPORT_HINT: &'static str = "If the problem persists, please contact our support team.";
}

impl fmt::Display for FallbackView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", Self::TITLE)?;
        writeln!(f)?;
        writeln!(f, "{}", Self::APOLOGY)?;
        if !self.error.is_empty() {
            writeln!(f)?;
            writeln!(f, "  {}", self.error)?;
        }
        writeln!(f)?;
        writeln!(f, "[{}]", Self::REFRESH_LABEL)?;
        write!(f, "{}", Self::SUPPORT_HINT)
    }
}

/// Output of an [`ErrorBoundary`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rendered {
    /// The wrapped view rendered normally.
    Content(String),
    /// The wrapped view failed.
    Fallback(FallbackView),
}

impl Rendered {
    /// Whether the fallback is shown.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Rendered::Fallback(_))
    }

    /// Text to display.
    pub fn into_text(self) -> String {
        match self {
            Rendered::Content(s) => s,
            Rendered::Fallback(f) => f.to_string(),
        }
    }
}

/// Routes render errors and panics of the wrapped view to a [`FallbackView`].
#[derive(Clone, Debug)]
pub struct ErrorBoundary<R> {
    inner: R,
}

impl<R: Render> ErrorBoundary<R> {
    /// Wrap a view.
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Wrapped view.
    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Render the wrapped view, catching errors and panics.
    pub fn render(&self) -> Rendered {
        match catch_unwind(AssertUnwindSafe(|| self.inner.render())) {
            Ok(Ok(content)) => Rendered::Content(content),
            Ok(Err(err)) => {
                tracing::error!(error = %format!("{err:#}"), "error caught by boundary");
                Rendered::Fallback(FallbackView {
                    error: format!("{err:#}"),
                })
            }
            Err(payload) => {
                let error = panic_message(payload.as_ref());
                tracing::error!(%error, "panic caught by boundary");
                Rendered::Fallback(FallbackView { error })
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/designer/boundary.rs"]
mod tests;
