/// Convenience result type used across mockwear.
pub type MockwearResult<T> = Result<T, MockwearError>;

/// Top-level error taxonomy used by session, designer and catalog APIs.
///
/// The user-facing variants line up with the designer actions that can fail, so a front end can
/// pick the right toast without inspecting messages.
#[derive(thiserror::Error, Debug)]
pub enum MockwearError {
    /// Invalid user-provided, catalog or configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A garment template image could not be resolved or decoded.
    #[error("template load error: {0}")]
    TemplateLoad(String),

    /// A user design could not be decoded or placed.
    #[error("upload error: {0}")]
    Upload(String),

    /// The tint color could not be applied.
    #[error("color error: {0}")]
    Color(String),

    /// The garment view could not be switched.
    #[error("view error: {0}")]
    View(String),

    /// Rasterizing the scene failed.
    #[error("render error: {0}")]
    Render(String),

    /// Encoding or writing the exported mockup failed.
    #[error("export error: {0}")]
    Export(String),

    /// The operation needs a live session but none is mounted (or it was disposed).
    #[error("session error: {0}")]
    Session(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MockwearError {
    /// Build a [`MockwearError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MockwearError::TemplateLoad`] value.
    pub fn template_load(msg: impl Into<String>) -> Self {
        Self::TemplateLoad(msg.into())
    }

    /// Build a [`MockwearError::Upload`] value.
    pub fn upload(msg: impl Into<String>) -> Self {
        Self::Upload(msg.into())
    }

    /// Build a [`MockwearError::Color`] value.
    pub fn color(msg: impl Into<String>) -> Self {
        Self::Color(msg.into())
    }

    /// Build a [`MockwearError::View`] value.
    pub fn view(msg: impl Into<String>) -> Self {
        Self::View(msg.into())
    }

    /// Build a [`MockwearError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`MockwearError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`MockwearError::Session`] value.
    pub fn session(msg: impl Into<String>) -> Self {
        Self::Session(msg.into())
    }

    /// Build a [`MockwearError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
