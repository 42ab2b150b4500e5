//! Routes and the text views behind them.

pub(crate) mod designer_page;
pub(crate) mod home;
pub(crate) mod route;
pub(crate) mod templates;

pub use designer_page::DesignerPage;
pub use home::HomePage;
pub use route::{DesignerQuery, Route};
pub use templates::TemplatesPage;
