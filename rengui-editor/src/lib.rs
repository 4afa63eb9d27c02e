pub mod catalog;
pub mod config;
pub mod controller;
pub mod form;
pub mod session;
pub mod storage;

pub use catalog::{AssetOptions, Catalog, DirCatalog};
pub use controller::{EditBuffer, EditError, EditingController, Pending};
pub use form::{ConfigForm, FormError};
pub use session::EditorSession;
pub use storage::{FileStore, Persistence};
