pub mod entry;
pub mod session;
pub mod settings;
pub mod user;

pub use entry::Entry;
pub use session::Session;
pub use settings::{Settings, SettingsUpdate};
pub use user::User;
