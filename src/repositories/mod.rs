pub mod directory;
pub mod session;
pub mod user;

pub use directory::{PgUserDirectory, UserDirectory};
