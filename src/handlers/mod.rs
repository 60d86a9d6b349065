pub mod password_reset;
pub mod sessions;
pub mod status;
pub mod users;
