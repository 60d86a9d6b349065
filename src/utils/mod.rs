pub mod cookies;
pub mod password;
pub mod pii;
