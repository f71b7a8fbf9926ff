pub mod credentials;
pub mod local;
