//! Value Object Module

pub mod email;
pub mod person_name;
pub mod refresh_token;
pub mod session_id;
pub mod user_id;
pub mod user_password;
