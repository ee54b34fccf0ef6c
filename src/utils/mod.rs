pub mod session_cookie;
pub mod time;
pub mod token;
pub mod validation;
