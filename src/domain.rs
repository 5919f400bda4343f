pub mod entities;
pub mod password;
pub mod session;
pub mod skill_wheel;
pub mod use_cases;
