pub mod home;
pub mod proxy;
pub mod skills;
pub mod system;
