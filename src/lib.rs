pub mod bank;
pub mod paths;
pub mod performance;
pub mod session;
