//! Screen modules for the trainify TUI

pub mod login;
pub mod management;
pub mod member_dashboard;
pub mod overview;
pub mod register;

// Re-export all screens
pub use login::LoginScreen;
pub use management::ManagementScreen;
pub use member_dashboard::{MemberDashboardScreen, MemberTab};
pub use overview::OverviewScreen;
pub use register::RegisterScreen;
