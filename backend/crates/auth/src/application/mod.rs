//! Application Layer - Use Cases

pub mod check_session;
pub mod config;
pub mod login;
pub mod logout;
pub mod password_reset;
pub mod register;
pub mod token;
pub mod update_theme;

pub use check_session::CheckSessionUseCase;
pub use login::{LoginInput, LoginUseCase};
pub use logout::LogoutUseCase;
pub use password_reset::PasswordResetUseCase;
pub use register::{RegisterInput, RegisterUseCase};
pub use update_theme::UpdateThemeUseCase;
