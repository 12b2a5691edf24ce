mod activate;
mod capability;
mod create;
mod delete;
mod groups;
mod login;
mod mail;
mod password;
mod register;
mod reset;
mod service;
mod update;

pub use activate::ActivateUserCommand;
pub use create::CreateUserCommand;
pub use login::{LoginResult, LoginUserCommand};
pub use register::{RegisterResult, RegisterUserCommand};
pub use reset::{CheckResetCodeCommand, RequestPasswordResetCommand, ResetPasswordCommand};
pub use service::{RegistrationSettings, UserCommandService};
pub use update::UpdateUserCommand;
