use apollo_core::error::CommandError;

use crate::startup::StartupState;

#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("command: {0}")]
    Command(#[from] CommandError),

    #[error("validation: {0}")]
    Validation(String),

    #[error("config: {reason}")]
    Config { reason: String },

    #[error("service is not fully functional: state={state}")]
    ServiceNotFullyFunctional { state: StartupState },

    #[error("invalid state transition: from={from}, to={to}")]
    InvalidTransition {
        from: StartupState,
        to: StartupState,
    },

    #[error("failed to create project")]
    FailedToCreateProject,

    #[error("failed to load project: {path}")]
    FailedToLoadProject { path: String },

    #[error("cannot unload project: no active project")]
    CannotUnloadProject,

    #[error("no active project")]
    NoActiveProject,
}

impl From<AppError> for CommandError {
    // 命令把应用层失败上抛给注册表时，统一折叠为执行失败
    fn from(err: AppError) -> Self {
        match err {
            AppError::Command(inner) => inner,
            other => CommandError::execution(other.to_string()),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
