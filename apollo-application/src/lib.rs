pub mod application_commands;
pub mod config;
pub mod error;
pub mod inmemory_project_service;
pub mod project;
pub mod project_facade;
pub mod startup;
pub mod user_interface_service;

pub use config::ShellConfig;
pub use inmemory_project_service::InMemoryProjectService;
pub use project_facade::ProjectFacade;
pub use user_interface_service::{ApplicationCore, CommandHost, UserInterfaceService};
