mod logger;

use anyhow::Context as _;
use apollo_application::application_commands::ShutdownApplicationCommand;
use apollo_application::project::PersistenceInformation;
use apollo_application::{
    ApplicationCore, CommandHost, InMemoryProjectService, ProjectFacade, ShellConfig,
    UserInterfaceService,
};
use apollo_core::command::{Command, NamedCommand};
use apollo_core::container::HaveCommands;
use apollo_core::context::CommandContext;
use apollo_core::error::CommandResult;
use apollo_core::{ScopedCommands, SyncCommandRegistry};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Parser)]
#[command(name = "apollo", about = "Apollo command shell")]
struct Cli {
    /// 配置文件路径（不存在时使用默认配置）
    #[arg(long, default_value = "apollo.toml")]
    config: PathBuf,

    /// 打开已有项目，而不是新建
    #[arg(long)]
    open: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,
}

/// 关闭请求只记录下来，由主循环收尾
#[derive(Default)]
struct ShellCore {
    shutdown_requested: AtomicBool,
}

impl ApplicationCore for ShellCore {
    fn shutdown(&self) {
        tracing::info!("shutdown requested");
        self.shutdown_requested.store(true, Ordering::SeqCst);
    }
}

#[apollo_core::command(id = "shell.show_welcome_page")]
struct ShowWelcomePageCommand;

impl Command for ShowWelcomePageCommand {
    fn execute(&self, _ctx: &mut CommandContext) -> CommandResult<()> {
        println!("Welcome to Apollo.");
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = ShellConfig::load_or_default(&cli.config)
        .with_context(|| format!("reading {}", cli.config.display()))?;
    logger::init(&config, cli.verbose);

    // ---- 组合根 ----
    let registry = Arc::new(SyncCommandRegistry::new());
    let core = Arc::new(ShellCore::default());
    let projects = Arc::new(InMemoryProjectService::new());
    let service = Arc::new(UserInterfaceService::new(
        registry.clone(),
        core.clone(),
        projects,
    )?);

    let mut shell = ScopedCommands::new(registry.clone());
    shell.register_named(|| ShowWelcomePageCommand)?;

    service.start()?;
    tracing::info!(commands = ?registry.ids(), "composition complete");

    if config.show_welcome_page_on_startup {
        service.invoke(&ShowWelcomePageCommand::command_id())?;
    }

    let mut facade = ProjectFacade::new(service.clone());
    let project = match &cli.open {
        Some(path) => facade.load_project(&PersistenceInformation::new(path))?,
        None => facade.new_project()?,
    };
    println!("Active project: {} ({})", project.name(), project.id());

    facade.unload_project()?;
    service.invoke(&ShutdownApplicationCommand::command_id())?;

    if core.shutdown_requested.load(Ordering::SeqCst) {
        shell.teardown();
        service.stop();
    }
    Ok(())
}
