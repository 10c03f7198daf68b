use apollo_core::command::{Command, NamedCommand};
use apollo_core::context::CommandContext;
use apollo_core::error::CommandResult;
use apollo_macros::command;
use std::marker::PhantomData;

#[command(id = "shell.exit")]
struct ExitCommand;

impl Command for ExitCommand {
    fn execute(&self, _ctx: &mut CommandContext) -> CommandResult<()> {
        Ok(())
    }
}

#[command(id = "view.toggle")]
enum ToggleCommand {
    On,
    Off,
}

impl Command for ToggleCommand {
    fn execute(&self, ctx: &mut CommandContext) -> CommandResult<()> {
        ctx.set_result(matches!(self, Self::On));
        Ok(())
    }
}

#[command(id = "typed.open")]
struct OpenCommand<T: 'static> {
    _marker: PhantomData<fn() -> T>,
}

impl<T: 'static> Command for OpenCommand<T> {
    fn execute(&self, _ctx: &mut CommandContext) -> CommandResult<()> {
        Ok(())
    }
}

fn main() {
    assert_eq!(ExitCommand::ID, "shell.exit");
    assert_eq!(ExitCommand::command_id().as_str(), "shell.exit");
    assert_eq!(ToggleCommand::command_id().to_string(), "view.toggle");
    assert_eq!(<OpenCommand<u8> as NamedCommand>::ID, "typed.open");

    let mut ctx = CommandContext::new();
    ToggleCommand::Off.execute(&mut ctx).unwrap();
    assert_eq!(ctx.take_result::<bool>().unwrap(), Some(false));
    let _ = ToggleCommand::On;
}
