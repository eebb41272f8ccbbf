use clap::Parser;
use passkey::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => passkey::cli::commands::init::execute(&cli),
        Commands::Add { ref name } => passkey::cli::commands::add::execute(&cli, name),
        Commands::Get { ref name } => passkey::cli::commands::get::execute(&cli, name),
        Commands::List => passkey::cli::commands::list::execute(&cli),
        Commands::Update {
            ref old,
            ref new,
            regen,
        } => passkey::cli::commands::update::execute(&cli, old, new, regen),
        Commands::Delete { ref name, force } => {
            passkey::cli::commands::delete::execute(&cli, name, force)
        }
        Commands::Copy { ref name } => passkey::cli::commands::copy::execute(&cli, name),
        Commands::Audit {
            last,
            ref since,
            failed,
        } => audit(&cli, last, since.as_deref(), failed),
        Commands::Completions { shell } => passkey::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        passkey::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

#[cfg(feature = "audit-log")]
fn audit(
    cli: &Cli,
    last: usize,
    since: Option<&str>,
    failed: bool,
) -> passkey::errors::Result<()> {
    passkey::cli::commands::audit_cmd::execute(cli, last, since, failed)
}

#[cfg(not(feature = "audit-log"))]
fn audit(
    _cli: &Cli,
    _last: usize,
    _since: Option<&str>,
    _failed: bool,
) -> passkey::errors::Result<()> {
    Err(passkey::errors::PasskeyError::AuditError(
        "access history not compiled in; rebuild with `--features audit-log`".into(),
    ))
}
