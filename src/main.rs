use clap::Parser;
use qrgen::{
    cli::commands::{
        history::HistoryCommand, regen::RegenCommand, run::RunCommand, update::UpdateCommand,
        CommandHandler,
    },
    cli::{parse_exit_code, Cli, Commands},
    io::QrgenPaths,
    logging::{initialize_tracing, LogTarget},
};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(parse_exit_code(&e));
        }
    };
    let command = cli.command();

    // The wizard owns the terminal, so it logs to a file instead of stderr
    let paths = QrgenPaths::new().ok();
    let target = match &paths {
        Some(paths) if command.is_interactive() => LogTarget::File {
            dir: &paths.data_dir,
            file_name: paths.log_file_name(),
        },
        _ => LogTarget::Stderr,
    };
    let guard = initialize_tracing(cli.log_level, target);

    let handler: Box<dyn CommandHandler> = match command {
        Commands::Run => Box::new(RunCommand::new()),
        Commands::History { clear } => Box::new(HistoryCommand::new(clear)),
        Commands::Regen { id } => Box::new(RegenCommand::new(id)),
        Commands::Update => Box::new(UpdateCommand::new(false)),
        Commands::CheckUpdate => Box::new(UpdateCommand::new(true)),
    };

    tracing::debug!("Executing command: {}", handler.name());
    if let Err(e) = handler.execute() {
        tracing::error!("{} failed: {}", handler.name(), e);
        eprintln!("Error: {}", e);
        drop(guard);
        std::process::exit(1);
    }
}
