use clap::{Parser, Subcommand};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use task_cli::{Config, TerminalPage};
use todo_list::{Action, Coordinator, FileStore, TaskId, TaskRepository, TaskStorage};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Keep a short to-do list
#[derive(Parser, Debug)]
#[command(version)]
struct Cli {
    /// Directory holding the task store (overrides TODO_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Do not show the pending-task count
    #[arg(long, global = true)]
    no_counter: bool,
    /// Never style completed tasks
    #[arg(long, global = true)]
    no_color: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Clone, Subcommand)]
enum Commands {
    /// Add a task
    Add { text: String },
    /// Mark a task done, or not done again
    Toggle { id: TaskId },
    /// Remove a task
    Remove { id: TaskId },
    /// Show all tasks (the default)
    List,
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let mut config = Config::load()?;
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }
    init_tracing(&config.log_level);
    debug!(?config, "configuration loaded");

    let storage = TaskStorage::with_key(FileStore::new(&config.data_dir), &config.storage_key);
    let page = TerminalPage::new(!args.no_counter);
    let mut coordinator = Coordinator::new(TaskRepository::new(storage), page);

    let outcome = match args.command.unwrap_or(Commands::List) {
        Commands::Add { text } => {
            coordinator.on_add(&text).map(|task| {
                println!("Task added with ID {}", task.id());
            })
        }
        Commands::Toggle { id } => coordinator.dispatch(Action::Toggle(id)),
        Commands::Remove { id } => coordinator.dispatch(Action::Remove(id)),
        Commands::List => {
            coordinator.on_load();
            Ok(())
        }
    };

    let page = coordinator.into_page();
    let styled = !args.no_color && io::stdout().is_terminal();
    page.write_to(&mut io::stdout().lock(), styled)?;
    page.write_alerts(&mut io::stderr().lock())?;

    Ok(outcome?)
}
