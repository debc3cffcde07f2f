use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
};

use ioe_master::app::{App, Flow};
use ioe_master::config::{Config, ConfigStore, FileConfigStore};
use ioe_master::question::{bank_from_file, builtin_bank, BUILTIN_BANK};
use ioe_master::runtime::{AppEvent, CrosstermEventSource, EventSource};

/// terminal english exam trainer
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "An English exam trainer in the terminal: answer multiple-choice, fill-in-the-blank, and rearrangement questions, get instant feedback and a score, then retry just the ones you missed."
)]
pub struct Cli {
    /// path to a custom question bank (json); defaults to the built-in exam
    #[clap(short, long)]
    bank: Option<PathBuf>,

    /// player name shown on the result screen (remembered between runs)
    #[clap(short, long)]
    name: Option<String>,

    /// shuffle the question order at the start of each run
    #[clap(long)]
    shuffle: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let config = store.load();

    let bank_path = cli
        .bank
        .clone()
        .or_else(|| config.bank_path.as_ref().map(PathBuf::from));
    let full_bank = match &bank_path {
        Some(path) => bank_from_file(path)?,
        None => builtin_bank(BUILTIN_BANK),
    };

    let player_name = cli
        .name
        .clone()
        .unwrap_or_else(|| config.player_name.clone());
    let shuffle = cli.shuffle || config.shuffle;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(full_bank, player_name, shuffle);
    let events = CrosstermEventSource::new();
    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result?;

    // Remember the name and bank choice for next time.
    let _ = store.save(&Config {
        player_name: app.player_name.clone(),
        bank_path: bank_path.map(|p| p.display().to_string()),
        shuffle,
    });

    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    events: &impl EventSource,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        match events.next() {
            Err(_) => break,
            Ok(AppEvent::Resize) => {}
            Ok(AppEvent::Key(key)) => {
                if app.handle_key(key) == Flow::Quit {
                    break;
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["ioe-master"]);

        assert_eq!(cli.bank, None);
        assert_eq!(cli.name, None);
        assert!(!cli.shuffle);
    }

    #[test]
    fn test_cli_bank_path() {
        let cli = Cli::parse_from(["ioe-master", "-b", "exams/custom.json"]);
        assert_eq!(cli.bank, Some(PathBuf::from("exams/custom.json")));

        let cli = Cli::parse_from(["ioe-master", "--bank", "other.json"]);
        assert_eq!(cli.bank, Some(PathBuf::from("other.json")));
    }

    #[test]
    fn test_cli_player_name() {
        let cli = Cli::parse_from(["ioe-master", "-n", "Mai"]);
        assert_eq!(cli.name, Some("Mai".to_string()));

        let cli = Cli::parse_from(["ioe-master", "--name", "Nguyen Van A"]);
        assert_eq!(cli.name, Some("Nguyen Van A".to_string()));
    }

    #[test]
    fn test_cli_shuffle_flag() {
        let cli = Cli::parse_from(["ioe-master", "--shuffle"]);
        assert!(cli.shuffle);
    }
}
