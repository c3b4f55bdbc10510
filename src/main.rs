use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use gradetype::{
    bank::ContentBank,
    config::{Config, ConfigStore, FileConfigStore},
    game::Game,
    runtime::{decode_key, CrosstermEventSource, FixedTicker, GameEvent, Runner},
    ui::{self, FrameData, View},
    TICK_RATE_MS,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::Duration,
};

/// educational typing-practice tui with graded sentence banks
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A typing-practice TUI for young learners: pick a grade, type the sentence shown, and the virtual keyboard lights up the next key. Clear the configured number of sentences to finish the session."
)]
pub struct Cli {
    /// grade tier to practice (defaults to the saved config)
    #[clap(short = 't', long)]
    tier: Option<String>,

    /// sentences to clear before the session ends
    #[clap(short = 'm', long)]
    max_level: Option<u32>,

    /// seed for sentence selection (repeatable runs)
    #[clap(long)]
    seed: Option<u64>,

    /// list available grade tiers and exit
    #[clap(long)]
    list_tiers: bool,
}

#[derive(Debug)]
enum ExitType {
    Quit,
}

struct App {
    game: Game,
    view: View,
    notice: Option<String>,
}

impl App {
    fn new(game: Game) -> Self {
        Self {
            game,
            view: View::Typing,
            notice: None,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let bank = ContentBank::load_default();
    if cli.list_tiers {
        for tier in bank.list_tiers() {
            println!("{tier}");
        }
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let saved = store.load();
    let tier = cli.tier.clone().unwrap_or(saved.tier);
    let max_level = cli.max_level.unwrap_or(saved.max_level);

    let game = match cli.seed {
        Some(seed) => Game::with_rng(
            bank,
            &tier,
            max_level,
            Box::new(StdRng::seed_from_u64(seed)),
        ),
        None => Game::new(bank, &tier, max_level),
    };
    let mut game = match game {
        Ok(g) => g,
        Err(e) => {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::InvalidValue, e.to_string()).exit();
        }
    };
    game.start_new_round();

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(game);
    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result?;

    // Tier selection survives between runs; scores do not.
    let _ = store.save(&Config {
        tier: app.game.tier.clone(),
        max_level: app.game.max_level,
    });

    Ok(())
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );

    draw(terminal, app)?;

    loop {
        match runner.step() {
            GameEvent::Tick => {
                app.game.on_tick();
                if app.view == View::Typing {
                    draw(terminal, app)?;
                }
            }
            GameEvent::Resize => {
                draw(terminal, app)?;
            }
            GameEvent::Key(key) => {
                match handle_key(app, &key) {
                    Some(ExitType::Quit) => break,
                    None => {}
                }
                draw(terminal, app)?;
            }
        }
    }

    Ok(())
}

fn handle_key(app: &mut App, key: &KeyEvent) -> Option<ExitType> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(ExitType::Quit);
    }

    match app.view {
        View::Typing => match key.code {
            KeyCode::Esc => return Some(ExitType::Quit),
            KeyCode::Tab => {
                app.notice = None;
                app.view = View::TierSelect;
            }
            _ => {
                if let Some(input) = decode_key(key) {
                    app.game.key(input);
                    if app.game.is_finished() {
                        app.view = View::Finished;
                    }
                }
            }
        },
        View::TierSelect => match key.code {
            KeyCode::Esc => {
                app.notice = None;
                app.view = if app.game.is_finished() {
                    View::Finished
                } else {
                    View::Typing
                };
            }
            KeyCode::Char(c) => match app.game.set_tier(&c.to_string()) {
                Ok(()) => {
                    app.notice = None;
                    app.view = View::Typing;
                }
                Err(e) => {
                    app.notice = Some(e.to_string());
                }
            },
            _ => {}
        },
        View::Finished => match key.code {
            KeyCode::Esc => return Some(ExitType::Quit),
            KeyCode::Tab => {
                app.notice = None;
                app.view = View::TierSelect;
            }
            KeyCode::Char('r') => {
                app.game.reset_game(None).expect("active tier stays valid");
                app.game.start_new_round();
                app.view = View::Typing;
            }
            _ => {}
        },
    }

    None
}

fn draw<B: Backend>(terminal: &mut Terminal<B>, app: &App) -> Result<(), Box<dyn Error>> {
    let snapshot = app.game.snapshot();
    let tiers = app.game.bank().list_tiers();
    terminal.draw(|f| {
        ui::draw(
            f,
            &FrameData {
                snapshot: &snapshot,
                view: &app.view,
                tiers: &tiers,
                notice: app.notice.as_deref(),
            },
        )
    })?;
    Ok(())
}
