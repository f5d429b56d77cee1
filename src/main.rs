mod cli;
mod config;
mod data;
mod fetch;
mod media;
mod message;
mod state;
mod trace;
mod ui;

use std::{io, sync::Arc, time::Duration};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use parking_lot::Mutex;
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{info, span, Level};
use tui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use crate::{
    cli::Cli,
    config::{Brand, Config},
    fetch::HttpSource,
    message::{Request, Section},
    state::{AppState, Fetcher},
    ui::{draw_main_layout, input},
};

// App holds the state of the UI. Fetched data lives in `state`, which the
// background tasks update.
#[derive(Debug)]
pub struct App {
    // Current value of the input box
    input: String,
    // Which pane is shown
    section: Section,
    brand: Brand,
    jokes_enabled: bool,
    state: Arc<Mutex<AppState>>,
}

impl Default for App {
    fn default() -> Self {
        Self {
            input: String::new(),
            section: Section::default(),
            brand: Brand::default(),
            jokes_enabled: true,
            state: Arc::default(),
        }
    }
}

impl App {
    pub fn new(brand: Brand, jokes_enabled: bool, state: Arc<Mutex<AppState>>) -> Self {
        Self {
            brand,
            jokes_enabled,
            state,
            ..Self::default()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_cli_args(&cli)?;

    // set up logging
    let _guard = trace::init(&config.log)?;
    info!(?cli, "starting {}", config.brand.name);

    let source = HttpSource::new(
        config.media_endpoint()?,
        config.joke_endpoint()?,
        config.request_timeout(),
    )?;
    let fetcher = Fetcher::new(Arc::new(source), config.fetch_options());

    // create app
    let app = App::new(config.brand.clone(), config.jokes_enabled(), fetcher.state());

    // channel for publishing requests from the UI to the data worker
    let (data_tx, data_rx) = mpsc::unbounded_channel::<Request>();
    tokio::spawn(data::run_worker(fetcher, data_rx));

    // first dog, before the user asks for one
    data_tx
        .send(Request::Media)
        .context("Failed to request initial media")?;

    // setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // run the main UI thread
    let res = run_app(&mut terminal, app, &data_tx);

    // restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("{:?}", err)
    }

    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    data_tx: &UnboundedSender<Request>,
) -> io::Result<()> {
    loop {
        let span = span!(Level::TRACE, "draw");
        let _enter = span.enter();
        terminal.draw(|f| draw_main_layout(f, &app))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Esc => {
                        info!("Closing application");
                        return Ok(());
                    }
                    // submit the input box; empty means "Next"
                    KeyCode::Enter => {
                        let msg = app.input.drain(..).collect::<String>();
                        let command = input::parse(msg.as_str());
                        data::handle_user_input(&mut app, data_tx, command);
                    }
                    KeyCode::Right => {
                        data::handle_user_input(&mut app, data_tx, input::Command::Next);
                    }
                    // section navigation
                    KeyCode::Tab => {
                        app.section = app.section.next();
                    }
                    KeyCode::BackTab => {
                        app.section = app.section.previous();
                    }
                    // user input
                    KeyCode::Char(c) => {
                        app.input.push(c);
                    }
                    KeyCode::Backspace => {
                        app.input.pop();
                    }
                    _ => {}
                }
            }
        }
    }
}
