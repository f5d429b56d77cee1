pub mod input;

use tracing::{span, trace, Level};
use tui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::{
    media::MediaKind,
    message::Section,
    state::AppState,
    App,
};

pub fn draw_main_layout<B>(f: &mut Frame<B>, app: &App)
where
    B: Backend,
{
    let span = span!(Level::TRACE, "render_main");
    let _entered = span.enter();

    // copy out so the lock isn't held while drawing
    let state = app.state.lock().clone();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(2)
        .vertical_margin(1)
        .constraints(
            [
                Constraint::Length(1), // help text
                Constraint::Length(3), // navigation
                Constraint::Length(3), // input box
                Constraint::Min(6),    // section contents
                Constraint::Length(3), // footer
            ]
            .as_ref(),
        )
        .split(f.size());

    draw_hint(f, app, chunks[0]);
    draw_navbar(f, app, chunks[1]);
    draw_input_box(f, app, chunks[2]);
    draw_display_area(f, app, &state, chunks[3]);
    draw_footer(f, app, &state, chunks[4]);
}

pub fn draw_hint<B: Backend>(f: &mut Frame<B>, app: &App, parent: Rect) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let msg = vec![
        Span::styled(format!("{}::", app.brand.name), bold),
        Span::raw("Press "),
        Span::styled("Esc", bold),
        Span::raw(" to exit, "),
        Span::styled("Tab", bold),
        Span::raw(" to move, "),
        Span::styled("Enter", bold),
        Span::raw(" for the next dog"),
    ];
    let help_message = Paragraph::new(Text::from(Spans::from(msg)));
    f.render_widget(help_message, parent);
}

pub fn draw_navbar<B: Backend>(f: &mut Frame<B>, app: &App, parent: Rect) {
    let titles = Section::ALL
        .iter()
        .map(|s| Spans::from(Span::raw(s.title())))
        .collect::<Vec<Spans>>();
    let tabs = Tabs::new(titles)
        .select(app.section.index())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(app.brand.name.as_str()),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, parent);
}

pub fn draw_input_box<B: Backend>(f: &mut Frame<B>, app: &App, parent: Rect) {
    let input = Paragraph::new(app.input.as_str())
        .style(Style::default())
        .block(Block::default().borders(Borders::ALL).title("/next /joke /goto #anchor"));
    f.render_widget(input, parent);

    // Make the cursor visible and ask tui-rs to put it at the specified coordinates after rendering
    f.set_cursor(
        // Put cursor past the end of the input text
        parent.x + app.input.width() as u16 + 1,
        // Move one line down, from the border to the input line
        parent.y + 1,
    );
}

pub fn draw_display_area<B: Backend>(f: &mut Frame<B>, app: &App, state: &AppState, parent: Rect) {
    let span = span!(Level::TRACE, "render_display_area");
    let _entered = span.enter();
    trace!(section = app.section.anchor());

    match app.section {
        Section::Home => draw_hero(f, app, parent),
        Section::Media => draw_media_section(f, app, state, parent),
        Section::About => draw_text_section(f, "About", &app.brand.about, parent),
        Section::Services => draw_services(f, app, parent),
        Section::Contact => draw_contact(f, app, parent),
    }
}

fn draw_hero<B: Backend>(f: &mut Frame<B>, app: &App, parent: Rect) {
    let text = vec![
        Spans::from(Span::styled(
            format!("Welcome to {}", app.brand.name),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Spans::from(Span::raw("")),
        Spans::from(Span::raw(app.brand.tagline.as_str())),
        Spans::from(Span::raw("")),
        Spans::from(Span::styled(
            "Type #media or press Tab to get started",
            Style::default().add_modifier(Modifier::ITALIC),
        )),
    ];
    let contents = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(contents, parent);
}

fn draw_text_section<B: Backend>(f: &mut Frame<B>, title: &str, body: &str, parent: Rect) {
    let contents = Paragraph::new(body)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(contents, parent);
}

pub fn draw_media_section<B: Backend>(f: &mut Frame<B>, app: &App, state: &AppState, parent: Rect) {
    let span = span!(Level::TRACE, "render_media");
    let _entered = span.enter();

    let area = if app.jokes_enabled {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)].as_ref())
            .split(parent);
        draw_joke(f, state, chunks[1]);
        chunks[0]
    } else {
        parent
    };

    let media = match &state.media_item {
        Some(item) => {
            let tag_style = match item.kind {
                MediaKind::Video => Style::default().fg(Color::Magenta),
                MediaKind::Image => Style::default().fg(Color::Green),
            };
            Spans::from(vec![
                Span::styled(
                    format!("[{}] ", item.kind.label()),
                    tag_style.add_modifier(Modifier::BOLD),
                ),
                Span::styled(item.url.as_str(), Style::default().add_modifier(Modifier::ITALIC)),
            ])
        }
        None => Spans::from(Span::raw("Loading media...")),
    };

    let text = vec![
        Spans::from(Span::raw("Press Enter to see a new dog image or video!")),
        Spans::from(Span::raw("")),
        media,
    ];
    let contents = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("[Random Dog Media]"));
    f.render_widget(contents, area);
}

fn draw_joke<B: Backend>(f: &mut Frame<B>, state: &AppState, parent: Rect) {
    let text = match (&state.joke_item, state.joke_loading) {
        (_, true) => vec![Spans::from(Span::raw("Loading joke..."))],
        (Some(joke), false) => vec![
            Spans::from(Span::raw(joke.setup.as_str())),
            Spans::from(Span::styled(
                joke.punchline.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ],
        (None, false) => vec![Spans::from(Span::raw("No joke yet."))],
    };
    let contents = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("[Joke]"));
    f.render_widget(contents, parent);
}

fn draw_services<B: Backend>(f: &mut Frame<B>, app: &App, parent: Rect) {
    let items = app
        .brand
        .services
        .iter()
        .map(|s| ListItem::new(Spans::from(Span::raw(format!("* {s}")))))
        .collect::<Vec<ListItem>>();
    let contents = List::new(items).block(Block::default().borders(Borders::ALL).title("Services"));
    f.render_widget(contents, parent);
}

fn draw_contact<B: Backend>(f: &mut Frame<B>, app: &App, parent: Rect) {
    let text = vec![
        Spans::from(Span::styled(
            "Get In Touch",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Spans::from(Span::raw("Reach out to us for more dog content or any inquiries!")),
        Spans::from(Span::raw("")),
        Spans::from(Span::styled(
            app.brand.contact_url.as_str(),
            Style::default().add_modifier(Modifier::UNDERLINED),
        )),
    ];
    let contents = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Contact"));
    f.render_widget(contents, parent);
}

pub fn draw_footer<B: Backend>(f: &mut Frame<B>, app: &App, state: &AppState, parent: Rect) {
    let mut line = vec![Span::raw(app.brand.footer.as_str())];
    if let Some(e) = state.last_error() {
        line.push(Span::raw(" | "));
        line.push(Span::styled(
            format!("last error: {e}"),
            Style::default().fg(Color::Red),
        ));
    }
    let contents = Paragraph::new(Spans::from(line))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(contents, parent);
}
