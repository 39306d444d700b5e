mod app;
mod cli;
mod core;
mod models;
mod system;
mod ui;
mod utils;

use app::App;
use clap::Parser;
use cli::Args;
use crate::core::actions::generate_help_entries;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Terminal,
};
use std::io;
use std::time::{Duration, Instant};
use ui::{
    BrowseDialog, CaptionBar, CommandBar, DirectoryEditView, LayoutMode, StatusBar, WarningScreen,
};
use utils::error::Result;

const IDLE_POLL: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    let args = Args::parse();
    utils::logging::init_tracing();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "diredit starting");

    // Create app
    let mut app = App::new(&args);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    match res {
        Ok(()) => {
            let path = app.edit.directory_path();
            if app.edit.is_valid() && !path.is_empty() {
                println!("{}", path);
            }
        }
        Err(err) => {
            tracing::error!(error = %err, "event loop failed");
            eprintln!("Error: {:?}", err);
        }
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| {
            let size = f.area();

            // 레이아웃 업데이트
            app.layout.update(size, app.show_help);

            match app.layout.mode() {
                LayoutMode::TooSmall => {
                    // 경고 화면 표시
                    let (width, height) = app.layout.terminal_size();
                    let warning = WarningScreen::new()
                        .current_size(width, height)
                        .theme(app.theme_manager.current());
                    f.render_widget(warning, size);
                }
                LayoutMode::Normal => {
                    render_main_ui(f, app);
                }
            }
        })?;

        // 자동완성 타이머가 걸려 있으면 만료 시각까지만 대기
        let poll_timeout = app
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
            .unwrap_or(IDLE_POLL)
            .min(IDLE_POLL);

        if event::poll(poll_timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    app.handle_key(key, Instant::now());
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse, Instant::now()),
                _ => {}
            }
        }

        app.tick(Instant::now());

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

fn render_help_line(f: &mut ratatui::Frame<'_>, app: &App, theme: &ui::Theme, area: Rect) {
    if area.height == 0 {
        return;
    }
    let key_style = Style::default()
        .fg(theme.accent.to_color())
        .add_modifier(Modifier::BOLD);
    let label_style = Style::default().fg(theme.fg_primary.to_color());

    let mut spans = Vec::new();
    for (key, label) in generate_help_entries(app.edit.accept_key()) {
        spans.push(Span::styled(format!(" {}", key), key_style));
        spans.push(Span::styled(format!(" {} ", label), label_style));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_status_bar(f: &mut ratatui::Frame<'_>, app: &App, theme: &ui::Theme, area: Rect) {
    let status_bar = StatusBar::new()
        .valid(app.edit.is_valid())
        .empty(app.edit.is_empty())
        .history_count(app.history_count())
        .message(app.toast_display())
        .theme_name(app.theme_manager.current_name())
        .theme(theme);
    f.render_widget(status_bar, area);
}

fn render_main_ui(f: &mut ratatui::Frame<'_>, app: &App) {
    let areas = app.layout.areas();
    let theme = app.theme_manager.current();

    let caption_bar = CaptionBar::new().title(app.title.as_deref()).theme(theme);
    f.render_widget(caption_bar, areas.caption_bar);

    let edit_view = DirectoryEditView::new(&app.edit)
        .focused(app.browse.is_none())
        .theme(theme);
    f.render_widget(edit_view, areas.edit);

    render_help_line(f, app, theme, areas.help);
    render_status_bar(f, app, theme, areas.status_bar);

    let command_bar = CommandBar::new().theme(theme);
    f.render_widget(command_bar, areas.command_bar);

    if let Some(ref browse) = app.browse {
        let dialog = BrowseDialog::new(browse).theme(theme);
        f.render_widget(dialog, f.area());
    }
}
