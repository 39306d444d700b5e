use super::*;
use crate::system::filesystem::fake::MemoryIndex;
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEventKind};
use ratatui::layout::Rect;
use std::fs;
use tempfile::TempDir;

fn index() -> MemoryIndex {
    MemoryIndex::new()
        .with_root("/")
        .with_dir("/srv/alpha")
        .with_dir("/srv/beta")
        .with_dir("/home/user")
}

fn slash_settings() -> Settings {
    Settings {
        separator: settings::SeparatorSetting::Slash,
        ..Settings::default()
    }
}

fn make_test_app() -> App {
    App::new_for_test(Box::new(index()), slash_settings())
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_key(key(KeyCode::Char(c)), Instant::now());
    }
}

#[test]
fn test_new_app_starts_at_first_root() {
    let app = make_test_app();
    assert_eq!(app.edit.text(), "/");
    assert!(app.edit.is_valid());
    assert_eq!(app.title.as_deref(), Some("/"));
    assert_eq!(app.edit.label_text(), "Directory:");
    assert!(app.browse.is_none());
}

#[test]
fn test_title_follows_valid_directory_only() {
    let mut app = make_test_app();
    type_text(&mut app, "srv");
    assert_eq!(app.title.as_deref(), Some("/srv/"));

    type_text(&mut app, "/zz");
    assert!(!app.edit.is_valid());
    assert_eq!(app.title.as_deref(), Some("/srv/"));
}

#[test]
fn test_seeded_history_drops_invalid_entries() {
    let settings = Settings {
        history: vec!["/srv/alpha".to_string(), "/nope".to_string()],
        ..slash_settings()
    };
    let app = App::new_for_test(Box::new(index()), settings);
    assert_eq!(app.edit.previous_directories(), vec!["/srv/alpha"]);
    assert_eq!(app.history_count(), Some(1));
}

#[test]
fn test_history_disabled_reports_no_count() {
    let settings = Settings {
        history_enabled: false,
        history: vec!["/srv/alpha".to_string()],
        ..slash_settings()
    };
    let app = App::new_for_test(Box::new(index()), settings);
    assert!(!app.edit.has_history());
    assert_eq!(app.history_count(), None);
}

#[test]
fn test_browse_action_opens_dialog_at_current_text() {
    let mut app = make_test_app();
    assert!(app.edit.set_directory_path("/srv"));

    app.handle_key(key(KeyCode::F(2)), Instant::now());
    let browse = app.browse.as_ref().expect("dialog should be open");
    assert_eq!(browse.current(), std::path::Path::new("/srv/"));
    assert_eq!(browse.entries(), &["alpha", "beta"]);
}

#[test]
fn test_browse_choose_sets_path_and_history() {
    let mut app = make_test_app();
    assert!(app.edit.set_directory_path("/srv"));
    let before = app.edit.previous_directories().len();

    app.execute_action(Action::Browse);
    app.handle_key(key(KeyCode::Down), Instant::now());
    app.handle_key(key(KeyCode::Char(' ')), Instant::now());

    assert!(app.browse.is_none());
    assert_eq!(app.edit.directory_path(), "/srv/alpha/");
    assert_eq!(app.title.as_deref(), Some("/srv/alpha/"));
    assert_eq!(app.edit.previous_directories().len(), before + 1);
}

#[test]
fn test_browse_cancel_keeps_text() {
    let mut app = make_test_app();
    assert!(app.edit.set_directory_path("/home"));
    let history = app.edit.previous_directories();

    app.execute_action(Action::Browse);
    app.handle_key(key(KeyCode::Down), Instant::now());
    app.handle_key(key(KeyCode::Esc), Instant::now());

    assert!(app.browse.is_none());
    assert_eq!(app.edit.directory_path(), "/home/");
    assert_eq!(app.edit.previous_directories(), history);
}

#[test]
fn test_browse_dialog_swallows_host_keys() {
    let mut app = make_test_app();
    app.execute_action(Action::Browse);
    app.handle_key(key(KeyCode::F(9)), Instant::now());
    assert!(app.browse.is_some());
    assert_eq!(app.theme_manager.current_name(), "dark");
}

#[test]
fn test_browse_without_roots_shows_toast() {
    let mut app = App::new_for_test(Box::new(MemoryIndex::new()), slash_settings());
    assert!(app.edit.is_empty());
    app.execute_action(Action::Browse);
    assert!(app.browse.is_none());
    assert_eq!(app.toast_display(), Some("No file system roots available"));
}

#[test]
fn test_host_actions_from_keys() {
    let mut app = make_test_app();

    app.handle_key(key(KeyCode::F(1)), Instant::now());
    assert!(app.show_help);
    app.handle_key(key(KeyCode::F(1)), Instant::now());
    assert!(!app.show_help);

    app.handle_key(key(KeyCode::F(9)), Instant::now());
    assert_eq!(app.theme_manager.current_name(), "light");
    assert_eq!(app.toast_display(), Some("Theme: light"));

    app.handle_key(ctrl('q'), Instant::now());
    assert!(app.should_quit());
}

#[test]
fn test_typed_q_goes_to_field_not_quit() {
    let mut app = make_test_app();
    app.handle_key(key(KeyCode::Char('q')), Instant::now());
    assert!(!app.should_quit());
    assert_eq!(app.edit.text(), "/q");
}

#[test]
fn test_accept_key_completes_and_settles() {
    let mut app = make_test_app();
    type_text(&mut app, "srv/a");
    assert!(app.edit.popup().is_visible());

    let now = Instant::now();
    app.handle_key(key(KeyCode::Tab), now);
    assert_eq!(app.edit.text(), "/srv/alpha");

    let deadline = app.next_deadline().expect("accept should arm a timer");
    app.tick(deadline);
    assert_eq!(app.edit.text(), "/srv/alpha/");
    assert_eq!(app.title.as_deref(), Some("/srv/alpha/"));
}

#[test]
fn test_mouse_click_on_button_opens_browse() {
    let mut app = make_test_app();
    app.layout.update(Rect::new(0, 0, 60, 12), false);
    let area = app.layout.areas().edit;
    let layout = crate::ui::layout::EditLayout::compute(
        area,
        app.edit.label_text(),
        app.edit.browse_text(),
    );

    let click = MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: layout.button.x + 1,
        row: layout.button.y,
        modifiers: KeyModifiers::NONE,
    };
    app.handle_mouse(click, Instant::now());
    assert!(app.browse.is_some());

    // 터미널이 너무 작으면 마우스 무시
    app.handle_key(key(KeyCode::Esc), Instant::now());
    app.layout.update(Rect::new(0, 0, 20, 5), false);
    app.handle_mouse(click, Instant::now());
    assert!(app.browse.is_none());
}

#[test]
fn test_quit_persists_theme_and_capped_history() {
    let settings = Settings {
        max_history: 2,
        ..slash_settings()
    };
    let mut app = App::new_for_test(Box::new(index()), settings);
    for path in ["/srv", "/srv/alpha", "/srv/beta"] {
        assert!(app.edit.set_directory_path(path));
    }
    app.execute_action(Action::CycleTheme);
    app.quit();

    let path = app.state_store_path().unwrap();
    let saved = Settings::load(&path);
    assert_eq!(saved.theme, "light");
    assert_eq!(saved.history, vec!["/srv/alpha", "/srv/beta"]);
    let _ = fs::remove_file(path);
}

#[test]
fn test_new_with_settings_file_and_cli_args() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("target");
    fs::create_dir_all(&target).unwrap();
    let settings_path = temp.path().join("settings.toml");
    Settings {
        theme: "light".to_string(),
        ..Settings::default()
    }
    .save(&settings_path)
    .unwrap();

    let args = Args {
        path: Some(target.to_string_lossy().to_string()),
        label: Some("Target:".to_string()),
        settings: Some(settings_path.clone()),
        ..Args::default()
    };
    let mut app = App::new(&args);

    assert_eq!(app.theme_manager.current_name(), "light");
    assert_eq!(app.edit.label_text(), "Target:");
    assert!(app.edit.is_valid());
    assert!(app.title.is_some());

    // 명령행 레이블은 저장되지 않는다
    app.quit();
    let saved = Settings::load(&settings_path);
    assert_eq!(saved.label, "Directory:");
    assert_eq!(saved.history.len(), 1);
}

#[test]
fn test_cli_history_seeds_are_not_persisted() {
    let temp = TempDir::new().unwrap();
    let seeded = temp.path().join("seeded");
    let chosen = temp.path().join("chosen");
    fs::create_dir_all(&seeded).unwrap();
    fs::create_dir_all(&chosen).unwrap();
    let settings_path = temp.path().join("settings.toml");
    let saved_dir = temp.path().to_string_lossy().to_string();
    Settings {
        history: vec![saved_dir.clone()],
        ..Settings::default()
    }
    .save(&settings_path)
    .unwrap();

    let args = Args {
        history: vec![seeded.to_string_lossy().to_string()],
        settings: Some(settings_path.clone()),
        ..Args::default()
    };
    let mut app = App::new(&args);
    assert_eq!(app.history_count(), Some(2));

    let chosen = chosen.to_string_lossy().to_string();
    assert!(app.edit.set_directory_path(&chosen));
    app.execute_action(Action::CycleTheme);
    app.quit();

    let saved = Settings::load(&settings_path);
    assert_eq!(saved.history, vec![saved_dir, chosen]);
}

#[test]
fn test_new_with_invalid_path_shows_toast() {
    let temp = TempDir::new().unwrap();
    let args = Args {
        path: Some(temp.path().join("missing").to_string_lossy().to_string()),
        settings: Some(temp.path().join("settings.toml")),
        ..Args::default()
    };
    let app = App::new(&args);
    assert!(app
        .toast_display()
        .is_some_and(|msg| msg.starts_with("Not a directory:")));
}
