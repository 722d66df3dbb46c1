// Unit tests for the dashboard
// Drives the app with key events and renders it into a test backend

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use listkeep::config::{Config, Screen};
use listkeep::models::EntityKind;
use listkeep::tui::{Focus, TuiApp};
use ratatui::backend::TestBackend;
use ratatui::Terminal;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_text(app: &mut TuiApp, text: &str) {
    for c in text.chars() {
        app.handle_key(key(KeyCode::Char(c)));
    }
}

fn screen_text(app: &mut TuiApp) -> String {
    let backend = TestBackend::new(120, 40);
    let mut terminal = Terminal::new(backend).expect("test terminal");
    terminal.draw(|f| app.ui(f)).expect("draw");
    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn app_on(screen: Screen) -> TuiApp {
    TuiApp::new(Config {
        start_screen: screen,
        ..Config::default()
    })
}

fn add_cart_item(app: &mut TuiApp, name: &str, price: &str) {
    // name, category, quantity, price
    type_text(app, name);
    app.handle_key(key(KeyCode::Down));
    app.handle_key(key(KeyCode::Right));
    app.handle_key(key(KeyCode::Down));
    app.handle_key(key(KeyCode::Down));
    type_text(app, price);
    app.handle_key(key(KeyCode::Enter));
}

#[test]
fn test_home_renders_feature_cards() {
    let mut app = app_on(Screen::Home);
    let text = screen_text(&mut app);
    assert!(text.contains("Book Collection"));
    assert!(text.contains("Recipe Manager"));
}

#[test]
fn test_digit_opens_screen() {
    let mut app = app_on(Screen::Home);
    app.handle_key(key(KeyCode::Char('4')));
    assert_eq!(app.screen(), Screen::Cart);
    app.handle_key(key(KeyCode::BackTab));
    assert_eq!(app.screen(), Screen::Recipes);
}

#[test]
fn test_cart_add_via_keys_and_total() {
    let mut app = app_on(Screen::Cart);
    add_cart_item(&mut app, "Milk", "2");

    let store = app.session().store(EntityKind::CartItem);
    assert_eq!(store.len(), 1);
    let item = store.list().next().expect("item");
    assert_eq!(item.text("category"), "Groceries");
    assert_eq!(item.number("quantity"), Some(1.0));

    let text = screen_text(&mut app);
    assert!(text.contains("Total: $2.00"));
}

#[test]
fn test_empty_cart_message() {
    let mut app = app_on(Screen::Cart);
    let text = screen_text(&mut app);
    assert!(text.contains("Your cart is empty"));
}

#[test]
fn test_invalid_submit_shows_errors() {
    let mut app = app_on(Screen::Books);
    app.handle_key(key(KeyCode::Enter));
    assert!(app.session().store(EntityKind::Book).is_empty());
    assert!(app.form(EntityKind::Book).is_touched("title"));

    let text = screen_text(&mut app);
    assert!(text.contains("Required"));
}

#[test]
fn test_list_edit_and_delete() {
    let mut app = app_on(Screen::Cart);
    add_cart_item(&mut app, "Milk", "2");
    add_cart_item(&mut app, "Eggs", "3");

    app.handle_key(key(KeyCode::Esc));
    assert_eq!(app.focus(), Focus::List);
    app.handle_key(key(KeyCode::Down));
    app.handle_key(key(KeyCode::Char('e')));
    assert_eq!(app.focus(), Focus::Form);
    assert_eq!(app.form(EntityKind::CartItem).value("name"), "Eggs");

    // clear name and retype
    for _ in 0..4 {
        app.handle_key(key(KeyCode::Backspace));
    }
    type_text(&mut app, "Duck eggs");
    app.handle_key(key(KeyCode::Enter));

    let names: Vec<_> = app
        .session()
        .store(EntityKind::CartItem)
        .list()
        .map(|e| e.text("name").to_string())
        .collect();
    assert_eq!(names, vec!["Milk", "Duck eggs"]);

    app.handle_key(key(KeyCode::Esc));
    app.handle_key(key(KeyCode::Char('d')));
    assert_eq!(app.session().store(EntityKind::CartItem).len(), 1);
}

#[test]
fn test_sign_up_password_is_masked() {
    let mut app = app_on(Screen::SignUp);
    for _ in 0..3 {
        app.handle_key(key(KeyCode::Down));
    }
    type_text(&mut app, "Secret1!");
    let text = screen_text(&mut app);
    assert!(text.contains("********"));
    assert!(!text.contains("Secret1!"));
}

#[test]
fn test_ctrl_c_quits() {
    let mut app = app_on(Screen::Books);
    app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert!(app.should_quit());
}
