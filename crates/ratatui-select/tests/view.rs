use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui_select::config::SelectConfig;
use ratatui_select::engine::SelectEvent;
use ratatui_select::input::InputEvent;
use ratatui_select::input::KeyCode;
use ratatui_select::input::KeyEvent;
use ratatui_select::input::MouseButton;
use ratatui_select::input::MouseEvent;
use ratatui_select::input::MouseEventKind;
use ratatui_select::option::SelectOption;
use ratatui_select::placement::PlacementPreference;
use ratatui_select::selection::SelectValue;
use ratatui_select::theme::Theme;
use ratatui_select::view::SelectView;

const TRIGGER: Rect = Rect {
    x: 0,
    y: 0,
    width: 20,
    height: 1,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

fn fruit() -> Vec<SelectOption<u32>> {
    vec![
        SelectOption::new(1, "Apple"),
        SelectOption::new(2, "Banana"),
        SelectOption::new(3, "Cherry"),
    ]
}

fn key(code: KeyCode) -> InputEvent {
    InputEvent::Key(KeyEvent::new(code))
}

fn click(x: u16, y: u16) -> InputEvent {
    InputEvent::Mouse(MouseEvent::new(x, y, MouseEventKind::Down(MouseButton::Left)))
}

fn row_text(buf: &Buffer, y: u16) -> String {
    let area = buf.area;
    (area.x..area.right())
        .map(|x| buf[(x, y)].symbol().to_string())
        .collect::<String>()
        .trim_end()
        .to_string()
}

fn draw(view: &mut SelectView<u32>, boundary: Rect) -> Buffer {
    let mut buf = Buffer::empty(boundary);
    view.render(TRIGGER, boundary, &mut buf, &Theme::default());
    buf
}

#[test]
fn closed_trigger_shows_placeholder_and_indicator() {
    init_tracing();
    let mut view = SelectView::new(SelectConfig::new(fruit())).unwrap();
    let buf = draw(&mut view, Rect::new(0, 0, 30, 10));
    assert!(row_text(&buf, 0).starts_with("Select…"));
    assert_eq!(buf[(19, 0)].symbol(), "▾");
    assert_eq!(row_text(&buf, 1), "");
}

#[test]
fn open_overlay_lists_options_below_trigger() {
    init_tracing();
    let mut view = SelectView::new(SelectConfig::new(fruit())).unwrap();
    view.handle_event(&key(KeyCode::Enter));
    let buf = draw(&mut view, Rect::new(0, 0, 30, 10));

    assert_eq!(buf[(19, 0)].symbol(), "▴");
    assert_eq!(buf[(0, 1)].symbol(), "┌");
    assert!(row_text(&buf, 2).contains("Apple"));
    assert!(row_text(&buf, 3).contains("Banana"));
    assert!(row_text(&buf, 4).contains("Cherry"));
    assert_eq!(buf[(0, 5)].symbol(), "└");
}

#[test]
fn overlay_flips_above_trigger_near_the_bottom_edge() {
    let mut view = SelectView::new(SelectConfig::new(fruit())).unwrap();
    view.handle_event(&key(KeyCode::Enter));
    let boundary = Rect::new(0, 0, 30, 12);
    let trigger = Rect::new(0, 10, 20, 1);
    let mut buf = Buffer::empty(boundary);
    view.render(trigger, boundary, &mut buf, &Theme::default());

    assert_eq!(buf[(0, 5)].symbol(), "┌");
    assert!(row_text(&buf, 6).contains("Apple"));
    assert_eq!(buf[(0, 9)].symbol(), "└");
}

#[test]
fn top_preference_places_overlay_above() {
    let mut view = SelectView::new(
        SelectConfig::new(fruit()).placement(PlacementPreference::Top),
    )
    .unwrap();
    view.handle_event(&key(KeyCode::Enter));
    let boundary = Rect::new(0, 0, 30, 20);
    let trigger = Rect::new(0, 10, 20, 1);
    let mut buf = Buffer::empty(boundary);
    view.render(trigger, boundary, &mut buf, &Theme::default());

    assert_eq!(buf[(0, 5)].symbol(), "┌");
    assert_eq!(row_text(&buf, 11), "");
}

#[test]
fn clicking_a_row_commits_and_closes() {
    init_tracing();
    let mut view = SelectView::new(SelectConfig::new(fruit())).unwrap();
    view.handle_event(&key(KeyCode::Enter));
    draw(&mut view, Rect::new(0, 0, 30, 10));

    let out = view.handle_event(&click(5, 3));
    assert!(out.events.contains(&SelectEvent::Changed(SelectValue::single(2))));
    assert!(out.events.contains(&SelectEvent::Closed));
    assert!(!view.engine().is_open());

    let buf = draw(&mut view, Rect::new(0, 0, 30, 10));
    assert!(row_text(&buf, 0).starts_with("Banana"));
}

#[test]
fn clicking_outside_dismisses_without_change() {
    let mut view = SelectView::new(SelectConfig::new(fruit())).unwrap();
    view.handle_event(&key(KeyCode::Enter));
    draw(&mut view, Rect::new(0, 0, 30, 10));

    let out = view.handle_event(&click(25, 8));
    assert_eq!(out.events, vec![SelectEvent::Closed]);
    assert!(view.engine().value().is_empty());
}

#[test]
fn clicking_the_border_keeps_the_dropdown_open() {
    let mut view = SelectView::new(SelectConfig::new(fruit())).unwrap();
    view.handle_event(&key(KeyCode::Enter));
    draw(&mut view, Rect::new(0, 0, 30, 10));

    let out = view.handle_event(&click(0, 3));
    assert!(out.handled);
    assert!(out.events.is_empty());
    assert!(view.engine().is_open());
}

#[test]
fn trigger_click_toggles() {
    let mut view = SelectView::new(SelectConfig::new(fruit())).unwrap();
    draw(&mut view, Rect::new(0, 0, 30, 10));
    let out = view.handle_event(&click(3, 0));
    assert_eq!(out.events, vec![SelectEvent::Opened]);
    draw(&mut view, Rect::new(0, 0, 30, 10));
    let out = view.handle_event(&click(3, 0));
    assert_eq!(out.events, vec![SelectEvent::Closed]);
}

#[test]
fn hover_and_wheel_move_the_highlight() {
    let mut view = SelectView::new(SelectConfig::new(fruit())).unwrap();
    view.handle_event(&key(KeyCode::Enter));
    draw(&mut view, Rect::new(0, 0, 30, 10));

    view.handle_event(&InputEvent::Mouse(MouseEvent::new(5, 4, MouseEventKind::Moved)));
    assert_eq!(view.engine().highlighted_index(), Some(2));

    view.handle_event(&InputEvent::Mouse(MouseEvent::new(5, 3, MouseEventKind::ScrollUp)));
    assert_eq!(view.engine().highlighted_index(), Some(1));
}

#[test]
fn long_list_scrolls_to_keep_highlight_visible() {
    let options = (0..20)
        .map(|i| SelectOption::new(i, format!("Item {i}")))
        .collect();
    let mut view = SelectView::new(SelectConfig::new(options)).unwrap();
    view.handle_event(&key(KeyCode::Enter));
    view.handle_event(&key(KeyCode::End));
    let buf = draw(&mut view, Rect::new(0, 0, 30, 30));

    // 8 visible rows between the borders at y=1 and y=10.
    assert!(row_text(&buf, 9).contains("Item 19"));
    assert!(row_text(&buf, 2).contains("Item 12"));
    assert_eq!(buf[(0, 10)].symbol(), "└");
}

#[test]
fn search_row_shows_placeholder_and_caret() {
    let mut view = SelectView::new(SelectConfig::new(fruit()).searchable(true)).unwrap();
    view.handle_event(&key(KeyCode::Enter));
    let buf = draw(&mut view, Rect::new(0, 0, 30, 10));
    assert!(row_text(&buf, 2).contains("Search…"));
    assert_eq!(view.cursor_pos(), None);

    view.run_deferred();
    assert_eq!(view.cursor_pos(), Some((1, 2)));

    view.handle_event(&key(KeyCode::Char('b')));
    let buf = draw(&mut view, Rect::new(0, 0, 30, 10));
    assert!(row_text(&buf, 2).contains('b'));
    assert!(row_text(&buf, 3).contains("Banana"));
    assert_eq!(view.cursor_pos(), Some((2, 2)));
}

#[test]
fn no_matches_shows_empty_text() {
    let mut view = SelectView::new(SelectConfig::new(fruit()).searchable(true)).unwrap();
    view.handle_event(&key(KeyCode::Enter));
    view.run_deferred();
    view.handle_event(&InputEvent::Paste("zzz".to_string()));
    assert_eq!(view.engine().highlighted_index(), None);

    let buf = draw(&mut view, Rect::new(0, 0, 30, 10));
    assert!(row_text(&buf, 3).contains("No results"));

    // Enter with nothing highlighted is swallowed and keeps the dropdown open.
    let out = view.handle_event(&key(KeyCode::Enter));
    assert!(out.events.is_empty());
    assert!(view.engine().is_open());
}

#[test]
fn group_headers_are_not_clickable() {
    let options = vec![
        SelectOption::new(1, "Apple").with_group("Fruit"),
        SelectOption::new(2, "Carrot").with_group("Vegetable"),
    ];
    let mut view = SelectView::new(SelectConfig::new(options)).unwrap();
    view.handle_event(&key(KeyCode::Enter));
    let buf = draw(&mut view, Rect::new(0, 0, 30, 10));
    assert!(row_text(&buf, 2).contains("Fruit"));
    assert!(row_text(&buf, 3).contains("Apple"));
    assert!(row_text(&buf, 4).contains("Vegetable"));
    assert!(row_text(&buf, 5).contains("Carrot"));

    let out = view.handle_event(&click(5, 4));
    assert!(out.events.is_empty());
    assert!(view.engine().is_open());

    let out = view.handle_event(&click(5, 5));
    assert!(out.events.contains(&SelectEvent::Changed(SelectValue::single(2))));
}

#[test]
fn multiple_mode_marks_selected_rows() {
    let mut view = SelectView::new(
        SelectConfig::new(fruit())
            .multiple()
            .default_value(SelectValue::multiple([3])),
    )
    .unwrap();
    view.handle_event(&key(KeyCode::Enter));
    let buf = draw(&mut view, Rect::new(0, 0, 30, 10));
    assert!(row_text(&buf, 4).contains("✓ Cherry"));
    assert!(!row_text(&buf, 2).contains('✓'));

    view.handle_event(&click(5, 2));
    assert!(view.engine().is_open());
    let buf = draw(&mut view, Rect::new(0, 0, 30, 10));
    assert!(row_text(&buf, 0).starts_with("Apple, Cherry"));
}

#[test]
fn disabled_select_ignores_pointer() {
    let mut view = SelectView::new(SelectConfig::new(fruit()).disabled(true)).unwrap();
    draw(&mut view, Rect::new(0, 0, 30, 10));
    let out = view.handle_event(&click(3, 0));
    assert!(out.events.is_empty());
    assert!(!view.engine().is_open());
}
