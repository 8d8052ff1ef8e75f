use ratatui_select_core::config::SelectConfig;
use ratatui_select_core::engine::SelectEngine;
use ratatui_select_core::engine::SelectEvent;
use ratatui_select_core::input::KeyCode;
use ratatui_select_core::input::KeyEvent;
use ratatui_select_core::input::KeyModifiers;
use ratatui_select_core::lifecycle::Lifecycle;
use ratatui_select_core::option::SelectOption;
use ratatui_select_core::placement::PlacementPreference;
use ratatui_select_core::placement::PlacementRequest;
use ratatui_select_core::placement::ResolvedPlacement;
use ratatui_select_core::placement::Side;
use ratatui_select_core::selection::SelectValue;
use ratatui::layout::Rect;
use ratatui::layout::Size;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

fn press(engine: &mut SelectEngine<u32>, code: KeyCode) -> Vec<SelectEvent<u32>> {
    engine.handle_key(&KeyEvent::new(code)).events
}

fn with_disabled_middle() -> Vec<SelectOption<u32>> {
    vec![
        SelectOption::new(1, "A"),
        SelectOption::new(2, "B").with_disabled(true),
        SelectOption::new(3, "C"),
    ]
}

#[test]
fn keyboard_walks_over_disabled_option_and_commits() {
    init_tracing();
    let mut select = SelectEngine::new(SelectConfig::new(with_disabled_middle())).unwrap();

    assert_eq!(press(&mut select, KeyCode::Enter), vec![SelectEvent::Opened]);
    assert_eq!(select.highlighted_index(), Some(0));

    press(&mut select, KeyCode::Down);
    assert_eq!(select.highlighted_index(), Some(1));
    press(&mut select, KeyCode::Down);
    assert_eq!(select.highlighted_index(), Some(2));

    let events = press(&mut select, KeyCode::Enter);
    assert_eq!(
        events,
        vec![
            SelectEvent::Changed(SelectValue::single(3)),
            SelectEvent::Closed
        ]
    );
    assert_eq!(select.value(), &SelectValue::single(3));
    assert_eq!(select.lifecycle(), Lifecycle::Closed);
}

#[test]
fn typing_narrows_the_list_and_resets_highlight() {
    init_tracing();
    let options = vec![SelectOption::new(1, "Alpha"), SelectOption::new(2, "Beta")];
    let mut select = SelectEngine::new(SelectConfig::new(options).searchable(true)).unwrap();

    select.open();
    select.run_deferred();
    press(&mut select, KeyCode::Down);
    assert_eq!(select.highlighted_index(), Some(1));

    select.set_search_text("a");
    select.set_search_text("al");
    let visible: Vec<u32> = select.filtered_options().map(|o| o.value).collect();
    assert_eq!(visible, vec![1]);
    assert_eq!(select.highlighted_index(), Some(0));

    select.set_search_text("zz");
    assert_eq!(select.filtered_len(), 0);
    assert_eq!(select.highlighted_index(), None);
    // Enter on an empty list does nothing.
    assert!(press(&mut select, KeyCode::Enter).is_empty());
    assert!(select.is_open());
}

#[test]
fn multiple_mode_toggles_and_stays_open() {
    init_tracing();
    let options = vec![
        SelectOption::new(1, "one"),
        SelectOption::new(2, "two"),
        SelectOption::new(3, "three"),
    ];
    let mut select = SelectEngine::new(
        SelectConfig::new(options)
            .multiple()
            .default_value(SelectValue::multiple([1, 3])),
    )
    .unwrap();
    select.open();

    let out = select.select_position(1);
    assert_eq!(out.changed(), Some(&SelectValue::multiple([1, 2, 3])));
    assert!(select.is_open());

    let out = select.select_position(1);
    assert_eq!(out.changed(), Some(&SelectValue::multiple([1, 3])));
    assert!(select.is_open());
    assert_eq!(select.value(), &SelectValue::multiple([1, 3]));
}

#[test]
fn search_field_context_routes_home_end() {
    let options: Vec<SelectOption<u32>> = (0..6)
        .map(|i| SelectOption::new(i, format!("item {i}")))
        .collect();
    let mut select = SelectEngine::new(SelectConfig::new(options).searchable(true)).unwrap();
    select.open();
    select.run_deferred();

    let end = select.handle_key(&KeyEvent::new(KeyCode::End));
    assert!(!end.handled, "plain End belongs to the text caret");
    assert_eq!(select.highlighted_index(), Some(0));

    let ctrl_end = KeyEvent::new(KeyCode::End).with_modifiers(KeyModifiers::ctrl());
    assert!(select.handle_key(&ctrl_end).handled);
    assert_eq!(select.highlighted_index(), Some(5));

    let typed = select.handle_key(&KeyEvent::new(KeyCode::Char(' ')));
    assert!(!typed.handled);
    assert!(select.is_open());
}

#[test]
fn placement_follows_lifecycle() {
    let mut select = SelectEngine::new(
        SelectConfig::new(with_disabled_middle()).placement(PlacementPreference::Top),
    )
    .unwrap();
    let mut calls = 0;
    let mut positioner = |r: &PlacementRequest| {
        calls += 1;
        ResolvedPlacement {
            area: Rect::new(r.anchor.x, r.anchor.y, r.desired.width, r.desired.height),
            side: r.preferred.opposite(),
        }
    };

    select.set_anchor(Rect::new(0, 10, 12, 1));
    select.set_boundary(Rect::new(0, 0, 80, 24));
    select.set_overlay_size(Size::new(12, 3));
    assert_eq!(select.update_placement(&mut positioner), None);

    select.open();
    let placed = select.update_placement(&mut positioner).unwrap();
    assert_eq!(placed.side, Side::Bottom);
    assert_eq!(select.resolved_placement(), Some(placed));
    select.update_placement(&mut positioner);

    select.set_boundary(Rect::new(0, 0, 100, 30));
    select.update_placement(&mut positioner);

    select.dismiss();
    assert_eq!(select.resolved_placement(), None);
    select.set_anchor(Rect::new(4, 10, 12, 1));
    assert_eq!(select.update_placement(&mut positioner), None);
    drop(positioner);
    assert_eq!(calls, 2);
}

#[test]
fn pointer_interaction() {
    let mut select = SelectEngine::new(SelectConfig::new(with_disabled_middle())).unwrap();
    assert_eq!(select.toggle().events, vec![SelectEvent::Opened]);
    select.hover(2);
    assert_eq!(select.highlighted_index(), Some(2));
    select.hover(9);
    assert_eq!(select.highlighted_index(), Some(2));

    let out = select.click_option(1);
    assert!(out.events.is_empty());
    assert_eq!(select.highlighted_index(), Some(1));
    assert!(select.is_open());

    let out = select.click_option(0);
    assert_eq!(out.changed(), Some(&SelectValue::single(1)));
    assert!(!select.is_open());
}

#[test]
fn duplicate_values_resolve_to_last_option() {
    init_tracing();
    let options = vec![
        SelectOption::new(7, "first seven"),
        SelectOption::new(7, "second seven"),
    ];
    let mut select = SelectEngine::new(SelectConfig::new(options)).unwrap();
    assert_eq!(select.filtered_len(), 2);
    select.open();
    select.select_position(0);
    let labels = select.selected_labels();
    assert_eq!(labels.len(), 1);
    assert_eq!(
        labels[0],
        ratatui_select_core::engine::SelectedLabel::Known("second seven")
    );
    // Both rows carry the selected value.
    let a11y = {
        select.open();
        select.accessibility()
    };
    assert!(a11y.options.iter().all(|o| o.selected));
}

#[test]
fn disabled_last_duplicate_blocks_the_value() {
    init_tracing();
    let options = vec![
        SelectOption::new(7, "first seven"),
        SelectOption::new(7, "second seven").with_disabled(true),
        SelectOption::new(8, "eight"),
    ];
    let mut select = SelectEngine::new(SelectConfig::new(options)).unwrap();
    select.open();
    let out = select.select_position(0);
    assert!(out.events.is_empty());
    assert!(select.value().is_empty());
    assert!(select.is_open());

    // Enter on the enabled first row is swallowed too.
    let out = select.handle_key(&KeyEvent::new(KeyCode::Enter));
    assert!(out.handled);
    assert!(out.events.is_empty());

    let out = select.select_position(2);
    assert_eq!(out.events[0], SelectEvent::Changed(SelectValue::single(8)));
}
