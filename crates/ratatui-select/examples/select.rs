use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Constraint;
use ratatui::layout::Direction;
use ratatui::layout::Layout;
use ratatui::layout::Position;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui_select::config::SelectConfig;
use ratatui_select::crossterm_input::input_event_from_crossterm;
use ratatui_select::engine::SelectEvent;
use ratatui_select::input::InputEvent;
use ratatui_select::input::KeyCode;
use ratatui_select::option::SelectOption;
use ratatui_select::theme::Theme;
use ratatui_select::view::SelectView;
use std::io;
use std::time::Duration;

type Backend = CrosstermBackend<io::Stdout>;

fn languages() -> Vec<SelectOption<&'static str>> {
    vec![
        SelectOption::new("rs", "Rust").with_group("Systems"),
        SelectOption::new("c", "C").with_group("Systems"),
        SelectOption::new("zig", "Zig").with_group("Systems"),
        SelectOption::new("go", "Go").with_group("Services"),
        SelectOption::new("java", "Java").with_group("Services"),
        SelectOption::new("cobol", "COBOL")
            .with_group("Services")
            .with_disabled(true),
        SelectOption::new("py", "Python").with_group("Scripting"),
        SelectOption::new("rb", "Ruby").with_group("Scripting"),
        SelectOption::new("lua", "Lua")
            .with_description("embeddable scripting")
            .with_group("Scripting"),
    ]
}

fn main() -> io::Result<()> {
    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let theme = Theme::default();
    let mut single = SelectView::new(SelectConfig::new(languages()).searchable(true).clearable(true))
        .map_err(io::Error::other)?;
    let mut multi = SelectView::new(SelectConfig::new(languages()).multiple().searchable(true))
        .map_err(io::Error::other)?;

    let res = run(&mut terminal, &theme, &mut single, &mut multi);

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    res
}

fn run(
    terminal: &mut Terminal<Backend>,
    theme: &Theme,
    single: &mut SelectView<&'static str>,
    multi: &mut SelectView<&'static str>,
) -> io::Result<()> {
    let mut focus = 0usize;
    let mut last = String::from("Tab switches fields, Esc closes, q quits");
    loop {
        single.set_focused(focus == 0);
        multi.set_focused(focus == 1);

        terminal.draw(|f| {
            let area = f.area();
            let [main, status] = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .areas(area);

            let block = Block::default()
                .title("SelectView (Enter/Space open, ↑/↓, type to filter, Ctrl+Backspace clears)")
                .borders(Borders::ALL);
            let inner = block.inner(main);
            f.render_widget(block, main);

            let first = Rect::new(inner.x + 2, inner.y + 1, 30.min(inner.width), 1);
            let second = Rect::new(
                inner.x + 2,
                inner.bottom().saturating_sub(2),
                30.min(inner.width),
                1,
            );

            let buf = f.buffer_mut();
            buf.set_span(status.x, status.y, &Span::styled(last.as_str(), Style::default()), status.width);
            // The open one renders last so its overlay covers the other trigger.
            if multi.engine().is_open() {
                single.render(first, inner, buf, theme);
                multi.render(second, inner, buf, theme);
            } else {
                multi.render(second, inner, buf, theme);
                single.render(first, inner, buf, theme);
            }

            let caret = single.cursor_pos().or_else(|| multi.cursor_pos());
            if let Some((x, y)) = caret {
                f.set_cursor_position(Position::new(x, y));
            }
        })?;

        // Deferred effects run once the frame with the search field exists.
        single.run_deferred();
        multi.run_deferred();

        if !crossterm::event::poll(Duration::from_millis(50))? {
            continue;
        }
        let Some(ev) = input_event_from_crossterm(crossterm::event::read()?) else {
            continue;
        };

        let any_open = single.engine().is_open() || multi.engine().is_open();
        if let InputEvent::Key(key) = &ev {
            if !any_open && key.code == KeyCode::Char('q') {
                return Ok(());
            }
        }

        let (active, other) = if focus == 0 {
            (&mut *single, &mut *multi)
        } else {
            (&mut *multi, &mut *single)
        };
        // A click that dismissed the focused select may still land on the other trigger.
        let mut outs = vec![active.handle_event(&ev)];
        let dismissed = outs[0].events == [SelectEvent::Closed];
        if matches!(ev, InputEvent::Mouse(_)) && (!outs[0].handled || dismissed) {
            outs.push(other.handle_event(&ev));
        }

        for event in outs.iter().flat_map(|o| &o.events) {
            last = match event {
                SelectEvent::Changed(value) => format!("changed: {value:?}"),
                SelectEvent::Opened => "opened".to_string(),
                SelectEvent::Closed => "closed".to_string(),
            };
        }
        if other.engine().is_open() && !active.engine().is_open() {
            focus = 1 - focus;
        }
        if !outs[0].prevent_default {
            if let InputEvent::Key(key) = &ev {
                if matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
                    focus = 1 - focus;
                }
            }
        }
    }
}
