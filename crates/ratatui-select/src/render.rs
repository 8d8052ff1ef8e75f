use crate::viewport::ListViewport;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

pub const ELLIPSIS: &str = "…";

/// Draws a one-column scrollbar for `state` into `area`. A blank track when everything fits.
pub fn render_scrollbar(area: Rect, buf: &mut Buffer, state: &ListViewport, style: Style) {
    buf.set_style(area, style);
    let track = area.height as usize;
    if track == 0 {
        return;
    }
    let thumb = thumb_span(track, state);
    for dy in 0..track {
        let symbol = match &thumb {
            Some(range) if range.contains(&dy) => "█",
            Some(_) => "│",
            None => " ",
        };
        buf.set_stringn(area.x, area.y + dy as u16, symbol, 1, style);
    }
}

/// Rows of a `track`-row scrollbar covered by the thumb, or `None` when nothing overflows.
fn thumb_span(track: usize, state: &ListViewport) -> Option<std::ops::Range<usize>> {
    let (content, visible) = (state.content_h, state.viewport_h);
    if content <= visible {
        return None;
    }
    let len = (visible * track).div_ceil(content).clamp(1, track);
    let free = track - len;
    let max_y = content - visible;
    let top = (state.y.min(max_y) * free + max_y / 2) / max_y;
    Some(top..top + len)
}

/// Writes `input` starting at display column `start_col`, stopping before `max_cols` columns.
/// Returns the number of columns written. Wide characters are never split.
pub fn render_str_clipped(
    x: u16,
    y: u16,
    start_col: u32,
    max_cols: u16,
    buf: &mut Buffer,
    input: &str,
    style: Style,
) -> u16 {
    if max_cols == 0 {
        return 0;
    }

    let start_col = start_col as usize;
    let max_cols = max_cols as usize;
    let mut col = 0usize;
    let mut out_cols = 0usize;
    let mut tmp = [0u8; 4];

    for ch in input.chars() {
        let ch = if ch == '\t' { ' ' } else { ch };
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if w == 0 {
            continue;
        }
        if col < start_col {
            col += w;
            continue;
        }
        if out_cols + w > max_cols {
            break;
        }

        let dx = out_cols as u16;
        if let Some(cell) = buf.cell_mut((x + dx, y)) {
            cell.set_style(style);
            cell.set_symbol(ch.encode_utf8(&mut tmp));
        }
        if w == 2 {
            if let Some(cell) = buf.cell_mut((x + dx + 1, y)) {
                cell.set_style(style);
                cell.set_symbol("");
            }
        }
        out_cols += w;
        col += w;
    }
    out_cols as u16
}

/// Shortens `input` to at most `max_cols` display columns, ending in an ellipsis when cut.
pub fn truncate_with_ellipsis(input: &str, max_cols: u16) -> String {
    let max_cols = max_cols as usize;
    if UnicodeWidthStr::width(input) <= max_cols {
        return input.to_string();
    }
    if max_cols == 0 {
        return String::new();
    }
    let budget = max_cols - 1;
    let mut used = 0usize;
    let mut out = String::new();
    for ch in input.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push_str(ELLIPSIS);
    out
}
