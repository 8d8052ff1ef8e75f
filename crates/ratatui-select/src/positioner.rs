//! A terminal-cell [`Positioner`] with flip and shift.
use ratatui::layout::Rect;
use ratatui_select_core::placement::PlacementRequest;
use ratatui_select_core::placement::Positioner;
use ratatui_select_core::placement::ResolvedPlacement;
use ratatui_select_core::placement::Side;

/// Places the overlay next to the anchor on the preferred side. Flips to the other side when the
/// preferred one cannot fit the desired height and the other side has more room, shifts left to
/// stay inside the boundary, and shrinks to the room that is left.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlipPositioner {
    /// Rows between the anchor and the overlay.
    pub gap: u16,
}

impl FlipPositioner {
    pub fn new(gap: u16) -> Self {
        Self { gap }
    }

    fn room(&self, side: Side, anchor: Rect, boundary: Rect) -> u16 {
        match side {
            Side::Bottom => boundary
                .bottom()
                .saturating_sub(anchor.bottom().saturating_add(self.gap)),
            Side::Top => anchor.y.saturating_sub(boundary.y.saturating_add(self.gap)),
        }
    }
}

impl Positioner for FlipPositioner {
    fn resolve(&mut self, request: &PlacementRequest) -> ResolvedPlacement {
        let PlacementRequest {
            anchor,
            preferred,
            boundary,
            desired,
        } = *request;

        let preferred_room = self.room(preferred, anchor, boundary);
        let other_room = self.room(preferred.opposite(), anchor, boundary);
        let side = if preferred_room < desired.height && other_room > preferred_room {
            preferred.opposite()
        } else {
            preferred
        };
        let room = self.room(side, anchor, boundary);

        let width = desired.width.min(boundary.width);
        let height = desired.height.min(room);
        let x = anchor
            .x
            .min(boundary.right().saturating_sub(width))
            .max(boundary.x);
        let y = match side {
            Side::Bottom => anchor.bottom().saturating_add(self.gap),
            Side::Top => anchor.y.saturating_sub(self.gap).saturating_sub(height),
        };

        ResolvedPlacement {
            area: Rect::new(x, y, width, height),
            side,
        }
    }
}
