//! Window geometry and stacking helpers used by the desktop reducer.

use crate::model::{
    AppId, DesktopState, ResizeEdge, Viewport, WindowRect, CASCADE_ORIGIN_X, CASCADE_ORIGIN_Y,
    CASCADE_STEP, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH, DOCK_RESERVE_HEIGHT,
    MENU_BAR_HEIGHT,
};

/// Minimum allowed window width.
pub const MIN_WINDOW_WIDTH: i32 = 220;
/// Minimum allowed window height.
pub const MIN_WINDOW_HEIGHT: i32 = 140;
/// Smallest viewport the layout math accepts.
pub const MIN_VIEWPORT_WIDTH: i32 = 320;
pub const MIN_VIEWPORT_HEIGHT: i32 = 240;

/// Rect for the window opened while `open_count` windows are already tracked.
///
/// Each further window steps down and to the right of the previous one.
pub fn cascade_rect(open_count: usize) -> WindowRect {
    let step = i32::try_from(open_count).unwrap_or(i32::MAX / CASCADE_STEP) * CASCADE_STEP;
    WindowRect {
        x: CASCADE_ORIGIN_X + step,
        y: CASCADE_ORIGIN_Y + step,
        w: DEFAULT_WINDOW_WIDTH,
        h: DEFAULT_WINDOW_HEIGHT,
    }
}

/// Rect for a new window given the most recently opened one.
///
/// The new window sits one cascade step past `previous` at the default size, so closing an
/// earlier window never hands its slot to a window that would cover a later one.
pub fn next_cascade_rect(previous: Option<WindowRect>) -> WindowRect {
    match previous {
        Some(rect) => WindowRect {
            x: rect.x.saturating_add(CASCADE_STEP),
            y: rect.y.saturating_add(CASCADE_STEP),
            w: DEFAULT_WINDOW_WIDTH,
            h: DEFAULT_WINDOW_HEIGHT,
        },
        None => cascade_rect(0),
    }
}

/// Rect a window returns to when restored from maximized.
pub fn default_rect() -> WindowRect {
    cascade_rect(0)
}

/// Work area between the menu bar and the dock.
pub fn maximized_rect(viewport: Viewport) -> WindowRect {
    WindowRect {
        x: 0,
        y: MENU_BAR_HEIGHT,
        w: viewport.width,
        h: viewport.height - MENU_BAR_HEIGHT - DOCK_RESERVE_HEIGHT,
    }
    .clamped_min(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)
}

pub fn clamp_viewport(width: i32, height: i32) -> Viewport {
    Viewport {
        width: width.max(MIN_VIEWPORT_WIDTH),
        height: height.max(MIN_VIEWPORT_HEIGHT),
    }
}

/// Applies resize deltas for a given edge/corner drag. The result is not clamped.
pub fn resize_rect(start: WindowRect, edge: ResizeEdge, dx: i32, dy: i32) -> WindowRect {
    match edge {
        ResizeEdge::East => WindowRect {
            w: start.w + dx,
            ..start
        },
        ResizeEdge::West => WindowRect {
            x: start.x + dx,
            w: start.w - dx,
            ..start
        },
        ResizeEdge::South => WindowRect {
            h: start.h + dy,
            ..start
        },
        ResizeEdge::North => WindowRect {
            y: start.y + dy,
            h: start.h - dy,
            ..start
        },
        ResizeEdge::NorthEast => WindowRect {
            y: start.y + dy,
            w: start.w + dx,
            h: start.h - dy,
            ..start
        },
        ResizeEdge::NorthWest => WindowRect {
            x: start.x + dx,
            y: start.y + dy,
            w: start.w - dx,
            h: start.h - dy,
        },
        ResizeEdge::SouthEast => WindowRect {
            w: start.w + dx,
            h: start.h + dy,
            ..start
        },
        ResizeEdge::SouthWest => WindowRect {
            x: start.x + dx,
            w: start.w - dx,
            h: start.h + dy,
            ..start
        },
    }
}

/// Resizes from `start` and enforces the minimum size while keeping the dragged edge's opposite
/// edge anchored.
pub fn resize_rect_clamped(start: WindowRect, edge: ResizeEdge, dx: i32, dy: i32) -> WindowRect {
    let raw = resize_rect(start, edge, dx, dy);
    let mut next = raw.clamped_min(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT);
    if matches!(
        edge,
        ResizeEdge::West | ResizeEdge::NorthWest | ResizeEdge::SouthWest
    ) {
        next.x = start.x + start.w - next.w;
    }
    if matches!(
        edge,
        ResizeEdge::North | ResizeEdge::NorthEast | ResizeEdge::NorthWest
    ) {
        next.y = start.y + start.h - next.h;
    }
    next
}

/// Unminimizes `app_id` and moves it above every other window.
///
/// Returns `false` when the app has no window. Raising the window that is already on top and
/// visible leaves the stack untouched.
pub fn raise_window(state: &mut DesktopState, app_id: AppId) -> bool {
    let top_z = state.windows.iter().map(|w| w.z_index).max();
    let Some(window) = state.window(app_id) else {
        return false;
    };
    if !window.minimized && Some(window.z_index) == top_z {
        return true;
    }

    let z = state.next_foreground_z();
    if let Some(window) = state.window_mut(app_id) {
        window.minimized = false;
        window.z_index = z;
    }
    true
}

/// App whose window is at the bottom of the stack, minimized or not.
pub fn bottom_window(state: &DesktopState) -> Option<AppId> {
    state
        .windows
        .iter()
        .min_by_key(|w| w.z_index)
        .map(|w| w.app_id)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::WindowRecord;

    #[test]
    fn cascade_steps_by_open_count() {
        assert_eq!(
            cascade_rect(0),
            WindowRect {
                x: 120,
                y: 72,
                w: 640,
                h: 420
            }
        );
        assert_eq!(cascade_rect(2).x, 180);
        assert_eq!(cascade_rect(2).y, 132);
    }

    #[test]
    fn next_cascade_steps_past_the_previous_window() {
        assert_eq!(next_cascade_rect(None), cascade_rect(0));

        let previous = WindowRect {
            x: 400,
            y: 200,
            w: 300,
            h: 200,
        };
        assert_eq!(
            next_cascade_rect(Some(previous)),
            WindowRect {
                x: 430,
                y: 230,
                w: 640,
                h: 420
            }
        );
    }

    #[test]
    fn maximized_rect_fills_the_work_area() {
        let rect = maximized_rect(Viewport {
            width: 1440,
            height: 900,
        });
        assert_eq!(
            rect,
            WindowRect {
                x: 0,
                y: 28,
                w: 1440,
                h: 788
            }
        );
    }

    #[test]
    fn tiny_viewport_still_yields_minimum_window() {
        let rect = maximized_rect(clamp_viewport(10, 10));
        assert!(rect.w >= MIN_WINDOW_WIDTH);
        assert!(rect.h >= MIN_WINDOW_HEIGHT);
    }

    #[test]
    fn clamped_west_resize_anchors_the_right_edge() {
        let start = WindowRect {
            x: 100,
            y: 100,
            w: 300,
            h: 300,
        };
        let next = resize_rect_clamped(start, ResizeEdge::West, 200, 0);
        assert_eq!(next.w, MIN_WINDOW_WIDTH);
        assert_eq!(next.x + next.w, 400);
    }

    #[test]
    fn raising_the_top_window_keeps_the_counter() {
        let mut state = DesktopState::default();
        let rect = cascade_rect(0);
        state.windows.push(WindowRecord::new(AppId::Finder, rect, 11));
        state.windows.push(WindowRecord::new(AppId::Music, rect, 12));
        state.next_z = 12;

        assert!(raise_window(&mut state, AppId::Music));
        assert_eq!(state.next_z, 12);

        assert!(raise_window(&mut state, AppId::Finder));
        assert_eq!(state.window(AppId::Finder).map(|w| w.z_index), Some(13));
        assert_eq!(bottom_window(&state), Some(AppId::Music));
        assert!(!raise_window(&mut state, AppId::Safari));
    }
}
