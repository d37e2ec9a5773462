//! Per-frame focus registry: the navigator's live "UI tree".
//!
//! Every render rebuilds the frame from scratch, registering each
//! interactive widget in draw order with its on-screen rectangle. The
//! navigator then queries this snapshot per key event, so geometry is always
//! current and nothing survives a layout change. Widgets scrolled out of the
//! viewport are still registered (at their shifted coordinates) so
//! directional navigation can reach them and trigger a scroll.

use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};

use reeldeck_nav::{FocusScene, FocusTarget, Rect, TargetId};

use crate::app::Action;

/// Horizontally scrollable strips a focus target can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowKey {
    Home(u8),
    Genres,
    Similar,
}

/// Stable id for a widget slug. Slugs carry the widget identity
/// ("card:movie:603:trending"), so the same widget keeps its id across
/// frames while layout moves underneath it.
pub fn target_id(slug: &str) -> TargetId {
    let mut h = DefaultHasher::new();
    slug.hash(&mut h);
    TargetId(h.finish())
}

#[derive(Debug, Clone)]
pub struct FrameEntry {
    pub id: TargetId,
    /// On-screen rectangle at render time (scroll already applied).
    pub rect: Rect,
    pub action: Action,
    /// Widget center in unscrolled content coordinates, used to compute
    /// scroll-to-center offsets: `.0` within the owning row (or viewport x
    /// when unowned), `.1` within the screen's vertical content.
    pub content_center: (f32, f32),
    pub row: Option<RowKey>,
}

/// Visible span and total content width of one horizontal strip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowExtent {
    pub span: f32,
    pub content: f32,
}

#[derive(Debug, Default)]
pub struct FocusFrame {
    entries: Vec<FrameEntry>,
    index: HashMap<TargetId, usize>,
    rows: HashMap<RowKey, RowExtent>,
    /// (viewport height, content height) of the scrollable body.
    vertical: Option<(f32, f32)>,
}

impl FocusFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything from the previous frame.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
        self.rows.clear();
        self.vertical = None;
    }

    pub fn set_vertical(&mut self, viewport: f32, content: f32) {
        self.vertical = Some((viewport, content));
    }

    pub fn vertical(&self) -> Option<(f32, f32)> {
        self.vertical
    }

    pub fn set_row(&mut self, key: RowKey, extent: RowExtent) {
        self.rows.insert(key, extent);
    }

    pub fn row_extent(&self, key: RowKey) -> Option<RowExtent> {
        self.rows.get(&key).copied()
    }

    /// Register a widget that does not scroll (navbar tabs and the like).
    pub fn register(&mut self, slug: &str, rect: Rect, action: Action) -> TargetId {
        let center = rect.center();
        self.register_scrolled(slug, rect, action, center, None)
    }

    /// Register a widget inside scrollable content. `content_center` is its
    /// center in unscrolled coordinates; `row` names the horizontal strip it
    /// lives in, if any.
    pub fn register_scrolled(
        &mut self,
        slug: &str,
        rect: Rect,
        action: Action,
        content_center: (f32, f32),
        row: Option<RowKey>,
    ) -> TargetId {
        let id = target_id(slug);
        if let std::collections::hash_map::Entry::Vacant(slot) = self.index.entry(id) {
            slot.insert(self.entries.len());
            self.entries.push(FrameEntry {
                id,
                rect,
                action,
                content_center,
                row,
            });
        }
        id
    }

    pub fn entry(&self, id: TargetId) -> Option<&FrameEntry> {
        self.index.get(&id).map(|&i| &self.entries[i])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Snapshot pairing the frame with the shell's current focus, handed to the
/// navigator per key event.
pub struct SceneView<'a> {
    pub frame: &'a FocusFrame,
    pub current: Option<TargetId>,
}

impl FocusScene for SceneView<'_> {
    fn targets(&self) -> Vec<FocusTarget> {
        self.frame
            .entries
            .iter()
            .map(|e| FocusTarget::new(e.id, e.rect))
            .collect()
    }

    fn current(&self) -> Option<TargetId> {
        self.current
    }
}

/// Offset that centers a point inside a viewport span, clamped so the
/// content never over-scrolls.
pub fn center_on(target_center: f32, span: f32, content: f32) -> f32 {
    let max = (content - span).max(0.0);
    (target_center - span / 2.0).clamp(0.0, max)
}

/// Fire-and-forget eased scroll toward a target offset, advanced on ticks.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ScrollAnim {
    current: f32,
    target: f32,
}

impl ScrollAnim {
    /// Start gliding toward `to`; the current position keeps animating from
    /// wherever it is.
    pub fn glide_to(&mut self, to: f32) {
        self.target = to;
    }

    pub fn jump_to(&mut self, to: f32) {
        self.current = to;
        self.target = to;
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    /// Advance one animation step. Returns whether the scroll is still
    /// moving.
    pub fn tick(&mut self) -> bool {
        let delta = self.target - self.current;
        if delta.abs() < 0.5 {
            self.current = self.target;
            return false;
        }
        self.current += delta * 0.35;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reeldeck_nav::{Decision, NavKey, Navigator};

    fn noop() -> Action {
        Action::Back
    }

    #[test]
    fn target_ids_are_stable_and_distinct() {
        assert_eq!(target_id("nav:home"), target_id("nav:home"));
        assert_ne!(target_id("nav:home"), target_id("nav:movies"));
    }

    #[test]
    fn registration_keeps_draw_order() {
        let mut frame = FocusFrame::new();
        let a = frame.register("a", Rect::new(0.0, 0.0, 10.0, 2.0), noop());
        let b = frame.register("b", Rect::new(20.0, 0.0, 10.0, 2.0), noop());

        let scene = SceneView {
            frame: &frame,
            current: None,
        };
        let targets = scene.targets();
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0].id, a);
        assert_eq!(targets[1].id, b);
    }

    #[test]
    fn duplicate_slugs_register_once() {
        let mut frame = FocusFrame::new();
        frame.register("a", Rect::new(0.0, 0.0, 10.0, 2.0), noop());
        frame.register("a", Rect::new(50.0, 0.0, 10.0, 2.0), noop());
        assert_eq!(frame.len(), 1);
        // The first registration wins.
        let entry = frame.entry(target_id("a")).unwrap();
        assert_eq!(entry.rect.x, 0.0);
    }

    #[test]
    fn navigator_moves_between_registered_widgets() {
        let mut frame = FocusFrame::new();
        let left = frame.register("left", Rect::new(0.0, 5.0, 10.0, 3.0), noop());
        let right = frame.register("right", Rect::new(30.0, 5.0, 10.0, 3.0), noop());

        let nav = Navigator::new();
        let scene = SceneView {
            frame: &frame,
            current: Some(left),
        };
        assert_eq!(
            nav.decide(&scene, NavKey::Right, false),
            Decision::MoveFocus(right)
        );
    }

    #[test]
    fn center_on_clamps_to_content_bounds() {
        // Centering mid-content.
        assert_eq!(center_on(100.0, 40.0, 200.0), 80.0);
        // Near the start: cannot scroll above zero.
        assert_eq!(center_on(10.0, 40.0, 200.0), 0.0);
        // Near the end: cannot scroll past content.
        assert_eq!(center_on(195.0, 40.0, 200.0), 160.0);
        // Content smaller than the viewport never scrolls.
        assert_eq!(center_on(10.0, 40.0, 20.0), 0.0);
    }

    #[test]
    fn scroll_anim_converges_on_target() {
        let mut s = ScrollAnim::default();
        s.glide_to(100.0);
        let mut steps = 0;
        while s.tick() {
            steps += 1;
            assert!(steps < 100, "scroll never settled");
        }
        assert_eq!(s.current(), 100.0);
        assert!(steps > 1, "glide should take several ticks");
    }

    #[test]
    fn scroll_anim_jump_is_immediate() {
        let mut s = ScrollAnim::default();
        s.jump_to(42.0);
        assert_eq!(s.current(), 42.0);
        assert!(!s.tick());
    }
}
