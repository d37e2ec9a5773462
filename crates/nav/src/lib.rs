//! Directional (spatial) focus navigation.
//!
//! Translates arrow-key and activation-key input into focus movement across
//! an unordered set of interactive screen elements, picking the nearest
//! element in the pressed direction by geometry rather than registration
//! order. The navigator holds no state between key events: every decision is
//! a pure function of the live scene (targets + current focus) at the instant
//! of the event, so layout changes between presses are always picked up.
//!
//! The navigator decides, the host applies. Moving focus, firing the
//! activation, and scrolling the target into view are the shell's job; this
//! keeps the algorithm synchronous, side-effect free, and testable against
//! plain rectangles.

use tracing::trace;

/// Identifier of a focus target, stable for the lifetime of the element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub u64);

/// Axis-aligned bounding rectangle in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Geometric center, the basis for all directional comparison.
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// An element collapsed by layout (zero-sized rectangle) is not visible
    /// and never participates in navigation.
    pub fn is_visible(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// One interactive element as observed at the instant of a key event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusTarget {
    pub id: TargetId,
    pub rect: Rect,
}

impl FocusTarget {
    pub fn new(id: TargetId, rect: Rect) -> Self {
        Self { id, rect }
    }
}

/// Keys the navigator reacts to. Everything else stays with the host's
/// default handling and never reaches [`Navigator::decide`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavKey {
    Up,
    Down,
    Left,
    Right,
    /// Primary action of the focused element (Enter).
    Activate,
}

/// Live UI tree query surface.
///
/// Implementations must recompute the target list and current focus from the
/// live layout on every call; the navigator never caches geometry across
/// events.
pub trait FocusScene {
    /// All focusable elements, in document (render) order.
    fn targets(&self) -> Vec<FocusTarget>;

    /// The currently focused element, if any.
    fn current(&self) -> Option<TargetId>;
}

/// Empirically tuned constants for the direction predicate and distance
/// score. The defaults are behavioral, not derived from a model; don't
/// adjust them without evidence of a navigation regression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavTuning {
    /// Cross-axis slack for Left/Right movement: a candidate qualifies when
    /// its cross-axis offset is under `primary * horizontal_tolerance`.
    pub horizontal_tolerance: f32,
    /// Cross-axis slack for Up/Down movement. More forgiving than the
    /// horizontal tolerance because UI rows are wider than they are tall,
    /// so strict alignment would leave vertical movement stuck.
    pub vertical_tolerance: f32,
    /// Multiplier on the squared cross-axis displacement in the distance
    /// score, so in-line elements beat equally-near offset ones.
    pub cross_axis_penalty: f32,
}

impl Default for NavTuning {
    fn default() -> Self {
        Self {
            horizontal_tolerance: 1.0,
            vertical_tolerance: 1.5,
            cross_axis_penalty: 2.0,
        }
    }
}

/// What the host shell must do in response to a key event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    /// Key not recognized, event already handled, or nothing focusable
    /// exists: leave default handling untouched.
    Ignored,
    /// Nothing was focused: seed focus on the first target in document
    /// order.
    FocusFirst(TargetId),
    /// Trigger the focused element's primary action (synthetic click).
    /// Focus does not move.
    Activate(TargetId),
    /// Move focus to this target and scroll it to the viewport center on
    /// both axes, smoothly.
    MoveFocus(TargetId),
    /// Key consumed, but no candidate lies in the pressed direction; focus
    /// stays where it is.
    Unchanged,
}

impl Decision {
    /// Whether the host should suppress default handling of the key.
    pub fn consumes_key(&self) -> bool {
        !matches!(self, Decision::Ignored)
    }
}

/// The navigator. Stateless between key events; owned by the shell for the
/// lifetime of the input handler so exactly one instance is ever wired in.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    tuning: NavTuning,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tuning(tuning: NavTuning) -> Self {
        Self { tuning }
    }

    pub fn tuning(&self) -> NavTuning {
        self.tuning
    }

    /// Decide what a key press does given the scene at this instant.
    ///
    /// `already_handled` marks events a higher-priority handler consumed
    /// first (e.g. a text input in edit mode); those are left alone.
    pub fn decide(
        &self,
        scene: &dyn FocusScene,
        key: NavKey,
        already_handled: bool,
    ) -> Decision {
        if already_handled {
            return Decision::Ignored;
        }

        let targets = scene.targets();

        // A reported focus id that no longer maps to a live target (element
        // detached since the last event) counts as no focus at all.
        let current = scene
            .current()
            .and_then(|id| targets.iter().find(|t| t.id == id))
            .copied();

        let Some(current) = current else {
            return match targets.first() {
                Some(first) => {
                    trace!(target = first.id.0, "seeding focus");
                    Decision::FocusFirst(first.id)
                }
                None => Decision::Ignored,
            };
        };

        if key == NavKey::Activate {
            return Decision::Activate(current.id);
        }

        let (cx, cy) = current.rect.center();
        let mut best: Option<(TargetId, f32)> = None;

        for t in &targets {
            if t.id == current.id || !t.rect.is_visible() {
                continue;
            }
            let (tx, ty) = t.rect.center();
            let Some(score) = self.score(key, tx - cx, ty - cy) else {
                continue;
            };
            // Strictly-smaller comparison keeps the first minimum in scene
            // order, which is the deterministic tie-break.
            if best.is_none_or(|(_, s)| score < s) {
                best = Some((t.id, score));
            }
        }

        match best {
            Some((id, score)) => {
                trace!(?key, target = id.0, score, "moving focus");
                Decision::MoveFocus(id)
            }
            None => Decision::Unchanged,
        }
    }

    /// Direction predicate and distance score for one candidate.
    ///
    /// `(dx, dy)` is the displacement from the focused element's center to
    /// the candidate's center. Returns `None` when the candidate does not
    /// lie in the pressed direction; predicates are written so that a
    /// malformed displacement (NaN from degenerate geometry) fails them
    /// instead of propagating.
    fn score(&self, key: NavKey, dx: f32, dy: f32) -> Option<f32> {
        let t = &self.tuning;
        let (primary, cross, tolerance) = match key {
            NavKey::Right => (dx, dy, t.horizontal_tolerance),
            NavKey::Left => (-dx, dy, t.horizontal_tolerance),
            NavKey::Down => (dy, dx, t.vertical_tolerance),
            NavKey::Up => (-dy, dx, t.vertical_tolerance),
            NavKey::Activate => return None,
        };

        if !(primary > 0.0) {
            return None;
        }
        if !(cross.abs() < primary * tolerance) {
            return None;
        }

        Some((primary * primary + t.cross_axis_penalty * cross * cross).sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scene backed by plain vectors, mutated by hand between decisions the
    /// way a shell would apply them.
    struct TestScene {
        targets: Vec<FocusTarget>,
        current: Option<TargetId>,
    }

    impl TestScene {
        fn new(targets: Vec<FocusTarget>) -> Self {
            Self {
                targets,
                current: None,
            }
        }

        fn focus(mut self, id: u64) -> Self {
            self.current = Some(TargetId(id));
            self
        }

        fn apply(&mut self, decision: Decision) {
            match decision {
                Decision::FocusFirst(id) | Decision::MoveFocus(id) => {
                    self.current = Some(id);
                }
                Decision::Activate(_) | Decision::Unchanged | Decision::Ignored => {}
            }
        }
    }

    impl FocusScene for TestScene {
        fn targets(&self) -> Vec<FocusTarget> {
            self.targets.clone()
        }

        fn current(&self) -> Option<TargetId> {
            self.current
        }
    }

    /// A 20x20 target whose center sits at (cx, cy).
    fn at(id: u64, cx: f32, cy: f32) -> FocusTarget {
        FocusTarget::new(TargetId(id), Rect::new(cx - 10.0, cy - 10.0, 20.0, 20.0))
    }

    #[test]
    fn already_handled_event_is_left_alone() {
        let scene = TestScene::new(vec![at(1, 100.0, 100.0)]).focus(1);
        let nav = Navigator::new();
        let d = nav.decide(&scene, NavKey::Right, true);
        assert_eq!(d, Decision::Ignored);
        assert!(!d.consumes_key());
    }

    #[test]
    fn no_focus_seeds_first_target_in_document_order() {
        let scene = TestScene::new(vec![
            at(7, 500.0, 500.0),
            at(3, 10.0, 10.0),
        ]);
        let nav = Navigator::new();
        // Document order wins over geometry: id 7 registered first.
        let d = nav.decide(&scene, NavKey::Down, false);
        assert_eq!(d, Decision::FocusFirst(TargetId(7)));
        assert!(d.consumes_key());
    }

    #[test]
    fn no_targets_at_all_is_a_silent_no_op() {
        let scene = TestScene::new(vec![]);
        let nav = Navigator::new();
        let d = nav.decide(&scene, NavKey::Right, false);
        assert_eq!(d, Decision::Ignored);
        assert!(!d.consumes_key());
    }

    #[test]
    fn detached_focus_reseeds_like_no_focus() {
        // Current focus points at an id that is no longer in the scene.
        let scene = TestScene::new(vec![at(1, 100.0, 100.0)]).focus(99);
        let nav = Navigator::new();
        assert_eq!(
            nav.decide(&scene, NavKey::Left, false),
            Decision::FocusFirst(TargetId(1))
        );
    }

    #[test]
    fn lone_focused_element_has_no_candidates() {
        let scene = TestScene::new(vec![at(1, 100.0, 100.0)]).focus(1);
        let nav = Navigator::new();
        let d = nav.decide(&scene, NavKey::Right, false);
        assert_eq!(d, Decision::Unchanged);
        // Key is still consumed even though focus stayed put.
        assert!(d.consumes_key());
    }

    #[test]
    fn right_moves_to_the_single_candidate_on_the_right() {
        let scene = TestScene::new(vec![at(1, 100.0, 100.0), at(2, 300.0, 100.0)]).focus(1);
        let nav = Navigator::new();
        assert_eq!(
            nav.decide(&scene, NavKey::Right, false),
            Decision::MoveFocus(TargetId(2))
        );
    }

    #[test]
    fn directly_in_line_candidate_beats_the_offset_one() {
        let scene = TestScene::new(vec![
            at(1, 100.0, 100.0),
            at(2, 300.0, 100.0),
            at(3, 300.0, 400.0),
        ])
        .focus(1);
        let nav = Navigator::new();
        assert_eq!(
            nav.decide(&scene, NavKey::Right, false),
            Decision::MoveFocus(TargetId(2))
        );
    }

    #[test]
    fn in_line_candidate_wins_even_when_both_qualify() {
        // With a loosened horizontal tolerance both candidates pass the
        // predicate; the distance score still prefers the in-line one.
        let scene = TestScene::new(vec![
            at(1, 100.0, 100.0),
            at(2, 300.0, 100.0),
            at(3, 300.0, 400.0),
        ])
        .focus(1);
        let nav = Navigator::with_tuning(NavTuning {
            horizontal_tolerance: 2.0,
            ..NavTuning::default()
        });
        assert_eq!(
            nav.decide(&scene, NavKey::Right, false),
            Decision::MoveFocus(TargetId(2))
        );
    }

    #[test]
    fn opposite_direction_candidate_is_excluded_regardless_of_distance() {
        let scene = TestScene::new(vec![at(1, 100.0, 100.0), at(2, 50.0, 100.0)]).focus(1);
        let nav = Navigator::new();
        assert_eq!(nav.decide(&scene, NavKey::Right, false), Decision::Unchanged);
    }

    #[test]
    fn activation_fires_on_the_focused_element_without_moving_focus() {
        let mut scene =
            TestScene::new(vec![at(1, 100.0, 100.0), at(2, 300.0, 100.0)]).focus(1);
        let nav = Navigator::new();
        let d = nav.decide(&scene, NavKey::Activate, false);
        assert_eq!(d, Decision::Activate(TargetId(1)));
        scene.apply(d);
        assert_eq!(scene.current(), Some(TargetId(1)));
    }

    #[test]
    fn activation_with_no_focus_seeds_the_first_target() {
        let scene = TestScene::new(vec![at(1, 100.0, 100.0), at(2, 300.0, 100.0)]);
        let nav = Navigator::new();
        assert_eq!(
            nav.decide(&scene, NavKey::Activate, false),
            Decision::FocusFirst(TargetId(1))
        );
    }

    #[test]
    fn zero_sized_candidate_is_invisible_to_navigation() {
        let collapsed = FocusTarget::new(TargetId(2), Rect::new(200.0, 90.0, 0.0, 20.0));
        let scene = TestScene::new(vec![
            at(1, 100.0, 100.0),
            collapsed,
            at(3, 400.0, 100.0),
        ])
        .focus(1);
        let nav = Navigator::new();
        // The collapsed element in between is skipped, not selected.
        assert_eq!(
            nav.decide(&scene, NavKey::Right, false),
            Decision::MoveFocus(TargetId(3))
        );
    }

    #[test]
    fn vertical_tolerance_is_more_forgiving_than_horizontal() {
        // Candidate offset (dx=60, dy=100) from the focused element: passes
        // the vertical predicate (60 < 100 * 1.5) but fails the horizontal
        // one (100 > 60 * 1.0).
        let scene = TestScene::new(vec![at(1, 100.0, 100.0), at(2, 160.0, 200.0)]).focus(1);
        let nav = Navigator::new();
        assert_eq!(
            nav.decide(&scene, NavKey::Down, false),
            Decision::MoveFocus(TargetId(2))
        );
        assert_eq!(nav.decide(&scene, NavKey::Right, false), Decision::Unchanged);
    }

    #[test]
    fn cross_axis_penalty_outweighs_raw_proximity() {
        // Candidate 3 is closer as the crow flies (~213 vs 220) but pays the
        // doubled cross-axis penalty (~255), so the in-line candidate wins.
        let scene = TestScene::new(vec![
            at(1, 100.0, 100.0),
            at(2, 100.0, 320.0),
            at(3, 240.0, 260.0),
        ])
        .focus(1);
        let nav = Navigator::new();
        assert_eq!(
            nav.decide(&scene, NavKey::Down, false),
            Decision::MoveFocus(TargetId(2))
        );
    }

    #[test]
    fn equal_scores_break_toward_the_first_in_scene_order() {
        // Mirrored offsets produce identical scores; the earlier-registered
        // candidate is kept.
        let scene = TestScene::new(vec![
            at(1, 100.0, 100.0),
            at(2, 300.0, 50.0),
            at(3, 300.0, 150.0),
        ])
        .focus(1);
        let nav = Navigator::new();
        assert_eq!(
            nav.decide(&scene, NavKey::Right, false),
            Decision::MoveFocus(TargetId(2))
        );
    }

    #[test]
    fn repeated_presses_are_deterministic_over_a_static_layout() {
        let mut scene = TestScene::new(vec![
            at(1, 100.0, 100.0),
            at(2, 300.0, 100.0),
            at(3, 500.0, 100.0),
        ])
        .focus(1);
        let nav = Navigator::new();

        let first = nav.decide(&scene, NavKey::Right, false);
        assert_eq!(first, Decision::MoveFocus(TargetId(2)));
        scene.apply(first);

        let second = nav.decide(&scene, NavKey::Right, false);
        assert_eq!(second, Decision::MoveFocus(TargetId(3)));
        scene.apply(second);

        // At the right edge further presses are consumed no-ops.
        assert_eq!(nav.decide(&scene, NavKey::Right, false), Decision::Unchanged);
        // And the same sequence from the same start replays identically.
        let mut replay = TestScene::new(vec![
            at(1, 100.0, 100.0),
            at(2, 300.0, 100.0),
            at(3, 500.0, 100.0),
        ])
        .focus(1);
        for expected in [TargetId(2), TargetId(3)] {
            let d = nav.decide(&replay, NavKey::Right, false);
            assert_eq!(d, Decision::MoveFocus(expected));
            replay.apply(d);
        }
    }

    #[test]
    fn layout_change_between_presses_is_picked_up() {
        let mut scene = TestScene::new(vec![at(1, 100.0, 100.0), at(2, 300.0, 100.0)]).focus(1);
        let nav = Navigator::new();
        scene.apply(nav.decide(&scene, NavKey::Right, false));
        assert_eq!(scene.current(), Some(TargetId(2)));

        // The scene shifts under us: a new element appears to the right.
        scene.targets.push(at(3, 500.0, 100.0));
        assert_eq!(
            nav.decide(&scene, NavKey::Right, false),
            Decision::MoveFocus(TargetId(3))
        );
    }

    #[test]
    fn nan_geometry_never_qualifies_or_panics() {
        let broken = FocusTarget::new(
            TargetId(2),
            Rect::new(f32::NAN, 100.0, 20.0, 20.0),
        );
        let scene = TestScene::new(vec![at(1, 100.0, 100.0), broken]).focus(1);
        let nav = Navigator::new();
        assert_eq!(nav.decide(&scene, NavKey::Right, false), Decision::Unchanged);
    }
}
