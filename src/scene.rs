//! Scene graph and transition controller.
//!
//! Exactly one scene is active at a time. A transition fades the old scene
//! out, fades the target in after a short layout-settling delay, and drops
//! the old scene from layout once the fade duration elapses. The active
//! pointer itself moves synchronously: logic gated on "what is active" must
//! treat the transition as instantaneous even though the visual effect is
//! not.
//!
//! Components started on activation receive an [`ActivationToken`]; every
//! transition rotates the token epoch, revoking all previously issued
//! tokens. A component checks its token on each tick and stands down when
//! revoked. That is the only cancellation mechanism; nothing is pushed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::platform::Dom;
use crate::timer::TimerService;

/// Class vocabulary used to express visibility. The host stylesheet gives
/// `opacity-*` a ~1s transition; `hidden` removes the element from layout.
const CLASS_HIDDEN: &str = "hidden";
const CLASS_OPAQUE: &str = "opacity-100";
const CLASS_TRANSPARENT: &str = "opacity-0";
const CLASS_INTERACTIVE: &str = "pointer-events-auto";
const CLASS_INERT: &str = "pointer-events-none";

/// Epoch-stamped activation handle. Live until the controller performs the
/// next transition.
#[derive(Clone)]
pub struct ActivationToken {
    epoch: Arc<AtomicU64>,
    issued: u64,
}

impl ActivationToken {
    pub fn is_live(&self) -> bool {
        self.epoch.load(Ordering::SeqCst) == self.issued
    }
}

struct GraphState {
    scenes: Vec<String>,
    active: String,
}

/// Holds the registered scene set and the single active-scene pointer.
pub struct SceneGraph {
    dom: Arc<dyn Dom>,
    timers: TimerService,
    fade_in_delay_ms: u64,
    fade_duration_ms: u64,
    epoch: Arc<AtomicU64>,
    state: Mutex<GraphState>,
}

impl SceneGraph {
    /// `initial` must be one of `scenes`; its element is assumed visible.
    pub fn new(
        dom: Arc<dyn Dom>,
        timers: TimerService,
        scenes: &[&str],
        initial: &str,
        fade_in_delay_ms: u64,
        fade_duration_ms: u64,
    ) -> crate::Result<Self> {
        if scenes.is_empty() {
            return Err(crate::Error::SceneSetError("no scenes registered".into()));
        }
        if !scenes.contains(&initial) {
            return Err(crate::Error::SceneSetError(format!(
                "initial scene {initial} is not registered"
            )));
        }
        for id in scenes {
            if !dom.has_element(id) {
                return Err(crate::Error::MissingElement((*id).to_string()));
            }
        }
        Ok(SceneGraph {
            dom,
            timers,
            fade_in_delay_ms,
            fade_duration_ms,
            epoch: Arc::new(AtomicU64::new(1)),
            state: Mutex::new(GraphState {
                scenes: scenes.iter().map(|s| s.to_string()).collect(),
                active: initial.to_string(),
            }),
        })
    }

    /// The scene currently considered active.
    pub fn active(&self) -> String {
        self.state.lock().unwrap().active.clone()
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.state.lock().unwrap().active == id
    }

    /// Token for the current epoch, e.g. for components started on the
    /// initial scene before any transition has happened.
    pub fn current_token(&self) -> ActivationToken {
        ActivationToken {
            epoch: self.epoch.clone(),
            issued: self.epoch.load(Ordering::SeqCst),
        }
    }

    /// Crossfade from the active scene to `target`.
    ///
    /// Unresolved ids (unknown scene, missing element, target already
    /// active) make the call a silent no-op returning `None`. On success the
    /// active pointer and token epoch move synchronously and the token for
    /// the new activation is returned.
    ///
    /// There is no queueing: a transition requested mid-fade restarts
    /// against whatever is active at call time, and the two visual fades may
    /// overlap. The superseded activation's tokens are revoked immediately,
    /// so only visuals overlap, never logic.
    pub fn transition(&self, target: &str) -> Option<ActivationToken> {
        let current = {
            let mut state = self.state.lock().unwrap();
            if !state.scenes.iter().any(|s| s == target) {
                log::debug!("transition to unknown scene {target}; ignoring");
                return None;
            }
            if state.active == target {
                log::debug!("transition to already-active scene {target}; ignoring");
                return None;
            }
            if !self.dom.has_element(target) || !self.dom.has_element(&state.active) {
                log::debug!("transition {} -> {target}: element missing; ignoring", state.active);
                return None;
            }
            let current = state.active.clone();
            // Pointer moves synchronously, before any visual effect lands
            state.active = target.to_string();
            current
        };

        // Old scene: fade out, immediately inert
        self.dom.remove_class(&current, CLASS_OPAQUE);
        self.dom.remove_class(&current, CLASS_INTERACTIVE);
        self.dom.add_class(&current, CLASS_TRANSPARENT);
        self.dom.add_class(&current, CLASS_INERT);

        // Target enters layout now; opacity animates only after the
        // settling delay
        self.dom.remove_class(target, CLASS_HIDDEN);

        let dom = self.dom.clone();
        let fading_in = target.to_string();
        self.timers.set_timeout(self.fade_in_delay_ms, move || {
            dom.remove_class(&fading_in, CLASS_TRANSPARENT);
            dom.remove_class(&fading_in, CLASS_INERT);
            dom.add_class(&fading_in, CLASS_OPAQUE);
            dom.add_class(&fading_in, CLASS_INTERACTIVE);
        });

        let dom = self.dom.clone();
        let fading_out = current;
        self.timers.set_timeout(self.fade_duration_ms, move || {
            dom.add_class(&fading_out, CLASS_HIDDEN);
        });

        let issued = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        Some(ActivationToken {
            epoch: self.epoch.clone(),
            issued,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::InMemoryDom;

    fn graph() -> (Arc<InMemoryDom>, TimerService, SceneGraph) {
        let dom = Arc::new(InMemoryDom::with_elements(&["a", "b", "c"]));
        let timers = TimerService::new();
        let graph = SceneGraph::new(dom.clone(), timers.clone(), &["a", "b", "c"], "a", 50, 1000)
            .unwrap();
        (dom, timers, graph)
    }

    #[test]
    fn pointer_moves_synchronously() {
        let (_dom, _timers, graph) = graph();
        assert_eq!(graph.active(), "a");
        let token = graph.transition("b");
        assert!(token.is_some());
        // No timer has run yet; pointer is already updated
        assert_eq!(graph.active(), "b");
    }

    #[test]
    fn unknown_target_is_a_noop() {
        let (_dom, _timers, graph) = graph();
        assert!(graph.transition("nope").is_none());
        assert_eq!(graph.active(), "a");
    }

    #[test]
    fn crossfade_classes_follow_the_schedule() {
        let (dom, timers, graph) = graph();
        dom.add_class("a", "opacity-100");
        dom.add_class("b", "hidden");
        dom.add_class("b", "opacity-0");

        graph.transition("b");

        // Synchronous turn: old fading out and inert, new in layout but
        // still transparent
        assert!(dom.has_class("a", "opacity-0"));
        assert!(dom.has_class("a", "pointer-events-none"));
        assert!(!dom.has_class("b", "hidden"));
        assert!(dom.has_class("b", "opacity-0"));

        timers.advance(50);
        assert!(dom.has_class("b", "opacity-100"));
        assert!(dom.has_class("b", "pointer-events-auto"));
        assert!(!dom.has_class("a", "hidden"));

        timers.advance(950);
        assert!(dom.has_class("a", "hidden"));
    }

    #[test]
    fn transition_rotates_tokens() {
        let (_dom, _timers, graph) = graph();
        let first = graph.transition("b").unwrap();
        assert!(first.is_live());
        let second = graph.transition("c").unwrap();
        assert!(!first.is_live());
        assert!(second.is_live());
    }

    #[test]
    fn initial_token_is_revoked_by_first_transition() {
        let (_dom, _timers, graph) = graph();
        let initial = graph.current_token();
        assert!(initial.is_live());
        graph.transition("b");
        assert!(!initial.is_live());
    }

    #[test]
    fn same_scene_transition_is_ignored() {
        let (dom, _timers, graph) = graph();
        assert!(graph.transition("a").is_none());
        assert!(!dom.has_class("a", "opacity-0"));
    }

    #[test]
    fn construction_rejects_unknown_initial_scene() {
        let dom = Arc::new(InMemoryDom::with_elements(&["a"]));
        let timers = TimerService::new();
        let res = SceneGraph::new(dom, timers, &["a"], "zzz", 50, 1000);
        assert!(res.is_err());
    }

    #[test]
    fn construction_rejects_missing_scene_element() {
        let dom = Arc::new(InMemoryDom::with_elements(&["a"]));
        let timers = TimerService::new();
        let res = SceneGraph::new(dom, timers, &["a", "b"], "a", 50, 1000);
        assert!(matches!(res, Err(crate::Error::MissingElement(_))));
    }
}
