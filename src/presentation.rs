//! The scripted presentation flow.
//!
//! Wires the scene graph, countdown, media orchestrator, and placement
//! engine into the fixed seven-scene sequence and routes clicks, the Enter
//! key, and resize events to them.

use std::sync::{Arc, Mutex};

use crate::countdown::Countdown;
use crate::media_sync::{MediaOrchestrator, MediaSyncTimings};
use crate::placement::{LayoutProfile, Marker, PlacementEngine};
use crate::platform::{DeviceMetrics, Dom, Haptics, MediaHooks, Orientation};
use crate::scene::SceneGraph;
use crate::timer::{TimerId, TimerService};
use crate::{PresentationConfig, Result};

/// Scene identifiers, in presentation order.
pub mod scenes {
    pub const WELCOME: &str = "page-welcome";
    pub const COUNTDOWN: &str = "page-countdown";
    pub const FIREWORKS: &str = "page-fireworks";
    pub const QUESTION: &str = "page-question";
    pub const GALLERY: &str = "page-gallery";
    pub const CAKE: &str = "page-cake";
    pub const FINAL: &str = "page-final";

    pub const SEQUENCE: [&str; 7] = [
        WELCOME, COUNTDOWN, FIREWORKS, QUESTION, GALLERY, CAKE, FINAL,
    ];
}

/// Non-scene element identifiers the flow depends on.
pub mod elements {
    pub const BODY: &str = "body";
    pub const COUNTDOWN_DISPLAY: &str = "countdown-display";
    pub const OVERLAY_TEXT: &str = "happy-new-year";
    pub const GOAL_INPUT: &str = "goal-input";
    pub const CANDLES_CONTAINER: &str = "candles-container";

    pub const BTN_COUNTDOWN_CONTINUE: &str = "btn-countdown-continue";
    pub const BTN_SHOW_MEMORIES: &str = "btn-show-memories";
    pub const BTN_NEXT_CAKE: &str = "btn-next-cake";
    pub const ADD_GOAL_BTN: &str = "add-goal-btn";
    pub const BTN_FINISH_GOALS: &str = "btn-finish-goals";
}

struct LayoutState {
    metrics: DeviceMetrics,
    profile: LayoutProfile,
}

/// A fully wired presentation instance.
pub struct Presentation {
    config: PresentationConfig,
    dom: Arc<dyn Dom>,
    timers: TimerService,
    graph: Arc<SceneGraph>,
    countdown: Arc<Countdown>,
    fireworks: Arc<MediaOrchestrator>,
    music: Option<Arc<dyn MediaHooks>>,
    haptics: Arc<dyn Haptics>,
    placement: Mutex<PlacementEngine>,
    markers: Mutex<Vec<Marker>>,
    layout: Arc<Mutex<LayoutState>>,
    resize_timer: Mutex<Option<TimerId>>,
}

impl Presentation {
    /// Assemble the flow against the given platform collaborators.
    ///
    /// Fails if a scene element or any element the script depends on is
    /// missing; after construction no failure is ever surfaced again.
    pub fn new(
        config: PresentationConfig,
        dom: Arc<dyn Dom>,
        timers: TimerService,
        fireworks_media: Arc<dyn MediaHooks>,
        music: Option<Arc<dyn MediaHooks>>,
        haptics: Arc<dyn Haptics>,
    ) -> Result<Self> {
        for id in [
            elements::BODY,
            elements::COUNTDOWN_DISPLAY,
            elements::OVERLAY_TEXT,
            elements::GOAL_INPUT,
            elements::CANDLES_CONTAINER,
        ] {
            if !dom.has_element(id) {
                return Err(crate::Error::MissingElement(id.to_string()));
            }
        }

        let graph = Arc::new(SceneGraph::new(
            dom.clone(),
            timers.clone(),
            &scenes::SEQUENCE,
            scenes::WELCOME,
            config.fade_in_delay_ms,
            config.fade_duration_ms,
        )?);

        let fireworks = Arc::new(MediaOrchestrator::new(
            fireworks_media,
            dom.clone(),
            timers.clone(),
            elements::OVERLAY_TEXT,
            MediaSyncTimings {
                overlay_delay_ms: config.overlay_delay_ms,
                play_failure_delay_ms: config.play_failure_delay_ms,
                playback_ceiling_ms: config.playback_ceiling_ms,
            },
            {
                let graph = graph.clone();
                move || {
                    graph.transition(scenes::QUESTION);
                }
            },
        ));

        let countdown = Arc::new(Countdown::new(
            dom.clone(),
            timers.clone(),
            elements::COUNTDOWN_DISPLAY,
            config.countdown_target_ms,
            config.countdown_tick_ms,
            {
                let graph = graph.clone();
                let fireworks = fireworks.clone();
                move || {
                    if let Some(token) = graph.transition(scenes::FIREWORKS) {
                        fireworks.activate(token);
                    }
                }
            },
        ));

        let metrics = config.viewport;
        let layout = Arc::new(Mutex::new(LayoutState {
            metrics,
            profile: LayoutProfile::for_class(metrics.class()),
        }));
        Self::apply_orientation(dom.as_ref(), metrics);

        Ok(Presentation {
            config,
            dom,
            timers,
            graph,
            countdown,
            fireworks,
            music,
            haptics,
            placement: Mutex::new(PlacementEngine::new()),
            markers: Mutex::new(Vec::new()),
            layout,
            resize_timer: Mutex::new(None),
        })
    }

    /// Swap in a seeded placement engine (deterministic scatter for tests).
    pub fn set_placement_engine(&self, engine: PlacementEngine) {
        *self.placement.lock().unwrap() = engine;
    }

    pub fn active_scene(&self) -> String {
        self.graph.active()
    }

    pub fn timers(&self) -> &TimerService {
        &self.timers
    }

    /// Markers added this session, in insertion order.
    pub fn markers(&self) -> Vec<Marker> {
        self.markers.lock().unwrap().clone()
    }

    /// Route a click on `element_id` to the scripted flow.
    pub fn handle_click(&self, element_id: &str) {
        match element_id {
            scenes::WELCOME => {
                if !self.graph.is_active(scenes::WELCOME) {
                    return;
                }
                self.start_background_music();
                if let Some(token) = self.graph.transition(scenes::COUNTDOWN) {
                    self.countdown.start(token);
                }
            }
            elements::BTN_COUNTDOWN_CONTINUE => {
                // Skip waiting for the countdown
                if let Some(token) = self.graph.transition(scenes::FIREWORKS) {
                    self.fireworks.activate(token);
                }
            }
            elements::BTN_SHOW_MEMORIES => {
                self.graph.transition(scenes::GALLERY);
            }
            elements::BTN_NEXT_CAKE => {
                self.graph.transition(scenes::CAKE);
            }
            elements::ADD_GOAL_BTN => self.add_candle(),
            elements::BTN_FINISH_GOALS => {
                self.graph.transition(scenes::FINAL);
            }
            other => log::debug!("click on {other} has no scripted action"),
        }
    }

    /// Route a key press; Enter submits a goal while the cake scene is up.
    pub fn handle_key(&self, key: &str) {
        if key == "Enter" && self.graph.is_active(scenes::CAKE) {
            self.add_candle();
        }
    }

    /// Viewport change, debounced through the timer service.
    pub fn handle_resize(&self, width: u32, height: u32) {
        let mut pending = self.resize_timer.lock().unwrap();
        if let Some(id) = pending.take() {
            self.timers.cancel(id);
        }
        let dom = self.dom.clone();
        let layout = self.layout.clone();
        let id = self.timers.set_timeout(self.config.resize_debounce_ms, move || {
            let metrics = DeviceMetrics { width, height };
            {
                let mut state = layout.lock().unwrap();
                state.metrics = metrics;
                state.profile = LayoutProfile::for_class(metrics.class());
            }
            Self::apply_orientation(dom.as_ref(), metrics);
        });
        *pending = Some(id);
    }

    /// Submit the current goal input as a new candle on the cake.
    pub fn add_candle(&self) {
        let label = self.dom.input_value(elements::GOAL_INPUT).trim().to_string();
        if label.is_empty() {
            return;
        }

        let profile = self.layout.lock().unwrap().profile;
        let position = self.placement.lock().unwrap().place(&profile);
        let marker = Marker { position, label };

        self.dom.append_candle(elements::CANDLES_CONTAINER, &marker);
        self.markers.lock().unwrap().push(marker);
        self.dom.set_input_value(elements::GOAL_INPUT, "");
        self.haptics.pulse(self.config.haptic_pulse_ms);
    }

    fn start_background_music(&self) {
        if let Some(music) = &self.music {
            if music.state() != crate::platform::MediaState::Paused {
                return;
            }
            music.set_volume(0.5);
            if let Err(reason) = music.play() {
                log::debug!("background music refused ({reason}); continuing without it");
            }
        }
    }

    fn apply_orientation(dom: &dyn Dom, metrics: DeviceMetrics) {
        match metrics.orientation() {
            Orientation::Portrait => {
                dom.add_class(elements::BODY, "portrait");
                dom.remove_class(elements::BODY, "landscape");
            }
            Orientation::Landscape => {
                dom.add_class(elements::BODY, "landscape");
                dom.remove_class(elements::BODY, "portrait");
            }
        }
    }
}
