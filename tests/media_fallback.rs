//! Degraded-path behavior: refused playback, deferred readiness, and the
//! exactly-once transition guarantee

use std::sync::Arc;

use stagehand::platform::{
    Dom, InMemoryDom, InMemoryMedia, MediaHooks, MediaState, NoopHaptics,
};
use stagehand::presentation::{elements, scenes, Presentation};
use stagehand::timer::TimerService;
use stagehand::PresentationConfig;

fn build(video: Arc<InMemoryMedia>) -> (Presentation, Arc<InMemoryDom>, TimerService) {
    let mut ids: Vec<&str> = scenes::SEQUENCE.to_vec();
    ids.extend([
        elements::BODY,
        elements::COUNTDOWN_DISPLAY,
        elements::OVERLAY_TEXT,
        elements::GOAL_INPUT,
        elements::CANDLES_CONTAINER,
    ]);
    let dom = Arc::new(InMemoryDom::with_elements(&ids));
    dom.add_class(elements::OVERLAY_TEXT, "hidden");
    let timers = TimerService::new();
    let config = PresentationConfig {
        countdown_target_ms: 1_000,
        ..Default::default()
    };
    let show = Presentation::new(
        config,
        dom.clone(),
        timers.clone(),
        video,
        None,
        Arc::new(NoopHaptics::new()),
    )
    .unwrap();
    (show, dom, timers)
}

#[test]
fn refused_playback_still_reaches_the_next_scene() {
    let video = Arc::new(InMemoryMedia::new());
    video.refuse_playback("NotAllowedError");
    let (show, dom, timers) = build(video.clone());

    show.handle_click(scenes::WELCOME);
    timers.advance(1_000);
    assert_eq!(show.active_scene(), scenes::FIREWORKS);
    assert_eq!(video.state(), MediaState::Paused);

    // Failure path reveals the overlay immediately
    assert!(!dom.has_class(elements::OVERLAY_TEXT, "hidden"));

    // ...and moves on after the fallback delay
    timers.advance(3_000);
    assert_eq!(show.active_scene(), scenes::QUESTION);
}

#[test]
fn transition_fires_once_even_with_every_path_eligible() {
    let video = Arc::new(InMemoryMedia::new());
    video.refuse_playback("NotAllowedError");
    let (show, _dom, timers) = build(video.clone());

    show.handle_click(scenes::WELCOME);
    timers.advance(1_000);
    assert_eq!(show.active_scene(), scenes::FIREWORKS);

    // Fallback delay, natural end, and ceiling could all request the move
    timers.advance(3_000);
    assert_eq!(show.active_scene(), scenes::QUESTION);
    video.fire_ended();
    timers.advance(30_000);
    // One transition happened; the pointer was not bounced back and forth
    assert_eq!(show.active_scene(), scenes::QUESTION);
}

#[test]
fn play_attempt_defers_until_the_media_is_ready() {
    let video = Arc::new(InMemoryMedia::new());
    video.set_ready(false);
    let (show, _dom, timers) = build(video.clone());

    show.handle_click(scenes::WELCOME);
    timers.advance(1_000);
    assert_eq!(show.active_scene(), scenes::FIREWORKS);
    assert_eq!(video.state(), MediaState::Paused);

    video.fire_can_play();
    assert_eq!(video.state(), MediaState::Playing);

    video.fire_ended();
    assert_eq!(show.active_scene(), scenes::QUESTION);
}

#[test]
fn late_end_signal_after_moving_on_is_ignored() {
    let video = Arc::new(InMemoryMedia::new());
    let (show, _dom, timers) = build(video.clone());

    show.handle_click(scenes::WELCOME);
    timers.advance(1_000);
    timers.advance(15_000); // ceiling moves the show along
    assert_eq!(show.active_scene(), scenes::QUESTION);

    show.handle_click(elements::BTN_SHOW_MEMORIES);
    assert_eq!(show.active_scene(), scenes::GALLERY);

    // A stale end signal from the fireworks video must not drag the show
    // back
    video.fire_ended();
    assert_eq!(show.active_scene(), scenes::GALLERY);
}
