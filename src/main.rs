use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use stagehand::platform::{Dom, InMemoryDom, InMemoryMedia, NoopHaptics};
use stagehand::presentation::{elements, scenes, Presentation};
use stagehand::timer::TimerService;
use stagehand::PresentationConfig;

/// Run the scripted presentation headlessly on virtual time and print each
/// scene change.
#[derive(Parser, Debug)]
#[command(name = "stagehand", version, about)]
struct Args {
    /// Seconds until the countdown expires (overrides the configured target)
    #[arg(long, default_value_t = 5)]
    countdown_secs: u64,

    /// Optional JSON config file; missing fields fall back to defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Simulate a refused video play attempt (exercises the fallback path)
    #[arg(long)]
    refuse_playback: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config: PresentationConfig = match &args.config {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => PresentationConfig::default(),
    };
    config.countdown_target_ms = args.countdown_secs * 1_000;

    let mut ids: Vec<&str> = scenes::SEQUENCE.to_vec();
    ids.extend([
        elements::BODY,
        elements::COUNTDOWN_DISPLAY,
        elements::OVERLAY_TEXT,
        elements::GOAL_INPUT,
        elements::CANDLES_CONTAINER,
    ]);
    let dom = Arc::new(InMemoryDom::with_elements(&ids));

    let video = Arc::new(InMemoryMedia::new());
    if args.refuse_playback {
        video.refuse_playback("NotAllowedError: play() requires a user gesture");
    }

    let timers = TimerService::new();
    let show = Presentation::new(
        config,
        dom.clone(),
        timers.clone(),
        video,
        None,
        Arc::new(NoopHaptics::new()),
    )?;

    let mut last = show.active_scene();
    println!("scene: {last}");

    show.handle_click(scenes::WELCOME);

    // Drive the loop until every scheduled callback has run
    while let Some(deadline) = timers.next_deadline() {
        timers.advance_to(deadline);
        let active = show.active_scene();
        if active != last {
            println!("scene: {active} (t={}ms)", timers.now_ms());
            last = active.clone();
        }
        if let Some(text) = dom.text(elements::COUNTDOWN_DISPLAY) {
            if active == scenes::COUNTDOWN && !text.is_empty() {
                println!("  countdown: {text}");
            }
        }
    }

    // Walk the interactive tail of the script
    show.handle_click(elements::BTN_SHOW_MEMORIES);
    show.handle_click(elements::BTN_NEXT_CAKE);
    dom.set_input_value(elements::GOAL_INPUT, "ship something great");
    show.add_candle();
    for marker in show.markers() {
        println!(
            "candle \"{}\" at ({:.0}%, {:.0}%)",
            marker.label, marker.position.left, marker.position.top
        );
    }
    show.handle_click(elements::BTN_FINISH_GOALS);
    timers.advance(2_000);
    println!("scene: {}", show.active_scene());

    Ok(())
}
