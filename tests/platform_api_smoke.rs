use std::sync::Arc;

use stagehand::placement::{Marker, Position};
use stagehand::platform::{
    DeviceClass, DeviceMetrics, Dom, Haptics, InMemoryDom, InMemoryMedia, MediaHooks, MediaState,
    NoopHaptics, RecordingHaptics,
};

#[test]
fn platform_surfaces_smoke() {
    // dom
    let dom = InMemoryDom::with_elements(&["stage", "holder"]);
    dom.add_class("stage", "hidden");
    assert!(dom.has_class("stage", "hidden"));
    dom.set_text("stage", "hello");
    assert_eq!(dom.text("stage").unwrap(), "hello");
    dom.append_candle(
        "holder",
        &Marker {
            position: Position { left: 50.0, top: 30.0 },
            label: "smoke".into(),
        },
    );
    assert_eq!(dom.candles().len(), 1);

    // media
    let media = InMemoryMedia::new();
    media.set_muted(false);
    assert!(!media.is_muted());
    media.play().unwrap();
    assert_eq!(media.state(), MediaState::Playing);

    // device
    let metrics = DeviceMetrics { width: 360, height: 640 };
    assert_eq!(metrics.class(), DeviceClass::Narrow);

    // haptics: noop accepts, recording records
    NoopHaptics::new().pulse(50);
    let haptics = RecordingHaptics::new();
    haptics.pulse(50);
    assert_eq!(haptics.pulses(), vec![50]);

    // trait objects work across the surfaces
    let dom: Arc<dyn Dom> = Arc::new(InMemoryDom::new());
    assert!(!dom.has_element("anything"));
    let media: Arc<dyn MediaHooks> = Arc::new(InMemoryMedia::new());
    assert!(media.is_ready());
}
