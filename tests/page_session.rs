use std::time::Duration;

use fieldfx::{
    DEFAULT_CANVAS_ID, DEFAULT_TERMINAL_ID, HostEvent, ManualScheduler, PageDom, PageSession,
    Point, RecordingSurface, SessionConfig, SurfaceSize,
};

type Session = PageSession<ManualScheduler, RecordingSurface>;

fn viewport() -> SurfaceSize {
    SurfaceSize::new(800.0, 600.0).unwrap()
}

fn mount(page: &PageDom) -> Session {
    let cfg = SessionConfig {
        seed: Some(8),
        ..SessionConfig::default()
    };
    PageSession::mount(page, &cfg, ManualScheduler::new(), |p| {
        Ok(RecordingSurface::new(p.viewport))
    })
    .unwrap()
}

fn run_frames(session: &mut Session, start: u64, count: u64) {
    for i in start..start + count {
        let due = session.scheduler_mut().unwrap().take_due();
        assert_eq!(due.len(), 1);
        let now = Duration::from_millis(i * 16);
        let stats = session
            .handle(HostEvent::Frame { id: due[0], now })
            .unwrap()
            .unwrap();
        assert_eq!(stats.particles, 60);
    }
}

#[test]
fn full_page_lifecycle() {
    let page = PageDom::new(viewport())
        .with_element(DEFAULT_CANVAS_ID)
        .with_element(DEFAULT_TERMINAL_ID);
    let mut s = mount(&page);

    run_frames(&mut s, 0, 120);
    // ~1.9 s in: the transcript is still mid-script.
    let early = s.terminal_log().unwrap().len();
    assert!(early > 0 && early < 16);
    s.handle(HostEvent::PointerMove(Point::new(400.0, 300.0)))
        .unwrap();
    run_frames(&mut s, 120, 120);
    assert_eq!(s.field().unwrap().pointer(), Some(Point::new(400.0, 300.0)));

    let small = SurfaceSize::new(400.0, 300.0).unwrap();
    s.handle(HostEvent::Resize(small)).unwrap();
    s.handle(HostEvent::PointerLeave).unwrap();
    run_frames(&mut s, 240, 2000);

    let log_len = s.terminal_log().unwrap().len();
    assert_eq!(log_len, 16);
    assert_eq!(s.transcript_finished(), Some(true));

    s.handle(HostEvent::Teardown).unwrap();
    assert_eq!(s.animation().unwrap().pending(), None);
    assert!(s.animation().unwrap().is_stopped());

    let frames = s.field().unwrap().frames();
    s.handle(HostEvent::Clock {
        now: Duration::from_secs(600),
    })
    .unwrap();
    assert_eq!(s.field().unwrap().frames(), frames);
    assert_eq!(s.terminal_log().unwrap().len(), log_len);
}

#[test]
fn stale_frame_ids_are_ignored() {
    let mut s = mount(&PageDom::new(viewport()).with_element(DEFAULT_CANVAS_ID));
    let first = s.scheduler_mut().unwrap().take_due()[0];
    assert!(
        s.handle(HostEvent::Frame {
            id: first,
            now: Duration::ZERO
        })
        .unwrap()
        .is_some()
    );
    assert!(
        s.handle(HostEvent::Frame {
            id: first,
            now: Duration::ZERO
        })
        .unwrap()
        .is_none()
    );
}

#[test]
fn page_without_any_effect_elements_is_inert() {
    let mut s = mount(&PageDom::new(viewport()));
    assert!(s.field().is_none());
    assert!(s.terminal_log().is_none());
    assert!(s.scheduler_mut().is_none());
    assert_eq!(s.handle(HostEvent::Visibility(false)).unwrap(), None);
}
