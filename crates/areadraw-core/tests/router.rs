//! End-to-end behaviour of the interaction router over a memory surface.

use areadraw_core::{
    EventKind, InteractionRouter, MemorySurface, Mode, PathData, PointLimit, PointerEvent,
    RouterConfig, ShapeError, Signal,
};
use image::RgbaImage;
use kurbo::{Point, Size};
use std::cell::RefCell;
use std::rc::Rc;

const EPS: f64 = 1e-9;

fn router() -> (Rc<MemorySurface>, InteractionRouter) {
    router_with(RouterConfig::default())
}

fn router_with(config: RouterConfig) -> (Rc<MemorySurface>, InteractionRouter) {
    let surface = Rc::new(MemorySurface::new());
    let mut router = InteractionRouter::new(surface.clone(), config);
    router.resize(Size::new(400.0, 300.0));
    (surface, router)
}

fn square(name: &str, x: f64, y: f64, side: f64) -> PathData {
    PathData::new(
        name,
        &[
            Point::new(x, y),
            Point::new(x + side, y),
            Point::new(x + side, y + side),
            Point::new(x, y + side),
        ],
    )
}

fn record<T: Clone + 'static>(signal: &Signal<T>) -> Rc<RefCell<Vec<T>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let l = log.clone();
    let _ = signal.subscribe(move |value: &T| l.borrow_mut().push(value.clone()));
    log
}

fn assert_single_active(router: &InteractionRouter) {
    let active: Vec<usize> = router
        .paths()
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_active())
        .map(|(i, _)| i)
        .collect();
    assert!(active.len() <= 1, "several active paths: {active:?}");
    assert_eq!(active.first().copied(), router.active_position());
}

#[test]
fn boundaries_of_added_path() {
    let (_, mut router) = router();
    router
        .add_path(
            PathData::new(
                "generic",
                &[
                    Point::new(0.0, 0.0),
                    Point::new(0.5, 0.0),
                    Point::new(0.5, 0.5),
                    Point::new(0.0, 0.5),
                ],
            ),
            false,
        )
        .unwrap();

    let b = router.paths()[0].get_boundaries();
    assert!(b.min_x.abs() < EPS);
    assert!(b.min_y.abs() < EPS);
    assert!((b.max_x - 200.0).abs() < EPS);
    assert!((b.max_y - 150.0).abs() < EPS);
}

#[test]
fn drawing_completes_once_with_two_points() {
    let (_, mut router) = router();
    router.set_termination_rule(Rc::new(PointLimit(2)));
    let added = record(&router.events().path_added);

    assert!(router.start_drawing());
    assert_eq!(router.mode(), Mode::Drawing);
    let completions = record(router.pencil().unwrap().completed());

    router.handle_pointer_event(PointerEvent::moved(10.0, 10.0));
    router.handle_pointer_event(PointerEvent::up(10.0, 10.0));
    for x in [20.0, 30.0, 40.0] {
        router.handle_pointer_event(PointerEvent::moved(x, 10.0));
    }
    router.handle_pointer_event(PointerEvent::moved(50.0, 10.0));
    router.handle_pointer_event(PointerEvent::up(50.0, 10.0));

    assert_eq!(completions.borrow().len(), 1);
    assert_eq!(added.borrow().len(), 1);
    assert_eq!(router.mode(), Mode::Idle);
    assert_eq!(router.paths().len(), 1);
    assert_eq!(router.paths()[0].points().len(), 2);
    assert_eq!(router.active_position(), Some(0));
    assert_eq!(router.move_listener_count(), 0);

    // The pencil is idle again and a new session can start.
    assert!(router.start_drawing());
}

#[test]
fn drawing_closes_near_first_point() {
    let (surface, mut router) = router();
    router.start_drawing();
    assert_eq!(surface.style(router.top_layer(), "cursor").as_deref(), Some("copy"));

    for (x, y) in [(100.0, 100.0), (200.0, 100.0), (200.0, 200.0), (104.0, 103.0)] {
        router.handle_pointer_event(PointerEvent::down(x, y));
        router.handle_pointer_event(PointerEvent::moved(x, y));
        router.handle_pointer_event(PointerEvent::up(x, y));
    }

    assert_eq!(router.paths().len(), 1);
    assert_eq!(router.paths()[0].name(), "generic");
    assert_eq!(router.paths()[0].points().len(), 3);
    assert!(!router.is_drawing());
}

#[test]
fn start_drawing_guarded() {
    let (_, mut router) = router();
    assert!(router.start_drawing());
    assert!(!router.start_drawing());

    let (_, mut loading) = router_with(RouterConfig::default());
    loading.set_image_url(Some("photo.png".into()));
    assert!(!loading.start_drawing());
    loading.on_image_loaded(RgbaImage::new(8, 6), Size::new(400.0, 300.0));
    assert!(loading.start_drawing());
}

#[test]
fn leaving_mid_draw_keeps_session() {
    let (_, mut router) = router();
    router.set_termination_rule(Rc::new(PointLimit(2)));
    router.start_drawing();
    router.handle_pointer_event(PointerEvent::up(10.0, 10.0));
    router.handle_pointer_event(PointerEvent::Leave);
    assert!(router.is_drawing());
    assert_eq!(router.move_listener_count(), 1);
    router.handle_pointer_event(PointerEvent::up(60.0, 10.0));
    assert_eq!(router.paths().len(), 1);
}

#[test]
fn image_load_ends_drawing_session() {
    let (_, mut router) = router();
    router.set_termination_rule(Rc::new(PointLimit(2)));
    router.start_drawing();
    router.handle_pointer_event(PointerEvent::up(10.0, 10.0));

    router.on_image_loaded(RgbaImage::new(40, 30), Size::new(400.0, 300.0));
    assert_eq!(router.mode(), Mode::Idle);
    assert_eq!(router.move_listener_count(), 0);

    assert!(router.start_drawing());
    for x in [10.0, 50.0] {
        router.handle_pointer_event(PointerEvent::up(x, 10.0));
    }
    assert_eq!(router.mode(), Mode::Idle);
    assert_eq!(router.paths().len(), 1);
}

#[test]
fn image_url_change_ends_drawing_session() {
    let (_, mut router) = router();
    router.start_drawing();
    router.handle_pointer_event(PointerEvent::up(10.0, 10.0));

    router.set_image_url(Some("next.png".into()));
    assert!(!router.is_drawing());
    assert_eq!(router.move_listener_count(), 0);

    router.on_image_loaded(RgbaImage::new(40, 30), Size::new(400.0, 300.0));
    assert!(router.start_drawing());
}

#[test]
fn reset_paths_mid_draw_keeps_pencil_tracking() {
    let (_, mut router) = router();
    router.set_termination_rule(Rc::new(PointLimit(2)));
    router.add_path(square("generic", 0.6, 0.6, 0.1), false).unwrap();
    router.start_drawing();
    router.handle_pointer_event(PointerEvent::up(10.0, 10.0));

    router.reset_paths();
    assert_eq!(router.mode(), Mode::Drawing);
    assert_eq!(router.move_listener_count(), 1);
    assert!(router.handle_pointer_event(PointerEvent::moved(100.0, 100.0)));

    router.handle_pointer_event(PointerEvent::up(100.0, 100.0));
    assert_eq!(router.mode(), Mode::Idle);
    assert_eq!(router.paths().len(), 1);
    assert_eq!(router.subscription_count(), 1);
}

#[test]
fn delete_path_mid_draw_keeps_pencil_tracking() {
    let (_, mut router) = router();
    router.set_termination_rule(Rc::new(PointLimit(2)));
    router.add_path(square("generic", 0.1, 0.1, 0.1), false).unwrap();
    router.add_path(square("generic", 0.6, 0.6, 0.1), false).unwrap();
    router.start_drawing();
    router.handle_pointer_event(PointerEvent::up(10.0, 10.0));

    router.activate(Some(0));
    assert_eq!(router.delete_path(), Some(0));
    assert_eq!(router.mode(), Mode::Drawing);
    assert_eq!(router.move_listener_count(), 1);
    assert!(router.handle_pointer_event(PointerEvent::moved(200.0, 10.0)));

    router.handle_pointer_event(PointerEvent::up(200.0, 10.0));
    assert_eq!(router.mode(), Mode::Idle);
    assert_eq!(router.paths().len(), 2);
    assert_eq!(router.active_position(), Some(1));
    assert_single_active(&router);
}

#[test]
fn delete_handle_removes_active_path() {
    let (_, mut router) = router();
    router.add_path(square("generic", 0.6, 0.6, 0.1), false).unwrap();
    router.add_path(square("generic", 0.25, 0.25, 0.25), true).unwrap();
    let deleted = record(&router.events().path_deleted);

    // Outline spans (100, 75)-(200, 150); the delete handle sits at (88, 63).
    router.handle_pointer_event(PointerEvent::down(88.0, 63.0));
    assert_eq!(router.active_position(), Some(1));
    router.handle_pointer_event(PointerEvent::up(88.0, 63.0));

    assert_eq!(*deleted.borrow(), vec![1]);
    assert_eq!(router.paths().len(), 1);
    assert_eq!(router.subscription_count(), 1);
    assert_eq!(router.active_position(), Some(0));
}

#[test]
fn delete_handle_respects_allow_delete() {
    let config = RouterConfig {
        allow_delete: false,
        ..RouterConfig::default()
    };
    let (_, mut router) = router_with(config);
    router.add_path(square("generic", 0.25, 0.25, 0.25), true).unwrap();
    router.handle_pointer_event(PointerEvent::down(88.0, 63.0));
    router.handle_pointer_event(PointerEvent::up(88.0, 63.0));
    assert_eq!(router.paths().len(), 1);
}

#[test]
fn deleting_sole_path_clears_active() {
    let (surface, mut router) = router();
    router.add_path(square("generic", 0.1, 0.1, 0.2), true).unwrap();
    let changed = record(&router.events().active_path_changed);
    let layer = router.paths()[0].layer();

    assert_eq!(router.delete_path(), Some(0));
    assert_eq!(router.active_position(), None);
    assert_eq!(*changed.borrow(), vec![None]);
    assert!(!surface.is_attached(layer));
    assert_eq!(router.delete_path(), None);
}

#[test]
fn deleting_activates_new_last() {
    let (_, mut router) = router();
    for i in 0..3 {
        router
            .add_path(square("generic", 0.1 + 0.2 * f64::from(i), 0.1, 0.1), false)
            .unwrap();
    }
    router.activate(Some(0));
    let deleted = record(&router.events().path_deleted);

    router.delete_path();
    assert_eq!(*deleted.borrow(), vec![0]);
    assert_eq!(router.active_position(), Some(1));
    assert!(router.paths()[1].is_active());
    assert_single_active(&router);
}

#[test]
fn subscriptions_track_paths() {
    let (_, mut router) = router();
    let script = [true, true, false, true, false, false, true, true, true, false];
    for add in script {
        if add {
            router.add_path(square("rectangle", 0.2, 0.2, 0.3), true).unwrap();
        } else {
            router.delete_path();
        }
        assert_eq!(router.subscription_count(), router.paths().len());
        assert_single_active(&router);
    }
    router.reset_paths();
    assert_eq!(router.subscription_count(), 0);
    assert_eq!(router.active_position(), None);
}

#[test]
fn unknown_shape_leaves_state_unchanged() {
    let (surface, mut router) = router();
    router.add_path(square("generic", 0.1, 0.1, 0.2), true).unwrap();
    let attached = surface.attached_surfaces();

    let err = router.add_path(square("hexagon", 0.1, 0.1, 0.2), true).unwrap_err();
    assert_eq!(err, ShapeError::UnknownShape("hexagon".into()));
    assert_eq!(router.paths().len(), 1);
    assert_eq!(router.subscription_count(), 1);
    assert_eq!(router.active_position(), Some(0));
    assert_eq!(surface.attached_surfaces(), attached);
}

#[test]
fn container_resize_keeps_normalized_points() {
    let (_, mut router) = router();
    router.add_path(square("generic", 0.125, 0.2, 0.3), false).unwrap();
    let before = router.paths()[0].points().to_vec();
    let box_before = router.paths()[0].get_boundaries();

    router.resize(Size::new(800.0, 150.0));
    assert_eq!(router.paths()[0].points(), before.as_slice());
    let box_after = router.paths()[0].get_boundaries();
    assert!((box_after.min_x - box_before.min_x * 2.0).abs() < EPS);
    assert!((box_after.max_y - box_before.max_y * 0.5).abs() < EPS);
}

#[test]
fn pixel_roundtrip_for_any_size() {
    let (_, mut router) = router();
    router.add_path(square("generic", 0.1, 0.1, 0.2), false).unwrap();
    for (w, h) in [(1.0, 1.0), (333.0, 77.0), (1920.0, 1080.0)] {
        router.resize(Size::new(w, h));
        let path = &router.paths()[0];
        for p in [Point::new(0.0, 0.0), Point::new(0.3, 0.7), Point::new(1.0, 1.0)] {
            let back = path.to_normalized(path.get_point_in_px(p));
            assert!((back.x - p.x).abs() < EPS);
            assert!((back.y - p.y).abs() < EPS);
        }
    }
}

#[test]
fn at_most_one_move_listener() {
    let (surface, mut router) = router();
    router.add_path(square("generic", 0.25, 0.25, 0.25), true).unwrap();

    let events = [
        PointerEvent::down(150.0, 110.0),
        PointerEvent::down(150.0, 110.0),
        PointerEvent::moved(160.0, 120.0),
        PointerEvent::down(212.0, 63.0),
        PointerEvent::moved(250.0, 40.0),
        PointerEvent::up(250.0, 40.0),
        PointerEvent::up(250.0, 40.0),
        PointerEvent::Leave,
    ];
    for event in events {
        router.handle_pointer_event(event);
        assert!(surface.listeners_of_kind(EventKind::MouseMove) <= 1);
        assert_eq!(
            surface.listeners_of_kind(EventKind::MouseMove),
            router.move_listener_count()
        );
    }
    assert_eq!(router.move_listener_count(), 0);
}

#[test]
fn rectangle_stays_rectangular() {
    let (_, mut router) = router();
    router.add_path(square("rectangle", 0.25, 0.25, 0.25), true).unwrap();

    // Bottom-right corner at (200, 150).
    router.handle_pointer_event(PointerEvent::down(200.0, 150.0));
    assert_eq!(router.mode(), Mode::PointDrag);
    router.handle_pointer_event(PointerEvent::moved(300.0, 250.0));
    router.handle_pointer_event(PointerEvent::up(300.0, 250.0));

    let b = router.paths()[0].get_boundaries();
    assert!((b.max_x - 300.0).abs() < EPS);
    assert!((b.max_y - 250.0).abs() < EPS);
    let pixels = router.paths()[0].pixel_points();
    assert!((pixels[1].x - 300.0).abs() < EPS);
    assert!((pixels[3].y - 250.0).abs() < EPS);
}

#[test]
fn default_paths_added_on_load() {
    let config = RouterConfig {
        default_paths: vec![
            square("generic", 0.1, 0.1, 0.2),
            square("rectangle", 0.5, 0.5, 0.2),
            square("missing", 0.5, 0.5, 0.2),
        ],
        default_active_path_index: Some(1),
        ..RouterConfig::default()
    };
    let (_, mut router) = router_with(config);
    let added = record(&router.events().path_added);

    router.set_image_url(Some("photo.png".into()));
    assert!(router.is_loading());
    router.on_image_loaded(RgbaImage::new(80, 60), Size::new(400.0, 300.0));

    assert!(!router.is_loading());
    assert_eq!(router.paths().len(), 2);
    assert!(added.borrow().is_empty());
    assert_eq!(router.active_position(), Some(1));
    assert!(router.config().default_paths.is_empty());
}

#[test]
fn image_error_is_not_fatal() {
    let (_, mut router) = router();
    router.set_image_url(Some("missing.png".into()));
    router.on_image_error();
    assert!(!router.is_loading());
    assert!(router.start_drawing());
}

#[test]
fn extracted_image_for_active_path() {
    let (_, mut router) = router();
    router.on_image_loaded(RgbaImage::new(400, 300), Size::new(400.0, 300.0));
    router.add_path(square("generic", 0.25, 0.25, 0.25), true).unwrap();

    let uri = router.get_image_in_position(None).unwrap();
    assert!(uri.starts_with("data:image/png;base64,"));
    assert_eq!(router.get_image_in_position(Some(3)), None);

    router
        .add_path(
            PathData::new("generic", &[Point::new(0.1, 0.1), Point::new(0.9, 0.1)]),
            false,
        )
        .unwrap();
    assert_eq!(router.get_path_image(1).as_deref(), Some("data:,"));
}

#[test]
fn path_data_snapshot() {
    let (_, mut router) = router();
    router
        .add_path(square("rectangle", 0.1, 0.1, 0.2).with_aspect_ratio(1.5).keep_inside(), false)
        .unwrap();
    let data = router.path_data();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0].name, "rectangle");
    assert_eq!(data[0].forced_aspect_ratio, Some(1.5));
    assert_eq!(data[0].keep_inside_container, Some(true));
    assert_eq!(data[0].points.len(), 4);
}

#[test]
fn dropping_router_releases_surface() {
    let surface = Rc::new(MemorySurface::new());
    {
        let mut router = InteractionRouter::new(surface.clone(), RouterConfig::default());
        router.resize(Size::new(100.0, 100.0));
        router.add_path(square("generic", 0.1, 0.1, 0.2), true).unwrap();
        router.start_drawing();
    }
    assert_eq!(surface.listener_count(), 0);
    assert!(surface.attached_surfaces().is_empty());
}
