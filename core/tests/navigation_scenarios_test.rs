use std::cell::RefCell;
use std::rc::Rc;

use comic_engine::{
    ComicBookEngine, Dependency, Direction, DocumentId, EngineConfig, Navigator, PageStore, Point,
    Property, PropertyChange, Size, Teardown,
};

fn engine(count: usize) -> (ComicBookEngine, Teardown) {
    let teardown = Teardown::new();
    let pages = PageStore::new(DocumentId::new("scenario"), (0..count).map(|i| vec![i as u8; 8]));
    let engine = ComicBookEngine::new(
        Dependency::new(pages, EngineConfig::default()),
        || Size::new(300.0, 500.0),
        &teardown,
    )
    .expect("engine");
    (engine, teardown)
}

fn changes(engine: &mut ComicBookEngine) -> Rc<RefCell<Vec<PropertyChange>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    for property in [
        Property::CurrentIndex,
        Property::PageCount,
        Property::ContentMode,
        Property::IsCommandPromptVisible,
        Property::CommandPromptText,
    ] {
        let sink = Rc::clone(&log);
        engine.subscribe(property, move |change| sink.borrow_mut().push(change.clone()));
    }
    log
}

#[test]
fn out_of_range_requests_always_clamp() {
    let (mut engine, _teardown) = engine(7);
    for request in [-100isize, -1, 7, 8, 1_000, isize::MAX, isize::MIN] {
        engine.set_comic_file_index(request);
        assert!(engine.current_index() < engine.page_count(), "request {request}");
    }

    let mut nav = Navigator::new(7);
    for request in [7usize, 50, usize::MAX] {
        nav.set_current_index(request);
        assert_eq!(nav.current_index(), 6);
    }
}

#[test]
fn empty_document_next_changes_nothing() {
    let (mut engine, _teardown) = engine(0);
    let log = changes(&mut engine);
    let before = engine.state();

    assert!(!engine.advance(Direction::Next));
    assert_eq!(engine.on_screen_tapped(Point::new(290.0, 10.0)), comic_engine::Intent::Next);

    assert_eq!(engine.state(), before);
    assert!(log.borrow().is_empty());
}

#[test]
fn last_page_next_raises_no_notification() {
    let (mut engine, _teardown) = engine(5);
    engine.set_comic_file_index(4);
    let log = changes(&mut engine);

    assert!(!engine.advance(Direction::Next));
    assert_eq!(engine.current_index(), 4);
    assert!(log.borrow().is_empty());
}

#[test]
fn reading_session_emits_one_change_per_transition() {
    let (mut engine, _teardown) = engine(3);
    let log = changes(&mut engine);

    engine.on_screen_tapped(Point::new(299.0, 1.0));
    engine.on_screen_tapped(Point::new(299.0, 1.0));
    engine.on_screen_tapped(Point::new(299.0, 1.0));
    engine.on_screen_tapped(Point::new(150.0, 1.0));
    engine.show_command_prompt();
    engine.hide_command_prompt();
    engine.hide_command_prompt();

    let properties: Vec<Property> = log.borrow().iter().map(|change| change.property).collect();
    assert_eq!(
        properties,
        vec![
            Property::CurrentIndex,
            Property::CurrentIndex,
            Property::IsCommandPromptVisible,
            Property::IsCommandPromptVisible,
        ]
    );
    assert_eq!(engine.current_index(), 2);
}

#[test]
fn renderer_can_fetch_bytes_from_a_change() {
    let (mut engine, _teardown) = engine(4);
    let store = std::sync::Arc::clone(engine.pages());
    let rendered = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&rendered);
    engine.subscribe(Property::CurrentIndex, move |change| {
        if let comic_engine::PropertyValue::Index(index) = change.value {
            sink.borrow_mut().push(store.get(index).expect("page").bytes().to_vec());
        }
    });

    engine.advance(Direction::Next);
    engine.advance(Direction::Next);

    assert_eq!(*rendered.borrow(), vec![vec![1u8; 8], vec![2u8; 8]]);
}
