mod support;

use ticklist::config::Config;
use ticklist::page::{Page, PageView};
use ticklist::route::Route;
use ticklist::session::Session;
use ticklist::todo::TodoId;

fn session() -> Session {
    Session::start(&Config::default(), support::fixed_clock())
}

#[test]
fn add_toggle_delete_through_pages() {
    let mut session = session();

    if let (Page::List(list), _) = session.parts_mut() {
        list.item_to_add = "Ship it".to_string();
    }
    let id = session.submit_item().expect("add");
    assert_eq!(id, TodoId::new(4));

    session.navigate(&Route::Detail(id).path());
    assert!(session.toggle_current().expect("toggle").is_complete());

    let view = session.view();
    assert!(matches!(view, PageView::Detail { ref item } if item.completed_on.is_some()));

    session.request_delete().expect("request");
    session.confirm_delete().expect("confirm");
    assert_eq!(session.route(), Route::List);
    assert!(session.store().get(id).is_none());
}

#[test]
fn unknown_detail_is_a_handled_state() {
    let mut session = session();
    session.navigate("/details/77");

    assert_eq!(session.route(), Route::Detail(TodoId::new(77)));
    assert_eq!(session.view(), PageView::NotFound { id: TodoId::new(77) });
    assert!(session.toggle_current().is_err());
    assert!(session.request_delete().is_err());
}

#[test]
fn configured_seed_replaces_defaults() {
    let config = Config {
        seed: vec!["Water plants".to_string()],
        ..Config::default()
    };
    let session = Session::start(&config, support::fixed_clock());

    assert_eq!(session.store().len(), 1);
    assert_eq!(
        session.store().get(TodoId::new(1)).map(|todo| todo.task.as_str()),
        Some("Water plants")
    );
}
