mod helpers;
use helpers::{build_client, event, fake_user, sport, Backend};
use lifeplan_client::error::RequestError;
use lifeplan_client::session::MemorySessionStore;
use lifeplan_client::views::{EventDraft, EventFilter, EventsView, Scope};
use time::macros::{date, time};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn names(view: &EventsView) -> Vec<&str> {
    view.events().iter().map(|x| x.name.as_str()).collect()
}

#[tokio::test]
async fn toggle_moves_event_between_lists() {
    let server = MockServer::start().await;
    let user = fake_user();
    let backend = Backend::new(user.clone()).with_events(vec![
        event(1, "Run", &user),
        event(2, "Read", &user),
    ]);
    backend.mount(&server).await;
    let client = build_client(&server, &MemorySessionStore::with_token("abc"));

    let mut active = EventsView::new(client.clone(), Scope::Active);
    let mut completed = EventsView::new(client.clone(), Scope::Completed);
    active.refresh().await;
    completed.refresh().await;
    assert_eq!(names(&active), ["Run", "Read"]);
    assert!(completed.events().is_empty());

    assert!(active.toggle_status(1).await);
    completed.refresh().await;
    assert_eq!(names(&active), ["Read"]);
    assert_eq!(names(&completed), ["Run"]);
    assert_eq!(active.notices()[0].message, "Moved to completed");

    assert!(completed.toggle_status(1).await);
    active.refresh().await;
    assert!(completed.events().is_empty());
    assert_eq!(names(&active), ["Run", "Read"]);
    assert_eq!(completed.notices()[0].message, "Moved back to active");
}

#[tokio::test]
async fn create_composes_activation() {
    let server = MockServer::start().await;
    let user = fake_user();
    let backend = Backend::new(user.clone());
    backend.mount(&server).await;
    let client = build_client(&server, &MemorySessionStore::with_token("abc"));
    let mut view = EventsView::new(client, Scope::Active);

    let mut dated = EventDraft::new("Dentist");
    dated.date = Some(date!(2024 - 03 - 05));
    dated.time = Some(time!(9:30));
    assert!(view.create(&dated).await);

    let mut day_only = EventDraft::new("Holiday");
    day_only.date = Some(date!(2024 - 03 - 06));
    assert!(view.create(&day_only).await);

    // A time without a day has nothing to attach to.
    let mut time_only = EventDraft::new("Nap");
    time_only.time = Some(time!(14:00));
    assert!(view.create(&time_only).await);

    let stored = backend.events();
    assert_eq!(stored[0].activate_date.as_deref(), Some("2024-03-05"));
    assert_eq!(stored[0].activate_time.as_deref(), Some("09:30"));
    assert_eq!(stored[1].activate_date.as_deref(), Some("2024-03-06"));
    assert_eq!(stored[1].activate_time, None);
    assert_eq!(stored[2].activate_date, None);

    assert_eq!(names(&view), ["Dentist", "Holiday", "Nap"]);
    assert!(view.notices().iter().all(|x| !x.is_error()));
}

#[tokio::test]
async fn create_sends_type_and_activation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/event"))
        .and(body_json(serde_json::json!({
            "name": "Swim",
            "type_id": 1,
            "activate_at": "2024-07-01 06:15",
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/event"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server, &MemorySessionStore::with_token("abc"));
    let mut view = EventsView::new(client, Scope::Active);
    let draft = EventDraft {
        name: "Swim".into(),
        type_id: Some(sport().id),
        date: Some(date!(2024 - 07 - 01)),
        time: Some(time!(6:15)),
    };

    assert!(view.create(&draft).await);
}

#[tokio::test]
async fn create_without_name_is_rejected_locally() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/event"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let client = build_client(&server, &MemorySessionStore::with_token("abc"));
    let mut view = EventsView::new(client, Scope::Active);

    assert!(!view.create(&EventDraft::new("  ")).await);
    assert!(view.notices()[0].is_error());
}

#[tokio::test]
async fn filters_pick_the_endpoint() {
    let server = MockServer::start().await;
    let user = fake_user();
    let mut gym = event(3, "Gym", &user);
    gym.kind = Some(sport());
    gym.activate_date = Some("2024-05-01".into());

    Mock::given(method("GET"))
        .and(path("/api/event/sport/completed"))
        .and(query_param("date", "2024-05-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![gym.clone()]))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/event/sport"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server, &MemorySessionStore::with_token("abc"));
    let mut view = EventsView::new(client, Scope::Completed).with_filter(EventFilter {
        type_code: Some("sport".into()),
        date: Some(date!(2024 - 05 - 01)),
    });

    view.refresh().await;
    assert_eq!(view.events(), [gym]);

    // Same value again does not fetch.
    view.set_type_filter(Some("sport".into())).await;

    let client = build_client(&server, &MemorySessionStore::with_token("abc"));
    let mut active = EventsView::new(client, Scope::Active);
    active.set_type_filter(Some("sport".into())).await;
    assert!(active.events().is_empty());
    assert!(!active.is_loading());
}

#[tokio::test]
async fn failed_refresh_keeps_previous_list() {
    let server = MockServer::start().await;
    let user = fake_user();
    Mock::given(method("GET"))
        .and(path("/api/event"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![event(1, "Run", &user)]))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/event"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = build_client(&server, &MemorySessionStore::with_token("abc"));
    let mut view = EventsView::new(client, Scope::Active);

    assert!(view.refresh().await);
    assert!(!view.refresh().await);

    assert_eq!(names(&view), ["Run"]);
    assert!(!view.is_loading());
    let notice = &view.notices()[0];
    assert_eq!(notice.title, "Failed to load events");
    assert_eq!(notice.message, "HTTP error! status: 500");
}

#[tokio::test]
async fn stale_result_is_dropped() {
    let server = MockServer::start().await;
    let user = fake_user();
    let client = build_client(&server, &MemorySessionStore::with_token("abc"));
    let mut view = EventsView::new(client, Scope::Active);

    let first = view.begin_fetch();
    let second = view.begin_fetch();
    assert!(view.is_loading());

    assert!(view.finish_fetch(second.ticket(), Ok(vec![event(2, "New", &user)])));
    assert!(!view.finish_fetch(first.ticket(), Ok(vec![event(1, "Old", &user)])));
    assert_eq!(names(&view), ["New"]);

    // A late failure of an older request is silent too.
    let third = view.begin_fetch();
    let fourth = view.begin_fetch();
    assert!(view.finish_fetch(fourth.ticket(), Ok(vec![])));
    let err = RequestError::status(reqwest::StatusCode::BAD_GATEWAY, None);
    assert!(!view.finish_fetch(third.ticket(), Err(err)));
    assert!(view.notices().is_empty());
    assert!(view.events().is_empty());
}

#[tokio::test]
async fn toggle_failure_surfaces_server_message() {
    let server = MockServer::start().await;
    let user = fake_user();
    let backend = Backend::new(user.clone()).with_events(vec![event(1, "Run", &user)]);
    backend.mount(&server).await;
    let client = build_client(&server, &MemorySessionStore::with_token("abc"));

    let mut view = EventsView::new(client, Scope::Active);
    view.refresh().await;

    assert!(!view.toggle_status(42).await);

    assert_eq!(names(&view), ["Run"]);
    let notice = &view.notices()[0];
    assert!(notice.is_error());
    assert_eq!(notice.message, "Event not found");
}

#[tokio::test]
async fn mount_loads_events_and_types() {
    let server = MockServer::start().await;
    let user = fake_user();
    let backend = Backend::new(user.clone()).with_events(vec![event(1, "Run", &user)]);
    backend.mount(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/event/types"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![sport()]))
        .mount(&server)
        .await;

    let client = build_client(&server, &MemorySessionStore::with_token("abc"));
    let mut view = EventsView::new(client, Scope::Active);
    view.mount().await;

    assert_eq!(names(&view), ["Run"]);
    assert_eq!(view.event_types(), [sport()]);
}

#[tokio::test]
async fn update_sends_draft_and_refetches() {
    let server = MockServer::start().await;
    let user = fake_user();
    let mut renamed = event(4, "Gym and sauna", &user);
    renamed.activate_date = Some("2024-05-01".into());
    renamed.activate_time = Some("18:00".into());

    Mock::given(method("GET"))
        .and(path("/api/event"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![event(4, "Gym", &user)]))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/event/4"))
        .and(body_json(serde_json::json!({
            "name": "Gym and sauna",
            "activate_at": "2024-05-01 18:00",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&renamed))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/event"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![renamed.clone()]))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server, &MemorySessionStore::with_token("abc"));
    let mut view = EventsView::new(client, Scope::Active);
    view.refresh().await;

    let mut draft = EventDraft::from_event(&view.events()[0]);
    draft.name = "Gym and sauna".into();
    draft.date = Some(date!(2024 - 05 - 01));
    draft.time = Some(time!(18:00));
    assert!(view.update(4, &draft).await);

    assert_eq!(view.events(), [renamed]);
    assert_eq!(view.notices()[0].to_string(), "Event updated: Gym and sauna");
}

#[tokio::test]
async fn failed_update_keeps_list() {
    let server = MockServer::start().await;
    let user = fake_user();
    Mock::given(method("GET"))
        .and(path("/api/event"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![event(4, "Gym", &user)]))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/event/4"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(serde_json::json!({ "message": "This action is unauthorized." })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server, &MemorySessionStore::with_token("abc"));
    let mut view = EventsView::new(client, Scope::Active);
    view.refresh().await;

    assert!(!view.update(4, &EventDraft::new("Other")).await);

    assert_eq!(names(&view), ["Gym"]);
    assert_eq!(
        view.notices()[0].to_string(),
        "Failed to update event: This action is unauthorized."
    );
}

#[tokio::test]
async fn delete_refetches() {
    let server = MockServer::start().await;
    let user = fake_user();
    Mock::given(method("GET"))
        .and(path("/api/event"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(vec![event(1, "Run", &user), event(2, "Read", &user)]),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/event/1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/event"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![event(2, "Read", &user)]))
        .mount(&server)
        .await;

    let client = build_client(&server, &MemorySessionStore::with_token("abc"));
    let mut view = EventsView::new(client, Scope::Active);
    view.refresh().await;

    assert!(view.delete(1).await);

    assert_eq!(names(&view), ["Read"]);
    assert_eq!(view.notices()[0].to_string(), "Event deleted");
}

#[tokio::test]
async fn failed_delete_keeps_list() {
    let server = MockServer::start().await;
    let user = fake_user();
    let backend = Backend::new(user.clone()).with_events(vec![event(1, "Run", &user)]);
    backend.mount(&server).await;
    Mock::given(method("DELETE"))
        .and(path("/api/event/9"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(serde_json::json!({ "message": "Event not found" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server, &MemorySessionStore::with_token("abc"));
    let mut view = EventsView::new(client, Scope::Active);
    view.refresh().await;

    assert!(!view.delete(9).await);

    assert_eq!(names(&view), ["Run"]);
    assert_eq!(view.notices()[0].message, "Event not found");
}

#[tokio::test]
async fn date_filter_change_refetches() {
    let server = MockServer::start().await;
    let user = fake_user();
    let mut dentist = event(1, "Dentist", &user);
    dentist.activate_date = Some("2024-03-05".into());
    let mut holiday = event(2, "Holiday", &user);
    holiday.activate_date = Some("2024-03-06".into());
    let backend = Backend::new(user.clone()).with_events(vec![dentist, holiday]);
    backend.mount(&server).await;

    let client = build_client(&server, &MemorySessionStore::with_token("abc"));
    let mut view = EventsView::new(client, Scope::Active);
    view.refresh().await;
    assert_eq!(names(&view), ["Dentist", "Holiday"]);

    view.set_date_filter(Some(date!(2024 - 03 - 06))).await;
    assert_eq!(names(&view), ["Holiday"]);

    view.set_date_filter(Some(date!(2024 - 03 - 05))).await;
    assert_eq!(names(&view), ["Dentist"]);

    view.clear_filters().await;
    assert_eq!(view.filter(), &EventFilter::default());
    assert_eq!(names(&view), ["Dentist", "Holiday"]);

    let dated: Vec<_> = server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter_map(|x| x.url.query().map(str::to_string))
        .collect();
    assert_eq!(dated, ["date=2024-03-06", "date=2024-03-05"]);
}
