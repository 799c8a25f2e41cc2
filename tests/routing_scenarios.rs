//! Dispatch and reverse-lookup behavior of the shipped route catalogs.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::IntoResponse;

use omeroweb_router::config::RouterConfig;
use omeroweb_router::routing::pattern::PlaceholderKind;
use omeroweb_router::routing::{
    Dispatch, HandlerContext, HandlerRegistry, ParamValue, Params, ReverseError, RouteSpec,
    RouteTable, Router,
};

mod common;

#[test]
fn test_images_in_dataset() {
    let table = common::api_table();
    let m = table.resolve("/v2/m/datasets/42/images/").unwrap();
    assert_eq!(m.name, "api_dataset_images");
    assert_eq!(m.params, Params::new().with("dataset_id", 42));
    assert_eq!(m.api_version.as_deref(), Some("2"));
}

#[test]
fn test_all_projects() {
    let table = common::api_table();
    let m = table.resolve("/v2/m/projects/").unwrap();
    assert_eq!(m.name, "api_projects");
    assert!(m.params.is_empty());
}

#[test]
fn test_sized_thumbnail() {
    let table = common::webclient_table();
    let m = table.resolve("/render_thumbnail/size/96/501/").unwrap();
    assert_eq!(m.name, "render_thumbnail_resize");
    assert_eq!(m.params, Params::new().with("w", 96).with("iid", 501));
    assert!(!m.params.contains("share_id"));
    assert_eq!(m.kwargs().get("fallback_thumbnail"), Some(&ParamValue::Bool(true)));
}

#[test]
fn test_non_numeric_id_is_no_match() {
    let table = common::api_table();
    assert_eq!(table.resolve("/v2/m/projects/abc/"), None);
}

#[test]
fn test_unsupported_version_is_no_match() {
    let table = common::api_table();
    assert_eq!(table.resolve("/v17/m/projects/"), None);
    assert_eq!(table.resolve("/v17/"), None);
    assert!(table.resolve("/v1/m/projects/").is_some());
}

#[test]
fn test_reverse_images_in_dataset() {
    let table = common::api_table();
    let path = table
        .reverse("api_dataset_images", &Params::new().with("dataset_id", 7))
        .unwrap();
    assert_eq!(path, "/v2/m/datasets/7/images/");

    let older = table
        .reverse(
            "api_dataset_images",
            &Params::new().with("dataset_id", 7).with("api_version", "1"),
        )
        .unwrap();
    assert_eq!(older, "/v1/m/datasets/7/images/");
}

#[test]
fn test_reverse_failures_are_distinct() {
    let table = common::api_table();
    assert!(matches!(
        table.reverse("api_nothing", &Params::new()),
        Err(ReverseError::UnknownName(_))
    ));
    assert!(matches!(
        table.reverse("api_dataset_images", &Params::new()),
        Err(ReverseError::MissingParam { .. })
    ));
    assert!(matches!(
        table.reverse("api_dataset_images", &Params::new().with("dataset_id", -1)),
        Err(ReverseError::InvalidParam { .. })
    ));
    assert!(matches!(
        table.reverse("api_dataset_images", &Params::new().with("dataset_id", 1).with("api_version", "17")),
        Err(ReverseError::InvalidParam { .. })
    ));
}

#[test]
fn test_literal_parentheses_are_kept() {
    let table = common::api_table();
    let m = table.resolve("/v2/m/projects/(5)/").unwrap();
    assert_eq!(m.name, "api_project");
    assert_eq!(m.params.get_int("object_id"), Some(5));
    assert_eq!(table.resolve("/v2/m/projects/5/"), None);

    let m = table.resolve("/v2/m/datasets/5)/").unwrap();
    assert_eq!(m.name, "api_dataset");
}

#[test]
fn test_negative_ids_need_signed_placeholders() {
    let table = common::webclient_table();
    assert_eq!(table.resolve("/avatar/-3/"), None);
    assert_eq!(
        table.resolve("/avatar/3/").unwrap().params.get("oid"),
        Some(&ParamValue::Int(3))
    );

    let m = table.resolve("/api/experimenters/-1/").unwrap();
    assert_eq!(m.name, "api_experimenter");
    assert_eq!(m.params.get_int("experimenter_id"), Some(-1));
}

#[test]
fn test_optional_segments() {
    let table = common::webclient_table();

    let bare = table.resolve("/render_image/5/").unwrap();
    assert_eq!(bare.name, "web_render_image");
    assert_eq!(bare.params, Params::new().with("iid", "5"));

    let full = table.resolve("/3/render_image/5/1/2/").unwrap();
    assert_eq!(full.name, "web_render_image");
    assert_eq!(full.params.get_int("share_id"), Some(3));
    assert_eq!(full.params.get_str("z"), Some("1"));
    assert_eq!(full.params.get_str("t"), Some("2"));

    let action = table.resolve("/action/addnewcontainer/").unwrap();
    assert_eq!(action.params.len(), 1);
    let action = table.resolve("/action/delete/image/12/").unwrap();
    assert_eq!(action.params.get_str("o_type"), Some("image"));
    assert_eq!(action.params.get_int("o_id"), Some(12));
}

#[test]
fn test_specific_menu_routes_win_over_template() {
    let table = common::webclient_table();
    assert_eq!(table.resolve("/userdata/").unwrap().name, "userdata");
    assert_eq!(table.resolve("/history/").unwrap().name, "history");
    let m = table.resolve("/search/").unwrap();
    assert_eq!(m.name, "load_template");
    assert_eq!(m.params.get_str("menu"), Some("search"));
    assert_eq!(table.resolve("/nowhere/"), None);
}

/// Parameter sets covering every placeholder of `name`, one per enum value.
fn sample_params(table: &RouteTable, name: &str) -> Vec<Params> {
    let route = table.route(name).unwrap();
    let mut base = Params::new();
    let mut choices: Vec<(&str, &[String])> = Vec::new();
    for placeholder in route.matcher().placeholders() {
        let value: ParamValue = match &placeholder.kind {
            PlaceholderKind::Int => 7.into(),
            PlaceholderKind::SignedInt => (-7).into(),
            PlaceholderKind::Digits { min, .. } => "7".repeat(*min).into(),
            PlaceholderKind::Alpha => "abc".into(),
            PlaceholderKind::Str => "s1".into(),
            PlaceholderKind::OneOf(values) => {
                choices.push((placeholder.name.as_str(), values.as_slice()));
                values[0].as_str().into()
            }
            PlaceholderKind::Version(_) => continue,
            PlaceholderKind::Regex(_) => panic!("catalog routes are typed"),
        };
        base.insert(placeholder.name.as_str(), value);
    }

    let mut sets = vec![base.clone()];
    for (param, values) in choices {
        for value in values {
            sets.push(base.clone().with(param, value.as_str()));
        }
    }
    sets
}

#[test]
fn test_every_default_route_round_trips() {
    let (_, table) = common::server(RouterConfig::default());
    let names: Vec<String> = table.routes().map(|r| r.name().to_string()).collect();
    assert!(names.len() > 100);

    for name in names {
        for params in sample_params(&table, &name) {
            let path = table
                .reverse(&name, &params)
                .unwrap_or_else(|err| panic!("{} {:?}: {}", name, params, err));
            let matched = table
                .resolve(&path)
                .unwrap_or_else(|| panic!("{} reversed to unmatched {}", name, path));
            assert_eq!(matched.name, name, "{} resolved to {}", path, matched.name);
        }
    }
}

#[test]
fn test_every_menu_value_reverses_to_its_own_route() {
    let table = common::webclient_table();
    for menu in ["public", "search", "help", "usertags"] {
        let path = table.reverse("load_template", &Params::new().with("menu", menu)).unwrap();
        assert_eq!(table.resolve(&path).unwrap().name, "load_template");
    }
    for menu in ["userdata", "history"] {
        assert!(matches!(
            table.reverse("load_template", &Params::new().with("menu", menu)),
            Err(ReverseError::InvalidParam { .. })
        ));
        let m = table.resolve(&format!("/{}/", menu)).unwrap();
        assert_eq!(m.name, menu);
        assert_eq!(m.defaults.get_str("menu"), Some(menu));
    }
}

#[test]
fn test_calendar_and_history_widths() {
    let table = common::webclient_table();
    let m = table.resolve("/load_calendar/2016/5/").unwrap();
    assert_eq!(m.name, "load_calendar");
    assert_eq!(m.params.get_int("year"), Some(2016));
    assert_eq!(m.params.get_int("month"), Some(5));
    assert_eq!(table.resolve("/load_calendar/2016/05/").unwrap().params.get_int("month"), Some(5));
    assert_eq!(table.resolve("/load_calendar/").unwrap().name, "load_calendar");
    assert_eq!(table.resolve("/load_calendar/99999/123/"), None);
    assert_eq!(table.resolve("/load_calendar/16/5/"), None);

    let m = table.resolve("/load_history/2016/12/31/").unwrap();
    assert_eq!(m.name, "load_history");
    assert_eq!(m.params.get_int("day"), Some(31));
    assert_eq!(table.resolve("/load_history/2016/12/311/"), None);
}

#[test]
fn test_optional_parameters_round_trip_when_omitted() {
    let table = common::webclient_table();
    let path = table
        .reverse("load_plate", &Params::new().with("o1_type", "plate"))
        .unwrap();
    assert_eq!(path, "/load_plate/plate/");
    let m = table.resolve(&path).unwrap();
    assert_eq!(m.name, "load_plate");
    assert!(!m.params.contains("o1_id"));
}

#[tokio::test]
async fn test_earlier_route_wins() {
    let first = Arc::new(AtomicUsize::new(0));
    let second = Arc::new(AtomicUsize::new(0));

    let mut registry = HandlerRegistry::new();
    let counter = first.clone();
    registry.register("first", move |_ctx: HandlerContext| {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            StatusCode::OK.into_response()
        }
    });
    let counter = second.clone();
    registry.register("second", move |_ctx: HandlerContext| {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            StatusCode::OK.into_response()
        }
    });

    let table = RouteTable::builder(vec!["0".to_string()])
        .mount(
            "/",
            None,
            vec![
                RouteSpec::path("thing/<str:key>/", "first", "by_key"),
                RouteSpec::path("thing/<int:id>/", "second", "by_id"),
            ],
        )
        .build(&registry)
        .unwrap();

    let router = Router::new(Arc::new(table));
    match router.dispatch(common::get("/thing/12/")).await {
        Dispatch::Handled { route, .. } => assert_eq!(route, "by_key"),
        Dispatch::NoMatch => panic!("expected a match"),
    }
    assert_eq!(first.load(Ordering::SeqCst), 1);
    assert_eq!(second.load(Ordering::SeqCst), 0);
}
