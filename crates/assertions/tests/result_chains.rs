//! End-to-end assertion chains over captured handler results.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use pretty_assertions::assert_eq;
use serde_json::json;
use verity_assertions::{
    Assertable, AssertionError, AssertionFailure, HasLocation, HasStatus, HasValue, TestContext,
    UsageError, calling,
};
use verity_domain::{
    AcceptedResult, ActionResult, ContentResult, CreatedResult, LocationTarget, ObjectResult,
    RedirectResult, RouteValues, StatusCode,
};

fn redirect_home() -> TestContext {
    calling("HomeController", "redirect_to_home", |_| {
        ActionResult::Redirect(RedirectResult::to_url("/home"))
    })
}

fn failure(err: AssertionError) -> AssertionFailure {
    match err {
        AssertionError::Failed(failure) => failure,
        AssertionError::Usage(usage) => panic!("expected a test failure, got usage error: {usage}"),
    }
}

#[test]
fn matching_redirect_location_passes() -> Result<(), AssertionError> {
    redirect_home()
        .should_return()
        .redirect()?
        .temporary()?
        .and_also()
        .to_url("/home")?;
    Ok(())
}

#[test]
fn mismatched_redirect_location_names_both_sides() {
    let ctx = redirect_home();
    let err = ctx
        .should_return()
        .redirect()
        .and_then(|redirect| redirect.to_url("/other"))
        .unwrap_err();
    assert_eq!(
        failure(err),
        AssertionFailure::Route(
            "When calling redirect_to_home action in HomeController expected redirect \
             result location to be '/other', but instead received '/home'."
                .to_string()
        )
    );
}

#[test]
fn all_location_overloads_share_subject_naming() {
    let ctx = redirect_home();

    let by_string = failure(
        ctx.should_return()
            .redirect()
            .and_then(|r| r.to_url("/other"))
            .unwrap_err(),
    );
    let by_uri = failure(
        ctx.should_return()
            .redirect()
            .and_then(|r| r.at_location(&verity_domain::Uri::parse("/other").unwrap()))
            .unwrap_err(),
    );
    let by_predicate = failure(
        ctx.should_return()
            .redirect()
            .and_then(|r| r.to_url_passing(|url| url == "/other"))
            .unwrap_err(),
    );

    let subject = "expected redirect result location to";
    assert!(by_string.message().contains(subject));
    assert!(by_uri.message().contains(subject));
    assert!(by_predicate.message().contains(subject));
    assert_eq!(by_string, by_uri);
}

#[test]
fn malformed_expected_uri_is_a_format_failure_not_a_mismatch() {
    let ctx = redirect_home();
    let err = ctx
        .should_return()
        .redirect()
        .and_then(|r| r.to_url("http://exa mple.com"))
        .unwrap_err();
    assert!(matches!(
        failure(err),
        AssertionFailure::UriFormat(message)
            if message.contains("'http://exa mple.com' could not be parsed")
    ));
}

#[test]
fn location_url_matching_pattern() -> Result<(), AssertionError> {
    calling("ItemsController", "store", |_| {
        ActionResult::Created(CreatedResult::at_url("/items/42"))
    })
    .should_return()
    .created()?
    .to_url_matching(r"^/items/\d+$")?;
    Ok(())
}

#[test]
fn bad_pattern_is_a_usage_error() {
    let ctx = redirect_home();
    let err = ctx
        .should_return()
        .redirect()
        .and_then(|r| r.to_url_matching("("))
        .unwrap_err();
    assert!(matches!(
        err,
        AssertionError::Usage(UsageError::InvalidPattern(_))
    ));
}

#[test]
fn narrowing_to_wrong_category_names_requested_shape() {
    let ctx = redirect_home();
    let err = ctx.should_return().created().unwrap_err();
    assert_eq!(
        failure(err),
        AssertionFailure::ResultShape(
            "When calling redirect_to_home action in HomeController expected result to \
             be created result, but instead received redirect result."
                .to_string()
        )
    );
}

#[test]
fn asserting_before_invocation_is_a_usage_error() {
    let ctx = TestContext::component("HomeController");
    let err = ctx.should_return().redirect().unwrap_err();
    assert_eq!(
        err,
        AssertionError::Usage(UsageError::MissingInvocation)
    );
}

#[test]
fn routed_redirect_supports_action_and_route_values() -> Result<(), AssertionError> {
    let ctx = calling("OrdersController", "reroute", |_| {
        ActionResult::Redirect(RedirectResult::to_route(
            LocationTarget::action_in("details", "Orders").with_route_values(
                RouteValues::new()
                    .with("id", json!(42))
                    .with("slug", json!("latest")),
            ),
        ))
    });
    ctx.should_return()
        .redirect()?
        .at_action("details")?
        .and_also()
        .at_controller("Orders")?
        .containing_route_value("id", json!(42))?
        .containing_route_value_of_type::<i32>()?
        .containing_route_value_of_type_with_key::<String>("slug")?
        .containing_route_values(
            &RouteValues::new()
                .with("id", json!(42))
                .with("slug", json!("latest")),
        )?;
    Ok(())
}

#[test]
fn exact_route_values_report_count_mismatch_first() {
    let ctx = calling("OrdersController", "reroute", |_| {
        ActionResult::Redirect(RedirectResult::to_route(
            LocationTarget::action("details")
                .with_route_values(RouteValues::new().with("id", json!(42))),
        ))
    });
    let err = ctx
        .should_return()
        .redirect()
        .and_then(|r| {
            r.containing_route_values(
                &RouteValues::new()
                    .with("id", json!(42))
                    .with("slug", json!("latest")),
            )
        })
        .unwrap_err();
    assert!(matches!(
        failure(err),
        AssertionFailure::Route(message)
            if message.contains("to have 2 entries, but in fact found 1.")
    ));
}

#[test]
fn missing_int_route_value_names_the_type() {
    let ctx = calling("OrdersController", "reroute", |_| {
        ActionResult::Redirect(RedirectResult::to_route(
            LocationTarget::action("details")
                .with_route_values(RouteValues::new().with("slug", json!("latest"))),
        ))
    });
    let err = ctx
        .should_return()
        .redirect()
        .and_then(|r| r.containing_route_value_of_type::<i32>())
        .unwrap_err();
    assert_eq!(
        failure(err),
        AssertionFailure::Route(
            "When calling reroute action in OrdersController expected redirect result \
             route values to have at least one entry of i32 type, but none was found."
                .to_string()
        )
    );
}

#[test]
fn action_name_on_location_only_result_is_a_shape_mismatch() {
    let ctx = calling("ItemsController", "store", |_| {
        ActionResult::Created(CreatedResult::at_url("/items/42"))
    });
    let err = ctx
        .should_return()
        .created()
        .and_then(|created| created.at_action("store"))
        .unwrap_err();
    assert_eq!(
        failure(err),
        AssertionFailure::ResultShape(
            "When calling store action in ItemsController expected created result to \
             contain action name, but it could not be found."
                .to_string()
        )
    );
}

#[test]
fn created_value_round_trips() -> Result<(), AssertionError> {
    let ctx = calling("ItemsController", "store", |_| {
        ActionResult::Created(
            CreatedResult::at_url("/items/42").with_value(json!({"id": 42, "name": "gear"})),
        )
    });
    ctx.should_return()
        .created()?
        .to_url("/items/42")?
        .and_also()
        .with_value(&json!({"id": 42, "name": "gear"}))?
        .with_value_passing(|value| value["id"] == json!(42))?;
    Ok(())
}

#[test]
fn accepted_without_location_reports_missing_location() {
    let ctx = calling("JobsController", "enqueue", |_| {
        ActionResult::Accepted(AcceptedResult::bare().with_value(json!({"queued": true})))
    });
    let err = ctx
        .should_return()
        .accepted()
        .and_then(|accepted| accepted.to_url("/jobs/1"))
        .unwrap_err();
    assert!(matches!(
        failure(err),
        AssertionFailure::ResultShape(message)
            if message.contains("expected accepted result to contain location, but such was not found.")
    ));
}

#[test]
fn value_predicate_false_is_a_value_failure() {
    let ctx = calling("JobsController", "enqueue", |_| {
        ActionResult::Accepted(AcceptedResult::bare().with_value(json!({"queued": true})))
    });
    let err = ctx
        .should_return()
        .accepted()
        .and_then(|a| a.with_value_passing(|_| false))
        .unwrap_err();
    assert_eq!(
        failure(err),
        AssertionFailure::Value(
            "When calling enqueue action in JobsController expected accepted result \
             value to pass the given predicate, but it did not."
                .to_string()
        )
    );
}

#[test]
#[should_panic(expected = "user assertion failed")]
fn value_asserting_form_propagates_user_panics() {
    let ctx = calling("JobsController", "enqueue", |_| {
        ActionResult::Accepted(AcceptedResult::bare().with_value(json!({"queued": true})))
    });
    let _ = ctx
        .should_return()
        .accepted()
        .and_then(|a| a.with_value_asserting(|_| panic!("user assertion failed")));
}

#[test]
fn object_result_chain() -> Result<(), AssertionError> {
    let ctx = calling("ItemsController", "details", |_| {
        ActionResult::Object(
            ObjectResult::new(json!({"id": 7}))
                .with_status(200)
                .with_content_type("application/json; charset=utf-8"),
        )
    });
    ctx.should_return()
        .object()?
        .with_status_code(200)?
        .and_also()
        .containing_content_type("application/json")?
        .with_value_of_type::<serde_json::Map<String, serde_json::Value>>()?;
    Ok(())
}

#[test]
fn strict_validation_compares_full_media_type() {
    let make = |strict: bool| {
        let ctx = TestContext::component("ItemsController");
        let ctx = if strict { ctx.with_strict_validation() } else { ctx };
        ctx.calling("details", |_| {
            ActionResult::Object(
                ObjectResult::new(json!({"id": 7}))
                    .with_content_type("application/json; charset=utf-8"),
            )
        })
    };

    let lenient = make(false);
    assert!(
        lenient
            .should_return()
            .object()
            .and_then(|o| o.containing_content_type("application/json"))
            .is_ok()
    );

    let strict = make(true);
    let err = strict
        .should_return()
        .object()
        .and_then(|o| o.containing_content_type("application/json"))
        .unwrap_err();
    assert!(matches!(failure(err), AssertionFailure::Content(_)));
}

#[test]
fn content_result_chain() -> Result<(), AssertionError> {
    let ctx = calling("PagesController", "about", |_| {
        ActionResult::Content(
            ContentResult::new("<h1>About</h1>")
                .with_content_type("text/html")
                .with_status(200),
        )
    });
    ctx.should_return()
        .content()?
        .with_content("<h1>About</h1>")?
        .and_also()
        .with_content_matching("^<h1>")?
        .with_content_passing(|content| content.contains("About"))?
        .with_content_type("text/html")?
        .with_status_code(200)?;
    Ok(())
}

#[test]
fn status_code_mismatch_renders_reason_phrases() {
    let ctx = calling("HealthController", "ping", |_| {
        ActionResult::StatusCode(StatusCode::OK)
    });
    let err = ctx.should_return().status_code(404).unwrap_err();
    assert_eq!(
        failure(err),
        AssertionFailure::StatusCode(
            "When calling ping action in HealthController expected status code result \
             to be 404 (Not Found), but instead received 200 (OK)."
                .to_string()
        )
    );
}

#[test]
fn no_content_narrows_or_reports_shape() -> Result<(), AssertionError> {
    calling("ItemsController", "remove", |_| ActionResult::NoContent)
        .should_return()
        .no_content()?;

    let ctx = calling("ItemsController", "remove", |_| {
        ActionResult::StatusCode(StatusCode::OK)
    });
    let err = ctx.should_return().no_content().unwrap_err();
    assert!(matches!(
        failure(err),
        AssertionFailure::ResultShape(message)
            if message.contains("expected result to be no content result, but instead received status code result.")
    ));
    Ok(())
}

#[derive(Debug, thiserror::Error)]
#[error("inventory lookup failed")]
struct InventoryError;

#[test]
fn thrown_error_chain() -> Result<(), AssertionError> {
    let ctx = calling("ItemsController", "details", |_| {
        Err::<ActionResult, _>(InventoryError)
    });
    ctx.should_throw()
        .exception()?
        .named("InventoryError")?
        .and_also()
        .with_message("inventory lookup failed")?
        .with_message_containing("lookup")?
        .with_message_matching("failed$")?
        .with_message_passing(|message| message.starts_with("inventory"))?;
    Ok(())
}

#[test]
fn should_return_after_error_reports_the_error() {
    let ctx = calling("ItemsController", "details", |_| {
        Err::<ActionResult, _>(InventoryError)
    });
    let err = ctx.should_return().object().unwrap_err();
    assert_eq!(
        failure(err),
        AssertionFailure::Invocation(
            "When calling details action in ItemsController expected action to complete \
             successfully, but it threw InventoryError with 'inventory lookup failed' \
             message."
                .to_string()
        )
    );
}

#[test]
fn should_throw_on_successful_result_reports_the_category() {
    let ctx = redirect_home();
    let err = ctx.should_throw().exception().unwrap_err();
    assert!(matches!(
        failure(err),
        AssertionFailure::Invocation(message)
            if message.contains("expected action to throw an exception, but instead received redirect result.")
    ));
}

#[test]
fn component_attribute_presence() -> Result<(), AssertionError> {
    let ctx = TestContext::component("HomeController").with_attribute("Authorize");
    ctx.should_have_attribute("Authorize")?;

    let err = ctx.should_have_attribute("Route").unwrap_err();
    assert_eq!(
        failure(err),
        AssertionFailure::Attribute(
            "When testing HomeController was expected to have Route, but in fact such \
             was not found."
                .to_string()
        )
    );
    Ok(())
}
