//! Behaviour tests for registration, login and token lifetime.
//!
//! Scenarios drive a live server over in-memory stores so the hasher, the
//! token service and the bearer gate are exercised together.
//
// rstest-bdd generates guard variables with double underscores, which trips
// the non_snake_case lint under -D warnings.
#![allow(non_snake_case)]

// Shared harness has fields used only by the station suite.
#[allow(dead_code)]
#[path = "support/harness.rs"]
mod harness;

use actix_web::http::Method;
use harness::{RequestSpec, SharedWorld, WorldFixture, expect_error, expect_status, perform};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Value, json};

#[fixture]
fn world() -> WorldFixture {
    harness::world()
}

fn register(world: &SharedWorld, payload: Value) {
    perform(
        world,
        RequestSpec {
            method: Method::POST,
            path: "/api/auth/register",
            payload: Some(payload),
            bearer: None,
            label: "register request",
        },
    );
}

fn login(world: &SharedWorld, email: &str, password: &str) {
    perform(
        world,
        RequestSpec {
            method: Method::POST,
            path: "/api/auth/login",
            payload: Some(json!({"email": email, "password": password})),
            bearer: None,
            label: "login request",
        },
    );
}

fn remember_token(world: &SharedWorld) {
    let token = world
        .borrow()
        .last_body
        .as_ref()
        .and_then(|body| body.pointer("/data/token"))
        .and_then(Value::as_str)
        .map(str::to_owned);
    world.borrow_mut().token = token;
}

fn assert_account(world: &SharedWorld, status: u16, email: &str) {
    let body = expect_status(world, status);
    assert_eq!(body.get("success"), Some(&Value::Bool(true)));
    let user = body.pointer("/data/user").expect("user payload");
    assert_eq!(user.get("email").and_then(Value::as_str), Some(email));
    assert!(user.get("id").and_then(Value::as_str).is_some());
    assert!(user.get("password").is_none());
}

#[given("a running station server")]
fn a_running_station_server(world: &WorldFixture) {
    let _ = world;
}

#[given("an account exists for {email} with password {password}")]
fn an_account_exists(world: &WorldFixture, email: String, password: String) {
    let world = world.world();
    register(
        &world,
        json!({"name": "Ada Lovelace", "email": email, "password": password}),
    );
    expect_status(&world, 201);
    remember_token(&world);
}

#[given("one day has passed")]
fn one_day_has_passed(world: &WorldFixture) {
    world.world().borrow().clock.advance_seconds(24 * 60 * 60);
}

#[when("the client registers as {email} with password {password}")]
fn the_client_registers(world: &WorldFixture, email: String, password: String) {
    let world = world.world();
    register(
        &world,
        json!({"name": "Ada Lovelace", "email": email, "password": password}),
    );
    remember_token(&world);
}

#[when("the client registers as {email} without a password")]
fn the_client_registers_without_password(world: &WorldFixture, email: String) {
    register(&world.world(), json!({"name": "Ada Lovelace", "email": email}));
}

#[when("the client logs in as {email} with password {password}")]
fn the_client_logs_in(world: &WorldFixture, email: String, password: String) {
    let world = world.world();
    login(&world, &email, &password);
    remember_token(&world);
}

#[when("the client lists stations with the issued token")]
fn the_client_lists_stations_with_the_issued_token(world: &WorldFixture) {
    let world = world.world();
    let token = world.borrow().token.clone();
    assert!(token.is_some(), "no token was issued");
    perform(
        &world,
        RequestSpec {
            method: Method::GET,
            path: "/api/stations",
            payload: None,
            bearer: token,
            label: "list stations request",
        },
    );
}

#[then("the response is created with the account {email}")]
fn the_response_is_created(world: &WorldFixture, email: String) {
    assert_account(&world.world(), 201, &email);
}

#[then("the response is ok with the account {email}")]
fn the_response_is_ok(world: &WorldFixture, email: String) {
    assert_account(&world.world(), 200, &email);
}

#[then("the response carries a bearer token")]
fn the_response_carries_a_bearer_token(world: &WorldFixture) {
    let token = world.world().borrow().token.clone().expect("token");
    assert_eq!(token.split('.').count(), 3, "expected a compact JWS");
}

#[then("the request fails with status {status} and message {message}")]
fn the_request_fails(world: &WorldFixture, status: u16, message: String) {
    expect_error(&world.world(), status, message.trim_matches('"'));
}

#[then("the station listing is empty")]
fn the_station_listing_is_empty(world: &WorldFixture) {
    let body = expect_status(&world.world(), 200);
    assert_eq!(body.pointer("/data/stations"), Some(&json!([])));
}

#[scenario(path = "tests/features/auth_flow.feature")]
fn auth_flow_scenarios(world: WorldFixture) {
    let _ = world;
}
