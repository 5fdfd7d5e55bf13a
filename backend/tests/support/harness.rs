//! Live-server harness shared by the HTTP behaviour suites.
//!
//! The harness owns a single-threaded Tokio runtime plus a `LocalSet` because
//! Actix uses `spawn_local` internally. Dropping the `WorldFixture` stops the
//! server even when a step panics.

use std::cell::RefCell;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Arc;

use actix_web::dev::ServerHandle;
use actix_web::http::Method;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, HttpServer, web};
use awc::Client;
use chrono::{TimeZone, Utc};
use evstations::Trace;
use evstations::domain::{AuthenticationService, StationService, TRACE_ID_HEADER};
use evstations::inbound::http::configure_api;
use evstations::inbound::http::state::HttpState;
use evstations::outbound::crypto::{BcryptPasswordHasher, JwtTokenService};
use evstations::outbound::memory::{InMemoryStationRepository, InMemoryUserRepository};
use evstations::test_support::MutableClock;
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

const SIGNING_SECRET: &[u8] = b"behaviour-suite-secret-0123456789";
const FAST_BCRYPT_COST: u32 = 4;

pub(crate) struct HttpWorld {
    pub(crate) runtime: Runtime,
    pub(crate) local: LocalSet,
    pub(crate) base_url: String,
    pub(crate) server: ServerHandle,
    pub(crate) clock: Arc<MutableClock>,
    pub(crate) token: Option<String>,
    pub(crate) station_id: Option<String>,
    pub(crate) last_status: Option<u16>,
    pub(crate) last_body: Option<Value>,
    pub(crate) last_trace_id: Option<String>,
}

pub(crate) type SharedWorld = Rc<RefCell<HttpWorld>>;

pub(crate) struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        // `LocalSet` must be driven on the thread that owns it.
        let ctx = self.world.borrow();
        let server = ctx.server.clone();
        ctx.local.block_on(&ctx.runtime, async move {
            server.stop(true).await;
        });
    }
}

fn build_state(clock: Arc<MutableClock>) -> HttpState {
    let tokens = Arc::new(JwtTokenService::new(SIGNING_SECRET, clock.clone()));
    let auth = AuthenticationService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(BcryptPasswordHasher::new(FAST_BCRYPT_COST)),
        tokens.clone(),
    );
    let stations = Arc::new(StationService::new(
        Arc::new(InMemoryStationRepository::new()),
        clock,
    ));
    HttpState::new(Arc::new(auth), stations.clone(), stations, tokens)
}

async fn spawn_server(state: HttpState) -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;
    let data = web::Data::new(state);

    let server = HttpServer::new(move || {
        let data = data.clone();
        App::new()
            .wrap(Trace)
            .configure(move |cfg| configure_api(cfg, data))
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);

    Ok((format!("http://{addr}"), handle))
}

pub(crate) fn world() -> WorldFixture {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let local = LocalSet::new();
    let start = Utc
        .with_ymd_and_hms(2025, 6, 1, 9, 0, 0)
        .single()
        .expect("fixture instant");
    let clock = Arc::new(MutableClock::new(start));

    let (base_url, server) = local
        .block_on(&runtime, spawn_server(build_state(clock.clone())))
        .expect("spawn server");

    WorldFixture {
        world: Rc::new(RefCell::new(HttpWorld {
            runtime,
            local,
            base_url,
            server,
            clock,
            token: None,
            station_id: None,
            last_status: None,
            last_body: None,
            last_trace_id: None,
        })),
    }
}

/// One request issued by a step.
pub(crate) struct RequestSpec<'a> {
    pub(crate) method: Method,
    pub(crate) path: &'a str,
    pub(crate) payload: Option<Value>,
    pub(crate) bearer: Option<String>,
    pub(crate) label: &'a str,
}

/// Send a request against the running server and record the outcome.
pub(crate) fn perform(world: &SharedWorld, spec: RequestSpec<'_>) {
    let RequestSpec {
        method,
        path,
        payload,
        bearer,
        label,
    } = spec;
    let (status, trace_id, body) = {
        let ctx = world.borrow();
        let url = format!("{}{path}", ctx.base_url);
        ctx.local.block_on(&ctx.runtime, async move {
            let mut request = Client::default().request(method, url);
            if let Some(token) = bearer {
                request = request.insert_header((AUTHORIZATION, format!("Bearer {token}")));
            }
            let mut response = match payload {
                Some(payload) => request.send_json(&payload).await.expect(label),
                None => request.send().await.expect(label),
            };
            let status = response.status().as_u16();
            let trace_id = response
                .headers()
                .get(TRACE_ID_HEADER)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned);
            let body = response.body().await.expect(label);
            let json: Value = serde_json::from_slice(&body).expect(label);
            (status, trace_id, json)
        })
    };

    let mut ctx = world.borrow_mut();
    ctx.last_status = Some(status);
    ctx.last_trace_id = trace_id;
    ctx.last_body = Some(body);
}

/// Assert the last response status and return a copy of its body.
pub(crate) fn expect_status(world: &SharedWorld, status: u16) -> Value {
    let ctx = world.borrow();
    assert_eq!(ctx.last_status, Some(status), "body: {:?}", ctx.last_body);
    ctx.last_body.clone().expect("response body")
}

/// Assert the last response is an error envelope with the given message.
pub(crate) fn expect_error(world: &SharedWorld, status: u16, message: &str) {
    let body = expect_status(world, status);
    assert_eq!(body.get("success"), Some(&Value::Bool(false)));
    assert_eq!(body.get("message").and_then(Value::as_str), Some(message));
    let ctx = world.borrow();
    let trace_id = ctx.last_trace_id.as_deref().expect("trace id header");
    assert_eq!(body.get("traceId").and_then(Value::as_str), Some(trace_id));
}
