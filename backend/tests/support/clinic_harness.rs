//! In-process clinic server shared by behaviour tests.
//!
//! The world owns a current-thread Tokio runtime plus a `LocalSet` because
//! Actix spawns local tasks. Dropping [`ClinicWorldFixture`] stops the server
//! even when a step panics.

use std::cell::RefCell;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Arc;

use actix_web::dev::ServerHandle;
use actix_web::http::Method;
use actix_web::{App, HttpServer, web};
use awc::Client;
use petclinic::Trace;
use petclinic::domain::TRACE_ID_HEADER;
use petclinic::domain::ports::PassthroughDescriptionEnhancer;
use petclinic::domain::{ClinicQueryService, RegistrationService};
use petclinic::inbound::http::configure_api;
use petclinic::inbound::http::state::HttpState;
use petclinic::outbound::persistence::InMemoryClinicStore;
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

pub(crate) struct ClinicWorld {
    runtime: Runtime,
    local: LocalSet,
    base_url: String,
    server: ServerHandle,
    pub(crate) last_status: Option<u16>,
    pub(crate) last_body: Option<Value>,
    pub(crate) last_trace_id: Option<String>,
    pub(crate) owner_id: Option<String>,
    pub(crate) pet_identifier: Option<String>,
    pub(crate) visit_id: Option<String>,
}

pub(crate) type SharedWorld = Rc<RefCell<ClinicWorld>>;

pub(crate) struct ClinicWorldFixture {
    world: SharedWorld,
}

impl ClinicWorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for ClinicWorldFixture {
    fn drop(&mut self) {
        let ctx = self.world.borrow();
        let server = ctx.server.clone();
        ctx.local.block_on(&ctx.runtime, async move {
            server.stop(true).await;
        });
    }
}

fn memory_state() -> HttpState {
    let store = Arc::new(InMemoryClinicStore::new());
    let registration = RegistrationService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        Arc::new(PassthroughDescriptionEnhancer),
    );
    let query = ClinicQueryService::new(store.clone(), store.clone(), store);
    HttpState::new(Arc::new(registration), Arc::new(query))
}

async fn spawn_clinic_server(state: HttpState) -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;
    let data = web::Data::new(state);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(Trace)
            .service(web::scope("/api/v1").configure(configure_api))
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

/// Start a server over a fresh in-memory store.
pub(crate) fn world() -> ClinicWorldFixture {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let local = LocalSet::new();
    let (base_url, server) = local
        .block_on(&runtime, spawn_clinic_server(memory_state()))
        .expect("clinic server starts");

    ClinicWorldFixture {
        world: Rc::new(RefCell::new(ClinicWorld {
            runtime,
            local,
            base_url,
            server,
            last_status: None,
            last_body: None,
            last_trace_id: None,
            owner_id: None,
            pet_identifier: None,
            visit_id: None,
        })),
    }
}

struct CapturedResponse {
    status: u16,
    trace_id: Option<String>,
    body: Value,
}

/// Send a request, record status, trace id and JSON body on the world, and
/// return the body.
pub(crate) fn send(
    world: &ClinicWorldFixture,
    method: Method,
    path: &str,
    payload: Option<Value>,
) -> Value {
    let shared = world.world();
    let captured = {
        let ctx = shared.borrow();
        let url = format!("{}{path}", ctx.base_url);
        ctx.local.block_on(&ctx.runtime, async move {
            let request = Client::default().request(method, url);
            let mut response = match payload {
                Some(payload) => request.send_json(&payload).await.expect("json request"),
                None => request.send().await.expect("request"),
            };
            let status = response.status().as_u16();
            let trace_id = response
                .headers()
                .get(TRACE_ID_HEADER)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned);
            let body = response.body().await.expect("body");
            CapturedResponse {
                status,
                trace_id,
                body: serde_json::from_slice(&body).expect("json body"),
            }
        })
    };

    let mut ctx = shared.borrow_mut();
    ctx.last_status = Some(captured.status);
    ctx.last_trace_id = captured.trace_id;
    ctx.last_body = Some(captured.body.clone());
    captured.body
}
