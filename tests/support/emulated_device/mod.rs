use http::StatusCode;
use serde_json::{json, Value};
use warp::{filters::BoxedFilter, path::Tail, Filter, Rejection, Reply};

use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// How the emulated device answers requests it is authorized to serve
#[derive(Debug, Clone, Copy)]
pub enum Behaviour {
    Normal,
    /// Answer writes with `{"alert": "error"}`
    RejectWrites,
    /// Wait before answering anything
    Stall(Duration),
    /// Answer everything with a 500
    ServerError,
}

/// Emulated device which tests will connect to
#[derive(Debug, Clone)]
pub struct EmulatedDevice {
    inner: Arc<EmulatedDeviceRef>,
}

#[derive(Debug)]
struct EmulatedDeviceRef {
    username: String,
    password: String,
    behaviour: Behaviour,
    enabled: RwLock<bool>,
    last_put: RwLock<Option<(HashMap<String, String>, Value)>>,
    put_count: AtomicUsize,
    addr: RwLock<Option<SocketAddr>>,
}

impl EmulatedDevice {
    pub fn build(username: String, password: String, behaviour: Behaviour, enabled: bool) -> Self {
        Self {
            inner: Arc::new(EmulatedDeviceRef {
                username,
                password,
                behaviour,
                enabled: RwLock::new(enabled),
                last_put: RwLock::new(None),
                put_count: AtomicUsize::new(0),
                addr: RwLock::new(None),
            }),
        }
    }

    /// Start the API server on an ephemeral local port
    pub fn serve(&self) -> SocketAddr {
        let (addr, server) = warp::serve(self.api()).bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(server);
        log::info!(target: "test::emulated_device::serve", "Starting API server on {}", addr);

        *self.inner.addr.write().unwrap() = Some(addr);
        addr
    }

    pub fn addr(&self) -> SocketAddr {
        self.inner.addr.read().unwrap().expect("device is not serving")
    }

    pub fn username(&self) -> String {
        self.inner.username.clone()
    }

    pub fn password(&self) -> String {
        self.inner.password.clone()
    }

    pub fn enabled(&self) -> bool {
        *self.inner.enabled.read().unwrap()
    }

    pub fn put_count(&self) -> usize {
        self.inner.put_count.load(Ordering::SeqCst)
    }

    /// Query and JSON body of the last authorized PUT
    pub fn last_put(&self) -> Option<(HashMap<String, String>, Value)> {
        self.inner.last_put.read().unwrap().clone()
    }

    fn api(&self) -> BoxedFilter<(impl Reply,)> {
        self.read()
            .or(self.write())
            .unify()
            .with(warp::log("test::emulated_device::api"))
            .boxed()
    }

    fn read(&self) -> BoxedFilter<(warp::reply::Response,)> {
        warp::get()
            .and(api_path())
            .and(warp::header::optional::<String>("authorization"))
            .and_then({
                let device = self.clone();
                move |tail: Tail, auth: Option<String>| {
                    let device = device.clone();
                    async move { Ok::<_, Infallible>(device.handle_read(tail.as_str(), auth).await) }
                }
            })
            .boxed()
    }

    fn write(&self) -> BoxedFilter<(warp::reply::Response,)> {
        warp::put()
            .and(api_path())
            .and(warp::header::optional::<String>("authorization"))
            .and(warp::query::<HashMap<String, String>>())
            .and(warp::body::json::<Value>())
            .and_then({
                let device = self.clone();
                move |tail: Tail, auth: Option<String>, query: HashMap<String, String>, body: Value| {
                    let device = device.clone();
                    async move {
                        Ok::<_, Infallible>(
                            device.handle_write(tail.as_str(), auth, query, body).await,
                        )
                    }
                }
            })
            .boxed()
    }

    async fn handle_read(&self, path: &str, auth: Option<String>) -> warp::reply::Response {
        if let Some(res) = self.precheck(auth).await {
            return res;
        }

        let enabled = self.enabled();
        match path.trim_end_matches('/') {
            "enabled" => enabled.to_string().into_response(),
            "" => warp::reply::json(&json!({ "enabled": enabled, "port": 5004 })).into_response(),
            _ => not_found(),
        }
    }

    async fn handle_write(
        &self,
        path: &str,
        auth: Option<String>,
        query: HashMap<String, String>,
        body: Value,
    ) -> warp::reply::Response {
        if let Some(res) = self.precheck(auth).await {
            return res;
        }
        self.inner.put_count.fetch_add(1, Ordering::SeqCst);

        if path.trim_end_matches('/') != "enabled" {
            return not_found();
        }
        *self.inner.last_put.write().unwrap() = Some((query.clone(), body.clone()));

        if let Behaviour::RejectWrites = self.inner.behaviour {
            return warp::reply::json(&json!({ "alert": "error", "message": "locked" }))
                .into_response();
        }

        let from_query = query.get("enabled").map(|v| v == "true");
        let from_body = body["enabled"].as_bool();
        match (from_query, from_body) {
            (Some(q), Some(b)) if q == b => {
                *self.inner.enabled.write().unwrap() = b;
                warp::reply::json(&json!({ "alert": "success" })).into_response()
            }
            _ => warp::reply::with_status("Bad Request", StatusCode::BAD_REQUEST).into_response(),
        }
    }

    /// Auth and misbehaviour shared by every request
    async fn precheck(&self, auth: Option<String>) -> Option<warp::reply::Response> {
        let expected = format!(
            "Basic {}",
            base64::encode(format!("{}:{}", self.inner.username, self.inner.password))
        );
        if auth.as_deref() != Some(expected.as_str()) {
            return Some(
                warp::reply::with_status("Unauthorized", StatusCode::UNAUTHORIZED).into_response(),
            );
        }

        match self.inner.behaviour {
            Behaviour::Stall(delay) => {
                tokio::time::sleep(delay).await;
                None
            }
            Behaviour::ServerError => Some(
                warp::reply::with_status("internal error", StatusCode::INTERNAL_SERVER_ERROR)
                    .into_response(),
            ),
            _ => None,
        }
    }
}

fn api_path() -> impl Filter<Extract = (Tail,), Error = Rejection> + Clone {
    warp::path!("api" / "streaming" / "qstreamcfg" / "udp" / ..).and(warp::path::tail())
}

fn not_found() -> warp::reply::Response {
    warp::reply::with_status("Not Found", StatusCode::NOT_FOUND).into_response()
}
