#![allow(dead_code)]

use fantoccini::error::NewSessionError;
use fantoccini::Client;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use storefront_pages::{Browser, Config};
use tokio::net::TcpListener;
use url::Url;

/// Connects a client for the given browser backend through the crate's own
/// session bootstrap.
pub async fn select_client_type(s: &str) -> Result<Client, NewSessionError> {
    let mut config = Config::default();
    match s {
        "firefox" => {
            config.browser = Browser::Firefox;
        }
        "chrome" => {
            config.browser = Browser::Chrome;
            config.webdriver_url = "http://localhost:9515".to_string();
        }
        browser => unimplemented!("unsupported browser backend {}", browser),
    }
    config.session().await
}

/// Base URL of the fixture storefront bound to `port`.
pub fn storefront_base(port: u16) -> Url {
    Url::parse(&format!("http://localhost:{}/", port)).expect("fixture base url")
}

pub fn handle_test_error<E: std::fmt::Debug>(
    res: Result<Result<(), E>, Box<dyn std::any::Any + Send>>,
) -> bool {
    match res {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            eprintln!("test future failed to resolve: {:?}", e);
            false
        }
        Err(_) => {
            eprintln!("test future panicked; an assertion probably failed");
            false
        }
    }
}

/// Sets up the fixture server and returns the port it bound to.
pub fn setup_server() -> u16 {
    let (tx, rx) = std::sync::mpsc::channel();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
                .await
                .unwrap();
            tx.send(listener.local_addr().unwrap().port()).unwrap();
            loop {
                let (stream, _) = listener.accept().await.unwrap();
                tokio::spawn(async move {
                    let _ = http1::Builder::new()
                        .serve_connection(TokioIo::new(stream), service_fn(serve_fixture))
                        .await;
                });
            }
        });
    });

    rx.recv().expect("to get the bound port")
}

/// Serves the static fixtures under `tests/test_html/`.
///
/// Every listing route resolves to the same fixture document, whatever its
/// parameters; the page objects only care about the rendered DOM.
async fn serve_fixture(
    req: Request<hyper::body::Incoming>,
) -> Result<Response<Full<Bytes>>, std::convert::Infallible> {
    let path = req.uri().path();
    let file = if path.starts_with("/listing/index/") {
        "listing.html"
    } else {
        path.trim_start_matches('/')
    };

    match tokio::fs::read(format!("tests/test_html/{}", file)).await {
        Ok(contents) => Ok(Response::builder()
            .header("Content-Type", "text/html; charset=utf-8")
            .body(Full::new(Bytes::from(contents)))
            .unwrap()),
        Err(_) => Ok(Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body(Full::new(Bytes::new()))
            .unwrap()),
    }
}

#[macro_export]
macro_rules! local_tester {
    // The ident should point to an async function taking a client and a port.
    ($f:ident, $endpoint:expr) => {{
        let port: u16 = common::setup_server();

        // run the scenario on its own runtime and thread to catch panics
        let res = std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            let client = rt
                .block_on(common::select_client_type($endpoint))
                .expect("failed to construct test client");
            let x = rt.block_on($f(client, port));
            drop(rt);
            x
        })
        .join();

        let success = common::handle_test_error(res);
        assert!(success);
    }};
}
