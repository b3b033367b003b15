use axum::Router;
use tokio::net::TcpListener;

/// Serve `router` on a random local port and return its base URL.
///
/// The server runs until the test's runtime shuts down.
pub(crate) async fn spawn_backend(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Could not bind fake backend");
    let address = listener.local_addr().expect("Could not get local address");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Fake backend stopped unexpectedly");
    });

    format!("http://{address}")
}

/// A base URL that nothing is listening on.
pub(crate) async fn unused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Could not bind port");
    let address = listener.local_addr().expect("Could not get local address");
    drop(listener);

    format!("http://{address}")
}
