use std::sync::Arc;

use tokio::net::TcpStream;
use tracing::{debug, warn};

use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::http::{parser, reader};
use crate::server::dispatcher::Dispatcher;

const SERVER_NAME: &str = "porter/0.1";

/// Handles a single client connection: one request, one response, close.
///
/// Keep-alive is deliberately unsupported; the connection is dropped after
/// the response is written, and the next request has to open a new one.
pub struct Connection {
    stream: TcpStream,
    dispatcher: Arc<Dispatcher>,
}

impl Connection {
    pub fn new(stream: TcpStream, dispatcher: Arc<Dispatcher>) -> Self {
        Self { stream, dispatcher }
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        let raw = reader::read_message(&mut self.stream).await?;

        if raw.is_empty() {
            // Client went away before sending anything.
            return Ok(());
        }

        let response = match parser::parse_request(&raw) {
            Ok(request) => {
                debug!(method = %request.method, path = %request.path, "parsed request");

                let mut response = Response::new();
                response.set_header("Server", SERVER_NAME);
                self.dispatcher.handle(&request, &mut response).await;
                response
            }

            Err(e) => {
                warn!(error = ?e, "failed to parse request");
                Response::html(400, "<html><body><h1>400 Bad Request</h1></body></html>")
            }
        };

        ResponseWriter::new(&response)
            .write_to_stream(&mut self.stream)
            .await?;

        Ok(())
    }
}
