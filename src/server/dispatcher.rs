//! Routes parsed requests to handlers.
//!
//! The dispatcher owns everything the parsing core treats as external:
//! routing, the session table, and filesystem access (static files under
//! `www_root`, uploaded files under `uploads_root`).

use std::path::PathBuf;
use std::sync::Arc;

use tokio::io::AsyncWriteExt;
use tracing::{error, info, warn};

use crate::config::StaticFilesConfig;
use crate::http::cookie::Cookie;
use crate::http::form;
use crate::http::mime;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::session::SessionStore;

/// How long login cookies live, in seconds.
const SESSION_MAX_AGE: i64 = 3600;

pub struct Dispatcher {
    www_root: PathBuf,
    uploads_root: PathBuf,
    sessions: Arc<SessionStore>,
}

/// Rejects request paths that could escape the served directories: any
/// `..`, its percent-encoded spelling, or a path not rooted at `/`.
pub fn is_path_safe(path: &str) -> bool {
    if path.contains("..") {
        return false;
    }
    if path.to_ascii_lowercase().contains("%2e%2e") {
        return false;
    }
    path.starts_with('/')
}

/// Reduces a client-supplied filename to its final component. The declared
/// filename is attacker-controlled and must never be trusted as a path.
/// Returns `None` when nothing usable remains.
pub fn sanitize_filename(filename: &str) -> Option<String> {
    let name = filename.rsplit(['/', '\\']).next().unwrap_or("").trim();

    if name.is_empty() || name == "." || name == ".." {
        return None;
    }

    Some(name.to_string())
}

impl Dispatcher {
    pub fn new(static_files: &StaticFilesConfig, sessions: Arc<SessionStore>) -> Self {
        // Make sure the uploads directory exists up front, as the original
        // deployment expects; failure surfaces later as 500s on upload.
        if let Err(e) = std::fs::create_dir_all(&static_files.uploads_root) {
            warn!(dir = %static_files.uploads_root.display(), error = %e,
                "could not create uploads directory");
        }

        Self {
            www_root: static_files.www_root.clone(),
            uploads_root: static_files.uploads_root.clone(),
            sessions,
        }
    }

    pub async fn handle(&self, request: &Request, response: &mut Response) {
        let path = request.decoded_path();

        info!(method = %request.method, path = %path, "handling request");

        if !is_path_safe(&path) {
            warn!(path = %request.path, "blocked path traversal attempt");
            html(
                response,
                403,
                "<html><body><h1>403 Forbidden</h1>\
                 <p>Path traversal attempt detected.</p></body></html>"
                    .to_string(),
            );
            return;
        }

        match request.method.as_str() {
            "GET" | "HEAD" => self.handle_get(request, &path, response).await,
            "POST" => self.handle_post(request, &path, response).await,
            "DELETE" => self.handle_delete(&path, response).await,
            method => {
                html(
                    response,
                    501,
                    format!(
                        "<html><body><h1>501 Not Implemented</h1>\
                         <p>Method {method} is not supported.</p></body></html>"
                    ),
                );
            }
        }
    }

    async fn handle_get(&self, request: &Request, path: &str, response: &mut Response) {
        match path {
            "/dashboard" => return self.handle_dashboard(request, response),
            "/logout" => return self.handle_logout(request, response),
            "/uploads" => return self.handle_list_uploads(response).await,
            _ => {}
        }

        let path = if path == "/" { "/index.html" } else { path };

        // Uploaded files are linked under /uploads/ and live outside www_root.
        let file_path = if let Some(name) = path.strip_prefix("/uploads/") {
            self.uploads_root.join(name)
        } else {
            self.www_root.join(path.trim_start_matches('/'))
        };

        let is_file = tokio::fs::metadata(&file_path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false);

        if !is_file {
            info!(file = %file_path.display(), "file not found");
            html(
                response,
                404,
                format!(
                    "<html><body><h1>404 Not Found</h1>\
                     <p>The requested resource {path} was not found.</p></body></html>"
                ),
            );
            return;
        }

        match tokio::fs::read(&file_path).await {
            Ok(content) => {
                info!(file = %file_path.display(), bytes = content.len(), "served file");
                response.set_status(200);
                response.set_header("Content-Type", mime::content_type_for(path));
                response.set_body(content);
            }
            Err(e) => {
                error!(file = %file_path.display(), error = %e, "failed to read file");
                html(
                    response,
                    500,
                    "<html><body><h1>500 Internal Server Error</h1>\
                     <p>Failed to read file.</p></body></html>"
                        .to_string(),
                );
            }
        }
    }

    async fn handle_post(&self, request: &Request, path: &str, response: &mut Response) {
        match path {
            "/login" => self.handle_login(request, response),
            "/submit" => self.handle_submit(request, response).await,
            "/upload" => self.handle_upload(request, response).await,
            _ => {
                html(
                    response,
                    404,
                    format!(
                        "<html><body><h1>404 Not Found</h1>\
                         <p>POST endpoint {path} not found.</p>\
                         <p><a href='/'>Back to Home</a></p></body></html>"
                    ),
                );
            }
        }
    }

    fn handle_login(&self, request: &Request, response: &mut Response) {
        let form_data = form::parse_urlencoded(&request.body);

        let username = form_data.get("username").cloned().unwrap_or_default();
        let password = form_data.get("password").cloned().unwrap_or_default();

        if username.is_empty() || password.is_empty() {
            html(
                response,
                400,
                "<html><body><h1>400 Bad Request</h1>\
                 <p>Username and password required.</p>\
                 <p><a href='/login.html'>Try Again</a></p></body></html>"
                    .to_string(),
            );
            return;
        }

        let session_id = SessionStore::generate_id();
        self.sessions.insert(session_id.clone(), username.clone());

        info!(user = %username, active_sessions = self.sessions.len(), "login successful");

        response.set_cookie(
            Cookie::new("session_id", &session_id)
                .max_age(SESSION_MAX_AGE)
                .path("/"),
        );
        response.set_cookie(
            Cookie::new("username", &username)
                .max_age(SESSION_MAX_AGE)
                .path("/"),
        );

        redirect(response, "/dashboard", "Redirecting to dashboard...");
    }

    fn handle_dashboard(&self, request: &Request, response: &mut Response) {
        let session_id = request.cookie("session_id").unwrap_or_default();
        let username = self.sessions.username(&session_id);

        let Some(username) = username else {
            info!("dashboard access without a valid session");
            redirect(response, "/login.html", "Please login first...");
            return;
        };

        let body = format!(
            "<!DOCTYPE html><html><head><title>Dashboard</title></head><body>\
             <h1>Welcome, {username}!</h1>\
             <p>You are successfully logged in.</p>\
             <h2>Session Information</h2>\
             <ul>\
             <li><strong>Username:</strong> {username}</li>\
             <li><strong>Session ID:</strong> {session_id}</li>\
             <li><strong>Active Sessions:</strong> {}</li>\
             </ul>\
             <p><a href='/logout'>Logout</a> | <a href='/'>Back to Home</a></p>\
             </body></html>",
            self.sessions.len()
        );

        html(response, 200, body);
    }

    fn handle_logout(&self, request: &Request, response: &mut Response) {
        if let Some(session_id) = request.cookie("session_id") {
            if self.sessions.remove(&session_id) {
                info!(session = %session_id, "logged out");
            }
        }

        // Max-Age=0 tells the client to drop both cookies.
        response.set_cookie(Cookie::new("session_id", "").max_age(0).path("/"));
        response.set_cookie(Cookie::new("username", "").max_age(0).path("/"));

        redirect(response, "/", "Logging out...");
    }

    async fn handle_submit(&self, request: &Request, response: &mut Response) {
        let form_data = form::parse_urlencoded(&request.body);

        if form_data.is_empty() {
            warn!("form submission carried no decodable fields");
            html(
                response,
                400,
                "<!DOCTYPE html><html><head><title>Error</title></head><body>\
                 <h1>400 Bad Request</h1>\
                 <p>No form data received.</p>\
                 <p><a href='/form.html'>Try Again</a></p></body></html>"
                    .to_string(),
            );
            return;
        }

        let mut fields: Vec<(&String, &String)> = form_data.iter().collect();
        fields.sort();

        let mut record = String::from("NEW SUBMISSION:\n");
        for (name, value) in &fields {
            record.push_str(&format!("{name}: {value}\n"));
        }
        record.push('\n');

        let log_path = self.uploads_root.join("submissions.txt");
        if let Err(e) = append_to_file(&log_path, record.as_bytes()).await {
            error!(file = %log_path.display(), error = %e, "could not save submission");
            html(
                response,
                500,
                "<!DOCTYPE html><html><head><title>Error</title></head><body>\
                 <h1>500 Internal Server Error</h1>\
                 <p>Could not save submission.</p></body></html>"
                    .to_string(),
            );
            return;
        }

        info!(file = %log_path.display(), fields = fields.len(), "form data saved");

        let mut body = String::from(
            "<!DOCTYPE html><html><head><title>Success</title></head><body>\
             <h1>Form Submitted Successfully!</h1>\
             <h2>Received Data:</h2><ul>",
        );
        for (name, value) in &fields {
            body.push_str(&format!("<li><strong>{name}:</strong> {value}</li>"));
        }
        body.push_str(
            "</ul><p><a href='/form.html'>Submit Another</a> | \
             <a href='/'>Back to Home</a></p></body></html>",
        );

        html(response, 200, body);
    }

    async fn handle_upload(&self, request: &Request, response: &mut Response) {
        let content_type = request.header("content-type").unwrap_or_default();
        let data = form::parse_multipart(content_type, &request.body);

        if data.files.is_empty() {
            warn!("upload request carried no files");
            html(
                response,
                400,
                "<html><body><h1>400 Bad Request</h1>\
                 <p>No files received.</p>\
                 <p><a href='/upload.html'>Try Again</a></p></body></html>"
                    .to_string(),
            );
            return;
        }

        let mut stored = Vec::new();

        for file in &data.files {
            let Some(name) = sanitize_filename(&file.filename) else {
                warn!(filename = %file.filename, "rejected unusable upload filename");
                continue;
            };

            let dest = self.uploads_root.join(&name);
            match tokio::fs::write(&dest, &file.content).await {
                Ok(()) => {
                    info!(file = %dest.display(), bytes = file.content.len(),
                        content_type = %file.content_type, "stored upload");
                    stored.push(name);
                }
                Err(e) => {
                    error!(file = %dest.display(), error = %e, "failed to store upload");
                    html(
                        response,
                        500,
                        "<html><body><h1>500 Internal Server Error</h1>\
                         <p>Failed to store upload.</p></body></html>"
                            .to_string(),
                    );
                    return;
                }
            }
        }

        if stored.is_empty() {
            html(
                response,
                400,
                "<html><body><h1>400 Bad Request</h1>\
                 <p>No usable filenames in upload.</p></body></html>"
                    .to_string(),
            );
            return;
        }

        let mut body = String::from(
            "<html><body><h1>Upload Complete</h1><ul>",
        );
        for name in &stored {
            body.push_str(&format!(
                "<li><a href='/uploads/{}'>{name}</a></li>",
                form::url_encode(name.as_bytes())
            ));
        }
        body.push_str(
            "</ul><p><a href='/uploads'>All Uploads</a> | \
             <a href='/'>Back to Home</a></p></body></html>",
        );

        html(response, 201, body);
    }

    async fn handle_list_uploads(&self, response: &mut Response) {
        let mut dir = match tokio::fs::read_dir(&self.uploads_root).await {
            Ok(dir) => dir,
            Err(e) => {
                error!(dir = %self.uploads_root.display(), error = %e,
                    "could not read uploads directory");
                html(
                    response,
                    500,
                    "<html><body><h1>500 Internal Server Error</h1>\
                     <p>Could not read uploads directory.</p></body></html>"
                        .to_string(),
                );
                return;
            }
        };

        let mut names = Vec::new();
        while let Ok(Some(entry)) = dir.next_entry().await {
            let is_file = entry
                .file_type()
                .await
                .map(|t| t.is_file())
                .unwrap_or(false);
            if is_file {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();

        let mut body = String::from(
            "<!DOCTYPE html><html><head><title>Uploads</title></head><body>\
             <h1>Uploaded Files</h1><ul>",
        );
        if names.is_empty() {
            body.push_str("<li>(no files yet)</li>");
        }
        for name in &names {
            body.push_str(&format!(
                "<li><a href='/uploads/{}'>{name}</a></li>",
                form::url_encode(name.as_bytes())
            ));
        }
        body.push_str("</ul><p><a href='/'>Back to Home</a></p></body></html>");

        html(response, 200, body);
    }

    async fn handle_delete(&self, path: &str, response: &mut Response) {
        let Some(name) = path.strip_prefix("/uploads/") else {
            warn!(%path, "delete outside uploads directory denied");
            html(
                response,
                403,
                format!(
                    "<html><body><h1>403 Forbidden</h1>\
                     <p>Can only delete files from /uploads/ directory.</p>\
                     <p>Attempted to delete: {path}</p></body></html>"
                ),
            );
            return;
        };

        let file_path = match sanitize_filename(name) {
            Some(name) => self.uploads_root.join(name),
            None => {
                html(
                    response,
                    404,
                    format!(
                        "<html><body><h1>404 Not Found</h1>\
                         <p>File not found: {path}</p></body></html>"
                    ),
                );
                return;
            }
        };

        let is_file = tokio::fs::metadata(&file_path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false);

        if !is_file {
            info!(file = %file_path.display(), "delete target not found");
            html(
                response,
                404,
                format!(
                    "<html><body><h1>404 Not Found</h1>\
                     <p>File not found: {path}</p></body></html>"
                ),
            );
            return;
        }

        match tokio::fs::remove_file(&file_path).await {
            Ok(()) => {
                info!(file = %file_path.display(), "file deleted");
                html(
                    response,
                    200,
                    format!(
                        "<html><body><h1>File Deleted</h1>\
                         <p>Successfully deleted: {path}</p>\
                         <p><a href='/'>Back to Home</a></p></body></html>"
                    ),
                );
            }
            Err(e) => {
                error!(file = %file_path.display(), error = %e, "failed to delete file");
                html(
                    response,
                    500,
                    format!(
                        "<html><body><h1>500 Internal Server Error</h1>\
                         <p>Failed to delete file: {path}</p></body></html>"
                    ),
                );
            }
        }
    }
}

fn html(response: &mut Response, status: u16, body: String) {
    response.set_status(status);
    response.set_header("Content-Type", "text/html");
    response.set_body(body.into_bytes());
}

fn redirect(response: &mut Response, location: &str, body: &str) {
    response.set_status(302);
    response.set_header("Location", location);
    response.set_header("Content-Type", "text/html");
    response.set_body(format!("<html><body>{body}</body></html>").into_bytes());
}

async fn append_to_file(path: &std::path::Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    file.write_all(data).await?;
    file.flush().await
}
