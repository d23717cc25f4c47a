/// Picks a `Content-Type` from a path's file extension.
pub fn content_type_for(path: &str) -> &'static str {
    let Some(dot) = path.rfind('.') else {
        return "application/octet-stream";
    };

    match &path[dot..] {
        ".html" | ".htm" => "text/html",
        ".css" => "text/css",
        ".js" => "application/javascript",
        ".json" => "application/json",
        ".txt" => "text/plain",
        ".png" => "image/png",
        ".jpg" | ".jpeg" => "image/jpeg",
        ".gif" => "image/gif",
        ".svg" => "image/svg+xml",
        ".pdf" => "application/pdf",
        ".zip" => "application/zip",
        _ => "application/octet-stream",
    }
}
