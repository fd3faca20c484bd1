use axum::http::Uri;
use axum::response::Html;

use crate::interfaces::http::common::ApiError;

const WELCOME_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Hello World</title>
    <style>
        body {
            font-family: Arial, sans-serif;
            max-width: 600px;
            margin: 100px auto;
            text-align: center;
            background-color: #f5f5f5;
        }
        .container {
            background-color: white;
            padding: 40px;
            border-radius: 10px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        h1 { color: #333; margin-bottom: 20px; }
        p { color: #666; font-size: 18px; }
    </style>
</head>
<body>
    <div class="container">
        <h1>Hello! Welcome to your container test app</h1>
        <p>Your simple container test application is running successfully!</p>
        <p>Perfect for GitHub deployment and container hosting tests.</p>
    </div>
</body>
</html>
"#;

#[utoipa::path(
    get,
    path = "/",
    tag = "Pages",
    responses(
        (status = 200, description = "Welcome page", content_type = "text/html", body = String)
    )
)]
pub async fn welcome() -> Html<&'static str> {
    Html(WELCOME_PAGE)
}

/// JSON 404 for every unmatched route.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}
