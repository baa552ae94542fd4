use axum::http::StatusCode;
use axum::response::Html;

use super::ApiSuccess;
use super::MessageData;

const GREETING: &str = "Hello world!";

pub async fn root() -> ApiSuccess<MessageData> {
    ApiSuccess::new(StatusCode::OK, MessageData::new(GREETING))
}

/// The same greeting as a bare HTML page, outside the JSON envelope.
pub async fn root_html() -> Html<String> {
    Html(format!(
        "<html>\n  <body>\n    <h1>{}</h1>\n  </body>\n</html>\n",
        GREETING
    ))
}
