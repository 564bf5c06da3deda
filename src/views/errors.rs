use super::{escape, layout};

pub fn not_found() -> String {
    layout(
        "404 Not Found",
        None,
        "<h1>404</h1>\n<p>Sorry, the page you were looking for could not be found.</p>\n<p><a href=\"/\">Back home</a></p>\n",
    )
}

pub fn server_error() -> String {
    layout(
        "500 Server Error",
        None,
        "<h1>500</h1>\n<p>Something went wrong on our end. Please try again later.</p>\n<p><a href=\"/\">Back home</a></p>\n",
    )
}

pub fn invalid_request(message: &str) -> String {
    layout(
        "Invalid request",
        None,
        &format!(
            "<h1>Invalid request</h1>\n<p>{}</p>\n<p><a href=\"/\">Back home</a></p>\n",
            escape(message)
        ),
    )
}
