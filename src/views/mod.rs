//! HTML rendering for every page the directory serves.

pub mod errors;
pub mod forms;
pub mod pages;

use std::fmt::Write;

use crate::flash::{FlashLevel, FlashMessage};

/// Escapes text for use in element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wraps a page body in the shared chrome: navigation, search boxes and flash.
pub fn layout(title: &str, flash: Option<&FlashMessage>, body: &str) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} | Fyyur</title>
</head>
<body>
<nav>
<a href="/">Fyyur</a>
<a href="/venues">Venues</a>
<a href="/artists">Artists</a>
<a href="/shows">Shows</a>
<form method="post" action="/venues/search" class="search"><input type="search" name="search_term" placeholder="Find a venue"></form>
<form method="post" action="/artists/search" class="search"><input type="search" name="search_term" placeholder="Find an artist"></form>
</nav>
"#,
        title = escape(title),
    );

    if let Some(flash) = flash {
        let class = match flash.level {
            FlashLevel::Success => "flash success",
            FlashLevel::Error => "flash error",
        };
        let _ = writeln!(html, r#"<div class="{class}" role="status">{}</div>"#, escape(&flash.message));
    }

    html.push_str("<main>\n");
    html.push_str(body);
    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn genre_list(genres: &[String]) -> String {
    let mut out = String::from(r#"<ul class="genres">"#);
    for genre in genres {
        let _ = write!(out, "<li>{}</li>", escape(genre));
    }
    out.push_str("</ul>");
    out
}

fn optional_link(label: &str, href: Option<&str>) -> String {
    match href {
        Some(href) if !href.is_empty() => {
            format!(r#"<p><a href="{0}">{1}</a></p>"#, escape(href), escape(label))
        }
        _ => String::new(),
    }
}
