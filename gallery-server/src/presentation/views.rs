//! HTML pages for the public website.

use crate::domain::image::Image;

pub struct ImagePage {
    pub image_url: String,
    pub caption: String,
    pub location: String,
    pub date: String,
    pub next_path: Option<String>,
}

impl ImagePage {
    pub fn new(image: &Image, image_base_url: &str, next_path: Option<String>) -> Self {
        Self {
            image_url: format!("{}{}", image_base_url, image.id),
            caption: image.caption.clone().unwrap_or_default(),
            location: image.location.clone().unwrap_or_default(),
            date: image.display_date(),
            next_path,
        }
    }
}

pub struct AdminPage {
    pub image: ImagePage,
    pub previous_path: Option<String>,
    pub next_path: Option<String>,
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape_html(title),
        body
    )
}

fn figure(page: &ImagePage) -> String {
    let mut html = format!(
        "<figure>\n<img src=\"{}\" alt=\"{}\">\n<figcaption>\n",
        escape_html(&page.image_url),
        escape_html(&page.caption)
    );
    for (class, value) in [
        ("caption", &page.caption),
        ("location", &page.location),
        ("date", &page.date),
    ] {
        if !value.is_empty() {
            html.push_str(&format!(
                "<p class=\"{}\">{}</p>\n",
                class,
                escape_html(value)
            ));
        }
    }
    html.push_str("</figcaption>\n</figure>\n");
    html
}

fn link(class: &str, href: &str, text: &str) -> String {
    format!(
        "<a class=\"{}\" href=\"{}\">{}</a>\n",
        class,
        escape_html(href),
        text
    )
}

pub fn render_image_page(page: &ImagePage) -> String {
    let mut body = figure(page);
    if let Some(next) = &page.next_path {
        body.push_str(&link("next", next, "next"));
    }
    layout(&page.caption, &body)
}

pub fn render_admin_page(page: &AdminPage) -> String {
    let mut body = figure(&page.image);
    body.push_str("<nav>\n");
    if let Some(previous) = &page.previous_path {
        body.push_str(&link("previous", previous, "previous"));
    }
    if let Some(next) = &page.next_path {
        body.push_str(&link("next", next, "next"));
    }
    body.push_str("</nav>\n");
    layout("admin", &body)
}

pub fn render_video_page(video_url: Option<&str>) -> String {
    let body = match video_url {
        Some(url) => format!(
            "<video controls src=\"{}\">\n<a href=\"{}\">download</a>\n</video>\n",
            escape_html(url),
            escape_html(url)
        ),
        None => "<p>no video available</p>\n".to_string(),
    };
    layout("video", &body)
}
