use chrono::Datelike as _;
use url::Url;

use crate::block::{
    Alignment, BlockContent, ButtonAction, ButtonContent, ButtonSize, ButtonVariant,
    ContentBlock, FormContent, FormFieldKind, HeadingContent, ImageContent, ImageSize,
    ListContent, SourceCodeContent, SpacerContent, TextContent,
};
use crate::model::{AppSettings, HeaderLayout, LandingPage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Preview,
    Live,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageView {
    NotAvailable,
    Rendered(String),
}

pub fn render_block(block: &ContentBlock, mode: RenderMode) -> String {
    let inner = match &block.content {
        BlockContent::Heading(c) => render_heading(c),
        BlockContent::Text(c) => render_text(c),
        BlockContent::RichText(c) => {
            if c.html.trim().is_empty() {
                placeholder("richtext", "No content yet")
            } else {
                c.html.clone()
            }
        }
        BlockContent::Image(c) => render_image(c),
        BlockContent::Button(c) => render_button(c),
        BlockContent::Form(c) => render_form(c),
        BlockContent::SourceCode(c) => render_source_code(c, mode),
        BlockContent::Spacer(c) => render_spacer(c),
        BlockContent::List(c) => render_list(c),
    };

    format!(
        "<section class=\"block block-{}\" id=\"block-{}\">{inner}</section>",
        block.block_type(),
        escape_html(&block.id)
    )
}

pub fn render_public_page(page: &LandingPage, settings: &AppSettings) -> PageView {
    if !page.published {
        return PageView::NotAvailable;
    }
    PageView::Rendered(render_document(page, settings, RenderMode::Live))
}

pub fn render_preview_page(page: &LandingPage, settings: &AppSettings) -> String {
    render_document(page, settings, RenderMode::Preview)
}

pub fn render_not_available() -> String {
    let mut out = String::new();
    out.push_str("<!doctype html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("  <meta charset=\"utf-8\">\n");
    out.push_str("  <title>Page not available</title>\n</head>\n<body>\n");
    out.push_str("  <main class=\"not-available\">\n");
    out.push_str("    <h1>Page not available</h1>\n");
    out.push_str("    <p>This page does not exist or has not been published yet.</p>\n");
    out.push_str("  </main>\n</body>\n</html>\n");
    out
}

fn render_document(page: &LandingPage, settings: &AppSettings, mode: RenderMode) -> String {
    let title = page
        .seo_title
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(&page.title);

    let mut out = String::new();
    out.push_str("<!doctype html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("  <meta charset=\"utf-8\">\n");
    out.push_str(
        "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
    );
    out.push_str(&format!("  <title>{}</title>\n", escape_html(title)));
    if let Some(description) = page.seo_description.as_deref()
        && !description.trim().is_empty()
    {
        out.push_str(&format!(
            "  <meta name=\"description\" content=\"{}\">\n",
            escape_html(description)
        ));
    }
    out.push_str(&format!("  <style>{}</style>\n", page_css(page)));
    out.push_str("</head>\n<body>\n");

    if mode == RenderMode::Preview {
        let state = if page.published { "Published" } else { "Draft" };
        out.push_str(&format!("<div class=\"preview-banner\">Preview ({state})</div>\n"));
    }

    out.push_str(&render_header(page));
    out.push_str("<main class=\"page-blocks\">\n");
    for block in page.ordered_blocks() {
        out.push_str(&render_block(block, mode));
        out.push('\n');
    }
    out.push_str("</main>\n");
    out.push_str(&render_footer(page, settings));
    if settings.cookie_banner_enabled {
        out.push_str(&render_cookie_banner(settings));
    }
    out.push_str("</body>\n</html>\n");
    out
}

fn page_css(page: &LandingPage) -> String {
    let d = &page.design;
    format!(
        "body{{margin:0;font-family:{};background:{};color:{}}}\
         .page-blocks{{max-width:{}px;margin:0 auto;padding:2rem 1rem}}\
         .block-button a,.block-button button{{background:{};border-radius:{}px}}",
        css_value(&d.font_family),
        css_value(&d.background_color),
        css_value(&d.text_color),
        d.max_width,
        css_value(&d.primary_color),
        d.border_radius,
    )
}

// Entities are not decoded inside <style>.
fn css_value(input: &str) -> String {
    input
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '{' | '}'))
        .collect()
}

fn render_header(page: &LandingPage) -> String {
    let h = &page.header;
    let layout = match h.layout {
        HeaderLayout::Centered => "centered",
        HeaderLayout::Left => "left",
        HeaderLayout::Split => "split",
    };
    let title = if h.title.trim().is_empty() {
        &page.title
    } else {
        &h.title
    };

    let mut out = format!(
        "<header class=\"page-header layout-{layout}\" style=\"background-color:{};color:{}\">\n",
        escape_html(&h.background_color),
        escape_html(&h.text_color)
    );
    if let Some(image) = h.image.as_deref().filter(|src| !src.trim().is_empty()) {
        out.push_str(&format!(
            "  <img class=\"header-image\" src=\"{}\" alt=\"\">\n",
            escape_html(image)
        ));
    }
    out.push_str(&format!("  <h1>{}</h1>\n", escape_html(title)));
    if !h.subtitle.trim().is_empty() {
        out.push_str(&format!(
            "  <p class=\"subtitle\">{}</p>\n",
            escape_html(&h.subtitle)
        ));
    }
    if !h.text.trim().is_empty() {
        out.push_str(&format!("  <p>{}</p>\n", escape_html(&h.text)));
    }
    out.push_str("</header>\n");
    out
}

fn render_footer(page: &LandingPage, settings: &AppSettings) -> String {
    let f = &page.footer;
    let mut parts = Vec::new();
    if f.show_company_name && !settings.company_name.trim().is_empty() {
        parts.push(format!(
            "<span class=\"company\">{}</span>",
            escape_html(&settings.company_name)
        ));
    }
    if f.show_copyright {
        parts.push(format!(
            "<span class=\"copyright\">&copy; {} {}</span>",
            page.updated_at.year(),
            escape_html(&settings.company_name)
        ));
    }
    if f.show_privacy_link {
        parts.push("<a href=\"/privacy\">Privacy</a>".to_owned());
    }
    if let Some(text) = f.custom_text.as_deref().filter(|t| !t.trim().is_empty()) {
        parts.push(format!("<p class=\"custom\">{}</p>", escape_html(text)));
    }
    format!("<footer class=\"page-footer\">{}</footer>\n", parts.join(""))
}

fn render_cookie_banner(settings: &AppSettings) -> String {
    let c = &settings.cookie_categories;
    let categories = [
        ("necessary", "Necessary", c.necessary, true),
        ("analytics", "Analytics", c.analytics, false),
        ("marketing", "Marketing", c.marketing, false),
        ("preferences", "Preferences", c.preferences, false),
    ];

    let mut out = String::from("<div class=\"cookie-banner\" role=\"dialog\">\n");
    out.push_str("  <p>We use cookies to improve your experience.</p>\n");
    for (key, label, checked, locked) in categories {
        out.push_str(&format!(
            "  <label><input type=\"checkbox\" name=\"{key}\"{}{}> {label}</label>\n",
            if checked || locked { " checked" } else { "" },
            if locked { " disabled" } else { "" },
        ));
    }
    out.push_str("  <button type=\"button\" data-action=\"accept-cookies\">Accept</button>\n");
    out.push_str("</div>\n");
    out
}

fn render_heading(c: &HeadingContent) -> String {
    if c.text.trim().is_empty() {
        return placeholder("heading", "Empty heading");
    }
    let level = c.level.clamp(1, 6);
    format!(
        "<h{level} style=\"text-align:{};color:{}\">{}</h{level}>",
        align(c.alignment),
        escape_html(&c.color),
        escape_html(&c.text)
    )
}

fn render_text(c: &TextContent) -> String {
    if c.text.trim().is_empty() {
        return placeholder("text", "Empty text");
    }
    let body = escape_html(&c.text).replace('\n', "<br>");
    format!(
        "<p style=\"text-align:{};font-size:{}px\">{body}</p>",
        align(c.alignment),
        c.font_size
    )
}

fn render_image(c: &ImageContent) -> String {
    if c.src.trim().is_empty() {
        return placeholder("image", "No image selected");
    }
    let width = match c.size {
        ImageSize::Small => 25,
        ImageSize::Medium => 50,
        ImageSize::Large => 75,
        ImageSize::Full => 100,
    };
    let mut out = format!(
        "<figure style=\"text-align:{}\"><img src=\"{}\" alt=\"{}\" style=\"max-width:{width}%\">",
        align(c.alignment),
        escape_html(&c.src),
        escape_html(&c.alt)
    );
    if let Some(caption) = c.caption.as_deref().filter(|t| !t.trim().is_empty()) {
        out.push_str(&format!("<figcaption>{}</figcaption>", escape_html(caption)));
    }
    out.push_str("</figure>");
    out
}

fn render_button(c: &ButtonContent) -> String {
    if c.text.trim().is_empty() {
        return placeholder("button", "Button without label");
    }

    let class = format!(
        "btn btn-{} btn-{}{}",
        match c.variant {
            ButtonVariant::Primary => "primary",
            ButtonVariant::Secondary => "secondary",
            ButtonVariant::Outline => "outline",
        },
        match c.size {
            ButtonSize::Small => "sm",
            ButtonSize::Medium => "md",
            ButtonSize::Large => "lg",
        },
        if c.full_width { " btn-block" } else { "" }
    );
    let label = escape_html(&c.text);
    let url = c.url.as_deref().map(str::trim).filter(|u| !u.is_empty());

    let element = match c.action {
        ButtonAction::Submit => format!("<button type=\"submit\" class=\"{class}\">{label}</button>"),
        ButtonAction::PageBreak => format!(
            "<button type=\"button\" class=\"{class}\" data-action=\"pagebreak\">{label}</button>"
        ),
        ButtonAction::Link | ButtonAction::Apply | ButtonAction::Email | ButtonAction::Phone => {
            match button_href(c.action, url) {
                Some(href) => format!(
                    "<a class=\"{class}\" href=\"{}\">{label}</a>",
                    escape_html(&href)
                ),
                None => format!("<button type=\"button\" class=\"{class}\" disabled>{label}</button>"),
            }
        }
    };

    format!("<div style=\"text-align:{}\">{element}</div>", align(c.alignment))
}

fn button_href(action: ButtonAction, url: Option<&str>) -> Option<String> {
    match action {
        ButtonAction::Link => url.and_then(safe_link),
        ButtonAction::Apply => match url {
            Some(url) => safe_link(url),
            None => Some("#apply".to_owned()),
        },
        ButtonAction::Email => {
            let address = url?.trim_start_matches("mailto:");
            address.contains('@').then(|| format!("mailto:{address}"))
        }
        ButtonAction::Phone => {
            let number: String = url?
                .trim_start_matches("tel:")
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '+')
                .collect();
            (!number.is_empty()).then(|| format!("tel:{number}"))
        }
        ButtonAction::Submit | ButtonAction::PageBreak => None,
    }
}

fn safe_link(raw: &str) -> Option<String> {
    if (raw.starts_with('/') && !raw.starts_with("//")) || raw.starts_with('#') {
        return Some(raw.to_owned());
    }
    let url = Url::parse(raw).ok()?;
    match url.scheme() {
        "http" | "https" | "mailto" | "tel" => Some(url.to_string()),
        _ => None,
    }
}

fn render_form(c: &FormContent) -> String {
    if !c.embed_code.trim().is_empty() {
        return format!("<div class=\"form-embed\">{}</div>", c.embed_code);
    }
    if c.fields.is_empty() {
        return placeholder("form", "No form configured");
    }

    let mut out = String::from("<form class=\"block-form\" method=\"post\" action=\"#\">");
    for (index, field) in c.fields.iter().enumerate() {
        let name = format!("field-{index}");
        let required = if field.required { " required" } else { "" };
        let placeholder = escape_html(&field.placeholder);
        let label = escape_html(&field.label);
        let input = match field.kind {
            FormFieldKind::Textarea => format!(
                "<textarea id=\"{name}\" name=\"{name}\" placeholder=\"{placeholder}\"{required}></textarea>"
            ),
            FormFieldKind::Checkbox => {
                format!("<input type=\"checkbox\" id=\"{name}\" name=\"{name}\"{required}>")
            }
            kind => {
                let input_type = match kind {
                    FormFieldKind::Email => "email",
                    FormFieldKind::Tel => "tel",
                    FormFieldKind::Number => "number",
                    _ => "text",
                };
                format!(
                    "<input type=\"{input_type}\" id=\"{name}\" name=\"{name}\" placeholder=\"{placeholder}\"{required}>"
                )
            }
        };
        out.push_str(&format!(
            "<div class=\"form-field\"><label for=\"{name}\">{label}</label>{input}</div>"
        ));
    }
    let submit = if c.submit_label.trim().is_empty() {
        "Send"
    } else {
        c.submit_label.as_str()
    };
    out.push_str(&format!(
        "<button type=\"submit\">{}</button></form>",
        escape_html(submit)
    ));
    out
}

fn render_source_code(c: &SourceCodeContent, mode: RenderMode) -> String {
    if c.code.trim().is_empty() {
        return placeholder("sourcecode", "No code yet");
    }
    if mode == RenderMode::Preview {
        return format!(
            "<pre class=\"block-code\"><code class=\"language-{}\">{}</code></pre>",
            escape_html(&c.language),
            escape_html(&c.code)
        );
    }

    let document = match c.language.as_str() {
        "css" => format!("<style>{}</style>", c.code),
        "javascript" => format!("<script>{}</script>", c.code),
        _ => c.code.clone(),
    };
    if c.sandbox {
        format!(
            "<iframe class=\"block-code-frame\" sandbox=\"allow-scripts\" srcdoc=\"{}\"></iframe>",
            escape_html(&document)
        )
    } else {
        document
    }
}

fn render_spacer(c: &SpacerContent) -> String {
    let background = c
        .background_color
        .as_deref()
        .map(|color| format!(";background-color:{}", escape_html(color)))
        .unwrap_or_default();
    format!(
        "<div class=\"spacer\" style=\"height:{}px{background}\"></div>",
        c.height
    )
}

fn render_list(c: &ListContent) -> String {
    let items: Vec<&String> = c.items.iter().filter(|i| !i.trim().is_empty()).collect();
    if items.is_empty() {
        return placeholder("list", "Empty list");
    }
    let tag = if c.ordered { "ol" } else { "ul" };
    let mut out = format!("<{tag}>");
    for item in items {
        out.push_str(&format!("<li>{}</li>", escape_html(item)));
    }
    out.push_str(&format!("</{tag}>"));
    out
}

fn placeholder(kind: &str, message: &str) -> String {
    format!("<div class=\"block-placeholder\" data-placeholder=\"{kind}\">{message}</div>")
}

fn align(alignment: Alignment) -> &'static str {
    match alignment {
        Alignment::Left => "left",
        Alignment::Center => "center",
        Alignment::Right => "right",
    }
}

pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
