//! Page shell shared by every HTML page
//!
//! All pages render through [`render_page`]: the banner header with the
//! "More" menu, the navigation bar, then page-specific content. Colors and
//! banner text come from a [`Theme`] built from [`SiteConfig`].

use crate::config::SiteConfig;

/// Entries of the "More" menu
pub const MORE_MENU_ITEMS: [&str; 3] = ["PTMs Predictor", "Tools", "Databases"];

/// Top navigation entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    Home,
    Browse,
    Search,
    Download,
    UserGuide,
    Links,
    Statistics,
    Contact,
}

impl NavItem {
    pub const ALL: [NavItem; 8] = [
        NavItem::Home,
        NavItem::Browse,
        NavItem::Search,
        NavItem::Download,
        NavItem::UserGuide,
        NavItem::Links,
        NavItem::Statistics,
        NavItem::Contact,
    ];

    pub fn label(self) -> &'static str {
        match self {
            NavItem::Home => "HOME",
            NavItem::Browse => "BROWSE",
            NavItem::Search => "SEARCH",
            NavItem::Download => "DOWNLOAD",
            NavItem::UserGuide => "USER GUIDE",
            NavItem::Links => "LINKS",
            NavItem::Statistics => "STATISTICS",
            NavItem::Contact => "CONTACT",
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            NavItem::Home => "/home",
            NavItem::Browse => "/browse",
            NavItem::Search => "/search",
            NavItem::Download => "/download",
            NavItem::UserGuide => "/user-guide",
            NavItem::Links => "/links",
            NavItem::Statistics => "/statistics",
            NavItem::Contact => "/contact",
        }
    }
}

/// Visual parameters for the page shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub title: String,
    pub subtitle: String,
    pub accent: String,
    pub highlight: String,
    pub background: String,
    pub release_note: String,
    pub last_update: String,
}

impl From<&SiteConfig> for Theme {
    fn from(site: &SiteConfig) -> Self {
        Self {
            title: site.title.clone(),
            subtitle: site.subtitle.clone(),
            accent: site.accent_color.clone(),
            highlight: site.highlight_color.clone(),
            background: site.background_color.clone(),
            release_note: site.release_note.clone(),
            last_update: site.last_update.clone(),
        }
    }
}

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn stylesheet(theme: &Theme) -> String {
    format!(
        r#"
body {{ margin: 0; font-family: sans-serif; background: {background}; color: #4b5563; }}
header {{ position: relative; padding: 1rem 1.5rem; }}
header .title {{ color: {accent}; font-size: 3.5rem; font-weight: bold; letter-spacing: 0.1em; }}
header .subtitle {{ color: {accent}; font-size: 1.1rem; }}
header .rule {{ background: {accent}; height: 0.5rem; margin: 1rem -1.5rem -1rem; }}
details.more {{ position: absolute; top: 1.5rem; right: 1.5rem; }}
details.more summary {{ background: {accent}; color: {background}; padding: 0.5rem 1rem; cursor: pointer; text-transform: uppercase; }}
details.more ul {{ position: absolute; right: 0; background: {accent}; list-style: none; margin: 0.5rem 0 0; padding: 0.25rem 0; width: 14rem; }}
details.more li a {{ display: block; color: {background}; padding: 0.75rem 1rem; text-decoration: none; }}
details.more .last-update {{ color: {background}; font-size: 0.75rem; padding: 0.5rem 1rem; opacity: 0.8; }}
nav {{ display: flex; border-bottom: 1px solid #d1d5db; }}
nav a {{ padding: 0.4rem 1.5rem; color: inherit; text-decoration: none; }}
nav a.active {{ background: {highlight}; color: white; }}
main {{ padding: 1.5rem; }}
.em {{ color: {highlight}; }}
.accent {{ color: {accent}; }}
table {{ border-collapse: collapse; width: 100%; }}
th, td {{ border-bottom: 1px solid #d1d5db; padding: 0.4rem; text-align: left; }}
.status-failed {{ color: {highlight}; }}
"#,
        background = theme.background,
        accent = theme.accent,
        highlight = theme.highlight,
    )
}

fn render_header(theme: &Theme, out: &mut String) {
    out.push_str(&format!(
        r#"<header><div class="title">{title}</div><div class="subtitle">{subtitle}</div>"#,
        title = escape_html(&theme.title),
        subtitle = escape_html(&theme.subtitle),
    ));

    out.push_str(r#"<details class="more"><summary>More</summary><ul>"#);
    for item in MORE_MENU_ITEMS {
        out.push_str(&format!(r##"<li><a href="#">+ {}</a></li>"##, escape_html(item)));
    }
    out.push_str(&format!(
        r#"<li class="last-update">Last update: {}</li></ul></details>"#,
        escape_html(&theme.last_update)
    ));
    out.push_str(r#"<div class="rule"></div></header>"#);
}

fn render_nav(active: NavItem, out: &mut String) {
    out.push_str("<nav>");
    for item in NavItem::ALL {
        let class = if item == active { r#" class="active""# } else { "" };
        out.push_str(&format!(r#"<a href="{}"{}>{}</a>"#, item.path(), class, item.label()));
    }
    out.push_str("</nav>");
}

/// Render a complete HTML document around `content`.
///
/// `content` is inserted verbatim and must already be escaped.
pub fn render_page(theme: &Theme, active: NavItem, page_title: &str, content: &str) -> String {
    let mut out = String::with_capacity(content.len() + 4096);
    out.push_str(&format!(
        r#"<!DOCTYPE html><html lang="en"><head><meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1"><title>{title} - {page}</title><style>{style}</style></head><body>"#,
        title = escape_html(&theme.title),
        page = escape_html(page_title),
        style = stylesheet(theme),
    ));
    render_header(theme, &mut out);
    render_nav(active, &mut out);
    out.push_str("<main>");
    out.push_str(content);
    out.push_str("</main></body></html>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theme() -> Theme {
        Theme::from(&SiteConfig::default())
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_nav_marks_only_active_item() {
        let html = render_page(&theme(), NavItem::Browse, "Browse", "");
        assert!(html.contains(r#"<a href="/browse" class="active">BROWSE</a>"#));
        assert!(html.contains(r#"<a href="/home">HOME</a>"#));
        assert_eq!(html.matches(r#"class="active""#).count(), 1);
        for item in NavItem::ALL {
            assert!(html.contains(item.label()));
        }
    }

    #[test]
    fn test_header_uses_theme() {
        let mut theme = theme();
        theme.title = "HSNDB <beta>".to_string();
        theme.accent = "#123456".to_string();

        let html = render_page(&theme, NavItem::Home, "Home", "<p>body</p>");
        assert!(html.contains("HSNDB &lt;beta&gt;"));
        assert!(html.contains("#123456"));
        assert!(html.contains("<main><p>body</p></main>"));
        assert!(html.contains("Last update: Jun 1, 2019"));
        for item in MORE_MENU_ITEMS {
            assert!(html.contains(item));
        }
    }
}
