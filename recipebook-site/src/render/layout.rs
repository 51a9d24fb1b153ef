//! Shared page shell and stylesheet.

use recipebook_core::config::SiteInfo;

use crate::escape::escape_html;
use crate::urls;

/// Client-side diagram renderer, loaded only on pages with diagrams.
const MERMAID_SCRIPT: &str = "<script type=\"module\">import mermaid from \
     'https://cdn.jsdelivr.net/npm/mermaid@10/dist/mermaid.esm.min.mjs'; \
     mermaid.initialize({ startOnLoad: true });</script>";

/// Contents of `style.css`.
pub const STYLE_CSS: &str = r"*, *::before, *::after { box-sizing: border-box; }
body { margin: 0; font-family: system-ui, -apple-system, sans-serif; line-height: 1.6; color: #1f2933; background: #fff; }
header.site { background: #326ce5; padding: 0.75rem 1.5rem; }
header.site a { color: #fff; font-weight: 600; text-decoration: none; }
main { max-width: 52rem; margin: 0 auto; padding: 1.5rem; }
footer.site { max-width: 52rem; margin: 2rem auto; padding: 0 1.5rem; color: #616e7c; font-size: 0.875rem; }
a { color: #326ce5; }
pre { background: #f5f7fa; padding: 1rem; overflow-x: auto; border-radius: 4px; }
code { font-family: ui-monospace, SFMono-Regular, Menlo, monospace; font-size: 0.9em; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border-bottom: 1px solid #e4e7eb; padding: 0.4rem 0.6rem; text-align: left; }
.meta-card { border: 1px solid #e4e7eb; border-radius: 6px; padding: 0.75rem 1rem; margin: 1rem 0; }
.meta-card dl { display: grid; grid-template-columns: max-content 1fr; gap: 0.25rem 1rem; margin: 0; }
.meta-card dt { font-weight: 600; }
.meta-card dd { margin: 0; }
.tags { list-style: none; padding: 0; display: flex; flex-wrap: wrap; gap: 0.5rem; }
.tags li a { background: #e4ecfc; border-radius: 999px; padding: 0.1rem 0.6rem; text-decoration: none; font-size: 0.875rem; }
.difficulty-beginner { color: #2f8132; }
.difficulty-intermediate { color: #b7791f; }
.difficulty-advanced { color: #c53030; }
nav.toc { border-left: 3px solid #326ce5; padding-left: 1rem; margin: 1rem 0; }
nav.toc li.toc-h3 { margin-left: 1rem; }
pre.mermaid { background: none; text-align: center; }
";

/// A page ready to be wrapped in the site shell.
#[derive(Debug, Clone, Copy)]
pub struct PageShell<'a> {
    /// Page title (plain text).
    pub title: &'a str,
    /// Description meta tag (plain text).
    pub description: &'a str,
    /// Main content (HTML).
    pub main: &'a str,
    /// Whether to load the diagram renderer.
    pub mermaid: bool,
}

/// Wrap page content in the full HTML document.
#[must_use]
pub fn render_shell(site: &SiteInfo, page: &PageShell<'_>) -> String {
    let title = if page.title == site.title {
        escape_html(&site.title)
    } else {
        format!("{} | {}", escape_html(page.title), escape_html(&site.title))
    };

    let mut sections = Vec::new();
    sections.push("<!DOCTYPE html>".to_string());
    sections.push("<html lang=\"en\">".to_string());
    sections.push("<head>".to_string());
    sections.push("<meta charset=\"utf-8\">".to_string());
    sections.push(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">".to_string(),
    );
    sections.push(format!("<title>{title}</title>"));
    if !page.description.is_empty() {
        sections.push(format!(
            "<meta name=\"description\" content=\"{}\">",
            escape_html(page.description)
        ));
    }
    sections.push(format!(
        "<link rel=\"stylesheet\" href=\"{}\">",
        urls::STYLESHEET
    ));
    sections.push("</head>".to_string());
    sections.push("<body>".to_string());
    sections.push(format!(
        "<header class=\"site\"><a href=\"{}\">{}</a></header>",
        urls::INDEX,
        escape_html(&site.title)
    ));
    sections.push("<main>".to_string());
    sections.push(page.main.trim_end().to_string());
    sections.push("</main>".to_string());
    if !site.description.is_empty() {
        sections.push(format!(
            "<footer class=\"site\">{}</footer>",
            escape_html(&site.description)
        ));
    }
    if page.mermaid {
        sections.push(MERMAID_SCRIPT.to_string());
    }
    sections.push("</body>".to_string());
    sections.push("</html>".to_string());
    sections.push(String::new());

    sections.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> SiteInfo {
        SiteInfo {
            title: "Kubernetes Recipes".to_string(),
            description: "Practical recipes".to_string(),
            base_url: None,
        }
    }

    #[test]
    fn test_shell_title_and_meta() {
        let html = render_shell(
            &site(),
            &PageShell {
                title: "Pods & <Probes>",
                description: "Liveness \"and\" readiness",
                main: "<h1>Pods</h1>",
                mermaid: false,
            },
        );
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Pods &amp; &lt;Probes&gt; | Kubernetes Recipes</title>"));
        assert!(html.contains(r#"content="Liveness &quot;and&quot; readiness""#));
        assert!(html.contains("<link rel=\"stylesheet\" href=\"/style.css\">"));
        assert!(html.contains("<footer class=\"site\">Practical recipes</footer>"));
        assert!(!html.contains("mermaid.initialize"));
    }

    #[test]
    fn test_shell_home_title_and_mermaid() {
        let html = render_shell(
            &site(),
            &PageShell {
                title: "Kubernetes Recipes",
                description: "",
                main: "",
                mermaid: true,
            },
        );
        assert!(html.contains("<title>Kubernetes Recipes</title>"));
        assert!(!html.contains("name=\"description\""));
        assert!(html.contains("mermaid.initialize"));
    }
}
