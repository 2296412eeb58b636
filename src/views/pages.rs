//! Platform pages.
//!
//! Markup is deliberately minimal: a section tagged with the page name, a
//! heading, and the icon placeholders the icon pass replaces.

use crate::routing::state::NavigationState;
use crate::views::View;

fn section(page: &str, heading: &str, icon: &str, body: &str) -> String {
    let heading = escape_text(heading);
    let body = escape_text(body);
    format!(
        r#"<section data-page="{page}"><h1><i data-lucide="{icon}"></i>{heading}</h1><p>{body}</p></section>"#
    )
}

/// Escape text for element content or a quoted attribute value.
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[derive(Debug, Default, Clone, Copy)]
pub struct HomePage;

impl View for HomePage {
    fn render(&self, _state: &NavigationState) -> String {
        section("home", "智护童行", "heart-handshake", "从自我评估到专业学习，一站式家庭照护解决方案")
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AssessmentPage;

impl View for AssessmentPage {
    fn render(&self, _state: &NavigationState) -> String {
        section("assessment", "自我评估", "clipboard-check", "了解您当前的照护知识水平")
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct KnowledgePage;

impl View for KnowledgePage {
    fn render(&self, _state: &NavigationState) -> String {
        section("knowledge", "知识学习", "book-open", "系统学习专业照护知识")
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ExperiencePage;

impl View for ExperiencePage {
    fn render(&self, _state: &NavigationState) -> String {
        section("experience", "体验互动", "gamepad-2", "通过游戏化学习提升技能")
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SupportPage;

impl View for SupportPage {
    fn render(&self, _state: &NavigationState) -> String {
        section("support", "成长对策室", "sprout", "测评反馈、个性化干预、成长奖励")
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AccountPage;

impl View for AccountPage {
    fn render(&self, _state: &NavigationState) -> String {
        section("account", "个人档案", "user-round", "记录您的学习历程")
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NotFoundPage;

impl View for NotFoundPage {
    fn render(&self, state: &NavigationState) -> String {
        section("not-found", "页面未找到", "compass", &format!("{} 不存在", state.path))
    }
}

/// Placeholder shown until start-up finishes.
pub fn loading_placeholder() -> String {
    r#"<div data-testid="global-loading" class="global-loading">加载中…</div>"#.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("成长对策室"), "成长对策室");
        assert_eq!(
            escape_text(r#"<a href="x">&'"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;"
        );
    }

    #[test]
    fn test_section_escapes_body() {
        let html = section("not-found", "页面未找到", "compass", "/<script> 不存在");
        assert!(html.contains("<p>/&lt;script&gt; 不存在</p>"));
        assert!(!html.contains("<script>"));
    }
}
