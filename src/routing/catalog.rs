//! The platform's route declarations.

use crate::routing::matcher::MatchOptions;
use crate::routing::table::{RouteEntry, RouteMeta, RouteTable};
use crate::routing::RouteError;
use crate::views::pages::{
    AccountPage, AssessmentPage, ExperiencePage, HomePage, KnowledgePage, NotFoundPage,
    SupportPage,
};
use crate::views::LazyView;

pub const HOME: &str = "Home";
pub const ASSESSMENT: &str = "Assessment";
pub const KNOWLEDGE: &str = "Knowledge";
pub const EXPERIENCE: &str = "Experience";
pub const SUPPORT: &str = "Support";
pub const ACCOUNT: &str = "Account";
pub const GROWTH_STRATEGY: &str = "GrowthStrategy";
pub const NOT_FOUND: &str = "NotFound";

/// Route entries in matching order. The catch-all must stay last.
pub fn platform_routes() -> Vec<RouteEntry> {
    vec![
        RouteEntry::page(
            HOME,
            "/",
            LazyView::of::<HomePage>(),
            RouteMeta::titled("智护童行 - 专业的家庭照护教育平台")
                .describe("从自我评估到专业学习，我们为您提供一站式家庭照护解决方案"),
        ),
        RouteEntry::page(
            ASSESSMENT,
            "/assessment",
            LazyView::of::<AssessmentPage>(),
            RouteMeta::titled("自我评估 - 智护童行").describe("了解您当前的照护知识水平"),
        ),
        RouteEntry::page(
            KNOWLEDGE,
            "/knowledge",
            LazyView::of::<KnowledgePage>(),
            RouteMeta::titled("知识学习 - 智护童行").describe("系统学习专业照护知识"),
        ),
        RouteEntry::page(
            EXPERIENCE,
            "/experience",
            LazyView::of::<ExperiencePage>(),
            RouteMeta::titled("体验互动 - 智护童行").describe("通过游戏化学习提升技能"),
        ),
        RouteEntry::page(
            SUPPORT,
            "/support",
            LazyView::of::<SupportPage>(),
            RouteMeta::titled("成长对策室 - 智护童行").describe("测评反馈、个性化干预、成长奖励"),
        ),
        RouteEntry::page(
            ACCOUNT,
            "/account",
            LazyView::of::<AccountPage>(),
            RouteMeta::titled("个人档案 - 智护童行").describe("记录您的学习历程"),
        ),
        RouteEntry::redirect(
            GROWTH_STRATEGY,
            "/growth-strategy",
            "/support",
            RouteMeta::titled("成长对策室 - 智护童行"),
        ),
        RouteEntry::page(
            NOT_FOUND,
            "/:pathMatch(.*)*",
            LazyView::of::<NotFoundPage>(),
            RouteMeta::titled("页面未找到 - 智护童行"),
        ),
    ]
}

/// Compile the platform routes.
pub fn platform_table(options: MatchOptions) -> Result<RouteTable, RouteError> {
    RouteTable::new(platform_routes(), options)
}
