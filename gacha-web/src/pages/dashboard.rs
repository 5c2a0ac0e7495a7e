use crate::i18n::{fmt_number, t, tr};
use crate::router::Route;
use gacha_core::User;
use std::collections::BTreeMap;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct DashboardPageProps {
    pub user: User,
}

fn section(key: &str, icon: &str, to: Route) -> Html {
    html! {
        <div class="card dashboard-section">
            <h3>{ format!("{icon} {}", t(&format!("dashboard.sections.{key}.title"))) }</h3>
            <p>{ t(&format!("dashboard.sections.{key}.description")) }</p>
            <Link<Route> to={to} classes="btn">
                { t(&format!("dashboard.sections.{key}.action")) }
            </Link<Route>>
        </div>
    }
}

#[function_component(DashboardPage)]
pub fn dashboard_page(props: &DashboardPageProps) -> Html {
    let user = &props.user;
    let level = user.level.to_string();
    let xp = fmt_number(user.experience_points);
    let mut args = BTreeMap::new();
    args.insert("name", user.username.as_str());
    args.insert("level", level.as_str());
    args.insert("xp", xp.as_str());

    html! {
        <section class="dashboard">
            <h2>{ tr("dashboard.welcome", Some(&args)) }</h2>
            <p class="level-status">{ tr("dashboard.levelStatus", Some(&args)) }</p>
            <div class="currency-summary">
                <div class="card">
                    <span>{ t("dashboard.currency.coins") }</span>
                    <strong>{ format!("💰 {}", fmt_number(user.coins)) }</strong>
                </div>
                <div class="card">
                    <span>{ t("dashboard.currency.gems") }</span>
                    <strong>{ format!("💎 {}", fmt_number(user.gems)) }</strong>
                </div>
            </div>
            <div class="dashboard-grid">
                { section("gacha", "🎰", Route::Gacha) }
                { section("collection", "📚", Route::Collection) }
                { section("battle", "⚔️", Route::Battle) }
                <div class="card dashboard-section">
                    <h3>{ format!("📊 {}", t("dashboard.sections.stats.title")) }</h3>
                    <p>{ tr("dashboard.sections.stats.level", Some(&args)) }</p>
                    <p>{ tr("dashboard.sections.stats.experience", Some(&args)) }</p>
                </div>
            </div>
        </section>
    }
}
