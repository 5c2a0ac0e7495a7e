//! Deployment-dependent locations: router base, static assets and the backend origin.

/// Base path for the router (e.g., `/play` when hosted under a subdirectory).
///
/// Returns `None` when no base path is configured so the router falls back to root.
#[must_use]
pub fn router_base() -> Option<String> {
    router_base_with_base(option_env!("PUBLIC_URL").unwrap_or(""))
}

/// URL of a bundled static asset, honouring `PUBLIC_URL`.
#[must_use]
pub fn asset_path(relative: &str) -> String {
    asset_path_with_base(relative, option_env!("PUBLIC_URL").unwrap_or(""))
}

/// Backend origin baked in at build time through `GACHA_API_BASE`.
#[must_use]
pub fn api_base() -> &'static str {
    api_base_from(option_env!("GACHA_API_BASE"))
}

/// Placeholder shown when a card or gallery image fails to load.
#[must_use]
pub fn fallback_image() -> String {
    asset_path(gacha_core::constants::FALLBACK_IMAGE)
}

fn api_base_from(configured: Option<&'static str>) -> &'static str {
    configured
        .map(str::trim)
        .filter(|base| !base.is_empty())
        .unwrap_or(gacha_core::constants::DEFAULT_API_BASE)
}

fn asset_path_with_base(relative: &str, base: &str) -> String {
    let base = base.trim_end_matches('/');
    let rel = relative.trim_start_matches('/');

    if base.is_empty() {
        format!("/{rel}")
    } else {
        format!("{base}/{rel}")
    }
}

fn router_base_with_base(base: &str) -> Option<String> {
    let base = base.trim_end_matches('/').trim();
    if base.is_empty() {
        None
    } else {
        Some(base.to_string())
    }
}
