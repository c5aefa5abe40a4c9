//! URL resolution policy.
//!
//! Resolution is an ordered list of candidates; the first present one wins.
//!
//! Thumbnail order:
//! 1. service-provided `url_s`
//! 2. service-provided `url_m`
//! 3. service-provided `url_q`
//! 4. computed `https://live.staticflickr.com/{server}/{id}_{secret}_m.jpg`
//! 5. absent
//!
//! Detail variants resolve independently: `medium` from `url_m` or the computed
//! `_m` pattern, `large` from `url_l` or the computed `_b` pattern, `original`
//! from `url_o` or `{id}_{originalsecret}_o.{originalformat}`.

use serde::{Deserialize, Serialize};

use super::detail::PhotoUrls;
use super::non_blank;

pub const STATIC_HOST: &str = "https://live.staticflickr.com";

/// Size-variant fields a service record may carry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeVariants {
    pub id: Option<String>,
    pub server: Option<String>,
    pub secret: Option<String>,
    pub url_s: Option<String>,
    pub url_m: Option<String>,
    pub url_q: Option<String>,
    pub url_l: Option<String>,
    pub url_o: Option<String>,
    pub original_secret: Option<String>,
    pub original_format: Option<String>,
}

/// Static-host size suffixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeSuffix {
    Medium,
    Large,
}

impl SizeSuffix {
    fn as_str(self) -> &'static str {
        match self {
            SizeSuffix::Medium => "m",
            SizeSuffix::Large => "b",
        }
    }
}

impl SizeVariants {
    /// Builds `{server}/{id}_{secret}_{suffix}.jpg` when all three parts are present.
    pub fn computed_url(&self, suffix: SizeSuffix) -> Option<String> {
        let server = present(&self.server)?;
        let id = present(&self.id)?;
        let secret = present(&self.secret)?;
        Some(format!(
            "{STATIC_HOST}/{server}/{id}_{secret}_{}.jpg",
            suffix.as_str()
        ))
    }

    fn computed_original(&self) -> Option<String> {
        let server = present(&self.server)?;
        let id = present(&self.id)?;
        let secret = present(&self.original_secret)?;
        let format = present(&self.original_format)?;
        Some(format!("{STATIC_HOST}/{server}/{id}_{secret}_o.{format}"))
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn provided(field: &Option<String>) -> Option<String> {
    non_blank(field.clone())
}

/// Grid thumbnail URL for a record.
pub fn resolve_thumbnail_url(variants: &SizeVariants) -> Option<String> {
    provided(&variants.url_s)
        .or_else(|| provided(&variants.url_m))
        .or_else(|| provided(&variants.url_q))
        .or_else(|| variants.computed_url(SizeSuffix::Medium))
}

/// Named detail variants for a record.
pub fn resolve_detail_urls(variants: &SizeVariants) -> PhotoUrls {
    PhotoUrls {
        medium: provided(&variants.url_m).or_else(|| variants.computed_url(SizeSuffix::Medium)),
        large: provided(&variants.url_l).or_else(|| variants.computed_url(SizeSuffix::Large)),
        original: provided(&variants.url_o).or_else(|| variants.computed_original()),
    }
}
