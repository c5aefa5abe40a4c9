//! Wire shapes of Flickr REST responses and their mapping to domain types.
//!
//! The service is loose about number encoding: ids, totals and counters may
//! arrive as JSON numbers or as numeric strings. Every numeric field goes
//! through the lenient helpers below.

use chrono::{DateTime, NaiveDateTime, Utc};
use fg_core::photo::url_policy::{resolve_detail_urls, resolve_thumbnail_url};
use fg_core::{FeedError, Photo, PhotoDetail, PhotoId, PhotoPage, SizeVariants};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

const STAT_FAIL: &str = "fail";
const TAKEN_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn to_u32(value: Option<u64>) -> Option<u32> {
    value.map(|v| u32::try_from(v).unwrap_or(u32::MAX))
}

/// `{"_content": "..."}` wrapper used by getInfo text fields.
#[derive(Debug, Default, Deserialize)]
pub struct Content {
    #[serde(rename = "_content", default, deserialize_with = "lenient_string")]
    pub content: Option<String>,
}

/// Status fields present on every response.
#[derive(Debug, Default, Deserialize)]
struct Status {
    #[serde(default)]
    stat: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
}

/// Parses the body and turns `stat: "fail"` into a service error.
fn parse_checked(body: &str) -> Result<Value, FeedError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| FeedError::MalformedPayload(format!("response is not JSON: {e}")))?;
    if !value.is_object() {
        return Err(FeedError::MalformedPayload(
            "response is not a JSON object".to_string(),
        ));
    }

    let status = Status::deserialize(&value).unwrap_or_default();
    if status.stat.as_deref() == Some(STAT_FAIL) {
        return Err(FeedError::Service {
            code: status.code,
            message: status.message.unwrap_or_default(),
        });
    }
    Ok(value)
}

fn take_object<T>(mut value: Value, key: &str) -> Result<T, FeedError>
where
    T: for<'de> Deserialize<'de>,
{
    let inner = value
        .get_mut(key)
        .filter(|v| v.is_object())
        .map(Value::take)
        .ok_or_else(|| FeedError::MalformedPayload(format!("missing `{key}` object")))?;
    serde_json::from_value(inner)
        .map_err(|e| FeedError::MalformedPayload(format!("invalid `{key}` object: {e}")))
}

/// One entry of a getRecent/search result list.
#[derive(Debug, Default, Deserialize)]
pub struct RawPhoto {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub server: Option<String>,
    #[serde(default)]
    pub secret: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub ownername: Option<String>,
    #[serde(default)]
    pub url_s: Option<String>,
    #[serde(default)]
    pub url_m: Option<String>,
    #[serde(default)]
    pub url_q: Option<String>,
}

impl RawPhoto {
    /// `None` when the record carries no usable id.
    pub fn into_photo(self) -> Option<Photo> {
        let id = PhotoId::parse(self.id.as_deref().unwrap_or_default())?;
        let variants = SizeVariants {
            id: Some(id.to_string()),
            server: self.server,
            secret: self.secret,
            url_s: self.url_s,
            url_m: self.url_m,
            url_q: self.url_q,
            ..SizeVariants::default()
        };
        Some(Photo::new(
            id,
            self.title,
            resolve_thumbnail_url(&variants),
            self.ownername,
        ))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PhotoList {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub page: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub pages: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub total: Option<u64>,
    #[serde(default)]
    pub photo: Vec<RawPhoto>,
}

impl PhotoList {
    pub fn into_page(self, requested_page: u32) -> PhotoPage {
        let received = self.photo.len();
        let photos: Vec<Photo> = self
            .photo
            .into_iter()
            .filter_map(RawPhoto::into_photo)
            .collect();
        if photos.len() < received {
            tracing::debug!(
                dropped = received - photos.len(),
                "Dropped photo records without an id"
            );
        }

        PhotoPage {
            page: to_u32(self.page).unwrap_or(requested_page).max(1),
            total_pages: to_u32(self.pages).unwrap_or(1).max(1),
            total: self.total.unwrap_or(photos.len() as u64),
            photos,
        }
    }
}

/// Decodes a getRecent/search response body.
pub fn decode_page(body: &str, requested_page: u32) -> Result<PhotoPage, FeedError> {
    let value = parse_checked(body)?;
    let list: PhotoList = take_object(value, "photos")?;
    Ok(list.into_page(requested_page))
}

#[derive(Debug, Default, Deserialize)]
pub struct InfoOwner {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub realname: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct InfoDates {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub posted: Option<i64>,
    #[serde(default)]
    pub taken: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct InfoTag {
    #[serde(default)]
    pub raw: Option<String>,
    #[serde(rename = "_content", default)]
    pub content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct InfoTags {
    #[serde(default)]
    pub tag: Vec<InfoTag>,
}

/// getInfo `photo` object.
#[derive(Debug, Default, Deserialize)]
pub struct PhotoInfo {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub server: Option<String>,
    #[serde(default)]
    pub secret: Option<String>,
    #[serde(default)]
    pub originalsecret: Option<String>,
    #[serde(default)]
    pub originalformat: Option<String>,
    #[serde(default)]
    pub title: Content,
    #[serde(default)]
    pub description: Content,
    #[serde(default)]
    pub owner: InfoOwner,
    #[serde(default)]
    pub dates: InfoDates,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub views: Option<u64>,
    #[serde(default)]
    pub comments: Content,
    #[serde(default)]
    pub tags: InfoTags,
    #[serde(default)]
    pub url_m: Option<String>,
    #[serde(default)]
    pub url_l: Option<String>,
    #[serde(default)]
    pub url_o: Option<String>,
}

impl PhotoInfo {
    pub fn into_detail(self, requested: &PhotoId) -> PhotoDetail {
        let id = self
            .id
            .as_deref()
            .and_then(PhotoId::parse)
            .unwrap_or_else(|| requested.clone());
        let variants = SizeVariants {
            id: Some(id.to_string()),
            server: self.server,
            secret: self.secret,
            url_m: self.url_m,
            url_l: self.url_l,
            url_o: self.url_o,
            original_secret: self.originalsecret,
            original_format: self.originalformat,
            ..SizeVariants::default()
        };
        // Reuse the list-item rules for title placeholder and blank owner.
        let owner = self
            .owner
            .username
            .filter(|v| !v.trim().is_empty())
            .or(self.owner.realname);
        let summary = Photo::new(id, self.title.content, None, owner);

        PhotoDetail {
            urls: resolve_detail_urls(&variants),
            id: summary.id,
            title: summary.title,
            description: self.description.content.unwrap_or_default(),
            owner_name: summary.owner_name,
            taken_at: self
                .dates
                .taken
                .as_deref()
                .and_then(|t| NaiveDateTime::parse_from_str(t.trim(), TAKEN_FORMAT).ok()),
            posted_at: self
                .dates
                .posted
                .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0)),
            views: self.views.unwrap_or(0),
            comments: self
                .comments
                .content
                .and_then(|c| c.trim().parse().ok())
                .unwrap_or(0),
            tags: self
                .tags
                .tag
                .into_iter()
                .filter_map(|t| t.raw.or(t.content))
                .filter(|t| !t.trim().is_empty())
                .collect(),
        }
    }
}

/// Decodes a getInfo response body.
pub fn decode_detail(body: &str, requested: &PhotoId) -> Result<PhotoDetail, FeedError> {
    let value = parse_checked(body)?;
    let info: PhotoInfo = take_object(value, "photo")?;
    Ok(info.into_detail(requested))
}
