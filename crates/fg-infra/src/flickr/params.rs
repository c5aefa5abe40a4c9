//! Request parameter building. Pure, no I/O.

use fg_core::{PageRequest, PhotoId};

pub const METHOD_RECENT: &str = "flickr.photos.getRecent";
pub const METHOD_SEARCH: &str = "flickr.photos.search";
pub const METHOD_INFO: &str = "flickr.photos.getInfo";

/// Size-variant URLs and display fields requested with every page.
pub const PAGE_EXTRAS: &str = "url_s,url_m,url_q,owner_name,description,date_taken";

pub type Params = Vec<(&'static str, String)>;

/// Recent photos for an empty query, text search otherwise.
pub fn method_for(request: &PageRequest) -> &'static str {
    if request.query.is_recent() {
        METHOD_RECENT
    } else {
        METHOD_SEARCH
    }
}

pub fn page_params(api_key: &str, request: &PageRequest) -> Params {
    let mut params = vec![
        ("method", method_for(request).to_string()),
        ("api_key", api_key.to_string()),
        ("page", request.page.to_string()),
        ("per_page", request.per_page.to_string()),
        ("extras", PAGE_EXTRAS.to_string()),
    ];
    if !request.query.is_recent() {
        params.push(("text", request.query.as_str().to_string()));
    }
    with_format(params)
}

pub fn detail_params(api_key: &str, id: &PhotoId) -> Params {
    with_format(vec![
        ("method", METHOD_INFO.to_string()),
        ("api_key", api_key.to_string()),
        ("photo_id", id.to_string()),
    ])
}

fn with_format(mut params: Params) -> Params {
    params.push(("format", "json".to_string()));
    params.push(("nojsoncallback", "1".to_string()));
    params
}
