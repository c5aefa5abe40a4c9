//! Plain-text output for feed and detail views.

use fg_core::{FeedState, PhotoDetail};

const NONE: &str = "-";

pub fn print_feed(state: &FeedState) {
    let query = if state.query().is_recent() {
        "recent photos".to_string()
    } else {
        format!("\"{}\"", state.query())
    };
    println!(
        "{query}: {} photos, page {}/{}",
        state.items().len(),
        state.current_page(),
        state.total_pages()
    );

    for photo in state.items() {
        println!(
            "{}\t{}\t{}\t{}",
            photo.id,
            photo.title,
            photo.owner_name.as_deref().unwrap_or(NONE),
            photo.thumbnail_url.as_deref().unwrap_or(NONE),
        );
    }
}

pub fn print_detail(detail: &PhotoDetail) {
    println!("id:          {}", detail.id);
    println!("title:       {}", detail.title);
    println!(
        "owner:       {}",
        detail.owner_name.as_deref().unwrap_or(NONE)
    );
    if !detail.description.trim().is_empty() {
        println!("description: {}", detail.description);
    }
    if let Some(taken) = detail.taken_at {
        println!("taken:       {}", taken.format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(posted) = detail.posted_at {
        println!("posted:      {}", posted.to_rfc3339());
    }
    println!("views:       {}", detail.views);
    println!("comments:    {}", detail.comments);
    if !detail.tags.is_empty() {
        println!("tags:        {}", detail.tags.join(", "));
    }
    println!(
        "share url:   {}",
        detail.best_share_url().unwrap_or(NONE)
    );
}
