//! RSS 2.0 rendering.

use ::rss::{Channel, ChannelBuilder, GuidBuilder, Item, ItemBuilder};

use super::{Feed, FeedError, FeedItem};

/// Render the feed as an RSS 2.0 document.
///
/// Channel validation is skipped: a clipping source is free-form text and
/// one odd `source` must not take the whole feed down.
pub fn render(feed: &Feed) -> Result<Vec<u8>, FeedError> {
    Ok(to_channel(feed).write_to(Vec::new())?)
}

fn to_channel(feed: &Feed) -> Channel {
    let items: Vec<Item> = feed.items.iter().map(item_to_rss).collect();

    ChannelBuilder::default()
        .title(&feed.title)
        .link(&feed.link)
        .description(&feed.description)
        .managing_editor(non_empty(&feed.author))
        .pub_date(feed.created.to_rfc2822())
        .generator(env!("CARGO_PKG_NAME").to_string())
        .items(items)
        .build()
}

fn item_to_rss(item: &FeedItem) -> Item {
    ItemBuilder::default()
        .title(item.title.clone())
        .link(Some(item.link.clone()))
        .guid(GuidBuilder::default().permalink(true).value(&item.id).build())
        .description(non_empty(&item.description))
        .author(non_empty(&item.author))
        .pub_date(item.created.map(|dt| dt.to_rfc2822()))
        .build()
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}
