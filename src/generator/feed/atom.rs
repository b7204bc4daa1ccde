//! Atom 1.0 rendering.

use ::atom_syndication::{
    Entry, EntryBuilder, Feed as AtomFeed, FeedBuilder, GeneratorBuilder, Link, LinkBuilder,
    Person, PersonBuilder, Text,
};

use super::{Feed, FeedError, FeedItem};

/// Render the feed as an Atom 1.0 document.
pub fn render(feed: &Feed) -> Result<Vec<u8>, FeedError> {
    Ok(to_atom(feed).write_to(Vec::new())?)
}

fn to_atom(feed: &Feed) -> AtomFeed {
    let entries: Vec<Entry> = feed.items.iter().map(|item| item_to_entry(item, feed)).collect();

    let alternate_link: Link = LinkBuilder::default()
        .href(&feed.link)
        .rel("alternate".to_string())
        .build();

    FeedBuilder::default()
        .title(Text::plain(feed.title.clone()))
        .id(&feed.link)
        .updated(feed.created)
        .authors(people(&feed.author))
        .links(vec![alternate_link])
        .subtitle((!feed.description.is_empty()).then(|| Text::plain(feed.description.clone())))
        .generator(Some(
            GeneratorBuilder::default()
                .value(env!("CARGO_PKG_NAME"))
                .version(Some(env!("CARGO_PKG_VERSION").to_string()))
                .build(),
        ))
        .entries(entries)
        .build()
}

/// Entries without a timestamp take the feed's generation time as `updated`.
fn item_to_entry(item: &FeedItem, feed: &Feed) -> Entry {
    let entry_link: Link = LinkBuilder::default()
        .href(&item.link)
        .rel("alternate".to_string())
        .build();

    EntryBuilder::default()
        .title(Text::plain(item.title.clone()))
        .id(&item.id)
        .updated(item.created.unwrap_or(feed.created))
        .published(item.created)
        .links(vec![entry_link])
        .summary((!item.description.is_empty()).then(|| Text::plain(item.description.clone())))
        .authors(people(&item.author))
        .build()
}

fn people(name: &str) -> Vec<Person> {
    if name.is_empty() {
        return Vec::new();
    }
    vec![PersonBuilder::default().name(name.to_string()).build()]
}
