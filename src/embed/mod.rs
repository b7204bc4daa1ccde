//! Embedded static resources.
//!
//! - `template` - Template types for typed variable injection
//! - `listing` - The feed listing page (`index.html`)

mod template;

pub use template::{Template, TemplateKind, TemplateVars};

pub mod listing {
    use super::{Template, TemplateKind, TemplateVars};

    /// Variables for index.html.
    ///
    /// Every value must already be HTML-escaped.
    pub struct IndexVars<'a> {
        pub title: &'a str,
        pub description: &'a str,
        pub feed_links: &'a str,
        pub item_count: &'a str,
        pub target_dir: &'a str,
        pub items: &'a str,
        pub last_updated: &'a str,
        pub update_mode: &'a str,
    }

    impl TemplateVars for IndexVars<'_> {
        fn lookup(&self, name: &str) -> Option<&str> {
            Some(match name {
                "TITLE" => self.title,
                "DESCRIPTION" => self.description,
                "FEED_LINKS" => self.feed_links,
                "ITEM_COUNT" => self.item_count,
                "TARGET_DIR" => self.target_dir,
                "ITEMS" => self.items,
                "LAST_UPDATED" => self.last_updated,
                "UPDATE_MODE" => self.update_mode,
                _ => return None,
            })
        }
    }

    /// Variables for one entry of the item list.
    pub struct ItemVars<'a> {
        pub title: &'a str,
        pub source: &'a str,
        pub authors: &'a str,
        pub site: &'a str,
        pub published: &'a str,
        pub description: &'a str,
        pub tags: &'a str,
    }

    impl TemplateVars for ItemVars<'_> {
        fn lookup(&self, name: &str) -> Option<&str> {
            Some(match name {
                "TITLE" => self.title,
                "SOURCE" => self.source,
                "AUTHORS" => self.authors,
                "SITE" => self.site,
                "PUBLISHED" => self.published,
                "DESCRIPTION" => self.description,
                "TAGS" => self.tags,
                _ => return None,
            })
        }
    }

    pub struct IndexPage;

    impl TemplateKind for IndexPage {
        type Vars<'a> = IndexVars<'a>;
    }

    pub struct ItemFragment;

    impl TemplateKind for ItemFragment {
        type Vars<'a> = ItemVars<'a>;
    }

    pub const INDEX_HTML: Template<IndexPage> = Template::new(include_str!("listing/index.html"));

    pub const ITEM_HTML: Template<ItemFragment> = Template::new(include_str!("listing/item.html"));
}
