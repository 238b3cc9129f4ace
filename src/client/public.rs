use log::error;

use super::LinkClient;
use crate::models::Link;

/// One entry on the public page: opens `href` externally, shows the url on
/// hover.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub title: String,
    pub href: String,
    pub tooltip: String,
}

impl From<Link> for NavItem {
    fn from(link: Link) -> Self {
        Self {
            title: link.title,
            tooltip: link.url.clone(),
            href: link.url,
        }
    }
}

/// Read-only list shown to visitors. Fetched once; a failed fetch shows an
/// empty page.
#[derive(Clone, Debug, Default)]
pub struct PublicView {
    items: Vec<NavItem>,
}

impl PublicView {
    pub async fn load(client: &LinkClient) -> Self {
        match client.list().await {
            Ok(links) => Self::from_links(links),
            Err(err) => {
                error!("Error fetching links: {err}");
                Self::default()
            }
        }
    }

    pub fn from_links(links: Vec<Link>) -> Self {
        Self {
            items: links.into_iter().map(NavItem::from).collect(),
        }
    }

    pub fn items(&self) -> &[NavItem] {
        &self.items
    }
}
