use log::error;
use uuid::Uuid;

use super::prefs::{Preferences, PrefsError};
use super::LinkClient;
use crate::models::Link;

/// Editor state for the row list. Only one row can be in `Editing`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RowEditor {
    Viewing,
    Editing { id: Uuid, title: String, url: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// Transient notification raised by an admin action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: Option<String>,
}

impl Notice {
    fn success(title: &str, description: String) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: title.to_string(),
            description: Some(description),
        }
    }

    fn info(title: &str, description: String) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.to_string(),
            description: Some(description),
        }
    }

    fn failure(title: &str) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.to_string(),
            description: None,
        }
    }
}

/// State behind the admin page.
///
/// The local list is fetched once and then reconciled from each mutation's
/// response: updates replace the item, creates append, deletes remove. A
/// failed call leaves the list as it was and raises an error notice.
pub struct AdminView {
    client: LinkClient,
    prefs: Preferences,
    links: Vec<Link>,
    editor: RowEditor,
    new_title: String,
    new_url: String,
    notices: Vec<Notice>,
}

impl AdminView {
    pub async fn load(client: LinkClient, prefs: Preferences) -> Self {
        let links = match client.list().await {
            Ok(links) => links,
            Err(err) => {
                error!("Error fetching links: {err}");
                Vec::new()
            }
        };
        Self::new(client, prefs, links)
    }

    pub fn new(client: LinkClient, prefs: Preferences, links: Vec<Link>) -> Self {
        Self {
            client,
            prefs,
            links,
            editor: RowEditor::Viewing,
            new_title: String::new(),
            new_url: String::new(),
            notices: Vec::new(),
        }
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn editor(&self) -> &RowEditor {
        &self.editor
    }

    pub fn is_editing(&self, id: Uuid) -> bool {
        matches!(&self.editor, RowEditor::Editing { id: editing, .. } if *editing == id)
    }

    /// Clicking a row: toggles editing off for the open row, otherwise opens
    /// the clicked one and drops any unsaved edit elsewhere.
    pub fn toggle_row(&mut self, id: Uuid) {
        if self.is_editing(id) {
            self.cancel_edit();
        } else {
            self.begin_edit(id);
        }
    }

    /// The edit button always opens the row, seeded from the stored values.
    pub fn begin_edit(&mut self, id: Uuid) {
        if let Some(link) = self.links.iter().find(|link| link.id == id) {
            self.editor = RowEditor::Editing {
                id,
                title: link.title.clone(),
                url: link.url.clone(),
            };
        }
    }

    pub fn set_edit_title(&mut self, value: impl Into<String>) {
        if let RowEditor::Editing { title, .. } = &mut self.editor {
            *title = value.into();
        }
    }

    pub fn set_edit_url(&mut self, value: impl Into<String>) {
        if let RowEditor::Editing { url, .. } = &mut self.editor {
            *url = value.into();
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editor = RowEditor::Viewing;
    }

    /// Commits the open edit. Blank fields are ignored without a notice and
    /// the row stays open.
    pub async fn save_edit(&mut self) {
        let RowEditor::Editing { id, title, url } = &self.editor else {
            return;
        };
        if title.trim().is_empty() || url.trim().is_empty() {
            return;
        }
        let (id, title, url) = (*id, title.clone(), url.clone());

        match self.client.update(id, &title, &url).await {
            Ok(updated) => {
                if let Some(link) = self.links.iter_mut().find(|link| link.id == id) {
                    *link = updated;
                }
                self.editor = RowEditor::Viewing;
                self.notices.push(Notice::success(
                    "Link updated.",
                    format!("\"{title}\" has been updated."),
                ));
            }
            Err(err) => {
                error!("Update failed: {err}");
                self.notices.push(Notice::failure("Update failed."));
            }
        }
    }

    pub fn new_title(&self) -> &str {
        &self.new_title
    }

    pub fn new_url(&self) -> &str {
        &self.new_url
    }

    pub fn set_new_title(&mut self, value: impl Into<String>) {
        self.new_title = value.into();
    }

    pub fn set_new_url(&mut self, value: impl Into<String>) {
        self.new_url = value.into();
    }

    /// Creates a link from the add form and appends the response. The form is
    /// cleared only on success.
    pub async fn add(&mut self) {
        if self.new_title.trim().is_empty() || self.new_url.trim().is_empty() {
            return;
        }

        match self.client.create(&self.new_title, &self.new_url).await {
            Ok(created) => {
                self.notices.push(Notice::success(
                    "Link added.",
                    format!("\"{}\" has been added.", self.new_title),
                ));
                self.links.push(created);
                self.new_title.clear();
                self.new_url.clear();
            }
            Err(err) => {
                error!("Add failed: {err}");
                self.notices.push(Notice::failure("Add failed."));
            }
        }
    }

    pub async fn delete(&mut self, id: Uuid) {
        let title = self
            .links
            .iter()
            .find(|link| link.id == id)
            .map(|link| link.title.clone())
            .unwrap_or_default();

        match self.client.delete(id).await {
            Ok(_) => {
                self.links.retain(|link| link.id != id);
                if self.is_editing(id) {
                    self.editor = RowEditor::Viewing;
                }
                self.notices.push(Notice::info(
                    "Link deleted.",
                    format!("\"{title}\" has been deleted."),
                ));
            }
            Err(err) => {
                error!("Delete failed: {err}");
                self.notices.push(Notice::failure("Delete failed."));
            }
        }
    }

    pub fn is_add_open(&self) -> bool {
        self.prefs.is_add_open()
    }

    /// Flips the add panel and persists the new state.
    pub fn toggle_add_panel(&mut self) -> Result<bool, PrefsError> {
        let open = !self.prefs.is_add_open();
        self.prefs.set_add_open(open)?;
        Ok(open)
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}
