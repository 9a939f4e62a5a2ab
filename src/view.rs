/// View binding for the report area
use crate::render::UiUpdate;

/// The surface render updates are applied to
pub trait ReportView {
    fn set_text(&mut self, text: &str);
    fn set_title(&mut self, title: &str);
    fn set_image(&mut self, src: &str);
    fn clear_tags(&mut self);
    fn add_tag(&mut self, tag: &str);
}

/// Apply `updates` to `view` in order
pub fn apply<V: ReportView + ?Sized>(view: &mut V, updates: &[UiUpdate]) {
    for update in updates {
        match update {
            UiUpdate::SetText(text) => view.set_text(text),
            UiUpdate::SetTitle(title) => view.set_title(title),
            UiUpdate::SetImage(src) => view.set_image(src),
            UiUpdate::ClearTags => view.clear_tags(),
            UiUpdate::AddTag(tag) => view.add_tag(tag),
        }
    }
}

/// In-memory state of the report area; the popup component renders it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportPanel {
    pub text: String,
    pub title: String,
    pub image: Option<String>,
    pub tags: Vec<String>,
}

impl ReportView for ReportPanel {
    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn set_image(&mut self, src: &str) {
        self.image = Some(src.to_string());
    }

    fn clear_tags(&mut self) {
        self.tags.clear();
    }

    fn add_tag(&mut self, tag: &str) {
        self.tags.push(tag.to_string());
    }
}

/// Contents of the video id input box
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdField {
    value: String,
}

impl IdField {
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Typed by the user or sent by the background script
    pub fn set(&mut self, value: String) {
        self.value = value;
    }

    /// Fill in the active tab's id, but only while the box is still blank.
    ///
    /// The tab query can resolve after the user typed or a message arrived.
    pub fn offer(&mut self, value: String) -> bool {
        if value.is_empty() || !self.value.trim().is_empty() {
            return false;
        }
        self.value = value;
        true
    }
}
