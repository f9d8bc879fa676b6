use chrono::{DateTime, Local};
use uuid::Uuid;

use crate::refine::Style;

/// One successful refinement kept for the session.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryItem {
    pub id: Uuid,
    /// Refined image (data URL).
    pub image: String,
    pub style: Style,
    pub timestamp: DateTime<Local>,
}

/// In-memory history of refinements, oldest first.
#[derive(Debug, Clone, Default)]
pub struct Gallery {
    items: Vec<GalleryItem>,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an item with a fresh id and the current time.
    pub fn add(&mut self, image: String, style: Style) -> &GalleryItem {
        let item = GalleryItem {
            id: Uuid::new_v4(),
            image,
            style,
            timestamp: Local::now(),
        };
        log::debug!("Gallery item {} added ({})", item.id, style);
        self.items.push(item);
        &self.items[self.items.len() - 1]
    }

    /// Removes the item with `id`. Returns false if there was none.
    pub fn delete(&mut self, id: Uuid) -> bool {
        match self.items.iter().position(|item| item.id == id) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: Uuid) -> Option<&GalleryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
