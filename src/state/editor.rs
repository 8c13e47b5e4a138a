#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

use crate::net::types::NewPost;

/// Tags beyond this count are dropped at publish time.
pub const MAX_TAGS: usize = 4;

/// In-progress post draft backing the composer.
///
/// Fields mirror the composer's inputs directly; derived values (parsed
/// tags, publishability) are computed on demand.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub cover_image: String,
    pub title: String,
    pub tags_line: String,
    pub body: String,
    pub publishing: bool,
}

impl PostDraft {
    /// A draft can be published once it has a title and a body, and no
    /// publish call is already in flight.
    #[must_use]
    pub fn publishable(&self) -> bool {
        !self.publishing && !self.title.trim().is_empty() && !self.body.trim().is_empty()
    }

    /// Parse the free-text tags line: split on commas and whitespace,
    /// lowercase, drop duplicates, keep at most [`MAX_TAGS`].
    #[must_use]
    pub fn tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = Vec::new();
        for raw in self
            .tags_line
            .split(|c: char| c == ',' || c.is_whitespace())
        {
            let tag = raw.trim().to_lowercase();
            if tag.is_empty() || tags.contains(&tag) {
                continue;
            }
            tags.push(tag);
            if tags.len() == MAX_TAGS {
                break;
            }
        }
        tags
    }

    /// Build the publish payload. A blank cover image becomes `None`.
    #[must_use]
    pub fn to_post(&self) -> NewPost {
        let cover = self.cover_image.trim();
        NewPost {
            title: self.title.trim().to_owned(),
            tags: self.tags(),
            body: self.body.clone(),
            cover_image: if cover.is_empty() {
                None
            } else {
                Some(cover.to_owned())
            },
        }
    }
}
