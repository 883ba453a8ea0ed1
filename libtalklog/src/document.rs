//! Pure mutation operations on posts
//!
//! Every operation takes `&self` and returns a new `Post`; the document
//! model holds no notion of "current" state. Operations are total over a
//! well-formed post: a mutation addressed to an unknown block id returns
//! the post unchanged rather than failing, so a delete racing an in-flight
//! edit cannot corrupt the document.

use crate::types::{Block, BlockKind, Post};

impl Post {
    /// Append a new block of the given kind with its default value
    pub fn add_block(&self, kind: BlockKind) -> Post {
        let mut next = self.clone();
        next.content.push(Block::new(kind));
        next
    }

    /// Replace the value of the block matching `id`
    ///
    /// Unknown id is a no-op; all other blocks are unchanged.
    pub fn update_block_value(&self, id: &str, value: impl Into<String>) -> Post {
        let mut next = self.clone();
        if let Some(block) = next.content.iter_mut().find(|b| b.id == id) {
            block.value = value.into();
        }
        next
    }

    /// Remove the block matching `id`, preserving the order of the rest
    pub fn delete_block(&self, id: &str) -> Post {
        let mut next = self.clone();
        next.content.retain(|b| b.id != id);
        next
    }

    /// Move the block matching `id` to `index`
    ///
    /// The target index is clamped to the valid range. Unknown id is a
    /// no-op.
    pub fn move_block(&self, id: &str, index: usize) -> Post {
        let mut next = self.clone();
        if let Some(from) = next.content.iter().position(|b| b.id == id) {
            let block = next.content.remove(from);
            let to = index.min(next.content.len());
            next.content.insert(to, block);
        }
        next
    }

    /// Replace the title
    pub fn set_title(&self, title: impl Into<String>) -> Post {
        let mut next = self.clone();
        next.title = title.into();
        next
    }

    /// Add a tag
    ///
    /// Whitespace is trimmed and one leading `#` stripped. Empty-after-trim
    /// input and case-sensitive duplicates are no-ops.
    pub fn add_tag(&self, raw: &str) -> Post {
        let trimmed = raw.trim();
        let tag = trimmed.strip_prefix('#').unwrap_or(trimmed).trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return self.clone();
        }
        let mut next = self.clone();
        next.tags.push(tag.to_string());
        next
    }

    /// Remove a tag; unknown tag is a no-op
    pub fn remove_tag(&self, tag: &str) -> Post {
        let mut next = self.clone();
        next.tags.retain(|t| t != tag);
        next
    }

    /// Rebuild the post wholesale from a generation result
    ///
    /// Each paragraph becomes a text block. When at least one image is
    /// available, every paragraph is followed by an image block, cycling
    /// through the images in order (`images[i % images.len()]` for the
    /// paragraph at position `i`), so output is reproducible given the
    /// same inputs. Zero images means text blocks only.
    pub fn replace_from_generation(
        &self,
        paragraphs: &[String],
        images: &[String],
        title: &str,
        tags: &[String],
    ) -> Post {
        let mut content = Vec::with_capacity(if images.is_empty() {
            paragraphs.len()
        } else {
            paragraphs.len() * 2
        });

        for (i, paragraph) in paragraphs.iter().enumerate() {
            content.push(Block::with_value(BlockKind::Text, paragraph.clone()));
            if !images.is_empty() {
                let image = &images[i % images.len()];
                content.push(Block::with_value(BlockKind::Image, image.clone()));
            }
        }

        let mut next = Post {
            title: title.to_string(),
            content,
            tags: Vec::new(),
        };
        for tag in tags {
            next = next.add_tag(tag);
        }
        next
    }
}
