use super::confirm::Confirm;
use super::document::CategoryStore;
use super::types::{AddVideoError, StoreError};
use crate::storage::KeyValueStore;
use crate::util::extract_video_id;

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

impl<S: KeyValueStore> CategoryStore<S> {
    // ========================================================================
    // Video Operations
    // ========================================================================

    /// Save the video behind `url` into a category, returning its id.
    ///
    /// The duplicate check looks at the category named exactly
    /// `category_name`; the id is then appended to every category whose name
    /// matches case-insensitively, and each touched list is deduplicated.
    ///
    /// # Errors
    ///
    /// - [`AddVideoError::InvalidUrl`] when no id can be extracted from `url`
    /// - [`AddVideoError::Duplicate`] when the category already holds the id
    /// - [`AddVideoError::CategoryNotFound`] when no category matches at all
    pub async fn add_video(&self, category_name: &str, url: &str) -> Result<String, AddVideoError> {
        let video_id = extract_video_id(url)
            .ok_or(AddVideoError::InvalidUrl)?
            .to_owned();

        let mut categories = self.load().await?;

        let already_saved = categories
            .iter()
            .find(|c| c.name == category_name)
            .is_some_and(|c| c.contains(&video_id));
        if already_saved {
            return Err(AddVideoError::Duplicate);
        }

        let mut matched = 0usize;
        for category in categories
            .iter_mut()
            .filter(|c| eq_ignore_case(&c.name, category_name))
        {
            category.videos.push(video_id.clone());
            category.dedup_videos();
            matched += 1;
        }
        if matched == 0 {
            return Err(AddVideoError::CategoryNotFound(category_name.to_owned()));
        }

        self.save(&categories).await?;
        tracing::debug!(category = %category_name, video_id = %video_id, "Added video");
        Ok(video_id)
    }

    /// Video ids of the category named exactly `name`.
    ///
    /// A missing category and an empty one both yield an empty list.
    pub async fn videos_for_category(&self, name: &str) -> Result<Vec<String>, StoreError> {
        Ok(self
            .find_category(name)
            .await?
            .map(|c| c.videos)
            .unwrap_or_default())
    }

    /// Remove `video_id` from the category named exactly `category_name`.
    ///
    /// `confirm` is asked first; declining returns `Ok(false)` without reading
    /// or writing storage. Also returns `Ok(false)` when the category does not
    /// exist. Removing an id the category doesn't hold still rewrites the
    /// document and returns `Ok(true)`.
    pub async fn delete_video<C>(
        &self,
        category_name: &str,
        video_id: &str,
        confirm: &C,
    ) -> Result<bool, StoreError>
    where
        C: Confirm + ?Sized,
    {
        if !confirm.confirm(&format!("Really delete video '{video_id}'?")) {
            tracing::debug!(category = %category_name, video_id = %video_id, "Video deletion declined");
            return Ok(false);
        }

        let mut categories = self.load().await?;
        let mut matched = false;
        for category in categories.iter_mut().filter(|c| c.name == category_name) {
            category.videos.retain(|v| v != video_id);
            matched = true;
        }
        if !matched {
            tracing::debug!(category = %category_name, "Category not found for video deletion");
            return Ok(false);
        }

        self.save(&categories).await?;
        tracing::debug!(category = %category_name, video_id = %video_id, "Deleted video");
        Ok(true)
    }
}
