//! Media library service.

use crate::db::now_epoch_ms;
use crate::model::media::{MediaAsset, MediaId};
use crate::repo::media_repo::MediaRepository;
use crate::repo::post_repo::RepoResult;
use log::{debug, info};

const GENERATED_NAME_PROMPT_CHARS: usize = 30;

pub struct MediaService<R: MediaRepository> {
    repo: R,
}

impl<R: MediaRepository> MediaService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Stores an uploaded asset stamped with the current time.
    pub fn add_asset(&self, name: &str, url: &str) -> RepoResult<MediaAsset> {
        let asset = MediaAsset::new(name.trim(), url, now_epoch_ms());
        self.repo.insert_asset(&asset)?;
        info!("event=media_add module=media status=ok media_id={}", asset.id);
        Ok(asset)
    }

    /// Stores a generated image under a name derived from its prompt.
    pub fn add_generated_asset(&self, prompt: &str, url: &str) -> RepoResult<MediaAsset> {
        self.add_asset(&generated_asset_name(prompt), url)
    }

    /// Deletes an asset. `Ok(false)` when absent.
    pub fn delete_asset(&self, id: MediaId) -> RepoResult<bool> {
        let deleted = self.repo.delete_asset(id)?;
        if deleted {
            info!("event=media_delete module=media status=ok media_id={id}");
        } else {
            debug!("event=media_delete module=media status=noop media_id={id}");
        }
        Ok(deleted)
    }

    /// Newest first.
    pub fn list_assets(&self) -> RepoResult<Vec<MediaAsset>> {
        self.repo.list_assets()
    }
}

/// `Generated Image: <first 30 prompt chars>...`
pub fn generated_asset_name(prompt: &str) -> String {
    let head: String = prompt
        .trim()
        .chars()
        .take(GENERATED_NAME_PROMPT_CHARS)
        .collect();
    format!("Generated Image: {head}...")
}

#[cfg(test)]
mod tests {
    use super::generated_asset_name;

    #[test]
    fn generated_name_truncates_prompt_by_chars() {
        let name = generated_asset_name("A cat wearing a wizard hat in a misty forest at dawn");
        assert_eq!(name, "Generated Image: A cat wearing a wizard hat in ...");
    }
}
