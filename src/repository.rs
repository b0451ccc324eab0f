use std::sync::Arc;

use chrono::Utc;

use crate::block::{BlockContent, BlockType, ContentBlock, default_content};
use crate::error::{Error, Result};
use crate::kv::KeyValueStore;
use crate::model::{LandingPage, PageDesign, PageFooter, PageHeader, PagePatch};
use crate::slug::{generate_id, generate_unique_slug};
use crate::storage::StorageAccessor;

const ANONYMOUS_USER: &str = "anonymous";

#[derive(Debug)]
pub struct PageRepository<S> {
    storage: Arc<StorageAccessor<S>>,
    pages: Vec<LandingPage>,
}

impl<S: KeyValueStore> PageRepository<S> {
    pub fn load(storage: Arc<StorageAccessor<S>>) -> Result<Self> {
        let pages = storage.get_pages()?;
        tracing::debug!(pages = pages.len(), "loaded page collection");
        Ok(Self { storage, pages })
    }

    pub fn pages(&self) -> &[LandingPage] {
        &self.pages
    }

    pub fn get_page(&self, id: &str) -> Option<&LandingPage> {
        self.pages.iter().find(|p| p.id == id)
    }

    pub fn get_page_by_slug(&self, slug: &str) -> Option<&LandingPage> {
        self.pages.iter().find(|p| p.slug == slug)
    }

    pub fn create_page(&mut self, title: &str) -> Result<LandingPage> {
        let now = Utc::now();
        let slug = generate_unique_slug(title, self.pages.iter().map(|p| p.slug.as_str()));
        let page = LandingPage {
            id: generate_id(),
            slug,
            title: title.to_owned(),
            header: PageHeader {
                title: title.to_owned(),
                ..PageHeader::default()
            },
            blocks: Vec::new(),
            footer: PageFooter::default(),
            design: PageDesign::default(),
            seo_title: None,
            seo_description: None,
            created_at: now,
            updated_at: now,
            created_by: self.current_user_id()?,
            published: false,
        };

        let mut pages = self.pages.clone();
        pages.push(page.clone());
        self.commit(pages)?;
        tracing::info!(page_id = %page.id, slug = %page.slug, "created page");
        Ok(page)
    }

    pub fn update_page(&mut self, id: &str, patch: PagePatch) -> Result<Option<LandingPage>> {
        let new_slug = match &patch.slug {
            Some(requested) => Some(generate_unique_slug(
                requested,
                self.pages
                    .iter()
                    .filter(|p| p.id != id)
                    .map(|p| p.slug.as_str()),
            )),
            None => None,
        };

        let mut pages = self.pages.clone();
        let Some(page) = pages.iter_mut().find(|p| p.id == id) else {
            tracing::debug!(page_id = %id, "update_page: page not found");
            return Ok(None);
        };

        if let Some(title) = patch.title {
            page.title = title;
        }
        if let Some(slug) = new_slug {
            page.slug = slug;
        }
        if let Some(header) = patch.header {
            page.header = header;
        }
        if let Some(mut blocks) = patch.blocks {
            blocks.sort_by_key(|b| b.order);
            renumber(&mut blocks);
            page.blocks = blocks;
        }
        if let Some(footer) = patch.footer {
            page.footer = footer;
        }
        if let Some(design) = patch.design {
            page.design = design;
        }
        if let Some(seo_title) = patch.seo_title {
            page.seo_title = seo_title;
        }
        if let Some(seo_description) = patch.seo_description {
            page.seo_description = seo_description;
        }
        if let Some(published) = patch.published {
            page.published = published;
        }
        page.updated_at = Utc::now();

        let updated = page.clone();
        self.commit(pages)?;
        tracing::debug!(page_id = %id, "updated page");
        Ok(Some(updated))
    }

    pub fn delete_page(&mut self, id: &str) -> Result<bool> {
        let pages: Vec<LandingPage> = self.pages.iter().filter(|p| p.id != id).cloned().collect();
        if pages.len() == self.pages.len() {
            return Ok(false);
        }
        self.commit(pages)?;
        tracing::info!(page_id = %id, "deleted page");
        Ok(true)
    }

    pub fn duplicate_page(&mut self, id: &str) -> Result<Option<LandingPage>> {
        let Some(source) = self.get_page(id) else {
            return Ok(None);
        };

        let now = Utc::now();
        let title = format!("{} (Copy)", source.title);
        let slug = generate_unique_slug(&title, self.pages.iter().map(|p| p.slug.as_str()));
        let copy = LandingPage {
            id: generate_id(),
            slug,
            title,
            created_at: now,
            updated_at: now,
            created_by: self.current_user_id()?,
            published: false,
            ..source.clone()
        };

        let mut pages = self.pages.clone();
        pages.push(copy.clone());
        self.commit(pages)?;
        tracing::info!(source_id = %id, page_id = %copy.id, "duplicated page");
        Ok(Some(copy))
    }

    pub fn add_block(
        &mut self,
        page_id: &str,
        block_type: BlockType,
    ) -> Result<Option<ContentBlock>> {
        let Some(mut blocks) = self.blocks_in_order(page_id) else {
            return Ok(None);
        };

        let block = ContentBlock {
            id: generate_id(),
            content: default_content(block_type),
            order: blocks.len(),
        };
        blocks.push(block.clone());

        self.store_blocks(page_id, blocks)?;
        tracing::debug!(page_id = %page_id, block_id = %block.id, %block_type, "added block");
        Ok(Some(block))
    }

    pub fn update_block(
        &mut self,
        page_id: &str,
        block_id: &str,
        content: BlockContent,
    ) -> Result<bool> {
        let Some(mut blocks) = self.blocks_in_order(page_id) else {
            return Ok(false);
        };
        let Some(block) = blocks.iter_mut().find(|b| b.id == block_id) else {
            return Ok(false);
        };

        if block.block_type() != content.block_type() {
            return Err(Error::BlockTypeMismatch {
                block_id: block_id.to_owned(),
                expected: block.block_type(),
                actual: content.block_type(),
            });
        }
        block.content = content;

        self.store_blocks(page_id, blocks)?;
        Ok(true)
    }

    pub fn delete_block(&mut self, page_id: &str, block_id: &str) -> Result<bool> {
        let Some(mut blocks) = self.blocks_in_order(page_id) else {
            return Ok(false);
        };
        let before = blocks.len();
        blocks.retain(|b| b.id != block_id);
        if blocks.len() == before {
            return Ok(false);
        }

        self.store_blocks(page_id, blocks)?;
        tracing::debug!(page_id = %page_id, block_id = %block_id, "deleted block");
        Ok(true)
    }

    pub fn reorder_blocks(
        &mut self,
        page_id: &str,
        source: usize,
        destination: usize,
    ) -> Result<bool> {
        let Some(mut blocks) = self.blocks_in_order(page_id) else {
            return Ok(false);
        };
        let len = blocks.len();
        for index in [source, destination] {
            if index >= len {
                return Err(Error::IndexOutOfRange { index, len });
            }
        }

        let moved = blocks.remove(source);
        blocks.insert(destination, moved);

        self.store_blocks(page_id, blocks)?;
        tracing::debug!(page_id = %page_id, source, destination, "reordered blocks");
        Ok(true)
    }

    pub fn duplicate_block(
        &mut self,
        page_id: &str,
        block_id: &str,
    ) -> Result<Option<ContentBlock>> {
        let Some(mut blocks) = self.blocks_in_order(page_id) else {
            return Ok(None);
        };
        let Some(position) = blocks.iter().position(|b| b.id == block_id) else {
            return Ok(None);
        };

        let copy = ContentBlock {
            id: generate_id(),
            ..blocks[position].clone()
        };
        blocks.insert(position + 1, copy.clone());

        self.store_blocks(page_id, blocks)?;
        let copy = ContentBlock {
            order: position + 1,
            ..copy
        };
        Ok(Some(copy))
    }

    fn blocks_in_order(&self, page_id: &str) -> Option<Vec<ContentBlock>> {
        let page = self.get_page(page_id)?;
        let mut blocks = page.blocks.clone();
        blocks.sort_by_key(|b| b.order);
        Some(blocks)
    }

    fn store_blocks(&mut self, page_id: &str, mut blocks: Vec<ContentBlock>) -> Result<()> {
        renumber(&mut blocks);
        self.update_page(
            page_id,
            PagePatch {
                blocks: Some(blocks),
                ..PagePatch::default()
            },
        )?;
        Ok(())
    }

    fn current_user_id(&self) -> Result<String> {
        let user = self.storage.get_current_user()?;
        Ok(user.map_or_else(|| ANONYMOUS_USER.to_owned(), |u| u.id))
    }

    fn commit(&mut self, pages: Vec<LandingPage>) -> Result<()> {
        self.storage.save_pages(&pages)?;
        self.pages = pages;
        Ok(())
    }
}

pub fn renumber(blocks: &mut [ContentBlock]) {
    for (index, block) in blocks.iter_mut().enumerate() {
        block.order = index;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use chrono::DateTime;

    use super::*;
    use crate::block::{HeadingContent, ImageContent};
    use crate::kv::MemoryStore;
    use crate::model::{Role, User};

    #[derive(Debug, Default)]
    struct BrokenDisk {
        inner: MemoryStore,
        fail_writes: AtomicBool,
    }

    impl BrokenDisk {
        fn break_writes(&self) {
            self.fail_writes.store(true, Ordering::SeqCst);
        }
    }

    impl KeyValueStore for BrokenDisk {
        fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
            if self.fail_writes.load(Ordering::SeqCst) {
                anyhow::bail!("disk full");
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> anyhow::Result<()> {
            self.inner.remove(key)
        }
    }

    fn stale_page() -> Result<(PageRepository<MemoryStore>, String)> {
        let storage = Arc::new(StorageAccessor::new(MemoryStore::new()));
        let mut repo = PageRepository::load(Arc::clone(&storage))?;
        let page_id = page_with_blocks(&mut repo, 3)?;

        let mut pages = storage.get_pages()?;
        for page in &mut pages {
            page.updated_at = DateTime::<Utc>::default();
        }
        storage.save_pages(&pages)?;
        Ok((PageRepository::load(storage)?, page_id))
    }

    fn repo() -> PageRepository<MemoryStore> {
        let storage = Arc::new(StorageAccessor::new(MemoryStore::new()));
        PageRepository::load(storage).expect("load empty repository")
    }

    fn orders(page: &LandingPage) -> Vec<usize> {
        page.ordered_blocks().iter().map(|b| b.order).collect()
    }

    fn ids(page: &LandingPage) -> Vec<String> {
        page.ordered_blocks().iter().map(|b| b.id.clone()).collect()
    }

    fn page_with_blocks(repo: &mut PageRepository<MemoryStore>, n: usize) -> Result<String> {
        page_with_blocks_on(repo, n)
    }

    fn page_with_blocks_on<S: KeyValueStore>(
        repo: &mut PageRepository<S>,
        n: usize,
    ) -> Result<String> {
        let page = repo.create_page("Blocks")?;
        for i in 0..n {
            let block_type = BlockType::ALL[i % BlockType::ALL.len()];
            repo.add_block(&page.id, block_type)?;
        }
        Ok(page.id)
    }

    #[test]
    fn create_page_persists_and_derives_unique_slugs() -> Result<()> {
        let mut repo = repo();
        let first = repo.create_page("Marketing Job")?;
        let second = repo.create_page("Marketing Job")?;

        assert_eq!(first.slug, "marketing-job");
        assert_eq!(second.slug, "marketing-job-1");
        assert_eq!(first.header.title, "Marketing Job");
        assert!(!first.published);
        assert_eq!(first.created_by, "anonymous");
        assert_eq!(repo.storage.get_pages()?.len(), 2);
        Ok(())
    }

    #[test]
    fn create_page_stamps_current_user() -> Result<()> {
        let storage = Arc::new(StorageAccessor::new(MemoryStore::new()));
        storage.save_current_user(&User {
            id: "u1".to_owned(),
            name: "Ada".to_owned(),
            email: "ada@example.com".to_owned(),
            role: Role::Admin,
            created_at: Utc::now(),
        })?;
        let mut repo = PageRepository::load(storage)?;
        assert_eq!(repo.create_page("Hello")?.created_by, "u1");
        Ok(())
    }

    #[test]
    fn reload_sees_persisted_collection() -> Result<()> {
        let storage = Arc::new(StorageAccessor::new(MemoryStore::new()));
        let mut repo = PageRepository::load(Arc::clone(&storage))?;
        let page = repo.create_page("Persisted")?;
        repo.add_block(&page.id, BlockType::Heading)?;

        let reloaded = PageRepository::load(storage)?;
        let stored = reloaded.get_page(&page.id).expect("stored page");
        assert_eq!(stored.blocks.len(), 1);
        Ok(())
    }

    #[test]
    fn update_page_merges_fields_and_stamps_updated_at() -> Result<()> {
        let (mut repo, page_id) = stale_page()?;
        let page = repo.get_page(&page_id).cloned().expect("page");
        let before_call = Utc::now();

        let updated = repo
            .update_page(
                &page.id,
                PagePatch {
                    seo_title: Some(Some("SEO".to_owned())),
                    published: Some(true),
                    ..PagePatch::default()
                },
            )?
            .expect("page exists");

        assert!(updated.published);
        assert_eq!(updated.seo_title.as_deref(), Some("SEO"));
        assert_eq!(updated.title, "Blocks");
        assert!(updated.updated_at > page.updated_at);
        assert!(updated.updated_at >= before_call);
        Ok(())
    }

    #[test]
    fn block_operations_stamp_updated_at() -> Result<()> {
        let epoch = DateTime::<Utc>::default();

        let (mut repo, page_id) = stale_page()?;
        let before_call = Utc::now();
        repo.add_block(&page_id, BlockType::Text)?;
        let stamped = repo.get_page(&page_id).expect("page").updated_at;
        assert!(stamped > epoch && stamped >= before_call);

        let (mut repo, page_id) = stale_page()?;
        let victim = ids(repo.get_page(&page_id).expect("page"))[1].clone();
        let before_call = Utc::now();
        assert!(repo.delete_block(&page_id, &victim)?);
        assert!(repo.get_page(&page_id).expect("page").updated_at >= before_call);

        let (mut repo, page_id) = stale_page()?;
        let before_call = Utc::now();
        assert!(repo.reorder_blocks(&page_id, 0, 2)?);
        assert!(repo.get_page(&page_id).expect("page").updated_at >= before_call);
        Ok(())
    }

    #[test]
    fn patched_block_list_is_renumbered_densely() -> Result<()> {
        let mut repo = repo();
        let page_id = page_with_blocks(&mut repo, 3)?;
        let mut blocks = repo.get_page(&page_id).expect("page").blocks.clone();
        let expected = vec![blocks[0].id.clone(), blocks[2].id.clone()];
        blocks.remove(1);
        blocks.reverse();

        let patch = PagePatch {
            blocks: Some(blocks),
            ..PagePatch::default()
        };
        let updated = repo.update_page(&page_id, patch)?.expect("page");

        assert_eq!(orders(&updated), vec![0, 1]);
        assert_eq!(ids(&updated), expected);
        assert_eq!(repo.storage.get_pages()?[0].blocks, updated.blocks);
        Ok(())
    }

    #[test]
    fn failed_save_leaves_memory_matching_storage() -> Result<()> {
        let disk = Arc::new(StorageAccessor::new(BrokenDisk::default()));
        let mut repo = PageRepository::load(Arc::clone(&disk))?;
        let page_id = page_with_blocks_on(&mut repo, 2)?;
        disk.store().break_writes();

        assert!(repo.create_page("Q").is_err());
        assert!(repo.add_block(&page_id, BlockType::Text).is_err());
        assert!(repo.update_page(&page_id, PagePatch::published(true)).is_err());
        assert!(repo.reorder_blocks(&page_id, 0, 1).is_err());
        assert!(repo.duplicate_page(&page_id).is_err());
        assert!(repo.delete_page(&page_id).is_err());

        assert_eq!(repo.pages(), disk.get_pages()?.as_slice());
        let page = repo.get_page(&page_id).expect("page");
        assert_eq!(page.blocks.len(), 2);
        assert!(!page.published);
        Ok(())
    }

    #[test]
    fn update_page_slug_is_normalized_and_kept_unique() -> Result<()> {
        let mut repo = repo();
        let taken = repo.create_page("Taken")?;
        let page = repo.create_page("Other")?;

        let patch = PagePatch {
            slug: Some("Taken".to_owned()),
            ..PagePatch::default()
        };
        let updated = repo.update_page(&page.id, patch)?.expect("page exists");
        assert_eq!(updated.slug, "taken-1");

        let patch = PagePatch {
            slug: Some("taken".to_owned()),
            ..PagePatch::default()
        };
        let same = repo.update_page(&taken.id, patch)?.expect("page exists");
        assert_eq!(same.slug, "taken");
        Ok(())
    }

    #[test]
    fn operations_on_missing_page_are_no_ops() -> Result<()> {
        let mut repo = repo();
        let page = repo.create_page("Only")?;
        let before = repo.pages().to_vec();

        assert!(repo.update_page("missing", PagePatch::published(true))?.is_none());
        assert!(repo.add_block("missing", BlockType::Text)?.is_none());
        assert!(!repo.update_block("missing", "b", default_content(BlockType::Text))?);
        assert!(!repo.delete_block("missing", "b")?);
        assert!(!repo.reorder_blocks("missing", 0, 0)?);
        assert!(!repo.delete_page("missing")?);
        assert!(repo.duplicate_page("missing")?.is_none());
        assert!(!repo.delete_block(&page.id, "missing-block")?);

        assert_eq!(repo.pages(), before.as_slice());
        Ok(())
    }

    #[test]
    fn added_blocks_are_numbered_in_insertion_order() -> Result<()> {
        let mut repo = repo();
        for n in 0..12 {
            let page_id = page_with_blocks(&mut repo, n)?;
            let page = repo.get_page(&page_id).expect("page");
            assert_eq!(orders(page), (0..n).collect::<Vec<_>>());
            let types: Vec<BlockType> = page.blocks.iter().map(ContentBlock::block_type).collect();
            let expected: Vec<BlockType> = (0..n)
                .map(|i| BlockType::ALL[i % BlockType::ALL.len()])
                .collect();
            assert_eq!(types, expected);
        }
        Ok(())
    }

    #[test]
    fn delete_block_keeps_order_dense_and_survivors_in_sequence() -> Result<()> {
        let mut repo = repo();
        for n in 1..8 {
            for victim in 0..n {
                let page_id = page_with_blocks(&mut repo, n)?;
                let original = ids(repo.get_page(&page_id).expect("page"));

                assert!(repo.delete_block(&page_id, &original[victim])?);

                let page = repo.get_page(&page_id).expect("page");
                assert_eq!(orders(page), (0..n - 1).collect::<Vec<_>>());
                let mut expected = original.clone();
                expected.remove(victim);
                assert_eq!(ids(page), expected);
            }
        }
        Ok(())
    }

    #[test]
    fn reorder_moves_block_and_inverse_move_restores_sequence() -> Result<()> {
        let mut repo = repo();
        let n = 6;
        let page_id = page_with_blocks(&mut repo, n)?;
        let original = ids(repo.get_page(&page_id).expect("page"));

        for source in 0..n {
            for destination in 0..n {
                assert!(repo.reorder_blocks(&page_id, source, destination)?);
                let page = repo.get_page(&page_id).expect("page");
                assert_eq!(orders(page), (0..n).collect::<Vec<_>>());
                assert_eq!(ids(page)[destination], original[source]);

                assert!(repo.reorder_blocks(&page_id, destination, source)?);
                assert_eq!(ids(repo.get_page(&page_id).expect("page")), original);
            }
        }
        Ok(())
    }

    #[test]
    fn reorder_is_a_move_not_a_swap() -> Result<()> {
        let mut repo = repo();
        let page_id = page_with_blocks(&mut repo, 4)?;
        let original = ids(repo.get_page(&page_id).expect("page"));

        repo.reorder_blocks(&page_id, 0, 3)?;
        let moved = ids(repo.get_page(&page_id).expect("page"));
        assert_eq!(
            moved,
            vec![
                original[1].clone(),
                original[2].clone(),
                original[3].clone(),
                original[0].clone()
            ]
        );
        Ok(())
    }

    #[test]
    fn reorder_rejects_out_of_range_indices_without_change() -> Result<()> {
        let mut repo = repo();
        let page_id = page_with_blocks(&mut repo, 3)?;
        let before = repo.get_page(&page_id).cloned();

        let err = repo.reorder_blocks(&page_id, 0, 3).expect_err("out of range");
        assert!(matches!(err, Error::IndexOutOfRange { index: 3, len: 3 }));
        assert!(repo.reorder_blocks(&page_id, 7, 0).is_err());
        assert_eq!(repo.get_page(&page_id).cloned(), before);
        Ok(())
    }

    #[test]
    fn update_block_replaces_content_wholesale() -> Result<()> {
        let mut repo = repo();
        let page = repo.create_page("Replace")?;
        let block = repo.add_block(&page.id, BlockType::Image)?.expect("block");

        let first = BlockContent::Image(ImageContent {
            src: "a.png".to_owned(),
            alt: "A".to_owned(),
            caption: Some("Caption".to_owned()),
            ..match default_content(BlockType::Image) {
                BlockContent::Image(c) => c,
                _ => unreachable!(),
            }
        });
        assert!(repo.update_block(&page.id, &block.id, first)?);

        let second = BlockContent::Image(ImageContent {
            src: "b.png".to_owned(),
            alt: String::new(),
            caption: None,
            size: crate::block::ImageSize::Full,
            alignment: crate::block::Alignment::Left,
        });
        assert!(repo.update_block(&page.id, &block.id, second.clone())?);

        let stored = &repo.get_page(&page.id).expect("page").blocks[0];
        assert_eq!(stored.content, second);
        let BlockContent::Image(image) = &stored.content else {
            panic!("image block expected");
        };
        assert_eq!(image.caption, None);
        assert_eq!(image.alt, "");
        Ok(())
    }

    #[test]
    fn update_block_rejects_content_of_another_type() -> Result<()> {
        let mut repo = repo();
        let page = repo.create_page("Mismatch")?;
        let block = repo.add_block(&page.id, BlockType::Heading)?.expect("block");

        let err = repo
            .update_block(&page.id, &block.id, default_content(BlockType::Spacer))
            .expect_err("type mismatch");
        assert!(matches!(
            err,
            Error::BlockTypeMismatch {
                expected: BlockType::Heading,
                actual: BlockType::Spacer,
                ..
            }
        ));
        Ok(())
    }

    #[test]
    fn duplicate_page_gets_fresh_identity_and_equal_content() -> Result<()> {
        let mut repo = repo();
        let page = repo.create_page("Landing")?;
        repo.add_block(&page.id, BlockType::Heading)?;
        repo.add_block(&page.id, BlockType::Button)?;
        let source = repo
            .update_page(&page.id, PagePatch::published(true))?
            .expect("page");

        let copy = repo.duplicate_page(&page.id)?.expect("copy");
        assert_ne!(copy.id, source.id);
        assert_ne!(copy.slug, source.slug);
        assert_eq!(copy.slug, "landing-copy");
        assert_eq!(copy.title, "Landing (Copy)");
        assert!(!copy.published);
        assert_eq!(copy.blocks, source.blocks);
        assert_eq!(copy.header, source.header);
        assert_eq!(copy.design, source.design);
        assert_eq!(repo.pages().len(), 2);
        Ok(())
    }

    #[test]
    fn duplicate_block_inserts_copy_after_source() -> Result<()> {
        let mut repo = repo();
        let page = repo.create_page("Dup")?;
        let first = repo.add_block(&page.id, BlockType::Heading)?.expect("block");
        let last = repo.add_block(&page.id, BlockType::Spacer)?.expect("block");

        let copy = repo.duplicate_block(&page.id, &first.id)?.expect("copy");
        assert_eq!(copy.order, 1);
        assert_eq!(copy.content, first.content);

        let page = repo.get_page(&page.id).expect("page");
        assert_eq!(ids(page), vec![first.id, copy.id, last.id]);
        assert_eq!(orders(page), vec![0, 1, 2]);
        Ok(())
    }

    #[test]
    fn heading_edit_round_trips_through_storage() -> Result<()> {
        let storage = Arc::new(StorageAccessor::new(MemoryStore::new()));
        let mut repo = PageRepository::load(Arc::clone(&storage))?;
        let page = repo.create_page("Stored")?;
        let block = repo.add_block(&page.id, BlockType::Heading)?.expect("block");
        let content = BlockContent::Heading(HeadingContent {
            text: "Hello".to_owned(),
            level: 1,
            alignment: crate::block::Alignment::Left,
            color: "#000000".to_owned(),
        });
        repo.update_block(&page.id, &block.id, content.clone())?;

        let stored = storage.get_pages()?;
        assert_eq!(stored[0].blocks[0].content, content);
        Ok(())
    }

    #[test]
    fn get_page_by_slug_returns_first_match() -> Result<()> {
        let mut repo = repo();
        let page = repo.create_page("Find Me")?;
        assert_eq!(
            repo.get_page_by_slug("find-me").map(|p| p.id.as_str()),
            Some(page.id.as_str())
        );
        assert!(repo.get_page_by_slug("nope").is_none());
        Ok(())
    }
}
