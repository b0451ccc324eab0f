use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;

use crate::block::{BlockContent, BlockType};
use crate::cli::{
    BlockCommand, MediaCommand, PageCommand, PageRenderArgs, PageUpdateArgs, SettingsCommand,
    SettingsSetArgs, UserCommand,
};
use crate::editor::BlockEditor;
use crate::kv::KeyValueStore;
use crate::media::MediaLibrary;
use crate::model::{LandingPage, PagePatch, Role, UserPatch};
use crate::notify::{Notifier, TracingNotifier};
use crate::render::{PageView, render_preview_page, render_public_page};
use crate::repository::PageRepository;
use crate::storage::StorageAccessor;
use crate::users::UserDirectory;

pub fn page<S: KeyValueStore>(
    storage: Arc<StorageAccessor<S>>,
    command: PageCommand,
) -> anyhow::Result<()> {
    let mut repo = PageRepository::load(Arc::clone(&storage)).context("load pages")?;
    let notifier = TracingNotifier;

    match command {
        PageCommand::Create { title } => {
            let page = repo.create_page(&title)?;
            notifier.success(&format!("Created page \"{}\"", page.title));
            println!("{}\t{}", page.id, page.slug);
        }
        PageCommand::List => {
            for page in repo.pages() {
                let state = if page.published { "published" } else { "draft" };
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    page.id,
                    page.slug,
                    state,
                    page.blocks.len(),
                    page.title
                );
            }
        }
        PageCommand::Show { page } => {
            let page = resolve_page(&repo, &page)?;
            println!(
                "{}",
                serde_json::to_string_pretty(page).context("serialize page")?
            );
        }
        PageCommand::Update(args) => {
            let id = resolve_page(&repo, &args.page)?.id.clone();
            let patch = page_patch(&repo, &id, args)?;
            let page = repo
                .update_page(&id, patch)?
                .ok_or_else(|| anyhow::anyhow!("page disappeared: {id}"))?;
            notifier.success("Page saved");
            println!("{}\t{}", page.id, page.slug);
        }
        PageCommand::Publish { page } => set_published(&mut repo, &page, true)?,
        PageCommand::Unpublish { page } => set_published(&mut repo, &page, false)?,
        PageCommand::Duplicate { page } => {
            let id = resolve_page(&repo, &page)?.id.clone();
            let copy = repo
                .duplicate_page(&id)?
                .ok_or_else(|| anyhow::anyhow!("page not found: {page}"))?;
            notifier.success(&format!("Duplicated as \"{}\"", copy.title));
            println!("{}\t{}", copy.id, copy.slug);
        }
        PageCommand::Delete { page } => {
            let id = resolve_page(&repo, &page)?.id.clone();
            repo.delete_page(&id)?;
            notifier.success("Page deleted");
        }
        PageCommand::Render(args) => render(&repo, &storage, args)?,
    }

    Ok(())
}

pub fn block<S: KeyValueStore>(
    storage: Arc<StorageAccessor<S>>,
    command: BlockCommand,
) -> anyhow::Result<()> {
    let mut repo = PageRepository::load(Arc::clone(&storage)).context("load pages")?;
    let notifier = TracingNotifier;

    match command {
        BlockCommand::Add { page, block_type } => {
            let block_type: BlockType = block_type.parse()?;
            let id = resolve_page(&repo, &page)?.id.clone();
            let block = repo
                .add_block(&id, block_type)?
                .ok_or_else(|| anyhow::anyhow!("page not found: {page}"))?;
            println!("{}\t{}\t{}", block.id, block.block_type(), block.order);
        }
        BlockCommand::Fields { page, block } => {
            let page = resolve_page(&repo, &page)?;
            let block = page
                .blocks
                .iter()
                .find(|b| b.id == block)
                .ok_or_else(|| anyhow::anyhow!("block not found: {block}"))?;
            let editor = BlockEditor::new(block, |_| {});
            for field in editor.fields() {
                println!("{}\t{}\t{:?}", field.key, field.label, field.value);
            }
        }
        BlockCommand::Set { page, block, edits } => {
            let page_id = resolve_page(&repo, &page)?.id.clone();
            let content = edit_block(&repo, &page_id, &block, &edits)?;
            repo.update_block(&page_id, &block, content)?;
            notifier.success("Block updated");
        }
        BlockCommand::Delete { page, block } => {
            let page_id = resolve_page(&repo, &page)?.id.clone();
            if !repo.delete_block(&page_id, &block)? {
                anyhow::bail!("block not found: {block}");
            }
        }
        BlockCommand::Move { page, from, to } => {
            let page_id = resolve_page(&repo, &page)?.id.clone();
            repo.reorder_blocks(&page_id, from, to)?;
        }
        BlockCommand::Duplicate { page, block } => {
            let page_id = resolve_page(&repo, &page)?.id.clone();
            let copy = repo
                .duplicate_block(&page_id, &block)?
                .ok_or_else(|| anyhow::anyhow!("block not found: {block}"))?;
            println!("{}\t{}\t{}", copy.id, copy.block_type(), copy.order);
        }
        BlockCommand::Image { page, block, file } => {
            let page_id = resolve_page(&repo, &page)?.id.clone();
            let content = upload_into_image_block(&repo, &storage, &page_id, &block, &file)?;
            repo.update_block(&page_id, &block, content)?;
        }
    }

    Ok(())
}

pub fn user<S: KeyValueStore>(
    storage: Arc<StorageAccessor<S>>,
    command: UserCommand,
) -> anyhow::Result<()> {
    let users = UserDirectory::new(storage);

    match command {
        UserCommand::List => {
            let current = users.current_user()?.map(|u| u.id);
            for user in users.users()? {
                let marker = if current.as_deref() == Some(user.id.as_str()) {
                    "*"
                } else {
                    ""
                };
                println!(
                    "{}{}\t{}\t{}\t{}",
                    user.id, marker, user.role, user.email, user.name
                );
            }
        }
        UserCommand::Add { name, email, role } => {
            let role: Role = role.parse()?;
            let user = users.add_user(&name, &email, role)?;
            println!("{}", user.id);
        }
        UserCommand::Delete { id } => users.delete_user(&id)?,
        UserCommand::Promote { id } => set_role(&users, &id, Role::Admin)?,
        UserCommand::Demote { id } => set_role(&users, &id, Role::Editor)?,
        UserCommand::Login { id } => {
            let user = users.set_current_user(&id)?;
            println!("{}\t{}", user.id, user.name);
        }
        UserCommand::Logout => users.logout()?,
    }

    Ok(())
}

pub fn settings<S: KeyValueStore>(
    storage: Arc<StorageAccessor<S>>,
    command: SettingsCommand,
) -> anyhow::Result<()> {
    match command {
        SettingsCommand::Show => {
            let settings = storage.get_settings()?;
            println!(
                "{}",
                serde_json::to_string_pretty(&settings).context("serialize settings")?
            );
        }
        SettingsCommand::Set(args) => {
            let SettingsSetArgs {
                company_name,
                company_logo,
                cookie_banner,
                analytics_cookies,
                marketing_cookies,
                preference_cookies,
            } = args;
            let mut settings = storage.get_settings()?;
            if let Some(name) = company_name {
                settings.company_name = name;
            }
            if let Some(logo) = company_logo {
                settings.company_logo = non_empty(logo);
            }
            if let Some(enabled) = cookie_banner {
                settings.cookie_banner_enabled = enabled;
            }
            if let Some(enabled) = analytics_cookies {
                settings.cookie_categories.analytics = enabled;
            }
            if let Some(enabled) = marketing_cookies {
                settings.cookie_categories.marketing = enabled;
            }
            if let Some(enabled) = preference_cookies {
                settings.cookie_categories.preferences = enabled;
            }
            storage.save_settings(&settings)?;
            TracingNotifier.success("Settings saved");
        }
    }
    Ok(())
}

pub fn media<S: KeyValueStore>(
    storage: Arc<StorageAccessor<S>>,
    command: MediaCommand,
) -> anyhow::Result<()> {
    let library = MediaLibrary::new(storage);

    match command {
        MediaCommand::Add { file } => {
            let item = library
                .upload(&file, &TracingNotifier)?
                .ok_or_else(|| anyhow::anyhow!("upload rejected: {}", file.display()))?;
            println!("{}\t{}\t{}", item.id, item.mime_type, item.size);
        }
        MediaCommand::List => {
            for item in library.items()? {
                println!(
                    "{}\t{}\t{}\t{}",
                    item.id, item.mime_type, item.size, item.name
                );
            }
        }
        MediaCommand::Delete { id } => {
            if !library.delete(&id)? {
                anyhow::bail!("media item not found: {id}");
            }
        }
    }
    Ok(())
}

fn resolve_page<'a, S: KeyValueStore>(
    repo: &'a PageRepository<S>,
    key: &str,
) -> anyhow::Result<&'a LandingPage> {
    repo.get_page(key)
        .or_else(|| repo.get_page_by_slug(key))
        .ok_or_else(|| anyhow::anyhow!("page not found: {key}"))
}

fn set_published<S: KeyValueStore>(
    repo: &mut PageRepository<S>,
    key: &str,
    published: bool,
) -> anyhow::Result<()> {
    let id = resolve_page(repo, key)?.id.clone();
    let page = repo
        .update_page(&id, PagePatch::published(published))?
        .ok_or_else(|| anyhow::anyhow!("page not found: {key}"))?;
    let state = if published { "published" } else { "unpublished" };
    TracingNotifier.success(&format!("Page {state}"));
    println!("{}\t{}\t{state}", page.id, page.slug);
    Ok(())
}

fn page_patch<S: KeyValueStore>(
    repo: &PageRepository<S>,
    id: &str,
    args: PageUpdateArgs,
) -> anyhow::Result<PagePatch> {
    let page = resolve_page(repo, id)?;

    let header = if args.header_title.is_some()
        || args.header_subtitle.is_some()
        || args.header_text.is_some()
    {
        let mut header = page.header.clone();
        if let Some(title) = args.header_title {
            header.title = title;
        }
        if let Some(subtitle) = args.header_subtitle {
            header.subtitle = subtitle;
        }
        if let Some(text) = args.header_text {
            header.text = text;
        }
        Some(header)
    } else {
        None
    };

    let footer = args.footer_text.map(|text| {
        let mut footer = page.footer.clone();
        footer.custom_text = non_empty(text);
        footer
    });

    let design = args.primary_color.map(|color| {
        let mut design = page.design.clone();
        design.primary_color = color;
        design
    });

    Ok(PagePatch {
        title: args.title,
        slug: args.slug,
        header,
        footer,
        design,
        seo_title: args.seo_title.map(non_empty),
        seo_description: args.seo_description.map(non_empty),
        ..PagePatch::default()
    })
}

fn render<S: KeyValueStore>(
    repo: &PageRepository<S>,
    storage: &StorageAccessor<S>,
    args: PageRenderArgs,
) -> anyhow::Result<()> {
    let page = resolve_page(repo, &args.page)?;
    let settings = storage.get_settings()?;

    let html = if args.preview {
        render_preview_page(page, &settings)
    } else {
        match render_public_page(page, &settings) {
            PageView::Rendered(html) => html,
            PageView::NotAvailable => anyhow::bail!("page is not published: {}", page.slug),
        }
    };

    match args.out {
        Some(path) => std::fs::write(&path, html)
            .with_context(|| format!("write rendered page: {}", path.display()))?,
        None => print!("{html}"),
    }
    Ok(())
}

fn edit_block<S: KeyValueStore>(
    repo: &PageRepository<S>,
    page_id: &str,
    block_id: &str,
    edits: &[String],
) -> anyhow::Result<BlockContent> {
    let page = resolve_page(repo, page_id)?;
    let block = page
        .blocks
        .iter()
        .find(|b| b.id == block_id)
        .ok_or_else(|| anyhow::anyhow!("block not found: {block_id}"))?;

    let mut latest = None;
    let mut editor = BlockEditor::new(block, |content| latest = Some(content));
    for edit in edits {
        let (key, value) = edit
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("edit must look like key=value: {edit}"))?;
        editor.edit(key.trim(), value)?;
    }
    drop(editor);

    latest.ok_or_else(|| anyhow::anyhow!("no edits given"))
}

fn upload_into_image_block<S: KeyValueStore>(
    repo: &PageRepository<S>,
    storage: &Arc<StorageAccessor<S>>,
    page_id: &str,
    block_id: &str,
    file: &Path,
) -> anyhow::Result<BlockContent> {
    let page = resolve_page(repo, page_id)?;
    let block = page
        .blocks
        .iter()
        .find(|b| b.id == block_id)
        .ok_or_else(|| anyhow::anyhow!("block not found: {block_id}"))?;
    let BlockContent::Image(image) = &block.content else {
        anyhow::bail!("block {block_id} is a {} block, not image", block.block_type());
    };

    let library = MediaLibrary::new(Arc::clone(storage));
    let item = library
        .upload(file, &TracingNotifier)?
        .ok_or_else(|| anyhow::anyhow!("upload rejected: {}", file.display()))?;

    let mut image = image.clone();
    if image.alt.trim().is_empty() {
        image.alt = item.name.clone();
    }
    image.src = item.data_uri;

    let mut latest = None;
    BlockEditor::new(block, |content| latest = Some(content)).replace(BlockContent::Image(image));
    latest.ok_or_else(|| anyhow::anyhow!("image edit was not applied"))
}

fn set_role<S: KeyValueStore>(
    users: &UserDirectory<S>,
    id: &str,
    role: Role,
) -> anyhow::Result<()> {
    let patch = UserPatch {
        role: Some(role),
        ..UserPatch::default()
    };
    let user = users.update_user(id, patch)?;
    println!("{}\t{}", user.id, user.role);
    Ok(())
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
