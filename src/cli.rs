use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Directory holding the JSON documents (default: $PAGESMITH_DATA_DIR or `pagesmith-data`).
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Page {
        #[command(subcommand)]
        command: PageCommand,
    },
    Block {
        #[command(subcommand)]
        command: BlockCommand,
    },
    User {
        #[command(subcommand)]
        command: UserCommand,
    },
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },
    Media {
        #[command(subcommand)]
        command: MediaCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum PageCommand {
    /// Create an empty draft page.
    Create {
        #[arg(long)]
        title: String,
    },
    List,
    /// Print a page as JSON.
    Show { page: String },
    Update(PageUpdateArgs),
    Publish { page: String },
    Unpublish { page: String },
    Duplicate { page: String },
    Delete { page: String },
    /// Render a page to HTML.
    Render(PageRenderArgs),
}

#[derive(Debug, Args)]
pub struct PageUpdateArgs {
    /// Page id or slug.
    pub page: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub slug: Option<String>,

    /// SEO title; pass an empty string to clear.
    #[arg(long)]
    pub seo_title: Option<String>,

    /// SEO description; pass an empty string to clear.
    #[arg(long)]
    pub seo_description: Option<String>,

    #[arg(long)]
    pub header_title: Option<String>,

    #[arg(long)]
    pub header_subtitle: Option<String>,

    #[arg(long)]
    pub header_text: Option<String>,

    /// Custom footer text; pass an empty string to clear.
    #[arg(long)]
    pub footer_text: Option<String>,

    #[arg(long)]
    pub primary_color: Option<String>,
}

#[derive(Debug, Args)]
pub struct PageRenderArgs {
    /// Page id or slug.
    pub page: String,

    /// Render the builder preview (drafts included) instead of the public view.
    #[arg(long)]
    pub preview: bool,

    /// Output file (default: stdout).
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum BlockCommand {
    /// Append a block with default content.
    Add { page: String, block_type: String },
    /// List the editable fields of a block with their current values.
    Fields { page: String, block: String },
    /// Edit fields, given as `key=value`.
    Set {
        page: String,
        block: String,
        #[arg(required = true)]
        edits: Vec<String>,
    },
    Delete { page: String, block: String },
    /// Move the block at index `from` to index `to`.
    Move {
        page: String,
        #[arg(long)]
        from: usize,
        #[arg(long)]
        to: usize,
    },
    Duplicate { page: String, block: String },
    /// Upload an image file and use it as the image block's source.
    Image {
        page: String,
        block: String,
        #[arg(long)]
        file: PathBuf,
    },
}

#[derive(Debug, Subcommand)]
pub enum UserCommand {
    List,
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "editor")]
        role: String,
    },
    Delete { id: String },
    Promote { id: String },
    Demote { id: String },
    /// Make a user the current user (stamped as page creator).
    Login { id: String },
    Logout,
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    Show,
    Set(SettingsSetArgs),
}

#[derive(Debug, Args)]
pub struct SettingsSetArgs {
    #[arg(long)]
    pub company_name: Option<String>,

    /// Logo URL; pass an empty string to clear.
    #[arg(long)]
    pub company_logo: Option<String>,

    #[arg(long)]
    pub cookie_banner: Option<bool>,

    #[arg(long)]
    pub analytics_cookies: Option<bool>,

    #[arg(long)]
    pub marketing_cookies: Option<bool>,

    #[arg(long)]
    pub preference_cookies: Option<bool>,
}

#[derive(Debug, Subcommand)]
pub enum MediaCommand {
    Add { file: PathBuf },
    List,
    Delete { id: String },
}
