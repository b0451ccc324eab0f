use std::fmt;
use std::str::FromStr;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Heading,
    Text,
    RichText,
    Image,
    Button,
    Form,
    SourceCode,
    Spacer,
    List,
}

impl BlockType {
    pub const ALL: [BlockType; 9] = [
        BlockType::Heading,
        BlockType::Text,
        BlockType::RichText,
        BlockType::Image,
        BlockType::Button,
        BlockType::Form,
        BlockType::SourceCode,
        BlockType::Spacer,
        BlockType::List,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Heading => "heading",
            Self::Text => "text",
            Self::RichText => "richtext",
            Self::Image => "image",
            Self::Button => "button",
            Self::Form => "form",
            Self::SourceCode => "sourcecode",
            Self::Spacer => "spacer",
            Self::List => "list",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow::anyhow!("unknown block type: {s}"))
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ImageSize {
    Small,
    #[default]
    Medium,
    Large,
    Full,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ButtonAction {
    Link,
    #[default]
    Apply,
    Submit,
    PageBreak,
    Email,
    Phone,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Outline,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ButtonSize {
    Small,
    #[default]
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FormFieldKind {
    #[default]
    Text,
    Email,
    Tel,
    Number,
    Textarea,
    Checkbox,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HeadingContent {
    pub text: String,
    pub level: u8,
    #[serde(default)]
    pub alignment: Alignment,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TextContent {
    pub text: String,
    #[serde(default)]
    pub alignment: Alignment,
    pub font_size: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RichTextContent {
    pub html: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageContent {
    pub src: String,
    pub alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default)]
    pub size: ImageSize,
    #[serde(default)]
    pub alignment: Alignment,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ButtonContent {
    pub text: String,
    #[serde(default)]
    pub action: ButtonAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub variant: ButtonVariant,
    #[serde(default)]
    pub size: ButtonSize,
    #[serde(default)]
    pub alignment: Alignment,
    #[serde(default)]
    pub full_width: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub label: String,
    #[serde(rename = "type", default)]
    pub kind: FormFieldKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub placeholder: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FormEmailConfig {
    pub recipient: String,
    pub subject: String,
    pub auto_reply_enabled: bool,
    pub auto_reply_message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormContent {
    #[serde(default)]
    pub embed_code: String,
    #[serde(default)]
    pub fields: Vec<FormField>,
    #[serde(default)]
    pub submit_label: String,
    #[serde(default)]
    pub email: FormEmailConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SourceCodeContent {
    pub code: String,
    pub language: String,
    #[serde(default)]
    pub sandbox: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpacerContent {
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListContent {
    pub items: Vec<String>,
    #[serde(default)]
    pub ordered: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BlockContent {
    Heading(HeadingContent),
    Text(TextContent),
    RichText(RichTextContent),
    Image(ImageContent),
    Button(ButtonContent),
    Form(FormContent),
    SourceCode(SourceCodeContent),
    Spacer(SpacerContent),
    List(ListContent),
}

impl BlockContent {
    pub fn block_type(&self) -> BlockType {
        match self {
            Self::Heading(_) => BlockType::Heading,
            Self::Text(_) => BlockType::Text,
            Self::RichText(_) => BlockType::RichText,
            Self::Image(_) => BlockType::Image,
            Self::Button(_) => BlockType::Button,
            Self::Form(_) => BlockType::Form,
            Self::SourceCode(_) => BlockType::SourceCode,
            Self::Spacer(_) => BlockType::Spacer,
            Self::List(_) => BlockType::List,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        match self {
            Self::Heading(c) => serde_json::to_value(c),
            Self::Text(c) => serde_json::to_value(c),
            Self::RichText(c) => serde_json::to_value(c),
            Self::Image(c) => serde_json::to_value(c),
            Self::Button(c) => serde_json::to_value(c),
            Self::Form(c) => serde_json::to_value(c),
            Self::SourceCode(c) => serde_json::to_value(c),
            Self::Spacer(c) => serde_json::to_value(c),
            Self::List(c) => serde_json::to_value(c),
        }
    }

    pub fn from_json(block_type: BlockType, value: serde_json::Value) -> anyhow::Result<Self> {
        let content = match block_type {
            BlockType::Heading => Self::Heading(serde_json::from_value(value)?),
            BlockType::Text => Self::Text(serde_json::from_value(value)?),
            BlockType::RichText => Self::RichText(serde_json::from_value(value)?),
            BlockType::Image => Self::Image(serde_json::from_value(value)?),
            BlockType::Button => Self::Button(serde_json::from_value(value)?),
            BlockType::Form => Self::Form(serde_json::from_value(value)?),
            BlockType::SourceCode => Self::SourceCode(serde_json::from_value(value)?),
            BlockType::Spacer => Self::Spacer(serde_json::from_value(value)?),
            BlockType::List => Self::List(serde_json::from_value(value)?),
        };
        Ok(content)
    }
}

pub fn default_content(block_type: BlockType) -> BlockContent {
    match block_type {
        BlockType::Heading => BlockContent::Heading(HeadingContent {
            text: "New heading".to_owned(),
            level: 2,
            alignment: Alignment::Center,
            color: "#1f2937".to_owned(),
        }),
        BlockType::Text => BlockContent::Text(TextContent {
            text: "Enter your text here.".to_owned(),
            alignment: Alignment::Left,
            font_size: 16,
        }),
        BlockType::RichText => BlockContent::RichText(RichTextContent {
            html: "<p>Rich text content</p>".to_owned(),
        }),
        BlockType::Image => BlockContent::Image(ImageContent {
            src: String::new(),
            alt: String::new(),
            caption: None,
            size: ImageSize::Medium,
            alignment: Alignment::Center,
        }),
        BlockType::Button => BlockContent::Button(ButtonContent {
            text: "Apply now".to_owned(),
            action: ButtonAction::Apply,
            url: None,
            variant: ButtonVariant::Primary,
            size: ButtonSize::Medium,
            alignment: Alignment::Center,
            full_width: false,
        }),
        BlockType::Form => BlockContent::Form(FormContent {
            embed_code: String::new(),
            fields: vec![
                FormField {
                    label: "Name".to_owned(),
                    kind: FormFieldKind::Text,
                    required: true,
                    placeholder: "Your name".to_owned(),
                },
                FormField {
                    label: "Email".to_owned(),
                    kind: FormFieldKind::Email,
                    required: true,
                    placeholder: "you@example.com".to_owned(),
                },
            ],
            submit_label: "Send".to_owned(),
            email: FormEmailConfig {
                recipient: String::new(),
                subject: "New form submission".to_owned(),
                auto_reply_enabled: false,
                auto_reply_message: String::new(),
            },
        }),
        BlockType::SourceCode => BlockContent::SourceCode(SourceCodeContent {
            code: String::new(),
            language: "html".to_owned(),
            sandbox: true,
        }),
        BlockType::Spacer => BlockContent::Spacer(SpacerContent {
            height: 40,
            background_color: None,
        }),
        BlockType::List => BlockContent::List(ListContent {
            items: vec!["First item".to_owned(), "Second item".to_owned()],
            ordered: false,
        }),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredBlock", into = "StoredBlock")]
pub struct ContentBlock {
    pub id: String,
    pub content: BlockContent,
    pub order: usize,
}

impl ContentBlock {
    pub fn block_type(&self) -> BlockType {
        self.content.block_type()
    }
}

#[derive(Serialize, Deserialize)]
struct StoredBlock {
    id: String,
    #[serde(rename = "type")]
    block_type: BlockType,
    content: serde_json::Value,
    #[serde(default)]
    order: usize,
}

impl TryFrom<StoredBlock> for ContentBlock {
    type Error = anyhow::Error;

    fn try_from(stored: StoredBlock) -> Result<Self, Self::Error> {
        let content = BlockContent::from_json(stored.block_type, stored.content)
            .with_context(|| format!("decode {} block {}", stored.block_type, stored.id))?;
        Ok(Self {
            id: stored.id,
            content,
            order: stored.order,
        })
    }
}

impl From<ContentBlock> for StoredBlock {
    fn from(block: ContentBlock) -> Self {
        Self {
            block_type: block.block_type(),
            // Plain structs of strings, numbers and enums always serialize.
            content: block.content.to_json().unwrap_or(serde_json::Value::Null),
            id: block.id,
            order: block.order,
        }
    }
}
