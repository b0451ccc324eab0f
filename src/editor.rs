use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::block::{
    BlockContent, BlockType, ButtonContent, ContentBlock, FormContent, FormField, HeadingContent,
    ImageContent, ListContent, RichTextContent, SourceCodeContent, SpacerContent, TextContent,
};

const ALIGNMENTS: &[&str] = &["left", "center", "right"];
const IMAGE_SIZES: &[&str] = &["small", "medium", "large", "full"];
const BUTTON_ACTIONS: &[&str] = &["link", "apply", "submit", "pagebreak", "email", "phone"];
const BUTTON_VARIANTS: &[&str] = &["primary", "secondary", "outline"];
const BUTTON_SIZES: &[&str] = &["small", "medium", "large"];
const CODE_LANGUAGES: &[&str] = &["html", "css", "javascript"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("{block_type} blocks have no field named {key:?}")]
    UnknownField { block_type: BlockType, key: String },

    #[error("invalid value {value:?} for {key}: expected {expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextArea,
    Number { min: u32, max: u32 },
    Color,
    Select(&'static [&'static str]),
    Toggle,
    Code,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub value: String,
}

impl FieldSpec {
    fn new(key: &'static str, label: &'static str, kind: FieldKind, value: String) -> Self {
        Self {
            key,
            label,
            kind,
            value,
        }
    }
}

pub fn form_fields(content: &BlockContent) -> Vec<FieldSpec> {
    use FieldKind::*;

    match content {
        BlockContent::Heading(c) => vec![
            FieldSpec::new("text", "Text", Text, c.text.clone()),
            FieldSpec::new("level", "Level", Number { min: 1, max: 6 }, c.level.to_string()),
            FieldSpec::new("alignment", "Alignment", Select(ALIGNMENTS), enum_name(&c.alignment)),
            FieldSpec::new("color", "Color", Color, c.color.clone()),
        ],
        BlockContent::Text(c) => vec![
            FieldSpec::new("text", "Text", TextArea, c.text.clone()),
            FieldSpec::new("alignment", "Alignment", Select(ALIGNMENTS), enum_name(&c.alignment)),
            FieldSpec::new(
                "fontSize",
                "Font size",
                Number { min: 8, max: 96 },
                c.font_size.to_string(),
            ),
        ],
        BlockContent::RichText(c) => vec![FieldSpec::new("html", "HTML", Code, c.html.clone())],
        BlockContent::Image(c) => vec![
            FieldSpec::new("src", "Image source", Text, c.src.clone()),
            FieldSpec::new("alt", "Alt text", Text, c.alt.clone()),
            FieldSpec::new("caption", "Caption", Text, c.caption.clone().unwrap_or_default()),
            FieldSpec::new("size", "Size", Select(IMAGE_SIZES), enum_name(&c.size)),
            FieldSpec::new("alignment", "Alignment", Select(ALIGNMENTS), enum_name(&c.alignment)),
        ],
        BlockContent::Button(c) => vec![
            FieldSpec::new("text", "Label", Text, c.text.clone()),
            FieldSpec::new("action", "Action", Select(BUTTON_ACTIONS), enum_name(&c.action)),
            FieldSpec::new("url", "Target", Text, c.url.clone().unwrap_or_default()),
            FieldSpec::new("variant", "Style", Select(BUTTON_VARIANTS), enum_name(&c.variant)),
            FieldSpec::new("size", "Size", Select(BUTTON_SIZES), enum_name(&c.size)),
            FieldSpec::new("alignment", "Alignment", Select(ALIGNMENTS), enum_name(&c.alignment)),
            FieldSpec::new("fullWidth", "Full width", Toggle, c.full_width.to_string()),
        ],
        BlockContent::Form(c) => vec![
            FieldSpec::new("embedCode", "Embed code", Code, c.embed_code.clone()),
            FieldSpec::new("fields", "Fields", Json, fields_json(&c.fields)),
            FieldSpec::new("submitLabel", "Submit label", Text, c.submit_label.clone()),
            FieldSpec::new("email.recipient", "Recipient", Text, c.email.recipient.clone()),
            FieldSpec::new("email.subject", "Subject", Text, c.email.subject.clone()),
            FieldSpec::new(
                "email.autoReplyEnabled",
                "Auto-reply",
                Toggle,
                c.email.auto_reply_enabled.to_string(),
            ),
            FieldSpec::new(
                "email.autoReplyMessage",
                "Auto-reply message",
                TextArea,
                c.email.auto_reply_message.clone(),
            ),
        ],
        BlockContent::SourceCode(c) => vec![
            FieldSpec::new("code", "Code", Code, c.code.clone()),
            FieldSpec::new("language", "Language", Select(CODE_LANGUAGES), c.language.clone()),
            FieldSpec::new("sandbox", "Sandbox", Toggle, c.sandbox.to_string()),
        ],
        BlockContent::Spacer(c) => vec![
            FieldSpec::new("height", "Height", Number { min: 0, max: 400 }, c.height.to_string()),
            FieldSpec::new(
                "backgroundColor",
                "Background",
                Color,
                c.background_color.clone().unwrap_or_default(),
            ),
        ],
        BlockContent::List(c) => vec![
            FieldSpec::new("items", "Items (one per line)", TextArea, c.items.join("\n")),
            FieldSpec::new("ordered", "Numbered", Toggle, c.ordered.to_string()),
        ],
    }
}

pub fn apply_field(
    content: &BlockContent,
    key: &str,
    value: &str,
) -> Result<BlockContent, EditError> {
    let unknown = || EditError::UnknownField {
        block_type: content.block_type(),
        key: key.to_owned(),
    };

    let next = match content {
        BlockContent::Heading(c) => {
            let mut c: HeadingContent = c.clone();
            match key {
                "text" => c.text = value.to_owned(),
                "level" => c.level = parse_number(key, value, 1, 6)? as u8,
                "alignment" => c.alignment = parse_enum(key, value, ALIGNMENTS)?,
                "color" => c.color = parse_color(key, value)?,
                _ => return Err(unknown()),
            }
            BlockContent::Heading(c)
        }
        BlockContent::Text(c) => {
            let mut c: TextContent = c.clone();
            match key {
                "text" => c.text = value.to_owned(),
                "alignment" => c.alignment = parse_enum(key, value, ALIGNMENTS)?,
                "fontSize" => c.font_size = parse_number(key, value, 8, 96)? as u16,
                _ => return Err(unknown()),
            }
            BlockContent::Text(c)
        }
        BlockContent::RichText(c) => {
            let mut c: RichTextContent = c.clone();
            match key {
                "html" => c.html = value.to_owned(),
                _ => return Err(unknown()),
            }
            BlockContent::RichText(c)
        }
        BlockContent::Image(c) => {
            let mut c: ImageContent = c.clone();
            match key {
                "src" => c.src = value.trim().to_owned(),
                "alt" => c.alt = value.to_owned(),
                "caption" => c.caption = non_empty(value),
                "size" => c.size = parse_enum(key, value, IMAGE_SIZES)?,
                "alignment" => c.alignment = parse_enum(key, value, ALIGNMENTS)?,
                _ => return Err(unknown()),
            }
            BlockContent::Image(c)
        }
        BlockContent::Button(c) => {
            let mut c: ButtonContent = c.clone();
            match key {
                "text" => c.text = value.to_owned(),
                "action" => c.action = parse_enum(key, value, BUTTON_ACTIONS)?,
                "url" => c.url = non_empty(value),
                "variant" => c.variant = parse_enum(key, value, BUTTON_VARIANTS)?,
                "size" => c.size = parse_enum(key, value, BUTTON_SIZES)?,
                "alignment" => c.alignment = parse_enum(key, value, ALIGNMENTS)?,
                "fullWidth" => c.full_width = parse_toggle(key, value)?,
                _ => return Err(unknown()),
            }
            BlockContent::Button(c)
        }
        BlockContent::Form(c) => {
            let mut c: FormContent = c.clone();
            match key {
                "embedCode" => c.embed_code = value.to_owned(),
                "fields" => {
                    c.fields = serde_json::from_str::<Vec<FormField>>(value).map_err(|err| {
                        invalid(key, value, &format!("a JSON list of form fields ({err})"))
                    })?
                }
                "submitLabel" => c.submit_label = value.to_owned(),
                "email.recipient" => c.email.recipient = value.trim().to_owned(),
                "email.subject" => c.email.subject = value.to_owned(),
                "email.autoReplyEnabled" => c.email.auto_reply_enabled = parse_toggle(key, value)?,
                "email.autoReplyMessage" => c.email.auto_reply_message = value.to_owned(),
                _ => return Err(unknown()),
            }
            BlockContent::Form(c)
        }
        BlockContent::SourceCode(c) => {
            let mut c: SourceCodeContent = c.clone();
            match key {
                "code" => c.code = value.to_owned(),
                "language" => {
                    let language = value.trim().to_ascii_lowercase();
                    if !CODE_LANGUAGES.contains(&language.as_str()) {
                        return Err(invalid(key, value, &CODE_LANGUAGES.join("|")));
                    }
                    c.language = language;
                }
                "sandbox" => c.sandbox = parse_toggle(key, value)?,
                _ => return Err(unknown()),
            }
            BlockContent::SourceCode(c)
        }
        BlockContent::Spacer(c) => {
            let mut c: SpacerContent = c.clone();
            match key {
                "height" => c.height = parse_number(key, value, 0, 400)?,
                "backgroundColor" => {
                    c.background_color = match non_empty(value) {
                        Some(color) => Some(parse_color(key, &color)?),
                        None => None,
                    }
                }
                _ => return Err(unknown()),
            }
            BlockContent::Spacer(c)
        }
        BlockContent::List(c) => {
            let mut c: ListContent = c.clone();
            match key {
                "items" => {
                    c.items = value
                        .lines()
                        .map(str::trim)
                        .filter(|line| !line.is_empty())
                        .map(str::to_owned)
                        .collect()
                }
                "ordered" => c.ordered = parse_toggle(key, value)?,
                _ => return Err(unknown()),
            }
            BlockContent::List(c)
        }
    };

    Ok(next)
}

pub struct BlockEditor<F>
where
    F: FnMut(BlockContent),
{
    block_id: String,
    content: BlockContent,
    on_update: F,
}

impl<F> BlockEditor<F>
where
    F: FnMut(BlockContent),
{
    pub fn new(block: &ContentBlock, on_update: F) -> Self {
        Self {
            block_id: block.id.clone(),
            content: block.content.clone(),
            on_update,
        }
    }

    pub fn block_id(&self) -> &str {
        &self.block_id
    }

    pub fn content(&self) -> &BlockContent {
        &self.content
    }

    pub fn fields(&self) -> Vec<FieldSpec> {
        form_fields(&self.content)
    }

    pub fn edit(&mut self, key: &str, value: &str) -> Result<(), EditError> {
        let next = apply_field(&self.content, key, value)?;
        self.content = next.clone();
        (self.on_update)(next);
        Ok(())
    }

    pub fn replace(&mut self, content: BlockContent) {
        self.content = content.clone();
        (self.on_update)(content);
    }
}

fn invalid(key: &str, value: &str, expected: &str) -> EditError {
    EditError::InvalidValue {
        key: key.to_owned(),
        value: value.to_owned(),
        expected: expected.to_owned(),
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

fn parse_number(key: &str, value: &str, min: u32, max: u32) -> Result<u32, EditError> {
    match value.trim().parse::<u32>() {
        Ok(n) if (min..=max).contains(&n) => Ok(n),
        _ => Err(invalid(key, value, &format!("a whole number from {min} to {max}"))),
    }
}

fn parse_toggle(key: &str, value: &str) -> Result<bool, EditError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(invalid(key, value, "true or false")),
    }
}

fn parse_color(key: &str, value: &str) -> Result<String, EditError> {
    let color = value.trim();
    let hex = color.strip_prefix('#').unwrap_or("");
    let valid = matches!(hex.len(), 3 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit());
    if !valid {
        return Err(invalid(key, value, "a hex color like #1f2937"));
    }
    Ok(color.to_ascii_lowercase())
}

fn parse_enum<T: DeserializeOwned>(
    key: &str,
    value: &str,
    options: &[&str],
) -> Result<T, EditError> {
    let normalized = value.trim().to_ascii_lowercase();
    serde_json::from_value(serde_json::Value::String(normalized))
        .map_err(|_| invalid(key, value, &options.join("|")))
}

fn enum_name<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(name)) => name,
        _ => String::new(),
    }
}

fn fields_json(fields: &[FormField]) -> String {
    serde_json::to_string(fields).unwrap_or_else(|_| "[]".to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{Alignment, ButtonAction, FormFieldKind, default_content};

    #[test]
    fn every_block_type_has_a_form() {
        for block_type in BlockType::ALL {
            let content = default_content(block_type);
            let fields = form_fields(&content);
            assert!(!fields.is_empty(), "{block_type} has no fields");
            for field in fields {
                let applied = apply_field(&content, field.key, &field.value);
                assert_eq!(applied, Ok(content.clone()), "{block_type}.{}", field.key);
            }
        }
    }

    #[test]
    fn edit_returns_complete_content_with_other_fields_kept() -> anyhow::Result<()> {
        let content = default_content(BlockType::Heading);
        let next = apply_field(&content, "alignment", "Left")?;
        let BlockContent::Heading(h) = next else {
            panic!("heading expected");
        };
        assert_eq!(h.alignment, Alignment::Left);
        assert_eq!(h.text, "New heading");
        assert_eq!(h.level, 2);
        Ok(())
    }

    #[test]
    fn invalid_values_are_rejected() {
        let heading = default_content(BlockType::Heading);
        assert!(matches!(
            apply_field(&heading, "level", "7"),
            Err(EditError::InvalidValue { .. })
        ));
        assert!(matches!(
            apply_field(&heading, "color", "red"),
            Err(EditError::InvalidValue { .. })
        ));
        assert_eq!(
            apply_field(&heading, "src", "x.png"),
            Err(EditError::UnknownField {
                block_type: BlockType::Heading,
                key: "src".to_owned(),
            })
        );
    }

    #[test]
    fn optional_fields_clear_on_empty_input() -> anyhow::Result<()> {
        let button = default_content(BlockType::Button);
        let linked = apply_field(&button, "url", "https://example.com/jobs")?;
        let cleared = apply_field(&linked, "url", "  ")?;
        let BlockContent::Button(b) = cleared else {
            panic!("button expected");
        };
        assert_eq!(b.url, None);
        assert_eq!(b.action, ButtonAction::Apply);
        Ok(())
    }

    #[test]
    fn form_fields_are_edited_as_json() -> anyhow::Result<()> {
        let form = default_content(BlockType::Form);
        let next = apply_field(
            &form,
            "fields",
            r#"[{"label":"Phone","type":"tel","required":false,"placeholder":""}]"#,
        )?;
        let BlockContent::Form(f) = next else {
            panic!("form expected");
        };
        assert_eq!(f.fields.len(), 1);
        assert_eq!(f.fields[0].kind, FormFieldKind::Tel);
        assert!(apply_field(&form, "fields", "not json").is_err());
        Ok(())
    }

    #[test]
    fn list_items_split_on_lines() -> anyhow::Result<()> {
        let list = default_content(BlockType::List);
        let next = apply_field(&list, "items", "Remote\n\n  Flexible hours \n")?;
        let BlockContent::List(l) = next else {
            panic!("list expected");
        };
        assert_eq!(l.items, vec!["Remote".to_owned(), "Flexible hours".to_owned()]);
        Ok(())
    }

    #[test]
    fn editor_reports_each_accepted_edit_in_full() -> anyhow::Result<()> {
        let block = ContentBlock {
            id: "b1".to_owned(),
            content: default_content(BlockType::Image),
            order: 0,
        };
        let mut updates = Vec::new();
        {
            let mut editor = BlockEditor::new(&block, |content| updates.push(content));
            editor.edit("src", "hero.png")?;
            editor.edit("alt", "Team photo")?;
            assert!(editor.edit("size", "enormous").is_err());
        }

        assert_eq!(updates.len(), 2);
        let BlockContent::Image(last) = &updates[1] else {
            panic!("image expected");
        };
        assert_eq!(last.src, "hero.png");
        assert_eq!(last.alt, "Team photo");
        Ok(())
    }
}
