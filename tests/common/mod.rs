// tests/common/mod.rs
//! In-memory collaborators and block builders shared by the integration tests.
#![allow(dead_code)]

use notion2chat::{
    AppError, Block, BlockCommon, BlockId, BulletedListItemBlock, CodeBlock, DatabaseRow,
    DatabaseSchema, Heading1Block, Heading2Block, NotionId, NotionRepository, ObjectKind,
    ObjectSummary, ParagraphBlock, TextBlockContent, TextGenerator, ToDoBlock, UnsupportedBlock,
};
use std::collections::HashMap;
use std::sync::Mutex;

pub fn block_id(n: u32) -> BlockId {
    BlockId::parse(&format!("{:032x}", n)).unwrap()
}

pub fn notion_id(n: u32) -> NotionId {
    NotionId::parse(&format!("{:032x}", n)).unwrap()
}

fn common(n: u32) -> BlockCommon {
    BlockCommon::new(block_id(n))
}

pub fn paragraph(n: u32, text: &str) -> Block {
    Block::Paragraph(ParagraphBlock {
        common: common(n),
        content: TextBlockContent::plain(text),
    })
}

pub fn heading_1(n: u32, text: &str) -> Block {
    Block::Heading1(Heading1Block {
        common: common(n),
        content: TextBlockContent::plain(text),
    })
}

pub fn heading_2(n: u32, text: &str) -> Block {
    Block::Heading2(Heading2Block {
        common: common(n),
        content: TextBlockContent::plain(text),
    })
}

pub fn bullet(n: u32, text: &str) -> Block {
    Block::BulletedListItem(BulletedListItemBlock {
        common: common(n),
        content: TextBlockContent::plain(text),
    })
}

pub fn to_do(n: u32, text: &str, checked: bool) -> Block {
    Block::ToDo(ToDoBlock {
        common: common(n),
        content: TextBlockContent::plain(text),
        checked,
    })
}

pub fn code(n: u32, language: &str, text: &str) -> Block {
    Block::Code(CodeBlock {
        common: common(n),
        language: language.to_string(),
        content: TextBlockContent::plain(text),
    })
}

pub fn unsupported(n: u32, block_type: &str) -> Block {
    Block::Unsupported(UnsupportedBlock {
        common: common(n),
        block_type: block_type.to_string(),
    })
}

/// Marks a block as having children without attaching any, as the API
/// reports blocks before their children are fetched.
pub fn with_unfetched_children(mut block: Block) -> Block {
    block.common_mut().has_children = true;
    block
}

pub fn summary(n: u32, title: &str, kind: ObjectKind) -> ObjectSummary {
    ObjectSummary {
        id: notion_id(n),
        title: title.to_string(),
        last_edited_time: None,
        kind,
    }
}

/// A workspace held in maps; ids without an entry fail as not found.
#[derive(Default)]
pub struct FakeWorkspace {
    pub pages: Vec<ObjectSummary>,
    pub databases: Vec<ObjectSummary>,
    pub children: HashMap<NotionId, Vec<Block>>,
    pub schemas: HashMap<NotionId, DatabaseSchema>,
    pub rows: HashMap<NotionId, Vec<DatabaseRow>>,
    pub child_requests: Mutex<Vec<NotionId>>,
}

impl FakeWorkspace {
    pub fn with_children(mut self, parent: NotionId, blocks: Vec<Block>) -> Self {
        self.children.insert(parent, blocks);
        self
    }

    pub fn requested(&self) -> Vec<NotionId> {
        self.child_requests.lock().unwrap().clone()
    }
}

fn not_found(id: &NotionId) -> AppError {
    AppError::MalformedContent(format!("no object {}", id))
}

#[async_trait::async_trait]
impl NotionRepository for FakeWorkspace {
    async fn search(&self, kind: ObjectKind) -> Result<Vec<ObjectSummary>, AppError> {
        Ok(match kind {
            ObjectKind::Page => self.pages.clone(),
            ObjectKind::Database => self.databases.clone(),
        })
    }

    async fn retrieve_children(&self, parent: &NotionId) -> Result<Vec<Block>, AppError> {
        self.child_requests.lock().unwrap().push(parent.clone());
        self.children
            .get(parent)
            .cloned()
            .ok_or_else(|| not_found(parent))
    }

    async fn retrieve_database_schema(
        &self,
        database: &NotionId,
    ) -> Result<DatabaseSchema, AppError> {
        self.schemas
            .get(database)
            .cloned()
            .ok_or_else(|| not_found(database))
    }

    async fn query_database_rows(
        &self,
        database: &NotionId,
        row_limit: u32,
    ) -> Result<Vec<DatabaseRow>, AppError> {
        let rows = self.rows.get(database).ok_or_else(|| not_found(database))?;
        Ok(rows.iter().take(row_limit as usize).cloned().collect())
    }
}

/// A text generator that records prompts and replays a fixed outcome.
pub struct FakeModel {
    reply: Result<String, (u16, String)>,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeModel {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(status: u16, message: &str) -> Self {
        Self {
            reply: Err((status, message.to_string())),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl TextGenerator for FakeModel {
    fn service_name(&self) -> &str {
        "Fake Model"
    }

    async fn generate(&self, prompt: &str) -> Result<String, AppError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err((status, message)) => Err(AppError::ModelService {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}
