//! Fills a prompt template for one question.
use super::Question;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const USER_QUESTION: &str = "{user_question}";
const INSTRUCTIONS: &str = "{instructions}";
const DB_NAME: &str = "{db_name}";
const TABLE_METADATA: &str = "{table_metadata_string}";

#[derive(Clone, Debug)]
pub struct PromptTemplate {
    template: String,
    metadata: HashMap<String, String>,
    metadata_dir: Option<PathBuf>,
}

impl PromptTemplate {
    pub fn new(template: String, metadata_dir: Option<PathBuf>) -> PromptTemplate {
        PromptTemplate {
            template,
            metadata: HashMap::new(),
            metadata_dir,
        }
    }

    pub fn load(path: &Path, metadata_dir: Option<PathBuf>) -> Result<PromptTemplate, PromptError> {
        let template = fs::read_to_string(path)
            .map_err(|e| PromptError::Template(path.display().to_string(), e))?;
        Ok(PromptTemplate::new(template, metadata_dir))
    }

    /// Schema text for a database, read once from `<metadata_dir>/<db_name>.sql`.
    fn table_metadata(&mut self, db_name: &str) -> Result<String, PromptError> {
        let dir = match &self.metadata_dir {
            Some(d) => d,
            None => return Ok(String::new()),
        };

        if let Some(m) = self.metadata.get(db_name) {
            return Ok(m.clone());
        }

        let path = dir.join(format!("{}.sql", db_name));
        let metadata = fs::read_to_string(&path)
            .map_err(|e| PromptError::Metadata(path.display().to_string(), e))?;
        self.metadata.insert(db_name.to_string(), metadata.clone());
        Ok(metadata)
    }

    pub fn render(&mut self, question: &Question) -> Result<String, PromptError> {
        let metadata = self.table_metadata(&question.db_name)?;
        //Metadata goes last so schema text that happens to contain a placeholder is left alone
        Ok(self
            .template
            .replace(USER_QUESTION, &question.question)
            .replace(INSTRUCTIONS, &question.instructions)
            .replace(DB_NAME, &question.db_name)
            .replace(TABLE_METADATA, &metadata))
    }
}

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Unable to read prompt template {0}: {1}")]
    Template(String, std::io::Error),
    #[error("Unable to read table metadata {0}: {1}")]
    Metadata(String, std::io::Error),
}
