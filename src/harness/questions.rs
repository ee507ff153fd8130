//! Loads the question dataset.
use crate::engine::objects::QueryCategory;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

const REQUIRED_COLUMNS: [&str; 4] = ["question", "db_name", "query", "query_category"];

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Question {
    pub question: String,
    pub db_name: String,
    /// The golden query, possibly several `;` separated alternatives
    pub query: String,
    pub query_category: String,
    #[serde(default)]
    pub instructions: String,
}

impl Question {
    pub fn category(&self) -> QueryCategory {
        QueryCategory::parse(&self.query_category)
    }
}

pub fn load_questions(path: &Path, limit: Option<usize>) -> Result<Vec<Question>, QuestionError> {
    let file = File::open(path)
        .map_err(|e| QuestionError::Open(path.display().to_string(), e))?;
    read_questions(file, limit)
}

/// Reads questions from CSV with a header row. Unknown columns are ignored.
pub fn read_questions<R: Read>(reader: R, limit: Option<usize>) -> Result<Vec<Question>, QuestionError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(QuestionError::MissingColumn(column.to_string()));
        }
    }

    let mut questions = vec![];
    for record in reader.deserialize() {
        if limit.map_or(false, |l| questions.len() >= l) {
            break;
        }
        let question: Question = record?;
        questions.push(question);
    }

    Ok(questions)
}

#[derive(Debug, Error)]
pub enum QuestionError {
    #[error("Unable to open question file {0}: {1}")]
    Open(String, std::io::Error),
    #[error("Question file is missing the {0} column")]
    MissingColumn(String),
    #[error(transparent)]
    CsvError(#[from] csv::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATASET: &str = "\
db_name,query_category,question,query,instructions,notes
shop,group_by,How many orders per customer?,\"SELECT customer_id, COUNT(*) FROM orders GROUP BY 1\",,ignored
shop,rank,Top 3 products by revenue?,SELECT name FROM products ORDER BY revenue DESC LIMIT 3,Use revenue,
school,date_functions,Students enrolled this year?,SELECT COUNT(*) FROM students,,
";

    #[test]
    fn test_load_all() -> Result<(), Box<dyn std::error::Error>> {
        let questions = read_questions(DATASET.as_bytes(), None)?;
        assert_eq!(questions.len(), 3);
        assert_eq!(questions[0].db_name, "shop");
        assert_eq!(questions[0].instructions, "");
        assert_eq!(
            questions[0].query,
            "SELECT customer_id, COUNT(*) FROM orders GROUP BY 1"
        );
        assert_eq!(questions[1].instructions, "Use revenue");
        assert_eq!(questions[1].category(), QueryCategory::Ranking);
        Ok(())
    }

    #[test]
    fn test_limit() -> Result<(), Box<dyn std::error::Error>> {
        let questions = read_questions(DATASET.as_bytes(), Some(2))?;
        assert_eq!(questions.len(), 2);
        Ok(())
    }

    #[test]
    fn test_instructions_optional() -> Result<(), Box<dyn std::error::Error>> {
        let data = "question,db_name,query,query_category\nHow many?,shop,SELECT 1,exact\n";
        let questions = read_questions(data.as_bytes(), None)?;
        assert_eq!(questions[0].instructions, "");
        Ok(())
    }

    #[test]
    fn test_missing_column() {
        let data = "question,db_name,query\nHow many?,shop,SELECT 1\n";
        match read_questions(data.as_bytes(), None) {
            Err(QuestionError::MissingColumn(c)) => assert_eq!(c, "query_category"),
            other => panic!("Unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_load_from_file() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = tempfile::TempDir::new()?;
        let path = tmp.path().join("questions.csv");
        std::fs::write(&path, DATASET)?;

        let questions = load_questions(&path, None)?;
        assert_eq!(questions.len(), 3);
        Ok(())
    }
}
