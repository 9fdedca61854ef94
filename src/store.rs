use std::sync::Arc;

use sqlx::Row;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use tokio::sync::RwLock;

use handle_errors::Error;

use crate::types::question::{AnswerOption, NewQuestion, OPTION_COUNT, Question, QuestionId};

/// The question store handed to every route handler. Both backends hand
/// out stable integer ids, so a question keeps its id no matter how many
/// questions are added after it.
#[derive(Debug, Clone)]
pub enum Store {
    Memory(MemoryStore),
    Postgres(PgStore),
}

impl Store {
    pub fn in_memory() -> Self {
        Store::Memory(MemoryStore::new())
    }

    pub async fn postgres(db_url: &str) -> Self {
        Store::Postgres(PgStore::new(db_url).await)
    }

    pub async fn get_questions(&self) -> Result<Vec<Question>, Error> {
        match self {
            Store::Memory(store) => store.get_questions().await,
            Store::Postgres(store) => store.get_questions().await,
        }
    }

    pub async fn add_question(&self, new_question: NewQuestion) -> Result<Question, Error> {
        match self {
            Store::Memory(store) => store.add_question(new_question).await,
            Store::Postgres(store) => store.add_question(new_question).await,
        }
    }

    pub async fn get_question(&self, id: QuestionId) -> Result<Question, Error> {
        match self {
            Store::Memory(store) => store.get_question(id).await,
            Store::Postgres(store) => store.get_question(id).await,
        }
    }
}

/// Questions held in process memory. The lock serializes concurrent
/// appends and reads coming from parallel requests.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    questions: Arc<RwLock<Vec<Question>>>,
}

impl MemoryStore {
    fn new() -> Self {
        MemoryStore {
            questions: Arc::new(RwLock::new(Vec::new())),
        }
    }

    async fn get_questions(&self) -> Result<Vec<Question>, Error> {
        Ok(self.questions.read().await.clone())
    }

    async fn add_question(&self, new_question: NewQuestion) -> Result<Question, Error> {
        let mut questions = self.questions.write().await;
        let id = QuestionId(questions.last().map_or(1, |q| q.id.0 + 1));
        let question = Question {
            id,
            title: new_question.title,
            options: new_question.options,
            explanation: new_question.explanation,
        };
        questions.push(question.clone());
        Ok(question)
    }

    async fn get_question(&self, QuestionId(id): QuestionId) -> Result<Question, Error> {
        self.questions
            .read()
            .await
            .iter()
            .find(|q| q.id.0 == id)
            .cloned()
            .ok_or(Error::QuestionNotFound)
    }
}

/// Questions persisted in a PostgreSQL table. The option array is stored
/// as a JSON text column and must round-trip exactly, order included.
#[derive(Debug, Clone)]
pub struct PgStore {
    pub connection: PgPool,
}

// A fetched row before its options column has been decoded.
struct QuestionRow {
    id: i32,
    title: String,
    options: String,
    explanation: String,
}

impl QuestionRow {
    fn from_row(row: PgRow) -> Self {
        QuestionRow {
            id: row.get("id"),
            title: row.get("title"),
            options: row.get("options"),
            explanation: row.get("explanation"),
        }
    }

    fn into_question(self) -> Result<Question, Error> {
        let options: [AnswerOption; OPTION_COUNT] =
            serde_json::from_str(&self.options).map_err(Error::SerializationError)?;

        Ok(Question {
            id: QuestionId(self.id),
            title: self.title,
            options,
            explanation: self.explanation,
        })
    }
}

impl PgStore {
    async fn new(db_url: &str) -> Self {
        let db_pool = match PgPoolOptions::new()
            .max_connections(5)
            .connect(db_url)
            .await
        {
            Ok(pool) => pool,
            Err(e) => panic!("Couldn't establish DB connection: {}", e),
        };

        PgStore {
            connection: db_pool,
        }
    }

    async fn get_questions(&self) -> Result<Vec<Question>, Error> {
        match sqlx::query("SELECT id, title, options, explanation FROM questions ORDER BY id")
            .map(QuestionRow::from_row)
            .fetch_all(&self.connection)
            .await
        {
            Ok(rows) => rows
                .into_iter()
                .map(QuestionRow::into_question)
                .collect(),
            Err(error) => {
                tracing::event!(tracing::Level::ERROR, "{:?}", error);
                Err(Error::DatabaseQueryError(error))
            }
        }
    }

    async fn add_question(&self, new_question: NewQuestion) -> Result<Question, Error> {
        let options = match serde_json::to_string(&new_question.options) {
            Ok(encoded) => encoded,
            Err(error) => {
                tracing::event!(tracing::Level::ERROR, "{:?}", error);
                return Err(Error::SerializationError(error));
            }
        };

        match sqlx::query(
            "INSERT INTO questions (title, options, explanation)
            VALUES ($1, $2, $3)
            RETURNING id, title, options, explanation",
        )
        .bind(new_question.title)
        .bind(options)
        .bind(new_question.explanation)
        .map(QuestionRow::from_row)
        .fetch_one(&self.connection)
        .await
        {
            Ok(row) => row.into_question(),
            Err(error) => {
                tracing::event!(tracing::Level::ERROR, "{:?}", error);
                Err(Error::DatabaseQueryError(error))
            }
        }
    }

    async fn get_question(&self, question_id: QuestionId) -> Result<Question, Error> {
        match sqlx::query("SELECT id, title, options, explanation FROM questions WHERE id = $1")
            .bind(question_id.0)
            .map(QuestionRow::from_row)
            .fetch_optional(&self.connection)
            .await
        {
            Ok(Some(row)) => row.into_question(),
            Ok(None) => Err(Error::QuestionNotFound),
            Err(error) => {
                tracing::event!(tracing::Level::ERROR, "{:?}", error);
                Err(Error::DatabaseQueryError(error))
            }
        }
    }
}
