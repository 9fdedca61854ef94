use std::collections::HashMap;

use tracing::{Level, event, instrument};

use crate::store::Store;
use crate::types::question::extract_new_question;
use crate::views;

/// GET / renders the whole page: submission form plus question list.
#[instrument]
pub async fn list_questions(store: Store) -> Result<impl warp::Reply, warp::Rejection> {
    event!(target: "quiz_web", Level::INFO, "querying questions");
    let questions = match store.get_questions().await {
        Ok(res) => res,
        Err(e) => return Err(warp::reject::custom(e)),
    };

    Ok(warp::reply::html(views::home(&questions).into_string()))
}

/// POST /submit-question validates the form, stores the question and
/// answers with the re-rendered question-list fragment only. A rejected
/// form leaves the store untouched.
#[instrument]
pub async fn submit_question(
    store: Store,
    form: HashMap<String, String>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let new_question = match extract_new_question(form) {
        Ok(new_question) => new_question,
        Err(e) => return Err(warp::reject::custom(e)),
    };

    let question = match store.add_question(new_question).await {
        Ok(question) => question,
        Err(e) => return Err(warp::reject::custom(e)),
    };
    event!(target: "quiz_web", Level::INFO, id = question.id.0, "question added");

    let questions = match store.get_questions().await {
        Ok(res) => res,
        Err(e) => return Err(warp::reject::custom(e)),
    };

    Ok(warp::reply::html(
        views::question_list(&questions).into_string(),
    ))
}
