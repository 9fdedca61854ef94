use std::collections::HashMap;

use tracing::{Level, event, instrument};

use crate::store::Store;
use crate::types::answer::{AnswerVerdict, extract_answer_check};
use crate::views;

/// POST /check-answer compares the picked option against the stored one
/// and answers with a verdict fragment. Lookup failures are surfaced,
/// never turned into an "incorrect" verdict.
#[instrument]
pub async fn check_answer(
    store: Store,
    form: HashMap<String, String>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let check = match extract_answer_check(form) {
        Ok(check) => check,
        Err(e) => return Err(warp::reject::custom(e)),
    };

    let question = match store.get_question(check.question_id).await {
        Ok(question) => question,
        Err(e) => return Err(warp::reject::custom(e)),
    };
    event!(
        target: "quiz_web",
        Level::INFO,
        question = question.id.0,
        option = check.option,
        "checking answer"
    );

    // check.option was validated against the fixed option count, so the
    // index is always in bounds.
    let verdict = AnswerVerdict {
        correct: question.options[check.option].is_correct,
        explanation: question.explanation,
    };

    Ok(warp::reply::html(
        views::answer_response(&verdict).into_string(),
    ))
}
