use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use handle_errors::Error;

use crate::types::question::{OPTION_COUNT, QuestionId};

/// One picked option for one question, as submitted through the
/// check-answer form.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct AnswerCheck {
    pub question_id: QuestionId,
    pub option: usize,
}

/// What the client gets back after checking an answer.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AnswerVerdict {
    pub correct: bool,
    pub explanation: String,
}

/// Extracts `question_index` (the question id) and `option` (a zero-based
/// index below 4) from the check-answer form fields.
pub fn extract_answer_check(form: HashMap<String, String>) -> Result<AnswerCheck, Error> {
    let question_id = form
        .get("question_index")
        .ok_or(Error::MissingParameters)?
        .parse::<i32>()
        .map_err(Error::ParseError)?;

    let option = form
        .get("option")
        .ok_or(Error::MissingParameters)?
        .parse::<usize>()
        .map_err(Error::ParseError)?;

    if option >= OPTION_COUNT {
        return Err(Error::InvalidOptionIndex);
    }

    Ok(AnswerCheck {
        question_id: QuestionId(question_id),
        option,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(question_index: &str, option: &str) -> HashMap<String, String> {
        let mut form = HashMap::new();
        form.insert("question_index".to_string(), question_index.to_string());
        form.insert("option".to_string(), option.to_string());
        form
    }

    #[test]
    fn extracts_id_and_option() {
        let check = extract_answer_check(form("7", "3")).unwrap();
        assert_eq!(check.question_id, QuestionId(7));
        assert_eq!(check.option, 3);
    }

    #[test]
    fn rejects_option_out_of_range() {
        assert!(matches!(
            extract_answer_check(form("1", "4")),
            Err(Error::InvalidOptionIndex)
        ));
    }

    #[test]
    fn rejects_non_numeric_values() {
        assert!(matches!(
            extract_answer_check(form("first", "0")),
            Err(Error::ParseError(_))
        ));
        assert!(matches!(
            extract_answer_check(form("1", "-1")),
            Err(Error::ParseError(_))
        ));
    }

    #[test]
    fn rejects_missing_fields() {
        assert!(matches!(
            extract_answer_check(HashMap::new()),
            Err(Error::MissingParameters)
        ));
    }
}
