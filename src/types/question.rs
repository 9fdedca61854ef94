use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use handle_errors::Error;

/// Every question carries exactly this many options.
pub const OPTION_COUNT: usize = 4;

#[derive(Serialize, Debug, Deserialize, Clone, PartialEq)]
pub struct AnswerOption {
    pub text: String,
    pub is_correct: bool,
}

#[derive(Serialize, Debug, Deserialize, Clone, PartialEq)]
pub struct Question {
    pub id: QuestionId,
    pub title: String,
    pub options: [AnswerOption; OPTION_COUNT],
    pub explanation: String,
}

#[derive(Serialize, Debug, Clone, Eq, Hash, Deserialize, PartialEq)]
pub struct QuestionId(pub i32);

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct NewQuestion {
    pub title: String,
    pub options: [AnswerOption; OPTION_COUNT],
    pub explanation: String,
}

/// Builds a `NewQuestion` out of the fields submitted through the
/// question form: `title`, `explanation`, `option1` to `option4` and
/// `correct_option`, a one-based position between 1 and 4.
///
/// The option marked correct is derived from `correct_option`, so a
/// question can never be stored with zero or several correct options.
pub fn extract_new_question(form: HashMap<String, String>) -> Result<NewQuestion, Error> {
    let correct_option = form
        .get("correct_option")
        .ok_or(Error::MissingParameters)?
        .parse::<usize>()
        .map_err(Error::ParseError)?;

    if !(1..=OPTION_COUNT).contains(&correct_option) {
        return Err(Error::InvalidCorrectOption);
    }

    let option = |position: usize| -> Result<AnswerOption, Error> {
        Ok(AnswerOption {
            text: form
                .get(&format!("option{}", position))
                .ok_or(Error::MissingParameters)?
                .clone(),
            is_correct: position == correct_option,
        })
    };

    Ok(NewQuestion {
        title: form.get("title").ok_or(Error::MissingParameters)?.clone(),
        options: [option(1)?, option(2)?, option(3)?, option(4)?],
        explanation: form
            .get("explanation")
            .ok_or(Error::MissingParameters)?
            .clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> HashMap<String, String> {
        let mut form = HashMap::new();
        form.insert("title".to_string(), "2+2?".to_string());
        form.insert("option1".to_string(), "3".to_string());
        form.insert("option2".to_string(), "4".to_string());
        form.insert("option3".to_string(), "5".to_string());
        form.insert("option4".to_string(), "6".to_string());
        form.insert("correct_option".to_string(), "2".to_string());
        form.insert("explanation".to_string(), "Basic arithmetic".to_string());
        form
    }

    #[test]
    fn marks_exactly_one_option_correct() {
        let new_question = extract_new_question(valid_form()).unwrap();

        let correct: Vec<usize> = new_question
            .options
            .iter()
            .enumerate()
            .filter(|(_, o)| o.is_correct)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(correct, vec![1]);
        assert_eq!(new_question.options[1].text, "4");
        assert_eq!(new_question.title, "2+2?");
        assert_eq!(new_question.explanation, "Basic arithmetic");
    }

    #[test]
    fn rejects_correct_option_out_of_range() {
        for bad in ["0", "5"] {
            let mut form = valid_form();
            form.insert("correct_option".to_string(), bad.to_string());
            assert!(matches!(
                extract_new_question(form),
                Err(Error::InvalidCorrectOption)
            ));
        }
    }

    #[test]
    fn rejects_non_numeric_correct_option() {
        let mut form = valid_form();
        form.insert("correct_option".to_string(), "two".to_string());
        assert!(matches!(
            extract_new_question(form),
            Err(Error::ParseError(_))
        ));
    }

    #[test]
    fn rejects_missing_fields() {
        for missing in ["title", "explanation", "option3", "correct_option"] {
            let mut form = valid_form();
            form.remove(missing);
            let result = extract_new_question(form);
            assert!(
                matches!(result, Err(Error::MissingParameters)),
                "field {} missing should be rejected",
                missing
            );
        }
    }
}
