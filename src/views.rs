use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::types::answer::AnswerVerdict;
use crate::types::question::Question;

/// The full page served on GET /.
pub fn home(questions: &[Question]) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Quiz" }
                link rel="manifest" href="/manifest.json";
                script src="https://unpkg.com/htmx.org@1.9.10" {}
            }
            body {
                h1 { "Quiz" }

                section {
                    h2 { "Add a question" }
                    (submit_form())
                }

                section {
                    h2 { "Questions" }
                    div id="question-list" {
                        (question_list(questions))
                    }
                }

                script {
                    (PreEscaped("if ('serviceWorker' in navigator) { navigator.serviceWorker.register('/sw.js'); }"))
                }
            }
        }
    }
}

fn submit_form() -> Markup {
    html! {
        form hx-post="/submit-question" hx-target="#question-list" hx-swap="innerHTML" {
            label { "Title" input type="text" name="title" required; }
            @for position in 1..=4 {
                label {
                    "Option " (position)
                    input type="text" name=(format!("option{}", position)) required;
                }
            }
            label {
                "Correct option (1-4)"
                input type="number" name="correct_option" min="1" max="4" required;
            }
            label { "Explanation" input type="text" name="explanation" required; }
            button type="submit" { "Add question" }
        }
    }
}

/// The fragment re-rendered after a submission. Also embedded in the
/// full page.
pub fn question_list(questions: &[Question]) -> Markup {
    html! {
        @for question in questions {
            article class="question" {
                h3 { (question.title) }
                form hx-post="/check-answer"
                     hx-target=(format!("#result-{}", question.id.0))
                     hx-swap="innerHTML" {
                    input type="hidden" name="question_index" value=(question.id.0);
                    @for (position, option) in question.options.iter().enumerate() {
                        label {
                            input type="radio" name="option" value=(position) required;
                            (option.text)
                        }
                    }
                    button type="submit" { "Check answer" }
                }
                div id=(format!("result-{}", question.id.0)) {}
            }
        }
    }
}

/// The fragment answered to POST /check-answer.
pub fn answer_response(verdict: &AnswerVerdict) -> Markup {
    html! {
        div class="answer-response" {
            @if verdict.correct {
                p class="correct" { "Correct!" }
            } @else {
                p class="incorrect" { "Incorrect." }
            }
            p class="explanation" { (verdict.explanation) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::question::{AnswerOption, QuestionId};

    fn question() -> Question {
        let mut options = ["3", "4", "5", "6"].map(|text| AnswerOption {
            text: text.to_string(),
            is_correct: false,
        });
        options[1].is_correct = true;
        Question {
            id: QuestionId(1),
            title: "2+2?".to_string(),
            options,
            explanation: "Basic arithmetic".to_string(),
        }
    }

    #[test]
    fn home_renders_a_full_page() {
        let page = home(&[question()]).into_string();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("2+2?"));
        assert!(page.contains("question-list"));
    }

    #[test]
    fn question_list_is_a_fragment_with_all_options() {
        let fragment = question_list(&[question()]).into_string();
        assert!(!fragment.contains("<!DOCTYPE html>"));
        for text in ["3", "4", "5", "6"] {
            assert!(fragment.contains(text));
        }
        // the correctness flag never leaks into the markup
        assert!(!fragment.contains("is_correct"));
        assert!(fragment.contains("question_index"));
    }

    #[test]
    fn answer_response_shows_verdict_and_explanation() {
        let correct = answer_response(&AnswerVerdict {
            correct: true,
            explanation: "Basic arithmetic".to_string(),
        })
        .into_string();
        assert!(correct.contains("Correct!"));
        assert!(correct.contains("Basic arithmetic"));

        let incorrect = answer_response(&AnswerVerdict {
            correct: false,
            explanation: "Basic arithmetic".to_string(),
        })
        .into_string();
        assert!(incorrect.contains("Incorrect."));
        assert!(incorrect.contains("Basic arithmetic"));
    }
}
