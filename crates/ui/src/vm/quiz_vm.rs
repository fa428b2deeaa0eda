use mathtermind_core::model::Quiz;

use crate::vm::markdown_vm::markdown_to_html;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizItemVm {
    pub id: u64,
    pub title: String,
    pub question_html: String,
    pub answer: Option<String>,
    pub completed: bool,
}

impl QuizItemVm {
    #[must_use]
    pub fn toggle_label(&self) -> &'static str {
        if self.completed {
            "Mark as not done"
        } else {
            "Mark as done"
        }
    }
}

impl From<&Quiz> for QuizItemVm {
    fn from(quiz: &Quiz) -> Self {
        Self {
            id: quiz.id().value(),
            title: quiz.title().to_owned(),
            question_html: markdown_to_html(quiz.question()),
            answer: quiz.answer().map(str::to_owned),
            completed: quiz.is_completed(),
        }
    }
}

#[must_use]
pub fn map_quiz_items(quizzes: &[Quiz]) -> Vec<QuizItemVm> {
    quizzes.iter().map(QuizItemVm::from).collect()
}
