//! Partial updates to a [`Student`](crate::Student).

/// A partial update: one optional slot per mutable field.
///
/// `None` leaves the field unchanged. `Some(value)` replaces it, and
/// `Some(String::new())` clears it. The `student_id` is not patchable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub branch: Option<String>,
    pub year: Option<String>,
    pub marks: Option<String>,
}

impl StudentPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    pub fn with_marks(mut self, marks: impl Into<String>) -> Self {
        self.marks = Some(marks.into());
        self
    }

    /// Build a patch from interactive answers, where blank input means
    /// "keep the current value".
    pub fn from_prompt_answers(name: &str, branch: &str, year: &str, marks: &str) -> Self {
        fn keep_if_blank(answer: &str) -> Option<String> {
            let answer = answer.trim();
            (!answer.is_empty()).then(|| answer.to_string())
        }

        Self {
            name: keep_if_blank(name),
            branch: keep_if_blank(branch),
            year: keep_if_blank(year),
            marks: keep_if_blank(marks),
        }
    }

    /// Returns `true` if no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.branch.is_none() && self.year.is_none() && self.marks.is_none()
    }
}
