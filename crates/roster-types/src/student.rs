use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

use crate::identity::StudentId;
use crate::patch::StudentPatch;

/// A single student record.
///
/// Field order matches the on-disk JSON object layout. `year` and `marks`
/// are kept as text; a JSON number in either field is accepted on load and
/// converted to its decimal form (`3` → `"3"`, `90.0` → `"90.0"`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub student_id: StudentId,
    pub name: String,
    pub branch: String,
    #[serde(deserialize_with = "text_or_number")]
    pub year: String,
    #[serde(deserialize_with = "text_or_number")]
    pub marks: String,
}

impl Student {
    pub fn new(
        student_id: impl Into<StudentId>,
        name: impl Into<String>,
        branch: impl Into<String>,
        year: impl Into<String>,
        marks: impl Into<String>,
    ) -> Self {
        Self {
            student_id: student_id.into(),
            name: name.into(),
            branch: branch.into(),
            year: year.into(),
            marks: marks.into(),
        }
    }

    /// Apply a partial update in place. Returns `true` if any field changed.
    ///
    /// The `student_id` is never touched.
    pub fn apply(&mut self, patch: &StudentPatch) -> bool {
        let mut changed = false;
        for (slot, value) in [
            (&mut self.name, &patch.name),
            (&mut self.branch, &patch.branch),
            (&mut self.year, &patch.year),
            (&mut self.marks, &patch.marks),
        ] {
            if let Some(value) = value {
                if *slot != *value {
                    slot.clone_from(value);
                    changed = true;
                }
            }
        }
        changed
    }
}

/// Accept either a JSON string or a JSON number, yielding text.
fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct TextOrNumber;

    impl<'de> Visitor<'de> for TextOrNumber {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string or a number")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        // `Debug` keeps the fractional part of integral floats: 90.0 stays "90.0".
        fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
            Ok(format!("{v:?}"))
        }
    }

    deserializer.deserialize_any(TextOrNumber)
}
