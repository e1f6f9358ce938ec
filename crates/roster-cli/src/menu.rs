//! Interactive five-option menu.
//!
//! The menu reads answers line by line from any `BufRead` and writes
//! prompts to any `Write`, so it can be driven by a script in tests. End
//! of input is treated like choosing "Exit".

use std::io::{BufRead, Write};

use colored::Colorize;
use roster_store::{RecordBackend, RecordStore};
use roster_types::{Student, StudentPatch};
use tracing::debug;

use crate::cli::OutputFormat;
use crate::commands::{add_student, report, write_listing};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MenuChoice {
    Add,
    List,
    Update,
    Delete,
    Exit,
}

impl MenuChoice {
    fn parse(answer: &str) -> Option<Self> {
        match answer.trim() {
            "1" => Some(Self::Add),
            "2" => Some(Self::List),
            "3" => Some(Self::Update),
            "4" => Some(Self::Delete),
            "5" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Whether the loop should keep going after an action.
enum Flow {
    Continue,
    Exit,
}

pub struct Menu<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Run until the user exits or input ends. Only storage failures
    /// escape; rejected operations are printed and the loop continues.
    pub fn run<B: RecordBackend>(mut self, store: &mut RecordStore<B>) -> anyhow::Result<()> {
        loop {
            self.show_menu()?;
            let Some(answer) = self.prompt("Enter your choice (1-5): ")? else {
                break;
            };

            let flow = match MenuChoice::parse(&answer) {
                Some(MenuChoice::Add) => self.add(store)?,
                Some(MenuChoice::List) => {
                    write_listing(store.list_all(), OutputFormat::Text, &mut self.output)?;
                    Flow::Continue
                }
                Some(MenuChoice::Update) => self.update(store)?,
                Some(MenuChoice::Delete) => self.delete(store)?,
                Some(MenuChoice::Exit) => Flow::Exit,
                None => {
                    writeln!(self.output, "Invalid choice! Please enter a number between 1 and 5.")?;
                    Flow::Continue
                }
            };

            if let Flow::Exit = flow {
                break;
            }
        }

        writeln!(self.output, "Exiting program. Goodbye!")?;
        self.output.flush()?;
        Ok(())
    }

    fn show_menu(&mut self) -> anyhow::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "Student Record Management System")?;
        writeln!(self.output, "1. Add Student")?;
        writeln!(self.output, "2. View All Students")?;
        writeln!(self.output, "3. Update Student")?;
        writeln!(self.output, "4. Delete Student")?;
        writeln!(self.output, "5. Exit")?;
        Ok(())
    }

    /// Print `label` and read one line. `None` at end of input.
    fn prompt(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            debug!("end of input");
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn add<B: RecordBackend>(&mut self, store: &mut RecordStore<B>) -> anyhow::Result<Flow> {
        let mut answers = Vec::with_capacity(5);
        for label in ["Enter Student ID: ", "Enter Name: ", "Enter Branch: ", "Enter Year: ", "Enter Marks: "] {
            match self.prompt(label)? {
                Some(answer) => answers.push(answer),
                None => return Ok(Flow::Exit),
            }
        }
        let [student_id, name, branch, year, marks]: [String; 5] = answers
            .try_into()
            .map_err(|_| anyhow::anyhow!("expected five answers"))?;

        add_student(store, Student::new(student_id, name, branch, year, marks), &mut self.output)?;
        Ok(Flow::Continue)
    }

    fn update<B: RecordBackend>(&mut self, store: &mut RecordStore<B>) -> anyhow::Result<Flow> {
        let Some(student_id) = self.prompt("Enter Student ID to update: ")? else {
            return Ok(Flow::Exit);
        };

        writeln!(self.output, "Enter new details (leave blank to keep current value):")?;
        let mut answers = Vec::with_capacity(4);
        for label in ["Name: ", "Branch: ", "Year: ", "Marks: "] {
            match self.prompt(label)? {
                Some(answer) => answers.push(answer),
                None => return Ok(Flow::Exit),
            }
        }
        let patch = StudentPatch::from_prompt_answers(&answers[0], &answers[1], &answers[2], &answers[3]);

        if report(store.update(&student_id, &patch), &mut self.output)?.is_some() {
            writeln!(self.output, "{} Student record updated successfully!", "✓".green().bold())?;
        }
        Ok(Flow::Continue)
    }

    fn delete<B: RecordBackend>(&mut self, store: &mut RecordStore<B>) -> anyhow::Result<Flow> {
        let Some(student_id) = self.prompt("Enter Student ID to delete: ")? else {
            return Ok(Flow::Exit);
        };

        if report(store.delete(&student_id), &mut self.output)?.is_some() {
            writeln!(self.output, "{} Student record deleted successfully!", "✓".green().bold())?;
        }
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_store::InMemoryBackend;
    use std::io::Cursor;

    fn run_script(store: &mut RecordStore<InMemoryBackend>, script: &str) -> String {
        let mut out = Vec::new();
        Menu::new(Cursor::new(script.as_bytes()), &mut out).run(store).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn empty_store() -> RecordStore<InMemoryBackend> {
        RecordStore::open(InMemoryBackend::new()).unwrap()
    }

    #[test]
    fn parse_choices() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::Add));
        assert_eq!(MenuChoice::parse(" 5 "), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("6"), None);
        assert_eq!(MenuChoice::parse("add"), None);
    }

    #[test]
    fn exit_option_says_goodbye() {
        let mut store = empty_store();
        let out = run_script(&mut store, "5\n");
        assert!(out.contains("Student Record Management System"));
        assert!(out.ends_with("Exiting program. Goodbye!\n"));
    }

    #[test]
    fn end_of_input_exits_cleanly() {
        let mut store = empty_store();
        let out = run_script(&mut store, "");
        assert!(out.ends_with("Exiting program. Goodbye!\n"));
    }

    #[test]
    fn invalid_choice_reprompts() {
        let mut store = empty_store();
        let out = run_script(&mut store, "9\n5\n");
        assert!(out.contains("Invalid choice! Please enter a number between 1 and 5."));
        assert_eq!(out.matches("Enter your choice (1-5): ").count(), 2);
    }

    #[test]
    fn full_session_add_update_list_delete() {
        let mut store = empty_store();
        let script = "1\nS1\nAlice\nCS\n2\n90\n\
                      3\nS1\n\n\n\n95\n\
                      2\n\
                      4\nS1\n\
                      5\n";
        let out = run_script(&mut store, script);

        assert!(out.contains("Student added successfully!"));
        assert!(out.contains("Student record updated successfully!"));
        assert!(out.contains("| S1         | Alice | CS     | 2    | 95    |"));
        assert!(out.contains("Student record deleted successfully!"));
        assert!(store.is_empty());
        assert_eq!(store.backend().save_count(), 3);
    }

    #[test]
    fn blank_update_answers_keep_values() {
        let backend = InMemoryBackend::with_records(vec![Student::new("S1", "Alice", "CS", "2", "90")]);
        let mut store = RecordStore::open(backend).unwrap();
        run_script(&mut store, "3\nS1\nAlicia\n\n\n\n5\n");

        assert_eq!(store.get("S1"), Some(&Student::new("S1", "Alicia", "CS", "2", "90")));
    }

    #[test]
    fn duplicate_and_missing_ids_are_reported() {
        let backend = InMemoryBackend::with_records(vec![Student::new("S1", "Alice", "CS", "2", "90")]);
        let mut store = RecordStore::open(backend).unwrap();
        let out = run_script(&mut store, "1\nS1\nX\nY\n1\n1\n4\nS7\n3\nS8\n\n\n\n\n5\n");

        assert!(out.contains("Student with ID S1 already exists!"));
        assert!(out.contains("Student with ID S7 not found!"));
        assert!(out.contains("Student with ID S8 not found!"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn empty_listing_message() {
        let mut store = empty_store();
        let out = run_script(&mut store, "2\n5\n");
        assert!(out.contains("No student records found!"));
    }

    #[test]
    fn input_ending_mid_add_leaves_store_untouched() {
        let mut store = empty_store();
        let out = run_script(&mut store, "1\nS1\nAlice\n");
        assert!(store.is_empty());
        assert!(out.ends_with("Exiting program. Goodbye!\n"));
    }
}
