use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use roster_store::config::DEFAULT_FILE;
use roster_types::{Student, StudentPatch};

#[derive(Parser)]
#[command(
    name = "roster",
    about = "Roster — student record management",
    version,
)]
pub struct Cli {
    /// Runs the interactive menu when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// JSON file holding the records
    #[arg(long, global = true, env = "ROSTER_FILE", default_value = DEFAULT_FILE)]
    pub file: PathBuf,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the interactive menu
    Menu,
    /// Add a student record
    Add(AddArgs),
    /// Show all student records
    List(ListArgs),
    /// Change fields of an existing record
    Update(UpdateArgs),
    /// Remove a student record
    Delete(DeleteArgs),
}

#[derive(Args)]
pub struct AddArgs {
    pub student_id: String,
    pub name: String,
    pub branch: String,
    pub year: String,
    pub marks: String,
}

impl AddArgs {
    pub fn into_student(self) -> Student {
        Student::new(self.student_id, self.name, self.branch, self.year, self.marks)
    }
}

#[derive(Args)]
pub struct ListArgs {}

/// Omitted flags keep their value; an explicit empty value clears the field.
#[derive(Args)]
pub struct UpdateArgs {
    pub student_id: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub branch: Option<String>,
    #[arg(long)]
    pub year: Option<String>,
    #[arg(long)]
    pub marks: Option<String>,
}

impl UpdateArgs {
    pub fn patch(&self) -> StudentPatch {
        StudentPatch {
            name: self.name.clone(),
            branch: self.branch.clone(),
            year: self.year.clone(),
            marks: self.marks.clone(),
        }
    }
}

#[derive(Args)]
pub struct DeleteArgs {
    pub student_id: String,
}
