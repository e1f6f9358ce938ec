use std::io::{self, Write};

use anyhow::Context;
use colored::Colorize;
use roster_store::{JsonFileBackend, RecordBackend, RecordStore, StoreConfig, StoreResult};
use roster_types::Student;

use crate::cli::*;
use crate::menu::Menu;
use crate::table;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = StoreConfig::at(&cli.file);
    let mut store = RecordStore::open(JsonFileBackend::new(config))
        .with_context(|| format!("failed to load student records from {}", cli.file.display()))?;

    let format = cli.format;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command.unwrap_or(Command::Menu) {
        Command::Menu => Menu::new(io::stdin().lock(), out).run(&mut store),
        Command::Add(args) => cmd_add(&mut store, args, format, &mut out),
        Command::List(_) => cmd_list(&store, format, &mut out),
        Command::Update(args) => cmd_update(&mut store, args, format, &mut out),
        Command::Delete(args) => cmd_delete(&mut store, args, format, &mut out),
    }
}

/// Print a rejected operation and swallow it; storage failures propagate.
pub(crate) fn report<T>(result: StoreResult<T>, out: &mut impl Write) -> anyhow::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if !e.is_storage() => {
            writeln!(out, "{} {}", "✗".red().bold(), e)?;
            Ok(None)
        }
        Err(e) => Err(e).context("record store failure"),
    }
}

pub(crate) fn write_listing(students: &[Student], format: OutputFormat, out: &mut impl Write) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(students)?)?,
        OutputFormat::Text if students.is_empty() => writeln!(out, "No student records found!")?,
        OutputFormat::Text => write!(out, "{}", table::render(students))?,
    }
    Ok(())
}

pub(crate) fn add_student<B: RecordBackend>(
    store: &mut RecordStore<B>,
    student: Student,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    let added = report(store.add(student), out)?.is_some();
    if added {
        writeln!(out, "{} Student added successfully!", "✓".green().bold())?;
    }
    Ok(added)
}

fn cmd_add<B: RecordBackend>(
    store: &mut RecordStore<B>,
    args: AddArgs,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let student = args.into_student();
    let student_id = student.student_id.clone();
    if add_student(store, student, out)? && format == OutputFormat::Json {
        if let Some(student) = store.get(student_id.as_str()) {
            writeln!(out, "{}", serde_json::to_string_pretty(student)?)?;
        }
    }
    Ok(())
}

fn cmd_list<B: RecordBackend>(
    store: &RecordStore<B>,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    write_listing(store.list_all(), format, out)
}

fn cmd_update<B: RecordBackend>(
    store: &mut RecordStore<B>,
    args: UpdateArgs,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let patch = args.patch();
    if patch.is_empty() {
        writeln!(out, "Nothing to update. Pass --name, --branch, --year or --marks.")?;
        return Ok(());
    }

    if let Some(student) = report(store.update(&args.student_id, &patch), out)? {
        writeln!(out, "{} Student record updated successfully!", "✓".green().bold())?;
        match format {
            OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(student)?)?,
            OutputFormat::Text => write!(out, "{}", table::render(std::slice::from_ref(student)))?,
        }
    }
    Ok(())
}

fn cmd_delete<B: RecordBackend>(
    store: &mut RecordStore<B>,
    args: DeleteArgs,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if let Some(removed) = report(store.delete(&args.student_id), out)? {
        writeln!(out, "{} Student record deleted successfully!", "✓".green().bold())?;
        if format == OutputFormat::Json {
            writeln!(out, "{}", serde_json::to_string_pretty(&removed)?)?;
        }
    }
    Ok(())
}
