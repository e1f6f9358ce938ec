//! Grid rendering of student records.

use roster_types::Student;

const HEADERS: [&str; 5] = ["Student ID", "Name", "Branch", "Year", "Marks"];

/// Render `students` as a bordered grid with a header row.
///
/// Columns are as wide as their widest cell, measured in characters.
pub fn render(students: &[Student]) -> String {
    let rows: Vec<[&str; 5]> = students
        .iter()
        .map(|s| {
            [
                s.student_id.as_str(),
                s.name.as_str(),
                s.branch.as_str(),
                s.year.as_str(),
                s.marks.as_str(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_rule(&mut out, &widths, '-');
    push_row(&mut out, &widths, &HEADERS);
    push_rule(&mut out, &widths, '=');
    for row in &rows {
        push_row(&mut out, &widths, row);
        push_rule(&mut out, &widths, '-');
    }
    out
}

fn push_rule(out: &mut String, widths: &[usize; 5], fill: char) {
    out.push('+');
    for &width in widths {
        out.extend(std::iter::repeat(fill).take(width + 2));
        out.push('+');
    }
    out.push('\n');
}

fn push_row(out: &mut String, widths: &[usize; 5], cells: &[&str; 5]) {
    out.push('|');
    for (cell, &width) in cells.iter().zip(widths) {
        out.push_str(&format!(" {cell:<width$} |"));
    }
    out.push('\n');
}
