//! Interactive prompt over the registry service.

use crate::command::{Command, HELP_TEXT};
use campus_core::{
    CourseRepository, GroupRepository, RegistryService, ServiceError, StudentRepository,
};
use log::{info, warn};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

const PROMPT: &str = "campus> ";

/// Whether the loop keeps reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Reads commands until `q`, Ctrl-C or Ctrl-D.
pub fn run<G, C, S>(registry: &RegistryService<G, C, S>) -> anyhow::Result<()>
where
    G: GroupRepository,
    C: CourseRepository,
    S: StudentRepository,
{
    let mut editor = DefaultEditor::new()?;
    println!("{HELP_TEXT}");

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                editor.add_history_entry(line.as_str())?;
                if execute_line(registry, &line) == Flow::Quit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }

    info!("event=repl_exit module=cli status=ok");
    Ok(())
}

/// Parses and executes one line, printing its outcome.
pub fn execute_line<G, C, S>(registry: &RegistryService<G, C, S>, line: &str) -> Flow
where
    G: GroupRepository,
    C: CourseRepository,
    S: StudentRepository,
{
    match Command::parse(line) {
        Ok(command) => execute(registry, command),
        Err(err) => {
            println!("{err}");
            Flow::Continue
        }
    }
}

fn execute<G, C, S>(registry: &RegistryService<G, C, S>, command: Command) -> Flow
where
    G: GroupRepository,
    C: CourseRepository,
    S: StudentRepository,
{
    let outcome = match command {
        Command::GroupsAtMost(max) => registry
            .groups_with_student_count_at_most(max)
            .map(|report| report.to_string()),
        Command::CourseRoster(name) => registry
            .students_by_course_name(&name)
            .map(|report| report.to_string()),
        Command::EnrollStudent(request) => registry
            .enroll_new_student(&request)
            .map(|student| format!("Student added: {student}")),
        Command::DeleteStudent(id) => registry
            .delete_student_by_id(id)
            .map(|deletion| deletion.to_string()),
        Command::AddStudentsToCourse {
            course_id,
            student_ids,
        } => registry
            .add_students_to_course(&student_ids, course_id)
            .map(|report| report.to_string()),
        Command::RemoveStudentFromCourse {
            student_id,
            course_id,
        } => registry
            .remove_student_from_course(student_id, course_id)
            .map(|removal| removal.to_string()),
        Command::Help => Ok(HELP_TEXT.to_string()),
        Command::Quit => return Flow::Quit,
    };

    match outcome {
        Ok(text) => println!("{text}"),
        Err(err) => report_error(&err),
    }
    Flow::Continue
}

fn report_error(err: &ServiceError) {
    match err {
        ServiceError::Validation(failures) => {
            for failure in failures {
                println!("Error: {failure}");
            }
        }
        other => {
            warn!("event=command_failed module=cli status=error error={other}");
            println!("Error: {other}");
        }
    }
}
