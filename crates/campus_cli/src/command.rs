//! Line parsing for the interactive registry prompt.
//!
//! Syntax errors are caught here and never reach the core.

use campus_core::{CourseId, GroupId, NewStudentRequest, StudentId};
use thiserror::Error;

pub const HELP_TEXT: &str = "\
Commands:
  a <max>                                  groups with at most <max> students
  b <course name>                          students enrolled in a course
  c <first> <last> <group_id> [course_ids] enroll a new student
  d <student_id>                           delete a student
  e <course_id> <student_ids>              add students to a course
  f <student_id> <course_id>               remove a student from a course
  h                                        show this help
  q                                        quit
Id lists are comma-separated, e.g. 1,2,3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    GroupsAtMost(u32),
    CourseRoster(String),
    EnrollStudent(NewStudentRequest),
    DeleteStudent(StudentId),
    AddStudentsToCourse {
        course_id: CourseId,
        student_ids: Vec<StudentId>,
    },
    RemoveStudentFromCourse {
        student_id: StudentId,
        course_id: CourseId,
    },
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty input; type `h` for help")]
    Empty,
    #[error("unknown command `{0}`; type `h` for help")]
    UnknownCommand(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("`{0}` is not a valid number")]
    InvalidNumber(String),
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(ParseError::Empty);
        }
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };
        let args: Vec<&str> = rest.split_whitespace().collect();

        match name {
            "a" => match args.as_slice() {
                [max] => Ok(Self::GroupsAtMost(parse_number(max)?)),
                _ => Err(ParseError::Usage("a <max>")),
            },
            "b" if !rest.is_empty() => Ok(Self::CourseRoster(rest.to_string())),
            "b" => Err(ParseError::Usage("b <course name>")),
            "c" => parse_enroll(&args),
            "d" => match args.as_slice() {
                [id] => Ok(Self::DeleteStudent(parse_number(id)?)),
                _ => Err(ParseError::Usage("d <student_id>")),
            },
            "e" => match args.as_slice() {
                [course_id, student_ids] => Ok(Self::AddStudentsToCourse {
                    course_id: parse_number(course_id)?,
                    student_ids: parse_id_list(student_ids)?,
                }),
                _ => Err(ParseError::Usage("e <course_id> <student_ids>")),
            },
            "f" => match args.as_slice() {
                [student_id, course_id] => Ok(Self::RemoveStudentFromCourse {
                    student_id: parse_number(student_id)?,
                    course_id: parse_number(course_id)?,
                }),
                _ => Err(ParseError::Usage("f <student_id> <course_id>")),
            },
            "h" if args.is_empty() => Ok(Self::Help),
            "q" if args.is_empty() => Ok(Self::Quit),
            other => Err(ParseError::UnknownCommand(other.to_string())),
        }
    }
}

fn parse_enroll(args: &[&str]) -> Result<Command, ParseError> {
    const USAGE: &str = "c <first> <last> <group_id> [course_ids]";
    let (first_name, last_name, group_id, course_ids) = match args {
        [first, last, group] => (first, last, group, Vec::new()),
        [first, last, group, courses] => (first, last, group, parse_id_list(courses)?),
        _ => return Err(ParseError::Usage(USAGE)),
    };

    Ok(Command::EnrollStudent(NewStudentRequest {
        first_name: (*first_name).to_string(),
        last_name: (*last_name).to_string(),
        group_id: parse_number::<GroupId>(group_id)?,
        course_ids,
    }))
}

fn parse_number<T: std::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value
        .trim()
        .parse()
        .map_err(|_| ParseError::InvalidNumber(value.to_string()))
}

fn parse_id_list(value: &str) -> Result<Vec<i64>, ParseError> {
    value.split(',').map(parse_number).collect()
}

#[cfg(test)]
mod tests {
    use super::{Command, ParseError};
    use campus_core::NewStudentRequest;

    #[test]
    fn parses_every_command() {
        assert_eq!(Command::parse("a 10"), Ok(Command::GroupsAtMost(10)));
        assert_eq!(
            Command::parse("b  Computer Science "),
            Ok(Command::CourseRoster("Computer Science".to_string()))
        );
        assert_eq!(Command::parse("d 4"), Ok(Command::DeleteStudent(4)));
        assert_eq!(
            Command::parse("e 3 1,2, 5"),
            Err(ParseError::Usage("e <course_id> <student_ids>"))
        );
        assert_eq!(
            Command::parse("e 3 1,2,5"),
            Ok(Command::AddStudentsToCourse {
                course_id: 3,
                student_ids: vec![1, 2, 5],
            })
        );
        assert_eq!(
            Command::parse("f 7 2"),
            Ok(Command::RemoveStudentFromCourse {
                student_id: 7,
                course_id: 2,
            })
        );
        assert_eq!(Command::parse("h"), Ok(Command::Help));
        assert_eq!(Command::parse(" q "), Ok(Command::Quit));
    }

    #[test]
    fn parses_enroll_with_and_without_courses() {
        assert_eq!(
            Command::parse("c Ada Lovelace 2 1,3"),
            Ok(Command::EnrollStudent(NewStudentRequest {
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                group_id: 2,
                course_ids: vec![1, 3],
            }))
        );
        match Command::parse("c Alan Turing 5") {
            Ok(Command::EnrollStudent(request)) => assert!(request.course_ids.is_empty()),
            other => panic!("unexpected parse result: {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(Command::parse("   "), Err(ParseError::Empty));
        assert_eq!(
            Command::parse("z"),
            Err(ParseError::UnknownCommand("z".to_string()))
        );
        assert_eq!(
            Command::parse("a ten"),
            Err(ParseError::InvalidNumber("ten".to_string()))
        );
        assert_eq!(
            Command::parse("e 1 2,x"),
            Err(ParseError::InvalidNumber("x".to_string()))
        );
        assert_eq!(
            Command::parse("e 1 2,,3"),
            Err(ParseError::InvalidNumber(String::new()))
        );
        assert!(matches!(Command::parse("b"), Err(ParseError::Usage(_))));
        assert!(matches!(Command::parse("c Ada"), Err(ParseError::Usage(_))));
    }
}
