use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use inquire::{Confirm, InquireError, Text};

use super::Response;

/// How questions without a stored answer are asked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PromptMode {
    /// Terminal dialogs
    #[default]
    Dialog,
    /// Plain line prompts on stdin/stdout
    Stdio,
    /// Never ask; take the default
    NonInteractive,
}

/// Answer to a single question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompted<T> {
    Answered(T),
    Cancelled,
}

/// Read a stored, non-cancelled response as a yes/no answer.
pub(super) fn stored_confirmation(r: &Response) -> bool {
    parse_yes_no(&r.value).unwrap_or(true)
}

fn parse_yes_no(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "" => None,
        "y" | "yes" | "true" | "1" => Some(true),
        "n" | "no" | "false" | "0" => Some(false),
        _ => None,
    }
}

pub(super) fn dialog_confirm(question: &str, default: bool) -> Result<Prompted<bool>> {
    match Confirm::new(question).with_default(default).prompt() {
        Ok(answer) => Ok(Prompted::Answered(answer)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
            Ok(Prompted::Cancelled)
        }
        Err(e) => Err(anyhow::anyhow!("Prompt failed: {}", e)),
    }
}

pub(super) fn dialog_input(question: &str, default: &str) -> Result<Prompted<String>> {
    match Text::new(question).with_default(default).prompt() {
        Ok(answer) => Ok(Prompted::Answered(answer)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
            Ok(Prompted::Cancelled)
        }
        Err(e) => Err(anyhow::anyhow!("Prompt failed: {}", e)),
    }
}

/// Line-based yes/no prompt. Re-asks until the answer parses; EOF cancels.
pub(super) fn read_confirm<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
    default: bool,
) -> Result<Prompted<bool>> {
    let hint = if default { "[Y/n]" } else { "[y/N]" };
    loop {
        write!(output, "{question} {hint} ")?;
        output.flush()?;

        let Some(line) = read_line(input)? else {
            return Ok(Prompted::Cancelled);
        };
        if line.trim().is_empty() {
            return Ok(Prompted::Answered(default));
        }
        if let Some(answer) = parse_yes_no(&line) {
            return Ok(Prompted::Answered(answer));
        }
        writeln!(output, "Please answer yes or no.")?;
    }
}

/// Line-based text prompt. An empty line takes the default; EOF cancels.
pub(super) fn read_input<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
    default: &str,
) -> Result<Prompted<String>> {
    if default.is_empty() {
        write!(output, "{question} ")?;
    } else {
        write!(output, "{question} [{default}] ")?;
    }
    output.flush()?;

    Ok(match read_line(input)? {
        None => Prompted::Cancelled,
        Some(line) if line.trim().is_empty() => Prompted::Answered(default.to_string()),
        Some(line) => Prompted::Answered(line.trim().to_string()),
    })
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let n = input.read_line(&mut line).context("read from stdin")?;
    Ok((n > 0).then_some(line))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn confirm(input: &str, default: bool) -> (Prompted<bool>, String) {
        let mut out = Vec::new();
        let answer = read_confirm(&mut Cursor::new(input), &mut out, "Install?", default).unwrap();
        (answer, String::from_utf8(out).unwrap())
    }

    #[test]
    fn empty_line_takes_default() {
        let (answer, out) = confirm("\n", true);
        assert_eq!(answer, Prompted::Answered(true));
        assert_eq!(out, "Install? [Y/n] ");
    }

    #[test]
    fn reasks_on_garbage() {
        let (answer, out) = confirm("maybe\nn\n", true);
        assert_eq!(answer, Prompted::Answered(false));
        assert!(out.contains("Please answer yes or no."));
    }

    #[test]
    fn eof_cancels() {
        assert_eq!(confirm("", false).0, Prompted::Cancelled);
    }

    #[test]
    fn text_input() {
        let mut out = Vec::new();
        let got = read_input(&mut Cursor::new("  ec  \n"), &mut out, "Key type?", "rsa").unwrap();
        assert_eq!(got, Prompted::Answered("ec".to_string()));
        assert_eq!(String::from_utf8(out).unwrap(), "Key type? [rsa] ");

        let got = read_input(&mut Cursor::new("\n"), &mut Vec::new(), "Key type?", "rsa").unwrap();
        assert_eq!(got, Prompted::Answered("rsa".to_string()));
    }

    #[test]
    fn stored_text_answers_yes_no() {
        assert!(stored_confirmation(&Response::value("yes")));
        assert!(!stored_confirmation(&Response::value("No")));
        assert!(stored_confirmation(&Response::default()));
    }
}
