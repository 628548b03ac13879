//! Answers to interactive questions.

use std::io::{self, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

/// Source of answers for interactive prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerSource {
    /// Print the question on stdout and read one line from stdin.
    Terminal,
    /// Answer every question with a fixed value.
    Canned(String),
}

impl AnswerSource {
    /// Asks `question` and returns the trimmed answer.
    ///
    /// Reading stdin never blocks the runtime, so an interrupt still gets
    /// through while the user is typing.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be written or read.
    pub async fn ask(&self, question: &str) -> io::Result<String> {
        match self {
            Self::Canned(answer) => Ok(answer.trim().to_string()),
            Self::Terminal => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(question.as_bytes())?;
                stdout.flush()?;
                drop(stdout);

                read_answer(&mut BufReader::new(tokio::io::stdin())).await
            }
        }
    }
}

/// Reads one line from `reader` and returns it trimmed.
///
/// End of input counts as an empty answer.
///
/// # Errors
///
/// Returns an error if reading fails.
pub async fn read_answer<R>(reader: &mut R) -> io::Result<String>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = String::new();
    reader.read_line(&mut line).await?;
    Ok(line.trim().to_string())
}
