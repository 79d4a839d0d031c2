//! Interactive command-line question loop.
//!
//! Blocking read-eval loop over stdin: empty input re-prompts, `exit` or
//! `quit` (case-insensitive) terminates, end-of-input terminates. Each
//! question is answered independently; there is no session memory.

use std::io::{BufRead, Write};

use crate::error::Result;
use crate::query::QueryPipeline;

const PROMPT: &str = "Ask a question about the Constitution (or 'exit'): ";

/// Run the interactive loop until the user exits or input ends.
pub async fn run_chat(pipeline: &QueryPipeline) -> Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    loop {
        print!("{}", PROMPT);
        let _ = stdout.flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }

        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if is_exit(question) {
            break;
        }

        let answer = pipeline.answer_question(question).await?;
        println!("\nAnswer:\n");
        println!("{}", answer);
        println!();
    }

    Ok(())
}

fn is_exit(input: &str) -> bool {
    matches!(input.to_lowercase().as_str(), "exit" | "quit")
}
