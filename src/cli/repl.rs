// Interactive chat REPL
//
// One question is fully processed (prompt build, backend call, display)
// before the next is accepted; the backend call is the only blocking
// operation and a status line stands in for a spinner while it runs.

use anyhow::Result;
use crossterm::style::Stylize;
use crossterm::terminal;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::{self, IsTerminal};

use crate::logging::{TranscriptEntry, TranscriptLogger};
use crate::responder::Responder;

use super::commands::{help_text, parse_command, Command};
use super::conversation::SessionLog;

/// Inline assistant message recorded when a backend call fails.
const FAILURE_MESSAGE: &str = "죄송합니다. 답변을 생성하는 데 문제가 발생했습니다.";

/// Get current terminal width, or default to 80 if not a TTY
fn terminal_width() -> usize {
    terminal::size().map(|(w, _)| w as usize).unwrap_or(80)
}

pub struct Repl {
    responder: Responder,
    log: SessionLog,
    transcript: Option<TranscriptLogger>,
    is_interactive: bool,
}

impl Repl {
    pub fn new(responder: Responder, transcript: Option<TranscriptLogger>) -> Self {
        // Detect if we're in interactive mode (stdout is a TTY)
        let is_interactive = io::stdout().is_terminal();

        Self {
            responder,
            log: SessionLog::new(),
            transcript,
            is_interactive,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut editor = DefaultEditor::new()?;

        if self.is_interactive {
            println!("{}", "정책 제안 챗봇".bold());
            println!("모델: {}", self.responder.model());
            println!("정책 제안에 대해 궁금한 점을 질문해주세요. (/help 명령어 목록)");
            self.print_separator();
        } else {
            eprintln!("# moa - non-interactive mode");
        }

        loop {
            let line = match editor.readline("> ") {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(e) => return Err(e.into()),
            };

            let input = line.trim().to_string();
            if input.is_empty() {
                continue;
            }
            let _ = editor.add_history_entry(&input);

            match parse_command(&input) {
                Some(Command::Quit) => break,
                Some(Command::Help) => println!("{}", help_text()),
                Some(Command::Clear) => {
                    self.log.clear();
                    println!("대화 기록을 지웠습니다.");
                }
                Some(Command::History) => self.print_history(),
                Some(Command::Unknown(cmd)) => {
                    println!("알 수 없는 명령어: {} (/help 참고)", cmd);
                }
                None => self.handle_question(input).await,
            }

            if self.is_interactive {
                self.print_separator();
            }
        }

        if self.is_interactive {
            println!("안녕히 가세요.");
        }
        Ok(())
    }

    /// Process one question: append to the log, call the backend, show
    /// the answer or an inline error, and keep chatting either way.
    async fn handle_question(&mut self, question: String) {
        self.log.add_user_message(question.clone());

        if self.is_interactive {
            println!("{}", "AI 정책 분석관이 답변을 생성 중입니다...".dim());
        }

        match self.responder.respond(&question).await {
            Ok(answer) => {
                println!("{}", answer);
                self.record_exchange(&question, &answer, true);
                self.log.add_assistant_message(answer);
            }
            Err(e) => {
                tracing::warn!("Backend call failed: {}", e);
                println!("{}", format!("❌ AI 응답 생성 실패: {}", e).red());
                self.record_exchange(&question, &e.to_string(), false);
                self.log.add_assistant_message(FAILURE_MESSAGE.to_string());
            }
        }
    }

    fn record_exchange(&self, question: &str, answer: &str, ok: bool) {
        if let Some(transcript) = &self.transcript {
            let entry = TranscriptEntry::new(
                question.to_string(),
                answer.to_string(),
                self.responder.model().to_string(),
                ok,
            );
            if let Err(e) = transcript.log(&entry) {
                tracing::warn!("Failed to write transcript entry: {}", e);
            }
        }
    }

    fn print_history(&self) {
        if self.log.is_empty() {
            println!("아직 대화 기록이 없습니다.");
            return;
        }
        for message in self.log.messages() {
            let label = if message.role == "user" { "나" } else { "챗봇" };
            println!("[{}] {}", label, message.content);
        }
        println!("({}개 질문)", self.log.turn_count());
    }

    fn print_separator(&self) {
        println!("{}", "─".repeat(terminal_width().min(80)).dim());
    }
}
