//! Shared test utilities for integration tests
//!
//! Scripted stand-ins for the interactive collaborators, plus fixture
//! helpers used across test files.

#![allow(dead_code)]

use assert_fs::prelude::*;
use emoji_eraser::core::host::{Choice, HostError, Notifier, Progress, Prompt};

/// Answers every prompt with `answer` and keeps the questions.
pub struct Answer
{
    pub answer: Option<Choice>,
    pub asked: Vec<String>,
}

impl Answer
{
    pub fn yes() -> Self
    {
        Self { answer: Some(Choice::Yes), asked: Vec::new() }
    }
}

impl Prompt for Answer
{
    fn ask(
        &mut self,
        message: &str,
        _options: &[Choice],
    ) -> Result<Option<Choice>, HostError>
    {
        self.asked
            .push(message.to_string());
        Ok(self.answer)
    }
}

/// Collects every message regardless of level.
#[derive(Default)]
pub struct Messages
{
    pub info: Vec<String>,
    pub warn: Vec<String>,
    pub error: Vec<String>,
}

impl Notifier for Messages
{
    fn info(
        &mut self,
        message: &str,
    )
    {
        self.info
            .push(message.to_string());
    }

    fn warn(
        &mut self,
        message: &str,
    )
    {
        self.warn
            .push(message.to_string());
    }

    fn error(
        &mut self,
        message: &str,
    )
    {
        self.error
            .push(message.to_string());
    }
}

/// Cancels once `files_before_cancel` files have started.
pub struct CancelAfter
{
    pub files_before_cancel: Option<usize>,
    pub started: usize,
    pub messages: Vec<String>,
}

impl CancelAfter
{
    pub fn never() -> Self
    {
        Self { files_before_cancel: None, started: 0, messages: Vec::new() }
    }

    pub fn after(files: usize) -> Self
    {
        Self { files_before_cancel: Some(files), started: 0, messages: Vec::new() }
    }
}

impl Progress for CancelAfter
{
    fn report(
        &mut self,
        _increment_percent: f64,
        message: &str,
    )
    {
        if message.starts_with("Processing")
        {
            self.started += 1;
        }
        self.messages
            .push(message.to_string());
    }

    fn is_cancelled(&self) -> bool
    {
        self.files_before_cancel
            .is_some_and(|n| self.started >= n)
    }
}

/// Three files in a directory: two with emojis (2 and 3), one without.
pub fn make_emoji_fixture() -> assert_fs::TempDir
{
    let tmp = assert_fs::TempDir::new().expect("tempdir");

    tmp.child("src/app.ts")
        .write_str("const greeting = 'hi 👋';\n// launch 🚀\n")
        .expect("write app.ts");
    tmp.child("docs/guide.md")
        .write_str("# Guide 📘\n\n- fast ⚡\n- fun 🎉\n")
        .expect("write guide.md");
    tmp.child("tools/build.py")
        .write_str("print('plain')\n")
        .expect("write build.py");

    tmp
}
