// File: src/session.rs
//
// Interactive question-and-answer front end. It only collects answers and
// turns them into a validated RunConfig or RenderJob; it does no work itself.
use crate::config::{RunConfig, Settings};
use crate::core::alphabet::AlphabetKind;
use crate::core::types::{Task, TransformType};
use crate::error::{Result, StimulusError};
use crate::render::layout::{LayoutPreset, RowRange};
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// What the user asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionRequest {
    Generate(RunConfig),
    Render(RenderJob),
}

/// Rendering of an existing table.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderJob {
    pub table_path: PathBuf,
    pub out_dir: PathBuf,
    pub layout: LayoutPreset,
    pub range: RowRange,
}

pub struct Session<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(StimulusError::missing("input ended before all questions were answered"));
        }
        Ok(line.trim().to_string())
    }

    fn ask_optional_row(&mut self, question: &str) -> Result<Option<usize>> {
        let answer = self.ask(question)?;
        if answer.is_empty() {
            return Ok(None);
        }
        answer
            .parse()
            .map(Some)
            .map_err(|_| StimulusError::invalid(format!("'{}' is not a row number", answer)))
    }

    /// Walks the user through one run.
    pub fn prompt(&mut self, settings: &Settings) -> Result<SessionRequest> {
        let mode = self.ask("Select task (flanker / stroop / render): ")?;
        if mode.eq_ignore_ascii_case("render") {
            return self.prompt_render().map(SessionRequest::Render);
        }

        let task: Task = mode.parse()?;
        let style = match task {
            Task::Flanker => Some(self.ask("Select stimulus style (letter / number): ")?),
            Task::Stroop => None,
        };
        AlphabetKind::for_task(task, style.as_deref())?;
        let transform: TransformType = self.ask("Select type (type1 / type2 / type3 / type4): ")?.parse()?;

        let draft = RunConfig::new(task, style.as_deref(), transform, None, false, settings)?;

        let path_answer = self.ask(&format!("Output table [{}]: ", draft.output_path.display()))?;
        let output_path = (!path_answer.is_empty()).then(|| PathBuf::from(path_answer));
        let render_images = yes_no(&self.ask("Render images as well? (y/n): ")?)?;

        let config = RunConfig::new(task, style.as_deref(), transform, output_path, render_images, settings)?;
        Ok(SessionRequest::Generate(config))
    }

    fn prompt_render(&mut self) -> Result<RenderJob> {
        let table = self.ask("Stimulus table file: ")?;
        if table.is_empty() {
            return Err(StimulusError::missing("no table file given"));
        }
        let out_dir = self.ask("Image output folder: ")?;
        if out_dir.is_empty() {
            return Err(StimulusError::missing("no output folder given"));
        }
        let layout: LayoutPreset = self
            .ask("Layout (flanker / stroop / squared / origin / legacy-square): ")?
            .parse()?;
        let start = self.ask_optional_row("First row [1]: ")?;
        let end = self.ask_optional_row("Last row [last]: ")?;
        Ok(RenderJob {
            table_path: PathBuf::from(table),
            out_dir: PathBuf::from(out_dir),
            layout,
            range: RowRange::new(start, end)?,
        })
    }
}

fn yes_no(answer: &str) -> Result<bool> {
    match answer.to_ascii_lowercase().as_str() {
        "y" | "yes" => Ok(true),
        "n" | "no" => Ok(false),
        other => Err(StimulusError::invalid(format!("expected y or n, got '{}'", other))),
    }
}
