use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use texsnap_types::{AppEvent, ImageSource, Point, PointerEvent};

use crate::script::parse_script;

#[derive(Debug, Parser)]
#[command(
    name = "texsnap",
    version,
    about = "Select a screen region and turn the formula in it into LaTeX"
)]
pub struct Cli {
    /// JSON config file, defaults to `TEXSNAP_CONFIG` when set
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Select a region of a screenshot and recognize it
    Capture(CaptureArgs),
    /// Recognize an image file as is
    Recognize(RecognizeArgs),
    /// Manage the stored service token
    #[command(subcommand)]
    Token(TokenCommand),
}

#[derive(Debug, Args)]
pub struct CaptureArgs {
    /// Screenshot to select from
    #[arg(long, conflicts_with = "screen", required_unless_present = "screen")]
    pub image: Option<PathBuf>,

    /// Grab the primary monitor instead
    #[arg(long)]
    pub screen: bool,

    /// Pointer-event script, `-` for stdin
    #[arg(long, conflicts_with = "drag", required_unless_present = "drag")]
    pub events: Option<PathBuf>,

    /// Drag from (X1, Y1) to (X2, Y2)
    #[arg(
        long,
        num_args = 4,
        value_names = ["X1", "Y1", "X2", "Y2"],
        allow_negative_numbers = true
    )]
    pub drag: Option<Vec<i32>>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct RecognizeArgs {
    /// PNG image containing a formula
    pub image: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Markdown document to insert the formula into
    #[arg(long)]
    pub document: Option<PathBuf>,

    /// Save the document, to PATH when given
    #[arg(long, value_name = "PATH")]
    pub save: Option<Option<PathBuf>>,

    /// Copy the document to the clipboard
    #[arg(long)]
    pub copy: bool,
}

#[derive(Debug, Subcommand)]
pub enum TokenCommand {
    /// Store a new token
    Set { token: String },
    /// Print the stored token, masked
    Show,
    /// Forget the stored token
    Clear,
}

impl CaptureArgs {
    pub fn image_source(&self) -> ImageSource {
        match &self.image {
            Some(path) if !self.screen => ImageSource::File(path.clone()),
            _ => ImageSource::Screen,
        }
    }

    pub fn pointer_events(&self) -> anyhow::Result<Vec<PointerEvent>> {
        if let Some(coords) = &self.drag {
            let [x1, y1, x2, y2] = coords.as_slice() else {
                anyhow::bail!("--drag takes exactly four coordinates");
            };
            return Ok(PointerEvent::drag(Point::new(*x1, *y1), Point::new(*x2, *y2)));
        }

        let path = self
            .events
            .as_ref()
            .context("either --events or --drag is required")?;

        let script = if path.as_os_str() == "-" {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read events from stdin")?;
            text
        } else {
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?
        };

        parse_script(&script)
    }

    pub fn requests(&self) -> anyhow::Result<Vec<AppEvent>> {
        let mut requests = vec![AppEvent::CaptureRegion {
            source: self.image_source(),
            events: self.pointer_events()?,
        }];
        requests.extend(self.output.follow_up());
        Ok(requests)
    }
}

impl RecognizeArgs {
    pub fn requests(&self) -> Vec<AppEvent> {
        let mut requests = vec![AppEvent::RecognizeFile(self.image.clone())];
        requests.extend(self.output.follow_up());
        requests
    }
}

impl OutputArgs {
    /// Requests that run after the formula is in the document
    pub fn follow_up(&self) -> Vec<AppEvent> {
        let mut requests = Vec::new();
        if let Some(path) = &self.save {
            requests.push(AppEvent::SaveDocument(path.clone()));
        }
        if self.copy {
            requests.push(AppEvent::CopyDocument);
        }
        requests
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("texsnap").chain(args.iter().copied()))
    }

    #[test]
    fn test_capture_with_drag() {
        let cli = parse(&[
            "capture", "--image", "shot.png", "--drag", "50", "50", "-10", "10", "--save",
        ])
        .unwrap();

        let Command::Capture(args) = cli.command else {
            panic!("expected capture");
        };
        assert_eq!(args.image_source(), ImageSource::File("shot.png".into()));
        assert_eq!(
            args.pointer_events().unwrap(),
            PointerEvent::drag(Point::new(50, 50), Point::new(-10, 10))
        );

        let requests = args.requests().unwrap();
        assert_eq!(requests.len(), 2);
        assert!(matches!(requests[1], AppEvent::SaveDocument(None)));
    }

    #[test]
    fn test_capture_needs_source_and_events() {
        assert!(parse(&["capture", "--drag", "1", "2", "3", "4"]).is_err());
        assert!(parse(&["capture", "--image", "a.png"]).is_err());
        assert!(
            parse(&[
                "capture", "--image", "a.png", "--screen", "--drag", "1", "2", "3", "4"
            ])
            .is_err()
        );
    }

    #[test]
    fn test_recognize_follow_up_order() {
        let cli = parse(&["recognize", "f.png", "--copy", "--save", "out.md"]).unwrap();
        let Command::Recognize(args) = cli.command else {
            panic!("expected recognize");
        };

        let requests = args.requests();
        assert!(matches!(&requests[0], AppEvent::RecognizeFile(p) if p == &PathBuf::from("f.png")));
        assert!(matches!(&requests[1], AppEvent::SaveDocument(Some(p)) if p == &PathBuf::from("out.md")));
        assert!(matches!(requests[2], AppEvent::CopyDocument));
    }

    #[test]
    fn test_token_commands() {
        let cli = parse(&["token", "set", "abc"]).unwrap();
        assert!(matches!(cli.command, Command::Token(TokenCommand::Set { token }) if token == "abc"));
        assert!(matches!(
            parse(&["token", "show"]).unwrap().command,
            Command::Token(TokenCommand::Show)
        ));
    }
}
