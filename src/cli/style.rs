//! Terminal styling
//!
//! Every colour goes through [`Stylize`]; owo-colors decides per stream
//! whether ANSI codes are emitted (`NO_COLOR`, `CLICOLOR`, `CLICOLOR_FORCE`,
//! TTY detection). Errors and warnings default to stderr.
//!
//! ```ignore
//! use crate::cli::style::{check, Stylize};
//!
//! println!("{} Created bucket {}", check(), bucket.name.accent());
//! eprintln!("{}: {reason}", "warning".warn());
//! ```

use indicatif::ProgressStyle;
use owo_colors::{OwoColorize, Style};
use std::fmt::{self, Display};

pub use owo_colors::Stream;

/// Semantic colour of a piece of output
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tone {
    /// Cyan: bucket names, paths, commands
    Accent,
    /// Green: clean completion
    Success,
    /// Red: failures
    Error,
    /// Yellow: needs attention
    Warn,
    /// Dim: titles, hints, secondary details
    Muted,
    /// Bold: headers
    Emphasis,
}

impl Tone {
    const fn style(self) -> Style {
        match self {
            Self::Accent => Style::new().cyan(),
            Self::Success => Style::new().green(),
            Self::Error => Style::new().red(),
            Self::Warn => Style::new().yellow(),
            Self::Muted => Style::new().dimmed(),
            Self::Emphasis => Style::new().bold(),
        }
    }

    const fn default_stream(self) -> Stream {
        match self {
            Self::Error | Self::Warn => Stream::Stderr,
            _ => Stream::Stdout,
        }
    }
}

/// A value rendered with a [`Tone`] when the target stream supports colour
#[derive(Clone, Debug)]
pub struct Styled<T> {
    value: T,
    tone: Tone,
    stream: Stream,
}

impl<T> Styled<T> {
    const fn new(value: T, tone: Tone) -> Self {
        Self {
            value,
            tone,
            stream: tone.default_stream(),
        }
    }

    /// Detect colour support on stderr
    #[must_use]
    pub const fn for_stderr(mut self) -> Self {
        self.stream = Stream::Stderr;
        self
    }

    /// Detect colour support on stdout
    #[must_use]
    pub const fn for_stdout(mut self) -> Self {
        self.stream = Stream::Stdout;
        self
    }
}

impl<T: Display> Display for Styled<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let style = self.tone.style();
        write!(
            f,
            "{}",
            self.value.if_supports_color(self.stream, |v| v.style(style))
        )
    }
}

/// Semantic styling for anything printable
pub trait Stylize: Display {
    /// Cyan, stdout
    fn accent(&self) -> Styled<&Self> {
        Styled::new(self, Tone::Accent)
    }

    /// Green, stdout
    fn success(&self) -> Styled<&Self> {
        Styled::new(self, Tone::Success)
    }

    /// Red, stderr
    fn error(&self) -> Styled<&Self> {
        Styled::new(self, Tone::Error)
    }

    /// Yellow, stderr
    fn warn(&self) -> Styled<&Self> {
        Styled::new(self, Tone::Warn)
    }

    /// Dim, stdout
    fn muted(&self) -> Styled<&Self> {
        Styled::new(self, Tone::Muted)
    }

    /// Bold, stdout
    fn emphasis(&self) -> Styled<&Self> {
        Styled::new(self, Tone::Emphasis)
    }
}

impl<T: Display + ?Sized> Stylize for T {}

/// Green check mark
pub const fn check() -> Styled<&'static str> {
    Styled::new("✓", Tone::Success).for_stdout()
}

/// Red cross, stderr
pub const fn cross() -> Styled<&'static str> {
    Styled::new("✗", Tone::Error)
}

/// Cyan arrow between a thing and where it goes
pub const fn arrow() -> Styled<&'static str> {
    Styled::new("→", Tone::Accent)
}

/// Dim bullet for unassigned files
pub const fn bullet() -> Styled<&'static str> {
    Styled::new("○", Tone::Muted)
}

/// Dim pipe for the files under a bucket
pub const fn pipe() -> Styled<&'static str> {
    Styled::new("│", Tone::Muted)
}

/// The URL as an OSC 8 link where the terminal supports it, plain otherwise
pub fn hyperlink_url(stream: Stream, url: &str) -> String {
    let target = match stream {
        Stream::Stdout => supports_hyperlinks::Stream::Stdout,
        Stream::Stderr => supports_hyperlinks::Stream::Stderr,
    };
    if supports_hyperlinks::on(target) {
        terminal_link::Link::new(url, url).to_string()
    } else {
        url.to_string()
    }
}

/// Cyan braille spinner
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
}
