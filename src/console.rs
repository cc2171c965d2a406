use std::io::{self, BufRead, Write};

/// Separator printed between report blocks.
pub fn separator() -> String {
    "-".repeat(40)
}

// ---------------------------------------------------------------------------
// Console – prompt in, string out
// ---------------------------------------------------------------------------

/// The request/response surface every interactive step talks to.
pub trait Console {
    /// Show `prompt` and return the next line of input without its line
    /// ending. Fails with `UnexpectedEof` once input is exhausted.
    fn ask(&mut self, prompt: &str) -> io::Result<String>;

    /// Print one line of output.
    fn say(&mut self, text: &str) -> io::Result<()>;
}

/// A [`Console`] over any reader / writer pair, normally stdin and stdout.
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl Terminal<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console for Terminal<R, W> {
    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        self.output.write_all(prompt.as_bytes())?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        let trimmed = line.trim_end_matches(&['\n', '\r'][..]).len();
        line.truncate(trimmed);
        Ok(line)
    }

    fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }
}

// ---------------------------------------------------------------------------
// Scripted console for headless tests
// ---------------------------------------------------------------------------
