use anyhow::{Context, Result};
use console::{Key, Style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use passgen::charset::{is_digit, is_symbol};
use passgen::{
    GenerationRequest, MAX_UI_LENGTH, MIN_UI_LENGTH, StrengthAssessment, StrengthLabel, classify,
    generate,
};
use std::io::Write;
use std::process::{Command, Stdio};
use std::time::Duration;
use zeroize::Zeroizing;

pub const TOAST_DURATION: Duration = Duration::from_secs(2);
pub const BAR_WIDTH: usize = 24;

#[derive(Clone, Copy)]
pub struct DisplayOptions {
    pub unicode_support: bool,
    pub color_support: bool,
    pub quiet: bool,
}

pub fn detect_unicode_support() -> bool {
    supports_unicode::on(supports_unicode::Stream::Stdout)
}

pub fn detect_color_support() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

pub fn get_status_symbols(unicode_support: bool) -> (&'static str, &'static str) {
    if unicode_support {
        ("✓", "!")
    } else {
        ("+", "!")
    }
}

/// Current settings of the generator together with the password they produced.
pub struct WidgetState {
    request: GenerationRequest,
    password: Zeroizing<String>,
}

impl WidgetState {
    pub fn new(request: GenerationRequest) -> Result<Self> {
        let password = generate(&request)?;
        Ok(Self { request, password })
    }

    pub fn request(&self) -> &GenerationRequest {
        &self.request
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn strength(&self) -> StrengthAssessment {
        classify(&self.request)
    }

    pub fn regenerate(&mut self) -> Result<()> {
        self.password = generate(&self.request)?;
        Ok(())
    }

    pub fn adjust_length(&mut self, delta: isize) -> Result<()> {
        let length = self
            .request
            .length
            .saturating_add_signed(delta)
            .clamp(MIN_UI_LENGTH, MAX_UI_LENGTH);

        if length != self.request.length {
            self.request.length = length;
            self.regenerate()?;
        }
        Ok(())
    }

    pub fn toggle_digits(&mut self) -> Result<()> {
        self.request.include_digits = !self.request.include_digits;
        self.regenerate()
    }

    pub fn toggle_symbols(&mut self) -> Result<()> {
        self.request.include_symbols = !self.request.include_symbols;
        self.regenerate()
    }
}

fn label_style(label: StrengthLabel, color_support: bool) -> Style {
    if !color_support {
        return Style::new();
    }

    match label {
        StrengthLabel::Weak => Style::new().yellow(),
        StrengthLabel::Good => Style::new().blue(),
        StrengthLabel::Strong => Style::new().magenta(),
        StrengthLabel::VeryStrong => Style::new().green(),
    }
}

pub fn render_bar(fill_fraction: f64, width: usize, unicode_support: bool) -> String {
    let (full, empty) = if unicode_support {
        ("█", "░")
    } else {
        ("#", "-")
    };

    let filled = ((fill_fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("{}{}", full.repeat(filled), empty.repeat(width - filled))
}

/// Number of digits and symbols in `password`.
pub fn class_counts(password: &str) -> (usize, usize) {
    password.chars().fold((0, 0), |(digits, symbols), ch| {
        (
            digits + usize::from(is_digit(ch)),
            symbols + usize::from(is_symbol(ch)),
        )
    })
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}

pub fn display_output(state: &WidgetState, options: &DisplayOptions) {
    if options.quiet {
        println!("{}", state.password());
        return;
    }

    println!("Out[0]:\n{}\n", state.password());
    display_strength(state, options);
    display_stats(state, options);
}

fn display_strength(state: &WidgetState, options: &DisplayOptions) {
    let strength = state.strength();
    let style = label_style(strength.label, options.color_support);

    println!(
        "Strength: {} {}",
        style.apply_to(render_bar(
            strength.fill_fraction,
            BAR_WIDTH,
            options.unicode_support
        )),
        style.apply_to(strength.label)
    );
    println!();
}

fn display_stats(state: &WidgetState, options: &DisplayOptions) {
    let (check_ok, check_warn) = get_status_symbols(options.unicode_support);
    let request = state.request();
    let alphabet = request.alphabet();
    let entropy = alphabet.entropy_bits(request.length);

    let (digit_count, symbol_count) = class_counts(state.password());

    let toggle = |enabled: bool, count: usize| {
        let style = if options.color_support {
            if enabled {
                Style::new().green()
            } else {
                Style::new().yellow()
            }
        } else {
            Style::new()
        };
        let status = if enabled { check_ok } else { check_warn };
        let text = if enabled {
            format!("on ({} in password)", count)
        } else {
            "off".to_string()
        };
        format!("{} {}", style.apply_to(format!("[{}]", status)), text)
    };

    println!("Stats:");
    println!(
        "  ├─ Length     {} {}",
        request.length,
        plural(request.length, "char", "chars")
    );
    println!("  ├─ Digits     {}", toggle(request.include_digits, digit_count));
    println!("  ├─ Symbols    {}", toggle(request.include_symbols, symbol_count));
    println!("  ├─ Charset    {} chars", alphabet.len());
    println!("  └─ Entropy    {:.1} bits", entropy);
}

pub fn default_copy_command() -> &'static str {
    if cfg!(target_os = "macos") {
        "pbcopy"
    } else if cfg!(windows) {
        "clip"
    } else {
        "xclip -selection clipboard"
    }
}

/// Pipes `text` into `command`, which is run through the platform shell.
pub fn copy_to_clipboard(text: &str, command: &str) -> Result<()> {
    let (shell, flag) = if cfg!(windows) { ("cmd", "/C") } else { ("sh", "-c") };

    let mut child = Command::new(shell)
        .args([flag, command])
        .stdin(Stdio::piped())
        .spawn()
        .with_context(|| format!("Failed to run copy command `{}`", command))?;

    let written = match child.stdin.take() {
        Some(mut stdin) => stdin
            .write_all(text.as_bytes())
            .context("Failed to write to copy command"),
        None => Err(anyhow::anyhow!("Copy command has no stdin")),
    };

    let status = child.wait().context("Copy command did not finish")?;
    written?;
    if !status.success() {
        anyhow::bail!("Copy command `{}` exited with {}", command, status);
    }

    Ok(())
}

/// Shows `message` next to a spinner and clears it once `duration` has passed.
pub fn show_toast(message: &str, duration: Duration, unicode_support: bool) {
    let term = Term::stdout();
    term.hide_cursor().ok();

    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());

    if unicode_support {
        pb.set_style(style.tick_strings(&["✓", "✓"]));
    } else {
        pb.set_style(style.tick_strings(&["+", "+"]));
    }

    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    std::thread::sleep(duration);

    pb.finish_and_clear();
    term.show_cursor().ok();
}

pub fn copy_with_notice(text: &str, command: &str, options: &DisplayOptions) {
    match copy_to_clipboard(text, command) {
        Ok(()) => {
            log::debug!("copied {} characters to the clipboard", text.len());
            show_toast("Copied to clipboard", TOAST_DURATION, options.unicode_support);
        }
        Err(e) => {
            log::warn!("clipboard write failed: {:#}", e);
            let term = Term::stderr();
            term.write_line(&format!("WARNING: {:#}", e)).ok();
        }
    }
}

fn render_interactive(term: &Term, state: &WidgetState, options: &DisplayOptions) -> Result<()> {
    term.clear_screen()?;
    term.hide_cursor().ok();
    display_output(state, options);

    let arrows = if options.unicode_support { "←/→" } else { "h/l" };
    println!();
    println!(
        "[{}] length  [d] digits  [s] symbols  [r] regenerate  [c] copy  [q] quit",
        arrows
    );
    Ok(())
}

pub fn run_interactive(
    request: GenerationRequest,
    copy_command: &str,
    options: &DisplayOptions,
) -> Result<()> {
    let term = Term::stdout();
    let mut state = WidgetState::new(request)?;
    let options = DisplayOptions {
        quiet: false,
        ..*options
    };

    loop {
        render_interactive(&term, &state, &options)?;

        match term.read_key()? {
            Key::ArrowLeft | Key::Char('h') => state.adjust_length(-1)?,
            Key::ArrowRight | Key::Char('l') => state.adjust_length(1)?,
            Key::Char('d') => state.toggle_digits()?,
            Key::Char('s') => state.toggle_symbols()?,
            Key::Char('r') | Key::Enter => state.regenerate()?,
            Key::Char('c') => copy_with_notice(state.password(), copy_command, &options),
            Key::Char('q') | Key::Escape => break,
            _ => {}
        }
    }

    term.show_cursor().ok();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_status_symbols_unicode() {
        let (ok, warn) = get_status_symbols(true);
        assert_eq!(ok, "✓");
        assert_eq!(warn, "!");
    }

    #[test]
    fn test_get_status_symbols_ascii() {
        let (ok, warn) = get_status_symbols(false);
        assert_eq!(ok, "+");
        assert_eq!(warn, "!");
    }

    #[test]
    fn test_default_copy_command() {
        assert!(!default_copy_command().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_command_receives_text() {
        copy_to_clipboard("s3cret!", "grep -q 's3cret!'").unwrap();
        assert!(copy_to_clipboard("other", "grep -q 's3cret!'").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_command_closing_stdin_early() {
        let text = "x".repeat(1024 * 1024);
        let err = copy_to_clipboard(&text, "exit 0").unwrap_err();
        assert!(
            format!("{:#}", err).contains("Failed to write"),
            "Unexpected error: {:#}",
            err
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_command_failure() {
        assert!(copy_to_clipboard("x", "exit 127").is_err());
    }

    #[test]
    fn test_render_bar_ascii() {
        assert_eq!(render_bar(0.0, 10, false), "----------");
        assert_eq!(render_bar(0.5, 10, false), "#####-----");
        assert_eq!(render_bar(1.0, 10, false), "##########");
    }

    #[test]
    fn test_render_bar_clamps() {
        assert_eq!(render_bar(1.7, 4, false), "####");
        assert_eq!(render_bar(-0.3, 4, false), "----");
    }

    #[test]
    fn test_render_bar_unicode_width() {
        let bar = render_bar(0.34, BAR_WIDTH, true);
        assert_eq!(bar.chars().count(), BAR_WIDTH);
    }

    #[test]
    fn test_class_counts() {
        assert_eq!(class_counts("abcXYZ"), (0, 0));
        assert_eq!(class_counts("a1b2#c"), (2, 1));
        assert_eq!(class_counts("~`!9"), (1, 3));
        assert_eq!(class_counts("(x)"), (0, 0));
    }

    #[test]
    fn test_class_counts_follow_toggles() {
        let mut state = WidgetState::new(GenerationRequest::new(12, false, false)).unwrap();
        assert_eq!(class_counts(state.password()), (0, 0));

        state.toggle_digits().unwrap();
        state.toggle_symbols().unwrap();
        let (digits, symbols) = class_counts(state.password());
        assert!(digits >= 1 && symbols >= 1);
    }

    #[test]
    fn test_widget_initial_state() {
        let state = WidgetState::new(GenerationRequest::DEFAULT).unwrap();
        assert_eq!(state.password().len(), 12);
        assert!(state.password().chars().any(is_digit));
        assert_eq!(state.strength().label, StrengthLabel::Strong);
    }

    #[test]
    fn test_widget_length_clamped() {
        let mut state = WidgetState::new(GenerationRequest::new(7, false, false)).unwrap();

        state.adjust_length(-5).unwrap();
        assert_eq!(state.request().length, MIN_UI_LENGTH);
        assert_eq!(state.password().len(), MIN_UI_LENGTH);

        state.adjust_length(100).unwrap();
        assert_eq!(state.request().length, MAX_UI_LENGTH);
        assert_eq!(state.password().len(), MAX_UI_LENGTH);
    }

    #[test]
    fn test_widget_toggles_regenerate() {
        let mut state = WidgetState::new(GenerationRequest::new(20, false, false)).unwrap();
        assert!(!state.password().chars().any(is_symbol));

        state.toggle_symbols().unwrap();
        assert!(state.request().include_symbols);
        assert!(state.password().chars().any(is_symbol));

        state.toggle_digits().unwrap();
        assert!(state.password().chars().any(is_digit));
        assert_eq!(state.strength().label, StrengthLabel::VeryStrong);

        state.toggle_symbols().unwrap();
        assert!(!state.password().chars().any(is_symbol));
    }

    #[test]
    fn test_widget_strength_follows_settings() {
        let mut state = WidgetState::new(GenerationRequest::new(11, false, false)).unwrap();
        assert_eq!(state.strength().label, StrengthLabel::Weak);

        state.adjust_length(1).unwrap();
        assert_eq!(state.strength().label, StrengthLabel::Good);
        assert_eq!(state.strength(), classify(state.request()));
    }
}
