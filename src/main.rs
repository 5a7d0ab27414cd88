mod ui;

use anyhow::Result;
use clap::Parser;
use passgen::{GenerationRequest, MAX_UI_LENGTH, MIN_UI_LENGTH};

#[derive(Parser)]
#[command(
    name = "passgen",
    version,
    author,
    about = "Random password generator with a strength meter"
)]
struct Cli {
    /// Password length
    #[arg(
        short,
        long,
        default_value_t = GenerationRequest::DEFAULT.length as u16,
        value_parser = clap::value_parser!(u16).range(MIN_UI_LENGTH as i64..=MAX_UI_LENGTH as i64)
    )]
    length: u16,

    /// Leave digits out of the password
    #[arg(long)]
    no_digits: bool,

    /// Mix symbols into the password
    #[arg(short, long)]
    symbols: bool,

    /// Copy the password to the clipboard
    #[arg(short, long)]
    copy: bool,

    /// Shell command that receives the password on stdin when copying
    #[arg(long, default_value = ui::default_copy_command())]
    copy_cmd: String,

    /// Adjust settings and regenerate from the keyboard
    #[arg(short, long, conflicts_with_all = ["quiet", "copy"])]
    interactive: bool,

    /// Print only the password
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn request(&self) -> GenerationRequest {
        GenerationRequest::new(self.length as usize, !self.no_digits, self.symbols)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let request = cli.request();
    log::debug!("starting with {:?}", request);

    let options = ui::DisplayOptions {
        unicode_support: ui::detect_unicode_support(),
        color_support: ui::detect_color_support(),
        quiet: cli.quiet,
    };

    if cli.interactive {
        return ui::run_interactive(request, &cli.copy_cmd, &options);
    }

    let state = ui::WidgetState::new(request)?;
    ui::display_output(&state, &options);

    if cli.copy {
        ui::copy_with_notice(state.password(), &cli.copy_cmd, &options);
    }

    Ok(())
}
