use broadsheet::contact::{ContactForm, FormFields, FormspreeEndpoint};
use broadsheet::export::{
    CancelToken, CaptureError, CaptureSurface, ExportError, ExportJob, ExportPipeline, ImageSurface,
};
use broadsheet::theme::{FileStorage, ThemeMode, ThemeStore};
use broadsheet::{config, content, generate, loading, output};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "broadsheet")]
#[command(about = "Newspaper-style portfolio generator with PDF résumé export")]
#[command(long_about = "\
Newspaper-style portfolio generator with PDF résumé export

The whole portfolio is one page laid out like a newspaper: a loading splash,
a front page, lettered sections, a printable résumé and a contact form.

Content structure:

  content/
  ├── content.toml     # Everything the paper says (optional, stock copy otherwise)
  ├── config.toml      # Colors, timings, form endpoint, export (optional)
  └── assets/          # Copied to the output as-is

Run 'broadsheet gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for persisted preferences (theme)
    #[arg(long, default_value = ".broadsheet", global = true)]
    state_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the paper into the output directory
    Build,
    /// Validate content and config without building
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Show or change the persisted theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
    /// Print the loading splash timeline
    Splash,
    /// Send a message through the configured contact form
    Contact(ContactArgs),
    /// Export the résumé section of a built page to PDF
    ExportResume {
        /// Use an existing screenshot instead of capturing the built page
        #[arg(long)]
        from_image: Option<PathBuf>,
    },
}

#[derive(Subcommand, Clone, Copy)]
enum ThemeAction {
    /// Print the current theme (default)
    Show,
    /// Flip between light and dark
    Toggle,
    /// Set the theme explicitly
    Set {
        #[arg(value_parser = parse_mode)]
        mode: ThemeMode,
    },
}

#[derive(clap::Args)]
struct ContactArgs {
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    subject: String,
    #[arg(long, default_value = "")]
    message: String,
}

fn parse_mode(s: &str) -> Result<ThemeMode, String> {
    s.parse().map_err(|e: broadsheet::theme::ParseModeError| e.to_string())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            let site_config = config::load_config(&cli.source)?;
            let paper = content::load_content(&cli.source)?;
            let theme = ThemeStore::initialize(FileStorage::in_dir(&cli.state_dir)).context();

            println!("==> Building {} → {}", cli.source.display(), cli.output.display());
            let report = generate::generate(&site_config, &paper, theme, &cli.source, &cli.output)?;
            output::print_build_output(&report);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            config::load_config(&cli.source)?;
            let paper = content::load_content(&cli.source)?;
            output::print_check_output(&paper, &cli.source);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Theme { action } => {
            let mut store = ThemeStore::initialize(FileStorage::in_dir(&cli.state_dir));
            let mode = match action.unwrap_or(ThemeAction::Show) {
                ThemeAction::Show => store.mode(),
                ThemeAction::Toggle => store.toggle(),
                ThemeAction::Set { mode } => store.set(mode),
            };
            output::print_theme_output(mode, store.storage().path());
        }
        Command::Splash => {
            let site_config = config::load_config(&cli.source)?;
            let paper = content::load_content(&cli.source)?;
            if !site_config.splash.enabled {
                println!("Splash disabled in {}", config::CONFIG_FILE);
                return Ok(());
            }
            let timeline =
                loading::plan_timeline(paper.splash.stages.len(), site_config.splash.timing());
            output::print_splash_output(&timeline, &paper.splash.stages);
        }
        Command::Contact(args) => {
            let site_config = config::load_config(&cli.source)?;
            let endpoint = FormspreeEndpoint::with_base_url(
                &site_config.contact.endpoint,
                &site_config.contact.form_id,
                site_config.contact.timeout(),
            )?;
            let mut form = ContactForm::with_fields(FormFields {
                name: args.name,
                email: args.email,
                subject: args.subject,
                message: args.message,
            });
            match form.submit(&endpoint).map(|_| ()) {
                Ok(()) => output::print_contact_output(&form),
                Err(refused) => {
                    output::print_contact_refused(&refused);
                    std::process::exit(2);
                }
            }
            if form.banner().is_some() {
                std::process::exit(1);
            }
        }
        Command::ExportResume { from_image } => {
            let site_config = config::load_config(&cli.source)?;
            let pipeline = ExportPipeline::new(site_config.export.settings());
            let mut job = ExportJob::default();
            let result = open_surface(from_image, &cli.output, pipeline.settings().width_px)
                .map_err(ExportError::from)
                .and_then(|mut surface| {
                    pipeline.run(surface.as_mut(), &cli.output, &mut job, &CancelToken::new())
                });
            match result {
                Ok(report) => output::print_export_output(&report),
                Err(e) => {
                    output::print_export_error(&e);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

/// Pick the capture surface: a given screenshot, or the built page in Chrome.
fn open_surface(
    from_image: Option<PathBuf>,
    output_dir: &Path,
    width_px: u32,
) -> Result<Box<dyn CaptureSurface>, CaptureError> {
    if let Some(path) = from_image {
        return Ok(Box::new(ImageSurface::new(path)));
    }
    open_page(&output_dir.join(generate::INDEX_FILE), width_px)
}

#[cfg(feature = "chrome")]
fn open_page(index: &Path, width_px: u32) -> Result<Box<dyn CaptureSurface>, CaptureError> {
    Ok(Box::new(broadsheet::export::ChromeSurface::open(index, width_px)?))
}

#[cfg(not(feature = "chrome"))]
fn open_page(index: &Path, _width_px: u32) -> Result<Box<dyn CaptureSurface>, CaptureError> {
    Err(CaptureError::Browser(format!(
        "cannot capture {} without the `chrome` feature; pass --from-image",
        index.display()
    )))
}
