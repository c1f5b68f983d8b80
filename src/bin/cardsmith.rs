use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cardsmith::{
    CanvasSize, CardRenderer, CardRequest, RenderConfig, ThemeRegistry, encode_pdf, encode_png,
    palettes, render_theme_previews,
};

#[derive(Parser, Debug)]
#[command(name = "cardsmith", version)]
struct Cli {
    /// Render settings JSON (font directories, theme catalog).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a card to PNG and optionally PDF.
    Render(RenderArgs),
    /// List theme keys.
    Themes,
    /// List the accent palette.
    Palettes,
    /// Write one background thumbnail per theme.
    Thumbnails(ThumbnailArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Card request JSON; flags below override its fields.
    #[arg(long)]
    request: Option<PathBuf>,

    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    company: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    address: Option<String>,
    /// URL encoded into the QR code.
    #[arg(long)]
    url: Option<String>,
    #[arg(long)]
    theme: Option<String>,
    /// Accent color, `#RGB` or `#RRGGBB`.
    #[arg(long)]
    accent: Option<String>,
    /// Canvas size, `<width>x<height>`.
    #[arg(long)]
    size: Option<String>,
    /// PDF resolution.
    #[arg(long)]
    dpi: Option<String>,
    /// Logo image file.
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    png: PathBuf,
    /// Output PDF path.
    #[arg(long)]
    pdf: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ThumbnailArgs {
    /// Output directory; one `<theme>.png` per theme.
    #[arg(long)]
    out_dir: PathBuf,

    /// Thumbnail size, `<width>x<height>`.
    #[arg(long, default_value = "400x250")]
    size: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => RenderConfig::from_path(path)?,
        None => RenderConfig::default(),
    };
    let themes = config.load_themes()?;
    let themes = themes.as_ref().unwrap_or(ThemeRegistry::builtin());

    match cli.cmd {
        Command::Render(args) => cmd_render(args, &config, themes),
        Command::Themes => cmd_themes(themes),
        Command::Palettes => cmd_palettes(),
        Command::Thumbnails(args) => cmd_thumbnails(args, themes),
    }
}

fn cmd_render(args: RenderArgs, config: &RenderConfig, themes: &ThemeRegistry) -> anyhow::Result<()> {
    let mut req = match &args.request {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("read request '{}'", path.display()))?;
            serde_json::from_str::<CardRequest>(&json)
                .with_context(|| format!("parse request '{}'", path.display()))?
        }
        None => CardRequest::default(),
    };

    let overrides = [
        (&mut req.name, args.name),
        (&mut req.title, args.title),
        (&mut req.company, args.company),
        (&mut req.email, args.email),
        (&mut req.phone, args.phone),
        (&mut req.address, args.address),
        (&mut req.url, args.url),
        (&mut req.theme, args.theme),
        (&mut req.accent, args.accent),
        (&mut req.size, args.size),
        (&mut req.dpi, args.dpi),
    ];
    for (field, value) in overrides {
        if let Some(value) = value {
            *field = value;
        }
    }
    if let Some(path) = &args.logo {
        let bytes =
            std::fs::read(path).with_context(|| format!("read logo '{}'", path.display()))?;
        req.logo = Some(bytes);
    }

    let spec = req.into_spec();
    let fonts = config.font_library();
    let raster = CardRenderer::new(themes, &fonts).render(&spec)?;

    write_output(&args.png, &encode_png(&raster)?)?;
    if let Some(pdf) = &args.pdf {
        write_output(pdf, &encode_pdf(&raster, spec.dpi)?)?;
    }
    Ok(())
}

fn cmd_themes(themes: &ThemeRegistry) -> anyhow::Result<()> {
    for theme in themes.iter() {
        let tone = if theme.is_dark() { "dark" } else { "light" };
        println!("{:<16} {:<16} {tone}", theme.key, theme.title);
    }
    Ok(())
}

fn cmd_palettes() -> anyhow::Result<()> {
    for entry in palettes() {
        println!("{:<10} {}", entry.name, entry.color);
    }
    Ok(())
}

fn cmd_thumbnails(args: ThumbnailArgs, themes: &ThemeRegistry) -> anyhow::Result<()> {
    let size = CanvasSize::parse_or_default(&args.size);
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    for preview in render_theme_previews(themes, size)? {
        let path = args.out_dir.join(format!("{}.png", preview.key));
        write_output(&path, &encode_png(&preview.raster)?)?;
    }
    Ok(())
}

fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}
