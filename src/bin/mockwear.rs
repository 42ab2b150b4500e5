use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use mockwear::{
    BuiltinTemplateSource, CanvasPreset, CanvasSession, Catalog, Category, DesignUpload,
    Designer, DesignerPage, ErrorBoundary, FallbackTemplateSource, FsTemplateSource,
    GarmentType, GarmentView, HexColor, HomePage, Route, Script, SessionConfig,
    TemplateSource, TemplatesPage,
};

const ASSETS_ENV: &str = "MOCKWEAR_ASSETS_DIR";

#[derive(Parser, Debug)]
#[command(name = "mockwear", version, about = "Clothing mockup designer")]
struct Cli {
    /// Template image root (defaults to $MOCKWEAR_ASSETS_DIR). Missing files fall back to
    /// built-in silhouettes.
    #[arg(long, global = true)]
    assets: Option<PathBuf>,

    /// Session config JSON.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Catalog JSON (templates, palettes, gallery). Defaults to the stock catalog.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Canvas preset: studio (800x600) or compact (400x500).
    #[arg(long, global = true)]
    preset: Option<CanvasPreset>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List gallery templates.
    Templates(TemplatesArgs),
    /// List the color palette of a garment.
    Colors(ColorsArgs),
    /// Render a single mockup to PNG.
    Render(RenderArgs),
    /// Run a JSON command script against a fresh session.
    Script(ScriptArgs),
    /// Print a page: home, templates, or any route such as "/designer?type=polo".
    Page(PageArgs),
}

#[derive(Parser, Debug)]
struct TemplatesArgs {
    /// Category filter, e.g. "Hoodies".
    #[arg(long, default_value = "All")]
    category: Category,
}

#[derive(Parser, Debug)]
struct ColorsArgs {
    /// Garment: tshirt, hoodie or polo.
    #[arg(long)]
    garment: GarmentType,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Garment: tshirt, hoodie or polo.
    #[arg(long)]
    garment: GarmentType,

    /// View: front, back or side.
    #[arg(long, default_value = "front")]
    view: GarmentView,

    /// Tint color as hex, e.g. "#000080".
    #[arg(long)]
    color: Option<HexColor>,

    /// Design image (PNG, JPEG or SVG).
    #[arg(long)]
    design: Option<PathBuf>,

    /// Rotate the design by degrees.
    #[arg(long, allow_hyphen_values = true)]
    rotate: Option<f64>,

    /// Scale the design by a factor.
    #[arg(long)]
    scale: Option<f64>,

    /// Move the design by "DX,DY" canvas pixels.
    #[arg(long = "move", value_parser = parse_offset, allow_hyphen_values = true)]
    offset: Option<(f64, f64)>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ScriptArgs {
    /// Input command script JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Write the last exported mockup here.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PageArgs {
    /// "home", "templates" or a route.
    route: String,

    /// Category filter for the templates page.
    #[arg(long, default_value = "All")]
    category: Category,
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    let cli = Cli::parse();
    let ctx = Context::from_cli(&cli)?;
    match cli.cmd {
        Command::Templates(args) => cmd_templates(&ctx, args),
        Command::Colors(args) => cmd_colors(&ctx, args),
        Command::Render(args) => cmd_render(&ctx, args),
        Command::Script(args) => cmd_script(&ctx, args),
        Command::Page(args) => cmd_page(&ctx, args),
    }
}

fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let env_filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| anyhow::anyhow!("install tracing subscriber: {e}"))
}

fn parse_offset(s: &str) -> Result<(f64, f64), String> {
    let (dx, dy) = s
        .split_once(',')
        .ok_or_else(|| format!("expected DX,DY, got \"{s}\""))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("bad offset component \"{v}\": {e}"))
    };
    Ok((parse(dx)?, parse(dy)?))
}

struct Context {
    config: SessionConfig,
    catalog: Arc<Catalog>,
    source: Arc<dyn TemplateSource>,
}

impl Context {
    fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = match &cli.config {
            Some(path) => SessionConfig::from_path(path)
                .with_context(|| format!("load session config '{}'", path.display()))?,
            None => SessionConfig::default(),
        };
        if let Some(preset) = cli.preset {
            config.canvas = preset.canvas();
        }

        let catalog = match &cli.catalog {
            Some(path) => Catalog::from_path(path)
                .with_context(|| format!("load catalog '{}'", path.display()))?,
            None => Catalog::builtin(),
        };

        let assets = cli
            .assets
            .clone()
            .or_else(|| std::env::var_os(ASSETS_ENV).map(PathBuf::from));
        let source: Arc<dyn TemplateSource> = match assets {
            Some(root) => {
                tracing::info!(root = %root.display(), "using template assets");
                Arc::new(FallbackTemplateSource::new(
                    FsTemplateSource::new(root),
                    BuiltinTemplateSource,
                ))
            }
            None => Arc::new(BuiltinTemplateSource),
        };

        Ok(Self {
            config,
            catalog: Arc::new(catalog),
            source,
        })
    }

    fn session(&self) -> anyhow::Result<CanvasSession> {
        Ok(CanvasSession::new(
            self.config.clone(),
            Arc::clone(&self.catalog),
            Arc::clone(&self.source),
        )?)
    }
}

fn cmd_templates(ctx: &Context, args: TemplatesArgs) -> anyhow::Result<()> {
    for listing in ctx.catalog.listings(args.category) {
        println!(
            "{}\t{}\t{}\t{}",
            listing.id,
            listing.title,
            listing.category,
            listing.href()
        );
    }
    Ok(())
}

fn cmd_colors(ctx: &Context, args: ColorsArgs) -> anyhow::Result<()> {
    for option in ctx.catalog.palette(args.garment) {
        println!("{}\t{}", option.name, option.value);
    }
    Ok(())
}

fn cmd_render(ctx: &Context, args: RenderArgs) -> anyhow::Result<()> {
    let mut session = ctx.session()?;
    session.load_template(args.garment, args.view)?;
    if let Some(color) = args.color {
        session.set_tint_color(color)?;
    }
    if let Some(path) = &args.design {
        let upload = DesignUpload::from_path(path)?;
        session.add_user_image(&upload.bytes, Some(upload.name.as_str()))?;
    }
    if let Some(deg) = args.rotate {
        session.rotate_selection(deg)?;
    }
    if let Some(factor) = args.scale {
        session.scale_selection(factor)?;
    }
    if let Some((dx, dy)) = args.offset {
        session.move_selection(dx, dy)?;
    }

    let mockup = session
        .export_png()?
        .context("export produced no image (no template loaded)")?;
    mockup
        .write_to(&args.out)
        .with_context(|| format!("write mockup '{}'", args.out.display()))?;
    session.dispose();

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_script(ctx: &Context, args: ScriptArgs) -> anyhow::Result<()> {
    let script = Script::from_path(&args.in_path)?;
    let base_dir = args.in_path.parent().unwrap_or_else(|| Path::new("."));
    let mut session = ctx.session()?;
    let last = mockwear::run_script(&mut session, &script, base_dir)
        .with_context(|| format!("run script '{}'", args.in_path.display()))?;
    session.dispose();

    match (last, args.out) {
        (Some(mockup), Some(out)) => {
            mockup
                .write_to(&out)
                .with_context(|| format!("write mockup '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        (None, Some(_)) => anyhow::bail!("script did not export a mockup"),
        _ => {}
    }
    Ok(())
}

fn cmd_page(ctx: &Context, args: PageArgs) -> anyhow::Result<()> {
    let route = match args.route.as_str() {
        "home" => Route::Home,
        "templates" => Route::Templates,
        other => Route::parse(other)?,
    };
    let rendered = match route {
        Route::Home => ErrorBoundary::new(HomePage).render(),
        Route::Templates => {
            ErrorBoundary::new(TemplatesPage::new(&ctx.catalog, args.category)).render()
        }
        Route::Designer(query) => {
            let mut designer = Designer::new(
                ctx.config.clone(),
                Arc::clone(&ctx.catalog),
                Arc::clone(&ctx.source),
            );
            designer.mount(&query)?;
            let out = ErrorBoundary::new(DesignerPage::new(&designer)).render();
            designer.unmount();
            out
        }
    };
    print!("{}", rendered.into_text());
    Ok(())
}
