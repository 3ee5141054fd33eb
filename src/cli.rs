//! CLI implementation.

use crate::canvas::RenderContext;
use crate::catalog::{self, Catalog, CatalogStatus};
use crate::editor::{Editor, Event};
use crate::error::{Error, Result};
use crate::export::ExportOutcome;
use crate::image::{Color, ImgBackend};
use crate::logs::Logger;
use crate::session::{BaseImage, Position};
use crate::text::{FontMap, DEFAULT_FONT};

use clap::Parser;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// One text layer as given on the command line:
/// `TEXT[@X,Y][@SIZE][@#RRGGBB]`. Omitted parts keep the layer
/// defaults.
#[derive(Debug, Clone)]
pub struct LayerSpec {
    pub text: String,
    pub position: Option<Position>,
    pub size: Option<f64>,
    pub color: Option<Color>,
}

impl FromStr for LayerSpec {
    type Err = &'static str;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let re = Regex::new(
            r"(?x)^
            (?P<text>.*?)
            (?:@(?P<x>-?\d+(?:\.\d+)?),(?P<y>-?\d+(?:\.\d+)?))?
            (?:@(?P<size>\d+(?:\.\d+)?))?
            (?:@(?P<color>\#[0-9a-fA-F]{6}))?
            $",
        )
        .unwrap();

        let captures = re
            .captures(s)
            .ok_or("layer spec not in form TEXT[@X,Y][@SIZE][@#RRGGBB]")?;
        let text = captures["text"].to_string();
        let position = match (captures.name("x"), captures.name("y")) {
            (Some(x), Some(y)) => Some(Position::new(
                x.as_str().parse().unwrap(),
                y.as_str().parse().unwrap(),
            )),
            _ => None,
        };
        let size = captures
            .name("size")
            .map(|m| m.as_str().parse().unwrap());
        let color = captures
            .name("color")
            .map(|m| m.as_str().parse())
            .transpose()?;
        Ok(Self {
            text,
            position,
            size,
            color,
        })
    }
}

/// Compose text layers over a base image and export the result as PNG
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Base image path or URL; overrides the catalog
    #[arg(short, long)]
    pub input: Option<String>,

    /// Catalog entry id to use as the base image
    #[arg(long)]
    pub id: Option<String>,

    /// Catalog endpoint
    #[arg(long, default_value = catalog::CATALOG_URL)]
    pub catalog_url: String,

    /// List the catalog entries and exit
    #[arg(short, long)]
    pub list: bool,

    /// Text layer, repeatable: TEXT[@X,Y][@SIZE][@#RRGGBB]
    #[arg(short = 't', long = "layer")]
    pub layers: Vec<LayerSpec>,

    /// Output PNG path
    #[arg(short, long, default_value = crate::export::DEFAULT_FILENAME)]
    pub output: PathBuf,

    /// Font family used for the text layers
    #[arg(long, default_value = DEFAULT_FONT)]
    pub font: String,

    /// Suppress informational output
    #[arg(short, long)]
    pub quiet: bool,
}

macro_rules! error {
    ($res:expr) => {
        $res.unwrap_or_else(|e| panic!("{e}"))
    };
}

impl Cli {
    pub fn run() {
        std::panic::set_hook(Box::new(|panic_info| {
            if let Some(s) = panic_info.payload().downcast_ref::<String>() {
                eprintln!("{s}");
            } else {
                eprintln!("{panic_info}");
            }
        }));

        let cli = Self::parse();
        let mut logger = Logger::new_stderr(cli.quiet);

        if cli.list {
            cli.list_catalog(&mut logger);
            return;
        }

        let base = error!(cli.select_base(&mut logger));
        let mut backend = error!(ImgBackend::new());
        let mut fonts = error!(FontMap::new());

        let bytes = error!(catalog::fetch_bytes(&base.url));
        error!(backend.cache_bytes(&base.url, &bytes));
        logger.info(format!("base image `{}` loaded", base.name));

        let mut editor = Editor::new(base);
        editor.set_output(cli.output.clone());
        for spec in &cli.layers {
            editor.apply(Event::AddLayer);
            editor.apply(Event::EditText(spec.text.clone()));
            if let Some(size) = spec.size {
                editor.apply(Event::EditFontSize(size));
            }
            if let Some(color) = spec.color {
                editor.apply(Event::EditColor(color.to_string()));
            }
            if let Some(pos) = spec.position {
                let id = editor.session().active_id().expect("layer just added");
                editor.apply(Event::MoveLayer(id, pos));
            }
        }

        let mut ctx = RenderContext {
            backend: &mut backend,
            fonts: &mut fonts,
            font: &cli.font,
        };
        if let Err(e) = editor.sync(&mut ctx) {
            logger.warn(format!("render failed: {e}"));
        }
        drop(ctx);

        match error!(editor.export(&backend)) {
            ExportOutcome::Saved(path) => {
                logger.info(format!("exported to `{}`", path.display()))
            }
            ExportOutcome::NotMounted => {
                logger.warn("nothing was rendered, so nothing was exported")
            }
            ExportOutcome::Busy => logger.warn("an export is already in flight"),
        }
    }

    fn list_catalog(&self, logger: &mut Logger<std::io::Stderr>) {
        let mut catalog = Catalog::empty();
        catalog.refresh(&self.catalog_url);
        if let CatalogStatus::Failed(e) = catalog.status() {
            logger.warn(format!("catalog unavailable: {e}"));
        }
        for entry in catalog.entries() {
            println!("{}\t{}\t{}", entry.id, entry.name, entry.url);
        }
    }

    fn select_base(&self, logger: &mut Logger<std::io::Stderr>) -> Result<BaseImage> {
        if let Some(input) = &self.input {
            return Ok(BaseImage {
                id: input.clone(),
                name: Path::new(input)
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| input.clone()),
                url: input.clone(),
            });
        }
        let Some(id) = &self.id else {
            return Err(Error::ProviderError(
                "choose a base image with --input or --id".into(),
            ));
        };
        let mut catalog = Catalog::empty();
        catalog.refresh(&self.catalog_url);
        if let CatalogStatus::Failed(e) = catalog.status() {
            logger.warn(format!("catalog unavailable: {e}"));
        }
        catalog
            .find(id)
            .cloned()
            .ok_or_else(|| Error::ProviderError(format!("no catalog entry with id `{id}`")))
    }
}
