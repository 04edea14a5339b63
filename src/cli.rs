//! Command-line interface for glyphword.
//!
//! This module handles CLI argument parsing and the `render`, `glyphs` and
//! `print-config` subcommands.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use glyphword_config::Config;
use glyphword_fonts::{FontCache, GlyphRecord};

use crate::typeset::Typesetter;

/// glyphword - Typeset a word into a self-contained SVG
#[derive(Parser)]
#[command(name = "glyphword")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file to use (default: ~/.config/glyphword/config.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set log level (overrides config and RUST_LOG)
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevelArg>,
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevelArg::Off => log::LevelFilter::Off,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Warn => log::LevelFilter::Warn,
            LogLevelArg::Info => log::LevelFilter::Info,
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a word as an SVG document
    Render {
        #[command(flatten)]
        shaping: ShapingArgs,

        /// Write the SVG to this file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// SVG fill for the glyph paths (overrides config)
        #[arg(long, value_name = "PAINT")]
        fill: Option<String>,

        /// Draw every glyph on the baseline, ignoring placements
        #[arg(long)]
        no_glyph_offsets: bool,
    },

    /// Print the shaped glyph records of a word, one per line
    Glyphs {
        #[command(flatten)]
        shaping: ShapingArgs,
    },

    /// Print the effective configuration as YAML
    PrintConfig,
}

/// Options shared by the shaping subcommands
#[derive(Args, Debug, Clone)]
pub struct ShapingArgs {
    /// The word to typeset
    pub word: String,

    /// Font file (overrides config font_path/font_family)
    #[arg(long, value_name = "PATH")]
    pub font: Option<PathBuf>,

    /// Installed font family (overrides config font_family)
    #[arg(long, value_name = "NAME", conflicts_with = "font")]
    pub family: Option<String>,

    /// OpenType script tag, e.g. latn, arab, dev2
    #[arg(long, value_name = "TAG")]
    pub script: Option<String>,

    /// OpenType language system tag, e.g. ENG, TRK
    #[arg(long = "lang", value_name = "TAG")]
    pub language: Option<String>,

    /// Shape as a right-to-left run
    #[arg(long)]
    pub rtl: bool,

    /// Enable (TAG or +TAG) or disable (-TAG) an OpenType feature; repeatable
    #[arg(
        short = 'F',
        long = "feature",
        value_name = "TAG",
        allow_hyphen_values = true
    )]
    pub features: Vec<String>,
}

impl ShapingArgs {
    /// Fold the font and segment overrides into `config`.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(font) = &self.font {
            config.font_path = Some(font.clone());
            config.font_family = None;
        }
        if let Some(family) = &self.family {
            config.font_path = None;
            config.font_family = Some(family.clone());
        }
        if let Some(script) = &self.script {
            config.script = Some(script.clone());
        }
        if let Some(language) = &self.language {
            config.language = Some(language.clone());
        }
        if self.rtl {
            config.right_to_left = true;
        }
    }

    /// Typesetter for `config` with these overrides applied.
    pub fn typesetter(&self, config: &Config, cache: &FontCache) -> Result<Typesetter> {
        let mut config = config.clone();
        self.apply_to(&mut config);
        let mut typesetter =
            Typesetter::from_config(&config, cache).context("Failed to set up typesetter")?;
        typesetter.features_mut().apply(&self.features);
        Ok(typesetter)
    }
}

/// Load the config from `path`, or the default location when `None`
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            Config::load_from(path).with_context(|| format!("Failed to load config {:?}", path))
        }
        None => Config::load().context("Failed to load config"),
    }
}

/// Run a parsed subcommand, writing results to `out`
pub fn run_command(command: Commands, config: &Config, out: &mut dyn Write) -> Result<()> {
    let cache = FontCache::new();

    match command {
        Commands::Render {
            shaping,
            output,
            fill,
            no_glyph_offsets,
        } => {
            let mut config = config.clone();
            if let Some(fill) = fill {
                config.fill = fill;
            }
            if no_glyph_offsets {
                config.apply_glyph_offsets = false;
            }

            let typesetter = shaping.typesetter(&config, &cache)?;
            let svg = typesetter
                .typeset(&shaping.word)
                .with_context(|| format!("Failed to typeset {:?}", shaping.word))?;

            match output {
                Some(path) => {
                    std::fs::write(&path, &svg)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    log::info!("Wrote {} bytes to {:?}", svg.len(), path);
                }
                None => writeln!(out, "{svg}")?,
            }
        }
        Commands::Glyphs { shaping } => {
            let typesetter = shaping.typesetter(config, &cache)?;
            let records = typesetter
                .shape(&shaping.word)
                .with_context(|| format!("Failed to shape {:?}", shaping.word))?;
            for record in &records {
                writeln!(out, "{}", format_record(record))?;
            }
        }
        Commands::PrintConfig => {
            write!(out, "{}", config.to_yaml()?)?;
        }
    }

    Ok(())
}

/// One glyph record as a tab-separated line:
/// `name(id) cluster x_placement y_placement x_advance y_advance`
pub fn format_record(record: &GlyphRecord<'_>) -> String {
    let id = record.outline.glyph_id();
    let name = match record.outline.name() {
        Some(name) => format!("{name}({id})"),
        None => format!("gid{id}"),
    };
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}",
        name,
        record.cluster,
        record.x_placement,
        record.y_placement,
        record.x_advance,
        record.y_advance
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_render_with_features() {
        let cli = Cli::try_parse_from([
            "glyphword",
            "render",
            "office",
            "--font",
            "/tmp/a.ttf",
            "--feature",
            "-liga",
            "-F",
            "smcp",
            "--rtl",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert!(matches!(cli.log_level, Some(LogLevelArg::Debug)));
        let Commands::Render { shaping, .. } = cli.command else {
            panic!("expected render");
        };
        assert_eq!(shaping.word, "office");
        assert_eq!(shaping.font, Some(PathBuf::from("/tmp/a.ttf")));
        assert_eq!(shaping.features, vec!["-liga", "smcp"]);
        assert!(shaping.rtl);
    }

    #[test]
    fn test_font_and_family_conflict() {
        assert!(
            Cli::try_parse_from(["glyphword", "glyphs", "a", "--font", "x", "--family", "y"])
                .is_err()
        );
    }

    #[test]
    fn test_apply_to_overrides_config() {
        let shaping = ShapingArgs {
            word: "a".to_string(),
            font: None,
            family: Some("DejaVu Sans".to_string()),
            script: Some("latn".to_string()),
            language: None,
            rtl: false,
            features: Vec::new(),
        };
        let mut config = Config::new()
            .with_font_path("/fonts/x.ttf")
            .with_language("TRK");
        shaping.apply_to(&mut config);
        assert_eq!(config.font_path, None);
        assert_eq!(config.font_family.as_deref(), Some("DejaVu Sans"));
        assert_eq!(config.script.as_deref(), Some("latn"));
        assert_eq!(config.language.as_deref(), Some("TRK"));
    }
}
