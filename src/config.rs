//! Launch configuration for the terminal runner.
//!
//! Settings come from three layers, later ones winning: the settings file
//! (`--settings`), the `MAKATON_SWITCHES` environment variable, then explicit
//! flags. Without `--words` a small built-in word list is used.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::core::{ImageCatalog, ImageResolver};
use crate::types::{GameKind, Settings, Word};

pub const SWITCHES_ENV: &str = "MAKATON_SWITCHES";

pub const USAGE: &str = "\
usage: makaton-match [options]

  --settings <path>   settings JSON (missing fields take defaults)
  --words <path>      word list JSON: [{\"image\": .., \"text\": .., \"sound\": ..}]
  --game <kind>       picture-to-picture | word-to-word | picture-to-word |
                      word-to-picture | sound-to-picture | sound-to-word
  --switches <n>      0 (off), 1, 2 or 3 switches
  --seed <n>          shuffle seed
  -h, --help          show this message

env: MAKATON_SWITCHES=<n>, RUST_LOG=<filter>, MAKATON_LOG=<file>";

/// Parsed command line, before any file is read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub settings: Option<PathBuf>,
    pub words: Option<PathBuf>,
    pub game: Option<GameKind>,
    pub switches: Option<u8>,
    pub seed: Option<u32>,
    pub help: bool,
}

/// Everything the runner needs to start a game.
#[derive(Debug, Clone)]
pub struct LaunchConfig {
    pub settings: Settings,
    pub words: Vec<Word>,
    pub kind: GameKind,
    pub seed: u32,
}

pub fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut cli = CliArgs::default();
    let mut i = 0usize;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "-h" | "--help" => cli.help = true,
            "--settings" | "--words" | "--game" | "--switches" | "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for {}", flag))?;
                match flag {
                    "--settings" => cli.settings = Some(PathBuf::from(v)),
                    "--words" => cli.words = Some(PathBuf::from(v)),
                    "--game" => {
                        cli.game = Some(
                            GameKind::from_str(v)
                                .ok_or_else(|| anyhow!("unknown game kind: {}", v))?,
                        )
                    }
                    "--switches" => cli.switches = Some(parse_switches(v)?),
                    _ => {
                        cli.seed = Some(
                            v.parse::<u32>()
                                .map_err(|_| anyhow!("invalid --seed value: {}", v))?,
                        )
                    }
                }
            }
            other => return Err(anyhow!("unknown argument: {}", other)),
        }
        i += 1;
    }
    Ok(cli)
}

fn parse_switches(v: &str) -> Result<u8> {
    match v.trim().parse::<u8>() {
        Ok(n) if n <= 3 => Ok(n),
        _ => Err(anyhow!("invalid switch count: {} (expected 0-3)", v)),
    }
}

impl LaunchConfig {
    /// Resolve the command line against the files it names and the process
    /// environment.
    pub fn load(cli: &CliArgs) -> Result<Self> {
        let env_switches = env::var(SWITCHES_ENV).ok();
        Self::resolve(cli, env_switches.as_deref())
    }

    pub fn resolve(cli: &CliArgs, env_switches: Option<&str>) -> Result<Self> {
        let mut settings = match &cli.settings {
            Some(path) => read_settings(path)?,
            None => Settings::default(),
        };

        if let Some(raw) = env_switches.map(str::trim).filter(|s| !s.is_empty()) {
            settings.switch_count = parse_switches(raw)
                .with_context(|| format!("{} is not usable", SWITCHES_ENV))?;
        }
        if let Some(n) = cli.switches {
            settings.switch_count = n;
        }

        let words = match &cli.words {
            Some(path) => read_words(path)?,
            None => demo_words(),
        };

        Ok(Self {
            settings,
            words,
            kind: cli.game.unwrap_or(GameKind::PictureToPicture),
            seed: cli.seed.unwrap_or(1),
        })
    }
}

pub fn read_settings(path: &Path) -> Result<Settings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading settings {}", path.display()))?;
    parse_settings(&raw).with_context(|| format!("parsing settings {}", path.display()))
}

pub fn parse_settings(raw: &str) -> Result<Settings> {
    Ok(serde_json::from_str(raw)?)
}

pub fn read_words(path: &Path) -> Result<Vec<Word>> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("reading words {}", path.display()))?;
    parse_words(&raw).with_context(|| format!("parsing words {}", path.display()))
}

pub fn parse_words(raw: &str) -> Result<Vec<Word>> {
    Ok(serde_json::from_str(raw)?)
}

const DEMO: [(&str, &str, char); 12] = [
    ("ball", "ball", '●'),
    ("dog", "dog", '♞'),
    ("cat", "cat", '♣'),
    ("fish", "fish", '≈'),
    ("house", "house", '⌂'),
    ("sun", "sun", '☼'),
    ("tree", "tree", '♠'),
    ("star", "star", '★'),
    ("heart", "heart", '♥'),
    ("music", "music", '♫'),
    ("flower", "flower", '✿'),
    ("moon", "moon", '☾'),
];

/// Built-in word list used when no `--words` file is given.
pub fn demo_words() -> Vec<Word> {
    DEMO.iter()
        .map(|(key, text, _)| Word::new(format!("{}.png", key), *text))
        .collect()
}

/// Glyphs for the built-in words.
pub fn demo_images() -> ImageCatalog {
    let mut catalog = ImageCatalog::default();
    for (key, text, glyph) in DEMO {
        catalog.insert(format!("{}.png", key), text, glyph);
    }
    catalog
}

/// Glyphs for `words`: the built-in ones where known, a plain card labelled
/// with the word otherwise.
pub fn catalog_for(words: &[Word]) -> ImageCatalog {
    let mut catalog = demo_images();
    for word in words {
        if catalog.resolve(&word.image) == catalog.fallback() && !word.image.is_empty() {
            catalog.insert(word.image.clone(), word.text.clone(), '▣');
        }
    }
    catalog
}
