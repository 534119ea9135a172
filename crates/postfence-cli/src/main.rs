use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use postfence_config::{Config, OutputFormat};
use postfence_engine::{
    RenderBlock, RenderOptions, excerpt, extract_code_blocks, normalize_fences, render_content,
    resolve_alias, segment,
};

mod output;

#[derive(Parser)]
#[command(name = "postfence")]
#[command(about = "Render post bodies with fenced code into display blocks")]
struct Cli {
    /// Post body file (reads stdin when omitted)
    input: Option<PathBuf>,

    /// Output format (defaults to the config file, then text)
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// Hide line numbers on code blocks
    #[arg(long)]
    no_line_numbers: bool,

    /// Language for untagged code no heuristic recognizes
    #[arg(long, value_name = "LANG")]
    fallback: Option<String>,

    /// Normalize a dangling closing fence before parsing
    #[arg(long)]
    filter: bool,

    /// Code lines to emphasize, e.g. 2,5
    #[arg(long, value_delimiter = ',', value_name = "N,N..")]
    highlight: Vec<usize>,

    /// Print a plain excerpt instead of rendering
    #[arg(long, value_name = "N")]
    excerpt: Option<Option<usize>>,

    /// Print the raw segments as JSON
    #[arg(long, conflicts_with_all = ["extract", "excerpt"])]
    segments: bool,

    /// Print only the code blocks as JSON
    #[arg(long, conflicts_with = "excerpt")]
    extract: bool,

    /// Config file (defaults to ~/.config/postfence/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write a default config file and exit
    #[arg(long, conflicts_with_all = ["input", "segments", "extract", "excerpt"])]
    init_config: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
    Html,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::Html => OutputFormat::Html,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    if cli.init_config {
        let path = init_config(cli.config.as_deref())?;
        println!("Created {}", path.display());
        return Ok(());
    }

    let config = load_config(cli.config.as_deref())?;
    let raw = read_input(cli.input.as_deref())?;

    if let Some(len) = cli.excerpt {
        println!("{}", excerpt(&raw, len.unwrap_or(config.render.excerpt_length)));
        return Ok(());
    }

    let body = if cli.filter {
        normalize_fences(&raw)
    } else {
        raw
    };

    if cli.segments {
        print!("{}", output::render_json(&segment(&body))?);
        return Ok(());
    }
    if cli.extract {
        print!("{}", output::render_json(&extract_code_blocks(&body))?);
        return Ok(());
    }

    let options = render_options(&cli, &config);
    let blocks = highlight(render_content(&body, &options), &cli.highlight);
    log::info!("rendered {} blocks", blocks.len());

    let format = cli.format.map_or(config.render.format, Into::into);
    let rendered = match format {
        OutputFormat::Text => output::render_text(&blocks, io::stdout().is_terminal()),
        OutputFormat::Json => output::render_json(&blocks)?,
        OutputFormat::Html => output::render_html(&blocks),
    };
    print!("{rendered}");
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => match Config::load_from_path(path)? {
            Some(config) => {
                log::info!("using config {}", path.display());
                Ok(config)
            }
            None => bail!("Config file '{}' not found", path.display()),
        },
        None => Ok(Config::load()?.unwrap_or_default()),
    }
}

/// Writes `Config::default()` to `path` (or the default location), refusing
/// to overwrite an existing file.
fn init_config(path: Option<&Path>) -> Result<PathBuf> {
    let target = path.map_or_else(Config::config_path, Path::to_path_buf);
    if target.exists() {
        bail!("Config file '{}' already exists", target.display());
    }

    let config = Config::default();
    match path {
        Some(path) => config.save_to_path(path)?,
        None => config.save()?,
    }
    log::info!("wrote default config to {}", target.display());
    Ok(target)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut body = String::new();
            io::stdin()
                .read_to_string(&mut body)
                .context("Failed to read stdin")?;
            Ok(body)
        }
    }
}

fn render_options(cli: &Cli, config: &Config) -> RenderOptions {
    let fallback = cli
        .fallback
        .as_deref()
        .unwrap_or(&config.render.fallback_language);

    RenderOptions {
        show_line_numbers: config.render.show_line_numbers && !cli.no_line_numbers,
        fallback_language: resolve_alias(fallback),
    }
}

fn highlight(blocks: Vec<RenderBlock>, lines: &[usize]) -> Vec<RenderBlock> {
    if lines.is_empty() {
        return blocks;
    }
    blocks
        .into_iter()
        .map(|block| match block {
            RenderBlock::Code(code) => {
                RenderBlock::Code(code.with_highlighted_lines(lines.iter().copied()))
            }
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use postfence_config::RenderConfig;
    use postfence_engine::Language;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("postfence").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = parse(&[]);
        assert!(cli.input.is_none());
        assert!(cli.format.is_none());
        assert!(cli.highlight.is_empty());
        assert!(cli.excerpt.is_none());
        assert!(!cli.filter);
    }

    #[test]
    fn highlight_list() {
        let cli = parse(&["--highlight", "2,5", "post.md"]);
        assert_eq!(cli.highlight, vec![2, 5]);
        assert_eq!(cli.input, Some(PathBuf::from("post.md")));
    }

    #[test]
    fn excerpt_length_is_optional() {
        assert_eq!(parse(&["--excerpt"]).excerpt, Some(None));
        assert_eq!(parse(&["--excerpt", "40"]).excerpt, Some(Some(40)));
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(Cli::try_parse_from(["postfence", "--format", "pdf"]).is_err());
    }

    #[test]
    fn segments_conflicts_with_extract() {
        assert!(Cli::try_parse_from(["postfence", "--segments", "--extract"]).is_err());
    }

    #[test]
    fn flags_override_config() {
        let config = Config {
            render: RenderConfig {
                fallback_language: "text".to_string(),
                ..RenderConfig::default()
            },
        };
        let cli = parse(&["--fallback", "py", "--no-line-numbers"]);
        let options = render_options(&cli, &config);

        assert_eq!(options.fallback_language, Language::Python);
        assert!(!options.show_line_numbers);
    }

    #[test]
    fn config_fallback_is_resolved() {
        let config = Config {
            render: RenderConfig {
                fallback_language: "rb".to_string(),
                show_line_numbers: false,
                ..RenderConfig::default()
            },
        };
        let options = render_options(&parse(&[]), &config);

        assert_eq!(options.fallback_language, Language::Ruby);
        assert!(!options.show_line_numbers);
    }

    #[test]
    fn highlight_applies_to_code_blocks_only() {
        let blocks = render_content("intro\n\n```\na\nb\n```", &RenderOptions::default());
        let blocks = highlight(blocks, &[2]);

        assert!(matches!(&blocks[0], RenderBlock::Paragraphs { .. }));
        match &blocks[1] {
            RenderBlock::Code(code) => assert!(code.highlight_lines.contains(&2)),
            other => panic!("expected code block, got {other:?}"),
        }
    }

    #[test]
    fn read_input_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let post = temp_dir.path().join("post.md");
        fs::write(&post, "hello\n\n```js\nx\n```").unwrap();

        assert_eq!(read_input(Some(&post)).unwrap(), "hello\n\n```js\nx\n```");
    }

    #[test]
    fn read_input_missing_file_names_path() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.md");

        let err = read_input(Some(&missing)).unwrap_err();
        assert!(format!("{err:#}").contains("missing.md"));
    }

    #[test]
    fn explicit_config_must_exist() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("config.toml");

        assert!(load_config(Some(&missing)).is_err());
    }

    #[test]
    fn init_config_writes_loadable_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("postfence").join("config.toml");

        assert_eq!(init_config(Some(&path)).unwrap(), path);
        assert_eq!(load_config(Some(&path)).unwrap(), Config::default());
    }

    #[test]
    fn init_config_keeps_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[render]\nformat = \"json\"\n").unwrap();

        assert!(init_config(Some(&path)).is_err());
        assert_eq!(load_config(Some(&path)).unwrap().render.format, OutputFormat::Json);
    }

    #[test]
    fn init_config_conflicts_with_input() {
        assert!(Cli::try_parse_from(["postfence", "--init-config", "post.md"]).is_err());
    }

    #[test]
    fn explicit_config_is_loaded() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[render]\nformat = \"html\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.render.format, OutputFormat::Html);
    }
}
