use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand, ValueEnum};
use rkyv::ser::{serializers::AllocSerializer, Serializer};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use talkbank_parser::{parse_tag, Document, MorParser, ParserConfig, TranscriptParser, TALKBANK_NAMESPACE};
use talkbank_protocol::{MorToken, ParseOptions, Transcript, Utterance};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Extracts MOR tier tokens from TalkBank XML transcripts")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Walk a transcript and write one record per utterance
    Extract(ExtractArgs),
    /// Parse a single MOR tag string such as `tow+truck/n|+n|tow+n|truck-PL`
    Tag {
        tag: String,
        /// Surface word for the resulting token
        #[arg(short, long)]
        word: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// `uID speaker tokens`, one utterance per line
    Text,
    /// One JSON object per utterance
    Json,
    /// rkyv archive of the whole transcript
    Archive,
}

#[derive(clap::Args)]
struct ExtractArgs {
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// Defaults to stdout; required for `archive`
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Namespace applied to element names, in `{uri}` form
    #[arg(long, default_value = TALKBANK_NAMESPACE, conflicts_with = "no_namespace")]
    namespace: String,

    /// Look up bare element names
    #[arg(long)]
    no_namespace: bool,

    /// Leave shortened material out of surface words
    #[arg(long)]
    drop_shortenings: bool,

    /// Join compound stems with `_` instead of `+`
    #[arg(long)]
    underscore_compounds: bool,
}

impl ExtractArgs {
    fn config(&self) -> ParserConfig {
        let mut options = ParseOptions::empty();
        options.set(ParseOptions::DROP_SHORTENINGS, self.drop_shortenings);
        options.set(ParseOptions::UNDERSCORE_COMPOUNDS, self.underscore_compounds);

        let namespace = if self.no_namespace {
            String::new()
        } else {
            self.namespace.clone()
        };
        ParserConfig { namespace, options }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    match Cli::parse().command {
        Command::Extract(args) => extract(&args),
        Command::Tag { tag, word } => inspect_tag(&tag, word.as_deref()),
    }
}

fn extract(args: &ExtractArgs) -> anyhow::Result<()> {
    info!(input = ?args.input, "reading transcript");
    let bytes = fs::read(&args.input).with_context(|| format!("reading {:?}", args.input))?;
    let doc = Document::parse_bytes(&bytes)?;

    let parser = MorParser::new(args.config());
    let mut utterances = Vec::new();
    for result in parser.utterances(&doc) {
        match result {
            Ok(utterance) => utterances.push(utterance),
            Err(err) => warn!(error = %err, "skipping utterance"),
        }
    }
    info!(count = utterances.len(), "parsed utterances");

    match args.format {
        Format::Text => write_lines(args, &utterances, |u| Ok(u.to_string())),
        Format::Json => write_lines(args, &utterances, |u| Ok(serde_json::to_string(u)?)),
        Format::Archive => write_archive(args, utterances),
    }
}

fn write_lines(
    args: &ExtractArgs,
    utterances: &[Utterance],
    render: impl Fn(&Utterance) -> anyhow::Result<String>,
) -> anyhow::Result<()> {
    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(io::BufWriter::new(fs::File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };
    for utterance in utterances {
        writeln!(out, "{}", render(utterance)?)?;
    }
    out.flush()?;
    Ok(())
}

fn write_archive(args: &ExtractArgs, utterances: Vec<Utterance>) -> anyhow::Result<()> {
    let output = args
        .output
        .as_ref()
        .ok_or_else(|| anyhow!("--output is required for the archive format"))?;

    let transcript = Transcript::new(utterances);
    let mut serializer = AllocSerializer::<256>::default();
    serializer
        .serialize_value(&transcript)
        .map_err(|e| anyhow!("rkyv serialization failed: {:?}", e))?;
    let bytes = serializer.into_serializer().into_inner();

    rkyv::check_archived_root::<Transcript>(&bytes)
        .map_err(|e| anyhow!("archive failed validation: {:?}", e))?;

    fs::write(output, &bytes)?;
    info!(output = ?output, bytes = bytes.len(), "archive written");
    Ok(())
}

fn inspect_tag(tag: &str, word: Option<&str>) -> anyhow::Result<()> {
    let parsed = parse_tag(tag)?;
    if let Err(problem) = parsed.validate() {
        warn!(%tag, %problem, "tag parsed but is not well formed");
    }
    let token = MorToken::from_tag(&parsed, word);

    println!("{}", serde_json::to_string_pretty(&parsed)?);
    println!("{}", token);
    Ok(())
}
