use anyhow::Result;
use clap::{Parser, Subcommand};
use refsearch_core::orchestrate::{Orchestrator, Outcome, Session};
use refsearch_core::{translate_or_marker, Translate, LANGUAGES};
use refsearch_local::duckduckgo::DuckDuckGo;
use refsearch_local::infobox::HtmlEnricher;
use refsearch_local::translate::GoogleTranslate;
use refsearch_local::wikipedia::WikipediaProvider;

#[derive(Parser, Debug)]
#[command(name = "refsearch")]
#[command(about = "Resolve a query into a reference article with summary, keywords, and fallbacks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve one query and print the result bundle.
    Query(QueryCmd),
    /// Print autocomplete phrases for a partial query.
    Suggest(SuggestCmd),
    /// Interactive session with browser-style :back / :forward navigation.
    Interactive(InteractiveCmd),
    /// Print version info (json).
    Version,
}

#[derive(clap::Args, Debug)]
struct QueryCmd {
    /// The query; multiple words are joined with spaces.
    query: Vec<String>,
    /// Emit the full bundle as JSON instead of text.
    #[arg(long)]
    json: bool,
    /// Translate the summary to this language code (one of: en te hi es fr de).
    #[arg(long)]
    lang: Option<String>,
    /// Sentences in the extractive summary.
    #[arg(long, default_value_t = 5)]
    sentences: usize,
    /// Key phrases to extract.
    #[arg(long, default_value_t = 9)]
    keywords: usize,
}

#[derive(clap::Args, Debug)]
struct SuggestCmd {
    partial: Vec<String>,
}

#[derive(clap::Args, Debug)]
struct InteractiveCmd {
    #[arg(long, default_value_t = 5)]
    sentences: usize,
    #[arg(long, default_value_t = 9)]
    keywords: usize,
}

struct Providers {
    wikipedia: WikipediaProvider,
    enricher: HtmlEnricher,
    ddg: DuckDuckGo,
    translator: GoogleTranslate,
}

impl Providers {
    fn build() -> Result<Self> {
        let client = refsearch_local::default_client()?;
        Ok(Self {
            wikipedia: WikipediaProvider::new(client.clone()),
            enricher: HtmlEnricher::new(client.clone()),
            ddg: DuckDuckGo::new(client.clone()),
            translator: GoogleTranslate::new(client),
        })
    }
}

fn known_lang(code: &str) -> bool {
    LANGUAGES.iter().any(|(_, c)| *c == code)
}

async fn print_outcome(
    outcome: &Outcome,
    json: bool,
    lang: Option<&str>,
    translator: &dyn Translate,
) {
    if json {
        match serde_json::to_string_pretty(outcome) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("warning: could not encode outcome: {e}"),
        }
        return;
    }
    match outcome {
        Outcome::Idle => {
            println!("Query too short; enter at least two characters.");
        }
        Outcome::Found(bundle) => {
            println!("# {}", bundle.article.title);
            println!("{}", bundle.article.url);
            println!();
            println!("Summary:");
            println!("  {}", bundle.analysis.summary);
            if let Some(code) = lang.filter(|c| *c != "en") {
                let translated =
                    translate_or_marker(translator, &bundle.analysis.summary, code).await;
                println!();
                println!("Summary ({code}):");
                println!("  {translated}");
            }
            if !bundle.analysis.keywords.is_empty() {
                println!();
                println!("Key concepts: {}", bundle.analysis.keywords.join(", "));
            }
            if let Some(img) = &bundle.article.image_url {
                println!();
                println!("Image: {img}");
            }
            if !bundle.article.attributes.is_empty() {
                println!();
                println!("Key info:");
                for (label, value) in bundle.article.attributes.iter().take(8) {
                    println!("  {label}: {value}");
                }
            }
            if !bundle.alternates.is_empty() {
                println!();
                println!("Related: {}", bundle.alternates.join(" | "));
            }
            for w in &bundle.warnings {
                eprintln!("warning: {w}");
            }
        }
        Outcome::Fallback(bundle) => {
            println!("No direct article found.");
            if !bundle.suggestions.is_empty() {
                println!();
                println!("Did you mean: {}", bundle.suggestions.join(" | "));
            }
            if !bundle.web_results.is_empty() {
                println!();
                println!("Web results:");
                for hit in &bundle.web_results {
                    println!("  {} <{}>", hit.label, hit.url);
                }
            }
            for w in &bundle.warnings {
                eprintln!("warning: {w}");
            }
        }
    }
}

async fn run_query(cmd: QueryCmd) -> Result<()> {
    if let Some(code) = cmd.lang.as_deref() {
        if !known_lang(code) {
            let codes: Vec<&str> = LANGUAGES.iter().map(|(_, c)| *c).collect();
            anyhow::bail!("unknown language code {code:?}; expected one of {}", codes.join(" "));
        }
    }
    let providers = Providers::build()?;
    let orch = Orchestrator::new(&providers.wikipedia, &providers.wikipedia)
        .with_enrich(&providers.enricher)
        .with_web_fallback(&providers.ddg)
        .sentence_count(cmd.sentences)
        .keyword_count(cmd.keywords);
    let mut session = Session::new();
    let outcome = orch.handle(&cmd.query.join(" "), &mut session).await;
    print_outcome(&outcome, cmd.json, cmd.lang.as_deref(), &providers.translator).await;
    Ok(())
}

async fn run_suggest(cmd: SuggestCmd) -> Result<()> {
    use refsearch_core::Autocomplete;
    let providers = Providers::build()?;
    match providers.ddg.complete(&cmd.partial.join(" ")).await {
        Ok(phrases) => {
            for p in phrases.iter().take(9) {
                println!("{p}");
            }
        }
        Err(e) => eprintln!("warning: autocomplete unavailable: {e}"),
    }
    Ok(())
}

async fn run_interactive(cmd: InteractiveCmd) -> Result<()> {
    let providers = Providers::build()?;
    let orch = Orchestrator::new(&providers.wikipedia, &providers.wikipedia)
        .with_enrich(&providers.enricher)
        .with_web_fallback(&providers.ddg)
        .sentence_count(cmd.sentences)
        .keyword_count(cmd.keywords);
    let mut session = Session::new();

    println!("refsearch interactive; :back, :forward, :quit");
    let stdin = std::io::stdin();
    loop {
        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim().to_string();
        let query = match line.as_str() {
            "" => continue,
            ":quit" | ":q" => break,
            ":back" => match session.history.back() {
                Some(q) => q.to_string(),
                None => {
                    println!("(history is empty)");
                    continue;
                }
            },
            ":forward" => match session.history.forward() {
                Some(q) => q.to_string(),
                None => {
                    println!("(history is empty)");
                    continue;
                }
            },
            q => q.to_string(),
        };
        let outcome = orch.handle(&query, &mut session).await;
        print_outcome(&outcome, false, None, &providers.translator).await;
    }
    Ok(())
}

fn print_version() {
    println!(
        "{}",
        serde_json::json!({
            "schema_version": 1,
            "name": "refsearch",
            "version": env!("CARGO_PKG_VERSION"),
        })
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Query(cmd) => run_query(cmd).await,
        Commands::Suggest(cmd) => run_suggest(cmd).await,
        Commands::Interactive(cmd) => run_interactive(cmd).await,
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}
