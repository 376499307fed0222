use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use paperfinder_core::{
    CopyOutcome, Osc52Clipboard, Overrides, PaperFinder, SearchOutcome, SearchParams, Settings,
};

mod output;

use output::ColorMode;

/// Paper Finder - search Crossref for papers, export results, copy citations
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Contact address sent to Crossref (polite pool)
    #[arg(long, global = true)]
    mailto: Option<String>,

    /// Path to the saved-state JSON file
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Default)]
struct ParamArgs {
    /// Earliest publication year
    #[arg(long)]
    min_year: Option<String>,

    /// Latest publication year (defaults to the current year)
    #[arg(long)]
    max_year: Option<String>,

    /// Minimum citation count
    #[arg(long)]
    min_citations: Option<String>,

    /// Number of results to request (1-100)
    #[arg(long)]
    max_results: Option<String>,

    /// Only show results with a PDF link
    #[arg(long)]
    only_pdf: bool,

    /// Show results without a PDF link too
    #[arg(long, conflicts_with = "only_pdf")]
    any_link: bool,
}

impl ParamArgs {
    /// Overlay the given flags on `params`; untouched fields keep their
    /// saved values.
    fn apply(self, params: &mut SearchParams) {
        if let Some(v) = self.min_year {
            params.min_year = v;
        }
        if let Some(v) = self.max_year {
            params.max_year = v;
        }
        if let Some(v) = self.min_citations {
            params.min_citations = v;
        }
        if let Some(v) = self.max_results {
            params.max_results = v;
        }
        if self.only_pdf {
            params.only_pdf = true;
        } else if self.any_link {
            params.only_pdf = false;
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search Crossref and show the filtered results
    Search {
        /// Search terms
        #[arg(required = true)]
        query: Vec<String>,

        #[command(flatten)]
        params: ParamArgs,

        /// Print HTML markup instead of text
        #[arg(long)]
        html: bool,
    },

    /// Show the results of the last search without fetching
    Show {
        /// Print HTML markup instead of text
        #[arg(long)]
        html: bool,
    },

    /// Save the last results as CSV
    Export {
        /// Directory to write into (defaults to the download directory)
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Print (and copy) the citation of result <n> (1-based)
    Cite {
        n: usize,

        /// Also copy to the clipboard via the terminal
        #[arg(long)]
        copy: bool,
    },

    /// Edit the saved search parameters without searching
    Params {
        /// Query text
        #[arg(long)]
        query: Option<String>,

        #[command(flatten)]
        params: ParamArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = paperfinder_core::config_file::load_config();
    let settings = Settings::resolve(
        &config,
        Overrides {
            mailto: cli.mailto,
            state_path: cli.state,
            ..Default::default()
        }
        .with_env(),
    );
    tracing::debug!(state = %settings.state_path.display(), "resolved settings");

    let color = ColorMode(!cli.no_color);
    let mut stdout = std::io::stdout();
    let mut finder = paperfinder_core::open(&settings).await;

    match cli.command {
        Command::Search {
            query,
            params,
            html,
        } => search(&mut finder, &mut stdout, query.join(" "), params, html, color).await,
        Command::Show { html } => show(&finder, &mut stdout, html, color),
        Command::Export { dir } => {
            let dir = dir.unwrap_or_else(|| settings.download_dir.clone());
            match finder.export_csv(&dir)? {
                Some(path) => writeln!(stdout, "Saved {}", path.display())?,
                None => writeln!(stdout, "Nothing to export.")?,
            }
            Ok(())
        }
        Command::Cite { n, copy } => cite(&finder, &mut stdout, n, copy),
        Command::Params { query, params } => {
            let mut next = finder.params().clone();
            if let Some(q) = query {
                next.query = q;
            }
            params.apply(&mut next);
            finder.set_params(next).await;
            let p = finder.params();
            writeln!(stdout, "query         {}", p.query)?;
            writeln!(stdout, "min year      {}", p.min_year)?;
            writeln!(stdout, "max year      {}", p.max_year)?;
            writeln!(stdout, "min citations {}", p.min_citations)?;
            writeln!(stdout, "max results   {}", p.max_results)?;
            writeln!(stdout, "only pdf      {}", p.only_pdf)?;
            Ok(())
        }
    }
}

async fn search(
    finder: &mut PaperFinder,
    w: &mut dyn Write,
    query: String,
    args: ParamArgs,
    html: bool,
    color: ColorMode,
) -> anyhow::Result<()> {
    let mut params = finder.params().clone();
    params.query = query;
    args.apply(&mut params);
    finder.set_params(params).await;

    let outcome = finder.search().await;
    output::print_status(w, finder.session().status(), color)?;
    match outcome {
        SearchOutcome::Skipped => anyhow::bail!("Query is empty"),
        SearchOutcome::Failed => std::process::exit(1),
        SearchOutcome::Succeeded(_) => show(finder, w, html, color),
    }
}

fn show(finder: &PaperFinder, w: &mut dyn Write, html: bool, color: ColorMode) -> anyhow::Result<()> {
    let Some(view) = finder.view() else {
        writeln!(w, "No saved results. Run `paperfinder search <query>` first.")?;
        return Ok(());
    };
    if html {
        write!(w, "{}", view.to_html())?;
    } else {
        if matches!(finder.session().status(), paperfinder_core::Status::Restored(_)) {
            output::print_status(w, finder.session().status(), color)?;
        }
        output::print_results(w, &view, color)?;
    }
    Ok(())
}

fn cite(finder: &PaperFinder, w: &mut dyn Write, n: usize, copy: bool) -> anyhow::Result<()> {
    let Some(index) = n.checked_sub(1) else {
        anyhow::bail!("Result numbers start at 1");
    };
    if !copy {
        let Some(text) = finder.citation(index) else {
            anyhow::bail!("No result #{}", n);
        };
        writeln!(w, "{}", text)?;
        return Ok(());
    }
    let mut clipboard = Osc52Clipboard::stdout();
    match finder.copy_citation(index, &mut clipboard) {
        Some(CopyOutcome::Copied(text)) => {
            writeln!(w)?;
            writeln!(w, "{}", text)?;
            writeln!(w, "Tersalin")?;
        }
        Some(CopyOutcome::Manual(text)) => {
            writeln!(w, "Clipboard unavailable; select the text below:")?;
            writeln!(w, "{}", text)?;
        }
        None => anyhow::bail!("No result #{}", n),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_flags_overlay_saved_params() {
        let cli = Cli::try_parse_from([
            "paperfinder",
            "search",
            "graph",
            "neural",
            "--min-year",
            "2019",
            "--only-pdf",
        ])
        .unwrap();
        let Command::Search { query, params, .. } = cli.command else {
            panic!("expected search");
        };
        assert_eq!(query.join(" "), "graph neural");

        let mut saved = SearchParams {
            max_results: "20".into(),
            ..Default::default()
        };
        params.apply(&mut saved);
        assert_eq!(saved.min_year, "2019");
        assert_eq!(saved.max_results, "20");
        assert!(saved.only_pdf);
    }

    #[test]
    fn any_link_clears_pdf_only() {
        let cli = Cli::try_parse_from(["paperfinder", "params", "--any-link"]).unwrap();
        let Command::Params { params, .. } = cli.command else {
            panic!("expected params");
        };
        let mut saved = SearchParams {
            only_pdf: true,
            ..Default::default()
        };
        params.apply(&mut saved);
        assert!(!saved.only_pdf);
    }

    #[test]
    fn pdf_flags_conflict() {
        assert!(
            Cli::try_parse_from(["paperfinder", "params", "--only-pdf", "--any-link"]).is_err()
        );
    }

    #[test]
    fn cite_takes_a_number() {
        let cli = Cli::try_parse_from(["paperfinder", "--no-color", "cite", "2"]).unwrap();
        assert!(cli.no_color);
        assert!(matches!(cli.command, Command::Cite { n: 2, copy: false }));
    }
}
