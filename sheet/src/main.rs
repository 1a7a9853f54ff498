use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use sheet::JsonDatasetSource;
use sheet::core::{Difficulty, Topic};
use sheet::projectors::progress_projector::{
    Progress, sheet_progress, sub_topic_progress, topic_progress,
};
use sheet::storage::DatasetSource;
use sheet::store::{DifficultyFilter, FilterState, SheetStore, StatusFilter};

#[derive(Debug, Parser)]
#[command(
    name = "sheet",
    about = "Practice-sheet tracker built on the sheet crate",
    version
)]
struct Cli {
    /// Enable verbose logging for debugging.
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the topic / sub-topic / question tree, optionally filtered.
    Show(ShowArgs),

    /// List topics with their solve progress.
    Topics(TopicsArgs),

    /// Print sheet metadata and the overall progress summary.
    Stats(StatsArgs),
}

#[derive(Debug, Args)]
struct ShowArgs {
    /// Dataset JSON file exported from the tracker.
    dataset: PathBuf,
    /// Case-insensitive search over title, canonical name, topic, and sub-topic.
    #[arg(long)]
    search: Option<String>,
    /// Keep only questions of this difficulty.
    #[arg(long, value_enum)]
    difficulty: Option<DifficultyArg>,
    /// Keep only solved or unsolved questions.
    #[arg(long, value_enum)]
    status: Option<StatusArg>,
    /// Emit the filtered tree as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct TopicsArgs {
    /// Dataset JSON file exported from the tracker.
    dataset: PathBuf,
    /// Emit JSON instead of a human-readable list.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct StatsArgs {
    /// Dataset JSON file exported from the tracker.
    dataset: PathBuf,
    /// Emit JSON instead of a human-readable summary.
    #[arg(long)]
    json: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum DifficultyArg {
    Basic,
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Basic => Difficulty::Basic,
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum StatusArg {
    Solved,
    Unsolved,
}

impl From<StatusArg> for StatusFilter {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Solved => StatusFilter::Solved,
            StatusArg::Unsolved => StatusFilter::Unsolved,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    match cli.command {
        Commands::Show(args) => handle_show(args, verbose),
        Commands::Topics(args) => handle_topics(args, verbose),
        Commands::Stats(args) => handle_stats(args, verbose),
    }
}

fn handle_show(args: ShowArgs, verbose: bool) -> Result<()> {
    let ShowArgs {
        dataset,
        search,
        difficulty,
        status,
        json,
    } = args;

    let mut store = load_store(&dataset, verbose)?;
    let filters = filter_state(search, difficulty, status);
    store.set_search_query(filters.search.clone());
    store.set_filter_difficulty(filters.difficulty);
    store.set_filter_status(filters.status);

    let topics = store.filtered_topics();
    if topics.is_empty() {
        if store.filters().is_default() {
            eprintln!("The sheet has no topics yet.");
        } else {
            eprintln!("No questions match the active filters.");
        }
        return Ok(());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&topics)?);
    } else {
        print!("{}", render_tree(&topics));
    }
    Ok(())
}

fn handle_topics(args: TopicsArgs, verbose: bool) -> Result<()> {
    let TopicsArgs { dataset, json } = args;

    let store = load_store(&dataset, verbose)?;
    if store.topics().is_empty() {
        eprintln!("The sheet has no topics yet.");
        return Ok(());
    }

    if json {
        #[derive(serde::Serialize)]
        struct JsonTopic<'a> {
            name: &'a str,
            solved: usize,
            total: usize,
            percent: u32,
        }

        let payload: Vec<JsonTopic<'_>> = store
            .topics()
            .iter()
            .map(|t| {
                let progress = topic_progress(t);
                JsonTopic {
                    name: &t.name,
                    solved: progress.solved,
                    total: progress.total,
                    percent: progress.percent(),
                }
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        for topic in store.topics() {
            let progress = topic_progress(topic);
            println!(
                "{:<32} {:>3}/{:<3} {:>3}%",
                topic.name,
                progress.solved,
                progress.total,
                progress.percent()
            );
        }
    }
    Ok(())
}

fn handle_stats(args: StatsArgs, verbose: bool) -> Result<()> {
    let StatsArgs { dataset, json } = args;

    let store = load_store(&dataset, verbose)?;
    let progress = sheet_progress(store.questions());

    if json {
        #[derive(serde::Serialize)]
        struct JsonStats<'a> {
            sheet: &'a sheet::core::Sheet,
            topics: usize,
            progress: Progress,
            percent: u32,
        }

        let payload = JsonStats {
            sheet: store.sheet(),
            topics: store.topics().len(),
            progress,
            percent: progress.percent(),
        };
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        let sheet = store.sheet();
        println!("{}", sheet.name);
        if !sheet.description.is_empty() {
            println!("{}", sheet.description);
        }
        if !sheet.tags.is_empty() {
            let tags: Vec<&str> = sheet.tags.iter().map(|t| t.0.as_str()).collect();
            println!("tags: {}", tags.join(", "));
        }
        println!();
        println!("topics:    {}", store.topics().len());
        println!("questions: {}", progress.total);
        println!(
            "solved:    {}/{} ({}%)",
            progress.solved,
            progress.total,
            progress.percent()
        );
    }
    Ok(())
}

/// Build the read-time filter state from CLI flags. Blank search strings are
/// rejected here so they never reach the store.
fn filter_state(
    search: Option<String>,
    difficulty: Option<DifficultyArg>,
    status: Option<StatusArg>,
) -> FilterState {
    FilterState {
        search: search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_default(),
        difficulty: difficulty
            .map(|d| DifficultyFilter::Only(d.into()))
            .unwrap_or_default(),
        status: status.map(StatusFilter::from).unwrap_or_default(),
    }
}

fn load_store(path: &Path, verbose: bool) -> Result<SheetStore> {
    if verbose {
        eprintln!("Loading dataset {:?}", path);
    }
    let (sheet, questions) = JsonDatasetSource.load(path)?;
    if verbose {
        eprintln!(
            "Loaded {} questions for sheet {:?}",
            questions.len(),
            sheet.name
        );
    }
    Ok(SheetStore::new(sheet, questions))
}

fn render_tree(topics: &[Topic]) -> String {
    let mut out = String::new();
    for (ti, topic) in topics.iter().enumerate() {
        let progress = topic_progress(topic);
        out.push_str(&format!(
            "{}. {} — {}/{} solved ({}%)\n",
            ti + 1,
            topic.name,
            progress.solved,
            progress.total,
            progress.percent()
        ));
        for (si, st) in topic.sub_topics.iter().enumerate() {
            let sub = sub_topic_progress(st);
            out.push_str(&format!(
                "   {}.{} {} ({}/{})\n",
                ti + 1,
                si + 1,
                st.name,
                sub.solved,
                sub.total
            ));
            for q in &st.questions {
                let marker = if q.is_solved { "[x]" } else { "[ ]" };
                let notes = if q.notes.is_empty() { "" } else { " *" };
                out.push_str(&format!(
                    "       {} {:<8} {:<10} {}{}\n",
                    marker,
                    q.meta.difficulty.as_str(),
                    q.meta.platform,
                    q.title,
                    notes
                ));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const SAMPLE: &str = r#"{
        "data": {
            "sheet": {
                "_id": "sheet-1",
                "name": "DSA Practice",
                "description": "Curated problems",
                "tag": ["dsa"],
                "slug": "dsa-practice"
            },
            "questions": [
                {
                    "_id": "q-1",
                    "sheetId": "sheet-1",
                    "questionId": { "platform": "leetcode", "difficulty": "Easy", "name": "Two Sum" },
                    "topic": "Arrays",
                    "title": "Two Sum",
                    "subTopic": "Basics",
                    "isSolved": true
                },
                {
                    "_id": "q-2",
                    "sheetId": "sheet-1",
                    "questionId": { "platform": "leetcode", "difficulty": "Easy", "name": "Climbing Stairs" },
                    "topic": "DP",
                    "title": "Climbing Stairs",
                    "subTopic": "1D",
                    "isSolved": false
                }
            ]
        }
    }"#;

    #[test]
    fn load_store_reads_a_dataset_file() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("dataset.json");
        fs::write(&path, SAMPLE).expect("write dataset");

        let store = load_store(&path, false).expect("load dataset");

        assert_eq!(store.sheet().name, "DSA Practice");
        assert_eq!(store.questions().len(), 2);
        assert_eq!(store.topics().len(), 2);
    }

    #[test]
    fn filter_state_rejects_blank_search_text() {
        let filters = filter_state(Some("   ".to_string()), None, None);
        assert!(filters.is_default());

        let filters = filter_state(Some(" two ".to_string()), None, Some(StatusArg::Solved));
        assert_eq!(filters.search, "two");
        assert_eq!(filters.status, StatusFilter::Solved);
    }

    #[test]
    fn render_tree_marks_solved_questions() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("dataset.json");
        fs::write(&path, SAMPLE).expect("write dataset");
        let store = load_store(&path, false).expect("load dataset");

        let rendered = render_tree(store.topics());

        assert!(rendered.contains("1. Arrays — 1/1 solved (100%)"));
        assert!(rendered.contains("[x]"));
        assert!(rendered.contains("[ ]"));
        assert!(rendered.contains("Climbing Stairs"));
    }
}
