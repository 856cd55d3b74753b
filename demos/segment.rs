use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use phonics_rs::{
    engines::phonics::{PhonicsEngine, PhonicsRuleParams},
    SegmentationEngine,
};

const DEMO_WORDS: &[&str] = &[
    "cat", "flower", "apple", "said", "running", "phone", "cake", "elephant", "teacher",
    "three", "church", "one-way",
];

#[derive(Parser)]
#[command(name = "segment")]
#[command(about = "Split English words into natural-phonics chunks")]
struct Args {
    /// Words to segment (a built-in demo list when empty)
    words: Vec<String>,

    /// JSON rules file; its exceptions extend the built-in lexicon
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Print one JSON result per line instead of hyphenated chunks
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut engine = PhonicsEngine::new();
    if let Some(path) = &args.rules {
        let load_start = Instant::now();
        engine.load_rules_with_params(
            path,
            PhonicsRuleParams {
                extend_exceptions: true,
            },
        )?;
        println!("Rules loaded in {:.2?}", load_start.elapsed());
    }
    println!("Rule set version: {}", engine.rules().version);

    let words: Vec<&str> = if args.words.is_empty() {
        DEMO_WORDS.to_vec()
    } else {
        args.words.iter().map(String::as_str).collect()
    };

    let start = Instant::now();
    let results = engine.segment_batch(&words, None);
    let elapsed = start.elapsed();

    for result in &results {
        if args.json {
            println!("{}", serde_json::to_string(result)?);
        } else {
            println!("{:<12} {}", result.word, result.hyphenated());
        }
    }
    println!("Segmented {} words in {:.2?}", results.len(), elapsed);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn args_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_flags_and_words() {
        let args =
            Args::try_parse_from(["segment", "--rules", "rules.json", "--json", "cat", "dog"])
                .unwrap();
        assert_eq!(args.rules, Some(PathBuf::from("rules.json")));
        assert!(args.json);
        assert_eq!(args.words, vec!["cat", "dog"]);
    }

    #[test]
    fn rejects_unknown_flags_and_missing_values() {
        assert!(Args::try_parse_from(["segment", "--jsno", "cat"]).is_err());
        assert!(Args::try_parse_from(["segment", "--rules"]).is_err());
    }
}
