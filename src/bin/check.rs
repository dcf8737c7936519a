use clap::Parser;
use rulecheck::{
    lang::generic, rule::activation::ActivationState, Checker, CheckerOptions, ParagraphMode,
};
use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

#[derive(Parser)]
#[clap(version, about = "Checks text for grammar and style issues.")]
struct Opts {
    /// The text to check. Read from `--file` or stdin if not given.
    text: Option<String>,
    #[clap(long, short)]
    file: Option<PathBuf>,
    /// One of `normal`, `only_paragraph` and `only_sentence`.
    #[clap(long, short, default_value = "normal")]
    mode: ParagraphMode,
    /// Check the whole text as one sentence.
    #[clap(long)]
    no_tokenize: bool,
    /// JSON file with the rules and categories to enable / disable.
    #[clap(long)]
    activation: Option<PathBuf>,
    #[clap(long, short)]
    disable: Vec<String>,
    #[clap(long, short)]
    enable: Vec<String>,
    #[clap(long)]
    disable_category: Vec<String>,
    /// Print the words without any reading.
    #[clap(long)]
    unknown_words: bool,
    #[clap(long)]
    chunk_size: Option<usize>,
    #[clap(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let opts = Opts::parse();

    let text = match (&opts.text, &opts.file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => fs::read_to_string(path)?,
        (None, None) => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            text
        }
    };

    let options = CheckerOptions {
        list_unknown_words: opts.unknown_words,
        chunk_size: opts.chunk_size,
        ..CheckerOptions::default()
    };
    let mut checker = Checker::with_options(generic::language(), options);

    if let Some(path) = &opts.activation {
        let activation: ActivationState = serde_json::from_str(&fs::read_to_string(path)?)?;
        checker.set_activation(activation);
    }
    checker.disable_rules(opts.disable.iter().cloned());
    for id in &opts.enable {
        checker.enable_rule(id.as_str());
    }
    for category in &opts.disable_category {
        checker.disable_category(category.as_str());
    }

    let matches = checker.check_text(&text, !opts.no_tokenize, opts.mode)?;

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
    } else {
        for m in &matches {
            println!(
                "{}:{} {} {}",
                m.line().map_or_else(|| "?".into(), |x| x.to_string()),
                m.column().map_or_else(|| "?".into(), |x| x.to_string()),
                m.rule(),
                m.message()
            );
            if !m.replacements().is_empty() {
                println!("    suggestions: {:?}", m.replacements());
            }
        }
    }

    if opts.unknown_words {
        println!("unknown words: {:?}", checker.unknown_words()?);
    }

    Ok(())
}
