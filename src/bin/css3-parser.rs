use anyhow::{anyhow, Context, Result};
use log::LevelFilter;
use csslint_bin::{collect_events, describe_event, error_snippet};
use csslint_css3::parser_config::ParserConfig;
use csslint_css3::tokenizer::Tokenizer;
use csslint_shared::errors::SyntaxError;
use simple_logger::SimpleLogger;
use std::fs;

fn main() -> Result<()> {
    let matches = clap::Command::new("csslint CSS3 parser")
        .version("0.1.0")
        .arg(
            clap::Arg::new("file")
                .help("The stylesheet to parse")
                .required(true)
                .index(1),
        )
        .arg(
            clap::Arg::new("debug")
                .help("Enable debug logging")
                .short('d')
                .long("debug")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("tokens")
                .help("Just print the tokens")
                .long("tokens")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("strict")
                .help("Stop at the first syntax error")
                .long("strict")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("star-hack")
                .help("Accept *property names")
                .long("star-hack")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("underscore-hack")
                .help("Accept _property names")
                .long("underscore-hack")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("ie-filters")
                .help("Accept IE filter values such as progid:...")
                .long("ie-filters")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let file = matches
        .get_one::<String>("file")
        .ok_or_else(|| anyhow!("no file given"))?
        .to_string();

    let level = if matches.get_flag("debug") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    SimpleLogger::new().with_level(level).init()?;

    let css = fs::read_to_string(&file).with_context(|| format!("could not read {}", file))?;

    if matches.get_flag("tokens") {
        print_tokens(&css);
        return Ok(());
    }

    let config = ParserConfig {
        strict: matches.get_flag("strict"),
        star_hack: matches.get_flag("star-hack"),
        underscore_hack: matches.get_flag("underscore-hack"),
        ie_filters: matches.get_flag("ie-filters"),
        source: Some(file),
    };

    let (result, events) = collect_events(&css, config);
    for event in &events {
        println!("{}", describe_event(event));
    }

    if let Err(err) = result {
        let message = err.message.clone();
        display_snippet(&css, &err);
        return Err(anyhow!(message));
    }

    Ok(())
}

fn display_snippet(css: &str, err: &SyntaxError) {
    println!();
    println!();
    print!("{}", error_snippet(css, err));
    println!();
    println!();
}

fn print_tokens(css: &str) {
    for token in Tokenizer::new(css) {
        println!("{:?} {:?} {:?}", token.start, token.token_type, token.value);
    }
}
