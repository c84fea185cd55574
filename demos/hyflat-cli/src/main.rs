use ariadne::{ColorGenerator, Label, Report, Source};
use clap::Parser as ClapParser;
use hyflat::{config::FlattenConfig, parser::parse_with, prelude::*};
use log::info;

#[derive(ClapParser)]
pub struct Arguments {
    /// Nested literal to flatten, e.g. `[1, [2, [3]]]`
    literal: String,

    /// Nesting limit (0 disables it)
    #[arg(long, default_value_t = hyflat::config::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Only flatten this many levels of nesting
    #[arg(short, long)]
    levels: Option<usize>,
}

impl Arguments {
    /// Limits for parsing and flattening; a `--max-depth` of 0 lifts every limit.
    fn config(&self) -> FlattenConfig {
        match self.max_depth {
            0 => FlattenConfig::unlimited(),
            max => FlattenConfig::unlimited().with_max_depth(max),
        }
    }
}

fn main() {
    env_logger::init();
    let args = Arguments::parse();
    let config = args.config();

    let mut colors = ColorGenerator::new();
    let a = colors.next();

    let source = args.literal;
    let value = match parse_with(&source, &config) {
        Ok(value) => value,
        Err(hyflat::Error::ParserErrors { errors }) => {
            eprintln!("Failed to parse the literal:");
            for error in errors {
                let span = ("<literal>", error.start..error.end);
                Report::build(ariadne::ReportKind::Error, span.clone())
                    .with_message(&error.message)
                    .with_label(
                        Label::new(span)
                            .with_message("The error occurred here")
                            .with_color(a),
                    )
                    .finish()
                    .eprint(("<literal>", Source::from(source.as_str())))
                    .unwrap();
            }
            std::process::exit(1);
        }
        Err(error) => {
            eprintln!("Error: {}", error);
            std::process::exit(1);
        }
    };

    info!("parsed {} nodes", value.node_count());
    println!("input:     {}", value);
    println!("depth:     {}", value.depth());
    println!("leaves:    {}", value.leaf_count());

    let flat = match args.levels {
        Some(levels) => Node::Seq(value.flatten_levels(levels)),
        None => match flatten_with(&value, &config) {
            Ok(leaves) => Node::from_leaves(leaves),
            Err(error) => {
                eprintln!("Error: {}", error);
                std::process::exit(1);
            }
        },
    };

    print!("flattened: ");
    flat.pretty_print().unwrap();
    println!();
}
