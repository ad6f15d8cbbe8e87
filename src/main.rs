use ddlscape::highlight::RowTag;
use ddlscape::layout::LayoutEngine;
use ddlscape::{Error, Scene, SceneConfig, parse_ddl};
use serde_json::json;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::process;
use tracing::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Schema,
    Scene,
}

impl Format {
    fn from_str(s: &str) -> Option<Self> {
        match s {
            "schema" => Some(Self::Schema),
            "scene" => Some(Self::Scene),
            _ => None,
        }
    }
}

struct Options {
    input: PathBuf,
    output: Option<PathBuf>,
    format: Format,
    engine: LayoutEngine,
    hover: Option<RowTag>,
    verbose: bool,
}

fn usage(program: &str) -> ! {
    eprintln!("Usage: {} <input.sql> [options]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -o, --output <file>    Output file (default: stdout)");
    eprintln!("  -f, --format <kind>    Output: schema, scene (default: scene)");
    eprintln!("  -r, --radius <units>   Table circle radius (default: 10)");
    eprintln!("  -s, --samples <n>      Segments per connector (default: 50)");
    eprintln!("      --hover <t.col>    Print the highlight for a row instead");
    eprintln!("      --verbose          Debug logging on stderr");
    process::exit(1);
}

fn value<'a>(args: &'a [String], i: usize, program: &str) -> &'a str {
    match args.get(i) {
        Some(v) => v.as_str(),
        None => {
            eprintln!("Missing value for {}", args[i - 1]);
            usage(program);
        }
    }
}

fn parse_args(args: &[String]) -> Result<Options, Error> {
    let program = args.first().map(String::as_str).unwrap_or("ddlscape");
    if args.len() < 2 {
        usage(program);
    }

    let mut options = Options {
        input: PathBuf::from(&args[1]),
        output: None,
        format: Format::Scene,
        engine: LayoutEngine::default(),
        hover: None,
        verbose: false,
    };

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => {
                i += 1;
                options.output = Some(PathBuf::from(value(args, i, program)));
            }
            "-f" | "--format" => {
                i += 1;
                let v = value(args, i, program);
                options.format = Format::from_str(v).unwrap_or_else(|| {
                    eprintln!("Invalid format: {}", v);
                    process::exit(1);
                });
            }
            "-r" | "--radius" => {
                i += 1;
                let v = value(args, i, program);
                options.engine.radius = v.parse().unwrap_or_else(|_| {
                    eprintln!("Invalid radius: {}", v);
                    process::exit(1);
                });
            }
            "-s" | "--samples" => {
                i += 1;
                let v = value(args, i, program);
                options.engine.connectors.samples = v.parse().unwrap_or_else(|_| {
                    eprintln!("Invalid sample count: {}", v);
                    process::exit(1);
                });
            }
            "--hover" => {
                i += 1;
                let v = value(args, i, program);
                options.hover = Some(RowTag::parse(v).ok_or_else(|| Error::InvalidRow(v.to_string()))?);
            }
            "--verbose" => options.verbose = true,
            other => {
                eprintln!("Unknown option: {}", other);
                usage(program);
            }
        }
        i += 1;
    }

    Ok(options)
}

fn run(options: Options) -> Result<(), Error> {
    let input = fs::read_to_string(&options.input).map_err(|source| Error::Read {
        path: options.input.clone(),
        source,
    })?;

    let schema = parse_ddl(&input);
    tracing::info!(
        tables = schema.tables.len(),
        columns = schema.column_count(),
        foreign_keys = schema.foreign_key_count(),
        "parsed {}",
        options.input.display()
    );

    let output = match (&options.hover, options.format) {
        (Some(anchor), _) => {
            let config = SceneConfig {
                layout: options.engine,
                ..SceneConfig::default()
            };
            let scene = Scene::build(schema, config);
            let mut state = scene.highlight_state();
            scene.propagator().highlight(anchor, &mut state);

            let rows: Vec<String> = state.highlighted_rows().iter().map(|t| t.to_string()).collect();
            serde_json::to_string_pretty(&json!({
                "anchor": anchor.to_string(),
                "rows": rows,
                "links": state.highlighted_links(),
            }))?
        }
        (None, Format::Schema) => serde_json::to_string_pretty(&schema)?,
        (None, Format::Scene) => {
            let config = SceneConfig {
                layout: options.engine,
                ..SceneConfig::default()
            };
            Scene::build(schema, config).to_json()?
        }
    };

    match options.output {
        Some(path) => fs::write(&path, &output).map_err(|source| Error::Write { path, source })?,
        None => println!("{}", output),
    }

    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let options = match parse_args(&args) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let level = if options.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(options) {
        tracing::error!(error = %e, "ddlscape failed");
        process::exit(1);
    }
}
