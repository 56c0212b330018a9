use clap::{Arg, ArgAction, ArgMatches, Command};
use log::{debug, info};
use snapcode_core::{
    generate, generate_error_report, GenCodeRequest, GraphDocument, InputError, OutputFormat, Settings,
    SnapcodeErrorExt,
};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let cli = Command::new("snapcode")
        .version("0.1.0")
        .about("Turn a captured object graph into source that rebuilds it");

    let cli = setup_cli(cli);
    let matches = cli.get_matches();
    match dispatch_commands(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", generate_error_report(e.as_ref()));
            ExitCode::FAILURE
        }
    }
}

/// Sets up the CLI with subcommands and arguments.
fn setup_cli(cli: Command) -> Command {
    cli.subcommand(
        Command::new("gen")
            .about("Generate code for the root of a graph document")
            .arg(
                Arg::new("file")
                    .help("The graph document (JSON)")
                    .required(true)
                    .index(1),
            )
            .arg(
                Arg::new("name")
                    .help("Variable name for the root")
                    .short('n')
                    .long("name")
                    .value_parser(clap::value_parser!(String))
                    .value_name("NAME"),
            )
            .arg(
                Arg::new("type")
                    .help("Declared type for the root")
                    .short('t')
                    .long("type")
                    .value_parser(clap::value_parser!(String))
                    .value_name("TYPE"),
            )
            .arg(
                Arg::new("settings")
                    .help("Settings file (JSON, camelCase keys)")
                    .short('s')
                    .long("settings")
                    .value_parser(clap::value_parser!(PathBuf))
                    .value_name("FILE"),
            )
            .arg(
                Arg::new("format")
                    .help("Output format")
                    .short('f')
                    .long("format")
                    .value_parser(["native", "java", "json"])
                    .value_name("FORMAT"),
            )
            .arg(
                Arg::new("max-level")
                    .help("Values deeper than this render as null")
                    .long("max-level")
                    .value_parser(clap::value_parser!(usize))
                    .value_name("LEVEL"),
            )
            .arg(
                Arg::new("compact")
                    .help("Write data notation on a single line")
                    .long("compact")
                    .action(ArgAction::SetTrue),
            )
            .arg(
                Arg::new("output")
                    .help("Specify the output file")
                    .short('o')
                    .long("output")
                    .value_parser(clap::value_parser!(PathBuf))
                    .value_name("FILE"),
            ),
    )
    .subcommand(
        Command::new("settings")
            .about("Print the effective settings as JSON")
            .arg(
                Arg::new("settings")
                    .help("Settings file to merge over the defaults")
                    .index(1)
                    .value_parser(clap::value_parser!(PathBuf)),
            ),
    )
}

/// Dispatches the command based on the parsed arguments.
fn dispatch_commands(matches: &ArgMatches) -> Result<(), Box<dyn SnapcodeErrorExt>> {
    match matches.subcommand() {
        Some(("gen", sub_m)) => run_gen(sub_m),
        Some(("settings", sub_m)) => {
            let settings = load_settings(sub_m.get_one::<PathBuf>("settings"))?;
            let text = serde_json::to_string_pretty(&settings)
                .map_err(|e| InputError::settings(format!("cannot serialize settings: {}", e)))?;
            println!("{}", text);
            Ok(())
        }
        _ => {
            println!("No valid subcommand was used. Use --help for more information.");
            Ok(())
        }
    }
}

fn load_settings(path: Option<&PathBuf>) -> Result<Settings, InputError> {
    match path {
        Some(path) => {
            debug!("loading settings from {:?}", path);
            Settings::load(path)
        }
        None => Ok(Settings::default()),
    }
}

fn run_gen(sub_m: &ArgMatches) -> Result<(), Box<dyn SnapcodeErrorExt>> {
    let mut settings = load_settings(sub_m.get_one::<PathBuf>("settings"))?;
    if let Some(format) = sub_m.get_one::<String>("format") {
        settings.format = match format.as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Native,
        };
    }
    if let Some(level) = sub_m.get_one::<usize>("max-level") {
        settings.max_level = *level;
    }
    if sub_m.get_flag("compact") {
        settings.pretty_format = false;
    }

    let mut request = GenCodeRequest::new(settings);
    if let Some(name) = sub_m.get_one::<String>("name") {
        request = request.with_variable_name(name.clone());
    }
    if let Some(type_name) = sub_m.get_one::<String>("type") {
        request = request.with_variable_type(type_name.clone());
    }

    // `file` is a required argument, so clap has already rejected a missing one.
    let file = sub_m
        .get_one::<String>("file")
        .map(PathBuf::from)
        .unwrap_or_default();
    let document = GraphDocument::load(&file)?;
    let (graph, root) = document.into_graph()?;
    info!("loaded {} objects from {:?}", graph.len(), file);

    let mut text = generate(&root, &graph, &request)?;
    if !text.ends_with('\n') {
        text.push('\n');
    }

    match sub_m.get_one::<PathBuf>("output") {
        Some(output_file) => {
            fs::write(output_file, &text)
                .map_err(|e| InputError::output(format!("cannot write {:?}: {}", output_file, e)))?;
        }
        None => print!("{}", text),
    }
    Ok(())
}
