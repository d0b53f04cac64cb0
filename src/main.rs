use algo::{api::DEFAULT_BASE_PATH, CreateOptions};
use clap::{
    crate_authors, crate_description, crate_name, crate_version, Arg, ArgAction, ArgMatches,
    Command,
};

// The CLI layer should only parse inputs and forward them to library code.
fn main() -> miette::Result<()> {
    let matches = Command::new(crate_name!())
        .about(crate_description!())
        .author(crate_authors!())
        .version(crate_version!())
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("create")
                .about("Create a Go project and don't worry about the structure")
                .long_about(
                    "Lets you focus on the actual Go code, and not the project structure. \
                     Perfect for someone new to the Go language",
                )
                .arg(
                    Arg::new("path")
                        .short('p')
                        .long("path")
                        .help("Base path for the project")
                        .default_value(DEFAULT_BASE_PATH),
                )
                .arg(
                    Arg::new("module")
                        .short('m')
                        .long("module")
                        .help("Go module path, defaults to the last component of the base path"),
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .help("Print the tree that would be generated and exit")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("skip-mod-init")
                        .long("skip-mod-init")
                        .help("Do not run `go mod init` after generating the files")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("version").about("Print the version number"))
        .get_matches();

    let is_verbose = matches.get_flag("verbose");

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if is_verbose { "debug" } else { "warn" }),
    )
    .init();

    match matches.subcommand() {
        Some(("create", args)) => handle_create(args)?,
        Some(("version", _)) => println!("{} v{}", crate_name!(), crate_version!()),
        _ => unreachable!(),
    }

    Ok(())
}

fn handle_create(args: &ArgMatches) -> Result<(), algo::AlgoError> {
    let base_path = args
        .get_one::<String>("path")
        .cloned()
        .unwrap_or_else(|| DEFAULT_BASE_PATH.to_string());

    let options = CreateOptions {
        base_path,
        module: args.get_one::<String>("module").cloned(),
        dry_run: args.get_flag("dry-run"),
        init_module: !args.get_flag("skip-mod-init"),
    };

    log::debug!("creating project with {:?}", options);

    algo::create_project(&options)
}
